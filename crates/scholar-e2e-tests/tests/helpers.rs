//! Test helpers for E2E tests.

#![allow(dead_code)]

use scholar_auth::{
    Assignment, AssignmentId, Course, CourseId, InMemoryCatalog, InMemoryDirectory, Role, User,
    UserDirectory,
};

/// A small institution: one course with an assignment, a second course run
/// by another instructor, and users at every tier.
///
/// ```text
/// root (Super-Administrator)
/// └── admin (Administrator)
///     ├── inst (Instructor) ── owns c1 and a1
///     │   ├── ta (Teaching Assistant) ── assists c1
///     │   └── stu1 (Student) ── in c1
///     └── other (Instructor) ── owns c2
///         ├── stu2 (Student) ── in a1
///         └── stu3 (Student) ── in c2
/// ```
pub struct Campus {
    pub directory: InMemoryDirectory,
    pub catalog: InMemoryCatalog,
}

impl Campus {
    pub fn new() -> Self {
        let root = user("root", Role::SuperAdministrator);
        let admin = user("admin", Role::Administrator).with_parent(&root.id);
        let inst = user("inst", Role::Instructor).with_parent(&admin.id);
        let other = user("other", Role::Instructor).with_parent(&admin.id);
        let ta = user("ta", Role::TeachingAssistant)
            .with_parent(&inst.id)
            .with_instructor(&inst.id);
        let stu1 = user("stu1", Role::Student).with_parent(&inst.id);
        let stu2 = user("stu2", Role::Student).with_parent(&other.id);
        let stu3 = user("stu3", Role::Student).with_parent(&other.id);

        let c1 = CourseId::new("c1");
        let courses = vec![
            Course::new(c1.clone(), "OODD", &inst.id)
                .with_teaching_assistant(&ta.id)
                .with_participant(&stu1.id),
            Course::new(CourseId::new("c2"), "Compilers", &other.id).with_participant(&stu3.id),
        ];
        let assignments = vec![Assignment::new(AssignmentId::new("a1"), "Wiki", &inst.id)
            .in_course(&c1)
            .with_participant(&stu2.id)];

        let directory =
            InMemoryDirectory::with_users([root, admin, inst, other, ta, stu1, stu2, stu3])
                .expect("campus users are unique");

        Self {
            directory,
            catalog: InMemoryCatalog::with_records(courses, assignments),
        }
    }

    /// Looks up a campus user by name.
    pub fn get(&self, name: &str) -> User {
        self.directory
            .find_by_name(name)
            .unwrap_or_else(|| unreachable!("no campus user named {name}"))
    }
}

/// A user named `name` with a matching campus email.
pub fn user(name: &str, role: Role) -> User {
    User::new(name, format!("{name}@campus.edu"), role).with_full_name(format!("{name} full"))
}

/// Names of `users`, in order.
pub fn names(users: &[User]) -> Vec<String> {
    users.iter().map(|u| u.name.clone()).collect()
}
