//! Access policy evaluation.
//!
//! [`AccessPolicy`] answers who may act as whom and who may see whom. It reads
//! users and course membership through the ports it is built with and never
//! mutates them.

use tracing::{debug, warn};

use crate::catalog::Context;
use crate::config::PolicyConfig;
use crate::error::{Error, Result};
use crate::hierarchy;
use crate::ports::{CourseCatalog, UserDirectory};
use crate::types::{Role, User, UserId};
use crate::visibility;

/// Authorization checks over a user directory and a course catalog.
pub struct AccessPolicy<'a> {
    users: &'a dyn UserDirectory,
    catalog: &'a dyn CourseCatalog,
    config: PolicyConfig,
}

impl<'a> AccessPolicy<'a> {
    /// Creates a policy with the default configuration.
    #[must_use]
    pub fn new(users: &'a dyn UserDirectory, catalog: &'a dyn CourseCatalog) -> Self {
        Self {
            users,
            catalog,
            config: PolicyConfig::default(),
        }
    }

    /// Creates a policy with a custom configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if the configuration fails validation.
    pub fn with_config(
        users: &'a dyn UserDirectory,
        catalog: &'a dyn CourseCatalog,
        config: PolicyConfig,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            users,
            catalog,
            config,
        })
    }

    /// Returns the active configuration.
    #[must_use]
    pub fn config(&self) -> &PolicyConfig {
        &self.config
    }

    /// Checks whether `actor` may act as `target`.
    ///
    /// True for a super administrator, for the target's teaching assistant,
    /// and for any recursive parent of the target.
    #[must_use]
    pub fn can_impersonate(&self, actor: &User, target: &User) -> bool {
        let allowed = actor.is_super_admin()
            || self.is_teaching_assistant_for(actor, target)
            || self.is_recursively_parent_of(actor, target);
        debug!(actor = %actor.name, target = %target.name, allowed, "evaluated impersonation");
        allowed
    }

    /// Like [`Self::can_impersonate`], but fails when not allowed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PermissionDenied`] if `actor` may not act as `target`.
    pub fn require_impersonation(&self, actor: &User, target: &User) -> Result<()> {
        if self.can_impersonate(actor, target) {
            return Ok(());
        }
        warn!(actor = %actor.name, target = %target.name, "impersonation denied");
        Err(Error::PermissionDenied {
            reason: format!("{} cannot impersonate {}", actor.name, target.name),
        })
    }

    /// Checks whether `actor` is a teaching assistant for `target`.
    ///
    /// The actor must be a teaching assistant and the target a student who
    /// participates in a course the actor assists, or in an assignment of
    /// such a course.
    #[must_use]
    pub fn is_teaching_assistant_for(&self, actor: &User, target: &User) -> bool {
        if !actor.is_teaching_assistant() {
            return false;
        }
        if target.role.has_all_privileges_of(Role::TeachingAssistant) {
            return false;
        }

        self.catalog
            .courses_assisted_by(&actor.id)
            .into_iter()
            .any(|course| {
                self.participates(&Context::Course(course.clone()), &target.id)
                    || self
                        .catalog
                        .assignments_in(&course)
                        .into_iter()
                        .any(|a| self.participates(&Context::Assignment(a), &target.id))
            })
    }

    /// Checks whether `actor` appears in `target`'s parent chain.
    ///
    /// See [`hierarchy::is_recursively_parent_of`] for where the walk stops.
    #[must_use]
    pub fn is_recursively_parent_of(&self, actor: &User, target: &User) -> bool {
        hierarchy::is_recursively_parent_of(
            self.users,
            actor,
            target,
            self.config.max_ancestry_depth,
        )
    }

    /// Returns `user`'s creators, nearest first, up to the configured depth.
    #[must_use]
    pub fn ancestors_of(&self, user: &User) -> Vec<User> {
        hierarchy::ancestors_of(self.users, user, self.config.max_ancestry_depth)
    }

    /// Returns the users visible to `actor`.
    #[must_use]
    pub fn user_list(&self, actor: &User) -> Vec<User> {
        visibility::user_list(self.users, self.catalog, actor, &self.config)
    }

    /// Returns up to the configured number of users matching `prefix` whose
    /// role `actor` has all privileges of.
    #[must_use]
    pub fn available_users(&self, actor: &User, prefix: &str) -> Vec<User> {
        visibility::available_users(self.users, actor, prefix, &self.config)
    }

    /// Resolves the instructor `user` works under and loads it.
    ///
    /// # Errors
    ///
    /// Propagates [`User::instructor_id`] errors and returns
    /// [`Error::UserNotFound`] if the instructor is not in the directory.
    pub fn get_instructor(&self, user: &User) -> Result<User> {
        let id = user.instructor_id()?;
        self.find(&id)
    }

    fn find(&self, id: &UserId) -> Result<User> {
        self.users.find(id).ok_or_else(|| Error::UserNotFound {
            id: id.to_string(),
        })
    }

    fn participates(&self, context: &Context, user: &UserId) -> bool {
        self.catalog.participants_of(context).contains(user)
    }
}

impl std::fmt::Debug for AccessPolicy<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessPolicy")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Assignment, AssignmentId, Course, CourseId};
    use crate::memory::{InMemoryCatalog, InMemoryDirectory};
    use crate::ports::UserStore;

    struct World {
        directory: InMemoryDirectory,
        catalog: InMemoryCatalog,
    }

    impl World {
        fn new() -> Self {
            Self {
                directory: InMemoryDirectory::new(),
                catalog: InMemoryCatalog::new(),
            }
        }

        fn add(&self, user: User) -> User {
            assert!(self.directory.insert(user.clone()).is_ok());
            user
        }

        fn policy(&self) -> AccessPolicy<'_> {
            AccessPolicy::new(&self.directory, &self.catalog)
        }
    }

    // ===================
    // can_impersonate Tests
    // ===================

    #[test]
    fn super_admin_can_impersonate_anyone() {
        let world = World::new();
        let root = world.add(User::new("root", "root@x.com", Role::SuperAdministrator));
        let other = world.add(User::new("other", "o@x.com", Role::Administrator));

        assert!(world.policy().can_impersonate(&root, &other));
        assert!(world.policy().require_impersonation(&root, &other).is_ok());
    }

    #[test]
    fn ta_of_target_can_impersonate() {
        let world = World::new();
        let instructor = world.add(User::new("inst", "i@x.com", Role::Instructor));
        let ta = world.add(User::new("ta", "ta@x.com", Role::TeachingAssistant));
        let student = world.add(User::new("stu", "s@x.com", Role::Student));
        world.catalog.add_course(
            Course::new(CourseId::new("c1"), "C1", &instructor.id)
                .with_teaching_assistant(&ta.id)
                .with_participant(&student.id),
        );

        assert!(world.policy().is_teaching_assistant_for(&ta, &student));
        assert!(world.policy().can_impersonate(&ta, &student));
    }

    #[test]
    fn recursive_parent_can_impersonate() {
        let world = World::new();
        let admin = world.add(User::new("admin", "ad@x.com", Role::Administrator));
        let inst =
            world.add(User::new("inst", "i@x.com", Role::Instructor).with_parent(&admin.id));
        let student = world.add(User::new("stu", "s@x.com", Role::Student).with_parent(&inst.id));

        assert!(world.policy().can_impersonate(&admin, &student));
        assert!(!world.policy().can_impersonate(&student, &admin));
    }

    #[test]
    fn ancestors_follow_configured_depth() {
        let world = World::new();
        let admin = world.add(User::new("admin", "ad@x.com", Role::Administrator));
        let inst =
            world.add(User::new("inst", "i@x.com", Role::Instructor).with_parent(&admin.id));
        let student = world.add(User::new("stu", "s@x.com", Role::Student).with_parent(&inst.id));

        let names: Vec<String> = world
            .policy()
            .ancestors_of(&student)
            .into_iter()
            .map(|u| u.name)
            .collect();
        assert_eq!(names, vec!["inst", "admin"]);

        let shallow = PolicyConfig {
            max_ancestry_depth: 1,
            ..PolicyConfig::default()
        };
        let policy = AccessPolicy::with_config(&world.directory, &world.catalog, shallow)
            .expect("valid config");
        assert_eq!(policy.ancestors_of(&student).len(), 1);
        assert!(policy.ancestors_of(&admin).is_empty());
    }

    #[test]
    fn unrelated_user_cannot_impersonate() {
        let world = World::new();
        let inst = world.add(User::new("inst", "i@x.com", Role::Instructor));
        let student = world.add(User::new("stu", "s@x.com", Role::Student));

        assert!(!world.policy().can_impersonate(&inst, &student));
        let err = world.policy().require_impersonation(&inst, &student);
        assert!(matches!(err, Err(Error::PermissionDenied { .. })));
    }

    // ===================
    // is_teaching_assistant_for Tests
    // ===================

    #[test]
    fn non_ta_is_never_teaching_assistant_for() {
        let world = World::new();
        let inst = world.add(User::new("inst", "i@x.com", Role::Instructor));
        let student = world.add(User::new("stu", "s@x.com", Role::Student));
        world.catalog.add_course(
            Course::new(CourseId::new("c1"), "C1", &inst.id)
                .with_teaching_assistant(&inst.id)
                .with_participant(&student.id),
        );

        assert!(!world.policy().is_teaching_assistant_for(&inst, &student));
    }

    #[test]
    fn ta_is_not_teaching_assistant_for_non_student() {
        let world = World::new();
        let inst = world.add(User::new("inst", "i@x.com", Role::Instructor));
        let ta = world.add(User::new("ta", "ta@x.com", Role::TeachingAssistant));
        let other_ta = world.add(User::new("ta2", "ta2@x.com", Role::TeachingAssistant));
        world.catalog.add_course(
            Course::new(CourseId::new("c1"), "C1", &inst.id)
                .with_teaching_assistant(&ta.id)
                .with_participant(&other_ta.id)
                .with_participant(&inst.id),
        );

        assert!(!world.policy().is_teaching_assistant_for(&ta, &other_ta));
        assert!(!world.policy().is_teaching_assistant_for(&ta, &inst));
    }

    #[test]
    fn ta_covers_assignments_of_assisted_courses() {
        let world = World::new();
        let inst = world.add(User::new("inst", "i@x.com", Role::Instructor));
        let ta = world.add(User::new("ta", "ta@x.com", Role::TeachingAssistant));
        let student = world.add(User::new("stu", "s@x.com", Role::Student));
        let outsider = world.add(User::new("out", "o@x.com", Role::Student));
        let course = CourseId::new("c1");
        world.catalog.add_course(
            Course::new(course.clone(), "C1", &inst.id).with_teaching_assistant(&ta.id),
        );
        world.catalog.add_assignment(
            Assignment::new(AssignmentId::new("a1"), "A1", &inst.id)
                .in_course(&course)
                .with_participant(&student.id),
        );
        world.catalog.add_assignment(
            Assignment::new(AssignmentId::new("a2"), "A2", &inst.id).with_participant(&outsider.id),
        );

        assert!(world.policy().is_teaching_assistant_for(&ta, &student));
        assert!(!world.policy().is_teaching_assistant_for(&ta, &outsider));
    }

    // ===================
    // Instructor Resolution Tests
    // ===================

    #[test]
    fn get_instructor_for_ta() {
        let world = World::new();
        let inst = world.add(User::new("inst", "i@x.com", Role::Instructor));
        let ta = world.add(
            User::new("ta", "ta@x.com", Role::TeachingAssistant).with_instructor(&inst.id),
        );

        assert_eq!(
            world.policy().get_instructor(&ta).ok().map(|u| u.name),
            Some("inst".to_string())
        );
        assert_eq!(
            world.policy().get_instructor(&inst).ok().map(|u| u.id),
            Some(inst.id.clone())
        );
    }

    #[test]
    fn get_instructor_missing_record() {
        let world = World::new();
        let ghost = UserId::new();
        let ta = world.add(
            User::new("ta", "ta@x.com", Role::TeachingAssistant).with_instructor(&ghost),
        );
        assert!(matches!(
            world.policy().get_instructor(&ta),
            Err(Error::UserNotFound { .. })
        ));
    }

    #[test]
    fn with_config_validates() {
        let world = World::new();
        let bad = PolicyConfig {
            max_ancestry_depth: 0,
            ..PolicyConfig::default()
        };
        assert!(AccessPolicy::with_config(&world.directory, &world.catalog, bad).is_err());
        let ok = AccessPolicy::with_config(
            &world.directory,
            &world.catalog,
            PolicyConfig::default(),
        );
        assert!(ok.is_ok());
    }
}
