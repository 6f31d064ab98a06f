//! In-memory adapters for the query ports.

use std::collections::HashMap;

use parking_lot::RwLock;
use tracing::{debug, info};

use crate::catalog::{Assignment, AssignmentId, Context, Course, CourseId};
use crate::error::{Error, Result};
use crate::ports::{CourseCatalog, UserDirectory, UserStore};
use crate::types::{User, UserId};

#[derive(Debug, Default)]
struct DirectoryState {
    /// All users by ID.
    users: HashMap<UserId, User>,
    /// Index: name -> user ID.
    names: HashMap<String, UserId>,
    /// Insertion order.
    order: Vec<UserId>,
}

/// Thread-safe user directory held in memory.
///
/// Iteration follows insertion order, so listings are stable.
#[derive(Debug, Default)]
pub struct InMemoryDirectory {
    state: RwLock<DirectoryState>,
}

impl InMemoryDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a directory holding `users`.
    ///
    /// # Errors
    ///
    /// Returns an error on the first duplicated ID or name.
    pub fn with_users(users: impl IntoIterator<Item = User>) -> Result<Self> {
        let directory = Self::new();
        for user in users {
            directory.insert(user)?;
        }
        Ok(directory)
    }

    /// Number of users held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.state.read().order.len()
    }

    /// True when no users are held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl UserDirectory for InMemoryDirectory {
    fn find(&self, id: &UserId) -> Option<User> {
        self.state.read().users.get(id).cloned()
    }

    fn find_by_name(&self, name: &str) -> Option<User> {
        let state = self.state.read();
        state
            .names
            .get(name)
            .and_then(|id| state.users.get(id))
            .cloned()
    }

    fn find_by_email(&self, email: &str) -> Option<User> {
        let state = self.state.read();
        state
            .order
            .iter()
            .filter_map(|id| state.users.get(id))
            .find(|u| u.email == email)
            .cloned()
    }

    fn all(&self) -> Vec<User> {
        let state = self.state.read();
        state
            .order
            .iter()
            .filter_map(|id| state.users.get(id))
            .cloned()
            .collect()
    }

    // Predicates may query the directory again, so they run on a snapshot
    // taken outside the lock.
    fn filter(&self, predicate: &dyn Fn(&User) -> bool) -> Vec<User> {
        self.all().into_iter().filter(|u| predicate(u)).collect()
    }
}

impl UserStore for InMemoryDirectory {
    fn insert(&self, user: User) -> Result<()> {
        let mut state = self.state.write();

        if state.names.contains_key(&user.name) {
            return Err(Error::UserNameExists { name: user.name });
        }
        if state.users.contains_key(&user.id) {
            return Err(Error::InvalidUserId {
                reason: format!("user id already in use: {}", user.id),
            });
        }

        info!(user_id = %user.id, user_name = %user.name, role = %user.role, "added user");
        state.names.insert(user.name.clone(), user.id.clone());
        state.order.push(user.id.clone());
        state.users.insert(user.id.clone(), user);
        Ok(())
    }

    fn update(&self, user: User) -> Result<()> {
        let mut state = self.state.write();

        let previous_name = state
            .users
            .get(&user.id)
            .map(|u| u.name.clone())
            .ok_or_else(|| Error::UserNotFound {
                id: user.id.to_string(),
            })?;

        if previous_name != user.name {
            if state.names.contains_key(&user.name) {
                return Err(Error::UserNameExists { name: user.name });
            }
            state.names.remove(&previous_name);
            state.names.insert(user.name.clone(), user.id.clone());
        }

        debug!(user_id = %user.id, user_name = %user.name, "updated user");
        state.users.insert(user.id.clone(), user);
        Ok(())
    }
}

/// Course and assignment membership held in memory.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    courses: RwLock<Vec<Course>>,
    assignments: RwLock<Vec<Assignment>>,
}

impl InMemoryCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a catalog from existing records.
    #[must_use]
    pub fn with_records(courses: Vec<Course>, assignments: Vec<Assignment>) -> Self {
        Self {
            courses: RwLock::new(courses),
            assignments: RwLock::new(assignments),
        }
    }

    /// Adds or replaces a course.
    pub fn add_course(&self, course: Course) {
        let mut courses = self.courses.write();
        info!(course_id = %course.id, instructor_id = %course.instructor_id, "added course");
        courses.retain(|c| c.id != course.id);
        courses.push(course);
    }

    /// Adds or replaces an assignment.
    pub fn add_assignment(&self, assignment: Assignment) {
        let mut assignments = self.assignments.write();
        info!(
            assignment_id = %assignment.id,
            instructor_id = %assignment.instructor_id,
            "added assignment"
        );
        assignments.retain(|a| a.id != assignment.id);
        assignments.push(assignment);
    }

    /// Returns a course by ID.
    #[must_use]
    pub fn course(&self, id: &CourseId) -> Option<Course> {
        self.courses.read().iter().find(|c| &c.id == id).cloned()
    }

    /// Returns an assignment by ID.
    #[must_use]
    pub fn assignment(&self, id: &AssignmentId) -> Option<Assignment> {
        self.assignments.read().iter().find(|a| &a.id == id).cloned()
    }

    /// Returns every course in insertion order.
    #[must_use]
    pub fn courses(&self) -> Vec<Course> {
        self.courses.read().clone()
    }

    /// Returns every assignment in insertion order.
    #[must_use]
    pub fn assignments(&self) -> Vec<Assignment> {
        self.assignments.read().clone()
    }
}

impl CourseCatalog for InMemoryCatalog {
    fn courses_taught_by(&self, instructor: &UserId) -> Vec<CourseId> {
        self.courses
            .read()
            .iter()
            .filter(|c| &c.instructor_id == instructor)
            .map(|c| c.id.clone())
            .collect()
    }

    fn assignments_taught_by(&self, instructor: &UserId) -> Vec<AssignmentId> {
        self.assignments
            .read()
            .iter()
            .filter(|a| &a.instructor_id == instructor)
            .map(|a| a.id.clone())
            .collect()
    }

    fn courses_assisted_by(&self, ta: &UserId) -> Vec<CourseId> {
        self.courses
            .read()
            .iter()
            .filter(|c| c.teaching_assistants.contains(ta))
            .map(|c| c.id.clone())
            .collect()
    }

    fn assignments_in(&self, course: &CourseId) -> Vec<AssignmentId> {
        self.assignments
            .read()
            .iter()
            .filter(|a| a.course_id.as_ref() == Some(course))
            .map(|a| a.id.clone())
            .collect()
    }

    fn participants_of(&self, context: &Context) -> Vec<UserId> {
        match context {
            Context::Course(id) => self
                .courses
                .read()
                .iter()
                .find(|c| &c.id == id)
                .map(|c| c.participants.clone())
                .unwrap_or_default(),
            Context::Assignment(id) => self
                .assignments
                .read()
                .iter()
                .find(|a| &a.id == id)
                .map(|a| a.participants.clone())
                .unwrap_or_default(),
        }
    }
}
