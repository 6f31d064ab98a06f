//! Query ports the policy reads through.
//!
//! The authorization code never reaches for global state: callers hand it a
//! [`UserDirectory`] and a [`CourseCatalog`]. In-memory adapters live in
//! [`crate::memory`].

use crate::catalog::{AssignmentId, Context, CourseId};
use crate::error::Result;
use crate::types::{User, UserId};

/// Read access to users.
pub trait UserDirectory {
    /// Finds a user by ID.
    fn find(&self, id: &UserId) -> Option<User>;

    /// Finds a user by exact login name.
    fn find_by_name(&self, name: &str) -> Option<User>;

    /// Finds a user by exact email address.
    fn find_by_email(&self, email: &str) -> Option<User>;

    /// Returns every user in directory order.
    fn all(&self) -> Vec<User>;

    /// Returns the users matching `predicate`, in directory order.
    fn filter(&self, predicate: &dyn Fn(&User) -> bool) -> Vec<User> {
        self.all().into_iter().filter(|u| predicate(u)).collect()
    }
}

/// Write access to users, used by roster import.
pub trait UserStore: UserDirectory {
    /// Adds a new user.
    ///
    /// # Errors
    ///
    /// Returns an error if the ID or name is already in use.
    fn insert(&self, user: User) -> Result<()>;

    /// Replaces an existing user, matched by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the user does not exist or the new name collides
    /// with another user.
    fn update(&self, user: User) -> Result<()>;
}

/// Read access to course and assignment membership.
pub trait CourseCatalog {
    /// Courses owned by `instructor`.
    fn courses_taught_by(&self, instructor: &UserId) -> Vec<CourseId>;

    /// Assignments owned by `instructor`.
    fn assignments_taught_by(&self, instructor: &UserId) -> Vec<AssignmentId>;

    /// Courses `ta` is mapped to as a teaching assistant.
    fn courses_assisted_by(&self, ta: &UserId) -> Vec<CourseId>;

    /// Assignments belonging to `course`.
    fn assignments_in(&self, course: &CourseId) -> Vec<AssignmentId>;

    /// Users participating in `context`.
    fn participants_of(&self, context: &Context) -> Vec<UserId>;
}
