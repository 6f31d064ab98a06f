//! Courses, assignments and the participation contexts that link users to them.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::UserId;

/// Identifier of a course.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CourseId(String);

impl CourseId {
    /// Creates a course identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CourseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of an assignment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssignmentId(String);

impl AssignmentId {
    /// Creates an assignment identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AssignmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Something users participate in.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Context {
    /// Enrolment in a course.
    Course(CourseId),
    /// Assignment to an assignment.
    Assignment(AssignmentId),
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Course(id) => write!(f, "course:{id}"),
            Self::Assignment(id) => write!(f, "assignment:{id}"),
        }
    }
}

/// A course owned by an instructor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    /// Course identifier.
    pub id: CourseId,
    /// Course title.
    pub name: String,
    /// Owning instructor.
    pub instructor_id: UserId,
    /// Teaching assistants mapped to the course.
    #[serde(default)]
    pub teaching_assistants: Vec<UserId>,
    /// Enrolled users.
    #[serde(default)]
    pub participants: Vec<UserId>,
}

impl Course {
    /// Creates an empty course.
    #[must_use]
    pub fn new(id: CourseId, name: impl Into<String>, instructor_id: &UserId) -> Self {
        Self {
            id,
            name: name.into(),
            instructor_id: instructor_id.clone(),
            teaching_assistants: Vec::new(),
            participants: Vec::new(),
        }
    }

    /// Maps a teaching assistant to the course.
    #[must_use]
    pub fn with_teaching_assistant(mut self, ta: &UserId) -> Self {
        if !self.teaching_assistants.contains(ta) {
            self.teaching_assistants.push(ta.clone());
        }
        self
    }

    /// Enrols a participant.
    #[must_use]
    pub fn with_participant(mut self, user: &UserId) -> Self {
        if !self.participants.contains(user) {
            self.participants.push(user.clone());
        }
        self
    }
}

/// An assignment, optionally belonging to a course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    /// Assignment identifier.
    pub id: AssignmentId,
    /// Assignment title.
    pub name: String,
    /// Course the assignment belongs to.
    #[serde(default)]
    pub course_id: Option<CourseId>,
    /// Owning instructor.
    pub instructor_id: UserId,
    /// Assigned users.
    #[serde(default)]
    pub participants: Vec<UserId>,
}

impl Assignment {
    /// Creates an assignment with no participants.
    #[must_use]
    pub fn new(id: AssignmentId, name: impl Into<String>, instructor_id: &UserId) -> Self {
        Self {
            id,
            name: name.into(),
            course_id: None,
            instructor_id: instructor_id.clone(),
            participants: Vec::new(),
        }
    }

    /// Places the assignment in a course.
    #[must_use]
    pub fn in_course(mut self, course: &CourseId) -> Self {
        self.course_id = Some(course.clone());
        self
    }

    /// Adds a participant.
    #[must_use]
    pub fn with_participant(mut self, user: &UserId) -> Self {
        if !self.participants.contains(user) {
            self.participants.push(user.clone());
        }
        self
    }
}
