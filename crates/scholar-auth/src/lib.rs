//! User roles, hierarchy and authorization for Scholar.
//!
//! This crate answers the questions a peer-review platform asks about its
//! users:
//!
//! - **Roles**: five ordered tiers from student to super administrator, with
//!   privilege comparison ([`Role::has_all_privileges_of`])
//! - **Hierarchy**: who created whom, and whether one user is a recursive
//!   parent of another
//! - **Impersonation**: whether an actor may act as a target
//!   ([`AccessPolicy::can_impersonate`])
//! - **Visibility**: which users an actor may list ([`AccessPolicy::user_list`])
//! - **Lookup**: resolving users from logins and request parameters
//! - **Validation**: collecting every field failure of a user record
//!
//! Data is read through the [`UserDirectory`] and [`CourseCatalog`] ports;
//! [`InMemoryDirectory`] and [`InMemoryCatalog`] implement them in memory.
//!
//! # Example
//!
//! ```
//! use scholar_auth::{
//!     AccessPolicy, InMemoryCatalog, InMemoryDirectory, Role, User, UserStore,
//! };
//!
//! let directory = InMemoryDirectory::new();
//! let catalog = InMemoryCatalog::new();
//!
//! let instructor = User::new("inst", "inst@example.edu", Role::Instructor);
//! let student = User::new("stu", "stu@example.edu", Role::Student).with_parent(&instructor.id);
//! directory.insert(instructor.clone())?;
//! directory.insert(student.clone())?;
//!
//! let policy = AccessPolicy::new(&directory, &catalog);
//! assert!(policy.can_impersonate(&instructor, &student));
//! assert!(!policy.can_impersonate(&student, &instructor));
//! # Ok::<(), scholar_auth::Error>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod catalog;
pub mod config;
pub mod error;
pub mod hierarchy;
pub mod lookup;
pub mod memory;
pub mod policy;
pub mod ports;
pub mod types;
pub mod validation;
pub mod visibility;

pub use catalog::{Assignment, AssignmentId, Context, Course, CourseId};
pub use config::PolicyConfig;
pub use error::{Error, Result};
pub use lookup::{find_by_login, from_params, UserNameParam, UserParams};
pub use memory::{InMemoryCatalog, InMemoryDirectory};
pub use policy::AccessPolicy;
pub use ports::{CourseCatalog, UserDirectory, UserStore};
pub use types::{EmailPreferences, Role, User, UserId};
pub use validation::{is_valid, validate_user, Credentials};
