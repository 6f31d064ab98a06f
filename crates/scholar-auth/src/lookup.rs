//! Resolving users from login strings and request parameters.

use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::ports::UserDirectory;
use crate::types::{User, UserId};

/// Finds a user by login.
///
/// An exact email match wins. Otherwise the part of `login` before `@` is
/// taken as a user name, and a user is returned only when exactly one user
/// has that name.
#[must_use]
pub fn find_by_login(directory: &dyn UserDirectory, login: &str) -> Option<User> {
    if let Some(user) = directory.find_by_email(login) {
        return Some(user);
    }

    let local = login.split('@').next().unwrap_or(login);
    let mut matches = directory.filter(&|u: &User| u.name == local);
    debug!(login, local, matches = matches.len(), "login fell back to name lookup");
    if matches.len() == 1 { matches.pop() } else { None }
}

/// Nested user fields of a request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UserNameParam {
    /// Login name.
    #[serde(default)]
    pub name: Option<String>,
}

/// Request parameters identifying a user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UserParams {
    /// User ID, takes precedence over `user.name`.
    #[serde(default)]
    pub user_id: Option<String>,
    /// Nested user fields.
    #[serde(default)]
    pub user: Option<UserNameParam>,
}

impl UserParams {
    /// Parameters naming a user ID.
    #[must_use]
    pub fn by_id(id: impl Into<String>) -> Self {
        Self {
            user_id: Some(id.into()),
            user: None,
        }
    }

    /// Parameters naming a user by login name.
    #[must_use]
    pub fn by_name(name: impl Into<String>) -> Self {
        Self {
            user_id: None,
            user: Some(UserNameParam {
                name: Some(name.into()),
            }),
        }
    }
}

/// Resolves the user a request refers to.
///
/// # Errors
///
/// Returns [`Error::UserNotFound`] if the parameters name no user or the
/// named user does not exist, and [`Error::InvalidUserId`] for a malformed ID.
pub fn from_params(directory: &dyn UserDirectory, params: &UserParams) -> Result<User> {
    if let Some(raw) = params.user_id.as_deref() {
        let id = UserId::from_string(raw)?;
        return directory.find(&id).ok_or_else(|| Error::UserNotFound {
            id: id.to_string(),
        });
    }

    let name = params
        .user
        .as_ref()
        .and_then(|u| u.name.as_deref())
        .ok_or_else(|| Error::UserNotFound {
            id: "<none>".to_string(),
        })?;

    directory
        .find_by_name(name)
        .ok_or_else(|| Error::UserNotFound {
            id: name.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryDirectory;
    use crate::ports::UserStore;
    use crate::types::Role;

    fn directory() -> InMemoryDirectory {
        let directory = InMemoryDirectory::new();
        for user in [
            User::with_id(
                UserId::from_string("u-1").unwrap_or_default(),
                "abc",
                "abcxyz@gmail.com",
                Role::Student,
            ),
            User::new("xyz", "other@mail.org", Role::Student),
        ] {
            assert!(directory.insert(user).is_ok());
        }
        directory
    }

    // ===================
    // find_by_login Tests
    // ===================

    #[test]
    fn finds_user_by_email() {
        let directory = directory();
        let user = find_by_login(&directory, "abcxyz@gmail.com");
        assert_eq!(user.map(|u| u.name), Some("abc".to_string()));
    }

    #[test]
    fn falls_back_to_local_part_as_name() {
        let directory = directory();
        let user = find_by_login(&directory, "xyz@unknown.edu");
        assert_eq!(user.map(|u| u.name), Some("xyz".to_string()));
    }

    #[test]
    fn plain_name_login() {
        let directory = directory();
        assert!(find_by_login(&directory, "abc").is_some());
        assert!(find_by_login(&directory, "nobody").is_none());
    }

    #[test]
    fn ambiguous_name_is_not_found() {
        struct Twins(Vec<User>);

        impl UserDirectory for Twins {
            fn find(&self, id: &UserId) -> Option<User> {
                self.0.iter().find(|u| &u.id == id).cloned()
            }
            fn find_by_name(&self, name: &str) -> Option<User> {
                self.0.iter().find(|u| u.name == name).cloned()
            }
            fn find_by_email(&self, email: &str) -> Option<User> {
                self.0.iter().find(|u| u.email == email).cloned()
            }
            fn all(&self) -> Vec<User> {
                self.0.clone()
            }
        }

        let twins = Twins(vec![
            User::new("abc", "one@x.com", Role::Student),
            User::new("abc", "two@x.com", Role::Student),
        ]);
        assert!(find_by_login(&twins, "abc@elsewhere.com").is_none());
        assert!(find_by_login(&twins, "two@x.com").is_some());
    }

    // ===================
    // from_params Tests
    // ===================

    #[test]
    fn returns_user_by_id() {
        let directory = directory();
        let user = from_params(&directory, &UserParams::by_id("u-1"));
        assert_eq!(user.ok().map(|u| u.name), Some("abc".to_string()));
    }

    #[test]
    fn returns_user_by_name() {
        let directory = directory();
        let user = from_params(&directory, &UserParams::by_name("xyz"));
        assert_eq!(user.ok().map(|u| u.email), Some("other@mail.org".to_string()));
    }

    #[test]
    fn user_id_takes_precedence() {
        let directory = directory();
        let params = UserParams {
            user_id: Some("u-1".to_string()),
            user: Some(UserNameParam {
                name: Some("xyz".to_string()),
            }),
        };
        let user = from_params(&directory, &params);
        assert_eq!(user.ok().map(|u| u.name), Some("abc".to_string()));
    }

    #[test]
    fn missing_user_is_an_error() {
        let directory = directory();
        assert!(matches!(
            from_params(&directory, &UserParams::by_name("nobody")),
            Err(Error::UserNotFound { .. })
        ));
        assert!(matches!(
            from_params(&directory, &UserParams::by_id("u-404")),
            Err(Error::UserNotFound { .. })
        ));
        assert!(matches!(
            from_params(&directory, &UserParams::default()),
            Err(Error::UserNotFound { .. })
        ));
    }

    #[test]
    fn params_deserialize_from_request_shape() {
        let params: UserParams =
            serde_json::from_str(r#"{"user":{"name":"xyz"}}"#).expect("parse params");
        assert_eq!(params, UserParams::by_name("xyz"));
    }
}
