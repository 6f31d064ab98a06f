//! Policy configuration.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Limits applied by [`crate::AccessPolicy`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    /// Maximum number of parent links followed by an ancestry walk.
    pub max_ancestry_depth: usize,
    /// Maximum number of users returned by `available_users`.
    pub available_users_limit: usize,
    /// Number of name-prefix matches considered before role filtering.
    pub available_users_candidates: usize,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            max_ancestry_depth: 64,
            available_users_limit: 10,
            available_users_candidates: 20,
        }
    }
}

impl PolicyConfig {
    /// Checks the limits are usable.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if any limit is zero or fewer
    /// candidates are scanned than may be returned.
    pub fn validate(&self) -> Result<()> {
        if self.max_ancestry_depth == 0 {
            return Err(Error::InvalidConfig {
                reason: "max_ancestry_depth must be greater than zero".to_string(),
            });
        }
        if self.available_users_limit == 0 {
            return Err(Error::InvalidConfig {
                reason: "available_users_limit must be greater than zero".to_string(),
            });
        }
        if self.available_users_candidates < self.available_users_limit {
            return Err(Error::InvalidConfig {
                reason: format!(
                    "available_users_candidates ({}) must be at least available_users_limit ({})",
                    self.available_users_candidates, self.available_users_limit
                ),
            });
        }
        Ok(())
    }
}
