//! Creator (parent) chains between users.
//!
//! Each user may name the user that created it. The walk upward is bounded by
//! a visited set and a maximum depth, so corrupt chains end instead of looping.

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::ports::UserDirectory;
use crate::types::User;

/// Checks whether `actor` appears in `target`'s parent chain.
///
/// The walk stops with `false` at a missing or dangling parent, at a super
/// administrator other than `actor`, at a revisited user, or after
/// `max_depth` parent links.
#[must_use]
pub fn is_recursively_parent_of(
    directory: &dyn UserDirectory,
    actor: &User,
    target: &User,
    max_depth: usize,
) -> bool {
    let mut visited = HashSet::from([target.id.clone()]);
    let mut current = target.clone();
    let mut depth = 0usize;

    loop {
        let Some(parent_id) = current.parent_id.as_ref() else {
            return false;
        };

        depth += 1;
        if depth > max_depth {
            warn!(
                actor = %actor.name,
                target = %target.name,
                max_depth,
                "ancestry walk exceeded maximum depth"
            );
            return false;
        }

        if *parent_id == actor.id {
            return true;
        }

        let Some(parent) = directory.find(parent_id) else {
            debug!(target = %target.name, parent_id = %parent_id, "dangling parent reference");
            return false;
        };

        if parent.is_super_admin() {
            return false;
        }

        if !visited.insert(parent.id.clone()) {
            warn!(
                actor = %actor.name,
                target = %target.name,
                revisited = %parent.name,
                "cycle in parent chain"
            );
            return false;
        }

        current = parent;
    }
}

/// Returns every user `actor` is a recursive parent of, in directory order.
#[must_use]
pub fn descendants_of(directory: &dyn UserDirectory, actor: &User, max_depth: usize) -> Vec<User> {
    directory.filter(&|u: &User| {
        u.id != actor.id && is_recursively_parent_of(directory, actor, u, max_depth)
    })
}

/// Returns the parent chain of `user`, nearest first.
///
/// Stops at the first missing parent or revisited user.
#[must_use]
pub fn ancestors_of(directory: &dyn UserDirectory, user: &User, max_depth: usize) -> Vec<User> {
    let mut visited = HashSet::from([user.id.clone()]);
    let mut chain = Vec::new();
    let mut next = user.parent_id.clone();

    while let Some(id) = next {
        if chain.len() >= max_depth {
            break;
        }
        let Some(parent) = directory.find(&id) else {
            break;
        };
        if !visited.insert(parent.id.clone()) {
            break;
        }
        next = parent.parent_id.clone();
        chain.push(parent);
    }

    chain
}
