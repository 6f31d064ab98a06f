//! Which users an actor may see.

use std::collections::HashSet;

use tracing::debug;

use crate::catalog::Context;
use crate::config::PolicyConfig;
use crate::hierarchy::descendants_of;
use crate::ports::{CourseCatalog, UserDirectory};
use crate::types::{User, UserId};

/// Returns the users visible to `actor`.
///
/// Super administrators see every user. Instructors see the participants of
/// the courses and assignments they own; teaching assistants see the
/// participants of the courses they assist. In both cases a participant is
/// kept only when the actor's role has all of the participant's privileges.
/// Everyone but a super administrator also sees the users they are a
/// recursive parent of. Each user appears once, in first-seen order.
#[must_use]
pub fn user_list(
    directory: &dyn UserDirectory,
    catalog: &dyn CourseCatalog,
    actor: &User,
    config: &PolicyConfig,
) -> Vec<User> {
    if actor.role.is_super_admin() {
        return directory.all();
    }

    let mut contexts = Vec::new();
    if actor.role.is_instructor() {
        contexts.extend(
            catalog
                .courses_taught_by(&actor.id)
                .into_iter()
                .map(Context::Course),
        );
        contexts.extend(
            catalog
                .assignments_taught_by(&actor.id)
                .into_iter()
                .map(Context::Assignment),
        );
    }
    if actor.role.is_teaching_assistant() {
        contexts.extend(
            catalog
                .courses_assisted_by(&actor.id)
                .into_iter()
                .map(Context::Course),
        );
    }

    let mut list = UniqueUsers::default();
    for context in &contexts {
        for participant in catalog
            .participants_of(context)
            .iter()
            .filter_map(|id| directory.find(id))
        {
            if actor.role.has_all_privileges_of(participant.role) {
                list.push(participant);
            }
        }
    }

    for descendant in descendants_of(directory, actor, config.max_ancestry_depth) {
        list.push(descendant);
    }

    debug!(
        actor = %actor.name,
        role = %actor.role,
        contexts = contexts.len(),
        visible = list.users.len(),
        "computed user list"
    );
    list.users
}

/// Users whose name starts with `prefix`, ignoring case, and whose role
/// `actor` has all privileges of.
///
/// Only the first `available_users_candidates` name matches are considered,
/// and at most `available_users_limit` are returned.
#[must_use]
pub fn available_users(
    directory: &dyn UserDirectory,
    actor: &User,
    prefix: &str,
    config: &PolicyConfig,
) -> Vec<User> {
    let lesser = actor.role.lesser_roles();
    let prefix = prefix.to_lowercase();
    directory
        .filter(&|u: &User| u.name.to_lowercase().starts_with(&prefix))
        .into_iter()
        .take(config.available_users_candidates)
        .filter(|u| lesser.contains(&u.role))
        .take(config.available_users_limit)
        .collect()
}

#[derive(Default)]
struct UniqueUsers {
    seen: HashSet<UserId>,
    users: Vec<User>,
}

impl UniqueUsers {
    fn push(&mut self, user: User) {
        if self.seen.insert(user.id.clone()) {
            self.users.push(user);
        }
    }
}
