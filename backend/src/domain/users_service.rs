//! User directory service implementing the users driving ports.
//!
//! Creation performs a lookup-then-insert without any coordination: two
//! concurrent requests for the same name can both pass the lookup and both
//! insert. Names are only unique on a best-effort basis.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{info, warn};

use crate::domain::ports::{UserRepository, UsersCommand, UsersQuery, map_persistence_error};
use crate::domain::{Error, User};

/// Users service backed by a [`UserRepository`].
#[derive(Clone)]
pub struct UsersService<R> {
    users: Arc<R>,
}

impl<R> UsersService<R> {
    /// Create a service over the given repository.
    pub fn new(users: Arc<R>) -> Self {
        Self { users }
    }
}

fn user_exists_error(name: &str) -> Error {
    Error::invalid_request("User already exists").with_details(json!({
        "field": "name",
        "value": name,
        "code": "user_exists",
    }))
}

#[async_trait]
impl<R> UsersQuery for UsersService<R>
where
    R: UserRepository,
{
    async fn list_users(&self, name: Option<&str>) -> Result<Vec<User>, Error> {
        match name.filter(|fragment| !fragment.is_empty()) {
            Some(fragment) => self
                .users
                .find_by_name(fragment)
                .await
                .map(|user| user.into_iter().collect())
                .map_err(map_persistence_error),
            None => self.users.list_all().await.map_err(map_persistence_error),
        }
    }
}

#[async_trait]
impl<R> UsersCommand for UsersService<R>
where
    R: UserRepository,
{
    async fn create_user(&self, name: &str) -> Result<User, Error> {
        let existing = self
            .users
            .find_by_name(name)
            .await
            .map_err(map_persistence_error)?;
        if let Some(existing) = existing {
            warn!(requested = name, matched = %existing.id, "user already exists");
            return Err(user_exists_error(name));
        }

        let user = User::register(name);
        self.users
            .insert(&user)
            .await
            .map_err(map_persistence_error)?;
        info!(user_id = %user.id, "user registered");
        Ok(user)
    }
}
