//! Feeder (user) record.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// A person who feeds the cat.
///
/// Users are created once and never mutated. Names are free text; the only
/// uniqueness check is the best-effort lookup performed before insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct User {
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: Uuid,
    #[schema(example = "Ada")]
    pub name: String,
}

impl User {
    /// Build a user with a freshly generated identifier.
    pub fn register(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
        }
    }
}
