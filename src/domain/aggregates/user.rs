//! User Aggregate

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Storefront account. Only the username is held; there is no login flow.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User { pub id: String, pub username: String }

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NewUser { pub username: String }

impl User {
    pub fn create(new: NewUser) -> Self { Self { id: Uuid::new_v4().to_string(), username: new.username } }
}
