//! Staff accounts, as served by `/users`.

use crate::filter::Filterable;
use crate::list::Record;
use crate::source::Resource;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A user account from the upstream API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiUser {
    /// Upstream id.
    pub id: u32,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Login e-mail.
    pub email: String,
    /// Phone number.
    #[serde(default)]
    pub phone: String,
    /// Login name.
    #[serde(default)]
    pub username: String,
    /// Upstream role, e.g. `admin`, `moderator` or `user`.
    #[serde(default)]
    pub role: String,
    /// Avatar URL.
    #[serde(default)]
    pub image: String,
}

impl ApiUser {
    /// "First Last".
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl fmt::Display for ApiUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}  @{}  {}", self.full_name(), self.username, self.email)
    }
}

impl Filterable for ApiUser {
    fn search_fields(&self) -> Vec<&str> {
        vec![&self.first_name, &self.last_name, &self.email]
    }

    fn attribute(&self, key: &str) -> Option<&str> {
        (key == "role").then_some(self.role.as_str())
    }
}

impl Record for ApiUser {
    type Id = u32;

    fn id(&self) -> &u32 {
        &self.id
    }

    fn status(&self) -> Option<&str> {
        (!self.role.is_empty()).then_some(self.role.as_str())
    }
}

impl Resource for ApiUser {
    const PATH: &'static str = "/users";
    const COLLECTION_KEY: &'static str = "users";
}
