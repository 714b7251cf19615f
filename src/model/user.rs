use serde::{Deserialize, Serialize};

use super::ids::Id;
use super::person::Person;

/// What a logged-in account may do. Persisted as `tipoUsuario`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Role {
    Admin,
    Usuario,
}

impl From<String> for Role {
    fn from(s: String) -> Self {
        Role::from_claim(&s)
    }
}

impl Role {
    /// Parse a role claim. Anything that is not an admin is a plain user.
    pub fn from_claim(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "admin" | "administrador" => Role::Admin,
            _ => Role::Usuario,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Usuario => "usuario",
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

/// An account able to log into the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemUser {
    #[serde(alias = "idUsuario")]
    pub id: Id<SystemUser>,
    #[serde(rename = "username", alias = "usuario")]
    pub username: String,
    #[serde(rename = "email", alias = "correo", default)]
    pub email: String,
    #[serde(rename = "role", alias = "rol", alias = "tipoUsuario")]
    pub role: Role,
    #[serde(rename = "idPersona", default, skip_serializing_if = "Option::is_none")]
    pub person_id: Option<Id<Person>>,
    #[serde(rename = "activo", default = "default_true")]
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SystemUserForm {
    pub username: String,
    pub email: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(rename = "idPersona", skip_serializing_if = "Option::is_none")]
    pub person_id: Option<Id<Person>>,
}

fn default_true() -> bool {
    true
}
