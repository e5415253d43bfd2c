//! Who is signed in, and with which role.
//!
//! A [`Session`] owns its [`SessionStore`] and is passed to whatever needs
//! it; there is no global login state. Construction loads any saved user,
//! [`Session::logout`] clears the store.
//!
//! Login accepts any password: roles only decide which menu entries are
//! shown, they are not a security boundary.
//!
//! ```rust
//! use posboard::session::{MemoryStore, Role, Session};
//!
//! let mut session = Session::init(MemoryStore::default());
//! assert!(!session.is_authenticated());
//!
//! let user = session.login("somchai@example.com", "anything", Role::Cashier).unwrap();
//! assert_eq!(user.name, "somchai");
//!
//! session.switch_role(Role::Manager).unwrap();
//! assert_eq!(session.role(), Some(Role::Manager));
//! ```

use crate::config::SessionConfig;
use crate::error::{ConfigError, SessionError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Staff role.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Full access.
    Admin,
    /// Everything but user management.
    Manager,
    /// Front of house.
    #[default]
    Cashier,
}

impl Role {
    /// Every role, most privileged first.
    pub const ALL: [Role; 3] = [Role::Admin, Role::Manager, Role::Cashier];

    /// Role key.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Manager => "manager",
            Role::Cashier => "cashier",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    /// User id.
    pub id: String,
    /// Display name, the local part of the e-mail.
    pub name: String,
    /// Login e-mail.
    pub email: String,
    /// Current role.
    pub role: Role,
    /// Avatar URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

/// Where the signed-in user is kept between runs.
pub trait SessionStore {
    /// The saved user, if any.
    fn load(&self) -> Result<Option<SessionUser>, SessionError>;
    /// Replaces the saved user.
    fn save(&mut self, user: &SessionUser) -> Result<(), SessionError>;
    /// Forgets the saved user. Clearing an empty store is fine.
    fn clear(&mut self) -> Result<(), SessionError>;
}

/// Keeps the user in memory only.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    user: Option<SessionUser>,
}

impl SessionStore for MemoryStore {
    fn load(&self) -> Result<Option<SessionUser>, SessionError> {
        Ok(self.user.clone())
    }

    fn save(&mut self, user: &SessionUser) -> Result<(), SessionError> {
        self.user = Some(user.clone());
        Ok(())
    }

    fn clear(&mut self) -> Result<(), SessionError> {
        self.user = None;
        Ok(())
    }
}

/// Keeps the user as JSON in a file.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// A store backed by `path`. Nothing is touched until the first save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The configured path, or `<data_dir>/posboard/session.json`.
    pub fn from_config(config: &SessionConfig) -> Result<Self, ConfigError> {
        config
            .path
            .clone()
            .or_else(|| dirs::data_dir().map(|dir| dir.join("posboard").join("session.json")))
            .map(Self::new)
            .ok_or(ConfigError::NoConfigDir)
    }

    /// The backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileStore {
    fn load(&self) -> Result<Option<SessionUser>, SessionError> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(Some(serde_json::from_str(&content)?)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn save(&mut self, user: &SessionUser) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(user)?)?;
        Ok(())
    }

    fn clear(&mut self) -> Result<(), SessionError> {
        match fs::remove_file(&self.path) {
            Err(err) if err.kind() != ErrorKind::NotFound => Err(err.into()),
            _ => Ok(()),
        }
    }
}

/// Login state over an injected store.
#[derive(Debug)]
pub struct Session<S: SessionStore> {
    store: S,
    user: Option<SessionUser>,
}

impl<S: SessionStore> Session<S> {
    /// Restores the saved user, if any. An unreadable or corrupt store is
    /// logged, cleared where possible, and treated as signed out.
    pub fn init(mut store: S) -> Self {
        let user = match store.load() {
            Ok(user) => user,
            Err(SessionError::Corrupt(err)) => {
                tracing::warn!(error = %err, "discarding corrupt session");
                if let Err(err) = store.clear() {
                    tracing::warn!(error = %err, "could not clear corrupt session");
                }
                None
            }
            Err(err) => {
                tracing::warn!(error = %err, "could not restore session");
                None
            }
        };
        if let Some(user) = &user {
            tracing::info!(email = %user.email, role = %user.role, "session restored");
        }
        Self { store, user }
    }

    /// Signs in. Any password is accepted; only the e-mail is required.
    pub fn login(
        &mut self,
        email: &str,
        _password: &str,
        role: Role,
    ) -> Result<&SessionUser, SessionError> {
        let email = email.trim();
        if email.is_empty() {
            return Err(SessionError::MissingEmail);
        }
        let name = email.split('@').next().unwrap_or(email).to_string();
        let user = SessionUser {
            id: "1".to_string(),
            name,
            email: email.to_string(),
            role,
            avatar: None,
        };
        self.store.save(&user)?;
        tracing::info!(email = %user.email, %role, "logged in");
        Ok(self.user.insert(user))
    }

    /// Signs out and clears the store.
    pub fn logout(&mut self) -> Result<(), SessionError> {
        self.store.clear()?;
        if let Some(user) = self.user.take() {
            tracing::info!(email = %user.email, "logged out");
        }
        Ok(())
    }

    /// Changes the signed-in user's role. Returns false when nobody is
    /// signed in.
    pub fn switch_role(&mut self, role: Role) -> Result<bool, SessionError> {
        let Some(user) = self.user.as_mut() else {
            return Ok(false);
        };
        user.role = role;
        self.store.save(user)?;
        tracing::info!(email = %user.email, %role, "role switched");
        Ok(true)
    }

    /// The signed-in user.
    pub fn user(&self) -> Option<&SessionUser> {
        self.user.as_ref()
    }

    /// The signed-in user's role.
    pub fn role(&self) -> Option<Role> {
        self.user.as_ref().map(|user| user.role)
    }

    /// True when someone is signed in.
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }
}
