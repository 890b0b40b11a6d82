//! Session store - who is logged in, per client.
//!
//! Each client (a Discord user on the bot surface) has its own local storage
//! holding at most one `imqap_user` record. The store is written to a TOML
//! file after every login/logout and restored from it at startup, so sessions
//! survive restarts while the domain store does not.

use super::identity::{self, User};
use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};
use tokio::sync::RwLock;
use tracing::{debug, info, instrument};

/// Per-client local storage as it appears in the session file.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
struct ClientStorage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    imqap_user: Option<User>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct SessionFile {
    #[serde(default)]
    clients: BTreeMap<String, ClientStorage>,
}

/// Identity store shared by every command invocation.
#[derive(Debug)]
pub struct SessionStore {
    path: Option<PathBuf>,
    sessions: RwLock<BTreeMap<String, User>>,
}

impl SessionStore {
    /// Opens the store backed by `path`, restoring any saved sessions.
    ///
    /// A missing file is an empty store; the file is created on first login.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let sessions = if path.exists() {
            let contents = fs::read_to_string(&path)?;
            let file: SessionFile = toml::from_str(&contents)?;
            file.clients
                .into_iter()
                .filter_map(|(client, storage)| storage.imqap_user.map(|user| (client, user)))
                .collect()
        } else {
            BTreeMap::new()
        };

        info!(
            "Restored {} session(s) from {}",
            sessions.len(),
            path.display()
        );

        Ok(Self {
            path: Some(path),
            sessions: RwLock::new(sessions),
        })
    }

    /// A store that never touches the filesystem.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            path: None,
            sessions: RwLock::new(BTreeMap::new()),
        }
    }

    /// Logs `client` in when the credentials are valid.
    ///
    /// Returns `false` (and leaves any existing session untouched) when the
    /// email is unknown or the password is wrong. The session only changes in
    /// memory once the file has been written.
    #[instrument(skip(self, password))]
    pub async fn login(&self, client: &str, email: &str, password: &str) -> Result<bool> {
        let Some(user) = identity::authenticate(email, password) else {
            info!("Rejected login for {email}");
            return Ok(false);
        };

        let mut sessions = self.sessions.write().await;
        let mut updated = sessions.clone();
        let (name, role) = (user.name.clone(), user.role);
        updated.insert(client.to_string(), user);
        self.persist(&updated)?;
        *sessions = updated;
        info!("{name} logged in as {role}");
        Ok(true)
    }

    /// Logs `client` in and returns the signed-in user.
    ///
    /// # Errors
    /// [`Error::InvalidCredentials`] when the email is unknown or the password
    /// is wrong.
    pub async fn sign_in(&self, client: &str, email: &str, password: &str) -> Result<User> {
        if !self.login(client, email, password).await? {
            return Err(Error::InvalidCredentials);
        }
        self.current(client).await.ok_or(Error::NotLoggedIn)
    }

    /// Clears the session of `client`. Logging out twice is harmless.
    ///
    /// When the file cannot be written the session is kept.
    #[instrument(skip(self))]
    pub async fn logout(&self, client: &str) -> Result<()> {
        let mut sessions = self.sessions.write().await;
        if !sessions.contains_key(client) {
            return Ok(());
        }
        let mut updated = sessions.clone();
        updated.remove(client);
        self.persist(&updated)?;
        *sessions = updated;
        info!("Client {client} logged out");
        Ok(())
    }

    /// The user logged in for `client`, if any.
    pub async fn current(&self, client: &str) -> Option<User> {
        self.sessions.read().await.get(client).cloned()
    }

    /// Whether `client` is logged in with the administrative role.
    pub async fn is_admin(&self, client: &str) -> bool {
        self.sessions
            .read()
            .await
            .get(client)
            .is_some_and(User::is_admin)
    }

    fn persist(&self, sessions: &BTreeMap<String, User>) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        let file = SessionFile {
            clients: sessions
                .iter()
                .map(|(client, user)| {
                    (
                        client.clone(),
                        ClientStorage {
                            imqap_user: Some(user.clone()),
                        },
                    )
                })
                .collect(),
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml::to_string(&file)?)?;
        debug!("Wrote {} session(s) to {}", sessions.len(), path.display());
        Ok(())
    }
}
