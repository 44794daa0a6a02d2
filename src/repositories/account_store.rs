use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;
use tracing::{instrument, warn};

use crate::models::{StoreResult, User};

/// Trait defining the interface for account persistence
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Find a registered user by email, if any
    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>>;

    /// Append a new user to the store
    async fn insert_user(&self, user: &User) -> StoreResult<()>;
}

/// Account store backed by a single JSON file under the data directory.
/// Accounts exist only to exercise the register/login flow; there is no
/// real credential handling behind them.
pub struct FileAccountStore {
    root: PathBuf,
}

impl FileAccountStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn users_path(&self) -> PathBuf {
        self.root.join("users.json")
    }

    /// Read the full user list, treating a missing or unparseable file as
    /// empty. A corrupt file is logged and left in place; the next insert
    /// overwrites it.
    async fn read_users(&self) -> StoreResult<Vec<User>> {
        let path = self.users_path();
        let bytes = match fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };

        match serde_json::from_slice(&bytes) {
            Ok(users) => Ok(users),
            Err(err) => {
                warn!("Ignoring unparseable user store: {}", err);
                Ok(Vec::new())
            }
        }
    }

    async fn write_users(&self, users: &[User]) -> StoreResult<()> {
        fs::create_dir_all(&self.root).await?;
        let bytes = serde_json::to_vec(users)?;
        fs::write(self.users_path(), bytes).await?;
        Ok(())
    }
}

#[async_trait]
impl AccountStore for FileAccountStore {
    #[instrument(skip(self, email))]
    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let users = self.read_users().await?;
        Ok(users
            .into_iter()
            .find(|u| u.email.eq_ignore_ascii_case(email)))
    }

    #[instrument(skip(self, user), fields(user_id = %user.id))]
    async fn insert_user(&self, user: &User) -> StoreResult<()> {
        let mut users = self.read_users().await?;
        users.push(user.clone());
        self.write_users(&users).await
    }
}
