use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::PathBuf;
use tokio::fs;
use tracing::{info, instrument, warn};

use crate::models::{Cart, StoreError, StoreResult};

/// Trait defining the interface for the durable cart mirror
#[async_trait]
pub trait CartStore: Send + Sync {
    /// Read the persisted cart for a session, if one exists
    async fn read_cart(&self, session_id: &str) -> StoreResult<Option<Cart>>;

    /// Write the cart wholesale, replacing any previous mirror
    async fn write_cart(&self, cart: &Cart) -> StoreResult<()>;

    /// Erase the persisted mirror for a session
    async fn erase_cart(&self, session_id: &str) -> StoreResult<()>;
}

/// File-backed implementation of the CartStore trait. Each session's cart
/// lives in its own JSON document under `<root>/carts/`, written wholesale
/// on every flush. There is no cross-file coordination; concurrent writers
/// to one session are last-write-wins.
pub struct FileCartStore {
    root: PathBuf,
}

impl FileCartStore {
    /// Create a new file-backed cart store rooted at the given directory
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn carts_dir(&self) -> PathBuf {
        self.root.join("carts")
    }

    /// Resolve the mirror path for a session. Session ids are validated at
    /// the service boundary; this re-check keeps a raw id from ever naming
    /// a path outside the carts directory.
    fn cart_path(&self, session_id: &str) -> StoreResult<PathBuf> {
        if session_id.is_empty()
            || !session_id
                .chars()
                .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
        {
            return Err(StoreError::InvalidKey {
                key: session_id.to_string(),
            });
        }
        Ok(self.carts_dir().join(format!("{}.json", session_id)))
    }
}

#[async_trait]
impl CartStore for FileCartStore {
    #[instrument(skip(self), fields(session_id = %session_id))]
    async fn read_cart(&self, session_id: &str) -> StoreResult<Option<Cart>> {
        let path = self.cart_path(session_id)?;

        let bytes = match fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("No cart mirror for session");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_slice::<Cart>(&bytes) {
            Ok(cart) => {
                info!("Cart loaded with {} items", cart.items.len());
                Ok(Some(cart))
            }
            Err(e) => {
                // A corrupt mirror is treated as no cart at all. The bad
                // file is discarded so the next write starts clean.
                warn!("Discarding unparseable cart mirror: {}", e);
                if let Err(remove_err) = fs::remove_file(&path).await {
                    if remove_err.kind() != ErrorKind::NotFound {
                        warn!("Failed to remove corrupt cart mirror: {}", remove_err);
                    }
                }
                Ok(None)
            }
        }
    }

    #[instrument(skip(self, cart), fields(session_id = %cart.session_id, item_count = cart.items.len()))]
    async fn write_cart(&self, cart: &Cart) -> StoreResult<()> {
        let path = self.cart_path(&cart.session_id)?;

        fs::create_dir_all(self.carts_dir()).await?;
        let bytes = serde_json::to_vec(cart)?;
        fs::write(&path, bytes).await?;

        info!("Cart mirror written");
        Ok(())
    }

    #[instrument(skip(self), fields(session_id = %session_id))]
    async fn erase_cart(&self, session_id: &str) -> StoreResult<()> {
        let path = self.cart_path(session_id)?;

        match fs::remove_file(&path).await {
            Ok(()) => {
                info!("Cart mirror erased");
                Ok(())
            }
            // Erasing an absent mirror is a no-op
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
