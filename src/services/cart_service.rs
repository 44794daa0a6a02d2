use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::models::{
    quantity_in_range, validate_product_id, validate_session_id, AddItemRequest, Cart,
    CartResponse, ServiceError, ServiceResult, UpdateQuantityRequest, UpdateSizeRequest, Validate,
};
use crate::repositories::{CartStore, ProductCatalog};

/// Service for managing session-scoped shopping carts.
///
/// Every mutation follows the same shape: load the mirror, mutate the cart
/// in memory, and write the mirror back only when the cart actually changed.
/// Reads and rejected mutations never touch the store.
pub struct CartService {
    store: Arc<dyn CartStore>,
    catalog: Arc<dyn ProductCatalog>,
}

impl CartService {
    /// Create a new CartService
    pub fn new(store: Arc<dyn CartStore>, catalog: Arc<dyn ProductCatalog>) -> Self {
        Self { store, catalog }
    }

    /// Get a session's cart
    #[instrument(skip(self), fields(session_id = %session_id))]
    pub async fn get_cart(&self, session_id: &str) -> ServiceResult<CartResponse> {
        info!("Getting cart for session");

        validate_session_id(session_id)?;

        let cart = self.load_cart(session_id).await?;

        info!("Cart retrieved with {} lines", cart.items.len());
        Ok(CartResponse::from(&cart))
    }

    /// Add an item to the cart, incrementing the quantity when a line for
    /// the same product and size already exists
    #[instrument(skip(self, request), fields(session_id = %session_id, product_id = %request.product_id, quantity = request.quantity))]
    pub async fn add_item(
        &self,
        session_id: &str,
        request: AddItemRequest,
    ) -> ServiceResult<CartResponse> {
        info!("Adding item to cart");

        // Validate inputs
        validate_session_id(session_id)?;
        request.validate()?;

        // An out-of-range quantity is ignored, not reported
        if !quantity_in_range(request.quantity) {
            warn!("Ignoring add with out-of-range quantity {}", request.quantity);
            let cart = self.load_cart(session_id).await?;
            return Ok(CartResponse::from(&cart));
        }

        // Check that the product exists
        let product = match self.catalog.get_by_id(&request.product_id).await? {
            Some(product) => product,
            None => {
                return Err(ServiceError::ProductNotFound {
                    id: request.product_id,
                });
            }
        };

        // Get or create cart
        let mut cart = self.load_cart(session_id).await?;

        // The range guard above caps quantity at 999, so the cast is exact
        cart.add_line(product, request.quantity as u32, request.size);
        self.flush(&cart).await?;

        info!("Item added to cart successfully");
        Ok(CartResponse::from(&cart))
    }

    /// Remove every line carrying the given product, regardless of size
    #[instrument(skip(self), fields(session_id = %session_id, product_id = %product_id))]
    pub async fn remove_item(
        &self,
        session_id: &str,
        product_id: &str,
    ) -> ServiceResult<CartResponse> {
        info!("Removing product from cart");

        // Validate inputs
        validate_session_id(session_id)?;
        validate_product_id(product_id)?;

        let mut cart = self.load_cart(session_id).await?;

        if cart.remove_product(product_id) {
            self.flush(&cart).await?;
            info!("Product removed from cart");
        } else {
            info!("Product not in cart, nothing to remove");
        }

        Ok(CartResponse::from(&cart))
    }

    /// Set the quantity of every line carrying the given product
    #[instrument(skip(self, request), fields(session_id = %session_id, product_id = %product_id, quantity = request.quantity))]
    pub async fn update_quantity(
        &self,
        session_id: &str,
        product_id: &str,
        request: UpdateQuantityRequest,
    ) -> ServiceResult<CartResponse> {
        info!("Updating cart quantity");

        // Validate inputs
        validate_session_id(session_id)?;
        validate_product_id(product_id)?;

        // An out-of-range quantity is ignored, not reported
        if !quantity_in_range(request.quantity) {
            warn!(
                "Ignoring quantity update with out-of-range quantity {}",
                request.quantity
            );
            let cart = self.load_cart(session_id).await?;
            return Ok(CartResponse::from(&cart));
        }

        let mut cart = self.load_cart(session_id).await?;

        if cart.set_product_quantity(product_id, request.quantity as u32) {
            self.flush(&cart).await?;
            info!("Cart quantity updated");
        } else {
            info!("Product not in cart, quantity unchanged");
        }

        Ok(CartResponse::from(&cart))
    }

    /// Change the size recorded on every line carrying the given product
    #[instrument(skip(self, request), fields(session_id = %session_id, product_id = %product_id, size = %request.size))]
    pub async fn update_size(
        &self,
        session_id: &str,
        product_id: &str,
        request: UpdateSizeRequest,
    ) -> ServiceResult<CartResponse> {
        info!("Updating cart line size");

        // Validate inputs
        validate_session_id(session_id)?;
        validate_product_id(product_id)?;

        let mut cart = self.load_cart(session_id).await?;

        if cart.set_product_size(product_id, request.size) {
            self.flush(&cart).await?;
            info!("Cart line size updated");
        } else {
            info!("Product not in cart, size unchanged");
        }

        Ok(CartResponse::from(&cart))
    }

    /// Remove all lines from the cart, persisting the empty cart
    #[instrument(skip(self), fields(session_id = %session_id))]
    pub async fn clear_cart(&self, session_id: &str) -> ServiceResult<CartResponse> {
        info!("Clearing cart");

        validate_session_id(session_id)?;

        let mut cart = self.load_cart(session_id).await?;

        if cart.clear() {
            self.flush(&cart).await?;
            info!("Cart cleared");
        } else {
            info!("Cart already empty, nothing to clear");
        }

        Ok(CartResponse::from(&cart))
    }

    /// Drop the session's mirror entirely. The next read starts from an
    /// empty cart.
    #[instrument(skip(self), fields(session_id = %session_id))]
    pub async fn erase_cart(&self, session_id: &str) -> ServiceResult<()> {
        info!("Erasing cart mirror");

        validate_session_id(session_id)?;

        self.store.erase_cart(session_id).await?;

        info!("Cart mirror erased");
        Ok(())
    }

    /// Load the session's cart, starting fresh when no mirror exists.
    /// Crate-visible so the checkout flow can read the raw model; callers
    /// are expected to have validated the session id already.
    pub(crate) async fn load_cart(&self, session_id: &str) -> ServiceResult<Cart> {
        let cart = match self.store.read_cart(session_id).await? {
            Some(cart) => cart,
            None => Cart::new(session_id.to_string()),
        };
        Ok(cart)
    }

    /// Write the cart back to its mirror
    async fn flush(&self, cart: &Cart) -> ServiceResult<()> {
        self.store.write_cart(cart).await?;
        Ok(())
    }
}
