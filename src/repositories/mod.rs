// Repositories module - data access layer

pub mod account_store;
pub mod cart_store;
pub mod catalog;

pub use account_store::{AccountStore, FileAccountStore};
pub use cart_store::{CartStore, FileCartStore};
pub use catalog::{seed_products, ProductCatalog, StaticCatalog};
