// Re-export all model types
pub use self::account::*;
pub use self::cart::*;
pub use self::checkout::*;
pub use self::enums::*;
pub use self::errors::*;
pub use self::product::*;
pub use self::validation::*;

mod account;
mod cart;
mod checkout;
mod enums;
mod errors;
mod product;
mod validation;
