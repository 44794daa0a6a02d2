use async_trait::async_trait;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::{info, instrument};

use crate::models::{Product, ProductCategory, StoreResult};

/// Trait defining the interface for read-only catalog queries
#[async_trait]
pub trait ProductCatalog: Send + Sync {
    /// All products in the catalog
    async fn get_all(&self) -> StoreResult<Vec<Product>>;

    /// Find a product by its ID
    async fn get_by_id(&self, id: &str) -> StoreResult<Option<Product>>;

    /// All products in a category
    async fn get_by_category(&self, category: &ProductCategory) -> StoreResult<Vec<Product>>;
}

/// In-memory catalog seeded with the BOERFORCE product line. The catalog
/// never changes at runtime; carts hold their own snapshots of these
/// records.
pub struct StaticCatalog {
    products: Vec<Product>,
}

impl StaticCatalog {
    /// Create a catalog holding the standard seed products
    pub fn new() -> Self {
        Self {
            products: seed_products(),
        }
    }

    /// Create a catalog over an explicit product list (for testing)
    pub fn with_products(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// Number of products in the catalog
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl Default for StaticCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProductCatalog for StaticCatalog {
    #[instrument(skip(self))]
    async fn get_all(&self) -> StoreResult<Vec<Product>> {
        info!("Listing {} products", self.products.len());
        Ok(self.products.clone())
    }

    #[instrument(skip(self), fields(product_id = %id))]
    async fn get_by_id(&self, id: &str) -> StoreResult<Option<Product>> {
        Ok(self.products.iter().find(|p| p.id == id).cloned())
    }

    #[instrument(skip(self), fields(category = %category))]
    async fn get_by_category(&self, category: &ProductCategory) -> StoreResult<Vec<Product>> {
        let matches: Vec<Product> = self
            .products
            .iter()
            .filter(|p| p.matches_category(category))
            .cloned()
            .collect();
        info!("Found {} products in category", matches.len());
        Ok(matches)
    }
}

fn product(
    id: &str,
    name: &str,
    description: &str,
    price: Decimal,
    image: &str,
    category: ProductCategory,
    rating: f32,
) -> Product {
    Product {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        price,
        image: image.to_string(),
        category,
        brand: "BOERFORCE".to_string(),
        rating: Some(rating),
        in_stock: true,
    }
}

/// The seed product line carried by every deployment
pub fn seed_products() -> Vec<Product> {
    vec![
        product(
            "1",
            "Armwrestling Knuckle Handle",
            "Professional-grade knuckle handle for improved grip strength and stability during arm wrestling matches.",
            dec!(1899.99),
            "https://images.pexels.com/photos/3490348/pexels-photo-3490348.jpeg?auto=compress&cs=tinysrgb&w=800",
            ProductCategory::CompetitionEquipment,
            4.9,
        ),
        product(
            "2",
            "Wrist Pro Handle",
            "Advanced wrist handle with ergonomic design for maximum control and comfort during training sessions.",
            dec!(2499.99),
            "https://images.pexels.com/photos/4793231/pexels-photo-4793231.jpeg?auto=compress&cs=tinysrgb&w=800",
            ProductCategory::GripWristTraining,
            4.7,
        ),
        product(
            "3",
            "Ultra Grip Flat Handle",
            "High-friction flat handle designed to build grip endurance and finger strength for competitive arm wrestlers.",
            dec!(1299.99),
            "https://images.pexels.com/photos/4498482/pexels-photo-4498482.jpeg?auto=compress&cs=tinysrgb&w=800",
            ProductCategory::GripWristTraining,
            4.8,
        ),
        product(
            "4",
            "Realistic Hand Wrist Grip",
            "Anatomically correct grip trainer that simulates real opponent hand positioning for authentic training.",
            dec!(3499.99),
            "https://images.pexels.com/photos/6456303/pexels-photo-6456303.jpeg?auto=compress&cs=tinysrgb&w=800",
            ProductCategory::GripWristTraining,
            4.6,
        ),
        product(
            "5",
            "Elliptical Roll Handle - Slim",
            "Slim elliptical roll handle for precise finger positioning and rotational training for improved technique.",
            dec!(1799.99),
            "https://images.pexels.com/photos/4162451/pexels-photo-4162451.jpeg?auto=compress&cs=tinysrgb&w=800",
            ProductCategory::GripWristTraining,
            4.9,
        ),
        product(
            "6",
            "Eccentric Finger Handle - Slim",
            "Specialized slim handle with eccentric loading to target individual finger strength and coordination.",
            dec!(1599.99),
            "https://images.pexels.com/photos/4397840/pexels-photo-4397840.jpeg?auto=compress&cs=tinysrgb&w=800",
            ProductCategory::GripWristTraining,
            4.5,
        ),
        product(
            "7",
            "Conical Roll Handle - Slim",
            "Slim conical roll handle that progressively challenges grip as you move along its length for varied resistance training.",
            dec!(1699.99),
            "https://images.pexels.com/photos/6456147/pexels-photo-6456147.jpeg?auto=compress&cs=tinysrgb&w=800",
            ProductCategory::GripWristTraining,
            5.0,
        ),
        product(
            "8",
            "Offset Grip Handle - Slim",
            "Slim offset grip design that creates imbalanced resistance to strengthen stabilizer muscles in the forearm.",
            dec!(1599.99),
            "https://images.pexels.com/photos/4162453/pexels-photo-4162453.jpeg?auto=compress&cs=tinysrgb&w=800",
            ProductCategory::GripWristTraining,
            4.7,
        ),
        product(
            "9",
            "Eccentric Wrist Handle - Slim",
            "Slim wrist handle with eccentric loading mechanism to build wrist stability and explosive strength.",
            dec!(2099.99),
            "https://images.pexels.com/photos/4398376/pexels-photo-4398376.jpeg?auto=compress&cs=tinysrgb&w=800",
            ProductCategory::GripWristTraining,
            4.8,
        ),
        product(
            "10",
            "Eccentric Finger Handle - Wide",
            "Wide version of the eccentric finger handle for larger hands, providing progressive resistance for finger training.",
            dec!(1699.99),
            "https://images.pexels.com/photos/4397833/pexels-photo-4397833.jpeg?auto=compress&cs=tinysrgb&w=800",
            ProductCategory::GripWristTraining,
            4.6,
        ),
        product(
            "11",
            "Oval Knuckle Handle - Wide",
            "Wide oval knuckle handle designed for maximum comfort and stability during high-intensity training sessions.",
            dec!(1899.99),
            "https://images.pexels.com/photos/4162487/pexels-photo-4162487.jpeg?auto=compress&cs=tinysrgb&w=800",
            ProductCategory::GripWristTraining,
            4.7,
        ),
        product(
            "12",
            "Offset Grip - Wide",
            "Wide offset grip with asymmetrical loading to develop balanced forearm strength and control.",
            dec!(1799.99),
            "https://images.pexels.com/photos/4398372/pexels-photo-4398372.jpeg?auto=compress&cs=tinysrgb&w=800",
            ProductCategory::GripWristTraining,
            4.9,
        ),
        product(
            "13",
            "Conical Roll Handle - Wide",
            "Wide conical roll handle with tapered design to gradually increase resistance as you grip different sections.",
            dec!(1899.99),
            "https://images.pexels.com/photos/4398357/pexels-photo-4398357.jpeg?auto=compress&cs=tinysrgb&w=800",
            ProductCategory::GripWristTraining,
            4.8,
        ),
        product(
            "14",
            "Eccentric Wrist Handle - Wide",
            "Wide eccentric wrist handle that targets wrist extensors and flexors with adjustable resistance levels.",
            dec!(2199.99),
            "https://images.pexels.com/photos/4398391/pexels-photo-4398391.jpeg?auto=compress&cs=tinysrgb&w=800",
            ProductCategory::GripWristTraining,
            4.7,
        ),
        product(
            "15",
            "Elliptical Roll Handle - Wide",
            "Wide elliptical roll handle for enhanced grip development with a design that fits larger hand sizes comfortably.",
            dec!(1999.99),
            "https://images.pexels.com/photos/4162493/pexels-photo-4162493.jpeg?auto=compress&cs=tinysrgb&w=800",
            ProductCategory::GripWristTraining,
            4.6,
        ),
        product(
            "16",
            "Oval Knuckle Grip - Extra-Wide",
            "Extra-wide oval knuckle grip specially designed for those with larger hands or advanced training needs.",
            dec!(2299.99),
            "https://images.pexels.com/photos/4162577/pexels-photo-4162577.jpeg?auto=compress&cs=tinysrgb&w=800",
            ProductCategory::GripWristTraining,
            4.9,
        ),
        product(
            "17",
            "Offset Grip - Extra-Wide",
            "Extra-wide offset grip featuring maximum leverage training for advanced arm wrestlers with larger hands.",
            dec!(2499.99),
            "https://images.pexels.com/photos/4162519/pexels-photo-4162519.jpeg?auto=compress&cs=tinysrgb&w=800",
            ProductCategory::GripWristTraining,
            5.0,
        ),
    ]
}
