use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rust_decimal::prelude::FromPrimitive;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Runtime;

use gripgear::models::{
    AddItemRequest, Cart, Product, ProductCategory, SizeVariant, StoreError,
    UpdateQuantityRequest,
};
use gripgear::repositories::{CartStore, StaticCatalog};
use gripgear::services::CartService;
use rust_decimal_macros::dec;

use async_trait::async_trait;
use std::collections::HashMap;

/// In-memory store for benchmarking that keeps disk I/O out of the
/// measurements
#[derive(Clone)]
struct MemoryCartStore {
    carts: Arc<std::sync::Mutex<HashMap<String, Cart>>>,
}

impl MemoryCartStore {
    fn new() -> Self {
        Self {
            carts: Arc::new(std::sync::Mutex::new(HashMap::new())),
        }
    }

    fn with_cart(cart: Cart) -> Self {
        let store = Self::new();
        store
            .carts
            .lock()
            .unwrap()
            .insert(cart.session_id.clone(), cart);
        store
    }
}

#[async_trait]
impl CartStore for MemoryCartStore {
    async fn read_cart(&self, session_id: &str) -> Result<Option<Cart>, StoreError> {
        let carts = self.carts.lock().unwrap();
        Ok(carts.get(session_id).cloned())
    }

    async fn write_cart(&self, cart: &Cart) -> Result<(), StoreError> {
        let mut carts = self.carts.lock().unwrap();
        carts.insert(cart.session_id.clone(), cart.clone());
        Ok(())
    }

    async fn erase_cart(&self, session_id: &str) -> Result<(), StoreError> {
        let mut carts = self.carts.lock().unwrap();
        carts.remove(session_id);
        Ok(())
    }
}

fn bench_product(i: usize) -> Product {
    let categories = [
        ProductCategory::CompetitionEquipment,
        ProductCategory::GripWristTraining,
    ];

    Product {
        id: format!("{}", i + 1),
        name: format!("Benchmark Handle {}", i + 1),
        description: format!("Description for benchmark handle {}", i + 1),
        price: dec!(1299.99)
            + rust_decimal::Decimal::from_f64(i as f64 * 0.1).unwrap_or(dec!(0.0)),
        image: format!("https://images.example.com/handle-{}.jpeg", i + 1),
        category: categories[i % categories.len()].clone(),
        brand: "BOERFORCE".to_string(),
        rating: Some(4.7),
        in_stock: true,
    }
}

/// Build a cart holding one line per product, cycling through the size
/// variants
fn seeded_cart(session_id: &str, lines: usize) -> Cart {
    let sizes = [
        SizeVariant::Standard,
        SizeVariant::Wide,
        SizeVariant::UltraWide,
        SizeVariant::Regular,
    ];

    let mut cart = Cart::new(session_id.to_string());
    for i in 0..lines {
        cart.add_line(bench_product(i), 2, sizes[i % sizes.len()].clone());
    }
    cart
}

fn bench_service(lines: usize) -> CartService {
    let products: Vec<Product> = (0..lines + 1).map(bench_product).collect();
    let store = MemoryCartStore::with_cart(seeded_cart("bench-session", lines));
    let catalog = StaticCatalog::with_products(products);

    CartService::new(Arc::new(store), Arc::new(catalog))
}

fn bench_cart_add_new_line(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();

    let mut group = c.benchmark_group("cart_add_new_line");
    group.sample_size(100);
    group.measurement_time(Duration::from_secs(5));

    for cart_lines in [10, 50, 100].iter() {
        group.bench_with_input(
            BenchmarkId::new("cart_lines", cart_lines),
            cart_lines,
            |b, &lines| {
                b.iter_batched(
                    || bench_service(lines),
                    |service| {
                        rt.block_on(async move {
                            // The seeded cart stops one product short, so
                            // this add always appends a fresh line
                            let request = AddItemRequest {
                                product_id: format!("{}", lines + 1),
                                quantity: 1,
                                size: SizeVariant::Standard,
                            };

                            black_box(service.add_item("bench-session", request).await.unwrap())
                        })
                    },
                    criterion::BatchSize::SmallInput,
                );
            },
        );
    }
    group.finish();
}

fn bench_cart_add_increments_line(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();

    let mut group = c.benchmark_group("cart_add_increments_line");
    group.sample_size(100);
    group.measurement_time(Duration::from_secs(5));

    for cart_lines in [10, 50, 100].iter() {
        group.bench_with_input(
            BenchmarkId::new("cart_lines", cart_lines),
            cart_lines,
            |b, &lines| {
                b.iter_batched(
                    || bench_service(lines),
                    |service| {
                        rt.block_on(async move {
                            // Product 1 at Standard size is already in the
                            // cart, so this add lands on an existing line
                            let request = AddItemRequest {
                                product_id: "1".to_string(),
                                quantity: 1,
                                size: SizeVariant::Standard,
                            };

                            black_box(service.add_item("bench-session", request).await.unwrap())
                        })
                    },
                    criterion::BatchSize::SmallInput,
                );
            },
        );
    }
    group.finish();
}

fn bench_cart_update_quantity(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();

    let mut group = c.benchmark_group("cart_update_quantity");
    group.sample_size(100);
    group.measurement_time(Duration::from_secs(5));

    for cart_lines in [10, 50, 100].iter() {
        group.bench_with_input(
            BenchmarkId::new("cart_lines", cart_lines),
            cart_lines,
            |b, &lines| {
                b.iter_batched(
                    || bench_service(lines),
                    |service| {
                        rt.block_on(async move {
                            black_box(
                                service
                                    .update_quantity(
                                        "bench-session",
                                        "1",
                                        UpdateQuantityRequest { quantity: 7 },
                                    )
                                    .await
                                    .unwrap(),
                            )
                        })
                    },
                    criterion::BatchSize::SmallInput,
                );
            },
        );
    }
    group.finish();
}

fn bench_cart_totals(c: &mut Criterion) {
    let mut group = c.benchmark_group("cart_totals");
    group.sample_size(200);
    group.measurement_time(Duration::from_secs(5));

    for cart_lines in [10, 100, 1000].iter() {
        group.bench_with_input(
            BenchmarkId::new("cart_lines", cart_lines),
            cart_lines,
            |b, &lines| {
                let cart = seeded_cart("bench-session", lines);

                b.iter(|| (black_box(cart.total_price()), black_box(cart.item_count())));
            },
        );
    }
    group.finish();
}

fn bench_cart_mirror_serde(c: &mut Criterion) {
    let mut group = c.benchmark_group("cart_mirror_serde");
    group.sample_size(100);
    group.measurement_time(Duration::from_secs(5));

    for cart_lines in [10, 100, 1000].iter() {
        group.bench_with_input(
            BenchmarkId::new("serialize", cart_lines),
            cart_lines,
            |b, &lines| {
                let cart = seeded_cart("bench-session", lines);

                b.iter(|| black_box(serde_json::to_vec(&cart).unwrap()));
            },
        );

        group.bench_with_input(
            BenchmarkId::new("deserialize", cart_lines),
            cart_lines,
            |b, &lines| {
                let bytes = serde_json::to_vec(&seeded_cart("bench-session", lines)).unwrap();

                b.iter(|| black_box(serde_json::from_slice::<Cart>(&bytes).unwrap()));
            },
        );
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_cart_add_new_line,
    bench_cart_add_increments_line,
    bench_cart_update_quantity,
    bench_cart_totals,
    bench_cart_mirror_serde
);
criterion_main!(benches);
