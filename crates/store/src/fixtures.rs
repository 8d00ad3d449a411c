use rust_decimal::Decimal;
use shelf_core::domain::product::Product;

/// Records the catalog holds right after startup.
pub fn seed_products() -> Vec<Product> {
    vec![
        Product::new(1, "Teclado", Decimal::new(150, 0)),
        Product::new(2, "Mouse", Decimal::new(80, 0)),
        Product::new(3, "Monitor", Decimal::new(1200, 0)),
    ]
}
