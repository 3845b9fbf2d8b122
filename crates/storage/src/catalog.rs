//! Seed catalog shared by every store implementation.

use shared::domain::{Price, Product, ProductId};

const SEED: &[(&str, &str, &str, f64)] = &[
    (
        "prod_001",
        "Blue Jean",
        "https://images.unsplash.com/photo-1542272604-787c3835535d?w=400",
        36.87,
    ),
    (
        "prod_002",
        "White T-Shirt",
        "https://images.unsplash.com/photo-1521572163474-6864f9cf17ab?w=400",
        19.99,
    ),
    (
        "prod_003",
        "Leather Jacket",
        "https://images.unsplash.com/photo-1551028719-00167b16eac5?w=400",
        89.95,
    ),
    (
        "prod_004",
        "Summer Dress",
        "https://images.unsplash.com/photo-1623609163859-ca93c959b98a?w=400",
        45.5,
    ),
    (
        "prod_005",
        "Running Shoes",
        "https://images.unsplash.com/photo-1542291026-7eec264c27ff?w=400",
        59.99,
    ),
    (
        "prod_006",
        "Wool Beanie",
        "https://images.unsplash.com/photo-1576871337622-98d48d1cf531?w=400",
        15.75,
    ),
    (
        "prod_007",
        "Blue Jean",
        "https://images.unsplash.com/photo-1542272604-787c3835535d?w=400",
        36.87,
    ),
    (
        "prod_008",
        "Backpack",
        "https://images.unsplash.com/photo-1553062407-98eeb64c6a62?w=400",
        49.95,
    ),
    (
        "prod_009",
        "Watch",
        "https://images.unsplash.com/photo-1614164185128-e4ec99c436d7?w=400",
        125.0,
    ),
    (
        "prod_010",
        "Sneakers",
        "https://images.unsplash.com/photo-1597045566677-8cf032ed6634?w=400",
        75.5,
    ),
];

const SEED_CURRENCY: &str = "EUR";

pub fn seed_products() -> Vec<Product> {
    SEED.iter()
        .map(|(id, name, image, amount)| Product {
            id: ProductId::from(*id),
            name: (*name).to_string(),
            image: (*image).to_string(),
            price: Price {
                amount: *amount,
                currency: SEED_CURRENCY.to_string(),
            },
        })
        .collect()
}
