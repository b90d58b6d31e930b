//! Catalog seed data: the curated line-up and the placeholder generator.

use std::ops::RangeInclusive;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Deserialize;

use crate::catalog::{Product, ProductSpecs};
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::Money;

/// Hand-written catalog entries, prices in whole rupees.
const CURATED_JSON: &str = include_str!("curated.json");

/// Brands cycled through by generated entries.
pub const BRANDS: [&str; 6] = ["Kawasaki", "BMW", "Ducati", "Yamaha", "Honda", "Suzuki"];

/// Categories cycled through by generated entries.
pub const CATEGORIES: [&str; 3] = ["Sport", "Naked", "Adventure"];

/// Ids of the generated placeholder entries.
pub const GENERATED_IDS: RangeInclusive<u32> = 13..=71;

const GENERATED_IMAGE: &str =
    "https://cdn.pixabay.com/photo/2016/03/27/17/59/vintage-1283299_1280.jpg";
const GENERATED_GALLERY: [&str; 3] = [
    "https://cdn.pixabay.com/photo/2016/03/27/17/59/vintage-1283299_1280.jpg",
    "https://cdn.pixabay.com/photo/2016/04/07/06/53/bmw-1313343_1280.jpg",
    "https://cdn.pixabay.com/photo/2014/09/07/22/34/motorcycle-race-438464_1280.jpg",
];

/// Seed record as stored in `curated.json`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SeedProduct {
    id: String,
    name: String,
    brand: String,
    category: String,
    description: String,
    price: i64,
    rating: f32,
    image: String,
    gallery: Vec<String>,
    specs: ProductSpecs,
    colors: Vec<String>,
    stock: u32,
    featured: bool,
    new: bool,
    on_sale: bool,
    #[serde(default)]
    sale_price: Option<i64>,
}

impl From<SeedProduct> for Product {
    fn from(seed: SeedProduct) -> Self {
        Product {
            id: ProductId::new(seed.id),
            name: seed.name,
            brand: seed.brand,
            category: seed.category,
            description: seed.description,
            price: Money::inr(seed.price),
            rating: seed.rating,
            image: seed.image,
            gallery: seed.gallery,
            specs: seed.specs,
            colors: seed.colors,
            stock: seed.stock,
            featured: seed.featured,
            is_new: seed.new,
            on_sale: seed.on_sale,
            sale_price: seed.sale_price.map(Money::inr),
        }
    }
}

/// Parse the embedded curated entries.
pub fn curated_products() -> Result<Vec<Product>, CommerceError> {
    let seeds: Vec<SeedProduct> = serde_json::from_str(CURATED_JSON)
        .map_err(|e| CommerceError::CatalogError(format!("curated catalog: {}", e)))?;
    Ok(seeds.into_iter().map(Product::from).collect())
}

/// Generate placeholder entries for the ids in `ids`.
///
/// Everything except rating and stock is a function of the id; those two
/// come from a `StdRng` seeded with `seed`, so equal seeds give equal output.
pub fn generate_products(ids: RangeInclusive<u32>, seed: u64) -> Vec<Product> {
    let mut rng = StdRng::seed_from_u64(seed);
    ids.map(|i| generated_product(i, &mut rng)).collect()
}

fn generated_product(i: u32, rng: &mut StdRng) -> Product {
    let price_rupees = 1_000_000 + i64::from(i) * 10_000;
    let on_sale = i % 12 == 0;

    // One decimal place, 4.0 to 4.9
    let rating = f32::from(rng.gen_range(40u8..=49)) / 10.0;
    let stock = rng.gen_range(1..=5);

    Product {
        id: ProductId::new(i.to_string()),
        name: format!("Model {}", i),
        brand: BRANDS[i as usize % BRANDS.len()].to_string(),
        category: CATEGORIES[(i as usize / 24) % CATEGORIES.len()].to_string(),
        description: "This is a high-performance motorcycle with advanced features.".to_string(),
        price: Money::inr(price_rupees),
        rating,
        image: GENERATED_IMAGE.to_string(),
        gallery: GENERATED_GALLERY.iter().map(|s| s.to_string()).collect(),
        specs: ProductSpecs {
            engine: "1000cc, Liquid-cooled, 4-stroke".to_string(),
            power: "150 PS @ 10,000 RPM".to_string(),
            torque: "100 Nm @ 9,000 RPM".to_string(),
            transmission: "6-speed".to_string(),
            weight: "200 kg".to_string(),
            top_speed: "250 km/h".to_string(),
            fuel_capacity: "18 liters".to_string(),
            mileage: "18 km/l".to_string(),
            abs: true,
        },
        colors: vec!["Red".to_string(), "Black".to_string(), "Blue".to_string()],
        stock,
        featured: i % 10 == 0,
        is_new: i % 15 == 0,
        on_sale,
        sale_price: on_sale.then(|| Money::inr(price_rupees * 9 / 10)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_curated_products_parse() {
        let products = curated_products().unwrap();
        assert_eq!(products.len(), 12);

        let first = &products[0];
        assert_eq!(first.id.as_str(), "1");
        assert_eq!(first.name, "Ninja ZX-10R");
        assert_eq!(first.price, Money::inr(1_580_000));
        assert_eq!(first.colors, vec!["Green", "Black", "Blue"]);
        assert!(first.specs.abs);
    }

    #[test]
    fn test_curated_sale_prices() {
        let products = curated_products().unwrap();
        let panigale = products.iter().find(|p| p.id.as_str() == "3").unwrap();
        assert!(panigale.on_sale);
        assert_eq!(panigale.effective_price(), Money::inr(2_200_000));

        let on_sale: Vec<&str> = products
            .iter()
            .filter(|p| p.on_sale)
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(on_sale, vec!["3", "6", "8"]);
    }

    #[test]
    fn test_generated_is_deterministic_per_seed() {
        let a = generate_products(GENERATED_IDS, 7);
        let b = generate_products(GENERATED_IDS, 7);
        assert_eq!(a, b);
        assert_eq!(a.len(), 59);
    }

    #[test]
    fn test_generated_fixed_fields() {
        let products = generate_products(24..=24, 0);
        let p = &products[0];
        assert_eq!(p.id.as_str(), "24");
        assert_eq!(p.name, "Model 24");
        assert_eq!(p.brand, "Kawasaki");
        assert_eq!(p.category, "Naked");
        assert_eq!(p.price, Money::inr(1_240_000));
        assert!(p.on_sale);
        assert_eq!(p.sale_price, Some(Money::inr(1_116_000)));
        assert!(!p.featured);
        assert!(!p.is_new);
    }

    #[test]
    fn test_generated_flags() {
        let products = generate_products(GENERATED_IDS, 1);
        let featured: Vec<&str> = products
            .iter()
            .filter(|p| p.featured)
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(featured, vec!["20", "30", "40", "50", "60", "70"]);

        let new: Vec<&str> = products
            .iter()
            .filter(|p| p.is_new)
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(new, vec!["15", "30", "45", "60"]);
    }

    #[test]
    fn test_generated_random_fields_in_range() {
        for p in generate_products(GENERATED_IDS, 99) {
            assert!((4.0..=4.9).contains(&p.rating), "rating {}", p.rating);
            assert!((1..=5).contains(&p.stock));
        }
    }
}
