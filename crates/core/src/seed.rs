//! Bundled starter catalog.
//!
//! The first admin dashboard load seeds `admin_products` from this list
//! when the key is absent; client catalog reads fall back to it when the
//! store is empty or unreadable. It mirrors the dataset the app shipped
//! with, minus the bundled-asset image references (replaced by CDN URIs).

use rust_decimal::Decimal;

use crate::entities::Product;
use crate::types::ProductId;

#[allow(clippy::too_many_arguments)]
fn product(
    id: &str,
    name: &str,
    description: &str,
    price_cents: i64,
    image: &str,
    category: &str,
    quantity: u32,
    rating_tenths: i64,
    reviews: u32,
    tags: &[&str],
) -> Product {
    Product {
        id: ProductId::new(id),
        name: name.to_owned(),
        description: description.to_owned(),
        price: Decimal::new(price_cents, 2),
        image: format!("https://cdn.velvetmango.shop/products/{image}"),
        category: category.to_owned(),
        quantity,
        tags: tags.iter().map(|&t| t.to_owned()).collect(),
        rating: Some(Decimal::new(rating_tenths, 1)),
        reviews: Some(reviews),
    }
}

/// The starter catalog, in shipped order.
#[must_use]
pub fn starter_catalog() -> Vec<Product> {
    vec![
        product(
            "1",
            "Classic White T-Shirt",
            "A versatile and comfortable white cotton t-shirt.",
            2599,
            "shirt.png",
            "Tops",
            50,
            45,
            120,
            &["t-shirt", "white", "classic", "cotton", "top"],
        ),
        product(
            "2",
            "Stylish Blue Polo",
            "Modern slim fit polo shirt in blue.",
            3995,
            "polo.png",
            "Tops",
            30,
            42,
            85,
            &["polo", "blue", "stylish", "top", "slim fit"],
        ),
        product(
            "3",
            "Elegant Pink Blouse",
            "Lightweight blouse with a delicate pattern.",
            7500,
            "blouse.png",
            "Tops",
            20,
            48,
            95,
            &["blouse", "pink", "elegant", "top", "pattern"],
        ),
        product(
            "4",
            "Leather Biker Jacket",
            "Timeless black leather jacket with asymmetrical zip.",
            19999,
            "jacket.png",
            "Outerwear",
            15,
            46,
            60,
            &["jacket", "leather", "black", "biker", "outerwear"],
        ),
        product(
            "5",
            "Cozy Knit Sweater",
            "Warm and comfortable knit sweater for colder days.",
            6550,
            "sweater.png",
            "Tops",
            25,
            44,
            70,
            &["sweater", "knit", "cozy", "top", "warm"],
        ),
        product(
            "6",
            "Comfortable Black Pants",
            "Casual black pants, perfect for everyday wear.",
            4500,
            "pants1.png",
            "Bottoms",
            40,
            40,
            150,
            &["pants", "black", "comfortable", "bottoms", "casual"],
        ),
        product(
            "7",
            "Gray Denim Jeans",
            "Stylish gray denim jeans with a modern fit.",
            5500,
            "pants2.png",
            "Bottoms",
            35,
            41,
            110,
            &["jeans", "denim", "gray", "bottoms", "stylish"],
        ),
        product(
            "8",
            "Khaki Cargo Pants",
            "Durable khaki cargo pants with multiple pockets.",
            6000,
            "pants3.png",
            "Bottoms",
            22,
            43,
            90,
            &["pants", "cargo", "khaki", "bottoms", "durable"],
        ),
        product(
            "9",
            "Brown Leather Jacket",
            "Classic brown leather jacket for a rugged look.",
            21000,
            "jacket1.png",
            "Outerwear",
            10,
            47,
            75,
            &["jacket", "leather", "brown", "outerwear", "classic"],
        ),
        product(
            "10",
            "Dark Denim Jacket",
            "Versatile dark wash denim jacket.",
            8999,
            "jacket2.png",
            "Outerwear",
            18,
            45,
            130,
            &["jacket", "denim", "dark wash", "outerwear", "versatile"],
        ),
        product(
            "11",
            "Formal Black Shirt",
            "Elegant black shirt suitable for formal occasions.",
            4999,
            "shirt11.png",
            "Tops",
            28,
            46,
            100,
            &["shirt", "black", "formal", "top", "elegant"],
        ),
        product(
            "12",
            "Casual Plaid Shirt",
            "Comfortable plaid shirt for a relaxed style.",
            3550,
            "shirt22.png",
            "Tops",
            33,
            43,
            115,
            &["shirt", "plaid", "casual", "top", "comfortable"],
        ),
        product(
            "13",
            "Orange Puffer Jacket",
            "Warm orange puffer jacket for cold weather.",
            12000,
            "jacket11.png",
            "Outerwear",
            8,
            44,
            55,
            &["jacket", "puffer", "orange", "outerwear", "warm"],
        ),
        product(
            "14",
            "Stylish Gray Jacket",
            "Modern gray jacket with a sleek design.",
            15000,
            "jacket22.png",
            "Outerwear",
            12,
            47,
            88,
            &["jacket", "gray", "stylish", "outerwear", "modern"],
        ),
        product(
            "15",
            "Checkered Pattern Jacket",
            "Unique jacket with a striking checkered pattern.",
            13500,
            "jacket33.png",
            "Outerwear",
            3,
            45,
            65,
            &["jacket", "checkered", "pattern", "outerwear", "unique"],
        ),
        product(
            "16",
            "Light Brown Jacket",
            "Elegant light brown jacket, perfect for autumn.",
            16000,
            "jacket44.png",
            "Outerwear",
            9,
            46,
            72,
            &["jacket", "brown", "light", "outerwear", "autumn"],
        ),
        product(
            "17",
            "Dark Green Jacket",
            "Stylish dark green jacket with a comfortable fit.",
            14500,
            "jacket55.png",
            "Outerwear",
            7,
            45,
            81,
            &["jacket", "green", "dark", "outerwear", "comfortable"],
        ),
        product(
            "18",
            "White Strap Sandal",
            "Elegant white sandals with thin straps.",
            7000,
            "sandal1.png",
            "Shoes",
            45,
            42,
            98,
            &["sandals", "white", "strap", "shoes", "elegant"],
        ),
        product(
            "19",
            "Platform Wedge Sandal",
            "Comfortable platform sandals with wedge heel.",
            8500,
            "sandal2.png",
            "Shoes",
            20,
            44,
            105,
            &["sandals", "platform", "wedge", "shoes", "comfortable"],
        ),
        product(
            "20",
            "Black Ankle Strap Sandal",
            "Classic black sandals with an ankle strap.",
            7850,
            "sandal3.png",
            "Shoes",
            30,
            43,
            112,
            &["sandals", "black", "ankle strap", "shoes", "classic"],
        ),
    ]
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_ids_are_unique() {
        let catalog = starter_catalog();
        let mut ids: Vec<_> = catalog.iter().map(|p| p.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), catalog.len());
    }

    #[test]
    fn test_catalog_covers_the_shipped_dataset() {
        let catalog = starter_catalog();
        assert_eq!(catalog.len(), 20);
        let last = catalog.last().unwrap();
        assert_eq!(last.id.as_str(), "20");
        assert_eq!(last.category, "Shoes");
        // Every shipped product carries its rating and review count.
        assert!(catalog.iter().all(|p| p.rating.is_some() && p.reviews.is_some()));
    }

    #[test]
    fn test_catalog_round_trips_as_json() {
        let catalog = starter_catalog();
        let raw = serde_json::to_string(&catalog).unwrap();
        let back: Vec<Product> = serde_json::from_str(&raw).unwrap();
        assert_eq!(back, catalog);
    }
}
