//! Catalog seed and validate commands.

use std::path::Path;

use malisek_core::{Price, ProductId};
use malisek_storefront::catalog::{
    Catalog, CatalogDocument, PriceBand, Product, Taxonomy, Variation,
};

type BoxError = Box<dyn std::error::Error>;

/// Write the built-in demo catalog to `path`.
pub fn seed(path: &Path) -> Result<(), BoxError> {
    let document = demo_document();
    // The demo data must pass the same invariants a loaded file would.
    Catalog::from_document(document.clone())?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, serde_json::to_string_pretty(&document)?)?;

    tracing::info!(
        path = %path.display(),
        products = document.products.len(),
        "Catalog seeded"
    );
    Ok(())
}

/// Load and validate a catalog document.
pub fn validate(path: &Path) -> Result<(), BoxError> {
    let catalog = Catalog::load(path)?;

    tracing::info!(
        path = %path.display(),
        products = catalog.len(),
        categories = catalog.taxonomy().categories.len(),
        brands = catalog.taxonomy().brands.len(),
        "Catalog is valid"
    );
    Ok(())
}

fn product(
    id: &str,
    name: &str,
    price: i64,
    original_price: Option<i64>,
    category: &str,
    rating: f64,
    description: &str,
    features: &[&str],
    in_stock: bool,
) -> Product {
    Product {
        id: ProductId::new(id),
        name: name.to_string(),
        price: Price::from_major(price),
        original_price: original_price.map(Price::from_major),
        image: format!("/images/products/{id}.jpg"),
        category: category.to_string(),
        rating,
        description: description.to_string(),
        features: features.iter().map(ToString::to_string).collect(),
        in_stock,
        variations: Vec::new(),
        images: Vec::new(),
    }
}

fn variation(name: &str, options: &[&str]) -> Variation {
    Variation {
        name: name.to_string(),
        options: options.iter().map(ToString::to_string).collect(),
    }
}

fn band(label: &str, min: i64, max: Option<i64>) -> PriceBand {
    PriceBand {
        label: label.to_string(),
        min: Price::from_major(min),
        max: max.map(Price::from_major),
    }
}

/// The demo catalog: eight products across the store's categories.
fn demo_document() -> CatalogDocument {
    let mut iphone = product(
        "1",
        "iPhone 15 Pro Max",
        1199,
        Some(1299),
        "Smartphones",
        4.8,
        "The most advanced iPhone ever with titanium design and powerful A17 Pro chip.",
        &[
            "A17 Pro Chip",
            "48MP Camera System",
            "5G Connectivity",
            "Titanium Build",
        ],
        true,
    );
    iphone.variations = vec![
        variation("Storage", &["128GB", "256GB", "512GB", "1TB"]),
        variation(
            "Color",
            &[
                "Natural Titanium",
                "Blue Titanium",
                "White Titanium",
                "Black Titanium",
            ],
        ),
    ];
    iphone.images = vec![
        "/images/products/1-front.jpg".to_string(),
        "/images/products/1-back.jpg".to_string(),
        "/images/products/1-side.jpg".to_string(),
    ];

    let mut macbook = product(
        "2",
        "MacBook Air M3",
        1099,
        Some(1199),
        "Laptops",
        4.9,
        "Supercharged by the M3 chip, the MacBook Air is incredibly fast and efficient.",
        &[
            "M3 Chip",
            "13.6\" Liquid Retina Display",
            "18-hour Battery",
            "MagSafe Charging",
        ],
        true,
    );
    macbook.variations = vec![
        variation("Memory", &["8GB", "16GB", "24GB"]),
        variation("Storage", &["256GB", "512GB", "1TB", "2TB"]),
        variation("Color", &["Space Gray", "Silver", "Starlight", "Midnight"]),
    ];

    let mut watch = product(
        "3",
        "Apple Watch Series 9",
        399,
        None,
        "Wearables",
        4.7,
        "The most advanced Apple Watch yet with new health features.",
        &[
            "S9 Chip",
            "Always-On Display",
            "Blood Oxygen Monitoring",
            "ECG Capability",
        ],
        true,
    );
    watch.variations = vec![
        variation("Size", &["41mm", "45mm"]),
        variation(
            "Color",
            &["Pink", "Starlight", "Silver", "Product Red", "Midnight"],
        ),
    ];

    let printer = product(
        "4",
        "HP LaserJet Pro M404n",
        199,
        Some(249),
        "Printers",
        4.5,
        "Fast, reliable laser printer perfect for office environments.",
        &[
            "38 ppm Print Speed",
            "Automatic Duplex",
            "Mobile Printing",
            "Energy Efficient",
        ],
        true,
    );

    let mut monitor = product(
        "5",
        "Samsung 27\" 4K Monitor",
        329,
        None,
        "Monitors",
        4.6,
        "Crystal clear 4K resolution with vibrant colors and sharp details.",
        &[
            "4K UHD Resolution",
            "HDR10 Support",
            "USB-C Hub",
            "Eye Saver Mode",
        ],
        true,
    );
    monitor.variations = vec![variation("Size", &["24\"", "27\"", "32\""])];

    let camera = product(
        "6",
        "Canon EOS R5",
        3899,
        None,
        "Cameras",
        4.9,
        "Professional mirrorless camera with 45MP sensor and 8K video.",
        &[
            "45MP Full-Frame Sensor",
            "8K Video Recording",
            "In-Body Stabilization",
            "Dual Pixel CMOS AF",
        ],
        false,
    );

    let mut surface = product(
        "7",
        "Microsoft Surface Pro 9",
        999,
        Some(1199),
        "Tablets",
        4.4,
        "2-in-1 laptop and tablet with Intel 12th Gen processors.",
        &[
            "Intel 12th Gen i5",
            "13\" PixelSense Display",
            "All-day Battery",
            "Windows 11",
        ],
        true,
    );
    surface.variations = vec![
        variation("Processor", &["Intel i5", "Intel i7"]),
        variation("RAM", &["8GB", "16GB", "32GB"]),
        variation("Storage", &["128GB", "256GB", "512GB", "1TB"]),
    ];

    let xps = product(
        "8",
        "Dell XPS 13",
        899,
        None,
        "Laptops",
        4.6,
        "Ultra-portable laptop with stunning InfinityEdge display.",
        &[
            "13.4\" InfinityEdge Display",
            "Intel 13th Gen i7",
            "16GB RAM",
            "512GB SSD",
        ],
        true,
    );

    CatalogDocument {
        products: vec![
            iphone, macbook, watch, printer, monitor, camera, surface, xps,
        ],
        taxonomy: Taxonomy {
            categories: vec![
                "Smartphones".to_string(),
                "Laptops".to_string(),
                "Tablets".to_string(),
                "Wearables".to_string(),
                "Cameras".to_string(),
                "Printers".to_string(),
                "Monitors".to_string(),
                "Accessories".to_string(),
            ],
            brands: vec![
                "Apple".to_string(),
                "Samsung".to_string(),
                "Microsoft".to_string(),
                "Dell".to_string(),
                "HP".to_string(),
                "Canon".to_string(),
                "Sony".to_string(),
                "Lenovo".to_string(),
                "ASUS".to_string(),
            ],
            price_bands: vec![
                band("Under $100", 0, Some(100)),
                band("$100 - $500", 100, Some(500)),
                band("$500 - $1000", 500, Some(1000)),
                band("$1000 - $2000", 1000, Some(2000)),
                band("Over $2000", 2000, None),
            ],
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_document_passes_validation() {
        let catalog = Catalog::from_document(demo_document()).expect("demo catalog is valid");
        assert_eq!(catalog.len(), 8);
        assert_eq!(catalog.taxonomy().price_bands.len(), 5);
    }

    #[test]
    fn test_seed_then_validate_round_trip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("catalog.json");

        seed(&path).expect("seed");
        validate(&path).expect("validate");

        let catalog = Catalog::load(&path).expect("load");
        let iphone = catalog
            .product(&ProductId::new("1"))
            .expect("iphone present");
        assert_eq!(iphone.discount_percent(), Some(8));
        assert_eq!(iphone.variations.len(), 2);
        assert_eq!(iphone.gallery().len(), 3);
    }

    #[test]
    fn test_validate_rejects_broken_document() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("catalog.json");
        std::fs::write(&path, "{\"products\": [}").expect("write");

        assert!(validate(&path).is_err());
    }
}
