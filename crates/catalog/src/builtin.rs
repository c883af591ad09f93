use shared::domain::{Dimensions, Product, ProductId};

#[allow(clippy::too_many_arguments)]
fn product(
    id: u32,
    name: &str,
    model: &str,
    price: f64,
    category: &str,
    (width, height, depth): (f32, f32, f32),
    color: &str,
    features: &[&str],
    description: &str,
) -> Product {
    Product {
        id: ProductId(id),
        name: name.into(),
        model: model.into(),
        price,
        category: category.into(),
        dimensions: Dimensions {
            width,
            height,
            depth,
        },
        color: color.into(),
        features: features.iter().map(|feature| (*feature).to_string()).collect(),
        description: description.into(),
    }
}

/// The five LG televisions shipped with the viewer.
pub fn builtin_products() -> Vec<Product> {
    vec![
        product(
            1,
            "LG OLED C3 55\"",
            "OLED55C3PSA",
            1299.0,
            "OLED",
            (2.0, 1.2, 0.1),
            "#2c3e50",
            &["4K", "HDR10", "Dolby Vision", "webOS"],
            "4K OLED TV with the α9 Gen6 AI processor",
        ),
        product(
            2,
            "LG QNED 65\"",
            "QNED65MR7550PSA",
            899.0,
            "QNED",
            (2.4, 1.4, 0.12),
            "#e74c3c",
            &["4K", "HDR", "Quantum Dot", "NanoCell"],
            "QNED TV with Quantum Dot and NanoCell technology",
        ),
        product(
            3,
            "LG UltraHD 75\"",
            "UP75UN7300PSC",
            1599.0,
            "UltraHD",
            (2.8, 1.6, 0.15),
            "#3498db",
            &["4K", "UltraHD", "Smart TV", "ThinQ AI"],
            "4K UltraHD TV with ThinQ artificial intelligence",
        ),
        product(
            4,
            "LG NanoCell 43\"",
            "NANO43UP7750PSB",
            499.0,
            "NanoCell",
            (1.6, 0.9, 0.08),
            "#9b59b6",
            &["4K", "NanoCell", "Real 4K", "webOS"],
            "Compact NanoCell TV with pure colour technology",
        ),
        product(
            5,
            "LG OLED Gallery 83\"",
            "OLED83G3PSA",
            3299.0,
            "OLED Gallery",
            (3.2, 1.8, 0.04),
            "#1abc9c",
            &["8K", "Gallery Design", "Ultra Slim", "α9 Gen6"],
            "Ultra-slim 83 inch OLED Gallery Design TV",
        ),
    ]
}
