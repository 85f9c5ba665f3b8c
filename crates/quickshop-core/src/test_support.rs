use crate::{Product, Variant};

pub(crate) fn make_variant(id: i64, options: [Option<&str>; 3], available: bool) -> Variant {
    Variant {
        id,
        title: options
            .iter()
            .flatten()
            .copied()
            .collect::<Vec<_>>()
            .join(" / "),
        sku: None,
        option1: options[0].map(str::to_owned),
        option2: options[1].map(str::to_owned),
        option3: options[2].map(str::to_owned),
        price: 2500,
        compare_at_price: None,
        available,
        inventory_quantity: 0,
    }
}

pub(crate) fn make_product(variants: Vec<Variant>) -> Product {
    Product {
        id: 42,
        handle: "classic-tee".to_string(),
        title: "Classic Tee".to_string(),
        description: None,
        featured_image: None,
        options: vec!["Color".to_string(), "Size".to_string()],
        variants,
    }
}
