//! Product catalog model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::wire::{deserialize_amount, deserialize_id};

/// A catalog product. Only used to look up a line item's unit price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: i64,
    pub name: String,
    #[serde(deserialize_with = "deserialize_amount")]
    pub price: Decimal,
    #[serde(default)]
    pub stock: Option<i64>,
}

impl Product {
    pub fn new(id: i64, name: impl Into<String>, price: Decimal) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            stock: None,
        }
    }
}

/// Find a product by id
pub fn find_product(catalog: &[Product], id: i64) -> Option<&Product> {
    catalog.iter().find(|p| p.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_from_catalog_json() {
        let product: Product =
            serde_json::from_str(r#"{"id": 2, "name": "Product 2", "price": 2000.0, "stock": 100}"#)
                .unwrap();
        assert_eq!(product.id, 2);
        assert_eq!(product.price, Decimal::new(2000, 0));
        assert_eq!(product.stock, Some(100));
    }

    #[test]
    fn test_find_product() {
        let catalog = vec![
            Product::new(1, "Widget", Decimal::new(100, 0)),
            Product::new(2, "Gadget", Decimal::new(50, 0)),
        ];
        assert_eq!(find_product(&catalog, 2).map(|p| p.name.as_str()), Some("Gadget"));
        assert!(find_product(&catalog, 9).is_none());
    }
}
