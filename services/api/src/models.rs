//! API Models
//!
//! Response bodies for the REST endpoints, annotated for OpenAPI
//! documentation with `utoipa`.

use magic_shop_core::catalog::{HINT_PHRASES, ItemType, ShopItem};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Countability {
    Countable,
    Uncountable,
}

impl From<ItemType> for Countability {
    fn from(item_type: ItemType) -> Self {
        match item_type {
            ItemType::Countable => Countability::Countable,
            ItemType::Uncountable => Countability::Uncountable,
        }
    }
}

#[derive(Serialize, ToSchema, Debug, Clone)]
pub struct CatalogItem {
    #[schema(example = "milk")]
    pub id: String,
    #[schema(example = "Milk")]
    pub name: String,
    #[schema(example = "牛奶 (uncountable)")]
    pub localized_name: String,
    #[schema(example = 210)]
    pub price_cents: u32,
    #[schema(example = "€2.10")]
    pub price: String,
    pub countability: Countability,
    pub emoji: String,
    pub accent: String,
}

impl From<&ShopItem> for CatalogItem {
    fn from(item: &ShopItem) -> Self {
        Self {
            id: item.id.to_string(),
            name: item.name.to_string(),
            localized_name: item.localized_name.to_string(),
            price_cents: item.price_cents,
            price: item.price_display(),
            countability: item.item_type.into(),
            emoji: item.emoji.to_string(),
            accent: item.accent.to_string(),
        }
    }
}

#[derive(Serialize, ToSchema, Debug, Clone)]
pub struct HintsResponse {
    /// Shortcut phrases offered next to the input box.
    pub phrases: Vec<String>,
    /// The quantifier phrases that count as missions.
    pub missions: Vec<String>,
}

impl Default for HintsResponse {
    fn default() -> Self {
        Self {
            phrases: HINT_PHRASES.iter().map(|p| p.to_string()).collect(),
            missions: magic_shop_core::mission::Quantifier::ALL
                .iter()
                .map(|q| q.phrase().to_string())
                .collect(),
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use magic_shop_core::catalog::SHOP_ITEMS;

    #[test]
    fn test_catalog_item_from_shop_item() {
        let item = CatalogItem::from(&SHOP_ITEMS[1]);
        assert_eq!(item.id, "lemonade");
        assert_eq!(item.price, "€3.00");
        assert_eq!(item.countability, Countability::Uncountable);
    }

    #[test]
    fn test_catalog_item_serialization() {
        let item = CatalogItem::from(&SHOP_ITEMS[3]);
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["id"], "apples");
        assert_eq!(json["countability"], "countable");
        assert_eq!(json["price_cents"], 80);
    }

    #[test]
    fn test_hints_response_default() {
        let hints = HintsResponse::default();
        assert_eq!(hints.phrases.len(), 5);
        assert_eq!(hints.missions, vec!["a few", "a little", "a lot of"]);
    }

    #[test]
    fn test_error_response_serialization() {
        let error = ErrorResponse {
            message: "Unknown shop item: bananas".to_string(),
        };

        let json = serde_json::to_string(&error).unwrap();
        let expected = r#"{"message":"Unknown shop item: bananas"}"#;
        assert_eq!(json, expected);
    }
}
