use serde::{Deserialize, Serialize};

pub const SHOPKEEPER_NAME: &str = "Mr. Panda";
pub const SHOPKEEPER_EMOJI: &str = "🐼";

/// Phrase shortcuts offered next to the input box.
pub const HINT_PHRASES: [&str; 5] = ["I would like", "How much", "a few", "a little", "a lot of"];

/// Grammatical class of an item, which decides the quantifier it takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    Countable,
    Uncountable,
}

impl ItemType {
    pub fn as_str(self) -> &'static str {
        match self {
            ItemType::Countable => "countable",
            ItemType::Uncountable => "uncountable",
        }
    }
}

/// A single entry on the shop shelf.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShopItem {
    pub id: &'static str,
    /// English name, as the student is expected to say it.
    pub name: &'static str,
    pub localized_name: &'static str,
    /// Price in euro cents.
    pub price_cents: u32,
    pub item_type: ItemType,
    pub emoji: &'static str,
    /// Card background hint for the presentation layer.
    pub accent: &'static str,
}

impl ShopItem {
    /// Renders the price the way the shopkeeper quotes it, e.g. `€2.50`.
    pub fn price_display(&self) -> String {
        format!("€{}.{:02}", self.price_cents / 100, self.price_cents % 100)
    }
}

pub static SHOP_ITEMS: [ShopItem; 5] = [
    ShopItem {
        id: "tomatoes",
        name: "Tin of Tomatoes",
        localized_name: "番茄罐头 (countable)",
        price_cents: 250,
        item_type: ItemType::Countable,
        emoji: "🥫",
        accent: "red-100",
    },
    ShopItem {
        id: "lemonade",
        name: "Lemonade",
        localized_name: "柠檬水 (uncountable)",
        price_cents: 300,
        item_type: ItemType::Uncountable,
        emoji: "🍋",
        accent: "yellow-100",
    },
    ShopItem {
        id: "sweets",
        name: "Sweets",
        localized_name: "糖果 (countable)",
        price_cents: 120,
        item_type: ItemType::Countable,
        emoji: "🍬",
        accent: "pink-100",
    },
    ShopItem {
        id: "apples",
        name: "Apples",
        localized_name: "苹果 (countable)",
        price_cents: 80,
        item_type: ItemType::Countable,
        emoji: "🍎",
        accent: "red-200",
    },
    ShopItem {
        id: "milk",
        name: "Milk",
        localized_name: "牛奶 (uncountable)",
        price_cents: 210,
        item_type: ItemType::Uncountable,
        emoji: "🥛",
        accent: "blue-100",
    },
];

/// Looks up a catalog entry by its identifier.
pub fn find_item<'a>(items: &'a [ShopItem], id: &str) -> Option<&'a ShopItem> {
    items.iter().find(|item| item.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_display_pads_cents() {
        let apples = find_item(&SHOP_ITEMS, "apples").unwrap();
        assert_eq!(apples.price_display(), "€0.80");
        let lemonade = find_item(&SHOP_ITEMS, "lemonade").unwrap();
        assert_eq!(lemonade.price_display(), "€3.00");
    }

    #[test]
    fn test_find_item_unknown() {
        assert!(find_item(&SHOP_ITEMS, "bananas").is_none());
    }

    #[test]
    fn test_catalog_ids_are_unique() {
        for (i, a) in SHOP_ITEMS.iter().enumerate() {
            for b in SHOP_ITEMS.iter().skip(i + 1) {
                assert_ne!(a.id, b.id);
            }
        }
    }

    #[test]
    fn test_item_type_serialization() {
        assert_eq!(
            serde_json::to_string(&ItemType::Uncountable).unwrap(),
            "\"uncountable\""
        );
        assert_eq!(ItemType::Countable.as_str(), "countable");
    }
}
