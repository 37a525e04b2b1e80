//! Shopkeeper System Instruction
//!
//! The instruction sent with every turn is a template with a `{catalog}`
//! placeholder. It is rendered against the live item list whenever a new
//! conversation session is built, so price or stock changes reach the model
//! without touching the template.

use crate::catalog::ShopItem;

/// The template bundled with the repository under `prompts/system_prompt.md`.
pub const DEFAULT_SYSTEM_TEMPLATE: &str = include_str!("../../../prompts/system_prompt.md");

const CATALOG_PLACEHOLDER: &str = "{catalog}";

/// Formats the shelf as one line per item, e.g. `- Milk (uncountable) Price: €2.10`.
pub fn format_catalog(items: &[ShopItem]) -> String {
    items
        .iter()
        .map(|item| {
            format!(
                "- {} ({}) Price: {}",
                item.name,
                item.item_type.as_str(),
                item.price_display()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Substitutes the catalog into `template`.
///
/// A template without the placeholder gets the catalog appended under its own
/// heading, so the model always sees the shelf.
pub fn render_system_instruction(template: &str, items: &[ShopItem]) -> String {
    let catalog = format_catalog(items);
    if template.contains(CATALOG_PLACEHOLDER) {
        template.replace(CATALOG_PLACEHOLDER, &catalog)
    } else {
        format!("{}\n\nAvailable Items in Shop:\n{}", template.trim_end(), catalog)
    }
}
