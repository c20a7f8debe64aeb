//! Catalog of purchasable items.
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::MenuError;

/// Opaque handle to an item image. Resolved by the presentation layer only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetRef(String);

impl AssetRef {
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.0
    }
}

/// A single item available for ordering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub image: AssetRef,
    /// Unit price in cents
    pub price_cents: u32,
    pub category: String,
}

impl CatalogItem {
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        price_cents: u32,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            image: AssetRef::default(),
            price_cents,
            category: category.into(),
        }
    }

    #[must_use]
    pub fn with_image(mut self, image: AssetRef) -> Self {
        self.image = image;
        self
    }
}

/// Immutable item table, kept in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Catalog {
    items: Vec<CatalogItem>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate item ids.
    ///
    /// # Errors
    ///
    /// Returns [`MenuError::DuplicateItem`] when two items share an id.
    pub fn new(items: Vec<CatalogItem>) -> Result<Self, MenuError> {
        let mut seen = HashSet::with_capacity(items.len());
        for item in &items {
            if !seen.insert(item.id.as_str()) {
                return Err(MenuError::DuplicateItem {
                    id: item.id.clone(),
                });
            }
        }
        Ok(Self { items })
    }

    #[must_use]
    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    /// Find an item by ID.
    #[must_use]
    pub fn find_item(&self, item_id: &str) -> Option<&CatalogItem> {
        self.items.iter().find(|item| item.id == item_id)
    }

    #[must_use]
    pub fn contains(&self, item_id: &str) -> bool {
        self.find_item(item_id).is_some()
    }

    /// Items of one category in declaration order. Unknown categories yield nothing.
    pub fn items_for_category<'a>(
        &'a self,
        category: &'a str,
    ) -> impl Iterator<Item = &'a CatalogItem> + 'a {
        self.items.iter().filter(move |item| item.category == category)
    }

    /// Distinct categories in first-declared order.
    #[must_use]
    pub fn categories(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for item in &self.items {
            if !out.contains(&item.category.as_str()) {
                out.push(&item.category);
            }
        }
        out
    }

    #[must_use]
    pub fn has_category(&self, category: &str) -> bool {
        self.items.iter().any(|item| item.category == category)
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a CatalogItem;
    type IntoIter = std::slice::Iter<'a, CatalogItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Catalog {
        Catalog::new(vec![
            CatalogItem::new("1", "Poulet Haché", 200, "viande"),
            CatalogItem::new("3", "Fromage", 150, "extras"),
            CatalogItem::new("2", "Boeuf", 300, "viande"),
        ])
        .unwrap()
    }

    #[test]
    fn filters_by_category_in_declaration_order() {
        let catalog = sample();
        let ids: Vec<&str> = catalog
            .items_for_category("viande")
            .map(|item| item.id.as_str())
            .collect();
        assert_eq!(ids, ["1", "2"]);
    }

    #[test]
    fn unknown_category_is_empty() {
        let catalog = sample();
        assert_eq!(catalog.items_for_category("desserts").count(), 0);
    }

    #[test]
    fn categories_are_distinct_and_ordered() {
        assert_eq!(sample().categories(), ["viande", "extras"]);
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let err = Catalog::new(vec![
            CatalogItem::new("1", "A", 100, "x"),
            CatalogItem::new("1", "B", 100, "x"),
        ])
        .unwrap_err();
        assert!(matches!(err, MenuError::DuplicateItem { id } if id == "1"));
    }

    #[test]
    fn image_defaults_to_empty_and_can_be_attached() {
        let plain = CatalogItem::new("1", "Poulet Haché", 200, "viande");
        assert_eq!(plain.image.key(), "");
        let pictured = plain.with_image(AssetRef::new("steck.png"));
        assert_eq!(pictured.image.key(), "steck.png");
        let json = serde_json::to_value(&pictured).unwrap();
        assert_eq!(json["image"], "steck.png");
    }

    #[test]
    fn find_item_resolves_ids() {
        let catalog = sample();
        assert_eq!(catalog.find_item("3").map(|i| i.price_cents), Some(150));
        assert!(!catalog.contains("42"));
    }
}
