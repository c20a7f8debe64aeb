//! Order summary derived from the selection and the catalog.
use serde::{Deserialize, Serialize};

use crate::catalog::{AssetRef, Catalog};
use crate::numbers::line_total_cents;
use crate::price::format_price;
use crate::selection::SelectionStore;

/// Total cost of a selection in cents.
///
/// Entries whose item no longer resolves in the catalog contribute nothing.
#[must_use]
pub fn compute_total(selection: &SelectionStore, catalog: &Catalog) -> u64 {
    let mut total = 0u64;

    for entry in selection {
        if let Some(item) = catalog.find_item(&entry.item_id) {
            total = total.saturating_add(line_total_cents(item.price_cents, entry.quantity));
        }
    }

    total
}

/// A resolved, removable line of the summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryLine {
    pub item_id: String,
    pub name: String,
    pub image: AssetRef,
    pub unit_price_cents: u32,
    pub quantity: u32,
    pub line_total_cents: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSummary {
    pub lines: Vec<SummaryLine>,
    pub total_cents: u64,
    pub total_label: String,
    /// Selected ids that did not resolve in the catalog
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unresolved: Vec<String>,
}

impl OrderSummary {
    #[must_use]
    pub fn build(selection: &SelectionStore, catalog: &Catalog) -> Self {
        let mut lines = Vec::with_capacity(selection.len());
        let mut unresolved = Vec::new();

        for entry in selection {
            match catalog.find_item(&entry.item_id) {
                Some(item) => lines.push(SummaryLine {
                    item_id: item.id.clone(),
                    name: item.name.clone(),
                    image: item.image.clone(),
                    unit_price_cents: item.price_cents,
                    quantity: entry.quantity,
                    line_total_cents: line_total_cents(item.price_cents, entry.quantity),
                }),
                None => {
                    log::warn!(
                        "selection references unknown item `{}`; counted as zero",
                        entry.item_id
                    );
                    unresolved.push(entry.item_id.clone());
                }
            }
        }

        let total_cents = lines
            .iter()
            .fold(0u64, |acc, line| acc.saturating_add(line.line_total_cents));

        Self {
            lines,
            total_cents,
            total_label: format_price(total_cents),
            unresolved,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
