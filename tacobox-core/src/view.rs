//! Render-boundary snapshot handed to the presentation layer after each event.
use serde::{Deserialize, Serialize};

use crate::catalog::AssetRef;
use crate::menu::Menu;
use crate::numbers::line_total_cents;
use crate::order::OrderState;
use crate::price::{format_addon, format_price};
use crate::selection::SelectionMode;
use crate::steps::StepStatus;
use crate::summary::OrderSummary;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepView {
    pub ordinal: u32,
    pub title: String,
    pub status: StepStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemCard {
    pub item_id: String,
    pub name: String,
    pub image: AssetRef,
    pub price_cents: u32,
    pub price_label: String,
    /// Quantity already in the selection, 0 when absent
    pub selected_quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingView {
    pub item_id: String,
    pub name: String,
    pub image: AssetRef,
    pub quantity: u32,
    pub line_total_cents: u64,
    pub line_total_label: String,
}

/// Everything the presentation layer needs to draw the widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderView {
    pub menu_name: String,
    pub mode: SelectionMode,
    pub steps: Vec<StepView>,
    pub current_step: usize,
    pub title: String,
    pub subtitle: String,
    pub can_go_back: bool,
    pub can_go_forward: bool,
    pub items: Vec<ItemCard>,
    pub summary: OrderSummary,
    pub pending: Option<PendingView>,
}

impl OrderView {
    #[must_use]
    pub fn build(menu: &Menu, state: &OrderState) -> Self {
        let steps = menu.steps();
        let catalog = menu.catalog();
        let cursor = state.cursor;
        let current = cursor.current_step(steps);

        let step_views = steps
            .iter()
            .enumerate()
            .map(|(index, step)| StepView {
                ordinal: step.ordinal,
                title: step.title.clone(),
                status: cursor.status_of(index),
            })
            .collect();

        let items = catalog
            .items_for_category(&current.category)
            .map(|item| ItemCard {
                item_id: item.id.clone(),
                name: item.name.clone(),
                image: item.image.clone(),
                price_cents: item.price_cents,
                price_label: format_addon(item.price_cents),
                selected_quantity: state.selection.quantity_of(&item.id),
            })
            .collect();

        // A prompt for an item that no longer resolves has nothing to show.
        let pending = state.pending.as_ref().and_then(|detail| {
            catalog.find_item(detail.item_id()).map(|item| {
                let line_total = line_total_cents(item.price_cents, detail.quantity());
                PendingView {
                    item_id: item.id.clone(),
                    name: item.name.clone(),
                    image: item.image.clone(),
                    quantity: detail.quantity(),
                    line_total_cents: line_total,
                    line_total_label: format_price(line_total),
                }
            })
        });

        Self {
            menu_name: menu.name().to_string(),
            mode: state.selection.mode(),
            steps: step_views,
            current_step: cursor.index(),
            title: current.title.clone(),
            subtitle: current.subtitle.clone(),
            can_go_back: cursor.can_go_back(),
            can_go_forward: cursor.can_go_forward(steps),
            items,
            summary: OrderSummary::build(&state.selection, catalog),
            pending,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::MenuId;
    use crate::order::OrderBuilder;

    #[test]
    fn initial_view_shows_first_step() {
        let menu = Menu::builtin(MenuId::Classic).unwrap();
        let view = OrderBuilder::new(&menu).view();
        assert_eq!(view.current_step, 0);
        assert_eq!(view.title, "Viande");
        assert_eq!(view.subtitle, "Choisis ta");
        assert!(!view.can_go_back);
        assert!(view.can_go_forward);
        assert_eq!(view.steps[0].status, StepStatus::Current);
        assert_eq!(view.steps[4].status, StepStatus::Upcoming);
        assert_eq!(view.items.len(), 2);
        assert_eq!(view.items[1].price_label, "+3.00 €");
        assert!(view.summary.is_empty());
        assert!(view.pending.is_none());
    }

    #[test]
    fn pending_view_reports_prospective_total() {
        let menu = Menu::builtin(MenuId::Classic).unwrap();
        let mut builder = OrderBuilder::new(&menu);
        builder.begin_selection("2");
        builder.adjust_pending_quantity(1);
        let pending = builder.view().pending.unwrap();
        assert_eq!(pending.name, "Boeuf");
        assert_eq!(pending.quantity, 2);
        assert_eq!(pending.line_total_label, "6.00 €");
    }

    #[test]
    fn cards_reflect_selected_quantities() {
        let menu = Menu::builtin(MenuId::Classic).unwrap();
        let mut builder = OrderBuilder::new(&menu);
        builder.select_quantity("1", 3);
        let view = builder.view();
        assert_eq!(view.items[0].selected_quantity, 3);
        assert_eq!(view.items[1].selected_quantity, 0);
        assert_eq!(view.summary.total_label, "6.00 €");
    }

    #[test]
    fn view_serializes_for_presentation() {
        let menu = Menu::builtin(MenuId::Tacos).unwrap();
        let view = OrderBuilder::new(&menu).view();
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["mode"], "presence_only");
        assert_eq!(json["items"].as_array().map(Vec::len), Some(9));
    }
}
