use anyhow::Result;

use crate::logic::ReplaySummary;
use tacobox_core::{MenuId, OrderAction};

pub mod catalog;

pub type Expectation = fn(&ReplaySummary) -> Result<()>;

/// A menu, the actions to feed it, and what must hold afterwards.
#[derive(Debug, Clone)]
pub struct OrderPlan {
    pub menu: MenuId,
    pub actions: Vec<OrderAction>,
    pub expectation: Option<Expectation>,
}

impl OrderPlan {
    #[must_use]
    pub const fn new(menu: MenuId) -> Self {
        Self {
            menu,
            actions: Vec::new(),
            expectation: None,
        }
    }

    #[must_use]
    pub fn then(mut self, action: OrderAction) -> Self {
        self.actions.push(action);
        self
    }

    #[must_use]
    pub fn tap(self, item_id: &str) -> Self {
        self.then(OrderAction::TapItem {
            item_id: item_id.to_string(),
        })
    }

    /// Tap, adjust to `quantity` and confirm.
    #[must_use]
    pub fn select(self, item_id: &str, quantity: i32) -> Self {
        self.tap(item_id)
            .then(OrderAction::AdjustQuantity {
                delta: quantity - 1,
            })
            .then(OrderAction::Confirm)
    }

    #[must_use]
    pub const fn with_expectation(mut self, expectation: Expectation) -> Self {
        self.expectation = Some(expectation);
        self
    }
}

#[derive(Debug, Clone)]
pub struct OrderScenario {
    pub key: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub plan: OrderPlan,
}

pub fn get_scenario(name: &str) -> Option<OrderScenario> {
    let key = name.trim().to_lowercase();
    catalog::catalog_scenarios()
        .into_iter()
        .find(|scenario| scenario.key == key)
}

pub fn list_scenarios() -> Vec<(&'static str, &'static str)> {
    catalog::catalog_scenarios()
        .into_iter()
        .map(|scenario| (scenario.key, scenario.description))
        .collect()
}

/// Expand the `all` keyword into every catalog key, keeping explicit names in order.
pub fn expand_scenarios(names: &[String]) -> Vec<String> {
    let mut expanded: Vec<String> = names.iter().filter(|n| *n != "all").cloned().collect();
    if names.iter().any(|n| n == "all") {
        for (key, _) in list_scenarios() {
            if !expanded.iter().any(|n| n == key) {
                expanded.push(key.to_string());
            }
        }
    }
    expanded
}
