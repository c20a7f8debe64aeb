use anyhow::Result;

use super::{OrderPlan, OrderScenario};
use crate::logic::ReplaySummary;
use tacobox_core::{Effect, MenuId, OrderAction, Outcome};

pub fn catalog_scenarios() -> Vec<OrderScenario> {
    vec![
        OrderScenario {
            key: "smoke",
            name: "Smoke Test",
            description: "Walk every classic step and pick one item per step",
            plan: smoke_plan(),
        },
        OrderScenario {
            key: "reselect-accumulates",
            name: "Re-selection Accumulates",
            description: "Selecting the same item twice grows one entry",
            plan: OrderPlan::new(MenuId::Classic)
                .select("2", 2)
                .select("2", 1)
                .with_expectation(reselect_expectation),
        },
        OrderScenario {
            key: "clear-all",
            name: "Clear All",
            description: "A 5.50 € order empties to zero",
            plan: OrderPlan::new(MenuId::Classic)
                .select("1", 2)
                .then(OrderAction::Next)
                .select("3", 1)
                .then(OrderAction::ClearAll)
                .with_expectation(clear_all_expectation),
        },
        OrderScenario {
            key: "navigation-bounds",
            name: "Navigation Bounds",
            description: "Out-of-range step requests leave the cursor alone",
            plan: OrderPlan::new(MenuId::Classic)
                .then(OrderAction::Previous)
                .then(OrderAction::GoToStep { index: 3 })
                .then(OrderAction::GoToStep { index: 10 })
                .then(OrderAction::Next)
                .then(OrderAction::Next)
                .then(OrderAction::Next)
                .with_expectation(navigation_expectation),
        },
        OrderScenario {
            key: "quantity-floor",
            name: "Quantity Floor",
            description: "The detail prompt never drops below one",
            plan: OrderPlan::new(MenuId::Classic)
                .tap("6")
                .then(OrderAction::AdjustQuantity { delta: -100 })
                .then(OrderAction::Confirm)
                .with_expectation(quantity_floor_expectation),
        },
        OrderScenario {
            key: "cancel-detail",
            name: "Cancel Detail Prompt",
            description: "Cancelling the prompt leaves the selection untouched",
            plan: OrderPlan::new(MenuId::Classic)
                .tap("2")
                .then(OrderAction::AdjustQuantity { delta: 4 })
                .then(OrderAction::Cancel)
                .then(OrderAction::Confirm)
                .with_expectation(cancel_expectation),
        },
        OrderScenario {
            key: "presence-toggle",
            name: "Presence Toggle",
            description: "Tacos menu taps toggle items in and out",
            plan: OrderPlan::new(MenuId::Tacos)
                .tap("1")
                .tap("3")
                .tap("9")
                .tap("3")
                .then(OrderAction::RemoveEntry {
                    item_id: String::from("9"),
                })
                .with_expectation(presence_expectation),
        },
        OrderScenario {
            key: "unknown-items",
            name: "Unknown Items",
            description: "Taps and removals for unknown ids are ignored",
            plan: OrderPlan::new(MenuId::Classic)
                .tap("404")
                .then(OrderAction::RemoveEntry {
                    item_id: String::from("404"),
                })
                .then(OrderAction::Confirm)
                .with_expectation(unknown_items_expectation),
        },
    ]
}

fn smoke_plan() -> OrderPlan {
    OrderPlan::new(MenuId::Classic)
        .select("1", 1)
        .then(OrderAction::Next)
        .select("4", 1)
        .then(OrderAction::Next)
        .select("5", 1)
        .then(OrderAction::Next)
        .select("7", 1)
        .then(OrderAction::Next)
        .select("9", 1)
        .with_expectation(smoke_expectation)
}

fn smoke_expectation(summary: &ReplaySummary) -> Result<()> {
    anyhow::ensure!(summary.ignored == 0, "no action should be ignored");
    anyhow::ensure!(
        summary.view.current_step == 4,
        "should end on the last step, got {}",
        summary.view.current_step
    );
    anyhow::ensure!(!summary.view.can_go_forward, "last step cannot go forward");
    anyhow::ensure!(
        summary.view.summary.lines.len() == 5,
        "expected five lines"
    );
    anyhow::ensure!(
        summary.total_cents() == 650,
        "expected 6.50 €, got {}",
        summary.view.summary.total_label
    );
    Ok(())
}

fn reselect_expectation(summary: &ReplaySummary) -> Result<()> {
    let entries = summary.final_state.selection.entries();
    anyhow::ensure!(entries.len() == 1, "expected one entry, got {}", entries.len());
    anyhow::ensure!(
        entries[0].quantity == 3,
        "expected quantity 3, got {}",
        entries[0].quantity
    );
    anyhow::ensure!(summary.total_cents() == 900, "expected 9.00 €");
    Ok(())
}

fn clear_all_expectation(summary: &ReplaySummary) -> Result<()> {
    let cleared = summary.steps.iter().any(|step| {
        matches!(
            &step.outcome,
            Outcome::Applied(Effect::Cleared { removed: 2 })
        )
    });
    anyhow::ensure!(cleared, "clear-all should remove two lines");
    anyhow::ensure!(
        summary.final_state.selection.is_empty(),
        "selection should be empty"
    );
    anyhow::ensure!(summary.total_cents() == 0, "total should be zero");
    Ok(())
}

fn navigation_expectation(summary: &ReplaySummary) -> Result<()> {
    anyhow::ensure!(
        summary.final_state.cursor.index() == 4,
        "cursor should clamp at the last step"
    );
    anyhow::ensure!(
        summary.ignored == 4,
        "expected four ignored moves, got {}",
        summary.ignored
    );
    Ok(())
}

fn quantity_floor_expectation(summary: &ReplaySummary) -> Result<()> {
    let qty = summary.final_state.selection.quantity_of("6");
    anyhow::ensure!(qty == 1, "quantity should floor at 1, got {qty}");
    Ok(())
}

fn cancel_expectation(summary: &ReplaySummary) -> Result<()> {
    anyhow::ensure!(
        summary.final_state.selection.is_empty(),
        "cancelled prompt must not add"
    );
    anyhow::ensure!(summary.final_state.pending.is_none(), "prompt should be closed");
    anyhow::ensure!(summary.ignored == 1, "trailing confirm should be ignored");
    Ok(())
}

fn presence_expectation(summary: &ReplaySummary) -> Result<()> {
    let selection = &summary.final_state.selection;
    anyhow::ensure!(selection.len() == 1, "only item 1 should remain");
    anyhow::ensure!(selection.contains("1"), "item 1 should be selected");
    anyhow::ensure!(summary.total_cents() == 200, "expected 2.00 €");
    anyhow::ensure!(summary.final_state.pending.is_none(), "no prompt in presence mode");
    Ok(())
}

fn unknown_items_expectation(summary: &ReplaySummary) -> Result<()> {
    anyhow::ensure!(summary.applied == 0, "unknown ids must not apply");
    anyhow::ensure!(summary.final_state.selection.is_empty(), "selection unchanged");
    Ok(())
}
