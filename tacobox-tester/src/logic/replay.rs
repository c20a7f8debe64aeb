use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;

use tacobox_core::{Menu, OrderAction, OrderBuilder, OrderState, OrderView, Outcome};

/// One replayed action and what the engine did with it.
#[derive(Debug, Clone, Serialize)]
pub struct ReplayStep {
    pub action: OrderAction,
    pub outcome: Outcome,
}

/// Result of feeding an action list through a fresh order session.
#[derive(Debug, Clone, Serialize)]
pub struct ReplaySummary {
    pub menu_id: String,
    pub steps: Vec<ReplayStep>,
    pub applied: usize,
    pub ignored: usize,
    pub final_state: OrderState,
    pub view: OrderView,
}

impl ReplaySummary {
    #[must_use]
    pub fn total_cents(&self) -> u64 {
        self.view.summary.total_cents
    }
}

pub fn replay(menu: &Menu, actions: &[OrderAction], verbose: bool) -> ReplaySummary {
    let mut builder = OrderBuilder::new(menu);
    let mut steps = Vec::with_capacity(actions.len());
    let mut applied = 0;

    for action in actions {
        let outcome = builder.dispatch(action.clone());
        if outcome.is_applied() {
            applied += 1;
        }
        if verbose {
            log::info!("{action:?} => {outcome:?}");
        }
        steps.push(ReplayStep {
            action: action.clone(),
            outcome,
        });
    }

    ReplaySummary {
        menu_id: menu.id().to_string(),
        ignored: steps.len() - applied,
        steps,
        applied,
        final_state: builder.state().clone(),
        view: builder.view(),
    }
}

/// Load an action script: a JSON array of tagged actions.
pub fn load_script(path: &Path) -> Result<Vec<OrderAction>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read script {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse script {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tacobox_core::MenuId;

    #[test]
    fn replay_counts_applied_and_ignored() {
        let menu = Menu::builtin(MenuId::Classic).unwrap();
        let actions = vec![
            OrderAction::Previous,
            OrderAction::TapItem {
                item_id: String::from("2"),
            },
            OrderAction::Confirm,
            OrderAction::Confirm,
        ];
        let summary = replay(&menu, &actions, false);
        assert_eq!(summary.applied, 2);
        assert_eq!(summary.ignored, 2);
        assert_eq!(summary.total_cents(), 300);
        assert_eq!(summary.menu_id, "classic");
    }

    #[test]
    fn load_script_reports_missing_file() {
        let err = load_script(Path::new("/nonexistent/tacobox-script.json")).unwrap_err();
        assert!(format!("{err:#}").contains("failed to read script"));
    }

    #[test]
    fn load_script_parses_actions() {
        let path = std::env::temp_dir().join("tacobox-replay-script.json");
        std::fs::write(&path, r#"[{"action": "next"}, {"action": "clear_all"}]"#).unwrap();
        let actions = load_script(&path).unwrap();
        assert_eq!(actions, vec![OrderAction::Next, OrderAction::ClearAll]);
    }
}
