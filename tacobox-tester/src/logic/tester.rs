use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::logic::replay::replay;
use crate::scenario::OrderScenario;
use tacobox_core::{Menu, MenuError, MenuId, SelectionMode};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub scenario_name: String,
    pub menu: String,
    pub passed: bool,
    pub actions_applied: usize,
    pub actions_ignored: usize,
    pub final_total_cents: u64,
    pub failures: Vec<String>,
    #[serde(with = "duration_serde")]
    pub duration: Duration,
}

/// Runs catalog scenarios against the built-in menus, or a caller-supplied override.
pub struct LogicTester {
    verbose: bool,
    menus: HashMap<MenuId, Menu>,
    menu_override: Option<Menu>,
}

impl LogicTester {
    /// # Errors
    ///
    /// Fails if a bundled menu cannot be loaded.
    pub fn new(verbose: bool) -> Result<Self, MenuError> {
        let mut menus = HashMap::new();
        for id in MenuId::ALL {
            menus.insert(id, Menu::builtin(id)?);
        }
        Ok(Self {
            verbose,
            menus,
            menu_override: None,
        })
    }

    /// Replace the built-in menu of every scenario written for the same
    /// selection mode as `menu`.
    #[must_use]
    pub fn with_menu_override(mut self, menu: Option<Menu>) -> Self {
        self.menu_override = menu;
        self
    }

    fn builtin_mode(&self, id: MenuId) -> Option<SelectionMode> {
        self.menus.get(&id).map(Menu::selection_mode)
    }

    /// Whether `scenario` can run here. With an override loaded, only
    /// scenarios sharing its selection mode qualify.
    #[must_use]
    pub fn covers(&self, scenario: &OrderScenario) -> bool {
        match &self.menu_override {
            Some(custom) => self.builtin_mode(scenario.plan.menu) == Some(custom.selection_mode()),
            None => true,
        }
    }

    fn menu_for(&self, id: MenuId) -> Option<&Menu> {
        match &self.menu_override {
            Some(custom) if self.builtin_mode(id) == Some(custom.selection_mode()) => Some(custom),
            _ => self.menus.get(&id),
        }
    }

    pub fn run_scenario(&self, scenario: &OrderScenario) -> ScenarioResult {
        let start_time = Instant::now();
        let plan = &scenario.plan;

        if self.verbose {
            log::info!("running scenario {} (menu: {})", scenario.name, plan.menu);
        }

        let Some(menu) = self.menu_for(plan.menu) else {
            return ScenarioResult {
                scenario_name: scenario.name.to_string(),
                menu: plan.menu.to_string(),
                passed: false,
                actions_applied: 0,
                actions_ignored: 0,
                final_total_cents: 0,
                failures: vec![format!("menu `{}` is not loaded", plan.menu)],
                duration: start_time.elapsed(),
            };
        };

        let summary = replay(menu, &plan.actions, self.verbose);
        let mut failures = Vec::new();
        if let Some(expectation) = plan.expectation
            && let Err(err) = expectation(&summary)
        {
            failures.push(format!(
                "{err:#} | applied {} ignored {} | total {}",
                summary.applied, summary.ignored, summary.view.summary.total_label
            ));
        }

        ScenarioResult {
            scenario_name: scenario.name.to_string(),
            menu: menu.id().to_string(),
            passed: failures.is_empty(),
            actions_applied: summary.applied,
            actions_ignored: summary.ignored,
            final_total_cents: summary.total_cents(),
            failures,
            duration: start_time.elapsed(),
        }
    }
}

mod duration_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_micros().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let micros = u128::deserialize(deserializer)?;
        Ok(Duration::from_micros(u64::try_from(micros).unwrap_or(0)))
    }
}
