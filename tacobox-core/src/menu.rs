//! Menu configuration: catalog, steps and selection policy bundled together.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::catalog::{Catalog, CatalogItem};
use crate::error::MenuError;
use crate::selection::SelectionMode;
use crate::steps::{Step, StepSequence};

const CLASSIC_MENU_DATA: &str = include_str!("../assets/menus/classic.json");
const TACOS_MENU_DATA: &str = include_str!("../assets/menus/tacos.json");

/// Built-in menus shipped with the crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MenuId {
    /// One category per step, quantities collected through the detail prompt.
    Classic,
    /// Every step shows the full tacos range, tapping toggles membership.
    Tacos,
}

impl MenuId {
    pub const ALL: [Self; 2] = [Self::Classic, Self::Tacos];

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Classic => "classic",
            Self::Tacos => "tacos",
        }
    }

    const fn source(self) -> &'static str {
        match self {
            Self::Classic => CLASSIC_MENU_DATA,
            Self::Tacos => TACOS_MENU_DATA,
        }
    }
}

impl fmt::Display for MenuId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for MenuId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "classic" => Ok(Self::Classic),
            "tacos" => Ok(Self::Tacos),
            other => Err(format!("unknown menu `{other}`")),
        }
    }
}

/// Raw JSON shape of a menu before validation.
#[derive(Debug, Clone, Deserialize)]
struct MenuDocument {
    id: String,
    name: String,
    #[serde(default)]
    selection_mode: SelectionMode,
    steps: Vec<Step>,
    items: Vec<CatalogItem>,
}

/// Validated menu. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Menu {
    id: String,
    name: String,
    selection_mode: SelectionMode,
    steps: StepSequence,
    catalog: Catalog,
}

impl Menu {
    /// Assemble a menu, checking that every step is bound to a category with items.
    ///
    /// # Errors
    ///
    /// Returns a [`MenuError`] describing the first violated invariant.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        selection_mode: SelectionMode,
        steps: Vec<Step>,
        items: Vec<CatalogItem>,
    ) -> Result<Self, MenuError> {
        let catalog = Catalog::new(items)?;
        let steps = StepSequence::new(steps)?;
        if let Some(step) = steps.iter().find(|s| !catalog.has_category(&s.category)) {
            return Err(MenuError::UnboundCategory {
                ordinal: step.ordinal,
                category: step.category.clone(),
            });
        }
        Ok(Self {
            id: id.into(),
            name: name.into(),
            selection_mode,
            steps,
            catalog,
        })
    }

    /// Load a menu from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or the menu is invalid.
    pub fn from_json(json: &str) -> Result<Self, MenuError> {
        let doc: MenuDocument = serde_json::from_str(json)?;
        Self::new(doc.id, doc.name, doc.selection_mode, doc.steps, doc.items)
    }

    /// Load one of the compiled-in menus.
    ///
    /// # Errors
    ///
    /// Returns an error only if the bundled asset is invalid.
    pub fn builtin(id: MenuId) -> Result<Self, MenuError> {
        Self::from_json(id.source())
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn selection_mode(&self) -> SelectionMode {
        self.selection_mode
    }

    #[must_use]
    pub const fn steps(&self) -> &StepSequence {
        &self.steps
    }

    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_menus_load() {
        for id in MenuId::ALL {
            let menu = Menu::builtin(id).unwrap();
            assert_eq!(menu.id(), id.key());
            assert_eq!(menu.steps().len(), 5);
            assert_eq!(menu.catalog().len(), 9);
        }
    }

    #[test]
    fn builtin_modes_differ() {
        assert_eq!(
            Menu::builtin(MenuId::Classic).unwrap().selection_mode(),
            SelectionMode::Quantified
        );
        assert_eq!(
            Menu::builtin(MenuId::Tacos).unwrap().selection_mode(),
            SelectionMode::PresenceOnly
        );
    }

    #[test]
    fn selection_mode_defaults_to_quantified() {
        let json = r#"{
            "id": "mini",
            "name": "Mini",
            "steps": [{ "ordinal": 1, "title": "Viande", "subtitle": "Choisis ta", "category": "viande" }],
            "items": [{ "id": "1", "name": "Boeuf", "price_cents": 300, "category": "viande" }]
        }"#;
        let menu = Menu::from_json(json).unwrap();
        assert_eq!(menu.selection_mode(), SelectionMode::Quantified);
        assert_eq!(menu.catalog().items()[0].image.key(), "");
    }

    #[test]
    fn step_bound_to_empty_category_is_rejected() {
        let json = r#"{
            "id": "broken",
            "name": "Broken",
            "steps": [{ "ordinal": 1, "title": "Desserts", "subtitle": "Choisis tes", "category": "desserts" }],
            "items": [{ "id": "1", "name": "Boeuf", "price_cents": 300, "category": "viande" }]
        }"#;
        let err = Menu::from_json(json).unwrap_err();
        assert!(matches!(err, MenuError::UnboundCategory { ordinal: 1, .. }));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(
            Menu::from_json("{ not json"),
            Err(MenuError::Parse(_))
        ));
    }

    #[test]
    fn negative_price_fails_to_parse() {
        let json = r#"{
            "id": "neg", "name": "Neg",
            "steps": [{ "ordinal": 1, "title": "A", "subtitle": "B", "category": "c" }],
            "items": [{ "id": "1", "name": "X", "price_cents": -5, "category": "c" }]
        }"#;
        assert!(matches!(Menu::from_json(json), Err(MenuError::Parse(_))));
    }

    #[test]
    fn menu_id_parses_case_insensitively() {
        assert_eq!("Tacos".parse::<MenuId>(), Ok(MenuId::Tacos));
        assert!("sushi".parse::<MenuId>().is_err());
    }
}
