//! Order-builder state machine.
//!
//! All user intent flows through [`reduce`], a pure function from the current
//! [`OrderState`] and an [`OrderAction`] to a [`Transition`]. Invalid intents
//! never fail: they come back as [`Transition::Noop`] with a reason.
use serde::{Deserialize, Serialize};

use crate::catalog::CatalogItem;
use crate::menu::Menu;
use crate::pending::PendingDetail;
use crate::selection::{SelectionChange, SelectionMode, SelectionStore};
use crate::steps::{Step, StepCursor};
use crate::summary::compute_total;
use crate::view::OrderView;

/// A discrete user interaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum OrderAction {
    TapItem { item_id: String },
    AdjustQuantity { delta: i32 },
    Confirm,
    Cancel,
    RemoveEntry { item_id: String },
    ClearAll,
    GoToStep { index: usize },
    Next,
    Previous,
}

/// Explicit widget state. Created empty per session, mutated only via [`reduce`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderState {
    pub cursor: StepCursor,
    pub selection: SelectionStore,
    pub pending: Option<PendingDetail>,
}

impl OrderState {
    #[must_use]
    pub const fn new(mode: SelectionMode) -> Self {
        Self {
            cursor: StepCursor::new(),
            selection: SelectionStore::new(mode),
            pending: None,
        }
    }

    #[must_use]
    pub const fn for_menu(menu: &Menu) -> Self {
        Self::new(menu.selection_mode())
    }
}

/// What an applied action changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum Effect {
    DetailOpened { item_id: String },
    QuantityAdjusted { item_id: String, quantity: u32 },
    Confirmed { item_id: String, change: SelectionChange },
    Cancelled { item_id: String },
    Toggled { item_id: String, change: SelectionChange },
    Removed { item_id: String },
    Cleared { removed: usize },
    Navigated { from: usize, to: usize },
}

/// Why an action left the state untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum IgnoreReason {
    UnknownItem { item_id: String },
    NoPendingDetail,
    NotSelected { item_id: String },
    AlreadyEmpty,
    StepOutOfRange { requested: usize, step_count: usize },
    AtFirstStep,
    AtLastStep,
}

/// Result of reducing one action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    Update { state: OrderState, effect: Effect },
    Noop { reason: IgnoreReason },
}

/// Outcome of a dispatched action once its transition is applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Applied(Effect),
    Ignored(IgnoreReason),
}

impl Outcome {
    #[must_use]
    pub const fn is_applied(&self) -> bool {
        matches!(self, Self::Applied(_))
    }
}

impl Transition {
    /// Commit the transition into `state`.
    pub fn apply(self, state: &mut OrderState) -> Outcome {
        match self {
            Self::Update {
                state: next,
                effect,
            } => {
                *state = next;
                Outcome::Applied(effect)
            }
            Self::Noop { reason } => Outcome::Ignored(reason),
        }
    }
}

/// Reduce an action against the current state without mutating it.
#[must_use]
pub fn reduce(menu: &Menu, state: &OrderState, action: &OrderAction) -> Transition {
    match action {
        OrderAction::TapItem { item_id } => tap_item(menu, state, item_id),
        OrderAction::AdjustQuantity { delta } => adjust_quantity(state, *delta),
        OrderAction::Confirm => confirm(state),
        OrderAction::Cancel => cancel(state),
        OrderAction::RemoveEntry { item_id } => remove_entry(state, item_id),
        OrderAction::ClearAll => clear_all(state),
        OrderAction::GoToStep { index } => go_to_step(menu, state, *index),
        OrderAction::Next => step_forward(menu, state),
        OrderAction::Previous => step_back(state),
    }
}

fn tap_item(menu: &Menu, state: &OrderState, item_id: &str) -> Transition {
    if !menu.catalog().contains(item_id) {
        return Transition::Noop {
            reason: IgnoreReason::UnknownItem {
                item_id: item_id.to_string(),
            },
        };
    }
    let mut new_state = state.clone();
    let effect = match new_state.selection.mode() {
        SelectionMode::Quantified => {
            new_state.pending = Some(PendingDetail::open(item_id));
            Effect::DetailOpened {
                item_id: item_id.to_string(),
            }
        }
        SelectionMode::PresenceOnly => Effect::Toggled {
            item_id: item_id.to_string(),
            change: new_state.selection.toggle(item_id),
        },
    };
    Transition::Update {
        state: new_state,
        effect,
    }
}

fn adjust_quantity(state: &OrderState, delta: i32) -> Transition {
    let Some(pending) = state.pending.as_ref() else {
        return Transition::Noop {
            reason: IgnoreReason::NoPendingDetail,
        };
    };
    let mut detail = pending.clone();
    let quantity = detail.adjust(delta);
    let item_id = detail.item_id().to_string();
    let mut new_state = state.clone();
    new_state.pending = Some(detail);
    Transition::Update {
        state: new_state,
        effect: Effect::QuantityAdjusted { item_id, quantity },
    }
}

fn confirm(state: &OrderState) -> Transition {
    let mut new_state = state.clone();
    let Some(detail) = new_state.pending.take() else {
        return Transition::Noop {
            reason: IgnoreReason::NoPendingDetail,
        };
    };
    let change = new_state.selection.add(detail.item_id(), detail.quantity());
    Transition::Update {
        state: new_state,
        effect: Effect::Confirmed {
            item_id: detail.item_id().to_string(),
            change,
        },
    }
}

fn cancel(state: &OrderState) -> Transition {
    let mut new_state = state.clone();
    let Some(detail) = new_state.pending.take() else {
        return Transition::Noop {
            reason: IgnoreReason::NoPendingDetail,
        };
    };
    Transition::Update {
        state: new_state,
        effect: Effect::Cancelled {
            item_id: detail.item_id().to_string(),
        },
    }
}

fn remove_entry(state: &OrderState, item_id: &str) -> Transition {
    let mut new_state = state.clone();
    match new_state.selection.remove_entry(item_id) {
        SelectionChange::Removed => Transition::Update {
            state: new_state,
            effect: Effect::Removed {
                item_id: item_id.to_string(),
            },
        },
        _ => Transition::Noop {
            reason: IgnoreReason::NotSelected {
                item_id: item_id.to_string(),
            },
        },
    }
}

fn clear_all(state: &OrderState) -> Transition {
    let mut new_state = state.clone();
    match new_state.selection.clear_all() {
        SelectionChange::Cleared { removed } => Transition::Update {
            state: new_state,
            effect: Effect::Cleared { removed },
        },
        _ => Transition::Noop {
            reason: IgnoreReason::AlreadyEmpty,
        },
    }
}

fn navigated(state: &OrderState, cursor: StepCursor) -> Transition {
    let from = state.cursor.index();
    let mut new_state = state.clone();
    new_state.cursor = cursor;
    Transition::Update {
        state: new_state,
        effect: Effect::Navigated {
            from,
            to: cursor.index(),
        },
    }
}

fn go_to_step(menu: &Menu, state: &OrderState, index: usize) -> Transition {
    let mut cursor = state.cursor;
    if !cursor.go_to(menu.steps(), index) {
        return Transition::Noop {
            reason: IgnoreReason::StepOutOfRange {
                requested: index,
                step_count: menu.steps().len(),
            },
        };
    }
    navigated(state, cursor)
}

fn step_forward(menu: &Menu, state: &OrderState) -> Transition {
    let mut cursor = state.cursor;
    if !cursor.next(menu.steps()) {
        return Transition::Noop {
            reason: IgnoreReason::AtLastStep,
        };
    }
    navigated(state, cursor)
}

fn step_back(state: &OrderState) -> Transition {
    let mut cursor = state.cursor;
    if !cursor.previous() {
        return Transition::Noop {
            reason: IgnoreReason::AtFirstStep,
        };
    }
    navigated(state, cursor)
}

/// Stateful wrapper pairing a menu with one session's [`OrderState`].
#[derive(Debug, Clone)]
pub struct OrderBuilder<'m> {
    menu: &'m Menu,
    state: OrderState,
}

impl<'m> OrderBuilder<'m> {
    #[must_use]
    pub const fn new(menu: &'m Menu) -> Self {
        Self {
            menu,
            state: OrderState::for_menu(menu),
        }
    }

    #[must_use]
    pub const fn menu(&self) -> &'m Menu {
        self.menu
    }

    #[must_use]
    pub const fn state(&self) -> &OrderState {
        &self.state
    }

    /// Reduce and apply one action.
    pub fn dispatch(&mut self, action: OrderAction) -> Outcome {
        let outcome = reduce(self.menu, &self.state, &action).apply(&mut self.state);
        match &outcome {
            Outcome::Applied(effect) => log::debug!("{action:?} -> {effect:?}"),
            Outcome::Ignored(reason) => log::debug!("{action:?} ignored: {reason:?}"),
        }
        outcome
    }

    pub fn begin_selection(&mut self, item_id: &str) -> Outcome {
        self.dispatch(OrderAction::TapItem {
            item_id: item_id.to_string(),
        })
    }

    pub fn toggle(&mut self, item_id: &str) -> Outcome {
        self.begin_selection(item_id)
    }

    pub fn adjust_pending_quantity(&mut self, delta: i32) -> Outcome {
        self.dispatch(OrderAction::AdjustQuantity { delta })
    }

    pub fn confirm_selection(&mut self) -> Outcome {
        self.dispatch(OrderAction::Confirm)
    }

    pub fn cancel_selection(&mut self) -> Outcome {
        self.dispatch(OrderAction::Cancel)
    }

    pub fn remove_entry(&mut self, item_id: &str) -> Outcome {
        self.dispatch(OrderAction::RemoveEntry {
            item_id: item_id.to_string(),
        })
    }

    pub fn clear_all(&mut self) -> Outcome {
        self.dispatch(OrderAction::ClearAll)
    }

    pub fn go_to_step(&mut self, index: usize) -> Outcome {
        self.dispatch(OrderAction::GoToStep { index })
    }

    pub fn next(&mut self) -> Outcome {
        self.dispatch(OrderAction::Next)
    }

    pub fn previous(&mut self) -> Outcome {
        self.dispatch(OrderAction::Previous)
    }

    /// Open the prompt for an item, set its quantity and confirm it.
    pub fn select_quantity(&mut self, item_id: &str, quantity: u32) -> Outcome {
        let opened = self.begin_selection(item_id);
        if !opened.is_applied() || self.state.pending.is_none() {
            return opened;
        }
        let delta = i32::try_from(quantity.saturating_sub(1)).unwrap_or(i32::MAX);
        self.adjust_pending_quantity(delta);
        self.confirm_selection()
    }

    #[must_use]
    pub fn current_step(&self) -> &'m Step {
        self.state.cursor.current_step(self.menu.steps())
    }

    #[must_use]
    pub fn current_category(&self) -> &'m str {
        self.state.cursor.current_category(self.menu.steps())
    }

    #[must_use]
    pub fn visible_items(&self) -> Vec<&'m CatalogItem> {
        self.menu
            .catalog()
            .items_for_category(self.current_category())
            .collect()
    }

    #[must_use]
    pub fn compute_total(&self) -> u64 {
        compute_total(&self.state.selection, self.menu.catalog())
    }

    #[must_use]
    pub fn view(&self) -> OrderView {
        OrderView::build(self.menu, &self.state)
    }
}
