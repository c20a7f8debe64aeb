//! Tacobox Order Engine
//!
//! Platform-agnostic core logic for the Tacobox "build your order" flow.
//! This crate provides the catalog, step navigation, selection bookkeeping and
//! pricing without UI or platform-specific dependencies.

pub mod catalog;
pub mod error;
pub mod menu;
pub mod numbers;
pub mod order;
pub mod pending;
pub mod price;
pub mod selection;
pub mod steps;
pub mod summary;
pub mod view;

// Re-export commonly used types
pub use catalog::{AssetRef, Catalog, CatalogItem};
pub use error::MenuError;
pub use menu::{Menu, MenuId};
pub use order::{
    Effect, IgnoreReason, OrderAction, OrderBuilder, OrderState, Outcome, Transition, reduce,
};
pub use pending::PendingDetail;
pub use price::{format_addon, format_price};
pub use selection::{SelectionChange, SelectionEntry, SelectionMode, SelectionStore};
pub use steps::{Step, StepCursor, StepSequence, StepStatus};
pub use summary::{OrderSummary, SummaryLine, compute_total};
pub use view::{ItemCard, OrderView, PendingView, StepView};
