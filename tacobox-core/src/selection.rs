//! Selection store: the items the customer has chosen so far.
//!
//! One store serves both selection policies. [`SelectionMode::Quantified`]
//! accumulates quantities when an item is re-selected, while
//! [`SelectionMode::PresenceOnly`] treats each tap as a membership toggle.
use serde::{Deserialize, Serialize};

/// Which selection policy a store follows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionMode {
    /// Items carry a quantity; re-selecting adds to it.
    #[default]
    Quantified,
    /// Items are either present (one unit) or absent; tapping toggles.
    PresenceOnly,
}

/// A line in the selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionEntry {
    pub item_id: String,
    /// Always at least 1
    pub quantity: u32,
}

/// What a store mutation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "change")]
pub enum SelectionChange {
    Added { quantity: u32 },
    Incremented { quantity: u32 },
    Removed,
    Cleared { removed: usize },
    Unchanged,
}

/// Selection state, ordered by first addition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionStore {
    mode: SelectionMode,
    entries: Vec<SelectionEntry>,
}

impl SelectionStore {
    /// Create a new empty store.
    #[must_use]
    pub const fn new(mode: SelectionMode) -> Self {
        Self {
            mode,
            entries: Vec::new(),
        }
    }

    #[must_use]
    pub const fn mode(&self) -> SelectionMode {
        self.mode
    }

    #[must_use]
    pub fn entries(&self) -> &[SelectionEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SelectionEntry> {
        self.entries.iter()
    }

    /// Find an entry by item ID.
    #[must_use]
    pub fn find_entry(&self, item_id: &str) -> Option<&SelectionEntry> {
        self.entries.iter().find(|entry| entry.item_id == item_id)
    }

    fn find_entry_mut(&mut self, item_id: &str) -> Option<&mut SelectionEntry> {
        self.entries.iter_mut().find(|entry| entry.item_id == item_id)
    }

    #[must_use]
    pub fn contains(&self, item_id: &str) -> bool {
        self.find_entry(item_id).is_some()
    }

    /// Current quantity of an item, 0 when absent.
    #[must_use]
    pub fn quantity_of(&self, item_id: &str) -> u32 {
        self.find_entry(item_id).map_or(0, |entry| entry.quantity)
    }

    /// Add an item.
    ///
    /// In quantified mode an existing entry grows by `quantity`; otherwise a
    /// new entry is appended. In presence-only mode the quantity is ignored
    /// and an already-present item is left as is. A zero quantity is treated
    /// as one.
    pub fn add(&mut self, item_id: &str, quantity: u32) -> SelectionChange {
        let quantity = quantity.max(1);
        match self.mode {
            SelectionMode::Quantified => {
                if let Some(entry) = self.find_entry_mut(item_id) {
                    entry.quantity = entry.quantity.saturating_add(quantity);
                    return SelectionChange::Incremented {
                        quantity: entry.quantity,
                    };
                }
                self.push(item_id, quantity);
                SelectionChange::Added { quantity }
            }
            SelectionMode::PresenceOnly => {
                if self.contains(item_id) {
                    return SelectionChange::Unchanged;
                }
                self.push(item_id, 1);
                SelectionChange::Added { quantity: 1 }
            }
        }
    }

    /// Flip membership of an item. Only meaningful in presence-only mode;
    /// quantified stores report [`SelectionChange::Unchanged`].
    pub fn toggle(&mut self, item_id: &str) -> SelectionChange {
        if self.mode != SelectionMode::PresenceOnly {
            return SelectionChange::Unchanged;
        }
        if self.contains(item_id) {
            self.remove_entry(item_id)
        } else {
            self.push(item_id, 1);
            SelectionChange::Added { quantity: 1 }
        }
    }

    /// Remove an item entirely.
    pub fn remove_entry(&mut self, item_id: &str) -> SelectionChange {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.item_id != item_id);
        if self.entries.len() == before {
            SelectionChange::Unchanged
        } else {
            SelectionChange::Removed
        }
    }

    /// Clear the entire selection.
    pub fn clear_all(&mut self) -> SelectionChange {
        let removed = self.entries.len();
        self.entries.clear();
        if removed == 0 {
            SelectionChange::Unchanged
        } else {
            SelectionChange::Cleared { removed }
        }
    }

    /// Same mode and the same ids with the same quantities, ignoring order.
    /// Re-adding an id in presence-only mode moves it to the end.
    #[must_use]
    pub fn same_contents(&self, other: &Self) -> bool {
        self.mode == other.mode
            && self.len() == other.len()
            && self
                .entries
                .iter()
                .all(|entry| other.quantity_of(&entry.item_id) == entry.quantity)
    }

    /// Sum of quantities across all entries.
    #[must_use]
    pub fn total_units(&self) -> u64 {
        self.entries
            .iter()
            .map(|entry| u64::from(entry.quantity))
            .sum()
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn push(&mut self, item_id: &str, quantity: u32) {
        self.entries.push(SelectionEntry {
            item_id: item_id.to_string(),
            quantity,
        });
    }
}

impl<'a> IntoIterator for &'a SelectionStore {
    type Item = &'a SelectionEntry;
    type IntoIter = std::slice::Iter<'a, SelectionEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
