// src/strategy/implementations.rs

use crate::model::item::{Category, Item};
use crate::strategy::traits::PurchasePolicy;

// =========================================================================
// 1. FIFO Policy
// =========================================================================

/// Buys whatever has been waiting longest on the counter.
#[derive(Debug, Clone, Default)]
pub struct FifoPolicy;

impl FifoPolicy {
    pub fn new() -> Self {
        Self
    }
}

impl PurchasePolicy for FifoPolicy {
    fn accepts(&self, _item: &Item) -> bool {
        true
    }

    fn describe(&self) -> String {
        "anything".to_string()
    }
}

// =========================================================================
// 2. Preferred Item Policy
// =========================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Preference {
    /// Any item from this part of the menu.
    Category(Category),
    /// Any item whose name contains this text, ignoring case.
    Named(String),
}

/// Only buys items matching a preference, oldest match first.
///
/// When nothing on the counter matches, the customer leaves without
/// touching the stock.
#[derive(Debug, Clone)]
pub struct PreferredItemPolicy {
    preference: Preference,
}

impl PreferredItemPolicy {
    pub fn new(preference: Preference) -> Self {
        Self { preference }
    }

    pub fn category(category: Category) -> Self {
        Self::new(Preference::Category(category))
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self::new(Preference::Named(name.into()))
    }
}

impl PurchasePolicy for PreferredItemPolicy {
    fn accepts(&self, item: &Item) -> bool {
        match &self.preference {
            Preference::Category(category) => item.category == *category,
            Preference::Named(needle) => item
                .name
                .to_lowercase()
                .contains(&needle.to_lowercase()),
        }
    }

    fn describe(&self) -> String {
        match &self.preference {
            Preference::Category(category) => format!("a {}", category),
            Preference::Named(needle) => format!("\"{}\"", needle),
        }
    }
}
