// src/model/item.rs

use serde::Serialize;
use std::fmt;

/// What part of the menu an item belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Category {
    Beverage,
    BakedGood,
    PreparedFood,
}

impl Category {
    pub const ALL: [Category; 3] = [
        Category::Beverage,
        Category::BakedGood,
        Category::PreparedFood,
    ];
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Category::Beverage => "beverage",
            Category::BakedGood => "baked good",
            Category::PreparedFood => "prepared food",
        };
        f.write_str(label)
    }
}

/// A single prepared item sitting on (or sold from) the counter.
///
/// Items are immutable once made; the barista hands ownership to the
/// counter, and the counter hands it to whichever customer buys it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Item {
    pub category: Category,
    pub name: String,
    pub price: u32,
}

impl Item {
    pub fn new(category: Category, name: impl Into<String>, price: u32) -> Self {
        Self {
            category,
            name: name.into(),
            price,
        }
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (${})", self.name, self.price)
    }
}
