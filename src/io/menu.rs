// src/io/menu.rs

use crate::model::item::{Category, Item};
use rand::Rng;
use rand_distr::{Distribution, Uniform};

/// Coffee comes in three sizes, priced by size.
pub const COFFEE_SIZES: [(&str, u32); 3] = [("Small", 3), ("Medium", 5), ("Large", 7)];

pub const CAKES: [&str; 6] = [
    "Cheesecake",
    "Carrot Cake",
    "Red Velvet",
    "Sponge",
    "Plain",
    "Corn Bread",
];
pub const SLICE_PRICES: [u32; 3] = [3, 4, 5];
pub const WHOLE_CAKE_PRICE: u32 = 15;

pub const SANDWICHES: [&str; 7] = [
    "BLT",
    "Caesar Salad",
    "Chicken",
    "Ham & Cheese",
    "Grilled Cheese",
    "Egg Bacon & Cheese",
    "Bagel",
];
pub const SANDWICH_PRICE: u32 = 8;
pub const TOPPING_PRICE: u32 = 1;
pub const MAX_TOPPINGS: u32 = 3;

/// Base variant names for one category (sizes for coffee, cakes, sandwiches).
pub fn variants(category: Category) -> Vec<&'static str> {
    match category {
        Category::Beverage => COFFEE_SIZES.iter().map(|(size, _)| *size).collect(),
        Category::BakedGood => CAKES.to_vec(),
        Category::PreparedFood => SANDWICHES.to_vec(),
    }
}

/// Makes one random menu item.
///
/// Pure apart from `rng`: the same seeded generator yields the same
/// sequence of items.
pub fn generate_item<R: Rng + ?Sized>(rng: &mut R) -> Item {
    let category = Category::ALL[rng.gen_range(0..Category::ALL.len())];
    match category {
        Category::Beverage => {
            let (size, price) = COFFEE_SIZES[rng.gen_range(0..COFFEE_SIZES.len())];
            Item::new(category, format!("{} Coffee", size), price)
        }
        Category::BakedGood => {
            let cake = CAKES[rng.gen_range(0..CAKES.len())];
            // One cake in five leaves whole
            if rng.gen_ratio(1, 5) {
                Item::new(category, format!("Whole {}", cake), WHOLE_CAKE_PRICE)
            } else {
                let price = SLICE_PRICES[rng.gen_range(0..SLICE_PRICES.len())];
                Item::new(category, format!("{} Slice", cake), price)
            }
        }
        Category::PreparedFood => {
            let sandwich = SANDWICHES[rng.gen_range(0..SANDWICHES.len())];
            let toppings = Uniform::new_inclusive(0, MAX_TOPPINGS).sample(rng);
            let name = if toppings > 0 {
                format!("{} +{} toppings", sandwich, toppings)
            } else {
                sandwich.to_string()
            };
            Item::new(category, name, SANDWICH_PRICE + toppings * TOPPING_PRICE)
        }
    }
}
