// src/model/ledger.rs

use crate::model::item::{Category, Item};
use parking_lot::Mutex;
use serde::Serialize;

// We make this Serialize so the sales log can be written as CSV
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SaleRecord {
    pub sequence: u64,
    pub customer: usize,
    pub item: String,
    pub category: Category,
    pub price: u32,
    pub running_total: u64,
}

#[derive(Default)]
struct Books {
    total: u64,
    sales: Vec<SaleRecord>,
}

/// Revenue accumulator shared by every customer.
///
/// All credits go through one mutex, so concurrent purchases are
/// serialized and none can be lost.
#[derive(Default)]
pub struct Ledger {
    books: Mutex<Books>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one completed purchase and returns the new total.
    pub fn credit(&self, customer: usize, item: &Item) -> u64 {
        let mut books = self.books.lock();
        let previous = books.total;
        books.total += u64::from(item.price);
        debug_assert!(books.total >= previous, "ledger total went backwards");

        let record = SaleRecord {
            sequence: books.sales.len() as u64 + 1,
            customer,
            item: item.name.clone(),
            category: item.category,
            price: item.price,
            running_total: books.total,
        };
        books.sales.push(record);
        books.total
    }

    pub fn total(&self) -> u64 {
        self.books.lock().total
    }

    /// Copy of every sale so far, in the order they were credited.
    pub fn sales(&self) -> Vec<SaleRecord> {
        self.books.lock().sales.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn credits_accumulate_in_order() {
        let ledger = Ledger::new();
        let coffee = Item::new(Category::Beverage, "Small Coffee", 3);
        let cake = Item::new(Category::BakedGood, "Whole Sponge", 15);

        assert_eq!(ledger.credit(1, &coffee), 3);
        assert_eq!(ledger.credit(2, &cake), 18);

        let sales = ledger.sales();
        assert_eq!(sales.len(), 2);
        assert_eq!(sales[0].sequence, 1);
        assert_eq!(sales[1].customer, 2);
        assert_eq!(sales[1].running_total, 18);
        assert_eq!(ledger.total(), 18);
    }

    #[test]
    fn concurrent_credits_are_not_lost() {
        let ledger = Arc::new(Ledger::new());
        let handles: Vec<_> = (0..8)
            .map(|customer| {
                let ledger = Arc::clone(&ledger);
                thread::spawn(move || {
                    let item = Item::new(Category::PreparedFood, "BLT", 8);
                    for _ in 0..250 {
                        ledger.credit(customer, &item);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(ledger.total(), 8 * 250 * 8);
        assert_eq!(ledger.sales().len(), 2000);

        let sales = ledger.sales();
        assert!(sales
            .windows(2)
            .all(|pair| pair[0].running_total < pair[1].running_total));
    }
}
