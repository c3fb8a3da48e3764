// src/strategy/traits.rs

use crate::model::item::Item;
use std::fmt::Debug;

/// Decides which item on the counter a customer is willing to buy.
///
/// The counter scans its stock head first and hands over the first item
/// the policy accepts; everything else stays where it was.
///
/// We require `Send` because each policy moves into its customer's thread.
pub trait PurchasePolicy: Debug + Send {
    /// Whether the customer would buy `item`.
    fn accepts(&self, item: &Item) -> bool;

    /// Short description used in the "couldn't find" log line.
    fn describe(&self) -> String;
}
