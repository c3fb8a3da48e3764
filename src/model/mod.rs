pub mod agent;
pub mod buffer;
pub mod item;
pub mod ledger;
