//! Cafe counter simulation.
//!
//! Baristas put freshly made items on a bounded counter, customers take
//! them off (waiting only as long as their patience allows), and every
//! purchase is credited to a shared ledger. A controller runs the whole
//! thing against a deadline and shuts every actor down cleanly.

pub mod error;
pub mod io;
pub mod model;
pub mod simulation;
pub mod strategy;

pub use crate::error::{SimError, SimResult};
pub use crate::model::buffer::{BoundedBuffer, InsertOutcome, RemoveOutcome, Snapshot};
pub use crate::model::item::{Category, Item};
pub use crate::model::ledger::{Ledger, SaleRecord};
pub use crate::simulation::config::{DurationRange, SimulationConfig};
pub use crate::simulation::engine::{CafeSimulation, SimulationReport};
pub use crate::simulation::state::{Shop, ShutdownHandle};
pub use crate::strategy::implementations::{FifoPolicy, Preference, PreferredItemPolicy};
pub use crate::strategy::traits::PurchasePolicy;
