// src/simulation/observer.rs

use crate::io::reporting;
use crate::simulation::state::Shop;
use log::info;
use std::time::Duration;

/// Periodically prints what is on the counter and how much has been taken.
/// Read-only: it only holds the counter lock long enough to copy it.
pub struct Observer {
    interval: Duration,
}

impl Observer {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    pub fn report(&self, shop: &Shop) -> String {
        let snapshot = shop.counter.snapshot();
        reporting::render_counter_state(&snapshot, shop.ledger.total())
    }

    /// Returns how many reports were printed.
    pub fn run(self, shop: &Shop) -> usize {
        let mut reports = 0;
        while shop.is_open() {
            if !shop.run.sleep(self.interval) {
                break;
            }
            info!("{}", self.report(shop));
            reports += 1;
        }
        reports
    }
}
