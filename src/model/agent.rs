use crate::io::menu;
use crate::model::buffer::{InsertOutcome, RemoveOutcome};
use crate::model::item::Item;
use crate::simulation::config::{DurationRange, SimulationConfig};
use crate::simulation::state::Shop;
use crate::strategy::traits::PurchasePolicy;
use log::{debug, info};
use rand::rngs::StdRng;
use serde::Serialize;
use std::time::Duration;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProducerStats {
    pub id: usize,
    pub produced: u64,
    /// Times the counter stayed full for a whole wait.
    pub full_waits: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConsumerStats {
    pub id: usize,
    pub purchases: u64,
    pub spent: u64,
    pub gave_up: u64,
    pub no_match: u64,
}

/// What happened on one trip of a customer to the counter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Visit {
    Bought(Item),
    GaveUp,
    NoMatch,
    Closed,
}

// =========================================================================
// Producer
// =========================================================================

/// Makes items and puts them on the counter.
pub struct Barista {
    pub id: usize,
    interval: DurationRange,
    wait: Duration,
    rng: StdRng,
    // An item the counter had no room for, kept for the next try
    pending: Option<Item>,
    stats: ProducerStats,
}

impl Barista {
    pub fn new(id: usize, config: &SimulationConfig, rng: StdRng) -> Self {
        Self {
            id,
            interval: config.producer_interval,
            wait: config.producer_wait,
            rng,
            pending: None,
            stats: ProducerStats {
                id,
                ..ProducerStats::default()
            },
        }
    }

    /// One production attempt: make (or reuse) an item and try to place it.
    pub fn serve(&mut self, shop: &Shop) -> InsertOutcome<()> {
        let item = match self.pending.take() {
            Some(item) => item,
            None => menu::generate_item(&mut self.rng),
        };
        let label = item.to_string();

        match shop.counter.try_insert(item, self.wait) {
            InsertOutcome::Inserted => {
                self.stats.produced += 1;
                info!("Barista {} prepared: {}", self.id, label);
                InsertOutcome::Inserted
            }
            InsertOutcome::TimedOut(item) => {
                self.stats.full_waits += 1;
                debug!("Barista {} is waiting for room for {}", self.id, label);
                self.pending = Some(item);
                InsertOutcome::TimedOut(())
            }
            InsertOutcome::Closed(_) => InsertOutcome::Closed(()),
        }
    }

    pub fn run(mut self, shop: &Shop) -> ProducerStats {
        while shop.is_open() {
            match self.serve(shop) {
                InsertOutcome::Inserted => {
                    let idle = self.interval.sample(&mut self.rng);
                    if !shop.run.sleep(idle) {
                        break;
                    }
                }
                // The wait itself was the backoff
                InsertOutcome::TimedOut(()) => continue,
                InsertOutcome::Closed(()) => break,
            }
        }
        debug!("Barista {} went home", self.id);
        self.stats
    }

    #[cfg(test)]
    pub(crate) fn stats(&self) -> &ProducerStats {
        &self.stats
    }
}

// =========================================================================
// Consumer
// =========================================================================

/// Waits at the counter for something it wants, pays, and comes back later.
pub struct Customer {
    pub id: usize,
    patience: Duration,
    interval: DurationRange,
    policy: Box<dyn PurchasePolicy>,
    rng: StdRng,
    stats: ConsumerStats,
}

impl Customer {
    /// Patience is drawn here, once, and kept for the customer's lifetime.
    pub fn new(
        id: usize,
        config: &SimulationConfig,
        policy: Box<dyn PurchasePolicy>,
        mut rng: StdRng,
    ) -> Self {
        let patience = config.consumer_patience.sample(&mut rng);
        Self {
            id,
            patience,
            interval: config.consumer_interval,
            policy,
            rng,
            stats: ConsumerStats {
                id,
                ..ConsumerStats::default()
            },
        }
    }

    pub fn patience(&self) -> Duration {
        self.patience
    }

    /// One trip to the counter, bounded by this customer's patience.
    pub fn visit(&mut self, shop: &Shop) -> Visit {
        let policy = &self.policy;
        match shop
            .counter
            .try_remove_where(self.patience, |item| policy.accepts(item))
        {
            RemoveOutcome::Taken(item) => {
                let total = shop.ledger.credit(self.id, &item);
                self.stats.purchases += 1;
                self.stats.spent += u64::from(item.price);
                info!(
                    "Customer {} bought: {} for ${}",
                    self.id, item.name, item.price
                );
                debug!("Revenue now ${}", total);
                Visit::Bought(item)
            }
            RemoveOutcome::TimedOut => {
                self.stats.gave_up += 1;
                info!("Customer {} gave up without buying", self.id);
                Visit::GaveUp
            }
            RemoveOutcome::NoMatch => {
                self.stats.no_match += 1;
                info!(
                    "Customer {} couldn't find {} and left",
                    self.id,
                    policy.describe()
                );
                Visit::NoMatch
            }
            RemoveOutcome::Closed => Visit::Closed,
        }
    }

    pub fn run(mut self, shop: &Shop) -> ConsumerStats {
        while shop.is_open() {
            if self.visit(shop) == Visit::Closed {
                break;
            }
            let idle = self.interval.sample(&mut self.rng);
            if !shop.run.sleep(idle) {
                break;
            }
        }
        debug!("Customer {} left the cafe", self.id);
        self.stats
    }

    #[cfg(test)]
    pub(crate) fn stats(&self) -> &ConsumerStats {
        &self.stats
    }
}
