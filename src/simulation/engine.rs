// src/simulation/engine.rs

use crate::error::{SimError, SimResult};
use crate::model::agent::{Barista, ConsumerStats, Customer, ProducerStats};
use crate::model::item::Item;
use crate::model::ledger::SaleRecord;
use crate::simulation::config::SimulationConfig;
use crate::simulation::observer::Observer;
use crate::simulation::state::{Shop, ShutdownHandle};
use crate::strategy::implementations::FifoPolicy;
use crate::strategy::traits::PurchasePolicy;
use log::{debug, error, info};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

// Keeps barista and customer random streams apart under one seed
const CUSTOMER_STREAM: u64 = 1 << 32;

#[derive(Debug, Clone)]
pub struct SimulationReport {
    pub total_revenue: u64,
    pub sales: Vec<SaleRecord>,
    /// Items still on the counter at closing; never sold, never credited.
    pub unsold: Vec<Item>,
    pub producers: Vec<ProducerStats>,
    pub consumers: Vec<ConsumerStats>,
    pub observer_reports: usize,
    pub elapsed: Duration,
    /// True when the run ended through a shutdown request instead of the deadline.
    pub stopped_early: bool,
}

/// Every actor thread of one run, by name.
struct Crew {
    baristas: Vec<(String, JoinHandle<ProducerStats>)>,
    customers: Vec<(String, JoinHandle<ConsumerStats>)>,
    observer: Option<(String, JoinHandle<usize>)>,
}

impl Crew {
    fn new() -> Self {
        Self {
            baristas: Vec::new(),
            customers: Vec::new(),
            observer: None,
        }
    }

    /// Joins every thread, even after a failure, so nothing outlives the run.
    fn join(self) -> SimResult<(Vec<ProducerStats>, Vec<ConsumerStats>, usize)> {
        let mut first_error = None;
        let mut record = |name: String| {
            error!("{} panicked", name);
            first_error.get_or_insert(SimError::ActorPanicked { name });
        };

        let mut producers = Vec::with_capacity(self.baristas.len());
        for (name, handle) in self.baristas {
            match handle.join() {
                Ok(stats) => producers.push(stats),
                Err(_) => record(name),
            }
        }

        let mut consumers = Vec::with_capacity(self.customers.len());
        for (name, handle) in self.customers {
            match handle.join() {
                Ok(stats) => consumers.push(stats),
                Err(_) => record(name),
            }
        }

        let mut reports = 0;
        if let Some((name, handle)) = self.observer {
            match handle.join() {
                Ok(count) => reports = count,
                Err(_) => record(name),
            }
        }

        match first_error {
            Some(err) => Err(err),
            None => Ok((producers, consumers, reports)),
        }
    }
}

fn spawn_actor<T, F>(name: String, shop: &Arc<Shop>, body: F) -> SimResult<(String, JoinHandle<T>)>
where
    T: Send + 'static,
    F: FnOnce(&Shop) -> T + Send + 'static,
{
    let shop = Arc::clone(shop);
    let handle = thread::Builder::new()
        .name(name.clone())
        .spawn(move || body(&shop))
        .map_err(|source| SimError::Spawn {
            name: name.clone(),
            source,
        })?;
    Ok((name, handle))
}

/// Runs the cafe: starts every actor, waits out the deadline, then closes
/// the shop and collects the results.
pub struct CafeSimulation {
    config: SimulationConfig,
    shop: Arc<Shop>,
    policies: Vec<Box<dyn PurchasePolicy>>,
}

impl CafeSimulation {
    /// `policies` are handed to customers 1, 2, ... in order; customers
    /// beyond the list buy first-in, first-out.
    pub fn new(
        config: SimulationConfig,
        policies: Vec<Box<dyn PurchasePolicy>>,
    ) -> SimResult<Self> {
        config.validate()?;
        if policies.len() > config.consumer_count {
            return Err(SimError::invalid_config(format!(
                "{} purchase policies given for {} customers",
                policies.len(),
                config.consumer_count
            )));
        }

        let shop = Arc::new(Shop::new(config.buffer_capacity)?);
        Ok(Self {
            config,
            shop,
            policies,
        })
    }

    pub fn shutdown_handle(&self) -> ShutdownHandle {
        ShutdownHandle::new(Arc::clone(&self.shop))
    }

    pub fn shop(&self) -> &Arc<Shop> {
        &self.shop
    }

    fn actor_rng(&self, stream: u64) -> StdRng {
        match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(stream)),
            None => StdRng::from_entropy(),
        }
    }

    fn open(&mut self, crew: &mut Crew) -> SimResult<()> {
        for id in 1..=self.config.producer_count {
            let barista = Barista::new(id, &self.config, self.actor_rng(id as u64));
            crew.baristas.push(spawn_actor(
                format!("barista-{}", id),
                &self.shop,
                move |shop| barista.run(shop),
            )?);
        }

        let mut policies = std::mem::take(&mut self.policies).into_iter();
        for id in 1..=self.config.consumer_count {
            let policy = policies
                .next()
                .unwrap_or_else(|| Box::new(FifoPolicy::new()));
            let rng = self.actor_rng(CUSTOMER_STREAM + id as u64);
            let customer = Customer::new(id, &self.config, policy, rng);
            debug!(
                "Customer {} arrives with {:?} patience",
                id,
                customer.patience()
            );
            crew.customers.push(spawn_actor(
                format!("customer-{}", id),
                &self.shop,
                move |shop| customer.run(shop),
            )?);
        }

        let observer = Observer::new(self.config.observer_interval);
        crew.observer = Some(spawn_actor(
            "observer".to_string(),
            &self.shop,
            move |shop| observer.run(shop),
        )?);
        Ok(())
    }

    pub fn run(mut self) -> SimResult<SimulationReport> {
        let started = Instant::now();
        info!(
            "Opening cafe: {} baristas, {} customers, counter holds {}",
            self.config.producer_count, self.config.consumer_count, self.config.buffer_capacity
        );

        let mut crew = Crew::new();
        if let Err(err) = self.open(&mut crew) {
            self.shop.shutdown();
            // Threads already started still have to be collected
            if let Err(join_err) = crew.join() {
                error!("Actor failed while aborting startup: {}", join_err);
            }
            return Err(err);
        }

        // Wakes early if someone requests shutdown through a handle
        let deadline_reached = self.shop.run.sleep(self.config.run_duration);
        if deadline_reached {
            info!("Time's up! Closing the cafe.");
        } else {
            info!("Shutdown requested, closing the cafe early.");
        }
        self.shop.shutdown();

        let (producers, consumers, observer_reports) = crew.join()?;

        let unsold = self.shop.counter.drain_remaining();
        let sales = self.shop.ledger.sales();
        let total_revenue = self.shop.ledger.total();
        debug_assert_eq!(
            total_revenue,
            sales.iter().map(|s| u64::from(s.price)).sum::<u64>()
        );

        info!("Total revenue: ${}", total_revenue);
        Ok(SimulationReport {
            total_revenue,
            sales,
            unsold,
            producers,
            consumers,
            observer_reports,
            elapsed: started.elapsed(),
            stopped_early: !deadline_reached,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::item::Category;
    use crate::simulation::config::DurationRange;
    use crate::strategy::implementations::PreferredItemPolicy;

    fn quick_config() -> SimulationConfig {
        SimulationConfig {
            producer_count: 2,
            consumer_count: 3,
            buffer_capacity: 4,
            run_duration: Duration::from_millis(400),
            producer_interval: DurationRange::from_millis(5, 20),
            consumer_interval: DurationRange::from_millis(5, 20),
            consumer_patience: DurationRange::from_millis(50, 100),
            producer_wait: Duration::from_millis(50),
            observer_interval: Duration::from_millis(100),
            seed: Some(9),
        }
    }

    #[test]
    fn rejects_more_policies_than_customers() {
        let config = SimulationConfig {
            consumer_count: 1,
            ..quick_config()
        };
        let policies: Vec<Box<dyn PurchasePolicy>> =
            vec![Box::new(FifoPolicy::new()), Box::new(FifoPolicy::new())];
        assert!(matches!(
            CafeSimulation::new(config, policies),
            Err(SimError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn short_run_balances_the_books() {
        let policies: Vec<Box<dyn PurchasePolicy>> = vec![Box::new(
            PreferredItemPolicy::category(Category::Beverage),
        )];
        let sim = CafeSimulation::new(quick_config(), policies).unwrap();
        let report = sim.run().unwrap();

        let sold: u64 = report.sales.iter().map(|s| u64::from(s.price)).sum();
        assert_eq!(report.total_revenue, sold);
        assert_eq!(report.producers.len(), 2);
        assert_eq!(report.consumers.len(), 3);
        assert!(!report.stopped_early);

        let produced: u64 = report.producers.iter().map(|p| p.produced).sum();
        assert_eq!(produced, report.sales.len() as u64 + report.unsold.len() as u64);

        let spent: u64 = report.consumers.iter().map(|c| c.spent).sum();
        assert_eq!(spent, report.total_revenue);

        // The picky customer only ever bought coffee
        assert!(report
            .sales
            .iter()
            .filter(|s| s.customer == 1)
            .all(|s| s.category == Category::Beverage));
    }

    #[test]
    fn zero_producer_wait_is_refused() {
        let config = SimulationConfig {
            producer_wait: Duration::ZERO,
            ..quick_config()
        };
        assert!(matches!(
            CafeSimulation::new(config, Vec::new()),
            Err(SimError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn barista_blocks_on_a_full_counter() {
        // One slot, a customer that almost never comes back: the barista
        // spends the run waiting for room, one bounded wait at a time
        let config = SimulationConfig {
            producer_count: 1,
            consumer_count: 1,
            buffer_capacity: 1,
            run_duration: Duration::from_millis(300),
            producer_interval: DurationRange::from_millis(1, 2),
            consumer_interval: DurationRange::fixed(Duration::from_secs(10)),
            consumer_patience: DurationRange::fixed(Duration::from_millis(10)),
            producer_wait: Duration::from_millis(20),
            observer_interval: Duration::from_secs(10),
            seed: Some(4),
        };

        let report = CafeSimulation::new(config, Vec::new())
            .unwrap()
            .run()
            .unwrap();

        let full_waits: u64 = report.producers.iter().map(|p| p.full_waits).sum();
        assert!(full_waits >= 1);
        assert!(full_waits < 100, "barista retried {full_waits} times");
    }

    #[test]
    fn crew_join_reports_a_panicked_actor() {
        let mut crew = Crew::new();
        crew.customers.push((
            "customer-7".to_string(),
            thread::spawn(|| -> ConsumerStats { panic!("dropped the tray") }),
        ));
        crew.baristas
            .push(("barista-1".to_string(), thread::spawn(ProducerStats::default)));

        match crew.join() {
            Err(SimError::ActorPanicked { name }) => assert_eq!(name, "customer-7"),
            other => panic!("expected a panicked actor, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn shutdown_handle_ends_run_early() {
        let config = SimulationConfig {
            run_duration: Duration::from_secs(30),
            ..quick_config()
        };
        let sim = CafeSimulation::new(config, Vec::new()).unwrap();
        let handle = sim.shutdown_handle();

        let stopper = thread::spawn(move || {
            thread::sleep(Duration::from_millis(100));
            handle.request_shutdown()
        });

        let report = sim.run().unwrap();
        assert!(stopper.join().unwrap());
        assert!(report.stopped_early);
        assert!(report.elapsed < Duration::from_secs(10));
    }
}
