use cafe_counter::io::{menu, reporting};
use cafe_counter::{
    CafeSimulation, Category, FifoPolicy, PreferredItemPolicy, PurchasePolicy, SimulationConfig,
};
use std::process::ExitCode;

fn main() -> ExitCode {
    // Log to stderr; RUST_LOG overrides the default level
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .format_timestamp(None)
        .init();

    println!("=== Producer-Consumer Cafe ===");

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    // 1. SETUP CONFIGURATION
    let config = SimulationConfig::default();
    println!(
        "{} baristas, {} customers, counter holds {}, open for {}s",
        config.producer_count,
        config.consumer_count,
        config.buffer_capacity,
        config.run_duration.as_secs()
    );

    // 2. DEFINE CUSTOMER POLICIES
    // Customer 1 only wants cake, customer 2 is after one sandwich,
    // everyone else buys whatever is oldest.
    let sandwich = menu::variants(Category::PreparedFood)[0];
    let policies: Vec<Box<dyn PurchasePolicy>> = vec![
        Box::new(PreferredItemPolicy::category(Category::BakedGood)),
        Box::new(PreferredItemPolicy::named(sandwich)),
        Box::new(FifoPolicy::new()),
    ];

    // 3. RUN SIMULATION
    let sim = CafeSimulation::new(config, policies)?;
    let report = sim.run()?;

    // 4. PRINT SUMMARY AND SALES LOG
    println!("\n{}", reporting::render_summary(&report));
    println!("\n=== Sales Log ===");
    reporting::write_sales_log(std::io::stdout().lock(), &report.sales)?;

    Ok(())
}
