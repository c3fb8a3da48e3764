// src/io/reporting.rs

use crate::error::SimResult;
use crate::model::buffer::Snapshot;
use crate::model::item::Item;
use crate::model::ledger::SaleRecord;
use crate::simulation::engine::SimulationReport;
use std::fmt::Write as _;
use std::io::Write;

/// Renders what is on the counter right now, oldest item first.
pub fn render_counter_state(snapshot: &Snapshot<Item>, revenue: u64) -> String {
    let mut out = String::from("\n=== Counter State ===\n");
    if snapshot.items.is_empty() {
        out.push_str("(counter is empty)\n");
    }
    for (i, item) in snapshot.items.iter().enumerate() {
        let _ = writeln!(out, "{}. {} (${})", i + 1, item.name, item.price);
    }
    let _ = writeln!(out, "{}/{} on counter", snapshot.count, snapshot.capacity);
    let _ = writeln!(out, "Revenue so far: ${}", revenue);
    out.push_str("=====================");
    out
}

/// Human-readable end-of-run summary.
pub fn render_summary(report: &SimulationReport) -> String {
    let mut out = String::from("=== Cafe Closed ===\n");
    let _ = writeln!(out, "Ran for {:.1}s", report.elapsed.as_secs_f64());
    let _ = writeln!(out, "Items sold: {}", report.sales.len());
    let _ = writeln!(out, "Left unsold on counter: {}", report.unsold.len());

    for producer in &report.producers {
        let _ = writeln!(
            out,
            "Barista {}: prepared {} (counter full {} times)",
            producer.id, producer.produced, producer.full_waits
        );
    }
    for consumer in &report.consumers {
        let _ = writeln!(
            out,
            "Customer {}: bought {} for ${}, gave up {}, no match {}",
            consumer.id, consumer.purchases, consumer.spent, consumer.gave_up, consumer.no_match
        );
    }

    let _ = write!(out, "Total revenue: ${}", report.total_revenue);
    out
}

/// Writes the sales history as CSV to any writer (a file, stdout, a buffer).
pub fn write_sales_log<W: Write>(writer: W, sales: &[SaleRecord]) -> SimResult<()> {
    // Create a CSV writer over the caller's sink
    let mut wtr = csv::Writer::from_writer(writer);

    // Serialize and write each record
    for record in sales {
        wtr.serialize(record)?;
    }

    wtr.flush()?;
    Ok(())
}
