//! Output formatting module

use crate::cli::OutputFormat;
use crate::error::Result;
use crate::types::{BatchResults, EstimateEntry};

/// Print a single estimate
pub fn output_estimate(output_format: OutputFormat, entry: &EstimateEntry) -> Result<()> {
    if output_format == OutputFormat::Json {
        let content = serde_json::to_string_pretty(entry)?;
        println!("{}", content);
        return Ok(());
    }

    println!("\nDamage Cost Estimate");
    println!("====================");
    println!("Source:  {}", entry.source);
    if let Some(ref brand) = entry.brand {
        println!("Brand:   {}", brand);
    }
    println!();

    if entry.estimate.details.is_empty() {
        println!("No damage detected.");
    } else {
        println!("{:<30} {:>10} {:>12}", "Part", "Confidence", "Price");
        println!("{}", "-".repeat(54));
        for detail in &entry.estimate.details {
            println!(
                "{:<30} {:>9.1}% {:>12.2}",
                detail.part,
                detail.confidence * 100.0,
                detail.price
            );
        }
        println!("{}", "-".repeat(54));
    }

    println!(
        "{:<30} {:>10} {:>12.2}",
        "Total", "", entry.estimate.total_price
    );

    Ok(())
}

/// Print a batch summary
pub fn output_batch(output_format: OutputFormat, results: &BatchResults) -> Result<()> {
    if output_format == OutputFormat::Json {
        let content = serde_json::to_string_pretty(results)?;
        println!("{}", content);
        return Ok(());
    }

    println!("\nBatch Estimation Summary");
    println!("========================");
    println!("Processed:  {}", results.total_processed);
    println!("Successful: {}", results.successful);
    println!("Failed:     {}", results.failed);

    if !results.entries.is_empty() {
        println!();
        println!("{:<40} {:>12}", "Source", "Total");
        println!("{}", "-".repeat(54));
        for entry in &results.entries {
            println!("{:<40} {:>12.2}", entry.source, entry.estimate.total_price);
        }
        println!("{}", "-".repeat(54));

        let grand_total: f64 = results
            .entries
            .iter()
            .map(|e| e.estimate.total_price)
            .sum();
        println!("{:<40} {:>12.2}", "Grand total", grand_total);
    }

    Ok(())
}
