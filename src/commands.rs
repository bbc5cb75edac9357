//! Command handlers

use crate::cli::{Cli, Commands, OutputFormat};
use crate::config::Config;
use crate::domain::estimate_damage_cost;
use crate::error::{Error, Result};
use crate::export::export_to_excel;
use crate::output::{output_batch, output_estimate};
use crate::scanner::{load_predictions, scan_prediction_files, validate_prediction_file};
use crate::store::{PriceStore, VehicleStore};
use crate::types::{BatchResults, EstimateEntry, PriceMapping, VehicleRecord};
use chrono::Utc;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};

/// Execute CLI command
pub fn execute(cli: Cli) -> Result<()> {
    // Load config
    let mut config = Config::load()?;

    // Override from CLI args
    if let Some(ref dir) = cli.data_dir {
        config.data_dir = Some(dir.clone());
    }

    let output_format = cli.format.unwrap_or(config.output_format);

    match &cli.command {
        Commands::Estimate {
            predictions,
            brand,
            registration,
            prices,
            output,
        } => cmd_estimate(
            &cli,
            &config,
            predictions.clone(),
            brand.clone(),
            registration.clone(),
            prices.clone(),
            output.clone(),
            output_format,
        ),

        Commands::Batch {
            folder,
            brand,
            registration,
            prices,
            output,
        } => cmd_batch(
            &cli,
            &config,
            folder.clone(),
            brand.clone(),
            registration.clone(),
            prices.clone(),
            output.clone(),
            output_format,
        ),

        Commands::Export { results, output } => cmd_export(results.clone(), output.clone()),

        Commands::Register {
            registration,
            brand,
            model,
            year,
            owner,
            notes,
        } => cmd_register(
            &config,
            registration.clone(),
            brand.clone(),
            model.clone(),
            *year,
            owner.clone(),
            notes.clone(),
        ),

        Commands::Vehicles { brand } => cmd_vehicles(&config, brand.clone(), output_format),

        Commands::Lookup { registration } => cmd_lookup(&config, registration, output_format),

        Commands::Unregister { registration } => cmd_unregister(&config, registration),

        Commands::SetPrices { brand, file } => cmd_set_prices(&config, brand, file.clone()),

        Commands::Prices { brand } => cmd_prices(&config, brand.clone(), output_format),

        Commands::Brands => cmd_brands(&config),

        Commands::Config {
            show,
            set_data_dir,
            set_output,
            set_brand,
            reset,
        } => cmd_config(
            *show,
            set_data_dir.clone(),
            *set_output,
            set_brand.clone(),
            *reset,
        ),
    }
}

/// Resolve the price mapping for an estimate
///
/// Source order: ad-hoc price file, explicit brand, registered vehicle's
/// brand, configured default brand.
fn resolve_price_mapping(
    cli: &Cli,
    config: &Config,
    brand: Option<String>,
    registration: Option<String>,
    prices_file: Option<PathBuf>,
) -> Result<(PriceMapping, Option<String>)> {
    if let Some(path) = prices_file {
        let mapping = load_price_table(&path)?;
        if cli.verbose {
            eprintln!("Using {} part prices from {}", mapping.len(), path.display());
        }
        return Ok((mapping, None));
    }

    let brand = match (brand, registration) {
        (Some(brand), _) => brand,
        (None, Some(registration)) => {
            let vehicles = VehicleStore::open(config.data_dir()?)?;
            let vehicle = vehicles
                .get_by_registration(&registration)
                .ok_or_else(|| Error::VehicleNotFound(registration.trim().to_string()))?;
            if cli.verbose {
                eprintln!(
                    "Vehicle {} is a {}",
                    vehicle.registration, vehicle.brand
                );
            }
            vehicle.brand.clone()
        }
        (None, None) => config.default_brand.clone().ok_or(Error::NoPriceSource)?,
    };

    let brand = brand.trim().to_string();
    if cli.verbose {
        eprintln!("Fetching prices for brand: {}", brand);
    }

    let prices = PriceStore::open(config.data_dir()?)?;
    let mapping = prices.brand_prices(&brand)?.clone();
    Ok((mapping, Some(brand)))
}

fn cmd_estimate(
    cli: &Cli,
    config: &Config,
    predictions_path: PathBuf,
    brand: Option<String>,
    registration: Option<String>,
    prices_file: Option<PathBuf>,
    output: Option<PathBuf>,
    output_format: OutputFormat,
) -> Result<()> {
    validate_prediction_file(&predictions_path)?;
    let prediction_set = load_predictions(&predictions_path)?;

    if cli.verbose {
        eprintln!(
            "Loaded {} predictions from {}",
            prediction_set.predictions.len(),
            predictions_path.display()
        );
    }

    let (price_mapping, brand) =
        resolve_price_mapping(cli, config, brand, registration, prices_file)?;

    let estimate = estimate_damage_cost(&prediction_set.predictions, &price_mapping);

    let entry = EstimateEntry {
        source: predictions_path.display().to_string(),
        brand,
        estimated_at: Utc::now(),
        estimate,
    };

    if let Some(path) = output {
        let content = serde_json::to_string_pretty(&entry)?;
        std::fs::write(&path, content)?;
        if cli.verbose {
            eprintln!("Saved estimate to {}", path.display());
        }
    }

    output_estimate(output_format, &entry)
}

fn cmd_batch(
    cli: &Cli,
    config: &Config,
    folder: PathBuf,
    brand: Option<String>,
    registration: Option<String>,
    prices_file: Option<PathBuf>,
    output: Option<PathBuf>,
    output_format: OutputFormat,
) -> Result<()> {
    let files = scan_prediction_files(&folder)?;
    if files.is_empty() {
        println!("No prediction files found in {}", folder.display());
        return Ok(());
    }

    let (price_mapping, brand) =
        resolve_price_mapping(cli, config, brand, registration, prices_file)?;

    let started_at = Utc::now();

    // Setup progress bar
    let progress = ProgressBar::new(files.len() as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );

    let mut entries = Vec::new();
    let mut failed = 0;

    for file in &files {
        if cli.verbose {
            let filename = file
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("")
                .to_string();
            progress.set_message(filename);
        }

        match load_predictions(file) {
            Ok(prediction_set) => {
                let estimate = estimate_damage_cost(&prediction_set.predictions, &price_mapping);
                entries.push(EstimateEntry {
                    source: file.display().to_string(),
                    brand: brand.clone(),
                    estimated_at: Utc::now(),
                    estimate,
                });
            }
            Err(e) => {
                failed += 1;
                progress.suspend(|| eprintln!("Skipped {}: {}", file.display(), e));
            }
        }

        progress.inc(1);
    }

    progress.finish_and_clear();

    let results = BatchResults {
        total_processed: files.len(),
        successful: entries.len(),
        failed,
        entries,
        started_at,
        completed_at: Utc::now(),
    };

    if let Some(path) = output {
        let content = serde_json::to_string_pretty(&results)?;
        std::fs::write(&path, content)?;
        if cli.verbose {
            eprintln!("Saved batch results to {}", path.display());
        }
    }

    output_batch(output_format, &results)
}

fn cmd_export(results_path: PathBuf, output: Option<PathBuf>) -> Result<()> {
    let content = std::fs::read_to_string(&results_path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => Error::FileNotFound(results_path.display().to_string()),
        _ => Error::Io(e),
    })?;

    // Accept either batch results or a single saved estimate
    let results = match serde_json::from_str::<BatchResults>(&content) {
        Ok(results) => results,
        Err(_) => {
            let entry: EstimateEntry = serde_json::from_str(&content)?;
            let started_at = entry.estimated_at;
            BatchResults {
                entries: vec![entry],
                total_processed: 1,
                successful: 1,
                failed: 0,
                started_at,
                completed_at: started_at,
            }
        }
    };

    let output_path = output.unwrap_or_else(|| results_path.with_extension("xlsx"));
    export_to_excel(&results, &output_path)?;
    println!("Exported to {}", output_path.display());

    Ok(())
}

fn cmd_register(
    config: &Config,
    registration: String,
    brand: String,
    model: Option<String>,
    year: Option<u32>,
    owner: Option<String>,
    notes: Option<String>,
) -> Result<()> {
    let mut store = VehicleStore::open(config.data_dir()?)?;

    let mut vehicle = VehicleRecord::new(
        registration.trim().to_string(),
        brand.trim().to_string(),
    );
    if let Some(model) = model {
        vehicle = vehicle.with_model(model);
    }
    if let Some(year) = year {
        vehicle = vehicle.with_year(year);
    }
    if let Some(owner) = owner {
        vehicle = vehicle.with_owner(owner);
    }
    if let Some(notes) = notes {
        vehicle = vehicle.with_notes(notes);
    }

    let registration = vehicle.registration.clone();
    let id = store.add_vehicle(vehicle)?;
    println!("Registered vehicle {} ({})", registration, id);

    Ok(())
}

fn cmd_vehicles(config: &Config, brand: Option<String>, output_format: OutputFormat) -> Result<()> {
    let store = VehicleStore::open(config.data_dir()?)?;
    let vehicles = match brand {
        Some(ref brand) => store.vehicles_by_brand(brand),
        None => store.all_vehicles(),
    };

    if output_format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&vehicles)?);
        return Ok(());
    }

    if vehicles.is_empty() {
        println!("No vehicles registered.");
        return Ok(());
    }

    println!("{:<18} {:<12} {:<16} {:<6}", "Registration", "Brand", "Model", "Year");
    println!("{}", "-".repeat(54));
    for vehicle in &vehicles {
        println!(
            "{:<18} {:<12} {:<16} {:<6}",
            vehicle.registration,
            vehicle.brand,
            vehicle.model.as_deref().unwrap_or("-"),
            vehicle
                .year
                .map(|y| y.to_string())
                .unwrap_or_else(|| "-".to_string()),
        );
    }
    println!("\n{} vehicle(s)", vehicles.len());

    Ok(())
}

fn cmd_lookup(config: &Config, registration: &str, output_format: OutputFormat) -> Result<()> {
    let store = VehicleStore::open(config.data_dir()?)?;
    let vehicle = store
        .get_by_registration(registration)
        .ok_or_else(|| Error::VehicleNotFound(registration.trim().to_string()))?;

    if output_format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(vehicle)?);
        return Ok(());
    }

    println!("Registration: {}", vehicle.registration);
    println!("Brand:        {}", vehicle.brand);
    println!("Model:        {}", vehicle.model.as_deref().unwrap_or("-"));
    println!(
        "Year:         {}",
        vehicle
            .year
            .map(|y| y.to_string())
            .unwrap_or_else(|| "-".to_string())
    );
    println!("Owner:        {}", vehicle.owner.as_deref().unwrap_or("-"));
    if let Some(ref notes) = vehicle.notes {
        println!("Notes:        {}", notes);
    }
    println!(
        "Registered:   {}",
        vehicle.registered_at.format("%Y-%m-%d %H:%M UTC")
    );

    Ok(())
}

fn cmd_unregister(config: &Config, registration: &str) -> Result<()> {
    let mut store = VehicleStore::open(config.data_dir()?)?;

    if store.remove_by_registration(registration)? {
        println!("Removed vehicle {}", registration.trim());
        Ok(())
    } else {
        Err(Error::VehicleNotFound(registration.trim().to_string()))
    }
}

fn cmd_set_prices(config: &Config, brand: &str, file: PathBuf) -> Result<()> {
    let mapping = load_price_table(&file)?;
    if mapping.is_empty() {
        return Err(Error::Config(format!(
            "price table {} is empty",
            file.display()
        )));
    }

    let part_count = mapping.len();
    let mut store = PriceStore::open(config.data_dir()?)?;
    store.set_brand_prices(brand, mapping)?;

    println!("Stored {} part prices for brand {}", part_count, brand.trim());

    Ok(())
}

fn cmd_prices(config: &Config, brand: Option<String>, output_format: OutputFormat) -> Result<()> {
    let brand = brand
        .or_else(|| config.default_brand.clone())
        .ok_or(Error::NoPriceSource)?;

    let store = PriceStore::open(config.data_dir()?)?;
    let mapping = store.brand_prices(&brand)?;

    if output_format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(mapping)?);
        return Ok(());
    }

    println!("\nPrice table for {}", brand.trim());
    println!("{}", "-".repeat(44));

    let mut parts: Vec<_> = mapping.iter().collect();
    parts.sort_by(|a, b| a.0.cmp(b.0));
    for (part, price) in parts {
        println!("{:<30} {:>12.2}", part, price);
    }

    Ok(())
}

fn cmd_brands(config: &Config) -> Result<()> {
    let store = PriceStore::open(config.data_dir()?)?;
    let brands = store.brands();

    if brands.is_empty() {
        println!("No price tables stored.");
    } else {
        for brand in brands {
            println!("{}", brand);
        }
    }

    Ok(())
}

fn cmd_config(
    show: bool,
    set_data_dir: Option<PathBuf>,
    set_output: Option<OutputFormat>,
    set_brand: Option<String>,
    reset: bool,
) -> Result<()> {
    if reset {
        let config = Config::default();
        config.save()?;
        println!("Configuration reset to defaults");
        println!("\n{}", config);
        return Ok(());
    }

    let mut config = Config::load()?;
    let mut modified = false;

    if let Some(data_dir) = set_data_dir {
        config.data_dir = Some(data_dir);
        modified = true;
    }

    if let Some(output_format) = set_output {
        config.output_format = output_format;
        modified = true;
    }

    if let Some(brand) = set_brand {
        config.default_brand = Some(brand);
        modified = true;
    }

    if modified {
        config.save()?;
        println!("Configuration updated");
    }

    if show || !modified {
        println!("{}", config);
    }

    Ok(())
}

/// Load a price table from a JSON map or a part,price CSV file
fn load_price_table(path: &Path) -> Result<PriceMapping> {
    if !path.exists() {
        return Err(Error::FileNotFound(path.display().to_string()));
    }

    let is_csv = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("csv"))
        .unwrap_or(false);

    if is_csv {
        load_price_csv(path)
    } else {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

/// Parse a CSV price table
///
/// Expected header: part,price
fn load_price_csv(path: &Path) -> Result<PriceMapping> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)?;

    let headers = reader.headers()?.clone();
    let header_ok = headers.len() >= 2
        && headers[0].eq_ignore_ascii_case("part")
        && headers[1].eq_ignore_ascii_case("price");
    if !header_ok {
        return Err(Error::CsvHeader(path.display().to_string()));
    }

    let mut mapping = PriceMapping::new();
    for (row_idx, result) in reader.records().enumerate() {
        let record = result?;
        let row_num = row_idx + 2; // +2 because row_idx is 0-based and header is row 1

        let part = record.get(0).unwrap_or("").to_string();
        if part.is_empty() {
            return Err(Error::CsvPart(row_num));
        }

        let price_raw = record.get(1).unwrap_or("");
        let price: f64 = price_raw.parse().map_err(|_| Error::CsvPrice {
            row: row_num,
            value: price_raw.to_string(),
        })?;

        mapping.insert(part, price);
    }

    Ok(mapping)
}
