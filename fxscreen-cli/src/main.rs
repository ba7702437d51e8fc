//! FXScreen CLI — broker screening commands.
//!
//! Commands:
//! - `screen` — filter the broker dataset by feature keys and export/print
//! - `features` — list every registered feature key
//! - `traits` — print the precomputed trait flags for one broker
//! - `show` — profile one broker: metrics plus every matching feature

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use fxscreen_core::{metrics, supported_feature_keys, Feature};
use fxscreen_runner::{
    export_csv, export_json, load_dataset, run_screen, save_artifacts, ScreenConfig, SortKey,
};

#[derive(Parser)]
#[command(
    name = "fxscreen",
    about = "FXScreen CLI — forex broker feature screening"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Filter the broker dataset by feature keys.
    Screen {
        /// Path to the broker dataset (JSON array).
        #[arg(long, default_value = "data/brokers.json")]
        data: PathBuf,

        /// Path to the generated trait flags document.
        #[arg(long, default_value = "data/brokerFlags.json")]
        flags: PathBuf,

        /// Path to a TOML screen config.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Feature key to require (repeatable). Ignored with --config.
        #[arg(long = "feature")]
        features: Vec<String>,

        /// Restrict to brokers available in this country.
        #[arg(long)]
        country: Option<String>,

        /// Sort order: score, min-deposit, spread, leverage.
        #[arg(long, default_value = "score")]
        sort: String,

        /// Keep at most this many brokers.
        #[arg(long)]
        limit: Option<usize>,

        /// Output directory for JSON/CSV artifacts. Prints to stdout
        /// when omitted.
        #[arg(long)]
        out: Option<PathBuf>,

        /// Print CSV instead of a table when writing to stdout.
        #[arg(long, default_value_t = false)]
        csv: bool,

        /// Print pretty JSON instead of a table when writing to stdout.
        #[arg(long, default_value_t = false, conflicts_with = "csv")]
        json: bool,
    },
    /// List every registered feature key.
    Features,
    /// Print the precomputed trait flags for one broker.
    Traits {
        broker_id: String,

        #[arg(long, default_value = "data/brokers.json")]
        data: PathBuf,

        #[arg(long, default_value = "data/brokerFlags.json")]
        flags: PathBuf,
    },
    /// Profile one broker: metrics and every matching feature key.
    Show {
        broker_id: String,

        #[arg(long, default_value = "data/brokers.json")]
        data: PathBuf,

        #[arg(long, default_value = "data/brokerFlags.json")]
        flags: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Screen {
            data,
            flags,
            config,
            features,
            country,
            sort,
            limit,
            out,
            csv,
            json,
        } => cmd_screen(data, flags, config, features, country, &sort, limit, out, csv, json),
        Commands::Features => cmd_features(),
        Commands::Traits {
            broker_id,
            data,
            flags,
        } => cmd_traits(&broker_id, data, flags),
        Commands::Show {
            broker_id,
            data,
            flags,
        } => cmd_show(&broker_id, data, flags),
    }
}

fn parse_sort(raw: &str) -> Result<SortKey> {
    match raw {
        "score" => Ok(SortKey::Score),
        "min-deposit" => Ok(SortKey::MinDeposit),
        "spread" => Ok(SortKey::Spread),
        "leverage" => Ok(SortKey::Leverage),
        other => bail!("unknown sort key: {other} (expected score, min-deposit, spread, leverage)"),
    }
}

#[allow(clippy::too_many_arguments)]
fn cmd_screen(
    data: PathBuf,
    flags: PathBuf,
    config_path: Option<PathBuf>,
    features: Vec<String>,
    country: Option<String>,
    sort: &str,
    limit: Option<usize>,
    out: Option<PathBuf>,
    csv: bool,
    json: bool,
) -> Result<()> {
    let config = match config_path {
        Some(path) => ScreenConfig::load(&path)
            .with_context(|| format!("failed to load screen config {}", path.display()))?,
        None => ScreenConfig {
            features,
            country,
            sort: parse_sort(sort)?,
            limit,
        },
    };

    // Reject typos eagerly: a screen over an unknown key can only ever
    // be empty, which a CLI user would rather hear about up front.
    for key in &config.features {
        Feature::from_key(key)
            .context("run `fxscreen features` to list the registered keys")?;
    }

    let dataset = load_dataset(&data, &flags)?;
    let result = run_screen(&dataset.store, &dataset.resolver, &config);

    match out {
        Some(dir) => {
            let (json_path, csv_path) = save_artifacts(&result, &dir)?;
            println!("wrote {}", json_path.display());
            println!("wrote {}", csv_path.display());
        }
        None if csv => print!("{}", export_csv(&result)?),
        None if json => println!("{}", export_json(&result)?),
        None => print_table(&result),
    }
    Ok(())
}

fn print_table(result: &fxscreen_runner::ScreenResult) {
    println!(
        "{} of {} brokers matched (screen {})",
        result.matched.len(),
        result.total_screened,
        &result.screen_id[..12.min(result.screen_id.len())]
    );
    if result.matched.is_empty() {
        return;
    }
    println!(
        "{:<20} {:<28} {:>6} {:>12} {:>8} {:>9}",
        "id", "name", "score", "min deposit", "spread", "leverage"
    );
    for entry in &result.matched {
        let deposit = entry
            .min_deposit
            .map(|d| format!("{d:.0}"))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<20} {:<28} {:>6.1} {:>12} {:>8.2} {:>9}",
            entry.id, entry.name, entry.score, deposit, entry.eurusd_spread, entry.max_leverage
        );
    }
}

fn cmd_features() -> Result<()> {
    for key in supported_feature_keys() {
        println!("{key}");
    }
    Ok(())
}

fn cmd_traits(broker_id: &str, data: PathBuf, flags: PathBuf) -> Result<()> {
    let dataset = load_dataset(&data, &flags)?;
    if dataset.store.get(broker_id).is_none() {
        bail!("unknown broker id: {broker_id}");
    }
    match dataset.resolver.traits_for(broker_id) {
        Some(traits) => {
            let mut names: Vec<&String> = traits.keys().collect();
            names.sort();
            for name in names {
                println!("{name} = {}", traits[name]);
            }
        }
        None => println!("no precomputed traits for {broker_id}"),
    }
    Ok(())
}

fn cmd_show(broker_id: &str, data: PathBuf, flags: PathBuf) -> Result<()> {
    let dataset = load_dataset(&data, &flags)?;
    let Some(broker) = dataset.store.get(broker_id) else {
        bail!("unknown broker id: {broker_id}");
    };

    println!("{} ({})", broker.name, broker.id);
    if let Some(headquarters) = &broker.headquarters {
        println!("headquarters: {headquarters}");
    }
    println!("score:        {:.1}", metrics::overall_score(broker));
    let deposit = metrics::min_deposit(broker);
    if deposit.is_finite() {
        println!("min deposit:  {deposit:.0}");
    }
    println!("leverage:     {}", metrics::leverage_value(broker));
    println!("eurusd:       {:.2}", metrics::eurusd_spread(broker));

    let matched: Vec<&str> = supported_feature_keys()
        .into_iter()
        .filter(|key| dataset.resolver.has_feature(broker, key))
        .collect();
    println!("features:     {}", matched.join(", "));
    Ok(())
}
