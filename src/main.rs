//! solar-day entry point: configuration, sample loading and the day report.

use std::io::{self, Write};
use std::process;

use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use solar_day::cli::Args;
use solar_day::config::DayConfig;
use solar_day::io::export::{DayReport, export_series_csv, write_json};
use solar_day::io::import::{SampleKind, load_samples};
use solar_day::reporting::write_day_report;
use solar_day::sample::{Sample, available_dates};
use solar_day::scaling::scale_production_to_consumption;
use solar_day::sim::{aggregate, build};
use solar_day::synthetic;

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn load_config(args: &Args) -> Result<DayConfig> {
    let mut config = if let Some(path) = &args.config {
        DayConfig::from_toml_file(path)?
    } else if let Some(name) = &args.preset {
        DayConfig::from_preset(name)?
    } else {
        DayConfig::home_battery()
    };
    args.apply_overrides(&mut config);
    Ok(config)
}

/// Production and consumption samples from CSV or the synthetic generator.
///
/// The date filter is only applied while loading when nothing downstream needs
/// the other days.
fn load_data(config: &DayConfig, all_dates: bool) -> Result<(Vec<Sample>, Vec<Sample>)> {
    match (&config.data.production_csv, &config.data.consumption_csv) {
        (Some(production_path), Some(consumption_path)) => {
            let date = (!all_dates).then_some(config.day.date.as_str());
            let production = load_samples(production_path, SampleKind::Production, date)?;
            let consumption = load_samples(consumption_path, SampleKind::Consumption, date)?;
            Ok((production, consumption))
        }
        _ => {
            let Some(start) = config.date() else {
                bail!("invalid date \"{}\"", config.day.date);
            };
            let data = synthetic::generate(start, config.synthetic.days, &config.synthetic_params());
            info!(
                days = config.synthetic.days,
                homes = config.synthetic.homes,
                seed = config.synthetic.seed,
                "generated synthetic samples"
            );
            Ok((data.production, data.consumption))
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let config = load_config(args)?;

    let errors = config.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }

    let all_dates = args.list_dates || config.scaling.scale_production;
    let (mut production, consumption) = load_data(&config, all_dates)?;

    if args.list_dates {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        for date in available_dates(&production) {
            writeln!(out, "{date}")?;
        }
        return Ok(());
    }

    if config.scaling.scale_production {
        let (scaled, report) = scale_production_to_consumption(&production, &consumption)
            .context("failed to scale production")?;
        debug!(?report, "scale report");
        production = scaled;
    }

    let date = config.day.date.as_str();
    let capacity_kwh = config.battery.capacity_kwh;
    let series = build(&production, &consumption, date, capacity_kwh);
    let stats = aggregate(&series.production, &series.consumption, &series.network);
    info!(date, intervals = series.len(), capacity_kwh, "built day series");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if args.json {
        let report = DayReport {
            date,
            battery_capacity_kwh: capacity_kwh,
            series: &series,
            stats: stats.as_ref(),
        };
        write_json(&report, &mut out).context("failed to write JSON report")?;
        writeln!(out)?;
    } else {
        write_day_report(&mut out, date, capacity_kwh, &series, stats.as_ref())?;
    }

    if let Some(path) = &args.series_out {
        export_series_csv(&series, path)
            .with_context(|| format!("failed to write CSV to {}", path.display()))?;
        info!(path = %path.display(), "series written");
    }

    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);
    run(&args)
}
