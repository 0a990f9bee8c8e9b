use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::Parser;
use kronos::chart::{parse_chart_json, parse_instant};
use kronos::returns::ReturnSetBuilder;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Report Solar, Jupiter and Saturn returns for a natal chart")]
struct Args {
    #[arg(help = "Path to the chart JSON (array of placements or {\"placements\": [...]})")]
    chart: PathBuf,

    /// Birth date, YYYY-MM-DD or RFC 3339.
    #[arg(long)]
    birth: String,

    /// Reference date, YYYY-MM-DD or RFC 3339. Defaults to today (UTC midnight).
    #[arg(long)]
    reference: Option<String>,

    /// Settings file; defaults to configs/returns.toml when present.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Only print returns inside the activation window.
    #[arg(long)]
    active_only: bool,

    /// Print the next future return per body instead of the nearest one.
    #[arg(long)]
    upcoming: bool,
}

fn today_utc() -> DateTime<Utc> {
    let today = Utc::now().date_naive();
    DateTime::from_naive_utc_and_offset(today.and_time(chrono::NaiveTime::MIN), Utc)
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let settings = match &args.config {
        Some(path) => kronos_config::load_return_settings_from(path)?,
        None => kronos_config::load_return_settings()?,
    };
    let builder = ReturnSetBuilder::from(settings);

    let text = std::fs::read_to_string(&args.chart)
        .with_context(|| format!("Failed to read chart {}", args.chart.display()))?;
    let chart = parse_chart_json(&text)
        .with_context(|| format!("Invalid chart {}", args.chart.display()))?;

    let birth = parse_instant(&args.birth)?;
    let reference = match &args.reference {
        Some(s) => parse_instant(s)?,
        None => today_utc(),
    };
    log::info!(
        "{} placements, birth {}, reference {}",
        chart.len(),
        birth.date_naive(),
        reference.date_naive()
    );

    let output = if args.upcoming {
        kronos::chart::validate_instants(birth, reference)?;
        serde_json::to_string_pretty(&builder.next_returns(&chart, reference, birth))?
    } else {
        let mut records = builder.try_build(&chart, reference, birth)?;
        if args.active_only {
            records.retain(|r| r.is_active);
        }
        serde_json::to_string_pretty(&records)?
    };

    println!("{}", output);
    Ok(())
}
