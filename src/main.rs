// Only compile UI module when TUI feature is enabled
#[cfg(feature = "tui")]
mod ui;

use anyhow::{Context, Result};
use carbon_calculator::{compute_for_country, logging, AppConfig, EmissionFactorTable, RawInputs, Report};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Personal carbon footprint calculator
#[derive(Parser, Debug)]
#[command(name = "carbon-calculator")]
#[command(version)]
#[command(about = "Estimate yearly CO2 emissions from commute, electricity, diet and waste")]
struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// JSON config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Factor table file (CSV or .json), overrides the config
    #[arg(long, global = true)]
    factors: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Interactive terminal UI (default)
    Tui,
    /// Compute once and print the result
    Calc(CalcArgs),
    /// List countries in the factor table
    Countries,
}

#[derive(clap::Args, Debug)]
struct CalcArgs {
    /// Daily commute distance in km (0-100)
    #[arg(long, default_value_t = 10.0)]
    distance: f64,

    /// Monthly electricity consumption in kWh (0-1000)
    #[arg(long, default_value_t = 100.0)]
    electricity: f64,

    /// Waste generated per week in kg (0-100)
    #[arg(long, default_value_t = 10.0)]
    waste: f64,

    /// Number of meals per day (0-10)
    #[arg(long, default_value_t = 3)]
    meals: u8,

    /// Country (defaults to the configured country)
    #[arg(long)]
    country: Option<String>,

    /// Print JSON instead of text
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config = AppConfig::load_or_default(cli.config.as_deref())?
        .with_overrides(cli.factors, None, None);
    let table = config.factor_table()?;

    match cli.command.unwrap_or(Commands::Tui) {
        Commands::Tui => run_ui_mode(table, &config.default_country)?,
        Commands::Calc(args) => run_calc(&table, &config.default_country, args)?,
        Commands::Countries => run_countries(&table),
    }

    Ok(())
}

fn calc_report(table: &EmissionFactorTable, default_country: &str, args: &CalcArgs) -> Result<Report> {
    let country = args.country.as_deref().unwrap_or(default_country);

    // Flags are the collection layer here: clamp like the sliders would
    let inputs = RawInputs::new(args.distance, args.electricity, args.waste, args.meals).clamped();

    let result = compute_for_country(table, country, &inputs)
        .with_context(|| {
            format!(
                "Cannot compute for '{}' (available: {})",
                country,
                table.countries().join(", ")
            )
        })?;

    Ok(Report::new(country, inputs, result))
}

fn run_calc(table: &EmissionFactorTable, default_country: &str, args: CalcArgs) -> Result<()> {
    let report = calc_report(table, default_country, &args)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report.to_text());
    }

    Ok(())
}

fn run_countries(table: &EmissionFactorTable) {
    println!("🌍 Countries in factor table: {}", table.len());
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    for (country, factors) in table.iter() {
        println!(
            "  {:<20} transport {:>5} kg/km | electricity {:>5} kg/kWh | diet {:>5} kg/meal | waste {:>5} kg/kg",
            country, factors.transportation, factors.electricity, factors.diet, factors.waste
        );
    }
}

#[cfg(feature = "tui")]
fn run_ui_mode(table: EmissionFactorTable, default_country: &str) -> Result<()> {
    println!("🖥️  Loading Carbon Calculator UI...\n");
    println!("Starting UI... (Press 'q' to quit)\n");

    // Create and run app
    let mut app = ui::App::new(table, default_country);
    ui::run_ui(&mut app)?;

    println!("\n✅ UI closed successfully");

    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run_ui_mode(_table: EmissionFactorTable, _default_country: &str) -> Result<()> {
    eprintln!("❌ TUI mode not available!");
    eprintln!("   Rebuild with: cargo build --features tui");
    eprintln!("   Or compute once: carbon-calculator calc --distance 10 --meals 3");
    std::process::exit(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    fn calc_args(cli: Cli) -> CalcArgs {
        match cli.command {
            Some(Commands::Calc(args)) => args,
            other => panic!("expected calc, got {other:?}"),
        }
    }

    #[test]
    fn test_no_subcommand_means_tui() {
        let cli = parse(&["carbon-calculator"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_calc_defaults_match_form() {
        let args = calc_args(parse(&["carbon-calculator", "calc"]));

        assert_eq!(args.distance, 10.0);
        assert_eq!(args.electricity, 100.0);
        assert_eq!(args.waste, 10.0);
        assert_eq!(args.meals, 3);
        assert!(!args.json);
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = parse(&["carbon-calculator", "calc", "--json", "-vv", "--factors", "f.csv"]);

        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.factors, Some(PathBuf::from("f.csv")));
        assert!(calc_args(cli).json);
    }

    #[test]
    fn test_meals_must_be_integer() {
        assert!(Cli::try_parse_from(["carbon-calculator", "calc", "--meals", "2.5"]).is_err());
    }

    #[test]
    fn test_calc_report_clamps_flags() {
        let args = calc_args(parse(&[
            "carbon-calculator", "calc",
            "--distance", "250", "--electricity", "1000", "--waste", "100", "--meals", "10",
        ]));

        let report = calc_report(&EmissionFactorTable::builtin(), "India", &args).unwrap();
        assert_eq!(report.inputs.distance_km_per_day, 100.0);
        assert!((report.result.total - 20.03).abs() < 1e-9);
    }

    #[test]
    fn test_calc_report_unknown_country() {
        let args = calc_args(parse(&["carbon-calculator", "calc", "--country", "Unknownland"]));

        let err = calc_report(&EmissionFactorTable::builtin(), "India", &args).unwrap_err();
        let root = err.root_cause().to_string();
        assert_eq!(root, "Unknown country: Unknownland");
    }
}
