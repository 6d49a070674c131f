use std::io;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum, ValueHint};
use sprix::batch::{run_batch_processing, BatchArgs};
use sprix::export::{emit, render_kit, render_splits, ExportFormat};
use sprix::kit::RaceKit;
use sprix::plan::{avg_pace, RacePlan};
use sprix::presets::PRESETS;
use sprix::{AppConfig, InputError, RaceInput, RaceRequest, Strategy};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Race pacing splits and pace band generator", long_about = None)]
struct Cli {
    /// Config file (defaults to the platform config directory)
    #[arg(long, global = true, value_hint = ValueHint::FilePath)]
    config: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute splits for one race
    Plan(PlanArgs),
    /// List the built-in race presets
    Presets,
    /// Write a race kit for every race file matching a glob
    Batch(BatchCliArgs),
    /// Print the effective config, or write the default one
    Config(ConfigArgs),
}

#[derive(Parser, Debug)]
struct PlanArgs {
    /// Race distance in km
    distance: Option<f64>,

    /// Preset race: 5k, 10k, half, marathon
    #[arg(short, long)]
    preset: Option<String>,

    /// Goal finish time, H:MM:SS or M:SS
    #[arg(short, long)]
    goal: Option<String>,

    /// Pacing strategy
    #[arg(short, long, value_enum)]
    strategy: Option<StrategyArg>,

    /// Show every kilometer even for long races
    #[arg(long, conflicts_with = "summary")]
    all: bool,

    /// Show only major markers and the finish
    #[arg(long)]
    summary: bool,

    /// Produce the printable race kit instead of the split table
    #[arg(long)]
    kit: bool,

    /// Output format
    #[arg(short, long, value_enum)]
    format: Option<FormatArg>,

    /// Write to a file instead of stdout
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    output: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct BatchCliArgs {
    /// Glob of race TOML files, e.g. "races/*.toml"
    input: String,

    /// Directory for the generated kits
    #[arg(short, long, default_value = "plans", value_hint = ValueHint::DirPath)]
    output_dir: PathBuf,

    /// Output format
    #[arg(short, long, value_enum)]
    format: Option<FormatArg>,
}

#[derive(Parser, Debug)]
struct ConfigArgs {
    /// Write the default config to the config path
    #[arg(long)]
    init: bool,

    /// Overwrite an existing config file
    #[arg(long, requires = "init")]
    force: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum StrategyArg {
    Even,
    Negative,
}

impl From<StrategyArg> for Strategy {
    fn from(value: StrategyArg) -> Self {
        match value {
            StrategyArg::Even => Strategy::Even,
            StrategyArg::Negative => Strategy::Negative,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum FormatArg {
    Text,
    Csv,
    Json,
}

impl From<FormatArg> for ExportFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Text => ExportFormat::Text,
            FormatArg::Csv => ExportFormat::Csv,
            FormatArg::Json => ExportFormat::Json,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    let config_path = cli.config.clone().unwrap_or_else(AppConfig::default_path);

    let result = match cli.command {
        Command::Plan(args) => handle_plan(args, &load_config(&cli.config, &config_path)?),
        Command::Presets => handle_presets(),
        Command::Batch(args) => handle_batch(args, &load_config(&cli.config, &config_path)?),
        Command::Config(args) => handle_config(args, &cli.config, &config_path),
    };

    if let Err(err) = &result {
        if let Some(input) = err.downcast_ref::<InputError>() {
            eprintln!("{}", input.user_message());
            if let Some(hint) = input.recovery_hint() {
                eprintln!("hint: {}", hint);
            }
            std::process::exit(2);
        }
    }
    result
}

/// An explicitly named config must load; the default location may be absent.
fn load_config(explicit: &Option<PathBuf>, path: &Path) -> Result<AppConfig> {
    if explicit.is_some() {
        return AppConfig::load_from_file(path)
            .with_context(|| format!("loading config {}", path.display()));
    }
    if path.exists() {
        Ok(AppConfig::load_or_default(path))
    } else {
        debug!(path = %path.display(), "No config file, using defaults");
        Ok(AppConfig::default())
    }
}

fn handle_plan(args: PlanArgs, config: &AppConfig) -> Result<()> {
    let request = RaceRequest {
        distance_km: args.distance,
        preset: args.preset.clone(),
        goal: args.goal.clone(),
        strategy: args.strategy.map(Strategy::from),
    };
    let race = request.resolve(
        Some(config.race.default_preset.as_str()),
        config.race.default_strategy,
    )?;
    let goal = race.goal.to_string();
    info!(
        distance_km = race.input.distance_km,
        goal = %goal,
        strategy = %race.input.strategy,
        "Planning race"
    );

    let plan = RacePlan::new(race.input);
    let show_all = if args.all {
        true
    } else if args.summary {
        false
    } else {
        plan.default_show_all(&config.display)
    };
    let format = args
        .format
        .map(ExportFormat::from)
        .unwrap_or(config.export.default_format);

    let contents = if args.kit {
        let kit = RaceKit::new(&plan, &goal, &config.display, show_all);
        render_kit(&kit, format)?
    } else {
        let rows = plan.visible_splits(&config.display, show_all);
        let mut text = render_splits(&rows, &goal, format)?;
        if format == ExportFormat::Text {
            text.push_str(&format!(
                "\nAvg pace {} /km, kick in the {}\n",
                plan.avg_pace, plan.kick
            ));
        }
        text
    };

    emit(args.output.as_deref(), &contents)?;
    Ok(())
}

fn handle_presets() -> Result<()> {
    let mut out = String::new();
    out.push_str(&format!(
        "{:<10} {:>9} {:>9} {:>9}\n",
        "PRESET", "KM", "GOAL", "PACE"
    ));
    for preset in PRESETS {
        let input = RaceInput::new(
            preset.distance_km,
            preset.default_goal.total_seconds(),
            Strategy::Even,
        );
        let pace = avg_pace(&input).unwrap_or_default();
        out.push_str(&format!(
            "{:<10} {:>9} {:>9} {:>9}\n",
            preset.label,
            preset.distance_km,
            preset.default_goal.to_string(),
            pace
        ));
    }
    emit(None, &out)?;
    Ok(())
}

fn handle_batch(args: BatchCliArgs, config: &AppConfig) -> Result<()> {
    let summary = run_batch_processing(BatchArgs {
        input_pattern: args.input,
        output_dir: args.output_dir,
        format: args
            .format
            .map(ExportFormat::from)
            .unwrap_or(config.export.default_format),
        display: config.display.clone(),
    })?;

    println!(
        "{} race kits written, {} failed",
        summary.processed, summary.failed
    );
    if summary.failed > 0 && summary.processed == 0 {
        bail!("every race file failed");
    }
    Ok(())
}

fn handle_config(args: ConfigArgs, explicit: &Option<PathBuf>, path: &Path) -> Result<()> {
    if args.init {
        if path.exists() && !args.force {
            bail!(
                "{} already exists, pass --force to overwrite",
                path.display()
            );
        }
        AppConfig::default().save_to_file(path)?;
        println!("Wrote {}", path.display());
        return Ok(());
    }

    let config = load_config(explicit, path)?;
    config.validate()?;
    emit(None, &config.to_toml()?)?;
    Ok(())
}
