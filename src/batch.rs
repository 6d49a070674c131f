use crate::config::DisplayConfig;
use crate::error::InputError;
use crate::export::{render_kit, save_to_file, ExportFormat};
use crate::kit::RaceKit;
use crate::plan::RacePlan;
use crate::request::{RaceRequest, ResolvedRace};
use crate::splits::Strategy;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub struct BatchArgs {
    pub input_pattern: String,
    pub output_dir: PathBuf,
    pub format: ExportFormat,
    pub display: DisplayConfig,
}

/// One race described in a TOML file.
///
/// Either `distance_km` or `preset` must be given; a preset also supplies the
/// goal when `goal` is missing.
#[derive(Debug, Clone, Deserialize)]
pub struct RaceFile {
    pub name: Option<String>,
    pub preset: Option<String>,
    pub distance_km: Option<f64>,
    pub goal: Option<String>,
    #[serde(default)]
    pub strategy: Strategy,
    #[serde(default)]
    pub show_all: bool,
}

impl RaceFile {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).context("Failed to read race file")?;
        toml::from_str(&contents).context("Failed to parse race file")
    }

    /// Resolve with no configured fallback race.
    pub fn resolve(&self) -> Result<ResolvedRace, InputError> {
        RaceRequest {
            distance_km: self.distance_km,
            preset: self.preset.clone(),
            goal: self.goal.clone(),
            strategy: Some(self.strategy),
        }
        .resolve(None, self.strategy)
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
    pub processed: usize,
    pub failed: usize,
}

pub fn run_batch_processing(args: BatchArgs) -> Result<BatchSummary> {
    tracing::info!("Starting batch processing");
    tracing::info!("Input pattern: {}", args.input_pattern);
    tracing::info!("Output directory: {:?}", args.output_dir);
    tracing::info!("Format: {:?}", args.format);

    fs::create_dir_all(&args.output_dir).context("Failed to create output directory")?;

    let paths: Vec<PathBuf> = glob::glob(&args.input_pattern)
        .context("Failed to read glob pattern")?
        .filter_map(|entry| entry.ok())
        .collect();

    let mut summary = BatchSummary::default();

    if paths.is_empty() {
        tracing::warn!("No files found matching pattern: {}", args.input_pattern);
        return Ok(summary);
    }

    tracing::info!("Found {} race files to process", paths.len());

    for path in paths {
        tracing::info!("Processing file: {:?}", path);

        match process_file(&path, &args) {
            Ok(output) => {
                summary.processed += 1;
                tracing::info!("Wrote {:?}", output);
            }
            Err(e) => {
                summary.failed += 1;
                tracing::error!("Failed to process {:?}: {:#}", path, e);
            }
        }
    }

    tracing::info!(
        processed = summary.processed,
        failed = summary.failed,
        "Batch processing complete"
    );
    Ok(summary)
}

fn process_file(input_path: &Path, args: &BatchArgs) -> Result<PathBuf> {
    let race = RaceFile::load(input_path)?;
    let resolved = race.resolve()?;
    if let Some(name) = &race.name {
        tracing::debug!(name = %name, "Resolved race");
    }

    let plan = RacePlan::new(resolved.input);
    if plan.splits.is_empty() {
        anyhow::bail!("Race has no splits: goal {}", resolved.goal);
    }

    let goal = resolved.goal.to_string();
    let kit = RaceKit::new(&plan, &goal, &args.display, race.show_all);
    let contents = render_kit(&kit, args.format).context("Failed to render race kit")?;

    let file_stem = input_path
        .file_stem()
        .ok_or_else(|| anyhow::anyhow!("Invalid filename: {:?} has no stem", input_path))?;

    // An empty stem would write a bare ".txt" and clobber other outputs.
    if file_stem.is_empty() {
        anyhow::bail!("Invalid filename: {:?} has empty stem", input_path);
    }

    let output_filename = PathBuf::from(file_stem).with_extension(args.format.extension());
    let output_path = args.output_dir.join(output_filename);

    save_to_file(&output_path, &contents).context("Failed to save race kit")?;

    Ok(output_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn race(toml_src: &str) -> RaceFile {
        toml::from_str(toml_src).unwrap()
    }

    #[test]
    fn test_resolve_explicit() {
        let r = race("distance_km = 15.0\ngoal = \"1:15:00\"\nstrategy = \"negative\"");
        let resolved = r.resolve().unwrap();
        assert_eq!(resolved.input.distance_km, 15.0);
        assert_eq!(resolved.goal.to_string(), "1:15:00");
        assert_eq!(resolved.input.strategy, Strategy::Negative);
    }

    #[test]
    fn test_resolve_from_preset() {
        let r = race("preset = \"half\"");
        let resolved = r.resolve().unwrap();
        assert_eq!(resolved.input.distance_km, 21.0975);
        assert_eq!(resolved.goal.to_string(), "1:50:00");
        assert_eq!(resolved.input.strategy, Strategy::Even);
    }

    #[test]
    fn test_preset_goal_can_be_overridden() {
        let r = race("preset = \"marathon\"\ngoal = \"3:30:00\"");
        let resolved = r.resolve().unwrap();
        assert_eq!(resolved.input.distance_km, 42.195);
        assert_eq!(resolved.goal.to_string(), "3:30:00");
    }

    #[test]
    fn test_resolve_errors() {
        assert!(race("goal = \"1:00:00\"").resolve().is_err());
        assert!(race("distance_km = 13.0").resolve().is_err());
        assert!(race("preset = \"ultra\"").resolve().is_err());
        assert!(race("distance_km = 0.0\ngoal = \"1:00:00\"").resolve().is_err());
    }

    #[test]
    fn test_batch_writes_one_kit_per_file() {
        let input = tempdir().unwrap();
        let output = tempdir().unwrap();

        fs::write(input.path().join("spring.toml"), "preset = \"10k\"").unwrap();
        fs::write(
            input.path().join("autumn.toml"),
            "distance_km = 42.195\ngoal = \"3:45:00\"\nstrategy = \"negative\"",
        )
        .unwrap();
        fs::write(input.path().join("broken.toml"), "distance_km = \"far\"").unwrap();

        let summary = run_batch_processing(BatchArgs {
            input_pattern: format!("{}/*.toml", input.path().display()),
            output_dir: output.path().to_path_buf(),
            format: ExportFormat::Json,
            display: DisplayConfig::default(),
        })
        .unwrap();

        assert_eq!(summary, BatchSummary { processed: 2, failed: 1 });

        let autumn = fs::read_to_string(output.path().join("autumn.json")).unwrap();
        let kit: serde_json::Value = serde_json::from_str(&autumn).unwrap();
        assert_eq!(kit["strategy"], "negative");
        assert_eq!(kit["band"].as_array().unwrap().last().unwrap()["elapsed_time"], "3:45:00");
        assert!(output.path().join("spring.json").exists());
    }

    #[test]
    fn test_batch_with_no_matches() {
        let output = tempdir().unwrap();
        let summary = run_batch_processing(BatchArgs {
            input_pattern: format!("{}/*.toml", output.path().display()),
            output_dir: output.path().join("out"),
            format: ExportFormat::Text,
            display: DisplayConfig::default(),
        })
        .unwrap();
        assert_eq!(summary, BatchSummary::default());
    }
}
