//! Plain text, CSV and JSON output for plans and race kits.

use crate::error::ExportError;
use crate::kit::RaceKit;
use crate::splits::Split;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::io::Write as _;
use std::path::Path;

/// Output format for plans and kits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Text,
    Csv,
    Json,
}

impl ExportFormat {
    /// File extension for the format
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Text => "txt",
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

/// Render split rows under a goal banner.
pub fn render_splits(
    rows: &[&Split],
    goal: &str,
    format: ExportFormat,
) -> Result<String, ExportError> {
    match format {
        ExportFormat::Text => Ok(splits_table(rows, goal)?),
        ExportFormat::Csv => splits_csv(rows),
        ExportFormat::Json => Ok(serde_json::to_string_pretty(rows)?),
    }
}

/// Render a race kit. CSV carries only the band rows.
pub fn render_kit(kit: &RaceKit, format: ExportFormat) -> Result<String, ExportError> {
    match format {
        ExportFormat::Text => Ok(kit_text(kit)?),
        ExportFormat::Csv => {
            let rows: Vec<&Split> = kit.band.iter().collect();
            splits_csv(&rows)
        }
        ExportFormat::Json => Ok(serde_json::to_string_pretty(kit)?),
    }
}

/// Write rendered output to `path`, creating parent directories.
pub fn save_to_file(path: &Path, contents: &str) -> Result<(), ExportError> {
    let write_failed = |source: std::io::Error| ExportError::WriteFailed {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(write_failed)?;
    }
    std::fs::write(path, contents).map_err(write_failed)?;

    tracing::info!(path = %path.display(), bytes = contents.len(), "Export written");
    Ok(())
}

/// Write to `path`, or to stdout when there is none.
pub fn emit(path: Option<&Path>, contents: &str) -> crate::error::Result<()> {
    match path {
        Some(path) => save_to_file(path, contents)?,
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(contents.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}

fn splits_table(rows: &[&Split], goal: &str) -> Result<String, std::fmt::Error> {
    let mut out = String::new();
    writeln!(out, "SPRIX  {} GOAL", goal)?;
    writeln!(out, "{:>10}  {:>7}  {:>9}", "DIST", "SPLIT", "ELAPSED")?;
    for split in rows {
        writeln!(out, "{}", table_row(split))?;
    }
    Ok(out)
}

fn table_row(split: &Split) -> String {
    let marker = if split.is_major_marker { '*' } else { ' ' };
    format!(
        "{:>8}km{}  {:>7}  {:>9}",
        split.distance, marker, split.split_time, split.elapsed_time
    )
}

fn splits_csv(rows: &[&Split]) -> Result<String, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for split in rows {
        writer.serialize(split)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::Csv(e.into_error().into()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn kit_text(kit: &RaceKit) -> Result<String, std::fmt::Error> {
    let mut out = String::new();
    writeln!(out, "RACE DAY PLAN")?;
    writeln!(out, "Target Goal: {}", kit.goal)?;
    writeln!(
        out,
        "{} km, {}, average {} /km",
        kit.distance_km, kit.strategy_label, kit.avg_pace
    )?;
    writeln!(out)?;

    writeln!(out, "- - - - - - - - - - - - - - - - -")?;
    writeln!(out, "{:>10}  {:>7}  {:>9}", "KM", "PACE", "TIME")?;
    for split in &kit.band {
        writeln!(out, "{}", table_row(split))?;
    }
    writeln!(out, "- - - - - - - - - - - - - - - - -")?;
    writeln!(out, "Cut along dashed line")?;
    writeln!(out)?;

    writeln!(out, "INSTRUCTIONS")?;
    for (i, step) in kit.instructions.iter().enumerate() {
        writeln!(out, "{}. {}: {}", i + 1, step.title, step.body)?;
    }
    writeln!(out)?;

    writeln!(out, "RACE MORNING CHECKLIST")?;
    for item in &kit.checklist {
        writeln!(out, "[ ] {}", item)?;
    }
    writeln!(out)?;

    writeln!(out, "STRATEGY NOTE")?;
    writeln!(out, "{}", kit.strategy_note)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DisplayConfig;
    use crate::plan::RacePlan;
    use crate::splits::{RaceInput, Strategy};
    use tempfile::tempdir;

    fn ten_k() -> RacePlan {
        RacePlan::new(RaceInput::new(10.0, 3_000.0, Strategy::Even))
    }

    #[test]
    fn test_text_table() {
        let plan = ten_k();
        let rows: Vec<&Split> = plan.splits.iter().collect();
        let text = render_splits(&rows, "0:50:00", ExportFormat::Text).unwrap();

        assert!(text.starts_with("SPRIX  0:50:00 GOAL"));
        assert_eq!(text.lines().count(), 12);
        assert!(text.contains("5km*"));
        assert!(text.lines().last().unwrap().contains("0:50:00"));
    }

    #[test]
    fn test_csv_has_header_and_rows() {
        let plan = ten_k();
        let rows: Vec<&Split> = plan.splits.iter().collect();
        let csv = render_splits(&rows, "0:50:00", ExportFormat::Csv).unwrap();

        let mut lines = csv.lines();
        assert_eq!(
            lines.next(),
            Some("distance,split_time,elapsed_time,is_major_marker")
        );
        assert_eq!(lines.next(), Some("1.0,5:00,0:05:00,false"));
        assert_eq!(csv.lines().count(), 11);
    }

    #[test]
    fn test_json_rows() {
        let plan = ten_k();
        let rows: Vec<&Split> = plan.splits.iter().collect();
        let json = render_splits(&rows, "0:50:00", ExportFormat::Json).unwrap();

        let parsed: Vec<Split> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, plan.splits);
    }

    #[test]
    fn test_kit_text_sections() {
        let plan = ten_k();
        let kit = RaceKit::new(&plan, "0:50:00", &DisplayConfig::default(), true);
        let text = render_kit(&kit, ExportFormat::Text).unwrap();

        assert!(text.contains("Target Goal: 0:50:00"));
        assert!(text.contains("INSTRUCTIONS"));
        assert!(text.contains("[ ] Timing Chip"));
        assert!(text.contains("EVEN PACE"));
    }

    #[test]
    fn test_save_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("plans").join("race.txt");
        save_to_file(&path, "hello").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "hello");
    }

    #[test]
    fn test_emit_to_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("plan.csv");
        emit(Some(&path), "distance\n").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "distance\n");
    }

    #[test]
    fn test_extensions() {
        assert_eq!(ExportFormat::Csv.extension(), "csv");
        assert_eq!(ExportFormat::Json.extension(), "json");
        assert_eq!(ExportFormat::Text.extension(), "txt");
    }
}
