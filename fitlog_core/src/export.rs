//! CSV export of record collections.

use crate::{MealRecord, Result, WorkoutRecord};
use serde::Serialize;
use std::path::Path;

/// A row in the workouts CSV
#[derive(Debug, Serialize)]
struct WorkoutRow<'a> {
    id: i64,
    date: String,
    #[serde(rename = "type")]
    kind: &'a str,
    duration: u32,
    calories: u32,
    notes: Option<&'a str>,
}

impl<'a> From<&'a WorkoutRecord> for WorkoutRow<'a> {
    fn from(w: &'a WorkoutRecord) -> Self {
        WorkoutRow {
            id: w.id,
            date: w.date.to_string(),
            kind: &w.kind,
            duration: w.duration,
            calories: w.calories,
            notes: w.notes.as_deref(),
        }
    }
}

/// A row in the meals CSV
#[derive(Debug, Serialize)]
struct MealRow<'a> {
    id: i64,
    date: String,
    #[serde(rename = "type")]
    kind: &'a str,
    calories: u32,
    notes: Option<&'a str>,
}

impl<'a> From<&'a MealRecord> for MealRow<'a> {
    fn from(m: &'a MealRecord) -> Self {
        MealRow {
            id: m.id,
            date: m.date.to_string(),
            kind: &m.kind,
            calories: m.calories,
            notes: m.notes.as_deref(),
        }
    }
}

/// Write workouts to `path`, replacing any existing file
///
/// Returns the number of rows written (excluding the header).
pub fn write_workouts_csv(path: &Path, workouts: &[WorkoutRecord]) -> Result<usize> {
    write_rows(path, workouts.iter().map(WorkoutRow::from))
}

/// Write meals to `path`, replacing any existing file
pub fn write_meals_csv(path: &Path, meals: &[MealRecord]) -> Result<usize> {
    write_rows(path, meals.iter().map(MealRow::from))
}

fn write_rows<R, I>(path: &Path, rows: I) -> Result<usize>
where
    R: Serialize,
    I: Iterator<Item = R>,
{
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file = std::fs::File::create(path)?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(true)
        .from_writer(file);

    let mut count = 0;
    for row in rows {
        writer.serialize(row)?;
        count += 1;
    }

    // Flush and sync to disk
    writer.flush()?;
    let file = writer
        .into_inner()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;
    file.sync_all()?;

    tracing::info!("Exported {} rows to {:?}", count, path);
    Ok(count)
}
