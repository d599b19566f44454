//! Workout and meal collections backed by a key-value store.
//!
//! The journal is the only place records are created or removed. Removal
//! hands back the record and its former position so it can be restored
//! (undo), and the last removal can be parked in the store between runs.

use crate::ids::IdGenerator;
use crate::store::{KeyValueStore, LAST_DELETED_KEY, MEALS_KEY, WORKOUTS_KEY};
use crate::{MealRecord, Record, Result, WorkoutRecord};
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Input for a new workout (id is assigned by the journal)
#[derive(Clone, Debug)]
pub struct NewWorkout {
    pub date: NaiveDate,
    pub kind: String,
    pub duration: u32,
    pub calories: u32,
    pub notes: Option<String>,
}

/// Input for a new meal (id is assigned by the journal)
#[derive(Clone, Debug)]
pub struct NewMeal {
    pub date: NaiveDate,
    pub kind: String,
    pub calories: u32,
    pub notes: Option<String>,
}

/// A record taken out of a collection, with the position it occupied
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Removed<T> {
    pub index: usize,
    pub record: T,
}

/// The most recent deletion of either kind
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DeletedRecord {
    Workout(Removed<WorkoutRecord>),
    Meal(Removed<MealRecord>),
}

impl DeletedRecord {
    pub fn id(&self) -> i64 {
        match self {
            DeletedRecord::Workout(r) => r.record.id,
            DeletedRecord::Meal(r) => r.record.id,
        }
    }
}

/// Both record collections plus the id source for new records
#[derive(Debug, Default)]
pub struct Journal {
    workouts: Vec<WorkoutRecord>,
    meals: Vec<MealRecord>,
    ids: IdGenerator,
}

impl Journal {
    pub fn new(workouts: Vec<WorkoutRecord>, meals: Vec<MealRecord>) -> Self {
        let ids = IdGenerator::default();
        for id in workouts.iter().map(|w| w.id).chain(meals.iter().map(|m| m.id)) {
            ids.observe(id);
        }
        Self {
            workouts,
            meals,
            ids,
        }
    }

    /// Load both collections from the store
    ///
    /// Missing keys load as empty collections. Corrupt collections are
    /// logged and treated as empty; individual bad records are skipped.
    pub fn load(store: &dyn KeyValueStore) -> Result<Self> {
        let workouts = load_collection::<WorkoutRecord>(store, WORKOUTS_KEY)?;
        let meals = load_collection::<MealRecord>(store, MEALS_KEY)?;

        tracing::info!(
            "Loaded {} workouts and {} meals",
            workouts.len(),
            meals.len()
        );

        Ok(Self::new(workouts, meals))
    }

    /// Write both collections back to the store
    pub fn save(&self, store: &mut dyn KeyValueStore) -> Result<()> {
        store.set(WORKOUTS_KEY, &serde_json::to_string(&self.workouts)?)?;
        store.set(MEALS_KEY, &serde_json::to_string(&self.meals)?)?;
        tracing::debug!(
            "Saved {} workouts and {} meals",
            self.workouts.len(),
            self.meals.len()
        );
        Ok(())
    }

    pub fn workouts(&self) -> &[WorkoutRecord] {
        &self.workouts
    }

    pub fn meals(&self) -> &[MealRecord] {
        &self.meals
    }

    pub fn add_workout(&mut self, new: NewWorkout) -> &WorkoutRecord {
        let record = WorkoutRecord {
            id: self.ids.next(),
            date: new.date,
            kind: new.kind,
            duration: new.duration,
            calories: new.calories,
            notes: new.notes,
        };
        tracing::info!("Logged workout {} on {}", record.id, record.date);
        self.workouts.push(record);
        &self.workouts[self.workouts.len() - 1]
    }

    pub fn add_meal(&mut self, new: NewMeal) -> &MealRecord {
        let record = MealRecord {
            id: self.ids.next(),
            date: new.date,
            kind: new.kind,
            calories: new.calories,
            notes: new.notes,
        };
        tracing::info!("Logged meal {} on {}", record.id, record.date);
        self.meals.push(record);
        &self.meals[self.meals.len() - 1]
    }

    pub fn remove_workout(&mut self, id: i64) -> Option<Removed<WorkoutRecord>> {
        remove_by_id(&mut self.workouts, id)
    }

    pub fn remove_meal(&mut self, id: i64) -> Option<Removed<MealRecord>> {
        remove_by_id(&mut self.meals, id)
    }

    /// Put a removed workout back where it was; false if its id is taken
    pub fn restore_workout(&mut self, removed: Removed<WorkoutRecord>) -> bool {
        self.ids.observe(removed.record.id);
        restore_at(&mut self.workouts, removed)
    }

    /// Put a removed meal back where it was; false if its id is taken
    pub fn restore_meal(&mut self, removed: Removed<MealRecord>) -> bool {
        self.ids.observe(removed.record.id);
        restore_at(&mut self.meals, removed)
    }

    pub fn restore(&mut self, deleted: DeletedRecord) -> bool {
        match deleted {
            DeletedRecord::Workout(removed) => self.restore_workout(removed),
            DeletedRecord::Meal(removed) => self.restore_meal(removed),
        }
    }
}

/// Park the latest deletion in the store so a later run can undo it
pub fn stash_deleted(store: &mut dyn KeyValueStore, deleted: &DeletedRecord) -> Result<()> {
    store.set(LAST_DELETED_KEY, &serde_json::to_string(deleted)?)
}

/// Result of [`undo_last_delete`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UndoOutcome {
    /// No usable deletion was parked
    Nothing,
    Restored(i64),
    /// A record with the parked id is already in its collection
    AlreadyPresent(i64),
}

/// Restore the parked deletion into the stored collections
///
/// The undo entry is cleared only after the collections are written, so a
/// failed save leaves it in place for another attempt. An unreadable entry
/// is discarded.
pub fn undo_last_delete(store: &mut dyn KeyValueStore) -> Result<UndoOutcome> {
    let Some(raw) = store.get(LAST_DELETED_KEY)? else {
        return Ok(UndoOutcome::Nothing);
    };

    let deleted = match serde_json::from_str::<DeletedRecord>(&raw) {
        Ok(deleted) => deleted,
        Err(e) => {
            tracing::warn!("Discarding unreadable undo entry: {}", e);
            store.remove(LAST_DELETED_KEY)?;
            return Ok(UndoOutcome::Nothing);
        }
    };

    let mut journal = Journal::load(&*store)?;
    let id = deleted.id();
    let outcome = if journal.restore(deleted) {
        journal.save(store)?;
        UndoOutcome::Restored(id)
    } else {
        UndoOutcome::AlreadyPresent(id)
    };

    store.remove(LAST_DELETED_KEY)?;
    Ok(outcome)
}

fn load_collection<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Result<Vec<T>> {
    let Some(raw) = store.get(key)? else {
        tracing::debug!("No stored '{}' collection, starting empty", key);
        return Ok(Vec::new());
    };

    let items = match serde_json::from_str::<Vec<serde_json::Value>>(&raw) {
        Ok(items) => items,
        Err(e) => {
            tracing::warn!("Failed to parse stored '{}': {}. Using empty collection.", key, e);
            return Ok(Vec::new());
        }
    };

    let mut records = Vec::with_capacity(items.len());
    for (i, item) in items.into_iter().enumerate() {
        match serde_json::from_value::<T>(item) {
            Ok(record) => records.push(record),
            Err(e) => {
                tracing::warn!("Skipping malformed '{}' entry {}: {}", key, i, e);
            }
        }
    }

    Ok(records)
}

fn remove_by_id<T: Record>(records: &mut Vec<T>, id: i64) -> Option<Removed<T>> {
    let index = records.iter().position(|r| r.id() == id)?;
    let record = records.remove(index);
    tracing::info!("Removed record {} at position {}", id, index);
    Some(Removed { index, record })
}

fn restore_at<T: Record>(records: &mut Vec<T>, removed: Removed<T>) -> bool {
    if records.iter().any(|r| r.id() == removed.record.id()) {
        tracing::warn!("Record {} already present, not restoring", removed.record.id());
        return false;
    }
    let index = removed.index.min(records.len());
    records.insert(index, removed.record);
    true
}
