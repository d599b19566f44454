use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use fitlog_core::journal::{stash_deleted, undo_last_delete, UndoOutcome};
use fitlog_core::*;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "fitlog")]
#[command(about = "Workout and meal log with dashboard statistics", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Read configuration from this file instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Reference date for streaks and windows (YYYY-MM-DD, defaults to today)
    #[arg(long, global = true, value_parser = parse_date)]
    today: Option<NaiveDate>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Log a workout
    Workout {
        /// Workout type (run, gym, bike, swim, other)
        #[arg(long = "type", value_parser = parse_workout_type)]
        kind: WorkoutType,

        /// Duration in minutes
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        duration: u32,

        /// Calories burned
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        calories: u32,

        /// Date of the workout (defaults to the reference date)
        #[arg(long, value_parser = parse_date)]
        date: Option<NaiveDate>,

        #[arg(long)]
        notes: Option<String>,
    },

    /// Log a meal
    Meal {
        /// Meal type (breakfast, snack, lunch, dinner, other)
        #[arg(long = "type", value_parser = parse_meal_type)]
        kind: MealType,

        /// Calories eaten
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        calories: u32,

        /// Date of the meal (defaults to the reference date)
        #[arg(long, value_parser = parse_date)]
        date: Option<NaiveDate>,

        #[arg(long)]
        notes: Option<String>,
    },

    /// Delete a record by id (can be undone with `undo`)
    Delete {
        #[arg(value_enum)]
        kind: RecordKind,
        id: i64,
    },

    /// Restore the most recently deleted record
    Undo,

    /// List all logged records
    List,

    /// Rolling-window dashboard
    Stats {
        /// Window length in days
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        window: Option<u64>,

        /// Moving-average window in days
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        smooth: Option<u64>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Calendar month summary
    Month {
        /// Any date inside the month (defaults to the reference date)
        #[arg(long, value_parser = parse_date)]
        date: Option<NaiveDate>,

        #[arg(long)]
        json: bool,
    },

    /// Totals, streaks and personal bests (default)
    Home {
        #[arg(long)]
        json: bool,
    },

    /// Export both collections to CSV
    Export {
        /// Output directory (defaults to <data-dir>/export)
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum RecordKind {
    Workout,
    Meal,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Keep stdout clean unless asked for detail
    fitlog_core::logging::init_with_level(if cli.verbose { "debug" } else { "warn" });

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let data_dir = cli.data_dir.unwrap_or_else(|| config.data.data_dir.clone());
    let today = cli
        .today
        .unwrap_or_else(|| chrono::Local::now().date_naive());

    let mut store = FileStore::new(data_dir.join("store"));
    tracing::debug!("Using store at {:?}, today = {}", store.dir(), today);

    match cli.command {
        Some(Commands::Workout {
            kind,
            duration,
            calories,
            date,
            notes,
        }) => cmd_workout(
            &mut store,
            NewWorkout {
                date: date.unwrap_or(today),
                kind: kind.as_str().to_string(),
                duration,
                calories,
                notes,
            },
        ),
        Some(Commands::Meal {
            kind,
            calories,
            date,
            notes,
        }) => cmd_meal(
            &mut store,
            NewMeal {
                date: date.unwrap_or(today),
                kind: kind.as_str().to_string(),
                calories,
                notes,
            },
        ),
        Some(Commands::Delete { kind, id }) => cmd_delete(&mut store, kind, id),
        Some(Commands::Undo) => cmd_undo(&mut store),
        Some(Commands::List) => cmd_list(&store),
        Some(Commands::Stats {
            window,
            smooth,
            json,
        }) => {
            let mut stats = config.stats.clone();
            if let Some(w) = window {
                stats.window_days = w as usize;
            }
            if let Some(s) = smooth {
                stats.smoothing_window = s as usize;
            }
            stats.validate()?;
            cmd_stats(&store, today, &stats, json)
        }
        Some(Commands::Month { date, json }) => cmd_month(&store, date.unwrap_or(today), json),
        Some(Commands::Home { json }) => cmd_home(&store, today, json),
        Some(Commands::Export { out }) => {
            cmd_export(&store, &out.unwrap_or_else(|| data_dir.join("export")))
        }
        None => cmd_home(&store, today, false),
    }
}

fn cmd_workout(store: &mut FileStore, new: NewWorkout) -> Result<()> {
    let mut journal = Journal::load(store)?;
    let record = journal.add_workout(new).clone();
    journal.save(store)?;

    println!(
        "✓ Workout logged: {} {} min, {} kcal on {} (id {})",
        record.kind, record.duration, record.calories, record.date, record.id
    );
    Ok(())
}

fn cmd_meal(store: &mut FileStore, new: NewMeal) -> Result<()> {
    let mut journal = Journal::load(store)?;
    let record = journal.add_meal(new).clone();
    journal.save(store)?;

    println!(
        "✓ Meal logged: {} {} kcal on {} (id {})",
        record.kind, record.calories, record.date, record.id
    );
    Ok(())
}

fn cmd_delete(store: &mut FileStore, kind: RecordKind, id: i64) -> Result<()> {
    let mut journal = Journal::load(store)?;

    let deleted = match kind {
        RecordKind::Workout => journal.remove_workout(id).map(DeletedRecord::Workout),
        RecordKind::Meal => journal.remove_meal(id).map(DeletedRecord::Meal),
    };

    let Some(deleted) = deleted else {
        return Err(Error::Record(format!("no record with id {}", id)));
    };

    journal.save(store)?;
    stash_deleted(store, &deleted)?;

    match &deleted {
        DeletedRecord::Workout(r) => println!(
            "✓ Workout deleted: {} {} min on {}",
            r.record.kind, r.record.duration, r.record.date
        ),
        DeletedRecord::Meal(r) => println!(
            "✓ Meal deleted: {} {} kcal on {}",
            r.record.kind, r.record.calories, r.record.date
        ),
    }
    println!("  Run `fitlog undo` to restore it.");
    Ok(())
}

fn cmd_undo(store: &mut FileStore) -> Result<()> {
    match undo_last_delete(store)? {
        UndoOutcome::Nothing => println!("Nothing to undo."),
        UndoOutcome::Restored(id) => println!("✓ Restored record {}", id),
        UndoOutcome::AlreadyPresent(id) => {
            println!("Record {} is already present; nothing to restore.", id)
        }
    }
    Ok(())
}

fn cmd_list(store: &FileStore) -> Result<()> {
    let journal = Journal::load(store)?;

    println!("Workouts ({})", journal.workouts().len());
    for w in journal.workouts() {
        println!(
            "  {}  {}  {:<6} {:>4} min {:>5} kcal{}",
            w.id,
            w.date,
            w.kind,
            w.duration,
            w.calories,
            format_notes(&w.notes)
        );
    }

    println!("Meals ({})", journal.meals().len());
    for m in journal.meals() {
        println!(
            "  {}  {}  {:<9} {:>5} kcal{}",
            m.id,
            m.date,
            m.kind,
            m.calories,
            format_notes(&m.notes)
        );
    }
    Ok(())
}

fn cmd_stats(store: &FileStore, today: NaiveDate, stats: &StatsConfig, json: bool) -> Result<()> {
    let journal = Journal::load(store)?;
    let dashboard = Dashboard::build(journal.workouts(), journal.meals(), today, stats);

    if json {
        println!("{}", serde_json::to_string_pretty(&dashboard)?);
        return Ok(());
    }

    println!("\n╭─────────────────────────────────────────╮");
    println!("│  DASHBOARD: last {} days", dashboard.window.len());
    println!("╰─────────────────────────────────────────╯");
    println!();
    println!(
        "  {:<10} {:>6} {:>6} {:>6} {:>6} {:>3} {:>5} {:>5}",
        "date", "in", "out", "net", "trend", "#", "min", "trend"
    );

    let w = &dashboard.window;
    for i in 0..w.len() {
        println!(
            "  {:<10} {:>6} {:>6} {:>6} {:>6} {:>3} {:>5} {:>5}",
            w.dates[i].to_string(),
            w.calories_in[i],
            w.calories_out[i],
            w.net_balance[i],
            dashboard.net_balance_trend[i],
            w.workout_count[i],
            w.workout_duration[i],
            dashboard.duration_trend[i]
        );
    }

    println!();
    println!("  By weekday (workouts / meals)");
    for (i, label) in dashboard.weekdays.labels.iter().enumerate() {
        println!(
            "    {:<4} {:>3} / {:<3}",
            label, dashboard.weekdays.workout_counts[i], dashboard.weekdays.meal_counts[i]
        );
    }

    println!();
    println!("  Sports");
    if dashboard.sports.labels.is_empty() {
        println!("    -");
    }
    let percentages = dashboard.sports.percentages();
    for (i, label) in dashboard.sports.labels.iter().enumerate() {
        println!(
            "    {:<8} {:>3} ({:.0}%)",
            label, dashboard.sports.counts[i], percentages[i]
        );
    }

    println!();
    println!("  Workout streak: {} days", dashboard.workout_streak);
    println!("  Meal streak:    {} days", dashboard.meal_streak);
    println!();
    Ok(())
}

fn cmd_month(store: &FileStore, reference: NaiveDate, json: bool) -> Result<()> {
    let journal = Journal::load(store)?;
    let stats = aggregate_by_month(journal.workouts(), journal.meals(), reference);

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    let label = reference.format("%Y-%m");
    let Some(stats) = stats else {
        println!("No activity in {}. Time to get moving!", label);
        return Ok(());
    };

    println!("Month {}", label);
    println!("  Workouts:        {}", stats.workout_count);
    println!("  Meals:           {}", stats.meal_count);
    println!("  Calories eaten:  {} kcal", stats.total_calories);
    match stats.longest_workout {
        Some(w) => println!("  Longest workout: {} min ({}, {})", w.duration, w.kind, w.date),
        None => println!("  Longest workout: -"),
    }
    Ok(())
}

fn cmd_home(store: &FileStore, today: NaiveDate, json: bool) -> Result<()> {
    let journal = Journal::load(store)?;
    let summary = HomeSummary::build(journal.workouts(), journal.meals(), today);

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("Workouts logged:     {}", summary.workout_total);
    println!("Meals logged:        {}", summary.meal_total);
    println!("Workout streak:      {} days", summary.workout_streak);
    println!("Meal streak:         {} days", summary.meal_streak);
    println!("Best workout streak: {} days", summary.best_workout_streak);
    println!();
    println!("Personal bests");

    let a = &summary.achievements;
    println!(
        "  Longest workout:      {}",
        a.longest_workout
            .map(|w| format!("{} min ({}, {})", w.duration, w.kind, w.date))
            .unwrap_or_else(|| "-".into())
    );
    println!(
        "  Most calories burned: {}",
        a.most_calories_burned
            .map(|w| format!("{} kcal ({}, {})", w.calories, w.kind, w.date))
            .unwrap_or_else(|| "-".into())
    );
    println!(
        "  Biggest eating day:   {}",
        a.biggest_eating_day
            .map(|d| format!("{} kcal ({})", d.total, d.date))
            .unwrap_or_else(|| "-".into())
    );
    println!(
        "  Most active day:      {}",
        a.most_active_day
            .map(|d| format!("{} workouts ({})", d.total, d.date))
            .unwrap_or_else(|| "-".into())
    );
    Ok(())
}

fn cmd_export(store: &FileStore, out: &Path) -> Result<()> {
    let journal = Journal::load(store)?;

    let workouts_path = out.join("workouts.csv");
    let meals_path = out.join("meals.csv");
    let workouts = fitlog_core::export::write_workouts_csv(&workouts_path, journal.workouts())?;
    let meals = fitlog_core::export::write_meals_csv(&meals_path, journal.meals())?;

    println!("✓ Exported {} workouts to {}", workouts, workouts_path.display());
    println!("✓ Exported {} meals to {}", meals, meals_path.display());
    Ok(())
}

fn format_notes(notes: &Option<String>) -> String {
    match notes.as_deref() {
        Some(n) if !n.is_empty() => format!("  {}", n),
        _ => String::new(),
    }
}

fn parse_date(s: &str) -> std::result::Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| format!("expected YYYY-MM-DD: {}", e))
}

fn parse_workout_type(s: &str) -> std::result::Result<WorkoutType, String> {
    s.parse::<WorkoutType>().map_err(|e| e.to_string())
}

fn parse_meal_type(s: &str) -> std::result::Result<MealType, String> {
    s.parse::<MealType>().map_err(|e| e.to_string())
}
