//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `tasklist_core` linkage.
//! - Optionally print the home summary of an existing database file.
//!
//! Usage: `tasklist_cli [DB_PATH]`

use chrono::Utc;
use std::process::ExitCode;
use tasklist_core::db::open_db;
use tasklist_core::{KvTaskRepository, SqliteKvStore, TaskService};

fn main() -> ExitCode {
    println!("tasklist_core ping={}", tasklist_core::ping());
    println!("tasklist_core version={}", tasklist_core::core_version());

    let Some(db_path) = std::env::args().nth(1) else {
        return ExitCode::SUCCESS;
    };

    match print_summary(&db_path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn print_summary(db_path: &str) -> Result<(), String> {
    let conn = open_db(db_path).map_err(|err| format!("open `{db_path}`: {err}"))?;
    let service = TaskService::new(KvTaskRepository::new(SqliteKvStore::new(&conn)));
    let now = Utc::now();

    let lists = service.list_overviews(now).map_err(|err| err.to_string())?;
    println!("lists={}", lists.len());
    for overview in &lists {
        println!(
            "  {} {}/{} ({}%)",
            overview.list.name,
            overview.completed_tasks,
            overview.total_tasks,
            overview.completion_percent
        );
    }

    let summary = service.home_summary(now).map_err(|err| err.to_string())?;
    println!("summary={}", summary.len());
    for task in &summary {
        let marker = if task.is_overdue(now) { "!" } else { " " };
        println!(
            "{marker} [{}] {}{}",
            task.priority.as_str(),
            task.title,
            task.due_date
                .as_deref()
                .map(|due| format!(" (due {due})"))
                .unwrap_or_default()
        );
    }
    Ok(())
}
