use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};

use dayplan::core::TasksService;
use dayplan::model::{due_at, NewTask, Priority, TaskStatus};
use dayplan::{AppConfig, DesktopOptions};

/// Day planner with a drag-driven schedule grid.
#[derive(Debug, Parser)]
#[command(name = "dayplan", version, about)]
struct Cli {
    /// Directory holding the task database and constraint file.
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Launch the desktop schedule grid (the default).
    Desktop {
        /// Seconds between background day refreshes.
        #[arg(long, default_value_t = 5)]
        refresh_interval: u64,
    },
    /// Add a task from the command line.
    Add {
        title: String,
        #[arg(long, default_value = "")]
        subject: String,
        /// Due day, YYYY-MM-DD; defaults to today.
        #[arg(long)]
        day: Option<NaiveDate>,
        /// Hour of the day (0-23); omit to let the grid place the task.
        #[arg(long)]
        hour: Option<u8>,
        /// Estimated duration in minutes.
        #[arg(long)]
        minutes: Option<u32>,
        #[arg(long, value_enum, default_value_t = Priority::Medium)]
        priority: Priority,
        #[arg(long, value_enum, default_value_t = TaskStatus::Pending)]
        status: TaskStatus,
    },
    /// List the tasks due on a day.
    List {
        /// Day to list, YYYY-MM-DD; defaults to today.
        #[arg(long)]
        day: Option<NaiveDate>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        None => run_desktop(cli.data_dir, 5),
        Some(Command::Desktop { refresh_interval }) => run_desktop(cli.data_dir, refresh_interval),
        Some(Command::Add {
            title,
            subject,
            day,
            hour,
            minutes,
            priority,
            status,
        }) => {
            let service = open_service(cli.data_dir)?;
            let day = day.unwrap_or_else(|| Utc::now().date_naive());
            let due = due_at(day, hour.unwrap_or(0));
            let task = NewTask {
                title,
                subject,
                due_date: due,
                estimated_minutes: minutes,
                status,
                priority,
            };
            let created = service.create(task.into_insertable())?;
            println!("added {} ({})", created.title, created.id);
            Ok(())
        }
        Some(Command::List { day }) => {
            let service = open_service(cli.data_dir)?;
            let day = day.unwrap_or_else(|| Utc::now().date_naive());
            let snapshot = service.day_snapshot(day)?;
            if snapshot.tasks.is_empty() {
                println!("no tasks due {day}");
                return Ok(());
            }
            for task in &snapshot.tasks {
                let hour = if task.has_explicit_hour() {
                    format!("{}", task.due_date.format("%H:%M"))
                } else {
                    "--:--".to_string()
                };
                println!(
                    "{hour}  [{}] {}  {} ({})",
                    task.priority, task.title, task.subject, task.status
                );
            }
            Ok(())
        }
    }
}

fn run_desktop(data_dir: Option<PathBuf>, refresh_interval: u64) -> Result<()> {
    let options = DesktopOptions {
        data_dir,
        refresh_interval: Duration::from_secs(refresh_interval),
    };
    dayplan::desktop::run(options)?;
    Ok(())
}

fn open_service(data_dir: Option<PathBuf>) -> Result<TasksService> {
    let config = AppConfig::discover(data_dir)?;
    TasksService::new(config)
}
