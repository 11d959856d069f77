use chrono::{Datelike, NaiveDate, NaiveTime, TimeZone, Utc};
use clap::Subcommand;
use serde::Serialize;
use wardrobe_core::{ApplicationError, OutfitId, WearHistoryEntry, WearHistoryId};

use crate::commands::{with_application, CommandResult};

const COMMAND: &str = "history";

#[derive(Debug, Subcommand)]
pub enum HistoryCommand {
    #[command(about = "List wear events, newest first")]
    List {
        #[arg(long)]
        limit: Option<usize>,
    },
    #[command(about = "Delete one wear event")]
    Delete { id: String },
    #[command(about = "Delete every wear event")]
    Clear,
    #[command(about = "Wear events between two days, both inclusive")]
    Range {
        #[arg(long, help = "First day (YYYY-MM-DD, UTC)")]
        from: NaiveDate,
        #[arg(long, help = "Last day (YYYY-MM-DD, UTC)")]
        to: NaiveDate,
    },
    #[command(about = "How many times an outfit has been worn")]
    Count { outfit_id: String },
    #[command(about = "Month view of wear events")]
    Calendar {
        #[arg(long)]
        year: Option<i32>,
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
        month: Option<u32>,
    },
}

#[derive(Debug, Serialize)]
struct HistoryListing {
    total: usize,
    entries: Vec<WearHistoryEntry>,
}

pub fn run(command: HistoryCommand) -> CommandResult {
    with_application(COMMAND, |app| async move {
        let history = &app.services.history;

        match command {
            HistoryCommand::List { limit } => {
                let mut entries = history.list_all().await;
                let total = entries.len();
                if let Some(limit) = limit {
                    entries.truncate(limit);
                }
                CommandResult::success_with_data(
                    COMMAND,
                    format!("{total} wear events"),
                    &HistoryListing { total, entries },
                )
            }
            HistoryCommand::Delete { id } => {
                let id = WearHistoryId(id.trim().to_string());
                let removed = history.delete_entry(&id).await;
                let message = if removed {
                    format!("deleted wear event `{}`", id.0)
                } else {
                    format!("no wear event `{}`; history unchanged", id.0)
                };
                CommandResult::success_with_data(
                    COMMAND,
                    message,
                    &serde_json::json!({ "id": id, "removed": removed }),
                )
            }
            HistoryCommand::Clear => {
                history.clear_all().await;
                CommandResult::success(COMMAND, "history cleared")
            }
            HistoryCommand::Range { from, to } => {
                if from > to {
                    return CommandResult::from_error(
                        COMMAND,
                        &ApplicationError::InvalidInput(format!(
                            "--from {from} is after --to {to}"
                        )),
                    );
                }
                let Some(end_of_day) = to.and_hms_nano_opt(23, 59, 59, 999_999_999) else {
                    return CommandResult::from_error(
                        COMMAND,
                        &ApplicationError::InvalidInput(format!("--to {to} is out of range")),
                    );
                };
                let start = Utc.from_utc_datetime(&from.and_time(NaiveTime::MIN));
                let end = Utc.from_utc_datetime(&end_of_day);

                let entries = history.entries_in_range(start, end).await;
                CommandResult::success_with_data(
                    COMMAND,
                    format!("{} wear events from {from} to {to}", entries.len()),
                    &HistoryListing { total: entries.len(), entries },
                )
            }
            HistoryCommand::Count { outfit_id } => {
                let outfit_id = OutfitId(outfit_id.trim().to_string());
                let count = history.wear_count_for(&outfit_id).await;
                CommandResult::success_with_data(
                    COMMAND,
                    format!("`{outfit_id}` worn {count} times"),
                    &serde_json::json!({ "outfit_id": outfit_id, "count": count }),
                )
            }
            HistoryCommand::Calendar { year, month } => {
                let today = Utc::now().date_naive();
                let year = year.unwrap_or_else(|| today.year());
                let month = month.unwrap_or_else(|| today.month());

                match history.calendar_month(year, month).await {
                    Some(calendar) => CommandResult::success_with_data(
                        COMMAND,
                        format!(
                            "{year}-{month:02}: worn on {} of {} days",
                            calendar.worn_days(),
                            calendar.days.len()
                        ),
                        &calendar,
                    ),
                    None => CommandResult::from_error(
                        COMMAND,
                        &ApplicationError::InvalidInput(format!(
                            "{year}-{month:02} is not a calendar month"
                        )),
                    ),
                }
            }
        }
    })
}
