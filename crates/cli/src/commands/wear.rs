use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use clap::Args;
use wardrobe_core::WearDetails;

use crate::commands::{resolve_outfit, with_application, CommandResult};

const COMMAND: &str = "wear";

#[derive(Debug, Clone, Args)]
pub struct WearArgs {
    pub outfit_id: String,
    #[arg(long, help = "Day worn (YYYY-MM-DD, UTC); defaults to now")]
    pub date: Option<NaiveDate>,
    #[arg(long)]
    pub notes: Option<String>,
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=5))]
    pub rating: Option<u8>,
}

impl WearArgs {
    fn worn_at(&self) -> DateTime<Utc> {
        match self.date {
            Some(date) => Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN)),
            None => Utc::now(),
        }
    }

    fn details(&self) -> WearDetails {
        let mut details = WearDetails::default();
        if let Some(notes) = self.notes.as_deref().map(str::trim).filter(|notes| !notes.is_empty())
        {
            details = details.with_notes(notes);
        }
        if let Some(rating) = self.rating {
            details = details.with_rating(rating);
        }
        details
    }
}

pub fn run(args: WearArgs) -> CommandResult {
    with_application(COMMAND, |app| async move {
        let outfit = match resolve_outfit(&app, &args.outfit_id, app.current_week()).await {
            Ok(outfit) => outfit,
            Err(error) => return CommandResult::from_error(COMMAND, &error),
        };

        match app.services.outfits.mark_as_worn_with(&outfit, args.worn_at(), args.details()).await
        {
            Some(entry) => CommandResult::success_with_data(
                COMMAND,
                format!("recorded {} on {}", outfit.display_name(), entry.date.date_naive()),
                &entry,
            ),
            None => CommandResult::failure(
                COMMAND,
                "storage",
                "wear counts were updated but the history entry was dropped; see logs",
                9,
            ),
        }
    })
}
