use clap::Subcommand;
use wardrobe_core::ApplicationError;

use crate::commands::{resolve_outfit, with_application, CommandResult};

const COMMAND: &str = "weekly";

#[derive(Debug, Subcommand)]
pub enum WeeklyCommand {
    #[command(about = "Show the week's outfit, selecting the best match on first view")]
    Show {
        #[arg(long, help = "Week number; defaults to the current week")]
        week: Option<u32>,
    },
    #[command(about = "Replace the week's outfit with a random qualifying suggestion")]
    Regenerate {
        #[arg(long)]
        week: Option<u32>,
    },
    #[command(about = "Make a specific outfit the week's pick")]
    Pick {
        outfit_id: String,
        #[arg(long)]
        week: Option<u32>,
    },
}

pub fn run(command: WeeklyCommand) -> CommandResult {
    with_application(COMMAND, |app| async move {
        let outfits = &app.services.outfits;

        match command {
            WeeklyCommand::Show { week } => {
                let pick = outfits.load_week(week.unwrap_or_else(|| app.current_week())).await;
                let message = match (&pick.outfit, pick.newly_selected) {
                    (None, _) => format!("no outfit for week {}; add more items", pick.week),
                    (Some(outfit), true) => {
                        format!("selected {} for week {}", outfit.display_name(), pick.week)
                    }
                    (Some(outfit), false) => {
                        format!("week {} outfit: {}", pick.week, outfit.display_name())
                    }
                };
                CommandResult::success_with_data(COMMAND, message, &pick)
            }
            WeeklyCommand::Regenerate { week } => {
                let week = week.unwrap_or_else(|| app.current_week());
                match outfits.regenerate_week(week).await {
                    Some(outfit) => CommandResult::success_with_data(
                        COMMAND,
                        format!("week {week} outfit is now {}", outfit.display_name()),
                        &outfit,
                    ),
                    None => CommandResult::from_error(
                        COMMAND,
                        &ApplicationError::InvalidInput(
                            "no qualifying outfits to choose from".to_string(),
                        ),
                    ),
                }
            }
            WeeklyCommand::Pick { outfit_id, week } => {
                let week = week.unwrap_or_else(|| app.current_week());
                let outfit = match resolve_outfit(&app, &outfit_id, week).await {
                    Ok(outfit) => outfit,
                    Err(error) => return CommandResult::from_error(COMMAND, &error),
                };
                outfits.pick_for_week(week, &outfit).await;
                CommandResult::success_with_data(
                    COMMAND,
                    format!("week {week} outfit is now {}", outfit.display_name()),
                    &outfit,
                )
            }
        }
    })
}
