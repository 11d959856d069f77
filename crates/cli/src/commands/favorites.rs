use clap::Subcommand;

use crate::commands::{resolve_outfit, with_application, CommandResult};

const COMMAND: &str = "favorite";

#[derive(Debug, Subcommand)]
pub enum FavoriteCommand {
    #[command(about = "Mark an outfit as a favorite")]
    Add { outfit_id: String },
    #[command(about = "Remove an outfit from favorites")]
    Remove { outfit_id: String },
    #[command(about = "List favorite outfits")]
    List,
}

pub fn run(command: FavoriteCommand) -> CommandResult {
    with_application(COMMAND, |app| async move {
        let outfits = &app.services.outfits;

        let (outfit_id, favorite) = match command {
            FavoriteCommand::List => {
                let favorites = outfits.favorite_outfits().await;
                return CommandResult::success_with_data(
                    COMMAND,
                    format!("{} favorite outfits", favorites.len()),
                    &favorites,
                );
            }
            FavoriteCommand::Add { outfit_id } => (outfit_id, true),
            FavoriteCommand::Remove { outfit_id } => (outfit_id, false),
        };

        let outfit = match resolve_outfit(&app, &outfit_id, app.current_week()).await {
            Ok(outfit) => outfit,
            Err(error) => return CommandResult::from_error(COMMAND, &error),
        };
        let outfit = outfits.set_favorite(&outfit, favorite).await;

        let verb = if favorite { "added to" } else { "removed from" };
        CommandResult::success_with_data(
            COMMAND,
            format!("{} {verb} favorites", outfit.display_name()),
            &outfit,
        )
    })
}
