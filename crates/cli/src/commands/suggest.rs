use clap::Args;
use serde::Serialize;
use wardrobe_core::{Outfit, OutfitFilter};

use crate::commands::{with_application, CommandResult};

const COMMAND: &str = "suggest";

#[derive(Debug, Clone, Default, Args)]
pub struct SuggestArgs {
    #[arg(
        long,
        help = "casual | formal | party, or summer | winter for the broad season filter"
    )]
    pub occasion: Option<String>,
    #[arg(long, help = "Return at most this many outfits")]
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
struct SuggestionListing {
    filter: Option<String>,
    total: usize,
    outfits: Vec<Outfit>,
}

pub fn run(args: SuggestArgs) -> CommandResult {
    with_application(COMMAND, |app| async move {
        let outfits = &app.services.outfits;
        let mut ranked = match args.occasion.as_deref() {
            Some(tag) => outfits.suggestions_matching(&OutfitFilter::parse(tag)).await,
            None => outfits.suggestions().await,
        };

        let total = ranked.len();
        if let Some(limit) = args.limit {
            ranked.truncate(limit);
        }

        let message = match total {
            0 => "no outfit scores high enough yet; add more items".to_string(),
            1 => "1 outfit suggestion".to_string(),
            count => format!("{count} outfit suggestions"),
        };
        CommandResult::success_with_data(
            COMMAND,
            message,
            &SuggestionListing { filter: args.occasion, total, outfits: ranked },
        )
    })
}
