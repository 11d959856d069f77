use wardrobe_core::WardrobeExport;

use crate::commands::{with_application, CommandResult};

const COMMAND: &str = "export";

/// Prints the full snapshot. Nothing is written back.
pub fn run() -> CommandResult {
    with_application(COMMAND, |app| async move {
        let export = WardrobeExport::collect(&app.services, app.current_week()).await;
        CommandResult::success_with_data(
            COMMAND,
            format!(
                "exported {} items, {} wear events, {} favorites",
                export.catalog.len(),
                export.history.len(),
                export.favorites.len()
            ),
            &export,
        )
    })
}
