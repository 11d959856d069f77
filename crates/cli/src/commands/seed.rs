use serde::Serialize;
use wardrobe_db::{DemoWardrobe, VerificationResult};

use crate::commands::{with_application, CommandResult};

const COMMAND: &str = "seed";

#[derive(Debug, Serialize)]
struct SeedOutput {
    newly_added: usize,
    items: Vec<SeedOutputItem>,
}

#[derive(Debug, Serialize)]
struct SeedOutputItem {
    id: &'static str,
    name: &'static str,
    category: &'static str,
}

/// Loads the demo wardrobe and checks that every demo item landed.
pub fn run() -> CommandResult {
    with_application(COMMAND, |app| async move {
        let keys = app.config.storage_keys();
        let store = app.store.as_ref();

        let seeded = match DemoWardrobe::load(store, &keys).await {
            Ok(seeded) => seeded,
            Err(error) => return CommandResult::failure(COMMAND, "storage", error.to_string(), 9),
        };

        match DemoWardrobe::verify(store, &keys).await {
            Ok(verification) if verification.all_present => {}
            Ok(verification) => {
                return CommandResult::failure(
                    COMMAND,
                    "seed_verification",
                    verification_failure_message(&verification),
                    6,
                )
            }
            Err(error) => {
                return CommandResult::failure(COMMAND, "seed_verification", error.to_string(), 6)
            }
        }

        let output = SeedOutput {
            newly_added: seeded.newly_added,
            items: seeded
                .items_seeded
                .iter()
                .map(|item| SeedOutputItem {
                    id: item.id,
                    name: item.name,
                    category: item.category.as_str(),
                })
                .collect(),
        };
        let message = format!(
            "demo wardrobe ready: {} items, {} newly added",
            output.items.len(),
            output.newly_added
        );
        CommandResult::success_with_data(COMMAND, message, &output)
    })
}

fn verification_failure_message(verification: &VerificationResult) -> String {
    let missing = verification
        .checks
        .iter()
        .filter_map(|(check, present)| (!present).then_some(*check))
        .collect::<Vec<_>>();

    if missing.is_empty() {
        "some demo items failed to load".to_string()
    } else {
        format!("demo items missing after seeding: {}", missing.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use wardrobe_db::VerificationResult;

    use super::verification_failure_message;

    #[test]
    fn failure_message_names_missing_items() {
        let verification = VerificationResult {
            all_present: false,
            checks: vec![
                ("demo-shirt-oxford", true),
                ("demo-pant-jeans", false),
                ("demo-pant-shorts", false),
            ],
        };

        assert_eq!(
            verification_failure_message(&verification),
            "demo items missing after seeding: demo-pant-jeans, demo-pant-shorts"
        );
    }

    #[test]
    fn failure_message_falls_back_without_labels() {
        let verification = VerificationResult {
            all_present: false,
            checks: vec![("demo-shirt-oxford", true)],
        };

        assert_eq!(verification_failure_message(&verification), "some demo items failed to load");
    }
}
