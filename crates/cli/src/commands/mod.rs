pub mod config;
pub mod doctor;
pub mod export;
pub mod favorites;
pub mod history;
pub mod items;
pub mod migrate;
pub mod seed;
pub mod suggest;
pub mod wear;
pub mod weekly;

use std::future::Future;

use serde::Serialize;
use serde_json::Value;
use wardrobe_core::config::LoadOptions;
use wardrobe_core::{ApplicationError, Outfit, OutfitId};

use crate::bootstrap::{bootstrap, Application};

#[derive(Debug, Clone)]
pub struct CommandResult {
    pub exit_code: u8,
    pub output: String,
}

#[derive(Debug, Serialize)]
struct CommandOutcome {
    command: String,
    status: String,
    error_class: Option<String>,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<Value>,
}

impl CommandResult {
    pub fn success(command: &str, message: impl Into<String>) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "ok".to_string(),
            error_class: None,
            message: message.into(),
            data: None,
        };
        Self { exit_code: 0, output: serialize_payload(payload) }
    }

    /// Success carrying a structured payload under `data`.
    pub fn success_with_data(
        command: &str,
        message: impl Into<String>,
        data: &impl Serialize,
    ) -> Self {
        let data = match serde_json::to_value(data) {
            Ok(data) => data,
            Err(error) => {
                return Self::failure(
                    command,
                    "serialization",
                    format!("failed to serialize command output: {error}"),
                    10,
                )
            }
        };

        let payload = CommandOutcome {
            command: command.to_string(),
            status: "ok".to_string(),
            error_class: None,
            message: message.into(),
            data: Some(data),
        };
        Self { exit_code: 0, output: serialize_payload(payload) }
    }

    pub fn failure(
        command: &str,
        error_class: &str,
        message: impl Into<String>,
        exit_code: u8,
    ) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "error".to_string(),
            error_class: Some(error_class.to_string()),
            message: message.into(),
            data: None,
        };
        Self { exit_code, output: serialize_payload(payload) }
    }

    pub fn from_error(command: &str, error: &ApplicationError) -> Self {
        let exit_code = match error {
            ApplicationError::Configuration(_) => 2,
            ApplicationError::NotFound { .. } => 7,
            ApplicationError::InvalidInput(_) => 8,
            ApplicationError::Storage(_) => 9,
        };
        Self::failure(command, error.error_class(), error.to_string(), exit_code)
    }
}

/// Builds a single-threaded runtime, bootstraps the application from the
/// default config sources, runs `action` and closes the pool.
pub(crate) fn with_application<F, Fut>(command: &str, action: F) -> CommandResult
where
    F: FnOnce(Application) -> Fut,
    Fut: Future<Output = CommandResult>,
{
    let runtime = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(error) => {
            return CommandResult::failure(
                command,
                "runtime_init",
                format!("failed to initialize async runtime: {error}"),
                3,
            );
        }
    };

    runtime.block_on(async {
        let app = match bootstrap(LoadOptions::default()).await {
            Ok(app) => app,
            Err(error) => {
                return CommandResult::failure(
                    command,
                    error.error_class(),
                    error.to_string(),
                    error.exit_code(),
                );
            }
        };

        let pool = app.store.pool().clone();
        let result = action(app).await;
        pool.close().await;
        result
    })
}

/// Looks an outfit id up among the current suggestions, then favorites, then
/// the saved pick for `week`.
pub(crate) async fn resolve_outfit(
    app: &Application,
    raw_id: &str,
    week: u32,
) -> Result<Outfit, ApplicationError> {
    let id = OutfitId(raw_id.trim().to_string());
    app.services
        .outfits
        .find_outfit(&id, week)
        .await
        .ok_or(ApplicationError::NotFound { kind: "outfit", id: id.0 })
}

fn serialize_payload(payload: CommandOutcome) -> String {
    serde_json::to_string(&payload).unwrap_or_else(|error| {
        format!(
            "{{\"command\":\"unknown\",\"status\":\"error\",\"error_class\":\"serialization\",\"message\":\"{}\"}}",
            error.to_string().replace('\\', "\\\\").replace('"', "\\\"")
        )
    })
}
