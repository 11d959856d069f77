use std::sync::Arc;

use thiserror::Error;
use tracing::info;
use wardrobe_core::config::{AppConfig, ConfigError, LoadOptions};
use wardrobe_core::random::{RandomSource, SeededRandom, ThreadRandom};
use wardrobe_core::suggestions::RecommendationEngine;
use wardrobe_core::{current_week_number, WardrobeServices};
use wardrobe_db::{connect_with_settings, migrations, SqlKeyValueStore};

pub struct Application {
    pub config: AppConfig,
    pub store: Arc<SqlKeyValueStore>,
    pub services: WardrobeServices,
}

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("database connection failed: {0}")]
    DatabaseConnect(#[source] sqlx::Error),
    #[error("database migration failed: {0}")]
    Migration(#[source] sqlx::migrate::MigrateError),
}

impl BootstrapError {
    pub fn error_class(&self) -> &'static str {
        match self {
            Self::Config(_) => "config_validation",
            Self::DatabaseConnect(_) => "db_connectivity",
            Self::Migration(_) => "migration",
        }
    }

    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Config(_) => 2,
            Self::DatabaseConnect(_) => 4,
            Self::Migration(_) => 5,
        }
    }
}

impl Application {
    pub fn current_week(&self) -> u32 {
        current_week_number()
    }
}

pub async fn bootstrap(options: LoadOptions) -> Result<Application, BootstrapError> {
    let config = AppConfig::load(options)?;
    bootstrap_with_config(config).await
}

/// Connects, migrates and wires the services for an already loaded config.
pub async fn bootstrap_with_config(config: AppConfig) -> Result<Application, BootstrapError> {
    let pool = connect_with_settings(
        &config.database.url,
        config.database.max_connections,
        config.database.timeout_secs,
    )
    .await
    .map_err(BootstrapError::DatabaseConnect)?;
    info!(event_name = "system.bootstrap.database_connected", "database connection established");

    migrations::run_pending(&pool).await.map_err(BootstrapError::Migration)?;
    info!(event_name = "system.bootstrap.migrations_applied", "database migrations applied");

    let store = Arc::new(SqlKeyValueStore::new(pool));
    let mut services =
        WardrobeServices::new(store.clone(), config.storage_keys(), recommendation_engine(&config));
    services.outfits = services.outfits.with_alternatives(config.recommendations.alternatives);

    Ok(Application { config, store, services })
}

pub fn recommendation_engine(config: &AppConfig) -> RecommendationEngine {
    let random: Arc<dyn RandomSource> = match config.recommendations.seed {
        Some(seed) => Arc::new(SeededRandom::new(seed)),
        None => Arc::new(ThreadRandom),
    };
    RecommendationEngine::with_random(random).with_min_score(config.recommendations.min_score)
}

#[cfg(test)]
mod tests {
    use wardrobe_core::config::{AppConfig, ConfigOverrides, LoadOptions};

    use super::{bootstrap_with_config, recommendation_engine, BootstrapError};

    fn memory_config() -> AppConfig {
        let mut config = AppConfig::default();
        config.database.url = "sqlite::memory:".to_string();
        config.database.max_connections = 1;
        config
    }

    #[tokio::test]
    async fn bootstrap_wires_services_against_migrated_store() {
        let app = bootstrap_with_config(memory_config()).await.expect("bootstrap");

        assert!(app.services.catalog.list().await.is_empty());
        assert!(app.current_week() >= 1);
        app.store.pool().close().await;
    }

    #[test]
    fn engine_honours_configured_threshold() {
        let mut config = AppConfig::default();
        config.recommendations.min_score = 90;
        config.recommendations.seed = Some(7);

        assert_eq!(recommendation_engine(&config).min_score(), 90);
    }

    #[test]
    fn bootstrap_errors_map_to_stable_classes() {
        let error = BootstrapError::from(
            AppConfig::load(LoadOptions {
                overrides: ConfigOverrides {
                    database_url: Some("mysql://nope".to_string()),
                    ..ConfigOverrides::default()
                },
                ..LoadOptions::default()
            })
            .expect_err("mysql urls are rejected"),
        );

        assert_eq!(error.error_class(), "config_validation");
        assert_eq!(error.exit_code(), 2);
    }
}
