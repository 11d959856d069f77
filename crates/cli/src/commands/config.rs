use std::env;
use std::fs;
use std::path::Path;

use toml::Value;
use wardrobe_core::config::{resolve_config_path, AppConfig, LoadOptions};

/// A rendered config field: dotted key, primary env var and any aliases.
struct Field {
    key_path: &'static str,
    env_keys: &'static [&'static str],
    value: String,
}

pub fn run() -> String {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => return format!("config validation failed: {error}"),
    };

    let config_file_path = resolve_config_path(None);
    let config_file_doc = load_config_file_doc(config_file_path.as_deref());

    let mut lines = vec!["effective config (source precedence: env > file > default):".to_string()];
    for field in fields(&config) {
        let source = field_source(
            field.key_path,
            field.env_keys,
            config_file_doc.as_ref(),
            config_file_path.as_deref(),
        );
        lines.push(render_line(field.key_path, &field.value, source));
    }

    lines.join("\n")
}

fn fields(config: &AppConfig) -> Vec<Field> {
    vec![
        Field {
            key_path: "database.url",
            env_keys: &["WARDROBE_DATABASE_URL"],
            value: config.database.url.clone(),
        },
        Field {
            key_path: "database.max_connections",
            env_keys: &["WARDROBE_DATABASE_MAX_CONNECTIONS"],
            value: config.database.max_connections.to_string(),
        },
        Field {
            key_path: "database.timeout_secs",
            env_keys: &["WARDROBE_DATABASE_TIMEOUT_SECS"],
            value: config.database.timeout_secs.to_string(),
        },
        Field {
            key_path: "storage.namespace",
            env_keys: &["WARDROBE_STORAGE_NAMESPACE"],
            value: config.storage.namespace.clone(),
        },
        Field {
            key_path: "recommendations.min_score",
            env_keys: &["WARDROBE_RECOMMENDATIONS_MIN_SCORE"],
            value: config.recommendations.min_score.to_string(),
        },
        Field {
            key_path: "recommendations.alternatives",
            env_keys: &["WARDROBE_RECOMMENDATIONS_ALTERNATIVES"],
            value: config.recommendations.alternatives.to_string(),
        },
        Field {
            key_path: "recommendations.seed",
            env_keys: &["WARDROBE_RECOMMENDATIONS_SEED"],
            value: config
                .recommendations
                .seed
                .map(|seed| seed.to_string())
                .unwrap_or_else(|| "<unset>".to_string()),
        },
        Field {
            key_path: "logging.level",
            env_keys: &["WARDROBE_LOGGING_LEVEL", "WARDROBE_LOG_LEVEL"],
            value: config.logging.level.clone(),
        },
        Field {
            key_path: "logging.format",
            env_keys: &["WARDROBE_LOGGING_FORMAT", "WARDROBE_LOG_FORMAT"],
            value: format!("{:?}", config.logging.format),
        },
    ]
}

fn load_config_file_doc(path: Option<&Path>) -> Option<Value> {
    let path = path?;
    let raw = fs::read_to_string(path).ok()?;
    raw.parse::<Value>().ok()
}

fn field_source(
    key_path: &str,
    env_keys: &[&str],
    config_file_doc: Option<&Value>,
    config_file_path: Option<&Path>,
) -> String {
    if let Some(env_key) = env_keys.iter().find(|key| env::var_os(key).is_some()) {
        return format!("env ({env_key})");
    }

    if let Some(doc) = config_file_doc {
        if contains_path(doc, key_path) {
            let file_path = config_file_path
                .map(|path| path.display().to_string())
                .unwrap_or_else(|| "config file".to_string());
            return format!("file ({file_path})");
        }
    }

    "default".to_string()
}

fn contains_path(root: &Value, key_path: &str) -> bool {
    let mut current = root;
    for key in key_path.split('.') {
        let Some(next) = current.get(key) else {
            return false;
        };
        current = next;
    }
    true
}

fn render_line(key: &str, value: &str, source: String) -> String {
    format!("- {key} = {value} (source: {source})")
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use toml::Value;

    use super::{contains_path, field_source, render_line};

    fn doc() -> Value {
        "[storage]\nnamespace = \"closet\"\n\n[recommendations]\nmin_score = 70\n"
            .parse::<Value>()
            .expect("toml")
    }

    #[test]
    fn nested_paths_are_found() {
        let doc = doc();
        assert!(contains_path(&doc, "storage.namespace"));
        assert!(contains_path(&doc, "recommendations.min_score"));
        assert!(!contains_path(&doc, "recommendations.seed"));
        assert!(!contains_path(&doc, "database.url"));
    }

    #[test]
    fn file_keys_are_attributed_to_the_file() {
        let doc = doc();
        let source = field_source(
            "storage.namespace",
            &["WARDROBE_CONFIG_TEST_NEVER_SET"],
            Some(&doc),
            Some(Path::new("wardrobe.toml")),
        );
        assert_eq!(source, "file (wardrobe.toml)");

        let source = field_source(
            "database.url",
            &["WARDROBE_CONFIG_TEST_NEVER_SET"],
            Some(&doc),
            Some(Path::new("wardrobe.toml")),
        );
        assert_eq!(source, "default");
    }

    #[test]
    fn lines_carry_key_value_and_source() {
        assert_eq!(
            render_line("storage.namespace", "closet", "default".to_string()),
            "- storage.namespace = closet (source: default)"
        );
    }
}
