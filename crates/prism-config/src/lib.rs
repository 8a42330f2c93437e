//! Settings accessor for prism
//!
//! Holds the active provider identifier and a string-keyed configuration
//! map per provider (`api_key`, `base_url`, `model`). This crate only
//! reads settings; writes are the responsibility of the configuration UI
//! that owns the settings file.

mod env;
mod provider;

use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;

pub use provider::ProviderId;

/// Settings for a single provider, keyed by setting name
pub type ProviderSettings = IndexMap<String, String>;

/// Application settings as read from the settings file
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Active provider identifier
    #[serde(default)]
    provider: Option<String>,
    /// Per-provider settings keyed by provider identifier
    #[serde(default)]
    providers: IndexMap<String, ProviderSettings>,
}

impl Config {
    /// Build a configuration in memory
    ///
    /// For embedding applications that manage settings storage themselves
    /// (and for tests); file-backed settings go through [`Config::load`].
    pub fn new(provider: Option<String>, providers: IndexMap<String, ProviderSettings>) -> Self {
        Self { provider, providers }
    }

    /// Load settings from a TOML file
    ///
    /// Expands `{{ env.VAR }}` placeholders in the raw text before
    /// deserializing, so secrets can live in the environment rather than
    /// on disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, a referenced
    /// environment variable is unset, or TOML parsing fails.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read settings file {}: {e}", path.display()))?;

        let expanded =
            env::expand_env(&raw).map_err(|e| anyhow::anyhow!("settings variable expansion failed: {e}"))?;

        let config: Self =
            toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse settings: {e}"))?;

        Ok(config)
    }

    /// The active provider
    ///
    /// An absent or unrecognized identifier resolves to the first-party
    /// provider, [`ProviderId::Gemini`].
    pub fn provider(&self) -> ProviderId {
        self.provider
            .as_deref()
            .and_then(ProviderId::from_identifier)
            .unwrap_or(ProviderId::Gemini)
    }

    /// Settings for the given provider, if any are configured
    pub fn provider_config(&self, id: ProviderId) -> Option<&ProviderSettings> {
        self.providers.get(id.as_str())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn write_settings(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("create temp settings file");
        file.write_all(contents.as_bytes()).expect("write settings");
        file
    }

    #[test]
    fn empty_settings_default_to_gemini() {
        let config = Config::default();
        assert_eq!(config.provider(), ProviderId::Gemini);
        assert!(config.provider_config(ProviderId::Ollama).is_none());
    }

    #[test]
    fn unknown_identifier_defaults_to_gemini() {
        let config = Config::new(Some("mystery-llm".to_owned()), IndexMap::new());
        assert_eq!(config.provider(), ProviderId::Gemini);
    }

    #[test]
    fn load_reads_provider_and_settings() {
        let file = write_settings(
            r#"
provider = "ollama"

[providers.ollama]
base_url = "http://localhost:11434"
model = "llama3"
"#,
        );

        let config = Config::load(file.path()).expect("load settings");
        assert_eq!(config.provider(), ProviderId::Ollama);

        let settings = config.provider_config(ProviderId::Ollama).expect("ollama settings");
        assert_eq!(settings.get("model").map(String::as_str), Some("llama3"));
    }

    #[test]
    fn load_expands_environment_placeholders() {
        temp_env::with_var("PRISM_TEST_KEY", Some("sk-secret"), || {
            let file = write_settings(
                r#"
provider = "openai"

[providers.openai]
api_key = "{{ env.PRISM_TEST_KEY }}"
"#,
            );

            let config = Config::load(file.path()).expect("load settings");
            let settings = config.provider_config(ProviderId::OpenAi).expect("openai settings");
            assert_eq!(settings.get("api_key").map(String::as_str), Some("sk-secret"));
        });
    }

    #[test]
    fn load_fails_on_missing_environment_variable() {
        temp_env::with_var_unset("PRISM_MISSING_KEY", || {
            let file = write_settings("provider = \"{{ env.PRISM_MISSING_KEY }}\"");
            let err = Config::load(file.path()).unwrap_err();
            assert!(err.to_string().contains("PRISM_MISSING_KEY"));
        });
    }
}
