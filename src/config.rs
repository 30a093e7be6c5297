// ============================================================================
// Configuration du client
// ============================================================================
// Charge la clé API, l'URL de base et le fichier de sortie depuis :
// 1. un fichier JSON (ycharts.json ou config/ycharts.json)
// 2. les variables d'environnement (prioritaires sur le fichier)
//
// CONCEPTS RUST :
// 1. #[serde(default = "...")] : valeur par défaut si le champ est absent
// 2. AsRef<Path> : accepte &str, String, PathBuf, ...
// 3. Closures : la lecture de l'environnement est injectable pour les tests
// ============================================================================

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// URL de base de l'API YCharts v3
pub const DEFAULT_BASE_URL: &str = "https://ycharts.com/api/v3/";

/// Fichier de sortie du programme de démonstration
pub const DEFAULT_OUTPUT_PATH: &str = "ycharts_client_output.txt";

/// Variables d'environnement reconnues
pub const ENV_API_KEY: &str = "YCHARTS_API_KEY";
pub const ENV_BASE_URL: &str = "YCHARTS_BASE_URL";
pub const ENV_OUTPUT: &str = "YCHARTS_OUTPUT";

/// Fichiers de configuration essayés dans l'ordre
const CONFIG_PATHS: [&str; 2] = ["ycharts.json", "config/ycharts.json"];

/// Configuration du client YCharts
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Clé API (voir https://ycharts.com/accounts/my_account)
    #[serde(default)]
    pub api_key: String,

    /// URL de base, doit pointer sur la racine /api/v3/
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Fichier où le binaire écrit les trois réponses
    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_output_path() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_PATH)
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_base_url(),
            output_path: default_output_path(),
        }
    }
}

// La clé API ne doit jamais apparaître dans les logs
impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("output_path", &self.output_path)
            .finish()
    }
}

impl ClientConfig {
    /// Charge la configuration depuis un fichier JSON
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Échec de la lecture de {}", path.display()))?;
        let config: ClientConfig = serde_json::from_str(&content)
            .with_context(|| format!("Fichier de configuration invalide : {}", path.display()))?;
        Ok(config)
    }

    /// Charge la configuration : fichier s'il existe, puis environnement
    ///
    /// Un fichier illisible n'est pas fatal : on logge et on continue
    /// avec les valeurs par défaut.
    pub fn load() -> Self {
        let mut config = Self::load_file().unwrap_or_default();
        config.apply_env(|key| std::env::var(key).ok());

        if config.api_key.is_empty() {
            warn!(env = ENV_API_KEY, "No API key configured, requests will be rejected");
        }
        debug!(?config, "Configuration loaded");
        config
    }

    fn load_file() -> Option<Self> {
        for path in CONFIG_PATHS {
            if !Path::new(path).exists() {
                continue;
            }
            match Self::from_file(path) {
                Ok(config) => {
                    info!(path, "Loaded configuration file");
                    return Some(config);
                }
                Err(e) => {
                    warn!(path, error = ?e, "Failed to load configuration file");
                }
            }
        }
        info!("Using default configuration");
        None
    }

    /// Applique les surcharges d'environnement
    ///
    /// CONCEPT RUST : Fn(&str) -> Option<String>
    /// - `lookup` abstrait std::env::var pour pouvoir tester sans
    ///   modifier l'environnement du processus
    /// - Les valeurs vides sont ignorées
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.is_empty());

        if let Some(key) = get(ENV_API_KEY) {
            self.api_key = key;
        }
        if let Some(url) = get(ENV_BASE_URL) {
            self.base_url = url;
        }
        if let Some(output) = get(ENV_OUTPUT) {
            self.output_path = PathBuf::from(output);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn temp_config_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("ycharts_client_{}_{}.json", name, std::process::id()))
    }

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.api_key, "");
        assert_eq!(config.base_url, "https://ycharts.com/api/v3/");
        assert_eq!(config.output_path, PathBuf::from(DEFAULT_OUTPUT_PATH));
    }

    #[test]
    fn test_apply_env_overrides() {
        let vars: HashMap<&str, &str> = [
            (ENV_API_KEY, "secret"),
            (ENV_BASE_URL, "http://localhost:8080/api/v3/"),
        ]
        .into_iter()
        .collect();

        let mut config = ClientConfig::default();
        config.apply_env(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.api_key, "secret");
        assert_eq!(config.base_url, "http://localhost:8080/api/v3/");
        // Pas de variable : valeur par défaut conservée
        assert_eq!(config.output_path, PathBuf::from(DEFAULT_OUTPUT_PATH));
    }

    #[test]
    fn test_apply_env_ignores_empty_values() {
        let mut config = ClientConfig::default();
        config.api_key = "from-file".to_string();
        config.apply_env(|_| Some(String::new()));

        assert_eq!(config.api_key, "from-file");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_from_file_partial() {
        let path = temp_config_path("partial");
        fs::write(&path, r#"{ "api_key": "abc123" }"#).unwrap();

        let config = ClientConfig::from_file(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(config.api_key, "abc123");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_env_takes_priority_over_file() {
        let path = temp_config_path("priority");
        fs::write(&path, r#"{ "api_key": "from-file", "output_path": "file.txt" }"#).unwrap();

        let mut config = ClientConfig::from_file(&path).unwrap();
        fs::remove_file(&path).ok();
        config.apply_env(|key| (key == ENV_API_KEY).then(|| "from-env".to_string()));

        assert_eq!(config.api_key, "from-env");
        assert_eq!(config.output_path, PathBuf::from("file.txt"));
    }

    #[test]
    fn test_from_file_invalid_json() {
        let path = temp_config_path("invalid");
        fs::write(&path, "not json").unwrap();

        let result = ClientConfig::from_file(&path);
        fs::remove_file(&path).ok();

        assert!(result.is_err());
    }

    #[test]
    fn test_from_file_missing() {
        let result = ClientConfig::from_file("/nonexistent/ycharts.json");
        assert!(result.is_err());
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let mut config = ClientConfig::default();
        config.api_key = "super-secret".to_string();

        let debug = format!("{:?}", config);
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("<redacted>"));
    }
}
