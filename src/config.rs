use crate::keymap::Keymap;
use crate::steem::{DEFAULT_LOOKUP_LIMIT, DEFAULT_RPC_URL};
use crate::styles::ThemeType;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Steem API node used for lookups and logins
    #[serde(default = "default_rpc_url")]
    pub rpc_url: String,
    /// Page opened by the "Sign Up" action
    #[serde(default = "default_signup_url")]
    pub signup_url: String,
    /// SteemConnect authorization endpoint
    #[serde(default = "default_steemconnect_url")]
    pub steemconnect_url: String,
    #[serde(default = "default_steemconnect_client_id")]
    pub steemconnect_client_id: String,
    /// Timeout for every RPC request, in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Names requested per username lookup
    #[serde(default = "default_lookup_limit")]
    pub lookup_limit: u32,
    #[serde(default)]
    pub theme: ThemeType,
    #[serde(default)]
    pub keymap: Keymap,
    /// Where logged-in accounts are kept (default: next to the config file)
    #[serde(default)]
    pub accounts_path: Option<PathBuf>,
}

fn default_rpc_url() -> String {
    DEFAULT_RPC_URL.to_string()
}

fn default_signup_url() -> String {
    "https://signup.steemit.com/?ref=esteem".to_string()
}

fn default_steemconnect_url() -> String {
    "https://steemconnect.com/oauth2/authorize".to_string()
}

fn default_steemconnect_client_id() -> String {
    "esteem-app".to_string()
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_lookup_limit() -> u32 {
    DEFAULT_LOOKUP_LIMIT
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rpc_url: default_rpc_url(),
            signup_url: default_signup_url(),
            steemconnect_url: default_steemconnect_url(),
            steemconnect_client_id: default_steemconnect_client_id(),
            request_timeout_secs: default_request_timeout_secs(),
            lookup_limit: default_lookup_limit(),
            theme: ThemeType::default(),
            keymap: Keymap::default(),
            accounts_path: None,
        }
    }
}

impl Config {
    /// Load configuration from file, writing the defaults when it is missing
    pub fn load_or_create(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)
                .with_context(|| format!("Failed to read config file: {:?}", config_path))?;
            let mut config: Config =
                toml::from_str(&content).with_context(|| "Failed to parse config file")?;

            if config.rpc_url.trim().is_empty() {
                config.rpc_url = default_rpc_url();
            }
            if config.request_timeout_secs == 0 {
                config.request_timeout_secs = default_request_timeout_secs();
            }

            Ok(config)
        } else {
            let config = Self::default();
            config.save(config_path)?;
            Ok(config)
        }
    }

    /// Save configuration to file with owner-only permissions
    pub fn save(&self, config_path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).with_context(|| "Failed to serialize config")?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }

        std::fs::write(config_path, content)
            .with_context(|| format!("Failed to write config file: {:?}", config_path))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = std::fs::metadata(config_path)
                .with_context(|| format!("Failed to get file metadata: {:?}", config_path))?
                .permissions();
            perms.set_mode(0o600);
            std::fs::set_permissions(config_path, perms)
                .with_context(|| format!("Failed to set file permissions: {:?}", config_path))?;
        }

        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Account store location: the configured path, or `accounts.json`
    /// beside the config file.
    pub fn resolve_accounts_path(&self, config_path: &Path) -> PathBuf {
        match &self.accounts_path {
            Some(path) => crate::utils::expand_path(&path.to_string_lossy()),
            None => config_path
                .parent()
                .map(|dir| dir.join("accounts.json"))
                .unwrap_or_else(crate::utils::get_accounts_path),
        }
    }

    /// Delegated authorization URL opened by the SteemConnect screen
    pub fn steemconnect_authorize_url(&self) -> Result<String> {
        let url = reqwest::Url::parse_with_params(
            &self.steemconnect_url,
            &[
                ("client_id", self.steemconnect_client_id.as_str()),
                ("response_type", "token"),
                ("scope", "vote,comment"),
            ],
        )
        .with_context(|| format!("Invalid steemconnect_url: {}", self.steemconnect_url))?;
        Ok(url.into())
    }

    /// Theme to use, with `NO_COLOR` taking precedence over the file
    pub fn effective_theme(&self) -> ThemeType {
        if std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty()) {
            ThemeType::NoColor
        } else {
            self.theme
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keymap::KeymapPreset;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_created_with_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("esteem").join("config.toml");
        let config = Config::load_or_create(&path).unwrap();
        assert_eq!(config, Config::default());
        assert!(path.exists());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "rpc_url = \"https://anyx.io\"\nlookup_limit = 5\n").unwrap();
        let config = Config::load_or_create(&path).unwrap();
        assert_eq!(config.rpc_url, "https://anyx.io");
        assert_eq!(config.lookup_limit, 5);
        assert_eq!(config.signup_url, "https://signup.steemit.com/?ref=esteem");
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_blank_values_are_repaired() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "rpc_url = \"\"\nrequest_timeout_secs = 0\n").unwrap();
        let config = Config::load_or_create(&path).unwrap();
        assert_eq!(config.rpc_url, DEFAULT_RPC_URL);
        assert_eq!(config.request_timeout_secs, 10);
    }

    #[test]
    fn test_save_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        let mut config = Config::default();
        config.theme = ThemeType::Light;
        config.keymap.preset = KeymapPreset::Emacs;
        config.save(&path).unwrap();

        let loaded = Config::load_or_create(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[cfg(unix)]
    #[test]
    fn test_save_sets_owner_only_permissions() {
        use std::os::unix::fs::PermissionsExt;
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        Config::default().save(&path).unwrap();
        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn test_accounts_path_resolution() {
        let config_path = Path::new("/tmp/esteem/config.toml");
        let config = Config::default();
        assert_eq!(
            config.resolve_accounts_path(config_path),
            PathBuf::from("/tmp/esteem/accounts.json")
        );

        let config = Config {
            accounts_path: Some(PathBuf::from("/srv/accounts.json")),
            ..Config::default()
        };
        assert_eq!(
            config.resolve_accounts_path(config_path),
            PathBuf::from("/srv/accounts.json")
        );
    }

    #[test]
    fn test_authorize_url() {
        let url = Config::default().steemconnect_authorize_url().unwrap();
        assert!(url.starts_with("https://steemconnect.com/oauth2/authorize?client_id=esteem-app"));
        assert!(url.contains("response_type=token"));
    }

    #[test]
    fn test_authorize_url_encodes_client_id() {
        let config = Config {
            steemconnect_client_id: "my app&scope=owner".to_string(),
            ..Config::default()
        };
        let url = config.steemconnect_authorize_url().unwrap();
        assert!(url.contains("client_id=my+app%26scope%3Downer"));
        assert!(!url.contains("scope=owner"));

        let broken = Config {
            steemconnect_url: "not a url".to_string(),
            ..Config::default()
        };
        assert!(broken.steemconnect_authorize_url().is_err());
    }
}
