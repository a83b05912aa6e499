use std::path::PathBuf;

/// Overrides the config directory; used by tests and portable installs
pub const CONFIG_DIR_ENV: &str = "ESTEEM_CONFIG_DIR";

pub fn get_home_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("/"))
}

/// `~/.config/esteem` on every OS, unless `ESTEEM_CONFIG_DIR` is set
pub fn get_config_dir() -> PathBuf {
    match std::env::var_os(CONFIG_DIR_ENV) {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => get_home_dir().join(".config").join("esteem"),
    }
}

pub fn get_config_path() -> PathBuf {
    get_config_dir().join("config.toml")
}

/// Default location of the local account store
pub fn get_accounts_path() -> PathBuf {
    get_config_dir().join("accounts.json")
}

/// Directory for the log file
pub fn get_log_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(get_home_dir)
        .join("esteem")
}

/// Expand a leading `~` to the home directory
pub fn expand_path(path_str: &str) -> PathBuf {
    if path_str == "~" {
        get_home_dir()
    } else if let Some(rest) = path_str.strip_prefix("~/") {
        get_home_dir().join(rest)
    } else {
        PathBuf::from(path_str)
    }
}
