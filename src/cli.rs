use crate::config::Config;
use crate::keymap::Keymap;
use crate::session::{AccountStore, FileAccountStore};
use crate::steem::SteemClient;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Terminal client for the Steem social platform
#[derive(Parser, Debug)]
#[command(name = "esteem", version, about, long_about = None)]
pub struct Cli {
    /// Use this config file instead of ~/.config/esteem/config.toml
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Override the Steem API node from the config file
    #[arg(long, global = true, value_name = "URL")]
    pub rpc_url: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Look up account names starting with a prefix
    Lookup {
        prefix: String,
        /// Maximum number of names to print (default: lookup_limit from config)
        #[arg(short, long)]
        limit: Option<u32>,
    },
    /// List accounts stored on this machine
    Accounts,
    /// Print the active key bindings
    Keys,
    /// Print the config file path
    ConfigPath,
}

/// Active bindings grouped by category, one "key  description" line each.
pub fn keys_report(keymap: &Keymap) -> String {
    let mut out = format!("Preset: {}\n", keymap.preset.name());
    let bindings = keymap.all_bindings();
    let mut categories: Vec<&str> = Vec::new();
    for binding in &bindings {
        let category = binding.action.category();
        if !categories.contains(&category) {
            categories.push(category);
        }
    }
    for category in categories {
        out.push_str(&format!("\n{}\n", category));
        for binding in bindings.iter().filter(|b| b.action.category() == category) {
            out.push_str(&format!("  {:<12} {}\n", binding.display(), binding.get_description()));
        }
    }
    out
}

impl Cli {
    pub fn config_path(&self) -> PathBuf {
        self.config
            .clone()
            .unwrap_or_else(crate::utils::get_config_path)
    }

    /// Load the config and apply command-line overrides.
    pub fn load_config(&self) -> Result<(Config, PathBuf)> {
        let config_path = self.config_path();
        let mut config =
            Config::load_or_create(&config_path).context("Failed to load configuration")?;
        if let Some(url) = &self.rpc_url {
            config.rpc_url.clone_from(url);
        }
        Ok((config, config_path))
    }

    /// Run a subcommand. Returns false when no subcommand was given and
    /// the TUI should start.
    pub fn execute(&self) -> Result<bool> {
        let Some(command) = &self.command else {
            return Ok(false);
        };
        match command {
            Commands::Lookup { prefix, limit } => self.cmd_lookup(prefix, *limit)?,
            Commands::Accounts => self.cmd_accounts()?,
            Commands::Keys => print!("{}", keys_report(&self.load_config()?.0.keymap)),
            Commands::ConfigPath => println!("{}", self.config_path().display()),
        }
        Ok(true)
    }

    fn cmd_lookup(&self, prefix: &str, limit: Option<u32>) -> Result<()> {
        let (config, _) = self.load_config()?;
        let client = SteemClient::new(config.rpc_url.clone(), config.request_timeout())?;
        let limit = limit.unwrap_or(config.lookup_limit).max(1);

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .context("Failed to create tokio runtime")?;
        let names = runtime.block_on(client.lookup_accounts(prefix, limit))?;

        if names.is_empty() {
            println!("No accounts found.");
        }
        for name in &names {
            let marker = if name == prefix { "*" } else { " " };
            println!("{} {}", marker, name);
        }
        Ok(())
    }

    fn cmd_accounts(&self) -> Result<()> {
        let (config, config_path) = self.load_config()?;
        let store = FileAccountStore::open(config.resolve_accounts_path(&config_path))?;
        let accounts = store.accounts();
        if accounts.is_empty() {
            println!("No accounts stored.");
            return Ok(());
        }
        for account in accounts {
            println!(
                "@{:<16} {:?}  {}",
                account.username,
                account.auth_type,
                account.logged_in_at.format("%Y-%m-%d %H:%M")
            );
        }
        Ok(())
    }
}
