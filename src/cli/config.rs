use std::path::Path;

use reqtract::Config;
use tracing::instrument;

use crate::cli::terminal::Colorize;

/// The keys `config get` and `config set` accept.
const KEYS: [&str; 7] = [
    "id_prefix",
    "digits",
    "functional_keywords",
    "non_functional_keywords",
    "whole_words",
    "segmenter",
    "model",
];

#[derive(Debug, clap::Parser)]
/// Show or modify configuration
///
/// Configuration is stored in config.toml inside the root directory.
///
/// Available configuration keys:
///   `id_prefix`                Prefix of assigned identifiers (default: FR)
///   digits                     Minimum digits in identifiers (default: 1)
///   `functional_keywords`      Comma-separated functional keywords
///   `non_functional_keywords`  Comma-separated non-functional keywords
///   `whole_words`              Match keywords as whole words (default: false)
///   segmenter                  linguistic (default) or fallback
///   model                      Path to a segmentation model, relative to the
///                              root (empty for the built-in model)
pub struct Command {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Debug, clap::Parser)]
enum ConfigCommand {
    /// Show all configuration values
    Show,

    /// Get a specific configuration value
    Get {
        /// Configuration key to retrieve
        key: String,
    },

    /// Set a configuration value
    ///
    /// Examples:
    ///   reqx config set digits 3
    ///   reqx config set `functional_keywords` must,shall,will
    Set {
        /// Configuration key to set
        key: String,

        /// Value to set
        value: String,
    },
}

impl Command {
    #[instrument]
    pub fn run(self, config_path: &Path) -> anyhow::Result<()> {
        match self.command {
            ConfigCommand::Show => Self::show_config(config_path),
            ConfigCommand::Get { key } => Self::get_config(config_path, &key),
            ConfigCommand::Set { key, value } => Self::set_config(config_path, &key, &value),
        }
    }

    fn load(config_path: &Path) -> anyhow::Result<Config> {
        if config_path.exists() {
            Config::load(config_path).map_err(|e| anyhow::anyhow!("{e}"))
        } else {
            Ok(Config::default())
        }
    }

    fn show_config(config_path: &Path) -> anyhow::Result<()> {
        let config = Self::load(config_path)?;

        println!("Configuration:");
        for key in KEYS {
            let value = value_of(&config, key).unwrap_or_default();
            if value.is_empty() {
                println!("  {key}: {}", "(built-in)".dim());
            } else {
                println!("  {key}: {value}");
            }
        }
        Ok(())
    }

    fn get_config(config_path: &Path, key: &str) -> anyhow::Result<()> {
        let config = Self::load(config_path)?;

        let Some(value) = value_of(&config, key) else {
            anyhow::bail!(
                "Unknown configuration key: '{key}'\n\nAvailable keys:\n  {}",
                KEYS.join("\n  ")
            );
        };
        println!("{value}");
        Ok(())
    }

    fn set_config(config_path: &Path, key: &str, value: &str) -> anyhow::Result<()> {
        let mut config = Self::load(config_path)?;

        config.set(key, value).map_err(|e| anyhow::anyhow!("{e}"))?;
        config
            .save(config_path)
            .map_err(|e| anyhow::anyhow!("{e}"))?;

        let current = value_of(&config, key).unwrap_or_default();
        println!("{}", format!("{key} = {current}").success());
        Ok(())
    }
}

/// The string form of a configuration value, as `config set` accepts it.
fn value_of(config: &Config, key: &str) -> Option<String> {
    let value = match key {
        "id_prefix" => config.id_prefix().to_string(),
        "digits" => config.digits().to_string(),
        "functional_keywords" => join(config.functional_keywords()),
        "non_functional_keywords" => join(config.non_functional_keywords()),
        "whole_words" => config.whole_words.to_string(),
        "segmenter" => config.segmenter.to_string(),
        "model" => config
            .model
            .as_ref()
            .map(|path| path.display().to_string())
            .unwrap_or_default(),
        _ => return None,
    };
    Some(value)
}

fn join(keywords: &nonempty::NonEmpty<String>) -> String {
    keywords.iter().map(String::as_str).collect::<Vec<_>>().join(",")
}
