use clap::Parser;
use serde::Deserialize;

use crate::error::Result;

const DEFAULT_CONFIG_PATH: &str = "config/debtdesk.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Root of the debts endpoint (`{base_url}/debts`).
    pub base_url: String,
    /// JSON file with the initial rows; used instead of `base_url` when set.
    pub data_file: Option<String>,
    pub currency_symbol: String,
    pub log_file: String,
    pub level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:3000".to_string(),
            data_file: None,
            currency_symbol: "$".to_string(),
            log_file: "debtdesk.log".to_string(),
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "debtdesk", disable_version_flag = true)]
struct Args {
    /// Optional config file path (TOML).
    #[arg(long)]
    config: Option<String>,
    /// Override base URL (e.g. http://127.0.0.1:3000).
    #[arg(long)]
    base_url: Option<String>,
    /// Load the rows from a JSON file instead of the server.
    #[arg(long)]
    data_file: Option<String>,
    /// Override the currency symbol of the balance column.
    #[arg(long)]
    currency_symbol: Option<String>,
    /// Override the log file path.
    #[arg(long)]
    log_file: Option<String>,
    /// Override the log level (error, warn, info, debug, trace).
    #[arg(long)]
    level: Option<String>,
}

pub fn load() -> Result<AppConfig> {
    let args = Args::parse();

    let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::with_name(config_path).required(false));
    builder = builder.add_source(config::Environment::with_prefix("DEBTDESK"));
    let mut settings: AppConfig = builder.build()?.try_deserialize()?;

    args.apply(&mut settings);
    Ok(settings)
}

impl Args {
    fn apply(self, settings: &mut AppConfig) {
        if let Some(base_url) = self.base_url {
            settings.base_url = base_url;
        }
        if let Some(data_file) = self.data_file {
            settings.data_file = Some(data_file);
        }
        if let Some(symbol) = self.currency_symbol {
            settings.currency_symbol = symbol;
        }
        if let Some(log_file) = self.log_file {
            settings.log_file = log_file;
        }
        if let Some(level) = self.level {
            settings.level = level;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_sources_give_defaults() {
        let settings: AppConfig = config::Config::builder()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(settings.base_url, "http://127.0.0.1:3000");
        assert_eq!(settings.data_file, None);
        assert_eq!(settings.currency_symbol, "$");
        assert_eq!(settings.level, "info");
    }

    #[test]
    fn toml_values_override_defaults() {
        let settings: AppConfig = config::Config::builder()
            .add_source(config::File::from_str(
                "data_file = \"debts.json\"\ncurrency_symbol = \"€\"",
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(settings.data_file.as_deref(), Some("debts.json"));
        assert_eq!(settings.currency_symbol, "€");
        assert_eq!(settings.log_file, "debtdesk.log");
    }

    #[test]
    fn cli_flags_win() {
        let args = Args::parse_from(["debtdesk", "--data-file", "rows.json", "--level", "debug"]);
        let mut settings = AppConfig::default();

        args.apply(&mut settings);

        assert_eq!(settings.data_file.as_deref(), Some("rows.json"));
        assert_eq!(settings.level, "debug");
        assert_eq!(settings.currency_symbol, "$");
    }
}
