//! Client configuration from flags and environment.
use std::env;
use std::path::PathBuf;

use crate::cli::Cli;

/// Everything the binary needs before it loads content.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClientConfig {
    pub config_path: Option<PathBuf>,
    pub scenario_path: Option<PathBuf>,
    pub templates_path: Option<PathBuf>,
    pub json: bool,
    pub realtime: bool,
    /// Directory for the log file. `Some("")` means the platform default.
    pub log_dir: Option<PathBuf>,
}

impl ClientConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `TACTICS_CONFIG` - Encounter config TOML
    /// - `TACTICS_SCENARIO` - Scenario RON
    /// - `TACTICS_TEMPLATES` - Extra unit templates RON
    /// - `TACTICS_JSON` - Emit JSON lines (default: false)
    /// - `TACTICS_REALTIME` - Sleep through delays (default: false)
    /// - `TACTICS_LOG_DIR` - Also log to a file in this directory
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let flag = |key: &str| {
            lookup(key)
                .map(|value| parse_flag(&value))
                .unwrap_or(false)
        };

        Self {
            config_path: lookup("TACTICS_CONFIG").map(PathBuf::from),
            scenario_path: lookup("TACTICS_SCENARIO").map(PathBuf::from),
            templates_path: lookup("TACTICS_TEMPLATES").map(PathBuf::from),
            json: flag("TACTICS_JSON"),
            realtime: flag("TACTICS_REALTIME"),
            log_dir: lookup("TACTICS_LOG_DIR").map(PathBuf::from),
        }
    }

    /// Flags win over environment values.
    pub fn merge(mut self, cli: Cli) -> Self {
        if cli.config.is_some() {
            self.config_path = cli.config;
        }
        if cli.scenario.is_some() {
            self.scenario_path = cli.scenario;
        }
        if cli.templates.is_some() {
            self.templates_path = cli.templates;
        }
        self.json |= cli.json;
        self.realtime |= cli.realtime;
        self
    }
}

/// A set variable counts as true unless it reads like "off".
fn parse_flag(value: &str) -> bool {
    !matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "0" | "false" | "no" | "off"
    )
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn reads_tactics_variables() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("TACTICS_SCENARIO", "caves.ron"),
            ("TACTICS_JSON", "1"),
            ("TACTICS_REALTIME", "off"),
            ("TACTICS_LOG_DIR", ""),
        ]));

        assert_eq!(config.scenario_path, Some(PathBuf::from("caves.ron")));
        assert!(config.json);
        assert!(!config.realtime);
        assert_eq!(config.log_dir, Some(PathBuf::new()));
        assert_eq!(config.config_path, None);
    }

    #[test]
    fn flags_override_environment() {
        let env = ClientConfig::from_lookup(lookup(&[("TACTICS_CONFIG", "env.toml")]));
        let cli = Cli {
            config: Some(PathBuf::from("flag.toml")),
            realtime: true,
            ..Cli::default()
        };

        let config = env.merge(cli);
        assert_eq!(config.config_path, Some(PathBuf::from("flag.toml")));
        assert!(config.realtime);
        assert!(!config.json);
    }
}
