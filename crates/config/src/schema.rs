//! The configuration schema.

use std::{collections::HashMap, fmt, path::PathBuf};

use {
    secrecy::{ExposeSecret, Secret},
    serde::Deserialize,
    serde_json::Value,
};

/// Resolved banter configuration.
///
/// Constructed once at startup and passed by reference into the dispatcher
/// and each plugin adapter; nothing mutates it afterwards.
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct BanterConfig {
    /// Slack API token used for the RTM handshake.
    pub slack_token: Secret<String>,

    /// Surface plugin handler failures instead of containing them.
    pub debug: bool,

    /// Log file path; logs go to stderr when unset.
    pub logfile: Option<PathBuf>,

    /// Per-plugin configuration blocks, keyed by plugin name.
    pub plugins: HashMap<String, Value>,
}

impl BanterConfig {
    /// Config block for the named plugin, if one was provided.
    pub fn plugin_block(&self, name: &str) -> Option<&Value> {
        self.plugins.get(name)
    }

    /// Fails when no token is configured. Called before connecting.
    pub fn ensure_token(&self) -> anyhow::Result<()> {
        if self.slack_token.expose_secret().is_empty() {
            anyhow::bail!(
                "no slack token configured (set `slack_token` in the config file \
                 or the SLACK_TOKEN environment variable)"
            );
        }
        Ok(())
    }
}

impl Default for BanterConfig {
    fn default() -> Self {
        Self {
            slack_token: Secret::new(String::new()),
            debug: false,
            logfile: None,
            plugins: HashMap::new(),
        }
    }
}

impl fmt::Debug for BanterConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BanterConfig")
            .field("slack_token", &"[REDACTED]")
            .field("debug", &self.debug)
            .field("logfile", &self.logfile)
            .field("plugins", &self.plugins)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let cfg = BanterConfig::default();
        assert!(cfg.slack_token.expose_secret().is_empty());
        assert!(!cfg.debug);
        assert!(cfg.logfile.is_none());
        assert!(cfg.plugins.is_empty());
    }

    #[test]
    fn deserialize_from_toml() {
        let toml = r#"
            slack_token = "xoxb-123"
            debug = true

            [plugins.greeter]
            greeting = "hi there"
        "#;
        let cfg: BanterConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.slack_token.expose_secret(), "xoxb-123");
        assert!(cfg.debug);
        let block = cfg.plugin_block("greeter").unwrap();
        assert_eq!(block["greeting"], "hi there");
        assert!(cfg.plugin_block("ping").is_none());
    }

    #[test]
    fn unspecified_fields_take_defaults() {
        let cfg: BanterConfig = serde_json::from_str(r#"{"slack_token": "tok"}"#).unwrap();
        assert!(!cfg.debug);
        assert!(cfg.logfile.is_none());
    }

    #[test]
    fn debug_output_redacts_token() {
        let cfg: BanterConfig = serde_json::from_str(r#"{"slack_token": "sekrit"}"#).unwrap();
        let rendered = format!("{cfg:?}");
        assert!(rendered.contains("[REDACTED]"));
        assert!(!rendered.contains("sekrit"));
    }

    #[test]
    fn ensure_token_rejects_missing_token() {
        assert!(BanterConfig::default().ensure_token().is_err());

        let cfg: BanterConfig = serde_json::from_str(r#"{"slack_token": "tok"}"#).unwrap();
        assert!(cfg.ensure_token().is_ok());
    }
}
