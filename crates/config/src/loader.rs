//! Config file discovery, parsing, and environment overrides.

use std::path::{Path, PathBuf};

use {
    secrecy::Secret,
    tracing::{debug, warn},
};

use crate::{env_subst::substitute_env, schema::BanterConfig};

/// Standard config file names, checked in order.
const CONFIG_FILENAMES: &[&str] = &["banter.toml", "banter.yaml", "banter.yml", "banter.json"];

/// Load config from the given path (any supported format).
pub fn load_config(path: &Path) -> anyhow::Result<BanterConfig> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("failed to read {}: {e}", path.display()))?;
    let raw = substitute_env(&raw);
    parse_config(&raw, path)
}

/// Discover and load config from standard locations.
///
/// Search order:
/// 1. `./banter.{toml,yaml,yml,json}` (project-local)
/// 2. `~/.config/banter/banter.{toml,yaml,yml,json}` (user-global)
///
/// Returns `BanterConfig::default()` if no config file is found.
pub fn discover_and_load() -> BanterConfig {
    if let Some(path) = find_config_file() {
        debug!(path = %path.display(), "loading config");
        match load_config(&path) {
            Ok(cfg) => return cfg,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to load config, using defaults");
            },
        }
    } else {
        debug!("no config file found, using defaults");
    }
    BanterConfig::default()
}

/// Find the first config file in standard locations.
pub fn find_config_file() -> Option<PathBuf> {
    for name in CONFIG_FILENAMES {
        let p = PathBuf::from(name);
        if p.exists() {
            return Some(p);
        }
    }

    if let Some(dirs) = directories::ProjectDirs::from("", "", "banter") {
        let config_dir = dirs.config_dir();
        for name in CONFIG_FILENAMES {
            let p = config_dir.join(name);
            if p.exists() {
                return Some(p);
            }
        }
    }

    None
}

/// Apply environment-variable overrides on top of a parsed config.
///
/// `SLACK_TOKEN` replaces the token, `BANTER_DEBUG` (`1`/`true`/`yes`)
/// forces debug mode, `BANTER_LOGFILE` sets the log file. This is what lets
/// banter run with no config file at all.
pub fn apply_env_overrides(config: &mut BanterConfig) {
    apply_overrides_with(config, |name| std::env::var(name).ok());
}

fn apply_overrides_with(config: &mut BanterConfig, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(token) = lookup("SLACK_TOKEN")
        && !token.is_empty()
    {
        config.slack_token = Secret::new(token);
    }
    if let Some(flag) = lookup("BANTER_DEBUG") {
        config.debug = matches!(flag.to_ascii_lowercase().as_str(), "1" | "true" | "yes");
    }
    if let Some(path) = lookup("BANTER_LOGFILE")
        && !path.is_empty()
    {
        config.logfile = Some(PathBuf::from(path));
    }
}

fn parse_config(raw: &str, path: &Path) -> anyhow::Result<BanterConfig> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("toml");

    match ext {
        "toml" => Ok(toml::from_str(raw)?),
        "yaml" | "yml" => Ok(serde_yaml::from_str(raw)?),
        "json" => Ok(serde_json::from_str(raw)?),
        _ => anyhow::bail!("unsupported config format: .{ext}"),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use secrecy::ExposeSecret;

    use super::*;

    fn write_config(dir: &tempfile::TempDir, name: &str, body: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(body.as_bytes()).unwrap();
        path
    }

    #[test]
    fn loads_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "banter.toml", "slack_token = \"tok\"\ndebug = true\n");
        let cfg = load_config(&path).unwrap();
        assert_eq!(cfg.slack_token.expose_secret(), "tok");
        assert!(cfg.debug);
    }

    #[test]
    fn loads_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            &dir,
            "banter.yaml",
            "slack_token: tok\nplugins:\n  greeter:\n    greeting: hello\n",
        );
        let cfg = load_config(&path).unwrap();
        assert_eq!(cfg.slack_token.expose_secret(), "tok");
        assert_eq!(cfg.plugin_block("greeter").unwrap()["greeting"], "hello");
    }

    #[test]
    fn loads_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "banter.json", r#"{"slack_token": "tok", "logfile": "bot.log"}"#);
        let cfg = load_config(&path).unwrap();
        assert_eq!(cfg.logfile, Some(PathBuf::from("bot.log")));
    }

    #[test]
    fn rejects_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "banter.ini", "slack_token = tok");
        assert!(load_config(&path).is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(load_config(Path::new("/nonexistent/banter.toml")).is_err());
    }

    #[test]
    fn env_override_replaces_token_and_debug() {
        let mut cfg = BanterConfig::default();
        apply_overrides_with(&mut cfg, |name| match name {
            "SLACK_TOKEN" => Some("xoxb-env".to_string()),
            "BANTER_DEBUG" => Some("true".to_string()),
            _ => None,
        });
        assert_eq!(cfg.slack_token.expose_secret(), "xoxb-env");
        assert!(cfg.debug);
    }

    #[test]
    fn env_override_ignores_empty_token() {
        let mut cfg: BanterConfig = serde_json::from_str(r#"{"slack_token": "file"}"#).unwrap();
        apply_overrides_with(&mut cfg, |name| match name {
            "SLACK_TOKEN" => Some(String::new()),
            _ => None,
        });
        assert_eq!(cfg.slack_token.expose_secret(), "file");
    }

    #[test]
    fn env_override_can_disable_debug() {
        let mut cfg: BanterConfig = serde_json::from_str(r#"{"debug": true}"#).unwrap();
        apply_overrides_with(&mut cfg, |name| match name {
            "BANTER_DEBUG" => Some("0".to_string()),
            _ => None,
        });
        assert!(!cfg.debug);
    }
}
