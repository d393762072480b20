//! Configuration loading for the banter runtime.
//!
//! Config files: `banter.toml`, `banter.yaml`, or `banter.json`,
//! searched in `./` then `~/.config/banter/`.
//!
//! Supports `${ENV_VAR}` substitution in the raw file, plus environment
//! overrides (`SLACK_TOKEN`, `BANTER_DEBUG`, `BANTER_LOGFILE`) applied after
//! parsing. The resolved [`BanterConfig`] is immutable for the life of the
//! process.

pub mod env_subst;
pub mod loader;
pub mod schema;

pub use {
    loader::{apply_env_overrides, discover_and_load, find_config_file, load_config},
    schema::BanterConfig,
};
