//! Plugin contract, fault-isolation adapter, and bundled plugins.

pub mod adapter;
pub mod bundled;
pub mod plugin;

pub use {
    adapter::PluginAdapter,
    plugin::{FailureMode, Plugin},
};
