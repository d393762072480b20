//! Plugins that ship with the banter binary.

mod greeter;
mod ping;

pub use {greeter::GreeterPlugin, ping::PingPlugin};
