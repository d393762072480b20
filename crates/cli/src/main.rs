//! The banter binary: config resolution, logging setup, plugin
//! registration, and the outer guard around the dispatch loop.

use std::{
    path::{Path, PathBuf},
    process::ExitCode,
    sync::Mutex,
};

use {
    anyhow::Context,
    clap::Parser,
    tracing::{error, info},
    tracing_subscriber::EnvFilter,
};

use {
    banter_config::{BanterConfig, apply_env_overrides, find_config_file, load_config},
    banter_plugins::bundled::{GreeterPlugin, PingPlugin},
    banter_runtime::{Dispatcher, Transport},
};

#[derive(Parser)]
#[command(name = "banter", about = "banter — Slack RTM bot runtime", version)]
struct Cli {
    /// Full path to a config file (default: discover
    /// banter.{toml,yaml,yml,json} in ./ then ~/.config/banter/).
    #[arg(short, long, env = "BANTER_CONFIG", value_name = "path")]
    config: Option<PathBuf>,

    /// Print the resolved settings and exit.
    #[arg(long, default_value_t = false)]
    print_config: bool,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Output logs as JSON instead of human-readable.
    #[arg(long, default_value_t = false)]
    json_logs: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let (mut config, source) = match resolve_config(cli.config.as_deref()) {
        Ok(resolved) => resolved,
        Err(error) => {
            eprintln!("banter: {error:#}");
            return ExitCode::FAILURE;
        },
    };
    apply_env_overrides(&mut config);

    if cli.print_config {
        println!("{config:#?}");
        return ExitCode::SUCCESS;
    }

    if let Err(error) = init_tracing(&cli.log_level, cli.json_logs, config.logfile.as_deref()) {
        eprintln!("banter: {error:#}");
        return ExitCode::FAILURE;
    }

    match &source {
        Some(path) => info!(config = %path.display(), "starting banter"),
        None => info!("starting banter (no config file, environment only)"),
    }

    match run(config).await {
        Ok(()) => {
            info!("banter stopped");
            ExitCode::SUCCESS
        },
        Err(error) => {
            // Outer guard: anything escaping the loop lands here.
            error!("banter terminated: {error:#}");
            ExitCode::FAILURE
        },
    }
}

/// Connect, register the bundled plugins, and drive the loop until an
/// interrupt or a fatal error.
async fn run(config: BanterConfig) -> anyhow::Result<()> {
    let mut dispatcher = Dispatcher::connect(&config).await?;
    register_bundled(&mut dispatcher, &config)?;

    tokio::select! {
        result = dispatcher.run() => result,
        _ = tokio::signal::ctrl_c() => {
            info!("interrupt received, shutting down");
            Ok(())
        }
    }
}

/// Bundled plugins are always registered, in a fixed order; a
/// `[plugins.<name>]` block in the config is handed to the matching plugin.
fn register_bundled<T: Transport>(
    dispatcher: &mut Dispatcher<T>,
    config: &BanterConfig,
) -> anyhow::Result<()> {
    dispatcher.register(
        Box::new(PingPlugin::new()),
        config.plugin_block("ping").cloned(),
    )?;
    dispatcher.register(
        Box::new(GreeterPlugin::new()),
        config.plugin_block("greeter").cloned(),
    )?;
    Ok(())
}

fn resolve_config(explicit: Option<&Path>) -> anyhow::Result<(BanterConfig, Option<PathBuf>)> {
    let path = match explicit {
        Some(p) => Some(p.to_path_buf()),
        None => find_config_file(),
    };
    let config = match &path {
        Some(p) => load_config(p)?,
        None => BanterConfig::default(),
    };
    Ok((config, path))
}

fn init_tracing(log_level: &str, json: bool, logfile: Option<&Path>) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match logfile {
        Some(path) => {
            let file = std::fs::File::options()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("opening log file {}", path.display()))?;
            let builder = builder.with_writer(Mutex::new(file)).with_ansi(false);
            if json {
                builder.json().init();
            } else {
                builder.init();
            }
        },
        None => {
            if json {
                builder.json().init();
            } else {
                builder.init();
            }
        },
    }
    Ok(())
}
