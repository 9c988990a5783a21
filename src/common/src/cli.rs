use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Common CLI arguments shared across all binaries
#[derive(Parser, Debug, Clone)]
pub struct CommonArgs {
    #[arg(long, help = "Configuration file path")]
    pub config: Option<PathBuf>,

    #[arg(short, long, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(short, long, help = "Enable quiet mode (minimal output)")]
    pub quiet: bool,
}

/// Commands that inspect configuration without touching any store
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum CommonCommands {
    /// Show current configuration and exit
    Config {
        #[arg(long, help = "Show configuration in JSON format")]
        json: bool,
    },
    /// Validate configuration and exit
    Validate,
    /// Show version information and exit
    Version,
}

/// Utility functions for CLI operations
pub mod utils {
    use super::*;
    use crate::config::{Configuration, HBASE_SYSTEM_OBJECT, is_valid_table_name};
    use anyhow::{Context, Result};
    use tracing_subscriber::EnvFilter;

    /// Log level selected by the verbosity flags
    pub fn log_level(args: &CommonArgs) -> &'static str {
        if args.quiet {
            "warn"
        } else if args.verbose {
            "debug"
        } else {
            "info"
        }
    }

    /// Initialize logging based on CLI arguments; `RUST_LOG` wins when set
    pub fn init_logging(args: &CommonArgs) {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(log_level(args)));
        let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
    }

    /// Load configuration with optional override from CLI
    pub fn load_config(config_path: Option<&PathBuf>) -> Result<Configuration> {
        match config_path {
            Some(path) => {
                log::info!("Loading configuration from: {}", path.display());
                Configuration::load_from_path(path).context("Failed to load configuration")
            }
            None => Configuration::load().context("Failed to load configuration"),
        }
    }

    /// Display configuration in human-readable or JSON format
    pub fn display_config(config: &Configuration, json: bool) -> Result<()> {
        if json {
            let json = serde_json::to_string_pretty(config)
                .context("Failed to serialize configuration to JSON")?;
            println!("{json}");
        } else {
            println!("PXF Automation Configuration:");
            println!("=============================");
            println!("Default storage DSN: {}", config.storage.dsn);
            for name in config.system_objects.keys() {
                let dsn = config.system_object_dsn(name).unwrap_or_default();
                println!("System object '{name}': {dsn}");
            }
            println!("HBase tables: {}", config.hbase.tables.join(", "));
            println!("HBase teardown policy: {:?}", config.hbase.teardown_policy);
        }
        Ok(())
    }

    /// Validate configuration and report any issues
    pub fn validate_config(config: &Configuration) -> Result<()> {
        log::info!("Validating configuration...");

        if config.storage.dsn.is_empty() {
            anyhow::bail!("Storage DSN cannot be empty");
        }

        // Loaded configurations always carry hbase; built ones may not
        if !config.system_objects.contains_key(HBASE_SYSTEM_OBJECT) {
            anyhow::bail!("System object '{HBASE_SYSTEM_OBJECT}' must be configured");
        }

        for (name, object) in &config.system_objects {
            if object.dsn.as_deref() == Some("") {
                anyhow::bail!("DSN for system object '{name}' cannot be empty");
            }
        }

        if let Some(table) = config
            .hbase
            .tables
            .iter()
            .find(|t| !is_valid_table_name(t))
        {
            anyhow::bail!("Invalid HBase table name: '{table}'");
        }

        log::info!("Configuration validation passed");
        Ok(())
    }

    /// Handle commands that don't require a store; always consumes the command
    pub fn handle_common_command(command: &CommonCommands, config: &Configuration) -> Result<()> {
        match command {
            CommonCommands::Config { json } => display_config(config, *json),
            CommonCommands::Validate => validate_config(config),
            CommonCommands::Version => {
                println!("{}", version_info());
                Ok(())
            }
        }
    }

    /// Standard version information
    pub fn version_info() -> String {
        format!(
            "{} {} ({})",
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION"),
            env!("CARGO_PKG_RUST_VERSION")
        )
    }
}
