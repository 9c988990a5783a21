use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use common::cli::{CommonArgs, CommonCommands, utils};
use common::config::CONFIG;
use fixtures::{BasicFixture, Fixture, PxfHbaseFixture, SystemObjects};
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "pxf-automation")]
#[command(about = "PXF automation - prepares external stores around integration test levels")]
#[command(version)]
struct Cli {
    #[command(flatten)]
    common: CommonArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Command {
    /// Run the HBase fixture setup: drop the managed tables if they exist
    Setup,
    /// Run the HBase fixture teardown
    Teardown,
    #[command(flatten)]
    Common(CommonCommands),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    utils::init_logging(&cli.common);

    let config = utils::load_config(cli.common.config.as_ref())?;
    let config = CONFIG.get_or_init(|| config);

    let setup = match cli.command {
        Command::Common(ref common_cmd) => return utils::handle_common_command(common_cmd, config),
        Command::Setup => true,
        Command::Teardown => false,
    };

    let registry =
        SystemObjects::from_config(config).context("Failed to open system objects")?;
    let lifecycle = Arc::new(BasicFixture::new("hbase"));
    let mut fixture = PxfHbaseFixture::from_config(&registry, lifecycle, &config.hbase)
        .context("Failed to build HBase fixture")?;

    if setup {
        fixture.set_up().await.context("HBase fixture setup failed")?;
    } else {
        fixture
            .tear_down()
            .await
            .context("HBase fixture teardown failed")?;
    }

    match fixture.last_report() {
        Some(report) => log::info!(
            "Fixture {} done: {} tables checked, dropped {:?}",
            fixture.name(),
            report.checked.len(),
            report.dropped
        ),
        None => log::warn!("Fixture {} finished without a cleanup report", fixture.name()),
    }

    Ok(())
}
