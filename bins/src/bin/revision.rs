use clap::Parser;
use piconzero::{transport, Controller, ControllerConfig, DEFAULT_ADDRESS};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Program that prints the board type and firmware revision of a Picon Zero
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// I2C device we should connect to
    #[arg(short, long, default_value = transport::DEFAULT_DEVICE)]
    device: PathBuf,

    /// I2C address to address this device with
    #[arg(short, long, default_value_t = DEFAULT_ADDRESS)]
    address: u16,

    /// Report every failed bus transfer
    #[arg(long)]
    debug: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let args = Args::parse();
    let config = ControllerConfig::default()
        .address(args.address)
        .debug(args.debug);
    let mut controller = Controller::open(args.device, config)?;
    let revision = controller.revision()?;
    println!(
        "Board type: {}, firmware revision: {}",
        revision.board, revision.firmware
    );
    Ok(())
}
