use clap::Parser;
use piconzero::{transport, Controller, ControllerConfig, Robot, DEFAULT_ADDRESS};
use std::{path::PathBuf, time::Duration};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Program that drives both motors of a Picon Zero for a while, then stops them
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

    /// Left motor speed, from -1.0 to 1.0
    #[arg(short, long, default_value_t = 0.5, allow_negative_numbers = true)]
    left: f32,

    /// Right motor speed, from -1.0 to 1.0
    #[arg(short, long, default_value_t = 0.5, allow_negative_numbers = true)]
    right: f32,

    /// Seconds to keep the motors running
    #[arg(short, long, default_value_t = 2.0)]
    seconds: f32,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let args = Args::parse();
    let config = ControllerConfig::default()
        .address(args.address)
        .debug(args.debug);
    let mut robot = Robot::new(Controller::open(args.device, config)?)?;

    robot.set_motors(args.left, args.right)?;
    let (left, right) = robot.speed();
    info!(left, right, "motors running");
    std::thread::sleep(Duration::from_secs_f32(args.seconds.max(0.0)));

    robot.stop()?;
    info!("motors stopped");
    Ok(())
}
