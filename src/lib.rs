//! Client library for the 4tronix Picon Zero two-channel motor controller.
//!
//! The board sits on an I2C bus (address `0x22` by default) and takes one byte per
//! register write. [`Controller`] handles delivery with retries, [`Motor`] maps a
//! normalized speed onto one channel and [`Robot`] drives both channels as a
//! differential pair.
use i2cdev::linux::LinuxI2CError;

mod channels;
mod commands;
mod controller;
mod motor;
mod robot;
pub mod transport;

pub use crate::channels::Channel;
pub use crate::commands::Revision;
pub use crate::controller::{Controller, ControllerConfig, DEFAULT_ADDRESS, RETRIES};
pub use crate::motor::{scale, Motor, SharedController, MAX_WIRE_SPEED};
pub use crate::robot::Robot;
pub use crate::transport::Transport;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I2C error: {0}")]
    I2c(#[from] LinuxI2CError),
    #[error("giving up on register {register} after {attempts} attempts: {source}")]
    Communication {
        register: u8,
        attempts: u8,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },
    #[error("value {0} does not fit in a single byte")]
    ValueOutOfRange(i16),
    #[error("channel {0} does not exist, the board only has channels 0 and 1")]
    InvalidChannel(u8),
}

pub type Result<T = (), E = Error> = std::result::Result<T, E>;
