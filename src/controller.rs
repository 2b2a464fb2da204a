use i2cdev::linux::LinuxI2CDevice;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::commands::{GetRevision, ReadCommand, Reset, Revision, WriteCommand};
use crate::transport::{self, Transport};
use crate::{Error, Result};

/// Address the Picon Zero firmware answers on unless it has been reflashed.
pub const DEFAULT_ADDRESS: u16 = 0x22;

/// Number of attempts made for every transfer before giving up.
pub const RETRIES: u8 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerConfig {
    pub address: u16,
    /// Report every failed attempt at `warn` level instead of `debug`.
    pub debug: bool,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        ControllerConfig {
            address: DEFAULT_ADDRESS,
            debug: false,
        }
    }
}

impl ControllerConfig {
    pub fn address(mut self, address: u16) -> Self {
        self.address = address;
        self
    }

    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }
}

/// Delivers register commands to the board, retrying transient bus errors.
///
/// Every call blocks until the transfer succeeds or all [`RETRIES`] attempts have failed.
/// The controller takes `&mut self` for every transfer; to drive one board from several
/// threads, put it behind a `Mutex` and hold the lock for each call so transfers do not
/// interleave.
#[derive(Debug)]
pub struct Controller<T> {
    transport: T,
    address: u16,
    debug: bool,
}

impl Controller<LinuxI2CDevice> {
    /// Opens `device` (for example `/dev/i2c-1`) and resets the board.
    pub fn open<P: AsRef<Path>>(device: P, config: ControllerConfig) -> Result<Self> {
        Self::new(transport::open(device)?, config)
    }
}

impl<T: Transport> Controller<T> {
    /// Wraps `transport` and resets the board. Fails if the reset cannot be delivered.
    pub fn new(transport: T, config: ControllerConfig) -> Result<Self> {
        let mut controller = Controller {
            transport,
            address: config.address,
            debug: config.debug,
        };
        controller.reset_board()?;
        Ok(controller)
    }

    pub fn address(&self) -> u16 {
        self.address
    }

    pub fn debug(&self) -> bool {
        self.debug
    }

    pub fn set_debug(&mut self, debug: bool) {
        self.debug = debug;
    }

    /// Stops both motors and returns every output to its power-on configuration.
    pub fn reset_board(&mut self) -> Result {
        info!(address = self.address, "resetting board");
        self.write_command(&Reset)
    }

    /// Resets the board, leaving it safe to power down.
    pub fn cleanup(&mut self) -> Result {
        self.reset_board()
    }

    pub fn revision(&mut self) -> Result<Revision> {
        self.read_command(&GetRevision)
    }

    /// Writes `value` to register `command`.
    ///
    /// `value` has to fit in one byte: `0..=255`, or `-128..=-1` which is sent as two's
    /// complement.
    pub fn send(&mut self, command: u8, value: i16) -> Result {
        let byte = encode_value(value)?;
        debug!(register = command, value, "sending command");
        self.retry(command, |transport, address| {
            transport.write_byte(address, command, byte)
        })
    }

    /// Reads the 16-bit word behind register `command`, returned as `[high, low]`.
    pub fn read(&mut self, command: u8) -> Result<[u8; 2]> {
        let word = self.retry(command, |transport, address| {
            transport.read_word(address, command)
        })?;
        debug!(register = command, word, "read register");
        Ok(word.to_be_bytes())
    }

    pub(crate) fn write_command<C: WriteCommand>(&mut self, cmd: &C) -> Result {
        self.send(cmd.code(), cmd.value())
    }

    pub(crate) fn read_command<C: ReadCommand>(&mut self, cmd: &C) -> Result<C::Response> {
        let word = self.read(cmd.code())?;
        Ok(C::decode(word))
    }

    fn retry<R>(
        &mut self,
        register: u8,
        mut transfer: impl FnMut(&mut T, u16) -> Result<R, T::Error>,
    ) -> Result<R> {
        let mut attempt = 1;
        loop {
            match transfer(&mut self.transport, self.address) {
                Ok(response) => return Ok(response),
                Err(e) => {
                    if self.debug {
                        warn!(register, attempt, "bus transfer failed: {e}");
                    } else {
                        debug!(register, attempt, "bus transfer failed: {e}");
                    }
                    if attempt >= RETRIES {
                        return Err(Error::Communication {
                            register,
                            attempts: attempt,
                            source: Box::new(e),
                        });
                    }
                    attempt += 1;
                }
            }
        }
    }
}

fn encode_value(value: i16) -> Result<u8> {
    u8::try_from(value)
        .or_else(|_| i8::try_from(value).map(|v| v as u8))
        .map_err(|_| Error::ValueOutOfRange(value))
}
