//! Byte-level bus access used by [`Controller`](crate::Controller).
//!
//! The board only needs two SMBus transfers: "write byte data" for every command and
//! "read word data" for status reads. Anything that can perform those against a 7-bit
//! address can drive the board.
use i2cdev::core::I2CDevice;
use i2cdev::linux::{LinuxI2CDevice, LinuxI2CError};
use std::path::Path;

use crate::controller::DEFAULT_ADDRESS;

/// Character device the Picon Zero shows up on with a Raspberry Pi header.
pub const DEFAULT_DEVICE: &str = "/dev/i2c-1";

pub trait Transport {
    type Error: std::error::Error + Send + Sync + 'static;

    fn write_byte(&mut self, address: u16, register: u8, value: u8) -> Result<(), Self::Error>;

    fn read_word(&mut self, address: u16, register: u8) -> Result<u16, Self::Error>;
}

impl Transport for LinuxI2CDevice {
    type Error = LinuxI2CError;

    fn write_byte(&mut self, address: u16, register: u8, value: u8) -> Result<(), Self::Error> {
        self.set_slave_address(address)?;
        self.smbus_write_byte_data(register, value)
    }

    fn read_word(&mut self, address: u16, register: u8) -> Result<u16, Self::Error> {
        self.set_slave_address(address)?;
        self.smbus_read_word_data(register)
    }
}

/// Opens an I2C character device such as `/dev/i2c-1`.
pub fn open<P: AsRef<Path>>(device: P) -> crate::Result<LinuxI2CDevice> {
    Ok(LinuxI2CDevice::new(device, DEFAULT_ADDRESS)?)
}

#[cfg(test)]
pub(crate) mod mock {
    use super::Transport;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, thiserror::Error)]
    #[error("simulated bus fault")]
    pub struct BusFault;

    #[derive(Debug, Default)]
    pub struct BusLog {
        /// Successful writes as `(address, register, value)`.
        pub writes: Vec<(u16, u8, u8)>,
        /// Every transfer attempted, failed or not.
        pub attempts: usize,
        /// How many of the upcoming transfers should fail.
        pub failures: usize,
        pub word: u16,
    }

    /// In-memory bus. Clones share the same log so a test can keep one and hand the other
    /// to a controller.
    #[derive(Debug, Clone, Default)]
    pub struct MockBus {
        pub log: Rc<RefCell<BusLog>>,
    }

    impl MockBus {
        pub fn fail_next(&self, count: usize) {
            self.log.borrow_mut().failures = count;
        }

        pub fn set_word(&self, word: u16) {
            self.log.borrow_mut().word = word;
        }

        pub fn attempts(&self) -> usize {
            self.log.borrow().attempts
        }

        pub fn writes(&self) -> Vec<(u16, u8, u8)> {
            self.log.borrow().writes.clone()
        }

        /// Signed values written to `register`, oldest first.
        pub fn values_for(&self, register: u8) -> Vec<i8> {
            self.log
                .borrow()
                .writes
                .iter()
                .filter(|(_, reg, _)| *reg == register)
                .map(|(_, _, value)| *value as i8)
                .collect()
        }

        pub fn clear(&self) {
            let mut log = self.log.borrow_mut();
            log.writes.clear();
            log.attempts = 0;
        }

        fn attempt(&self) -> Result<(), BusFault> {
            let mut log = self.log.borrow_mut();
            log.attempts += 1;
            if log.failures > 0 {
                log.failures -= 1;
                return Err(BusFault);
            }
            Ok(())
        }
    }

    impl Transport for MockBus {
        type Error = BusFault;

        fn write_byte(&mut self, address: u16, register: u8, value: u8) -> Result<(), BusFault> {
            self.attempt()?;
            self.log.borrow_mut().writes.push((address, register, value));
            Ok(())
        }

        fn read_word(&mut self, _address: u16, _register: u8) -> Result<u16, BusFault> {
            self.attempt()?;
            Ok(self.log.borrow().word)
        }
    }
}
