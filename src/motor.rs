use std::cell::RefCell;
use std::rc::Rc;
use tracing::{debug, warn};

use crate::channels::Channel;
use crate::commands::SetMotor;
use crate::controller::Controller;
use crate::transport::Transport;
use crate::Result;

/// Largest magnitude the board accepts for a motor register.
pub const MAX_WIRE_SPEED: i8 = 127;

/// Controller handle shared by motors driving the same board. Not `Send`: a board driven
/// from several threads needs a `Mutex<Controller<_>>` instead.
pub type SharedController<T> = Rc<RefCell<Controller<T>>>;

/// Maps a normalized speed onto the board's `-127..=127` range.
pub fn scale(speed: f32) -> f32 {
    speed * f32::from(MAX_WIRE_SPEED)
}

fn wire_value(speed: f32) -> i8 {
    // saturating cast, the input is already clamped to [-1, 1]
    scale(speed).round() as i8
}

fn or_zero(speed: f32) -> f32 {
    if speed.is_nan() {
        0.0
    } else {
        speed
    }
}

/// One motor channel and the speed last commanded on it.
///
/// Speeds are normalized: `1.0` is full speed forwards, `-1.0` full speed in reverse.
/// Out of range values are clamped rather than rejected, NaN is treated as `0.0`.
/// The motor is stopped when created and again when dropped.
pub struct Motor<T: Transport> {
    controller: SharedController<T>,
    channel: Channel,
    speed: f32,
}

impl<T: Transport> Motor<T> {
    /// Creates a motor that owns its controller.
    pub fn new(controller: Controller<T>, channel: Channel) -> Result<Self> {
        Self::shared(Rc::new(RefCell::new(controller)), channel)
    }

    /// Creates a motor on a controller that other motors may also use.
    pub fn shared(controller: SharedController<T>, channel: Channel) -> Result<Self> {
        controller
            .borrow_mut()
            .write_command(&SetMotor { channel, speed: 0 })?;
        Ok(Motor {
            controller,
            channel,
            speed: 0.0,
        })
    }

    /// Drives forwards, `0.0` being stopped and `1.0` full speed.
    pub fn forward(&mut self, speed: f32) -> Result {
        self.drive(or_zero(speed).clamp(0.0, 1.0))
    }

    /// Drives backwards, `0.0` being stopped and `1.0` full speed in reverse.
    pub fn reverse(&mut self, speed: f32) -> Result {
        self.drive((-or_zero(speed)).clamp(-1.0, 0.0))
    }

    /// Sets any speed from `-1.0` to `1.0` in one call, e.g. straight from an analog stick.
    pub fn set_motor(&mut self, speed: f32) -> Result {
        self.drive(or_zero(speed).clamp(-1.0, 1.0))
    }

    pub fn stop(&mut self) -> Result {
        self.drive(0.0)
    }

    /// Last commanded speed. This is not read back from the board.
    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn channel(&self) -> Channel {
        self.channel
    }

    /// Board handle behind this motor. Resetting the board through it stops the motor
    /// without updating [`Motor::speed`].
    pub fn controller(&self) -> &SharedController<T> {
        &self.controller
    }

    /// Records a stop that was applied to the board by other means, such as a reset.
    pub(crate) fn mark_stopped(&mut self) {
        self.speed = 0.0;
    }

    // The speed is recorded before the write so it reflects the request even if the bus
    // gave up.
    fn drive(&mut self, speed: f32) -> Result {
        self.speed = speed;
        let cmd = SetMotor {
            channel: self.channel,
            speed: wire_value(speed),
        };
        debug!(channel = ?self.channel, speed, wire = cmd.speed, "setting motor speed");
        self.controller.borrow_mut().write_command(&cmd)
    }
}

impl<T: Transport> Drop for Motor<T> {
    fn drop(&mut self) {
        let Ok(mut controller) = self.controller.try_borrow_mut() else {
            warn!(channel = ?self.channel, "controller busy, motor left running on drop");
            return;
        };
        let cmd = SetMotor {
            channel: self.channel,
            speed: 0,
        };
        if let Err(e) = controller.write_command(&cmd) {
            warn!(channel = ?self.channel, "failed to stop motor on drop: {e}");
        }
    }
}
