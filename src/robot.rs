use std::cell::RefCell;
use std::rc::Rc;
use tracing::debug;

use crate::channels::Channel;
use crate::commands::Revision;
use crate::controller::Controller;
use crate::motor::{Motor, SharedController};
use crate::transport::Transport;
use crate::Result;

/// Two wheel (or four wheel skid steer) robot: channel A drives the left side and
/// channel B the right side.
///
/// Paired commands stop at the first failing write, so after an error the right motor may
/// still hold its previous command.
pub struct Robot<T: Transport> {
    controller: SharedController<T>,
    left: Motor<T>,
    right: Motor<T>,
}

impl<T: Transport> Robot<T> {
    /// Takes over `controller` and stops both motors.
    pub fn new(controller: Controller<T>) -> Result<Self> {
        let controller = Rc::new(RefCell::new(controller));
        let left = Motor::shared(controller.clone(), Channel::A)?;
        let right = Motor::shared(controller.clone(), Channel::B)?;
        Ok(Robot {
            controller,
            left,
            right,
        })
    }

    pub fn forward(&mut self, speed: f32) -> Result {
        debug!(speed, "robot forward");
        self.left.forward(speed)?;
        self.right.forward(speed)
    }

    pub fn reverse(&mut self, speed: f32) -> Result {
        debug!(speed, "robot reverse");
        self.left.reverse(speed)?;
        self.right.reverse(speed)
    }

    /// Rotates in place anticlockwise.
    pub fn spin_left(&mut self, speed: f32) -> Result {
        debug!(speed, "robot spin left");
        self.left.reverse(speed)?;
        self.right.forward(speed)
    }

    /// Rotates in place clockwise.
    pub fn spin_right(&mut self, speed: f32) -> Result {
        debug!(speed, "robot spin right");
        self.left.forward(speed)?;
        self.right.reverse(speed)
    }

    /// Pivots around the stopped left wheel.
    pub fn turn_left(&mut self, speed: f32) -> Result {
        debug!(speed, "robot turn left");
        self.left.stop()?;
        self.right.forward(speed)
    }

    /// Pivots around the stopped right wheel.
    pub fn turn_right(&mut self, speed: f32) -> Result {
        debug!(speed, "robot turn right");
        self.left.forward(speed)?;
        self.right.stop()
    }

    pub fn set_motors(&mut self, left: f32, right: f32) -> Result {
        debug!(left, right, "robot set motors");
        self.left.set_motor(left)?;
        self.right.set_motor(right)
    }

    pub fn stop(&mut self) -> Result {
        self.left.stop()?;
        self.right.stop()
    }

    /// Last commanded `(left, right)` speeds.
    pub fn speed(&self) -> (f32, f32) {
        (self.left.speed(), self.right.speed())
    }

    /// Sets the left side only, leaving the right motor as it is.
    pub fn set_left(&mut self, speed: f32) -> Result {
        self.left.set_motor(speed)
    }

    /// Sets the right side only, leaving the left motor as it is.
    pub fn set_right(&mut self, speed: f32) -> Result {
        self.right.set_motor(speed)
    }

    pub fn left(&self) -> &Motor<T> {
        &self.left
    }

    pub fn right(&self) -> &Motor<T> {
        &self.right
    }

    pub fn revision(&mut self) -> Result<Revision> {
        self.controller.borrow_mut().revision()
    }

    /// Resets the board, which also stops both motors.
    pub fn cleanup(&mut self) -> Result {
        self.controller.borrow_mut().cleanup()?;
        self.left.mark_stopped();
        self.right.mark_stopped();
        Ok(())
    }
}
