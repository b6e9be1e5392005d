use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::SpeedConfig;

/// Speed record shared between the page and the frame loop.
///
/// `Copy` on purpose: the loop takes one snapshot per frame, so a frame never
/// sees a record that is half way through being updated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnimationControls {
    /// Depth units the camera travels per frame.
    pub current_speed: f64,
    pub base_speed: f64,
    pub boost_speed: f64,
}

impl AnimationControls {
    pub fn new(base_speed: f64, boost_speed: f64) -> Self {
        Self {
            current_speed: base_speed,
            base_speed,
            boost_speed,
        }
    }

    pub fn from_config(config: &SpeedConfig) -> Self {
        Self::new(config.base, config.boost)
    }

    /// Copy with a different current speed.
    pub fn with_speed(mut self, speed: f64) -> Self {
        self.current_speed = speed;
        self
    }

    pub fn boost(&mut self) {
        self.current_speed = self.boost_speed;
    }

    /// Back to base speed.
    pub fn cruise(&mut self) {
        self.current_speed = self.base_speed;
    }

    pub fn is_boosting(&self) -> bool {
        self.current_speed == self.boost_speed && self.boost_speed != self.base_speed
    }
}

impl Default for AnimationControls {
    fn default() -> Self {
        Self::from_config(&SpeedConfig::default())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Idle,
    Running,
    Stopped,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LoopError {
    #[error("frame loop is already running")]
    AlreadyRunning,
}

/// Lifecycle of a frame loop. A running loop cannot be started a second
/// time; a stopped loop may be started again.
#[derive(Debug)]
pub struct LoopGuard {
    state: LoopState,
    starts: u32,
}

impl LoopGuard {
    pub fn new() -> Self {
        Self {
            state: LoopState::Idle,
            starts: 0,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == LoopState::Running
    }

    /// Number of successful starts.
    pub fn starts(&self) -> u32 {
        self.starts
    }

    pub fn try_start(&mut self) -> Result<(), LoopError> {
        if self.is_running() {
            return Err(LoopError::AlreadyRunning);
        }
        self.state = LoopState::Running;
        self.starts += 1;
        Ok(())
    }

    /// Returns whether the loop was running.
    pub fn stop(&mut self) -> bool {
        let was_running = self.is_running();
        if self.state != LoopState::Idle {
            self.state = LoopState::Stopped;
        }
        was_running
    }
}

impl Default for LoopGuard {
    fn default() -> Self {
        Self::new()
    }
}
