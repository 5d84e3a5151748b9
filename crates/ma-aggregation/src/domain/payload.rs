//! # Message Payload
//!
//! The data fields carried by one message and the validity predicate over
//! them.
//!
//! A payload from agent `0` is accepted without any further check. Every
//! other agent must satisfy all of the range and checksum rules below.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Agent identifier that bypasses every other rule.
pub const BYPASS_AGENT_ID: u32 = 0;

/// Largest accepted agent identifier.
pub const MAX_AGENT_ID: u32 = 3000;

/// Largest accepted X location.
pub const MAX_X_LOCATION: u32 = 15_000;

/// Smallest accepted Y location.
pub const MIN_Y_LOCATION: u32 = 5_000;

/// Largest accepted Y location.
pub const MAX_Y_LOCATION: u32 = 20_000;

/// One message's data fields.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Payload {
    /// Sending agent.
    pub agent_id: u32,
    /// Reported X coordinate.
    pub x_location: u32,
    /// Reported Y coordinate.
    pub y_location: u32,
    /// Sum of the three fields above.
    pub checksum: u32,
}

/// The first rule a payload breaks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PayloadViolation {
    /// `agent_id > MAX_AGENT_ID`
    AgentIdOutOfRange(u32),
    /// `x_location > MAX_X_LOCATION`
    XLocationOutOfRange(u32),
    /// `y_location <= x_location`
    YLocationNotAboveX {
        /// Reported X.
        x: u32,
        /// Reported Y.
        y: u32,
    },
    /// `y_location` outside `[MIN_Y_LOCATION, MAX_Y_LOCATION]`
    YLocationOutOfRange(u32),
    /// Fields do not add up to the checksum.
    ChecksumMismatch {
        /// Sum of the fields.
        computed: u32,
        /// Checksum carried by the payload.
        declared: u32,
    },
}

impl fmt::Display for PayloadViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AgentIdOutOfRange(id) => write!(f, "agent id {} > {}", id, MAX_AGENT_ID),
            Self::XLocationOutOfRange(x) => write!(f, "x {} > {}", x, MAX_X_LOCATION),
            Self::YLocationNotAboveX { x, y } => write!(f, "y {} <= x {}", y, x),
            Self::YLocationOutOfRange(y) => write!(
                f,
                "y {} outside [{}, {}]",
                y, MIN_Y_LOCATION, MAX_Y_LOCATION
            ),
            Self::ChecksumMismatch { computed, declared } => {
                write!(f, "checksum {} != {}", declared, computed)
            }
        }
    }
}

impl Payload {
    /// Create a payload.
    pub fn new(agent_id: u32, x_location: u32, y_location: u32, checksum: u32) -> Self {
        Self {
            agent_id,
            x_location,
            y_location,
            checksum,
        }
    }

    /// Create a payload whose checksum is correct for its fields.
    pub fn with_valid_checksum(agent_id: u32, x_location: u32, y_location: u32) -> Self {
        let mut payload = Self::new(agent_id, x_location, y_location, 0);
        payload.checksum = payload.computed_checksum();
        payload
    }

    /// Sum of the three data fields, wrapping at `u32` width.
    pub fn computed_checksum(&self) -> u32 {
        self.agent_id
            .wrapping_add(self.x_location)
            .wrapping_add(self.y_location)
    }

    /// `agent_id <= MAX_AGENT_ID`
    pub fn check_agent_id(&self) -> bool {
        self.agent_id <= MAX_AGENT_ID
    }

    /// `x_location <= MAX_X_LOCATION`
    pub fn check_x_location(&self) -> bool {
        self.x_location <= MAX_X_LOCATION
    }

    /// `x_location < y_location` and `MIN_Y_LOCATION <= y_location <= MAX_Y_LOCATION`
    pub fn check_y_location(&self) -> bool {
        self.y_location > self.x_location
            && self.y_location >= MIN_Y_LOCATION
            && self.y_location <= MAX_Y_LOCATION
    }

    /// Fields add up to the checksum.
    pub fn check_checksum(&self) -> bool {
        self.computed_checksum() == self.checksum
    }

    /// Whether the payload is acceptable.
    ///
    /// Pure and total: identical payloads always give the same answer.
    pub fn is_valid(&self) -> bool {
        self.agent_id == BYPASS_AGENT_ID
            || (self.check_agent_id()
                && self.check_x_location()
                && self.check_y_location()
                && self.check_checksum())
    }

    /// First rule this payload breaks, or `None` if it is valid.
    ///
    /// Agrees with [`Payload::is_valid`]: returns `None` exactly when the
    /// payload is valid.
    pub fn first_violation(&self) -> Option<PayloadViolation> {
        if self.agent_id == BYPASS_AGENT_ID {
            return None;
        }
        if !self.check_agent_id() {
            return Some(PayloadViolation::AgentIdOutOfRange(self.agent_id));
        }
        if !self.check_x_location() {
            return Some(PayloadViolation::XLocationOutOfRange(self.x_location));
        }
        if self.y_location <= self.x_location {
            return Some(PayloadViolation::YLocationNotAboveX {
                x: self.x_location,
                y: self.y_location,
            });
        }
        if !self.check_y_location() {
            return Some(PayloadViolation::YLocationOutOfRange(self.y_location));
        }
        if !self.check_checksum() {
            return Some(PayloadViolation::ChecksumMismatch {
                computed: self.computed_checksum(),
                declared: self.checksum,
            });
        }
        None
    }
}
