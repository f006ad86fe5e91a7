//! Quadrature decoder for the rotary encoder
//!
//! Pure state machine over sampled A/B line levels. The firmware polls
//! the pins every millisecond or two and feeds the levels in; one
//! [`Direction`] comes out per completed detent. Keeping the pins out of
//! the decoder makes the bounce behavior testable on the host.

/// Rotation direction of a completed detent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    Clockwise,
    CounterClockwise,
}

impl Direction {
    /// Counter increment for this detent
    pub const fn delta(self) -> i32 {
        match self {
            Direction::Clockwise => 1,
            Direction::CounterClockwise => -1,
        }
    }
}

/// Decoder state machine states
#[derive(Clone, Copy, PartialEq)]
enum State {
    Idle,
    CwStep1,
    CwStep2,
    CcwStep1,
    CcwStep2,
}

/// Quadrature state machine with noise rejection
///
/// Both lines rest high at a detent. Clockwise, A falls first:
/// (1,1) -> (0,1) -> (0,0) -> either line high completes the detent.
/// Counter-clockwise, B falls first, mirrored. A bounce that retreats to
/// (1,1) unwinds the partial step without emitting anything.
pub struct QuadratureDecoder {
    state: State,
    last_a: bool,
    last_b: bool,
}

impl QuadratureDecoder {
    /// New decoder assuming the detent rest level (both lines high)
    pub const fn new() -> Self {
        Self {
            state: State::Idle,
            last_a: true,
            last_b: true,
        }
    }

    /// Feed one pin sample; returns a direction when a detent completes
    pub fn update(&mut self, a: bool, b: bool) -> Option<Direction> {
        if a == self.last_a && b == self.last_b {
            return None;
        }
        let detent = self.step(a, b);
        self.last_a = a;
        self.last_b = b;
        detent
    }

    fn step(&mut self, a: bool, b: bool) -> Option<Direction> {
        match self.state {
            State::Idle => {
                if !a && b {
                    self.state = State::CwStep1;
                } else if a && !b {
                    self.state = State::CcwStep1;
                }
                None
            }
            State::CwStep1 => {
                if !a && !b {
                    self.state = State::CwStep2;
                } else if a && b {
                    // Bounce unwound the step
                    self.state = State::Idle;
                }
                None
            }
            State::CwStep2 => {
                if a || b {
                    self.state = State::Idle;
                    return Some(Direction::Clockwise);
                }
                None
            }
            State::CcwStep1 => {
                if !a && !b {
                    self.state = State::CcwStep2;
                } else if a && b {
                    self.state = State::Idle;
                }
                None
            }
            State::CcwStep2 => {
                if a || b {
                    self.state = State::Idle;
                    return Some(Direction::CounterClockwise);
                }
                None
            }
        }
    }
}

impl Default for QuadratureDecoder {
    fn default() -> Self {
        Self::new()
    }
}
