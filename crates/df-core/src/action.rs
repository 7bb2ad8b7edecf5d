//! The discrete action set shared by the engine and every decision-maker.
//!
//! One enumeration covers both historical action sets: the move-only set is
//! the first five codes, and `Pickup`/`Dropoff` are switched off with
//! [`FleetConfig::pickup_dropoff`][crate::FleetConfig::pickup_dropoff].

/// One agent's request for a single tick.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Action {
    /// No movement, no intent.
    #[default]
    Stay,
    Up,
    Down,
    Left,
    Right,
    /// Try to pick up a waiting order at the agent's final cell.
    Pickup,
    /// Try to deliver the carried order at the agent's final cell.
    Dropoff,
}

impl Action {
    /// All actions, in code order.
    pub const ALL: [Action; 7] = [
        Action::Stay,
        Action::Up,
        Action::Down,
        Action::Left,
        Action::Right,
        Action::Pickup,
        Action::Dropoff,
    ];

    /// The move-only subset (codes 0–4).
    pub const MOVES: [Action; 5] = [
        Action::Stay,
        Action::Up,
        Action::Down,
        Action::Left,
        Action::Right,
    ];

    /// Decode an integer action code.  Unknown codes degrade to `Stay`.
    pub fn from_code(code: i64) -> Action {
        match code {
            1 => Action::Up,
            2 => Action::Down,
            3 => Action::Left,
            4 => Action::Right,
            5 => Action::Pickup,
            6 => Action::Dropoff,
            _ => Action::Stay,
        }
    }

    #[inline]
    pub fn code(self) -> i64 {
        match self {
            Action::Stay    => 0,
            Action::Up      => 1,
            Action::Down    => 2,
            Action::Left    => 3,
            Action::Right   => 4,
            Action::Pickup  => 5,
            Action::Dropoff => 6,
        }
    }

    /// Positional delta `(dx, dy)` for directional actions, `(0, 0)` otherwise.
    #[inline]
    pub fn delta(self) -> (i32, i32) {
        match self {
            Action::Up    => (0, -1),
            Action::Down  => (0, 1),
            Action::Left  => (-1, 0),
            Action::Right => (1, 0),
            _             => (0, 0),
        }
    }

    /// `true` for `Pickup` and `Dropoff`.
    #[inline]
    pub fn is_intent(self) -> bool {
        matches!(self, Action::Pickup | Action::Dropoff)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Action::Stay    => "stay",
            Action::Up      => "up",
            Action::Down    => "down",
            Action::Left    => "left",
            Action::Right   => "right",
            Action::Pickup  => "pickup",
            Action::Dropoff => "dropoff",
        }
    }
}

impl From<i64> for Action {
    fn from(code: i64) -> Self {
        Action::from_code(code)
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
