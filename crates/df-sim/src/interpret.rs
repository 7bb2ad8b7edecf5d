//! Action interpretation: one action → a requested cell or an intent.

use df_core::{Action, GridCoord, GridGeometry};

/// A non-movement request evaluated at the agent's final cell.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Intent {
    Pickup,
    Dropoff,
}

/// What an agent asked for this tick.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Interpretation {
    /// Requested cell.  The current cell for `Stay` and intents.
    pub destination: GridCoord,
    pub intent:      Option<Intent>,
}

/// Pure mapping from actions to requests.  Never fails: anything that is
/// not a usable move or intent means "stay, no intent".
#[derive(Copy, Clone, Debug)]
pub struct ActionInterpreter {
    grid:           GridGeometry,
    pickup_dropoff: bool,
}

impl ActionInterpreter {
    pub fn new(grid: GridGeometry, pickup_dropoff: bool) -> Self {
        Self { grid, pickup_dropoff }
    }

    pub fn interpret(&self, action: Action, position: GridCoord) -> Interpretation {
        let intent = match action {
            Action::Pickup if self.pickup_dropoff => Some(Intent::Pickup),
            Action::Dropoff if self.pickup_dropoff => Some(Intent::Dropoff),
            _ => None,
        };
        let (dx, dy) = action.delta();
        Interpretation {
            destination: self.grid.clamp_step(position, dx, dy),
            intent,
        }
    }
}
