use core::time::Duration;

use crate::ship::ShipClass;

/// Side length of the square grid.
pub const BOARD_SIZE: usize = 10;

/// The standard fleet, largest first. Ship ids are assigned in this order
/// starting at 1.
pub const FLEET: [ShipClass; 5] = [
    ShipClass::new("Carrier", 5),
    ShipClass::new("Battleship", 4),
    ShipClass::new("Cruiser", 3),
    ShipClass::new("Submarine", 3),
    ShipClass::new("Destroyer", 2),
];

/// Lengths of [`FLEET`] in placement order.
pub const FLEET_SIZES: [usize; 5] = [5, 4, 3, 3, 2];

/// Total number of ship segments in the standard fleet.
pub const TOTAL_SHIP_CELLS: usize = 5 + 4 + 3 + 3 + 2;

/// Default pause before the opponent fires.
pub const DEFAULT_THINKING_DELAY: Duration = Duration::from_millis(1000);

/// Knobs for a match host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchConfig {
    /// Pause between the player's attack and the opponent's reply.
    pub thinking_delay: Duration,
    /// Fixed seed for reproducible fleets and opponent choices.
    pub seed: Option<u64>,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            thinking_delay: DEFAULT_THINKING_DELAY,
            seed: None,
        }
    }
}

impl MatchConfig {
    /// Defaults overlaid with `BROADSIDE_THINK_MS` and `BROADSIDE_SEED`.
    /// Unparseable values are ignored.
    #[cfg(feature = "std")]
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(ms) = std::env::var("BROADSIDE_THINK_MS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
        {
            config.thinking_delay = Duration::from_millis(ms);
        }
        if let Some(seed) = std::env::var("BROADSIDE_SEED")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
        {
            config.seed = Some(seed);
        }
        config
    }
}

/// Name of the fleet class a ship id was assigned from, if any.
pub fn class_name(id: crate::ship::ShipId) -> Option<&'static str> {
    let idx = (id.get() as usize).checked_sub(1)?;
    FLEET.get(idx).map(|class| class.name())
}
