//! The game clock: wall-clock time since the run started mapped onto a
//! coarse act label. Act thresholds are fixed; only cooldown minutes are
//! configurable.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Minutes of elapsed play before act II begins.
const ACT_II_AFTER_MINUTES: u64 = 30;
/// Minutes of elapsed play before act III begins.
const ACT_III_AFTER_MINUTES: u64 = 75;

/// Coarse time-based phase of the running game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum Act {
    /// First 30 minutes.
    #[serde(rename = "ACT_I")]
    I,
    /// Minutes 30 to 75.
    #[serde(rename = "ACT_II")]
    II,
    /// Everything after minute 75.
    #[serde(rename = "ACT_III")]
    III,
}

/// Milliseconds in `n` minutes.
pub const fn minutes_ms(n: u64) -> u64 {
    n * 60_000
}

/// Current wall-clock time as epoch milliseconds.
pub fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

/// Act at `now` for a game started at `started_at`, or `None` while the game
/// has not started. A start timestamp in the future clamps to act I.
pub fn act_at(started_at: Option<u64>, now: u64) -> Option<Act> {
    let started = started_at?;
    let elapsed = now.saturating_sub(started);
    if elapsed < minutes_ms(ACT_II_AFTER_MINUTES) {
        Some(Act::I)
    } else if elapsed < minutes_ms(ACT_III_AFTER_MINUTES) {
        Some(Act::II)
    } else {
        Some(Act::III)
    }
}

/// Act used by timed abilities. Before the run starts this degrades to act I,
/// mirroring how the abilities behave in the lobby.
pub fn current_act(started_at: Option<u64>, now: u64) -> Act {
    act_at(started_at, now).unwrap_or(Act::I)
}

#[cfg(test)]
mod tests {
    use super::*;

    const START: u64 = 1_700_000_000_000;

    #[test]
    fn not_started_has_no_act() {
        assert_eq!(act_at(None, START), None);
    }

    #[test]
    fn act_progression_over_the_evening() {
        assert_eq!(act_at(Some(START), START + minutes_ms(10)), Some(Act::I));
        assert_eq!(act_at(Some(START), START + minutes_ms(40)), Some(Act::II));
        assert_eq!(act_at(Some(START), START + minutes_ms(80)), Some(Act::III));
    }

    #[test]
    fn act_boundaries_are_exclusive_below() {
        assert_eq!(act_at(Some(START), START + minutes_ms(30) - 1), Some(Act::I));
        assert_eq!(act_at(Some(START), START + minutes_ms(30)), Some(Act::II));
        assert_eq!(act_at(Some(START), START + minutes_ms(75) - 1), Some(Act::II));
        assert_eq!(act_at(Some(START), START + minutes_ms(75)), Some(Act::III));
    }

    #[test]
    fn future_start_clamps_to_act_one() {
        assert_eq!(act_at(Some(START + 1000), START), Some(Act::I));
    }

    #[test]
    fn lobby_abilities_count_against_act_one() {
        assert_eq!(current_act(None, START), Act::I);
    }
}
