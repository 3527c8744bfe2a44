//! Turn-indexed counterattack scheduling and resolution.
//!
//! The schedule is a pure function of rank and the 1-based absolute turn
//! number; only sensor-deploying turns advance that number, so status and
//! help queries can never trigger an attack.
//!
//! On a deploying turn the session resolves the counterattack *before*
//! attaching the new sensor: an attack can strip previously matched
//! sensors in the same turn a new one is added, but never the sensor the
//! player is about to deploy.
//!
//! A magnetic block primes a one-shot flag on the agent. The resolution
//! consults and clears that flag before anything fires -- if set, no
//! counterattack occurs this turn at all, not even the special reset. The
//! flag is consumed by the next resolution whether or not an attack was
//! scheduled, so an early block can be wasted on a quiet turn.

use rand::Rng;
use tracing::{debug, info};

use dragnet_types::{CounterattackEvent, CounterattackKind, Rank};

use crate::agent::Agent;

/// Whether `turn` falls on the rank's regular attack cadence.
///
/// Pure schedule arithmetic: resolution precedence and magnetic blocking
/// are layered on top, so a turn can satisfy this predicate and still
/// fire the special reset instead.
pub fn regular_scheduled(rank: Rank, turn: u64) -> bool {
    turn > 0
        && rank
            .counterattack_cadence()
            .is_some_and(|cadence| turn.checked_rem(cadence) == Some(0))
}

/// Whether `turn` falls on the rank's special reset cadence.
pub fn reset_scheduled(rank: Rank, turn: u64) -> bool {
    turn > 0
        && rank
            .special_reset_cadence()
            .is_some_and(|cadence| turn.checked_rem(cadence) == Some(0))
}

/// What the schedule alone says about `turn` for `rank`.
///
/// For the Organization Leader a turn divisible by both cadences fires
/// only the special reset: the two effects are mutually exclusive per
/// turn, and the reset wins.
pub fn scheduled_kind(rank: Rank, turn: u64) -> CounterattackKind {
    if reset_scheduled(rank, turn) {
        CounterattackKind::SpecialReset
    } else if regular_scheduled(rank, turn) {
        CounterattackKind::Regular
    } else {
        CounterattackKind::None
    }
}

/// Resolve the counterattack phase for `turn` against `agent`.
///
/// Consumes the agent's one-shot block flag first, then applies whatever
/// the schedule dictates. Regular attacks remove rank-strength sensors
/// uniformly at random (an event with an empty removal list when the
/// roster is empty); the special reset strips everything and regenerates
/// the weaknesses.
pub fn resolve(agent: &mut Agent, turn: u64, rng: &mut impl Rng) -> CounterattackEvent {
    let scheduled = scheduled_kind(agent.rank(), turn);
    let primed = agent.take_counterattack_block();

    if primed {
        if matches!(scheduled, CounterattackKind::None) {
            // The block was consumed by a quiet turn.
            debug!(turn, "magnetic block consumed with no attack scheduled");
            return CounterattackEvent::quiet();
        }
        info!(turn, kind = ?scheduled, "scheduled counterattack blocked by magnetic field");
        return CounterattackEvent::blocked();
    }

    match scheduled {
        CounterattackKind::None => CounterattackEvent::quiet(),
        CounterattackKind::Regular => {
            let strength = agent.rank().counterattack_strength();
            let removed = agent.remove_random_attached(strength, rng);
            if removed.is_empty() {
                debug!(turn, "counterattack fired with no sensors to remove");
            } else {
                info!(turn, removed = removed.len(), "regular counterattack removed sensors");
            }
            CounterattackEvent {
                kind: CounterattackKind::Regular,
                removed,
                blocked: false,
            }
        }
        CounterattackKind::SpecialReset => {
            let removed = agent.special_reset(rng);
            info!(turn, removed = removed.len(), "special reset counterattack");
            CounterattackEvent {
                kind: CounterattackKind::SpecialReset,
                removed,
                blocked: false,
            }
        }
    }
}
