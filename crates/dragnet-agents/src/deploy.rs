//! The uniform sensor deployment contract.
//!
//! Every deployment, regardless of category, follows the same procedure:
//!
//! 1. A broken sensor refuses outright -- no attachment, no match
//!    attempt, no usage change.
//! 2. The sensor attaches to the agent and the match is classified.
//! 3. The category's special effect runs against the agent, producing
//!    optional descriptive text (reveals, block priming, exhaustion
//!    warnings).
//! 4. Limited-usage sensors record the completed deployment, breaking at
//!    the cap.
//! 5. The attach outcome and effect text merge into one
//!    [`AttachmentResult`].
//!
//! Deployment runs *after* the turn's counterattack resolution, so the
//! sensor being deployed can never be removed by this turn's attack.

use rand::Rng;
use tracing::debug;

use dragnet_types::{AttachmentResult, AttachmentStatus, SensorCategory};

use crate::agent::Agent;
use crate::sensor::{MAX_BLOCKS, Sensor};

/// Deploy `sensor` onto `agent` on the given turn.
///
/// Returns the merged [`AttachmentResult`]; all failure modes are
/// statuses, never errors.
pub fn deploy(
    sensor: &mut Sensor,
    agent: &mut Agent,
    turn: u64,
    rng: &mut impl Rng,
) -> AttachmentResult {
    let category = sensor.category();

    if sensor.is_broken() {
        debug!(turn, category = %category, "deployment refused: sensor broken");
        return AttachmentResult {
            category,
            match_outcome: None,
            status: AttachmentStatus::SensorBroken,
            special_effect: None,
        };
    }

    let mut result = agent.attach(category);
    if result.status == AttachmentStatus::AlreadyExposed {
        // Nothing attached: skip effects and usage so the no-op stays a
        // true no-op.
        return result;
    }

    result.special_effect = apply_special_effect(sensor, agent, rng);
    sensor.record_use();

    debug!(turn, category = %category, status = ?result.status, "sensor deployed");
    result
}

/// Run the category's special effect and describe it.
///
/// Matching and effects are independent: a magnetic sensor participates
/// in weakness matching even while blocking, and reveals never count as
/// matches beyond the normal matching rule.
fn apply_special_effect(
    sensor: &mut Sensor,
    agent: &mut Agent,
    rng: &mut impl Rng,
) -> Option<String> {
    match sensor.category() {
        SensorCategory::Audio | SensorCategory::Pulse | SensorCategory::Motion => None,
        SensorCategory::Thermal => Some(agent.reveal_one_weakness(rng).map_or_else(
            || String::from("Thermal scan found no weakness to reveal"),
            |weakness| format!("Thermal scan reveals a weakness: {weakness}"),
        )),
        SensorCategory::Magnetic => {
            if sensor.consume_block() {
                agent.prime_counterattack_block();
                let left = sensor.blocks_remaining().unwrap_or(0);
                Some(format!(
                    "Magnetic field primed to block the next counterattack ({left}/{MAX_BLOCKS} blocks left)"
                ))
            } else {
                Some(String::from(
                    "Magnetic blocking capacity exhausted; sensor matched without blocking",
                ))
            }
        }
        SensorCategory::Signal => Some(format!(
            "Signal intercept reveals: agent rank is {}",
            agent.rank()
        )),
        SensorCategory::Light => Some(format!(
            "Light analysis reveals: agent rank is {}, affiliation: {}",
            agent.rank(),
            agent.affiliation()
        )),
    }
}
