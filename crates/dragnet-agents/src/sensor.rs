//! Sensor state: usage, breakage, and counterattack-block capacity.
//!
//! Sensors are plain values carrying a category tag plus optional
//! capability records, dispatched by `match` -- no inheritance hierarchy.
//! Two capabilities carry mutable state:
//!
//! - **Breakage** (Pulse, Motion): a usage counter capped at
//!   [`MAX_USES`]. Reaching the cap breaks the sensor permanently; a
//!   broken sensor refuses deployment without touching the counter.
//! - **Blocking** (Magnetic): an independent counter capped at
//!   [`MAX_BLOCKS`]. Each consumed block primes the agent to skip its
//!   next scheduled counterattack. Blocking is unrelated to breakage --
//!   an exhausted magnetic sensor still matches.
//!
//! One [`SensorPool`] per investigation holds a single sensor instance
//! per category; state persists across turns and resets only when a new
//! investigation starts (a new pool is built).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use dragnet_types::SensorCategory;

/// Deployments before a limited-usage sensor breaks permanently.
pub const MAX_USES: u32 = 3;

/// Counterattack blocks a magnetic sensor can provide per investigation.
pub const MAX_BLOCKS: u32 = 2;

// ---------------------------------------------------------------------------
// Capability records
// ---------------------------------------------------------------------------

/// Usage/breakage state for limited-usage sensors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
struct BreakageState {
    /// Completed deployments. The sensor is broken once this reaches
    /// [`MAX_USES`].
    uses: u32,
}

/// Block-capacity state for the magnetic sensor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
struct BlockState {
    /// Blocks consumed so far, capped at [`MAX_BLOCKS`].
    consumed: u32,
}

// ---------------------------------------------------------------------------
// SensorAvailability
// ---------------------------------------------------------------------------

/// Availability of one pooled sensor, for status displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SensorAvailability {
    /// No usage or block limits apply.
    Ready,
    /// Limited-usage sensor with this many deployments left.
    UsesLeft(u32),
    /// Limited-usage sensor that has broken permanently.
    Broken,
    /// Magnetic sensor with this many counterattack blocks left.
    BlocksLeft(u32),
}

impl core::fmt::Display for SensorAvailability {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Ready => f.write_str("ready"),
            Self::UsesLeft(n) => write!(f, "{n} uses left"),
            Self::Broken => f.write_str("broken"),
            Self::BlocksLeft(n) => write!(f, "{n} blocks left"),
        }
    }
}

// ---------------------------------------------------------------------------
// Sensor
// ---------------------------------------------------------------------------

/// One deployable sensor with its per-investigation state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sensor {
    /// The sensor's category.
    category: SensorCategory,
    /// Present only for limited-usage categories (Pulse, Motion).
    breakage: Option<BreakageState>,
    /// Present only for the magnetic sensor.
    blocks: Option<BlockState>,
}

impl Sensor {
    /// Create a fresh sensor for `category` with zeroed counters.
    pub fn new(category: SensorCategory) -> Self {
        Self {
            category,
            breakage: category.is_limited_use().then(BreakageState::default),
            blocks: (category == SensorCategory::Magnetic).then(BlockState::default),
        }
    }

    /// The sensor's category.
    pub const fn category(&self) -> SensorCategory {
        self.category
    }

    /// Whether the sensor has broken permanently.
    pub fn is_broken(&self) -> bool {
        self.breakage.is_some_and(|b| b.uses >= MAX_USES)
    }

    /// Deployments left before breakage, for limited-usage sensors.
    pub fn uses_remaining(&self) -> Option<u32> {
        self.breakage.map(|b| MAX_USES.saturating_sub(b.uses))
    }

    /// Counterattack blocks left, for the magnetic sensor.
    pub fn blocks_remaining(&self) -> Option<u32> {
        self.blocks.map(|b| MAX_BLOCKS.saturating_sub(b.consumed))
    }

    /// Record one completed deployment on a limited-usage sensor.
    ///
    /// Callers must check [`Self::is_broken`] first; the counter is a hard
    /// ceiling and never moves past [`MAX_USES`].
    pub(crate) fn record_use(&mut self) {
        if let Some(breakage) = self.breakage.as_mut() {
            breakage.uses = breakage.uses.saturating_add(1).min(MAX_USES);
            if breakage.uses >= MAX_USES {
                debug!(category = %self.category, "sensor broke after maximum usage");
            }
        }
    }

    /// Consume one counterattack block, if capacity remains.
    ///
    /// Returns `true` when a block was consumed. Non-magnetic sensors and
    /// exhausted magnetic sensors return `false`.
    pub(crate) fn consume_block(&mut self) -> bool {
        match self.blocks.as_mut() {
            Some(blocks) if blocks.consumed < MAX_BLOCKS => {
                blocks.consumed = blocks.consumed.saturating_add(1);
                true
            }
            _ => false,
        }
    }

    /// Availability of this sensor for status displays.
    pub fn availability(&self) -> SensorAvailability {
        if self.is_broken() {
            return SensorAvailability::Broken;
        }
        if let Some(uses) = self.uses_remaining() {
            return SensorAvailability::UsesLeft(uses);
        }
        if let Some(blocks) = self.blocks_remaining() {
            return SensorAvailability::BlocksLeft(blocks);
        }
        SensorAvailability::Ready
    }
}

// ---------------------------------------------------------------------------
// SensorPool
// ---------------------------------------------------------------------------

/// One sensor instance per category, owned by an investigation session.
///
/// The pool is the unit of sensor-state lifetime: usage, breakage, and
/// block counters persist across turns within one investigation and reset
/// only when a fresh pool is created for the next one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensorPool {
    /// The pooled sensors, one per category.
    sensors: BTreeMap<SensorCategory, Sensor>,
}

impl SensorPool {
    /// Create a pool with a fresh sensor for every category.
    pub fn new() -> Self {
        let sensors = SensorCategory::ALL
            .iter()
            .map(|category| (*category, Sensor::new(*category)))
            .collect();
        Self { sensors }
    }

    /// Whether the pooled sensor for `category` is broken.
    pub fn is_broken(&self, category: SensorCategory) -> bool {
        self.sensors.get(&category).is_some_and(Sensor::is_broken)
    }

    /// Availability of the pooled sensor for `category`.
    pub fn availability(&self, category: SensorCategory) -> SensorAvailability {
        self.sensors
            .get(&category)
            .map_or(SensorAvailability::Ready, Sensor::availability)
    }

    /// Availability of every pooled sensor, in category order.
    pub fn availability_report(&self) -> BTreeMap<SensorCategory, SensorAvailability> {
        self.sensors
            .iter()
            .map(|(category, sensor)| (*category, sensor.availability()))
            .collect()
    }

    /// Mutable access to the pooled sensor for `category`.
    ///
    /// The pool is constructed with every category present; the entry
    /// fallback upholds that invariant rather than panicking.
    pub fn sensor_mut(&mut self, category: SensorCategory) -> &mut Sensor {
        self.sensors
            .entry(category)
            .or_insert_with(|| Sensor::new(category))
    }
}

impl Default for SensorPool {
    fn default() -> Self {
        Self::new()
    }
}
