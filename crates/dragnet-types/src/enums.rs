//! Enumeration types for the Dragnet investigation engine.
//!
//! These are closed sets: exactly seven sensor categories participate in
//! weakness matching, and exactly four agent ranks exist. Absence of a
//! category ("no sensor selected") is expressed with `Option` at the API
//! boundary rather than a sentinel variant, so a [`SensorCategory`] value
//! is always a valid, matchable category.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// SensorCategory
// ---------------------------------------------------------------------------

/// A sensor category, which doubles as a weakness category.
///
/// An agent's hidden weakness multiset is drawn from these seven values,
/// and every deployable sensor carries exactly one of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SensorCategory {
    /// Plain matcher with no special ability.
    Audio,
    /// Reveals one random entry from the agent's full secret weakness list.
    Thermal,
    /// Limited-usage matcher: breaks permanently after 3 deployments.
    Pulse,
    /// Limited-usage matcher: breaks permanently after 3 deployments.
    Motion,
    /// Matcher that can also block the agent's next counterattack (2 uses).
    Magnetic,
    /// Matcher that reveals the agent's rank.
    Signal,
    /// Matcher that reveals the agent's rank and affiliation.
    Light,
}

impl SensorCategory {
    /// All seven categories in menu order.
    pub const ALL: [Self; 7] = [
        Self::Audio,
        Self::Thermal,
        Self::Pulse,
        Self::Motion,
        Self::Magnetic,
        Self::Signal,
        Self::Light,
    ];

    /// Parse a 1-based menu choice into a category.
    ///
    /// Returns `None` for anything outside `1..=7`, which is how the
    /// presentation layer's "no sensor selected" sentinel and stray input
    /// surface without a sentinel variant existing in this enum.
    pub const fn from_choice(choice: u8) -> Option<Self> {
        match choice {
            1 => Some(Self::Audio),
            2 => Some(Self::Thermal),
            3 => Some(Self::Pulse),
            4 => Some(Self::Motion),
            5 => Some(Self::Magnetic),
            6 => Some(Self::Signal),
            7 => Some(Self::Light),
            _ => None,
        }
    }

    /// Whether this category breaks after a fixed number of deployments.
    pub const fn is_limited_use(self) -> bool {
        matches!(self, Self::Pulse | Self::Motion)
    }

    /// Static help text describing the category's behaviour.
    pub const fn description(self) -> &'static str {
        match self {
            Self::Audio => "Basic sensor. No special ability.",
            Self::Thermal => "Reveals one entry from the agent's secret weakness list.",
            Self::Pulse => "Can activate 3 times total, then breaks.",
            Self::Motion => "Can activate 3 times total, then breaks.",
            Self::Magnetic => "Blocks the agent's next counterattack, twice per investigation.",
            Self::Signal => "Reveals the agent's rank.",
            Self::Light => "Reveals the agent's rank and affiliation.",
        }
    }

    /// Short display name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Audio => "Audio",
            Self::Thermal => "Thermal",
            Self::Pulse => "Pulse",
            Self::Motion => "Motion",
            Self::Magnetic => "Magnetic",
            Self::Signal => "Signal",
            Self::Light => "Light",
        }
    }
}

impl core::fmt::Display for SensorCategory {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Rank
// ---------------------------------------------------------------------------

/// The rank of a captured agent, ordered by increasing difficulty.
///
/// Each rank fixes the size of the hidden weakness multiset and the
/// counterattack schedule. These attributes are invariant -- they are part
/// of the game's rules, not configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rank {
    /// Easiest target: 2 weaknesses, never counterattacks.
    FootSoldier,
    /// 4 weaknesses; removes 1 sensor every 3rd turn.
    SquadLeader,
    /// 6 weaknesses; removes 2 sensors every 3rd turn.
    SeniorCommander,
    /// 8 weaknesses; removes 1 sensor every 3rd turn and fully resets
    /// the investigation every 10th turn.
    OrganizationLeader,
}

impl Rank {
    /// All four ranks in difficulty order.
    pub const ALL: [Self; 4] = [
        Self::FootSoldier,
        Self::SquadLeader,
        Self::SeniorCommander,
        Self::OrganizationLeader,
    ];

    /// Number of matched sensors required to expose an agent of this rank.
    ///
    /// Also the length of the hidden weakness multiset.
    pub const fn required_matches(self) -> usize {
        match self {
            Self::FootSoldier => 2,
            Self::SquadLeader => 4,
            Self::SeniorCommander => 6,
            Self::OrganizationLeader => 8,
        }
    }

    /// Turn cadence of the regular counterattack, if this rank has one.
    ///
    /// A cadence of 3 means the attack fires on turns 3, 6, 9, ...
    pub const fn counterattack_cadence(self) -> Option<u64> {
        match self {
            Self::FootSoldier => None,
            Self::SquadLeader | Self::SeniorCommander | Self::OrganizationLeader => Some(3),
        }
    }

    /// Number of sensors a regular counterattack removes.
    pub const fn counterattack_strength(self) -> usize {
        match self {
            Self::FootSoldier => 0,
            Self::SquadLeader | Self::OrganizationLeader => 1,
            Self::SeniorCommander => 2,
        }
    }

    /// Turn cadence of the special full reset, if this rank has one.
    pub const fn special_reset_cadence(self) -> Option<u64> {
        match self {
            Self::OrganizationLeader => Some(10),
            Self::FootSoldier | Self::SquadLeader | Self::SeniorCommander => None,
        }
    }

    /// Whether this rank can perform the special full reset.
    pub const fn has_special_reset(self) -> bool {
        self.special_reset_cadence().is_some()
    }

    /// Static help text describing this rank's counterattack behaviour.
    pub const fn counterattack_summary(self) -> &'static str {
        match self {
            Self::FootSoldier => "No counterattack",
            Self::SquadLeader => "Every 3 turns: removes 1 sensor",
            Self::SeniorCommander => "Every 3 turns: removes 2 sensors",
            Self::OrganizationLeader => {
                "Every 3 turns: removes 1 sensor | Every 10 turns: resets all weaknesses"
            }
        }
    }

    /// Short display name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::FootSoldier => "Foot Soldier",
            Self::SquadLeader => "Squad Leader",
            Self::SeniorCommander => "Senior Commander",
            Self::OrganizationLeader => "Organization Leader",
        }
    }
}

impl core::fmt::Display for Rank {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// MatchResult
// ---------------------------------------------------------------------------

/// Outcome of comparing one deployed sensor against the remaining
/// (unmatched) portion of the weakness multiset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchResult {
    /// An unconsumed instance of this category exists -- progress advances.
    Match,
    /// The category is present but every instance is already matched by a
    /// currently attached sensor.
    AlreadyMatched,
    /// The category does not appear in the weakness multiset at all.
    NoMatch,
}

impl MatchResult {
    /// Whether this outcome advanced progress.
    pub const fn is_match(self) -> bool {
        matches!(self, Self::Match)
    }
}

// ---------------------------------------------------------------------------
// AttachmentStatus
// ---------------------------------------------------------------------------

/// Terminal status of one sensor deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttachmentStatus {
    /// Sensor attached; the agent is not yet exposed.
    Success,
    /// Sensor attached and its match completed the exposure.
    AgentExposed,
    /// The agent was already exposed; nothing changed.
    AlreadyExposed,
    /// The sensor is permanently broken; nothing changed.
    SensorBroken,
}

impl AttachmentStatus {
    /// Whether the deployment attached a sensor to the agent.
    pub const fn is_success(self) -> bool {
        matches!(self, Self::Success | Self::AgentExposed)
    }
}

// ---------------------------------------------------------------------------
// CounterattackKind
// ---------------------------------------------------------------------------

/// What kind of counterattack, if any, resolved on a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CounterattackKind {
    /// Nothing fired this turn.
    None,
    /// Rank-strength sensor removal.
    Regular,
    /// Organization Leader full reset: all sensors removed, fresh
    /// weaknesses, exposure revoked.
    SpecialReset,
}

// ---------------------------------------------------------------------------
// SessionState
// ---------------------------------------------------------------------------

/// Lifecycle state of an investigation session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    /// Session created but no agent assigned yet.
    ///
    /// The engine's `start` constructors assign the agent and move to
    /// [`Self::InProgress`] in one step, so this state is never observable
    /// through a started session. It exists for hosts that stage a session
    /// record (rank selection, config editing) before starting play.
    Setup,
    /// Investigation underway; turns may be taken.
    InProgress,
    /// Terminal: the agent was exposed.
    Won,
    /// Terminal: the player quit.
    Aborted,
}

impl SessionState {
    /// Whether the session has reached a terminal state.
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Won | Self::Aborted)
    }
}

impl core::fmt::Display for SessionState {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let label = match self {
            Self::Setup => "setup",
            Self::InProgress => "in progress",
            Self::Won => "won",
            Self::Aborted => "aborted",
        };
        f.write_str(label)
    }
}
