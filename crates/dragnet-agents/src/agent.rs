//! The investigation target: hidden weaknesses, attached sensors, and
//! exposure state.
//!
//! # Progress is recomputed, never cached
//!
//! Counterattacks physically remove entries from the attached-sensor
//! roster, so match progress must be able to go *down*. [`Agent::progress`]
//! therefore recomputes the bounded multiset intersection of attached
//! sensors against secret weaknesses on every call. The tri-state match
//! classification in [`Agent::attach`] derives from the same roster, so a
//! category stripped by a counterattack becomes matchable again.

use std::collections::BTreeMap;

use rand::Rng;
use rand::seq::IndexedRandom;
use tracing::{debug, info, warn};

use dragnet_types::{
    AgentId, AgentSummary, AttachmentResult, AttachmentStatus, MatchResult, ProgressSnapshot,
    Rank, SensorCategory,
};

use crate::error::AgentError;
use crate::weakness;

/// A captured agent under investigation.
#[derive(Debug, Clone)]
pub struct Agent {
    /// Unique identifier for log correlation.
    id: AgentId,
    /// The agent's rank, fixing weakness count and counterattack schedule.
    rank: Rank,
    /// Affiliation label revealed by the light sensor.
    affiliation: String,
    /// Hidden weakness multiset, length = `rank.required_matches()`.
    secret_weaknesses: Vec<SensorCategory>,
    /// Currently attached sensor categories, in attachment order.
    attached: Vec<SensorCategory>,
    /// Terminal flag; only the special reset can revoke it.
    exposed: bool,
    /// One-shot flag set by a magnetic block, consumed by the
    /// counterattack policy on its next check.
    counterattack_primed: bool,
    /// Variety toggle remembered for special-reset regeneration.
    ensure_variety: bool,
}

impl Agent {
    /// Create an agent of `rank` with freshly generated weaknesses.
    ///
    /// The baseline rank draws plain random weaknesses; every higher rank
    /// uses balanced generation so its larger multiset stays varied.
    pub fn new(
        rank: Rank,
        affiliation: impl Into<String>,
        ensure_variety: bool,
        rng: &mut impl Rng,
    ) -> Self {
        let count = rank.required_matches();
        let secret_weaknesses = match rank {
            Rank::FootSoldier => weakness::generate_random(count, rng),
            Rank::SquadLeader | Rank::SeniorCommander | Rank::OrganizationLeader => {
                weakness::generate_balanced(count, ensure_variety, rng)
            }
        };
        let agent = Self {
            id: AgentId::new(),
            rank,
            affiliation: affiliation.into(),
            secret_weaknesses,
            attached: Vec::new(),
            exposed: false,
            counterattack_primed: false,
            ensure_variety,
        };
        debug!(id = %agent.id, rank = %rank, "agent created");
        agent
    }

    /// Create an agent with a predefined weakness list.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::WeaknessCountMismatch`] when the list length
    /// does not equal the rank's required match count. The check runs
    /// before any state is built, so a misconfigured agent never enters a
    /// session.
    pub fn with_weaknesses(
        rank: Rank,
        affiliation: impl Into<String>,
        weaknesses: Vec<SensorCategory>,
    ) -> Result<Self, AgentError> {
        let expected = rank.required_matches();
        if weaknesses.len() != expected {
            return Err(AgentError::WeaknessCountMismatch {
                rank,
                expected,
                actual: weaknesses.len(),
            });
        }
        Ok(Self {
            id: AgentId::new(),
            rank,
            affiliation: affiliation.into(),
            secret_weaknesses: weaknesses,
            attached: Vec::new(),
            exposed: false,
            counterattack_primed: false,
            ensure_variety: true,
        })
    }

    /// The agent's identifier.
    pub const fn id(&self) -> AgentId {
        self.id
    }

    /// The agent's rank.
    pub const fn rank(&self) -> Rank {
        self.rank
    }

    /// The agent's affiliation label.
    pub fn affiliation(&self) -> &str {
        &self.affiliation
    }

    /// Whether the agent has been exposed.
    pub const fn is_exposed(&self) -> bool {
        self.exposed
    }

    /// Currently attached sensor categories, in attachment order.
    pub fn attached(&self) -> &[SensorCategory] {
        &self.attached
    }

    /// Current length of the hidden weakness multiset.
    pub fn weakness_count(&self) -> usize {
        self.secret_weaknesses.len()
    }

    /// Attach a sensor of `category` and classify the match.
    ///
    /// A no-op reported as [`AttachmentStatus::AlreadyExposed`] when the
    /// agent is already exposed. Otherwise the category joins the roster,
    /// the match is classified against the remaining weaknesses, and the
    /// agent flips to exposed once recomputed progress reaches the
    /// required count.
    pub fn attach(&mut self, category: SensorCategory) -> AttachmentResult {
        if self.exposed {
            return AttachmentResult {
                category,
                match_outcome: None,
                status: AttachmentStatus::AlreadyExposed,
                special_effect: None,
            };
        }

        self.attached.push(category);
        let match_outcome = self.classify_match(category);
        let progress = self.progress();

        let status = if progress.complete() {
            self.exposed = true;
            info!(id = %self.id, rank = %self.rank, "agent exposed");
            AttachmentStatus::AgentExposed
        } else {
            AttachmentStatus::Success
        };

        debug!(
            id = %self.id,
            category = %category,
            outcome = ?match_outcome,
            current = progress.current,
            required = progress.required,
            "sensor attached"
        );

        AttachmentResult {
            category,
            match_outcome: Some(match_outcome),
            status,
            special_effect: None,
        }
    }

    /// Classify the most recent attachment of `category` against the
    /// weakness multiset, bounded by how many instances the currently
    /// attached roster already consumes.
    fn classify_match(&self, category: SensorCategory) -> MatchResult {
        let total = self
            .secret_weaknesses
            .iter()
            .filter(|w| **w == category)
            .count();
        if total == 0 {
            return MatchResult::NoMatch;
        }
        let attached_count = self.attached.iter().filter(|a| **a == category).count();
        if attached_count <= total {
            MatchResult::Match
        } else {
            MatchResult::AlreadyMatched
        }
    }

    /// Recompute exposure progress from scratch.
    ///
    /// Bounded multiset intersection: each weakness instance can be
    /// consumed by at most one currently attached sensor of its category.
    pub fn progress(&self) -> ProgressSnapshot {
        let mut remaining: BTreeMap<SensorCategory, usize> = BTreeMap::new();
        for weakness in &self.secret_weaknesses {
            let slot = remaining.entry(*weakness).or_insert(0);
            *slot = slot.saturating_add(1);
        }

        let mut current = 0_usize;
        for attached in &self.attached {
            if let Some(count) = remaining.get_mut(attached) {
                if *count > 0 {
                    *count = count.saturating_sub(1);
                    current = current.saturating_add(1);
                }
            }
        }

        ProgressSnapshot {
            current,
            required: self.rank.required_matches(),
        }
    }

    /// Reveal one entry drawn uniformly from the *full* secret multiset
    /// (not just the unmatched remainder). `None` when the multiset is
    /// empty.
    pub fn reveal_one_weakness(&self, rng: &mut impl Rng) -> Option<SensorCategory> {
        self.secret_weaknesses.choose(rng).copied()
    }

    /// Remove up to `count` uniformly random sensors from the roster,
    /// without replacement. Returns the removed categories in removal
    /// order; fewer than `count` when the roster runs out.
    pub fn remove_random_attached(
        &mut self,
        count: usize,
        rng: &mut impl Rng,
    ) -> Vec<SensorCategory> {
        let mut removed = Vec::new();
        for _ in 0..count {
            if self.attached.is_empty() {
                break;
            }
            let index = rng.random_range(0..self.attached.len());
            if index < self.attached.len() {
                removed.push(self.attached.remove(index));
            }
        }
        if !removed.is_empty() {
            debug!(id = %self.id, removed = removed.len(), "counterattack removed sensors");
        }
        removed
    }

    /// The Organization Leader's full reset.
    ///
    /// Clears the roster, regenerates a balanced weakness multiset of the
    /// original required length, and revokes exposure -- even exposure
    /// reached earlier in the same investigation. Returns the categories
    /// that were stripped.
    pub fn special_reset(&mut self, rng: &mut impl Rng) -> Vec<SensorCategory> {
        let removed = core::mem::take(&mut self.attached);
        self.secret_weaknesses =
            weakness::generate_balanced(self.rank.required_matches(), self.ensure_variety, rng);
        self.exposed = false;
        warn!(
            id = %self.id,
            stripped = removed.len(),
            "special reset: fresh weaknesses, all sensors removed"
        );
        removed
    }

    /// Prime the one-shot counterattack block (magnetic sensor effect).
    pub(crate) const fn prime_counterattack_block(&mut self) {
        self.counterattack_primed = true;
    }

    /// Consume the one-shot counterattack block, returning whether it was
    /// set. The flag always resets to unset, fired or not.
    pub(crate) const fn take_counterattack_block(&mut self) -> bool {
        let primed = self.counterattack_primed;
        self.counterattack_primed = false;
        primed
    }

    /// Snapshot of the agent's externally visible state.
    pub fn summary(&self) -> AgentSummary {
        let mut attached: BTreeMap<SensorCategory, u32> = BTreeMap::new();
        for category in &self.attached {
            let slot = attached.entry(*category).or_insert(0);
            *slot = slot.saturating_add(1);
        }
        AgentSummary {
            rank: self.rank,
            affiliation: self.affiliation.clone(),
            exposed: self.exposed,
            attached,
        }
    }
}
