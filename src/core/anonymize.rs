//! Pseudonymization of analytics records.
//!
//! Every participant name in a record is replaced with a generated
//! "adjective + noun" pseudonym such as `ShadowDragon`. The mapping is a
//! bijection for one invocation and is never persisted.
//!
//! The random source is always passed in, so seeded generators give
//! reproducible output:
//!
//! ```rust
//! use chatstats::analyze_str;
//! use chatstats::core::anonymize::anonymize;
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! # fn main() -> chatstats::Result<()> {
//! let record = analyze_str("2024-01-01, 10:00 - Alice: hello\n2024-01-01, 10:05 - Bob: hi", None)?;
//!
//! let mut rng = StdRng::seed_from_u64(7);
//! let (names, anonymized) = anonymize(&record, &mut rng)?;
//!
//! assert_eq!(names.len(), 2);
//! assert!(!anonymized.messages_per_participant.contains_key("Alice"));
//! assert_eq!(anonymized.summary.total_messages, record.summary.total_messages);
//! # Ok(())
//! # }
//! ```

use std::collections::{BTreeMap, HashSet};

use rand::Rng;
use serde::Serialize;
use tracing::warn;

use crate::config::AnonymizeConfig;
use crate::core::analytics::AnalyticsRecord;
use crate::error::{ChatstatsError, Result};

/// Built-in pseudonym adjectives.
pub const ADJECTIVES: &[&str] = &[
    "Shadow",
    "Dark",
    "Mystic",
    "Thunder",
    "Fire",
    "Ice",
    "Storm",
    "Night",
    "Steel",
    "Golden",
    "Silver",
    "Crimson",
    "Azure",
    "Emerald",
    "Phantom",
    "Savage",
    "Wild",
    "Ancient",
    "Legendary",
    "Epic",
    "Divine",
    "Eternal",
];

/// Built-in pseudonym nouns.
pub const NOUNS: &[&str] = &[
    "Dragon",
    "Wolf",
    "Eagle",
    "Tiger",
    "Phoenix",
    "Warrior",
    "Knight",
    "Mage",
    "Hunter",
    "Rogue",
    "Paladin",
    "Assassin",
    "Archer",
    "Wizard",
    "Berserker",
    "Guardian",
    "Champion",
    "Slayer",
    "Templar",
    "Vanguard",
    "Sentinel",
    "Reaper",
    "Titan",
    "Gladiator",
    "Crusader",
    "Ranger",
];

// ============================================================================
// Name generation
// ============================================================================

/// Draws unique pseudonyms for one pseudonymization run.
///
/// Each draw picks an adjective and a noun independently and uniformly. A
/// name already handed out is redrawn up to the retry budget; after that the
/// smallest free numeric suffix (starting at 2) is appended, so generation
/// always terminates with a fresh name.
#[derive(Debug, Clone)]
pub struct NameGenerator {
    adjectives: Vec<String>,
    nouns: Vec<String>,
    retry_budget: usize,
    reserved: HashSet<String>,
}

impl NameGenerator {
    /// Creates a generator with the built-in word lists.
    pub fn new() -> Self {
        Self {
            adjectives: ADJECTIVES.iter().map(|s| (*s).to_string()).collect(),
            nouns: NOUNS.iter().map(|s| (*s).to_string()).collect(),
            retry_budget: AnonymizeConfig::default().retry_budget,
            reserved: HashSet::new(),
        }
    }

    /// Creates a generator with custom word lists.
    ///
    /// # Errors
    ///
    /// Returns [`ChatstatsError::EmptyVocabulary`] if either list is empty.
    pub fn with_words<A, N>(adjectives: A, nouns: N) -> Result<Self>
    where
        A: IntoIterator,
        A::Item: Into<String>,
        N: IntoIterator,
        N::Item: Into<String>,
    {
        let adjectives: Vec<String> = adjectives.into_iter().map(Into::into).collect();
        let nouns: Vec<String> = nouns.into_iter().map(Into::into).collect();
        if adjectives.is_empty() {
            return Err(ChatstatsError::EmptyVocabulary { list: "adjective" });
        }
        if nouns.is_empty() {
            return Err(ChatstatsError::EmptyVocabulary { list: "noun" });
        }
        Ok(Self {
            adjectives,
            nouns,
            ..Self::new()
        })
    }

    /// Sets how many draws are attempted before falling back to a suffix.
    #[must_use]
    pub fn with_retry_budget(mut self, budget: usize) -> Self {
        self.retry_budget = budget;
        self
    }

    /// Returns the number of distinct adjective/noun combinations.
    pub fn combinations(&self) -> usize {
        self.adjectives.len() * self.nouns.len()
    }

    /// Returns `true` if `name` has already been handed out.
    pub fn is_reserved(&self, name: &str) -> bool {
        self.reserved.contains(name)
    }

    /// Generates a pseudonym not handed out before by this generator.
    pub fn generate<R: Rng + ?Sized>(&mut self, rng: &mut R) -> String {
        let mut base = String::new();
        for _ in 0..self.retry_budget.max(1) {
            base = self.draw(rng);
            if self.reserved.insert(base.clone()) {
                return base;
            }
        }

        let name = (2u64..)
            .map(|n| format!("{base}{n}"))
            .find(|candidate| !self.reserved.contains(candidate))
            .unwrap_or_default();
        warn!(
            budget = self.retry_budget,
            pseudonym = %name,
            "pseudonym retry budget exhausted, using numeric suffix"
        );
        self.reserved.insert(name.clone());
        name
    }

    fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        let adjective = &self.adjectives[rng.gen_range(0..self.adjectives.len())];
        let noun = &self.nouns[rng.gen_range(0..self.nouns.len())];
        format!("{adjective}{noun}")
    }
}

impl Default for NameGenerator {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Name map
// ============================================================================

/// Real name to pseudonym mapping produced by one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct NameMap(BTreeMap<String, String>);

impl NameMap {
    /// Returns the pseudonym for a real name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates `(real, pseudonym)` pairs ordered by real name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns a copy of `record` with every participant name replaced.
    ///
    /// Names missing from the map are kept as they are. Fields that do not
    /// carry names are copied unchanged.
    pub fn apply(&self, record: &AnalyticsRecord) -> AnalyticsRecord {
        let mut out = record.clone();
        out.summary.participants = record
            .summary
            .participants
            .iter()
            .map(|p| self.rename(p))
            .collect();
        out.messages_per_participant = self.rename_keys(&record.messages_per_participant);
        out.message_types_per_participant =
            self.rename_keys(&record.message_types_per_participant);
        out.word_counts = self.rename_keys(&record.word_counts);
        out.avg_message_length = self.rename_keys(&record.avg_message_length);
        out
    }

    fn rename(&self, name: &str) -> String {
        self.get(name).unwrap_or(name).to_string()
    }

    fn rename_keys<V: Clone>(&self, map: &BTreeMap<String, V>) -> BTreeMap<String, V> {
        map.iter()
            .map(|(k, v)| (self.rename(k), v.clone()))
            .collect()
    }
}

impl FromIterator<(String, String)> for NameMap {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        NameMap(iter.into_iter().collect())
    }
}

// ============================================================================
// Entry points
// ============================================================================

/// Pseudonymizes a record with the built-in word lists and default budget.
///
/// # Errors
///
/// Returns [`ChatstatsError::EmptyParticipants`] if the record has no
/// participants.
pub fn anonymize<R: Rng + ?Sized>(
    record: &AnalyticsRecord,
    rng: &mut R,
) -> Result<(NameMap, AnalyticsRecord)> {
    anonymize_with(record, rng, &AnonymizeConfig::default())
}

/// Pseudonymizes a record with an explicit configuration.
///
/// # Errors
///
/// Returns [`ChatstatsError::EmptyParticipants`] if the record has no
/// participants.
pub fn anonymize_with<R: Rng + ?Sized>(
    record: &AnalyticsRecord,
    rng: &mut R,
    config: &AnonymizeConfig,
) -> Result<(NameMap, AnalyticsRecord)> {
    let generator = NameGenerator::new().with_retry_budget(config.retry_budget);
    anonymize_using(record, rng, generator)
}

/// Pseudonymizes a record with a caller-supplied generator.
///
/// # Errors
///
/// Returns [`ChatstatsError::EmptyParticipants`] if the record has no
/// participants.
pub fn anonymize_using<R: Rng + ?Sized>(
    record: &AnalyticsRecord,
    rng: &mut R,
    mut generator: NameGenerator,
) -> Result<(NameMap, AnalyticsRecord)> {
    if record.summary.participants.is_empty() {
        return Err(ChatstatsError::EmptyParticipants);
    }

    let names: NameMap = record
        .summary
        .participants
        .iter()
        .map(|real| (real.clone(), generator.generate(rng)))
        .collect();
    let anonymized = names.apply(record);
    Ok((names, anonymized))
}
