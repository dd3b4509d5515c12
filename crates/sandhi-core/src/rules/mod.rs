//! Immutable sandhi rule tables.
//!
//! A `RuleTable` is built once from TOML (the embedded default, or a custom
//! source installed with `init_custom`) or from a compiled rule file, and is
//! shared read-only by every caller. Lookup order lives in `lookup.rs`.

mod config;
mod io;
mod lookup;

use std::collections::{BTreeMap, BTreeSet};
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use tracing::debug;

pub use config::{default_toml, parse_rules_toml, RuleConfigError};
pub use io::RuleIoError;
pub use lookup::Transformation;

pub(crate) const DEFAULT_TOML: &str = include_str!("default_rules.toml");

static CUSTOM_TOML: OnceLock<String> = OnceLock::new();

/// The family of euphonic change applied at a boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    Assimilation,
    Cluster,
    Gemination,
    Deletion,
    VisargaRule,
    VowelCoalescence,
    NoRule,
}

/// Which table produced a transformation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleSource {
    Literal,
    Lookahead,
    Assimilation,
    VowelConsonant,
    Cluster,
    Gemination,
    VowelVowel,
    Deletion,
}

/// Where a rule may fire.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleScope {
    #[default]
    Any,
    /// Only across a word boundary (pada-final changes).
    Word,
}

/// The kind of boundary being evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Juncture {
    Word,
    Internal,
}

impl Juncture {
    fn admits(self, scope: RuleScope) -> bool {
        scope == RuleScope::Any || self == Juncture::Word
    }
}

/// left text → right initial → value.
pub(crate) type PairMap<V> = BTreeMap<String, BTreeMap<String, V>>;

pub(crate) fn pair_get<'m, V>(map: &'m PairMap<V>, left: &str, right: &str) -> Option<&'m V> {
    map.get(left).and_then(|inner| inner.get(right))
}

fn pair_count<V>(map: &PairMap<V>) -> usize {
    map.values().map(|inner| inner.len()).sum()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct LiteralEntry {
    pub output: String,
    pub kind: RuleKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct PairEntry {
    pub output: String,
    pub merge: bool,
    pub scope: RuleScope,
    pub kind: RuleKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct VisargaEntry {
    /// Vowel preceding the visarga.
    pub after: BTreeSet<String>,
    /// Initial of the following unit.
    pub before: BTreeSet<String>,
    /// Replacement for the preceding vowel, if it changes.
    pub vowel: Option<String>,
    /// Text written in place of the visarga.
    pub append: String,
    pub seal: bool,
}

/// Expanded, order-free rule data. Row order only matters for visarga rules.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub(crate) struct RuleData {
    pub literal: PairMap<LiteralEntry>,
    pub lookahead_clusters: PairMap<String>,
    pub visarga: Vec<VisargaEntry>,
    pub assimilation: PairMap<PairEntry>,
    pub vowel_consonant: PairMap<PairEntry>,
    pub cluster_exceptions: PairMap<()>,
    pub gemination: PairMap<PairEntry>,
    pub vowel_vowel: PairMap<String>,
    pub deletion: PairMap<()>,
}

impl RuleData {
    fn rule_count(&self) -> usize {
        pair_count(&self.literal)
            + pair_count(&self.lookahead_clusters)
            + self.visarga.len()
            + pair_count(&self.assimilation)
            + pair_count(&self.vowel_consonant)
            + pair_count(&self.gemination)
            + pair_count(&self.vowel_vowel)
            + pair_count(&self.deletion)
    }
}

/// Per-table rule counts, for diagnostics.
#[derive(Debug, Clone, Serialize)]
pub struct RuleStats {
    pub version: u32,
    pub literal: usize,
    pub lookahead_clusters: usize,
    pub visarga: usize,
    pub assimilation: usize,
    pub vowel_consonant: usize,
    pub cluster_exceptions: usize,
    pub gemination: usize,
    pub vowel_vowel: usize,
    pub deletion: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RuleTable {
    data: RuleData,
    version: u32,
}

impl RuleTable {
    pub(crate) fn from_data(data: RuleData) -> Self {
        let version = bincode::serialize(&data)
            .map(|body| crc32fast::hash(&body))
            .unwrap_or(0);
        debug!(version, rules = data.rule_count(), "rule table built");
        Self { data, version }
    }

    /// Set custom TOML before first `global()` call.
    pub fn init_custom(toml_content: String) -> Result<(), RuleConfigError> {
        parse_rules_toml(&toml_content)?;
        CUSTOM_TOML
            .set(toml_content)
            .map_err(|_| RuleConfigError::AlreadyInitialized)
    }

    /// Get or initialize the global table.
    pub fn global() -> &'static RuleTable {
        static INSTANCE: OnceLock<RuleTable> = OnceLock::new();
        INSTANCE.get_or_init(|| {
            let toml_str = CUSTOM_TOML
                .get()
                .map(|s| s.as_str())
                .unwrap_or(DEFAULT_TOML);
            parse_rules_toml(toml_str).expect("rules TOML must be valid")
        })
    }

    /// Stamp identifying the rule content; equal tables share a stamp.
    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn rule_count(&self) -> usize {
        self.data.rule_count()
    }

    /// All literal overrides as `(left, right, output)`.
    pub fn literal_pairs(&self) -> impl Iterator<Item = (&str, &str, &str)> {
        self.data.literal.iter().flat_map(|(left, inner)| {
            inner
                .iter()
                .map(move |(right, e)| (left.as_str(), right.as_str(), e.output.as_str()))
        })
    }

    pub fn stats(&self) -> RuleStats {
        let d = &self.data;
        RuleStats {
            version: self.version,
            literal: pair_count(&d.literal),
            lookahead_clusters: pair_count(&d.lookahead_clusters),
            visarga: d.visarga.len(),
            assimilation: pair_count(&d.assimilation),
            vowel_consonant: pair_count(&d.vowel_consonant),
            cluster_exceptions: pair_count(&d.cluster_exceptions),
            gemination: pair_count(&d.gemination),
            vowel_vowel: pair_count(&d.vowel_vowel),
            deletion: pair_count(&d.deletion),
        }
    }
}
