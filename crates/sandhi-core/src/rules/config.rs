use std::collections::BTreeMap;

use serde::Deserialize;

use super::{
    pair_get, LiteralEntry, PairEntry, PairMap, RuleData, RuleKind, RuleScope, RuleTable,
    VisargaEntry, DEFAULT_TOML,
};
use crate::script;

/// Placeholder in vowel+vowel outputs for the following vowel's sign.
const SIGN_PLACEHOLDER: char = '*';

#[derive(Deserialize)]
struct RulesConfig {
    #[serde(default)]
    classes: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    literal: Vec<LiteralRow>,
    #[serde(default)]
    lookahead_cluster: Vec<LiteralRow>,
    #[serde(default)]
    visarga: Vec<VisargaRow>,
    #[serde(default)]
    assimilation: Vec<PairRow>,
    #[serde(default)]
    vowel_consonant: Vec<PairRow>,
    #[serde(default)]
    cluster_exception: Vec<PairRow>,
    #[serde(default)]
    gemination: Vec<PairRow>,
    #[serde(default)]
    vowel_vowel: Vec<PairRow>,
    #[serde(default)]
    deletion: Vec<PairRow>,
}

#[derive(Deserialize)]
struct LiteralRow {
    left: String,
    right: String,
    output: String,
    #[serde(default = "default_cluster")]
    kind: RuleKind,
}

fn default_cluster() -> RuleKind {
    RuleKind::Cluster
}

#[derive(Deserialize)]
struct VisargaRow {
    after: Vec<String>,
    before: Vec<String>,
    #[serde(default)]
    vowel: Option<String>,
    #[serde(default)]
    append: String,
    #[serde(default)]
    seal: bool,
}

/// A row covering every `left × before` pair.
#[derive(Deserialize)]
struct PairRow {
    left: Vec<String>,
    before: Vec<String>,
    #[serde(default)]
    output: String,
    #[serde(default = "default_true")]
    merge: bool,
    #[serde(default)]
    scope: RuleScope,
    kind: Option<RuleKind>,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, thiserror::Error)]
pub enum RuleConfigError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("rule table is empty")]
    Empty,
    #[error("unknown class: ${0}")]
    UnknownClass(String),
    #[error("empty output for {table} rule {left}+{right}")]
    EmptyOutput {
        table: &'static str,
        left: String,
        right: String,
    },
    #[error("duplicate literal pair: {0}+{1}")]
    DuplicateLiteral(String, String),
    #[error("{table} rule {left}+{right} is shadowed by cluster formation; add it to [[cluster_exception]]")]
    Shadowed {
        table: &'static str,
        left: String,
        right: String,
    },
    #[error("sign placeholder used before non-vowel: {0}")]
    InvalidTemplate(String),
    #[error("rule table already initialized")]
    AlreadyInitialized,
}

/// Returns the embedded default rules TOML content.
pub fn default_toml() -> &'static str {
    DEFAULT_TOML
}

/// Parse and validate rules TOML into a ready-to-share table.
pub fn parse_rules_toml(toml_str: &str) -> Result<RuleTable, RuleConfigError> {
    let config: RulesConfig =
        toml::from_str(toml_str).map_err(|e| RuleConfigError::Parse(e.to_string()))?;
    let classes = &config.classes;

    let mut data = RuleData::default();

    for row in &config.literal {
        if row.output.is_empty() {
            return Err(empty_output("literal", &row.left, &row.right));
        }
        let inner = data.literal.entry(row.left.clone()).or_default();
        if inner.contains_key(&row.right) {
            return Err(RuleConfigError::DuplicateLiteral(
                row.left.clone(),
                row.right.clone(),
            ));
        }
        inner.insert(
            row.right.clone(),
            LiteralEntry {
                output: row.output.clone(),
                kind: row.kind,
            },
        );
    }

    for row in &config.lookahead_cluster {
        if row.output.is_empty() {
            return Err(empty_output("lookahead_cluster", &row.left, &row.right));
        }
        data.lookahead_clusters
            .entry(row.left.clone())
            .or_default()
            .entry(row.right.clone())
            .or_insert_with(|| row.output.clone());
    }

    for row in &config.visarga {
        data.visarga.push(VisargaEntry {
            after: expand(&row.after, classes)?.into_iter().collect(),
            before: expand(&row.before, classes)?.into_iter().collect(),
            vowel: row.vowel.clone(),
            append: row.append.clone(),
            seal: row.seal,
        });
    }

    fill_pairs(
        &mut data.assimilation,
        &config.assimilation,
        classes,
        "assimilation",
        RuleKind::Assimilation,
    )?;
    fill_pairs(
        &mut data.vowel_consonant,
        &config.vowel_consonant,
        classes,
        "vowel_consonant",
        RuleKind::Gemination,
    )?;
    fill_pairs(
        &mut data.gemination,
        &config.gemination,
        classes,
        "gemination",
        RuleKind::Gemination,
    )?;
    fill_flags(&mut data.cluster_exceptions, &config.cluster_exception, classes)?;
    fill_flags(&mut data.deletion, &config.deletion, classes)?;
    fill_vowels(&mut data.vowel_vowel, &config.vowel_vowel, classes)?;

    if data.rule_count() == 0 {
        return Err(RuleConfigError::Empty);
    }
    check_shadowed(&data)?;

    Ok(RuleTable::from_data(data))
}

fn empty_output(table: &'static str, left: &str, right: &str) -> RuleConfigError {
    RuleConfigError::EmptyOutput {
        table,
        left: left.to_string(),
        right: right.to_string(),
    }
}

/// Expand `$class` references; plain letters pass through.
fn expand(
    items: &[String],
    classes: &BTreeMap<String, Vec<String>>,
) -> Result<Vec<String>, RuleConfigError> {
    let mut out = Vec::with_capacity(items.len());
    for item in items {
        match item.strip_prefix('$') {
            Some(name) => {
                let members = classes
                    .get(name)
                    .ok_or_else(|| RuleConfigError::UnknownClass(name.to_string()))?;
                out.extend(members.iter().cloned());
            }
            None => out.push(item.clone()),
        }
    }
    Ok(out)
}

/// Expand rows into a pair map. Earlier rows win on overlapping pairs.
fn fill_pairs(
    map: &mut PairMap<PairEntry>,
    rows: &[PairRow],
    classes: &BTreeMap<String, Vec<String>>,
    table: &'static str,
    default_kind: RuleKind,
) -> Result<(), RuleConfigError> {
    for row in rows {
        let lefts = expand(&row.left, classes)?;
        let rights = expand(&row.before, classes)?;
        for left in &lefts {
            for right in &rights {
                if row.output.is_empty() {
                    return Err(empty_output(table, left, right));
                }
                map.entry(left.clone())
                    .or_default()
                    .entry(right.clone())
                    .or_insert_with(|| PairEntry {
                        output: row.output.clone(),
                        merge: row.merge,
                        scope: row.scope,
                        kind: row.kind.unwrap_or(default_kind),
                    });
            }
        }
    }
    Ok(())
}

fn fill_flags(
    map: &mut PairMap<()>,
    rows: &[PairRow],
    classes: &BTreeMap<String, Vec<String>>,
) -> Result<(), RuleConfigError> {
    for row in rows {
        let rights = expand(&row.before, classes)?;
        for left in expand(&row.left, classes)? {
            let inner = map.entry(left).or_default();
            for right in &rights {
                inner.insert(right.clone(), ());
            }
        }
    }
    Ok(())
}

/// Vowel+vowel rows; `*` in the output stands for the following vowel's sign.
fn fill_vowels(
    map: &mut PairMap<String>,
    rows: &[PairRow],
    classes: &BTreeMap<String, Vec<String>>,
) -> Result<(), RuleConfigError> {
    for row in rows {
        let lefts = expand(&row.left, classes)?;
        let rights = expand(&row.before, classes)?;
        for left in &lefts {
            for right in &rights {
                if row.output.is_empty() {
                    return Err(empty_output("vowel_vowel", left, right));
                }
                let output = if row.output.contains(SIGN_PLACEHOLDER) {
                    let sign = right
                        .chars()
                        .next()
                        .and_then(script::vowel_sign)
                        .ok_or_else(|| RuleConfigError::InvalidTemplate(right.clone()))?;
                    row.output.replace(SIGN_PLACEHOLDER, sign)
                } else {
                    row.output.clone()
                };
                map.entry(left.clone())
                    .or_default()
                    .entry(right.clone())
                    .or_insert(output);
            }
        }
    }
    Ok(())
}

/// Gemination and deletion run after cluster formation, so their pairs
/// must be exempt from it or they can never fire.
fn check_shadowed(data: &RuleData) -> Result<(), RuleConfigError> {
    let tables: [(&'static str, Vec<(&String, &String)>); 2] = [
        ("gemination", pairs(&data.gemination)),
        ("deletion", pairs(&data.deletion)),
    ];
    for (table, list) in tables {
        for (left, right) in list {
            if pair_get(&data.cluster_exceptions, left, right).is_none() {
                return Err(RuleConfigError::Shadowed {
                    table,
                    left: left.clone(),
                    right: right.clone(),
                });
            }
        }
    }
    Ok(())
}

fn pairs<V>(map: &PairMap<V>) -> Vec<(&String, &String)> {
    map.iter()
        .flat_map(|(l, inner)| inner.keys().map(move |r| (l, r)))
        .collect()
}
