pub mod cache;
pub mod combiner;
pub mod explain;
pub mod grapheme;
pub mod matcher;
pub mod rules;
pub mod script;
pub mod settings;

pub use cache::SandhiCache;
pub use combiner::{
    combine, combine_graphemes, combine_pair, combine_with, join_compound, SandhiError,
    SandhiOutcome,
};
pub use grapheme::{classify, syllables, Category, Grapheme, Syllable};
pub use matcher::{match_boundary, Advance, Boundary, CombinationResult};
pub use rules::{Juncture, RuleKind, RuleTable, Transformation};
