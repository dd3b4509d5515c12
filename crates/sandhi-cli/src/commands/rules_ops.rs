use std::fs;
use std::path::Path;

use sandhi_core::rules::{default_toml, parse_rules_toml, RuleStats};
use sandhi_core::RuleTable;

pub fn rules_export() {
    print!("{}", default_toml());
}

pub fn rules_validate(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let table = die!(parse_rules_toml(&content), "Error: {}");
    println!(
        "OK: {} rules, version {:08x}",
        table.rule_count(),
        table.version()
    );
}

pub fn rules_compile(input_file: &str, output_file: &str) {
    let content = die!(fs::read_to_string(input_file), "Error reading {input_file}: {}");
    let table = die!(parse_rules_toml(&content), "Error: {}");
    die!(
        table.save(Path::new(output_file)),
        "Error writing rule file: {}"
    );
    let file_size = fs::metadata(output_file).map(|m| m.len()).unwrap_or(0);
    eprintln!(
        "Wrote {output_file} ({} rules, {file_size} bytes, version {:08x})",
        table.rule_count(),
        table.version()
    );
}

/// Show a compiled rule file (SNDR) or a rule TOML.
pub fn rules_info(file: &str, json: bool) {
    let bytes = die!(fs::read(file), "Error reading {file}: {}");
    let table = if bytes.starts_with(b"SNDR") {
        die!(RuleTable::from_bytes(&bytes), "Error opening rule file: {}")
    } else {
        let content = die!(String::from_utf8(bytes), "Unknown file format: {}");
        die!(parse_rules_toml(&content), "Error: {}")
    };

    let stats = table.stats();
    if json {
        println!("{}", die!(serde_json::to_string_pretty(&stats), "Error: {}"));
    } else {
        print!("{}", format_stats(file, &stats));
    }
}

fn format_stats(file: &str, stats: &RuleStats) -> String {
    let rows = [
        ("Literal", stats.literal),
        ("Lookahead clusters", stats.lookahead_clusters),
        ("Visarga", stats.visarga),
        ("Assimilation", stats.assimilation),
        ("Vowel+consonant", stats.vowel_consonant),
        ("Cluster exceptions", stats.cluster_exceptions),
        ("Gemination", stats.gemination),
        ("Vowel+vowel", stats.vowel_vowel),
        ("Deletion", stats.deletion),
    ];
    let mut out = format!("Rules:   {file}\nVersion: {:08x}\n", stats.version);
    for (label, count) in rows {
        out.push_str(&format!("  {label:<20}{count}\n"));
    }
    out
}
