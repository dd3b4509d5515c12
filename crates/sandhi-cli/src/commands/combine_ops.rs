use std::fs;
use std::io::{BufRead, BufReader, BufWriter, Write};

use serde::Serialize;
use unicode_width::UnicodeWidthStr;

use sandhi_core::explain::{explain, format_text};
use sandhi_core::{classify, combine_with, join_compound, syllables, Grapheme, SandhiCache};

use super::TableSource;

/// Options shared by the combination commands.
pub struct CombineOptions<'a> {
    pub rules: Option<&'a str>,
    pub compiled: Option<&'a str>,
    pub json: bool,
}

impl CombineOptions<'_> {
    fn source(&self) -> TableSource {
        die!(
            TableSource::load(self.rules, self.compiled),
            "Error loading rules: {}"
        )
    }
}

pub fn combine_cmd(words: &[String], compound: bool, opts: &CombineOptions<'_>) {
    let source = opts.source();
    let outcome = if compound {
        die!(join_compound(source.table(), words), "Error: {}")
    } else {
        die!(combine_with(source.table(), words), "Error: {}")
    };

    if opts.json {
        println!(
            "{}",
            die!(serde_json::to_string_pretty(&outcome), "Error: {}")
        );
    } else {
        println!("{}", outcome.text);
    }
}

pub fn explain_cmd(words: &[String], opts: &CombineOptions<'_>) {
    let source = opts.source();
    let result = die!(explain(source.table(), words), "Error: {}");
    if opts.json {
        println!("{}", die!(serde_json::to_string_pretty(&result), "Error: {}"));
    } else {
        print!("{}", format_text(&result));
    }
}

#[derive(Serialize)]
struct BatchRecord<'a> {
    line: usize,
    words: &'a [&'a str],
    #[serde(flatten)]
    outcome: &'a sandhi_core::SandhiOutcome,
}

/// Combine each line of `input_file` (words separated by whitespace).
/// Blank lines and `#` comments are skipped.
pub fn batch_cmd(input_file: &str, opts: &CombineOptions<'_>) {
    let source = opts.source();
    let file = die!(
        fs::File::open(input_file),
        "Failed to open input file {input_file}: {}"
    );
    let mut cache = SandhiCache::new();
    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    for (i, line) in BufReader::new(file).lines().enumerate() {
        let line = die!(line, "Failed to read line: {}");
        let Some(words) = batch_words(&line) else {
            continue;
        };
        let outcome = die!(
            cache.get_or_combine(source.table(), &words),
            "Error on line {}: {}",
            i + 1
        );
        if opts.json {
            let record = BatchRecord {
                line: i + 1,
                words: &words,
                outcome: &outcome,
            };
            let json = die!(serde_json::to_string(&record), "Error: {}");
            die!(writeln!(out, "{json}"), "Error writing output: {}");
        } else {
            die!(writeln!(out, "{}", outcome.text), "Error writing output: {}");
        }
    }
    die!(out.flush(), "Error writing output: {}");
    eprintln!(
        "{} distinct inputs, {} cache hits",
        cache.misses(),
        cache.hits()
    );
}

fn batch_words(line: &str) -> Option<Vec<&str>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }
    Some(line.split_whitespace().collect())
}

pub fn classify_cmd(text: &str, json: bool) {
    let units: Vec<Grapheme> = classify(text).collect();
    if json {
        println!("{}", die!(serde_json::to_string_pretty(&units), "Error: {}"));
    } else {
        print!("{}", format_units(&units));
    }
}

pub fn syllables_cmd(text: &str, json: bool) {
    let sylls = syllables(text);
    if json {
        println!("{}", die!(serde_json::to_string_pretty(&sylls), "Error: {}"));
    } else {
        let parts: Vec<&str> = sylls.iter().map(|s| s.text.as_str()).collect();
        println!("{}", parts.join(" · "));
    }
}

fn format_units(units: &[Grapheme]) -> String {
    let mut out = String::new();
    for (i, g) in units.iter().enumerate() {
        let pad_width = 8;
        let display_width = UnicodeWidthStr::width(g.text());
        let padded = if display_width < pad_width {
            format!("{}{}", g.text(), " ".repeat(pad_width - display_width))
        } else {
            g.text().to_string()
        };
        out.push_str(&format!(
            "{:>3}  {} {:?}{}\n",
            i,
            padded,
            g.category(),
            if g.bears_inherent_vowel() { " +a" } else { "" },
        ));
    }
    out
}
