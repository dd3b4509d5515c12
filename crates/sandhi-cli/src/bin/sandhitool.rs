use std::path::Path;

use clap::{Args, Parser, Subcommand};

use sandhi_cli::commands::combine_ops::{self, CombineOptions};
use sandhi_cli::commands::{config_ops, rules_ops};
use sandhi_cli::trace_init;

#[derive(Parser)]
#[command(name = "sandhitool", about = "Sanskrit sandhi combination tool")]
struct Cli {
    /// Custom settings TOML (see `settings-export`)
    #[arg(long, global = true)]
    settings: Option<String>,
    /// Directory for JSON trace output (requires --features trace)
    #[arg(long, global = true)]
    log_dir: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct RuleArgs {
    /// Custom rule TOML
    #[arg(long)]
    rules: Option<String>,
    /// Compiled rule file (from `rules-compile`)
    #[arg(long, conflicts_with = "rules")]
    compiled: Option<String>,
    /// Output as JSON instead of text
    #[arg(long)]
    json: bool,
}

impl RuleArgs {
    fn options(&self) -> CombineOptions<'_> {
        CombineOptions {
            rules: self.rules.as_deref(),
            compiled: self.compiled.as_deref(),
            json: self.json,
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Combine words with sandhi
    Combine {
        /// Words in order
        #[arg(required = true)]
        words: Vec<String>,
        /// Join as compound members (no separator between words)
        #[arg(long)]
        compound: bool,
        #[command(flatten)]
        rule_args: RuleArgs,
    },
    /// Show every boundary the combination pass visits
    Explain {
        /// Words in order
        #[arg(required = true)]
        words: Vec<String>,
        #[command(flatten)]
        rule_args: RuleArgs,
    },
    /// Combine each line of a file (words separated by whitespace)
    Batch {
        /// Input file, one word sequence per line
        input_file: String,
        #[command(flatten)]
        rule_args: RuleArgs,
    },
    /// Segment text into classified graphemes
    Classify {
        /// Devanagari text
        text: String,
        /// Output as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Segment a word into written syllables
    Syllables {
        /// Devanagari text
        text: String,
        /// Output as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Export default rules as TOML
    RulesExport,
    /// Validate a custom rule TOML file
    RulesValidate {
        /// Path to the TOML file
        file: String,
    },
    /// Compile a rule TOML file into a binary rule file
    RulesCompile {
        /// Input TOML file
        input_file: String,
        /// Output file
        output_file: String,
    },
    /// Show rule counts for a rule TOML or compiled rule file
    RulesInfo {
        /// Rule file (.toml or compiled)
        file: String,
        /// Output as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Export default settings as TOML
    SettingsExport,
    /// Validate a custom settings TOML file
    SettingsValidate {
        /// Path to the TOML file
        file: String,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Some(dir) = &cli.log_dir {
        trace_init::init_tracing(Path::new(dir));
    }
    if let Some(file) = &cli.settings {
        config_ops::settings_load(file);
    }

    match cli.command {
        Command::Combine {
            words,
            compound,
            rule_args,
        } => combine_ops::combine_cmd(&words, compound, &rule_args.options()),
        Command::Explain { words, rule_args } => {
            combine_ops::explain_cmd(&words, &rule_args.options())
        }
        Command::Batch {
            input_file,
            rule_args,
        } => combine_ops::batch_cmd(&input_file, &rule_args.options()),
        Command::Classify { text, json } => combine_ops::classify_cmd(&text, json),
        Command::Syllables { text, json } => combine_ops::syllables_cmd(&text, json),
        Command::RulesExport => rules_ops::rules_export(),
        Command::RulesValidate { file } => rules_ops::rules_validate(&file),
        Command::RulesCompile {
            input_file,
            output_file,
        } => rules_ops::rules_compile(&input_file, &output_file),
        Command::RulesInfo { file, json } => rules_ops::rules_info(&file, json),
        Command::SettingsExport => config_ops::settings_export(),
        Command::SettingsValidate { file } => config_ops::settings_validate(&file),
    }
}
