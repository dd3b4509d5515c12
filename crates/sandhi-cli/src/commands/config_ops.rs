use std::fs;

pub fn settings_export() {
    print!("{}", sandhi_core::settings::default_toml());
}

pub fn settings_validate(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let s = die!(
        sandhi_core::settings::parse_settings_toml(&content),
        "Error: {}"
    );
    println!(
        "OK: combine.word_separator={:?}, cache.capacity={}",
        s.combine.word_separator, s.cache.capacity
    );
}

/// Install a custom settings file before any command reads settings.
pub fn settings_load(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    die!(
        sandhi_core::settings::init_custom(content),
        "Error in {file}: {}"
    );
}
