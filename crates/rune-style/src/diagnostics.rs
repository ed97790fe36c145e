use std::collections::HashSet;
use std::sync::OnceLock;

/// Whether `RUNE_DIAGNOSTICS` enables the given category (or `all`).
///
/// The variable is read once per process.
pub fn diagnostics_enabled(category: &str) -> bool {
    static SET: OnceLock<HashSet<String>> = OnceLock::new();
    let set = SET.get_or_init(|| {
        let raw = std::env::var("RUNE_DIAGNOSTICS").unwrap_or_default();
        parse_categories(&raw)
    });
    set.contains("all") || set.contains(&category.to_ascii_lowercase())
}

fn parse_categories(raw: &str) -> HashSet<String> {
    raw.split(',')
        .map(|s| s.trim().to_ascii_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}
