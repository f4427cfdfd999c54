use std::path::{Path, PathBuf};

pub const DECK_FIXTURES: &[&str] = &[
    "tests/fixtures/agent_patterns.html",
    "tests/fixtures/metrics_deck.html",
];

pub fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join(name)
}

pub fn read_fixture(name: &str) -> String {
    let path = fixture_path(name);
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("read {}: {}", path.display(), e))
}

/// Extra decks dropped into `tests/fixtures/corpus`, sorted.
pub fn discover_optional_corpus() -> Vec<PathBuf> {
    let Ok(entries) = std::fs::read_dir(fixture_path("tests/fixtures/corpus")) else {
        return Vec::new();
    };
    let mut out: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case("html") || ext.eq_ignore_ascii_case("htm"))
        })
        .collect();
    out.sort();
    out
}
