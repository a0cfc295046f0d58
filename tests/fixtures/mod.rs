//! Test fixtures: unittest transcripts captured from real grading runs.

use std::path::{Path, PathBuf};

/// Directory holding the transcript fixtures
pub fn transcripts_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/transcripts")
}

/// Load a transcript fixture by file name
pub fn transcript(name: &str) -> String {
    let path = transcripts_dir().join(name);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("failed to read fixture {}: {}", path.display(), e))
}

/// Lines of a transcript fixture
pub fn transcript_lines(name: &str) -> Vec<String> {
    transcript(name).lines().map(str::to_string).collect()
}
