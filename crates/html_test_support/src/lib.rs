//! Golden-fixture plumbing shared by the parser's integration tests.
//!
//! A fixture is a directory holding `input.html` and an expected-output file whose
//! lines starting with `#` are `key: value` headers:
//!
//! ```text
//! # format: slowparse-tree-v1
//! # status: xfail
//! # reason: stray `}` handling still under discussion
//! <p> [0..3] close [5..9]
//! ```

use std::collections::BTreeMap;
use std::env;
use std::fmt::Write;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FixtureStatus {
    Active,
    Xfail,
    Skip,
}

#[derive(Clone, Debug)]
pub struct Fixture {
    pub name: String,
    pub dir: PathBuf,
    pub input: String,
    pub status: FixtureStatus,
    pub reason: Option<String>,
    pub expected: Vec<String>,
}

/// Substring filter over fixture names, read from an environment variable.
pub struct FixtureFilter {
    raw: Option<String>,
}

impl FixtureFilter {
    pub fn from_env(key: &str) -> Self {
        Self {
            raw: env::var(key).ok().filter(|value| !value.is_empty()),
        }
    }

    pub fn matches(&self, name: &str) -> bool {
        self.raw.as_deref().is_none_or(|filter| name.contains(filter))
    }
}

/// Loads every fixture directory under `root`, sorted by name.
///
/// Panics on malformed fixtures; a broken fixture is a test failure.
pub fn load_fixtures(root: &Path, expected_file: &str, format: &str) -> Vec<Fixture> {
    let mut entries: Vec<_> = fs::read_dir(root)
        .unwrap_or_else(|err| panic!("failed to read fixture root {root:?}: {err}"))
        .filter_map(Result::ok)
        .collect();
    entries.sort_by_key(|entry| entry.file_name());

    let mut fixtures = Vec::new();
    for entry in entries {
        let dir = entry.path();
        let name = entry.file_name().to_string_lossy().to_string();
        if !dir.is_dir() || name.starts_with('.') {
            continue;
        }
        if name != name.trim() {
            panic!("fixture directory has leading/trailing whitespace: '{name}'");
        }

        let input_path = dir.join("input.html");
        let input = fs::read_to_string(&input_path)
            .unwrap_or_else(|err| panic!("failed to read input {input_path:?}: {err}"));
        // Editors add a trailing newline; it is not part of the case.
        let input = input.strip_suffix('\n').unwrap_or(&input).to_string();

        let expected_path = dir.join(expected_file);
        let content = fs::read_to_string(&expected_path)
            .unwrap_or_else(|err| panic!("failed to read {expected_path:?}: {err}"));
        let (headers, expected) = parse_headers_and_lines(&content, &expected_path);

        let found = headers
            .get("format")
            .unwrap_or_else(|| panic!("missing format header in {expected_path:?}"));
        assert_eq!(found, format, "unsupported format in {expected_path:?}");

        let status = match headers.get("status").map(String::as_str) {
            Some("active") | None => FixtureStatus::Active,
            Some("xfail") => FixtureStatus::Xfail,
            Some("skip") => FixtureStatus::Skip,
            Some(other) => panic!("unsupported status '{other}' in {expected_path:?}"),
        };
        let reason = headers.get("reason").cloned();
        if status != FixtureStatus::Active && reason.as_deref().unwrap_or("").is_empty() {
            panic!("non-active fixture missing reason in {expected_path:?}");
        }
        if expected.is_empty() {
            panic!("{expected_path:?} has no snapshot lines");
        }

        fixtures.push(Fixture {
            name,
            dir,
            input,
            status,
            reason,
            expected,
        });
    }
    fixtures
}

fn parse_headers_and_lines(content: &str, path: &Path) -> (BTreeMap<String, String>, Vec<String>) {
    let mut headers = BTreeMap::new();
    let mut lines = Vec::new();
    for raw_line in content.lines() {
        let line = raw_line.trim_end();
        if line.is_empty() {
            continue;
        }
        if let Some(stripped) = line.strip_prefix('#') {
            let header = stripped.trim();
            if header.is_empty() {
                continue;
            }
            let (key, value) = header
                .split_once(':')
                .unwrap_or_else(|| panic!("invalid header in {path:?}: '{line}'"));
            let key = key.trim().to_ascii_lowercase();
            if headers.insert(key.clone(), value.trim().to_string()).is_some() {
                panic!("duplicate header '{key}' in {path:?}");
            }
        } else {
            lines.push(line.to_string());
        }
    }
    (headers, lines)
}

/// Unified-style excerpt around the first differing line: shared context lines
/// are prefixed with a space, expected lines with `-`, actual lines with `+`.
pub fn diff_lines(expected: &[String], actual: &[String]) -> String {
    const CONTEXT: usize = 2;
    let mut out = format!("expected {} lines, actual {} lines\n", expected.len(), actual.len());

    let first = expected
        .iter()
        .zip(actual)
        .position(|(e, a)| e != a)
        .unwrap_or_else(|| expected.len().min(actual.len()));
    if first == expected.len() && first == actual.len() {
        return out;
    }

    let _ = writeln!(out, "@@ line {} @@", first + 1);
    for line in &expected[first.saturating_sub(CONTEXT)..first] {
        let _ = writeln!(out, "  {line}");
    }
    for (marker, lines) in [('-', expected), ('+', actual)] {
        for line in lines.iter().skip(first).take(CONTEXT + 1) {
            let _ = writeln!(out, "{marker} {line}");
        }
    }
    out
}
