use html::debug::{SNAPSHOT_FORMAT, snapshot};
use html::parse;
use html_test_support::{Fixture, FixtureFilter, FixtureStatus, diff_lines, load_fixtures};
use std::path::{Path, PathBuf};

fn fixture_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("parse")
}

fn run(fixture: &Fixture) -> Vec<String> {
    snapshot(&parse(&fixture.input), &fixture.input)
}

#[test]
fn golden_parse_snapshots() {
    let filter = FixtureFilter::from_env("SLOWPARSE_FIXTURE");
    let mut ran = 0usize;
    for fixture in load_fixtures(&fixture_root(), "tree.txt", SNAPSHOT_FORMAT) {
        if !filter.matches(&fixture.name) {
            continue;
        }
        ran += 1;
        let actual = run(&fixture);
        let mismatch = actual != fixture.expected;
        match fixture.status {
            FixtureStatus::Active if mismatch => panic!(
                "snapshot mismatch in fixture '{}'\npath: {}\n{}",
                fixture.name,
                fixture.dir.display(),
                diff_lines(&fixture.expected, &actual)
            ),
            FixtureStatus::Xfail if !mismatch => panic!(
                "fixture '{}' matched but is marked xfail; reason: {}",
                fixture.name,
                fixture.reason.as_deref().unwrap_or("<missing reason>")
            ),
            _ => {}
        }
    }
    assert!(ran > 0, "no fixtures matched filter");
}

#[test]
fn golden_inputs_parse_identically_twice() {
    for fixture in load_fixtures(&fixture_root(), "tree.txt", SNAPSHOT_FORMAT) {
        assert_eq!(run(&fixture), run(&fixture), "{}", fixture.name);
    }
}
