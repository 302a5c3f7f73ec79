//! End-to-end normalization through the public API
//!
//! Fixtures under `tests/fixtures/` are `<name>.input.vhd` / `<name>.expected.vhd`
//! pairs run through the default pipeline.

use std::fs;
use std::path::{Path, PathBuf};

use vhdlnorm_core::{normalize, FileProcessor, FileStatus, Pipeline, PipelineConfig, RuleId};

fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn fixture_pairs() -> Vec<(PathBuf, PathBuf)> {
    let mut pairs = Vec::new();
    for entry in fs::read_dir(fixtures_dir()).expect("read fixtures dir") {
        let path = entry.expect("entry").path();
        let name = path.file_name().unwrap().to_string_lossy().to_string();
        if let Some(stem) = name.strip_suffix(".input.vhd") {
            let expected = fixtures_dir().join(format!("{}.expected.vhd", stem));
            pairs.push((path, expected));
        }
    }
    pairs.sort();
    pairs
}

// ── Fixtures ──────────────────────────────────────────────

#[test]
fn test_fixtures_normalize_to_expected() {
    let pairs = fixture_pairs();
    assert!(!pairs.is_empty(), "no fixtures found");
    for (input, expected) in pairs {
        let text = fs::read_to_string(&input).unwrap();
        let want = fs::read_to_string(&expected)
            .unwrap_or_else(|e| panic!("Failed to read {}: {}", expected.display(), e));
        assert_eq!(normalize(&text), want, "fixture {}", input.display());
    }
}

#[test]
fn test_expected_fixtures_are_fixed_points() {
    for (_, expected) in fixture_pairs() {
        let text = fs::read_to_string(&expected).unwrap();
        assert_eq!(normalize(&text), text, "fixture {}", expected.display());
    }
}

#[test]
fn test_fixture_file_processed_in_place() {
    let dir = tempfile::tempdir().unwrap();
    for (input, expected) in fixture_pairs() {
        let target = dir.path().join(input.file_name().unwrap());
        fs::copy(&input, &target).unwrap();
        let outcome = FileProcessor::default().process_file(&target).unwrap();
        assert_eq!(outcome.status, FileStatus::Rewritten);
        assert_eq!(
            fs::read_to_string(&target).unwrap(),
            fs::read_to_string(&expected).unwrap()
        );
    }
}

// ── Individual behaviors ──────────────────────────────────

#[test]
fn test_four_blank_lines_become_two() {
    assert_eq!(normalize("a;\n\n\n\n\nb;\n"), "a;\n\n\nb;\n");
}

#[test]
fn test_leading_blank_lines_dropped() {
    assert_eq!(normalize("\n\n \nentity e is\n"), "entity e is\n");
}

#[test]
fn test_trailing_blank_lines_dropped() {
    assert_eq!(normalize("end;\n\n\n \n"), "end;\n");
}

#[test]
fn test_comment_spacing_examples() {
    assert_eq!(normalize("--comment\n"), "-- comment\n");
    assert_eq!(normalize("----divider----\n"), "----divider----\n");
    assert_eq!(normalize("--=tag\n"), "--=tag\n");
}

#[test]
fn test_time_unit_examples() {
    assert_eq!(normalize("10ns\n"), "10 ns\n");
    assert_eq!(normalize("100 ns\n"), "100 ns\n");
}

#[test]
fn test_extended_identifier_keeps_its_spelling() {
    let text = "signal \\10ns\\ : time;\nx <= \\10ns\\;--copy\n";
    assert_eq!(
        normalize(text),
        "signal \\10ns\\ : time;\nx <= \\10ns\\;-- copy\n"
    );
}

#[test]
fn test_edge_examples() {
    assert_eq!(normalize("clk'event and clk = '1'\n"), "rising_edge(clk)\n");
    assert_eq!(
        normalize("clk'event and rst = '1'\n"),
        "clk'event and rst = '1'\n"
    );
}

#[test]
fn test_boolean_simplification_opt_in() {
    let text = "if done = true then\n";
    assert_eq!(normalize(text), text);
    let pipeline =
        Pipeline::new(PipelineConfig::default().enable(RuleId::BooleanSimplification));
    assert_eq!(pipeline.run(text), "if done then\n");
}

#[test]
fn test_whitespace_only_file_becomes_empty() {
    assert_eq!(normalize(" \n\t\n\r\n"), "");
}
