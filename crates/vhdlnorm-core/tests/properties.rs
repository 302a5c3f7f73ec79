//! Property tests for the rule pipeline
//!
//! Documents are assembled from VHDL-ish fragments, mixed whitespace and
//! mixed line endings, then checked against the pipeline's guarantees.

use proptest::prelude::*;
use vhdlnorm_core::document::split_lines;
use vhdlnorm_core::{Pipeline, PipelineConfig, RuleId};

const FRAGMENTS: &[&str] = &[
    "",
    " ",
    "  ",
    "\t",
    "\r",
    " \r",
    "x",
    "sig_a",
    "<=",
    ";",
    "--",
    "--note",
    "-- note",
    "----",
    "--=tag",
    "10ns",
    "5 ps",
    "1.5us",
    "clk'event and clk = '1'",
    "clk = '0' and clk'event",
    "clk'event and rst = '1'",
    "ready = true",
    "true = ready",
    "\"str -- 10ns\"",
    "'-'",
    "wait for",
];

fn line() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(FRAGMENTS), 0..6).prop_map(|parts| parts.join(""))
}

fn document() -> impl Strategy<Value = String> {
    (
        prop::collection::vec((line(), prop::bool::ANY), 0..24),
        prop::bool::ANY,
    )
        .prop_map(|(lines, terminate_last)| {
            let mut out = String::new();
            let count = lines.len();
            for (i, (content, crlf)) in lines.into_iter().enumerate() {
                out.push_str(&content);
                if i + 1 < count || terminate_last {
                    out.push_str(if crlf { "\r\n" } else { "\n" });
                }
            }
            out
        })
}

fn all_but_boolean() -> PipelineConfig {
    PipelineConfig::all_enabled().disable(RuleId::BooleanSimplification)
}

proptest! {
    #[test]
    fn default_pipeline_is_idempotent(doc in document()) {
        let pipeline = Pipeline::default();
        let once = pipeline.run(&doc);
        prop_assert_eq!(pipeline.run(&once), once);
    }

    #[test]
    fn full_pipeline_is_idempotent(doc in document()) {
        let pipeline = Pipeline::new(all_but_boolean());
        let once = pipeline.run(&doc);
        prop_assert_eq!(pipeline.run(&once), once);
    }

    #[test]
    fn every_rule_alone_is_idempotent(doc in document()) {
        for id in RuleId::ALL {
            if id == RuleId::BooleanSimplification {
                continue;
            }
            let rule = id.rule();
            let once = rule.apply(&doc);
            prop_assert_eq!(rule.apply(&once), once, "rule {}", id);
        }
    }

    #[test]
    fn no_trailing_whitespace_survives(doc in document()) {
        let out = Pipeline::default().run(&doc);
        for line in split_lines(&out) {
            prop_assert!(!line.content.ends_with([' ', '\t']), "line {:?}", line.content);
        }
    }

    #[test]
    fn blank_line_shape(doc in document()) {
        let out = Pipeline::default().run(&doc);
        let lines: Vec<_> = split_lines(&out).collect();
        if let Some(first) = lines.first() {
            prop_assert!(!first.is_blank());
        }
        if let Some(last) = lines.last() {
            prop_assert!(!last.is_blank());
            prop_assert!(last.is_terminated());
        }
        let mut run = 0;
        for line in &lines {
            run = if line.is_blank() { run + 1 } else { 0 };
            prop_assert!(run <= 2);
        }
    }

    #[test]
    fn disabled_pipeline_is_identity(doc in document()) {
        let pipeline = Pipeline::new(PipelineConfig::none_enabled());
        prop_assert_eq!(pipeline.run(&doc), doc);
    }
}
