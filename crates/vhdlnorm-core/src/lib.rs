//! vhdlnorm core - rule-based normalization of VHDL sources
//!
//! Rewrites VHDL text into a canonical whitespace and style form through a
//! fixed, ordered pipeline of small text rules. Nothing here parses VHDL:
//! every rule is a meaning-preserving text transformation.
//!
//! # Architecture
//!
//! ```text
//! bytes → SourceDocument → rule₁ → rule₂ → … → ruleₙ → bytes (same path)
//!              ↑                     ↑
//!          document.rs          pipeline.rs + rules/
//!                      ↓
//!               processor.rs → Reporter (progress events)
//! ```
//!
//! # Guarantees
//!
//! - **Deterministic**: same input and settings always produce identical output
//! - **Idempotent**: normalizing normalized text changes nothing
//! - **Isolated**: files are independent; no state crosses documents
//! - **Non-destructive on refusal**: unreadable or binary files are never written

pub mod config;
pub mod document;
pub mod error;
pub mod pipeline;
pub mod processor;
pub mod rules;

pub use config::{ConfigFile, Settings};
pub use document::{LineEnding, SourceDocument};
pub use error::{Error, Result};
pub use pipeline::{Pipeline, PipelineConfig, RuleBinding};
pub use processor::{
    BatchSummary, FileFailure, FileOutcome, FileProcessor, FileStatus, NullReporter,
    ProcessEvent, Reporter, WritePolicy,
};
pub use rules::{Rule, RuleId};

/// Normalize text with the default rule set
pub fn normalize(text: &str) -> String {
    Pipeline::default().run(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = concat!(
        "\n",
        "library ieee;  \n",
        "use ieee.std_logic_1164.all;\n",
        "\n",
        "\n",
        "\n",
        "\n",
        "entity counter is\n",
        "  port (clk : in std_logic);\n",
        "end entity;\n",
        "\n",
        "architecture rtl of counter is\n",
        "begin\n",
        "  --count on every edge\n",
        "  process (clk)\n",
        "  begin\n",
        "    if clk'event and clk = '1' then\t\n",
        "      null;\n",
        "    end if;\n",
        "  end process;\n",
        "  stimulus : process\n",
        "  begin\n",
        "    wait for 10ns;\n",
        "  end process;\n",
        "end architecture;\n",
        "\n",
        "\n",
    );

    #[test]
    fn test_normalize_sample() {
        let expected = concat!(
            "library ieee;\n",
            "use ieee.std_logic_1164.all;\n",
            "\n",
            "\n",
            "entity counter is\n",
            "  port (clk : in std_logic);\n",
            "end entity;\n",
            "\n",
            "architecture rtl of counter is\n",
            "begin\n",
            "  -- count on every edge\n",
            "  process (clk)\n",
            "  begin\n",
            "    if rising_edge(clk) then\n",
            "      null;\n",
            "    end if;\n",
            "  end process;\n",
            "  stimulus : process\n",
            "  begin\n",
            "    wait for 10 ns;\n",
            "  end process;\n",
            "end architecture;\n",
        );
        assert_eq!(normalize(SAMPLE), expected);
    }

    #[test]
    fn test_idempotence() {
        let once = normalize(SAMPLE);
        assert_eq!(normalize(&once), once);
    }

    #[test]
    fn test_determinism_100_iterations() {
        let first = normalize(SAMPLE);
        for i in 0..100 {
            let result = normalize(SAMPLE);
            assert_eq!(first, result, "Non-determinism at iteration {}", i);
        }
    }
}
