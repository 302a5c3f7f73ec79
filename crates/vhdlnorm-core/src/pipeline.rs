//! Transformation pipeline - ordered fold of enabled rules
//!
//! # Pipeline
//!
//! `text → rule₁ → rule₂ → … → ruleₙ → text`
//!
//! The order is fixed by [`RuleId::ALL`]; configuration only flips rules on
//! or off. Ordering is a correctness requirement:
//!
//! 1. Tab expansion runs before trimming, so expanded trailing tabs go too
//! 2. Trimming runs before the blank-line rules, so whitespace-only lines
//!    are already empty when blank runs are counted
//! 3. Leading → trailing → consecutive: collapsing runs last cannot
//!    reintroduce blank lines at the boundaries the first two just cleaned
//!
//! # Guarantees
//!
//! - **Deterministic**: same text + same config always gives the same output
//! - **Idempotent**: `run(run(x)) == run(x)` for the default rule set
//! - **Stateless**: nothing carries over between documents

use tracing::trace;

use crate::document::SourceDocument;
use crate::rules::{Rule, RuleId};

// ── Configuration ─────────────────────────────────────────

/// One rule and whether it runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct RuleBinding {
    pub id: RuleId,
    pub enabled: bool,
}

/// Ordered rule bindings; always holds every rule, in pipeline order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    bindings: Vec<RuleBinding>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::from_fn(RuleId::enabled_by_default)
    }
}

impl PipelineConfig {
    fn from_fn(enabled: impl Fn(RuleId) -> bool) -> Self {
        PipelineConfig {
            bindings: RuleId::ALL
                .into_iter()
                .map(|id| RuleBinding {
                    id,
                    enabled: enabled(id),
                })
                .collect(),
        }
    }

    /// Every rule on
    pub fn all_enabled() -> Self {
        Self::from_fn(|_| true)
    }

    /// Every rule off
    pub fn none_enabled() -> Self {
        Self::from_fn(|_| false)
    }

    /// Same config with one rule switched
    pub fn with(mut self, id: RuleId, enabled: bool) -> Self {
        for binding in &mut self.bindings {
            if binding.id == id {
                binding.enabled = enabled;
            }
        }
        self
    }

    pub fn enable(self, id: RuleId) -> Self {
        self.with(id, true)
    }

    pub fn disable(self, id: RuleId) -> Self {
        self.with(id, false)
    }

    pub fn is_enabled(&self, id: RuleId) -> bool {
        self.bindings.iter().any(|b| b.id == id && b.enabled)
    }

    pub fn bindings(&self) -> &[RuleBinding] {
        &self.bindings
    }

    /// Enabled rules in pipeline order
    pub fn enabled(&self) -> impl Iterator<Item = RuleId> + '_ {
        self.bindings.iter().filter(|b| b.enabled).map(|b| b.id)
    }
}

// ── Pipeline ──────────────────────────────────────────────

/// Composition of the enabled rules, applied in declared order
pub struct Pipeline {
    config: PipelineConfig,
    rules: Vec<&'static dyn Rule>,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(PipelineConfig::default())
    }
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("rules", &self.enabled_rules())
            .finish()
    }
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        let rules = config.enabled().map(RuleId::rule).collect();
        Pipeline { config, rules }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn enabled_rules(&self) -> Vec<RuleId> {
        self.rules.iter().map(|r| r.id()).collect()
    }

    /// Fold every enabled rule over `text`
    pub fn run(&self, text: &str) -> String {
        self.run_traced(text).0
    }

    /// Like [`run`](Self::run), also returning the rules that changed the text
    pub fn run_traced(&self, text: &str) -> (String, Vec<RuleId>) {
        let mut current = text.to_string();
        let mut fired = Vec::new();
        for rule in &self.rules {
            let next = rule.apply(&current);
            if next != current {
                trace!(rule = %rule.id(), "rule changed text");
                fired.push(rule.id());
                current = next;
            }
        }
        (current, fired)
    }

    /// Run over a document in place, returning the rules that fired
    pub fn apply(&self, doc: &mut SourceDocument) -> Vec<RuleId> {
        let (text, fired) = self.run_traced(doc.text());
        if !fired.is_empty() {
            doc.replace_text(text);
        }
        fired
    }
}
