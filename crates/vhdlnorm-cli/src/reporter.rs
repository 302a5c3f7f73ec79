//! Console output for a batch run

use colored::Colorize;
use vhdlnorm_core::{BatchSummary, FileStatus, ProcessEvent, Reporter};

/// Progress lines on stdout, missing files and failures on stderr
pub struct ConsoleReporter {
    quiet: bool,
}

impl ConsoleReporter {
    pub fn new(quiet: bool) -> Self {
        ConsoleReporter { quiet }
    }

    /// One-line tally after the batch
    pub fn summarize(&self, summary: &BatchSummary) {
        if self.quiet {
            return;
        }
        let mut parts = vec![
            format!("{} rewritten", summary.count(FileStatus::Rewritten)),
            format!("{} unchanged", summary.count(FileStatus::Unchanged)),
        ];
        let would_change = summary.count(FileStatus::WouldChange);
        if would_change > 0 {
            parts.push(format!("{} would change", would_change).yellow().to_string());
        }
        if !summary.failures.is_empty() {
            parts.push(format!("{} failed", summary.failures.len()).red().to_string());
        }
        println!("{}", parts.join(", "));
    }
}

impl Reporter for ConsoleReporter {
    fn report(&mut self, event: &ProcessEvent) {
        match event {
            ProcessEvent::Started { .. } => {
                if !self.quiet {
                    println!("{}", event);
                }
            }
            ProcessEvent::Finished(outcome) => {
                if self.quiet {
                    return;
                }
                println!("{}", event);
                if outcome.status == FileStatus::WouldChange {
                    let rules: Vec<&str> = outcome.rules.iter().map(|id| id.name()).collect();
                    println!(
                        "  {} {} ({})",
                        "would change:".yellow(),
                        outcome.path.display(),
                        rules.join(", ")
                    );
                }
            }
            ProcessEvent::Missing { .. } | ProcessEvent::Failed(_) => {
                eprintln!("{}", event.to_string().red());
            }
        }
    }
}
