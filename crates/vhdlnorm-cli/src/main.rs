use clap::Parser;
use colored::Colorize;
use std::path::PathBuf;
use std::process;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use vhdlnorm_core::{
    BatchSummary, FileProcessor, FileStatus, NullReporter, RuleId, Settings, WritePolicy,
};

mod reporter;

use reporter::ConsoleReporter;

/// vhdlnorm - normalize VHDL sources in place
///
/// Trims whitespace, tidies blank lines and comments, and rewrites a few
/// legacy idioms. Files are rewritten only when their content changes.
#[derive(Parser)]
#[command(name = "vhdlnorm", version, about, long_about = None)]
struct Cli {
    /// VHDL files, processed in the order given
    #[arg(required_unless_present = "list_rules")]
    files: Vec<PathBuf>,

    /// TOML config with a `[rules]` table and optional `write_policy`
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Turn a rule on (repeatable)
    #[arg(long, value_name = "RULE")]
    enable: Vec<RuleId>,

    /// Turn a rule off (repeatable, applied after --enable)
    #[arg(long, value_name = "RULE")]
    disable: Vec<RuleId>,

    /// Report files that would change without writing them
    #[arg(long, conflicts_with = "always_write")]
    check: bool,

    /// Rewrite every file, even when nothing changed
    #[arg(long)]
    always_write: bool,

    /// Print the rules in pipeline order and exit
    #[arg(long)]
    list_rules: bool,

    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// Suppress progress lines
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Debug logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    /// Defaults, then the config file, then flags
    fn settings(&self) -> vhdlnorm_core::Result<Settings> {
        let mut settings = Settings::default();
        if let Some(path) = &self.config {
            settings = settings.with_file(path)?;
        }
        for id in &self.enable {
            settings = settings.with_rule(*id, true);
        }
        for id in &self.disable {
            settings = settings.with_rule(*id, false);
        }
        if self.check {
            settings = settings.with_write_policy(WritePolicy::Never);
        } else if self.always_write {
            settings = settings.with_write_policy(WritePolicy::Always);
        }
        Ok(settings)
    }
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("vhdlnorm_core=debug,vhdlnorm=debug")
        } else {
            EnvFilter::new("error")
        }
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let settings = match cli.settings() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("{} {}", "error:".red().bold(), e);
            process::exit(2);
        }
    };
    debug!(
        rules = ?settings.pipeline.enabled().collect::<Vec<_>>(),
        write_policy = ?settings.write_policy,
        "settings resolved"
    );

    let exit_code = if cli.list_rules {
        list_rules(&settings, cli.json);
        0
    } else {
        run(&cli, &settings)
    };

    process::exit(exit_code);
}

fn list_rules(settings: &Settings, json: bool) {
    if json {
        let rules: Vec<_> = RuleId::ALL
            .into_iter()
            .enumerate()
            .map(|(i, id)| {
                serde_json::json!({
                    "position": i + 1,
                    "name": id,
                    "enabled": settings.pipeline.is_enabled(id),
                    "default": id.enabled_by_default(),
                    "description": id.description(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&rules).unwrap_or_default());
        return;
    }

    for (i, id) in RuleId::ALL.into_iter().enumerate() {
        let state = if settings.pipeline.is_enabled(id) {
            "on ".green()
        } else {
            "off".dimmed()
        };
        let default = if id.enabled_by_default() { "on" } else { "off" };
        println!(
            "{:>2}. {:<28} {} (default {})  {}",
            i + 1,
            id.name(),
            state,
            default,
            id.description()
        );
    }
}

fn run(cli: &Cli, settings: &Settings) -> i32 {
    let processor = FileProcessor::from_settings(settings);

    let summary = if cli.json {
        let summary = processor.process_all(&cli.files, &mut NullReporter);
        print_json(&processor, &summary);
        summary
    } else {
        let mut console = ConsoleReporter::new(cli.quiet);
        let summary = processor.process_all(&cli.files, &mut console);
        console.summarize(&summary);
        summary
    };

    exit_code(&summary, processor.write_policy())
}

fn print_json(processor: &FileProcessor, summary: &BatchSummary) {
    let report = serde_json::json!({
        "version": env!("CARGO_PKG_VERSION"),
        "write_policy": processor.write_policy(),
        "rules": processor.pipeline().enabled_rules(),
        "files": summary.outcomes,
        "failures": summary.failures,
        "counts": {
            "rewritten": summary.count(FileStatus::Rewritten),
            "unchanged": summary.count(FileStatus::Unchanged),
            "would_change": summary.count(FileStatus::WouldChange),
            "missing": summary.missing(),
            "failed": summary.failures.len(),
        },
        "success": summary.is_success(),
    });
    println!(
        "{}",
        serde_json::to_string_pretty(&report).unwrap_or_default()
    );
}

/// 2 for any missing or failed file, 1 when a check run finds changes, else 0
fn exit_code(summary: &BatchSummary, policy: WritePolicy) -> i32 {
    if !summary.is_success() {
        2
    } else if policy == WritePolicy::Never && summary.changed() > 0 {
        1
    } else {
        0
    }
}
