//! physum CLI
//!
//! Usage:
//!   physum                                  # Audit, summaries, master, long (cwd)
//!   physum /data/study                      # Same, for another root
//!   physum --audit                          # Diagnostic report only
//!   physum --long                           # Long table from existing summaries
//!   physum --json                           # JSON run report

use std::path::PathBuf;

use clap::Parser;
use colored::Colorize;
use serde::Serialize;

use physum::core::{AuditReport, CoverageReport, Pipeline, RunOutput};
use physum::types::{Channel, RunReport};
use physum::{PhysumError, PipelineConfig, PREVIEW_ROWS, VERSION};

#[derive(Parser, Debug)]
#[command(
    name = "physum",
    version = VERSION,
    about = "Summarize per-participant physiological CSVs by Valence x Veracity condition",
    long_about = "physum walks a directory of physiological CSV exports (heart rate,\n\
                  face movement, eye movement), works out each file's participant\n\
                  and condition from its name and folders, and writes wide and long\n\
                  summary tables under <ROOT>/summaries/.\n\n\
                  Modes:\n  \
                  (default)  Audit, three channel summaries, master table, long table\n  \
                  --audit    Diagnostic report only\n  \
                  --long     Long table from the summaries already on disk\n\n\
                  Conditions:\n  \
                  Positive Lie | Negative Lie | Positive Truth | Negative Truth\n\n\
                  Folder overrides: <ROOT>/summaries/conditions_mapping.csv\n  \
                  columns folder_key,valence,veracity"
)]
struct Args {
    /// Input root (default: current directory)
    root: Option<PathBuf>,

    /// Condition override file (default: <ROOT>/summaries/conditions_mapping.csv)
    #[arg(long)]
    mapping: Option<PathBuf>,

    /// Keep rows whose condition has an Unknown axis
    #[arg(long)]
    keep_unknown: bool,

    /// Only write the diagnostic report
    #[arg(long, conflicts_with = "long")]
    audit: bool,

    /// Only build the long table from existing summaries
    #[arg(long)]
    long: bool,

    /// Output the run report as JSON
    #[arg(long)]
    json: bool,

    /// Disable colors in output
    #[arg(long)]
    no_color: bool,

    /// Info-level logging and the master coverage report
    #[arg(long)]
    verbose: bool,

    /// Rows in the long-table preview
    #[arg(long, default_value_t = PREVIEW_ROWS)]
    preview_rows: usize,
}

impl Args {
    fn mode(&self) -> &'static str {
        if self.audit {
            "Audit"
        } else if self.long {
            "Long Table"
        } else {
            "Full Run"
        }
    }
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if args.no_color {
        colored::control::set_override(false);
    }

    let root = match &args.root {
        Some(root) => root.clone(),
        None => match std::env::current_dir() {
            Ok(dir) => dir,
            Err(e) => fail(PhysumError::io(".", e)),
        },
    };

    let mut config = PipelineConfig::new(root)
        .with_drop_unknown(!args.keep_unknown)
        .with_preview_rows(args.preview_rows);
    if let Some(mapping) = &args.mapping {
        config = config.with_mapping_path(mapping);
    }

    let pipeline = match Pipeline::new(config) {
        Ok(pipeline) => pipeline,
        Err(e) => fail(e),
    };

    let result = if args.audit {
        pipeline.run_audit_only()
    } else if args.long {
        pipeline.run_long_only()
    } else {
        pipeline.run_all()
    };

    match result {
        Ok(output) if args.json => print_json(&output),
        Ok(output) => print_output(&output, &pipeline, &args),
        Err(e) => fail(e),
    }
}

/// `warn` by default, `info` with --verbose; RUST_LOG wins over both
fn init_logging(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .target(env_logger::Target::Stderr)
        .init();
}

fn fail(error: PhysumError) -> ! {
    eprintln!("{} {}", "error:".red().bold(), error);
    std::process::exit(1);
}

/// Print JSON run report
fn print_json(output: &RunOutput) {
    #[derive(Serialize)]
    struct JsonOutput<'a> {
        report: &'a RunReport,
        #[serde(skip_serializing_if = "Option::is_none")]
        coverage: Option<&'a CoverageReport>,
    }

    let json = JsonOutput {
        report: &output.report,
        coverage: output.coverage.as_ref(),
    };
    match serde_json::to_string_pretty(&json) {
        Ok(text) => println!("{text}"),
        Err(e) => {
            eprintln!("{} {}", "error:".red().bold(), e);
            std::process::exit(1);
        }
    }
}

/// Print header
fn print_header(mode: &str) {
    let rule = "=".repeat(48);
    println!("{}", rule.bold());
    println!("{}", format!("  physum v{VERSION} - {mode}").bold());
    println!("{}", rule.bold());
    println!();
}

/// Human-readable run summary
fn print_output(output: &RunOutput, pipeline: &Pipeline, args: &Args) {
    let report = &output.report;
    print_header(args.mode());

    if !args.long {
        println!("Scanned {} CSV files under {}", report.files_scanned, pipeline.config().root().display());
        if !pipeline.overrides().is_empty() {
            println!("Loaded {} folder overrides", pipeline.overrides().len());
        }
    }

    if let Some(audit) = &output.audit {
        print_audit(audit, args.verbose, args.no_color);
    }

    if !report.channels.is_empty() {
        println!();
        println!("{}", "Channels".bold());
        for channel in Channel::ALL {
            if let Some(outcome) = report.channels.get(&channel) {
                println!(
                    "  {:<5} used={} no_column={} unreadable={} unknown={} dropped={} participants={}",
                    channel.name(),
                    outcome.files_used,
                    outcome.files_without_column,
                    outcome.files_unreadable,
                    outcome.unknown_rows,
                    outcome.dropped_rows,
                    outcome.participants
                );
            }
        }
    }

    if !report.notices.is_empty() {
        println!();
        for notice in &report.notices {
            println!("{} {}", "!".yellow().bold(), notice.yellow());
        }
    }

    if let (true, Some(coverage)) = (args.verbose, &output.coverage) {
        println!();
        println!("{}", "Master coverage".bold());
        println!("{}", coverage.to_terminal_string());
    }

    if let Some(long) = &output.long {
        println!();
        println!("{}", format!("Long table preview ({} rows total)", long.len()).bold());
        println!("{}", long.preview(pipeline.config().preview_rows));
    }

    if !report.outputs.is_empty() {
        println!();
        if args.no_color {
            println!("{}", report.to_parseable_string());
        } else {
            for written in &report.outputs {
                println!(
                    "{} {} {}",
                    "wrote".green().bold(),
                    written.path,
                    format!("({} rows, sha256 {})", written.rows, &written.sha256[..12]).dimmed()
                );
            }
        }
    }
}

/// Reason tally, and with --verbose every unresolved file
fn print_audit(audit: &AuditReport, verbose: bool, no_color: bool) {
    println!();
    println!("{}", "Diagnostics".bold());
    for (reason, count) in &audit.tally {
        let line = format!("  {reason:<26} {count}");
        if reason == physum::types::REASON_OK {
            println!("{}", line.green());
        } else {
            println!("{}", line.yellow());
        }
    }

    if !verbose {
        return;
    }
    for record in audit.unresolved() {
        let condition = physum::types::Condition::new(record.valence, record.veracity);
        let (color, reset) = if no_color {
            ("", "")
        } else {
            (condition.color_code(), "\x1b[0m")
        };
        let reasons: Vec<&str> = record.reasons.iter().map(|r| r.description()).collect();
        println!(
            "{}  {} [{} | {}] {}{}",
            color,
            record.file,
            record.participant,
            condition,
            reasons.join("; "),
            reset
        );
    }
}
