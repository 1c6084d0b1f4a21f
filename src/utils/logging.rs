// file: src/utils/logging.rs
// description: tracing subscriber initialization and colored cli formatting
// reference: https://docs.rs/tracing-subscriber

use colored::*;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// `RUST_LOG` wins when set; otherwise `debug` with `verbose`, else `info`.
pub fn init_logger(colored_output: bool, verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_file(verbose)
        .with_line_number(verbose)
        .compact()
        .with_ansi(colored_output)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

pub fn format_success(msg: &str) -> String {
    format!("{} {}", "✓".green().bold(), msg.green())
}

pub fn format_error(msg: &str) -> String {
    format!("{} {}", "✗".red().bold(), msg.red())
}

pub fn format_warning(msg: &str) -> String {
    format!("{} {}", "⚠".yellow().bold(), msg.yellow())
}

pub fn format_info(msg: &str) -> String {
    format!("{} {}", "ℹ".blue().bold(), msg)
}

pub fn format_step(step: usize, total: usize, msg: &str) -> String {
    format!("{} {}", format!("[{}/{}]", step, total).cyan().bold(), msg)
}

/// Match score colored by band: green from 70, yellow from 55, red below.
pub fn format_score(score: f64) -> String {
    let text = format!("{:.1}/100", score);
    if score >= 70.0 {
        text.green().bold().to_string()
    } else if score >= 55.0 {
        text.yellow().bold().to_string()
    } else {
        text.red().bold().to_string()
    }
}

pub fn format_recommendation(index: usize, text: &str, critical: bool) -> String {
    if critical {
        format!("{} {}", format!("{:>2}.", index).red().bold(), text)
    } else {
        format!("{} {}", format!("{:>2}.", index).dimmed(), text)
    }
}
