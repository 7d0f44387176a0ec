//! Unified logging system
//!
//! Everything goes to stderr so reports can be streamed to stdout.

use chrono::Local;
use colored::*;
use std::sync::atomic::{AtomicBool, Ordering};

static VERBOSE: AtomicBool = AtomicBool::new(false);

pub struct Log;

impl Log {
	pub fn set_verbose(enabled: bool) {
		VERBOSE.store(enabled, Ordering::Relaxed);
	}

	pub fn is_verbose() -> bool {
		VERBOSE.load(Ordering::Relaxed)
	}
}

pub fn info(msg: &str) {
	eprintln!("{} {}", "ℹ".bright_blue().bold(), msg.bright_white());
}

pub fn success(msg: &str) {
	eprintln!("{} {}", "✓".bright_green().bold(), msg.bright_white());
}

pub fn warn(msg: &str) {
	eprintln!("{} {}", "⚠".bright_yellow().bold(), msg.bright_white());
}

pub fn error(msg: &str) {
	eprintln!("{} {}", "✗".bright_red().bold(), msg.bright_white());
}

/// Timestamped detail line, shown only with --verbose
pub fn debug(msg: &str) {
	if Log::is_verbose() {
		let time = Local::now().format("%H:%M:%S%.3f").to_string();
		eprintln!("{} {} {}", "⚙".bright_black().bold(), time.dimmed(), msg.dimmed());
	}
}

pub fn header(text: &str) {
	eprintln!("\n{}", format!("─── {} ───", text).bright_blue().bold());
}
