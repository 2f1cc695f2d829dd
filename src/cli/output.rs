use colored::Colorize;
use std::fmt;

use crate::ledger::Highlight;

/// Message categories used by the CLI output helpers.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Success,
    Warning,
    Error,
}

fn apply_style(kind: MessageKind, message: impl fmt::Display) -> String {
    let text = message.to_string();
    match kind {
        MessageKind::Info => text,
        MessageKind::Success => text.bright_green().to_string(),
        MessageKind::Warning => format!("WARNING: {text}").bright_yellow().to_string(),
        MessageKind::Error => format!("ERROR: {text}").bright_red().to_string(),
    }
}

pub fn info(message: impl fmt::Display) {
    println!("{}", apply_style(MessageKind::Info, message));
}

pub fn success(message: impl fmt::Display) {
    println!("{}", apply_style(MessageKind::Success, message));
}

pub fn warning(message: impl fmt::Display) {
    println!("{}", apply_style(MessageKind::Warning, message));
}

pub fn error(message: impl fmt::Display) {
    println!("{}", apply_style(MessageKind::Error, message));
}

/// Colors one rendered table line for its highlight partition.
///
/// Palette carried over from the original tool: ignored rows salmon-ish,
/// selected-category rows orchid/slate-blue, everything else neutral.
pub fn paint_row(line: &str, highlight: Highlight) -> String {
    match highlight {
        Highlight::Counted => line.to_string(),
        Highlight::Ignored => line.bright_red().to_string(),
        Highlight::SelectedIgnored => line.bright_magenta().to_string(),
        Highlight::SelectedCounted => line.bright_blue().to_string(),
        Highlight::Neutral => line.bright_black().to_string(),
    }
}

/// Formats a monetary value with two decimals and a leading dollar sign.
pub fn money(value: f64) -> String {
    if value < 0.0 {
        format!("-${:.2}", -value)
    } else {
        // `+ 0.0` normalizes -0.0 (the identity of an empty f64 sum) so a
        // zero total renders as "$0.00", never "$-0.00".
        format!("${:.2}", value + 0.0)
    }
}
