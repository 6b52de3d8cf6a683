// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Terminal styling for the safecast CLI.
//!
//! Output is painted by meaning (`Tone`), not by color name, and each theme
//! maps tones to its own truecolor values. Color is off under `NO_COLOR` or
//! when stdout is not a terminal, so piped diagnostics stay grep-able.
//!
//! # Theme selection
//!
//! 1. `SAFECAST_THEME` ("dark" or "light")
//! 2. `COLORFGBG` background hint
//! 3. dark

use std::sync::OnceLock;

use crate::diagnostics::{Location, RuleCode, Severity};
use crate::types::TypeKind;

/// Visible width between the two vertical borders of a box.
pub const BOX_WIDTH: usize = 80;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const FAINT: &str = "\x1b[2m";

// ═══════════════════════════════════════════════════════════════════════════
// THEMES
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

impl Theme {
    fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "dark" | "d" => Some(Theme::Dark),
            "light" | "l" => Some(Theme::Light),
            _ => None,
        }
    }

    /// `COLORFGBG` is "fg;bg" (sometimes "fg;default;bg"). Background 7 and
    /// 9..=15 are light.
    fn from_colorfgbg(value: &str) -> Option<Self> {
        let bg: u8 = value.rsplit(';').next()?.parse().ok()?;
        Some(if bg == 7 || bg >= 9 { Theme::Light } else { Theme::Dark })
    }

    fn detect() -> Self {
        std::env::var("SAFECAST_THEME")
            .ok()
            .and_then(|name| Theme::from_name(&name))
            .or_else(|| {
                std::env::var("COLORFGBG")
                    .ok()
                    .and_then(|v| Theme::from_colorfgbg(&v))
            })
            .unwrap_or(Theme::Dark)
    }

    /// Truecolor value for `tone` (OneDark / One Light).
    fn rgb(self, tone: Tone) -> (u8, u8, u8) {
        match (self, tone) {
            (Theme::Dark, Tone::Error) => (224, 108, 117),
            (Theme::Dark, Tone::Warning) => (229, 192, 123),
            (Theme::Dark, Tone::Ok) => (152, 195, 121),
            (Theme::Dark, Tone::Accent) => (86, 182, 194),
            (Theme::Dark, Tone::Code) => (198, 120, 221),
            (Theme::Dark, Tone::Frame) => (92, 99, 112),
            (Theme::Dark, Tone::Banner) => (97, 175, 239),
            (Theme::Dark, Tone::Name) => (171, 178, 191),
            (Theme::Light, Tone::Error) => (228, 86, 73),
            (Theme::Light, Tone::Warning) => (193, 132, 1),
            (Theme::Light, Tone::Ok) => (80, 161, 79),
            (Theme::Light, Tone::Accent) => (1, 132, 188),
            (Theme::Light, Tone::Code) => (166, 38, 164),
            (Theme::Light, Tone::Frame) => (160, 161, 167),
            (Theme::Light, Tone::Banner) => (64, 120, 242),
            (Theme::Light, Tone::Name) => (56, 58, 66),
        }
    }
}

static THEME: OnceLock<Theme> = OnceLock::new();

pub fn theme() -> Theme {
    *THEME.get_or_init(Theme::detect)
}

/// What a piece of text means, which decides its color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Error,
    Warning,
    Ok,
    Accent,
    Code,
    Frame,
    Banner,
    Name,
}

// ═══════════════════════════════════════════════════════════════════════════
// PAINTING
// ═══════════════════════════════════════════════════════════════════════════

pub fn use_colors() -> bool {
    std::env::var_os("NO_COLOR").is_none() && atty::is(atty::Stream::Stdout)
}

fn escape(tone: Tone) -> String {
    let (r, g, b) = theme().rgb(tone);
    format!("\x1b[38;2;{};{};{}m", r, g, b)
}

fn wrap(prefix: &str, text: &str) -> String {
    if use_colors() {
        format!("{}{}{}", prefix, text, RESET)
    } else {
        text.to_string()
    }
}

/// `text` in the theme's color for `tone`.
pub fn paint(tone: Tone, text: &str) -> String {
    wrap(&escape(tone), text)
}

/// Bold variant of `paint`.
pub fn strong(tone: Tone, text: &str) -> String {
    wrap(&format!("{}{}", BOLD, escape(tone)), text)
}

pub fn dimmed(text: &str) -> String {
    wrap(FAINT, text)
}

/// Width of `s` as shown on screen, skipping `ESC ... m` sequences.
pub fn visible_len(s: &str) -> usize {
    s.split('\x1b')
        .enumerate()
        .map(|(i, chunk)| {
            if i == 0 {
                chunk.chars().count()
            } else {
                chunk
                    .split_once('m')
                    .map_or(0, |(_, rest)| rest.chars().count())
            }
        })
        .sum()
}

/// Pad with spaces to `width` visible columns; longer input is left alone.
pub fn pad_right(s: &str, width: usize) -> String {
    let fill = width.saturating_sub(visible_len(s));
    format!("{}{}", s, " ".repeat(fill))
}

// ═══════════════════════════════════════════════════════════════════════════
// BOXES
// ═══════════════════════════════════════════════════════════════════════════

/// One horizontal border line, optionally carrying a label after the corner.
fn border_line(left: char, fill: char, right: char, tone: Tone, label: Option<&str>) -> String {
    let label = label
        .map(|l| format!("{} {} ", fill, strong(Tone::Accent, l)))
        .unwrap_or_default();
    let rest = BOX_WIDTH.saturating_sub(visible_len(&label));
    format!(
        "{}{}{}",
        paint(tone, &left.to_string()),
        label,
        paint(tone, &format!("{}{}", fill.to_string().repeat(rest), right))
    )
}

/// │ content │
pub fn row(content: &str) {
    let side = paint(Tone::Frame, "│");
    println!("{}{}{}", side, pad_right(content, BOX_WIDTH), side);
}

pub fn section_top(label: &str) {
    println!("{}", border_line('┌', '─', '┐', Tone::Frame, Some(label)));
}

pub fn section_mid(label: &str) {
    println!("{}", border_line('├', '─', '┤', Tone::Frame, Some(label)));
}

pub fn section_bot() {
    println!("{}", border_line('└', '─', '┘', Tone::Frame, None));
}

/// A double-lined banner with `text` centered inside.
pub fn banner(text: &str) {
    let side = paint(Tone::Banner, "║");
    let text = strong(Tone::Accent, text);
    let spare = BOX_WIDTH.saturating_sub(visible_len(&text));
    let left = " ".repeat(spare / 2);
    println!("{}", border_line('╔', '═', '╗', Tone::Banner, None));
    println!("{}{}{}{}", side, left, pad_right(&text, BOX_WIDTH - spare / 2), side);
    println!("{}", border_line('╚', '═', '╝', Tone::Banner, None));
}

// ═══════════════════════════════════════════════════════════════════════════
// LABELS
// ═══════════════════════════════════════════════════════════════════════════

pub fn severity_label(severity: Severity) -> String {
    let tone = match severity {
        Severity::Error => Tone::Error,
        Severity::Warning => Tone::Warning,
    };
    strong(tone, &severity.to_string())
}

pub fn code_label(code: RuleCode) -> String {
    paint(Tone::Code, code.as_str())
}

pub fn location_label(location: &Location) -> String {
    wrap(BOLD, &location.to_string())
}

pub fn kind_label(kind: TypeKind) -> String {
    let tone = match kind {
        TypeKind::Interface => Tone::Accent,
        TypeKind::Class => Tone::Banner,
        TypeKind::Struct => Tone::Code,
    };
    paint(tone, kind.as_str())
}

pub fn name_label(name: &str) -> String {
    strong(Tone::Name, name)
}

/// `[safe]` or `[unsafe]`
pub fn verdict_badge(safe: bool) -> String {
    if safe {
        paint(Tone::Ok, "[safe]")
    } else {
        strong(Tone::Error, "[unsafe]")
    }
}
