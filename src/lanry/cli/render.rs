//! # Rendering
//!
//! Turns command results into terminal text. Layout (width, truncation, padding)
//! is computed here with Unicode-aware widths; color is applied last and can be
//! switched off so the layout is testable.

use chrono::{DateTime, Utc};
use colored::Colorize;
use lanry::api::{ChapterText, CmdMessage, MessageLevel};
use lanry::model::ChapterListing;
use std::io::IsTerminal;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const LINE_WIDTH: usize = 80;
pub const TIME_WIDTH: usize = 14;
const NUMBER_WIDTH: usize = 6;
const WORDS_WIDTH: usize = 14;

fn use_color() -> bool {
    std::io::stdout().is_terminal()
}

pub fn print_chapter_list(listings: &[ChapterListing]) {
    print!("{}", render_chapter_list(listings, use_color(), Utc::now()));
}

pub fn render_chapter_list(
    listings: &[ChapterListing],
    color: bool,
    now: DateTime<Utc>,
) -> String {
    let mut out = String::new();
    for listing in listings {
        let number = format!("{:>width$}. ", listing.info.id, width = NUMBER_WIDTH - 2);
        let time = listing
            .modified_at
            .map(|at| format_time_ago(at, now))
            .unwrap_or_else(|| format!("{:>width$}", "unsaved", width = TIME_WIDTH));

        let words = format!(
            "{:>width$}",
            format!("{} words", format_count(listing.word_count)),
            width = WORDS_WIDTH
        );

        let available = LINE_WIDTH.saturating_sub(NUMBER_WIDTH + WORDS_WIDTH + TIME_WIDTH);
        let title = if listing.info.title.is_empty() {
            "(untitled)".to_string()
        } else {
            truncate_to_width(&listing.info.title, available)
        };
        let padding = " ".repeat(available.saturating_sub(title.width()));

        if color {
            out.push_str(&format!(
                "{}{}{}{}{}\n",
                number.yellow(),
                title,
                padding,
                words.dimmed(),
                time.dimmed().italic()
            ));
        } else {
            out.push_str(&format!("{}{}{}{}{}\n", number, title, padding, words, time));
        }
    }
    out
}

pub fn print_chapter_texts(texts: &[ChapterText]) {
    print!("{}", render_chapter_texts(texts, use_color()));
}

pub fn render_chapter_texts(texts: &[ChapterText], color: bool) -> String {
    let mut out = String::new();
    for (i, text) in texts.iter().enumerate() {
        if i > 0 {
            out.push_str("\n================================\n\n");
        }
        let heading = text.info.heading();
        if color {
            out.push_str(&format!("{}\n", heading.bold()));
        } else {
            out.push_str(&format!("{}\n", heading));
        }
        out.push_str(&format!("Words: {}\n", format_count(text.word_count())));
        out.push_str("--------------------------------\n");
        out.push_str(&text.content);
        if !text.content.ends_with('\n') {
            out.push('\n');
        }
    }
    out
}

pub fn print_messages(messages: &[CmdMessage]) {
    print!("{}", render_messages(messages, use_color()));
}

pub fn render_messages(messages: &[CmdMessage], color: bool) -> String {
    messages
        .iter()
        .map(|message| {
            let line = if color {
                match message.level {
                    MessageLevel::Info => message.content.dimmed().to_string(),
                    MessageLevel::Success => message.content.green().to_string(),
                    MessageLevel::Warning => message.content.yellow().to_string(),
                    MessageLevel::Error => message.content.red().to_string(),
                }
            } else {
                message.content.clone()
            };
            format!("{}\n", line)
        })
        .collect()
}

/// `1234567` → `"1,234,567"`.
fn format_count(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    let limit = max_width.saturating_sub(1);

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > limit {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}

fn format_time_ago(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let duration = now.signed_duration_since(timestamp);

    let formatter = timeago::Formatter::new();
    let time_str = formatter.convert(duration.to_std().unwrap_or_default());

    // Pad units to the width of "seconds" so the column lines up.
    let time_str = time_str
        .replace("hours ago", "  hours ago")
        .replace("hour ago", "   hour ago")
        .replace("days ago", "   days ago")
        .replace("day ago", "    day ago")
        .replace("weeks ago", "  weeks ago")
        .replace("week ago", "   week ago")
        .replace("months ago", " months ago")
        .replace("month ago", "  month ago")
        .replace("years ago", "  years ago")
        .replace("year ago", "   year ago");

    format!("{:>width$}", time_str, width = TIME_WIDTH)
}
