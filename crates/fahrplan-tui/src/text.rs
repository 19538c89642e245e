// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Width helpers that treat ANSI escape sequences as zero-width, so styled
//! lines keep their column alignment when the grid truncates and pads them.

use unicode_width::UnicodeWidthChar;

const ESC: char = '\u{1b}';
const RESET: &str = "\u{1b}[0m";

/// Terminal column count of `text`, ignoring escape sequences.
pub fn display_width(text: &str) -> usize {
    let mut width = 0;
    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == ESC {
            if chars.peek() == Some(&'[') {
                chars.next();
                for follow in chars.by_ref() {
                    if ('\u{40}'..='\u{7e}').contains(&follow) {
                        break;
                    }
                }
            }
            continue;
        }
        width += ch.width().unwrap_or(0);
    }
    width
}

/// Cuts `text` to at most `width` terminal columns. Escape sequences are
/// carried through unchanged; when a styled line is cut short, a reset is
/// appended so the style cannot leak into neighbouring cells.
pub fn truncate_to_width(text: &str, width: usize) -> String {
    let mut out = String::with_capacity(text.len());
    let mut used = 0;
    let mut styled = false;
    let mut truncated = false;
    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == ESC {
            styled = true;
            out.push(ch);
            if chars.peek() == Some(&'[') {
                out.push('[');
                chars.next();
                for follow in chars.by_ref() {
                    out.push(follow);
                    if ('\u{40}'..='\u{7e}').contains(&follow) {
                        break;
                    }
                }
            }
            continue;
        }

        let char_width = ch.width().unwrap_or(0);
        if used + char_width > width {
            truncated = true;
            break;
        }
        used += char_width;
        out.push(ch);
    }

    if styled && truncated {
        out.push_str(RESET);
    }
    out
}

/// Truncates or space-pads `text` to exactly `width` terminal columns.
pub fn pad_to_width(text: &str, width: usize) -> String {
    let mut out = truncate_to_width(text, width);
    let used = display_width(&out);
    out.push_str(&" ".repeat(width.saturating_sub(used)));
    out
}
