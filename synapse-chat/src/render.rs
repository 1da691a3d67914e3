//! Rendering of transcript entries as styled terminal lines.
//!
//! Supports the inline markup the model actually emits: `**bold**`,
//! `*italic*`, inline code spans, and fenced code blocks. Markup
//! characters inside code content are shown literally, never interpreted.

use owo_colors::OwoColorize;

use synapse_primitives::{ChatMessage, ChatRole};

/// Renders one transcript entry with its role label.
#[must_use]
pub fn render_message(message: &ChatMessage) -> String {
    let label = match message.role() {
        ChatRole::Human => "You:".green().bold().to_string(),
        ChatRole::Assistant => "Synapse:".cyan().bold().to_string(),
        ChatRole::System => "System:".yellow().bold().to_string(),
    };
    format!("{label} {}", style_markdown(message.text()))
}

/// Renders a fatal startup failure.
#[must_use]
pub fn render_fatal(message: &str) -> String {
    format!("{} {}", "[ERROR]".red().bold(), message.red())
}

/// Applies inline markup styling to a message body.
///
/// Fenced blocks are split off first so their content is never scanned for
/// inline markup; the same protection applies to inline code spans.
#[must_use]
pub fn style_markdown(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for (index, segment) in text.split("```").enumerate() {
        if index % 2 == 0 {
            out.push_str(&style_inline(segment));
        } else {
            // Fence content is reproduced verbatim, only dimmed.
            out.push_str(&segment.dimmed().to_string());
        }
    }
    out
}

fn style_inline(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for (index, segment) in text.split('`').enumerate() {
        if index % 2 == 0 {
            out.push_str(&style_emphasis(segment));
        } else {
            out.push_str(&segment.cyan().to_string());
        }
    }
    out
}

fn style_emphasis(text: &str) -> String {
    let bolded = style_pairs(text, "**", |inner| inner.bold().to_string());
    style_pairs(&bolded, "*", |inner| inner.italic().to_string())
}

/// Replaces each non-greedy `delim`-wrapped span with its styled form.
/// An unpaired delimiter is left as-is.
fn style_pairs(text: &str, delim: &str, style: impl Fn(&str) -> String) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    loop {
        let Some(start) = rest.find(delim) else {
            out.push_str(rest);
            return out;
        };
        let after = &rest[start + delim.len()..];
        let Some(end) = after.find(delim) else {
            out.push_str(rest);
            return out;
        };
        out.push_str(&rest[..start]);
        out.push_str(&style(&after[..end]));
        rest = &after[end + delim.len()..];
    }
}
