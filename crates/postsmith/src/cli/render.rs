//! Rendering of posts for the terminal.

use super::OutputFormat;
use postsmith_core::{GeneratedPost, SavedPost};
use postsmith_error::{OutputError, PostsmithResult};
use serde::Serialize;
use std::io::Write;

/// Write a generated post.
pub fn render_post(
    post: &GeneratedPost,
    format: OutputFormat,
    out: &mut impl Write,
) -> PostsmithResult<()> {
    match format {
        OutputFormat::Json => write_json(post, out),
        OutputFormat::Human => write_text(out, &post_text(post)),
    }
}

/// Write a saved post with its record details.
pub fn render_saved(
    saved: &SavedPost,
    format: OutputFormat,
    out: &mut impl Write,
) -> PostsmithResult<()> {
    match format {
        OutputFormat::Json => write_json(saved, out),
        OutputFormat::Human => {
            let header = format!(
                "{}  {}  {}\n{:-<80}\n",
                saved.id,
                saved.created_at.format("%Y-%m-%d %H:%M"),
                saved.topic,
                ""
            );
            write_text(out, &(header + &post_text(&saved.content)))
        }
    }
}

/// Write a history listing, one line per record.
pub(crate) fn render_history(
    records: &[SavedPost],
    format: OutputFormat,
    out: &mut impl Write,
) -> PostsmithResult<()> {
    match format {
        OutputFormat::Json => write_json(records, out),
        OutputFormat::Human => {
            if records.is_empty() {
                return write_text(out, "No saved posts.\n");
            }
            let mut text = String::new();
            for record in records {
                text.push_str(&format!(
                    "{}  {}  {}  {}\n",
                    record.id,
                    record.created_at.format("%Y-%m-%d %H:%M"),
                    record.topic,
                    record.content.title
                ));
            }
            text.push_str(&format!("Total: {} posts\n", records.len()));
            write_text(out, &text)
        }
    }
}

fn post_text(post: &GeneratedPost) -> String {
    let mut text = format!("{}\n\n{}\n\n{}\n", post.title, post.caption, post.hashtag_line());
    if !post.title_variations.is_empty() {
        text.push_str("\nAlternative titles:\n");
        for title in &post.title_variations {
            text.push_str(&format!("  - {}\n", title));
        }
    }
    text.push_str(&format!(
        "\nShort version: {}\nFunny version: {}\n\nVisual idea: {}\n",
        post.variations.short_version, post.variations.funny_version, post.visual_prompt
    ));
    if let Some(options) = &post.image_options {
        text.push_str(&format!(
            "Image: {} at {}\n",
            options.aspect_ratio, options.size
        ));
    }
    text
}

fn write_json(value: &(impl Serialize + ?Sized), out: &mut impl Write) -> PostsmithResult<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| OutputError::new("stdout", format!("serialize JSON: {}", e)))?;
    write_text(out, &format!("{}\n", json))
}

fn write_text(out: &mut impl Write, text: &str) -> PostsmithResult<()> {
    out.write_all(text.as_bytes())
        .map_err(|e| OutputError::new("stdout", e.to_string()))?;
    Ok(())
}
