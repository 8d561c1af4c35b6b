//! Markdown rendering for notes.

mod markdown;
mod options;

pub use markdown::MarkdownRenderer;
pub use options::RenderOptions;

use crate::error::Result;
use crate::model::NoteData;
use std::io::Write;
use std::path::Path;

/// Renders a note to Markdown.
pub fn render_markdown(note: &NoteData, options: &RenderOptions) -> String {
    let renderer = MarkdownRenderer::new(options.clone());
    renderer.render(note)
}

/// Renders a note to Markdown and writes to a file.
pub fn render_to_file(note: &NoteData, path: impl AsRef<Path>, options: &RenderOptions) -> Result<()> {
    let content = render_markdown(note, options);
    std::fs::write(path, content)?;
    Ok(())
}

/// Renders a note to Markdown and writes to a writer.
pub fn render_to_writer<W: Write>(
    note: &NoteData,
    writer: &mut W,
    options: &RenderOptions,
) -> Result<()> {
    let content = render_markdown(note, options);
    writer.write_all(content.as_bytes())?;
    Ok(())
}
