//! Async API for non-blocking note processing.
//!
//! Enable the `async` feature to use these APIs:
//!
//! ```toml
//! [dependencies]
//! notegen = { version = "0.1", features = ["async"] }
//! ```

use crate::error::{Error, Result};
use crate::model::{NoteData, NoteMetadata};
use crate::render::RenderOptions;
use crate::ParseOptions;
use std::path::Path;
use tokio::fs;
use tokio::io::{AsyncRead, AsyncReadExt};

fn join_error(e: tokio::task::JoinError) -> Error {
    Error::Io(std::io::Error::other(e.to_string()))
}

/// Asynchronously reads and parses a note file.
///
/// Without an explicit `title`, the file stem is the fallback title.
///
/// # Example
///
/// ```no_run
/// # async fn example() -> notegen::Result<()> {
/// let note = notegen::async_api::parse_file("note.md", None, None).await?;
/// println!("Blocks: {}", note.blocks.len());
/// # Ok(())
/// # }
/// ```
pub async fn parse_file(
    path: impl AsRef<Path>,
    title: Option<&str>,
    metadata: Option<&NoteMetadata>,
) -> Result<NoteData> {
    let path = path.as_ref();
    let content = String::from_utf8(fs::read(path).await?)?;
    let title = title.unwrap_or_else(|| crate::file_title(path)).to_string();
    parse_content(content, title, metadata.cloned()).await
}

/// Asynchronously parses content on the blocking pool.
pub async fn parse_content(
    content: impl Into<String>,
    title: impl Into<String>,
    metadata: Option<NoteMetadata>,
) -> Result<NoteData> {
    parse_content_with_options(content, title, metadata, ParseOptions::default()).await
}

/// Asynchronously parses content with custom options.
pub async fn parse_content_with_options(
    content: impl Into<String>,
    title: impl Into<String>,
    metadata: Option<NoteMetadata>,
    options: ParseOptions,
) -> Result<NoteData> {
    let content = content.into();
    let title = title.into();
    tokio::task::spawn_blocking(move || {
        crate::parse_with_options(&content, &title, metadata.as_ref(), &options)
    })
    .await
    .map_err(join_error)
}

/// Asynchronously parses content from an async reader.
pub async fn parse_reader<R: AsyncRead + Unpin>(
    mut reader: R,
    title: impl Into<String>,
    metadata: Option<NoteMetadata>,
) -> Result<NoteData> {
    let mut data = Vec::new();
    reader.read_to_end(&mut data).await?;
    parse_content(String::from_utf8(data)?, title, metadata).await
}

/// Asynchronously converts a note file to Markdown.
///
/// # Example
///
/// ```no_run
/// # async fn example() -> notegen::Result<()> {
/// use notegen::RenderOptions;
///
/// let markdown = notegen::async_api::to_markdown("note.md", &RenderOptions::default()).await?;
/// tokio::fs::write("output.md", markdown).await?;
/// # Ok(())
/// # }
/// ```
pub async fn to_markdown(path: impl AsRef<Path>, options: &RenderOptions) -> Result<String> {
    let note = parse_file(path, None, None).await?;
    let options = options.clone();
    tokio::task::spawn_blocking(move || crate::render::render_markdown(&note, &options))
        .await
        .map_err(join_error)
}
