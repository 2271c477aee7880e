// Copyright (c) UnnamedOrange. Licensed under the MIT License.
// See the LICENSE file in the repository root for full license text.

pub mod chapters;
pub mod config;
mod error;
pub mod escape;
pub mod index;
pub mod render;
pub mod token;

pub use chapters::{Chapter, ChapterRegistry};
pub use config::Options;
pub use error::{Error, Result};
pub use render::{RenderContext, Renderer};
pub use token::{Token, TokenKind, parse_tokens};

/// Renders a serialized token stream as a LaTeX chapter fragment.
pub fn render_str(json: &str, chapters: &ChapterRegistry, chapter: &Chapter) -> Result<String> {
    render_str_with_options(json, chapters, chapter, &Options::default())
}

pub fn render_str_with_options(
    json: &str,
    chapters: &ChapterRegistry,
    chapter: &Chapter,
    options: &Options,
) -> Result<String> {
    let tokens = parse_tokens(json)?;
    tracing::debug!(
        chapter = %chapter.slug,
        tokens = tokens.len(),
        "rendering token stream"
    );

    let mut out = Renderer::new(chapters, chapter, options).render(&tokens)?;
    out.push('\n');
    Ok(out)
}
