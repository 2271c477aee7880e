// Copyright (c) UnnamedOrange. Licensed under the MIT License.
// See the LICENSE file in the repository root for full license text.

use std::fs;
use std::path::Path;

use booktex_core::{Chapter, ChapterRegistry};

/// Scans `dir` for chapter files and returns them in reading order.
pub fn scan_chapters(dir: &Path) -> booktex_core::Result<ChapterRegistry> {
    let names = fs::read_dir(dir)?
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_ok_and(|kind| kind.is_file()))
        .filter_map(|entry| entry.file_name().into_string().ok())
        .collect::<Vec<_>>();
    tracing::debug!(dir = %dir.display(), files = names.len(), "scanned chapter directory");
    Ok(ChapterRegistry::from_file_names(names))
}

/// The chapter identity of `input`, unless `slug` overrides it.
pub fn chapter_for(input: Option<&Path>, slug: Option<&str>) -> Chapter {
    if let Some(slug) = slug {
        return Chapter::new(slug);
    }

    input
        .and_then(Path::file_name)
        .and_then(|name| name.to_str())
        .map(Chapter::from_file_name)
        .unwrap_or_else(|| Chapter::new(booktex_core::chapters::FALLBACK_SLUG))
}
