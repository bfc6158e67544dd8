use std::path::Path;
use std::sync::Arc;

use anyhow::Context;

use crate::foundation::error::PhotocardResult;

/// Environment variable naming an extra directory of font files.
pub const FONT_DIR_ENV: &str = "PHOTOCARD_FONT_DIR";

/// Raw font sources the text engine registers at session start.
///
/// Family names are not known here; they are read from the font tables when the sources are
/// registered with the shaping engine.
#[derive(Clone, Debug, Default)]
pub struct FontBook {
    sources: Vec<Arc<Vec<u8>>>,
}

impl FontBook {
    /// Empty book. Text is laid out but not drawn until at least one font is added.
    pub fn new() -> Self {
        Self::default()
    }

    /// Book seeded from [`FONT_DIR_ENV`] when it is set.
    pub fn from_env() -> Self {
        let mut book = Self::new();
        if let Some(dir) = std::env::var_os(FONT_DIR_ENV) {
            let n = book.add_dir(Path::new(&dir));
            tracing::debug!(dir = ?dir, fonts = n, "loaded fonts from {FONT_DIR_ENV}");
        }
        book
    }

    /// Add one font from memory.
    pub fn add_bytes(&mut self, bytes: Vec<u8>) {
        self.sources.push(Arc::new(bytes));
    }

    /// Add one font file.
    pub fn add_file(&mut self, path: impl AsRef<Path>) -> PhotocardResult<()> {
        let path = path.as_ref();
        let bytes =
            std::fs::read(path).with_context(|| format!("read font '{}'", path.display()))?;
        self.add_bytes(bytes);
        Ok(())
    }

    /// Add every `.ttf`, `.otf` and `.ttc` file directly inside `dir`.
    ///
    /// Unreadable directories and files are skipped. Returns the number of fonts added.
    pub fn add_dir(&mut self, dir: &Path) -> usize {
        let Ok(rd) = std::fs::read_dir(dir) else {
            tracing::warn!(dir = %dir.display(), "font directory is not readable");
            return 0;
        };

        let mut paths = Vec::new();
        for entry in rd.flatten() {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let Some(ext) = path.extension().and_then(|s| s.to_str()) else {
                continue;
            };
            let ext = ext.to_ascii_lowercase();
            if ext != "ttf" && ext != "otf" && ext != "ttc" {
                continue;
            }
            paths.push(path);
        }
        // Directory order is platform dependent; keep the first registered family stable.
        paths.sort();

        let mut added = 0;
        for path in paths {
            match self.add_file(&path) {
                Ok(()) => added += 1,
                Err(e) => tracing::warn!(path = %path.display(), error = %e, "skipping font"),
            }
        }
        added
    }

    /// Number of font sources.
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// Return `true` when no fonts were added.
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    pub(crate) fn sources(&self) -> &[Arc<Vec<u8>>] {
        &self.sources
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/fonts.rs"]
mod tests;
