use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::foundation::core::FrameRect;
use crate::foundation::error::{PhotocardError, PhotocardResult};

/// Template selection handed from the gallery to the editor.
///
/// JSON shape: `{ "name": "...", "image": "templates/birthday.png", "frame": {x, y, w, h} }`.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TemplateHandoff {
    /// Display name.
    pub name: String,
    /// Art path, relative to the assets root.
    pub image: String,
    /// Photo window in canvas space.
    pub frame: FrameRect,
}

impl TemplateHandoff {
    /// Parse and validate a handoff from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> PhotocardResult<Self> {
        let handoff: TemplateHandoff = serde_json::from_reader(r).map_err(|e| {
            PhotocardError::validation(format!("parse template handoff JSON: {e}"))
        })?;
        handoff.validate()?;
        Ok(handoff)
    }

    /// Parse and validate a handoff from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> PhotocardResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            PhotocardError::validation(format!(
                "open template handoff '{}': {e}",
                path.display()
            ))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Check the frame and art path.
    pub fn validate(&self) -> PhotocardResult<()> {
        self.frame.validate()?;
        normalize_rel_path(&self.image)?;
        Ok(())
    }

    /// Return `true` when the art is an SVG document.
    pub fn is_svg(&self) -> bool {
        Path::new(&self.image)
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("svg"))
    }
}

/// Normalize and validate assets-root-relative paths.
///
/// The normalized result uses `/` separators, removes `.` segments, and rejects absolute paths or
/// parent traversals (`..`).
pub fn normalize_rel_path(source: &str) -> PhotocardResult<String> {
    let s = source.replace('\\', "/");
    if s.starts_with('/') {
        return Err(PhotocardError::validation("asset paths must be relative"));
    }
    if s.is_empty() {
        return Err(PhotocardError::validation("asset path must be non-empty"));
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(PhotocardError::validation(
                "asset paths must not contain '..'",
            ));
        }
        out.push(part);
    }

    if out.is_empty() {
        return Err(PhotocardError::validation(
            "asset path must contain a file name",
        ));
    }

    Ok(out.join("/"))
}

#[cfg(test)]
#[path = "../../tests/unit/template/handoff.rs"]
mod tests;
