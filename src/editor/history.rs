use crate::editor::style::TextStyle;
use crate::editor::transform::TransformState;

/// Immutable copy of every editable field at one settled instant.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct HistorySnapshot {
    /// Photo placement, rotation included.
    pub transform: TransformState,
    /// Contents of the three text slots.
    pub texts: [String; 3],
    /// Shared text styling.
    pub style: TextStyle,
}

/// Linear, append-only undo log.
///
/// The top entry mirrors the live state. Undo drops the top and hands back the entry beneath
/// it; the last remaining entry is never dropped. There is no redo and no size cap.
#[derive(Clone, Debug, Default)]
pub struct HistoryStack {
    entries: Vec<HistorySnapshot>,
}

impl HistoryStack {
    /// Empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a snapshot.
    pub fn commit(&mut self, snapshot: HistorySnapshot) {
        self.entries.push(snapshot);
    }

    /// Step back once and return the state to restore.
    ///
    /// With fewer than two entries this is a no-op returning `None`.
    pub fn undo(&mut self) -> Option<&HistorySnapshot> {
        if self.entries.len() < 2 {
            return None;
        }
        self.entries.pop();
        self.entries.last()
    }

    /// Most recent snapshot.
    pub fn top(&self) -> Option<&HistorySnapshot> {
        self.entries.last()
    }

    /// Number of snapshots.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Return `true` when nothing was committed yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Return `true` when an undo would change state.
    pub fn can_undo(&self) -> bool {
        self.entries.len() >= 2
    }
}

#[cfg(test)]
#[path = "../../tests/unit/editor/history.rs"]
mod tests;
