//! Compiled-in geometry configuration.
//!
//! The plan layout is fixed: three wings with known widths on a 2450-unit
//! canvas. These are plain values passed into the transform, never globals.

/// Width of the full floor-plan composition.
pub const CANVAS_WIDTH: f64 = 2450.0;

/// `id` of the group holding room labels in canvas coordinates.
pub const ROOM_LABEL_CONTAINER: &str = "room-numbers";

/// Immutable mapping from a group's horizontal offset to its width.
///
/// Lookup is by exact numeric value: `translate(50, 0)` and
/// `translate(50.0, 0)` hit the same entry, `translate(50.5, 0)` hits nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct MirrorTable {
    entries: Vec<(f64, f64)>,
}

impl MirrorTable {
    pub fn new(entries: impl IntoIterator<Item = (f64, f64)>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    /// Width of the group at `offset`, if the table knows it.
    pub fn width_for(&self, offset: f64) -> Option<f64> {
        self.entries
            .iter()
            .find(|(o, _)| *o == offset)
            .map(|(_, w)| *w)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for MirrorTable {
    fn default() -> Self {
        Self::new([(50.0, 920.0), (970.0, 920.0), (1890.0, 520.0)])
    }
}

/// Everything the mirror engine needs to know about the plan.
#[derive(Debug, Clone)]
pub struct MirrorConfig {
    /// Offset → width lookup for the wings
    pub table: MirrorTable,
    /// Full canvas width
    pub canvas_width: f64,
    /// `id` of the room-label container
    pub label_container_id: String,
}

impl Default for MirrorConfig {
    fn default() -> Self {
        Self {
            table: MirrorTable::default(),
            canvas_width: CANVAS_WIDTH,
            label_container_id: ROOM_LABEL_CONTAINER.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_lookup() {
        let table = MirrorTable::default();
        assert_eq!(table.width_for(50.0), Some(920.0));
        assert_eq!(table.width_for("1890".parse().unwrap()), Some(520.0));
        assert_eq!(table.width_for(50.5), None);
        assert_eq!(table.width_for(0.0), None);
    }

    #[test]
    fn test_default_wings_fit_canvas() {
        let config = MirrorConfig::default();
        assert_eq!(config.table.len(), 3);
        for offset in [50.0, 970.0, 1890.0] {
            let width = config.table.width_for(offset).unwrap();
            assert!(offset + width <= config.canvas_width);
        }
    }
}
