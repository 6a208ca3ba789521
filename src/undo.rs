// Undo history: full-canvas snapshots, newest last.
// Visual: each entry is what the picture looked like just before one stroke (or clear).

use std::collections::VecDeque;

use image::RgbaImage;

#[derive(Debug, Default)]
pub struct UndoStore {
    snapshots: VecDeque<RgbaImage>,
    depth: Option<usize>, // None = keep everything
}

impl UndoStore {
    /// Unbounded history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep at most `depth` snapshots, dropping the oldest first.
    /// A depth of 0 is treated as 1 so that the last stroke stays undoable.
    pub fn with_depth(depth: Option<usize>) -> Self {
        Self { snapshots: VecDeque::new(), depth: depth.map(|d| d.max(1)) }
    }

    pub fn push(&mut self, snapshot: RgbaImage) {
        if let Some(depth) = self.depth {
            while self.snapshots.len() >= depth {
                self.snapshots.pop_front();
            }
        }
        self.snapshots.push_back(snapshot);
    }

    /// Newest snapshot, or `None` when there is nothing to undo.
    pub fn pop(&mut self) -> Option<RgbaImage> {
        self.snapshots.pop_back()
    }

    pub fn clear(&mut self) {
        self.snapshots.clear();
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn solid(v: u8) -> RgbaImage {
        RgbaImage::from_pixel(2, 2, Rgba([v, v, v, 255]))
    }

    #[test]
    fn pops_in_reverse_push_order() {
        let mut store = UndoStore::new();
        store.push(solid(1));
        store.push(solid(2));
        assert_eq!(store.len(), 2);
        assert_eq!(store.pop(), Some(solid(2)));
        assert_eq!(store.pop(), Some(solid(1)));
        assert!(store.is_empty());
    }

    #[test]
    fn pop_on_empty_is_a_no_op() {
        let mut store = UndoStore::new();
        for _ in 0..3 {
            assert_eq!(store.pop(), None);
        }
        assert!(store.is_empty());
    }

    #[test]
    fn bounded_depth_drops_oldest() {
        let mut store = UndoStore::with_depth(Some(2));
        for v in 1..=5 {
            store.push(solid(v));
        }
        assert_eq!(store.len(), 2);
        assert_eq!(store.pop(), Some(solid(5)));
        assert_eq!(store.pop(), Some(solid(4)));
        assert_eq!(store.pop(), None);
    }

    #[test]
    fn zero_depth_still_keeps_one() {
        let mut store = UndoStore::with_depth(Some(0));
        store.push(solid(1));
        store.push(solid(2));
        assert_eq!(store.pop(), Some(solid(2)));
        assert_eq!(store.pop(), None);
    }
}
