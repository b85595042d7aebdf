//! The photo slot store.
//!
//! Twelve fixed positions, one per month of the year. A slot is either
//! empty or holds exactly one photo; uploads replace a single slot and
//! never touch the others. Nothing is persisted - the store lives and
//! dies with the session.

use iced::widget::image;
use rand::distributions::Alphanumeric;
use rand::Rng;

/// Number of photo slots on the poster (months of a year)
pub const SLOT_COUNT: usize = 12;

/// One uploaded photo, pinned to its month
#[derive(Debug, Clone)]
pub struct PhotoSlot {
    /// Opaque id, unique within the session
    pub id: String,
    /// Decoded display handle for rendering
    pub handle: image::Handle,
    /// Base64 payload of the original file, for the metadata provider
    pub base64: String,
    /// Mime type matching `base64` (e.g. "image/jpeg")
    pub mime: &'static str,
    /// 1-based month this photo represents
    pub month: usize,
    /// Manual placement within the frame; the scattered view ignores these
    /// in favor of the session's scatter offsets
    pub x: f32,
    pub y: f32,
    pub rotation: f32,
}

impl PhotoSlot {
    /// Build a slot for position `index` (0-based) from decoded upload data
    pub fn new(index: usize, handle: image::Handle, base64: String, mime: &'static str) -> Self {
        Self {
            id: random_id(),
            handle,
            base64,
            mime,
            month: index + 1,
            x: 0.0,
            y: 0.0,
            rotation: 0.0,
        }
    }
}

/// Fixed-size store of the twelve slots
#[derive(Debug, Clone)]
pub struct SlotStore {
    slots: [Option<PhotoSlot>; SLOT_COUNT],
}

impl SlotStore {
    /// Create an empty store (all twelve slots vacant)
    pub fn new() -> Self {
        Self {
            slots: std::array::from_fn(|_| None),
        }
    }

    /// Replace the photo at `index`, leaving every other slot untouched.
    /// Out-of-range indices are ignored.
    pub fn set(&mut self, index: usize, slot: PhotoSlot) {
        if index < SLOT_COUNT {
            self.slots[index] = Some(slot);
        }
    }

    /// The photo at `index`, if any
    pub fn get(&self, index: usize) -> Option<&PhotoSlot> {
        self.slots.get(index).and_then(|slot| slot.as_ref())
    }

    /// Only the non-empty slots, in index order
    pub fn filled(&self) -> Vec<&PhotoSlot> {
        self.slots.iter().flatten().collect()
    }

    /// Number of non-empty slots
    pub fn filled_count(&self) -> usize {
        self.slots.iter().flatten().count()
    }
}

impl Default for SlotStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Generate a short opaque photo id (9 alphanumeric characters)
fn random_id() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(9)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(index: usize) -> PhotoSlot {
        PhotoSlot::new(
            index,
            image::Handle::from_bytes(vec![0u8; 4]),
            String::from("AAAA"),
            "image/png",
        )
    }

    #[test]
    fn test_new_store_is_empty() {
        let store = SlotStore::new();
        assert_eq!(store.filled_count(), 0);
        assert!(store.filled().is_empty());
    }

    #[test]
    fn test_set_replaces_only_the_target_slot() {
        let mut store = SlotStore::new();
        store.set(2, slot(2));
        store.set(7, slot(7));

        let first = store.get(2).unwrap().id.clone();
        store.set(2, slot(2));

        assert_ne!(store.get(2).unwrap().id, first, "slot 2 replaced");
        assert_eq!(store.get(7).unwrap().month, 8, "slot 7 untouched");
        assert_eq!(store.filled_count(), 2);
    }

    #[test]
    fn test_out_of_range_set_is_ignored() {
        let mut store = SlotStore::new();
        store.set(SLOT_COUNT, slot(0));
        store.set(99, slot(0));
        assert_eq!(store.filled_count(), 0);
    }

    #[test]
    fn test_filled_preserves_index_order() {
        let mut store = SlotStore::new();
        store.set(9, slot(9));
        store.set(0, slot(0));
        store.set(4, slot(4));

        let months: Vec<usize> = store.filled().iter().map(|p| p.month).collect();
        assert_eq!(months, vec![1, 5, 10]);
    }

    #[test]
    fn test_random_ids_are_nine_alphanumeric_chars() {
        let a = random_id();
        let b = random_id();
        assert_eq!(a.len(), 9);
        assert!(a.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(a, b);
    }
}
