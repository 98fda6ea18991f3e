//! Stable-ID storage for platforms
//!
//! Slots are never shifted: removal tombstones the slot and pushes it on a
//! free list, so removal is O(1) and a `PlatformId` can never alias a newer
//! platform that reused the same slot (the generation differs).

use serde::{Deserialize, Serialize};

use super::state::Platform;

/// Handle to a platform in a [`PlatformArena`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlatformId {
    index: u32,
    generation: u32,
}

impl PlatformId {
    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }
}

#[derive(Debug, Clone)]
struct Slot {
    generation: u32,
    platform: Option<Platform>,
}

/// Platform collection with generational handles and a free list
#[derive(Debug, Clone, Default)]
pub struct PlatformArena {
    slots: Vec<Slot>,
    free: Vec<u32>,
    len: usize,
}

impl PlatformArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a platform, reusing a tombstoned slot when one is free
    pub fn insert(&mut self, platform: Platform) -> PlatformId {
        self.len += 1;
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.platform = Some(platform);
            return PlatformId {
                index,
                generation: slot.generation,
            };
        }

        let index = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 0,
            platform: Some(platform),
        });
        PlatformId {
            index,
            generation: 0,
        }
    }

    /// Remove a platform. Stale or unknown handles return `None`.
    pub fn remove(&mut self, id: PlatformId) -> Option<Platform> {
        let slot = self.slots.get_mut(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        let platform = slot.platform.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        self.len -= 1;
        Some(platform)
    }

    pub fn get(&self, id: PlatformId) -> Option<&Platform> {
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.platform.as_ref())
    }

    pub fn contains(&self, id: PlatformId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Live platforms in slot order (deterministic for a given history)
    pub fn iter(&self) -> impl Iterator<Item = (PlatformId, &Platform)> {
        self.slots.iter().enumerate().filter_map(|(i, slot)| {
            slot.platform.as_ref().map(|p| {
                (
                    PlatformId {
                        index: i as u32,
                        generation: slot.generation,
                    },
                    p,
                )
            })
        })
    }

    /// Drop every platform the predicate rejects. Returns how many were removed.
    pub fn retain(&mut self, mut keep: impl FnMut(&Platform) -> bool) -> usize {
        let mut removed = 0;
        for (i, slot) in self.slots.iter_mut().enumerate() {
            let discard = slot.platform.as_ref().is_some_and(|p| !keep(p));
            if discard {
                slot.platform = None;
                slot.generation = slot.generation.wrapping_add(1);
                self.free.push(i as u32);
                removed += 1;
            }
        }
        self.len -= removed;
        removed
    }

    /// Remove every platform. Slots are kept and their generations bumped,
    /// so handles from before the clear stay stale.
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            if slot.platform.take().is_some() {
                slot.generation = slot.generation.wrapping_add(1);
            }
        }
        // Refill front to back so new inserts land in slot order
        self.free = (0..self.slots.len() as u32).rev().collect();
        self.len = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn platform(x: f32, y: f32) -> Platform {
        Platform::new(x, y, 70.0, 15.0)
    }

    #[test]
    fn test_insert_remove() {
        let mut arena = PlatformArena::new();
        let a = arena.insert(platform(0.0, 0.0));
        let b = arena.insert(platform(100.0, 0.0));
        assert_eq!(arena.len(), 2);

        assert_eq!(arena.remove(a).map(|p| p.pos.x), Some(0.0));
        assert_eq!(arena.len(), 1);
        assert!(!arena.contains(a));
        assert!(arena.contains(b));

        // Double remove is a no-op
        assert!(arena.remove(a).is_none());
        assert_eq!(arena.len(), 1);
    }

    #[test]
    fn test_stale_handle_after_reuse() {
        let mut arena = PlatformArena::new();
        let a = arena.insert(platform(0.0, 0.0));
        arena.remove(a);

        let c = arena.insert(platform(50.0, 50.0));
        assert_eq!(c.index(), a.index());
        assert_ne!(c.generation(), a.generation());

        // The old handle must not reach the new occupant
        assert!(arena.get(a).is_none());
        assert!(arena.remove(a).is_none());
        assert_eq!(arena.get(c).map(|p| p.pos.x), Some(50.0));
    }

    #[test]
    fn test_retain() {
        let mut arena = PlatformArena::new();
        for i in 0..6 {
            arena.insert(platform(0.0, i as f32 * 100.0));
        }
        let removed = arena.retain(|p| p.pos.y < 300.0);
        assert_eq!(removed, 3);
        assert_eq!(arena.len(), 3);
        assert!(arena.iter().all(|(_, p)| p.pos.y < 300.0));

        // Freed slots get reused
        arena.insert(platform(0.0, 0.0));
        assert_eq!(arena.len(), 4);
        assert_eq!(arena.iter().count(), 4);
    }

    #[test]
    fn test_clear_invalidates_handles() {
        let mut arena = PlatformArena::new();
        let a = arena.insert(platform(1.0, 0.0));
        let b = arena.insert(platform(2.0, 0.0));
        arena.remove(b);
        let c = arena.insert(platform(3.0, 0.0));
        arena.clear();
        assert!(arena.is_empty());
        assert_eq!(arena.iter().count(), 0);

        let d = arena.insert(platform(4.0, 0.0));
        let e = arena.insert(platform(5.0, 0.0));
        assert_eq!((d.index(), e.index()), (a.index(), c.index()));
        for stale in [a, b, c] {
            assert!(arena.get(stale).is_none());
            assert!(arena.remove(stale).is_none());
        }
        assert_eq!(arena.len(), 2);

        // Reuse after clear keeps slot order equal to insertion order
        let xs: Vec<f32> = arena.iter().map(|(_, p)| p.pos.x).collect();
        assert_eq!(xs, vec![4.0, 5.0]);
    }

    #[test]
    fn test_iter_ids_resolve() {
        let mut arena = PlatformArena::new();
        arena.insert(platform(1.0, 0.0));
        let mid = arena.insert(platform(2.0, 0.0));
        arena.insert(platform(3.0, 0.0));
        arena.remove(mid);

        let xs: Vec<f32> = arena.iter().map(|(_, p)| p.pos.x).collect();
        assert_eq!(xs, vec![1.0, 3.0]);
        for (id, p) in arena.iter() {
            assert_eq!(arena.get(id).map(|q| q.pos), Some(p.pos));
        }
    }
}
