use bevy::prelude::*;

use crate::engine::voxel::voxelizer::VoxelSet;

/// Voxel sets per catalog slot. Slots whose model failed to load stay `None`
/// and are skipped when cycling through models.
#[derive(Resource, Default)]
pub struct VoxelLibrary {
    pub sets: Vec<Option<VoxelSet>>,
}

impl VoxelLibrary {
    pub fn reset(&mut self, slot_count: usize) {
        self.sets = vec![None; slot_count];
    }

    pub fn set(&self, index: usize) -> Option<&VoxelSet> {
        self.sets.get(index)?.as_ref()
    }

    /// The cloud carries enough instances for the largest set.
    pub fn max_count(&self) -> usize {
        self.sets
            .iter()
            .flatten()
            .map(VoxelSet::len)
            .max()
            .unwrap_or(0)
    }

    /// A slot can be morphed to once it holds at least one voxel.
    pub fn available(&self, index: usize) -> bool {
        self.set(index).is_some_and(|set| !set.is_empty())
    }

    /// Next selectable slot after `from`, wrapping around. Falls back to
    /// `from` itself when nothing else is available.
    pub fn next_available(&self, from: usize) -> usize {
        let count = self.sets.len();
        if count == 0 {
            return from;
        }
        for step in 1..=count {
            let candidate = (from + step) % count;
            if self.available(candidate) {
                return candidate;
            }
        }
        from
    }

    /// Slot to use when the requested one is unavailable.
    pub fn resolve(&self, requested: usize) -> usize {
        if self.available(requested) {
            requested
        } else {
            self.next_available(requested)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::voxel::voxelizer::Voxel;

    fn set_of(len: usize) -> Option<VoxelSet> {
        Some(VoxelSet {
            voxels: vec![
                Voxel {
                    position: Vec3::ZERO,
                    color: LinearRgba::WHITE,
                };
                len
            ],
        })
    }

    #[test]
    fn max_count_spans_all_sets() {
        let library = VoxelLibrary {
            sets: vec![set_of(3), None, set_of(7), set_of(5)],
        };
        assert_eq!(library.max_count(), 7);
    }

    #[test]
    fn next_available_skips_missing_slots_and_wraps() {
        let library = VoxelLibrary {
            sets: vec![set_of(1), None, set_of(2)],
        };
        assert_eq!(library.next_available(0), 2);
        assert_eq!(library.next_available(2), 0);
    }

    #[test]
    fn next_available_with_single_set_stays_put() {
        let library = VoxelLibrary {
            sets: vec![None, set_of(4), None],
        };
        assert_eq!(library.next_available(1), 1);
    }

    #[test]
    fn resolve_prefers_the_requested_slot() {
        let library = VoxelLibrary {
            sets: vec![set_of(1), None, set_of(2)],
        };
        assert_eq!(library.resolve(0), 0);
        assert_eq!(library.resolve(1), 2);
    }

    #[test]
    fn empty_sets_are_not_selectable() {
        let library = VoxelLibrary {
            sets: vec![set_of(0), set_of(3)],
        };
        assert!(!library.available(0));
        assert_eq!(library.resolve(0), 1);
    }

    #[test]
    fn empty_library_has_no_instances() {
        let library = VoxelLibrary::default();
        assert_eq!(library.max_count(), 0);
        assert_eq!(library.next_available(0), 0);
    }
}
