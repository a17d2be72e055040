use alloc::vec::Vec;

use super::handle::Handle;

/// Slot storage for tree nodes.
///
/// Nodes own their children only through handles into this arena, so releasing
/// a node twice or reading a released node is caught here instead of turning
/// into a dangling pointer.
pub(crate) struct Arena<T> {
    slots: Vec<Option<T>>,
    free: Vec<Handle>,
}

impl<T> Arena<T> {
    pub(crate) const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    /// Number of live elements.
    pub(crate) fn len(&self) -> usize {
        self.slots.len().saturating_sub(self.free.len())
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn alloc(&mut self, element: T) -> Handle {
        if let Some(handle) = self.free.pop() {
            self.slots[handle.to_index()] = Some(element);
            return handle;
        }
        assert!(
            self.slots.len() <= Handle::MAX,
            "`Arena::alloc()` - arena is at maximum capacity ({})",
            Handle::MAX
        );
        self.slots.push(Some(element));
        Handle::from_index(self.slots.len() - 1)
    }

    #[inline]
    pub(crate) fn get(&self, handle: Handle) -> &T {
        self.slots[handle.to_index()].as_ref().expect("`Arena::get()` - `handle` is invalid!")
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, handle: Handle) -> &mut T {
        self.slots[handle.to_index()].as_mut().expect("`Arena::get_mut()` - `handle` is invalid!")
    }

    /// Removes the element, making its slot available to the next `alloc`.
    pub(crate) fn release(&mut self, handle: Handle) -> T {
        let element = self.slots[handle.to_index()].take().expect("`Arena::release()` - `handle` is invalid!");
        self.free.push(handle);
        element
    }

    /// Drops the backing storage. Only valid once every element was released.
    pub(crate) fn reset(&mut self) {
        debug_assert!(self.is_empty(), "`Arena::reset()` - live elements remain");
        self.slots = Vec::new();
        self.free = Vec::new();
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    #[should_panic(expected = "`Arena::release()` - `handle` is invalid!")]
    fn double_release_panics() {
        let mut arena: Arena<u32> = Arena::new();
        let handle = arena.alloc(7);
        assert_eq!(arena.release(handle), 7);
        let _ = arena.release(handle);
    }

    #[test]
    fn released_slots_are_reused() {
        let mut arena: Arena<u32> = Arena::new();
        let a = arena.alloc(1);
        let b = arena.alloc(2);
        arena.release(a);
        let c = arena.alloc(3);
        assert_eq!(a, c);
        assert_eq!(*arena.get(b), 2);
        assert_eq!(*arena.get(c), 3);
        assert_eq!(arena.len(), 2);
    }

    proptest! {
        #[test]
        fn arena_tracks_live_elements(ops in prop::collection::vec(op_strategy(), 0..256)) {
            let mut model: Vec<(Handle, u32)> = Vec::new();
            let mut arena: Arena<u32> = Arena::new();

            for op in ops {
                match op {
                    Op::Alloc(value) => model.push((arena.alloc(value), value)),
                    Op::Overwrite(which, value) if !model.is_empty() => {
                        let index = which % model.len();
                        *arena.get_mut(model[index].0) = value;
                        model[index].1 = value;
                    }
                    Op::Release(which) if !model.is_empty() => {
                        let (handle, value) = model.swap_remove(which % model.len());
                        prop_assert_eq!(arena.release(handle), value);
                    }
                    _ => {}
                }

                prop_assert_eq!(arena.len(), model.len());
                prop_assert_eq!(arena.is_empty(), model.is_empty());
                for &(handle, value) in &model {
                    prop_assert_eq!(*arena.get(handle), value);
                }
            }
        }
    }

    #[derive(Clone, Debug)]
    enum Op {
        Alloc(u32),
        Overwrite(usize, u32),
        Release(usize),
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            4 => any::<u32>().prop_map(Op::Alloc),
            1 => (any::<usize>(), any::<u32>()).prop_map(|(which, value)| Op::Overwrite(which, value)),
            2 => any::<usize>().prop_map(Op::Release),
        ]
    }
}
