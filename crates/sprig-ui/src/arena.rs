//! Generation-checked storage for scene objects and widgets.
//!
//! Values live densely in a `Vec` and are removed with swap-and-pop, so
//! iteration order is insertion order until the first removal. A [`Handle`]
//! names a slot plus the generation it was issued for; once the value is
//! removed the slot's generation moves on and every old handle to it stops
//! resolving.

/// Index + generation pair returned by [`Arena::insert`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Handle {
    index: u32,
    generation: u32,
}

impl Handle {
    #[inline]
    pub fn index(self) -> u32 {
        self.index
    }

    #[inline]
    pub fn generation(self) -> u32 {
        self.generation
    }
}

#[derive(Debug, Clone)]
struct Slot {
    generation: u32,
    /// Position in `values`, `None` while the slot is free.
    dense: Option<u32>,
}

#[derive(Debug, Clone)]
pub struct Arena<T> {
    slots: Vec<Slot>,
    free: Vec<u32>,
    values: Vec<T>,
    /// Slot index owning each entry of `values`.
    owners: Vec<u32>,
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self { slots: Vec::new(), free: Vec::new(), values: Vec::new(), owners: Vec::new() }
    }
}

impl<T> Arena<T> {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn insert(&mut self, value: T) -> Handle {
        let dense = self.values.len() as u32;
        let index = match self.free.pop() {
            Some(index) => {
                self.slots[index as usize].dense = Some(dense);
                index
            }
            None => {
                self.slots.push(Slot { generation: 0, dense: Some(dense) });
                (self.slots.len() - 1) as u32
            }
        };
        self.values.push(value);
        self.owners.push(index);
        Handle { index, generation: self.slots[index as usize].generation }
    }

    fn dense_index(&self, handle: Handle) -> Option<usize> {
        let slot = self.slots.get(handle.index as usize)?;
        if slot.generation != handle.generation {
            return None;
        }
        slot.dense.map(|d| d as usize)
    }

    #[inline]
    pub fn contains(&self, handle: Handle) -> bool {
        self.dense_index(handle).is_some()
    }

    pub fn get(&self, handle: Handle) -> Option<&T> {
        self.dense_index(handle).map(|i| &self.values[i])
    }

    pub fn get_mut(&mut self, handle: Handle) -> Option<&mut T> {
        self.dense_index(handle).map(move |i| &mut self.values[i])
    }

    pub fn remove(&mut self, handle: Handle) -> Option<T> {
        let i = self.dense_index(handle)?;
        Some(self.remove_dense(i))
    }

    /// Keeps the values for which `keep` returns `true`.
    ///
    /// Removal swaps the last value into the hole, so the survivors' order
    /// changes the same way repeated [`remove`](Self::remove) calls would.
    pub fn retain(&mut self, mut keep: impl FnMut(&mut T) -> bool) {
        let mut i = 0;
        while i < self.values.len() {
            if keep(&mut self.values[i]) {
                i += 1;
            } else {
                self.remove_dense(i);
            }
        }
    }

    fn remove_dense(&mut self, i: usize) -> T {
        let slot = self.owners.swap_remove(i);
        let value = self.values.swap_remove(i);
        if let Some(&moved) = self.owners.get(i) {
            self.slots[moved as usize].dense = Some(i as u32);
        }
        let freed = &mut self.slots[slot as usize];
        freed.dense = None;
        freed.generation = freed.generation.wrapping_add(1);
        self.free.push(slot);
        value
    }

    /// Values with their handles, in storage order.
    pub fn iter(&self) -> impl Iterator<Item = (Handle, &T)> {
        self.owners.iter().zip(&self.values).map(|(&index, value)| {
            (Handle { index, generation: self.slots[index as usize].generation }, value)
        })
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.values.iter()
    }

    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.values.iter_mut()
    }
}
