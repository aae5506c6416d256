//! Opaque identities used to group tweens by context and target.

use std::rc::Rc;

use serde::{Deserialize, Serialize};

/// Opaque identity of a context (logical owner) or target (animated object).
///
/// Compared by value, but the value is never derived from an object's contents:
/// it is either minted by [`IdAllocator`] or taken from the address of a shared
/// allocation via [`ObjectId::of`]. Two distinct objects with equal contents are
/// therefore distinct identities.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct ObjectId(pub u64);

impl ObjectId {
    /// Identity of the allocation behind `obj`.
    ///
    /// Only stable while `obj` (or a clone of it) is alive; a freed address may be
    /// handed out again by the allocator.
    #[inline]
    pub fn of<T: ?Sized>(obj: &Rc<T>) -> Self {
        ObjectId(Rc::as_ptr(obj) as *const () as usize as u64)
    }
}

/// Monotonic allocator for logical [`ObjectId`]s.
///
/// Allocated ids start at the top of the `u64` range and count down so they stay
/// clear of the addresses produced by [`ObjectId::of`].
#[derive(Debug)]
pub struct IdAllocator {
    next: u64,
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self { next: u64::MAX }
    }
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn alloc(&mut self) -> ObjectId {
        let id = ObjectId(self.next);
        self.next = self.next.wrapping_sub(1);
        id
    }

    #[inline]
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
