use std::cell::Cell;
use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_BUFFER_ID: AtomicU64 = AtomicU64::new(0);

/// Identity tag recorded once per allocation. Two handles with the same id
/// address the same storage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BufferId(u64);

impl BufferId {
    fn next() -> Self {
        BufferId(NEXT_BUFFER_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Contiguous `f64` storage shared by every matrix or vector built over it.
///
/// Cloning a `Buffer` hands out another handle to the same cells; it never
/// copies data. Use [`Buffer::deep_clone`] for an independent copy.
#[derive(Clone)]
pub struct Buffer {
    id: BufferId,
    cells: Rc<[Cell<f64>]>,
}

impl Buffer {
    pub fn zeros(len: usize) -> Self {
        Self::from_vec(vec![0.0; len])
    }

    pub fn from_vec(data: Vec<f64>) -> Self {
        Buffer {
            id: BufferId::next(),
            cells: data.into_iter().map(Cell::new).collect(),
        }
    }

    pub fn id(&self) -> BufferId {
        self.id
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// True when both handles refer to the same allocation.
    pub fn shares(&self, other: &Buffer) -> bool {
        self.id == other.id
    }

    pub fn deep_clone(&self) -> Buffer {
        Buffer::from_vec(self.to_vec())
    }

    pub fn to_vec(&self) -> Vec<f64> {
        self.cells.iter().map(Cell::get).collect()
    }

    #[inline]
    pub(crate) fn get(&self, idx: usize) -> f64 {
        self.cells[idx].get()
    }

    #[inline]
    pub(crate) fn set(&self, idx: usize, value: f64) {
        self.cells[idx].set(value)
    }

    #[inline]
    pub(crate) fn swap(&self, a: usize, b: usize) {
        self.cells[a].swap(&self.cells[b])
    }
}

impl Default for Buffer {
    fn default() -> Self {
        Buffer::from_vec(Vec::new())
    }
}

impl From<Vec<f64>> for Buffer {
    fn from(value: Vec<f64>) -> Self {
        Buffer::from_vec(value)
    }
}

impl fmt::Debug for Buffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Buffer")
            .field("id", &self.id)
            .field("len", &self.len())
            .finish()
    }
}
