use std::{alloc::{Layout, LayoutError}, error::Error, fmt};


/// The error returned when an index falls outside the valid range of an
/// [`ArrayList`](crate::ArrayList) operation.
///
/// `get`, `set` and `remove` accept `index < len`; `insert` also accepts
/// `index == len`. A rejected call never modifies the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutOfRange {
    /// The rejected index.
    pub index: usize,
    /// The list's length at the time of the call.
    pub len: usize,
}

impl OutOfRange {
    #[inline]
    pub(crate) const fn new(index: usize, len: usize) -> Self { Self { index, len } }
}

impl fmt::Display for OutOfRange {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "index {} out of range for list of length {}", self.index, self.len)
    }
}

impl Error for OutOfRange {}


/// The error returned when a buffer cannot be allocated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllocErr {
    /// The requested capacity overflows `usize` when counted in bytes.
    Overflow,
    /// The requested size exceeds what a [`Layout`] can describe.
    Layout,
    /// The allocator could not satisfy `layout`.
    Alloc { layout: Layout }
}

impl AllocErr {
    #[inline]
    pub(crate) const fn layout(_err: LayoutError) -> Self { Self::Layout }

    #[inline]
    pub(crate) const fn alloc(layout: Layout) -> Self { Self::Alloc { layout } }
}

impl fmt::Display for AllocErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Overflow => write!(f, "capacity overflow"),
            Self::Layout => write!(f, "invalid parameters to Layout::from_size_align"),
            Self::Alloc { layout } => write!(f, "allocation of {} bytes failed", layout.size()),
        }
    }
}

impl Error for AllocErr {}
