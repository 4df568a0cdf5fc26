use std::{cell::Cell, fmt, rc::Rc};


/// Counts the live [`AllocationTracker`]s it has handed out.
///
/// Useful for checking that a container drops every element exactly once.
///
/// ```
/// use arraylist::{ArrayList, tracker::Census};
///
/// let census = Census::new();
/// let mut list = ArrayList::new();
/// list.add(census.track(1));
/// list.add(census.track(2));
/// assert_eq!(census.live(), 2);
///
/// drop(list.remove(0));
/// assert_eq!(census.live(), 1);
///
/// list.clear();
/// assert_eq!(census.live(), 0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Census {
    live: Rc<Cell<usize>>,
}

impl Census {
    pub fn new() -> Self { Self::default() }

    /// Creates a tracked value counted by this census.
    pub fn track(&self, value: i32) -> AllocationTracker {
        self.live.set(self.live.get() + 1);
        AllocationTracker { value, live: Rc::clone(&self.live) }
    }

    /// Number of trackers from this census that have not been dropped.
    pub fn live(&self) -> usize { self.live.get() }
}


/// An element that registers itself with a [`Census`] while alive.
pub struct AllocationTracker {
    value: i32,
    live: Rc<Cell<usize>>,
}

impl AllocationTracker {
    #[inline]
    pub fn value(&self) -> i32 { self.value }
}

impl Clone for AllocationTracker {
    fn clone(&self) -> Self {
        self.live.set(self.live.get() + 1);
        Self { value: self.value, live: Rc::clone(&self.live) }
    }
}

impl Drop for AllocationTracker {
    fn drop(&mut self) {
        let live = self.live.get();
        assert!(live > 0, "tracker dropped more often than it was created");
        self.live.set(live - 1);
    }
}

impl PartialEq for AllocationTracker {
    fn eq(&self, other: &Self) -> bool { self.value == other.value }
}

impl PartialEq<i32> for AllocationTracker {
    fn eq(&self, other: &i32) -> bool { self.value == *other }
}

impl fmt::Debug for AllocationTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AllocationTracker").field(&self.value).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn track() {
        let census = Census::new();
        let a = census.track(1);
        let b = a.clone();
        assert_eq!(census.live(), 2);
        assert_eq!(b.value(), 1);
        assert_eq!(a, b);

        drop(a);
        assert_eq!(census.live(), 1);
        drop(b);
        assert_eq!(census.live(), 0);
    }

    #[test]
    fn censuses_are_independent() {
        let (first, second) = (Census::new(), Census::new());
        let _a = first.track(1);
        assert_eq!(first.live(), 1);
        assert_eq!(second.live(), 0);

        let cloned = first.clone();
        let _b = cloned.track(2);
        assert_eq!(first.live(), 2);
    }
}
