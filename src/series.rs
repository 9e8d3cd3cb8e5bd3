/// Generator of stepped numbers series.
use std::ops::{Add, AddAssign};

/// Generator (iterator) state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct SeriesWithStep<T: Copy> {
    end: T,
    step: T,
    next: T,
}

impl<T> SeriesWithStep<T>
where
    T: Copy + Add<Output = T> + AddAssign + PartialOrd,
{
    /// Produces `start, start + step, ...` while values don't exceed `end` (inclusively).
    ///
    /// Caller is responsible to ensure that `end + step` isn't greater than type's maximum.
    ///
    /// Panics if `step` is zero.
    #[inline]
    pub(crate) fn new(start: T, end: T, step: T) -> Self {
        if start + step == start {
            panic!("step value is 0");
        }

        Self { end, step, next: start }
    }
}

impl<T> Iterator for SeriesWithStep<T>
where
    T: Copy + Add<Output = T> + AddAssign + PartialOrd,
{
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.next > self.end {
            None
        } else {
            let current = self.next;
            self.next += self.step;
            Some(current)
        }
    }
}
