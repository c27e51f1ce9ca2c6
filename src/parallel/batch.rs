//! Batch distribution for parallel evaluation.
//!
//! The build stream is pulled in fixed-size chunks so only one batch of builds
//! is held at a time; each chunk is then evaluated in parallel.

/// Adapter yielding `Vec`s of up to `size` items from a lazy iterator.
///
/// ```
/// # use smitebuilds::parallel::Batches;
/// let chunks: Vec<Vec<u32>> = Batches::new(0..5u32, 2).collect();
/// assert_eq!(chunks, vec![vec![0, 1], vec![2, 3], vec![4]]);
/// ```
#[derive(Debug, Clone)]
pub struct Batches<I> {
    inner: I,
    size: usize,
}

impl<I: Iterator> Batches<I> {
    /// A `size` of 0 is treated as 1.
    pub fn new(inner: I, size: usize) -> Self {
        Self {
            inner,
            size: size.max(1),
        }
    }
}

impl<I: Iterator> Iterator for Batches<I> {
    type Item = Vec<I::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        let batch: Vec<I::Item> = self.inner.by_ref().take(self.size).collect();
        if batch.is_empty() {
            None
        } else {
            Some(batch)
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (lower, upper) = self.inner.size_hint();
        (lower.div_ceil(self.size), upper.map(|n| n.div_ceil(self.size)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batches_chunk_a_stream() {
        let chunks: Vec<Vec<u32>> = Batches::new(0..7u32, 3).collect();
        assert_eq!(chunks, vec![vec![0, 1, 2], vec![3, 4, 5], vec![6]]);
        assert_eq!(Batches::new(0..7u32, 3).size_hint(), (3, Some(3)));
    }

    #[test]
    fn zero_size_batches_hold_one_item() {
        let chunks: Vec<Vec<u32>> = Batches::new(0..2u32, 0).collect();
        assert_eq!(chunks, vec![vec![0], vec![1]]);
        assert_eq!(Batches::new(std::iter::empty::<u32>(), 4).count(), 0);
    }
}
