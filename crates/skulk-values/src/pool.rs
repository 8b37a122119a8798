//! Buffer pool for merge output arrays.
//!
//! Merges run once per series per query, so allocating a fresh output buffer
//! every time churns the allocator. An [`ArrayPool`] keeps released arrays
//! around and hands them back out as merge scratch space:
//!
//! ```text
//! acquire scratch (>= worst case) → merge into scratch → swap with receiver
//!                                                       → release old storage
//! ```
//!
//! The pool is `Send + Sync` and can be shared between worker threads with an
//! `Arc`. Only the hand-off of buffers is locked; the merge scan itself runs
//! without holding the lock.
//!
//! # Example
//!
//! ```rust
//! use alopex_skulk_values::{ArrayPool, IntegerArray, PoolConfig};
//!
//! let pool = ArrayPool::new(PoolConfig::default());
//! let mut disk: IntegerArray = vec![(1, 10), (2, 20)].into_iter().collect();
//! let cache: IntegerArray = vec![(2, 25)].into_iter().collect();
//!
//! pool.merge(&mut disk, &cache)?;
//! assert_eq!(disk.values(), &[10, 25]);
//! # Ok::<(), alopex_skulk_values::ArrayError>(())
//! ```

use crate::array::{OutputSizing, TimeValueArray};
use crate::error::Result;
use crate::value::ArrayValue;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use tracing::{debug, trace};

/// Default maximum number of buffers kept by a pool.
pub const DEFAULT_MAX_POOLED_BUFFERS: usize = 16;

/// Default largest buffer capacity (in points) a pool keeps on release.
pub const DEFAULT_MAX_RETAINED_CAPACITY: usize = 1024 * 1024;

/// Configuration for an [`ArrayPool`].
#[derive(Debug, Clone)]
pub struct PoolConfig {
    /// Maximum number of idle buffers kept by the pool.
    ///
    /// Buffers released while the pool is full are dropped. Default: 16.
    pub max_pooled_buffers: usize,

    /// Largest capacity, in points, of a buffer the pool keeps.
    ///
    /// Larger buffers are dropped on release so one oversized merge does not
    /// pin its memory for the life of the pool. Default: 1 Mi points.
    pub max_retained_capacity: usize,

    /// How merge output buffers are sized when no pooled buffer is large
    /// enough. Default: [`OutputSizing::WorstCase`].
    pub sizing: OutputSizing,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_pooled_buffers: DEFAULT_MAX_POOLED_BUFFERS,
            max_retained_capacity: DEFAULT_MAX_RETAINED_CAPACITY,
            sizing: OutputSizing::default(),
        }
    }
}

impl PoolConfig {
    /// Sets the maximum number of idle buffers.
    pub fn with_max_pooled_buffers(mut self, max: usize) -> Self {
        self.max_pooled_buffers = max;
        self
    }

    /// Sets the largest capacity a pooled buffer may have.
    pub fn with_max_retained_capacity(mut self, capacity: usize) -> Self {
        self.max_retained_capacity = capacity;
        self
    }

    /// Sets the output sizing strategy.
    pub fn with_sizing(mut self, sizing: OutputSizing) -> Self {
        self.sizing = sizing;
        self
    }
}

/// Counters for an [`ArrayPool`].
#[derive(Debug, Default)]
pub struct PoolStats {
    /// Acquisitions served by a pooled buffer.
    pub hits: AtomicU64,
    /// Acquisitions that had to allocate.
    pub misses: AtomicU64,
    /// Released buffers that were dropped instead of pooled.
    pub discarded: AtomicU64,
}

impl PoolStats {
    /// Gets the hit count.
    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    /// Gets the miss count.
    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    /// Gets the discard count.
    pub fn discarded(&self) -> u64 {
        self.discarded.load(Ordering::Relaxed)
    }
}

/// Pool of reusable [`TimeValueArray`] buffers for one value domain.
#[derive(Debug)]
pub struct ArrayPool<T> {
    config: PoolConfig,
    buffers: Mutex<Vec<TimeValueArray<T>>>,
    stats: PoolStats,
}

impl<T: ArrayValue> ArrayPool<T> {
    /// Creates an empty pool.
    pub fn new(config: PoolConfig) -> Self {
        Self {
            config,
            buffers: Mutex::new(Vec::new()),
            stats: PoolStats::default(),
        }
    }

    /// Returns the pool configuration.
    pub fn config(&self) -> &PoolConfig {
        &self.config
    }

    /// Returns the pool counters.
    pub fn stats(&self) -> &PoolStats {
        &self.stats
    }

    /// Returns the number of idle buffers.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns true if no idle buffers are pooled.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Returns an empty array with room for at least `capacity` points.
    ///
    /// The smallest pooled buffer that fits is reused. If none fits, the
    /// largest pooled buffer is grown, or a new one is allocated when the pool
    /// is empty.
    pub fn acquire(&self, capacity: usize) -> Result<TimeValueArray<T>> {
        let pooled = {
            let mut buffers = self.lock();
            let fit = buffers
                .iter()
                .enumerate()
                .filter(|(_, b)| b.capacity() >= capacity)
                .min_by_key(|(_, b)| b.capacity())
                .map(|(i, _)| i);
            match fit {
                Some(i) => Some((buffers.swap_remove(i), true)),
                None => {
                    let largest = buffers
                        .iter()
                        .enumerate()
                        .max_by_key(|(_, b)| b.capacity())
                        .map(|(i, _)| i);
                    largest.map(|i| (buffers.swap_remove(i), false))
                }
            }
        };

        match pooled {
            Some((array, true)) => {
                self.stats.hits.fetch_add(1, Ordering::Relaxed);
                Ok(array)
            }
            Some((mut array, false)) => {
                self.stats.misses.fetch_add(1, Ordering::Relaxed);
                debug!(
                    from = array.capacity(),
                    to = capacity,
                    "growing pooled {} buffer",
                    T::VALUE_TYPE
                );
                if let Err(err) = array.try_reserve(capacity) {
                    self.release(array);
                    return Err(err);
                }
                Ok(array)
            }
            None => {
                self.stats.misses.fetch_add(1, Ordering::Relaxed);
                TimeValueArray::try_with_capacity(capacity)
            }
        }
    }

    /// Returns `array`'s storage to the pool.
    ///
    /// The array is cleared first. It is dropped instead if the pool is full
    /// or its capacity exceeds `max_retained_capacity`.
    pub fn release(&self, mut array: TimeValueArray<T>) {
        let capacity = array.capacity();
        if capacity == 0 {
            return;
        }
        if capacity > self.config.max_retained_capacity {
            self.stats.discarded.fetch_add(1, Ordering::Relaxed);
            trace!(capacity, "dropping oversized {} buffer", T::VALUE_TYPE);
            return;
        }

        array.clear();
        let mut buffers = self.lock();
        if buffers.len() >= self.config.max_pooled_buffers {
            drop(buffers);
            self.stats.discarded.fetch_add(1, Ordering::Relaxed);
            trace!(capacity, "pool full, dropping {} buffer", T::VALUE_TYPE);
            return;
        }
        buffers.push(array);
    }

    /// Merges `b` into `a` through a pooled output buffer.
    ///
    /// Produces exactly the same result as [`TimeValueArray::merge`]. The
    /// storage `a` held before the merge is released back to the pool. On
    /// allocation failure `a` is unchanged.
    pub fn merge(&self, a: &mut TimeValueArray<T>, b: &TimeValueArray<T>) -> Result<()> {
        if b.is_empty() {
            return Ok(());
        }

        let capacity = self.config.sizing.capacity(a, b);
        let scratch = self.acquire(capacity)?;
        trace!(
            a_len = a.len(),
            b_len = b.len(),
            capacity,
            "pooled {} merge",
            T::VALUE_TYPE
        );
        let old = a.merge_with_scratch(b, scratch);
        self.release(old);
        Ok(())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<TimeValueArray<T>>> {
        self.buffers.lock().unwrap_or_else(|err| err.into_inner())
    }
}

impl<T: ArrayValue> Default for ArrayPool<T> {
    fn default() -> Self {
        Self::new(PoolConfig::default())
    }
}
