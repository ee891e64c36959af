#![forbid(unsafe_code)]

//! Layout cache for memoizing [`compute`] results.
//!
//! This module provides [`LayoutCache`], which caches [`WrapLayout`] values
//! keyed by the child size list and the available width. Re-laying out the
//! same children at the same width is common when a host re-renders without
//! resizing; the cache turns those passes into a lookup.
//!
//! # Usage
//!
//! ```
//! use rowflow_layout::{LayoutCache, Size};
//!
//! let mut cache = LayoutCache::default();
//! let children = vec![Size::new(100.0, 50.0); 3];
//!
//! // First call computes, second call hits.
//! let first = cache.compute_cached(&children, 250.0);
//! let second = cache.compute_cached(&children, 250.0);
//! assert_eq!(first, second);
//! assert_eq!(cache.stats().hits, 1);
//! ```
//!
//! # Invalidation
//!
//! Width and child sizes are part of the key, so resizes and content changes
//! never serve stale layouts. [`LayoutCache::invalidate_all`] exists for
//! hosts whose children measure differently without changing identity (a
//! font swap, say): it bumps a generation counter in O(1) and existing
//! entries become misses on next access.
//!
//! # Eviction
//!
//! The cache uses LFU (least frequently used) eviction when at capacity.
//! Access counts track usage; the least-accessed entry is evicted first.

use std::collections::HashMap;
use std::hash::{DefaultHasher, Hash, Hasher};

use rowflow_core::geometry::Size;

use crate::{WrapLayout, compute};

/// Cache key derived from the layout inputs.
///
/// Sizes are hashed by bit pattern, so any representational difference
/// (including `0.0` vs `-0.0`) is a different key. That errs toward
/// recomputation, never toward a wrong hit.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct LayoutCacheKey(u64);

impl LayoutCacheKey {
    /// Build the key for a child list and available width.
    pub fn new(children: &[Size], available_width: f32) -> Self {
        let mut hasher = DefaultHasher::new();
        children.len().hash(&mut hasher);
        for child in children {
            child.width.to_bits().hash(&mut hasher);
            child.height.to_bits().hash(&mut hasher);
        }
        available_width.to_bits().hash(&mut hasher);
        Self(hasher.finish())
    }
}

/// Cached layout with metadata for eviction.
#[derive(Clone, Debug)]
struct CacheEntry {
    /// The cached layout.
    layout: WrapLayout,
    /// Generation when this entry was created/updated.
    generation: u64,
    /// Access count for LFU eviction.
    access_count: u32,
}

/// Statistics about cache performance.
#[derive(Debug, Clone, Default)]
pub struct LayoutCacheStats {
    /// Number of entries currently in the cache.
    pub entries: usize,
    /// Total cache hits since creation or last reset.
    pub hits: u64,
    /// Total cache misses since creation or last reset.
    pub misses: u64,
    /// Hit rate as a fraction (0.0 to 1.0).
    pub hit_rate: f64,
}

/// Cache of wrap layouts keyed by their inputs.
///
/// # Capacity
///
/// The cache has a fixed maximum capacity. When full, the least frequently
/// used entry is evicted to make room.
///
/// # Generation-Based Invalidation
///
/// Each entry is tagged with a generation number. [`invalidate_all()`] bumps
/// the generation, making all existing entries stale. Stale entries are
/// treated as cache misses and recomputed on next access.
///
/// [`invalidate_all()`]: LayoutCache::invalidate_all
#[derive(Debug)]
pub struct LayoutCache {
    entries: HashMap<LayoutCacheKey, CacheEntry>,
    generation: u64,
    max_entries: usize,
    hits: u64,
    misses: u64,
}

impl LayoutCache {
    /// Create a new cache with the specified maximum capacity.
    #[inline]
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: HashMap::with_capacity(max_entries),
            generation: 0,
            max_entries,
            hits: 0,
            misses: 0,
        }
    }

    /// Get the cached layout or compute and cache a new one.
    ///
    /// If a valid (same generation) entry exists for the key, returns a clone
    /// of it immediately. Otherwise calls the `compute` closure, caches the
    /// result, and returns it.
    pub fn get_or_compute<F>(&mut self, key: LayoutCacheKey, compute: F) -> WrapLayout
    where
        F: FnOnce() -> WrapLayout,
    {
        // Check for existing valid entry
        if let Some(entry) = self.entries.get_mut(&key)
            && entry.generation == self.generation
        {
            self.hits += 1;
            entry.access_count = entry.access_count.saturating_add(1);
            return entry.layout.clone();
        }

        // Cache miss - compute the value
        self.misses += 1;
        let layout = compute();

        // Evict if at capacity
        if self.entries.len() >= self.max_entries {
            self.evict_lfu();
        }

        self.entries.insert(
            key,
            CacheEntry {
                layout: layout.clone(),
                generation: self.generation,
                access_count: 1,
            },
        );

        layout
    }

    /// Memoized [`compute`]: builds the key from the inputs.
    pub fn compute_cached(&mut self, children: &[Size], available_width: f32) -> WrapLayout {
        let key = LayoutCacheKey::new(children, available_width);
        self.get_or_compute(key, || compute(children, available_width))
    }

    /// Invalidate all entries by bumping the generation.
    ///
    /// Existing entries become stale and will be recomputed on next access.
    /// This is an O(1) operation - entries are not immediately removed.
    #[inline]
    pub fn invalidate_all(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }

    /// Get current cache statistics.
    pub fn stats(&self) -> LayoutCacheStats {
        let total = self.hits + self.misses;
        LayoutCacheStats {
            entries: self.entries.len(),
            hits: self.hits,
            misses: self.misses,
            hit_rate: if total > 0 {
                self.hits as f64 / total as f64
            } else {
                0.0
            },
        }
    }

    /// Reset statistics counters to zero.
    #[inline]
    pub fn reset_stats(&mut self) {
        self.hits = 0;
        self.misses = 0;
    }

    /// Clear all entries from the cache.
    ///
    /// Unlike [`invalidate_all()`], this immediately frees memory.
    ///
    /// [`invalidate_all()`]: LayoutCache::invalidate_all
    #[inline]
    pub fn clear(&mut self) {
        self.entries.clear();
        self.generation = self.generation.wrapping_add(1);
    }

    /// Returns the current number of entries in the cache.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the cache is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the maximum capacity of the cache.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.max_entries
    }

    /// Evict the least frequently used entry.
    fn evict_lfu(&mut self) {
        if let Some(key) = self
            .entries
            .iter()
            .min_by_key(|(_, e)| e.access_count)
            .map(|(k, _)| *k)
        {
            self.entries.remove(&key);
        }
    }
}

impl Default for LayoutCache {
    /// Creates a cache with default capacity of 256 entries.
    fn default() -> Self {
        Self::new(256)
    }
}
