//! Long-lived navigation holder for watch-style hosts.
//!
//! [`Navigator`] owns a [`NavigationSpec`] and a registry, and maintains the
//! most recently completed [`ResolvedNavigation`] snapshot. Resolution is
//! all-or-nothing: readers either see the previous complete snapshot or the
//! next one, never a half-updated model.
//!
//! # Thread Safety
//!
//! Designed for concurrent access without external locking:
//! - Uses internal `RwLock<Option<Arc<ResolvedNavigation>>>` for the current
//!   snapshot
//! - Uses `Mutex<()>` for serializing resolution passes
//! - Uses `AtomicU64` generation counters for staleness tracking

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, RwLock};

use sitenav_registry::DocRegistry;

use crate::resolved::ResolvedNavigation;
use crate::spec::NavigationSpec;
use crate::{ResolveError, ResolveOptions, resolve};

/// Holds the current navigation snapshot and re-resolves on demand.
pub struct Navigator {
    spec: Mutex<Arc<NavigationSpec>>,
    registry: Arc<dyn DocRegistry>,
    options: ResolveOptions,
    /// Mutex for serializing resolution passes.
    resolve_lock: Mutex<()>,
    /// Last completed snapshot (atomically swappable).
    current: RwLock<Option<Arc<ResolvedNavigation>>>,
    /// Bumped by [`Navigator::invalidate`].
    generation: AtomicU64,
    /// Generation the current snapshot was resolved against.
    resolved_generation: AtomicU64,
}

impl Navigator {
    #[must_use]
    pub fn new(spec: NavigationSpec, registry: Arc<dyn DocRegistry>, options: ResolveOptions) -> Self {
        Self {
            spec: Mutex::new(Arc::new(spec)),
            registry,
            options,
            resolve_lock: Mutex::new(()),
            current: RwLock::new(None),
            generation: AtomicU64::new(1),
            resolved_generation: AtomicU64::new(0),
        }
    }

    /// Get the last completed snapshot without triggering resolution.
    ///
    /// May be stale; prefer [`Navigator::resolve_if_needed`] when an
    /// up-to-date model is required.
    ///
    /// # Panics
    ///
    /// Panics if the internal `RwLock` is poisoned.
    #[must_use]
    pub fn snapshot(&self) -> Option<Arc<ResolvedNavigation>> {
        self.current.read().unwrap().clone()
    }

    /// Get an up-to-date snapshot, resolving if anything changed.
    ///
    /// If a mutation arrives while a pass is running, that pass's result is
    /// discarded and the pass re-runs against the new state, so a returned
    /// snapshot never mixes pre- and post-mutation inputs.
    ///
    /// On resolution failure the previous snapshot is kept; readers continue
    /// to see the last complete model.
    ///
    /// # Panics
    ///
    /// Panics if internal locks are poisoned.
    pub fn resolve_if_needed(&self) -> Result<Arc<ResolvedNavigation>, ResolveError> {
        // Fast path: snapshot is current
        if let Some(current) = self.fresh_snapshot() {
            return Ok(current);
        }

        // Slow path: acquire resolve lock
        let _guard = self.resolve_lock.lock().unwrap();

        loop {
            // Double-check after acquiring lock (or after a discarded pass)
            if let Some(current) = self.fresh_snapshot() {
                return Ok(current);
            }

            let generation = self.generation.load(Ordering::Acquire);
            let spec = self.spec.lock().unwrap().clone();
            let result = resolve(&spec, self.registry.as_ref(), &self.options);

            if self.generation.load(Ordering::Acquire) != generation {
                // Invalidated mid-pass; the result reflects stale state.
                continue;
            }

            let resolved = Arc::new(result?);
            *self.current.write().unwrap() = Some(resolved.clone());
            self.resolved_generation.store(generation, Ordering::Release);
            return Ok(resolved);
        }
    }

    /// Mark the current snapshot stale.
    ///
    /// Call after registry contents change. The next
    /// [`Navigator::resolve_if_needed`] runs a fresh pass; current readers
    /// continue using their existing `Arc<ResolvedNavigation>`.
    pub fn invalidate(&self) {
        self.generation.fetch_add(1, Ordering::AcqRel);
    }

    /// Replace the navigation spec and mark the snapshot stale.
    ///
    /// # Panics
    ///
    /// Panics if the internal spec lock is poisoned.
    pub fn update_spec(&self, spec: NavigationSpec) {
        *self.spec.lock().unwrap() = Arc::new(spec);
        self.invalidate();
    }

    fn fresh_snapshot(&self) -> Option<Arc<ResolvedNavigation>> {
        let generation = self.generation.load(Ordering::Acquire);
        if self.resolved_generation.load(Ordering::Acquire) == generation {
            self.current.read().unwrap().clone()
        } else {
            None
        }
    }
}
