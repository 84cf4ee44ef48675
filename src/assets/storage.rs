use std::sync::Arc;

use rustc_hash::FxHashMap;
use slotmap::{Key, SlotMap};
use smallvec::SmallVec;

/// Keyed storage of shared assets, indexed by the object that requested
/// them.
///
/// Assets live until the storage is dropped; handing out `Arc`s lets caches
/// keep using an asset without borrowing the storage.
pub struct AssetStorage<H: Key, R: Copy + Eq + std::hash::Hash, T> {
    map: SlotMap<H, Arc<T>>,
    by_requester: FxHashMap<R, SmallVec<[H; 2]>>,
}

impl<H: Key, R: Copy + Eq + std::hash::Hash, T> Default for AssetStorage<H, R, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: Key, R: Copy + Eq + std::hash::Hash, T> AssetStorage<H, R, T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            map: SlotMap::default(),
            by_requester: FxHashMap::default(),
        }
    }

    /// Adds an asset on behalf of `requester` and returns its handle.
    pub fn add(&mut self, requester: R, asset: Arc<T>) -> H {
        let handle = self.map.insert(asset);
        self.by_requester.entry(requester).or_default().push(handle);
        handle
    }

    #[must_use]
    pub fn get(&self, handle: H) -> Option<Arc<T>> {
        self.map.get(handle).cloned()
    }

    /// Handles of every asset created for `requester`, oldest first.
    #[must_use]
    pub fn requested_by(&self, requester: R) -> &[H] {
        self.by_requester.get(&requester).map(SmallVec::as_slice).unwrap_or_default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (H, &Arc<T>)> {
        self.map.iter()
    }
}

impl<H: Key, R: Copy + Eq + std::hash::Hash, T> std::fmt::Debug for AssetStorage<H, R, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssetStorage")
            .field("len", &self.map.len())
            .field("requesters", &self.by_requester.len())
            .finish()
    }
}
