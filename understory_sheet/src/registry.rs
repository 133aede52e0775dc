// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keyed registration of the sheets shown in one host context.
//!
//! A host context (a window, a screen, a scene) owns one overlay surface that
//! floats above its normal content. Every sheet shown in that context is
//! registered under a string id; the overlay renders the sheets in
//! registration order, so later sheets stack on top of earlier ones.
//!
//! Ids are unique per context. Registering an id that is already present
//! evicts the old entry (last write wins). The overlay surface only accepts
//! focus while at least one sheet is registered.
//!
//! ## Minimal example
//!
//! ```
//! use understory_sheet::{Sheet, SheetConfig, SheetRegistry, SheetState, DEFAULT_SHEET_ID};
//!
//! let mut registry = SheetRegistry::new(());
//! assert!(!registry.is_focusable());
//!
//! let sheet = Sheet::new(SheetConfig::default(), SheetState::Medium);
//! registry.register(DEFAULT_SHEET_ID, sheet, SheetState::Medium);
//! assert!(registry.is_focusable());
//!
//! registry.unregister(DEFAULT_SHEET_ID);
//! assert!(registry.is_empty());
//! assert!(!registry.is_focusable());
//! ```

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::Debug;
use core::hash::Hash;

use hashbrown::HashMap;
use smallvec::SmallVec;

use crate::binding::StateBinding;
use crate::config::DefaultDecor;
use crate::sheet::Sheet;
use crate::state::SheetState;

/// Id used when a host does not name its sheet.
pub const DEFAULT_SHEET_ID: &str = "default";

/// Most contexts show one or two sheets at a time.
const INLINE_ENTRIES: usize = 2;

/// The overlay surface of a host context.
pub trait OverlayHost {
    /// Re-renders the overlay with the registered sheet ids, bottom to top.
    fn refresh(&mut self, ids: &[&str]);

    /// Makes the overlay surface accept or refuse focus.
    fn set_focusable(&mut self, focusable: bool);
}

/// A context without an overlay surface.
impl OverlayHost for () {
    fn refresh(&mut self, _ids: &[&str]) {}

    fn set_focusable(&mut self, _focusable: bool) {}
}

/// One registered sheet with its state binding.
#[derive(Debug)]
pub struct SheetEntry<B, D = DefaultDecor> {
    id: String,
    sheet: Sheet<D>,
    binding: B,
}

impl<B: StateBinding, D> SheetEntry<B, D> {
    /// Registration id.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The sheet.
    #[must_use]
    pub fn sheet(&self) -> &Sheet<D> {
        &self.sheet
    }

    /// The sheet, mutably.
    pub fn sheet_mut(&mut self) -> &mut Sheet<D> {
        &mut self.sheet
    }

    /// The host's state binding.
    #[must_use]
    pub fn binding(&self) -> &B {
        &self.binding
    }

    /// The sheet and its binding, both mutably, for driving gestures.
    pub fn parts_mut(&mut self) -> (&mut Sheet<D>, &mut B) {
        (&mut self.sheet, &mut self.binding)
    }

    /// Adopts whatever state the host has written into the binding.
    ///
    /// See [`Sheet::sync_state`].
    pub fn sync_state(&mut self) -> bool {
        self.sheet.sync_state(&mut self.binding)
    }

    /// Dismisses the sheet through its binding.
    ///
    /// See [`Sheet::dismiss`].
    pub fn dismiss(&mut self) -> bool {
        self.sheet.dismiss(&mut self.binding)
    }

    /// Splits the entry into its id, sheet, and binding.
    pub fn into_parts(self) -> (String, Sheet<D>, B) {
        (self.id, self.sheet, self.binding)
    }
}

/// The sheets registered in one host context.
#[derive(Debug)]
pub struct SheetRegistry<H, B = SheetState, D = DefaultDecor> {
    host: H,
    entries: SmallVec<[SheetEntry<B, D>; INLINE_ENTRIES]>,
    focusable: bool,
}

impl<H: OverlayHost, B: StateBinding, D> SheetRegistry<H, B, D> {
    /// Creates an empty registry driving `host`.
    pub fn new(host: H) -> Self {
        Self {
            host,
            entries: SmallVec::new(),
            focusable: false,
        }
    }

    /// The overlay surface.
    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Registers `sheet` under `id`, evicting any entry with the same id.
    ///
    /// The new entry is placed on top of the stack. Returns the evicted entry.
    pub fn register(
        &mut self,
        id: impl Into<String>,
        sheet: Sheet<D>,
        binding: B,
    ) -> Option<SheetEntry<B, D>> {
        let id = id.into();
        let evicted = self.take(&id);
        if evicted.is_some() {
            tracing::debug!(id = %id, "sheet evicted by re-registration");
        } else {
            tracing::debug!(id = %id, "sheet registered");
        }
        self.entries.push(SheetEntry { id, sheet, binding });
        self.changed();
        evicted
    }

    /// Removes the entry registered under `id`, if any.
    pub fn unregister(&mut self, id: &str) -> Option<SheetEntry<B, D>> {
        let removed = self.take(id)?;
        tracing::debug!(id, "sheet unregistered");
        self.changed();
        Some(removed)
    }

    /// Looks up an entry by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&SheetEntry<B, D>> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Looks up an entry by id, mutably.
    pub fn get_mut(&mut self, id: &str) -> Option<&mut SheetEntry<B, D>> {
        self.entries.iter_mut().find(|e| e.id == id)
    }

    /// Entries in registration order, bottom to top.
    pub fn iter(&self) -> impl Iterator<Item = &SheetEntry<B, D>> + '_ {
        self.entries.iter()
    }

    /// Number of registered sheets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no sheet is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether the overlay surface currently accepts focus.
    #[must_use]
    pub fn is_focusable(&self) -> bool {
        self.focusable
    }

    /// Earliest pending commit deadline across all sheets.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        self.entries
            .iter()
            .filter_map(|e| e.sheet.next_deadline())
            .min()
    }

    /// Runs every commit due at `now_ms`.
    ///
    /// Returns the id and new state of each sheet that settled, in
    /// registration order.
    pub fn poll(&mut self, now_ms: u64) -> Vec<(String, SheetState)> {
        self.entries
            .iter_mut()
            .filter_map(|e| {
                let state = e.sheet.poll(now_ms, &mut e.binding)?;
                Some((e.id.clone(), state))
            })
            .collect()
    }

    fn take(&mut self, id: &str) -> Option<SheetEntry<B, D>> {
        let index = self.entries.iter().position(|e| e.id == id)?;
        Some(self.entries.remove(index))
    }

    fn changed(&mut self) {
        let ids: SmallVec<[&str; INLINE_ENTRIES]> =
            self.entries.iter().map(|e| e.id.as_str()).collect();
        self.host.refresh(&ids);
        let focusable = !self.entries.is_empty();
        if focusable != self.focusable {
            self.focusable = focusable;
            self.host.set_focusable(focusable);
        }
    }
}

/// Registries for every live host context, created on first use.
#[derive(Debug)]
pub struct SheetRegistries<K, H, B = SheetState, D = DefaultDecor> {
    registries: HashMap<K, SheetRegistry<H, B, D>>,
}

impl<K, H, B, D> Default for SheetRegistries<K, H, B, D> {
    fn default() -> Self {
        Self {
            registries: HashMap::new(),
        }
    }
}

impl<K, H, B, D> SheetRegistries<K, H, B, D>
where
    K: Eq + Hash + Debug,
    H: OverlayHost,
    B: StateBinding,
{
    /// Creates an empty set of registries.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The registry of the context `key`, creating it with a host from
    /// `make_host` on first use.
    pub fn resolve(
        &mut self,
        key: K,
        make_host: impl FnOnce() -> H,
    ) -> &mut SheetRegistry<H, B, D> {
        self.registries.entry(key).or_insert_with_key(|key| {
            tracing::debug!(?key, "sheet context created");
            SheetRegistry::new(make_host())
        })
    }

    /// The registry of `key`, if the context is live.
    #[must_use]
    pub fn get(&self, key: &K) -> Option<&SheetRegistry<H, B, D>> {
        self.registries.get(key)
    }

    /// The registry of `key`, mutably, if the context is live.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut SheetRegistry<H, B, D>> {
        self.registries.get_mut(key)
    }

    /// Destroys the registry of a context whose host is going away.
    ///
    /// Returns it so the host can release any remaining sheets.
    pub fn teardown(&mut self, key: &K) -> Option<SheetRegistry<H, B, D>> {
        let registry = self.registries.remove(key)?;
        tracing::debug!(?key, sheets = registry.len(), "sheet context torn down");
        Some(registry)
    }

    /// Number of live contexts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.registries.len()
    }

    /// Returns `true` if no context is live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.registries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SheetConfig;
    use crate::gesture::DragEvent;
    use alloc::borrow::ToOwned;
    use alloc::vec;
    use kurbo::Size;

    #[derive(Debug, Default)]
    struct RecordingHost {
        refreshes: Vec<Vec<String>>,
        focus: Vec<bool>,
    }

    impl OverlayHost for RecordingHost {
        fn refresh(&mut self, ids: &[&str]) {
            self.refreshes
                .push(ids.iter().map(|id| (*id).to_owned()).collect());
        }

        fn set_focusable(&mut self, focusable: bool) {
            self.focus.push(focusable);
        }
    }

    fn sheet(state: SheetState) -> Sheet {
        let mut sheet = Sheet::new(SheetConfig::default(), state);
        sheet.set_full_size(Size::new(390.0, 800.0));
        sheet.measure_content(Size::new(390.0, 300.0));
        sheet
    }

    #[test]
    fn register_refreshes_in_order() {
        let mut registry = SheetRegistry::new(RecordingHost::default());
        registry.register("a", sheet(SheetState::Medium), SheetState::Medium);
        registry.register("b", sheet(SheetState::Large), SheetState::Large);
        assert_eq!(
            registry.host().refreshes,
            vec![vec!["a".to_owned()], vec!["a".to_owned(), "b".to_owned()]]
        );
        let ids: Vec<_> = registry.iter().map(SheetEntry::id).collect();
        assert_eq!(ids, ["a", "b"]);
    }

    #[test]
    fn same_id_evicts_and_moves_to_top() {
        let mut registry = SheetRegistry::new(RecordingHost::default());
        registry.register("a", sheet(SheetState::Medium), SheetState::Medium);
        registry.register("b", sheet(SheetState::Medium), SheetState::Medium);
        let evicted = registry
            .register("a", sheet(SheetState::Large), SheetState::Large)
            .expect("first entry is evicted");
        assert_eq!(evicted.sheet().state(), SheetState::Medium);
        assert_eq!(registry.len(), 2);
        let ids: Vec<_> = registry.iter().map(SheetEntry::id).collect();
        assert_eq!(ids, ["b", "a"]);
        assert_eq!(registry.get("a").unwrap().sheet().state(), SheetState::Large);
    }

    #[test]
    fn focusable_only_while_non_empty() {
        let mut registry = SheetRegistry::new(RecordingHost::default());
        registry.register("a", sheet(SheetState::Medium), SheetState::Medium);
        registry.register("b", sheet(SheetState::Medium), SheetState::Medium);
        assert!(registry.is_focusable());
        registry.unregister("a");
        assert!(registry.is_focusable());
        registry.unregister("b");
        assert!(!registry.is_focusable());
        // Focus is only reported when it flips.
        assert_eq!(registry.host().focus, [true, false]);
    }

    #[test]
    fn unregister_missing_id_is_noop() {
        let mut registry = SheetRegistry::new(RecordingHost::default());
        registry.register("a", sheet(SheetState::Medium), SheetState::Medium);
        assert!(registry.unregister("zzz").is_none());
        assert_eq!(registry.host().refreshes.len(), 1);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn poll_drives_every_sheet() {
        let mut registry: SheetRegistry<()> = SheetRegistry::new(());
        registry.register("a", sheet(SheetState::Medium), SheetState::Medium);
        registry.register("b", sheet(SheetState::Medium), SheetState::Medium);

        let (a, _) = registry.get_mut("a").unwrap().parts_mut();
        a.handle_pan(DragEvent::began(0));
        a.handle_pan(DragEvent::changed(-400.0, 5));
        a.handle_pan(DragEvent::ended(-400.0, 10));

        assert_eq!(registry.next_deadline(), Some(20));
        assert!(registry.poll(19).is_empty());
        assert_eq!(
            registry.poll(20),
            vec![("a".to_owned(), SheetState::Large)]
        );
        assert_eq!(*registry.get("a").unwrap().binding(), SheetState::Large);
        assert_eq!(registry.next_deadline(), None);
    }

    #[test]
    fn entry_forwards_binding_operations() {
        let mut registry: SheetRegistry<()> = SheetRegistry::new(());
        registry.register(DEFAULT_SHEET_ID, sheet(SheetState::Medium), SheetState::Large);
        let entry = registry.get_mut(DEFAULT_SHEET_ID).unwrap();
        assert!(entry.sync_state());
        assert_eq!(entry.sheet().state(), SheetState::Large);
        assert!(entry.dismiss());
        assert_eq!(*entry.binding(), SheetState::Hidden);
    }

    #[test]
    fn contexts_are_created_lazily_and_torn_down() {
        let mut contexts: SheetRegistries<u32, RecordingHost> = SheetRegistries::new();
        assert!(contexts.is_empty());
        assert!(contexts.get(&1).is_none());

        contexts
            .resolve(1, RecordingHost::default)
            .register("a", sheet(SheetState::Medium), SheetState::Medium);
        // Resolving again reuses the live registry.
        let mut made = false;
        let registry = contexts.resolve(1, || {
            made = true;
            RecordingHost::default()
        });
        assert_eq!(registry.len(), 1);
        assert!(!made);

        contexts.resolve(2, RecordingHost::default);
        assert_eq!(contexts.len(), 2);

        let torn = contexts.teardown(&1).expect("context 1 is live");
        assert_eq!(torn.len(), 1);
        assert!(contexts.get(&1).is_none());
        assert!(contexts.teardown(&1).is_none());
        assert_eq!(contexts.len(), 1);
    }
}
