//! Block store (C2): identities, last-seen state, render functions, and the
//! cached content/height from the last paint. Not concurrent — the actor in
//! `live-core` is its sole mutator, one tick at a time.

use live_text::StyledData;
use std::collections::{HashMap, HashSet};
use std::hash::Hash;
use std::sync::Arc;

/// Pure `state -> styled_data` render function. `Arc` so it can be cloned
/// cheaply when a block is carried across ticks without re-registration.
pub type RenderFn<State> = Arc<dyn Fn(&State) -> StyledData + Send + Sync>;

struct Entry<State> {
    state: State,
    render_fn: RenderFn<State>,
    last_content: Option<String>,
    last_height: Option<usize>,
}

/// Holds every known block's identity, state, render function, and the
/// content/height it was last painted with.
///
/// Invariants (spec.md §3):
/// 1. `rendered_blocks` and `pending_blocks` are disjoint; their union is
///    the set of known ids.
/// 2. For every id in `rendered_blocks`, `last_content`/`last_height` are
///    defined.
pub struct BlockStore<Id, State> {
    entries: HashMap<Id, Entry<State>>,
    rendered_blocks: Vec<Id>,
    pending_blocks: Vec<Id>,
    pending_states: HashMap<Id, State>,
}

impl<Id, State> Default for BlockStore<Id, State>
where
    Id: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<Id, State> BlockStore<Id, State>
where
    Id: Eq + Hash + Clone,
{
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            rendered_blocks: Vec::new(),
            pending_blocks: Vec::new(),
            pending_states: HashMap::new(),
        }
    }

    /// Registers a new block, appending it to `pending_blocks`. Re-registering
    /// an id that is already known is undefined behavior upstream (callers
    /// must use unique ids); this implementation's choice is "last write
    /// wins" on the entry without duplicating the id in either ordering list.
    pub fn register(&mut self, id: Id, initial_state: State, render_fn: RenderFn<State>) {
        let known = self.entries.contains_key(&id);
        self.entries.insert(
            id.clone(),
            Entry {
                state: initial_state,
                render_fn,
                last_content: None,
                last_height: None,
            },
        );
        if !known {
            self.pending_blocks.push(id);
        }
    }

    /// Records a new state for `id`. Silently ignored if `id` is unknown —
    /// this matches the fire-and-forget contract of `update` (spec.md §4.1,
    /// §9 open question: an update for an id that was never registered, and
    /// that arrives when no tick is armed, is lost with no trace).
    pub fn set_state(&mut self, id: &Id, new_state: State) {
        if self.entries.contains_key(id) {
            self.pending_states.insert(id.clone(), new_state);
        }
    }

    /// Snapshot of ids with a state update pending since the last tick.
    /// Does not clear the underlying values — later render phases in the
    /// same tick still need to read them via [`Self::effective_state`].
    /// Call [`Self::clear_pending_states`] once the tick's composite write
    /// has been emitted.
    pub fn take_pending(&self) -> HashSet<Id> {
        self.pending_states.keys().cloned().collect()
    }

    /// The state that should be used to render `id` right now: its pending
    /// update if one exists, otherwise its last-seen cached state.
    pub fn effective_state(&self, id: &Id) -> Option<&State> {
        self.pending_states
            .get(id)
            .or_else(|| self.entries.get(id).map(|e| &e.state))
    }

    pub fn render_fn(&self, id: &Id) -> Option<RenderFn<State>> {
        self.entries.get(id).map(|e| e.render_fn.clone())
    }

    pub fn last_height(&self, id: &Id) -> Option<usize> {
        self.entries.get(id).and_then(|e| e.last_height)
    }

    pub fn rendered_blocks(&self) -> &[Id] {
        &self.rendered_blocks
    }

    pub fn pending_blocks(&self) -> &[Id] {
        &self.pending_blocks
    }

    /// Records a fresh paint for an already-rendered block.
    pub fn record_repaint(&mut self, id: &Id, content: String, height: usize) {
        if let Some(e) = self.entries.get_mut(id) {
            e.last_content = Some(content);
            e.last_height = Some(height);
        }
    }

    /// Moves every pending block into `rendered_blocks`, recording its first
    /// paint (Phase C).
    pub fn commit_pending_blocks(&mut self, paints: Vec<(Id, String, usize)>) {
        for (id, content, height) in paints {
            if let Some(e) = self.entries.get_mut(&id) {
                e.last_content = Some(content);
                e.last_height = Some(height);
            }
            self.rendered_blocks.push(id);
        }
        self.pending_blocks.clear();
    }

    /// Clears pending state updates, folding each one into its entry's
    /// cached state so the next tick's "no update" path sees the latest
    /// value (spec.md §4.3 Final write: "Clear pending_states").
    pub fn clear_pending_states(&mut self) {
        for (id, state) in self.pending_states.drain() {
            if let Some(e) = self.entries.get_mut(&id) {
                e.state = state;
            }
        }
    }

    /// Detaches all blocks (used by `flush`): clears every id list and
    /// cached paint, but keeps no memory of prior content.
    pub fn clear_all(&mut self) {
        self.entries.clear();
        self.rendered_blocks.clear();
        self.pending_blocks.clear();
        self.pending_states.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity_fn() -> RenderFn<String> {
        Arc::new(|s: &String| StyledData::plain(s.clone()))
    }

    #[test]
    fn register_appends_to_pending_only() {
        let mut store: BlockStore<&'static str, String> = BlockStore::new();
        store.register("a", "A".into(), identity_fn());
        assert_eq!(store.pending_blocks(), &["a"]);
        assert!(store.rendered_blocks().is_empty());
    }

    #[test]
    fn set_state_on_unknown_id_is_ignored() {
        let mut store: BlockStore<&'static str, String> = BlockStore::new();
        store.set_state(&"ghost", "X".into());
        assert!(store.take_pending().is_empty());
    }

    #[test]
    fn effective_state_prefers_pending_over_cached() {
        let mut store: BlockStore<&'static str, String> = BlockStore::new();
        store.register("a", "A".into(), identity_fn());
        store.set_state(&"a", "A2".into());
        assert_eq!(store.effective_state(&"a"), Some(&"A2".to_string()));
        store.clear_pending_states();
        assert_eq!(store.effective_state(&"a"), Some(&"A2".to_string()));
        assert!(store.take_pending().is_empty());
    }

    #[test]
    fn commit_pending_blocks_moves_into_rendered_order() {
        let mut store: BlockStore<&'static str, String> = BlockStore::new();
        store.register("a", "A".into(), identity_fn());
        store.register("b", "B".into(), identity_fn());
        store.commit_pending_blocks(vec![
            ("a".into(), "A".into(), 1),
            ("b".into(), "B".into(), 1),
        ]);
        assert_eq!(store.rendered_blocks(), &["a", "b"]);
        assert!(store.pending_blocks().is_empty());
        assert_eq!(store.last_height(&"a"), Some(1));
    }
}
