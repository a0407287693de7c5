//! Registration-time composition search.

use std::sync::Arc;

use crate::{cache::MetadataCache, element::Element, metadata::BufferMetadata};

/// Deepest nesting the search explores; enough to reach every size in the
/// composable space.
const MAX_ARITY: usize = 14;

/// Scratch table of discovered composites, one slot per achievable size in
/// `[base, 2 * base]`. The first shape found for a size wins.
pub(crate) struct ScratchTable<T> {
    base: u16,
    slots: Vec<Option<Arc<BufferMetadata<T>>>>,
}

impl<T: Element> ScratchTable<T> {
    pub(crate) fn new(base: u16) -> Self {
        Self {
            base,
            slots: vec![None; usize::from(base) + 1],
        }
    }

    fn add(&mut self, metadata: Arc<BufferMetadata<T>>) -> bool {
        let Some(index) = metadata.capacity().checked_sub(self.base) else {
            return false;
        };
        match self.slots.get_mut(usize::from(index)) {
            Some(slot @ None) => {
                *slot = Some(metadata);
                true
            }
            _ => false,
        }
    }

    /// Interns every discovered composite, and its first component, into the
    /// cache.
    pub(crate) fn flush(self, cache: &MetadataCache<T>) {
        for metadata in self.slots.into_iter().rev().flatten() {
            let first = metadata.parts().map(|(first, _)| Arc::clone(first));
            cache.intern(metadata);
            if let Some(first) = first {
                cache.intern(first);
            }
        }
    }
}

/// Walks the composite family growing from `shape`'s half, recording one
/// shape per reachable size.
///
/// `terms` is the chain of already chosen addends, dominant first; the shape
/// recorded at each step is the half extended with every term. A branch ends
/// once its size slot is taken, the appender bottoms out in a leaf shape, or
/// the dominant term is covered by the rest plus one and a half appenders
/// (`s0 <= s1 + .. + sk + b + b/2`). Past that it branches three ways:
/// dropping the trailing term, descending into the half, and extending the
/// chain with the half itself.
pub(crate) fn explore<T: Element>(
    shape: &Arc<BufferMetadata<T>>,
    terms: &[Arc<BufferMetadata<T>>],
    table: &mut ScratchTable<T>,
) {
    debug_assert!(!terms.is_empty());
    let Some((left, right)) = shape.parts() else {
        return;
    };
    if !Arc::ptr_eq(left, right) {
        return;
    }
    let half = Arc::clone(left);
    let Some(composed) = nest(&half, terms) else {
        return;
    };
    let added = table.add(composed);

    let dominant = u32::from(terms[0].capacity());
    let rest: u32 = terms[1..].iter().map(|term| u32::from(term.capacity())).sum();
    let base = u32::from(half.capacity());
    if !added || half.components().is_none() || dominant <= rest + base + base / 2 {
        return;
    }

    if terms.len() >= 2 {
        explore(&half, &terms[..terms.len() - 1], table);
    }
    explore(&half, terms, table);
    if terms.len() < MAX_ARITY {
        let mut extended = terms.to_vec();
        extended.push(Arc::clone(&half));
        explore(&half, &extended, table);
    }
}

/// Folds `base` with every term, innermost last: `((base + t_k) + ... + t_0)`.
fn nest<T: Element>(
    base: &Arc<BufferMetadata<T>>,
    terms: &[Arc<BufferMetadata<T>>],
) -> Option<Arc<BufferMetadata<T>>> {
    let mut metadata = Arc::clone(base);
    for term in terms.iter().rev() {
        metadata = BufferMetadata::compose_unchecked(&metadata, term)?;
    }
    Some(metadata)
}
