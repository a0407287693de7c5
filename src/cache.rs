use std::{
    any::{Any, TypeId},
    collections::{btree_map::Entry, BTreeMap, HashMap},
    sync::{
        atomic::{AtomicBool, AtomicU16, Ordering},
        Arc, OnceLock,
    },
};

use parking_lot::{Mutex, RwLock};

use crate::{
    compose::{explore, ScratchTable},
    element::Element,
    metadata::{BufferMetadata, MAX_SPACE},
    shape::InlineBuffer,
    Bin1024,
};

static AUTO_COMPOSE: AtomicBool = AtomicBool::new(true);

/// Whether unresolved capacities may synthesize new composite shapes at
/// request time.
#[inline]
pub fn auto_compose() -> bool {
    AUTO_COMPOSE.load(Ordering::Relaxed)
}

/// Enables or disables runtime composition, process-wide. With composition
/// disabled, capacities without a registered shape resolve through the
/// minimal binary fallback or the heap.
pub fn set_auto_compose(enabled: bool) {
    AUTO_COMPOSE.store(enabled, Ordering::Relaxed);
}

static CACHES: OnceLock<RwLock<HashMap<TypeId, &'static (dyn Any + Send + Sync)>>> =
    OnceLock::new();

/// Shape cache for `T`, created on first use and alive for the rest of the
/// process.
pub(crate) fn of<T: Element>() -> &'static MetadataCache<T> {
    let caches = CACHES.get_or_init(|| RwLock::new(HashMap::new()));
    let id = TypeId::of::<T>();
    if let Some(&cache) = caches.read().get(&id) {
        return downcast(cache);
    }
    let mut caches = caches.write();
    let cache = *caches
        .entry(id)
        .or_insert_with(|| Box::leak(Box::new(MetadataCache::<T>::new())));
    downcast(cache)
}

fn downcast<T: Element>(cache: &'static (dyn Any + Send + Sync)) -> &'static MetadataCache<T> {
    let cache: &'static dyn Any = cache;
    cache
        .downcast_ref()
        .expect("shape cache registered under a different element type")
}

/// Capacity-to-shape map for one element type, with the ceiling of the space
/// its binary family covers.
///
/// All mutation happens under the single per-type `mutation` lock, with short
/// write windows on the map for each insertion; lookups of published entries
/// only ever take the read side.
pub(crate) struct MetadataCache<T> {
    shapes: RwLock<BTreeMap<u16, Arc<BufferMetadata<T>>>>,
    mutation: Mutex<()>,
    max_space: AtomicU16,
}

impl<T: Element> MetadataCache<T> {
    fn new() -> Self {
        let cache = Self {
            shapes: RwLock::new(BTreeMap::new()),
            mutation: Mutex::new(()),
            max_space: AtomicU16::new(1),
        };
        cache.register::<Bin1024<T>>();
        cache
    }

    /// Resolves the shape for a buffer of `count` elements: an exact or
    /// partial registered match, extended by composition until the request is
    /// covered, degrading to the minimal fallback when composition cannot
    /// cover it.
    pub(crate) fn get_metadata(&self, count: u16) -> Option<Arc<BufferMetadata<T>>> {
        let mut result = self.get_fundamental(count)?;
        while count - result.capacity() > 0 {
            let aux = self.get_metadata(count - result.capacity());
            let _guard = self.mutation.lock();
            let Some(aux) = aux else {
                return BufferMetadata::minimal(count);
            };
            let Some(composed) = BufferMetadata::compose(&result, &aux) else {
                return BufferMetadata::minimal(count);
            };
            (result, _) = self.intern_entry(composed);
        }
        Some(result)
    }

    fn get_fundamental(&self, count: u16) -> Option<Arc<BufferMetadata<T>>> {
        let shapes = self.shapes.read();
        if let Some(shape) = shapes.get(&count) {
            return Some(Arc::clone(shape));
        }
        if u32::from(count) > max_value(self.max_space.load(Ordering::Acquire)) {
            return None;
        }
        shapes
            .range(..=count)
            .next_back()
            .map(|(_, shape)| Arc::clone(shape))
    }

    /// Registers a shape type: interns its descriptor and components, and
    /// for a newly seen binary shape grows the covered space; a pure shape
    /// additionally seeds the composition search over its family.
    pub(crate) fn register<S: InlineBuffer<T>>(&self) {
        let _guard = self.mutation.lock();
        let (metadata, inserted) = self.intern_deep(&S::metadata());
        if !inserted || !metadata.is_binary() {
            return;
        }
        self.grow_max_space(metadata.capacity());
        if metadata.is_pure() {
            let mut table = ScratchTable::new(metadata.capacity());
            explore(&metadata, &[Arc::clone(&metadata)], &mut table);
            table.flush(self);
        }
    }

    /// Inserts under the first-writer-wins rule; returns the entry the cache
    /// holds afterwards. Callers hold the mutation lock.
    pub(crate) fn intern(&self, metadata: Arc<BufferMetadata<T>>) -> Arc<BufferMetadata<T>> {
        self.intern_entry(metadata).0
    }

    fn intern_entry(&self, metadata: Arc<BufferMetadata<T>>) -> (Arc<BufferMetadata<T>>, bool) {
        let mut shapes = self.shapes.write();
        match shapes.entry(metadata.capacity()) {
            Entry::Occupied(entry) => (Arc::clone(entry.get()), false),
            Entry::Vacant(entry) => (Arc::clone(entry.insert(metadata)), true),
        }
    }

    /// Interns a descriptor tree bottom-up, so components resolve to the
    /// entries already published for their capacities.
    fn intern_deep(&self, metadata: &Arc<BufferMetadata<T>>) -> (Arc<BufferMetadata<T>>, bool) {
        if let Some(existing) = self.shapes.read().get(&metadata.capacity()) {
            return (Arc::clone(existing), false);
        }
        let canonical = match metadata.parts() {
            None => Arc::clone(metadata),
            Some((left, right)) => {
                let (left, _) = self.intern_deep(left);
                let (right, _) = self.intern_deep(right);
                BufferMetadata::with_components(metadata, left, right)
            }
        };
        self.intern_entry(canonical)
    }

    fn grow_max_space(&self, capacity: u16) {
        let mut space = self.max_space.load(Ordering::Acquire);
        while max_value(space) < u32::from(capacity) {
            space = space.saturating_mul(2).min(MAX_SPACE);
        }
        self.max_space.store(space, Ordering::Release);
    }
}

/// Largest capacity coverable by composing the binary family of `space`.
fn max_value(space: u16) -> u32 {
    2 * u32::from(space) - 1
}
