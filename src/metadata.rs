use std::{fmt, ptr, slice, sync::Arc};

use crate::{
    cache,
    element::Element,
    macros::binary_ladder,
    scoped::ScopedBuffer,
    shape::InlineBuffer,
};

/// Largest space a binary shape family can occupy; capacities past it are
/// never materialized inline.
pub(crate) const MAX_SPACE: u16 = 1 << 15;

pub(crate) type ExecFn<T> = fn(usize, u16, &mut dyn FnMut(ScopedBuffer<'_, T>));

/// Descriptor of one buffer shape: capacity, composability, component
/// sub-shapes and the entry point that materializes it.
///
/// Composites reference their two component descriptors; a component may be
/// shared by many composites. Descriptors are interned per element type and
/// never change once published.
pub struct BufferMetadata<T> {
    capacity: u16,
    binary: bool,
    components: Option<(Arc<BufferMetadata<T>>, Arc<BufferMetadata<T>>)>,
    exec: ExecFn<T>,
}

impl<T> BufferMetadata<T> {
    /// Capacity in elements.
    #[inline]
    pub fn capacity(&self) -> u16 {
        self.capacity
    }

    /// Whether the shape can take part in further pairwise composition.
    #[inline]
    pub fn is_binary(&self) -> bool {
        self.binary
    }

    /// Component sub-shapes of a composite.
    pub fn components(&self) -> Option<(&BufferMetadata<T>, &BufferMetadata<T>)> {
        self.components.as_ref().map(|(left, right)| (&**left, &**right))
    }

    pub(crate) fn parts(&self) -> Option<(&Arc<BufferMetadata<T>>, &Arc<BufferMetadata<T>>)> {
        self.components.as_ref().map(|(left, right)| (left, right))
    }

    /// Both components are the same interned shape.
    pub(crate) fn is_pure(&self) -> bool {
        matches!(&self.components, Some((left, right)) if Arc::ptr_eq(left, right))
    }

    pub(crate) fn with_components(
        template: &Self,
        left: Arc<Self>,
        right: Arc<Self>,
    ) -> Arc<Self> {
        Arc::new(Self {
            capacity: template.capacity,
            binary: template.binary,
            components: Some((left, right)),
            exec: template.exec,
        })
    }

    /// Materializes the shape and runs `body` over a view of exactly `count`
    /// elements.
    pub(crate) fn execute<R>(&self, count: u16, body: impl FnOnce(ScopedBuffer<'_, T>) -> R) -> R {
        let mut body = Some(body);
        let mut result = None;
        (self.exec)(usize::from(count), self.capacity, &mut |buffer| {
            if let Some(body) = body.take() {
                result = Some(body(buffer));
            }
        });
        result.expect("buffer entry point did not run the body")
    }
}

impl<T: Element> BufferMetadata<T> {
    /// Descriptor for an atomic (leaf) shape.
    pub fn atomic<S: InlineBuffer<T>>() -> Arc<Self> {
        Arc::new(Self {
            capacity: S::CAPACITY,
            binary: S::BINARY,
            components: None,
            exec: exec_in_place::<T, S>,
        })
    }

    /// Descriptor for a composite shape over the given component
    /// descriptors.
    pub fn composite<S: InlineBuffer<T>>(left: Arc<Self>, right: Arc<Self>) -> Arc<Self> {
        debug_assert_eq!(S::CAPACITY, left.capacity + right.capacity);
        Arc::new(Self {
            capacity: S::CAPACITY,
            binary: S::BINARY,
            components: Some((left, right)),
            exec: exec_in_place::<T, S>,
        })
    }

    /// Pairwise composition under the process-wide toggle; `None` when
    /// composition is disabled.
    pub(crate) fn compose(left: &Arc<Self>, right: &Arc<Self>) -> Option<Arc<Self>> {
        if !cache::auto_compose() {
            return None;
        }
        Self::compose_unchecked(left, right)
    }

    /// Pairwise composition as run by the registration-time search, not
    /// subject to the runtime toggle. `None` when either side is not
    /// binary-composable or the sum leaves the composable space.
    pub(crate) fn compose_unchecked(left: &Arc<Self>, right: &Arc<Self>) -> Option<Arc<Self>> {
        if !left.binary || !right.binary {
            return None;
        }
        let capacity = left.capacity.checked_add(right.capacity)?;
        if capacity >= MAX_SPACE {
            return None;
        }
        Some(Arc::new(Self {
            capacity,
            binary: true,
            components: Some((Arc::clone(left), Arc::clone(right))),
            exec: binary_exec::<T>(capacity)?,
        }))
    }

    /// Always-available fallback for `count`: the next binary size. Storage
    /// may exceed the request; it never undershoots it.
    pub(crate) fn minimal(count: u16) -> Option<Arc<Self>> {
        if count == 0 || count > MAX_SPACE {
            return None;
        }
        let space = count.next_power_of_two();
        Some(Arc::new(Self {
            capacity: space,
            binary: true,
            components: None,
            exec: binary_exec::<T>(space)?,
        }))
    }
}

impl<T> fmt::Debug for BufferMetadata<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BufferMetadata")
            .field("capacity", &self.capacity)
            .field("binary", &self.binary)
            .field("components", &self.components)
            .finish()
    }
}

/// Entry point for a capacity with no shape type of its own: storage comes
/// from the power-of-two ladder.
pub(crate) fn binary_exec<T: Element>(capacity: u16) -> Option<ExecFn<T>> {
    if capacity == 0 || capacity > MAX_SPACE {
        return None;
    }
    Some(binary_ladder!(T, capacity.next_power_of_two() =>
        1, 2, 4, 8, 16, 32, 64, 128, 256, 512, 1024, 2048, 4096, 8192, 16384, 32768,
    ))
}

pub(crate) fn exec_in_place<T: Element, S: InlineBuffer<T>>(
    count: usize,
    capacity: u16,
    body: &mut dyn FnMut(ScopedBuffer<'_, T>),
) {
    assert!(count <= usize::from(S::CAPACITY));
    let mut shape = S::vacant();
    // SAFETY: `InlineBuffer` implementors are exactly `CAPACITY` contiguous
    // elements of `T` starting at the value's base address, all initialized
    // by `vacant`, and `count <= CAPACITY`.
    let span =
        unsafe { slice::from_raw_parts_mut(ptr::addr_of_mut!(shape).cast::<T>(), count) };
    body(ScopedBuffer::new(span, capacity, true));
}
