use std::iter;

use crate::{cache, element::Element, scoped::ScopedBuffer, shape::InlineBuffer};

/// Allocates a buffer of `count` elements and runs `body` on it.
///
/// Storage comes from the stack whenever the element type is stackable and a
/// registered shape family covers `count`; otherwise the buffer is
/// heap-backed. Either way `body` sees exactly `count` elements, and panics
/// it raises propagate to the caller unchanged.
///
/// ```
/// let sum = scoped_buffer::alloc::<u32, _, _>(8, |mut buffer| {
///     for (index, slot) in buffer.iter_mut().enumerate() {
///         *slot = index as u32;
///     }
///     buffer.iter().sum::<u32>()
/// });
/// assert_eq!(sum, 28);
/// ```
pub fn alloc<T, R, F>(count: u16, body: F) -> R
where
    T: Element,
    F: FnOnce(ScopedBuffer<'_, T>) -> R,
{
    if count == 0 {
        return body(ScopedBuffer::new(&mut [], 0, true));
    }
    if T::STACKABLE {
        if let Some(metadata) = cache::of::<T>().get_metadata(count) {
            return metadata.execute(count, body);
        }
    }
    alloc_heap(count, body)
}

/// Like [`alloc`], passing `state` through to `body` instead of capturing it.
pub fn alloc_with<T, S, R, F>(count: u16, state: S, body: F) -> R
where
    T: Element,
    F: FnOnce(ScopedBuffer<'_, T>, S) -> R,
{
    alloc(count, move |buffer| body(buffer, state))
}

fn alloc_heap<T, R, F>(count: u16, body: F) -> R
where
    T: Element,
    F: FnOnce(ScopedBuffer<'_, T>) -> R,
{
    let mut storage: Vec<T> = iter::repeat_with(T::vacant).take(usize::from(count)).collect();
    body(ScopedBuffer::new(&mut storage, count, false))
}

/// Registers `S` as an available shape for `T` buffers, along with its
/// components. Re-registering a known shape is a no-op.
pub fn register<T, S>()
where
    T: Element,
    S: InlineBuffer<T>,
{
    cache::of::<T>().register::<S>();
}
