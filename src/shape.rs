use std::{fmt, sync::Arc};

use crate::{element::Element, metadata::BufferMetadata};

/// A fixed-capacity, stack-representable container for `CAPACITY` elements
/// of `T`; the atomic unit of composition.
///
/// # Safety
///
/// Implementors must be exactly `CAPACITY` contiguous elements of `T`:
/// starting at the value's base address, with the size of `CAPACITY` elements,
/// the alignment of `T` and no interior padding. [`vacant`](Self::vacant)
/// must initialize every element.
pub unsafe trait InlineBuffer<T: Element>: Sized + 'static {
    /// Number of elements the shape holds.
    const CAPACITY: u16;

    /// Whether the shape is binary-composable.
    const BINARY: bool;

    /// Shape with every element set to [`Element::vacant`].
    fn vacant() -> Self;

    /// Descriptor interned by [`register`](crate::register).
    fn metadata() -> Arc<BufferMetadata<T>>;
}

/// Atomic shape: `N` elements stored inline.
#[repr(transparent)]
pub struct Inline<T, const N: usize> {
    items: [T; N],
}

// SAFETY: `repr(transparent)` over `[T; N]`.
unsafe impl<T: Element, const N: usize> InlineBuffer<T> for Inline<T, N> {
    const CAPACITY: u16 = {
        assert!(N > 0 && N <= u16::MAX as usize);
        N as u16
    };
    const BINARY: bool = N.is_power_of_two();

    #[inline]
    fn vacant() -> Self {
        Self {
            items: core::array::from_fn(|_| T::vacant()),
        }
    }

    fn metadata() -> Arc<BufferMetadata<T>> {
        BufferMetadata::atomic::<Self>()
    }
}

impl<T, const N: usize> Inline<T, N> {
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }
}

impl<T, const N: usize> fmt::Debug for Inline<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Inline")
            .field("capacity", &N)
            .finish_non_exhaustive()
    }
}

/// Two shapes laid out end to end; capacity is the sum of the parts.
///
/// A view over the whole composite is indistinguishable from a flat buffer of
/// `A::CAPACITY + B::CAPACITY` elements.
#[repr(C)]
pub struct Composite<A, B> {
    low: A,
    high: B,
}

// SAFETY: `repr(C)` places `high` right after `low`; both are contiguous
// element storage with the alignment of `T`, so no padding separates them.
unsafe impl<T, A, B> InlineBuffer<T> for Composite<A, B>
where
    T: Element,
    A: InlineBuffer<T>,
    B: InlineBuffer<T>,
{
    const CAPACITY: u16 =
        <A as InlineBuffer<T>>::CAPACITY + <B as InlineBuffer<T>>::CAPACITY;
    const BINARY: bool = <A as InlineBuffer<T>>::BINARY && <B as InlineBuffer<T>>::BINARY;

    #[inline]
    fn vacant() -> Self {
        Self {
            low: A::vacant(),
            high: B::vacant(),
        }
    }

    fn metadata() -> Arc<BufferMetadata<T>> {
        BufferMetadata::composite::<Self>(A::metadata(), B::metadata())
    }
}

impl<A, B> Composite<A, B> {
    #[inline]
    pub fn low(&self) -> &A {
        &self.low
    }

    #[inline]
    pub fn high(&self) -> &B {
        &self.high
    }
}

impl<A, B> fmt::Debug for Composite<A, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Composite").finish_non_exhaustive()
    }
}
