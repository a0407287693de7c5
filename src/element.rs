use crate::macros::{stackable_elements, tuple_elements};

/// Element of an allocated buffer.
///
/// [`STACKABLE`] marks types eligible for inline stack placement: their
/// all-zero bit pattern must be a valid value, so a whole shape can start out
/// zero-filled (the [`bytemuck::Zeroable`] discipline). Types holding owned
/// heap references set it to `false` and only ever see heap-backed buffers.
///
/// [`STACKABLE`]: Element::STACKABLE
pub trait Element: Sized + 'static {
    /// Eligibility for inline stack placement.
    const STACKABLE: bool;

    /// Value stored in the slots of a freshly allocated buffer.
    fn vacant() -> Self;
}

stackable_elements!(
    u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, f32, f64, bool, char,
);

impl<T: Element, const N: usize> Element for [T; N] {
    const STACKABLE: bool = T::STACKABLE;

    #[inline]
    fn vacant() -> Self {
        core::array::from_fn(|_| T::vacant())
    }
}

tuple_elements!((A, B), (A, B, C), (A, B, C, D));

impl Element for String {
    const STACKABLE: bool = false;

    #[inline]
    fn vacant() -> Self {
        String::new()
    }
}

impl<T: 'static> Element for Vec<T> {
    const STACKABLE: bool = false;

    #[inline]
    fn vacant() -> Self {
        Vec::new()
    }
}

impl<T: 'static> Element for Option<T> {
    const STACKABLE: bool = false;

    #[inline]
    fn vacant() -> Self {
        None
    }
}
