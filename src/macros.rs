macro_rules! stackable_elements {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl crate::element::Element for $ty {
                const STACKABLE: bool = true;

                #[inline]
                fn vacant() -> Self {
                    bytemuck::Zeroable::zeroed()
                }
            }
        )+
    };
}
pub(crate) use stackable_elements;

macro_rules! tuple_elements {
    ($(($($name:ident),+)),+ $(,)?) => {
        $(
            impl<$($name: crate::element::Element),+> crate::element::Element for ($($name,)+) {
                const STACKABLE: bool = $($name::STACKABLE)&&+;

                #[inline]
                fn vacant() -> Self {
                    ($($name::vacant(),)+)
                }
            }
        )+
    };
}
pub(crate) use tuple_elements;

macro_rules! binary_ladder {
    ($t:ty, $space:expr => $($n:literal),+ $(,)?) => {
        match $space {
            $($n => crate::metadata::exec_in_place::<$t, crate::shape::Inline<$t, $n>>
                as crate::metadata::ExecFn<$t>,)+
            _ => return None,
        }
    };
}
pub(crate) use binary_ladder;
