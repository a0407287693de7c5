mod alloc;
mod cache;
mod compose;
mod element;
mod macros;
mod metadata;
mod scoped;
mod shape;

pub use crate::{
    alloc::{alloc, alloc_with, register},
    cache::{auto_compose, set_auto_compose},
    element::Element,
    metadata::BufferMetadata,
    scoped::ScopedBuffer,
    shape::{Composite, Inline, InlineBuffer},
};

/// Pure binary shape family, doubling up from the atomic unit.
pub type Bin1<T> = Inline<T, 1>;
pub type Bin2<T> = Composite<Bin1<T>, Bin1<T>>;
pub type Bin4<T> = Composite<Bin2<T>, Bin2<T>>;
pub type Bin8<T> = Composite<Bin4<T>, Bin4<T>>;
pub type Bin16<T> = Composite<Bin8<T>, Bin8<T>>;
pub type Bin32<T> = Composite<Bin16<T>, Bin16<T>>;
pub type Bin64<T> = Composite<Bin32<T>, Bin32<T>>;
pub type Bin128<T> = Composite<Bin64<T>, Bin64<T>>;
pub type Bin256<T> = Composite<Bin128<T>, Bin128<T>>;
pub type Bin512<T> = Composite<Bin256<T>, Bin256<T>>;
pub type Bin1024<T> = Composite<Bin512<T>, Bin512<T>>;
pub type Bin2048<T> = Composite<Bin1024<T>, Bin1024<T>>;
pub type Bin4096<T> = Composite<Bin2048<T>, Bin2048<T>>;
pub type Bin8192<T> = Composite<Bin4096<T>, Bin4096<T>>;
pub type Bin16384<T> = Composite<Bin8192<T>, Bin8192<T>>;
pub type Bin32768<T> = Composite<Bin16384<T>, Bin16384<T>>;
