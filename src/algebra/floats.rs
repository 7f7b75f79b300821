#![allow(non_snake_case)]
use num_traits::{Float, FromPrimitive, NumAssign};
use std::fmt::{Debug, Display, LowerExp};

/// Main trait for coefficient values stored in a sparse matrix.
///
/// All arithmetic in the storage engines is carried out on values
/// implementing `FloatT`.  Implementations are provided for the native
/// `f32` and `f64` types, but any other real floating point type satisfying
/// the trait bounds will also work.
///
/// `FloatT` relies on [`num_traits`](num_traits) for most of its constituent
/// trait bounds.
pub trait FloatT:
    'static
    + Send
    + Sync
    + Float
    + NumAssign
    + Default
    + FromPrimitive
    + Display
    + LowerExp
    + Debug
    + Sized
{
}

impl<T> FloatT for T where
    T: 'static
        + Send
        + Sync
        + Float
        + NumAssign
        + Default
        + FromPrimitive
        + Display
        + LowerExp
        + Debug
        + Sized
{
}

/// Trait for converting Rust primitives to [`FloatT`](crate::algebra::FloatT)
///
/// Implemented on f32/64 and u32/64/usize so that constants can be written
/// as `(2.0).as_T()` rather than `T::from_f64(2.0).unwrap()`.
pub trait AsFloatT<T>: 'static {
    fn as_T(&self) -> T;
}

macro_rules! impl_as_FloatT {
    ($ty:ty, $ident:ident) => {
        impl<T> AsFloatT<T> for $ty
        where
            T: FromPrimitive + 'static,
        {
            #[inline]
            fn as_T(&self) -> T {
                T::$ident(*self).unwrap()
            }
        }
    };
}
impl_as_FloatT!(u32, from_u32);
impl_as_FloatT!(u64, from_u64);
impl_as_FloatT!(usize, from_usize);
impl_as_FloatT!(f32, from_f32);
impl_as_FloatT!(f64, from_f64);

#[test]
fn test_as_T() {
    let a: f64 = 3usize.as_T();
    let b: f32 = (0.5f64).as_T();
    assert_eq!(a, 3.0);
    assert_eq!(b, 0.5);
}
