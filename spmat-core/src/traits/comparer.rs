//! Element equality used for default elision
//!
//! A backend never stores a value its comparer reports as equal to the
//! matrix default. The comparer is consulted for nothing else.

/// Decides whether two elements are equal for storage purposes
pub trait ElementComparer<T: ?Sized> {
    /// `true` when `a` and `b` should be treated as the same value
    fn equals(&self, a: &T, b: &T) -> bool;
}

/// Comparer backed by the element's own `PartialEq`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NaturalEq;

impl<T: PartialEq + ?Sized> ElementComparer<T> for NaturalEq {
    #[inline]
    fn equals(&self, a: &T, b: &T) -> bool {
        a == b
    }
}

impl<T: ?Sized, F> ElementComparer<T> for F
where
    F: Fn(&T, &T) -> bool,
{
    #[inline]
    fn equals(&self, a: &T, b: &T) -> bool {
        self(a, b)
    }
}
