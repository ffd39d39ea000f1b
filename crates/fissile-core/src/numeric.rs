//! Numeric element types accepted by the statistics code
//!
//! Samples usually arrive as `f64` (tallies, collision times, energies) but
//! integer counts are common too. Every supported type widens to `f64` before
//! any arithmetic happens.

use std::fmt::Debug;

/// Base trait for numeric types that can be used in statistical computations
pub trait Numeric: Copy + PartialOrd + Debug + Send + Sync {
    /// Widen to `f64`
    fn to_f64(&self) -> f64;

    /// Check if value is finite (always true for integers)
    fn is_finite(&self) -> bool;
}

impl Numeric for f64 {
    fn to_f64(&self) -> f64 {
        *self
    }

    fn is_finite(&self) -> bool {
        f64::is_finite(*self)
    }
}

impl Numeric for f32 {
    fn to_f64(&self) -> f64 {
        *self as f64
    }

    fn is_finite(&self) -> bool {
        f32::is_finite(*self)
    }
}

macro_rules! impl_integer_numeric {
    ($($t:ty),*) => {
        $(
            impl Numeric for $t {
                fn to_f64(&self) -> f64 {
                    *self as f64
                }

                fn is_finite(&self) -> bool {
                    true
                }
            }
        )*
    };
}

impl_integer_numeric!(i32, u32, i64, u64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_float_widening() {
        assert_eq!(Numeric::to_f64(&2.5f32), 2.5);
        assert!(Numeric::is_finite(&1.0f64));
        assert!(!Numeric::is_finite(&f64::NAN));
        assert!(!Numeric::is_finite(&f32::INFINITY));
    }

    #[test]
    fn test_integers_are_finite() {
        assert!(Numeric::is_finite(&i32::MIN));
        assert!(Numeric::is_finite(&u64::MAX));
        assert_eq!(Numeric::to_f64(&-7i64), -7.0);
        assert_eq!(Numeric::to_f64(&42u32), 42.0);
    }
}
