//! Core types for the fissile workspace
//!
//! This crate holds what every other member needs: the shared [`Error`] /
//! [`Result`] pair and the [`Numeric`] trait describing which element types a
//! statistical sample may contain.
//!
//! # Example
//!
//! ```rust
//! use fissile_core::{Error, Numeric, Result};
//!
//! fn spread<T: Numeric>(sample: &[T]) -> Result<f64> {
//!     let (min, max) = sample.iter().map(Numeric::to_f64).fold(
//!         (f64::INFINITY, f64::NEG_INFINITY),
//!         |(lo, hi), x| (lo.min(x), hi.max(x)),
//!     );
//!     if sample.is_empty() {
//!         return Err(Error::empty_input("spread"));
//!     }
//!     Ok(max - min)
//! }
//!
//! assert_eq!(spread(&[3u32, 9, 4]).unwrap(), 6.0);
//! assert!(spread::<f64>(&[]).is_err());
//! ```

pub mod error;
pub mod numeric;

// Re-export core types
pub use error::{Error, Result};
pub use numeric::Numeric;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::Error;
    pub use crate::{Numeric, Result};
}
