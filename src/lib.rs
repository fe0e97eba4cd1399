//! Prime field arithmetic and short Weierstrass curve points over GF(p).

pub mod config;
pub mod curve;
pub mod error;
pub mod field;
pub mod point;

pub use config::PrimalityConfig;
pub use curve::{Curve, NamedCurve, SECP256K1};
pub use error::{Error, Result};
pub use field::{create_set, create_set_with, FieldElement};
pub use point::{AffinePoint, Point};
