//! Declarative configuration blueprints.
//!
//! [`CurveConfig`] fixes the pricing parameters shared by a launch and
//! [`PoolConfig`] describes one pool to create. Both validate on
//! construction and can be re-validated with `validate()`.

mod curve;
mod pool;

pub use curve::{CurveConfig, DEFAULT_INITIAL_MEME_SUPPLY, DEFAULT_VIRTUAL_QUOTE_RESERVE};
pub use pool::PoolConfig;
