/// Core evaluation logic.
///
/// Contains the [`Interpreter`](core::Interpreter), statement execution and
/// expression dispatch.
pub mod core;

/// Prefix operator evaluation.
pub mod unary;

/// Binary operator evaluation.
///
/// Implements the arithmetic operators with integer/real promotion, checked
/// integer arithmetic and both division flavours.
pub mod binary;

/// The flat variable store that evaluation writes to.
pub mod store;

pub use self::core::{EvalResult, Interpreter, interpret};
pub use store::RuntimeStore;
