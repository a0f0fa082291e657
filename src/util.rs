/// Numeric conversion helpers.
///
/// Converting between integers and floating point can silently lose
/// precision; the helpers here refuse to.
pub mod num;
