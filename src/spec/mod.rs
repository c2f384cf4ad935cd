/// Tagged spec/payload inputs and their normalization.
pub mod input;
/// Typed specification model.
pub mod model;
