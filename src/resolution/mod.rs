/// Resolution pass that substitutes every reference placeholder in the
/// generated model with a real node, converting unknown identifiers into
/// shared external placeholders.
mod resolver;

pub use resolver::{resolve_model, resolve_node};
