pub mod comments;
pub mod docgraph;
pub mod errors;
pub mod events;
pub mod generation;
pub mod identifiers;
pub mod matching;
pub mod model;
pub mod resolution;
pub mod snippets;
pub mod structure;
