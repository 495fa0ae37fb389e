/// Entity generators that turn joined documentation members into graph
/// nodes, populating the namespace forest and the global identifier index.
mod generators;

pub use generators::generate;
