use std::path::Path;
use std::time::Instant;

use crate::errors::Result;
use crate::events::{EventSink, LogSink, Notification};
use crate::generation;
use crate::matching::{match_snippets, undocumented_members};
use crate::model::{DocModel, NodeData};
use crate::resolution::resolve_model;
use crate::snippets::{parse_doc_xml, Snippet};
use crate::structure::{self, StructuralMember};

/// Central orchestrator: joins structural metadata with documentation
/// snippets and produces a fully resolved model.
///
/// Every build runs on a fresh model; nothing is shared or reused across
/// runs. Recoverable anomalies are routed to the owned event sink.
pub struct DocGraph {
    events: Box<dyn EventSink>,
}

/// Aggregate counts over a finished build, for front-end reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildSummary {
    pub namespace_count: usize,
    pub type_count: usize,
    pub member_count: usize,
    pub external_count: usize,
    pub duration_ms: u64,
}

impl DocGraph {
    pub fn new(events: Box<dyn EventSink>) -> Self {
        Self { events }
    }

    /// A graph whose notifications go to the tracing subscriber.
    pub fn with_logging() -> Self {
        Self::new(Box::new(LogSink))
    }

    /// Runs the whole pipeline on in-memory inputs: snippet matching, entity
    /// generation, then reference resolution. Single-threaded,
    /// run-to-completion.
    pub fn build(
        &mut self,
        members: Vec<StructuralMember>,
        snippets: &[Snippet],
    ) -> Result<DocModel> {
        let members = undocumented_members(members);
        let members = match_snippets(members, snippets);
        let mut model = generation::generate(&members, self.events.as_mut())?;
        resolve_model(&mut model)?;
        Ok(model)
    }

    /// Loads structural metadata (JSON) and documentation (XML) files and
    /// builds the model. A file that cannot be read or parsed raises a
    /// bad-input notification and is skipped; the build continues with the
    /// remaining inputs.
    pub fn build_from_paths(
        &mut self,
        metadata_paths: &[impl AsRef<Path>],
        doc_paths: &[impl AsRef<Path>],
    ) -> Result<(DocModel, BuildSummary)> {
        let start = Instant::now();

        let mut members = Vec::new();
        for path in metadata_paths {
            let path = path.as_ref();
            match structure::load_metadata(path) {
                Ok(loaded) => members.extend(loaded),
                Err(e) => {
                    tracing::debug!(error = %e, "failed to load metadata");
                    self.events
                        .notify(Notification::BadInput(path.display().to_string()));
                }
            }
        }

        let mut snippets = Vec::new();
        for path in doc_paths {
            let path = path.as_ref();
            match std::fs::read_to_string(path) {
                Ok(source) => match parse_doc_xml(&source, self.events.as_mut()) {
                    Ok(loaded) => snippets.extend(loaded),
                    Err(e) => {
                        tracing::debug!(error = %e, "failed to parse documentation xml");
                        self.events
                            .notify(Notification::BadInput(path.display().to_string()));
                    }
                },
                Err(_) => {
                    self.events
                        .notify(Notification::BadInput(path.display().to_string()));
                }
            }
        }

        let model = self.build(members, &snippets)?;
        let summary = summarize(&model, start.elapsed().as_millis() as u64);
        Ok((model, summary))
    }
}

/// Computes aggregate counts over a finished model.
pub fn summarize(model: &DocModel, duration_ms: u64) -> BuildSummary {
    let mut summary = BuildSummary {
        namespace_count: 0,
        type_count: 0,
        member_count: 0,
        external_count: 0,
        duration_ms,
    };
    for node in model.nodes() {
        if node.external {
            summary.external_count += 1;
            continue;
        }
        match node.data {
            NodeData::Namespace { .. } => summary.namespace_count += 1,
            NodeData::Type { .. } => summary.type_count += 1,
            NodeData::Method { .. }
            | NodeData::Property { .. }
            | NodeData::Field { .. }
            | NodeData::Event { .. } => summary.member_count += 1,
        }
    }
    summary
}
