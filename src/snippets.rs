use std::fs;
use std::path::Path;

use sxd_document::dom::{ChildOfElement, ChildOfRoot, Element};

use crate::comments::{parse_member_comment, ParsedComment};
use crate::errors::{DocGraphError, Result};
use crate::events::{EventSink, Notification};

/// One raw documentation snippet: the textual identifier it was keyed with
/// and the comment body already run through the comment parser.
#[derive(Debug, Clone, PartialEq)]
pub struct Snippet {
    pub name: String,
    pub comment: ParsedComment,
}

/// Parses a documentation XML file's source into snippets.
///
/// The expected shape is `<doc><members><member name="...">...</member>`,
/// but `<member>` elements are collected from anywhere in the tree. A
/// `<member>` without a name attribute is skipped with a warning.
pub fn parse_doc_xml(source: &str, events: &mut dyn EventSink) -> Result<Vec<Snippet>> {
    let package = sxd_document::parser::parse(source).map_err(|e| DocGraphError::Xml {
        message: e.to_string(),
    })?;
    let document = package.as_document();

    let mut snippets = Vec::new();
    for child in document.root().children() {
        if let ChildOfRoot::Element(element) = child {
            collect_members(element, events, &mut snippets);
        }
    }
    Ok(snippets)
}

/// Loads snippets from a documentation XML file on disk.
pub fn load_doc_file(path: &Path, events: &mut dyn EventSink) -> Result<Vec<Snippet>> {
    let contents = fs::read_to_string(path).map_err(|e| DocGraphError::Xml {
        message: format!("failed to read '{}': {}", path.display(), e),
    })?;
    parse_doc_xml(&contents, events)
}

fn collect_members(element: Element<'_>, events: &mut dyn EventSink, out: &mut Vec<Snippet>) {
    if element.name().local_part() == "member" {
        match element.attribute_value("name") {
            Some(name) => out.push(Snippet {
                name: name.to_string(),
                comment: parse_member_comment(element),
            }),
            None => events.notify(Notification::Warning(
                "skipping <member> element with no name attribute".to_string(),
            )),
        }
        return;
    }
    for child in element.children() {
        if let ChildOfElement::Element(inner) = child {
            collect_members(inner, events, out);
        }
    }
}
