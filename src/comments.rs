use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use sxd_document::dom::{ChildOfElement, Element};

use crate::identifiers::Identifier;
use crate::model::TypeRef;

/// One piece of rich documentation text.
///
/// `See` carries a cross-reference that starts unresolved and is closed
/// during the resolution pass, the same way a member's type references are.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Inline {
    /// Plain prose.
    Text(String),
    /// Inline code (`<c>`).
    Code(String),
    /// A multi-line code block (`<code>`).
    CodeBlock(String),
    /// A cross-reference to another documented entity (`<see cref="..."/>`).
    See(TypeRef),
    /// A reference to one of the enclosing method's parameters.
    ParamRef(String),
    /// An explicit paragraph (`<para>`).
    Para(Vec<Inline>),
}

/// A parsed block of documentation text (a summary, remarks section, etc.).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Text {
    pub inlines: Vec<Inline>,
    /// Set once the resolution pass has closed every embedded reference.
    pub resolved: bool,
}

impl Text {
    pub fn new(inlines: Vec<Inline>) -> Self {
        Self {
            inlines,
            resolved: false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.inlines.is_empty()
    }

    /// Flattens the block to plain prose, dropping cross-reference targets.
    pub fn to_plain_string(&self) -> String {
        fn push(inlines: &[Inline], out: &mut String) {
            for inline in inlines {
                match inline {
                    Inline::Text(s) | Inline::Code(s) | Inline::CodeBlock(s) => {
                        if !out.is_empty() && !out.ends_with(' ') {
                            out.push(' ');
                        }
                        out.push_str(s);
                    }
                    Inline::See(_) => {}
                    Inline::ParamRef(name) => {
                        if !out.is_empty() && !out.ends_with(' ') {
                            out.push(' ');
                        }
                        out.push_str(name);
                    }
                    Inline::Para(children) => push(children, out),
                }
            }
        }
        let mut out = String::new();
        push(&self.inlines, &mut out);
        out
    }
}

/// All text blocks parsed from one documentation snippet body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedComment {
    pub summary: Text,
    pub remarks: Text,
    pub value: Text,
    pub returns: Text,
    pub example: Text,
    /// Per-parameter summaries, keyed by parameter name.
    pub params: HashMap<String, Text>,
}

/// Parses the children of a `<member>` element into structured text blocks.
///
/// Unknown block elements are ignored; unknown inline elements contribute
/// their text content so no prose is lost.
pub fn parse_member_comment(member: Element<'_>) -> ParsedComment {
    let mut comment = ParsedComment::default();
    for child in member.children() {
        let ChildOfElement::Element(element) = child else {
            continue;
        };
        match element.name().local_part() {
            "summary" => comment.summary = parse_text(element),
            "remarks" => comment.remarks = parse_text(element),
            "value" => comment.value = parse_text(element),
            "returns" => comment.returns = parse_text(element),
            "example" => comment.example = parse_text(element),
            "param" => {
                if let Some(name) = element.attribute_value("name") {
                    comment.params.insert(name.to_string(), parse_text(element));
                }
            }
            _ => {}
        }
    }
    comment
}

fn parse_text(element: Element<'_>) -> Text {
    Text::new(parse_inlines(element))
}

fn parse_inlines(element: Element<'_>) -> Vec<Inline> {
    let mut inlines = Vec::new();
    for child in element.children() {
        match child {
            ChildOfElement::Text(text) => {
                let collapsed = collapse_whitespace(text.text());
                if !collapsed.is_empty() {
                    inlines.push(Inline::Text(collapsed));
                }
            }
            ChildOfElement::Element(inner) => match inner.name().local_part() {
                "see" | "seealso" => {
                    if let Some(cref) = inner.attribute_value("cref") {
                        match Identifier::from_snippet_name(cref) {
                            Some(identifier) => {
                                inlines.push(Inline::See(TypeRef::Unresolved(identifier)));
                            }
                            // Malformed cref (e.g. the compiler's "!:" form)
                            // degrades to plain text.
                            None => {
                                let shown = cref.trim_start_matches("!:").trim();
                                if !shown.is_empty() {
                                    inlines.push(Inline::Text(shown.to_string()));
                                }
                            }
                        }
                    }
                }
                "c" => inlines.push(Inline::Code(inner_text(inner).trim().to_string())),
                "code" => inlines.push(Inline::CodeBlock(
                    inner_text(inner).trim_matches('\n').to_string(),
                )),
                "para" => inlines.push(Inline::Para(parse_inlines(inner))),
                "paramref" => {
                    if let Some(name) = inner.attribute_value("name") {
                        inlines.push(Inline::ParamRef(name.to_string()));
                    }
                }
                _ => inlines.extend(parse_inlines(inner)),
            },
            _ => {}
        }
    }
    inlines
}

/// Concatenated text content of an element's subtree, verbatim.
fn inner_text(element: Element<'_>) -> String {
    let mut out = String::new();
    for child in element.children() {
        match child {
            ChildOfElement::Text(text) => out.push_str(text.text()),
            ChildOfElement::Element(inner) => out.push_str(&inner_text(inner)),
            _ => {}
        }
    }
    out
}

/// Collapses runs of whitespace to single spaces and trims the ends, the
/// way doc-comment prose is conventionally reflowed.
fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
