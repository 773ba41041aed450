//! Placeholder substitution over a document tree
//!
//! Every string leaf has each `((key))` occurrence replaced by the value of
//! `key`. Matching is exact and case-sensitive. The string is scanned once
//! from left to right, so text that was just inserted is never scanned
//! again: a value containing `((other))` stays literal. Placeholders naming
//! unknown keys are left as they are.

use std::borrow::Cow;

use crate::document::{Node, Scalar};
use crate::{Properties, Result};

const OPEN: &str = "((";
const CLOSE: &str = "))";

/// Substitution for one parameter set.
#[derive(Debug)]
pub struct Substituter<'a> {
    params: &'a Properties,
    /// Length in bytes of the longest key
    max_key_len: usize,
}

impl<'a> Substituter<'a> {
    pub fn new(params: &'a Properties) -> Self {
        let max_key_len = params.keys().map(String::len).max().unwrap_or(0);
        Self {
            params,
            max_key_len,
        }
    }

    /// Longest known placeholder starting at `open`, as the end offset of
    /// its closing `))` and the value.
    fn placeholder_at(&self, input: &str, open: usize) -> Option<(usize, &'a str)> {
        let body = open + OPEN.len();
        let limit = (body + self.max_key_len).min(input.len().saturating_sub(CLOSE.len()));
        (body..=limit)
            .rev()
            .filter(|&close| input.is_char_boundary(close) && input[close..].starts_with(CLOSE))
            .find_map(|close| {
                self.params
                    .get(&input[body..close])
                    .map(|value| (close + CLOSE.len(), value.as_str()))
            })
    }

    /// Replace every known placeholder in `input`.
    pub fn substitute_str<'s>(&self, input: &'s str) -> Cow<'s, str> {
        if self.params.is_empty() {
            return Cow::Borrowed(input);
        }

        let mut output = String::new();
        let mut copied = 0;
        let mut search = 0;
        while let Some(found) = input[search..].find(OPEN) {
            let open = search + found;
            match self.placeholder_at(input, open) {
                Some((end, value)) => {
                    output.push_str(&input[copied..open]);
                    output.push_str(value);
                    copied = end;
                    search = end;
                }
                // `(` is one byte, so the next char boundary is `open + 1`
                None => search = open + 1,
            }
        }

        if copied == 0 {
            return Cow::Borrowed(input);
        }
        output.push_str(&input[copied..]);
        Cow::Owned(output)
    }

    /// Return a copy of `node` with every string leaf substituted.
    pub fn substitute_node(&self, node: &Node) -> Node {
        match node {
            Node::Scalar(Scalar::String(s)) => {
                Node::Scalar(Scalar::String(self.substitute_str(s).into_owned()))
            }
            Node::Scalar(other) => Node::Scalar(other.clone()),
            Node::Sequence(items) => {
                Node::Sequence(items.iter().map(|item| self.substitute_node(item)).collect())
            }
            Node::Mapping(map) => Node::Mapping(
                map.iter()
                    .map(|(key, value)| (key.clone(), self.substitute_node(value)))
                    .collect(),
            ),
            Node::Tagged { tag, value } => Node::Tagged {
                tag: tag.clone(),
                value: Box::new(self.substitute_node(value)),
            },
        }
    }

    /// Substitute a whole document, copying the top-level `reserved` entry
    /// through untouched.
    ///
    /// The reserved entry is skipped only at the top level; a nested key
    /// with the same name is substituted like any other.
    pub fn apply(&self, document: &Node, reserved: Option<&str>) -> Node {
        match (document, reserved) {
            (Node::Mapping(map), Some(reserved)) => Node::Mapping(
                map.iter()
                    .map(|(key, value)| {
                        let value = if key == reserved {
                            tracing::trace!(field = %key, "Skipping reserved field");
                            value.clone()
                        } else {
                            self.substitute_node(value)
                        };
                        (key.clone(), value)
                    })
                    .collect(),
            ),
            _ => self.substitute_node(document),
        }
    }
}

/// Substitute `params` into `document`, skipping the top-level `reserved`
/// field. The input is not modified; the returned tree is the result.
pub fn substitute_document(
    document: &Node,
    params: &Properties,
    reserved: Option<&str>,
) -> Result<Node> {
    Ok(Substituter::new(params).apply(document, reserved))
}
