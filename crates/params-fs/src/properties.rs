//! `.properties` file parsing
//!
//! Supports the standard grammar: `#`/`!` comments, `key=value`,
//! `key:value` and `key value` separators, backslash line continuations
//! and escape sequences. Files are decoded as UTF-8.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read};

use java_properties::{PropertiesError, PropertiesIter};

use crate::{Error, NormalizedPath, Result};

/// Key/value pairs parsed from one or more property files.
///
/// Ordered so logged and printed output is deterministic.
pub type Properties = BTreeMap<String, String>;

fn parse_reader<R: Read>(input: R) -> std::result::Result<Properties, PropertiesError> {
    let mut props = Properties::new();
    PropertiesIter::new_with_encoding(input, encoding_rs::UTF_8).read_into(|key, value| {
        props.insert(key, value);
    })?;
    Ok(props)
}

/// Parse property definitions from an in-memory string.
///
/// Later definitions of the same key replace earlier ones.
pub fn parse_properties(content: &str) -> std::result::Result<Properties, PropertiesError> {
    parse_reader(content.as_bytes())
}

/// Read and parse the property file at `path`.
pub fn read_properties(path: &NormalizedPath) -> Result<Properties> {
    let native = path.to_native();
    let file = File::open(&native).map_err(|e| Error::io(&native, e))?;

    parse_reader(BufReader::new(file)).map_err(|e| Error::PropertyParse {
        path: native,
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_both_separators_and_skips_comments() {
        let props = parse_properties(
            "# comment\n! also a comment\nenv=prod\nregion: eu-west-1\n  padded   =  value\n",
        )
        .unwrap();

        assert_eq!(props["env"], "prod");
        assert_eq!(props["region"], "eu-west-1");
        assert_eq!(props["padded"], "value");
        assert_eq!(props.len(), 3);
    }

    #[test]
    fn joins_continuation_lines() {
        let props = parse_properties("hosts=a,\\\n      b,\\\n      c\n").unwrap();
        assert_eq!(props["hosts"], "a,b,c");
    }

    #[test]
    fn later_definition_wins() {
        let props = parse_properties("k=first\nk=second\n").unwrap();
        assert_eq!(props["k"], "second");
    }

    #[test]
    fn keeps_non_ascii_values() {
        let props = parse_properties("greeting=grüezi\n").unwrap();
        assert_eq!(props["greeting"], "grüezi");
    }

    #[test]
    fn rejects_malformed_unicode_escape() {
        assert!(parse_properties("bad=\\uZZZZ\n").is_err());
    }
}
