//! Signature recovery from reflected docstrings.
//!
//! The host exposes no formal IDL; the only machine-readable signature
//! information is the informally formatted first line of each routine's
//! docstring:
//!
//! ```text
//! name( (type1)arg1 [, (type2)arg2=default2] ) -> returnType :
//! ```
//!
//! A parenthesized, comma-separated argument list where each argument is a
//! parenthesized type tag immediately followed by an identifier, optionally
//! wrapped in square brackets to mark it optional, optionally suffixed with
//! `=defaultLiteral`, then an arrow and a return-type token, then a
//! trailing two-character ` :` marker.
//!
//! Recovery degrades gracefully: any malformed line downgrades the whole
//! signature to [`ScrapedSignature::Unavailable`] rather than producing a
//! partially populated one. The grammar is intolerant of types or defaults
//! that themselves contain `", "`; that is an accepted limitation of the
//! source format, not something to special-case.

use stubgen_schema::{Argument, FunctionSignature, ScrapedSignature};
use tracing::warn;

/// Why recovery of one signature failed.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("empty documentation string")]
    EmptyDoc,

    #[error("first line has no `->` return-type marker")]
    MissingArrow,

    #[error("first line has no `( ` argument-list opener")]
    MissingArgumentList,

    #[error("malformed argument token `{0}`")]
    MalformedArgument(String),

    #[error("argument token `{0}` has an empty name")]
    EmptyName(String),

    #[error("duplicate argument name `{0}`")]
    DuplicateName(String),
}

/// Recover a typed signature from documentation text.
///
/// Only the first line is considered. An empty documentation string is a
/// guaranteed-failure input and short-circuits without parsing.
pub fn recover(function_name: &str, doc: &str) -> Result<FunctionSignature, ParseError> {
    if doc.is_empty() {
        return Err(ParseError::EmptyDoc);
    }
    let first_line = doc.lines().next().unwrap_or("");

    // Trim the trailing two-character ` :` marker the host appends.
    let line = strip_last_chars(first_line, 2);

    let (head, return_type) = line.split_once("->").ok_or(ParseError::MissingArrow)?;
    let return_type = return_type.trim().to_string();

    // Isolate `(type)arg, ...` between the first `( ` and the closing
    // parenthesis at the end of the head.
    let (_, raw_args) = head
        .trim()
        .split_once("( ")
        .ok_or(ParseError::MissingArgumentList)?;
    let raw_args = strip_last_chars(raw_args, 1);

    let mut arguments: Vec<Argument> = Vec::new();
    for token in raw_args.split(", ") {
        let argument = parse_argument(token)?;
        if arguments.iter().any(|a| a.name == argument.name) {
            return Err(ParseError::DuplicateName(argument.name));
        }
        arguments.push(argument);
    }

    Ok(FunctionSignature {
        name: function_name.to_string(),
        arguments,
        return_type,
    })
}

/// Recovery in the form the walker stores: failures are logged with the
/// function name and downgraded to the unavailable sentinel, never raised.
pub fn scrape(function_name: &str, doc: &str) -> ScrapedSignature {
    match recover(function_name, doc) {
        Ok(signature) => ScrapedSignature::Recovered(signature),
        Err(error) => {
            warn!(function = function_name, %error, "failed to recover signature from docstring");
            ScrapedSignature::Unavailable
        }
    }
}

/// Parse one `(type)name`, `(type)name=default` or `[(type)name=default]`
/// token.
fn parse_argument(token: &str) -> Result<Argument, ParseError> {
    // Square brackets mark optional arguments; optionality is not tracked,
    // so they are purely cosmetic here.
    let cleaned = token.replace(['[', ']'], "");

    let (head, default) = match cleaned.split_once('=') {
        Some((head, default)) => (head, Some(default.trim().to_string())),
        None => (cleaned.as_str(), None),
    };

    let (ty, name) = head
        .split_once(')')
        .ok_or_else(|| ParseError::MalformedArgument(token.to_string()))?;
    let ty = ty.replace('(', "");
    let ty = ty.trim();
    let name = name.trim().to_string();

    if name.is_empty() {
        return Err(ParseError::EmptyName(token.to_string()));
    }

    // `object` is the host's generic marker; anything unrecoverable maps to
    // the language-agnostic any type.
    let ty = if ty.is_empty() || ty == "object" {
        "Any".to_string()
    } else {
        ty.to_string()
    };

    Ok(Argument {
        name,
        ty,
        default,
    })
}

/// Slice off the last `n` characters, respecting UTF-8 boundaries.
fn strip_last_chars(s: &str, n: usize) -> &str {
    match s.char_indices().nth_back(n - 1) {
        Some((idx, _)) => &s[..idx],
        None => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn well_formed_line() {
        let sig = recover("foo", "foo( (int)x, (str)y=None ) -> bool :").unwrap();
        assert_eq!(sig.to_string(), "foo(x: int, y: str=None) -> bool");
        assert_eq!(sig.arguments.len(), 2);
        assert_eq!(sig.arguments[1].default.as_deref(), Some("None"));
        assert_eq!(sig.return_type, "bool");
    }

    #[test]
    fn optional_brackets_are_cosmetic() {
        let sig = recover(
            "create_device",
            "create_device( (Track)self, (str)name [, (int)position=-1] ) -> Device :",
        )
        .unwrap();
        assert_eq!(
            sig.to_string(),
            "create_device(self: Track, name: str, position: int=-1) -> Device"
        );
    }

    #[test]
    fn generic_object_marker_maps_to_any() {
        let sig = recover("notify", "notify( (object)self, (object)payload ) -> None :").unwrap();
        assert_eq!(sig.arguments[0].ty, "Any");
        assert_eq!(sig.arguments[1].ty, "Any");
    }

    #[test]
    fn only_first_line_is_parsed() {
        let doc = "bar( (int)x ) -> None :\n\nLong prose that is not a signature -> ( nope.";
        let sig = recover("bar", doc).unwrap();
        assert_eq!(sig.to_string(), "bar(x: int) -> None");
    }

    #[test]
    fn empty_doc_short_circuits() {
        assert_eq!(recover("foo", ""), Err(ParseError::EmptyDoc));
    }

    #[test]
    fn missing_arrow_fails() {
        assert_eq!(
            recover("foo", "foo( (int)x ) bool :"),
            Err(ParseError::MissingArrow)
        );
    }

    #[test]
    fn missing_argument_list_fails() {
        // Prose first lines have no `( ` opener.
        assert_eq!(
            recover("foo", "Frobnicates the baz -> quux :"),
            Err(ParseError::MissingArgumentList)
        );
    }

    #[test]
    fn empty_argument_list_fails() {
        // The grammar cannot express zero arguments: the split yields one
        // empty token.
        assert!(matches!(
            recover("foo", "foo( ) -> None :"),
            Err(ParseError::MalformedArgument(_))
        ));
    }

    #[test]
    fn missing_type_parenthesis_fails() {
        assert!(matches!(
            recover("foo", "foo( x, y ) -> None :"),
            Err(ParseError::MalformedArgument(_))
        ));
    }

    #[test]
    fn nameless_argument_fails() {
        assert!(matches!(
            recover("foo", "foo( (int) ) -> None :"),
            Err(ParseError::EmptyName(_))
        ));
    }

    #[test]
    fn duplicate_argument_names_fail() {
        assert_eq!(
            recover("foo", "foo( (int)x, (str)x ) -> None :"),
            Err(ParseError::DuplicateName("x".into()))
        );
    }

    #[test]
    fn scrape_never_raises() {
        assert_eq!(scrape("foo", ""), ScrapedSignature::Unavailable);
        assert_eq!(scrape("foo", "garbage"), ScrapedSignature::Unavailable);
        assert!(matches!(
            scrape("foo", "foo( (int)x ) -> int :"),
            ScrapedSignature::Recovered(_)
        ));
    }

    #[test]
    fn argument_count_matches_comma_tokens() {
        let sig = recover(
            "set_clip",
            "set_clip( (ClipSlot)self, (Clip)clip, (float)length, (bool)loop ) -> None :",
        )
        .unwrap();
        assert_eq!(sig.arguments.len(), 4);
    }
}
