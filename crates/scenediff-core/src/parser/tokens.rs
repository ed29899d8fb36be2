//! Line tokenizer
//!
//! Classifies a single document line into the narrow set of shapes the
//! scanner understands. Classification is independent of scanner state;
//! whether a token means anything is decided by the state machine.

use regex::Regex;
use std::sync::LazyLock;

use crate::model::FileId;

/// Record kind tag of an object header (`--- !u!1 &<id>`)
pub const KIND_OBJECT: u32 = 1;
/// Record kind tag of a transform header (`--- !u!4 &<id>`)
pub const KIND_TRANSFORM: u32 = 4;
/// Record kind tag of a prefab-instance header (`--- !u!1001 &<id>`)
pub const KIND_PREFAB_INSTANCE: u32 = 1001;

static HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^--- !u!(?<kind>\d+) &(?<id>\d+)").expect("valid regex"));

static NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*m_Name:\s+(?<name>.+)$").expect("valid regex"));

static GAME_OBJECT_REF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*m_GameObject:\s*\{fileID:\s*(?<id>\d+)\}").expect("valid regex")
});

static LOCAL_POSITION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^\s*m_LocalPosition:\s*\{x:\s*(?<x>[-\d.e]+),\s*y:\s*(?<y>[-\d.e]+),\s*z:\s*(?<z>[-\d.e]+)\}",
    )
    .expect("valid regex")
});

static LOCAL_ROTATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^\s*m_LocalRotation:\s*\{x:\s*(?<x>[-\d.e]+),\s*y:\s*(?<y>[-\d.e]+),\s*z:\s*(?<z>[-\d.e]+),\s*w:\s*(?<w>[-\d.e]+)\}",
    )
    .expect("valid regex")
});

static LOCAL_SCALE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^\s*m_LocalScale:\s*\{x:\s*(?<x>[-\d.e]+),\s*y:\s*(?<y>[-\d.e]+),\s*z:\s*(?<z>[-\d.e]+)\}",
    )
    .expect("valid regex")
});

static CHILDREN_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*m_Children:").expect("valid regex"));

static CHILD_ENTRY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*-\s*\{fileID:\s*(?<id>\d+)\}").expect("valid regex"));

static MODIFICATION_TARGET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*-\s*target:\s*\{fileID:\s*(?<id>\d+)").expect("valid regex")
});

static PROPERTY_PATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*propertyPath:\s*(?<path>.+)$").expect("valid regex"));

static VALUE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*value:\s*(?<value>.*)$").expect("valid regex"));

/// One classified document line
///
/// Numeric transform components are kept as raw literals; the scanner
/// decides how strictly to parse them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Token<'a> {
    /// Record header of a kind the parser understands
    Header { kind: u32, id: FileId },
    /// Record header of any other kind
    OtherHeader,
    Name(&'a str),
    GameObjectRef(FileId),
    LocalPosition([&'a str; 3]),
    LocalRotation([&'a str; 4]),
    LocalScale([&'a str; 3]),
    ChildrenMarker,
    ChildEntry(FileId),
    ModificationsMarker,
    ModificationTarget(FileId),
    PropertyPath(&'a str),
    Value(&'a str),
    Other,
}

/// Classify one line (without its trailing newline).
///
/// Identifiers that do not fit in 64 bits make the line [`Token::Other`].
pub fn tokenize(line: &str) -> Token<'_> {
    if line.starts_with("---") {
        return tokenize_header(line);
    }

    if line.trim() == "m_Modifications:" {
        return Token::ModificationsMarker;
    }

    if let Some(caps) = MODIFICATION_TARGET.captures(line) {
        return id_token(&caps["id"], Token::ModificationTarget);
    }
    if let Some(caps) = CHILD_ENTRY.captures(line) {
        return id_token(&caps["id"], Token::ChildEntry);
    }
    if let Some(caps) = GAME_OBJECT_REF.captures(line) {
        return id_token(&caps["id"], Token::GameObjectRef);
    }
    if let Some(caps) = NAME.captures(line) {
        return caps
            .name("name")
            .map_or(Token::Other, |m| Token::Name(m.as_str()));
    }
    if let Some(caps) = LOCAL_ROTATION.captures(line) {
        return match (caps.name("x"), caps.name("y"), caps.name("z"), caps.name("w")) {
            (Some(x), Some(y), Some(z), Some(w)) => {
                Token::LocalRotation([x.as_str(), y.as_str(), z.as_str(), w.as_str()])
            }
            _ => Token::Other,
        };
    }
    if let Some(caps) = LOCAL_POSITION.captures(line) {
        return xyz(&caps).map_or(Token::Other, Token::LocalPosition);
    }
    if let Some(caps) = LOCAL_SCALE.captures(line) {
        return xyz(&caps).map_or(Token::Other, Token::LocalScale);
    }
    if CHILDREN_MARKER.is_match(line) {
        return Token::ChildrenMarker;
    }
    if let Some(caps) = PROPERTY_PATH.captures(line) {
        return caps
            .name("path")
            .map_or(Token::Other, |m| Token::PropertyPath(m.as_str().trim()));
    }
    if let Some(caps) = VALUE.captures(line) {
        return caps
            .name("value")
            .map_or(Token::Other, |m| Token::Value(m.as_str().trim()));
    }

    Token::Other
}

fn tokenize_header(line: &str) -> Token<'_> {
    let Some(caps) = HEADER.captures(line) else {
        return Token::OtherHeader;
    };
    let kind = match caps["kind"].parse::<u32>() {
        Ok(kind @ (KIND_OBJECT | KIND_TRANSFORM | KIND_PREFAB_INSTANCE)) => kind,
        _ => return Token::OtherHeader,
    };
    match FileId::parse(&caps["id"]) {
        Some(id) => Token::Header { kind, id },
        None => {
            tracing::debug!(line, "skipping header with out-of-range identifier");
            Token::Other
        }
    }
}

fn id_token<'a>(digits: &str, make: fn(FileId) -> Token<'a>) -> Token<'a> {
    match FileId::parse(digits) {
        Some(id) => make(id),
        None => {
            tracing::debug!(digits, "skipping reference with out-of-range identifier");
            Token::Other
        }
    }
}

fn xyz<'a>(caps: &regex::Captures<'a>) -> Option<[&'a str; 3]> {
    Some([
        caps.name("x")?.as_str(),
        caps.name("y")?.as_str(),
        caps.name("z")?.as_str(),
    ])
}

/// Strip surrounding whitespace and one pair of matching YAML quotes.
pub fn unquote(raw: &str) -> &str {
    let trimmed = raw.trim();
    for quote in ['"', '\''] {
        if trimmed.len() >= 2 && trimmed.starts_with(quote) && trimmed.ends_with(quote) {
            return &trimmed[1..trimmed.len() - 1];
        }
    }
    trimmed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_headers() {
        assert_eq!(
            tokenize("--- !u!1 &100"),
            Token::Header {
                kind: KIND_OBJECT,
                id: FileId(100)
            }
        );
        assert_eq!(
            tokenize("--- !u!4 &200 stripped"),
            Token::Header {
                kind: KIND_TRANSFORM,
                id: FileId(200)
            }
        );
        assert_eq!(
            tokenize("--- !u!1001 &300"),
            Token::Header {
                kind: KIND_PREFAB_INSTANCE,
                id: FileId(300)
            }
        );
    }

    #[test]
    fn test_unknown_header_kind() {
        assert_eq!(tokenize("--- !u!114 &5"), Token::OtherHeader);
        assert_eq!(tokenize("--- !u!10 &5"), Token::OtherHeader);
        assert_eq!(tokenize("---"), Token::OtherHeader);
    }

    #[test]
    fn test_out_of_range_header_is_other() {
        assert_eq!(tokenize("--- !u!1 &99999999999999999999"), Token::Other);
    }

    #[test]
    fn test_transform_lines() {
        assert_eq!(
            tokenize("  m_LocalPosition: {x: 1.5, y: -2, z: 3e-5}"),
            Token::LocalPosition(["1.5", "-2", "3e-5"])
        );
        assert_eq!(
            tokenize("  m_LocalRotation: {x: 0, y: 0, z: 0, w: 1}"),
            Token::LocalRotation(["0", "0", "0", "1"])
        );
        assert_eq!(
            tokenize("  m_LocalScale: {x: 1, y: 1, z: 1}"),
            Token::LocalScale(["1", "1", "1"])
        );
        assert_eq!(
            tokenize("  m_GameObject: {fileID: 42}"),
            Token::GameObjectRef(FileId(42))
        );
    }

    #[test]
    fn test_children_lines() {
        assert_eq!(tokenize("  m_Children:"), Token::ChildrenMarker);
        assert_eq!(tokenize("  m_Children: []"), Token::ChildrenMarker);
        assert_eq!(tokenize("  - {fileID: 7}"), Token::ChildEntry(FileId(7)));
        // component lists are not child entries
        assert_eq!(tokenize("  - component: {fileID: 7}"), Token::Other);
    }

    #[test]
    fn test_modification_lines() {
        assert_eq!(tokenize("    m_Modifications:"), Token::ModificationsMarker);
        assert_eq!(
            tokenize("    - target: {fileID: 9, guid: abc, type: 3}"),
            Token::ModificationTarget(FileId(9))
        );
        assert_eq!(
            tokenize("      propertyPath: m_LocalPosition.x"),
            Token::PropertyPath("m_LocalPosition.x")
        );
        assert_eq!(tokenize("      value: 2.5 "), Token::Value("2.5"));
        assert_eq!(tokenize("      value: "), Token::Value(""));
    }

    #[test]
    fn test_name_requires_value() {
        assert_eq!(tokenize("  m_Name: Cube"), Token::Name("Cube"));
        assert_eq!(tokenize("  m_Name: "), Token::Other);
    }

    #[test]
    fn test_unquote() {
        assert_eq!(unquote(" \"Foo\" "), "Foo");
        assert_eq!(unquote("'Bar'"), "Bar");
        assert_eq!(unquote("Baz"), "Baz");
        assert_eq!(unquote("\"half"), "\"half");
        assert_eq!(unquote("\""), "\"");
    }
}
