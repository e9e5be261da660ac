use std::fmt::{self, Display, Formatter};

use failure_derive::Fail;

/// The kind of name that failed validation
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum NameKind {
    Type,
    Identifier,
    Package,
    Member,
}
impl Display for NameKind {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(match *self {
            NameKind::Type => "type",
            NameKind::Identifier => "identifier",
            NameKind::Package => "package",
            NameKind::Member => "member",
        })
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Fail)]
pub enum SrgError {
    #[fail(display = "Invalid {} name {:?}", kind, name)]
    InvalidName {
        kind: NameKind,
        name: String
    },
    #[fail(display = "Malformed descriptor {:?}: {}", descriptor, reason)]
    MalformedDescriptor {
        descriptor: String,
        reason: &'static str
    },
    #[fail(display = "Malformed signature {:?}: {}", signature, reason)]
    MalformedSignature {
        signature: String,
        reason: &'static str
    },
    #[fail(display = "Unrecognized record kind {:?}", _0)]
    UnrecognizedRecordKind(String),
    #[fail(display = "Invalid line {:?}: {}", line, reason)]
    InvalidLine {
        line: String,
        reason: &'static str
    },
    #[fail(display = "Unsupported operation on immutable mappings: {}", _0)]
    UnsupportedOperation(&'static str),
    #[fail(display = "Chained layer {} introduces unknown name {}", layer, name)]
    AmbiguousChain {
        layer: usize,
        name: String
    },
}
impl SrgError {
    #[inline]
    pub(crate) fn invalid_name(kind: NameKind, name: &str) -> SrgError {
        SrgError::InvalidName { kind, name: name.into() }
    }
    #[inline]
    pub(crate) fn malformed_descriptor(descriptor: &str, reason: &'static str) -> SrgError {
        SrgError::MalformedDescriptor { descriptor: descriptor.into(), reason }
    }
    #[inline]
    pub(crate) fn malformed_signature(signature: &str, reason: &'static str) -> SrgError {
        SrgError::MalformedSignature { signature: signature.into(), reason }
    }
    #[inline]
    pub(crate) fn invalid_line(line: &str, reason: &'static str) -> SrgError {
        SrgError::InvalidLine { line: line.into(), reason }
    }
}

/// A failure to parse a mappings file, pointing at the offending line
#[derive(Debug, Fail)]
#[fail(display = "Unable to parse line {} ({:?}): {}", line_number, line, cause)]
pub struct ParseError {
    pub line_number: usize,
    pub line: String,
    #[cause]
    pub cause: SrgError
}
impl ParseError {
    #[inline]
    pub(crate) fn new(line_number: usize, line: &str, cause: SrgError) -> ParseError {
        ParseError { line_number, line: line.into(), cause }
    }
}
