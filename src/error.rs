use oxilangtag::LanguageTagParseError;
use oxiri::IriParseError;
use std::error::Error;
use std::sync::Arc;
use std::{fmt, io};
use thiserror::Error;

/// Error returned during RDF/XML parsing.
#[derive(Debug, Error)]
pub enum RdfXmlParseError {
    /// I/O error during parsing (file not found...).
    #[error(transparent)]
    Io(#[from] io::Error),
    /// An error in the file syntax.
    #[error(transparent)]
    Syntax(#[from] RdfXmlSyntaxError),
}

impl From<RdfXmlParseError> for io::Error {
    #[inline]
    fn from(error: RdfXmlParseError) -> Self {
        match error {
            RdfXmlParseError::Io(error) => error,
            RdfXmlParseError::Syntax(error) => error.into(),
        }
    }
}

impl From<quick_xml::Error> for RdfXmlParseError {
    #[inline]
    fn from(error: quick_xml::Error) -> Self {
        match error {
            quick_xml::Error::Io(error) => {
                Self::Io(Arc::try_unwrap(error).unwrap_or_else(|e| io::Error::new(e.kind(), e)))
            }
            _ => Self::Syntax(RdfXmlSyntaxError::new(SyntaxErrorKind::Xml(error))),
        }
    }
}

impl From<quick_xml::escape::EscapeError> for RdfXmlParseError {
    #[inline]
    fn from(error: quick_xml::escape::EscapeError) -> Self {
        quick_xml::Error::from(error).into()
    }
}

impl From<quick_xml::encoding::EncodingError> for RdfXmlParseError {
    #[inline]
    fn from(error: quick_xml::encoding::EncodingError) -> Self {
        quick_xml::Error::from(error).into()
    }
}

impl From<quick_xml::events::attributes::AttrError> for RdfXmlParseError {
    #[inline]
    fn from(error: quick_xml::events::attributes::AttrError) -> Self {
        quick_xml::Error::InvalidAttr(error).into()
    }
}

/// A position in the parsed input, counted in bytes.
///
/// Lines and columns start at 1.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub struct TextPosition {
    pub line: u64,
    pub column: u64,
    pub offset: u64,
}

/// An error in the syntax of the parsed file.
///
/// When position tracking is enabled with
/// [`RdfXmlParser::track_position`](crate::RdfXmlParser::track_position) the
/// error carries the input position where the parser stopped.
#[derive(Debug)]
pub struct RdfXmlSyntaxError {
    kind: SyntaxErrorKind,
    position: Option<TextPosition>,
}

#[derive(Debug)]
enum SyntaxErrorKind {
    Xml(quick_xml::Error),
    InvalidIri {
        iri: String,
        error: IriParseError,
    },
    InvalidLanguageTag {
        tag: String,
        error: LanguageTagParseError,
    },
    UnboundPrefix {
        prefix: String,
    },
    InvalidNcName {
        name: String,
    },
    DuplicateRdfId {
        iri: String,
    },
    UnsupportedFeature {
        feature: String,
    },
    ConflictingAttributes {
        first: &'static str,
        second: &'static str,
    },
    Msg {
        msg: String,
    },
}

impl RdfXmlSyntaxError {
    fn new(kind: SyntaxErrorKind) -> Self {
        Self {
            kind,
            position: None,
        }
    }

    /// Builds an error from a printable error message.
    pub(crate) fn msg(msg: impl Into<String>) -> Self {
        Self::new(SyntaxErrorKind::Msg { msg: msg.into() })
    }

    pub(crate) fn invalid_iri(iri: String, error: IriParseError) -> Self {
        Self::new(SyntaxErrorKind::InvalidIri { iri, error })
    }

    pub(crate) fn invalid_language_tag(tag: String, error: LanguageTagParseError) -> Self {
        Self::new(SyntaxErrorKind::InvalidLanguageTag { tag, error })
    }

    pub(crate) fn unbound_prefix(prefix: impl Into<String>) -> Self {
        Self::new(SyntaxErrorKind::UnboundPrefix {
            prefix: prefix.into(),
        })
    }

    pub(crate) fn invalid_nc_name(name: impl Into<String>) -> Self {
        Self::new(SyntaxErrorKind::InvalidNcName { name: name.into() })
    }

    pub(crate) fn duplicate_rdf_id(iri: impl Into<String>) -> Self {
        Self::new(SyntaxErrorKind::DuplicateRdfId { iri: iri.into() })
    }

    pub(crate) fn unsupported_feature(feature: impl Into<String>) -> Self {
        Self::new(SyntaxErrorKind::UnsupportedFeature {
            feature: feature.into(),
        })
    }

    pub(crate) fn conflicting_attributes(first: &'static str, second: &'static str) -> Self {
        Self::new(SyntaxErrorKind::ConflictingAttributes { first, second })
    }

    pub(crate) fn with_position(mut self, position: TextPosition) -> Self {
        self.position.get_or_insert(position);
        self
    }

    /// The input position where the parser stopped, if position tracking is enabled.
    #[inline]
    pub fn position(&self) -> Option<TextPosition> {
        self.position
    }
}

impl fmt::Display for RdfXmlSyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            SyntaxErrorKind::Xml(error) => error.fmt(f),
            SyntaxErrorKind::InvalidIri { iri, error } => {
                write!(f, "error while parsing IRI '{iri}': {error}")
            }
            SyntaxErrorKind::InvalidLanguageTag { tag, error } => {
                write!(f, "error while parsing language tag '{tag}': {error}")
            }
            SyntaxErrorKind::UnboundPrefix { prefix } => {
                write!(f, "the XML prefix '{prefix}:' is not bound to any namespace")
            }
            SyntaxErrorKind::InvalidNcName { name } => {
                write!(f, "'{name}' is not a valid XML NCName")
            }
            SyntaxErrorKind::DuplicateRdfId { iri } => {
                write!(f, "{iri} has already been used as rdf:ID value")
            }
            SyntaxErrorKind::UnsupportedFeature { feature } => {
                write!(f, "{feature} is not supported")
            }
            SyntaxErrorKind::ConflictingAttributes { first, second } => {
                write!(f, "not both {first} and {second} could be set at the same time")
            }
            SyntaxErrorKind::Msg { msg } => f.write_str(msg),
        }?;
        if let Some(position) = self.position {
            write!(f, " on line {} at column {}", position.line, position.column)?;
        }
        Ok(())
    }
}

impl Error for RdfXmlSyntaxError {
    #[inline]
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.kind {
            SyntaxErrorKind::Xml(error) => Some(error),
            SyntaxErrorKind::InvalidIri { error, .. } => Some(error),
            SyntaxErrorKind::InvalidLanguageTag { error, .. } => Some(error),
            _ => None,
        }
    }
}

impl From<RdfXmlSyntaxError> for io::Error {
    #[inline]
    fn from(error: RdfXmlSyntaxError) -> Self {
        match error.kind {
            SyntaxErrorKind::Xml(error) => match error {
                quick_xml::Error::Io(error) => {
                    Arc::try_unwrap(error).unwrap_or_else(|e| Self::new(e.kind(), e))
                }
                _ => Self::new(io::ErrorKind::InvalidData, error),
            },
            SyntaxErrorKind::Msg { msg } => Self::new(io::ErrorKind::InvalidData, msg),
            _ => Self::new(io::ErrorKind::InvalidData, error),
        }
    }
}
