use crate::error::{RdfXmlParseError, RdfXmlSyntaxError};
use crate::namespace::{ExpandedName, NamespaceStack};
use crate::utils::*;
use oxilangtag::LanguageTag;
use oxiri::{Iri, IriParseError};
use oxrdf::vocab::rdf;
use oxrdf::{BlankNode, GraphName, Literal, NamedNode, Quad, Subject, Term};
use quick_xml::escape::unescape_with;
use quick_xml::events::attributes::Attribute;
use quick_xml::events::*;
use quick_xml::{Error, Reader, Writer};
use std::collections::{HashMap, HashSet, VecDeque};
use std::io::{BufRead, BufReader, Read};
use std::str;

/// A [RDF/XML](https://www.w3.org/TR/rdf-syntax-grammar/) streaming parser.
///
/// It reads the file in streaming.
/// It does not keep data in memory except a stack for handling nested XML tags,
/// the namespace bindings in scope, and a set of all seen `rdf:ID`s to detect
/// duplicate ids and fail according to the specification.
///
/// Every emitted quad belongs to the graph given with
/// [`with_default_graph`](RdfXmlParser::with_default_graph), the default graph
/// if not set.
///
/// Count the number of people:
/// ```
/// use oxrdf::NamedNodeRef;
/// use oxrdf::vocab::rdf;
/// use quadxml::RdfXmlParser;
///
/// let file = r#"<?xml version="1.0"?>
/// <rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#" xmlns:schema="http://schema.org/">
///  <rdf:Description rdf:about="http://example.com/foo">
///    <rdf:type rdf:resource="http://schema.org/Person" />
///    <schema:name>Foo</schema:name>
///  </rdf:Description>
///  <schema:Person rdf:about="http://example.com/bar" schema:name="Bar" />
/// </rdf:RDF>"#;
///
/// let schema_person = NamedNodeRef::new("http://schema.org/Person")?;
/// let mut count = 0;
/// for quad in RdfXmlParser::new().for_reader(file.as_bytes()) {
///     let quad = quad?;
///     if quad.predicate == rdf::TYPE && quad.object == schema_person.into() {
///         count += 1;
///     }
/// }
/// assert_eq!(2, count);
/// # Result::<_, Box<dyn std::error::Error>>::Ok(())
/// ```
#[derive(Clone)]
#[must_use]
pub struct RdfXmlParser {
    base: Option<Iri<String>>,
    default_graph: GraphName,
    lenient: bool,
    track_position: bool,
    allow_duplicate_rdf_ids: bool,
}

impl Default for RdfXmlParser {
    fn default() -> Self {
        Self {
            base: None,
            default_graph: GraphName::DefaultGraph,
            lenient: false,
            track_position: false,
            allow_duplicate_rdf_ids: false,
        }
    }
}

impl RdfXmlParser {
    /// Builds a new [`RdfXmlParser`].
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Assumes the file is valid to make parsing faster.
    ///
    /// It will skip some validations, including the well-formedness checks of
    /// the underlying XML reader.
    ///
    /// Note that if the file is actually not valid, the parser might emit broken RDF.
    #[inline]
    pub fn lenient(mut self) -> Self {
        self.lenient = true;
        self
    }

    /// Base IRI to resolve the relative IRI references of the document against.
    #[inline]
    pub fn with_base_iri(mut self, base_iri: impl Into<String>) -> Result<Self, IriParseError> {
        self.base = Some(Iri::parse(base_iri.into())?);
        Ok(self)
    }

    /// Graph name to put on every emitted quad instead of the default graph.
    ///
    /// ```
    /// use oxrdf::NamedNode;
    /// use quadxml::RdfXmlParser;
    ///
    /// let file = r#"<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#" xmlns:ex="http://example.com/">
    ///  <ex:Thing rdf:about="http://example.com/a" />
    /// </rdf:RDF>"#;
    ///
    /// let graph = NamedNode::new("http://example.com/graph")?;
    /// for quad in RdfXmlParser::new()
    ///     .with_default_graph(graph.clone())
    ///     .for_slice(file)
    /// {
    ///     assert_eq!(quad?.graph_name, graph.clone().into());
    /// }
    /// # Result::<_, Box<dyn std::error::Error>>::Ok(())
    /// ```
    #[inline]
    pub fn with_default_graph(mut self, default_graph: impl Into<GraphName>) -> Self {
        self.default_graph = default_graph.into();
        self
    }

    /// Makes syntax errors carry the line and column where the parser stopped.
    #[inline]
    pub fn track_position(mut self) -> Self {
        self.track_position = true;
        self
    }

    /// Disables the uniqueness check on `rdf:ID` values.
    #[inline]
    pub fn allow_duplicate_rdf_ids(mut self) -> Self {
        self.allow_duplicate_rdf_ids = true;
        self
    }

    /// Parses a RDF/XML file from a [`Read`] implementation.
    ///
    /// ```
    /// use oxrdf::NamedNodeRef;
    /// use oxrdf::vocab::rdf;
    /// use quadxml::RdfXmlParser;
    ///
    /// let file = r#"<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#" xmlns:schema="http://schema.org/">
    ///  <schema:Person rdf:about="http://example.com/bar" schema:name="Bar" />
    /// </rdf:RDF>"#;
    ///
    /// let schema_person = NamedNodeRef::new("http://schema.org/Person")?;
    /// let mut count = 0;
    /// for quad in RdfXmlParser::new().for_reader(file.as_bytes()) {
    ///     let quad = quad?;
    ///     if quad.predicate == rdf::TYPE && quad.object == schema_person.into() {
    ///         count += 1;
    ///     }
    /// }
    /// assert_eq!(1, count);
    /// # Result::<_, Box<dyn std::error::Error>>::Ok(())
    /// ```
    pub fn for_reader<R: Read>(self, reader: R) -> ReaderRdfXmlParser<R> {
        ReaderRdfXmlParser {
            results: VecDeque::new(),
            parser: self.into_internal(BufReader::new(reader)),
            reader_buffer: Vec::default(),
        }
    }

    /// Parses a RDF/XML file from a byte slice.
    ///
    /// ```
    /// use oxrdf::NamedNodeRef;
    /// use oxrdf::vocab::rdf;
    /// use quadxml::RdfXmlParser;
    ///
    /// let file = r#"<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#" xmlns:schema="http://schema.org/">
    ///  <schema:Person rdf:about="http://example.com/bar" schema:name="Bar" />
    /// </rdf:RDF>"#;
    ///
    /// let schema_person = NamedNodeRef::new("http://schema.org/Person")?;
    /// let mut count = 0;
    /// for quad in RdfXmlParser::new().for_slice(file) {
    ///     let quad = quad?;
    ///     if quad.predicate == rdf::TYPE && quad.object == schema_person.into() {
    ///         count += 1;
    ///     }
    /// }
    /// assert_eq!(1, count);
    /// # Result::<_, Box<dyn std::error::Error>>::Ok(())
    /// ```
    pub fn for_slice(self, slice: &(impl AsRef<[u8]> + ?Sized)) -> SliceRdfXmlParser<'_> {
        SliceRdfXmlParser {
            results: VecDeque::new(),
            parser: self.into_internal(slice.as_ref()),
            reader_buffer: Vec::default(),
        }
    }

    fn into_internal<R: BufRead>(self, reader: R) -> InternalRdfXmlParser<R> {
        let mut reader = Reader::from_reader(PositionedReader::new(reader));
        let config = reader.config_mut();
        config.expand_empty_elements = true;
        if self.lenient {
            config.check_end_names = false;
        }
        InternalRdfXmlParser {
            reader,
            state: vec![RdfXmlState::Doc {
                base_iri: self.base.clone(),
            }],
            namespaces: NamespaceStack::new(),
            custom_entities: HashMap::new(),
            in_literal_depth: 0,
            known_rdf_id: HashSet::default(),
            bnode_id_generator: BlankNodeIdGenerator::default(),
            is_end: false,
            default_graph: self.default_graph.clone(),
            lenient: self.lenient,
            track_position: self.track_position,
            allow_duplicate_rdf_ids: self.allow_duplicate_rdf_ids,
        }
    }
}

/// Parses a RDF/XML file from a [`Read`] implementation.
///
/// Can be built using [`RdfXmlParser::for_reader`].
#[must_use]
pub struct ReaderRdfXmlParser<R: Read> {
    results: VecDeque<Quad>,
    parser: InternalRdfXmlParser<BufReader<R>>,
    reader_buffer: Vec<u8>,
}

impl<R: Read> Iterator for ReaderRdfXmlParser<R> {
    type Item = Result<Quad, RdfXmlParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(quad) = self.results.pop_front() {
                return Some(Ok(quad));
            } else if self.parser.is_end {
                return None;
            }
            if let Err(e) = self.parse_step() {
                // the document is broken, no quads are emitted past this point
                self.parser.is_end = true;
                return Some(Err(e));
            }
        }
    }
}

impl<R: Read> ReaderRdfXmlParser<R> {
    /// The list of IRI prefixes considered at the current step of the parsing.
    ///
    /// This method returns (prefix name, prefix value) tuples.
    /// It is empty at the beginning of the parsing and gets updated when prefixes are encountered.
    /// If a prefix is overridden, only the latest version is returned.
    ///
    /// ```
    /// use quadxml::RdfXmlParser;
    ///
    /// let file = r#"<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#" xmlns:schema="http://schema.org/">
    ///  <schema:Person rdf:about="http://example.com/bar" schema:name="Bar" />
    /// </rdf:RDF>"#;
    ///
    /// let mut parser = RdfXmlParser::new().for_reader(file.as_bytes());
    /// assert_eq!(parser.prefixes().collect::<Vec<_>>(), []); // No prefix at the beginning
    ///
    /// parser.next().unwrap()?; // We read the first quad
    /// assert_eq!(
    ///     parser.prefixes().collect::<Vec<_>>(),
    ///     [
    ///         ("rdf", "http://www.w3.org/1999/02/22-rdf-syntax-ns#"),
    ///         ("schema", "http://schema.org/")
    ///     ]
    /// ); // There are now prefixes
    /// # Result::<_, Box<dyn std::error::Error>>::Ok(())
    /// ```
    pub fn prefixes(&self) -> RdfXmlPrefixesIter<'_> {
        RdfXmlPrefixesIter {
            inner: self.parser.namespaces.bindings().into_iter(),
        }
    }

    /// The base IRI considered at the current step of the parsing.
    pub fn base_iri(&self) -> Option<&str> {
        Some(self.parser.current_base_iri()?.as_str())
    }

    /// The current byte position in the input data.
    pub fn buffer_position(&self) -> u64 {
        self.parser.reader.buffer_position()
    }

    fn parse_step(&mut self) -> Result<(), RdfXmlParseError> {
        self.reader_buffer.clear();
        let event = match self.parser.reader.read_event_into(&mut self.reader_buffer) {
            Ok(event) => event,
            Err(e) => return Err(self.parser.locate(e.into())),
        };
        self.parser.parse_event(event, &mut self.results)
    }
}

/// Parses a RDF/XML file from a byte slice.
///
/// Can be built using [`RdfXmlParser::for_slice`].
#[must_use]
pub struct SliceRdfXmlParser<'a> {
    results: VecDeque<Quad>,
    parser: InternalRdfXmlParser<&'a [u8]>,
    reader_buffer: Vec<u8>,
}

impl Iterator for SliceRdfXmlParser<'_> {
    type Item = Result<Quad, RdfXmlSyntaxError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(quad) = self.results.pop_front() {
                return Some(Ok(quad));
            } else if self.parser.is_end {
                return None;
            }
            if let Err(e) = self.parse_step() {
                self.parser.is_end = true;
                if let RdfXmlParseError::Syntax(e) = e {
                    return Some(Err(e));
                }
                // I/O errors can't happen on a slice
            }
        }
    }
}

impl SliceRdfXmlParser<'_> {
    /// The list of IRI prefixes considered at the current step of the parsing.
    ///
    /// See [`ReaderRdfXmlParser::prefixes`].
    pub fn prefixes(&self) -> RdfXmlPrefixesIter<'_> {
        RdfXmlPrefixesIter {
            inner: self.parser.namespaces.bindings().into_iter(),
        }
    }

    /// The base IRI considered at the current step of the parsing.
    pub fn base_iri(&self) -> Option<&str> {
        Some(self.parser.current_base_iri()?.as_str())
    }

    /// The current byte position in the input data.
    pub fn buffer_position(&self) -> u64 {
        self.parser.reader.buffer_position()
    }

    fn parse_step(&mut self) -> Result<(), RdfXmlParseError> {
        self.reader_buffer.clear();
        let event = match self.parser.reader.read_event_into(&mut self.reader_buffer) {
            Ok(event) => event,
            Err(e) => return Err(self.parser.locate(e.into())),
        };
        self.parser.parse_event(event, &mut self.results)
    }
}

/// Iterator on the file prefixes.
///
/// See [`ReaderRdfXmlParser::prefixes`].
pub struct RdfXmlPrefixesIter<'a> {
    inner: std::vec::IntoIter<(&'a str, &'a str)>,
}

impl<'a> Iterator for RdfXmlPrefixesIter<'a> {
    type Item = (&'a str, &'a str);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

const RDF_ABOUT: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#about";
const RDF_ABOUT_EACH: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#aboutEach";
const RDF_ABOUT_EACH_PREFIX: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#aboutEachPrefix";
const RDF_BAG_ID: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#bagID";
const RDF_DATATYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#datatype";
const RDF_DESCRIPTION: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#Description";
const RDF_ID: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#ID";
const RDF_LI: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#li";
const RDF_NODE_ID: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#nodeID";
const RDF_PARSE_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#parseType";
const RDF_RDF: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#RDF";
const RDF_RESOURCE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#resource";

const RESERVED_RDF_ELEMENTS: [&str; 11] = [
    RDF_ABOUT,
    RDF_ABOUT_EACH,
    RDF_ABOUT_EACH_PREFIX,
    RDF_BAG_ID,
    RDF_DATATYPE,
    RDF_ID,
    RDF_LI,
    RDF_NODE_ID,
    RDF_PARSE_TYPE,
    RDF_RDF,
    RDF_RESOURCE,
];
const UNSUPPORTED_RDF_ATTRIBUTES: [&str; 4] = [
    RDF_ABOUT_EACH,
    RDF_ABOUT_EACH_PREFIX,
    RDF_BAG_ID,
    RDF_LI,
];

#[derive(Clone, Debug)]
enum NodeOrText {
    Node(Subject),
    Text(String),
}

enum RdfXmlState {
    Doc {
        base_iri: Option<Iri<String>>,
    },
    Rdf {
        base_iri: Option<Iri<String>>,
        language: Option<String>,
    },
    NodeElt {
        base_iri: Option<Iri<String>>,
        language: Option<String>,
        subject: Subject,
        li_counter: u64,
    },
    PropertyElt {
        // Resource, Literal or Empty property element
        predicate: NamedNode,
        base_iri: Option<Iri<String>>,
        language: Option<String>,
        subject: Subject,
        object: Option<NodeOrText>,
        // property attributes waiting for the object to be known
        sub_properties: Vec<(NamedNode, Term)>,
        id_attr: Option<NamedNode>,
        datatype_attr: Option<NamedNode>,
        emitted: bool,
    },
    ParseTypeCollectionPropertyElt {
        // rolling tail of the list: starts at (subject, predicate) and moves
        // to (previous cons cell, rdf:rest) as members are read
        predicate: NamedNode,
        base_iri: Option<Iri<String>>,
        language: Option<String>,
        subject: Subject,
        id_attr: Option<NamedNode>,
    },
    ParseTypeLiteralPropertyElt {
        predicate: NamedNode,
        base_iri: Option<Iri<String>>,
        language: Option<String>,
        subject: Subject,
        writer: Writer<Vec<u8>>,
        id_attr: Option<NamedNode>,
    },
}

impl RdfXmlState {
    fn base_iri(&self) -> Option<&Iri<String>> {
        match self {
            Self::Doc { base_iri }
            | Self::Rdf { base_iri, .. }
            | Self::NodeElt { base_iri, .. }
            | Self::PropertyElt { base_iri, .. }
            | Self::ParseTypeCollectionPropertyElt { base_iri, .. }
            | Self::ParseTypeLiteralPropertyElt { base_iri, .. } => base_iri.as_ref(),
        }
    }

    fn language(&self) -> Option<&str> {
        match self {
            Self::Doc { .. } => None,
            Self::Rdf { language, .. }
            | Self::NodeElt { language, .. }
            | Self::PropertyElt { language, .. }
            | Self::ParseTypeCollectionPropertyElt { language, .. }
            | Self::ParseTypeLiteralPropertyElt { language, .. } => language.as_deref(),
        }
    }
}

#[derive(Default)]
struct BlankNodeIdGenerator {
    counter: u64,
}

impl BlankNodeIdGenerator {
    fn generate(&mut self) -> BlankNode {
        self.counter += 1;
        BlankNode::new_unchecked(format!("qx{}", self.counter))
    }
}

struct InternalRdfXmlParser<R> {
    reader: Reader<PositionedReader<R>>,
    state: Vec<RdfXmlState>,
    namespaces: NamespaceStack,
    custom_entities: HashMap<String, String>,
    in_literal_depth: usize,
    known_rdf_id: HashSet<String>,
    bnode_id_generator: BlankNodeIdGenerator,
    is_end: bool,
    default_graph: GraphName,
    lenient: bool,
    track_position: bool,
    allow_duplicate_rdf_ids: bool,
}

impl<R: BufRead> InternalRdfXmlParser<R> {
    fn parse_event(
        &mut self,
        event: Event<'_>,
        results: &mut VecDeque<Quad>,
    ) -> Result<(), RdfXmlParseError> {
        let result = match event {
            Event::Start(event) => self.parse_start_event(&event, results),
            Event::End(event) => self.parse_end_event(&event, results),
            Event::Empty(_) => Err(RdfXmlSyntaxError::msg(
                "The expand_empty_elements option must be enabled",
            )
            .into()),
            Event::Text(event) => self.parse_text_event(&event),
            Event::CData(event) => match event.escape() {
                Ok(event) => self.parse_text_event(&event),
                Err(e) => Err(e.into()),
            },
            Event::Comment(_) | Event::PI(_) => Ok(()),
            Event::Decl(decl) => match decl.encoding() {
                Some(Ok(encoding)) if !is_utf8(&encoding) => Err(RdfXmlSyntaxError::msg(
                    "Only UTF-8 is supported by the RDF/XML parser",
                )
                .into()),
                Some(Err(e)) => Err(e.into()),
                _ => Ok(()),
            },
            Event::DocType(dt) => self.parse_doctype(&dt),
            Event::Eof => {
                self.is_end = true;
                Ok(())
            }
        };
        result.map_err(|e| self.locate(e))
    }

    fn locate(&self, error: RdfXmlParseError) -> RdfXmlParseError {
        if !self.track_position {
            return error;
        }
        match error {
            RdfXmlParseError::Syntax(e) => {
                RdfXmlParseError::Syntax(e.with_position(self.reader.get_ref().position()))
            }
            error => error,
        }
    }

    fn parse_doctype(&mut self, dt: &BytesText<'_>) -> Result<(), RdfXmlParseError> {
        // we extract entities
        for input in self
            .reader
            .decoder()
            .decode(dt.as_ref())?
            .split('<')
            .skip(1)
        {
            let Some(input) = input.strip_prefix("!ENTITY") else {
                continue;
            };
            let input = input.trim_start();
            let input = input.strip_prefix('%').map_or(input, str::trim_start);
            let Some((entity_name, input)) =
                input.split_once(|c: char| c.is_ascii_whitespace())
            else {
                return Err(RdfXmlSyntaxError::msg(
                    "<!ENTITY declarations should contain both an entity name and an entity value",
                )
                .into());
            };
            let input = input.trim_start();
            let mut after_quote = input.chars();
            let quote = match after_quote.next() {
                Some(quote @ ('"' | '\'')) => quote,
                _ => {
                    return Err(RdfXmlSyntaxError::msg(
                        "<!ENTITY values should be enclosed in single or double quotes",
                    )
                    .into());
                }
            };
            let Some((entity_value, input)) = after_quote.as_str().split_once(quote) else {
                return Err(RdfXmlSyntaxError::msg(
                    "<!ENTITY values should be enclosed in single or double quotes",
                )
                .into());
            };
            if input.trim_start().strip_prefix('>').is_none() {
                return Err(
                    RdfXmlSyntaxError::msg("<!ENTITY declarations should end with >").into(),
                );
            }

            // entity references inside the value are resolved against the entities declared so far
            let entity_value =
                unescape_with(entity_value, |e| self.resolve_entity(e)).map_err(Error::from)?;
            self.custom_entities
                .insert(entity_name.to_owned(), entity_value.to_string());
        }
        Ok(())
    }

    fn parse_start_event(
        &mut self,
        event: &BytesStart<'_>,
        results: &mut VecDeque<Quad>,
    ) -> Result<(), RdfXmlParseError> {
        #[derive(PartialEq, Eq)]
        enum RdfXmlParseType {
            Default,
            Collection,
            Literal,
            Resource,
            Other,
        }

        enum RdfXmlNextProduction {
            Rdf,
            NodeElt,
            PropertyElt { subject: Subject },
        }

        // Literal case: the element is captured verbatim, not interpreted
        if let Some(RdfXmlState::ParseTypeLiteralPropertyElt { writer, .. }) = self.state.last_mut()
        {
            let mut clean_event = BytesStart::new(
                self.reader
                    .decoder()
                    .decode(event.name().as_ref())?
                    .to_string(),
            );
            for attribute in event.attributes() {
                clean_event.push_attribute(attribute.map_err(Error::InvalidAttr)?);
            }
            writer.write_event(Event::Start(clean_event))?;
            self.in_literal_depth += 1;
            return Ok(());
        }

        // The element's own xmlns declarations are visible on its name and attributes,
        // so they are collected before anything is expanded
        let mut declarations = Vec::new();
        for attribute in event.attributes() {
            let attribute = attribute.map_err(Error::InvalidAttr)?;
            if attribute.key.as_ref() == b"xmlns" {
                declarations.push((String::new(), self.convert_attribute(&attribute)?));
            } else if let Some(prefix) = attribute.key.as_ref().strip_prefix(b"xmlns:") {
                declarations.push((
                    self.reader.decoder().decode(prefix)?.to_string(),
                    self.convert_attribute(&attribute)?,
                ));
            }
        }
        if !declarations.is_empty() {
            self.namespaces.declare(self.state.len(), declarations);
        }

        let tag_name = self.expand_name(event.name().as_ref())?.into_iri();

        // We read attributes, inheriting the enclosing language and base IRI
        let (mut language, mut base_iri) = match self.state.last() {
            Some(state) => (
                state.language().map(ToOwned::to_owned),
                state.base_iri().cloned(),
            ),
            None => (None, None),
        };

        let mut id_attr = None;
        let mut node_id_attr = None;
        let mut node_id_position = usize::MAX;
        let mut about_attr = None;
        let mut property_attrs = Vec::default();
        let mut first_property_attr_position = usize::MAX;
        let mut resource_attr = None;
        let mut datatype_attr = None;
        let mut parse_type = RdfXmlParseType::Default;
        let mut type_attr = None;

        for (position, attribute) in event.attributes().enumerate() {
            let attribute = attribute.map_err(Error::InvalidAttr)?;
            if attribute.key.as_ref().starts_with(b"xml") {
                if attribute.key.as_ref() == b"xml:lang" {
                    let tag = self.convert_attribute(&attribute)?.to_ascii_lowercase();
                    language = if tag.is_empty() {
                        None // xml:lang="" removes the inherited language
                    } else if self.lenient {
                        Some(tag)
                    } else {
                        Some(
                            LanguageTag::parse(tag.clone())
                                .map_err(|error| {
                                    RdfXmlSyntaxError::invalid_language_tag(tag, error)
                                })?
                                .into_inner(),
                        )
                    };
                } else if attribute.key.as_ref() == b"xml:base" {
                    let iri = self.convert_attribute(&attribute)?;
                    base_iri = Some(self.resolve_base(base_iri.as_ref(), iri)?);
                } else {
                    // We ignore other xml attributes, including xmlns declarations
                }
            } else {
                let expanded = self.expand_name(attribute.key.as_ref())?;
                if expanded.uri().is_empty() {
                    // attributes outside of any namespace carry no RDF meaning
                    continue;
                }
                let attribute_url = expanded.into_iri();
                if attribute_url == RDF_ID {
                    let mut id = self.convert_attribute(&attribute)?;
                    if !self.lenient && !is_nc_name(&id) {
                        return Err(RdfXmlSyntaxError::invalid_nc_name(id).into());
                    }
                    id.insert(0, '#');
                    id_attr = Some(id);
                } else if attribute_url == RDF_NODE_ID {
                    let id = self.convert_attribute(&attribute)?;
                    if !self.lenient && !is_nc_name(&id) {
                        return Err(RdfXmlSyntaxError::invalid_nc_name(id).into());
                    }
                    node_id_attr = Some(BlankNode::new_unchecked(id));
                    node_id_position = position;
                } else if attribute_url == RDF_ABOUT {
                    about_attr = Some(attribute);
                } else if attribute_url == RDF_RESOURCE {
                    resource_attr = Some(attribute);
                } else if attribute_url == RDF_DATATYPE {
                    datatype_attr = Some(attribute);
                } else if attribute_url == RDF_PARSE_TYPE {
                    parse_type = match attribute.value.as_ref() {
                        b"Collection" => RdfXmlParseType::Collection,
                        b"Literal" => RdfXmlParseType::Literal,
                        b"Resource" => RdfXmlParseType::Resource,
                        _ => RdfXmlParseType::Other,
                    };
                } else if attribute_url == rdf::TYPE.as_str() {
                    type_attr = Some(attribute);
                } else if UNSUPPORTED_RDF_ATTRIBUTES.contains(&attribute_url.as_str()) {
                    return Err(RdfXmlSyntaxError::unsupported_feature(format!(
                        "the {attribute_url} attribute"
                    ))
                    .into());
                } else if attribute_url == RDF_RDF {
                    return Err(RdfXmlSyntaxError::msg(format!(
                        "{attribute_url} is not a valid attribute"
                    ))
                    .into());
                } else {
                    if first_property_attr_position == usize::MAX {
                        first_property_attr_position = position;
                    }
                    property_attrs.push((
                        self.parse_iri(attribute_url)?,
                        self.convert_attribute(&attribute)?,
                    ));
                }
            }
        }

        // Parsing with the base URI
        let id_attr = match id_attr {
            Some(iri) => {
                let iri = self.resolve_iri(base_iri.as_ref(), iri)?;
                if !self.lenient
                    && !self.allow_duplicate_rdf_ids
                    && !self.known_rdf_id.insert(iri.as_str().into())
                {
                    return Err(RdfXmlSyntaxError::duplicate_rdf_id(iri.as_str()).into());
                }
                Some(iri)
            }
            None => None,
        };
        let about_attr = match about_attr {
            Some(attr) => Some(self.convert_iri_attribute(base_iri.as_ref(), &attr)?),
            None => None,
        };
        let resource_attr = match resource_attr {
            Some(attr) => Some(self.convert_iri_attribute(base_iri.as_ref(), &attr)?),
            None => None,
        };
        let datatype_attr = match datatype_attr {
            Some(attr) => Some(self.convert_iri_attribute(base_iri.as_ref(), &attr)?),
            None => None,
        };
        let type_attr = match type_attr {
            Some(attr) => Some(self.convert_iri_attribute(base_iri.as_ref(), &attr)?),
            None => None,
        };

        let expected_production = match self.state.last() {
            Some(RdfXmlState::Doc { .. }) => RdfXmlNextProduction::Rdf,
            Some(
                RdfXmlState::Rdf { .. }
                | RdfXmlState::PropertyElt { .. }
                | RdfXmlState::ParseTypeCollectionPropertyElt { .. },
            ) => RdfXmlNextProduction::NodeElt,
            Some(RdfXmlState::NodeElt { subject, .. }) => RdfXmlNextProduction::PropertyElt {
                subject: subject.clone(),
            },
            Some(RdfXmlState::ParseTypeLiteralPropertyElt { .. }) => {
                return Err(RdfXmlSyntaxError::msg(
                    "parseType=\"Literal\" content should never be interpreted as RDF/XML",
                )
                .into());
            }
            None => {
                return Err(RdfXmlSyntaxError::msg(
                    "No state in the stack: the XML is not balanced",
                )
                .into());
            }
        };

        let new_state = match expected_production {
            RdfXmlNextProduction::Rdf => {
                if tag_name == RDF_RDF {
                    RdfXmlState::Rdf { base_iri, language }
                } else if RESERVED_RDF_ELEMENTS.contains(&tag_name.as_str()) {
                    return Err(RdfXmlSyntaxError::msg(format!(
                        "Invalid node element tag name: {tag_name}"
                    ))
                    .into());
                } else {
                    self.build_node_elt(
                        self.parse_iri(tag_name)?,
                        base_iri,
                        language,
                        id_attr,
                        node_id_attr,
                        about_attr,
                        type_attr,
                        datatype_attr,
                        property_attrs,
                        results,
                    )?
                }
            }
            RdfXmlNextProduction::NodeElt => {
                if RESERVED_RDF_ELEMENTS.contains(&tag_name.as_str()) {
                    return Err(RdfXmlSyntaxError::msg(format!(
                        "Invalid node element tag name: {tag_name}"
                    ))
                    .into());
                }
                self.build_node_elt(
                    self.parse_iri(tag_name)?,
                    base_iri,
                    language,
                    id_attr,
                    node_id_attr,
                    about_attr,
                    type_attr,
                    datatype_attr,
                    property_attrs,
                    results,
                )?
            }
            RdfXmlNextProduction::PropertyElt { subject } => {
                let predicate = if tag_name == RDF_LI {
                    let Some(RdfXmlState::NodeElt { li_counter, .. }) = self.state.last_mut()
                    else {
                        return Err(RdfXmlSyntaxError::msg(format!(
                            "Invalid property element tag name: {tag_name}"
                        ))
                        .into());
                    };
                    *li_counter += 1;
                    NamedNode::new_unchecked(format!(
                        "http://www.w3.org/1999/02/22-rdf-syntax-ns#_{li_counter}"
                    ))
                } else if RESERVED_RDF_ELEMENTS.contains(&tag_name.as_str())
                    || tag_name == RDF_DESCRIPTION
                {
                    return Err(RdfXmlSyntaxError::msg(format!(
                        "Invalid property element tag name: {tag_name}"
                    ))
                    .into());
                } else {
                    self.parse_iri(tag_name)?
                };

                // mutually exclusive attribute combinations of the emptyPropertyElt production
                if parse_type != RdfXmlParseType::Default {
                    if resource_attr.is_some() {
                        return Err(RdfXmlSyntaxError::conflicting_attributes(
                            "rdf:parseType",
                            "rdf:resource",
                        )
                        .into());
                    }
                    if node_id_attr.is_some() {
                        return Err(RdfXmlSyntaxError::conflicting_attributes(
                            "rdf:parseType",
                            "rdf:nodeID",
                        )
                        .into());
                    }
                    if datatype_attr.is_some() {
                        return Err(RdfXmlSyntaxError::conflicting_attributes(
                            "rdf:parseType",
                            "rdf:datatype",
                        )
                        .into());
                    }
                    if !property_attrs.is_empty() {
                        return Err(RdfXmlSyntaxError::conflicting_attributes(
                            "rdf:parseType",
                            "property attributes",
                        )
                        .into());
                    }
                }
                if datatype_attr.is_some() && !property_attrs.is_empty() {
                    return Err(RdfXmlSyntaxError::conflicting_attributes(
                        "rdf:datatype",
                        "property attributes",
                    )
                    .into());
                }
                if node_id_attr.is_some() && first_property_attr_position < node_id_position {
                    return Err(RdfXmlSyntaxError::conflicting_attributes(
                        "property attributes",
                        "rdf:nodeID",
                    )
                    .into());
                }

                match parse_type {
                    RdfXmlParseType::Default | RdfXmlParseType::Other => {
                        let graph = self.default_graph.clone();
                        let mut sub_properties: Vec<(NamedNode, Term)> = property_attrs
                            .into_iter()
                            .map(|(p, value)| {
                                let object: Term = if let Some(language) = &language {
                                    Literal::new_language_tagged_literal_unchecked(
                                        value,
                                        language.clone(),
                                    )
                                } else {
                                    Literal::new_simple_literal(value)
                                }
                                .into();
                                (p, object)
                            })
                            .collect();
                        if let Some(type_attr) = type_attr {
                            sub_properties.push((rdf::TYPE.into(), type_attr.into()));
                        }
                        let object: Option<Subject> = match (resource_attr, node_id_attr) {
                            (Some(resource_attr), None) => Some(resource_attr.into()),
                            (None, Some(node_id_attr)) => Some(node_id_attr.into()),
                            (None, None) => None,
                            (Some(_), Some(_)) => {
                                return Err(RdfXmlSyntaxError::conflicting_attributes(
                                    "rdf:resource",
                                    "rdf:nodeID",
                                )
                                .into());
                            }
                        };
                        if let Some(object) = object {
                            // the object is already known: the triple is emitted
                            // right away and the pending pairs attach to it
                            let quad = Quad::new(
                                subject.clone(),
                                predicate.clone(),
                                object.clone(),
                                graph.clone(),
                            );
                            if let Some(id_attr) = &id_attr {
                                Self::reify(&quad, id_attr.clone(), &graph, results);
                            }
                            results.push_back(quad);
                            for (p, o) in sub_properties.drain(..) {
                                results.push_back(Quad::new(object.clone(), p, o, graph.clone()));
                            }
                            RdfXmlState::PropertyElt {
                                predicate,
                                base_iri,
                                language,
                                subject,
                                object: Some(NodeOrText::Node(object)),
                                sub_properties,
                                id_attr,
                                datatype_attr,
                                emitted: true,
                            }
                        } else {
                            RdfXmlState::PropertyElt {
                                predicate,
                                base_iri,
                                language,
                                subject,
                                object: None,
                                sub_properties,
                                id_attr,
                                datatype_attr,
                                emitted: false,
                            }
                        }
                    }
                    RdfXmlParseType::Literal => RdfXmlState::ParseTypeLiteralPropertyElt {
                        predicate,
                        base_iri,
                        language,
                        subject,
                        writer: Writer::new(Vec::default()),
                        id_attr,
                    },
                    RdfXmlParseType::Resource => self.build_parse_type_resource_property_elt(
                        predicate, base_iri, language, subject, id_attr, results,
                    ),
                    RdfXmlParseType::Collection => RdfXmlState::ParseTypeCollectionPropertyElt {
                        predicate,
                        base_iri,
                        language,
                        subject,
                        id_attr,
                    },
                }
            }
        };
        self.state.push(new_state);
        Ok(())
    }

    fn parse_end_event(
        &mut self,
        event: &BytesEnd<'_>,
        results: &mut VecDeque<Quad>,
    ) -> Result<(), RdfXmlParseError> {
        // Literal case
        if self.in_literal_depth > 0 {
            if let Some(RdfXmlState::ParseTypeLiteralPropertyElt { writer, .. }) =
                self.state.last_mut()
            {
                writer.write_event(Event::End(BytesEnd::new(
                    self.reader.decoder().decode(event.name().as_ref())?,
                )))?;
                self.in_literal_depth -= 1;
                return Ok(());
            }
        }

        if let Some(current_state) = self.state.pop() {
            self.end_state(current_state, results)?;
        }
        self.namespaces.leave(self.state.len());
        Ok(())
    }

    fn parse_text_event(&mut self, event: &BytesText<'_>) -> Result<(), RdfXmlParseError> {
        let text = event.unescape_with(|e| self.resolve_entity(e))?.to_string();
        match self.state.last_mut() {
            Some(RdfXmlState::PropertyElt { object, .. }) => {
                match object {
                    // a resource object wins over surrounding character data
                    Some(NodeOrText::Node(_)) => (),
                    Some(NodeOrText::Text(existing)) => existing.push_str(&text),
                    None => *object = Some(NodeOrText::Text(text)),
                }
                Ok(())
            }
            Some(RdfXmlState::ParseTypeLiteralPropertyElt { writer, .. }) => {
                writer.write_event(Event::Text(BytesText::new(&text)))?;
                Ok(())
            }
            // character data outside of property elements does not contribute to the graph
            _ => Ok(()),
        }
    }

    fn expand_name(&self, qname: &[u8]) -> Result<ExpandedName, RdfXmlParseError> {
        let name = self.reader.decoder().decode(qname)?;
        let name = unescape_with(&name, |e| self.resolve_entity(e)).map_err(Error::from)?;
        Ok(self.namespaces.expand(&name)?)
    }

    #[allow(clippy::too_many_arguments)]
    fn build_node_elt(
        &mut self,
        iri: NamedNode,
        base_iri: Option<Iri<String>>,
        language: Option<String>,
        id_attr: Option<NamedNode>,
        node_id_attr: Option<BlankNode>,
        about_attr: Option<NamedNode>,
        type_attr: Option<NamedNode>,
        datatype_attr: Option<NamedNode>,
        property_attrs: Vec<(NamedNode, String)>,
        results: &mut VecDeque<Quad>,
    ) -> Result<RdfXmlState, RdfXmlSyntaxError> {
        let graph = self.default_graph.clone();
        let subject: Subject = match (id_attr, node_id_attr, about_attr) {
            (Some(id_attr), None, None) => id_attr.into(),
            (None, Some(node_id_attr), None) => node_id_attr.into(),
            (None, None, Some(about_attr)) => about_attr.into(),
            (None, None, None) => self.bnode_id_generator.generate().into(),
            (Some(_), Some(_), _) => {
                return Err(RdfXmlSyntaxError::conflicting_attributes(
                    "rdf:ID",
                    "rdf:nodeID",
                ));
            }
            (_, Some(_), Some(_)) => {
                return Err(RdfXmlSyntaxError::conflicting_attributes(
                    "rdf:nodeID",
                    "rdf:about",
                ));
            }
            (Some(_), _, Some(_)) => {
                return Err(RdfXmlSyntaxError::conflicting_attributes(
                    "rdf:ID",
                    "rdf:about",
                ));
            }
        };

        let parent_id = match self.state.last() {
            Some(
                RdfXmlState::PropertyElt { id_attr, .. }
                | RdfXmlState::ParseTypeCollectionPropertyElt { id_attr, .. },
            ) => id_attr.clone(),
            _ => None,
        };

        // a typed node element asserts its type itself
        if iri != *RDF_DESCRIPTION {
            let quad = Quad::new(subject.clone(), rdf::TYPE, iri, graph.clone());
            if let Some(parent_id) = &parent_id {
                Self::reify(&quad, parent_id.clone(), &graph, results);
            }
            results.push_back(quad);
        }

        // attach this node to the enclosing property element
        match self.state.last_mut() {
            Some(RdfXmlState::PropertyElt {
                subject: parent_subject,
                predicate,
                object,
                sub_properties,
                emitted,
                ..
            }) => {
                let quad = Quad::new(
                    parent_subject.clone(),
                    predicate.clone(),
                    subject.clone(),
                    graph.clone(),
                );
                if let Some(parent_id) = &parent_id {
                    Self::reify(&quad, parent_id.clone(), &graph, results);
                }
                results.push_back(quad);
                for (p, o) in sub_properties.drain(..) {
                    results.push_back(Quad::new(subject.clone(), p, o, graph.clone()));
                }
                *object = Some(NodeOrText::Node(subject.clone()));
                *emitted = true;
            }
            Some(RdfXmlState::ParseTypeCollectionPropertyElt {
                subject: tail_subject,
                predicate: tail_predicate,
                ..
            }) => {
                let cell: Subject = self.bnode_id_generator.generate().into();
                let quad = Quad::new(
                    tail_subject.clone(),
                    tail_predicate.clone(),
                    cell.clone(),
                    graph.clone(),
                );
                if let Some(parent_id) = &parent_id {
                    Self::reify(&quad, parent_id.clone(), &graph, results);
                }
                results.push_back(quad);
                results.push_back(Quad::new(
                    cell.clone(),
                    rdf::FIRST,
                    subject.clone(),
                    graph.clone(),
                ));
                *tail_subject = cell;
                *tail_predicate = rdf::REST.into();
            }
            _ => (),
        }

        for (predicate, value) in property_attrs {
            let object: Term = if let Some(datatype) = &datatype_attr {
                Literal::new_typed_literal(value, datatype.clone())
            } else if let Some(language) = &language {
                Literal::new_language_tagged_literal_unchecked(value, language.clone())
            } else {
                Literal::new_simple_literal(value)
            }
            .into();
            results.push_back(Quad::new(subject.clone(), predicate, object, graph.clone()));
        }

        if let Some(type_attr) = type_attr {
            results.push_back(Quad::new(
                subject.clone(),
                rdf::TYPE,
                type_attr,
                graph.clone(),
            ));
        }

        Ok(RdfXmlState::NodeElt {
            base_iri,
            language,
            subject,
            li_counter: 0,
        })
    }

    fn build_parse_type_resource_property_elt(
        &mut self,
        predicate: NamedNode,
        base_iri: Option<Iri<String>>,
        language: Option<String>,
        subject: Subject,
        id_attr: Option<NamedNode>,
        results: &mut VecDeque<Quad>,
    ) -> RdfXmlState {
        let object = self.bnode_id_generator.generate();
        let quad = Quad::new(
            subject,
            predicate,
            object.clone(),
            self.default_graph.clone(),
        );
        if let Some(id_attr) = id_attr {
            Self::reify(&quad, id_attr, &self.default_graph, results);
        }
        results.push_back(quad);
        // the frame now behaves like a node element for its children
        RdfXmlState::NodeElt {
            base_iri,
            language,
            subject: object.into(),
            li_counter: 0,
        }
    }

    fn end_state(
        &mut self,
        state: RdfXmlState,
        results: &mut VecDeque<Quad>,
    ) -> Result<(), RdfXmlSyntaxError> {
        let graph = self.default_graph.clone();
        match state {
            RdfXmlState::PropertyElt {
                predicate,
                language,
                subject,
                object,
                sub_properties,
                id_attr,
                datatype_attr,
                emitted,
                ..
            } => {
                let had_children =
                    matches!(object, Some(NodeOrText::Node(_))) || !sub_properties.is_empty();
                if !had_children {
                    let text = match object {
                        Some(NodeOrText::Text(text)) => text,
                        _ => String::new(),
                    };
                    let literal = if let Some(datatype) = datatype_attr {
                        Literal::new_typed_literal(text, datatype)
                    } else if let Some(language) = language {
                        Literal::new_language_tagged_literal_unchecked(text, language)
                    } else {
                        Literal::new_simple_literal(text)
                    };
                    let quad = Quad::new(subject, predicate, literal, graph.clone());
                    if let Some(id_attr) = id_attr {
                        Self::reify(&quad, id_attr, &graph, results);
                    }
                    results.push_back(quad);
                } else if !emitted {
                    // property attributes without an explicit object: the blank
                    // object is only minted once the element closes
                    let object = self.bnode_id_generator.generate();
                    let quad = Quad::new(subject, predicate, object.clone(), graph.clone());
                    if let Some(id_attr) = id_attr {
                        Self::reify(&quad, id_attr, &graph, results);
                    }
                    results.push_back(quad);
                    for (p, o) in sub_properties {
                        results.push_back(Quad::new(object.clone(), p, o, graph.clone()));
                    }
                }
            }
            RdfXmlState::ParseTypeCollectionPropertyElt {
                predicate,
                subject,
                id_attr,
                ..
            } => {
                let quad = Quad::new(subject, predicate, rdf::NIL, graph.clone());
                if let Some(id_attr) = id_attr {
                    Self::reify(&quad, id_attr, &graph, results);
                }
                results.push_back(quad);
            }
            RdfXmlState::ParseTypeLiteralPropertyElt {
                predicate,
                subject,
                id_attr,
                writer,
                ..
            } => {
                let buffer = writer.into_inner();
                let literal = Literal::new_typed_literal(
                    str::from_utf8(&buffer).map_err(|_| {
                        RdfXmlSyntaxError::msg("The XML literal is not in valid UTF-8")
                    })?,
                    rdf::XML_LITERAL,
                );
                let quad = Quad::new(subject, predicate, literal, graph.clone());
                if let Some(id_attr) = id_attr {
                    Self::reify(&quad, id_attr, &graph, results);
                }
                results.push_back(quad);
            }
            RdfXmlState::Doc { .. } | RdfXmlState::Rdf { .. } | RdfXmlState::NodeElt { .. } => (),
        }
        Ok(())
    }

    fn reify(quad: &Quad, statement_id: NamedNode, graph: &GraphName, results: &mut VecDeque<Quad>) {
        results.push_back(Quad::new(
            statement_id.clone(),
            rdf::TYPE,
            rdf::STATEMENT,
            graph.clone(),
        ));
        results.push_back(Quad::new(
            statement_id.clone(),
            rdf::SUBJECT,
            quad.subject.clone(),
            graph.clone(),
        ));
        results.push_back(Quad::new(
            statement_id.clone(),
            rdf::PREDICATE,
            quad.predicate.clone(),
            graph.clone(),
        ));
        results.push_back(Quad::new(
            statement_id,
            rdf::OBJECT,
            quad.object.clone(),
            graph.clone(),
        ));
    }

    fn convert_attribute(&self, attribute: &Attribute<'_>) -> Result<String, RdfXmlParseError> {
        Ok(attribute
            .decode_and_unescape_value_with(self.reader.decoder(), |e| self.resolve_entity(e))?
            .into_owned())
    }

    fn convert_iri_attribute(
        &self,
        base_iri: Option<&Iri<String>>,
        attribute: &Attribute<'_>,
    ) -> Result<NamedNode, RdfXmlParseError> {
        Ok(self.resolve_iri(base_iri, self.convert_attribute(attribute)?)?)
    }

    fn resolve_iri(
        &self,
        base_iri: Option<&Iri<String>>,
        relative_iri: String,
    ) -> Result<NamedNode, RdfXmlSyntaxError> {
        if let Some(base_iri) = base_iri {
            Ok(NamedNode::new_unchecked(
                if self.lenient {
                    base_iri.resolve_unchecked(&relative_iri)
                } else {
                    base_iri
                        .resolve(&relative_iri)
                        .map_err(|error| RdfXmlSyntaxError::invalid_iri(relative_iri, error))?
                }
                .into_inner(),
            ))
        } else {
            self.parse_iri(relative_iri)
        }
    }

    fn parse_iri(&self, relative_iri: String) -> Result<NamedNode, RdfXmlSyntaxError> {
        Ok(NamedNode::new_unchecked(if self.lenient {
            relative_iri
        } else {
            Iri::parse(relative_iri.clone())
                .map_err(|error| RdfXmlSyntaxError::invalid_iri(relative_iri, error))?
                .into_inner()
        }))
    }

    fn resolve_base(
        &self,
        base_iri: Option<&Iri<String>>,
        iri: String,
    ) -> Result<Iri<String>, RdfXmlSyntaxError> {
        if self.lenient {
            Ok(match base_iri {
                Some(base_iri) => base_iri.resolve_unchecked(&iri),
                None => Iri::parse_unchecked(iri),
            })
        } else {
            match base_iri {
                Some(base_iri) => base_iri
                    .resolve(&iri)
                    .map_err(|error| RdfXmlSyntaxError::invalid_iri(iri, error)),
                None => Iri::parse(iri.clone())
                    .map_err(|error| RdfXmlSyntaxError::invalid_iri(iri, error)),
            }
        }
    }

    fn current_base_iri(&self) -> Option<&Iri<String>> {
        self.state.last().and_then(RdfXmlState::base_iri)
    }

    fn resolve_entity(&self, name: &str) -> Option<&str> {
        match name {
            "lt" => Some("<"),
            "gt" => Some(">"),
            "amp" => Some("&"),
            "apos" => Some("'"),
            "quot" => Some("\""),
            _ => self.custom_entities.get(name).map(String::as_str),
        }
    }
}
