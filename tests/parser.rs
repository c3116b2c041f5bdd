use oxrdf::vocab::rdf;
use oxrdf::{BlankNode, GraphName, Literal, NamedNode, Quad, Subject, Term};
use quadxml::{RdfXmlParser, RdfXmlSyntaxError};
use std::io::{self, Read};

const RDF_XMLNS: &str = r#"xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#""#;
const EX_XMLNS: &str = r#"xmlns:ex="http://example.com/""#;

fn parse(file: &str) -> Vec<Quad> {
    RdfXmlParser::new()
        .for_slice(file)
        .collect::<Result<Vec<_>, _>>()
        .unwrap()
}

fn parse_with_base(file: &str, base: &str) -> Vec<Quad> {
    RdfXmlParser::new()
        .with_base_iri(base)
        .unwrap()
        .for_slice(file)
        .collect::<Result<Vec<_>, _>>()
        .unwrap()
}

fn parse_err(file: &str) -> RdfXmlSyntaxError {
    RdfXmlParser::new()
        .for_slice(file)
        .collect::<Result<Vec<_>, _>>()
        .unwrap_err()
}

fn named(iri: &str) -> NamedNode {
    NamedNode::new_unchecked(iri)
}

fn blank(id: &str) -> BlankNode {
    BlankNode::new_unchecked(id)
}

fn quad(subject: impl Into<Subject>, predicate: impl Into<NamedNode>, object: impl Into<Term>) -> Quad {
    Quad::new(subject, predicate, object, GraphName::DefaultGraph)
}

#[test]
fn typed_node_element() {
    let quads = parse(&format!(
        r#"<rdf:RDF {RDF_XMLNS} {EX_XMLNS}><ex:Thing rdf:about="http://example.com/a"/></rdf:RDF>"#
    ));
    assert_eq!(
        quads,
        [quad(
            named("http://example.com/a"),
            rdf::TYPE,
            named("http://example.com/Thing")
        )]
    );
}

#[test]
fn node_element_at_the_document_root() {
    let quads = parse(&format!(
        r#"<ex:Thing {RDF_XMLNS} {EX_XMLNS} rdf:about="http://example.com/a"/>"#
    ));
    assert_eq!(
        quads,
        [quad(
            named("http://example.com/a"),
            rdf::TYPE,
            named("http://example.com/Thing")
        )]
    );
}

#[test]
fn property_element_with_language_literal() {
    let quads = parse(&format!(
        r#"<rdf:RDF {RDF_XMLNS} {EX_XMLNS}><rdf:Description rdf:about="http://example.com/a"><ex:name xml:lang="EN">Alice</ex:name></rdf:Description></rdf:RDF>"#
    ));
    assert_eq!(
        quads,
        [quad(
            named("http://example.com/a"),
            named("http://example.com/name"),
            Literal::new_language_tagged_literal_unchecked("Alice", "en")
        )]
    );
}

#[test]
fn parse_type_collection() {
    let quads = parse(&format!(
        r#"<rdf:RDF {RDF_XMLNS} {EX_XMLNS}><rdf:Description rdf:about="http://example.com/s"><ex:items rdf:parseType="Collection"><rdf:Description rdf:about="http://example.com/1"/><rdf:Description rdf:about="http://example.com/2"/></ex:items></rdf:Description></rdf:RDF>"#
    ));
    let s = named("http://example.com/s");
    let items = named("http://example.com/items");
    let c1 = blank("qx1");
    let c2 = blank("qx2");
    assert_eq!(
        quads,
        [
            quad(s, items, c1.clone()),
            quad(c1.clone(), rdf::FIRST, named("http://example.com/1")),
            quad(c1, rdf::REST, c2.clone()),
            quad(c2.clone(), rdf::FIRST, named("http://example.com/2")),
            quad(c2, rdf::REST, rdf::NIL),
        ]
    );
}

#[test]
fn empty_parse_type_collection() {
    let quads = parse(&format!(
        r#"<rdf:RDF {RDF_XMLNS} {EX_XMLNS}><rdf:Description rdf:about="http://example.com/s"><ex:items rdf:parseType="Collection"/></rdf:Description></rdf:RDF>"#
    ));
    assert_eq!(
        quads,
        [quad(
            named("http://example.com/s"),
            named("http://example.com/items"),
            rdf::NIL
        )]
    );
}

#[test]
fn parse_type_literal() {
    let quads = parse(&format!(
        r#"<rdf:RDF {RDF_XMLNS} {EX_XMLNS}><rdf:Description rdf:about="http://example.com/s"><ex:xml rdf:parseType="Literal"><b>hi</b></ex:xml></rdf:Description></rdf:RDF>"#
    ));
    assert_eq!(
        quads,
        [quad(
            named("http://example.com/s"),
            named("http://example.com/xml"),
            Literal::new_typed_literal("<b>hi</b>", rdf::XML_LITERAL)
        )]
    );
}

#[test]
fn empty_parse_type_literal() {
    let quads = parse(&format!(
        r#"<rdf:RDF {RDF_XMLNS} {EX_XMLNS}><rdf:Description rdf:about="http://example.com/s"><ex:xml rdf:parseType="Literal"/></rdf:Description></rdf:RDF>"#
    ));
    assert_eq!(
        quads,
        [quad(
            named("http://example.com/s"),
            named("http://example.com/xml"),
            Literal::new_typed_literal("", rdf::XML_LITERAL)
        )]
    );
}

#[test]
fn property_element_reification() {
    let quads = parse_with_base(
        &format!(
            r#"<rdf:RDF {RDF_XMLNS} {EX_XMLNS}><rdf:Description rdf:about="http://example.com/s"><ex:p rdf:ID="r1">v</ex:p></rdf:Description></rdf:RDF>"#
        ),
        "http://base.example.com/",
    );
    let r1 = named("http://base.example.com/#r1");
    let s = named("http://example.com/s");
    let p = named("http://example.com/p");
    let v = Literal::new_simple_literal("v");
    assert_eq!(
        quads,
        [
            quad(r1.clone(), rdf::TYPE, rdf::STATEMENT),
            quad(r1.clone(), rdf::SUBJECT, s.clone()),
            quad(r1.clone(), rdf::PREDICATE, p.clone()),
            quad(r1, rdf::OBJECT, v.clone()),
            quad(s, p, v),
        ]
    );
}

#[test]
fn li_rewriting() {
    let quads = parse(&format!(
        r#"<rdf:RDF {RDF_XMLNS} {EX_XMLNS}><rdf:Bag rdf:about="http://example.com/b"><rdf:li>x</rdf:li><rdf:li>y</rdf:li></rdf:Bag></rdf:RDF>"#
    ));
    let b = named("http://example.com/b");
    assert_eq!(
        quads,
        [
            quad(
                b.clone(),
                rdf::TYPE,
                named("http://www.w3.org/1999/02/22-rdf-syntax-ns#Bag")
            ),
            quad(
                b.clone(),
                named("http://www.w3.org/1999/02/22-rdf-syntax-ns#_1"),
                Literal::new_simple_literal("x")
            ),
            quad(
                b,
                named("http://www.w3.org/1999/02/22-rdf-syntax-ns#_2"),
                Literal::new_simple_literal("y")
            ),
        ]
    );
}

/// Feeds the underlying reader one byte at a time.
struct OneByteReader<R: Read>(R);

impl<R: Read> Read for OneByteReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        self.0.read(&mut buf[..1])
    }
}

#[test]
fn streaming_invariance() {
    let file = format!(
        r#"<?xml version="1.0"?>
<!DOCTYPE rdf:RDF [<!ENTITY ex "http://example.com/">]>
<rdf:RDF {RDF_XMLNS} {EX_XMLNS} xml:base="http://example.com/base">
  <rdf:Bag rdf:about="&ex;b">
    <rdf:li>x</rdf:li>
    <rdf:li rdf:ID="r">y</rdf:li>
  </rdf:Bag>
  <rdf:Description rdf:about="&ex;s">
    <ex:items rdf:parseType="Collection">
      <ex:Thing rdf:about="&ex;1"/>
    </ex:items>
    <ex:p ex:a="1" ex:b="2"/>
  </rdf:Description>
</rdf:RDF>"#
    );
    let from_slice = parse(&file);
    let from_reader = RdfXmlParser::new()
        .for_reader(OneByteReader(file.as_bytes()))
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
    assert!(!from_slice.is_empty());
    assert_eq!(from_slice, from_reader);
}

#[test]
fn duplicate_rdf_id_is_an_error() {
    let file = format!(
        r#"<rdf:RDF {RDF_XMLNS} {EX_XMLNS}><ex:T rdf:ID="a"/><ex:T rdf:ID="a"/></rdf:RDF>"#
    );
    let error = RdfXmlParser::new()
        .with_base_iri("http://example.com/")
        .unwrap()
        .for_slice(&file)
        .collect::<Result<Vec<_>, _>>()
        .unwrap_err();
    assert!(error.to_string().contains("already been used"));

    let quads = RdfXmlParser::new()
        .with_base_iri("http://example.com/")
        .unwrap()
        .allow_duplicate_rdf_ids()
        .for_slice(&file)
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
    assert_eq!(quads.len(), 2);
}

#[test]
fn namespace_shadowing() {
    let quads = parse(&format!(
        r#"<rdf:RDF {RDF_XMLNS}><rdf:Description rdf:about="http://example.com/a" xmlns:ex="http://one.example/"><ex:p>1</ex:p><ex:p xmlns:ex="http://two.example/">2</ex:p><ex:p>3</ex:p></rdf:Description></rdf:RDF>"#
    ));
    let a = named("http://example.com/a");
    assert_eq!(
        quads,
        [
            quad(a.clone(), named("http://one.example/p"), Literal::new_simple_literal("1")),
            quad(a.clone(), named("http://two.example/p"), Literal::new_simple_literal("2")),
            quad(a, named("http://one.example/p"), Literal::new_simple_literal("3")),
        ]
    );
}

#[test]
fn prefixes_must_be_bound_before_use() {
    let error = parse_err(&format!(
        r#"<rdf:RDF {RDF_XMLNS}><ex:Thing rdf:about="http://example.com/a" xmlns:other="http://example.com/"/></rdf:RDF>"#
    ));
    assert!(error.to_string().contains("'ex:' is not bound"));
}

#[test]
fn base_iri_inheritance() {
    let quads = parse(&format!(
        r#"<rdf:RDF {RDF_XMLNS} {EX_XMLNS} xml:base="http://example.com/dir/"><rdf:Description rdf:about="a"><ex:p rdf:resource="b"/></rdf:Description><rdf:Description rdf:about="c" xml:base="deep/"><ex:p rdf:resource="d"/></rdf:Description></rdf:RDF>"#
    ));
    let p = named("http://example.com/p");
    assert_eq!(
        quads,
        [
            quad(
                named("http://example.com/dir/a"),
                p.clone(),
                named("http://example.com/dir/b")
            ),
            quad(
                named("http://example.com/dir/deep/c"),
                p,
                named("http://example.com/dir/deep/d")
            ),
        ]
    );
}

#[test]
fn language_inheritance_and_clearing() {
    let quads = parse(&format!(
        r#"<rdf:RDF {RDF_XMLNS} {EX_XMLNS}><rdf:Description rdf:about="http://example.com/a" xml:lang="en"><ex:p>x</ex:p><ex:q xml:lang="">y</ex:q></rdf:Description></rdf:RDF>"#
    ));
    let a = named("http://example.com/a");
    assert_eq!(
        quads,
        [
            quad(
                a.clone(),
                named("http://example.com/p"),
                Literal::new_language_tagged_literal_unchecked("x", "en")
            ),
            quad(
                a,
                named("http://example.com/q"),
                Literal::new_simple_literal("y")
            ),
        ]
    );
}

#[test]
fn unknown_parse_type_uses_the_default_regime() {
    let quads = parse(&format!(
        r#"<rdf:RDF {RDF_XMLNS} {EX_XMLNS}><rdf:Description rdf:about="http://example.com/s"><ex:p rdf:parseType="Bogus">v</ex:p></rdf:Description></rdf:RDF>"#
    ));
    assert_eq!(
        quads,
        [quad(
            named("http://example.com/s"),
            named("http://example.com/p"),
            Literal::new_simple_literal("v")
        )]
    );
}

#[test]
fn parse_type_resource() {
    let quads = parse(&format!(
        r#"<rdf:RDF {RDF_XMLNS} {EX_XMLNS}><rdf:Description rdf:about="http://example.com/s"><ex:p rdf:parseType="Resource"><ex:q>v</ex:q></ex:p></rdf:Description></rdf:RDF>"#
    ));
    let b = blank("qx1");
    assert_eq!(
        quads,
        [
            quad(named("http://example.com/s"), named("http://example.com/p"), b.clone()),
            quad(b, named("http://example.com/q"), Literal::new_simple_literal("v")),
        ]
    );
}

#[test]
fn property_attributes_wait_for_the_object() {
    let quads = parse(&format!(
        r#"<rdf:RDF {RDF_XMLNS} {EX_XMLNS}><rdf:Description rdf:about="http://example.com/s"><ex:p ex:a="1" ex:b="2"/></rdf:Description></rdf:RDF>"#
    ));
    let b = blank("qx1");
    assert_eq!(
        quads,
        [
            quad(named("http://example.com/s"), named("http://example.com/p"), b.clone()),
            quad(b.clone(), named("http://example.com/a"), Literal::new_simple_literal("1")),
            quad(b, named("http://example.com/b"), Literal::new_simple_literal("2")),
        ]
    );
}

#[test]
fn property_attributes_attach_to_the_resource_object() {
    let quads = parse(&format!(
        r#"<rdf:RDF {RDF_XMLNS} {EX_XMLNS}><rdf:Description rdf:about="http://example.com/s"><ex:p rdf:resource="http://example.com/o" ex:a="1"/></rdf:Description></rdf:RDF>"#
    ));
    let o = named("http://example.com/o");
    assert_eq!(
        quads,
        [
            quad(named("http://example.com/s"), named("http://example.com/p"), o.clone()),
            quad(o, named("http://example.com/a"), Literal::new_simple_literal("1")),
        ]
    );
}

#[test]
fn property_attributes_attach_to_a_nested_node_element() {
    let quads = parse(&format!(
        r#"<rdf:RDF {RDF_XMLNS} {EX_XMLNS}><rdf:Description rdf:about="http://example.com/s"><ex:p ex:a="1"><ex:Thing rdf:about="http://example.com/o"/></ex:p></rdf:Description></rdf:RDF>"#
    ));
    let o = named("http://example.com/o");
    assert_eq!(
        quads,
        [
            quad(o.clone(), rdf::TYPE, named("http://example.com/Thing")),
            quad(named("http://example.com/s"), named("http://example.com/p"), o.clone()),
            quad(o, named("http://example.com/a"), Literal::new_simple_literal("1")),
        ]
    );
}

#[test]
fn doctype_entities() {
    let quads = parse(&format!(
        r#"<?xml version="1.0"?>
<!DOCTYPE rdf:RDF [<!ENTITY ex "http://example.com/"> <!ENTITY v 'hi &amp; ho'>]>
<rdf:RDF {RDF_XMLNS} {EX_XMLNS}><rdf:Description rdf:about="&ex;a"><ex:p>&v;</ex:p></rdf:Description></rdf:RDF>"#
    ));
    assert_eq!(
        quads,
        [quad(
            named("http://example.com/a"),
            named("http://example.com/p"),
            Literal::new_simple_literal("hi & ho")
        )]
    );
}

#[test]
fn text_is_concatenated_across_cdata_sections() {
    let quads = parse(&format!(
        r#"<rdf:RDF {RDF_XMLNS} {EX_XMLNS}><rdf:Description rdf:about="http://example.com/s"><ex:p>x<![CDATA[&]]>y</ex:p></rdf:Description></rdf:RDF>"#
    ));
    assert_eq!(
        quads,
        [quad(
            named("http://example.com/s"),
            named("http://example.com/p"),
            Literal::new_simple_literal("x&y")
        )]
    );
}

#[test]
fn empty_property_element_is_an_empty_literal() {
    let quads = parse(&format!(
        r#"<rdf:RDF {RDF_XMLNS} {EX_XMLNS}><rdf:Description rdf:about="http://example.com/s"><ex:p/></rdf:Description></rdf:RDF>"#
    ));
    assert_eq!(
        quads,
        [quad(
            named("http://example.com/s"),
            named("http://example.com/p"),
            Literal::new_simple_literal("")
        )]
    );
}

#[test]
fn datatyped_literal() {
    let quads = parse(&format!(
        r#"<rdf:RDF {RDF_XMLNS} {EX_XMLNS}><rdf:Description rdf:about="http://example.com/s"><ex:p rdf:datatype="http://www.w3.org/2001/XMLSchema#integer">7</ex:p></rdf:Description></rdf:RDF>"#
    ));
    assert_eq!(
        quads,
        [quad(
            named("http://example.com/s"),
            named("http://example.com/p"),
            Literal::new_typed_literal("7", named("http://www.w3.org/2001/XMLSchema#integer"))
        )]
    );
}

#[test]
fn type_attribute_on_a_node_element() {
    let quads = parse(&format!(
        r#"<rdf:RDF {RDF_XMLNS} {EX_XMLNS} xml:base="http://example.com/"><rdf:Description rdf:about="a" rdf:type="T" ex:n="x"/></rdf:RDF>"#
    ));
    let a = named("http://example.com/a");
    assert_eq!(
        quads,
        [
            quad(a.clone(), named("http://example.com/n"), Literal::new_simple_literal("x")),
            quad(a, rdf::TYPE, named("http://example.com/T")),
        ]
    );
}

#[test]
fn nested_node_element_is_linked_when_it_opens() {
    let quads = parse(&format!(
        r#"<rdf:RDF {RDF_XMLNS} {EX_XMLNS}><rdf:Description rdf:about="http://example.com/s"><ex:p><ex:Thing rdf:about="http://example.com/o"/></ex:p></rdf:Description></rdf:RDF>"#
    ));
    let o = named("http://example.com/o");
    assert_eq!(
        quads,
        [
            quad(o.clone(), rdf::TYPE, named("http://example.com/Thing")),
            quad(named("http://example.com/s"), named("http://example.com/p"), o),
        ]
    );
}

#[test]
fn node_id_attributes() {
    let quads = parse(&format!(
        r#"<rdf:RDF {RDF_XMLNS} {EX_XMLNS}><rdf:Description rdf:nodeID="n"><ex:p rdf:nodeID="m" ex:a="1"/></rdf:Description></rdf:RDF>"#
    ));
    assert_eq!(
        quads,
        [
            quad(blank("n"), named("http://example.com/p"), blank("m")),
            quad(blank("m"), named("http://example.com/a"), Literal::new_simple_literal("1")),
        ]
    );
}

#[test]
fn conflicting_attributes_are_rejected() {
    for file in [
        format!(r#"<rdf:RDF {RDF_XMLNS} {EX_XMLNS}><ex:T rdf:about="http://example.com/a" rdf:nodeID="n"/></rdf:RDF>"#),
        format!(r#"<rdf:RDF {RDF_XMLNS} {EX_XMLNS}><rdf:Description rdf:about="http://example.com/s"><ex:p rdf:parseType="Resource" rdf:resource="http://example.com/o"/></rdf:Description></rdf:RDF>"#),
        format!(r#"<rdf:RDF {RDF_XMLNS} {EX_XMLNS}><rdf:Description rdf:about="http://example.com/s"><ex:p rdf:resource="http://example.com/o" rdf:nodeID="n"/></rdf:Description></rdf:RDF>"#),
        format!(r#"<rdf:RDF {RDF_XMLNS} {EX_XMLNS}><rdf:Description rdf:about="http://example.com/s"><ex:p rdf:datatype="http://example.com/t" ex:a="1"/></rdf:Description></rdf:RDF>"#),
        format!(r#"<rdf:RDF {RDF_XMLNS} {EX_XMLNS}><rdf:Description rdf:about="http://example.com/s"><ex:p ex:a="1" rdf:nodeID="n"/></rdf:Description></rdf:RDF>"#),
    ] {
        let error = parse_err(&file);
        assert!(
            error.to_string().contains("at the same time"),
            "unexpected error for {file}: {error}"
        );
    }
}

#[test]
fn forbidden_rdf_names_are_rejected() {
    for (file, expected) in [
        (
            format!(r#"<rdf:RDF {RDF_XMLNS}><rdf:li/></rdf:RDF>"#),
            "node element",
        ),
        (
            format!(r#"<rdf:RDF {RDF_XMLNS}><rdf:Description rdf:nodeID="n"><rdf:Description/></rdf:Description></rdf:RDF>"#),
            "property element",
        ),
        (
            format!(r#"<rdf:RDF {RDF_XMLNS} {EX_XMLNS}><ex:T rdf:li="x"/></rdf:RDF>"#),
            "not supported",
        ),
        (
            format!(r#"<rdf:RDF {RDF_XMLNS} {EX_XMLNS}><ex:T rdf:aboutEach="x"/></rdf:RDF>"#),
            "not supported",
        ),
        (
            format!(r#"<rdf:RDF {RDF_XMLNS} {EX_XMLNS}><ex:T rdf:bagID="x"/></rdf:RDF>"#),
            "not supported",
        ),
    ] {
        let error = parse_err(&file);
        assert!(
            error.to_string().contains(expected),
            "unexpected error for {file}: {error}"
        );
    }
}

#[test]
fn invalid_node_id_is_rejected() {
    let error = parse_err(&format!(
        r#"<rdf:RDF {RDF_XMLNS}><rdf:Description rdf:nodeID="a b"/></rdf:RDF>"#
    ));
    assert!(error.to_string().contains("NCName"));
}

#[test]
fn position_tracking() {
    let file = format!(
        "<rdf:RDF {RDF_XMLNS}>\n  <rdf:Description rdf:nodeID=\"a b\"/>\n</rdf:RDF>"
    );
    let error = RdfXmlParser::new()
        .track_position()
        .for_slice(&file)
        .collect::<Result<Vec<_>, _>>()
        .unwrap_err();
    let position = error.position().unwrap();
    assert_eq!(position.line, 2);

    let error = RdfXmlParser::new()
        .for_slice(&file)
        .collect::<Result<Vec<_>, _>>()
        .unwrap_err();
    assert!(error.position().is_none());
}

#[test]
fn quads_are_put_in_the_configured_graph() {
    let graph = named("http://example.com/graph");
    let quads = RdfXmlParser::new()
        .with_default_graph(graph.clone())
        .for_slice(&format!(
            r#"<rdf:RDF {RDF_XMLNS} {EX_XMLNS}><ex:Thing rdf:about="http://example.com/a"/></rdf:RDF>"#
        ))
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
    assert_eq!(
        quads,
        [Quad::new(
            named("http://example.com/a"),
            rdf::TYPE,
            named("http://example.com/Thing"),
            graph
        )]
    );
}

#[test]
fn reification_applies_to_nested_node_links() {
    let quads = parse_with_base(
        &format!(
            r#"<rdf:RDF {RDF_XMLNS} {EX_XMLNS}><rdf:Description rdf:about="http://example.com/s"><ex:p rdf:ID="r"><rdf:Description rdf:about="http://example.com/o"/></ex:p></rdf:Description></rdf:RDF>"#
        ),
        "http://example.com/doc",
    );
    let r = named("http://example.com/doc#r");
    let s = named("http://example.com/s");
    let p = named("http://example.com/p");
    let o = named("http://example.com/o");
    assert_eq!(
        quads,
        [
            quad(r.clone(), rdf::TYPE, rdf::STATEMENT),
            quad(r.clone(), rdf::SUBJECT, s.clone()),
            quad(r.clone(), rdf::PREDICATE, p.clone()),
            quad(r, rdf::OBJECT, o.clone()),
            quad(s, p, o),
        ]
    );
}

#[test]
fn whitespace_only_content_is_kept_in_literals() {
    let quads = parse(&format!(
        r#"<rdf:RDF {RDF_XMLNS} {EX_XMLNS}><rdf:Description rdf:about="http://example.com/s"><ex:p> </ex:p></rdf:Description></rdf:RDF>"#
    ));
    assert_eq!(
        quads,
        [quad(
            named("http://example.com/s"),
            named("http://example.com/p"),
            Literal::new_simple_literal(" ")
        )]
    );
}

#[test]
fn lenient_mode_skips_iri_validation() {
    let file = format!(
        r#"<rdf:RDF {RDF_XMLNS} {EX_XMLNS}><ex:Thing rdf:about="relative"/></rdf:RDF>"#
    );
    assert!(RdfXmlParser::new()
        .for_slice(&file)
        .collect::<Result<Vec<_>, _>>()
        .is_err());

    let quads = RdfXmlParser::new()
        .lenient()
        .for_slice(&file)
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
    assert_eq!(
        quads,
        [quad(named("relative"), rdf::TYPE, named("http://example.com/Thing"))]
    );
}

#[test]
fn default_namespace_applies_to_unprefixed_names() {
    let quads = parse(&format!(
        r#"<rdf:RDF {RDF_XMLNS} xmlns="http://example.com/"><Thing rdf:about="http://example.com/a"><name>x</name></Thing></rdf:RDF>"#
    ));
    let a = named("http://example.com/a");
    assert_eq!(
        quads,
        [
            quad(a.clone(), rdf::TYPE, named("http://example.com/Thing")),
            quad(a, named("http://example.com/name"), Literal::new_simple_literal("x")),
        ]
    );
}
