use crate::error::RdfXmlSyntaxError;

/// Namespace name the `xml` prefix is bound to in every document.
const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";

/// A qualified name expanded against the bindings in scope.
pub struct ExpandedName {
    uri: String,
    local: String,
}

impl ExpandedName {
    /// The namespace name, empty for names outside of any namespace.
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// The concatenation of namespace name and local part, as used by the RDF/XML grammar.
    pub fn into_iri(self) -> String {
        let mut iri = self.uri;
        iri.push_str(&self.local);
        iri
    }
}

/// The namespace bindings visible at the current point of the parse.
///
/// Elements that carry `xmlns` or `xmlns:*` attributes push one scope, all
/// other elements share their parent's bindings. Scopes are tagged with the
/// depth of the element stack so that closing an element drops exactly the
/// bindings it declared. Lookup walks from the innermost scope outwards, the
/// `xml` prefix being implicitly bound in an outermost pseudo-scope.
pub struct NamespaceStack {
    scopes: Vec<NamespaceScope>,
}

struct NamespaceScope {
    depth: usize,
    bindings: Vec<(String, String)>,
}

impl NamespaceStack {
    pub fn new() -> Self {
        Self { scopes: Vec::new() }
    }

    /// Registers the bindings declared by the element at `depth`.
    pub fn declare(&mut self, depth: usize, bindings: Vec<(String, String)>) {
        self.scopes.push(NamespaceScope { depth, bindings });
    }

    /// Drops all scopes declared at `depth` or deeper.
    pub fn leave(&mut self, depth: usize) {
        while self.scopes.last().is_some_and(|scope| scope.depth >= depth) {
            self.scopes.pop();
        }
    }

    fn lookup(&self, prefix: &str) -> Option<&str> {
        for scope in self.scopes.iter().rev() {
            for (bound_prefix, uri) in scope.bindings.iter().rev() {
                if bound_prefix == prefix {
                    return Some(uri);
                }
            }
        }
        (prefix == "xml").then_some(XML_NAMESPACE)
    }

    /// Expands a possibly prefixed name.
    ///
    /// Unprefixed names take the default namespace. An unbound prefix is an
    /// error, except for the `xmlns` pseudo-prefix which falls back to the
    /// default namespace like an unprefixed name.
    pub fn expand(&self, name: &str) -> Result<ExpandedName, RdfXmlSyntaxError> {
        let (prefix, local) = match name.split_once(':') {
            Some((prefix, local)) => (prefix, local),
            None => ("", name),
        };
        let uri = match self.lookup(prefix) {
            Some(uri) => uri.to_owned(),
            None if prefix.is_empty() => String::new(),
            None if prefix == "xmlns" => self.lookup("").unwrap_or_default().to_owned(),
            None => return Err(RdfXmlSyntaxError::unbound_prefix(prefix)),
        };
        Ok(ExpandedName {
            uri,
            local: local.to_owned(),
        })
    }

    /// All visible bindings, the innermost declaration winning for each prefix.
    pub fn bindings(&self) -> Vec<(&str, &str)> {
        let mut bindings: Vec<(&str, &str)> = Vec::new();
        for scope in &self.scopes {
            for (prefix, uri) in &scope.bindings {
                if let Some(binding) = bindings.iter_mut().find(|(p, _)| *p == prefix) {
                    binding.1 = uri;
                } else {
                    bindings.push((prefix, uri));
                }
            }
        }
        bindings
    }
}
