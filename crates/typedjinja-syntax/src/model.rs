//! Value types produced by the block decoders.

/// Everything decoded from the first `@types` block of a template.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypesBlock {
    /// `import ...` / `from ...` lines, trimmed, in encounter order
    pub imports: Vec<String>,
    pub annotations: Annotations,
    /// Lines that decode as nothing, verbatim, in encounter order
    pub malformed: Vec<String>,
}

impl TypesBlock {
    pub fn is_empty(&self) -> bool {
        self.imports.is_empty() && self.annotations.is_empty() && self.malformed.is_empty()
    }
}

/// Insertion-ordered `name -> type` mapping.
///
/// Re-inserting a name replaces its type but keeps the position of the
/// first insertion, so rendered stubs list names in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Annotations {
    entries: Vec<(String, String)>,
}

impl Annotations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite `name`. Returns the previous type, if any.
    pub fn insert(&mut self, name: impl Into<String>, ty: impl Into<String>) -> Option<String> {
        let name = name.into();
        let ty = ty.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => Some(std::mem::replace(existing, ty)),
            None => {
                self.entries.push((name, ty));
                None
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, ty)| ty.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, ty)| (n.as_str(), ty.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Annotations {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut annotations = Annotations::new();
        for (name, ty) in iter {
            annotations.insert(name, ty);
        }
        annotations
    }
}

/// A callable described by a `@typedmacro` block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MacroSignature {
    pub name: String,
    /// Raw text between the outermost parentheses, unparsed
    pub params: String,
    pub docstring: Option<String>,
}

/// One `name: type  # doc` line read back from a generated stub.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StubEntry {
    pub ty: String,
    pub doc: Option<String>,
}
