use crate::error::DiagnosticCode;

/// Byte span into the input buffer of one `transform` call.
///
/// Invariant: `start` and `end` sit on UTF-8 boundaries of that buffer. Spans are
/// only meaningful relative to the input they were produced from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "span start must be <= end");
        Self { start, end }
    }
}

/// Inline placeholder for malformed input, scoped to the smallest enclosing construct.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    pub code: DiagnosticCode,
    /// Offending source text, verbatim.
    pub fragment: String,
    pub span: Span,
}

impl Diagnostic {
    pub fn new(code: DiagnosticCode, src: &str, span: Span) -> Self {
        Self {
            code,
            fragment: src[span.start..span.end].to_string(),
            span,
        }
    }

    /// Human-readable message, stable across runs.
    pub fn message(&self) -> String {
        format!("{}: \"{}\"", self.code.describe(), self.fragment)
    }
}

/// Attribute with its value kind.
///
/// Determinism contract:
/// - Attributes are stored in encounter order.
/// - Duplicate names are kept; which one applies is the consumer's decision.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: AttributeValue,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AttributeValue {
    /// Quoted literal with the quotes stripped. No escape processing.
    Str(String),
    /// Verbatim inline expression text, trimmed.
    Expr(String),
    /// Bare name, no `=`.
    Bool,
    /// Marker left where attribute parsing stopped for this tag.
    Malformed(Diagnostic),
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: AttributeValue) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    /// Value text; present iff the value is a string literal or an expression.
    pub fn value_text(&self) -> Option<&str> {
        match &self.value {
            AttributeValue::Str(s) | AttributeValue::Expr(s) => Some(s),
            AttributeValue::Bool | AttributeValue::Malformed(_) => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<Attribute>,
    pub children: Vec<Node>,
    pub self_closing: bool,
    pub span: Span,
}

impl Element {
    /// Tags starting with an uppercase ASCII letter name a component, not an intrinsic tag.
    pub fn is_component(&self) -> bool {
        self.name.bytes().next().is_some_and(|b| b.is_ascii_uppercase())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    /// Verbatim code text from an inline `{...}` region; never parsed further.
    Expression(String),
    /// Raw character run between markup boundaries, whitespace included.
    Text(String),
    Fragment(Vec<Node>),
    Diagnostic(Diagnostic),
}

impl Node {
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Element(el) => &el.children,
            Node::Fragment(children) => children,
            Node::Expression(_) | Node::Text(_) | Node::Diagnostic(_) => &[],
        }
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(el) => Some(el),
            _ => None,
        }
    }
}
