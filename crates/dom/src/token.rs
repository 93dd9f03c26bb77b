//! The external tokenizer contract.
//!
//! The markup tokenizer is a collaborator, not part of this crate: the tree
//! only ever sees its output — an ordered sequence of [`Token`]s. Anything
//! implementing [`Tokenize`] can feed a [`Document`](crate::Document).
//!
//! Tokens derive serde so a token tree can cross a process or fixture
//! boundary as JSON.

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Token kinds a tokenizer may produce. Closed set — conversion sites match
/// exhaustively, so an unhandled kind is a compile error, not a runtime one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Tag,
    Script,
    Style,
    Text,
    Comment,
    Directive,
}

/// One node of the tokenizer's output tree.
///
/// Tag-like kinds (`Tag`, `Script`, `Style`) carry a `name`, attributes in
/// insertion order, and child tokens in document order. `Text` and `Comment`
/// carry raw `data`. `Directive` carries both `name` (e.g. `!DOCTYPE`,
/// `?xml`) and the raw `data` between the angle brackets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub data: String,
    #[serde(default)]
    pub attributes: Vec<(String, String)>,
    #[serde(default)]
    pub children: Vec<Token>,
}

impl Token {
    fn new(kind: TokenKind) -> Self {
        Self {
            kind,
            name: String::new(),
            data: String::new(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn tag(name: impl Into<String>) -> Self {
        let mut token = Self::new(TokenKind::Tag);
        token.name = name.into();
        token
    }

    pub fn script() -> Self {
        let mut token = Self::new(TokenKind::Script);
        token.name = "script".to_string();
        token
    }

    pub fn style() -> Self {
        let mut token = Self::new(TokenKind::Style);
        token.name = "style".to_string();
        token
    }

    pub fn text(data: impl Into<String>) -> Self {
        let mut token = Self::new(TokenKind::Text);
        token.data = data.into();
        token
    }

    pub fn comment(data: impl Into<String>) -> Self {
        let mut token = Self::new(TokenKind::Comment);
        token.data = data.into();
        token
    }

    pub fn directive(name: impl Into<String>, data: impl Into<String>) -> Self {
        let mut token = Self::new(TokenKind::Directive);
        token.name = name.into();
        token.data = data.into();
        token
    }

    /// Appends an attribute (builder style).
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    /// Appends a child token (builder style).
    pub fn child(mut self, token: Token) -> Self {
        self.children.push(token);
        self
    }
}

/// The tokenizer boundary: markup text in, token tree out.
///
/// Implementations map their own failures into
/// [`DomError::Tokenizer`](crate::DomError::Tokenizer).
pub trait Tokenize {
    fn tokenize(&self, markup: &str) -> Result<Vec<Token>>;
}
