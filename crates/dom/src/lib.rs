//! Server-side markup document tree.
//!
//! An in-memory model of a subset of the classic Document/Node/Element API,
//! for code that needs to build, query, mutate and re-serialize markup
//! without a rendering engine. The tokenizer that turns raw text into a
//! token tree is an external collaborator behind the [`Tokenize`] trait —
//! this crate only consumes its output.
//!
//! ## Core design
//!
//! ```text
//! markup text → Tokenize (external) → Token tree → TreeBuilder → Document
//!                                                                   ↓
//!                                              query / mutate / serialize
//! ```
//!
//! All nodes live in a `Vec` arena owned by the [`Document`] and are
//! addressed by [`NodeId`] indices; parent links are non-owning indices, so
//! the parent/child cycle of pointer-based DOMs never exists here.
//!
//! ## Example
//!
//! ```
//! use htmldom::{Document, Token};
//!
//! let mut doc = Document::new();
//! let body = doc.body().unwrap().unwrap();
//! doc.import_tokens(&[Token::tag("p").child(Token::text("hi"))], Some(body))
//!     .unwrap();
//! assert_eq!(doc.inner_html(body).unwrap(), "<p>hi</p>");
//! ```

pub mod attrs;
pub mod builder;
pub mod children;
pub mod document;
pub mod error;
pub mod serializer;
pub mod token;
pub mod types;

#[cfg(test)]
pub(crate) mod testlex;

pub use attrs::{Attr, AttrMap};
pub use builder::TreeBuilder;
pub use children::ChildList;
pub use document::{Document, Visitor};
pub use error::{DomError, Result};
pub use token::{Token, TokenKind, Tokenize};
pub use types::{NodeId, NodeKind, NodeType};
