//! Dual-layer, lossless syntax tree.
//!
//! The green layer ([`GreenNode`], [`GreenToken`]) is immutable, parent-less
//! and position-less: a node knows only its kind, its children and the total
//! text width it spans. Structurally identical subtrees are interned, so the
//! same green node may sit under many parents and survive across reparses.
//!
//! The red layer ([`RedNode`], [`RedToken`]) is a lazily materialized facade
//! over a green tree that adds an absolute offset and a parent link. Red
//! handles are cheap values; positions are derived from sibling widths when
//! a child is first asked for, never stored in the green layer.

/// Typed AST wrappers around the raw syntax tree.
pub mod ast;
mod builder;
mod cursor;
mod diagnostics;
mod fmt;
mod green;
mod red;
mod syntax_kind;
mod syntax_set;
/// Double-dispatch traversal over red or green nodes.
pub mod visitor;

pub use builder::Builder;
pub use cursor::{Preorder, WalkEvent};
pub use diagnostics::collect_diagnostics;
pub use fmt::debug_tree;
pub use green::{Green, GreenNode, GreenToken, GreenTrivia, TriviaPiece, TriviaPieceKind};
pub use red::{Red, RedNode, RedToken};
pub use syntax_kind::SyntaxKind;
pub use syntax_set::SyntaxSet;

/// Node-or-token wrapper used by both tree layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NodeOrToken<N, T> {
    Node(N),
    Token(T),
}

impl<N, T> NodeOrToken<N, T> {
    /// Converts into the node variant, if any.
    pub fn into_node(self) -> Option<N> {
        match self {
            NodeOrToken::Node(node) => Some(node),
            NodeOrToken::Token(_) => None,
        }
    }

    /// Converts into the token variant, if any.
    pub fn into_token(self) -> Option<T> {
        match self {
            NodeOrToken::Node(_) => None,
            NodeOrToken::Token(token) => Some(token),
        }
    }

    /// Returns a shared reference to the node, if any.
    pub fn as_node(&self) -> Option<&N> {
        match self {
            NodeOrToken::Node(node) => Some(node),
            NodeOrToken::Token(_) => None,
        }
    }

    /// Returns a shared reference to the token, if any.
    pub fn as_token(&self) -> Option<&T> {
        match self {
            NodeOrToken::Node(_) => None,
            NodeOrToken::Token(token) => Some(token),
        }
    }
}
