//! Immutable, parent-less, position-less tree nodes.
//!
//! Green nodes are interned: constructing a node that is structurally
//! identical to an existing one yields the same instance. That single
//! property gives structural sharing across tree versions, a process-wide
//! append-only cache of common terminals, and lock-free concurrent reads.

use opal_errors::Diagnostic;
use salsa::Database;
use text_size::TextSize;
use triomphe::ThinArc;

use crate::{NodeOrToken, SyntaxKind};

pub type Green<'db> = NodeOrToken<GreenNode<'db>, GreenToken<'db>>;

impl Green<'_> {
    pub fn text_len(&self, db: &dyn Database) -> TextSize {
        match self {
            NodeOrToken::Node(node) => node.text_len(db),
            NodeOrToken::Token(token) => TextSize::new(token.text(db).len() as u32),
        }
    }

    pub fn kind(&self, db: &dyn Database) -> SyntaxKind {
        match self {
            NodeOrToken::Node(node) => node.kind(db),
            NodeOrToken::Token(token) => token.kind(db),
        }
    }

    pub fn contains_errors(&self, db: &dyn Database) -> bool {
        match self {
            NodeOrToken::Node(node) => node.contains_errors(db),
            NodeOrToken::Token(_) => false,
        }
    }
}

#[salsa::interned(constructor = alloc, debug)]
pub struct GreenNode<'db> {
    pub kind: SyntaxKind,
    #[returns(ref)]
    pub children: Vec<Green<'db>>,
    pub text_len: TextSize,
    #[returns(ref)]
    pub diagnostics: Vec<Diagnostic>,
    pub contains_errors: bool,
}

impl<'db> GreenNode<'db> {
    /// Constructs a node of `kind` over `children`.
    ///
    /// Never fails: malformed input is represented as data (missing
    /// sentinels, attached diagnostics), not as construction errors. The
    /// width is the sum of children widths and is computed exactly once.
    pub fn new(db: &'db dyn Database, kind: SyntaxKind, children: Vec<Green<'db>>) -> Self {
        let text_len: TextSize = children.iter().map(|child| child.text_len(db)).sum();
        let contains_errors = children.iter().any(|child| child.contains_errors(db));
        Self::alloc(db, kind, children, text_len, Vec::new(), contains_errors)
    }

    /// Constructs the zero-width placeholder for an expected-but-absent
    /// construct. It occupies its child slot so arity-based access never
    /// needs a null check, and carries exactly one diagnostic.
    pub fn missing(db: &'db dyn Database, diagnostic: Diagnostic) -> Self {
        Self::alloc(db, SyntaxKind::MISSING, Vec::new(), TextSize::new(0), vec![diagnostic], true)
    }

    /// Returns a copy of this node carrying one more diagnostic.
    ///
    /// The receiver is untouched; children are shared by reference. This is
    /// the only way to "add" an error to an already constructed node.
    pub fn with_diagnostic(self, db: &'db dyn Database, diagnostic: Diagnostic) -> Self {
        let mut diagnostics = self.diagnostics(db).clone();
        diagnostics.push(diagnostic);

        let children = self.children(db).clone();
        Self::alloc(db, self.kind(db), children, self.text_len(db), diagnostics, true)
    }

    pub fn is_missing(self, db: &'db dyn Database) -> bool {
        self.kind(db).is_missing()
    }

    /// Reconstructs the exact source slice spanned by this node by
    /// concatenating terminal texts (trivia included) left to right.
    pub fn text(self, db: &'db dyn Database) -> String {
        let mut text = String::with_capacity(self.text_len(db).into());
        self.collect_text(db, &mut text);
        text
    }

    fn collect_text(self, db: &'db dyn Database, text: &mut String) {
        for child in self.children(db) {
            match child {
                NodeOrToken::Node(node) => node.collect_text(db, text),
                NodeOrToken::Token(token) => text.push_str(token.text(db)),
            }
        }
    }
}

#[salsa::interned(debug)]
pub struct GreenToken<'db> {
    pub leading: GreenTrivia,
    pub kind: SyntaxKind,
    #[returns(ref)]
    pub text: Box<str>,
    pub trailing: GreenTrivia,
}

impl<'db> GreenToken<'db> {
    fn leading_trailing_total_len(self, db: &'db dyn Database) -> (TextSize, TextSize, TextSize) {
        let leading_len = self.leading(db).len();
        let trailing_len = self.trailing(db).len();
        let total_len = self.text(db).len() as u32;

        (leading_len, trailing_len, total_len.into())
    }

    /// Token text with leading and trailing trivia stripped.
    pub fn text_trimmed(self, db: &'db dyn Database) -> &'db str {
        let (leading_len, trailing_len, total_len) = self.leading_trailing_total_len(db);

        let start: usize = leading_len.into();
        let end: usize = (total_len - trailing_len).into();

        &self.text(db)[start..end]
    }
}

/// Trivia pieces attached to one side of a token, stored as a single
/// allocation with the total length cached in the header.
#[derive(Clone, Eq, Hash, PartialEq)]
pub struct GreenTrivia {
    ptr: Option<ThinArc<TextSize, TriviaPiece>>,
}

impl std::fmt::Debug for GreenTrivia {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GreenTrivia")
            .field("pieces", &self.pieces())
            .field("total_len", &self.len())
            .finish()
    }
}

impl GreenTrivia {
    pub fn new(pieces: &[TriviaPiece]) -> Self {
        if pieces.is_empty() {
            return Self::empty();
        }
        let total_len = pieces.iter().map(|piece| piece.len).sum();
        Self { ptr: Some(ThinArc::from_header_and_slice(total_len, pieces)) }
    }

    pub const fn empty() -> Self {
        Self { ptr: None }
    }

    pub fn len(&self) -> TextSize {
        match self.ptr {
            None => TextSize::new(0),
            Some(ref ptr) => ptr.header.header,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.ptr.is_none()
    }

    pub fn pieces(&self) -> &[TriviaPiece] {
        match &self.ptr {
            None => &[],
            Some(ptr) => &ptr.slice,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct TriviaPiece {
    pub kind: TriviaPieceKind,
    pub len: TextSize,
}

impl TriviaPiece {
    pub fn new(kind: TriviaPieceKind, len: TextSize) -> Self {
        Self { kind, len }
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum TriviaPieceKind {
    Whitespace,
    SingleLineComment,
}

#[cfg(test)]
mod tests {
    use salsa::DatabaseImpl;

    use super::*;

    fn whitespace(len: u32) -> GreenTrivia {
        GreenTrivia::new(&[TriviaPiece::new(TriviaPieceKind::Whitespace, len.into())])
    }

    fn token<'db>(db: &'db dyn Database, kind: SyntaxKind, text: &str) -> Green<'db> {
        NodeOrToken::Token(GreenToken::new(
            db,
            GreenTrivia::empty(),
            kind,
            Box::<str>::from(text),
            GreenTrivia::empty(),
        ))
    }

    #[test]
    fn token_text() {
        let db = DatabaseImpl::new();

        let token = GreenToken::new(
            &db,
            whitespace(3),
            SyntaxKind::VAL_KW,
            Box::<str>::from("\n\t val \t\t"),
            whitespace(3),
        );

        assert_eq!("\n\t val \t\t", token.text(&db).as_ref());
        assert_eq!("val", token.text_trimmed(&db));
    }

    #[test]
    fn width_is_sum_of_children() {
        let db = DatabaseImpl::new();

        let node = GreenNode::new(
            &db,
            SyntaxKind::INDEX_EXPR,
            vec![
                token(&db, SyntaxKind::NAME, "a"),
                token(&db, SyntaxKind::LEFT_BRACKET, "["),
                token(&db, SyntaxKind::NAME, "key"),
                token(&db, SyntaxKind::RIGHT_BRACKET, "]"),
            ],
        );

        assert_eq!(node.text_len(&db), TextSize::new(6));
        assert_eq!(node.text(&db), "a[key]");
    }

    #[test]
    fn structurally_identical_nodes_are_shared() {
        let db = DatabaseImpl::new();

        let first = GreenNode::new(
            &db,
            SyntaxKind::LITERAL,
            vec![token(&db, SyntaxKind::INT_NUMBER, "1")],
        );
        let second = GreenNode::new(
            &db,
            SyntaxKind::LITERAL,
            vec![token(&db, SyntaxKind::INT_NUMBER, "1")],
        );

        assert_eq!(first, second);
    }

    #[test]
    fn with_diagnostic_leaves_receiver_untouched() {
        let db = DatabaseImpl::new();

        let node = GreenNode::new(
            &db,
            SyntaxKind::LITERAL,
            vec![token(&db, SyntaxKind::INT_NUMBER, "1")],
        );
        let flagged = node.with_diagnostic(&db, Diagnostic::error("not a valid literal"));

        assert!(node.diagnostics(&db).is_empty());
        assert!(!node.contains_errors(&db));

        assert_ne!(node, flagged);
        assert_eq!(flagged.kind(&db), node.kind(&db));
        assert_eq!(flagged.children(&db), node.children(&db));
        assert!(flagged.contains_errors(&db));
        assert_eq!(flagged.diagnostics(&db).len(), 1);
        assert_eq!(flagged.diagnostics(&db)[0].message(), "not a valid literal");
    }

    #[test]
    fn missing_sentinel_shape() {
        let db = DatabaseImpl::new();

        let missing = GreenNode::missing(&db, Diagnostic::error("expected an expression"));

        assert!(missing.is_missing(&db));
        assert_eq!(missing.text_len(&db), TextSize::new(0));
        assert!(missing.children(&db).is_empty());
        assert!(missing.contains_errors(&db));
        assert_eq!(missing.diagnostics(&db).len(), 1);
    }

    #[test]
    fn error_flag_propagates_upward() {
        let db = DatabaseImpl::new();

        let missing = GreenNode::missing(&db, Diagnostic::error("expected an expression"));
        let parent = GreenNode::new(
            &db,
            SyntaxKind::INDEX_EXPR,
            vec![
                token(&db, SyntaxKind::NAME, "a"),
                token(&db, SyntaxKind::LEFT_BRACKET, "["),
                NodeOrToken::Node(missing),
            ],
        );

        // The parent has no diagnostic of its own, only an erroring child.
        assert!(parent.diagnostics(&db).is_empty());
        assert!(parent.contains_errors(&db));
    }
}
