//! Lazily positioned facade over the green tree.
//!
//! A red node pairs a green node with its absolute offset and parent link.
//! Red handles are interned on `(parent, offset, green)`, so materializing
//! the same child slot twice yields the same instance; consumers may compare
//! facades by identity within a session.

use salsa::Database;
use text_size::{TextRange, TextSize};

use crate::{GreenNode, GreenToken, NodeOrToken, SyntaxKind};

pub type Red<'db> = NodeOrToken<RedNode<'db>, RedToken<'db>>;

impl<'db> Red<'db> {
    pub fn kind(self, db: &dyn Database) -> SyntaxKind {
        match self {
            NodeOrToken::Node(node) => node.kind(db),
            NodeOrToken::Token(token) => token.kind(db),
        }
    }

    pub fn text_offset(self, db: &dyn Database) -> TextSize {
        match self {
            NodeOrToken::Node(node) => node.text_offset(db),
            NodeOrToken::Token(token) => token.text_offset(db),
        }
    }

    pub fn text_len(self, db: &dyn Database) -> TextSize {
        match self {
            NodeOrToken::Node(node) => node.green(db).text_len(db),
            NodeOrToken::Token(token) => TextSize::new(token.green(db).text(db).len() as u32),
        }
    }

}

#[salsa::interned(debug)]
pub struct RedNode<'db> {
    pub parent: Option<RedNode<'db>>,
    pub text_offset: TextSize,
    pub green: GreenNode<'db>,
}

impl<'db> RedNode<'db> {
    pub fn new_root(db: &'db dyn Database, root: GreenNode<'db>) -> Self {
        Self::new(db, None, TextSize::new(0), root)
    }

    pub fn kind(self, db: &'db dyn Database) -> SyntaxKind {
        self.green(db).kind(db)
    }

    pub fn text_len(self, db: &'db dyn Database) -> TextSize {
        self.green(db).text_len(db)
    }

    pub fn text_range(self, db: &'db dyn Database) -> TextRange {
        TextRange::at(self.text_offset(db), self.text_len(db))
    }

    pub fn is_missing(self, db: &'db dyn Database) -> bool {
        self.green(db).is_missing(db)
    }

    pub fn contains_errors(self, db: &'db dyn Database) -> bool {
        self.green(db).contains_errors(db)
    }

    /// Materializes child facades left to right. Each child's offset is this
    /// node's offset plus the widths of the siblings preceding it.
    pub fn children(self, db: &'db dyn Database) -> impl Iterator<Item = Red<'db>> + 'db {
        let mut offset_in_parent = TextSize::new(0);

        self.green(db).children(db).iter().map(move |&green_child| {
            let text_offset = self.text_offset(db) + offset_in_parent;
            offset_in_parent += green_child.text_len(db);

            match green_child {
                NodeOrToken::Node(node) => {
                    Red::Node(RedNode::new(db, Some(self), text_offset, node))
                }
                NodeOrToken::Token(token) => {
                    Red::Token(RedToken::new(db, Some(self), text_offset, token))
                }
            }
        })
    }

    /// Returns the child in slot `index`, counting tokens and nodes alike.
    pub fn child(self, db: &'db dyn Database, index: usize) -> Option<Red<'db>> {
        self.children(db).nth(index)
    }

    pub fn first_child(self, db: &'db dyn Database) -> Option<RedNode<'db>> {
        self.children(db).find_map(Red::into_node)
    }

    pub fn next_sibling(self, db: &'db dyn Database) -> Option<RedNode<'db>> {
        let parent = self.parent(db)?;
        let mut nodes = parent.children(db).filter_map(Red::into_node);
        nodes.find(|&node| node == self)?;
        nodes.next()
    }

    /// Iterator of ancestors starting from this node.
    pub fn ancestors(self, db: &'db dyn Database) -> impl Iterator<Item = RedNode<'db>> + 'db {
        std::iter::successors(Some(self), move |node| node.parent(db))
    }
}

#[salsa::interned(debug)]
pub struct RedToken<'db> {
    pub parent: Option<RedNode<'db>>,
    pub text_offset: TextSize,
    pub green: GreenToken<'db>,
}

impl<'db> RedToken<'db> {
    pub fn kind(self, db: &'db dyn Database) -> SyntaxKind {
        self.green(db).kind(db)
    }

    /// Range including attached trivia.
    pub fn text_range(self, db: &'db dyn Database) -> TextRange {
        let offset = self.text_offset(db);
        let len = TextSize::new(self.green(db).text(db).len() as u32);
        TextRange::at(offset, len)
    }

    /// Range excluding leading and trailing trivia.
    pub fn text_trimmed_range(self, db: &'db dyn Database) -> TextRange {
        let green_token = self.green(db);
        let leading_len = green_token.leading(db).len();
        let trailing_len = green_token.trailing(db).len();

        let range = self.text_range(db);
        TextRange::new(range.start() + leading_len, range.end() - trailing_len)
    }
}

#[cfg(test)]
mod tests {
    use salsa::DatabaseImpl;

    use super::*;
    use crate::SyntaxKind::*;
    use crate::{Green, GreenTrivia};

    fn token<'db>(db: &'db dyn Database, kind: SyntaxKind, text: &str) -> Green<'db> {
        NodeOrToken::Token(GreenToken::new(
            db,
            GreenTrivia::empty(),
            kind,
            Box::<str>::from(text),
            GreenTrivia::empty(),
        ))
    }

    /// `a[b]` as a single indexed expression: four children, the key
    /// expression sits at absolute offset 2.
    #[test]
    fn child_positions_derive_from_sibling_widths() {
        let db = DatabaseImpl::new();

        let key = GreenNode::new(&db, IDENT, vec![token(&db, NAME, "b")]);
        let node = GreenNode::new(
            &db,
            INDEX_EXPR,
            vec![
                token(&db, NAME, "a"),
                token(&db, LEFT_BRACKET, "["),
                NodeOrToken::Node(key),
                token(&db, RIGHT_BRACKET, "]"),
            ],
        );

        let root = RedNode::new_root(&db, node);
        assert_eq!(root.text_range(&db), TextRange::new(0.into(), 4.into()));

        let key = root.child(&db, 2).unwrap().into_node().unwrap();
        assert_eq!(key.kind(&db), IDENT);
        assert_eq!(key.text_offset(&db), TextSize::new(2));
        assert_eq!(key.parent(&db), Some(root));

        let close = root.child(&db, 3).unwrap().into_token().unwrap();
        assert_eq!(close.kind(&db), RIGHT_BRACKET);
        assert_eq!(close.text_range(&db), TextRange::new(3.into(), 4.into()));
    }

    #[test]
    fn child_facades_are_identity_stable() {
        let db = DatabaseImpl::new();

        let node = GreenNode::new(
            &db,
            LIST_EXPR,
            vec![
                token(&db, LEFT_BRACKET, "["),
                token(&db, RIGHT_BRACKET, "]"),
            ],
        );
        let root = RedNode::new_root(&db, node);

        let first = root.child(&db, 0).unwrap().into_token().unwrap();
        let again = root.child(&db, 0).unwrap().into_token().unwrap();
        assert_eq!(first, again);
    }

    #[test]
    fn handles_format_with_debug() {
        let db = DatabaseImpl::new();

        let green = GreenNode::new(&db, IDENT, vec![token(&db, NAME, "a")]);
        let root = RedNode::new_root(&db, green);

        assert!(format!("{green:?}").contains("GreenNode"));
        assert!(format!("{root:?}").contains("RedNode"));
    }

    #[test]
    fn sibling_navigation() {
        let db = DatabaseImpl::new();

        let lhs = GreenNode::new(&db, IDENT, vec![token(&db, NAME, "a")]);
        let rhs = GreenNode::new(&db, IDENT, vec![token(&db, NAME, "bc")]);
        let node = GreenNode::new(
            &db,
            BINARY_EXPR,
            vec![
                NodeOrToken::Node(lhs),
                token(&db, BINARY_OPERATOR, "+"),
                NodeOrToken::Node(rhs),
            ],
        );
        let root = RedNode::new_root(&db, node);

        let first = root.first_child(&db).unwrap();
        assert_eq!(first.text_offset(&db), TextSize::new(0));

        let second = first.next_sibling(&db).unwrap();
        assert_eq!(second.text_offset(&db), TextSize::new(2));
        assert_eq!(second.next_sibling(&db), None);

        assert_eq!(second.ancestors(&db).count(), 2);
    }
}
