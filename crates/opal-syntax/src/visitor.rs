//! Double-dispatch traversal.
//!
//! `accept` routes on the concrete kind of the node, which selects the one
//! visitor method matching that kind. Every per-kind method defaults to
//! recursing into children, so a visitor only overrides the kinds it cares
//! about and new kinds do not break existing visitors.

use salsa::Database;

use crate::SyntaxKind::*;
use crate::{GreenNode, GreenToken, NodeOrToken, Red, RedNode, RedToken};

/// Dispatches `visitor` over `node` by kind.
pub fn accept<'db, V: Visitor<'db> + ?Sized>(
    db: &'db dyn Database,
    node: RedNode<'db>,
    visitor: &mut V,
) {
    visitor.visit_node(db, node);
}

/// Position-aware visitor over red nodes.
pub trait Visitor<'db> {
    fn visit_node(&mut self, db: &'db dyn Database, node: RedNode<'db>) {
        match node.kind(db) {
            MODULE => self.visit_module(db, node),
            FN => self.visit_fn(db, node),
            PARAM_LIST => self.visit_param_list(db, node),
            PARAM => self.visit_param(db, node),
            STMT_LIST => self.visit_stmt_list(db, node),
            VAL_STMT => self.visit_val_stmt(db, node),
            EXPR_STMT => self.visit_expr_stmt(db, node),
            LITERAL => self.visit_literal(db, node),
            IDENT => self.visit_ident(db, node),
            PREFIX_EXPR => self.visit_prefix_expr(db, node),
            BINARY_EXPR => self.visit_binary_expr(db, node),
            POSTFIX_EXPR => self.visit_postfix_expr(db, node),
            PAREN_EXPR => self.visit_paren_expr(db, node),
            LIST_EXPR => self.visit_list_expr(db, node),
            INDEX_EXPR => self.visit_index_expr(db, node),
            CALL_EXPR => self.visit_call_expr(db, node),
            FIELD_EXPR => self.visit_field_expr(db, node),
            ARG_LIST => self.visit_arg_list(db, node),
            MISSING => self.visit_missing(db, node),
            ERROR => self.visit_error(db, node),
            _ => self.visit_children(db, node),
        }
    }

    fn visit_children(&mut self, db: &'db dyn Database, node: RedNode<'db>) {
        for child in node.children(db) {
            match child {
                Red::Node(node) => self.visit_node(db, node),
                Red::Token(token) => self.visit_token(db, token),
            }
        }
    }

    fn visit_token(&mut self, db: &'db dyn Database, token: RedToken<'db>) {
        let _ = (db, token);
    }

    fn visit_module(&mut self, db: &'db dyn Database, node: RedNode<'db>) {
        self.visit_children(db, node);
    }

    fn visit_fn(&mut self, db: &'db dyn Database, node: RedNode<'db>) {
        self.visit_children(db, node);
    }

    fn visit_param_list(&mut self, db: &'db dyn Database, node: RedNode<'db>) {
        self.visit_children(db, node);
    }

    fn visit_param(&mut self, db: &'db dyn Database, node: RedNode<'db>) {
        self.visit_children(db, node);
    }

    fn visit_stmt_list(&mut self, db: &'db dyn Database, node: RedNode<'db>) {
        self.visit_children(db, node);
    }

    fn visit_val_stmt(&mut self, db: &'db dyn Database, node: RedNode<'db>) {
        self.visit_children(db, node);
    }

    fn visit_expr_stmt(&mut self, db: &'db dyn Database, node: RedNode<'db>) {
        self.visit_children(db, node);
    }

    fn visit_literal(&mut self, db: &'db dyn Database, node: RedNode<'db>) {
        self.visit_children(db, node);
    }

    fn visit_ident(&mut self, db: &'db dyn Database, node: RedNode<'db>) {
        self.visit_children(db, node);
    }

    fn visit_prefix_expr(&mut self, db: &'db dyn Database, node: RedNode<'db>) {
        self.visit_children(db, node);
    }

    fn visit_binary_expr(&mut self, db: &'db dyn Database, node: RedNode<'db>) {
        self.visit_children(db, node);
    }

    fn visit_postfix_expr(&mut self, db: &'db dyn Database, node: RedNode<'db>) {
        self.visit_children(db, node);
    }

    fn visit_paren_expr(&mut self, db: &'db dyn Database, node: RedNode<'db>) {
        self.visit_children(db, node);
    }

    fn visit_list_expr(&mut self, db: &'db dyn Database, node: RedNode<'db>) {
        self.visit_children(db, node);
    }

    fn visit_index_expr(&mut self, db: &'db dyn Database, node: RedNode<'db>) {
        self.visit_children(db, node);
    }

    fn visit_call_expr(&mut self, db: &'db dyn Database, node: RedNode<'db>) {
        self.visit_children(db, node);
    }

    fn visit_field_expr(&mut self, db: &'db dyn Database, node: RedNode<'db>) {
        self.visit_children(db, node);
    }

    fn visit_arg_list(&mut self, db: &'db dyn Database, node: RedNode<'db>) {
        self.visit_children(db, node);
    }

    fn visit_missing(&mut self, db: &'db dyn Database, node: RedNode<'db>) {
        self.visit_children(db, node);
    }

    fn visit_error(&mut self, db: &'db dyn Database, node: RedNode<'db>) {
        self.visit_children(db, node);
    }
}

/// Position-free visitor over green nodes, for structural queries that do
/// not need offsets or parents.
pub trait GreenVisitor<'db> {
    fn visit_node(&mut self, db: &'db dyn Database, node: GreenNode<'db>) {
        match node.kind(db) {
            MISSING => self.visit_missing(db, node),
            ERROR => self.visit_error(db, node),
            _ => self.visit_children(db, node),
        }
    }

    fn visit_children(&mut self, db: &'db dyn Database, node: GreenNode<'db>) {
        for &child in node.children(db) {
            match child {
                NodeOrToken::Node(node) => self.visit_node(db, node),
                NodeOrToken::Token(token) => self.visit_token(db, token),
            }
        }
    }

    fn visit_token(&mut self, db: &'db dyn Database, token: GreenToken<'db>) {
        let _ = (db, token);
    }

    fn visit_missing(&mut self, db: &'db dyn Database, node: GreenNode<'db>) {
        self.visit_children(db, node);
    }

    fn visit_error(&mut self, db: &'db dyn Database, node: GreenNode<'db>) {
        self.visit_children(db, node);
    }
}

#[cfg(test)]
mod tests {
    use salsa::DatabaseImpl;
    use text_size::TextRange;

    use super::*;
    use crate::{Builder, GreenTrivia, SyntaxKind};

    fn build_index_of_index<'db>(db: &'db dyn Database, text: &'db str) -> GreenNode<'db> {
        // a[b][0]
        let mut builder = Builder::new(db, text);
        let mut offset = 0u32;
        let mut token = |builder: &mut Builder<'db>, kind: SyntaxKind, len: u32| {
            let range = TextRange::at(offset.into(), len.into());
            offset += len;
            builder.token(GreenTrivia::empty(), kind, range, GreenTrivia::empty());
        };

        builder.start_node(SyntaxKind::INDEX_EXPR);
        builder.start_node(SyntaxKind::INDEX_EXPR);
        builder.start_node(SyntaxKind::IDENT);
        token(&mut builder, SyntaxKind::NAME, 1);
        builder.finish_node();
        token(&mut builder, SyntaxKind::LEFT_BRACKET, 1);
        builder.start_node(SyntaxKind::IDENT);
        token(&mut builder, SyntaxKind::NAME, 1);
        builder.finish_node();
        token(&mut builder, SyntaxKind::RIGHT_BRACKET, 1);
        builder.finish_node();
        token(&mut builder, SyntaxKind::LEFT_BRACKET, 1);
        builder.start_node(SyntaxKind::LITERAL);
        token(&mut builder, SyntaxKind::INT_NUMBER, 1);
        builder.finish_node();
        token(&mut builder, SyntaxKind::RIGHT_BRACKET, 1);
        builder.finish_node();
        builder.finish()
    }

    #[derive(Default)]
    struct IndexCounter {
        index_exprs: usize,
        tokens: usize,
    }

    impl<'db> Visitor<'db> for IndexCounter {
        fn visit_index_expr(&mut self, db: &'db dyn Database, node: RedNode<'db>) {
            self.index_exprs += 1;
            self.visit_children(db, node);
        }

        fn visit_token(&mut self, _db: &'db dyn Database, _token: RedToken<'db>) {
            self.tokens += 1;
        }
    }

    #[test]
    fn dispatch_routes_by_kind_and_recurses_by_default() {
        let db = DatabaseImpl::new();
        let green = build_index_of_index(&db, "a[b][0]");
        assert_eq!(green.text(&db), "a[b][0]");

        let root = crate::RedNode::new_root(&db, green);
        let mut counter = IndexCounter::default();
        accept(&db, root, &mut counter);

        assert_eq!(counter.index_exprs, 2);
        assert_eq!(counter.tokens, 7);
    }

    #[derive(Default)]
    struct GreenKindCounter {
        idents: usize,
    }

    impl<'db> GreenVisitor<'db> for GreenKindCounter {
        fn visit_node(&mut self, db: &'db dyn Database, node: GreenNode<'db>) {
            if node.kind(db) == SyntaxKind::IDENT {
                self.idents += 1;
            }
            self.visit_children(db, node);
        }
    }

    #[test]
    fn green_visitor_walks_without_positions() {
        let db = DatabaseImpl::new();
        let green = build_index_of_index(&db, "a[b][0]");

        let mut counter = GreenKindCounter::default();
        counter.visit_node(&db, green);

        assert_eq!(counter.idents, 2);
    }
}
