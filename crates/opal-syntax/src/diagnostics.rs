use opal_errors::SpannedDiagnostic;
use salsa::Database;

use crate::cursor::{Preorder, WalkEvent};
use crate::red::RedNode;

/// Collects every diagnostic in the tree, in source order.
///
/// Diagnostics live on green nodes without positions; pairing them with the
/// red facade recovers absolute ranges. Subtrees whose cumulative error flag
/// is clear are skipped without materializing their children.
pub fn collect_diagnostics<'db>(
    db: &'db dyn Database,
    root: RedNode<'db>,
) -> Vec<SpannedDiagnostic> {
    let mut diagnostics = Vec::new();

    let mut preorder = Preorder::new(db, root);
    while let Some(event) = preorder.next() {
        let WalkEvent::Enter(node) = event else { continue };

        if !node.contains_errors(db) {
            preorder.skip_subtree();
            continue;
        }

        let range = node.text_range(db);
        for diagnostic in node.green(db).diagnostics(db) {
            diagnostics.push(SpannedDiagnostic::new(diagnostic.clone(), range));
        }
    }

    diagnostics
}

#[cfg(test)]
mod tests {
    use opal_errors::Diagnostic;
    use salsa::DatabaseImpl;
    use text_size::TextRange;

    use super::*;
    use crate::SyntaxKind::*;
    use crate::{GreenNode, GreenToken, GreenTrivia, NodeOrToken};

    #[test]
    fn diagnostics_come_out_in_source_order_with_ranges() {
        let db = DatabaseImpl::new();

        // a[ with both the key and the closing bracket absent.
        let name = NodeOrToken::Token(GreenToken::new(
            &db,
            GreenTrivia::empty(),
            NAME,
            Box::<str>::from("a"),
            GreenTrivia::empty(),
        ));
        let bracket = NodeOrToken::Token(GreenToken::new(
            &db,
            GreenTrivia::empty(),
            LEFT_BRACKET,
            Box::<str>::from("["),
            GreenTrivia::empty(),
        ));
        let key = GreenNode::missing(&db, Diagnostic::error("expected an expression"));
        let close = GreenNode::missing(&db, Diagnostic::error("expected `]`"));
        let index = GreenNode::new(
            &db,
            INDEX_EXPR,
            vec![name, bracket, NodeOrToken::Node(key), NodeOrToken::Node(close)],
        );
        let module = GreenNode::new(&db, MODULE, vec![NodeOrToken::Node(index)]);

        let root = RedNode::new_root(&db, module);
        let diagnostics = collect_diagnostics(&db, root);

        assert_eq!(diagnostics.len(), 2);
        assert_eq!(diagnostics[0].message(), "expected an expression");
        assert_eq!(diagnostics[0].range(), TextRange::new(2.into(), 2.into()));
        assert_eq!(diagnostics[1].message(), "expected `]`");
        assert_eq!(diagnostics[1].range(), TextRange::new(2.into(), 2.into()));
    }

    #[test]
    fn clean_tree_yields_nothing() {
        let db = DatabaseImpl::new();

        let one = NodeOrToken::Token(GreenToken::new(
            &db,
            GreenTrivia::empty(),
            INT_NUMBER,
            Box::<str>::from("1"),
            GreenTrivia::empty(),
        ));
        let literal = GreenNode::new(&db, LITERAL, vec![one]);
        let module = GreenNode::new(&db, MODULE, vec![NodeOrToken::Node(literal)]);

        let root = RedNode::new_root(&db, module);
        assert!(collect_diagnostics(&db, root).is_empty());
    }
}
