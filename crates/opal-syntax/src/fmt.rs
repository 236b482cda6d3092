use std::fmt::Write as _;

use salsa::Database;

use crate::red::{Red, RedNode};

/// Renders the tree as indented `KIND@start..end` lines, one per node or
/// token, with token text quoted. Meant for snapshot tests.
pub fn debug_tree(db: &dyn Database, root: RedNode<'_>) -> String {
    let mut output = String::new();
    node(db, root, 0, &mut output);
    output
}

fn node(db: &dyn Database, node: RedNode<'_>, depth: usize, output: &mut String) {
    let indent = "  ".repeat(depth);
    let _ = writeln!(output, "{indent}{:?}@{:?}", node.kind(db), node.text_range(db));

    for child in node.children(db) {
        match child {
            Red::Node(child) => self::node(db, child, depth + 1, output),
            Red::Token(token) => {
                let indent = "  ".repeat(depth + 1);
                let _ = writeln!(
                    output,
                    "{indent}{:?}@{:?} {:?}",
                    token.kind(db),
                    token.text_range(db),
                    token.green(db).text(db),
                );
            }
        }
    }
}
