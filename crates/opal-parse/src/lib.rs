//! Recursive descent parser producing lossless syntax trees.
//!
//! Parsing never fails: malformed input comes back as a tree with error
//! nodes wrapping skipped tokens and zero-width missing sentinels filling
//! the slots of absent constructs, each carrying a diagnostic.

use opal_errors::SpannedDiagnostic;
use opal_inputs::File;
use opal_syntax::{GreenNode, RedNode, ast, collect_diagnostics};

mod grammar;
mod parser;

pub fn module<'db>(db: &'db dyn salsa::Database, text: &'db str) -> ast::Module<'db> {
    let mut parser = parser::Parser::new(db, text);
    grammar::items::module(&mut parser);
    ast::Module::new(db, parser.build_tree())
}

/// Memoized parse of a [`File`]. Re-running it after an edit rebuilds the
/// spine while unchanged subtrees come back interned, so they are shared
/// with the previous tree.
#[salsa::tracked]
pub fn parse_file<'db>(db: &'db dyn salsa::Database, file: File) -> GreenNode<'db> {
    let mut parser = parser::Parser::new(db, file.text(db));
    grammar::items::module(&mut parser);
    parser.build_tree()
}

/// Memoized parse diagnostics of a [`File`], in source order.
#[salsa::tracked(returns(ref))]
pub fn file_diagnostics(db: &dyn salsa::Database, file: File) -> Vec<SpannedDiagnostic> {
    let green = parse_file(db, file);
    collect_diagnostics(db, RedNode::new_root(db, green))
}

/// Renders each parse diagnostic as `path:line:col: message`, with
/// one-based lines and columns resolved through the file's line index.
pub fn render_diagnostics(db: &dyn salsa::Database, file: File) -> Vec<String> {
    file_diagnostics(db, file)
        .iter()
        .map(|diagnostic| {
            let position = file.line_col(db, diagnostic.range().start());
            format!(
                "{}:{}:{}: {}",
                file.path(db),
                position.line + 1,
                position.col + 1,
                diagnostic.message()
            )
        })
        .collect()
}
