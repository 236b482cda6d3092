//! Stack-based builder for green trees.
//!
//! The parser drives it through `start_node`/`finish_node` pairs with tokens
//! in between. Unbalanced use is a defect in the caller, not in the input,
//! and panics.

use opal_errors::Diagnostic;
use salsa::Database;
use text_size::TextRange;

use crate::green::{Green, GreenNode, GreenToken, GreenTrivia};
use crate::{NodeOrToken, SyntaxKind};

pub struct Builder<'db> {
    db: &'db dyn Database,
    text: &'db str,
    stack: Vec<InProgress<'db>>,
    root: Option<GreenNode<'db>>,
}

struct InProgress<'db> {
    kind: SyntaxKind,
    children: Vec<Green<'db>>,
    diagnostics: Vec<Diagnostic>,
}

impl<'db> Builder<'db> {
    pub fn new(db: &'db dyn Database, text: &'db str) -> Self {
        Self { db, text, stack: Vec::with_capacity(16), root: None }
    }

    /// Starts a new node of the given kind.
    pub fn start_node(&mut self, kind: SyntaxKind) {
        self.stack.push(InProgress { kind, children: Vec::new(), diagnostics: Vec::new() });
    }

    /// Finishes the most recently started node, attaching any pending
    /// diagnostics to the freshly constructed green node.
    pub fn finish_node(&mut self) {
        let frame = self.stack.pop().expect("finish_node without start_node");
        let mut node = GreenNode::new(self.db, frame.kind, frame.children);
        for diagnostic in frame.diagnostics {
            node = node.with_diagnostic(self.db, diagnostic);
        }
        match self.stack.last_mut() {
            Some(parent) => parent.children.push(NodeOrToken::Node(node)),
            None => {
                assert!(self.root.is_none(), "more than one root node");
                self.root = Some(node);
            }
        }
    }

    /// Adds a token; `kind_range` covers the token text without trivia.
    pub fn token(
        &mut self,
        leading: GreenTrivia,
        kind: SyntaxKind,
        kind_range: TextRange,
        trailing: GreenTrivia,
    ) {
        let range =
            TextRange::new(kind_range.start() - leading.len(), kind_range.end() + trailing.len());
        let text: Box<str> = self.text[range].into();
        let token = GreenToken::new(self.db, leading, kind, text, trailing);
        self.stack
            .last_mut()
            .expect("token outside of a node")
            .children
            .push(NodeOrToken::Token(token));
    }

    /// Attaches a diagnostic to the node currently being built.
    pub fn attach_diagnostic(&mut self, diagnostic: Diagnostic) {
        self.stack
            .last_mut()
            .expect("diagnostic outside of a node")
            .diagnostics
            .push(diagnostic);
    }

    /// Finishes building and returns the green root.
    pub fn finish(mut self) -> GreenNode<'db> {
        assert!(self.stack.is_empty(), "unfinished nodes left on the builder");
        self.root.take().expect("no root node")
    }
}
