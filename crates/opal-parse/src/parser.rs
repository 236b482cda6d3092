use drop_bomb::DropBomb;
use opal_errors::Diagnostic;
use opal_syntax::{Builder, GreenNode, SyntaxKind};
use opal_tokenizer::{Token, Tokenizer};
use salsa::Database;

/// Recursion limit for nested expressions. Inputs nesting deeper than this
/// get a missing sentinel instead of blowing the stack.
const MAX_DEPTH: u32 = 128;

pub(crate) struct Parser<'db> {
    db: &'db dyn Database,
    text: &'db str,
    tokenizer: Tokenizer<'db>,
    events: Vec<Event>,
    depth: u32,
    consumed: u32,
}

impl<'db> Parser<'db> {
    pub(crate) fn new(db: &'db dyn Database, text: &'db str) -> Self {
        Self {
            db,
            text,
            tokenizer: Tokenizer::new(text),
            events: Vec::new(),
            depth: 0,
            consumed: 0,
        }
    }

    /// Number of tokens consumed so far. Loops compare it across an
    /// iteration to detect that they stopped making progress.
    pub(crate) fn position(&self) -> u32 {
        self.consumed
    }

    pub(crate) fn peek_kind(&self) -> SyntaxKind {
        self.tokenizer.peek().kind
    }

    pub(crate) fn at(&self, kind: SyntaxKind) -> bool {
        self.peek_kind() == kind
    }

    pub(crate) fn advance(&mut self) {
        if self.at(SyntaxKind::EOF) {
            return;
        }

        let token = self.tokenizer.next_token();
        self.events.push(Event::Token(token));
        self.consumed += 1;
    }

    pub(crate) fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.advance();
            return true;
        }
        false
    }

    /// Consumes `kind` if present; otherwise fills its slot with a missing
    /// sentinel so the parent keeps its arity.
    pub(crate) fn expect(&mut self, kind: SyntaxKind) {
        if !self.eat(kind) {
            self.missing(format!("expected {}", kind.show()));
        }
    }

    pub(crate) fn start(&mut self) -> Marker {
        let pos = self.events.len() as u32;
        self.events.push(Event::TOMBSTONE);
        Marker::new(pos)
    }

    /// Emits a zero-width missing node carrying one diagnostic.
    pub(crate) fn missing(&mut self, message: impl Into<String>) -> CompletedMarker {
        let m = self.start();
        self.events.push(Event::Diagnostic(Diagnostic::error(message)));
        m.complete(self, SyntaxKind::MISSING)
    }

    /// Wraps the token at the current position into an error node. Used to
    /// skip past input the grammar cannot place.
    pub(crate) fn error_bump(&mut self, message: &str) {
        let m = self.start();
        self.events.push(Event::Diagnostic(Diagnostic::error(message)));
        self.advance();
        m.complete(self, SyntaxKind::ERROR);
    }

    /// Materializes the end-of-input token so trailing trivia survives in
    /// the tree.
    pub(crate) fn eof(&mut self) {
        debug_assert!(self.at(SyntaxKind::EOF));
        let token = self.tokenizer.next_token();
        self.events.push(Event::Token(token));
    }

    pub(crate) fn enter_nested(&mut self) -> bool {
        if self.depth == MAX_DEPTH {
            return false;
        }
        self.depth += 1;
        true
    }

    pub(crate) fn exit_nested(&mut self) {
        self.depth -= 1;
    }

    pub(crate) fn build_tree(self) -> GreenNode<'db> {
        let Parser { db, text, tokenizer: _, mut events, depth: _, consumed: _ } = self;
        let mut builder = Builder::new(db, text);
        let mut forward_parents = Vec::new();

        for i in 0..events.len() {
            match std::mem::replace(&mut events[i], Event::TOMBSTONE) {
                Event::Start { kind, forward_parent } => {
                    if kind == SyntaxKind::TOMBSTONE {
                        continue;
                    }

                    forward_parents.push(kind);
                    let mut idx = i;
                    let mut fp = forward_parent;
                    while let Some(fwd) = fp {
                        idx += fwd as usize;

                        fp = match std::mem::replace(&mut events[idx], Event::TOMBSTONE) {
                            Event::Start { kind, forward_parent, .. } => {
                                if kind != SyntaxKind::TOMBSTONE {
                                    forward_parents.push(kind);
                                }
                                forward_parent
                            }
                            _ => unreachable!(),
                        };
                    }

                    for kind in forward_parents.drain(..).rev() {
                        builder.start_node(kind);
                    }
                }
                Event::Finish => {
                    builder.finish_node();
                }
                Event::Token(Token { leading, kind, kind_range, trailing }) => {
                    builder.token(leading, kind, kind_range, trailing);
                }
                Event::Diagnostic(diagnostic) => {
                    builder.attach_diagnostic(diagnostic);
                }
            }
        }

        builder.finish()
    }
}

enum Event {
    Start { kind: SyntaxKind, forward_parent: Option<u32> },
    Token(Token),
    Diagnostic(Diagnostic),
    Finish,
}

impl Event {
    const TOMBSTONE: Self = Event::Start { kind: SyntaxKind::TOMBSTONE, forward_parent: None };
}

pub(crate) struct Marker {
    position: u32,
    bomb: DropBomb,
}

impl Marker {
    fn new(pos: u32) -> Marker {
        Marker {
            position: pos,
            bomb: DropBomb::new("Marker must be either completed or abandoned"),
        }
    }

    pub(crate) fn complete(mut self, p: &mut Parser<'_>, kind: SyntaxKind) -> CompletedMarker {
        self.bomb.defuse();

        match &mut p.events[self.position as usize] {
            Event::Start { kind: slot, .. } => {
                *slot = kind;
            }
            _ => unreachable!(),
        }

        p.events.push(Event::Finish);
        CompletedMarker::new(self.position)
    }
}

pub(crate) struct CompletedMarker {
    pos: u32,
}

impl CompletedMarker {
    fn new(pos: u32) -> Self {
        CompletedMarker { pos }
    }

    /// Starts a new node that will wrap the completed one; this is how
    /// left-associative chains grow upward without backtracking.
    pub(crate) fn precede(self, p: &mut Parser<'_>) -> Marker {
        let new_pos = p.start();

        match &mut p.events[self.pos as usize] {
            Event::Start { forward_parent, .. } => {
                *forward_parent = Some(new_pos.position - self.pos);
            }
            _ => unreachable!(),
        }

        new_pos
    }
}
