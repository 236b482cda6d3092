use opal_syntax::SyntaxKind::{self, *};
use opal_syntax::SyntaxSet;

use crate::parser::Parser;

mod exprs;
pub(crate) mod items;

/// Parses an identifier into an [`IDENT`] node.
///
/// On anything else, tokens outside `recovery` are wrapped into error nodes
/// and skipped; once the lookahead is in `recovery` (or at end of input) a
/// missing sentinel takes the identifier's slot instead.
pub(crate) fn name(p: &mut Parser, recovery: &SyntaxSet) {
    loop {
        match p.peek_kind() {
            NAME => {
                let m = p.start();
                p.advance();
                m.complete(p, IDENT);
                return;
            }
            kind if kind == EOF || recovery.contains(kind) => {
                p.missing("expected an identifier");
                return;
            }
            _ => p.error_bump("expected an identifier"),
        }
    }
}

pub(crate) fn delimited(
    p: &mut Parser<'_>,
    bra: SyntaxKind,
    ket: SyntaxKind,
    delim: SyntaxKind,
    unexpected_delim_message: &'static str,
    first_set: &SyntaxSet,
    mut parser: impl FnMut(&mut Parser<'_>) -> bool,
) {
    debug_assert_eq!(p.peek_kind(), bra);
    p.advance();

    while !p.at(ket) && !p.at(EOF) {
        if p.at(delim) {
            p.error_bump(unexpected_delim_message);
            continue;
        }

        let before = p.position();
        if !parser(p) {
            break;
        }

        if !p.eat(delim) {
            if first_set.contains(p.peek_kind()) {
                p.expect(delim);
            } else {
                break;
            }
        }

        // An element parser at the nesting limit emits only zero-width
        // sentinels; without a token consumed this iteration we would
        // re-test the same lookahead forever.
        if p.position() == before {
            break;
        }
    }

    p.expect(ket);
}
