use opal_syntax::SyntaxKind::*;
use opal_syntax::SyntaxSet;

use super::{delimited, exprs, name};
use crate::parser::Parser;

pub(crate) fn module(p: &mut Parser) {
    let m = p.start();

    while !p.at(EOF) {
        item(p);
    }

    p.eof();
    m.complete(p, MODULE);
}

fn item(p: &mut Parser) {
    match p.peek_kind() {
        FUN_KW => fn_(p),
        _ => exprs::stmt(p),
    }
}

fn fn_(p: &mut Parser) {
    debug_assert_eq!(p.peek_kind(), FUN_KW);

    let m = p.start();
    p.advance();

    name(p, &SyntaxSet::new([LEFT_PAREN, LEFT_BRACE, FUN_KW]));

    if p.at(LEFT_PAREN) {
        param_list(p);
    } else {
        p.missing("expected function parameters");
    }

    exprs::block(p);

    m.complete(p, FN);
}

fn param_list(p: &mut Parser) {
    let m = p.start();
    delimited(
        p,
        LEFT_PAREN,
        RIGHT_PAREN,
        COMMA,
        "expected a parameter name",
        &SyntaxSet::new([NAME]),
        param,
    );
    m.complete(p, PARAM_LIST);
}

fn param(p: &mut Parser) -> bool {
    match p.peek_kind() {
        NAME => {
            let m = p.start();
            name(p, &SyntaxSet::EMPTY);
            m.complete(p, PARAM);
            true
        }
        _ => false,
    }
}
