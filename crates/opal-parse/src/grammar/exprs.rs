use opal_syntax::SyntaxKind::*;
use opal_syntax::SyntaxSet;

use super::{delimited, name};
use crate::parser::{CompletedMarker, Parser};

/// Tokens that can start an expression.
pub(crate) const EXPR_FIRST: SyntaxSet =
    SyntaxSet::new([INT_NUMBER, FLOAT_NUMBER, NAME, LEFT_PAREN, LEFT_BRACKET, PREFIX_OPERATOR]);

/// Tokens an expression in panic mode stops skipping at. They all plausibly
/// belong to an enclosing construct, so the enclosing parser gets a chance
/// to resynchronize on them.
const EXPR_RECOVERY: SyntaxSet = SyntaxSet::new([
    RIGHT_PAREN,
    RIGHT_BRACKET,
    RIGHT_BRACE,
    LEFT_BRACE,
    COMMA,
    EQ,
    VAL_KW,
    FUN_KW,
]);

pub(crate) fn stmt(p: &mut Parser) {
    match p.peek_kind() {
        VAL_KW => val_stmt(p),
        FUN_KW => p.error_bump("nested function definitions are not supported"),
        kind if EXPR_FIRST.contains(kind) => {
            let m = expr(p).precede(p);
            m.complete(p, EXPR_STMT);
        }
        _ => p.error_bump("expected a statement"),
    }
}

fn val_stmt(p: &mut Parser) {
    debug_assert_eq!(p.peek_kind(), VAL_KW);

    let m = p.start();
    p.advance();
    name(p, &SyntaxSet::new([EQ]));
    p.expect(EQ);
    expr(p);
    m.complete(p, VAL_STMT);
}

pub(crate) fn block(p: &mut Parser<'_>) {
    if !p.at(LEFT_BRACE) {
        p.missing("expected a block");
        return;
    }

    let m = p.start();
    p.advance();

    while !matches!(p.peek_kind(), RIGHT_BRACE | EOF) {
        stmt(p);
    }

    p.expect(RIGHT_BRACE);
    m.complete(p, STMT_LIST);
}

pub(crate) fn expr(p: &mut Parser) -> CompletedMarker {
    if !p.enter_nested() {
        return p.missing("expression nesting is too deep");
    }

    let mut lhs = unary_expr(p);

    while p.at(BINARY_OPERATOR) {
        let m = lhs.precede(p);
        p.advance();
        unary_expr(p);
        lhs = m.complete(p, BINARY_EXPR);
    }

    p.exit_nested();
    lhs
}

fn unary_expr(p: &mut Parser) -> CompletedMarker {
    if !p.enter_nested() {
        return p.missing("expression nesting is too deep");
    }

    let lhs = match p.peek_kind() {
        PREFIX_OPERATOR => {
            let m = p.start();
            p.advance();
            unary_expr(p);
            m.complete(p, PREFIX_EXPR)
        }
        _ => postfix_expr(p),
    };

    p.exit_nested();
    lhs
}

fn postfix_expr(p: &mut Parser) -> CompletedMarker {
    let mut lhs = primary_expr(p);

    loop {
        lhs = match p.peek_kind() {
            LEFT_BRACKET => index_expr(p, lhs),
            LEFT_PAREN => call_expr(p, lhs),
            DOT => field_expr(p, lhs),
            POSTFIX_OPERATOR => {
                let m = lhs.precede(p);
                p.advance();
                m.complete(p, POSTFIX_EXPR)
            }
            _ => return lhs,
        };
    }
}

/// `container[key]`: four children, with missing sentinels standing in for
/// an absent key or closing bracket.
fn index_expr(p: &mut Parser, lhs: CompletedMarker) -> CompletedMarker {
    debug_assert_eq!(p.peek_kind(), LEFT_BRACKET);

    let m = lhs.precede(p);
    p.advance();
    expr(p);
    p.expect(RIGHT_BRACKET);
    m.complete(p, INDEX_EXPR)
}

fn call_expr(p: &mut Parser, lhs: CompletedMarker) -> CompletedMarker {
    debug_assert_eq!(p.peek_kind(), LEFT_PAREN);

    let m = lhs.precede(p);
    let args = p.start();
    delimited(p, LEFT_PAREN, RIGHT_PAREN, COMMA, "expected an expression", &EXPR_FIRST, arg);
    args.complete(p, ARG_LIST);
    m.complete(p, CALL_EXPR)
}

fn field_expr(p: &mut Parser, lhs: CompletedMarker) -> CompletedMarker {
    debug_assert_eq!(p.peek_kind(), DOT);

    let m = lhs.precede(p);
    p.advance();
    name(p, &SyntaxSet::new([LEFT_PAREN, LEFT_BRACKET, DOT]));
    m.complete(p, FIELD_EXPR)
}

fn primary_expr(p: &mut Parser) -> CompletedMarker {
    loop {
        match p.peek_kind() {
            INT_NUMBER | FLOAT_NUMBER => {
                let m = p.start();
                p.advance();
                return m.complete(p, LITERAL);
            }
            NAME => {
                let m = p.start();
                p.advance();
                return m.complete(p, IDENT);
            }
            LEFT_PAREN => return paren_expr(p),
            LEFT_BRACKET => return list_expr(p),
            kind if kind == EOF || EXPR_RECOVERY.contains(kind) => {
                return p.missing("expected an expression");
            }
            _ => p.error_bump("expected an expression"),
        }
    }
}

fn paren_expr(p: &mut Parser) -> CompletedMarker {
    let m = p.start();
    p.advance();
    expr(p);
    p.expect(RIGHT_PAREN);
    m.complete(p, PAREN_EXPR)
}

fn list_expr(p: &mut Parser) -> CompletedMarker {
    let m = p.start();
    delimited(p, LEFT_BRACKET, RIGHT_BRACKET, COMMA, "expected an expression", &EXPR_FIRST, arg);
    m.complete(p, LIST_EXPR)
}

/// One list element or call argument; refuses tokens that cannot start an
/// expression so `delimited` can resynchronize on them.
fn arg(p: &mut Parser) -> bool {
    if EXPR_FIRST.contains(p.peek_kind()) {
        expr(p);
        return true;
    }
    false
}
