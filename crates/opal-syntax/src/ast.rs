use salsa::Database;

use crate::SyntaxKind::*;
use crate::{GreenNode, Red, RedNode, RedToken};

pub trait Node<'db> {
    fn cast(db: &'db dyn Database, syntax: RedNode<'db>) -> Option<Self>
    where
        Self: Sized;

    fn syntax(self) -> RedNode<'db>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Module<'db>(RedNode<'db>);

impl<'db> Module<'db> {
    pub fn new(db: &'db dyn Database, root: GreenNode<'db>) -> Self {
        Self(RedNode::new_root(db, root))
    }

    pub fn items(self, db: &'db dyn Database) -> impl Iterator<Item = Item<'db>> + 'db {
        self.0.children(db).filter_map(Red::into_node).filter_map(|syntax| Item::cast(db, syntax))
    }
}

impl<'db> Node<'db> for Module<'db> {
    fn cast(db: &'db dyn Database, syntax: RedNode<'db>) -> Option<Self>
    where
        Self: Sized,
    {
        (syntax.kind(db) == MODULE).then_some(Self(syntax))
    }

    fn syntax(self) -> RedNode<'db> {
        self.0
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Item<'db> {
    Fn(Fn<'db>),
    Val(ValStmt<'db>),
    Expr(ExprStmt<'db>),
}

impl<'db> Node<'db> for Item<'db> {
    fn cast(db: &'db dyn Database, syntax: RedNode<'db>) -> Option<Self>
    where
        Self: Sized,
    {
        match syntax.kind(db) {
            FN => Item::Fn(Fn(syntax)).into(),
            VAL_STMT => Item::Val(ValStmt(syntax)).into(),
            EXPR_STMT => Item::Expr(ExprStmt(syntax)).into(),
            _ => None,
        }
    }

    fn syntax(self) -> RedNode<'db> {
        match self {
            Item::Fn(f) => f.0,
            Item::Val(val) => val.0,
            Item::Expr(expr) => expr.0,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Fn<'db>(RedNode<'db>);

impl<'db> Fn<'db> {
    pub fn name(self, db: &'db dyn Database) -> Option<Ident<'db>> {
        self.0.children(db).filter_map(Red::into_node).find_map(|syntax| Ident::cast(db, syntax))
    }

    pub fn param_list(self, db: &'db dyn Database) -> Option<ParamList<'db>> {
        self.0
            .children(db)
            .filter_map(Red::into_node)
            .find_map(|syntax| ParamList::cast(db, syntax))
    }

    pub fn body(self, db: &'db dyn Database) -> Option<StmtList<'db>> {
        self.0.children(db).filter_map(Red::into_node).find_map(|syntax| StmtList::cast(db, syntax))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ParamList<'db>(RedNode<'db>);

impl<'db> ParamList<'db> {
    pub fn params(self, db: &'db dyn Database) -> impl Iterator<Item = Param<'db>> + 'db {
        self.0.children(db).filter_map(Red::into_node).filter_map(|syntax| Param::cast(db, syntax))
    }
}

impl<'db> Node<'db> for ParamList<'db> {
    fn cast(db: &'db dyn Database, syntax: RedNode<'db>) -> Option<Self>
    where
        Self: Sized,
    {
        (syntax.kind(db) == PARAM_LIST).then_some(Self(syntax))
    }

    fn syntax(self) -> RedNode<'db> {
        self.0
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Param<'db>(RedNode<'db>);

impl<'db> Param<'db> {
    pub fn name(self, db: &'db dyn Database) -> Option<Ident<'db>> {
        self.0.children(db).filter_map(Red::into_node).find_map(|syntax| Ident::cast(db, syntax))
    }
}

impl<'db> Node<'db> for Param<'db> {
    fn cast(db: &'db dyn Database, syntax: RedNode<'db>) -> Option<Self>
    where
        Self: Sized,
    {
        (syntax.kind(db) == PARAM).then_some(Self(syntax))
    }

    fn syntax(self) -> RedNode<'db> {
        self.0
    }
}

#[derive(Debug, Clone, Copy)]
pub struct StmtList<'db>(RedNode<'db>);

impl<'db> StmtList<'db> {
    pub fn stmts(self, db: &'db dyn Database) -> impl Iterator<Item = Item<'db>> + 'db {
        self.0.children(db).filter_map(Red::into_node).filter_map(|syntax| Item::cast(db, syntax))
    }
}

impl<'db> Node<'db> for StmtList<'db> {
    fn cast(db: &'db dyn Database, syntax: RedNode<'db>) -> Option<Self>
    where
        Self: Sized,
    {
        (syntax.kind(db) == STMT_LIST).then_some(Self(syntax))
    }

    fn syntax(self) -> RedNode<'db> {
        self.0
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ValStmt<'db>(RedNode<'db>);

impl<'db> ValStmt<'db> {
    pub fn name(self, db: &'db dyn Database) -> Option<Ident<'db>> {
        self.0
            .children(db)
            .filter_map(Red::into_node)
            .next()
            .and_then(|syntax| Ident::cast(db, syntax))
    }

    pub fn value(self, db: &'db dyn Database) -> Option<Expr<'db>> {
        // The initializer is the last child; a missing `=` leaves a sentinel
        // in between, so counting from the front would misfire.
        self.0
            .children(db)
            .filter_map(Red::into_node)
            .last()
            .and_then(|syntax| Expr::cast(db, syntax))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ExprStmt<'db>(RedNode<'db>);

impl<'db> ExprStmt<'db> {
    pub fn expr(self, db: &'db dyn Database) -> Option<Expr<'db>> {
        self.0
            .children(db)
            .filter_map(Red::into_node)
            .next()
            .and_then(|syntax| Expr::cast(db, syntax))
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Expr<'db> {
    Literal(Literal<'db>),
    Ident(Ident<'db>),
    Prefix(Prefix<'db>),
    Binary(Binary<'db>),
    Postfix(Postfix<'db>),
    Paren(Paren<'db>),
    List(List<'db>),
    Index(Index<'db>),
    Call(Call<'db>),
    Field(Field<'db>),
    Missing(Missing<'db>),
}

impl<'db> Node<'db> for Expr<'db> {
    fn cast(db: &'db dyn Database, syntax: RedNode<'db>) -> Option<Self>
    where
        Self: Sized,
    {
        match syntax.kind(db) {
            LITERAL => Expr::Literal(Literal(syntax)).into(),
            IDENT => Expr::Ident(Ident(syntax)).into(),
            PREFIX_EXPR => Expr::Prefix(Prefix(syntax)).into(),
            BINARY_EXPR => Expr::Binary(Binary(syntax)).into(),
            POSTFIX_EXPR => Expr::Postfix(Postfix(syntax)).into(),
            PAREN_EXPR => Expr::Paren(Paren(syntax)).into(),
            LIST_EXPR => Expr::List(List(syntax)).into(),
            INDEX_EXPR => Expr::Index(Index(syntax)).into(),
            CALL_EXPR => Expr::Call(Call(syntax)).into(),
            FIELD_EXPR => Expr::Field(Field(syntax)).into(),
            MISSING => Expr::Missing(Missing(syntax)).into(),
            _ => None,
        }
    }

    fn syntax(self) -> RedNode<'db> {
        match self {
            Expr::Literal(literal) => literal.0,
            Expr::Ident(ident) => ident.0,
            Expr::Prefix(prefix) => prefix.0,
            Expr::Binary(binary) => binary.0,
            Expr::Postfix(postfix) => postfix.0,
            Expr::Paren(paren) => paren.0,
            Expr::List(list) => list.0,
            Expr::Index(index) => index.0,
            Expr::Call(call) => call.0,
            Expr::Field(field) => field.0,
            Expr::Missing(missing) => missing.0,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Literal<'db>(RedNode<'db>);

impl<'db> Literal<'db> {
    pub fn kind(self, db: &'db dyn Database) -> Option<LiteralKind<'db>> {
        let token = self.0.children(db).filter_map(Red::into_token).next()?;
        match token.kind(db) {
            INT_NUMBER => Some(LiteralKind::Int(token)),
            FLOAT_NUMBER => Some(LiteralKind::Float(token)),
            _ => None,
        }
    }
}

pub enum LiteralKind<'db> {
    Int(RedToken<'db>),
    Float(RedToken<'db>),
}

#[derive(Debug, Clone, Copy)]
pub struct Ident<'db>(RedNode<'db>);

impl<'db> Ident<'db> {
    pub fn text(self, db: &'db dyn Database) -> Option<&'db str> {
        self.0
            .children(db)
            .filter_map(Red::into_token)
            .next()
            .map(|token| token.green(db).text_trimmed(db))
    }
}

impl<'db> Node<'db> for Ident<'db> {
    fn cast(db: &'db dyn Database, syntax: RedNode<'db>) -> Option<Self>
    where
        Self: Sized,
    {
        (syntax.kind(db) == IDENT).then_some(Self(syntax))
    }

    fn syntax(self) -> RedNode<'db> {
        self.0
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Prefix<'db>(RedNode<'db>);

impl<'db> Prefix<'db> {
    pub fn op(self, db: &'db dyn Database) -> Option<&'db str> {
        self.0
            .children(db)
            .filter_map(Red::into_token)
            .next()
            .map(|token| token.green(db).text_trimmed(db))
    }

    pub fn expr(self, db: &'db dyn Database) -> Option<Expr<'db>> {
        self.0
            .children(db)
            .filter_map(Red::into_node)
            .next()
            .and_then(|syntax| Expr::cast(db, syntax))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Binary<'db>(RedNode<'db>);

impl<'db> Binary<'db> {
    pub fn lhs(self, db: &'db dyn Database) -> Option<Expr<'db>> {
        self.0
            .children(db)
            .filter_map(Red::into_node)
            .next()
            .and_then(|syntax| Expr::cast(db, syntax))
    }

    pub fn op(self, db: &'db dyn Database) -> Option<&'db str> {
        self.0
            .children(db)
            .filter_map(Red::into_token)
            .next()
            .map(|token| token.green(db).text_trimmed(db))
    }

    pub fn rhs(self, db: &'db dyn Database) -> Option<Expr<'db>> {
        self.0
            .children(db)
            .filter_map(Red::into_node)
            .nth(1)
            .and_then(|syntax| Expr::cast(db, syntax))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Postfix<'db>(RedNode<'db>);

impl<'db> Postfix<'db> {
    pub fn expr(self, db: &'db dyn Database) -> Option<Expr<'db>> {
        self.0
            .children(db)
            .filter_map(Red::into_node)
            .next()
            .and_then(|syntax| Expr::cast(db, syntax))
    }

    pub fn op(self, db: &'db dyn Database) -> Option<&'db str> {
        self.0
            .children(db)
            .filter_map(Red::into_token)
            .next()
            .map(|token| token.green(db).text_trimmed(db))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Paren<'db>(RedNode<'db>);

impl<'db> Paren<'db> {
    pub fn expr(self, db: &'db dyn Database) -> Option<Expr<'db>> {
        self.0
            .children(db)
            .filter_map(Red::into_node)
            .next()
            .and_then(|syntax| Expr::cast(db, syntax))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct List<'db>(RedNode<'db>);

impl<'db> List<'db> {
    pub fn elements(self, db: &'db dyn Database) -> impl Iterator<Item = Expr<'db>> + 'db {
        self.0.children(db).filter_map(Red::into_node).filter_map(|syntax| Expr::cast(db, syntax))
    }
}

/// `container[key]`: four children, always. Absent pieces are missing
/// sentinels, so `container` and `key` sit in fixed slots.
#[derive(Debug, Clone, Copy)]
pub struct Index<'db>(RedNode<'db>);

impl<'db> Index<'db> {
    pub fn container(self, db: &'db dyn Database) -> Option<Expr<'db>> {
        self.0
            .children(db)
            .filter_map(Red::into_node)
            .next()
            .and_then(|syntax| Expr::cast(db, syntax))
    }

    pub fn key(self, db: &'db dyn Database) -> Option<Expr<'db>> {
        self.0
            .children(db)
            .filter_map(Red::into_node)
            .nth(1)
            .and_then(|syntax| Expr::cast(db, syntax))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Call<'db>(RedNode<'db>);

impl<'db> Call<'db> {
    pub fn callee(self, db: &'db dyn Database) -> Option<Expr<'db>> {
        self.0
            .children(db)
            .filter_map(Red::into_node)
            .next()
            .and_then(|syntax| Expr::cast(db, syntax))
    }

    pub fn arg_list(self, db: &'db dyn Database) -> Option<ArgList<'db>> {
        self.0.children(db).filter_map(Red::into_node).find_map(|syntax| ArgList::cast(db, syntax))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ArgList<'db>(RedNode<'db>);

impl<'db> ArgList<'db> {
    pub fn args(self, db: &'db dyn Database) -> impl Iterator<Item = Expr<'db>> + 'db {
        self.0.children(db).filter_map(Red::into_node).filter_map(|syntax| Expr::cast(db, syntax))
    }
}

impl<'db> Node<'db> for ArgList<'db> {
    fn cast(db: &'db dyn Database, syntax: RedNode<'db>) -> Option<Self>
    where
        Self: Sized,
    {
        (syntax.kind(db) == ARG_LIST).then_some(Self(syntax))
    }

    fn syntax(self) -> RedNode<'db> {
        self.0
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Field<'db>(RedNode<'db>);

impl<'db> Field<'db> {
    pub fn receiver(self, db: &'db dyn Database) -> Option<Expr<'db>> {
        self.0
            .children(db)
            .filter_map(Red::into_node)
            .next()
            .and_then(|syntax| Expr::cast(db, syntax))
    }

    pub fn name(self, db: &'db dyn Database) -> Option<Ident<'db>> {
        self.0
            .children(db)
            .filter_map(Red::into_node)
            .skip(1)
            .find_map(|syntax| Ident::cast(db, syntax))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Missing<'db>(RedNode<'db>);

impl<'db> Missing<'db> {
    pub fn syntax(self) -> RedNode<'db> {
        self.0
    }
}
