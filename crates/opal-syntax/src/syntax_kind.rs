#[allow(non_camel_case_types)]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum SyntaxKind {
    LEFT_PAREN,
    RIGHT_PAREN,
    LEFT_BRACKET,
    RIGHT_BRACKET,
    LEFT_BRACE,
    RIGHT_BRACE,
    COMMA,
    EQ,
    DOT,

    FUN_KW,
    VAL_KW,
    NAME,

    INT_NUMBER,
    FLOAT_NUMBER,
    BINARY_OPERATOR,
    POSTFIX_OPERATOR,
    PREFIX_OPERATOR,

    UNKNOWN,
    EOF,

    MODULE,
    FN,
    PARAM_LIST,
    PARAM,
    STMT_LIST,
    VAL_STMT,
    EXPR_STMT,
    LITERAL,
    IDENT,
    PREFIX_EXPR,
    BINARY_EXPR,
    POSTFIX_EXPR,
    PAREN_EXPR,
    LIST_EXPR,
    INDEX_EXPR,
    CALL_EXPR,
    FIELD_EXPR,
    ARG_LIST,
    MISSING,
    ERROR,
    TOMBSTONE,
}

impl SyntaxKind {
    /// Returns `true` for the zero-width placeholder standing in for an
    /// absent required construct.
    pub fn is_missing(self) -> bool {
        self == Self::MISSING
    }

    /// Human-readable description used in "expected …" diagnostics.
    pub fn show(self) -> &'static str {
        match self {
            Self::LEFT_PAREN => "`(`",
            Self::RIGHT_PAREN => "`)`",
            Self::LEFT_BRACKET => "`[`",
            Self::RIGHT_BRACKET => "`]`",
            Self::LEFT_BRACE => "`{`",
            Self::RIGHT_BRACE => "`}`",
            Self::COMMA => "`,`",
            Self::EQ => "`=`",
            Self::DOT => "`.`",
            Self::FUN_KW => "`fun`",
            Self::VAL_KW => "`val`",
            Self::NAME => "an identifier",
            Self::INT_NUMBER | Self::FLOAT_NUMBER => "a number",
            Self::BINARY_OPERATOR | Self::POSTFIX_OPERATOR | Self::PREFIX_OPERATOR => {
                "an operator"
            }
            Self::EOF => "end of input",
            _ => "a syntax element",
        }
    }
}
