//! On-demand tokenizer.
//!
//! Tokens carry their trivia: whitespace and comments before the token text
//! become leading trivia, those after it trailing trivia. Nothing in the
//! input is dropped, which is what lets the tree reproduce the source
//! byte for byte.

mod cursor;

use cursor::{Cursor, EOF_CHAR};
pub use opal_syntax::SyntaxKind;
use opal_syntax::SyntaxKind::*;
use opal_syntax::{GreenTrivia, TriviaPiece, TriviaPieceKind};
use text_size::{TextRange, TextSize};

#[derive(Debug, Clone)]
pub struct Token {
    pub leading: GreenTrivia,
    pub kind: SyntaxKind,
    pub kind_range: TextRange,
    pub trailing: GreenTrivia,
}

impl Token {
    const EOF: Self = Self {
        kind: EOF,
        kind_range: TextRange::empty(TextSize::new(0)),
        leading: GreenTrivia::empty(),
        trailing: GreenTrivia::empty(),
    };
}

pub struct Tokenizer<'db> {
    text: &'db str,
    cursor: Cursor<'db>,
    current: Token,
    trivia_pieces: Vec<TriviaPiece>,
}

impl<'db> Tokenizer<'db> {
    pub fn new(text: &'db str) -> Self {
        let mut tokenizer = Self {
            text,
            cursor: Cursor::new(text),
            current: Token::EOF,
            trivia_pieces: Vec::with_capacity(4),
        };
        tokenizer.next_token();
        tokenizer
    }

    pub fn peek(&self) -> &Token {
        &self.current
    }

    fn offset(&self) -> TextSize {
        TextSize::new(self.text.len() as u32) - self.cursor.len()
    }

    fn range(&self) -> TextRange {
        let end = self.offset();
        let len = self.cursor.pos_within_token();
        TextRange::at(end - len, len)
    }

    fn text(&self) -> &'db str {
        &self.text[self.range()]
    }

    pub fn next_token(&mut self) -> Token {
        self.trivia();
        let trailing_start = self.trivia_pieces.len();
        let (kind, kind_range) = self.syntax_kind();
        self.trivia();

        let (leading, trailing) = self.trivia_pieces.split_at(trailing_start);
        let leading = GreenTrivia::new(leading);
        let trailing = GreenTrivia::new(trailing);

        self.trivia_pieces.clear();
        std::mem::replace(&mut self.current, Token { leading, kind, kind_range, trailing })
    }

    fn trivia(&mut self) {
        loop {
            let kind = match self.cursor.peek() {
                '/' if self.cursor.second() == '/' => {
                    self.cursor.advance_while(|c| c != '\n');
                    TriviaPieceKind::SingleLineComment
                }
                first_char => {
                    // The consumer must accept everything the gate lets
                    // through, or a stray character loops here forever.
                    if first_char.is_whitespace() {
                        self.cursor.advance_while(char::is_whitespace);
                        TriviaPieceKind::Whitespace
                    } else {
                        break;
                    }
                }
            };

            self.trivia_pieces.push(TriviaPiece::new(kind, self.cursor.pos_within_token()));
            self.cursor.reset_pos_within_token();
        }
    }

    fn syntax_kind(&mut self) -> (SyntaxKind, TextRange) {
        let previous = self.cursor.previous();

        let kind = match self.cursor.advance() {
            '(' => LEFT_PAREN,
            ')' => RIGHT_PAREN,
            '[' => LEFT_BRACKET,
            ']' => RIGHT_BRACKET,
            '{' => LEFT_BRACE,
            '}' => RIGHT_BRACE,
            ',' => COMMA,
            first_char @ '0'..='9' => self.number(first_char),
            'A'..='Z' | 'a'..='z' | '_' => {
                self.cursor.advance_while(|c| c.is_ascii_alphanumeric() || c == '_');

                match self.text() {
                    "fun" => FUN_KW,
                    "val" => VAL_KW,
                    _ => NAME,
                }
            }
            EOF_CHAR => EOF,
            first_char => {
                if is_operator(first_char) {
                    self.cursor.advance_while(is_operator);

                    let left_bound = match previous {
                        '(' | '[' | '{' | ',' => false,
                        EOF_CHAR => false,
                        prev => !prev.is_ascii_whitespace(),
                    };

                    let right_bound = match self.cursor.peek() {
                        ')' | ']' | '}' | ',' => false,
                        '.' => !left_bound,
                        EOF_CHAR => false,
                        peeked => !peeked.is_ascii_whitespace(),
                    };

                    match self.text() {
                        "=" => EQ,
                        "." => DOT,
                        _ => {
                            if left_bound == right_bound {
                                BINARY_OPERATOR
                            } else if left_bound {
                                POSTFIX_OPERATOR
                            } else {
                                PREFIX_OPERATOR
                            }
                        }
                    }
                } else {
                    UNKNOWN
                }
            }
        };

        let range = self.range();
        self.cursor.reset_pos_within_token();

        (kind, range)
    }

    fn number(&mut self, c: char) -> SyntaxKind {
        if c == '0' {
            match self.cursor.peek() {
                'b' | 'o' => {
                    self.cursor.advance();
                    self.digits(false);
                }
                'x' => {
                    self.cursor.advance();
                    self.digits(true);
                }
                '0'..='9' | '_' | '.' | 'e' | 'E' => {
                    self.digits(false);
                }
                _ => return INT_NUMBER,
            }
        } else {
            self.digits(false);
        }

        if self.cursor.matches('.') && self.cursor.second() != '.' {
            self.cursor.advance();
            self.digits(false);
            self.float_exponent();
            return FLOAT_NUMBER;
        }

        if self.cursor.matches('e') || self.cursor.matches('E') {
            self.float_exponent();
            return FLOAT_NUMBER;
        }

        INT_NUMBER
    }

    fn digits(&mut self, allow_hex: bool) {
        loop {
            match self.cursor.peek() {
                '_' | '0'..='9' => {
                    self.cursor.advance();
                }
                'a'..='f' | 'A'..='F' if allow_hex => {
                    self.cursor.advance();
                }
                _ => return,
            }
        }
    }

    fn float_exponent(&mut self) {
        if self.cursor.matches('e') || self.cursor.matches('E') {
            self.cursor.advance();
            if self.cursor.matches('-') || self.cursor.matches('+') {
                self.cursor.advance();
            }
            self.digits(false);
        }
    }
}

fn is_operator(c: char) -> bool {
    matches!(
        c,
        '/' | '=' | '-' | '+' | '*' | '%' | '<' | '>' | '!' | '&' | '|' | '^' | '~' | '.' | '?'
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token_text<'a>(token: &Token, text: &'a str) -> &'a str {
        &text[token.kind_range]
    }

    fn kinds(text: &str) -> Vec<SyntaxKind> {
        let mut tokenizer = Tokenizer::new(text);
        let mut kinds = Vec::new();
        loop {
            let token = tokenizer.next_token();
            if token.kind == EOF {
                break;
            }
            kinds.push(token.kind);
        }
        kinds
    }

    #[test]
    fn integer_literals() {
        for input in ["123", "0", "0b1010", "0o755", "0x1f", "123_456"] {
            let mut tokenizer = Tokenizer::new(input);
            let token = tokenizer.next_token();
            assert_eq!(token.kind, INT_NUMBER, "input: {input}");
            assert!(tokenizer.cursor.is_eof(), "input not fully consumed: {input}");
        }
    }

    #[test]
    fn float_literals() {
        for input in ["123.456", "0.0", "1e10", "1.0e-5", "123_456.789_012"] {
            let mut tokenizer = Tokenizer::new(input);
            let token = tokenizer.next_token();
            assert_eq!(token.kind, FLOAT_NUMBER, "input: {input}");
            assert!(tokenizer.cursor.is_eof(), "input not fully consumed: {input}");
        }
    }

    #[test]
    fn keywords_and_names() {
        assert_eq!(kinds("fun val value function"), vec![FUN_KW, VAL_KW, NAME, NAME]);
    }

    #[test]
    fn eq_and_dot_are_distinguished_from_operators() {
        let text = "x = y.z == w";
        assert_eq!(kinds(text), vec![NAME, EQ, NAME, DOT, NAME, BINARY_OPERATOR, NAME]);
    }

    #[test]
    fn operator_fixity_follows_whitespace_bounds() {
        assert_eq!(kinds("-a"), vec![PREFIX_OPERATOR, NAME]);
        assert_eq!(kinds("a++"), vec![NAME, POSTFIX_OPERATOR]);
        assert_eq!(kinds("a + b"), vec![NAME, BINARY_OPERATOR, NAME]);
        assert_eq!(kinds("a+b"), vec![NAME, BINARY_OPERATOR, NAME]);
        assert_eq!(kinds("- a"), vec![BINARY_OPERATOR, NAME]);
        assert_eq!(kinds("(-a) + (b++)"), vec![
            LEFT_PAREN,
            PREFIX_OPERATOR,
            NAME,
            RIGHT_PAREN,
            BINARY_OPERATOR,
            LEFT_PAREN,
            NAME,
            POSTFIX_OPERATOR,
            RIGHT_PAREN,
        ]);
    }

    #[test]
    fn index_brackets() {
        let text = "container[key]";
        let mut tokenizer = Tokenizer::new(text);

        let token = tokenizer.next_token();
        assert_eq!(token.kind, NAME);
        assert_eq!(token_text(&token, text), "container");

        let token = tokenizer.next_token();
        assert_eq!(token.kind, LEFT_BRACKET);

        let token = tokenizer.next_token();
        assert_eq!(token.kind, NAME);
        assert_eq!(token_text(&token, text), "key");

        let token = tokenizer.next_token();
        assert_eq!(token.kind, RIGHT_BRACKET);

        assert_eq!(tokenizer.next_token().kind, EOF);
    }

    #[test]
    fn trivia_is_attached_not_dropped() {
        let text = "  a // trailing\nb";
        let mut tokenizer = Tokenizer::new(text);

        let a = tokenizer.next_token();
        assert_eq!(a.kind, NAME);
        assert_eq!(a.leading.len(), TextSize::new(2));
        // One space, the comment, and the newline.
        assert_eq!(a.trailing.pieces().len(), 3);

        let b = tokenizer.next_token();
        assert_eq!(b.kind, NAME);
        assert!(b.leading.is_empty());
        assert!(b.trailing.is_empty());

        let total: u32 = a.leading.len().into();
        let covered = total
            + u32::from(a.kind_range.len())
            + u32::from(a.trailing.len())
            + u32::from(b.kind_range.len());
        assert_eq!(covered as usize, text.len());
    }

    #[test]
    fn non_ascii_whitespace_is_trivia() {
        let text = "a\u{a0}b";
        let mut tokenizer = Tokenizer::new(text);

        let a = tokenizer.next_token();
        assert_eq!(a.kind, NAME);
        // U+00A0 is two bytes of trailing trivia.
        assert_eq!(a.trailing.len(), TextSize::new(2));

        let b = tokenizer.next_token();
        assert_eq!(b.kind, NAME);
        assert_eq!(tokenizer.next_token().kind, EOF);
    }

    #[test]
    fn unknown_characters_are_single_tokens() {
        assert_eq!(kinds("a # b"), vec![NAME, UNKNOWN, NAME]);
    }
}
