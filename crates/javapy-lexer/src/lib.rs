//! javapy lexer -- tokenizer for the Java subset translated by javapy.
//!
//! The core (`javapy-parser` / `javapy-translator`) treats the lexer as an
//! external collaborator and only specifies the token-stream interface it
//! consumes (kind + text, peek/consume). This crate supplies a concrete
//! implementation of that interface so the workspace is runnable end to end.

mod cursor;

use cursor::Cursor;
use javapy_common::{token::OPERATORS, LexError, LexErrorKind, Span, Token, TokenKind};

/// Tokenize `source` fully, returning every significant token (comments and
/// whitespace are discarded, not emitted) followed by a trailing `Eof`
/// token, plus any lexer errors encountered along the way.
///
/// The parser never sees a partially-lexed stream: lexing always runs to
/// completion, collecting errors rather than aborting, matching this pack's
/// `mesh-common::error::LexError` recovery style.
pub fn tokenize(source: &str) -> (Vec<Token>, Vec<LexError>) {
    let mut lexer = Lexer::new(source);
    let mut tokens = Vec::new();
    loop {
        let tok = lexer.next_token();
        let is_eof = tok.kind == TokenKind::Eof;
        tokens.push(tok);
        if is_eof {
            break;
        }
    }
    (tokens, lexer.errors)
}

struct Lexer<'src> {
    cursor: Cursor<'src>,
    errors: Vec<LexError>,
}

impl<'src> Lexer<'src> {
    fn new(source: &'src str) -> Self {
        Self {
            cursor: Cursor::new(source),
            errors: Vec::new(),
        }
    }

    fn next_token(&mut self) -> Token {
        self.skip_trivia();

        let start = self.cursor.pos();
        let Some(c) = self.cursor.peek() else {
            return Token::eof(start);
        };

        if c.is_ascii_digit() {
            return self.lex_number(start);
        }
        if is_ident_start(c) {
            return self.lex_ident_or_keyword(start);
        }
        if c == '"' {
            return self.lex_string(start);
        }
        if c == '\'' {
            return self.lex_char(start);
        }

        self.lex_operator_or_punct(start)
    }

    /// Skip whitespace, `//` line comments, and `/* */` block comments.
    /// Comments carry no semantic payload in this subset's AST, so they are
    /// simply discarded rather than threaded through as trivia tokens.
    fn skip_trivia(&mut self) {
        loop {
            self.cursor.eat_while(|c| c.is_whitespace());
            if self.cursor.peek() == Some('/') && self.cursor.peek_next() == Some('/') {
                self.cursor.eat_while(|c| c != '\n');
                continue;
            }
            if self.cursor.peek() == Some('/') && self.cursor.peek_next() == Some('*') {
                let start = self.cursor.pos();
                self.cursor.advance();
                self.cursor.advance();
                let mut closed = false;
                while let Some(c) = self.cursor.advance() {
                    if c == '*' && self.cursor.peek() == Some('/') {
                        self.cursor.advance();
                        closed = true;
                        break;
                    }
                }
                if !closed {
                    self.errors.push(LexError::new(
                        LexErrorKind::UnterminatedBlockComment,
                        Span::new(start, self.cursor.pos()),
                    ));
                }
                continue;
            }
            break;
        }
    }

    fn lex_ident_or_keyword(&mut self, start: u32) -> Token {
        self.cursor.advance();
        self.cursor.eat_while(is_ident_continue);
        let text = self.cursor.slice(start, self.cursor.pos());
        let kind = if javapy_common::token::is_keyword(text) {
            TokenKind::Keyword
        } else {
            TokenKind::Ident
        };
        Token::new(kind, text, Span::new(start, self.cursor.pos()))
    }

    /// Integer literals (decimal, `0x`, `0b`, `0`-prefixed octal) and
    /// floating-point literals (`3.14`, `1.0e10`, trailing `f`/`d`/`L`
    /// suffix). `_` digit separators are accepted, matching Java syntax.
    fn lex_number(&mut self, start: u32) -> Token {
        let is_digit_or_sep = |c: char| c.is_ascii_digit() || c == '_';

        if self.cursor.peek() == Some('0')
            && matches!(self.cursor.peek_next(), Some('x') | Some('X'))
        {
            self.cursor.advance();
            self.cursor.advance();
            let digits_start = self.cursor.pos();
            self.cursor
                .eat_while(|c| c.is_ascii_hexdigit() || c == '_');
            let text = self.cursor.slice(start, self.cursor.pos());
            if self.cursor.pos() == digits_start {
                self.errors.push(LexError::new(
                    LexErrorKind::InvalidNumberLiteral(text.to_string()),
                    Span::new(start, self.cursor.pos()),
                ));
            }
            return Token::new(TokenKind::Number, text, Span::new(start, self.cursor.pos()));
        }
        if self.cursor.peek() == Some('0')
            && matches!(self.cursor.peek_next(), Some('b') | Some('B'))
        {
            self.cursor.advance();
            self.cursor.advance();
            let digits_start = self.cursor.pos();
            self.cursor.eat_while(|c| c == '0' || c == '1' || c == '_');
            let text = self.cursor.slice(start, self.cursor.pos());
            if self.cursor.pos() == digits_start {
                self.errors.push(LexError::new(
                    LexErrorKind::InvalidNumberLiteral(text.to_string()),
                    Span::new(start, self.cursor.pos()),
                ));
            }
            return Token::new(TokenKind::Number, text, Span::new(start, self.cursor.pos()));
        }

        self.cursor.eat_while(is_digit_or_sep);

        let mut is_float = false;
        if self.cursor.peek() == Some('.') && self.cursor.peek_next().is_some_and(|c| c.is_ascii_digit())
        {
            is_float = true;
            self.cursor.advance();
            self.cursor.eat_while(is_digit_or_sep);
        }
        if matches!(self.cursor.peek(), Some('e') | Some('E')) {
            is_float = true;
            self.cursor.advance();
            if matches!(self.cursor.peek(), Some('+') | Some('-')) {
                self.cursor.advance();
            }
            self.cursor.eat_while(|c: char| c.is_ascii_digit());
        }
        let _ = is_float;
        if matches!(
            self.cursor.peek(),
            Some('f') | Some('F') | Some('d') | Some('D') | Some('l') | Some('L')
        ) {
            self.cursor.advance();
        }

        let text = self.cursor.slice(start, self.cursor.pos());
        Token::new(TokenKind::Number, text, Span::new(start, self.cursor.pos()))
    }

    fn lex_string(&mut self, start: u32) -> Token {
        self.cursor.advance(); // opening "
        let mut closed = false;
        while let Some(c) = self.cursor.peek() {
            if c == '"' {
                self.cursor.advance();
                closed = true;
                break;
            }
            if c == '\\' {
                self.lex_escape();
                continue;
            }
            if c == '\n' {
                break;
            }
            self.cursor.advance();
        }
        if !closed {
            self.errors.push(LexError::new(
                LexErrorKind::UnterminatedString,
                Span::new(start, self.cursor.pos()),
            ));
        }
        let text = self.cursor.slice(start, self.cursor.pos());
        Token::new(TokenKind::String, text, Span::new(start, self.cursor.pos()))
    }

    /// Consumes a backslash escape inside a string or char literal, reporting
    /// `InvalidEscapeSequence` for anything other than Java's simple escapes
    /// (`\n \t \r \b \f \s \0 \' \" \\`) or a `\uXXXX` unicode escape.
    fn lex_escape(&mut self) {
        let esc_start = self.cursor.pos();
        self.cursor.advance(); // backslash
        match self.cursor.peek() {
            Some('u') => {
                self.cursor.advance();
                for _ in 0..4 {
                    match self.cursor.peek() {
                        Some(h) if h.is_ascii_hexdigit() => {
                            self.cursor.advance();
                        }
                        _ => {
                            self.errors.push(LexError::new(
                                LexErrorKind::InvalidEscapeSequence('u'),
                                Span::new(esc_start, self.cursor.pos()),
                            ));
                            return;
                        }
                    }
                }
            }
            Some(ec) if is_simple_escape(ec) => {
                self.cursor.advance();
            }
            Some(ec) => {
                self.cursor.advance();
                self.errors.push(LexError::new(
                    LexErrorKind::InvalidEscapeSequence(ec),
                    Span::new(esc_start, self.cursor.pos()),
                ));
            }
            None => {}
        }
    }

    fn lex_char(&mut self, start: u32) -> Token {
        self.cursor.advance(); // opening '
        let mut closed = false;
        while let Some(c) = self.cursor.peek() {
            if c == '\'' {
                self.cursor.advance();
                closed = true;
                break;
            }
            if c == '\\' {
                self.lex_escape();
                continue;
            }
            if c == '\n' {
                break;
            }
            self.cursor.advance();
        }
        if !closed {
            self.errors.push(LexError::new(
                LexErrorKind::UnterminatedChar,
                Span::new(start, self.cursor.pos()),
            ));
        }
        let text = self.cursor.slice(start, self.cursor.pos());
        Token::new(TokenKind::Char, text, Span::new(start, self.cursor.pos()))
    }

    /// Greedily match the longest known operator or punctuation spelling at
    /// the cursor. `OPERATORS` is ordered longest-first so e.g. `>>>=` is
    /// preferred over `>>>`, `>>`, then `>`.
    fn lex_operator_or_punct(&mut self, start: u32) -> Token {
        let rest = self.cursor.peek_str(4);
        for op in OPERATORS {
            if rest.starts_with(op) {
                for _ in 0..op.chars().count() {
                    self.cursor.advance();
                }
                return Token::new(TokenKind::Op, *op, Span::new(start, self.cursor.pos()));
            }
        }
        for p in javapy_common::token::PUNCTUATION {
            if rest.starts_with(p) {
                self.cursor.advance();
                return Token::new(TokenKind::Punct, *p, Span::new(start, self.cursor.pos()));
            }
        }

        let c = self.cursor.advance().expect("checked non-eof above");
        self.errors.push(LexError::new(
            LexErrorKind::UnexpectedCharacter(c),
            Span::new(start, self.cursor.pos()),
        ));
        Token::new(TokenKind::Op, c.to_string(), Span::new(start, self.cursor.pos()))
    }
}

fn is_simple_escape(c: char) -> bool {
    matches!(c, 'n' | 't' | 'r' | 'b' | 'f' | 's' | '0' | '\'' | '"' | '\\')
}

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '$'
}

fn is_ident_continue(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}
