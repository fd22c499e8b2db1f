//! Line-oriented lexer driving [`qc_grammar`]'s [`TokenProducer`] seam.
//!
//! Mirrors the reference tokenizer's structure: read a line at a time
//! (keeping a virtual trailing `\n` so newlines fall out of the ordinary
//! whitespace-skipping path), dispatch on the first character of a token
//! (digit, alpha, `/`, or single-char operator fallback), and capture the
//! token's `SourceContext` before any skipping immediately preceding it.

use qc_base::{Error, Result, SourceContext};
use qc_grammar::{Token, TokenKind, TokenProducer};
use std::io::BufRead;

/// Lexes a `BufRead` source into [`Token`]s on demand.
pub struct Tokenizer<R> {
    reader: R,
    current_line: Option<Vec<char>>,
    current_pos: usize,
    line_number: usize,
    token_line: Option<Vec<char>>,
    token_line_number: usize,
    token_pos: usize,
    current: Token,
}

impl<R: BufRead> Tokenizer<R> {
    /// Opens `reader`, primes the first line, and lexes the first token.
    pub fn new(reader: R) -> Result<Self> {
        let mut t = Tokenizer {
            reader,
            current_line: None,
            current_pos: 0,
            line_number: 0,
            token_line: None,
            token_line_number: 0,
            token_pos: 0,
            current: Token::new(TokenKind::Operator, "", SourceContext::new("", "", 0, 0)),
        };
        t.read_next_line();
        t.lex_next()?;
        Ok(t)
    }

    fn at_eof(&self) -> bool {
        self.current_line.is_none()
    }

    fn current_char(&self) -> Option<char> {
        self.current_line.as_ref().map(|l| l[self.current_pos])
    }

    fn read_next_line(&mut self) {
        let mut buf = String::new();
        match self.reader.read_line(&mut buf) {
            Ok(0) | Err(_) => {
                self.current_line = None;
            }
            Ok(_) => {
                while buf.ends_with('\n') || buf.ends_with('\r') {
                    buf.pop();
                }
                buf.push('\n');
                self.current_line = Some(buf.chars().collect());
                self.current_pos = 0;
                self.line_number += 1;
            }
        }
    }

    fn pop_char(&mut self) {
        if let Some(line) = &self.current_line {
            self.current_pos += 1;
            if self.current_pos >= line.len() {
                self.read_next_line();
            }
        }
    }

    /// Consumes at least one char into `buf`, then continues while the
    /// current char satisfies `pred` — the do-while shape every numeric and
    /// identifier scan in the reference shares.
    fn consume_run(&mut self, buf: &mut String, pred: impl Fn(char) -> bool) {
        loop {
            buf.push(self.current_char().expect("consume_run called at eof"));
            self.pop_char();
            if self.at_eof() || !pred(self.current_char().unwrap()) {
                break;
            }
        }
    }

    fn token_line_text(&self) -> String {
        match &self.token_line {
            Some(chars) => chars[..chars.len() - 1].iter().collect(),
            None => String::new(),
        }
    }

    fn make_token(&self, kind: TokenKind, text: String) -> Token {
        let ctx = SourceContext::new(text.clone(), self.token_line_text(), self.token_line_number, self.token_pos);
        Token::new(kind, text, ctx)
    }

    fn char_error(&self, message: &str) -> Error {
        let text = match self.current_char() {
            Some(c) => c.to_string(),
            None => "<eof>".to_string(),
        };
        let line: String = match &self.current_line {
            Some(chars) => chars[..chars.len() - 1].iter().collect(),
            None => String::new(),
        };
        Error::parse(SourceContext::new(text, line, self.line_number, self.current_pos), message)
    }

    fn skip_blanks(&mut self) {
        while !self.at_eof() && self.current_char().unwrap().is_whitespace() {
            self.pop_char();
        }
    }

    fn skip_comment(&mut self) {
        self.pop_char(); // the '*' of '/*'
        while !self.at_eof() {
            let ch = self.current_char().unwrap();
            self.pop_char();
            if !self.at_eof() && ch == '*' && self.current_char().unwrap() == '/' {
                self.pop_char();
                break;
            }
        }
    }

    /// `None` means a comment was consumed and lexing should loop again;
    /// `Some` is the bare `/` operator token.
    fn parse_slash(&mut self) -> Result<Option<Token>> {
        self.pop_char(); // the leading '/'
        if self.at_eof() {
            return Ok(Some(self.make_token(TokenKind::Operator, "/".to_string())));
        }
        match self.current_char().unwrap() {
            '/' => {
                self.read_next_line();
                Ok(None)
            }
            '*' => {
                self.skip_comment();
                Ok(None)
            }
            _ => Ok(Some(self.make_token(TokenKind::Operator, "/".to_string()))),
        }
    }

    fn parse_identifier(&mut self) -> Token {
        let mut buf = String::new();
        self.consume_run(&mut buf, |c| c.is_ascii_alphanumeric());
        self.make_token(TokenKind::Identifier, buf)
    }

    fn parse_number(&mut self) -> Result<Token> {
        let mut buf = String::new();
        self.consume_run(&mut buf, |c| c.is_ascii_digit());
        if self.at_eof() {
            return Ok(self.make_token(TokenKind::Integer, buf));
        }
        match self.current_char().unwrap() {
            '.' => self.parse_fract(buf),
            'e' | 'E' => self.parse_exp(buf),
            _ => Ok(self.make_token(TokenKind::Integer, buf)),
        }
    }

    fn parse_fract(&mut self, prefix: String) -> Result<Token> {
        let mut buf = prefix;
        self.consume_run(&mut buf, |c| c.is_ascii_digit());
        if self.at_eof() {
            return Ok(self.make_token(TokenKind::Real, buf));
        }
        match self.current_char().unwrap() {
            'e' | 'E' => self.parse_exp(buf),
            _ => Ok(self.make_token(TokenKind::Real, buf)),
        }
    }

    fn parse_exp(&mut self, prefix: String) -> Result<Token> {
        let mut buf = prefix;
        buf.push(self.current_char().unwrap());
        self.pop_char();
        if self.at_eof() {
            return Err(self.char_error("Missing exponent"));
        }
        let mut ch = self.current_char().unwrap();
        if ch == '+' || ch == '-' {
            buf.push(ch);
            self.pop_char();
            if self.at_eof() {
                return Err(self.char_error("Missing exponent"));
            }
            ch = self.current_char().unwrap();
        }
        if !ch.is_ascii_digit() {
            return Err(self.char_error("Missing exponent"));
        }
        self.consume_run(&mut buf, |c| c.is_ascii_digit());
        Ok(self.make_token(TokenKind::Real, buf))
    }

    fn lex_next(&mut self) -> Result<()> {
        loop {
            if self.at_eof() {
                self.current = self.make_token(TokenKind::Eof, String::new());
                return Ok(());
            }
            self.token_line = self.current_line.clone();
            self.token_line_number = self.line_number;
            self.token_pos = self.current_pos;

            let ch = self.current_char().unwrap();
            if ch.is_whitespace() {
                self.skip_blanks();
                continue;
            } else if ch.is_ascii_digit() {
                self.current = self.parse_number()?;
                return Ok(());
            } else if ch.is_alphabetic() {
                self.current = self.parse_identifier();
                return Ok(());
            } else if ch == '/' {
                match self.parse_slash()? {
                    Some(tok) => {
                        self.current = tok;
                        return Ok(());
                    }
                    None => continue,
                }
            } else {
                let text = ch.to_string();
                self.pop_char();
                self.current = self.make_token(TokenKind::Operator, text);
                return Ok(());
            }
        }
    }
}

impl<R: BufRead> TokenProducer for Tokenizer<R> {
    fn current_token(&self) -> &Token {
        &self.current
    }

    fn pop_token(&mut self) -> Result<()> {
        if self.current.kind() == TokenKind::Eof {
            return Ok(());
        }
        self.lex_next()
    }
}
