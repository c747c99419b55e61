use std::iter::Peekable;
use std::str::CharIndices;

use crate::ParseError;

/// A lexical token of a math expression.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Token {
    Number(f64),
    Ident(String),
    /// One of `+ - * / ^`. `**` is folded into `^`.
    Op(char),
    OParen,
    CParen,
}

/// Splits an expression into `(position, token)` pairs.
///
/// Positions are character offsets into the source, used for error messages.
pub(crate) struct Lexer<'a> {
    src: Peekable<CharIndices<'a>>,
    text: &'a str,
}

impl<'a> Lexer<'a> {
    pub(crate) fn new(text: &'a str) -> Self {
        Self {
            src: text.char_indices().peekable(),
            text,
        }
    }

    fn skip_whitespace(&mut self) {
        while self.src.next_if(|(_, c)| c.is_whitespace()).is_some() {}
    }

    fn char_position(&self, byte: usize) -> usize {
        self.text[..byte].chars().count()
    }

    fn scan_number(&mut self, start: usize) -> Result<Token, ParseError> {
        let mut end = start;
        while let Some((i, c)) = self.src.next_if(|(_, c)| c.is_ascii_digit() || *c == '.') {
            end = i + c.len_utf8();
        }

        // Exponent: only when followed by digits, so `2*e` keeps `e` the constant.
        let mut lookahead = self.src.clone();
        if let Some((_, 'e' | 'E')) = lookahead.next() {
            let sign = lookahead.next_if(|(_, c)| *c == '+' || *c == '-');
            if lookahead.peek().is_some_and(|(_, c)| c.is_ascii_digit()) {
                self.src.next();
                if sign.is_some() {
                    self.src.next();
                }
                while let Some((i, c)) = self.src.next_if(|(_, c)| c.is_ascii_digit()) {
                    end = i + c.len_utf8();
                }
            }
        }

        let literal = &self.text[start..end];
        literal
            .parse::<f64>()
            .map(Token::Number)
            .map_err(|_| ParseError::InvalidNumber {
                position: self.char_position(start),
                literal: literal.to_owned(),
            })
    }

    fn scan_ident(&mut self, start: usize) -> Token {
        let mut end = start;
        while let Some((i, c)) = self.src.next_if(|(_, c)| c.is_alphanumeric() || *c == '_') {
            end = i + c.len_utf8();
        }
        Token::Ident(self.text[start..end].to_owned())
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<(usize, Token), ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.skip_whitespace();
        let &(start, c) = self.src.peek()?;
        let position = self.char_position(start);

        let token = match c {
            '0'..='9' | '.' => self.scan_number(start),
            c if c.is_alphabetic() || c == '_' => Ok(self.scan_ident(start)),
            '*' => {
                self.src.next();
                if self.src.next_if(|(_, c)| *c == '*').is_some() {
                    Ok(Token::Op('^'))
                } else {
                    Ok(Token::Op('*'))
                }
            }
            '+' | '-' | '/' | '^' => {
                self.src.next();
                Ok(Token::Op(c))
            }
            '(' => {
                self.src.next();
                Ok(Token::OParen)
            }
            ')' => {
                self.src.next();
                Ok(Token::CParen)
            }
            found => {
                self.src.next();
                Err(ParseError::UnexpectedChar { position, found })
            }
        };

        Some(token.map(|t| (position, t)))
    }
}
