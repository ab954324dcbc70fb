//! Source type expressions.
//!
//! The front end hands over parameter, return and property types either as
//! ready-made [`TypeExpr`] trees or as text in the small recursive grammar
//!
//! ```text
//! type   ::= primary ('?' | '!')*
//! primary ::= name ('<' type (',' type)* '>')?
//!           | '[' type (':' type)? ']'
//!           | '(' (type (',' type)*)? ')' ('->' type)?
//! ```
//!
//! Tuples and function types are parsed so that the mapper can reject them
//! with a faithful rendering of the whole offending expression.

use std::fmt;
use std::str::FromStr;

use logos::Logos;
use thiserror::Error;

use crate::diagnostics::Span;

/// A parsed source type expression. Every node carries the byte span of the
/// text it was parsed from, offset by the base given to [`parse_at`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpr {
    /// `Int`, `String`, `CGPoint`, ...
    Name { name: String, span: Span },
    /// `Array<Int>`, `Dictionary<String, Int>`, `MyType<T>`, ...
    Generic {
        name: String,
        /// Span of the name token alone, for precise diagnostics.
        name_span: Span,
        args: Vec<TypeExpr>,
        span: Span,
    },
    /// `T?` or `T!`
    Optional { inner: Box<TypeExpr>, span: Span },
    /// `[T]`
    Array { element: Box<TypeExpr>, span: Span },
    /// `[K : V]`
    Dictionary {
        key: Box<TypeExpr>,
        value: Box<TypeExpr>,
        span: Span,
    },
    /// `(A, B)` — never bridgeable, kept for error reporting.
    Tuple { elements: Vec<TypeExpr>, span: Span },
    /// `(A) -> B` — never bridgeable, kept for error reporting.
    Function {
        params: Vec<TypeExpr>,
        ret: Box<TypeExpr>,
        span: Span,
    },
}

impl TypeExpr {
    pub fn span(&self) -> Span {
        match self {
            TypeExpr::Name { span, .. }
            | TypeExpr::Generic { span, .. }
            | TypeExpr::Optional { span, .. }
            | TypeExpr::Array { span, .. }
            | TypeExpr::Dictionary { span, .. }
            | TypeExpr::Tuple { span, .. }
            | TypeExpr::Function { span, .. } => *span,
        }
    }
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeExpr::Name { name, .. } => f.write_str(name),
            TypeExpr::Generic { name, args, .. } => {
                write!(f, "{name}<")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                f.write_str(">")
            }
            TypeExpr::Optional { inner, .. } => match inner.as_ref() {
                // A bare function type needs parentheses to take the suffix.
                TypeExpr::Function { .. } => write!(f, "({inner})?"),
                _ => write!(f, "{inner}?"),
            },
            TypeExpr::Array { element, .. } => write!(f, "[{element}]"),
            TypeExpr::Dictionary { key, value, .. } => write!(f, "[{key} : {value}]"),
            TypeExpr::Tuple { elements, .. } => {
                f.write_str("(")?;
                for (i, elem) in elements.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{elem}")?;
                }
                f.write_str(")")
            }
            TypeExpr::Function { params, ret, .. } => {
                f.write_str("(")?;
                for (i, param) in params.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{param}")?;
                }
                write!(f, ") -> {ret}")
            }
        }
    }
}

/// Why a type expression failed to parse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("invalid character in type expression")]
    InvalidToken { span: Span },

    #[error("unexpected end of type expression")]
    UnexpectedEnd { span: Span },

    #[error("expected {expected}")]
    Expected { expected: &'static str, span: Span },

    #[error("trailing input after type expression")]
    Trailing { span: Span },
}

impl ParseError {
    pub fn span(&self) -> Span {
        match self {
            ParseError::InvalidToken { span }
            | ParseError::UnexpectedEnd { span }
            | ParseError::Expected { span, .. }
            | ParseError::Trailing { span } => *span,
        }
    }
}

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n]+")]
enum Token {
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Ident,

    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token(",")]
    Comma,
    #[token("?")]
    Question,
    #[token("!")]
    Bang,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(":")]
    Colon,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("->")]
    Arrow,
}

/// Parse a type expression with spans starting at byte 0.
pub fn parse(src: &str) -> Result<TypeExpr, ParseError> {
    parse_at(src, 0)
}

/// Parse a type expression, offsetting every span by `base` so diagnostics
/// land in the caller's coordinate space.
pub fn parse_at(src: &str, base: usize) -> Result<TypeExpr, ParseError> {
    let mut lexer = Token::lexer(src);
    let mut tokens = Vec::new();
    while let Some(token) = lexer.next() {
        let range = lexer.span();
        let span = Span::new(base + range.start, base + range.end);
        match token {
            Ok(token) => tokens.push((token, span)),
            Err(()) => return Err(ParseError::InvalidToken { span }),
        }
    }

    let mut parser = Parser {
        src,
        base,
        tokens,
        pos: 0,
    };
    let expr = parser.ty()?;
    if let Some((_, span)) = parser.peek() {
        return Err(ParseError::Trailing { span });
    }
    Ok(expr)
}

impl FromStr for TypeExpr {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

struct Parser<'a> {
    src: &'a str,
    base: usize,
    tokens: Vec<(Token, Span)>,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<(Token, Span)> {
        self.tokens.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<(Token, Span)> {
        let token = self.peek();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn eat(&mut self, token: Token) -> Option<Span> {
        match self.peek() {
            Some((t, span)) if t == token => {
                self.pos += 1;
                Some(span)
            }
            _ => None,
        }
    }

    fn expect(&mut self, token: Token, expected: &'static str) -> Result<Span, ParseError> {
        match self.bump() {
            Some((t, span)) if t == token => Ok(span),
            Some((_, span)) => Err(ParseError::Expected { expected, span }),
            None => Err(self.eof()),
        }
    }

    fn eof(&self) -> ParseError {
        let end = self.base + self.src.len();
        ParseError::UnexpectedEnd {
            span: Span::new(end, end),
        }
    }

    fn slice(&self, span: Span) -> &'a str {
        &self.src[span.start - self.base..span.end - self.base]
    }

    fn ty(&mut self) -> Result<TypeExpr, ParseError> {
        let mut expr = self.primary()?;
        loop {
            let suffix = self
                .eat(Token::Question)
                .or_else(|| self.eat(Token::Bang));
            match suffix {
                Some(span) => {
                    let span = expr.span().merge(span);
                    expr = TypeExpr::Optional {
                        inner: Box::new(expr),
                        span,
                    };
                }
                None => return Ok(expr),
            }
        }
    }

    fn primary(&mut self) -> Result<TypeExpr, ParseError> {
        match self.bump() {
            Some((Token::Ident, name_span)) => {
                let name = self.slice(name_span).to_string();
                if self.eat(Token::Lt).is_none() {
                    return Ok(TypeExpr::Name {
                        name,
                        span: name_span,
                    });
                }
                let mut args = vec![self.ty()?];
                while self.eat(Token::Comma).is_some() {
                    args.push(self.ty()?);
                }
                let close = self.expect(Token::Gt, "'>'")?;
                Ok(TypeExpr::Generic {
                    name,
                    name_span,
                    args,
                    span: name_span.merge(close),
                })
            }
            Some((Token::LBracket, open)) => {
                let first = self.ty()?;
                if self.eat(Token::Colon).is_some() {
                    let value = self.ty()?;
                    let close = self.expect(Token::RBracket, "']'")?;
                    Ok(TypeExpr::Dictionary {
                        key: Box::new(first),
                        value: Box::new(value),
                        span: open.merge(close),
                    })
                } else {
                    let close = self.expect(Token::RBracket, "']'")?;
                    Ok(TypeExpr::Array {
                        element: Box::new(first),
                        span: open.merge(close),
                    })
                }
            }
            Some((Token::LParen, open)) => {
                let mut elements = Vec::new();
                if self.eat(Token::RParen).is_none() {
                    elements.push(self.ty()?);
                    while self.eat(Token::Comma).is_some() {
                        elements.push(self.ty()?);
                    }
                    self.expect(Token::RParen, "')'")?;
                }
                let close_end = self.tokens[self.pos - 1].1;
                if self.eat(Token::Arrow).is_some() {
                    let ret = self.ty()?;
                    let span = open.merge(ret.span());
                    return Ok(TypeExpr::Function {
                        params: elements,
                        ret: Box::new(ret),
                        span,
                    });
                }
                // A single parenthesized type is just grouping.
                if elements.len() == 1 {
                    return Ok(elements.into_iter().next().unwrap());
                }
                Ok(TypeExpr::Tuple {
                    elements,
                    span: open.merge(close_end),
                })
            }
            Some((_, span)) => Err(ParseError::Expected {
                expected: "a type",
                span,
            }),
            None => Err(self.eof()),
        }
    }
}
