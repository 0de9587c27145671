use std::fmt;

use sadconv_core::element::SadType;
use winnow::stream::Location;

use crate::span::Span;

/// Token types for the SAD lattice description language
#[derive(Debug, Clone, PartialEq)]
pub enum Token<'src> {
    // Keywords
    /// One of the recognized element type keywords (`DRIFT`, `QUAD`, ...).
    ElementType(SadType),
    /// The `LINE` keyword.
    Line,
    /// The `DEG` unit suffix after a number.
    Deg,

    // Literals
    StringLiteral(String),
    Number(f64),
    Identifier(&'src str),

    // Operators
    Equals, // =
    Assign, // :=
    Star,   // *
    Minus,  // -
    Plus,   // +
    Slash,  // /

    // Punctuation
    LParen,    // (
    RParen,    // )
    Semicolon, // ;
    Comma,     // ,

    // Comments
    LineComment(&'src str), // ! comment

    // Whitespace
    Whitespace,
    Newline,
}

impl Token<'_> {
    /// Whether this token is trivia (whitespace or a comment) that the
    /// parser filters out.
    pub fn is_trivia(&self) -> bool {
        matches!(
            self,
            Token::Whitespace | Token::Newline | Token::LineComment(_)
        )
    }
}

/// A token with position information for winnow integration
#[derive(Debug, Clone, PartialEq)]
pub struct PositionedToken<'src> {
    pub token: Token<'src>,
    pub span: Span,
}

impl<'src> PositionedToken<'src> {
    pub fn new(token: Token<'src>, span: Span) -> Self {
        Self { token, span }
    }
}

impl<'src> std::ops::Deref for PositionedToken<'src> {
    type Target = Token<'src>;

    fn deref(&self) -> &Self::Target {
        &self.token
    }
}

impl<'src> AsRef<Token<'src>> for PositionedToken<'src> {
    fn as_ref(&self) -> &Token<'src> {
        &self.token
    }
}

impl<'src> From<(Token<'src>, Span)> for PositionedToken<'src> {
    fn from((token, span): (Token<'src>, Span)) -> Self {
        Self::new(token, span)
    }
}

impl<'src> fmt::Display for PositionedToken<'src> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.token.fmt(f)
    }
}

impl<'src> Location for PositionedToken<'src> {
    fn previous_token_end(&self) -> usize {
        self.span.start()
    }

    fn current_token_start(&self) -> usize {
        self.span.start()
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::ElementType(ty) => write!(f, "{ty}"),
            Token::Line => write!(f, "LINE"),
            Token::Deg => write!(f, "DEG"),

            Token::StringLiteral(s) => write!(f, "\"{s}\""),
            Token::Number(n) => write!(f, "{n}"),
            Token::Identifier(name) => write!(f, "{name}"),

            Token::Equals => write!(f, "="),
            Token::Assign => write!(f, ":="),
            Token::Star => write!(f, "*"),
            Token::Minus => write!(f, "-"),
            Token::Plus => write!(f, "+"),
            Token::Slash => write!(f, "/"),

            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
            Token::Semicolon => write!(f, ";"),
            Token::Comma => write!(f, ","),

            Token::LineComment(comment) => write!(f, "!{comment}"),
            Token::Whitespace => write!(f, " "),
            Token::Newline => write!(f, "\\n"),
        }
    }
}
