//! Lexical analyzer for SAD source text.
//!
//! The lexer converts source text into a stream of [`Token`]s for parsing.
//! It handles whitespace, `!` line comments, string literals, numeric
//! literals, and all language tokens defined in the
//! [`tokens`](super::tokens) module.
//!
//! The public entry point is [`tokenize`], which performs error-recovering
//! lexical analysis and collects all diagnostics in a single pass.

use sadconv_core::element::SadType;
use winnow::{
    Parser as _,
    combinator::{alt, cut_err, opt, preceded},
    error::{ContextError, ErrMode, ModalResult},
    stream::{LocatingSlice, Location, Stream},
    token::{literal, one_of, take_while},
};

use crate::{
    error::{Diagnostic, DiagnosticCollector, ErrorCode, ParseError},
    span::Span,
    tokens::{PositionedToken, Token},
};

/// Rich diagnostic information for lexer errors.
///
/// Attached to winnow errors via `.context()` to provide detailed error
/// messages with codes, help text, and precise span information.
#[derive(Debug, Clone, PartialEq, Eq)]
struct LexerDiagnostic {
    pub code: ErrorCode,
    pub message: &'static str,
    pub help: Option<&'static str>,
    /// The error span covers from `start` to the error position.
    pub start: usize,
}

type Input<'a> = LocatingSlice<&'a str>;
type IResult<'a, O> = ModalResult<O, ContextError<LexerDiagnostic>>;

/// Parse a string literal with double quotes.
///
/// SAD strings have no escape sequences; the content runs to the next
/// double quote on the same line. A string that hits a newline or the end
/// of input before closing is reported as E001.
fn string_literal<'a>(input: &mut Input<'a>) -> IResult<'a, Token<'a>> {
    let start_pos = input.current_token_start();

    '"'.parse_next(input)
        .map_err(|_: ErrMode<ContextError<LexerDiagnostic>>| {
            ErrMode::Backtrack(ContextError::new())
        })?;

    // Commit after the opening quote so a missing close is a hard error
    // with a span from the opening quote to the error position.
    cut_err((take_while(0.., |c| c != '"' && c != '\n'), '"'))
        .context(LexerDiagnostic {
            code: ErrorCode::E001,
            message: "unterminated string literal",
            help: Some("add closing `\"` before the end of the line"),
            start: start_pos,
        })
        .map(|(content, _): (&str, char)| Token::StringLiteral(content.to_string()))
        .parse_next(input)
}

/// Parse a numeric literal.
///
/// Accepts `123`, `1.5`, `.5`, `5.`, and scientific notation with either
/// exponent case. Signs are separate tokens handled by the parser, so this
/// never consumes a leading `+` or `-`. An exponent marker with no digits
/// after it is reported as E003.
fn number<'a>(input: &mut Input<'a>) -> IResult<'a, Token<'a>> {
    let start_pos = input.current_token_start();

    let mantissa = alt((
        // digits [. digits]
        (
            take_while(1.., |c: char| c.is_ascii_digit()),
            opt(('.', take_while(0.., |c: char| c.is_ascii_digit()))),
        )
            .take(),
        // . digits
        ('.', take_while(1.., |c: char| c.is_ascii_digit())).take(),
    ));

    let exponent = (
        one_of(['e', 'E']),
        cut_err((
            opt(one_of(['+', '-'])),
            take_while(1.., |c: char| c.is_ascii_digit()),
        ))
        .context(LexerDiagnostic {
            code: ErrorCode::E003,
            message: "malformed numeric literal",
            help: Some("an exponent needs at least one digit: `1.5e3`"),
            start: start_pos,
        }),
    );

    (mantissa, opt(exponent))
        .take()
        .parse_next(input)
        .map(|text: &str| {
            let value = text
                .parse::<f64>()
                .expect("matched digits form a valid float");
            Token::Number(value)
        })
}

/// Parse line comment starting with '!'
fn line_comment<'a>(input: &mut Input<'a>) -> IResult<'a, Token<'a>> {
    preceded('!', take_while(0.., |c| c != '\n'))
        .map(Token::LineComment)
        .parse_next(input)
}

/// Parse a word and classify it as a keyword or identifier.
///
/// SAD keywords are case-insensitive, so classification happens after the
/// whole word is taken. Anything that is not `LINE`, `DEG`, or one of the
/// recognized element type keywords becomes an identifier.
fn word<'a>(input: &mut Input<'a>) -> IResult<'a, Token<'a>> {
    take_while(1.., |c: char| {
        c.is_ascii_alphanumeric() || c == '_' || c == '.' || c == '$'
    })
    .verify(|s: &str| {
        s.chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
    })
    .map(|s: &str| {
        if s.eq_ignore_ascii_case("LINE") {
            Token::Line
        } else if s.eq_ignore_ascii_case("DEG") {
            Token::Deg
        } else if let Some(ty) = SadType::from_keyword(s) {
            Token::ElementType(ty)
        } else {
            Token::Identifier(s)
        }
    })
    .parse_next(input)
}

/// Parse the `:=` assignment operator (must come before single chars)
fn assign<'a>(input: &mut Input<'a>) -> IResult<'a, Token<'a>> {
    literal(":=").value(Token::Assign).parse_next(input)
}

/// Parse single character tokens
fn single_char_token<'a>(input: &mut Input<'a>) -> IResult<'a, Token<'a>> {
    alt((
        '='.value(Token::Equals),
        '('.value(Token::LParen),
        ')'.value(Token::RParen),
        ';'.value(Token::Semicolon),
        ','.value(Token::Comma),
        '*'.value(Token::Star),
        '-'.value(Token::Minus),
        '+'.value(Token::Plus),
        '/'.value(Token::Slash),
    ))
    .parse_next(input)
}

/// Parse whitespace (spaces, tabs, etc. but not newlines)
fn whitespace<'a>(input: &mut Input<'a>) -> IResult<'a, Token<'a>> {
    take_while(1.., |c: char| c.is_whitespace() && c != '\n')
        .value(Token::Whitespace)
        .parse_next(input)
}

/// Parse newline
fn newline<'a>(input: &mut Input<'a>) -> IResult<'a, Token<'a>> {
    '\n'.value(Token::Newline).parse_next(input)
}

/// Parse a single token with position tracking
fn positioned_token<'a>(input: &mut Input<'a>) -> IResult<'a, PositionedToken<'a>> {
    let start_pos = input.current_token_start();

    let token = alt((
        line_comment,      // '!' to end of line
        string_literal,    // Must come before any single char
        assign,            // Must come before single char operators
        number,            // Must come before word and single char '.'
        word,              // Keywords classified after the word is taken
        single_char_token, // Single character tokens
        newline,           // Must come before whitespace
        whitespace,        // General whitespace
    ))
    .parse_next(input)?;

    let end_pos = input.current_token_start();
    let span = Span::new(start_pos..end_pos);

    Ok(PositionedToken::new(token, span))
}

/// Lexer that accumulates tokens and diagnostics during tokenization.
struct Lexer<'a> {
    tokens: Vec<PositionedToken<'a>>,
    diagnostics: DiagnosticCollector,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer.
    fn new() -> Self {
        Self {
            tokens: Vec::new(),
            diagnostics: DiagnosticCollector::new(),
        }
    }

    /// Tokenize the input, collecting tokens and errors.
    fn tokenize(&mut self, mut input: Input<'a>) {
        while !input.is_empty() {
            match positioned_token(&mut input) {
                Ok(token) => {
                    self.tokens.push(token);
                }
                Err(e) => {
                    // Get position before recovery
                    let error_pos = input.current_token_start();

                    let diagnostic = Self::convert_err_mode(e, error_pos);
                    self.diagnostics.emit(diagnostic);

                    // Skip one character and keep scanning so every error
                    // in the file is reported in a single pass.
                    if !input.is_empty() {
                        input.next_token();
                    }
                }
            }
        }
    }

    /// Finish lexing and return tokens or collected errors.
    fn finish(self) -> Result<Vec<PositionedToken<'a>>, ParseError> {
        self.diagnostics.finish().map(|()| self.tokens)
    }

    /// Convert an ErrMode and error position to a Diagnostic.
    ///
    /// Extracts `LexerDiagnostic` from the error context for rich error info
    /// with code, message, and help. Falls back to E002 (unexpected character)
    /// if no diagnostic context is found.
    fn convert_err_mode(
        err: ErrMode<ContextError<LexerDiagnostic>>,
        error_pos: usize,
    ) -> Diagnostic {
        let context_error = match err {
            ErrMode::Backtrack(ctx) | ErrMode::Cut(ctx) => ctx,
            ErrMode::Incomplete(_) => ContextError::new(),
        };

        // Use the first diagnostic context if available
        if let Some(LexerDiagnostic {
            code,
            message,
            help,
            start,
        }) = context_error.context().next()
        {
            let span = Span::new(*start..error_pos);

            let mut diag = Diagnostic::error(*message)
                .with_code(*code)
                .with_label(span, code.description());
            if let Some(h) = help {
                diag = diag.with_help(*h);
            }
            return diag;
        }

        // Fallback when no context is present
        let span = Span::new(error_pos..error_pos.saturating_add(1));
        Diagnostic::error("unexpected character")
            .with_code(ErrorCode::E002)
            .with_label(span, ErrorCode::E002.description())
    }
}

/// Parse tokens from a string input, collecting multiple errors.
///
/// Attempts to recover from errors and continue tokenizing, collecting
/// all errors encountered. This provides better user experience by
/// reporting multiple issues in a single pass.
///
/// # Returns
///
/// - `Ok(tokens)` - All tokens successfully parsed
/// - `Err(ParseError)` - One or more errors occurred; contains all diagnostics
pub fn tokenize(input: &str) -> Result<Vec<PositionedToken<'_>>, ParseError> {
    let located_input = LocatingSlice::new(input);
    let mut lexer = Lexer::new();
    lexer.tokenize(located_input);
    lexer.finish()
}


#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    // ===================
    // Strategies
    // ===================

    /// Strategy for generating valid element name strings.
    /// Names start with a letter and avoid the case-insensitive keywords.
    fn element_name_strategy() -> impl Strategy<Value = String> {
        "[A-Z][A-Z0-9_]{0,12}".prop_filter("avoid keywords", |s| {
            !matches!(
                s.as_str(),
                "DRIFT"
                    | "QUAD"
                    | "BEND"
                    | "SEXT"
                    | "SOL"
                    | "CAVI"
                    | "MONI"
                    | "MARK"
                    | "MAP"
                    | "APERT"
                    | "COORD"
                    | "MULT"
                    | "LINE"
                    | "DEG"
            )
        })
    }

    /// Strategy for generating valid numeric literal strings.
    fn number_strategy() -> impl Strategy<Value = String> {
        (0u32..10000, 0u32..10000).prop_map(|(integer, fraction)| format!("{integer}.{fraction}"))
    }

    // ===================
    // Property Test Functions
    // ===================

    /// Valid element names should always tokenize successfully.
    fn check_element_names_tokenize(name: &str) -> Result<(), TestCaseError> {
        let source = format!("DRIFT {name} = (L 1.0);");
        let result = tokenize(&source);

        let err = result.err();
        prop_assert!(
            err.is_none(),
            "Failed to tokenize valid element name `{name}`: {err:?}"
        );
        Ok(())
    }

    /// Numeric literals with various integer and fractional parts should parse.
    fn check_numbers_parse(number: &str) -> Result<(), TestCaseError> {
        let source = format!("QUAD QF = (K1 {number});");
        let result = tokenize(&source);

        let err = result.err();
        prop_assert!(
            err.is_none(),
            "Failed to tokenize numeric literal `{number}`: {err:?}"
        );
        Ok(())
    }

    // ===================
    // Proptest Wrappers
    // ===================

    proptest! {
        #[test]
        fn element_names_tokenize(name in element_name_strategy()) {
            check_element_names_tokenize(&name)?;
        }

        #[test]
        fn numbers_parse(number in number_strategy()) {
            check_numbers_parse(&number)?;
        }
    }
}
