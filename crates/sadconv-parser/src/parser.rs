//! Parser for SAD source tokens.
//!
//! This module transforms a token stream from the [`lexer`](super::lexer)
//! into the flat statement list defined in [`ast`](super::ast). The public
//! entry point is [`parse_statements`], which expects a trivia-free token
//! slice and recovers at statement boundaries so every malformed
//! declaration in the file is reported in one pass.

use std::f64::consts::PI;

use winnow::{
    Parser as _,
    combinator::{alt, opt, repeat},
    error::{ContextError, ErrMode},
    stream::{Stream, TokenSlice},
    token::any,
};

use sadconv_core::{
    element::{ElementDef, LineDef, LineMember, ParamValue, SadType},
    identifier::Id,
};

use crate::{
    ast::Statement,
    error::{Diagnostic, DiagnosticCollector, ErrorCode, ParseError},
    span::{Span, Spanned},
    tokens::{PositionedToken, Token},
};

/// Context type for parser errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Context {
    /// Description of what is currently being parsed
    Label(&'static str),
    /// Remaining token count (`eof_offset()`) at error start position
    ///
    /// Used to calculate start_offset as: `tokens.len() - start_offset_value`
    StartOffset(usize),
}

type Input<'src> = TokenSlice<'src, PositionedToken<'src>>;
type IResult<O> = std::result::Result<O, ErrMode<ContextError<Context>>>;

fn cut_err<'src, O, F>(input: &mut Input<'src>, f: F) -> IResult<O>
where
    F: FnOnce(&mut Input<'src>) -> IResult<O>,
{
    let start_remaining = input.eof_offset();

    match f(input) {
        Ok(o) => Ok(o),
        Err(ErrMode::Backtrack(mut e)) | Err(ErrMode::Cut(mut e)) => {
            e.push(Context::StartOffset(start_remaining));
            Err(ErrMode::Cut(e))
        }
        Err(e) => Err(e),
    }
}

/// Parse the element type keyword that heads a declaration
fn element_type<'src>(input: &mut Input<'src>) -> IResult<Spanned<SadType>> {
    any.verify_map(|token: &PositionedToken<'_>| match &token.token {
        Token::ElementType(ty) => Some(Spanned::new(*ty, token.span)),
        _ => None,
    })
    .context(Context::Label("element type keyword"))
    .parse_next(input)
}

/// Parse a raw identifier string with span preservation (low-level)
fn raw_identifier<'src>(input: &mut Input<'src>) -> IResult<Spanned<&'src str>> {
    any.verify_map(|token: &PositionedToken<'_>| match &token.token {
        Token::Identifier(name) => Some(Spanned::new(*name, token.span)),
        _ => None,
    })
    .context(Context::Label("identifier"))
    .parse_next(input)
}

/// Parse an identifier as an interned Id (high-level)
fn identifier<'src>(input: &mut Input<'src>) -> IResult<Spanned<Id>> {
    let raw = raw_identifier.parse_next(input)?;
    Ok(raw.map(|name| Id::new(*name)))
}

/// Parse string literal
fn string_literal<'src>(input: &mut Input<'src>) -> IResult<Spanned<String>> {
    any.verify_map(|token: &PositionedToken<'_>| match &token.token {
        Token::StringLiteral(s) => Some(Spanned::new(s.clone(), token.span)),
        _ => None,
    })
    .context(Context::Label("string literal"))
    .parse_next(input)
}

/// Parse `=` or `:=` (SAD treats both as assignment)
fn equals_or_assign<'src>(input: &mut Input<'src>) -> IResult<()> {
    any.verify(|token: &PositionedToken<'_>| {
        matches!(token.token, Token::Equals | Token::Assign)
    })
    .void()
    .context(Context::Label("`=` or `:=`"))
    .parse_next(input)
}

/// Parse `(`, returning its span
fn lparen<'src>(input: &mut Input<'src>) -> IResult<Span> {
    any.verify_map(|token: &PositionedToken<'_>| {
        matches!(token.token, Token::LParen).then_some(token.span)
    })
    .context(Context::Label("opening `(`"))
    .parse_next(input)
}

/// Parse `)`, returning its span
fn rparen<'src>(input: &mut Input<'src>) -> IResult<Span> {
    any.verify_map(|token: &PositionedToken<'_>| {
        matches!(token.token, Token::RParen).then_some(token.span)
    })
    .context(Context::Label("closing `)`"))
    .parse_next(input)
}

/// Parse `;`
fn semicolon<'src>(input: &mut Input<'src>) -> IResult<()> {
    any.verify(|token: &PositionedToken<'_>| matches!(token.token, Token::Semicolon))
        .void()
        .context(Context::Label("terminating `;`"))
        .parse_next(input)
}

/// Parse `,`
fn comma<'src>(input: &mut Input<'src>) -> IResult<()> {
    any.verify(|token: &PositionedToken<'_>| matches!(token.token, Token::Comma))
        .void()
        .parse_next(input)
}

/// Parse `-`
fn minus<'src>(input: &mut Input<'src>) -> IResult<()> {
    any.verify(|token: &PositionedToken<'_>| matches!(token.token, Token::Minus))
        .void()
        .parse_next(input)
}

/// Parse `*`
fn star<'src>(input: &mut Input<'src>) -> IResult<()> {
    any.verify(|token: &PositionedToken<'_>| matches!(token.token, Token::Star))
        .void()
        .context(Context::Label("`*`"))
        .parse_next(input)
}

/// Parse a numeric value with optional sign and optional `DEG` suffix.
///
/// A `DEG` suffix converts the value from degrees to radians at parse
/// time, so everything downstream works in radians.
fn signed_number<'src>(input: &mut Input<'src>) -> IResult<f64> {
    let sign = opt(any.verify_map(
        |token: &PositionedToken<'_>| match &token.token {
            Token::Minus => Some(-1.0),
            Token::Plus => Some(1.0),
            _ => None,
        },
    ))
    .parse_next(input)?;

    let value = any
        .verify_map(|token: &PositionedToken<'_>| match &token.token {
            Token::Number(n) => Some(*n),
            _ => None,
        })
        .context(Context::Label("number"))
        .parse_next(input)?;

    let deg = opt(any.verify(|token: &PositionedToken<'_>| matches!(token.token, Token::Deg)))
        .parse_next(input)?;

    let mut result = sign.unwrap_or(1.0) * value;
    if deg.is_some() {
        result *= PI / 180.0;
    }
    Ok(result)
}

/// Parse one `NAME value` parameter entry inside an element body.
///
/// The `=` between name and value is optional, as is a trailing comma.
/// Parameter names are normalized to uppercase so that `l` and `L` refer
/// to the same parameter.
fn parameter<'src>(input: &mut Input<'src>) -> IResult<(String, ParamValue)> {
    let name = raw_identifier.parse_next(input)?;
    opt(equals_or_assign).parse_next(input)?;

    let value = alt((
        signed_number.map(ParamValue::Number),
        string_literal.map(|s| ParamValue::Text(s.into_inner())),
    ))
    .context(Context::Label("parameter value"))
    .parse_next(input)?;

    opt(comma).parse_next(input)?;

    Ok((name.inner().to_ascii_uppercase(), value))
}

/// Parse one `NAME = (params)` body of an element declaration
fn element_body<'src>(input: &mut Input<'src>, ty: SadType) -> IResult<Spanned<ElementDef>> {
    let name = identifier.parse_next(input)?;
    equals_or_assign.parse_next(input)?;
    lparen.parse_next(input)?;

    // Committed once the body is open
    cut_err(input, |input| {
        let params: Vec<(String, ParamValue)> = repeat(0.., parameter).parse_next(input)?;
        let close = rparen.parse_next(input)?;

        let mut def = ElementDef::new(*name.inner(), ty);
        for (pname, value) in params {
            def.set_parameter(pname, value);
        }

        Ok(Spanned::new(def, name.span().union(close)))
    })
}

/// Parse an element declaration: a type keyword followed by one or more
/// bodies and a terminating semicolon.
///
/// `DRIFT D1 = (L 1.5) D2 = (L 0.3);` declares two drifts with one
/// keyword; each body becomes its own statement.
fn element_declaration<'src>(input: &mut Input<'src>) -> IResult<Vec<Statement>> {
    let ty = element_type.parse_next(input)?;
    let ty = *ty.inner();

    cut_err(input, |input| {
        let bodies: Vec<Spanned<ElementDef>> = repeat(1.., move |input: &mut Input<'src>| {
            element_body(input, ty)
        })
        .context(Context::Label("element declaration body"))
        .parse_next(input)?;

        semicolon.parse_next(input)?;

        Ok(bodies.into_iter().map(Statement::Element).collect())
    })
}

/// Parse one member reference inside a line body.
///
/// Grammar: `[-] [N*] [-] NAME`. A repeat count must be a positive
/// integer. A minus on either side of the count reverses the member; two
/// minuses cancel out.
fn line_member<'src>(input: &mut Input<'src>) -> IResult<LineMember> {
    let leading = opt(minus).parse_next(input)?;

    let repeat_count = opt((
        any.verify_map(|token: &PositionedToken<'_>| match &token.token {
            Token::Number(n) if *n > 0.0 && n.fract() == 0.0 => Some(*n as u32),
            _ => None,
        }),
        star,
    ))
    .parse_next(input)?;

    let inner = opt(minus).parse_next(input)?;
    let name = identifier
        .context(Context::Label("line member name"))
        .parse_next(input)?;

    Ok(LineMember {
        name: *name.inner(),
        repeat: repeat_count.map(|(n, _)| n).unwrap_or(1),
        reversed: leading.is_some() != inner.is_some(),
    })
}

/// Parse one `NAME = (members)` body of a line declaration
fn line_body<'src>(input: &mut Input<'src>) -> IResult<LineDef> {
    let name = identifier.parse_next(input)?;
    equals_or_assign.parse_next(input)?;
    lparen.parse_next(input)?;

    cut_err(input, |input| {
        // Members are separated by whitespace or commas; the trivia is
        // already gone, so only the commas need handling here.
        let members: Vec<LineMember> = repeat(0.., |input: &mut Input<'src>| {
            opt(comma).parse_next(input)?;
            line_member.parse_next(input)
        })
        .parse_next(input)?;

        rparen.parse_next(input)?;

        Ok(LineDef::new(*name.inner(), members))
    })
}

/// Parse a `LINE` declaration with one or more bodies
fn line_declaration<'src>(input: &mut Input<'src>) -> IResult<Vec<Statement>> {
    any.verify(|token: &PositionedToken<'_>| matches!(token.token, Token::Line))
        .parse_next(input)?;

    cut_err(input, |input| {
        let bodies: Vec<LineDef> = repeat(1.., line_body)
            .context(Context::Label("line declaration body"))
            .parse_next(input)?;

        semicolon.parse_next(input)?;

        Ok(bodies.into_iter().map(Statement::Line).collect())
    })
}

/// Parse a declaration-shaped statement with an unrecognized type keyword.
///
/// Matches `IDENT IDENT = (` and skips the rest of the statement. Only
/// this shape is reported; other non-declaration statements (such as
/// `MOMENTUM = 1E9;`) are skipped silently by [`skip_statement`].
fn unrecognized_declaration<'src>(input: &mut Input<'src>) -> IResult<Vec<Statement>> {
    let keyword = raw_identifier.parse_next(input)?;
    let name = raw_identifier.parse_next(input)?;
    equals_or_assign.parse_next(input)?;
    lparen.parse_next(input)?;

    skip_to_semicolon(input);

    Ok(vec![Statement::Unrecognized {
        keyword: keyword.inner().to_string(),
        name: name.inner().to_string(),
    }])
}

/// Skip a statement the grammar has no rule for
fn skip_statement<'src>(input: &mut Input<'src>) -> IResult<Vec<Statement>> {
    // Consume at least one token so the statement loop always advances
    let first = any.parse_next(input)?;
    if !matches!(first.token, Token::Semicolon) {
        skip_to_semicolon(input);
    }
    Ok(Vec::new())
}

/// Consume tokens up to and including the next `;` (or the end of input)
fn skip_to_semicolon(input: &mut Input<'_>) {
    while let Some(token) = input.next_token() {
        if matches!(token.token, Token::Semicolon) {
            break;
        }
    }
}

/// Parse a single statement
fn statement<'src>(input: &mut Input<'src>) -> IResult<Vec<Statement>> {
    alt((
        element_declaration,
        line_declaration,
        unrecognized_declaration,
        skip_statement,
    ))
    .parse_next(input)
}

/// Utility function to convert winnow errors to our custom error format
///
/// Extracts position information from error context (StartOffset) and
/// calculates precise error spans using the token array.
fn convert_error(
    error: ErrMode<ContextError<Context>>,
    tokens: &[PositionedToken],
    current_remaining: usize,
) -> Diagnostic {
    // Extract start offset from error context if available
    let start_remaining = match &error {
        ErrMode::Backtrack(e) | ErrMode::Cut(e) => e.context().find_map(|ctx| match ctx {
            Context::StartOffset(n) => Some(*n),
            _ => None,
        }),
        _ => None,
    };

    // Calculate offsets from remaining token counts
    let end_offset = tokens.len() - current_remaining;
    let start_offset = start_remaining.map(|r| tokens.len() - r).unwrap_or(0);

    let contexts: Vec<String> = match &error {
        ErrMode::Backtrack(e) | ErrMode::Cut(e) => e
            .context()
            .filter_map(|ctx| match ctx {
                Context::Label(label) => Some(format!("expected {label}")),
                _ => None,
            })
            .collect(),
        ErrMode::Incomplete(_) => Vec::new(),
    };

    // Declaration ran past the end of input
    if end_offset >= tokens.len() {
        let error_span = tokens.last().map(|t| t.span).unwrap_or_default();
        let mut diag = Diagnostic::error("incomplete declaration")
            .with_code(ErrorCode::E101)
            .with_label(error_span, "input ends inside this declaration")
            .with_help("declarations end with `)` and a terminating `;`");
        if let Some(context) = contexts.first() {
            diag = diag.with_secondary_label(error_span, context.clone());
        }
        return diag;
    }

    let message = if contexts.is_empty() {
        "unexpected token".to_string()
    } else {
        contexts.join(", ")
    };

    // Calculate error span from token positions
    let error_span = {
        let examine_range = if start_offset < end_offset {
            start_offset..end_offset
        } else {
            end_offset..end_offset + 1
        };
        let slice = &tokens[examine_range];
        slice[0].span.union(slice[slice.len() - 1].span)
    };

    Diagnostic::error(format!("unexpected token: {message}"))
        .with_code(ErrorCode::E100)
        .with_label(error_span, "unexpected token")
        .with_help("check the declaration syntax")
}

/// Parse a trivia-free token slice into statements.
///
/// The caller is expected to have filtered out whitespace, newline, and
/// comment tokens (see [`Token::is_trivia`]). On a syntax error inside a
/// declaration, parsing recovers at the next `;` and continues, so the
/// returned [`ParseError`] carries a diagnostic for every bad declaration.
pub fn parse_statements<'src>(
    tokens: &'src [PositionedToken<'src>],
) -> Result<Vec<Statement>, ParseError> {
    let mut input = TokenSlice::new(tokens);
    let mut statements = Vec::new();
    let mut diagnostics = DiagnosticCollector::new();

    while !input.is_empty() {
        match statement(&mut input) {
            Ok(parsed) => statements.extend(parsed),
            Err(e) => {
                let current_remaining = input.eof_offset();
                diagnostics.emit(convert_error(e, tokens, current_remaining));
                skip_to_semicolon(&mut input);
            }
        }
    }

    diagnostics.finish().map(|()| statements)
}
