//! Statement-level parser tests.
//!
//! These run the lexer and parser together over small source snippets,
//! which keeps the fixtures readable and exercises the trivia filtering
//! the real pipeline performs.

use std::f64::consts::PI;

use sadconv_core::{
    element::{ParamValue, SadType},
    identifier::Id,
};

use crate::{
    ast::Statement,
    error::{ErrorCode, ParseError},
    lexer::tokenize,
    parser::parse_statements,
    tokens::PositionedToken,
};

fn significant_tokens(input: &str) -> Vec<PositionedToken<'_>> {
    tokenize(input)
        .expect("lexing should succeed")
        .into_iter()
        .filter(|t| !t.token.is_trivia())
        .collect()
}

fn parse_ok(input: &str) -> Vec<Statement> {
    let tokens = significant_tokens(input);
    parse_statements(&tokens).expect("parsing should succeed")
}

fn parse_err(input: &str) -> ParseError {
    let tokens = significant_tokens(input);
    parse_statements(&tokens).expect_err("parsing should fail")
}

fn expect_element(statement: &Statement) -> &sadconv_core::element::ElementDef {
    match statement {
        Statement::Element(def) => def.inner(),
        other => panic!("expected element statement, got {other:?}"),
    }
}

fn expect_line(statement: &Statement) -> &sadconv_core::element::LineDef {
    match statement {
        Statement::Line(line) => line,
        other => panic!("expected line statement, got {other:?}"),
    }
}

#[test]
fn test_single_element_declaration() {
    let statements = parse_ok("DRIFT D1 = (L 1.5);");

    assert_eq!(statements.len(), 1);
    let def = expect_element(&statements[0]);
    assert_eq!(def.name(), Id::new("D1"));
    assert_eq!(def.sad_type(), SadType::Drift);
    assert_eq!(def.number("L"), 1.5);
}

#[test]
fn test_multiple_bodies_share_one_keyword() {
    let statements = parse_ok("DRIFT D1 = (L 1.0) D2 = (L 2.0) D3 = (L 3.0);");

    assert_eq!(statements.len(), 3);
    assert_eq!(expect_element(&statements[0]).name(), Id::new("D1"));
    assert_eq!(expect_element(&statements[1]).name(), Id::new("D2"));
    assert_eq!(expect_element(&statements[2]).number("L"), 3.0);
}

#[test]
fn test_assign_operator() {
    let statements = parse_ok("QUAD QF := (K1 0.3);");

    let def = expect_element(&statements[0]);
    assert_eq!(def.number("K1"), 0.3);
}

#[test]
fn test_equals_between_parameter_name_and_value() {
    let statements = parse_ok("QUAD QF = (K1 = 0.3 L 0.5);");

    let def = expect_element(&statements[0]);
    assert_eq!(def.number("K1"), 0.3);
    assert_eq!(def.number("L"), 0.5);
}

#[test]
fn test_comma_separated_parameters() {
    let statements = parse_ok("BEND B1 = (L 2.0, ANGLE 0.1, E1 0.5);");

    let def = expect_element(&statements[0]);
    assert_eq!(def.number("L"), 2.0);
    assert_eq!(def.number("ANGLE"), 0.1);
    assert_eq!(def.number("E1"), 0.5);
}

#[test]
fn test_deg_suffix_converts_to_radians() {
    let statements = parse_ok("BEND B1 = (ANGLE 90 DEG);");

    let def = expect_element(&statements[0]);
    assert_eq!(def.number("ANGLE"), 90.0 * (PI / 180.0));
}

#[test]
fn test_signed_parameter_values() {
    let statements = parse_ok("COORD C1 = (DX -0.5 DY +0.25);");

    let def = expect_element(&statements[0]);
    assert_eq!(def.number("DX"), -0.5);
    assert_eq!(def.number("DY"), 0.25);
}

#[test]
fn test_string_parameter_value() {
    let statements = parse_ok("MARK IP = (LABEL \"interaction point\");");

    let def = expect_element(&statements[0]);
    assert_eq!(
        def.parameters().get("LABEL"),
        Some(&ParamValue::Text("interaction point".to_string()))
    );
}

#[test]
fn test_lowercase_parameter_names_are_normalized() {
    let statements = parse_ok("drift d1 = (l 1.0);");

    let def = expect_element(&statements[0]);
    assert_eq!(def.sad_type(), SadType::Drift);
    // Element names keep their case, parameter names do not
    assert_eq!(def.name(), Id::new("d1"));
    assert_eq!(def.number("L"), 1.0);
}

#[test]
fn test_duplicate_parameter_last_wins() {
    let statements = parse_ok("QUAD QF = (K1 0.3 K1 0.7);");

    let def = expect_element(&statements[0]);
    assert_eq!(def.number("K1"), 0.7);
}

#[test]
fn test_line_declaration_members() {
    let statements = parse_ok("LINE RING = (QF 2*QD -ARC 3*-SUB);");

    assert_eq!(statements.len(), 1);
    let line = expect_line(&statements[0]);
    assert_eq!(line.name(), Id::new("RING"));

    let members = line.members();
    assert_eq!(members.len(), 4);

    assert_eq!(members[0].name, Id::new("QF"));
    assert_eq!(members[0].repeat, 1);
    assert!(!members[0].reversed);

    assert_eq!(members[1].name, Id::new("QD"));
    assert_eq!(members[1].repeat, 2);
    assert!(!members[1].reversed);

    assert_eq!(members[2].name, Id::new("ARC"));
    assert!(members[2].reversed);

    assert_eq!(members[3].name, Id::new("SUB"));
    assert_eq!(members[3].repeat, 3);
    assert!(members[3].reversed);
}

#[test]
fn test_line_members_with_commas() {
    let statements = parse_ok("LINE L1 = (A, B, C);");

    let line = expect_line(&statements[0]);
    let names: Vec<_> = line.members().iter().map(|m| m.name).collect();
    assert_eq!(names, [Id::new("A"), Id::new("B"), Id::new("C")]);
}

#[test]
fn test_double_reversal_cancels() {
    let statements = parse_ok("LINE L1 = (-2*-SUB);");

    let line = expect_line(&statements[0]);
    assert_eq!(line.members()[0].repeat, 2);
    assert!(!line.members()[0].reversed);
}

#[test]
fn test_empty_line_body() {
    let statements = parse_ok("LINE L1 = ();");

    let line = expect_line(&statements[0]);
    assert!(line.members().is_empty());
}

#[test]
fn test_multiple_line_bodies() {
    let statements = parse_ok("LINE ARC = (QF QD) RING = (ARC ARC);");

    assert_eq!(statements.len(), 2);
    assert_eq!(expect_line(&statements[0]).name(), Id::new("ARC"));
    assert_eq!(expect_line(&statements[1]).name(), Id::new("RING"));
}

#[test]
fn test_unrecognized_declaration_shape() {
    let statements = parse_ok("OCT O1 = (L 0.1 K3 12.0);");

    assert_eq!(
        statements,
        vec![Statement::Unrecognized {
            keyword: "OCT".to_string(),
            name: "O1".to_string(),
        }]
    );
}

#[test]
fn test_non_declaration_statements_are_skipped_silently() {
    let statements = parse_ok("MOMENTUM = 1E9;");
    assert!(statements.is_empty());
}

#[test]
fn test_skipped_statement_does_not_eat_the_next_one() {
    let statements = parse_ok("MOMENTUM = 1E9;\nDRIFT D1 = (L 1.0);");

    assert_eq!(statements.len(), 1);
    assert_eq!(expect_element(&statements[0]).name(), Id::new("D1"));
}

#[test]
fn test_comments_and_blank_lines_are_ignored() {
    let source = "\
! converted from the ring survey
DRIFT D1 = (L 1.0); ! trailing comment

LINE RING = (D1);
";
    let statements = parse_ok(source);
    assert_eq!(statements.len(), 2);
}

#[test]
fn test_missing_name_is_a_syntax_error() {
    let err = parse_err("DRIFT = (L 1.0);");

    assert_eq!(err.diagnostics().len(), 1);
    assert_eq!(err.diagnostics()[0].code(), Some(ErrorCode::E100));
}

#[test]
fn test_unterminated_declaration_at_eof() {
    let err = parse_err("DRIFT D1 = (L 1.0)");

    assert_eq!(err.diagnostics().len(), 1);
    assert_eq!(err.diagnostics()[0].code(), Some(ErrorCode::E101));
}

#[test]
fn test_fractional_repeat_count_is_rejected() {
    let err = parse_err("LINE L1 = (1.5*QF);");

    assert_eq!(err.diagnostics()[0].code(), Some(ErrorCode::E100));
}

#[test]
fn test_recovery_reports_every_bad_declaration() {
    let err = parse_err("DRIFT = (L 1.0); QUAD QD = (K1 0.2); BEND = (ANGLE 0.1);");

    assert_eq!(err.diagnostics().len(), 2);
    assert!(
        err.diagnostics()
            .iter()
            .all(|d| d.code() == Some(ErrorCode::E100))
    );
}

#[test]
fn test_error_diagnostics_carry_spans() {
    let err = parse_err("DRIFT = (L 1.0);");

    let labels = err.diagnostics()[0].labels();
    assert!(!labels.is_empty());
    assert!(labels[0].span().end() > labels[0].span().start());
}
