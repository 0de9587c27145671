//! Semantic mapping from parsed statements to the OCELOT element model.
//!
//! This pass walks the statement list produced by the
//! [`parser`](crate::parser) and folds it into a
//! [`Lattice`](sadconv_core::lattice::Lattice): every recognized element
//! declaration becomes a [`MappedElement`] with its OCELOT target type and
//! unit-converted parameters, line declarations are collected with the
//! last one becoming the root line, and lossy mappings are recorded as
//! [`ConversionWarning`]s.

use std::f64::consts::PI;

use log::debug;

use sadconv_core::{
    element::{ElementDef, SadType},
    identifier::Id,
    lattice::{Lattice, MappedElement, TargetType},
    warning::ConversionWarning,
};

use crate::{
    ast::Statement,
    error::{Diagnostic, DiagnosticCollector, ErrorCode, ParseError},
    span::Spanned,
};

/// The result of a successful parse and mapping pass.
#[derive(Debug)]
pub struct ParseOutcome {
    /// The mapped lattice.
    pub lattice: Lattice,
    /// Non-fatal conversion records, in source order.
    pub warnings: Vec<ConversionWarning>,
    /// Unrecognized declaration heads, formatted `KEYWORD (NAME)`.
    pub unrecognized: Vec<String>,
}

/// Map parsed statements into a lattice.
///
/// The whole statement list is processed even when errors are found, so a
/// file with three negative-length elements reports all three. Any
/// error-severity diagnostic aborts the conversion after the pass.
pub fn elaborate(statements: Vec<Statement>) -> Result<ParseOutcome, ParseError> {
    let mut lattice = Lattice::new();
    let mut warnings = Vec::new();
    let mut unrecognized = Vec::new();
    let mut diagnostics = DiagnosticCollector::new();

    for stmt in statements {
        match stmt {
            Statement::Element(def) => {
                let name = def.inner().name();
                match map_element(&def, &mut warnings) {
                    Ok(mapped) => {
                        if lattice.insert_element(mapped).is_some() {
                            warnings.push(ConversionWarning::note(
                                name,
                                format!("element `{name}` redeclared; the later declaration wins"),
                            ));
                        }
                    }
                    Err(diag) => diagnostics.emit(diag),
                }
            }
            Statement::Line(line) => {
                let name = line.name();
                if lattice.insert_line(line).is_some() {
                    warnings.push(ConversionWarning::note(
                        name,
                        format!("line `{name}` redeclared; the later declaration wins"),
                    ));
                }
            }
            Statement::Unrecognized { keyword, name } => {
                warnings.push(ConversionWarning::warning(
                    Id::new(&name),
                    format!("unrecognized element type `{keyword}`; declaration skipped"),
                ));
                unrecognized.push(format!("{keyword} ({name})"));
            }
        }
    }

    diagnostics.finish().map(|()| {
        debug!(
            elements = lattice.elements().len(),
            lines = lattice.lines().len(),
            warnings = warnings.len();
            "elaborated lattice"
        );
        ParseOutcome {
            lattice,
            warnings,
            unrecognized,
        }
    })
}

/// Whether declarations of this type carry a length at all.
///
/// Zero-length marker types ignore `L`, so a stray negative value on them
/// is not an error.
fn is_sized(ty: SadType) -> bool {
    !matches!(
        ty,
        SadType::Mark | SadType::Map | SadType::Apert | SadType::Coord
    )
}

/// Map one element declaration to its OCELOT counterpart.
///
/// Unit conversions happen here: angles arrive already in radians (the
/// parser applies `DEG`), cavity voltage is converted from volts to GV,
/// and the cavity phase is shifted into the OCELOT crest convention.
fn map_element(
    def: &Spanned<ElementDef>,
    warnings: &mut Vec<ConversionWarning>,
) -> Result<MappedElement, Diagnostic> {
    let element = def.inner();
    let name = element.name();
    let length = element.number("L");

    if is_sized(element.sad_type()) && length < 0.0 {
        return Err(
            Diagnostic::error(format!("element `{name}` has negative length {length}"))
                .with_code(ErrorCode::E200)
                .with_label(def.span(), "declared here")
                .with_help("element lengths must be zero or positive"),
        );
    }

    let mapped = match element.sad_type() {
        SadType::Drift => MappedElement::new(name, TargetType::Drift, vec![("l", length)]),

        SadType::Moni => MappedElement::new(name, TargetType::Monitor, vec![("l", length)]),

        SadType::Mark => MappedElement::new(name, TargetType::Marker, vec![]),

        SadType::Map | SadType::Apert | SadType::Coord => {
            warnings.push(ConversionWarning::warning(
                name,
                format!(
                    "{} element mapped to Marker; its parameters are discarded",
                    element.sad_type()
                ),
            ));
            MappedElement::new(name, TargetType::Marker, vec![])
        }

        SadType::Quad => {
            // SAD stores the integrated strength; OCELOT wants it per meter
            let k1 = if length != 0.0 {
                element.number("K1") / length
            } else {
                0.0
            };
            MappedElement::new(
                name,
                TargetType::Quadrupole,
                vec![("l", length), ("k1", k1), ("tilt", element.number("ROTATE"))],
            )
        }

        SadType::Bend => {
            let angle = element.number("ANGLE");
            // E1/E2 are fractions of the bend angle in SAD
            MappedElement::new(
                name,
                TargetType::SBend,
                vec![
                    ("l", length),
                    ("angle", angle),
                    ("e1", element.number("E1") * angle),
                    ("e2", element.number("E2") * angle),
                    ("tilt", -element.number("ROTATE")),
                ],
            )
        }

        SadType::Sext => MappedElement::new(
            name,
            TargetType::Sextupole,
            vec![
                ("l", length),
                ("k2", element.number("K2")),
                ("tilt", element.number("ROTATE")),
            ],
        ),

        SadType::Sol => MappedElement::new(name, TargetType::Solenoid, vec![("l", length)]),

        SadType::Cavi => {
            let phi = 90.0 + element.number("PHI") * 180.0 / PI;
            MappedElement::new(
                name,
                TargetType::Cavity,
                vec![
                    ("l", length),
                    ("freq", element.number("FREQ")),
                    ("v", element.number("VOLT") * 1e-9),
                    ("phi", phi),
                ],
            )
        }

        SadType::Mult => {
            warnings.push(ConversionWarning::warning(
                name,
                "MULT element simplified to Quadrupole/Drift",
            ));
            if length > 0.0 {
                let k1 = element.number("K1") / length;
                MappedElement::new(
                    name,
                    TargetType::Quadrupole,
                    vec![("l", length), ("k1", k1), ("tilt", element.number("ROTATE"))],
                )
            } else {
                MappedElement::new(name, TargetType::Drift, vec![("l", length)])
            }
        }
    };

    Ok(mapped)
}
