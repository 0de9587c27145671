//! Line reference resolution.
//!
//! Line declarations reference elements and other lines by name, and the
//! references are left unresolved by the parser so that forward references
//! work. This module expands a root line depth-first into the flat element
//! sequence that emission needs, applying repetition counts and reversal as
//! it goes.

use log::trace;
use thiserror::Error;

use sadconv_core::{element::LineDef, identifier::Id, lattice::Lattice};

/// Errors produced while expanding line references.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ResolveError {
    /// The requested root line was never declared.
    #[error("root line `{name}` is not declared")]
    UnknownRootLine { name: String },

    /// A line member names neither an element nor a line.
    #[error("line `{line}` references `{name}`, which is not declared")]
    UnresolvedReference { line: String, name: String },

    /// Line definitions reference each other in a cycle.
    #[error("line definitions form a cycle: {}", .cycle.join(" -> "))]
    CyclicLine { cycle: Vec<String> },
}

/// Expand `root` into the flat element sequence, depth-first.
///
/// Each member repeats `repeat` times. A reversed member that names a line
/// is traversed back to front, and the reversal propagates into nested
/// lines; reversing a plain element is the identity. The expansion path is
/// tracked explicitly so that cyclic line definitions are reported with the
/// full cycle instead of overflowing the stack.
pub fn resolve_sequence(lattice: &Lattice, root: Id) -> Result<Vec<Id>, ResolveError> {
    let line = lattice
        .line(root)
        .ok_or_else(|| ResolveError::UnknownRootLine {
            name: root.resolve(),
        })?;

    let mut sequence = Vec::new();
    let mut path = Vec::new();
    expand_line(lattice, line, false, &mut path, &mut sequence)?;

    trace!(root = root.resolve(), length = sequence.len(); "resolved lattice sequence");
    Ok(sequence)
}

fn expand_line(
    lattice: &Lattice,
    line: &LineDef,
    reversed: bool,
    path: &mut Vec<Id>,
    out: &mut Vec<Id>,
) -> Result<(), ResolveError> {
    if path.contains(&line.name()) {
        let mut cycle: Vec<String> = path.iter().map(Id::resolve).collect();
        cycle.push(line.name().resolve());
        return Err(ResolveError::CyclicLine { cycle });
    }
    path.push(line.name());

    let members = line.members();
    let order: Box<dyn Iterator<Item = usize>> = if reversed {
        Box::new((0..members.len()).rev())
    } else {
        Box::new(0..members.len())
    };

    for index in order {
        let member = &members[index];
        let flipped = reversed ^ member.reversed;
        for _ in 0..member.repeat {
            if lattice.element(member.name).is_some() {
                out.push(member.name);
            } else if let Some(nested) = lattice.line(member.name) {
                expand_line(lattice, nested, flipped, path, out)?;
            } else {
                return Err(ResolveError::UnresolvedReference {
                    line: line.name().resolve(),
                    name: member.name.resolve(),
                });
            }
        }
    }

    path.pop();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sadconv_core::{
        element::LineMember,
        lattice::{MappedElement, TargetType},
    };

    fn element(name: &str) -> MappedElement {
        MappedElement::new(Id::new(name), TargetType::Drift, vec![("l", 1.0)])
    }

    fn member(name: &str, repeat: u32, reversed: bool) -> LineMember {
        LineMember {
            name: Id::new(name),
            repeat,
            reversed,
        }
    }

    fn names(sequence: &[Id]) -> Vec<String> {
        sequence.iter().map(Id::resolve).collect()
    }

    #[test]
    fn test_flat_line_with_repeats() {
        let mut lattice = Lattice::new();
        lattice.insert_element(element("A"));
        lattice.insert_element(element("B"));
        lattice.insert_line(LineDef::new(
            Id::new("RING"),
            vec![member("A", 2, false), member("B", 1, false)],
        ));

        let sequence = resolve_sequence(&lattice, Id::new("RING")).unwrap();
        assert_eq!(names(&sequence), ["A", "A", "B"]);
    }

    #[test]
    fn test_nested_line_expansion() {
        let mut lattice = Lattice::new();
        lattice.insert_element(element("QF"));
        lattice.insert_element(element("QD"));
        lattice.insert_line(LineDef::new(
            Id::new("CELL"),
            vec![member("QF", 1, false), member("QD", 1, false)],
        ));
        lattice.insert_line(LineDef::new(Id::new("RING"), vec![member("CELL", 2, false)]));

        let sequence = resolve_sequence(&lattice, Id::new("RING")).unwrap();
        assert_eq!(names(&sequence), ["QF", "QD", "QF", "QD"]);
    }

    #[test]
    fn test_reversed_line_flips_member_order() {
        let mut lattice = Lattice::new();
        lattice.insert_element(element("A"));
        lattice.insert_element(element("B"));
        lattice.insert_line(LineDef::new(
            Id::new("ARC"),
            vec![member("A", 1, false), member("B", 1, false)],
        ));
        lattice.insert_line(LineDef::new(Id::new("RING"), vec![member("ARC", 1, true)]));

        let sequence = resolve_sequence(&lattice, Id::new("RING")).unwrap();
        assert_eq!(names(&sequence), ["B", "A"]);
    }

    #[test]
    fn test_double_reversal_restores_order() {
        let mut lattice = Lattice::new();
        lattice.insert_element(element("A"));
        lattice.insert_element(element("B"));
        lattice.insert_line(LineDef::new(
            Id::new("INNER"),
            vec![member("A", 1, false), member("B", 1, false)],
        ));
        lattice.insert_line(LineDef::new(Id::new("MID"), vec![member("INNER", 1, true)]));
        lattice.insert_line(LineDef::new(Id::new("RING"), vec![member("MID", 1, true)]));

        let sequence = resolve_sequence(&lattice, Id::new("RING")).unwrap();
        assert_eq!(names(&sequence), ["A", "B"]);
    }

    #[test]
    fn test_reversed_element_is_identity() {
        let mut lattice = Lattice::new();
        lattice.insert_element(element("A"));
        lattice.insert_line(LineDef::new(Id::new("RING"), vec![member("A", 3, true)]));

        let sequence = resolve_sequence(&lattice, Id::new("RING")).unwrap();
        assert_eq!(names(&sequence), ["A", "A", "A"]);
    }

    #[test]
    fn test_unknown_root_line() {
        let lattice = Lattice::new();
        let err = resolve_sequence(&lattice, Id::new("MISSING")).unwrap_err();

        assert_eq!(
            err,
            ResolveError::UnknownRootLine {
                name: "MISSING".to_string()
            }
        );
    }

    #[test]
    fn test_unresolved_reference_names_line_and_member() {
        let mut lattice = Lattice::new();
        lattice.insert_line(LineDef::new(Id::new("RING"), vec![member("GHOST", 1, false)]));

        let err = resolve_sequence(&lattice, Id::new("RING")).unwrap_err();
        assert_eq!(
            err,
            ResolveError::UnresolvedReference {
                line: "RING".to_string(),
                name: "GHOST".to_string(),
            }
        );
    }

    #[test]
    fn test_two_line_cycle_reports_full_cycle() {
        let mut lattice = Lattice::new();
        lattice.insert_line(LineDef::new(Id::new("L1"), vec![member("L2", 1, false)]));
        lattice.insert_line(LineDef::new(Id::new("L2"), vec![member("L1", 1, false)]));

        let err = resolve_sequence(&lattice, Id::new("L1")).unwrap_err();
        match err {
            ResolveError::CyclicLine { cycle } => {
                assert_eq!(cycle, ["L1", "L2", "L1"]);
            }
            other => panic!("expected cycle error, got {other:?}"),
        }
    }

    #[test]
    fn test_self_referencing_line_is_a_cycle() {
        let mut lattice = Lattice::new();
        lattice.insert_line(LineDef::new(Id::new("L1"), vec![member("L1", 1, false)]));

        let err = resolve_sequence(&lattice, Id::new("L1")).unwrap_err();
        assert!(matches!(err, ResolveError::CyclicLine { .. }));
    }

    #[test]
    fn test_repeated_subline_is_not_a_cycle() {
        let mut lattice = Lattice::new();
        lattice.insert_element(element("A"));
        lattice.insert_line(LineDef::new(Id::new("CELL"), vec![member("A", 1, false)]));
        lattice.insert_line(LineDef::new(
            Id::new("RING"),
            vec![member("CELL", 1, false), member("CELL", 1, false)],
        ));

        let sequence = resolve_sequence(&lattice, Id::new("RING")).unwrap();
        assert_eq!(names(&sequence), ["A", "A"]);
    }

    #[test]
    fn test_cycle_error_display() {
        let err = ResolveError::CyclicLine {
            cycle: vec!["L1".to_string(), "L2".to_string(), "L1".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "line definitions form a cycle: L1 -> L2 -> L1"
        );
    }
}
