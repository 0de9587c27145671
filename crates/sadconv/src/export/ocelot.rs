//! OCELOT Python source emission.
//!
//! Renders the mapped element table and the resolved sequence as a Python
//! module for the OCELOT beam dynamics framework. Every distinct element is
//! declared once in declaration order, then the flat sequence is assembled
//! into `lattice_list` with a sentinel `END` marker.

use std::fmt::Write;

use sadconv_core::{
    identifier::Id,
    lattice::{Lattice, MappedElement},
};

/// Render the lattice as OCELOT Python source.
///
/// Floats are written with their shortest round-trip representation, so the
/// generated file carries the mapped values exactly.
pub fn emit(lattice: &Lattice, sequence: &[Id]) -> String {
    let mut out = String::new();

    out.push_str("# Converted from a SAD file by sadconv\n");
    out.push_str("from ocelot.cpbd.elements import *\n");
    out.push_str("\n# elements\n");

    for element in lattice.elements().values() {
        emit_element(&mut out, element);
    }
    out.push_str("END = Marker(eid=\"END\")\n");

    out.push_str("\n# lattice definition\n");
    out.push_str("lattice_list = (");
    for name in sequence {
        let _ = write!(out, "{name}, ");
    }
    out.push_str("END)\n");
    out.push_str("lattice = MagneticLattice(lattice_list)\n");

    out
}

fn emit_element(out: &mut String, element: &MappedElement) {
    let _ = write!(
        out,
        "{} = {}(eid=\"{}\"",
        element.name(),
        element.target().constructor(),
        element.name()
    );
    for (key, value) in element.parameters() {
        let _ = write!(out, ", {key}={value:?}");
    }
    out.push_str(")\n");
}
