//! The mapped semantic model.
//!
//! After elaboration every recognized element declaration has been converted
//! into exactly one [`MappedElement`] carrying the OCELOT target type and the
//! unit-converted parameter list. The [`Lattice`] holds the element and line
//! tables in declaration order together with the default root line.

use indexmap::IndexMap;

use crate::element::LineDef;
use crate::identifier::Id;

/// OCELOT element constructors that mapped elements can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetType {
    Drift,
    Quadrupole,
    SBend,
    Sextupole,
    Solenoid,
    Cavity,
    Monitor,
    Marker,
}

impl TargetType {
    /// The OCELOT constructor name emitted for this type.
    pub fn constructor(&self) -> &'static str {
        match self {
            TargetType::Drift => "Drift",
            TargetType::Quadrupole => "Quadrupole",
            TargetType::SBend => "SBend",
            TargetType::Sextupole => "Sextupole",
            TargetType::Solenoid => "Solenoid",
            TargetType::Cavity => "Cavity",
            TargetType::Monitor => "Monitor",
            TargetType::Marker => "Marker",
        }
    }
}

impl std::fmt::Display for TargetType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.constructor())
    }
}

/// A fully mapped element, ready for emission.
///
/// Parameters are keyword arguments in their fixed emission order, with all
/// unit conversions already applied (angles in radians, cavity voltage in
/// GV). Mapped elements are immutable once created.
#[derive(Debug, Clone, PartialEq)]
pub struct MappedElement {
    name: Id,
    target: TargetType,
    parameters: Vec<(&'static str, f64)>,
}

impl MappedElement {
    /// Create a mapped element.
    pub fn new(name: Id, target: TargetType, parameters: Vec<(&'static str, f64)>) -> Self {
        Self {
            name,
            target,
            parameters,
        }
    }

    /// The element name, shared with the source declaration.
    pub fn name(&self) -> Id {
        self.name
    }

    /// The OCELOT target type.
    pub fn target(&self) -> TargetType {
        self.target
    }

    /// The keyword parameters in emission order.
    pub fn parameters(&self) -> &[(&'static str, f64)] {
        &self.parameters
    }

    /// Look up a parameter by keyword.
    pub fn parameter(&self, name: &str) -> Option<f64> {
        self.parameters
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| *value)
    }
}

/// The elaborated lattice: mapped elements, line definitions, and the
/// default root line.
///
/// Both tables preserve declaration order, which makes emission
/// deterministic. Redeclaration of a name replaces the earlier entry
/// without disturbing its position.
#[derive(Debug, Clone, Default)]
pub struct Lattice {
    elements: IndexMap<Id, MappedElement>,
    lines: IndexMap<Id, LineDef>,
    root_line: Option<Id>,
}

impl Lattice {
    /// Create an empty lattice.
    pub fn new() -> Self {
        Self::default()
    }

    /// All mapped elements in declaration order.
    pub fn elements(&self) -> &IndexMap<Id, MappedElement> {
        &self.elements
    }

    /// All line definitions in declaration order.
    pub fn lines(&self) -> &IndexMap<Id, LineDef> {
        &self.lines
    }

    /// The last-declared line, if any line was declared.
    pub fn root_line(&self) -> Option<Id> {
        self.root_line
    }

    /// Look up a mapped element by name.
    pub fn element(&self, name: Id) -> Option<&MappedElement> {
        self.elements.get(&name)
    }

    /// Look up a line by name.
    pub fn line(&self, name: Id) -> Option<&LineDef> {
        self.lines.get(&name)
    }

    /// Insert a mapped element, returning the replaced entry when the name
    /// was already declared.
    pub fn insert_element(&mut self, element: MappedElement) -> Option<MappedElement> {
        self.elements.insert(element.name(), element)
    }

    /// Insert a line definition and make it the root line, returning the
    /// replaced entry when the name was already declared.
    pub fn insert_line(&mut self, line: LineDef) -> Option<LineDef> {
        self.root_line = Some(line.name());
        self.lines.insert(line.name(), line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::LineMember;

    fn drift(name: &str, length: f64) -> MappedElement {
        MappedElement::new(Id::new(name), TargetType::Drift, vec![("l", length)])
    }

    #[test]
    fn test_constructor_names() {
        assert_eq!(TargetType::Drift.constructor(), "Drift");
        assert_eq!(TargetType::SBend.constructor(), "SBend");
        assert_eq!(TargetType::Cavity.constructor(), "Cavity");
    }

    #[test]
    fn test_parameter_lookup() {
        let element = MappedElement::new(
            Id::new("B1"),
            TargetType::SBend,
            vec![("l", 2.0), ("angle", 0.1), ("tilt", -0.0)],
        );

        assert_eq!(element.parameter("angle"), Some(0.1));
        assert_eq!(element.parameter("k1"), None);
    }

    #[test]
    fn test_insert_element_preserves_order() {
        let mut lattice = Lattice::new();
        lattice.insert_element(drift("D1", 1.0));
        lattice.insert_element(drift("D2", 2.0));
        lattice.insert_element(drift("D3", 3.0));

        let names: Vec<_> = lattice.elements().keys().map(|id| id.resolve()).collect();
        assert_eq!(names, ["D1", "D2", "D3"]);
    }

    #[test]
    fn test_insert_element_redeclaration_replaces() {
        let mut lattice = Lattice::new();
        assert!(lattice.insert_element(drift("D1", 1.0)).is_none());

        let previous = lattice.insert_element(drift("D1", 9.0));
        assert_eq!(previous.unwrap().parameter("l"), Some(1.0));
        assert_eq!(lattice.elements().len(), 1);
        assert_eq!(
            lattice.element(Id::new("D1")).unwrap().parameter("l"),
            Some(9.0)
        );
    }

    #[test]
    fn test_last_declared_line_is_root() {
        let mut lattice = Lattice::new();
        assert_eq!(lattice.root_line(), None);

        lattice.insert_line(LineDef::new(
            Id::new("ARC"),
            vec![LineMember::new(Id::new("D1"))],
        ));
        lattice.insert_line(LineDef::new(
            Id::new("RING"),
            vec![LineMember::new(Id::new("ARC"))],
        ));

        assert_eq!(lattice.root_line(), Some(Id::new("RING")));
    }
}
