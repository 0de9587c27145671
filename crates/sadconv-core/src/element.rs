//! The SAD-side element model.
//!
//! Types in this module describe what was *declared* in the source file:
//! element declarations with their raw keyword/value parameter sets, and
//! line declarations with their ordered member references. The mapped,
//! OCELOT-ready counterparts live in the [`lattice`](crate::lattice) module.

use std::fmt;

use indexmap::IndexMap;

use crate::identifier::Id;

/// The closed set of recognized SAD element type keywords.
///
/// Keywords are matched case-insensitively. Any other statement head is an
/// unrecognized type and is skipped with a warning rather than failing the
/// whole parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SadType {
    Drift,
    Quad,
    Bend,
    Sext,
    Sol,
    Cavi,
    Moni,
    Mark,
    Map,
    Apert,
    Coord,
    Mult,
}

impl SadType {
    /// All recognized types, in a fixed order.
    pub const ALL: [SadType; 12] = [
        SadType::Drift,
        SadType::Quad,
        SadType::Bend,
        SadType::Sext,
        SadType::Sol,
        SadType::Cavi,
        SadType::Moni,
        SadType::Mark,
        SadType::Map,
        SadType::Apert,
        SadType::Coord,
        SadType::Mult,
    ];

    /// Match a source keyword case-insensitively against the recognized set.
    ///
    /// Returns `None` for anything outside the twelve recognized keywords.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        SadType::ALL
            .into_iter()
            .find(|ty| keyword.eq_ignore_ascii_case(ty.keyword()))
    }

    /// The canonical (uppercase) SAD keyword for this type.
    pub fn keyword(&self) -> &'static str {
        match self {
            SadType::Drift => "DRIFT",
            SadType::Quad => "QUAD",
            SadType::Bend => "BEND",
            SadType::Sext => "SEXT",
            SadType::Sol => "SOL",
            SadType::Cavi => "CAVI",
            SadType::Moni => "MONI",
            SadType::Mark => "MARK",
            SadType::Map => "MAP",
            SadType::Apert => "APERT",
            SadType::Coord => "COORD",
            SadType::Mult => "MULT",
        }
    }
}

impl fmt::Display for SadType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.keyword())
    }
}

/// A raw parameter value as written in the source.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    /// A numeric value. Angles declared with a `DEG` suffix are already
    /// converted to radians by the parser.
    Number(f64),
    /// A quoted string value.
    Text(String),
}

impl ParamValue {
    /// The numeric value, or `None` for string parameters.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            ParamValue::Number(value) => Some(*value),
            ParamValue::Text(_) => None,
        }
    }
}

/// A parsed SAD element declaration.
///
/// Parameter order is preserved as declared; a duplicate parameter name
/// within one declaration overwrites the earlier value (last wins).
#[derive(Debug, Clone, PartialEq)]
pub struct ElementDef {
    name: Id,
    sad_type: SadType,
    parameters: IndexMap<String, ParamValue>,
}

impl ElementDef {
    /// Create a new element definition.
    pub fn new(name: Id, sad_type: SadType) -> Self {
        Self {
            name,
            sad_type,
            parameters: IndexMap::new(),
        }
    }

    /// The declared element name.
    pub fn name(&self) -> Id {
        self.name
    }

    /// The declared SAD type.
    pub fn sad_type(&self) -> SadType {
        self.sad_type
    }

    /// All parameters in declaration order.
    pub fn parameters(&self) -> &IndexMap<String, ParamValue> {
        &self.parameters
    }

    /// Set a parameter. A repeated name overwrites the earlier value.
    pub fn set_parameter(&mut self, name: impl Into<String>, value: ParamValue) {
        self.parameters.insert(name.into(), value);
    }

    /// Look up a numeric parameter, defaulting to 0.0 when the parameter is
    /// absent or non-numeric. SAD declarations routinely omit parameters
    /// that are zero, so every numeric read goes through this default.
    pub fn number(&self, name: &str) -> f64 {
        self.parameters
            .get(name)
            .and_then(ParamValue::as_number)
            .unwrap_or(0.0)
    }
}

/// One member reference inside a line declaration.
///
/// `repeat` expands the member that many times; `reversed` flips traversal
/// order when the member names another line (reversal of a plain element is
/// the identity).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineMember {
    pub name: Id,
    pub repeat: u32,
    pub reversed: bool,
}

impl LineMember {
    /// A plain, single, forward reference.
    pub fn new(name: Id) -> Self {
        Self {
            name,
            repeat: 1,
            reversed: false,
        }
    }
}

/// A parsed SAD `LINE` declaration.
///
/// Members may reference elements or other lines; references are resolved
/// only at emission time so forward references parse cleanly.
#[derive(Debug, Clone, PartialEq)]
pub struct LineDef {
    name: Id,
    members: Vec<LineMember>,
}

impl LineDef {
    /// Create a new line definition.
    pub fn new(name: Id, members: Vec<LineMember>) -> Self {
        Self { name, members }
    }

    /// The declared line name.
    pub fn name(&self) -> Id {
        self.name
    }

    /// The ordered member references.
    pub fn members(&self) -> &[LineMember] {
        &self.members
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_keyword_recognizes_all_types() {
        for ty in SadType::ALL {
            assert_eq!(SadType::from_keyword(ty.keyword()), Some(ty));
        }
    }

    #[test]
    fn test_from_keyword_case_insensitive() {
        assert_eq!(SadType::from_keyword("drift"), Some(SadType::Drift));
        assert_eq!(SadType::from_keyword("Quad"), Some(SadType::Quad));
        assert_eq!(SadType::from_keyword("cAvI"), Some(SadType::Cavi));
    }

    #[test]
    fn test_from_keyword_rejects_unknown() {
        assert_eq!(SadType::from_keyword("OCT"), None);
        assert_eq!(SadType::from_keyword("BEAMBEAM"), None);
        assert_eq!(SadType::from_keyword(""), None);
    }

    #[test]
    fn test_number_defaults_to_zero() {
        let def = ElementDef::new(Id::new("D1"), SadType::Drift);
        assert_eq!(def.number("L"), 0.0);
        assert_eq!(def.number("K1"), 0.0);
    }

    #[test]
    fn test_duplicate_parameter_last_wins() {
        let mut def = ElementDef::new(Id::new("Q1"), SadType::Quad);
        def.set_parameter("K1", ParamValue::Number(0.5));
        def.set_parameter("K1", ParamValue::Number(0.75));

        assert_eq!(def.number("K1"), 0.75);
        assert_eq!(def.parameters().len(), 1);
    }

    #[test]
    fn test_text_parameter_reads_as_zero() {
        let mut def = ElementDef::new(Id::new("M1"), SadType::Mark);
        def.set_parameter("LABEL", ParamValue::Text("ip".to_string()));
        assert_eq!(def.number("LABEL"), 0.0);
    }

    #[test]
    fn test_line_member_defaults() {
        let member = LineMember::new(Id::new("QF"));
        assert_eq!(member.repeat, 1);
        assert!(!member.reversed);
    }
}
