//! sadconv - A converter from SAD accelerator lattice files to OCELOT.
//!
//! Parsing, mapping, and emission for the SAD lattice description format.
//! The output is a Python module defining the lattice for the OCELOT beam
//! dynamics framework.

pub mod config;

mod error;
mod export;

pub use sadconv_core::{element, identifier, lattice, warning};

pub use error::SadConvError;
pub use export::ResolveError;

use log::{debug, info, trace};

use sadconv_core::{identifier::Id, warning::ConversionWarning};

use config::AppConfig;

/// The result of a successful conversion.
#[derive(Debug, Clone)]
pub struct Conversion {
    /// The generated OCELOT Python source.
    pub output: String,
    /// Non-fatal conversion records, in source order.
    pub warnings: Vec<ConversionWarning>,
    /// Skipped declarations with unrecognized type keywords, formatted
    /// `KEYWORD (NAME)`.
    pub unrecognized: Vec<String>,
}

/// Converter for SAD lattice sources.
///
/// This provides an API for processing SAD lattice files through the
/// parsing, mapping, and emission stages.
///
/// # Examples
///
/// ```rust
/// use sadconv::{Converter, config::AppConfig};
///
/// let source = "DRIFT D1 = (L 1.5);\nLINE RING = (D1 D1);\n";
///
/// // With custom config
/// let config = AppConfig::default();
/// let converter = Converter::new(config);
///
/// let conversion = converter.convert(source)
///     .expect("Failed to convert");
/// assert!(conversion.output.contains("lattice_list = (D1, D1, END)"));
///
/// // Or use default config
/// let converter = Converter::default();
/// ```
#[derive(Default)]
pub struct Converter {
    config: AppConfig,
}

impl Converter {
    /// Create a new converter with the given configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Application configuration including the root line override
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Convert SAD source text into OCELOT Python source.
    ///
    /// This performs lexing, parsing, and semantic mapping, then resolves
    /// the root line into a flat element sequence and emits the Python
    /// module. The root line is taken from the configuration when set, and
    /// otherwise defaults to the last line declared in the source. When the
    /// source declares no line at all, the sequence is empty but the element
    /// declarations are still emitted.
    ///
    /// # Errors
    ///
    /// Returns `SadConvError` for syntax errors, mapping errors such as a
    /// negative element length, unresolvable or cyclic line references, and
    /// inputs with no usable element declarations.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sadconv::{Converter, config::AppConfig};
    ///
    /// let source = "QUAD QF = (L 0.5 K1 0.3);\nLINE RING = (QF);\n";
    /// let converter = Converter::new(AppConfig::default());
    /// let conversion = converter.convert(source)
    ///     .expect("Failed to convert lattice");
    ///
    /// println!("{}", conversion.output);
    /// ```
    pub fn convert(&self, source: &str) -> Result<Conversion, SadConvError> {
        info!("Parsing SAD source");

        let outcome = sadconv_parser::parse(source)
            .map_err(|err| SadConvError::new_parse_error(err, source))?;

        if outcome.lattice.elements().is_empty() {
            return Err(SadConvError::EmptyLattice);
        }

        debug!(
            elements = outcome.lattice.elements().len(),
            lines = outcome.lattice.lines().len();
            "Lattice parsed successfully"
        );

        let root = match self.config.convert().root_line() {
            Some(name) => Some(Id::new(name)),
            None => outcome.lattice.root_line(),
        };

        let sequence = match root {
            Some(root) => {
                info!(root = root.resolve(); "Resolving lattice sequence");
                export::resolve_sequence(&outcome.lattice, root)?
            }
            None => {
                debug!("No line declared, emitting elements only");
                Vec::new()
            }
        };
        trace!(length = sequence.len(); "Sequence resolved");

        let output = export::emit(&outcome.lattice, &sequence);
        info!("Conversion complete");

        Ok(Conversion {
            output,
            warnings: outcome.warnings,
            unrecognized: outcome.unrecognized,
        })
    }
}
