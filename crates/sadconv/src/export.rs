//! Lattice resolution and OCELOT Python emission.
//!
//! Turning a [`Lattice`](sadconv_core::lattice::Lattice) into output text is
//! a two step process: [`resolve_sequence`] flattens the root line into an
//! ordered element sequence, and [`emit`] renders the element table and that
//! sequence as OCELOT Python source.

mod ocelot;
mod resolve;

pub use ocelot::emit;
pub use resolve::{ResolveError, resolve_sequence};
