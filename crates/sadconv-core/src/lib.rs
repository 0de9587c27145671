//! sadconv core types and definitions
//!
//! This crate provides the foundational types for the sadconv lattice
//! converter. It includes:
//!
//! - **Identifiers**: Efficient string-interned identifiers ([`identifier::Id`])
//! - **Elements**: The SAD-side element and line model ([`element`] module)
//! - **Lattice**: The mapped, OCELOT-ready semantic model ([`lattice`] module)
//! - **Warnings**: Structured conversion diagnostics ([`warning`] module)

pub mod element;
pub mod identifier;
pub mod lattice;
pub mod warning;
