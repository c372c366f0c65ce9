// Creature Battle Schema - Shared type definitions
// This crate contains the read-only data definitions the battle engine
// consumes: element types with their effectiveness chart, move
// specifications, and species definitions. The engine never mutates any of
// these; they are loaded once from disk before a battle starts.

// Re-export the main types
pub use element_types::*;
pub use move_data::*;
pub use species_data::*;

// Re-exported so downstream crates can iterate the element types without
// depending on strum directly.
pub use strum::IntoEnumIterator;

pub mod element_types;
pub mod move_data;
pub mod species_data;
