//! Entity mapping traits.

/// Row decoding.
pub mod from_any_row;

/// Column lists for typed selects.
pub mod projection;

/// Identifier types.
pub mod entity_id;

/// Table-mapped entities.
pub mod entity;
