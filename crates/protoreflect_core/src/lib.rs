//! Reflective field access for protocol buffer messages.

/// Identifier casing helpers used when deriving generated accessor names.
pub mod names;
/// Message reflection: values, containers, field tables, and raw wire runs.
pub mod reflect;
