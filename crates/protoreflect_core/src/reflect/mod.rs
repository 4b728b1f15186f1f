mod error;
mod extension;
mod known;
mod map;
mod message;
mod raw;
mod schema;
#[cfg(test)]
mod test_support;
mod unknown;
mod value;
mod vector;
pub mod wire;

/// Field number identifying a field across known and unknown storage.
pub type FieldNumber = u32;

/// Error and result aliases.
pub use error::{ReflectError, Result};
/// Per-instance extension registry types.
pub use extension::{ExtensionType, ExtensionTypes, ExtensionTypesMut};
/// Declared-field storage and mutable references.
pub use known::{KnownFields, Mutable};
/// Map field storage.
pub use map::Map;
/// Message instance handle.
pub use message::Message;
/// Raw wire record runs.
pub use raw::{RawFields, Records};
/// Schema metadata model.
pub use schema::{Cardinality, FieldDescriptor, Kind, MessageDescriptor, MessageIndex, Schema};
/// Unrecognized-field storage.
pub use unknown::UnknownFields;
/// Runtime value types.
pub use value::{EnumNumber, MapKey, Value};
/// Repeated field storage.
pub use vector::Vector;
/// Wire record header and wire types.
pub use wire::{Record, WireType};
