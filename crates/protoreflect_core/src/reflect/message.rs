use std::sync::Arc;

use crate::reflect::{KnownFields, MessageDescriptor, MessageIndex, ReflectError, Result, Schema, UnknownFields};

/// Reflective handle to one message instance.
///
/// Owns the storage of its known and unknown fields; embedded messages,
/// vectors and maps are owned by the field that holds them.
#[derive(Debug, Clone)]
pub struct Message {
	known: KnownFields,
	unknown: UnknownFields,
}

impl Message {
	/// Create an empty instance of the message type at `index`.
	pub fn new(schema: &Arc<Schema>, index: MessageIndex) -> Result<Self> {
		if schema.message(index).is_none() {
			return Err(ReflectError::MessageNotFound { name: format!("#{index}") });
		}
		Ok(Self::zero(schema, index))
	}

	/// Create an empty instance of the message type named `full_name`.
	pub fn by_name(schema: &Arc<Schema>, full_name: &str) -> Result<Self> {
		let index = schema.index_of(full_name).ok_or_else(|| ReflectError::MessageNotFound {
			name: full_name.to_owned(),
		})?;
		Ok(Self::zero(schema, index))
	}

	pub(crate) fn zero(schema: &Arc<Schema>, index: MessageIndex) -> Self {
		let supported = schema.descriptor(index).unknown_fields;
		Self {
			known: KnownFields::new(schema, index),
			unknown: UnknownFields::new(supported),
		}
	}

	/// Schema the message type belongs to.
	pub fn schema(&self) -> &Arc<Schema> {
		self.known.schema()
	}

	/// Index of the message type in its schema.
	pub fn index(&self) -> MessageIndex {
		self.known.index()
	}

	/// Message type declaration.
	pub fn descriptor(&self) -> &MessageDescriptor {
		self.known.descriptor()
	}

	/// Fully-qualified message type name.
	pub fn full_name(&self) -> &str {
		&self.descriptor().full_name
	}

	/// Declared and extension fields.
	pub fn known_fields(&self) -> &KnownFields {
		&self.known
	}

	/// Mutable access to declared and extension fields.
	pub fn known_fields_mut(&mut self) -> &mut KnownFields {
		&mut self.known
	}

	/// Unrecognized field bytes.
	pub fn unknown_fields(&self) -> &UnknownFields {
		&self.unknown
	}

	/// Mutable access to unrecognized field bytes.
	pub fn unknown_fields_mut(&mut self) -> &mut UnknownFields {
		&mut self.unknown
	}
}
