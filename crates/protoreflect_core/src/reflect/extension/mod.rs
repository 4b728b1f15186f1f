use std::collections::HashMap;
use std::ops::{ControlFlow, Deref};
use std::sync::Arc;

use tracing::debug;

use crate::reflect::known::is_populated;
use crate::reflect::{Cardinality, FieldDescriptor, FieldNumber, MessageDescriptor, ReflectError, Result, Schema, Value};

/// Extension field declared outside its extended message.
#[derive(Debug, Clone)]
pub struct ExtensionType {
	extendee: Box<str>,
	field: FieldDescriptor,
}

impl ExtensionType {
	/// Declare an extension of `extendee`; `field.name` is the extension full name.
	///
	/// Singular extension fields always track presence explicitly.
	pub fn new(extendee: &str, mut field: FieldDescriptor) -> Self {
		if field.cardinality != Cardinality::Repeated {
			field.explicit_presence = true;
		}
		Self {
			extendee: extendee.into(),
			field,
		}
	}

	/// Extension full name.
	pub fn full_name(&self) -> &str {
		&self.field.name
	}

	/// Full name of the extended message type.
	pub fn extendee(&self) -> &str {
		&self.extendee
	}

	/// Extension field number.
	pub fn number(&self) -> FieldNumber {
		self.field.number
	}

	/// Extension field shape.
	pub fn field(&self) -> &FieldDescriptor {
		&self.field
	}
}

/// Extension types registered on one message instance.
#[derive(Debug, Clone, Default)]
pub struct ExtensionTypes {
	by_number: HashMap<FieldNumber, Arc<ExtensionType>>,
	by_name: HashMap<Box<str>, FieldNumber>,
}

impl ExtensionTypes {
	/// Snapshot of registered extensions in unspecified order.
	pub fn list(&self) -> Vec<Arc<ExtensionType>> {
		self.by_number.values().cloned().collect()
	}

	/// Number of registered extensions.
	pub fn len(&self) -> usize {
		self.by_number.len()
	}

	/// Report whether no extension is registered.
	pub fn is_empty(&self) -> bool {
		self.by_number.is_empty()
	}

	/// Look up an extension by field number.
	pub fn by_number(&self, number: FieldNumber) -> Option<&Arc<ExtensionType>> {
		self.by_number.get(&number)
	}

	/// Look up an extension by full name.
	pub fn by_name(&self, full_name: &str) -> Option<&Arc<ExtensionType>> {
		let number = self.by_name.get(full_name)?;
		self.by_number.get(number)
	}

	/// Visit registered extensions until `visit` breaks.
	pub fn range<F>(&self, mut visit: F)
	where
		F: FnMut(&Arc<ExtensionType>) -> ControlFlow<()>,
	{
		for ext in self.by_number.values() {
			if visit(ext).is_break() {
				return;
			}
		}
	}
}

/// Write access to a message's extension registry.
///
/// Borrows the message's field values so removal can refuse populated extensions.
pub struct ExtensionTypesMut<'a> {
	pub(crate) types: &'a mut ExtensionTypes,
	pub(crate) schema: &'a Schema,
	pub(crate) message: &'a MessageDescriptor,
	pub(crate) values: &'a mut HashMap<FieldNumber, Value>,
}

impl ExtensionTypesMut<'_> {
	/// Register `ext` on this message instance.
	pub fn register(&mut self, ext: Arc<ExtensionType>) -> Result<()> {
		let number = ext.number();
		let conflict = |reason: &'static str| ReflectError::ExtensionConflict {
			name: ext.full_name().to_owned(),
			number,
			reason,
		};

		if ext.extendee() != self.message.full_name.as_ref() {
			return Err(conflict("extended type does not match message"));
		}
		if !self.message.in_extension_range(number) {
			return Err(conflict("field number outside extension ranges"));
		}
		if self.message.field(number).is_some() {
			return Err(conflict("field number declared by message"));
		}
		if ext.field().oneof.is_some() {
			return Err(conflict("extension cannot belong to a oneof"));
		}
		if ext.field().is_map() {
			return Err(conflict("extension cannot be a map"));
		}
		if self.types.by_number.contains_key(&number) {
			return Err(conflict("field number already registered"));
		}
		if self.types.by_name.contains_key(ext.full_name()) {
			return Err(conflict("full name already registered"));
		}
		self.schema.check_extension_field(self.message, ext.field())?;

		debug!(extension = ext.full_name(), number, message = %self.message.full_name, "extension registered");
		self.types.by_name.insert(ext.full_name().into(), number);
		self.types.by_number.insert(number, ext);
		Ok(())
	}

	/// Remove `ext`; a no-op when it is not registered.
	pub fn remove(&mut self, ext: &ExtensionType) -> Result<()> {
		let number = ext.number();
		let registered = self
			.types
			.by_number
			.get(&number)
			.is_some_and(|current| current.full_name() == ext.full_name());
		if !registered {
			return Ok(());
		}

		if self.values.get(&number).is_some_and(is_populated) {
			return Err(ReflectError::ExtensionStillSet {
				name: ext.full_name().to_owned(),
				number,
			});
		}

		self.values.remove(&number);
		self.types.by_number.remove(&number);
		self.types.by_name.remove(ext.full_name());
		debug!(extension = ext.full_name(), number, message = %self.message.full_name, "extension removed");
		Ok(())
	}
}

impl Deref for ExtensionTypesMut<'_> {
	type Target = ExtensionTypes;

	fn deref(&self) -> &Self::Target {
		self.types
	}
}
