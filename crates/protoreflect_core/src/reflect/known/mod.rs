use std::collections::HashMap;
use std::ops::ControlFlow;
use std::sync::Arc;

use tracing::trace;

use crate::reflect::extension::{ExtensionTypes, ExtensionTypesMut};
use crate::reflect::schema::check_value;
use crate::reflect::value::NULL;
use crate::reflect::{
	FieldDescriptor, FieldNumber, Kind, Map, Message, MessageDescriptor, MessageIndex, ReflectError, Result, Schema, Value, Vector,
};

/// Mutable reference into a composite field's storage.
///
/// Borrows the owning table, so it cannot outlive the next mutating call.
#[derive(Debug)]
pub enum Mutable<'a> {
	/// Singular embedded message.
	Message(&'a mut Message),
	/// Repeated field.
	Vector(&'a mut Vector),
	/// Map field.
	Map(&'a mut Map),
}

impl<'a> Mutable<'a> {
	/// Unwrap an embedded message reference.
	pub fn into_message(self) -> Result<&'a mut Message> {
		match self {
			Self::Message(message) => Ok(message),
			other => Err(other.mismatch("Message")),
		}
	}

	/// Unwrap a repeated field reference.
	pub fn into_vector(self) -> Result<&'a mut Vector> {
		match self {
			Self::Vector(vector) => Ok(vector),
			other => Err(other.mismatch("Vector")),
		}
	}

	/// Unwrap a map field reference.
	pub fn into_map(self) -> Result<&'a mut Map> {
		match self {
			Self::Map(map) => Ok(map),
			other => Err(other.mismatch("Map")),
		}
	}

	fn mismatch(&self, expected: &'static str) -> ReflectError {
		let got = match self {
			Self::Message(_) => "Message",
			Self::Vector(_) => "Vector",
			Self::Map(_) => "Map",
		};
		ReflectError::TypeMismatch { expected, got }
	}
}

/// Storage shape of one field, copied out of its descriptor.
#[derive(Debug, Clone, Copy)]
struct Slot {
	kind: Kind,
	list: bool,
	map_key: Option<Kind>,
	oneof: Option<u32>,
	nullable: bool,
}

impl Slot {
	fn of(field: &FieldDescriptor) -> Self {
		Self {
			kind: field.kind,
			list: field.is_list(),
			map_key: field.map_key,
			oneof: field.oneof,
			nullable: field.is_nullable(),
		}
	}

	fn is_composite(self) -> bool {
		self.list || self.map_key.is_some() || self.kind.message_index().is_some()
	}

	fn zero_composite(self, schema: &Arc<Schema>) -> Value {
		if let Some(key) = self.map_key {
			return Map::empty(schema, key, self.kind).into();
		}
		if self.list {
			return Vector::empty(schema, self.kind).into();
		}
		match self.kind.message_index() {
			Some(idx) => Message::zero(schema, idx).into(),
			None => Value::Null,
		}
	}
}

/// Report whether a stored value counts as populated.
///
/// Empty repeated and map fields are stored after `mutable` but not populated.
pub(crate) fn is_populated(value: &Value) -> bool {
	match value {
		Value::Null => false,
		Value::Vector(vector) => !vector.is_empty(),
		Value::Map(map) => !map.is_empty(),
		_ => true,
	}
}

/// Declared and extension fields of one message instance.
///
/// `get` never substitutes schema defaults; see [`FieldDescriptor::default_value`].
#[derive(Debug, Clone)]
pub struct KnownFields {
	schema: Arc<Schema>,
	index: MessageIndex,
	values: HashMap<FieldNumber, Value>,
	extensions: ExtensionTypes,
}

impl KnownFields {
	pub(crate) fn new(schema: &Arc<Schema>, index: MessageIndex) -> Self {
		Self {
			schema: Arc::clone(schema),
			index,
			values: HashMap::new(),
			extensions: ExtensionTypes::default(),
		}
	}

	pub(crate) fn schema(&self) -> &Arc<Schema> {
		&self.schema
	}

	pub(crate) fn index(&self) -> MessageIndex {
		self.index
	}

	pub(crate) fn descriptor(&self) -> &MessageDescriptor {
		self.schema.descriptor(self.index)
	}

	/// Snapshot of populated field numbers in unspecified order.
	pub fn list(&self) -> Vec<FieldNumber> {
		self.values.iter().filter(|(_, value)| is_populated(value)).map(|(number, _)| *number).collect()
	}

	/// Number of populated fields.
	pub fn len(&self) -> usize {
		self.values.values().filter(|value| is_populated(value)).count()
	}

	/// Report whether no field is populated.
	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Report whether field `number` is populated.
	pub fn has(&self, number: FieldNumber) -> bool {
		self.values.get(&number).is_some_and(is_populated)
	}

	/// Borrow the value of field `number`, or `Null` when unpopulated.
	pub fn get(&self, number: FieldNumber) -> &Value {
		match self.values.get(&number) {
			Some(value) if is_populated(value) => value,
			_ => &NULL,
		}
	}

	/// Store `value` in field `number`.
	///
	/// `Null` clears a nullable field. Setting a oneof member clears its siblings.
	/// Nothing changes when an error is returned.
	pub fn set(&mut self, number: FieldNumber, value: Value) -> Result<()> {
		let slot = self.resolve(number)?;

		if value.is_null() {
			if !slot.nullable {
				return Err(ReflectError::NullRejected { context: "known field set" });
			}
			self.values.remove(&number);
			return Ok(());
		}

		self.check(slot, &value)?;

		let clears = if slot.nullable { false } else { value.is_scalar_zero() || !is_populated(&value) };
		if clears {
			self.values.remove(&number);
			return Ok(());
		}

		self.clear_oneof_siblings(number, slot);
		self.values.insert(number, value);
		Ok(())
	}

	/// Borrow composite field `number` for in-place mutation.
	///
	/// An unset field is initialized with an empty container or zero message.
	/// Scalar fields fail with [`ReflectError::TypeMismatch`].
	pub fn mutable(&mut self, number: FieldNumber) -> Result<Mutable<'_>> {
		let slot = self.resolve(number)?;
		if !slot.is_composite() {
			return Err(ReflectError::TypeMismatch {
				expected: "composite",
				got: slot.kind.value_member(),
			});
		}

		self.clear_oneof_siblings(number, slot);
		let schema = &self.schema;
		let value = self.values.entry(number).or_insert_with(|| slot.zero_composite(schema));
		match value {
			Value::Message(message) => Ok(Mutable::Message(&mut **message)),
			Value::Vector(vector) => Ok(Mutable::Vector(vector)),
			Value::Map(map) => Ok(Mutable::Map(map)),
			other => Err(ReflectError::TypeMismatch {
				expected: "composite",
				got: other.kind_name(),
			}),
		}
	}

	/// Unset field `number` regardless of nullability.
	pub fn clear(&mut self, number: FieldNumber) -> Result<()> {
		self.resolve(number)?;
		self.values.remove(&number);
		Ok(())
	}

	/// Visit populated fields until `visit` breaks.
	pub fn range<F>(&self, mut visit: F)
	where
		F: FnMut(FieldNumber, &Value) -> ControlFlow<()>,
	{
		for (number, value) in &self.values {
			if !is_populated(value) {
				continue;
			}
			if visit(*number, value).is_break() {
				return;
			}
		}
	}

	/// Extension types registered on this instance.
	pub fn extension_types(&self) -> &ExtensionTypes {
		&self.extensions
	}

	/// Register or remove extension types on this instance.
	pub fn extension_types_mut(&mut self) -> ExtensionTypesMut<'_> {
		let schema: &Schema = &self.schema;
		ExtensionTypesMut {
			types: &mut self.extensions,
			schema,
			message: schema.descriptor(self.index),
			values: &mut self.values,
		}
	}

	fn resolve(&self, number: FieldNumber) -> Result<Slot> {
		if let Some(field) = self.descriptor().field(number) {
			return Ok(Slot::of(field));
		}
		if let Some(ext) = self.extensions.by_number(number) {
			return Ok(Slot::of(ext.field()));
		}
		Err(ReflectError::UnknownFieldNumber {
			message: self.descriptor().full_name.to_string(),
			number,
		})
	}

	fn check(&self, slot: Slot, value: &Value) -> Result<()> {
		if let Some(key) = slot.map_key {
			return match value {
				Value::Map(map) if Arc::ptr_eq(map.schema(), &self.schema) && map.key_kind() == key && map.value_kind() == slot.kind => Ok(()),
				other => Err(ReflectError::TypeMismatch {
					expected: "Map",
					got: other.kind_name(),
				}),
			};
		}

		if slot.list {
			return match value {
				Value::Vector(vector) if Arc::ptr_eq(vector.schema(), &self.schema) && vector.element_kind() == slot.kind => Ok(()),
				other => Err(ReflectError::TypeMismatch {
					expected: "Vector",
					got: other.kind_name(),
				}),
			};
		}

		check_value(&self.schema, slot.kind, value)
	}

	fn clear_oneof_siblings(&mut self, number: FieldNumber, slot: Slot) {
		let Some(oneof) = slot.oneof else {
			return;
		};

		for field in self.schema.descriptor(self.index).oneof_members(oneof) {
			if field.number != number && self.values.remove(&field.number).is_some() {
				trace!(cleared = field.number, set = number, oneof, "oneof member replaced");
			}
		}
	}
}
