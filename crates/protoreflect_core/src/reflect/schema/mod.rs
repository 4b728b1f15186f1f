use std::collections::HashMap;
use std::ops::RangeInclusive;
use std::sync::Arc;

use crate::reflect::wire::{MAX_FIELD_NUMBER, MIN_FIELD_NUMBER};
use crate::reflect::{FieldNumber, MapKey, ReflectError, Result, Value};

/// Index of a message type inside its [`Schema`].
pub type MessageIndex = u32;

/// Declared field kind.
///
/// Message and group kinds refer to another message type of the same schema
/// by index, so recursive types need no indirection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
	/// `bool`.
	Bool,
	/// `enum`.
	Enum,
	/// `int32`.
	Int32,
	/// `sint32`.
	Sint32,
	/// `sfixed32`.
	Sfixed32,
	/// `int64`.
	Int64,
	/// `sint64`.
	Sint64,
	/// `sfixed64`.
	Sfixed64,
	/// `uint32`.
	Uint32,
	/// `fixed32`.
	Fixed32,
	/// `uint64`.
	Uint64,
	/// `fixed64`.
	Fixed64,
	/// `float`.
	Float,
	/// `double`.
	Double,
	/// `string`.
	String,
	/// `bytes`.
	Bytes,
	/// Embedded message.
	Message(MessageIndex),
	/// Group-encoded embedded message.
	Group(MessageIndex),
}

impl Kind {
	/// Schema spelling of the kind.
	pub fn name(self) -> &'static str {
		match self {
			Self::Bool => "bool",
			Self::Enum => "enum",
			Self::Int32 => "int32",
			Self::Sint32 => "sint32",
			Self::Sfixed32 => "sfixed32",
			Self::Int64 => "int64",
			Self::Sint64 => "sint64",
			Self::Sfixed64 => "sfixed64",
			Self::Uint32 => "uint32",
			Self::Fixed32 => "fixed32",
			Self::Uint64 => "uint64",
			Self::Fixed64 => "fixed64",
			Self::Float => "float",
			Self::Double => "double",
			Self::String => "string",
			Self::Bytes => "bytes",
			Self::Message(_) => "message",
			Self::Group(_) => "group",
		}
	}

	/// Referenced message type for message and group kinds.
	pub fn message_index(self) -> Option<MessageIndex> {
		match self {
			Self::Message(idx) | Self::Group(idx) => Some(idx),
			_ => None,
		}
	}

	/// Report whether values of this kind may key a map.
	pub fn is_map_key(self) -> bool {
		!matches!(self, Self::Enum | Self::Float | Self::Double | Self::Bytes | Self::Message(_) | Self::Group(_))
	}

	/// [`Value`] member that holds this kind.
	pub fn value_member(self) -> &'static str {
		match self {
			Self::Bool => "Bool",
			Self::Enum => "Enum",
			Self::Int32 | Self::Sint32 | Self::Sfixed32 => "I32",
			Self::Int64 | Self::Sint64 | Self::Sfixed64 => "I64",
			Self::Uint32 | Self::Fixed32 => "U32",
			Self::Uint64 | Self::Fixed64 => "U64",
			Self::Float => "F32",
			Self::Double => "F64",
			Self::String => "String",
			Self::Bytes => "Bytes",
			Self::Message(_) | Self::Group(_) => "Message",
		}
	}

	/// Zero value of a scalar kind; `Null` for message kinds.
	pub fn zero_value(self) -> Value {
		match self {
			Self::Bool => Value::Bool(false),
			Self::Enum => Value::Enum(0),
			Self::Int32 | Self::Sint32 | Self::Sfixed32 => Value::I32(0),
			Self::Int64 | Self::Sint64 | Self::Sfixed64 => Value::I64(0),
			Self::Uint32 | Self::Fixed32 => Value::U32(0),
			Self::Uint64 | Self::Fixed64 => Value::U64(0),
			Self::Float => Value::F32(0.0),
			Self::Double => Value::F64(0.0),
			Self::String => Value::String("".into()),
			Self::Bytes => Value::Bytes(Vec::new()),
			Self::Message(_) | Self::Group(_) => Value::Null,
		}
	}

	/// Check that a scalar value has the member for this kind.
	///
	/// Message kinds also need the schema; see `check_value`.
	fn accepts_scalar(self, value: &Value) -> bool {
		self.value_member() == value.kind_name() && !matches!(self, Self::Message(_) | Self::Group(_))
	}

	/// Check that a map key has the member for this kind.
	pub(crate) fn accepts_key(self, key: &MapKey) -> bool {
		self.value_member() == key.kind_name()
	}
}

/// Field cardinality.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
	/// Singular field.
	Optional,
	/// Singular proto2 field that must be present on the wire.
	Required,
	/// Repeated field; a map when [`FieldDescriptor::map_key`] is set.
	Repeated,
}

/// One declared field of a message type, or the field of an extension.
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
	/// Field number.
	pub number: FieldNumber,
	/// Field name; full name for extensions.
	pub name: Box<str>,
	/// Element kind; the value kind for maps.
	pub kind: Kind,
	/// Field cardinality.
	pub cardinality: Cardinality,
	/// Key kind for map fields.
	pub map_key: Option<Kind>,
	/// Index into [`MessageDescriptor::oneofs`] when the field is a oneof member.
	pub oneof: Option<u32>,
	/// Explicit presence tracking for singular scalars.
	pub explicit_presence: bool,
	/// Declared default for singular scalars.
	pub default: Option<Value>,
}

impl FieldDescriptor {
	/// Declare a singular implicit-presence field.
	pub fn new(number: FieldNumber, name: &str, kind: Kind) -> Self {
		Self {
			number,
			name: name.into(),
			kind,
			cardinality: Cardinality::Optional,
			map_key: None,
			oneof: None,
			explicit_presence: false,
			default: None,
		}
	}

	/// Track presence explicitly.
	pub fn optional(mut self) -> Self {
		self.cardinality = Cardinality::Optional;
		self.explicit_presence = true;
		self
	}

	/// Mark as a proto2 required field.
	pub fn required(mut self) -> Self {
		self.cardinality = Cardinality::Required;
		self.explicit_presence = true;
		self
	}

	/// Mark as repeated.
	pub fn repeated(mut self) -> Self {
		self.cardinality = Cardinality::Repeated;
		self
	}

	/// Mark as a map from `key` to the field kind.
	pub fn map(mut self, key: Kind) -> Self {
		self.cardinality = Cardinality::Repeated;
		self.map_key = Some(key);
		self
	}

	/// Place the field in the oneof at `idx`.
	pub fn in_oneof(mut self, idx: u32) -> Self {
		self.oneof = Some(idx);
		self
	}

	/// Declare a default value.
	pub fn with_default(mut self, value: impl Into<Value>) -> Self {
		self.default = Some(value.into());
		self
	}

	/// Report whether the field is a map.
	pub fn is_map(&self) -> bool {
		self.map_key.is_some()
	}

	/// Report whether the field is a repeated non-map field.
	pub fn is_list(&self) -> bool {
		self.cardinality == Cardinality::Repeated && self.map_key.is_none()
	}

	/// Report whether "unset" and "set to zero" are distinguishable.
	pub fn is_nullable(&self) -> bool {
		if self.cardinality == Cardinality::Repeated {
			return false;
		}
		self.explicit_presence || self.oneof.is_some() || self.kind.message_index().is_some()
	}

	/// Schema default: the declared default, else the kind's zero value.
	///
	/// Composite fields have no default and yield `Null`.
	pub fn default_value(&self) -> Value {
		if self.cardinality == Cardinality::Repeated {
			return Value::Null;
		}
		match &self.default {
			Some(value) => value.clone(),
			None => self.kind.zero_value(),
		}
	}
}

/// One message type declaration.
#[derive(Debug, Clone)]
pub struct MessageDescriptor {
	/// Fully-qualified message name.
	pub full_name: Box<str>,
	/// Declared fields in source order.
	pub fields: Vec<FieldDescriptor>,
	/// Oneof group names, referenced by [`FieldDescriptor::oneof`].
	pub oneofs: Vec<Box<str>>,
	/// Field number ranges open to extensions.
	pub extension_ranges: Vec<RangeInclusive<FieldNumber>>,
	/// Whether instances keep unknown field bytes.
	pub unknown_fields: bool,
	by_number: HashMap<FieldNumber, usize>,
}

impl MessageDescriptor {
	/// Declare a message type with unknown-field retention enabled.
	pub fn new(full_name: &str, fields: Vec<FieldDescriptor>) -> Self {
		Self {
			full_name: full_name.into(),
			fields,
			oneofs: Vec::new(),
			extension_ranges: Vec::new(),
			unknown_fields: true,
			by_number: HashMap::new(),
		}
	}

	/// Declare a oneof group name.
	pub fn with_oneof(mut self, name: &str) -> Self {
		self.oneofs.push(name.into());
		self
	}

	/// Open a field number range to extensions.
	pub fn with_extension_range(mut self, range: RangeInclusive<FieldNumber>) -> Self {
		self.extension_ranges.push(range);
		self
	}

	/// Drop unknown field bytes instead of retaining them.
	pub fn without_unknown_fields(mut self) -> Self {
		self.unknown_fields = false;
		self
	}

	/// Look up a declared field by number.
	pub fn field(&self, number: FieldNumber) -> Option<&FieldDescriptor> {
		let idx = self.by_number.get(&number)?;
		self.fields.get(*idx)
	}

	/// Look up a declared field by name.
	pub fn field_by_name(&self, name: &str) -> Option<&FieldDescriptor> {
		self.fields.iter().find(|field| field.name.as_ref() == name)
	}

	/// Declared members of the oneof at `idx`.
	pub fn oneof_members(&self, idx: u32) -> impl Iterator<Item = &FieldDescriptor> {
		self.fields.iter().filter(move |field| field.oneof == Some(idx))
	}

	/// Report whether `number` lies inside an extension range.
	pub fn in_extension_range(&self, number: FieldNumber) -> bool {
		self.extension_ranges.iter().any(|range| range.contains(&number))
	}
}

/// Validated, immutable set of message types.
#[derive(Debug)]
pub struct Schema {
	messages: Vec<MessageDescriptor>,
	by_name: HashMap<Box<str>, MessageIndex>,
}

impl Schema {
	/// Validate message declarations and build lookup tables.
	///
	/// Message kinds refer to entries of `messages` by position.
	pub fn new(mut messages: Vec<MessageDescriptor>) -> Result<Self> {
		let mut by_name = HashMap::with_capacity(messages.len());
		for (idx, message) in messages.iter().enumerate() {
			if by_name.insert(message.full_name.clone(), idx as MessageIndex).is_some() {
				return Err(ReflectError::DuplicateMessageName {
					name: message.full_name.to_string(),
				});
			}
		}

		let count = messages.len();
		for message in &mut messages {
			let mut by_number = HashMap::with_capacity(message.fields.len());
			for (idx, field) in message.fields.iter().enumerate() {
				check_field(count, message, field)?;
				if by_number.insert(field.number, idx).is_some() {
					return Err(ReflectError::DuplicateFieldNumber {
						message: message.full_name.to_string(),
						number: field.number,
					});
				}
			}
			for range in &message.extension_ranges {
				for number in [*range.start(), *range.end()] {
					check_number(&message.full_name, number)?;
				}
				if range.start() > range.end() {
					return Err(ReflectError::InvalidExtensionRange {
						message: message.full_name.to_string(),
						start: *range.start(),
						end: *range.end(),
					});
				}
			}
			message.by_number = by_number;
		}

		Ok(Self { messages, by_name })
	}

	/// Number of message types.
	pub fn len(&self) -> usize {
		self.messages.len()
	}

	/// Report whether the schema declares no message types.
	pub fn is_empty(&self) -> bool {
		self.messages.is_empty()
	}

	/// All message types in declaration order.
	pub fn messages(&self) -> &[MessageDescriptor] {
		&self.messages
	}

	/// Look up a message type by index.
	pub fn message(&self, idx: MessageIndex) -> Option<&MessageDescriptor> {
		self.messages.get(idx as usize)
	}

	/// Look up a message type index by full name.
	pub fn index_of(&self, full_name: &str) -> Option<MessageIndex> {
		self.by_name.get(full_name).copied()
	}

	/// Return a message type known to exist.
	pub(crate) fn descriptor(&self, idx: MessageIndex) -> &MessageDescriptor {
		&self.messages[idx as usize]
	}

	/// Validate an extension field against this schema.
	pub(crate) fn check_extension_field(&self, extendee: &MessageDescriptor, field: &FieldDescriptor) -> Result<()> {
		check_field(self.messages.len(), extendee, field)
	}
}

/// Check that `value` can be stored as a singular `kind` of `schema`.
pub(crate) fn check_value(schema: &Arc<Schema>, kind: Kind, value: &Value) -> Result<()> {
	match (kind.message_index(), value) {
		(Some(idx), Value::Message(message)) => {
			if Arc::ptr_eq(message.schema(), schema) && message.index() == idx {
				return Ok(());
			}
			Err(ReflectError::MessageTypeMismatch {
				expected: schema.descriptor(idx).full_name.to_string(),
				got: message.full_name().to_owned(),
			})
		}
		_ if kind.accepts_scalar(value) => Ok(()),
		_ => Err(ReflectError::TypeMismatch {
			expected: kind.value_member(),
			got: value.kind_name(),
		}),
	}
}

fn check_number(message: &str, number: FieldNumber) -> Result<()> {
	if !(MIN_FIELD_NUMBER..=MAX_FIELD_NUMBER).contains(&number) {
		return Err(ReflectError::InvalidFieldNumber {
			message: message.to_owned(),
			number,
		});
	}
	Ok(())
}

fn check_field(count: usize, message: &MessageDescriptor, field: &FieldDescriptor) -> Result<()> {
	check_number(&message.full_name, field.number)?;

	if let Some(idx) = field.kind.message_index() {
		if idx as usize >= count {
			return Err(ReflectError::MessageIndexOutOfRange {
				message: message.full_name.to_string(),
				field: field.name.to_string(),
				idx,
				max: count as u32,
			});
		}
	}

	if let Some(key) = field.map_key {
		if !key.is_map_key() {
			return Err(ReflectError::InvalidMapKeyKind {
				message: message.full_name.to_string(),
				field: field.name.to_string(),
				kind: key.name(),
			});
		}
	}

	if let Some(idx) = field.oneof {
		if idx as usize >= message.oneofs.len() || field.cardinality == Cardinality::Repeated {
			return Err(ReflectError::OneofIndexOutOfRange {
				message: message.full_name.to_string(),
				field: field.name.to_string(),
				idx,
			});
		}
	}

	if let Some(default) = &field.default {
		let reason = if field.cardinality == Cardinality::Repeated || field.kind.message_index().is_some() {
			Some("only singular scalars take defaults")
		} else if !field.kind.accepts_scalar(default) {
			Some("default does not match field kind")
		} else {
			None
		};
		if let Some(reason) = reason {
			return Err(ReflectError::InvalidDefault {
				message: message.full_name.to_string(),
				field: field.name.to_string(),
				reason,
			});
		}
	}

	Ok(())
}
