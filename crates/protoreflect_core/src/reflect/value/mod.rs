use crate::reflect::{Map, Message, ReflectError, Result, Vector};

/// Numeric value of an enum field.
pub type EnumNumber = i32;

/// Runtime value of a message field, vector element, or map entry.
///
/// Exactly one member is active. Extraction with the wrong accessor fails with
/// [`ReflectError::TypeMismatch`]; there is no coercion between members.
#[derive(Debug, Clone, Default)]
pub enum Value {
	/// Unpopulated marker, distinct from every zero value.
	#[default]
	Null,
	/// `bool`.
	Bool(bool),
	/// `int32`, `sint32`, `sfixed32`.
	I32(i32),
	/// `int64`, `sint64`, `sfixed64`.
	I64(i64),
	/// `uint32`, `fixed32`.
	U32(u32),
	/// `uint64`, `fixed64`.
	U64(u64),
	/// `float`.
	F32(f32),
	/// `double`.
	F64(f64),
	/// `string`.
	String(Box<str>),
	/// `bytes`.
	Bytes(Vec<u8>),
	/// `enum`.
	Enum(EnumNumber),
	/// `message` and `group`.
	Message(Box<Message>),
	/// Repeated field storage.
	Vector(Vector),
	/// Map field storage.
	Map(Map),
}

pub(crate) static NULL: Value = Value::Null;

impl Value {
	/// Report whether this is the unpopulated marker.
	pub fn is_null(&self) -> bool {
		matches!(self, Self::Null)
	}

	/// Name of the active member for diagnostics.
	pub fn kind_name(&self) -> &'static str {
		match self {
			Self::Null => "Null",
			Self::Bool(_) => "Bool",
			Self::I32(_) => "I32",
			Self::I64(_) => "I64",
			Self::U32(_) => "U32",
			Self::U64(_) => "U64",
			Self::F32(_) => "F32",
			Self::F64(_) => "F64",
			Self::String(_) => "String",
			Self::Bytes(_) => "Bytes",
			Self::Enum(_) => "Enum",
			Self::Message(_) => "Message",
			Self::Vector(_) => "Vector",
			Self::Map(_) => "Map",
		}
	}

	/// Extract a `bool`.
	pub fn as_bool(&self) -> Result<bool> {
		match self {
			Self::Bool(value) => Ok(*value),
			other => Err(mismatch("Bool", other)),
		}
	}

	/// Extract an `i32`.
	pub fn as_i32(&self) -> Result<i32> {
		match self {
			Self::I32(value) => Ok(*value),
			other => Err(mismatch("I32", other)),
		}
	}

	/// Extract an `i64`.
	pub fn as_i64(&self) -> Result<i64> {
		match self {
			Self::I64(value) => Ok(*value),
			other => Err(mismatch("I64", other)),
		}
	}

	/// Extract a `u32`.
	pub fn as_u32(&self) -> Result<u32> {
		match self {
			Self::U32(value) => Ok(*value),
			other => Err(mismatch("U32", other)),
		}
	}

	/// Extract a `u64`.
	pub fn as_u64(&self) -> Result<u64> {
		match self {
			Self::U64(value) => Ok(*value),
			other => Err(mismatch("U64", other)),
		}
	}

	/// Extract an `f32`.
	pub fn as_f32(&self) -> Result<f32> {
		match self {
			Self::F32(value) => Ok(*value),
			other => Err(mismatch("F32", other)),
		}
	}

	/// Extract an `f64`.
	pub fn as_f64(&self) -> Result<f64> {
		match self {
			Self::F64(value) => Ok(*value),
			other => Err(mismatch("F64", other)),
		}
	}

	/// Borrow string contents.
	pub fn as_str(&self) -> Result<&str> {
		match self {
			Self::String(value) => Ok(value),
			other => Err(mismatch("String", other)),
		}
	}

	/// Borrow byte contents.
	pub fn as_bytes(&self) -> Result<&[u8]> {
		match self {
			Self::Bytes(value) => Ok(value),
			other => Err(mismatch("Bytes", other)),
		}
	}

	/// Extract an enum number.
	pub fn as_enum(&self) -> Result<EnumNumber> {
		match self {
			Self::Enum(value) => Ok(*value),
			other => Err(mismatch("Enum", other)),
		}
	}

	/// Borrow an embedded message.
	pub fn as_message(&self) -> Result<&Message> {
		match self {
			Self::Message(value) => Ok(value),
			other => Err(mismatch("Message", other)),
		}
	}

	/// Mutably borrow an embedded message.
	pub fn as_message_mut(&mut self) -> Result<&mut Message> {
		match self {
			Self::Message(value) => Ok(value),
			other => Err(mismatch("Message", other)),
		}
	}

	/// Borrow repeated field storage.
	pub fn as_vector(&self) -> Result<&Vector> {
		match self {
			Self::Vector(value) => Ok(value),
			other => Err(mismatch("Vector", other)),
		}
	}

	/// Mutably borrow repeated field storage.
	pub fn as_vector_mut(&mut self) -> Result<&mut Vector> {
		match self {
			Self::Vector(value) => Ok(value),
			other => Err(mismatch("Vector", other)),
		}
	}

	/// Borrow map field storage.
	pub fn as_map(&self) -> Result<&Map> {
		match self {
			Self::Map(value) => Ok(value),
			other => Err(mismatch("Map", other)),
		}
	}

	/// Mutably borrow map field storage.
	pub fn as_map_mut(&mut self) -> Result<&mut Map> {
		match self {
			Self::Map(value) => Ok(value),
			other => Err(mismatch("Map", other)),
		}
	}

	/// Convert to a map key.
	///
	/// Floats, bytes, enums and composites cannot key a map.
	pub fn to_map_key(&self) -> Result<MapKey> {
		match self {
			Self::Null => Err(ReflectError::NullRejected { context: "map key" }),
			Self::Bool(value) => Ok(MapKey::Bool(*value)),
			Self::I32(value) => Ok(MapKey::I32(*value)),
			Self::I64(value) => Ok(MapKey::I64(*value)),
			Self::U32(value) => Ok(MapKey::U32(*value)),
			Self::U64(value) => Ok(MapKey::U64(*value)),
			Self::String(value) => Ok(MapKey::String(value.clone())),
			other => Err(mismatch("MapKey", other)),
		}
	}

	/// Report whether a scalar holds its kind's zero value.
	///
	/// Floats compare by bit pattern, so `-0.0` is not a zero value.
	/// Composites and `Null` are never zero.
	pub(crate) fn is_scalar_zero(&self) -> bool {
		match self {
			Self::Bool(value) => !*value,
			Self::I32(value) => *value == 0,
			Self::I64(value) => *value == 0,
			Self::U32(value) => *value == 0,
			Self::U64(value) => *value == 0,
			Self::F32(value) => value.to_bits() == 0,
			Self::F64(value) => value.to_bits() == 0,
			Self::String(value) => value.is_empty(),
			Self::Bytes(value) => value.is_empty(),
			Self::Enum(value) => *value == 0,
			Self::Null | Self::Message(_) | Self::Vector(_) | Self::Map(_) => false,
		}
	}
}

fn mismatch(expected: &'static str, got: &Value) -> ReflectError {
	ReflectError::TypeMismatch {
		expected,
		got: got.kind_name(),
	}
}

macro_rules! impl_from_scalar {
	($($ty:ty => $variant:ident),* $(,)?) => {
		$(
			impl From<$ty> for Value {
				fn from(value: $ty) -> Self {
					Self::$variant(value)
				}
			}
		)*
	};
}

impl_from_scalar! {
	bool => Bool,
	i32 => I32,
	i64 => I64,
	u32 => U32,
	u64 => U64,
	f32 => F32,
	f64 => F64,
	Vec<u8> => Bytes,
}

impl From<&str> for Value {
	fn from(value: &str) -> Self {
		Self::String(value.into())
	}
}

impl From<String> for Value {
	fn from(value: String) -> Self {
		Self::String(value.into_boxed_str())
	}
}

impl From<&[u8]> for Value {
	fn from(value: &[u8]) -> Self {
		Self::Bytes(value.to_vec())
	}
}

impl From<Message> for Value {
	fn from(value: Message) -> Self {
		Self::Message(Box::new(value))
	}
}

impl From<Vector> for Value {
	fn from(value: Vector) -> Self {
		Self::Vector(value)
	}
}

impl From<Map> for Value {
	fn from(value: Map) -> Self {
		Self::Map(value)
	}
}

impl From<MapKey> for Value {
	fn from(value: MapKey) -> Self {
		value.to_value()
	}
}

/// Key of a map entry: the subset of [`Value`] members allowed as map keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MapKey {
	/// `bool` key.
	Bool(bool),
	/// `int32`, `sint32`, `sfixed32` key.
	I32(i32),
	/// `int64`, `sint64`, `sfixed64` key.
	I64(i64),
	/// `uint32`, `fixed32` key.
	U32(u32),
	/// `uint64`, `fixed64` key.
	U64(u64),
	/// `string` key.
	String(Box<str>),
}

impl MapKey {
	/// Convert back into a [`Value`].
	pub fn to_value(&self) -> Value {
		match self {
			Self::Bool(value) => Value::Bool(*value),
			Self::I32(value) => Value::I32(*value),
			Self::I64(value) => Value::I64(*value),
			Self::U32(value) => Value::U32(*value),
			Self::U64(value) => Value::U64(*value),
			Self::String(value) => Value::String(value.clone()),
		}
	}

	/// Borrow string contents.
	pub fn as_str(&self) -> Option<&str> {
		match self {
			Self::String(value) => Some(value),
			_ => None,
		}
	}

	/// Name of the active member for diagnostics.
	pub fn kind_name(&self) -> &'static str {
		match self {
			Self::Bool(_) => "Bool",
			Self::I32(_) => "I32",
			Self::I64(_) => "I64",
			Self::U32(_) => "U32",
			Self::U64(_) => "U64",
			Self::String(_) => "String",
		}
	}
}

impl From<&str> for MapKey {
	fn from(value: &str) -> Self {
		Self::String(value.into())
	}
}

impl From<bool> for MapKey {
	fn from(value: bool) -> Self {
		Self::Bool(value)
	}
}

impl From<i32> for MapKey {
	fn from(value: i32) -> Self {
		Self::I32(value)
	}
}

impl From<i64> for MapKey {
	fn from(value: i64) -> Self {
		Self::I64(value)
	}
}

impl From<u32> for MapKey {
	fn from(value: u32) -> Self {
		Self::U32(value)
	}
}

impl From<u64> for MapKey {
	fn from(value: u64) -> Self {
		Self::U64(value)
	}
}
