use std::collections::HashMap;
use std::ops::ControlFlow;
use std::sync::Arc;

use crate::reflect::schema::check_value;
use crate::reflect::value::NULL;
use crate::reflect::{Kind, MapKey, Message, ReflectError, Result, Schema, Value};

/// Associative storage of a map field.
///
/// Entry order is unspecified; callers needing determinism sort [`Map::list`].
#[derive(Debug, Clone)]
pub struct Map {
	schema: Arc<Schema>,
	key: Kind,
	value: Kind,
	entries: HashMap<MapKey, Value>,
}

impl Map {
	/// Create an empty map from `key` to `value` kinds.
	pub fn new(schema: &Arc<Schema>, key: Kind, value: Kind) -> Result<Self> {
		if !key.is_map_key() {
			return Err(ReflectError::TypeMismatch {
				expected: "MapKey",
				got: key.value_member(),
			});
		}
		if let Some(idx) = value.message_index() {
			if schema.message(idx).is_none() {
				return Err(ReflectError::MessageNotFound { name: format!("#{idx}") });
			}
		}
		Ok(Self::empty(schema, key, value))
	}

	pub(crate) fn empty(schema: &Arc<Schema>, key: Kind, value: Kind) -> Self {
		Self {
			schema: Arc::clone(schema),
			key,
			value,
			entries: HashMap::new(),
		}
	}

	pub(crate) fn schema(&self) -> &Arc<Schema> {
		&self.schema
	}

	/// Key kind.
	pub fn key_kind(&self) -> Kind {
		self.key
	}

	/// Value kind.
	pub fn value_kind(&self) -> Kind {
		self.value
	}

	/// Number of entries.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Report whether the map has no entries.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Snapshot of all keys in unspecified order.
	pub fn list(&self) -> Vec<MapKey> {
		self.entries.keys().cloned().collect()
	}

	/// Borrow the value for `key`, or `Null` when absent.
	pub fn get(&self, key: &MapKey) -> &Value {
		self.entries.get(key).unwrap_or(&NULL)
	}

	/// Insert or overwrite the entry for `key`.
	pub fn set(&mut self, key: MapKey, value: Value) -> Result<()> {
		self.check_key(&key)?;
		if value.is_null() {
			return Err(ReflectError::NullRejected { context: "map set" });
		}
		check_value(&self.schema, self.value, &value)?;
		self.entries.insert(key, value);
		Ok(())
	}

	/// Remove the entry for `key`, returning its value if present.
	pub fn remove(&mut self, key: &MapKey) -> Option<Value> {
		self.entries.remove(key)
	}

	/// Mutably borrow the embedded message for `key`, inserting a zero message on miss.
	pub fn mutable(&mut self, key: MapKey) -> Result<&mut Message> {
		self.check_key(&key)?;
		let idx = self.value.message_index().ok_or(ReflectError::TypeMismatch {
			expected: "Message",
			got: self.value.value_member(),
		})?;
		let schema = &self.schema;
		self.entries
			.entry(key)
			.or_insert_with(|| Message::zero(schema, idx).into())
			.as_message_mut()
	}

	/// Visit entries until `visit` breaks.
	pub fn range<F>(&self, mut visit: F)
	where
		F: FnMut(&MapKey, &Value) -> ControlFlow<()>,
	{
		for (key, value) in &self.entries {
			if visit(key, value).is_break() {
				return;
			}
		}
	}

	fn check_key(&self, key: &MapKey) -> Result<()> {
		if !self.key.accepts_key(key) {
			return Err(ReflectError::TypeMismatch {
				expected: self.key.value_member(),
				got: key.kind_name(),
			});
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests;
