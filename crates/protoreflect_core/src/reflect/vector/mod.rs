use std::sync::Arc;

use crate::reflect::schema::check_value;
use crate::reflect::{Kind, Message, ReflectError, Result, Schema, Value};

/// Ordered storage of a repeated field.
///
/// Every element is populated: `Null` is never stored or returned.
#[derive(Debug, Clone)]
pub struct Vector {
	schema: Arc<Schema>,
	elem: Kind,
	items: Vec<Value>,
}

impl Vector {
	/// Create an empty vector of `elem` values.
	pub fn new(schema: &Arc<Schema>, elem: Kind) -> Result<Self> {
		if let Some(idx) = elem.message_index() {
			if schema.message(idx).is_none() {
				return Err(ReflectError::MessageNotFound { name: format!("#{idx}") });
			}
		}
		Ok(Self::empty(schema, elem))
	}

	pub(crate) fn empty(schema: &Arc<Schema>, elem: Kind) -> Self {
		Self {
			schema: Arc::clone(schema),
			elem,
			items: Vec::new(),
		}
	}

	pub(crate) fn schema(&self) -> &Arc<Schema> {
		&self.schema
	}

	/// Element kind.
	pub fn element_kind(&self) -> Kind {
		self.elem
	}

	/// Number of elements.
	pub fn len(&self) -> usize {
		self.items.len()
	}

	/// Report whether the vector has no elements.
	pub fn is_empty(&self) -> bool {
		self.items.is_empty()
	}

	/// Borrow the element at `index`.
	pub fn get(&self, index: usize) -> Result<&Value> {
		self.items.get(index).ok_or(ReflectError::IndexOutOfRange {
			index,
			len: self.items.len(),
		})
	}

	/// Replace the element at `index`.
	pub fn set(&mut self, index: usize, value: Value) -> Result<()> {
		self.check(&value, "vector set")?;
		let len = self.items.len();
		let slot = self.items.get_mut(index).ok_or(ReflectError::IndexOutOfRange { index, len })?;
		*slot = value;
		Ok(())
	}

	/// Append one element.
	pub fn append(&mut self, value: Value) -> Result<()> {
		self.check(&value, "vector append")?;
		self.items.push(value);
		Ok(())
	}

	/// Mutably borrow the embedded message at `index`.
	pub fn mutable(&mut self, index: usize) -> Result<&mut Message> {
		self.require_message()?;
		let len = self.items.len();
		self.items
			.get_mut(index)
			.ok_or(ReflectError::IndexOutOfRange { index, len })?
			.as_message_mut()
	}

	/// Append a zero-valued embedded message and borrow it.
	pub fn mutable_append(&mut self) -> Result<&mut Message> {
		let idx = self.require_message()?;
		self.items.push(Message::zero(&self.schema, idx).into());
		let last = self.items.len() - 1;
		self.items[last].as_message_mut()
	}

	/// Drop every element at or after `len`.
	pub fn truncate(&mut self, len: usize) -> Result<()> {
		if len > self.items.len() {
			return Err(ReflectError::IndexOutOfRange {
				index: len,
				len: self.items.len(),
			});
		}
		self.items.truncate(len);
		Ok(())
	}

	/// Iterate elements in index order.
	pub fn iter(&self) -> std::slice::Iter<'_, Value> {
		self.items.iter()
	}

	fn check(&self, value: &Value, context: &'static str) -> Result<()> {
		if value.is_null() {
			return Err(ReflectError::NullRejected { context });
		}
		check_value(&self.schema, self.elem, value)
	}

	fn require_message(&self) -> Result<u32> {
		self.elem.message_index().ok_or(ReflectError::TypeMismatch {
			expected: "Message",
			got: self.elem.value_member(),
		})
	}
}

impl<'a> IntoIterator for &'a Vector {
	type Item = &'a Value;
	type IntoIter = std::slice::Iter<'a, Value>;

	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}
