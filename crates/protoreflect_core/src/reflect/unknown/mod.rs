use std::collections::HashMap;
use std::ops::ControlFlow;

use tracing::trace;

use crate::reflect::{FieldNumber, RawFields, Result};

/// Raw bytes of fields the active schema does not recognize.
///
/// Records are grouped by field number and keep their relative order within a
/// number. Order across numbers is unspecified.
#[derive(Debug, Clone)]
pub struct UnknownFields {
	supported: bool,
	fields: HashMap<FieldNumber, RawFields>,
}

impl UnknownFields {
	pub(crate) fn new(supported: bool) -> Self {
		Self {
			supported,
			fields: HashMap::new(),
		}
	}

	/// Snapshot of field numbers with stored records, in unspecified order.
	pub fn list(&self) -> Vec<FieldNumber> {
		self.fields.keys().copied().collect()
	}

	/// Number of field numbers with stored records.
	pub fn len(&self) -> usize {
		self.fields.len()
	}

	/// Report whether no records are stored.
	pub fn is_empty(&self) -> bool {
		self.fields.is_empty()
	}

	/// All records stored for `number`, or an empty run.
	pub fn get(&self, number: FieldNumber) -> RawFields {
		self.fields.get(&number).cloned().unwrap_or_default()
	}

	/// Replace the records stored for `number`; an empty run clears them.
	///
	/// The run must be valid and every record must carry `number`; otherwise
	/// nothing is stored. Ignored when the message does not keep unknown fields.
	pub fn set(&mut self, number: FieldNumber, raw: RawFields) -> Result<()> {
		if !self.supported {
			trace!(number, len = raw.len(), "unknown field set ignored");
			return Ok(());
		}
		if raw.is_empty() {
			self.fields.remove(&number);
			return Ok(());
		}

		raw.check_for_field(number)?;
		self.fields.insert(number, raw);
		Ok(())
	}

	/// Append records after those already stored for `number`.
	///
	/// Same validity rules as [`UnknownFields::set`].
	pub fn append(&mut self, number: FieldNumber, raw: &RawFields) -> Result<()> {
		if !self.supported {
			trace!(number, len = raw.len(), "unknown field append ignored");
			return Ok(());
		}
		if raw.is_empty() {
			return Ok(());
		}

		raw.check_for_field(number)?;
		self.fields.entry(number).or_default().append(raw.as_bytes());
		Ok(())
	}

	/// Visit each field number once with its records until `visit` breaks.
	pub fn range<F>(&self, mut visit: F)
	where
		F: FnMut(FieldNumber, &RawFields) -> ControlFlow<()>,
	{
		for (number, raw) in &self.fields {
			if visit(*number, raw).is_break() {
				return;
			}
		}
	}

	/// Report whether this message type keeps unknown fields.
	pub fn is_supported(&self) -> bool {
		self.supported
	}
}

#[cfg(test)]
mod tests;
