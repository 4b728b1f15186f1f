use std::sync::Arc;

use crate::reflect::wire::{Cursor, Record, WireType, append_tag, append_varint};
use crate::reflect::{FieldNumber, ReflectError, Result};

/// Raw bytes of an ordered sequence of wire records.
///
/// Each record carries its own tag. Stored bytes are never written again:
/// appending copies into a fresh buffer, so clones taken earlier keep reading
/// the original prefix.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawFields {
	bytes: Arc<[u8]>,
}

impl RawFields {
	/// Create an empty run.
	pub fn new() -> Self {
		Self::default()
	}

	/// Wrap already-encoded record bytes without validating them.
	pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
		let bytes: Vec<u8> = bytes.into();
		Self { bytes: bytes.into() }
	}

	/// Borrow the encoded bytes.
	pub fn as_bytes(&self) -> &[u8] {
		&self.bytes
	}

	/// Encoded length in bytes.
	pub fn len(&self) -> usize {
		self.bytes.len()
	}

	/// Report whether the run holds no bytes.
	pub fn is_empty(&self) -> bool {
		self.bytes.is_empty()
	}

	/// Report whether the bytes are syntactically valid wire format.
	pub fn is_valid(&self) -> bool {
		self.records().all(|record| record.is_ok())
	}

	/// Iterate record headers in order.
	///
	/// Yields one error at the first malformed record and then stops.
	pub fn records(&self) -> Records<'_> {
		Records {
			cursor: Cursor::new(&self.bytes),
			failed: false,
		}
	}

	/// Append already-encoded complete records without validating them.
	///
	/// Callers must pass whole records, as with [`RawFields::from_bytes`];
	/// partial records make the run invalid.
	pub fn append(&mut self, records: &[u8]) {
		if records.is_empty() {
			return;
		}
		debug_assert!(RawFields::from_bytes(records).is_valid(), "append expects complete records");
		let mut grown = Vec::with_capacity(self.bytes.len() + records.len());
		grown.extend_from_slice(&self.bytes);
		grown.extend_from_slice(records);
		self.bytes = grown.into();
	}

	/// Append one varint record.
	pub fn append_varint(&mut self, number: FieldNumber, value: u64) {
		let mut out = Vec::new();
		append_tag(&mut out, number, WireType::Varint);
		append_varint(&mut out, value);
		self.append(&out);
	}

	/// Append one fixed32 record.
	pub fn append_fixed32(&mut self, number: FieldNumber, value: u32) {
		let mut out = Vec::new();
		append_tag(&mut out, number, WireType::Fixed32);
		out.extend_from_slice(&value.to_le_bytes());
		self.append(&out);
	}

	/// Append one fixed64 record.
	pub fn append_fixed64(&mut self, number: FieldNumber, value: u64) {
		let mut out = Vec::new();
		append_tag(&mut out, number, WireType::Fixed64);
		out.extend_from_slice(&value.to_le_bytes());
		self.append(&out);
	}

	/// Append one length-delimited record.
	pub fn append_bytes(&mut self, number: FieldNumber, payload: &[u8]) {
		let mut out = Vec::new();
		append_tag(&mut out, number, WireType::Bytes);
		append_varint(&mut out, payload.len() as u64);
		out.extend_from_slice(payload);
		self.append(&out);
	}

	/// Append one group record wrapping `inner`, which must be complete records.
	pub fn append_group(&mut self, number: FieldNumber, inner: &RawFields) {
		let mut out = Vec::new();
		append_tag(&mut out, number, WireType::StartGroup);
		out.extend_from_slice(inner.as_bytes());
		append_tag(&mut out, number, WireType::EndGroup);
		self.append(&out);
	}

	/// Check validity and that every record carries `number`.
	pub(crate) fn check_for_field(&self, number: FieldNumber) -> Result<()> {
		for record in self.records() {
			let record = record.map_err(|err| match err {
				ReflectError::MalformedWire { offset, .. } => ReflectError::MalformedWire { number, offset },
				other => other,
			})?;
			if record.number != number {
				return Err(ReflectError::WireFieldNumberMismatch {
					expected: number,
					got: record.number,
				});
			}
		}
		Ok(())
	}
}

impl From<Vec<u8>> for RawFields {
	fn from(bytes: Vec<u8>) -> Self {
		Self::from_bytes(bytes)
	}
}

/// Iterator over the records of a [`RawFields`].
pub struct Records<'a> {
	cursor: Cursor<'a>,
	failed: bool,
}

impl Iterator for Records<'_> {
	type Item = Result<Record>;

	fn next(&mut self) -> Option<Self::Item> {
		if self.failed || self.cursor.remaining() == 0 {
			return None;
		}

		let offset = self.cursor.pos();
		match self.cursor.read_record() {
			Some(record) => Some(Ok(record)),
			None => {
				self.failed = true;
				Some(Err(ReflectError::MalformedWire { number: 0, offset }))
			}
		}
	}
}

#[cfg(test)]
mod tests;
