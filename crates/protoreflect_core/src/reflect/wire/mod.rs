//! Syntactic wire-format scanning and record appenders.
//!
//! Only record boundaries are checked here; payload contents are opaque.

use crate::reflect::FieldNumber;

/// Smallest valid field number.
pub const MIN_FIELD_NUMBER: FieldNumber = 1;
/// Largest valid field number (`2^29 - 1`).
pub const MAX_FIELD_NUMBER: FieldNumber = (1 << 29) - 1;

const MAX_VARINT_LEN: usize = 10;

/// Payload encoding carried in the low three bits of a tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireType {
	/// Base-128 varint.
	Varint,
	/// Eight little-endian bytes.
	Fixed64,
	/// Varint length followed by that many bytes.
	Bytes,
	/// Opens a group ended by a matching [`WireType::EndGroup`].
	StartGroup,
	/// Closes a group.
	EndGroup,
	/// Four little-endian bytes.
	Fixed32,
}

impl WireType {
	/// Decode the three-bit wire type; 6 and 7 are reserved.
	pub fn from_bits(bits: u64) -> Option<Self> {
		match bits {
			0 => Some(Self::Varint),
			1 => Some(Self::Fixed64),
			2 => Some(Self::Bytes),
			3 => Some(Self::StartGroup),
			4 => Some(Self::EndGroup),
			5 => Some(Self::Fixed32),
			_ => None,
		}
	}

	/// Three-bit encoding of this wire type.
	pub fn bits(self) -> u64 {
		match self {
			Self::Varint => 0,
			Self::Fixed64 => 1,
			Self::Bytes => 2,
			Self::StartGroup => 3,
			Self::EndGroup => 4,
			Self::Fixed32 => 5,
		}
	}

	/// Lowercase label used in listings.
	pub fn label(self) -> &'static str {
		match self {
			Self::Varint => "varint",
			Self::Fixed64 => "fixed64",
			Self::Bytes => "bytes",
			Self::StartGroup => "start_group",
			Self::EndGroup => "end_group",
			Self::Fixed32 => "fixed32",
		}
	}
}

/// Header of one complete record inside a raw run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Record {
	/// Field number from the tag.
	pub number: FieldNumber,
	/// Wire type from the tag.
	pub wire_type: WireType,
	/// Byte offset of the tag within the scanned run.
	pub offset: usize,
	/// Total record length including tag and any group terminator.
	pub len: usize,
}

/// Bounded cursor over wire bytes.
pub(crate) struct Cursor<'a> {
	bytes: &'a [u8],
	pos: usize,
}

impl<'a> Cursor<'a> {
	/// Create a cursor at position 0.
	pub(crate) fn new(bytes: &'a [u8]) -> Self {
		Self { bytes, pos: 0 }
	}

	/// Return current byte offset.
	pub(crate) fn pos(&self) -> usize {
		self.pos
	}

	/// Return remaining unread bytes.
	pub(crate) fn remaining(&self) -> usize {
		self.bytes.len().saturating_sub(self.pos)
	}

	fn skip(&mut self, n: usize) -> Option<()> {
		if n > self.remaining() {
			return None;
		}
		self.pos += n;
		Some(())
	}

	/// Read one base-128 varint.
	pub(crate) fn read_varint(&mut self) -> Option<u64> {
		let mut out = 0_u64;
		for idx in 0..MAX_VARINT_LEN {
			let byte = *self.bytes.get(self.pos)?;
			self.pos += 1;
			if idx == MAX_VARINT_LEN - 1 && byte > 1 {
				return None;
			}
			out |= u64::from(byte & 0x7f) << (7 * idx);
			if byte & 0x80 == 0 {
				return Some(out);
			}
		}
		None
	}

	/// Read a tag and split it into field number and wire type.
	pub(crate) fn read_tag(&mut self) -> Option<(FieldNumber, WireType)> {
		let raw = self.read_varint()?;
		let wire_type = WireType::from_bits(raw & 7)?;
		let number = raw >> 3;
		if number < u64::from(MIN_FIELD_NUMBER) || number > u64::from(MAX_FIELD_NUMBER) {
			return None;
		}
		Some((number as FieldNumber, wire_type))
	}

	/// Skip the payload of a record whose tag was already read.
	///
	/// Groups are skipped up to and including the matching end-group tag.
	fn skip_payload(&mut self, number: FieldNumber, wire_type: WireType) -> Option<()> {
		let mut open = Vec::new();
		let mut current = (number, wire_type);
		loop {
			match current.1 {
				WireType::Varint => {
					self.read_varint()?;
				}
				WireType::Fixed64 => self.skip(8)?,
				WireType::Fixed32 => self.skip(4)?,
				WireType::Bytes => {
					let len = self.read_varint()?;
					self.skip(usize::try_from(len).ok()?)?;
				}
				WireType::StartGroup => open.push(current.0),
				WireType::EndGroup => {
					if open.pop() != Some(current.0) {
						return None;
					}
				}
			}
			if open.is_empty() {
				return Some(());
			}
			current = self.read_tag()?;
		}
	}

	/// Consume one complete record.
	pub(crate) fn read_record(&mut self) -> Option<Record> {
		let offset = self.pos;
		let (number, wire_type) = self.read_tag()?;
		if wire_type == WireType::EndGroup {
			return None;
		}
		self.skip_payload(number, wire_type)?;
		Some(Record {
			number,
			wire_type,
			offset,
			len: self.pos - offset,
		})
	}
}

/// Consume one complete record from the front of `bytes`.
///
/// Returns `None` when no record boundary can be determined.
pub fn consume_record(bytes: &[u8]) -> Option<Record> {
	Cursor::new(bytes).read_record()
}

/// Append a base-128 varint.
pub fn append_varint(out: &mut Vec<u8>, mut value: u64) {
	while value >= 0x80 {
		out.push((value as u8 & 0x7f) | 0x80);
		value >>= 7;
	}
	out.push(value as u8);
}

/// Append a tag for `number` and `wire_type`.
pub fn append_tag(out: &mut Vec<u8>, number: FieldNumber, wire_type: WireType) {
	append_varint(out, (u64::from(number) << 3) | wire_type.bits());
}

#[cfg(test)]
mod tests;
