use thiserror::Error;

use crate::reflect::FieldNumber;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, ReflectError>;

/// Errors produced while building schemas and accessing message fields.
#[derive(Debug, Error)]
pub enum ReflectError {
	/// Value extraction or storage with the wrong union member.
	#[error("type mismatch: expected {expected}, got {got}")]
	TypeMismatch {
		/// Expected logical value kind.
		expected: &'static str,
		/// Actual logical value kind.
		got: &'static str,
	},
	/// Embedded message of a different type than the field declares.
	#[error("message type mismatch: expected {expected}, got {got}")]
	MessageTypeMismatch {
		/// Declared message full name.
		expected: String,
		/// Supplied message full name.
		got: String,
	},
	/// Field number is neither declared nor a registered extension.
	#[error("unknown field number {number} on {message}")]
	UnknownFieldNumber {
		/// Full name of the message type.
		message: String,
		/// Offending field number.
		number: FieldNumber,
	},
	/// Vector index outside the valid bound.
	#[error("index {index} out of range for length {len}")]
	IndexOutOfRange {
		/// Requested index.
		index: usize,
		/// Current vector length.
		len: usize,
	},
	/// Null was passed where a populated value is required.
	#[error("null rejected by {context}")]
	NullRejected {
		/// Operation that rejected the null.
		context: &'static str,
	},
	/// Extension registration conflicts with existing state or schema.
	#[error("extension conflict for {name} (field {number}): {reason}")]
	ExtensionConflict {
		/// Extension full name.
		name: String,
		/// Extension field number.
		number: FieldNumber,
		/// Conflict description.
		reason: &'static str,
	},
	/// Extension removal while a value is still populated.
	#[error("extension {name} (field {number}) still has a value")]
	ExtensionStillSet {
		/// Extension full name.
		name: String,
		/// Extension field number.
		number: FieldNumber,
	},
	/// Extension range ends before it starts.
	#[error("invalid extension range {start}..={end} in {message}")]
	InvalidExtensionRange {
		/// Message full name.
		message: String,
		/// First field number of the range.
		start: FieldNumber,
		/// Last field number of the range.
		end: FieldNumber,
	},
	/// Raw field bytes are not syntactically valid wire format.
	#[error("malformed wire data for field {number} at offset {offset}")]
	MalformedWire {
		/// Field number the run was stored under, or 0 when not known.
		number: FieldNumber,
		/// Byte offset of the first record that failed to parse.
		offset: usize,
	},
	/// Raw record carries a different field number than its slot.
	#[error("wire record for field {got} stored under field {expected}")]
	WireFieldNumberMismatch {
		/// Slot field number.
		expected: FieldNumber,
		/// Field number decoded from the record tag.
		got: FieldNumber,
	},
	/// Requested message type name was not found.
	#[error("message type not found: {name}")]
	MessageNotFound {
		/// Requested full name.
		name: String,
	},
	/// Two message types share a full name.
	#[error("duplicate message type name: {name}")]
	DuplicateMessageName {
		/// Duplicated full name.
		name: String,
	},
	/// Two fields of one message share a field number.
	#[error("duplicate field number {number} on {message}")]
	DuplicateFieldNumber {
		/// Full name of the message type.
		message: String,
		/// Duplicated field number.
		number: FieldNumber,
	},
	/// Field number outside the representable range.
	#[error("invalid field number {number} on {message}")]
	InvalidFieldNumber {
		/// Full name of the message type.
		message: String,
		/// Offending field number.
		number: FieldNumber,
	},
	/// Map field declared with a key kind that cannot be a map key.
	#[error("invalid map key kind {kind} for {message}.{field}")]
	InvalidMapKeyKind {
		/// Full name of the message type.
		message: String,
		/// Field name.
		field: String,
		/// Rejected key kind.
		kind: &'static str,
	},
	/// Field refers to a message index missing from the schema.
	#[error("message index out of range for {message}.{field}: idx={idx}, max={max}")]
	MessageIndexOutOfRange {
		/// Full name of the message type.
		message: String,
		/// Field name.
		field: String,
		/// Offending index.
		idx: u32,
		/// Number of message types in the schema.
		max: u32,
	},
	/// Field refers to a oneof index missing from its message.
	#[error("oneof index {idx} out of range for {message}.{field}")]
	OneofIndexOutOfRange {
		/// Full name of the message type.
		message: String,
		/// Field name.
		field: String,
		/// Offending index.
		idx: u32,
	},
	/// Declared default does not fit the field.
	#[error("invalid default for {message}.{field}: {reason}")]
	InvalidDefault {
		/// Full name of the message type.
		message: String,
		/// Field name.
		field: String,
		/// Rejection description.
		reason: &'static str,
	},
	/// CLI hex argument was invalid.
	#[error("invalid hex input: {value}")]
	InvalidHex {
		/// User-provided text.
		value: String,
	},
}
