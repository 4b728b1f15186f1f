//! Shared test helpers for workspace crates.

use std::fmt::Write as _;
use std::sync::Arc;

use protoreflect::reflect::{FieldDescriptor, Kind, Message, MessageDescriptor, MessageIndex, RawFields, Schema, Value};

/// Index of `tutorial.Person` in [`person_schema`].
pub const PERSON: MessageIndex = 0;
/// Index of `tutorial.PhoneNumber` in [`person_schema`].
pub const PHONE: MessageIndex = 1;

/// Field numbers of `tutorial.Person`.
pub mod person {
	/// `string name`
	pub const NAME: u32 = 1;
	/// `int32 id`
	pub const ID: u32 = 2;
	/// `optional string email`
	pub const EMAIL: u32 = 3;
	/// `repeated PhoneNumber phones`
	pub const PHONES: u32 = 4;
	/// `map<string, string> attributes`
	pub const ATTRIBUTES: u32 = 5;
	/// `repeated Person friends`
	pub const FRIENDS: u32 = 6;
	/// `oneof contact { string handle; int64 pager; }`
	pub const HANDLE: u32 = 7;
	/// See [`HANDLE`].
	pub const PAGER: u32 = 8;
	/// `repeated int32 scores`
	pub const SCORES: u32 = 9;
}

/// Field numbers of `tutorial.PhoneNumber`.
pub mod phone {
	/// `string number`
	pub const NUMBER: u32 = 1;
	/// `PhoneType type`
	pub const TYPE: u32 = 2;
}

/// Build the address-book schema used across integration tests.
///
/// `Person` refers to itself through `friends` and accepts extensions in `100..=199`.
pub fn person_schema() -> Arc<Schema> {
	let person = MessageDescriptor::new(
		"tutorial.Person",
		vec![
			FieldDescriptor::new(person::NAME, "name", Kind::String),
			FieldDescriptor::new(person::ID, "id", Kind::Int32),
			FieldDescriptor::new(person::EMAIL, "email", Kind::String).optional(),
			FieldDescriptor::new(person::PHONES, "phones", Kind::Message(PHONE)).repeated(),
			FieldDescriptor::new(person::ATTRIBUTES, "attributes", Kind::String).map(Kind::String),
			FieldDescriptor::new(person::FRIENDS, "friends", Kind::Message(PERSON)).repeated(),
			FieldDescriptor::new(person::HANDLE, "handle", Kind::String).in_oneof(0),
			FieldDescriptor::new(person::PAGER, "pager", Kind::Int64).in_oneof(0),
			FieldDescriptor::new(person::SCORES, "scores", Kind::Int32).repeated(),
		],
	)
	.with_oneof("contact")
	.with_extension_range(100..=199);

	let phone = MessageDescriptor::new(
		"tutorial.PhoneNumber",
		vec![
			FieldDescriptor::new(phone::NUMBER, "number", Kind::String),
			FieldDescriptor::new(phone::TYPE, "type", Kind::Enum).with_default(Value::Enum(1)),
		],
	);

	Arc::new(Schema::new(vec![person, phone]).expect("person schema validates"))
}

/// Create an empty `tutorial.Person`.
pub fn new_person(schema: &Arc<Schema>) -> Message {
	Message::new(schema, PERSON).expect("person message")
}

/// Raw run holding one record of each wire type for field `number`.
pub fn mixed_run(number: u32) -> RawFields {
	let mut inner = RawFields::new();
	inner.append_varint(1, 7);

	let mut raw = RawFields::new();
	raw.append_varint(number, 150);
	raw.append_fixed64(number, 0x0102_0304_0506_0708);
	raw.append_bytes(number, b"hi");
	raw.append_group(number, &inner);
	raw.append_fixed32(number, 0xdead_beef);
	raw
}

/// Render bytes as lowercase hex without separators.
pub fn to_hex(bytes: &[u8]) -> String {
	let mut out = String::with_capacity(bytes.len() * 2);
	for byte in bytes {
		let _ = write!(out, "{byte:02x}");
	}
	out
}
