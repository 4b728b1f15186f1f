use std::sync::Arc;

use crate::reflect::{FieldDescriptor, Kind, Message, MessageDescriptor, Schema};

pub(crate) const SCENARIO: u32 = 0;
pub(crate) const LEAF: u32 = 1;
pub(crate) const SEALED: u32 = 2;

pub(crate) const NUMBERS: u32 = 1;
pub(crate) const LABELS: u32 = 2;
pub(crate) const CHILD: u32 = 3;
pub(crate) const NAME: u32 = 4;
pub(crate) const NICKNAME: u32 = 5;
pub(crate) const INT_CHOICE: u32 = 6;
pub(crate) const STR_CHOICE: u32 = 7;
pub(crate) const MSG_CHOICE: u32 = 8;
pub(crate) const CHILDREN: u32 = 9;
pub(crate) const BY_ID: u32 = 10;
pub(crate) const SCORE: u32 = 11;
pub(crate) const KIND: u32 = 12;

pub(crate) fn test_schema() -> Arc<Schema> {
	let scenario = MessageDescriptor::new(
		"demo.Scenario",
		vec![
			FieldDescriptor::new(NUMBERS, "numbers", Kind::Int64).repeated(),
			FieldDescriptor::new(LABELS, "labels", Kind::String).map(Kind::String),
			FieldDescriptor::new(CHILD, "child", Kind::Message(LEAF)),
			FieldDescriptor::new(NAME, "name", Kind::String),
			FieldDescriptor::new(NICKNAME, "nickname", Kind::String).optional(),
			FieldDescriptor::new(INT_CHOICE, "int_choice", Kind::Int32).in_oneof(0),
			FieldDescriptor::new(STR_CHOICE, "str_choice", Kind::String).in_oneof(0),
			FieldDescriptor::new(MSG_CHOICE, "msg_choice", Kind::Message(LEAF)).in_oneof(0),
			FieldDescriptor::new(CHILDREN, "children", Kind::Message(LEAF)).repeated(),
			FieldDescriptor::new(BY_ID, "by_id", Kind::Message(LEAF)).map(Kind::Uint32),
			FieldDescriptor::new(SCORE, "score", Kind::Double),
			FieldDescriptor::new(KIND, "kind", Kind::Enum),
		],
	)
	.with_oneof("choice")
	.with_extension_range(100..=199);

	let leaf = MessageDescriptor::new(
		"demo.Leaf",
		vec![FieldDescriptor::new(1, "value", Kind::Int32), FieldDescriptor::new(2, "note", Kind::String)],
	);

	let sealed = MessageDescriptor::new("demo.Sealed", vec![FieldDescriptor::new(1, "x", Kind::Bool)]).without_unknown_fields();

	Arc::new(Schema::new(vec![scenario, leaf, sealed]).expect("test schema validates"))
}

pub(crate) fn scenario(schema: &Arc<Schema>) -> Message {
	Message::new(schema, SCENARIO).expect("scenario message")
}
