use super::{Cursor, MAX_FIELD_NUMBER, WireType, append_tag, append_varint, consume_record};

fn varint(value: u64) -> Vec<u8> {
	let mut out = Vec::new();
	append_varint(&mut out, value);
	out
}

#[test]
fn varint_encodes_known_vectors() {
	assert_eq!(varint(0), [0x00]);
	assert_eq!(varint(1), [0x01]);
	assert_eq!(varint(150), [0x96, 0x01]);
	assert_eq!(varint(u64::MAX).len(), 10);
}

#[test]
fn varint_reader_accepts_max_and_rejects_overflow() {
	let max = varint(u64::MAX);
	assert_eq!(Cursor::new(&max).read_varint(), Some(u64::MAX));

	let overflow = [0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0x02];
	assert_eq!(Cursor::new(&overflow).read_varint(), None);

	let too_long = [0x80; 11];
	assert_eq!(Cursor::new(&too_long).read_varint(), None);

	assert_eq!(Cursor::new(&[0x96]).read_varint(), None, "truncated varint");
}

#[test]
fn tag_rejects_reserved_wire_types_and_bad_numbers() {
	let mut reserved = Vec::new();
	append_varint(&mut reserved, (1 << 3) | 6);
	assert_eq!(Cursor::new(&reserved).read_tag(), None);

	let zero = varint(WireType::Varint.bits());
	assert_eq!(Cursor::new(&zero).read_tag(), None, "field number 0");

	let mut max = Vec::new();
	append_tag(&mut max, MAX_FIELD_NUMBER, WireType::Fixed32);
	assert_eq!(Cursor::new(&max).read_tag(), Some((MAX_FIELD_NUMBER, WireType::Fixed32)));

	let above = varint((u64::from(MAX_FIELD_NUMBER) + 1) << 3);
	assert_eq!(Cursor::new(&above).read_tag(), None);
}

#[test]
fn record_lengths_cover_each_wire_type() {
	let mut bytes = Vec::new();
	append_tag(&mut bytes, 1, WireType::Varint);
	append_varint(&mut bytes, 300);
	let record = consume_record(&bytes).expect("varint record");
	assert_eq!((record.number, record.wire_type, record.len), (1, WireType::Varint, 3));

	let mut bytes = Vec::new();
	append_tag(&mut bytes, 2, WireType::Fixed64);
	bytes.extend_from_slice(&[0; 8]);
	assert_eq!(consume_record(&bytes).expect("fixed64").len, 9);

	let mut bytes = Vec::new();
	append_tag(&mut bytes, 3, WireType::Fixed32);
	bytes.extend_from_slice(&[0; 4]);
	assert_eq!(consume_record(&bytes).expect("fixed32").len, 5);

	let mut bytes = Vec::new();
	append_tag(&mut bytes, 4, WireType::Bytes);
	append_varint(&mut bytes, 3);
	bytes.extend_from_slice(b"abc");
	assert_eq!(consume_record(&bytes).expect("bytes").len, 5);
}

#[test]
fn nested_groups_extend_to_matching_end() {
	let mut bytes = Vec::new();
	append_tag(&mut bytes, 5, WireType::StartGroup);
	append_tag(&mut bytes, 6, WireType::StartGroup);
	append_tag(&mut bytes, 1, WireType::Varint);
	append_varint(&mut bytes, 7);
	append_tag(&mut bytes, 6, WireType::EndGroup);
	append_tag(&mut bytes, 5, WireType::EndGroup);
	let total = bytes.len();
	append_tag(&mut bytes, 9, WireType::Varint);
	append_varint(&mut bytes, 1);

	let record = consume_record(&bytes).expect("group record");
	assert_eq!(record.number, 5);
	assert_eq!(record.wire_type, WireType::StartGroup);
	assert_eq!(record.len, total);
}

#[test]
fn mismatched_or_stray_end_group_is_rejected() {
	let mut mismatched = Vec::new();
	append_tag(&mut mismatched, 5, WireType::StartGroup);
	append_tag(&mut mismatched, 6, WireType::EndGroup);
	assert_eq!(consume_record(&mismatched), None);

	let mut stray = Vec::new();
	append_tag(&mut stray, 5, WireType::EndGroup);
	assert_eq!(consume_record(&stray), None);

	let mut unterminated = Vec::new();
	append_tag(&mut unterminated, 5, WireType::StartGroup);
	assert_eq!(consume_record(&unterminated), None);
}

#[test]
fn length_prefix_past_end_is_rejected() {
	let mut bytes = Vec::new();
	append_tag(&mut bytes, 4, WireType::Bytes);
	append_varint(&mut bytes, 10);
	bytes.extend_from_slice(b"short");
	assert_eq!(consume_record(&bytes), None);
}
