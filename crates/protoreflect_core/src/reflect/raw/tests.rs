use crate::reflect::{RawFields, ReflectError, WireType};

fn three_records() -> RawFields {
	let mut raw = RawFields::new();
	raw.append_varint(1, 150);
	raw.append_bytes(2, b"payload");
	raw.append_fixed32(3, 0xdead_beef);
	raw
}

#[test]
fn empty_run_is_valid() {
	assert!(RawFields::new().is_valid());
	assert_eq!(RawFields::new().records().count(), 0);
}

#[test]
fn well_formed_records_are_valid() {
	let raw = three_records();
	assert!(raw.is_valid());

	let records: Vec<_> = raw.records().collect::<Result<_, _>>().expect("records parse");
	let shape: Vec<_> = records.iter().map(|record| (record.number, record.wire_type)).collect();
	assert_eq!(shape, vec![(1, WireType::Varint), (2, WireType::Bytes), (3, WireType::Fixed32)]);
	assert_eq!(records[0].offset, 0);
	assert_eq!(records[1].offset, records[0].len);
}

#[test]
fn truncating_last_record_by_one_byte_invalidates() {
	let raw = three_records();
	let bytes = raw.as_bytes();
	let truncated = RawFields::from_bytes(&bytes[..bytes.len() - 1]);
	assert!(!truncated.is_valid());

	let results: Vec<_> = truncated.records().collect();
	assert_eq!(results.len(), 3, "two good records then one error");
	assert!(matches!(results[2], Err(ReflectError::MalformedWire { .. })));
}

#[test]
fn append_keeps_earlier_views_stable() {
	let mut raw = RawFields::new();
	raw.append_varint(4, 1);
	let view = raw.clone();
	let before = view.as_bytes().to_vec();

	raw.append_fixed64(4, 7);
	assert_eq!(view.as_bytes(), before.as_slice());
	assert!(raw.as_bytes().starts_with(&before));
	assert_eq!(raw.records().count(), 2);
}

#[test]
fn group_records_validate_as_one_record() {
	let mut inner = RawFields::new();
	inner.append_varint(1, 9);
	let mut raw = RawFields::new();
	raw.append_group(8, &inner);

	let records: Vec<_> = raw.records().collect::<Result<_, _>>().expect("group parses");
	assert_eq!(records.len(), 1);
	assert_eq!(records[0].wire_type, WireType::StartGroup);
	assert_eq!(records[0].len, raw.len());
}

#[test]
fn field_check_reports_mismatched_number() {
	let raw = three_records();
	let err = raw.check_for_field(1).expect_err("records for 2 and 3 present");
	assert!(matches!(err, ReflectError::WireFieldNumberMismatch { expected: 1, got: 2 }));

	let broken = RawFields::from_bytes(vec![0x08]);
	let err = broken.check_for_field(1).expect_err("truncated varint");
	assert!(matches!(err, ReflectError::MalformedWire { number: 1, offset: 0 }));
}

#[test]
#[cfg(debug_assertions)]
#[should_panic(expected = "append expects complete records")]
fn append_refuses_partial_records_in_debug_builds() {
	let mut raw = three_records();
	raw.append(&[0x08]);
}
