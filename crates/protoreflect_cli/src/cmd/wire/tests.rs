use protoreflect::reflect::{RawFields, ReflectError};

use super::scan;
use crate::cmd::util::parse_hex;

#[test]
fn parse_hex_accepts_prefix_and_whitespace() {
	assert_eq!(parse_hex("0x08 96 01").expect("hex"), vec![0x08, 0x96, 0x01]);
	assert_eq!(parse_hex("  ").expect("empty"), Vec::<u8>::new());
	assert_eq!(parse_hex("AbCd").expect("mixed case"), vec![0xab, 0xcd]);
}

#[test]
fn parse_hex_rejects_bad_digits_and_odd_length() {
	assert!(matches!(parse_hex("0g"), Err(ReflectError::InvalidHex { .. })));
	assert!(matches!(parse_hex("089"), Err(ReflectError::InvalidHex { .. })));
}

#[test]
fn scan_lists_records_in_order() {
	let mut raw = RawFields::new();
	raw.append_varint(1, 150);
	raw.append_bytes(2, b"abc");

	let listing = scan(&raw);
	assert!(listing.valid);
	assert_eq!(listing.bytes, raw.len());
	assert_eq!(listing.records.len(), 2);
	assert_eq!(listing.records[0].wire_type, "varint");
	assert_eq!(listing.records[1].number, 2);
	assert_eq!(listing.records[1].offset, 3);
	assert!(listing.error_offset.is_none());
}

#[test]
fn scan_reports_where_a_run_breaks() {
	let raw = RawFields::from_bytes(vec![0x08, 0x01, 0x12, 0x05, b'a']);

	let listing = scan(&raw);
	assert!(!listing.valid);
	assert_eq!(listing.records.len(), 1);
	assert_eq!(listing.error_offset, Some(2));
}

#[test]
fn error_offset_follows_last_complete_record() {
	let mut raw = RawFields::new();
	raw.append_varint(1, 300);
	raw.append_fixed32(2, 7);
	let mut bytes = raw.as_bytes().to_vec();
	bytes.extend_from_slice(&[0x1d, 0x01]);

	let listing = scan(&RawFields::from_bytes(bytes));
	assert!(!listing.valid);
	let last = listing.records.last().expect("complete records are listed");
	assert_eq!(listing.error_offset, Some(last.offset + last.len));
	assert_eq!(listing.error_offset, Some(raw.len()));
}
