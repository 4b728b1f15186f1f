use std::ops::ControlFlow;

use crate::reflect::test_support::{SEALED, scenario, test_schema};
use crate::reflect::{Message, RawFields, ReflectError};

fn run_for(number: u32, values: &[u64]) -> RawFields {
	let mut raw = RawFields::new();
	for value in values {
		raw.append_varint(number, *value);
	}
	raw
}

#[test]
fn set_groups_by_field_number() {
	let schema = test_schema();
	let mut message = scenario(&schema);
	let unknown = message.unknown_fields_mut();
	assert!(unknown.is_supported());

	let run_a = run_for(5, &[1, 2]);
	let run_b = run_for(7, &[3]);
	unknown.set(5, run_a.clone()).expect("set 5");
	unknown.set(7, run_b.clone()).expect("set 7");

	let mut seen = Vec::new();
	unknown.range(|number, raw| {
		seen.push((number, raw.clone()));
		ControlFlow::Continue(())
	});
	seen.sort_by_key(|(number, _)| *number);
	assert_eq!(seen, vec![(5, run_a), (7, run_b)]);
	assert_eq!(unknown.len(), unknown.list().len());

	unknown.set(5, RawFields::new()).expect("clear 5");
	assert_eq!(unknown.list(), vec![7]);
	assert!(unknown.get(5).is_empty());
}

#[test]
fn append_preserves_record_order_within_a_number() {
	let schema = test_schema();
	let mut message = scenario(&schema);
	let unknown = message.unknown_fields_mut();

	unknown.append(9, &run_for(9, &[1])).expect("first");
	let first_view = unknown.get(9);
	unknown.append(9, &run_for(9, &[2, 3])).expect("second");

	assert_eq!(unknown.get(9), run_for(9, &[1, 2, 3]));
	assert_eq!(first_view, run_for(9, &[1]), "earlier views are unaffected by appends");
	assert_eq!(unknown.len(), 1);
}

#[test]
fn malformed_runs_are_rejected_without_truncation() {
	let schema = test_schema();
	let mut message = scenario(&schema);
	let unknown = message.unknown_fields_mut();

	let good = run_for(5, &[300]);
	unknown.set(5, good.clone()).expect("good run");

	let bytes = good.as_bytes();
	let truncated = RawFields::from_bytes(&bytes[..bytes.len() - 1]);
	let err = unknown.set(5, truncated.clone()).expect_err("truncated run");
	assert!(matches!(err, ReflectError::MalformedWire { number: 5, .. }));
	assert!(unknown.append(5, &truncated).is_err());
	assert_eq!(unknown.get(5), good, "failed writes keep the previous run");
}

#[test]
fn records_for_other_numbers_are_rejected() {
	let schema = test_schema();
	let mut message = scenario(&schema);
	let unknown = message.unknown_fields_mut();

	let err = unknown.set(5, run_for(6, &[1])).expect_err("wrong number");
	assert!(matches!(err, ReflectError::WireFieldNumberMismatch { expected: 5, got: 6 }));
	assert!(unknown.is_empty());
}

#[test]
fn unsupported_messages_ignore_writes() {
	let schema = test_schema();
	let mut message = Message::new(&schema, SEALED).expect("sealed");
	let unknown = message.unknown_fields_mut();
	assert!(!unknown.is_supported());

	unknown.set(5, run_for(5, &[1])).expect("ignored set");
	unknown.append(5, &run_for(5, &[1])).expect("ignored append");
	unknown.set(5, RawFields::from_bytes(vec![0xff])).expect("malformed input is ignored too");
	assert!(unknown.is_empty());
	assert!(unknown.get(5).is_empty());
}

#[test]
fn range_stops_early() {
	let schema = test_schema();
	let mut message = scenario(&schema);
	let unknown = message.unknown_fields_mut();
	for number in 20..25 {
		unknown.set(number, run_for(number, &[0])).expect("set");
	}

	let mut visits = 0;
	unknown.range(|_, _| {
		visits += 1;
		ControlFlow::Break(())
	});
	assert_eq!(visits, 1);
}
