use std::ops::ControlFlow;

use crate::reflect::test_support::{LEAF, test_schema};
use crate::reflect::{Kind, Map, MapKey, ReflectError, Value};

#[test]
fn set_get_and_overwrite() {
	let schema = test_schema();
	let mut map = Map::new(&schema, Kind::String, Kind::String).expect("map");
	map.set("a".into(), "x".into()).expect("set a");
	map.set("b".into(), "y".into()).expect("set b");
	map.set("a".into(), "z".into()).expect("overwrite a");

	assert_eq!(map.len(), 2);
	assert_eq!(map.get(&"a".into()).as_str().expect("str"), "z");
	assert!(map.get(&"c".into()).is_null());

	let mut keys = map.list();
	keys.sort();
	assert_eq!(keys, vec![MapKey::from("a"), MapKey::from("b")]);
}

#[test]
fn null_values_and_wrong_keys_are_rejected() {
	let schema = test_schema();
	let mut map = Map::new(&schema, Kind::String, Kind::String).expect("map");
	map.set("a".into(), "x".into()).expect("set");

	assert!(matches!(map.set("a".into(), Value::Null), Err(ReflectError::NullRejected { .. })));
	assert!(matches!(map.set(MapKey::I32(1), "x".into()), Err(ReflectError::TypeMismatch { .. })));
	assert!(matches!(map.set("b".into(), 1_i32.into()), Err(ReflectError::TypeMismatch { .. })));

	assert_eq!(map.len(), 1, "failed sets leave the map unchanged");
	assert_eq!(map.get(&"a".into()).as_str().expect("str"), "x");
}

#[test]
fn composite_and_float_key_kinds_are_refused() {
	let schema = test_schema();
	assert!(Map::new(&schema, Kind::Double, Kind::String).is_err());
	assert!(Map::new(&schema, Kind::Message(LEAF), Kind::String).is_err());
	assert!(Map::new(&schema, Kind::String, Kind::Message(42)).is_err());
}

#[test]
fn mutable_creates_zero_message_on_miss() {
	let schema = test_schema();
	let mut map = Map::new(&schema, Kind::Uint32, Kind::Message(LEAF)).expect("map");

	let leaf = map.mutable(MapKey::U32(7)).expect("zero leaf");
	assert!(leaf.known_fields().is_empty());
	leaf.known_fields_mut().set(1, 11_i32.into()).expect("set value");

	map.mutable(MapKey::U32(7)).expect("existing leaf");
	assert_eq!(map.len(), 1);
	let stored = map.get(&MapKey::U32(7)).as_message().expect("message");
	assert_eq!(stored.known_fields().get(1).as_i32().expect("i32"), 11);

	assert!(matches!(map.mutable(MapKey::from("7")), Err(ReflectError::TypeMismatch { .. })));
}

#[test]
fn scalar_maps_have_no_mutable_entries() {
	let schema = test_schema();
	let mut map = Map::new(&schema, Kind::String, Kind::Int32).expect("map");
	assert!(matches!(map.mutable("a".into()), Err(ReflectError::TypeMismatch { .. })));
	assert!(map.is_empty());
}

#[test]
fn range_visits_each_entry_and_stops_early() {
	let schema = test_schema();
	let mut map = Map::new(&schema, Kind::Int64, Kind::Bool).expect("map");
	for key in 0..5_i64 {
		map.set(MapKey::I64(key), Value::from(key % 2 == 0)).expect("set");
	}

	let mut seen = Vec::new();
	map.range(|key, _| {
		seen.push(key.clone());
		ControlFlow::Continue(())
	});
	seen.sort();
	assert_eq!(seen, (0..5).map(MapKey::I64).collect::<Vec<_>>());

	let mut visits = 0;
	map.range(|_, _| {
		visits += 1;
		ControlFlow::Break(())
	});
	assert_eq!(visits, 1);

	assert!(map.remove(&MapKey::I64(0)).is_some());
	assert_eq!(map.len(), 4);
}
