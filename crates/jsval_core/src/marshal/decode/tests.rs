use std::collections::{BTreeMap, HashMap};

use serde_json::json;

use crate::marshal::{CoercionFault, DecodeOptions, InvalidAssignmentError, Kind, Union, Value, ValueKind, decode, decode_into, decode_into_with};

#[derive(Debug, Clone, Default, PartialEq)]
struct Person {
	name: String,
	age: i64,
}

crate::reflect_record!(Person { name: "n,omitempty", age });

#[derive(Debug, Clone, Default, PartialEq)]
struct Team {
	lead: Option<Person>,
	members: Vec<Person>,
	ranks: HashMap<String, u8>,
	slot: Union,
	meta: Value,
}

crate::reflect_record!(Team {
	lead,
	members,
	ranks,
	slot,
	meta
});

#[derive(Debug, Clone, Default, PartialEq)]
struct Node {
	id: i32,
	next: Option<Box<Node>>,
}

crate::reflect_record!(Node { id, next });

#[derive(Debug, Clone, Default, PartialEq)]
struct Settings {
	limits: Option<HashMap<String, u32>>,
}

crate::reflect_record!(Settings { limits });

fn chain(len: i32) -> Node {
	let mut next = None;
	for id in (0..len).rev() {
		next = Some(Box::new(Node { id, next }));
	}
	next.map(|head| *head).unwrap_or_default()
}

fn value(json: serde_json::Value) -> Value {
	Value::from(json)
}

fn ada() -> Person {
	Person {
		name: "ada".to_owned(),
		age: 36,
	}
}

#[test]
fn decodes_record_by_annotated_names() {
	let mut person = Person::default();
	decode_into(&value(json!({"n": "ada", "age": 36})), &mut person).expect("decode succeeds");
	assert_eq!(person, ada());
}

#[test]
fn null_source_is_a_no_op() {
	let mut person = ada();
	decode_into(&Value::Null, &mut person).expect("null decodes");
	assert_eq!(person, ada());

	let mut lead: Option<Person> = None;
	decode_into(&Value::Null, &mut lead).expect("null decodes into nil pointer");
	assert_eq!(lead, None);
}

#[test]
fn missing_and_null_members_leave_fields_untouched() {
	let mut person = ada();
	decode_into(&value(json!({"age": 40})), &mut person).expect("partial decode");
	assert_eq!(person.name, "ada");
	assert_eq!(person.age, 40);

	decode_into(&value(json!({"n": null, "age": null})), &mut person).expect("null members decode");
	assert_eq!(person.name, "ada");
	assert_eq!(person.age, 40);
}

#[test]
fn type_mismatch_leaves_destination_unchanged() {
	let mut person = ada();
	let err = decode_into(&value(json!({"n": "grace", "age": "old"})), &mut person).expect_err("string into int should fail");

	assert_eq!(
		err,
		InvalidAssignmentError::Mismatch {
			from: ValueKind::String,
			to: Kind::I64,
		}
	);
	assert_eq!(person, ada());
	assert_eq!(err.to_string(), "invalid assignment from dynamic string to native i64");
}

#[test]
fn nested_failure_rolls_back_every_earlier_write() {
	let mut team = Team::default();
	team.members.push(ada());

	let source = value(json!({
		"lead": {"n": "grace"},
		"members": [{"n": "linus", "age": 1}, {"age": 1.0e30}],
		"ranks": {"x": 1},
	}));
	let err = decode_into(&source, &mut team).expect_err("age overflow should fail");

	assert!(matches!(
		err,
		InvalidAssignmentError::Coercion {
			to: Kind::I64,
			fault: CoercionFault::OutOfRange { .. },
			..
		}
	));
	assert_eq!(team.lead, None);
	assert_eq!(team.members, vec![ada()]);
	assert!(team.ranks.is_empty());
}

#[test]
fn nil_pointer_is_allocated_before_assignment() {
	let mut team = Team::default();
	decode_into(&value(json!({"lead": {"age": 5}})), &mut team).expect("decode succeeds");
	assert_eq!(team.lead, Some(Person { name: String::new(), age: 5 }));
}

#[test]
fn populated_pointer_is_decoded_in_place() {
	let mut team = Team {
		lead: Some(ada()),
		..Team::default()
	};
	decode_into(&value(json!({"lead": {"age": 37}})), &mut team).expect("decode succeeds");
	assert_eq!(team.lead, Some(Person { name: "ada".to_owned(), age: 37 }));
}

#[test]
fn sequences_append_decoded_elements_and_skip_nulls() {
	let mut numbers = vec![1_i32];
	decode_into(&value(json!([2, null, 3])), &mut numbers).expect("decode succeeds");
	assert_eq!(numbers, vec![1, 2, 3]);

	let mut maybe: Option<Vec<String>> = None;
	decode_into(&value(json!([])), &mut maybe).expect("empty array decodes");
	assert_eq!(maybe, Some(Vec::new()));
}

#[test]
fn nil_mapping_stays_nil_until_an_object_arrives() {
	let mut settings = Settings::default();
	decode_into(&value(json!({"limits": null})), &mut settings).expect("null member decodes");
	assert_eq!(settings.limits, None);

	decode_into(&Value::Null, &mut settings).expect("null decodes");
	assert_eq!(settings.limits, None);

	decode_into(&value(json!({"limits": {}})), &mut settings).expect("empty object decodes");
	assert_eq!(settings.limits, Some(HashMap::new()));
}

#[test]
fn mappings_skip_null_members() {
	let mut ranks: HashMap<String, Option<u8>> = HashMap::new();
	decode_into(&value(json!({"a": 1, "b": null})), &mut ranks).expect("decode succeeds");
	assert_eq!(ranks.len(), 1);
	assert_eq!(ranks.get("a"), Some(&Some(1)));

	let mut ordered: BTreeMap<Box<str>, Person> = BTreeMap::new();
	decode_into(&value(json!({"x": {"n": "ada", "age": 36}})), &mut ordered).expect("decode succeeds");
	assert_eq!(ordered.get("x"), Some(&ada()));
}

#[test]
fn object_into_sequence_is_a_mismatch() {
	let mut numbers: Vec<i32> = Vec::new();
	let err = decode_into(&value(json!({"a": 1})), &mut numbers).expect_err("object into vec should fail");
	assert_eq!(
		err,
		InvalidAssignmentError::Mismatch {
			from: ValueKind::Object,
			to: Kind::Vec,
		}
	);
}

#[test]
fn fixed_arrays_require_exact_length() {
	let mut triple = [0_u8; 3];
	decode_into(&value(json!([1, 2, 3])), &mut triple).expect("exact length decodes");
	assert_eq!(triple, [1, 2, 3]);

	let err = decode_into(&value(json!([9, 9])), &mut triple).expect_err("short array should fail");
	assert_eq!(err, InvalidAssignmentError::LengthMismatch { expected: 3, found: 2 });
	assert_eq!(triple, [1, 2, 3]);
}

#[test]
fn populated_union_keeps_its_concrete_type() {
	let mut slot = Union::new(0_i32);
	decode_into(&Value::Number(4.0), &mut slot).expect("decode succeeds");
	assert_eq!(slot.downcast_ref::<i32>(), Some(&4));

	let mut slot = Union::new(ada());
	decode_into(&value(json!({"age": 99})), &mut slot).expect("decode succeeds");
	assert_eq!(slot.downcast_ref::<Person>().map(|person| person.age), Some(99));
}

#[test]
fn empty_union_captures_scalars_only() {
	let mut team = Team::default();
	decode_into(&value(json!({"slot": 2.5})), &mut team).expect("number decodes");
	assert_eq!(team.slot.downcast_ref::<f64>(), Some(&2.5));

	let mut slot = Union::empty();
	decode_into(&Value::from("word"), &mut slot).expect("string decodes");
	assert_eq!(slot.downcast_ref::<String>().map(String::as_str), Some("word"));

	let mut slot = Union::empty();
	let err = decode_into(&value(json!({"a": 1})), &mut slot).expect_err("object into empty union should fail");
	assert_eq!(
		err,
		InvalidAssignmentError::Mismatch {
			from: ValueKind::Object,
			to: Kind::Union,
		}
	);
	assert!(slot.is_nil());
}

#[test]
fn dynamic_fields_take_the_source_verbatim() {
	let mut team = Team::default();
	let meta = json!({"anything": [1, "two", {"three": null}]});
	decode_into(&value(json!({"meta": meta.clone()})), &mut team).expect("decode succeeds");
	assert_eq!(team.meta, value(meta));
}

#[test]
fn erased_entry_point_requires_non_nil_pointer() {
	let source = value(json!({"age": 3}));

	let mut bare = 5_i32;
	let err = decode(&source, &mut bare).expect_err("non-pointer should fail");
	assert_eq!(err, InvalidAssignmentError::NotAddressable { kind: Kind::I32 });
	assert_eq!(err.to_string(), "invalid assignment to native: i32 must be a non-nil pointer");

	let mut nil: Option<Person> = None;
	let err = decode(&source, &mut nil).expect_err("nil pointer should fail");
	assert_eq!(err, InvalidAssignmentError::NotAddressable { kind: Kind::Pointer });
	assert_eq!(nil, None);

	let mut nil_box: Option<Box<Person>> = None;
	let err = decode(&source, &mut nil_box).expect_err("nil boxed pointer should fail");
	assert_eq!(err, InvalidAssignmentError::NotAddressable { kind: Kind::Pointer });
	assert!(nil_box.is_none());

	let mut boxed = Box::new(ada());
	decode(&source, &mut boxed).expect("boxed destination decodes");
	assert_eq!(boxed.age, 3);

	let mut present = Some(ada());
	decode(&source, &mut present).expect("populated option decodes");
	assert_eq!(present.map(|person| person.age), Some(3));
}

#[test]
fn erased_entry_point_restores_pointee_on_failure() {
	let mut boxed = Box::new(ada());
	let err = decode(&value(json!({"n": "x", "age": true})), &mut boxed).expect_err("bool into int should fail");
	assert!(matches!(err, InvalidAssignmentError::Mismatch { from: ValueKind::Bool, .. }));
	assert_eq!(*boxed, ada());
}

#[test]
fn depth_limit_is_enforced() {
	let options = DecodeOptions {
		max_depth: 3,
		..DecodeOptions::default()
	};

	let mut shallow: Vec<Vec<i32>> = Vec::new();
	decode_into_with(&value(json!([[1]])), &mut shallow, &options).expect("depth three decodes");
	assert_eq!(shallow, vec![vec![1]]);

	let mut deep: Vec<Vec<Vec<i32>>> = Vec::new();
	let err = decode_into_with(&value(json!([[[1]]])), &mut deep, &options).expect_err("depth four should fail");
	assert_eq!(err, InvalidAssignmentError::DepthExceeded { max_depth: 3 });
	assert!(deep.is_empty());
}

#[test]
fn pointer_and_union_hops_do_not_count_toward_depth() {
	let list = chain(40);
	let mut decoded = Node::default();
	decode_into(&crate::marshal::encode(&list), &mut decoded).expect("40-node chain decodes with default options");
	assert_eq!(decoded, list);

	let options = DecodeOptions {
		max_depth: 1,
		..DecodeOptions::default()
	};
	let mut wrapped: Option<Box<Union>> = Some(Box::new(Union::new(Some(0_u16))));
	decode_into_with(&Value::Number(9.0), &mut wrapped, &options).expect("scalar behind pointers and a union sits at depth zero");
	let held = wrapped.as_ref().and_then(|slot| slot.downcast_ref::<Option<u16>>());
	assert_eq!(held, Some(&Some(9)));
}

#[test]
fn strict_options_reject_fractions() {
	let mut person = ada();
	let err = decode_into_with(&value(json!({"age": 36.6})), &mut person, &DecodeOptions::strict()).expect_err("fraction should fail");
	assert!(matches!(err, InvalidAssignmentError::Coercion { fault: CoercionFault::Fractional { .. }, .. }));
	assert_eq!(person, ada());

	decode_into(&value(json!({"age": 36.6})), &mut person).expect("default options truncate");
	assert_eq!(person.age, 36);
}

#[test]
fn omitted_empty_name_round_trips_to_zero_value() {
	let person = Person {
		name: String::new(),
		age: 30,
	};
	let encoded = crate::marshal::encode(&person);
	assert_eq!(serde_json::Value::from(encoded.clone()), json!({"age": 30}));

	let mut decoded = Person::default();
	decode_into(&encoded, &mut decoded).expect("decode succeeds");
	assert_eq!(decoded, person);
}
