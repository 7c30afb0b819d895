use std::collections::HashMap;

use crate::marshal::{InvalidAssignmentError, Kind, MapKey, Mapping, Outcome, Pointer, Reflect, Sequence, ValueKind};

#[test]
fn fixed_arrays_refuse_to_grow() {
	let mut pair = [1_u8, 2];
	let mut calls = 0;
	let err = pair
		.append_with(&mut |_slot| {
			calls += 1;
			Ok(Outcome::Assigned)
		})
		.expect_err("fixed array should not append");

	assert_eq!(
		err,
		InvalidAssignmentError::Mismatch {
			from: ValueKind::Array,
			to: Kind::Array,
		}
	);
	assert_eq!(calls, 0);
	assert_eq!(pair, [1, 2]);
	assert_eq!(pair.fixed_len(), Some(2));
}

#[test]
fn vec_append_keeps_only_assigned_elements() {
	let mut items = vec![1_i32];
	let outcome = items.append_with(&mut |_slot| Ok(Outcome::Untouched)).expect("untouched append succeeds");
	assert_eq!(outcome, Outcome::Untouched);
	assert_eq!(items, vec![1]);
	assert_eq!(items.fixed_len(), None);
}

#[test]
fn option_allocates_only_when_asked() {
	let mut slot: Option<u32> = None;
	assert!(slot.pointee_mut().is_none());
	let _ = slot.pointee_or_alloc();
	assert_eq!(slot, Some(0));

	let mut boxed = Box::new(7_u32);
	assert_eq!(boxed.pointee_or_alloc().kind(), Kind::U32);
}

#[test]
fn boxed_str_keys_round_trip_through_mappings() {
	let key = <Box<str> as MapKey>::from_key("k");
	assert_eq!(key.as_key(), "k");

	let mut entries: HashMap<Box<str>, bool> = HashMap::new();
	let outcome = entries.insert_with("flag", &mut |_slot| Ok(Outcome::Assigned)).expect("insert succeeds");
	assert_eq!(outcome, Outcome::Assigned);
	assert_eq!(Mapping::len(&entries), 1);
	assert_eq!(entries.get("flag"), Some(&false));
}
