use crate::marshal::{FieldDescriptor, Mapping, Object, Record, Reflect, ReflectRef, ScalarRef, Sequence, Value};

/// Encode a typed value into a fresh dynamic value tree.
///
/// Encoding is total: nil pointers, empty unions, and `None` become
/// [`Value::Null`], and every other shape has a dynamic counterpart.
pub fn encode<T: Reflect + ?Sized>(value: &T) -> Value {
	to_dynamic(value.reflect_ref())
}

/// Whether a value counts as empty for `omitempty` fields.
///
/// Strings, sequences, and mappings are empty at length zero, booleans when
/// false, numbers at zero, and pointers or unions when nil. Records and
/// embedded dynamic values are never empty.
pub fn is_empty_value(value: &dyn Reflect) -> bool {
	match value.reflect_ref() {
		ReflectRef::Pointer(pointee) | ReflectRef::Union(pointee) => pointee.is_none(),
		ReflectRef::Sequence(items) => items.is_empty(),
		ReflectRef::Mapping(entries) => entries.is_empty(),
		ReflectRef::Scalar(scalar) => is_zero_scalar(scalar),
		ReflectRef::Record(_) | ReflectRef::Dynamic(_) => false,
	}
}

fn to_dynamic(shape: ReflectRef<'_>) -> Value {
	match shape {
		ReflectRef::Pointer(pointee) | ReflectRef::Union(pointee) => encode_pointer_or_union(pointee),
		ReflectRef::Sequence(items) => encode_sequence(items),
		ReflectRef::Mapping(entries) => encode_mapping(entries),
		ReflectRef::Record(record) => encode_record(record),
		ReflectRef::Scalar(scalar) => encode_scalar(scalar),
		ReflectRef::Dynamic(value) => value.clone(),
	}
}

fn encode_pointer_or_union(pointee: Option<&dyn Reflect>) -> Value {
	match pointee {
		Some(value) => to_dynamic(value.reflect_ref()),
		None => Value::Null,
	}
}

fn encode_sequence(items: &dyn Sequence) -> Value {
	let out = (0..items.len()).filter_map(|index| items.element(index)).map(|item| to_dynamic(item.reflect_ref())).collect();
	Value::Array(out)
}

fn encode_mapping(entries: &dyn Mapping) -> Value {
	let mut out = Object::new();
	entries.for_each_entry(&mut |key, item| {
		out.insert(key.to_owned(), to_dynamic(item.reflect_ref()));
	});
	Value::Object(out)
}

fn encode_record(record: &dyn Record) -> Value {
	let mut out = Object::new();
	record.for_each_field(&mut |field, item| {
		let descriptor = FieldDescriptor::resolve(field);
		if descriptor.omit_empty && is_empty_value(item) {
			return;
		}
		out.insert(descriptor.name.to_owned(), to_dynamic(item.reflect_ref()));
	});
	Value::Object(out)
}

fn encode_scalar(scalar: ScalarRef<'_>) -> Value {
	match scalar {
		ScalarRef::Bool(value) => Value::Bool(value),
		ScalarRef::I8(value) => Value::Number(f64::from(value)),
		ScalarRef::I16(value) => Value::Number(f64::from(value)),
		ScalarRef::I32(value) => Value::Number(f64::from(value)),
		ScalarRef::I64(value) => Value::Number(value as f64),
		ScalarRef::Isize(value) => Value::Number(value as f64),
		ScalarRef::U8(value) => Value::Number(f64::from(value)),
		ScalarRef::U16(value) => Value::Number(f64::from(value)),
		ScalarRef::U32(value) => Value::Number(f64::from(value)),
		ScalarRef::U64(value) => Value::Number(value as f64),
		ScalarRef::Usize(value) => Value::Number(value as f64),
		ScalarRef::F32(value) => Value::Number(f64::from(value)),
		ScalarRef::F64(value) => Value::Number(value),
		ScalarRef::String(value) => Value::String(value.to_owned()),
	}
}

fn is_zero_scalar(scalar: ScalarRef<'_>) -> bool {
	match scalar {
		ScalarRef::Bool(value) => !value,
		ScalarRef::I8(value) => value == 0,
		ScalarRef::I16(value) => value == 0,
		ScalarRef::I32(value) => value == 0,
		ScalarRef::I64(value) => value == 0,
		ScalarRef::Isize(value) => value == 0,
		ScalarRef::U8(value) => value == 0,
		ScalarRef::U16(value) => value == 0,
		ScalarRef::U32(value) => value == 0,
		ScalarRef::U64(value) => value == 0,
		ScalarRef::Usize(value) => value == 0,
		ScalarRef::F32(value) => value == 0.0,
		ScalarRef::F64(value) => value == 0.0,
		ScalarRef::String(value) => value.is_empty(),
	}
}
