use crate::marshal::scalar::assign_scalar;
use crate::marshal::{
	FieldDescriptor, InvalidAssignmentError, Kind, Mapping, Object, Outcome, Pointer, Record, Reflect, ReflectMut, Result, Sequence, Union, Value,
};

/// Runtime limits and behavior switches for decoding.
#[derive(Debug, Clone)]
pub struct DecodeOptions {
	/// Maximum nesting depth of the source tree; only object members and array
	/// elements count as a level.
	pub max_depth: u32,
	/// Truncate fractional numbers toward zero when the destination is an integer.
	pub truncate_fractions: bool,
}

impl Default for DecodeOptions {
	fn default() -> Self {
		Self {
			max_depth: 64,
			truncate_fractions: true,
		}
	}
}

impl DecodeOptions {
	/// Preset that rejects lossy number conversions into integers.
	pub fn strict() -> Self {
		Self {
			truncate_fractions: false,
			..Self::default()
		}
	}
}

/// Decode through a type-erased destination pointer.
///
/// `destination` must reflect as a non-nil pointer (a `Box<T>` or a populated
/// `Option<T>`); anything else fails with
/// [`InvalidAssignmentError::NotAddressable`] before any traversal. The pointee
/// is restored to its prior state when decoding fails.
pub fn decode(source: &Value, destination: &mut dyn Reflect) -> Result<()> {
	decode_with(source, destination, &DecodeOptions::default())
}

/// [`decode`] with explicit options.
pub fn decode_with(source: &Value, destination: &mut dyn Reflect, options: &DecodeOptions) -> Result<()> {
	let kind = destination.kind();
	let ReflectMut::Pointer(pointer) = destination.reflect_mut() else {
		return Err(not_addressable(kind));
	};
	let Some(target) = pointer.pointee_mut() else {
		return Err(not_addressable(kind));
	};
	run(source, target, options)
}

/// Decode into a typed destination; `&mut T` is always a valid target.
///
/// On failure `destination` is left exactly as it was before the call.
pub fn decode_into<T: Reflect>(source: &Value, destination: &mut T) -> Result<()> {
	decode_into_with(source, destination, &DecodeOptions::default())
}

/// [`decode_into`] with explicit options.
pub fn decode_into_with<T: Reflect>(source: &Value, destination: &mut T, options: &DecodeOptions) -> Result<()> {
	run(source, destination, options)
}

fn not_addressable(kind: Kind) -> InvalidAssignmentError {
	tracing::debug!(%kind, "decode destination is not a non-nil pointer");
	InvalidAssignmentError::NotAddressable { kind }
}

fn run(source: &Value, target: &mut dyn Reflect, options: &DecodeOptions) -> Result<()> {
	let snapshot = target.clone_reflect();
	let decoder = Decoder { options };

	match decoder.to_native(target, source, 0) {
		Ok(_) => Ok(()),
		Err(err) => {
			tracing::debug!(error = %err, destination = target.type_name(), "decode rejected; destination restored");
			target.restore(snapshot);
			Err(err)
		}
	}
}

struct Decoder<'a> {
	options: &'a DecodeOptions,
}

impl Decoder<'_> {
	fn to_native(&self, target: &mut dyn Reflect, source: &Value, depth: u32) -> Result<Outcome> {
		if source.is_null() {
			return Ok(Outcome::Untouched);
		}
		if depth >= self.options.max_depth {
			return Err(InvalidAssignmentError::DepthExceeded {
				max_depth: self.options.max_depth,
			});
		}

		let to = target.kind();
		match (target.reflect_mut(), source) {
			(ReflectMut::Pointer(pointer), _) => self.decode_pointer(pointer, source, depth),
			(ReflectMut::Union(union), _) if !union.is_nil() => self.decode_union(union, source, depth),
			(ReflectMut::Dynamic(slot), _) => {
				slot.clone_from(source);
				Ok(Outcome::Assigned)
			}
			(shape, Value::Bool(_) | Value::Number(_) | Value::String(_)) => self.decode_scalar(shape, source),
			(ReflectMut::Record(record), Value::Object(members)) => self.decode_record(record, members, depth),
			(ReflectMut::Mapping(entries), Value::Object(members)) => self.decode_mapping(entries, members, depth),
			(ReflectMut::Sequence(items), Value::Array(elements)) => self.decode_sequence(items, elements, depth),
			(_, source) => Err(InvalidAssignmentError::Mismatch { from: source.kind(), to }),
		}
	}

	fn decode_pointer(&self, pointer: &mut dyn Pointer, source: &Value, depth: u32) -> Result<Outcome> {
		let pointee = pointer.pointee_or_alloc();
		let _ = self.to_native(pointee, source, depth)?;
		Ok(Outcome::Assigned)
	}

	fn decode_union(&self, union: &mut Union, source: &Value, depth: u32) -> Result<Outcome> {
		match union.get_mut() {
			Some(held) => self.to_native(held, source, depth),
			None => Ok(Outcome::Untouched),
		}
	}

	fn decode_scalar(&self, shape: ReflectMut<'_>, source: &Value) -> Result<Outcome> {
		match (shape, source) {
			(ReflectMut::Scalar(slot), _) => assign_scalar(slot, source, self.options.truncate_fractions)?,
			(ReflectMut::Union(union), Value::Bool(value)) => union.set(*value),
			(ReflectMut::Union(union), Value::Number(value)) => union.set(*value),
			(ReflectMut::Union(union), Value::String(value)) => union.set(value.clone()),
			(shape, source) => {
				return Err(InvalidAssignmentError::Mismatch {
					from: source.kind(),
					to: shape.kind(),
				});
			}
		}
		Ok(Outcome::Assigned)
	}

	fn decode_record(&self, record: &mut dyn Record, members: &Object, depth: u32) -> Result<Outcome> {
		record.try_for_each_field_mut(&mut |field, slot| {
			let descriptor = FieldDescriptor::resolve(field);
			let Some(item) = members.get(descriptor.name) else {
				tracing::trace!(field = descriptor.name, "record member absent; field left untouched");
				return Ok(());
			};
			let _ = self.to_native(slot, item, depth + 1)?;
			Ok(())
		})?;
		Ok(Outcome::Assigned)
	}

	fn decode_mapping(&self, entries: &mut dyn Mapping, members: &Object, depth: u32) -> Result<Outcome> {
		entries.reserve(members.len());
		for (key, item) in members {
			let _ = entries.insert_with(key, &mut |slot| self.to_native(slot, item, depth + 1))?;
		}
		Ok(Outcome::Assigned)
	}

	fn decode_sequence(&self, items: &mut dyn Sequence, elements: &[Value], depth: u32) -> Result<Outcome> {
		if let Some(expected) = items.fixed_len() {
			if expected != elements.len() {
				return Err(InvalidAssignmentError::LengthMismatch {
					expected,
					found: elements.len(),
				});
			}
			for (index, element) in elements.iter().enumerate() {
				if let Some(slot) = items.element_mut(index) {
					let _ = self.to_native(slot, element, depth + 1)?;
				}
			}
			return Ok(Outcome::Assigned);
		}

		items.reserve(elements.len());
		for element in elements {
			let _ = items.append_with(&mut |slot| self.to_native(slot, element, depth + 1))?;
		}
		Ok(Outcome::Assigned)
	}
}

#[cfg(test)]
mod tests;
