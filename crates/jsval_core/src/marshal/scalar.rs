use crate::marshal::{CoercionFault, InvalidAssignmentError, Result, ScalarMut, Value};

/// Coerce a scalar source into a scalar slot; the slot is written only on success.
pub(crate) fn assign_scalar(slot: ScalarMut<'_>, source: &Value, truncate_fractions: bool) -> Result<()> {
	let from = source.kind();
	let to = slot.kind();
	let fault = |fault| InvalidAssignmentError::Coercion { from, to, fault };

	match (slot, source) {
		(ScalarMut::Bool(slot), Value::Bool(value)) => *slot = *value,
		(ScalarMut::String(slot), Value::String(value)) => slot.clone_from(value),
		(ScalarMut::F64(slot), Value::Number(value)) => *slot = *value,
		(ScalarMut::F32(slot), Value::Number(value)) => *slot = narrow_f32(*value).map_err(fault)?,
		(ScalarMut::I8(slot), Value::Number(value)) => *slot = integer(*value, truncate_fractions).map_err(fault)?,
		(ScalarMut::I16(slot), Value::Number(value)) => *slot = integer(*value, truncate_fractions).map_err(fault)?,
		(ScalarMut::I32(slot), Value::Number(value)) => *slot = integer(*value, truncate_fractions).map_err(fault)?,
		(ScalarMut::I64(slot), Value::Number(value)) => *slot = integer(*value, truncate_fractions).map_err(fault)?,
		(ScalarMut::Isize(slot), Value::Number(value)) => *slot = integer(*value, truncate_fractions).map_err(fault)?,
		(ScalarMut::U8(slot), Value::Number(value)) => *slot = integer(*value, truncate_fractions).map_err(fault)?,
		(ScalarMut::U16(slot), Value::Number(value)) => *slot = integer(*value, truncate_fractions).map_err(fault)?,
		(ScalarMut::U32(slot), Value::Number(value)) => *slot = integer(*value, truncate_fractions).map_err(fault)?,
		(ScalarMut::U64(slot), Value::Number(value)) => *slot = integer(*value, truncate_fractions).map_err(fault)?,
		(ScalarMut::Usize(slot), Value::Number(value)) => *slot = integer(*value, truncate_fractions).map_err(fault)?,
		_ => return Err(InvalidAssignmentError::Mismatch { from, to }),
	}

	Ok(())
}

fn integer<T: TryFrom<i128>>(value: f64, truncate_fractions: bool) -> std::result::Result<T, CoercionFault> {
	if !value.is_finite() {
		return Err(CoercionFault::NonFinite { value });
	}
	if !truncate_fractions && value.fract() != 0.0 {
		return Err(CoercionFault::Fractional { value });
	}

	// `as` saturates, so anything past i128 still fails the range check below.
	T::try_from(value.trunc() as i128).map_err(|_| CoercionFault::OutOfRange { value })
}

// Rounding to nearest may land on `f32::MAX`; only overflow to infinity is rejected.
fn narrow_f32(value: f64) -> std::result::Result<f32, CoercionFault> {
	let narrowed = value as f32;
	if value.is_finite() && narrowed.is_infinite() {
		return Err(CoercionFault::OutOfRange { value });
	}
	Ok(narrowed)
}
