use thiserror::Error;

use crate::marshal::{Kind, ValueKind};

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, InvalidAssignmentError>;

/// Errors produced while assigning a dynamic value into a typed destination.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidAssignmentError {
	/// Destination was not a non-nil pointer.
	#[error("invalid assignment to native: {kind} must be a non-nil pointer")]
	NotAddressable {
		/// Kind of the rejected destination.
		kind: Kind,
	},
	/// Source and destination shapes are incompatible.
	#[error("invalid assignment from dynamic {from} to native {to}")]
	Mismatch {
		/// Offending dynamic value kind.
		from: ValueKind,
		/// Offending destination kind.
		to: Kind,
	},
	/// Scalar kinds matched but the value could not be converted.
	#[error("invalid assignment from dynamic {from} to native {to}: {fault}")]
	Coercion {
		/// Offending dynamic value kind.
		from: ValueKind,
		/// Offending destination kind.
		to: Kind,
		/// Conversion fault that was caught.
		fault: CoercionFault,
	},
	/// Fixed-length array received a different number of elements.
	#[error("invalid assignment from dynamic array of {found} to native array of {expected}")]
	LengthMismatch {
		/// Declared array length.
		expected: usize,
		/// Source element count.
		found: usize,
	},
	/// Decoder nesting exceeded the configured limit.
	#[error("decode depth exceeded (max={max_depth})")]
	DepthExceeded {
		/// Configured depth ceiling.
		max_depth: u32,
	},
}

/// Numeric conversion faults surfaced as assignment errors.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum CoercionFault {
	/// NaN or infinity cannot become an integer.
	#[error("{value} is not finite")]
	NonFinite {
		/// Source number.
		value: f64,
	},
	/// Source had a fractional part and truncation was disabled.
	#[error("{value} has a fractional part")]
	Fractional {
		/// Source number.
		value: f64,
	},
	/// Source does not fit the destination type.
	#[error("{value} is out of range")]
	OutOfRange {
		/// Source number.
		value: f64,
	},
}

impl InvalidAssignmentError {
	/// Destination kind named by this error, when there is one.
	pub fn destination_kind(&self) -> Option<Kind> {
		match self {
			Self::NotAddressable { kind } => Some(*kind),
			Self::Mismatch { to, .. } | Self::Coercion { to, .. } => Some(*to),
			Self::LengthMismatch { .. } => Some(Kind::Array),
			Self::DepthExceeded { .. } => None,
		}
	}
}
