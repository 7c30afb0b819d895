use std::fmt;

/// Runtime kind of a typed destination, as reported in assignment errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
	/// `bool`.
	Bool,
	/// `i8`.
	I8,
	/// `i16`.
	I16,
	/// `i32`.
	I32,
	/// `i64`.
	I64,
	/// `isize`.
	Isize,
	/// `u8`.
	U8,
	/// `u16`.
	U16,
	/// `u32`.
	U32,
	/// `u64`.
	U64,
	/// `usize`.
	Usize,
	/// `f32`.
	F32,
	/// `f64`.
	F64,
	/// Owned string.
	String,
	/// Optional or boxed pointee.
	Pointer,
	/// Type-erased slot.
	Union,
	/// Growable sequence.
	Vec,
	/// Fixed-length array.
	Array,
	/// String-keyed mapping.
	Map,
	/// Struct with reflected fields.
	Record,
	/// Embedded dynamic value.
	Dynamic,
}

impl Kind {
	/// Lowercase display name.
	pub fn name(self) -> &'static str {
		match self {
			Self::Bool => "bool",
			Self::I8 => "i8",
			Self::I16 => "i16",
			Self::I32 => "i32",
			Self::I64 => "i64",
			Self::Isize => "isize",
			Self::U8 => "u8",
			Self::U16 => "u16",
			Self::U32 => "u32",
			Self::U64 => "u64",
			Self::Usize => "usize",
			Self::F32 => "f32",
			Self::F64 => "f64",
			Self::String => "string",
			Self::Pointer => "pointer",
			Self::Union => "union",
			Self::Vec => "vec",
			Self::Array => "array",
			Self::Map => "map",
			Self::Record => "record",
			Self::Dynamic => "dynamic",
		}
	}
}

impl fmt::Display for Kind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}
