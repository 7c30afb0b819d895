use std::any::Any;

use crate::marshal::{Kind, Result, Union, Value};

/// Runtime view over a typed value, classified into a closed set of shapes.
///
/// Both pipelines dispatch only on [`ReflectRef`] / [`ReflectMut`], so a type
/// becomes encodable and decodable by describing its shape. Std containers and
/// scalars are covered by this crate; structs opt in with [`reflect_record!`].
///
/// [`reflect_record!`]: crate::reflect_record
pub trait Reflect: ReflectBase + 'static {
	/// Read-only shape view.
	fn reflect_ref(&self) -> ReflectRef<'_>;

	/// Mutable shape view used by the decoder.
	fn reflect_mut(&mut self) -> ReflectMut<'_>;

	/// Runtime kind of this value.
	fn kind(&self) -> Kind {
		self.reflect_ref().kind()
	}
}

/// Object-safe cloning and downcasting support shared by every [`Reflect`] type.
///
/// Implemented automatically for all `Reflect + Clone` types.
pub trait ReflectBase {
	/// Clone into a fresh boxed value.
	fn clone_reflect(&self) -> Box<dyn Reflect>;
	/// Overwrite `self` with a snapshot taken by [`ReflectBase::clone_reflect`].
	fn restore(&mut self, snapshot: Box<dyn Reflect>);
	/// Convert into `Any` for downcasting by value.
	fn into_any(self: Box<Self>) -> Box<dyn Any>;
	/// Borrow as `Any` for downcasting by reference.
	fn as_any(&self) -> &dyn Any;
	/// Borrow as mutable `Any`.
	fn as_any_mut(&mut self) -> &mut dyn Any;
	/// Rust type name of the concrete value.
	fn type_name(&self) -> &'static str;
}

impl<T: Reflect + Clone> ReflectBase for T {
	fn clone_reflect(&self) -> Box<dyn Reflect> {
		Box::new(self.clone())
	}

	fn restore(&mut self, snapshot: Box<dyn Reflect>) {
		if let Ok(value) = snapshot.into_any().downcast::<T>() {
			*self = *value;
		}
	}

	fn into_any(self: Box<Self>) -> Box<dyn Any> {
		self
	}

	fn as_any(&self) -> &dyn Any {
		self
	}

	fn as_any_mut(&mut self) -> &mut dyn Any {
		self
	}

	fn type_name(&self) -> &'static str {
		std::any::type_name::<T>()
	}
}

impl Clone for Box<dyn Reflect> {
	fn clone(&self) -> Self {
		(**self).clone_reflect()
	}
}

/// Read-only shape of a typed value.
pub enum ReflectRef<'a> {
	/// Optional or boxed value; `None` when nil.
	Pointer(Option<&'a dyn Reflect>),
	/// Type-erased slot; `None` when empty.
	Union(Option<&'a dyn Reflect>),
	/// Ordered elements.
	Sequence(&'a dyn Sequence),
	/// String-keyed entries.
	Mapping(&'a dyn Mapping),
	/// Named fields.
	Record(&'a dyn Record),
	/// Leaf value.
	Scalar(ScalarRef<'a>),
	/// Embedded dynamic value, passed through untouched.
	Dynamic(&'a Value),
}

/// Mutable shape of a typed destination.
pub enum ReflectMut<'a> {
	/// Optional or boxed destination.
	Pointer(&'a mut dyn Pointer),
	/// Type-erased slot.
	Union(&'a mut Union),
	/// Ordered elements.
	Sequence(&'a mut dyn Sequence),
	/// String-keyed entries.
	Mapping(&'a mut dyn Mapping),
	/// Named fields.
	Record(&'a mut dyn Record),
	/// Leaf slot.
	Scalar(ScalarMut<'a>),
	/// Embedded dynamic value.
	Dynamic(&'a mut Value),
}

impl ReflectRef<'_> {
	/// Runtime kind of the viewed value.
	pub fn kind(&self) -> Kind {
		match self {
			Self::Pointer(_) => Kind::Pointer,
			Self::Union(_) => Kind::Union,
			Self::Sequence(items) => sequence_kind(items.fixed_len()),
			Self::Mapping(_) => Kind::Map,
			Self::Record(_) => Kind::Record,
			Self::Scalar(scalar) => scalar.kind(),
			Self::Dynamic(_) => Kind::Dynamic,
		}
	}
}

impl ReflectMut<'_> {
	/// Runtime kind of the viewed destination.
	pub fn kind(&self) -> Kind {
		match self {
			Self::Pointer(_) => Kind::Pointer,
			Self::Union(_) => Kind::Union,
			Self::Sequence(items) => sequence_kind(items.fixed_len()),
			Self::Mapping(_) => Kind::Map,
			Self::Record(_) => Kind::Record,
			Self::Scalar(scalar) => scalar.kind(),
			Self::Dynamic(_) => Kind::Dynamic,
		}
	}
}

fn sequence_kind(fixed_len: Option<usize>) -> Kind {
	if fixed_len.is_some() { Kind::Array } else { Kind::Vec }
}

/// Scalar leaf read by value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScalarRef<'a> {
	/// `bool`.
	Bool(bool),
	/// `i8`.
	I8(i8),
	/// `i16`.
	I16(i16),
	/// `i32`.
	I32(i32),
	/// `i64`.
	I64(i64),
	/// `isize`.
	Isize(isize),
	/// `u8`.
	U8(u8),
	/// `u16`.
	U16(u16),
	/// `u32`.
	U32(u32),
	/// `u64`.
	U64(u64),
	/// `usize`.
	Usize(usize),
	/// `f32`.
	F32(f32),
	/// `f64`.
	F64(f64),
	/// Borrowed string.
	String(&'a str),
}

/// Scalar leaf slot written by the decoder.
#[derive(Debug)]
pub enum ScalarMut<'a> {
	/// `bool`.
	Bool(&'a mut bool),
	/// `i8`.
	I8(&'a mut i8),
	/// `i16`.
	I16(&'a mut i16),
	/// `i32`.
	I32(&'a mut i32),
	/// `i64`.
	I64(&'a mut i64),
	/// `isize`.
	Isize(&'a mut isize),
	/// `u8`.
	U8(&'a mut u8),
	/// `u16`.
	U16(&'a mut u16),
	/// `u32`.
	U32(&'a mut u32),
	/// `u64`.
	U64(&'a mut u64),
	/// `usize`.
	Usize(&'a mut usize),
	/// `f32`.
	F32(&'a mut f32),
	/// `f64`.
	F64(&'a mut f64),
	/// Owned string.
	String(&'a mut String),
}

impl ScalarRef<'_> {
	/// Runtime kind of this scalar.
	pub fn kind(&self) -> Kind {
		match self {
			Self::Bool(_) => Kind::Bool,
			Self::I8(_) => Kind::I8,
			Self::I16(_) => Kind::I16,
			Self::I32(_) => Kind::I32,
			Self::I64(_) => Kind::I64,
			Self::Isize(_) => Kind::Isize,
			Self::U8(_) => Kind::U8,
			Self::U16(_) => Kind::U16,
			Self::U32(_) => Kind::U32,
			Self::U64(_) => Kind::U64,
			Self::Usize(_) => Kind::Usize,
			Self::F32(_) => Kind::F32,
			Self::F64(_) => Kind::F64,
			Self::String(_) => Kind::String,
		}
	}
}

impl ScalarMut<'_> {
	/// Runtime kind of this slot.
	pub fn kind(&self) -> Kind {
		match self {
			Self::Bool(_) => Kind::Bool,
			Self::I8(_) => Kind::I8,
			Self::I16(_) => Kind::I16,
			Self::I32(_) => Kind::I32,
			Self::I64(_) => Kind::I64,
			Self::Isize(_) => Kind::Isize,
			Self::U8(_) => Kind::U8,
			Self::U16(_) => Kind::U16,
			Self::U32(_) => Kind::U32,
			Self::U64(_) => Kind::U64,
			Self::Usize(_) => Kind::Usize,
			Self::F32(_) => Kind::F32,
			Self::F64(_) => Kind::F64,
			Self::String(_) => Kind::String,
		}
	}
}

/// Whether a decode step wrote into its destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum Outcome {
	/// A value was produced and stored.
	Assigned,
	/// Source was null; the destination was left as it was.
	Untouched,
}

/// Optional or boxed indirection.
pub trait Pointer {
	/// Referenced value, or `None` when nil.
	fn pointee(&self) -> Option<&dyn Reflect>;
	/// Mutable referenced value, or `None` when nil.
	fn pointee_mut(&mut self) -> Option<&mut dyn Reflect>;
	/// Referenced value, allocating a zero value first when nil.
	fn pointee_or_alloc(&mut self) -> &mut dyn Reflect;
}

/// Ordered element container.
pub trait Sequence {
	/// Current element count.
	fn len(&self) -> usize;
	/// Whether the container holds no elements.
	fn is_empty(&self) -> bool {
		self.len() == 0
	}
	/// Declared length for fixed-size arrays, `None` for growable sequences.
	fn fixed_len(&self) -> Option<usize> {
		None
	}
	/// Element at `index`.
	fn element(&self, index: usize) -> Option<&dyn Reflect>;
	/// Mutable element at `index`.
	fn element_mut(&mut self, index: usize) -> Option<&mut dyn Reflect>;
	/// Capacity hint ahead of appends.
	fn reserve(&mut self, additional: usize);
	/// Run `fill` on a fresh zero element and append it when a value was assigned.
	fn append_with(&mut self, fill: &mut dyn FnMut(&mut dyn Reflect) -> Result<Outcome>) -> Result<Outcome>;
}

/// String-keyed entry container.
pub trait Mapping {
	/// Current entry count.
	fn len(&self) -> usize;
	/// Whether the container holds no entries.
	fn is_empty(&self) -> bool {
		self.len() == 0
	}
	/// Visit every entry; order is unspecified.
	fn for_each_entry(&self, visit: &mut dyn FnMut(&str, &dyn Reflect));
	/// Capacity hint ahead of inserts.
	fn reserve(&mut self, additional: usize);
	/// Run `fill` on a fresh zero value and store it under `key` when a value was assigned.
	fn insert_with(&mut self, key: &str, fill: &mut dyn FnMut(&mut dyn Reflect) -> Result<Outcome>) -> Result<Outcome>;
}

/// Struct with reflected fields, visited in declaration order.
pub trait Record {
	/// Visit every reflected field.
	fn for_each_field(&self, visit: &mut dyn FnMut(&FieldInfo, &dyn Reflect));
	/// Visit every reflected field mutably, stopping at the first error.
	fn try_for_each_field_mut(&mut self, visit: &mut dyn FnMut(&FieldInfo, &mut dyn Reflect) -> Result<()>) -> Result<()>;
}

/// Declaration of one reflected record field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldInfo {
	/// Declared Rust field name.
	pub name: &'static str,
	/// Raw naming annotation (`name` or `name,omitempty`), if any.
	pub tag: Option<&'static str>,
}

/// Mapping key types; keys always cross the boundary as strings.
pub trait MapKey: Sized {
	/// Borrow the key text.
	fn as_key(&self) -> &str;
	/// Build a key from object member text.
	fn from_key(key: &str) -> Self;
}
