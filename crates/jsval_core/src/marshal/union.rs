use std::fmt;

use crate::marshal::{Reflect, ReflectMut, ReflectRef};

/// Slot holding a value whose concrete type is only known at runtime.
///
/// An empty union encodes as null. Decoding into a populated union keeps the
/// held value's concrete type; decoding a scalar into an empty union stores it
/// as `bool`, `f64`, or `String`.
#[derive(Clone, Default)]
pub struct Union(Option<Box<dyn Reflect>>);

impl Union {
	/// Empty slot.
	pub fn empty() -> Self {
		Self(None)
	}

	/// Slot holding `value`.
	pub fn new<T: Reflect>(value: T) -> Self {
		Self(Some(Box::new(value)))
	}

	/// Whether no value is held.
	pub fn is_nil(&self) -> bool {
		self.0.is_none()
	}

	/// Borrow the held value.
	pub fn get(&self) -> Option<&dyn Reflect> {
		self.0.as_deref()
	}

	/// Mutably borrow the held value.
	pub fn get_mut(&mut self) -> Option<&mut dyn Reflect> {
		self.0.as_mut().map(|value| value.as_mut() as &mut dyn Reflect)
	}

	/// Replace the held value.
	pub fn set<T: Reflect>(&mut self, value: T) {
		self.0 = Some(Box::new(value));
	}

	/// Take the held value, leaving the slot empty.
	pub fn take(&mut self) -> Option<Box<dyn Reflect>> {
		self.0.take()
	}

	/// Borrow the held value as `T`.
	pub fn downcast_ref<T: Reflect>(&self) -> Option<&T> {
		self.get().and_then(|value| value.as_any().downcast_ref::<T>())
	}

	/// Mutably borrow the held value as `T`.
	pub fn downcast_mut<T: Reflect>(&mut self) -> Option<&mut T> {
		self.get_mut().and_then(|value| value.as_any_mut().downcast_mut::<T>())
	}
}

impl fmt::Debug for Union {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self.get() {
			Some(value) => f.debug_tuple("Union").field(&value.type_name()).finish(),
			None => f.write_str("Union(nil)"),
		}
	}
}

impl PartialEq for Union {
	fn eq(&self, other: &Self) -> bool {
		match (self.get(), other.get()) {
			(None, None) => true,
			(Some(left), Some(right)) => left.type_name() == right.type_name() && crate::marshal::encode(left) == crate::marshal::encode(right),
			_ => false,
		}
	}
}

impl Reflect for Union {
	fn reflect_ref(&self) -> ReflectRef<'_> {
		ReflectRef::Union(self.get())
	}

	fn reflect_mut(&mut self) -> ReflectMut<'_> {
		ReflectMut::Union(self)
	}
}
