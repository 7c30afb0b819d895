use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};

use crate::marshal::{InvalidAssignmentError, Kind, MapKey, Mapping, Outcome, Pointer, Reflect, ReflectMut, ReflectRef, Result, ScalarMut, ScalarRef, Sequence, Value, ValueKind};

macro_rules! impl_scalar {
	($($ty:ty => $variant:ident),* $(,)?) => {
		$(
			impl Reflect for $ty {
				fn reflect_ref(&self) -> ReflectRef<'_> {
					ReflectRef::Scalar(ScalarRef::$variant(*self))
				}

				fn reflect_mut(&mut self) -> ReflectMut<'_> {
					ReflectMut::Scalar(ScalarMut::$variant(self))
				}
			}
		)*
	};
}

impl_scalar!(
	bool => Bool,
	i8 => I8,
	i16 => I16,
	i32 => I32,
	i64 => I64,
	isize => Isize,
	u8 => U8,
	u16 => U16,
	u32 => U32,
	u64 => U64,
	usize => Usize,
	f32 => F32,
	f64 => F64,
);

impl Reflect for String {
	fn reflect_ref(&self) -> ReflectRef<'_> {
		ReflectRef::Scalar(ScalarRef::String(self))
	}

	fn reflect_mut(&mut self) -> ReflectMut<'_> {
		ReflectMut::Scalar(ScalarMut::String(self))
	}
}

impl Reflect for Value {
	fn reflect_ref(&self) -> ReflectRef<'_> {
		ReflectRef::Dynamic(self)
	}

	fn reflect_mut(&mut self) -> ReflectMut<'_> {
		ReflectMut::Dynamic(self)
	}
}

impl<T: Reflect + Clone + Default> Reflect for Option<T> {
	fn reflect_ref(&self) -> ReflectRef<'_> {
		ReflectRef::Pointer(self.pointee())
	}

	fn reflect_mut(&mut self) -> ReflectMut<'_> {
		ReflectMut::Pointer(self)
	}
}

impl<T: Reflect + Clone + Default> Pointer for Option<T> {
	fn pointee(&self) -> Option<&dyn Reflect> {
		self.as_ref().map(|value| value as &dyn Reflect)
	}

	fn pointee_mut(&mut self) -> Option<&mut dyn Reflect> {
		self.as_mut().map(|value| value as &mut dyn Reflect)
	}

	fn pointee_or_alloc(&mut self) -> &mut dyn Reflect {
		if self.is_none() {
			tracing::trace!(pointee = std::any::type_name::<T>(), "allocating nil pointee");
		}
		self.get_or_insert_with(T::default)
	}
}

impl<T: Reflect + Clone> Reflect for Box<T> {
	fn reflect_ref(&self) -> ReflectRef<'_> {
		ReflectRef::Pointer(Some(&**self))
	}

	fn reflect_mut(&mut self) -> ReflectMut<'_> {
		ReflectMut::Pointer(self)
	}
}

impl<T: Reflect + Clone> Pointer for Box<T> {
	fn pointee(&self) -> Option<&dyn Reflect> {
		Some(&**self)
	}

	fn pointee_mut(&mut self) -> Option<&mut dyn Reflect> {
		Some(&mut **self)
	}

	fn pointee_or_alloc(&mut self) -> &mut dyn Reflect {
		&mut **self
	}
}

impl<T: Reflect + Clone + Default> Reflect for Vec<T> {
	fn reflect_ref(&self) -> ReflectRef<'_> {
		ReflectRef::Sequence(self)
	}

	fn reflect_mut(&mut self) -> ReflectMut<'_> {
		ReflectMut::Sequence(self)
	}
}

impl<T: Reflect + Clone + Default> Sequence for Vec<T> {
	fn len(&self) -> usize {
		Vec::len(self)
	}

	fn element(&self, index: usize) -> Option<&dyn Reflect> {
		self.get(index).map(|item| item as &dyn Reflect)
	}

	fn element_mut(&mut self, index: usize) -> Option<&mut dyn Reflect> {
		self.get_mut(index).map(|item| item as &mut dyn Reflect)
	}

	fn reserve(&mut self, additional: usize) {
		Vec::reserve(self, additional);
	}

	fn append_with(&mut self, fill: &mut dyn FnMut(&mut dyn Reflect) -> Result<Outcome>) -> Result<Outcome> {
		let mut item = T::default();
		let outcome = fill(&mut item)?;
		if outcome == Outcome::Assigned {
			self.push(item);
		}
		Ok(outcome)
	}
}

impl<T: Reflect + Clone, const N: usize> Reflect for [T; N] {
	fn reflect_ref(&self) -> ReflectRef<'_> {
		ReflectRef::Sequence(self)
	}

	fn reflect_mut(&mut self) -> ReflectMut<'_> {
		ReflectMut::Sequence(self)
	}
}

impl<T: Reflect + Clone, const N: usize> Sequence for [T; N] {
	fn len(&self) -> usize {
		N
	}

	fn fixed_len(&self) -> Option<usize> {
		Some(N)
	}

	fn element(&self, index: usize) -> Option<&dyn Reflect> {
		self.get(index).map(|item| item as &dyn Reflect)
	}

	fn element_mut(&mut self, index: usize) -> Option<&mut dyn Reflect> {
		self.get_mut(index).map(|item| item as &mut dyn Reflect)
	}

	fn reserve(&mut self, _additional: usize) {}

	// Fixed arrays never grow; the decoder fills them positionally through `element_mut`.
	fn append_with(&mut self, _fill: &mut dyn FnMut(&mut dyn Reflect) -> Result<Outcome>) -> Result<Outcome> {
		Err(InvalidAssignmentError::Mismatch {
			from: ValueKind::Array,
			to: Kind::Array,
		})
	}
}

impl MapKey for String {
	fn as_key(&self) -> &str {
		self
	}

	fn from_key(key: &str) -> Self {
		key.to_owned()
	}
}

impl MapKey for Box<str> {
	fn as_key(&self) -> &str {
		self
	}

	fn from_key(key: &str) -> Self {
		key.into()
	}
}

impl<K, V, S> Reflect for HashMap<K, V, S>
where
	K: MapKey + Eq + Hash + Clone + 'static,
	V: Reflect + Clone + Default,
	S: BuildHasher + Clone + Default + 'static,
{
	fn reflect_ref(&self) -> ReflectRef<'_> {
		ReflectRef::Mapping(self)
	}

	fn reflect_mut(&mut self) -> ReflectMut<'_> {
		ReflectMut::Mapping(self)
	}
}

impl<K, V, S> Mapping for HashMap<K, V, S>
where
	K: MapKey + Eq + Hash + Clone + 'static,
	V: Reflect + Clone + Default,
	S: BuildHasher + Clone + Default + 'static,
{
	fn len(&self) -> usize {
		HashMap::len(self)
	}

	fn for_each_entry(&self, visit: &mut dyn FnMut(&str, &dyn Reflect)) {
		for (key, item) in self {
			visit(key.as_key(), item);
		}
	}

	fn reserve(&mut self, additional: usize) {
		HashMap::reserve(self, additional);
	}

	fn insert_with(&mut self, key: &str, fill: &mut dyn FnMut(&mut dyn Reflect) -> Result<Outcome>) -> Result<Outcome> {
		let mut item = V::default();
		let outcome = fill(&mut item)?;
		if outcome == Outcome::Assigned {
			self.insert(K::from_key(key), item);
		}
		Ok(outcome)
	}
}

impl<K, V> Reflect for BTreeMap<K, V>
where
	K: MapKey + Ord + Clone + 'static,
	V: Reflect + Clone + Default,
{
	fn reflect_ref(&self) -> ReflectRef<'_> {
		ReflectRef::Mapping(self)
	}

	fn reflect_mut(&mut self) -> ReflectMut<'_> {
		ReflectMut::Mapping(self)
	}
}

impl<K, V> Mapping for BTreeMap<K, V>
where
	K: MapKey + Ord + Clone + 'static,
	V: Reflect + Clone + Default,
{
	fn len(&self) -> usize {
		BTreeMap::len(self)
	}

	fn for_each_entry(&self, visit: &mut dyn FnMut(&str, &dyn Reflect)) {
		for (key, item) in self {
			visit(key.as_key(), item);
		}
	}

	fn reserve(&mut self, _additional: usize) {}

	fn insert_with(&mut self, key: &str, fill: &mut dyn FnMut(&mut dyn Reflect) -> Result<Outcome>) -> Result<Outcome> {
		let mut item = V::default();
		let outcome = fill(&mut item)?;
		if outcome == Outcome::Assigned {
			self.insert(K::from_key(key), item);
		}
		Ok(outcome)
	}
}

#[cfg(test)]
mod tests;
