/// Implement [`Reflect`](crate::marshal::Reflect) and [`Record`](crate::marshal::Record) for a struct.
///
/// List the fields that should cross the dynamic boundary, in declaration
/// order. A string literal after a field is its naming annotation: `"name"`
/// renames it, `"name,omitempty"` also drops it from encoded objects while it
/// holds an empty value, and `",omitempty"` keeps the declared name. Fields
/// left out of the list are invisible to both pipelines.
///
/// ```
/// use jsval::marshal::Value;
///
/// #[derive(Debug, Clone, Default, PartialEq)]
/// struct Person {
/// 	name: String,
/// 	age: i64,
/// 	cache: Vec<u8>,
/// }
///
/// jsval::reflect_record!(Person { name: "n,omitempty", age });
///
/// let person = Person { name: String::new(), age: 30, cache: vec![1] };
/// let value = jsval::encode(&person);
/// assert_eq!(value.get("age"), Some(&Value::Number(30.0)));
/// assert_eq!(value.get("n"), None);
/// ```
#[macro_export]
macro_rules! reflect_record {
	(@info $field:ident) => {
		$crate::marshal::FieldInfo {
			name: stringify!($field),
			tag: None,
		}
	};
	(@info $field:ident, $tag:literal) => {
		$crate::marshal::FieldInfo {
			name: stringify!($field),
			tag: Some($tag),
		}
	};
	($ty:ty { $($field:ident $(: $tag:literal)?),* $(,)? }) => {
		impl $crate::marshal::Record for $ty {
			#[allow(unused_variables)]
			fn for_each_field(&self, visit: &mut dyn FnMut(&$crate::marshal::FieldInfo, &dyn $crate::marshal::Reflect)) {
				$(
					visit(&$crate::reflect_record!(@info $field $(, $tag)?), &self.$field);
				)*
			}

			#[allow(unused_variables)]
			fn try_for_each_field_mut(
				&mut self,
				visit: &mut dyn FnMut(&$crate::marshal::FieldInfo, &mut dyn $crate::marshal::Reflect) -> $crate::marshal::Result<()>,
			) -> $crate::marshal::Result<()> {
				$(
					visit(&$crate::reflect_record!(@info $field $(, $tag)?), &mut self.$field)?;
				)*
				Ok(())
			}
		}

		impl $crate::marshal::Reflect for $ty {
			fn reflect_ref(&self) -> $crate::marshal::ReflectRef<'_> {
				$crate::marshal::ReflectRef::Record(self)
			}

			fn reflect_mut(&mut self) -> $crate::marshal::ReflectMut<'_> {
				$crate::marshal::ReflectMut::Record(self)
			}
		}
	};
}
