use crate::marshal::FieldInfo;

const OMIT_EMPTY: &str = "omitempty";

/// Resolved external naming for one record field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor<'a> {
	/// Object member name used on the dynamic side.
	pub name: &'a str,
	/// Whether an empty value may be left out of encoded objects.
	pub omit_empty: bool,
}

impl FieldDescriptor<'static> {
	/// Resolve the descriptor for a reflected field.
	pub fn resolve(field: &FieldInfo) -> Self {
		match field.tag {
			Some(tag) => parse_field_tag(field.name, tag),
			None => Self {
				name: field.name,
				omit_empty: false,
			},
		}
	}
}

/// Parse a `name[,option]` annotation; an empty name falls back to `declared`.
pub(crate) fn parse_field_tag<'a>(declared: &'a str, tag: &'a str) -> FieldDescriptor<'a> {
	if tag.is_empty() {
		return FieldDescriptor {
			name: declared,
			omit_empty: false,
		};
	}

	let mut tokens = tag.split(',');
	let name = tokens.next().filter(|name| !name.is_empty()).unwrap_or(declared);
	let omit_empty = tokens.next() == Some(OMIT_EMPTY);

	FieldDescriptor { name, omit_empty }
}
