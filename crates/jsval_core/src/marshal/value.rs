use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// String-keyed members of a dynamic object.
pub type Object = BTreeMap<String, Value>;

/// Dynamic value tree exchanged with the scripting host.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
	/// Absent value; also stands in for the host's `undefined`.
	#[default]
	Null,
	/// Boolean leaf.
	Bool(bool),
	/// Numeric leaf; every host number is a double.
	Number(f64),
	/// String leaf.
	String(String),
	/// Ordered list of values.
	Array(Vec<Value>),
	/// String-keyed members; key order carries no meaning.
	Object(Object),
}

/// Tag of a dynamic value, as reported in assignment errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
	/// `Value::Null`.
	Null,
	/// `Value::Bool`.
	Bool,
	/// `Value::Number`.
	Number,
	/// `Value::String`.
	String,
	/// `Value::Array`.
	Array,
	/// `Value::Object`.
	Object,
}

impl Value {
	/// Return the tag of this value.
	pub fn kind(&self) -> ValueKind {
		match self {
			Self::Null => ValueKind::Null,
			Self::Bool(_) => ValueKind::Bool,
			Self::Number(_) => ValueKind::Number,
			Self::String(_) => ValueKind::String,
			Self::Array(_) => ValueKind::Array,
			Self::Object(_) => ValueKind::Object,
		}
	}

	/// Whether this is `Value::Null`.
	pub fn is_null(&self) -> bool {
		matches!(self, Self::Null)
	}

	/// Borrow the boolean payload.
	pub fn as_bool(&self) -> Option<bool> {
		match self {
			Self::Bool(value) => Some(*value),
			_ => None,
		}
	}

	/// Borrow the numeric payload.
	pub fn as_f64(&self) -> Option<f64> {
		match self {
			Self::Number(value) => Some(*value),
			_ => None,
		}
	}

	/// Borrow the string payload.
	pub fn as_str(&self) -> Option<&str> {
		match self {
			Self::String(value) => Some(value),
			_ => None,
		}
	}

	/// Borrow the array elements.
	pub fn as_array(&self) -> Option<&[Value]> {
		match self {
			Self::Array(items) => Some(items),
			_ => None,
		}
	}

	/// Borrow the object members.
	pub fn as_object(&self) -> Option<&Object> {
		match self {
			Self::Object(members) => Some(members),
			_ => None,
		}
	}

	/// Look up an object member; `None` for missing keys and non-objects.
	pub fn get(&self, key: &str) -> Option<&Value> {
		self.as_object().and_then(|members| members.get(key))
	}
}

impl fmt::Display for ValueKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			Self::Null => "null",
			Self::Bool => "bool",
			Self::Number => "number",
			Self::String => "string",
			Self::Array => "array",
			Self::Object => "object",
		};
		f.write_str(name)
	}
}

impl From<bool> for Value {
	fn from(value: bool) -> Self {
		Self::Bool(value)
	}
}

impl From<f64> for Value {
	fn from(value: f64) -> Self {
		Self::Number(value)
	}
}

impl From<&str> for Value {
	fn from(value: &str) -> Self {
		Self::String(value.to_owned())
	}
}

impl From<String> for Value {
	fn from(value: String) -> Self {
		Self::String(value)
	}
}

impl From<Vec<Value>> for Value {
	fn from(items: Vec<Value>) -> Self {
		Self::Array(items)
	}
}

impl From<Object> for Value {
	fn from(members: Object) -> Self {
		Self::Object(members)
	}
}

impl From<serde_json::Value> for Value {
	fn from(value: serde_json::Value) -> Self {
		match value {
			serde_json::Value::Null => Self::Null,
			serde_json::Value::Bool(value) => Self::Bool(value),
			serde_json::Value::Number(number) => Self::Number(number.as_f64().unwrap_or(f64::NAN)),
			serde_json::Value::String(value) => Self::String(value),
			serde_json::Value::Array(items) => Self::Array(items.into_iter().map(Self::from).collect()),
			serde_json::Value::Object(members) => Self::Object(members.into_iter().map(|(key, item)| (key, Self::from(item))).collect()),
		}
	}
}

impl From<Value> for serde_json::Value {
	fn from(value: Value) -> Self {
		match value {
			Value::Null => Self::Null,
			Value::Bool(value) => Self::Bool(value),
			Value::Number(number) => json_number(number),
			Value::String(value) => Self::String(value),
			Value::Array(items) => Self::Array(items.into_iter().map(Self::from).collect()),
			Value::Object(members) => Self::Object(members.into_iter().map(|(key, item)| (key, Self::from(item))).collect()),
		}
	}
}

// Integral doubles render without a fraction, the way the host stringifies them.
// Non-finite numbers have no JSON form and become null.
fn json_number(number: f64) -> serde_json::Value {
	const SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

	if number.fract() == 0.0 && number.abs() <= SAFE_INTEGER {
		return serde_json::Value::from(number as i64);
	}
	serde_json::Number::from_f64(number).map_or(serde_json::Value::Null, serde_json::Value::Number)
}
