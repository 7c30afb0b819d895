mod decode;
mod encode;
mod error;
mod field;
mod impls;
mod kind;
mod record;
mod reflect;
mod scalar;
mod union;
mod value;

/// Decoder entry points and options.
pub use decode::{DecodeOptions, decode, decode_into, decode_into_with, decode_with};
/// Encoder entry point and emptiness test.
pub use encode::{encode, is_empty_value};
/// Error and result aliases.
pub use error::{CoercionFault, InvalidAssignmentError, Result};
/// Field annotation resolution.
pub use field::FieldDescriptor;
/// Destination kind classification.
pub use kind::Kind;
/// Reflection traits and shape views.
pub use reflect::{FieldInfo, MapKey, Mapping, Outcome, Pointer, Record, Reflect, ReflectBase, ReflectMut, ReflectRef, ScalarMut, ScalarRef, Sequence};
/// Type-erased value slot.
pub use union::Union;
/// Dynamic value tree.
pub use value::{Object, Value, ValueKind};
