//! Reference-counted foreign values.
//!
//! An [`Object`] is a cheap handle to a shared, dynamically typed value. The
//! strong count of the handle is the value's reference count: cloning a
//! handle acquires a reference and dropping it releases one, so a transient
//! handle obtained during a conversion is released on every exit path.
//!
//! Scalars, strings, tuples, lists and dicts are immutable after
//! construction. Sets support `pop`/`add` and instances support attribute
//! assignment; both use interior mutability because the foreign runtime
//! mutates shared values in place.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use rustc_hash::FxHashMap;

use crate::error::ObjectError;
use crate::key::ForeignKey;

/// Runtime type tag of a foreign value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    /// The `None` singleton
    None,
    /// Boolean
    Bool,
    /// Legacy machine-word integer
    Int,
    /// Wide integer
    Long,
    /// Double precision float
    Float,
    /// Byte string
    Bytes,
    /// Unicode text
    Text,
    /// Fixed-arity sequence
    Tuple,
    /// Ordered list
    List,
    /// Unique-element set
    Set,
    /// Key-value mapping
    Dict,
    /// Generic object with named attributes
    Instance,
}

impl Tag {
    /// Name of the tag as the foreign runtime spells its type.
    pub fn name(self) -> &'static str {
        match self {
            Tag::None => "NoneType",
            Tag::Bool => "bool",
            Tag::Int => "int",
            Tag::Long => "long",
            Tag::Float => "float",
            Tag::Bytes => "bytes",
            Tag::Text => "str",
            Tag::Tuple => "tuple",
            Tag::List => "list",
            Tag::Set => "set",
            Tag::Dict => "dict",
            Tag::Instance => "object",
        }
    }

    /// True for both integer tags and for `Bool`, which is an integer subtype.
    pub fn is_integer(self) -> bool {
        matches!(self, Tag::Bool | Tag::Int | Tag::Long)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

pub(crate) enum Repr {
    None,
    Bool(bool),
    Int(i64),
    Long(i128),
    Float(f64),
    Bytes(Box<[u8]>),
    Text(Box<[u16]>),
    Tuple(Box<[Object]>),
    List(Box<[Object]>),
    Set(RefCell<FxHashMap<ForeignKey, Object>>),
    Dict(Dict),
    Instance(Instance),
}

#[derive(Default)]
pub(crate) struct Dict {
    entries: Vec<(Object, Object)>,
    index: FxHashMap<ForeignKey, usize>,
}

impl Dict {
    fn insert(&mut self, hashed: ForeignKey, key: Object, value: Object) {
        match self.index.get(&hashed).copied() {
            Some(pos) => self.entries[pos].1 = value,
            None => {
                self.index.insert(hashed, self.entries.len());
                self.entries.push((key, value));
            }
        }
    }
}

pub(crate) struct Instance {
    class_name: String,
    attrs: RefCell<Vec<(String, Object)>>,
}

/// Handle to a reference-counted foreign value.
#[derive(Clone)]
pub struct Object(Rc<Repr>);

impl Object {
    fn new(repr: Repr) -> Self {
        Object(Rc::new(repr))
    }

    pub(crate) fn repr(&self) -> &Repr {
        &self.0
    }

    pub(crate) fn inner(&self) -> &Rc<Repr> {
        &self.0
    }

    // =========================================================================
    // CONSTRUCTORS
    // =========================================================================

    /// The `None` value.
    pub fn none() -> Self {
        Self::new(Repr::None)
    }

    /// A boolean.
    pub fn bool(v: bool) -> Self {
        Self::new(Repr::Bool(v))
    }

    /// A legacy machine-word integer.
    pub fn int(v: i64) -> Self {
        Self::new(Repr::Int(v))
    }

    /// A wide integer.
    pub fn long(v: i128) -> Self {
        Self::new(Repr::Long(v))
    }

    /// A float.
    pub fn float(v: f64) -> Self {
        Self::new(Repr::Float(v))
    }

    /// A byte string. The bytes need not be valid UTF-8.
    pub fn bytes(v: impl Into<Vec<u8>>) -> Self {
        Self::new(Repr::Bytes(v.into().into_boxed_slice()))
    }

    /// A text string.
    pub fn text(v: &str) -> Self {
        Self::new(Repr::Text(v.encode_utf16().collect()))
    }

    /// A text string from raw UTF-16 code units, which may be ill-formed.
    pub fn text_units(units: impl Into<Vec<u16>>) -> Self {
        Self::new(Repr::Text(units.into().into_boxed_slice()))
    }

    /// A fixed-arity sequence.
    pub fn tuple(items: impl IntoIterator<Item = Object>) -> Self {
        Self::new(Repr::Tuple(items.into_iter().collect()))
    }

    /// An ordered list.
    pub fn list(items: impl IntoIterator<Item = Object>) -> Self {
        Self::new(Repr::List(items.into_iter().collect()))
    }

    /// A set. Equal elements collapse into the first one inserted.
    pub fn set(items: impl IntoIterator<Item = Object>) -> Result<Self, ObjectError> {
        let mut members = FxHashMap::default();
        for item in items {
            members.entry(ForeignKey::of(&item)?).or_insert(item);
        }
        Ok(Self::new(Repr::Set(RefCell::new(members))))
    }

    /// A dict preserving insertion order. A repeated key keeps its first
    /// position and takes the last value.
    pub fn dict(entries: impl IntoIterator<Item = (Object, Object)>) -> Result<Self, ObjectError> {
        let mut dict = Dict::default();
        for (key, value) in entries {
            dict.insert(ForeignKey::of(&key)?, key, value);
        }
        Ok(Self::new(Repr::Dict(dict)))
    }

    /// A dict keyed by text strings. Text keys are always hashable.
    pub fn str_dict<'a>(entries: impl IntoIterator<Item = (&'a str, Object)>) -> Self {
        let mut dict = Dict::default();
        for (key, value) in entries {
            dict.insert(ForeignKey::text(key), Object::text(key), value);
        }
        Self::new(Repr::Dict(dict))
    }

    /// An instance of `class_name` carrying the given attributes.
    pub fn instance<'a>(
        class_name: &str,
        attrs: impl IntoIterator<Item = (&'a str, Object)>,
    ) -> Self {
        let instance = Instance {
            class_name: class_name.to_string(),
            attrs: RefCell::new(Vec::new()),
        };
        let object = Self::new(Repr::Instance(instance));
        for (name, value) in attrs {
            // Cannot fail: the receiver is an instance.
            let _ = object.set_attr(name, value);
        }
        object
    }

    // =========================================================================
    // IDENTITY
    // =========================================================================

    /// The runtime type tag.
    pub fn tag(&self) -> Tag {
        match self.repr() {
            Repr::None => Tag::None,
            Repr::Bool(_) => Tag::Bool,
            Repr::Int(_) => Tag::Int,
            Repr::Long(_) => Tag::Long,
            Repr::Float(_) => Tag::Float,
            Repr::Bytes(_) => Tag::Bytes,
            Repr::Text(_) => Tag::Text,
            Repr::Tuple(_) => Tag::Tuple,
            Repr::List(_) => Tag::List,
            Repr::Set(_) => Tag::Set,
            Repr::Dict(_) => Tag::Dict,
            Repr::Instance(_) => Tag::Instance,
        }
    }

    /// Name of the value's type, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        self.tag().name()
    }

    /// Number of live handles to this value.
    pub fn ref_count(&self) -> usize {
        Rc::strong_count(&self.0)
    }

    /// True if both handles refer to the same value.
    pub fn is(&self, other: &Object) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    // =========================================================================
    // SCALARS
    // =========================================================================

    /// The boolean payload. Only `Bool` values have one.
    pub fn as_bool(&self) -> Option<bool> {
        match self.repr() {
            Repr::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// The integer payload of `Bool`, `Int` and `Long` values.
    pub fn as_integer(&self) -> Option<i128> {
        match self.repr() {
            Repr::Bool(b) => Some(i128::from(*b)),
            Repr::Int(v) => Some(i128::from(*v)),
            Repr::Long(v) => Some(*v),
            _ => None,
        }
    }

    /// The payload of a `Float` value.
    pub fn as_float(&self) -> Option<f64> {
        match self.repr() {
            Repr::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// The payload of a `Bytes` value.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self.repr() {
            Repr::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// The UTF-16 code units of a `Text` value.
    pub fn as_text_units(&self) -> Option<&[u16]> {
        match self.repr() {
            Repr::Text(t) => Some(t),
            _ => None,
        }
    }

    // =========================================================================
    // SEQUENCES
    // =========================================================================

    /// The members of a `Tuple` value.
    pub fn tuple_items(&self) -> Option<&[Object]> {
        match self.repr() {
            Repr::Tuple(items) => Some(items),
            _ => None,
        }
    }

    /// The members of a `List` value.
    pub fn list_items(&self) -> Option<&[Object]> {
        match self.repr() {
            Repr::List(items) => Some(items),
            _ => None,
        }
    }

    /// Length of strings and containers; `None` for scalars and instances.
    pub fn len(&self) -> Option<usize> {
        match self.repr() {
            Repr::Bytes(b) => Some(b.len()),
            Repr::Text(t) => Some(t.len()),
            Repr::Tuple(items) | Repr::List(items) => Some(items.len()),
            Repr::Set(members) => Some(members.borrow().len()),
            Repr::Dict(dict) => Some(dict.entries.len()),
            _ => None,
        }
    }

    // =========================================================================
    // SETS
    // =========================================================================

    fn set_members(&self) -> Result<&RefCell<FxHashMap<ForeignKey, Object>>, ObjectError> {
        match self.repr() {
            Repr::Set(members) => Ok(members),
            _ => Err(ObjectError::NotASet {
                type_name: self.type_name(),
            }),
        }
    }

    /// Remove and return an arbitrary element, or `None` when empty.
    ///
    /// The caller receives the set's own reference; adding it back with
    /// [`Object::set_add`] restores the original reference count.
    pub fn set_pop(&self) -> Result<Option<Object>, ObjectError> {
        let mut members = self.set_members()?.borrow_mut();
        let Some(key) = members.keys().next().cloned() else {
            return Ok(None);
        };
        Ok(members.remove(&key))
    }

    /// Insert an element. Returns false if an equal element was present.
    pub fn set_add(&self, item: Object) -> Result<bool, ObjectError> {
        let key = ForeignKey::of(&item)?;
        let mut members = self.set_members()?.borrow_mut();
        if members.contains_key(&key) {
            return Ok(false);
        }
        members.insert(key, item);
        Ok(true)
    }

    /// True if an element equal to `item` is in the set.
    pub fn set_contains(&self, item: &Object) -> Result<bool, ObjectError> {
        let key = ForeignKey::of(item)?;
        Ok(self.set_members()?.borrow().contains_key(&key))
    }

    /// New handles to every element, without modifying the set.
    pub fn set_elements(&self) -> Option<Vec<Object>> {
        match self.repr() {
            Repr::Set(members) => Some(members.borrow().values().cloned().collect()),
            _ => None,
        }
    }

    // =========================================================================
    // DICTS
    // =========================================================================

    /// The entries of a `Dict` value in insertion order.
    pub fn dict_entries(&self) -> Option<&[(Object, Object)]> {
        match self.repr() {
            Repr::Dict(dict) => Some(&dict.entries),
            _ => None,
        }
    }

    /// Look up `key` in a `Dict` value. Unhashable keys are never present.
    pub fn dict_get(&self, key: &Object) -> Option<&Object> {
        let Repr::Dict(dict) = self.repr() else {
            return None;
        };
        let key = ForeignKey::of(key).ok()?;
        dict.index.get(&key).map(|&pos| &dict.entries[pos].1)
    }

    /// Look up a text key in a `Dict` value.
    pub fn dict_get_str(&self, name: &str) -> Option<&Object> {
        let Repr::Dict(dict) = self.repr() else {
            return None;
        };
        dict.index
            .get(&ForeignKey::text(name))
            .map(|&pos| &dict.entries[pos].1)
    }

    // =========================================================================
    // ATTRIBUTES
    // =========================================================================

    /// Class name of an `Instance` value.
    pub fn class_name(&self) -> Option<&str> {
        match self.repr() {
            Repr::Instance(instance) => Some(&instance.class_name),
            _ => None,
        }
    }

    /// True if the value carries an attribute called `name`.
    pub fn has_attr(&self, name: &str) -> bool {
        match self.repr() {
            Repr::Instance(instance) => instance.attrs.borrow().iter().any(|(n, _)| n == name),
            _ => false,
        }
    }

    /// A new handle to the attribute called `name`.
    pub fn get_attr(&self, name: &str) -> Option<Object> {
        match self.repr() {
            Repr::Instance(instance) => instance
                .attrs
                .borrow()
                .iter()
                .find(|(n, _)| n == name)
                .map(|(_, value)| value.clone()),
            _ => None,
        }
    }

    /// Assign the attribute called `name`, replacing any previous value.
    pub fn set_attr(&self, name: &str, value: Object) -> Result<(), ObjectError> {
        let Repr::Instance(instance) = self.repr() else {
            return Err(ObjectError::NoAttributes {
                type_name: self.type_name(),
            });
        };
        let mut attrs = instance.attrs.borrow_mut();
        match attrs.iter_mut().find(|(n, _)| n == name) {
            Some(slot) => slot.1 = value,
            None => attrs.push((name.to_string(), value)),
        }
        Ok(())
    }
}

impl From<bool> for Object {
    fn from(v: bool) -> Self {
        Object::bool(v)
    }
}

impl From<i32> for Object {
    fn from(v: i32) -> Self {
        Object::int(i64::from(v))
    }
}

impl From<i64> for Object {
    fn from(v: i64) -> Self {
        Object::int(v)
    }
}

impl From<f64> for Object {
    fn from(v: f64) -> Self {
        Object::float(v)
    }
}

impl From<&str> for Object {
    fn from(v: &str) -> Self {
        Object::text(v)
    }
}

fn write_items(f: &mut fmt::Formatter<'_>, items: &[Object]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{:?}", item)?;
    }
    Ok(())
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.repr() {
            Repr::None => f.write_str("None"),
            Repr::Bool(true) => f.write_str("True"),
            Repr::Bool(false) => f.write_str("False"),
            Repr::Int(v) => write!(f, "{}", v),
            Repr::Long(v) => write!(f, "{}L", v),
            Repr::Float(v) => write!(f, "{:?}", v),
            Repr::Bytes(b) => write!(f, "b{:?}", String::from_utf8_lossy(b)),
            Repr::Text(t) => write!(f, "{:?}", String::from_utf16_lossy(t)),
            Repr::Tuple(items) => {
                f.write_str("(")?;
                write_items(f, items)?;
                if items.len() == 1 {
                    f.write_str(",")?;
                }
                f.write_str(")")
            }
            Repr::List(items) => {
                f.write_str("[")?;
                write_items(f, items)?;
                f.write_str("]")
            }
            Repr::Set(members) => {
                let members: Vec<Object> = members.borrow().values().cloned().collect();
                f.write_str("set([")?;
                write_items(f, &members)?;
                f.write_str("])")
            }
            Repr::Dict(dict) => {
                f.write_str("{")?;
                for (i, (key, value)) in dict.entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{:?}: {:?}", key, value)?;
                }
                f.write_str("}")
            }
            Repr::Instance(instance) => write!(f, "<{} object>", instance.class_name),
        }
    }
}
