//! Bridging records and string-keyed maps.

use std::borrow::Cow;

use shapeshift_core::{Def, Object, Peek, Poke, RecordAccess, Reflect, Shape, Value};

use crate::engine::Assigner;
use crate::{Reason, Result, ShiftError, TargetError, trace};

/// Translates a record field name into a map key, and a map key into the
/// field name it should fill. The same function serves both directions.
pub trait FieldNameMapper {
    /// Maps one name.
    fn map_name<'a>(&self, name: &'a str) -> Cow<'a, str>;
}

/// Leaves names as they are.
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

impl FieldNameMapper for Identity {
    fn map_name<'a>(&self, name: &'a str) -> Cow<'a, str> {
        Cow::Borrowed(name)
    }
}

impl<F> FieldNameMapper for F
where
    F: Fn(&str) -> String,
{
    fn map_name<'a>(&self, name: &'a str) -> Cow<'a, str> {
        Cow::Owned(self(name))
    }
}

/// Configured record mapping.
///
/// ```
/// use shapeshift::{RecordMapper, Shaped, value};
///
/// #[derive(Shaped, Debug, PartialEq)]
/// struct Login {
///     user: String,
///     attempts: u32,
/// }
///
/// let mapper = RecordMapper::new().with_names(|name: &str| name.to_lowercase());
///
/// let mut login = <Login as Shaped>::zeroed();
/// mapper.fill(&value!({"User": "root", "ATTEMPTS": "3"}), &mut login)?;
/// assert_eq!(login, Login { user: "root".into(), attempts: 3 });
///
/// let map = mapper.to_map(&login)?;
/// assert_eq!(map.keys().collect::<Vec<_>>(), ["user", "attempts"]);
/// # Ok::<(), shapeshift::ShiftError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct RecordMapper<N = Identity> {
    names: N,
}

impl RecordMapper {
    /// A mapper keeping field names as they are.
    pub fn new() -> Self {
        Self { names: Identity }
    }
}

impl<N: FieldNameMapper> RecordMapper<N> {
    /// Replaces the field name mapping.
    pub fn with_names<M: FieldNameMapper>(self, names: M) -> RecordMapper<M> {
        RecordMapper { names }
    }

    /// Reads a record (or an indirection to one) into a map.
    ///
    /// Fields of flattened embeddings land in the same map; nested records
    /// become nested maps. Every emitted key goes through the name mapping.
    pub fn to_map(&self, record: &dyn Reflect) -> Result<Object> {
        to_map_with(record, &self.names)
    }

    /// Fills a record (or an indirection to one) from a map.
    ///
    /// Keys go through the name mapping before they are matched against
    /// field names. Keys without a matching field and read-only fields are
    /// skipped; the first field that fails to convert aborts the call.
    pub fn fill(&self, map: &Value, record: &mut dyn Reflect) -> Result<()> {
        fill_with(map, record, &self.names)
    }

    /// Reads any reflected value into a [`Value`], naming record fields
    /// through the name mapping.
    pub fn to_value(&self, value: &dyn Reflect) -> Value {
        value_of(value, &self.names)
    }
}

/// Reads a record into a map. `None` keeps field names as they are.
pub fn record_to_map(
    record: &dyn Reflect,
    names: Option<&dyn FieldNameMapper>,
) -> Result<Object> {
    to_map_with(record, names.unwrap_or(&Identity))
}

/// Fills a record from a map. `None` keeps key names as they are.
pub fn map_to_record(
    map: &Value,
    record: &mut dyn Reflect,
    names: Option<&dyn FieldNameMapper>,
) -> Result<()> {
    fill_with(map, record, names.unwrap_or(&Identity))
}

fn to_map_with(record: &dyn Reflect, names: &dyn FieldNameMapper) -> Result<Object> {
    let shape = record.shape();
    match record_of(record) {
        Some(record) => Ok(entries(record, names)),
        None => Err(ShiftError::conversion_of(
            to_value(record).to_string(),
            shape.to_string(),
            "Object",
            Reason::NotARecord,
        )),
    }
}

fn fill_with(map: &Value, record: &mut dyn Reflect, names: &dyn FieldNameMapper) -> Result<()> {
    let shape = record.shape();
    let Some(record_shape) = record_shape_of(shape) else {
        return Err(ShiftError::target(TargetError::NotARecord { shape }));
    };
    let Value::Object(map) = map else {
        return Err(ShiftError::conversion(
            map,
            record_shape.to_string(),
            Reason::NotAMap,
        ));
    };
    let Some(record) = record_mut_of(record)? else {
        return Err(ShiftError::target(TargetError::NotARecord { shape }));
    };
    trace!("filling {} from {} keys", record.shape(), map.len());
    Assigner::new(names).fill_record(map, record)
}

/// Reads any reflected value into a [`Value`].
///
/// Records become objects (flattened embeddings merged in), sequences
/// become arrays and null indirections become [`Value::Null`].
pub fn to_value(value: &dyn Reflect) -> Value {
    value_of(value, &Identity)
}

fn value_of(value: &dyn Reflect, names: &dyn FieldNameMapper) -> Value {
    match value.peek() {
        Peek::Scalar(scalar) => scalar.to_value(),
        Peek::Sequence(sequence) => (0..sequence.len())
            .filter_map(|i| sequence.element(i))
            .map(|element| value_of(element, names))
            .collect(),
        Peek::Record(record) => Value::Object(entries(record, names)),
        Peek::Pointer(pointer) => pointer
            .pointee()
            .map_or(Value::Null, |pointee| value_of(pointee, names)),
        Peek::Opaque(opaque) => opaque.to_value(),
    }
}

fn entries(record: &dyn RecordAccess, names: &dyn FieldNameMapper) -> Object {
    let mut map = Object::new();
    let Some(def) = record.shape().record() else {
        return map;
    };
    for flat in def.layout().iter().filter(|f| !f.embedded) {
        if let Some(field) = field_at_path(record, &flat.path) {
            map.insert(
                names.map_name(flat.name).into_owned(),
                value_of(field, names),
            );
        }
    }
    map
}

fn field_at_path<'a>(record: &'a dyn RecordAccess, path: &[usize]) -> Option<&'a dyn Reflect> {
    let (&last, embeddings) = path.split_last()?;
    let mut current = record;
    for &index in embeddings {
        current = match current.field(index)?.peek() {
            Peek::Record(inner) => inner,
            _ => return None,
        };
    }
    current.field(last)
}

fn record_of(value: &dyn Reflect) -> Option<&dyn RecordAccess> {
    match value.peek() {
        Peek::Record(record) => Some(record),
        Peek::Pointer(pointer) => pointer.pointee().and_then(record_of),
        _ => None,
    }
}

/// The record shape at the end of `shape`'s indirections, if any.
fn record_shape_of(shape: &'static Shape) -> Option<&'static Shape> {
    match shape.def {
        Def::Record(_) => Some(shape),
        Def::Pointer(def) => record_shape_of(def.pointee),
        _ => None,
    }
}

/// The record behind `value`, `Ok(None)` if it is something else, or an
/// error if an indirection on the way is null.
fn record_mut_of(value: &mut dyn Reflect) -> Result<Option<&mut dyn RecordAccess>> {
    let shape = value.shape();
    match value.poke() {
        Poke::Record(record) => Ok(Some(record)),
        Poke::Pointer(pointer) => match pointer.pointee_or_insert() {
            Some(pointee) => record_mut_of(pointee),
            None => Err(ShiftError::target(TargetError::NullPointer { shape })),
        },
        _ => Ok(None),
    }
}
