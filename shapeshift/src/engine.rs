//! The structural engine: writes a [`Value`] into anything [`Reflect`].

use std::borrow::Cow;

use shapeshift_core::{
    Object, Poke, PointerAccess, RecordAccess, Reflect, SequenceAccess, Shaped, Value,
};

use crate::scalar::write_scalar;
use crate::{
    FieldNameMapper, Identity, PathSegment, Reason, Result, ShiftError, TargetError, debug,
    trace,
};

/// Converts `source` into `target`, in place.
///
/// The target's shape drives the conversion:
///
/// - indirections are followed first; a null source makes an `Option`
///   `None`, any other source fills it, allocating if it was `None`,
/// - a null source resets the target to its zero value,
/// - scalars go through the [`scalar`](crate::scalar) converters,
/// - sequences take arrays, strings (one element per char) and bytes; a
///   `Vec` ends up exactly as long as the source, a fixed-length array
///   rejects sources of any other length,
/// - records take string-keyed objects, matching keys to field names
///   and skipping keys without a field,
/// - anything else must share a representation with the source.
///
/// On error, elements and fields written before the failing one keep
/// their new values.
///
/// ```
/// use shapeshift::{assign, value};
///
/// let mut ports: Vec<u16> = vec![1, 2, 3, 4];
/// assign(&value!(["80", 443.0, true]), &mut ports)?;
/// assert_eq!(ports, [80, 443, 1]);
/// # Ok::<(), shapeshift::ShiftError>(())
/// ```
pub fn assign(source: &Value, target: &mut dyn Reflect) -> Result<()> {
    Assigner::new(&Identity).assign(source, target)
}

/// Builds a fresh `T` out of `source`.
///
/// ```
/// use shapeshift::{from_value, value};
///
/// let pair: [f32; 2] = from_value(&value!(["1.5", 2]))?;
/// assert_eq!(pair, [1.5, 2.0]);
/// # Ok::<(), shapeshift::ShiftError>(())
/// ```
pub fn from_value<T: Shaped>(source: &Value) -> Result<T> {
    let mut target = T::zeroed();
    assign(source, &mut target)?;
    Ok(target)
}

/// The recursive state machine behind [`assign`], carrying the field name
/// mapping used whenever an object fills a record.
pub(crate) struct Assigner<'n> {
    names: &'n dyn FieldNameMapper,
}

impl<'n> Assigner<'n> {
    pub(crate) fn new(names: &'n dyn FieldNameMapper) -> Self {
        Self { names }
    }

    pub(crate) fn assign(&self, source: &Value, target: &mut dyn Reflect) -> Result<()> {
        let shape = target.shape();
        trace!("assign {} into {shape}", source.kind());

        match target.poke() {
            Poke::Pointer(pointer) => self.assign_pointer(source, pointer),
            poke if source.is_null() => {
                poke.set_zero();
                Ok(())
            }
            Poke::Scalar(slot) => write_scalar(source, slot),
            Poke::Sequence(sequence) => self.assign_sequence(source, sequence),
            Poke::Record(record) => match source {
                Value::Object(map) => self.fill_record(map, record),
                _ => Err(ShiftError::conversion(
                    source,
                    shape.to_string(),
                    Reason::NotAMap,
                )),
            },
            Poke::Opaque(opaque) => {
                if opaque.coerce_from(source) {
                    Ok(())
                } else {
                    Err(ShiftError::conversion(
                        source,
                        shape.to_string(),
                        Reason::Unsupported,
                    ))
                }
            }
        }
    }

    fn assign_pointer(&self, source: &Value, pointer: &mut dyn PointerAccess) -> Result<()> {
        let shape = pointer.shape();
        if source.is_null() {
            pointer.set_null();
            return Ok(());
        }
        match pointer.pointee_or_insert() {
            Some(pointee) => self.assign(source, pointee),
            None => Err(ShiftError::target(TargetError::NullPointer { shape })),
        }
    }

    fn assign_sequence(&self, source: &Value, sequence: &mut dyn SequenceAccess) -> Result<()> {
        let shape = sequence.shape();
        let items: Cow<'_, [Value]> = match source {
            Value::Array(items) => Cow::Borrowed(items),
            Value::String(s) => Cow::Owned(s.chars().map(Value::Char).collect()),
            Value::Bytes(b) => Cow::Owned(b.iter().copied().map(Value::U8).collect()),
            _ => {
                return Err(ShiftError::conversion(
                    source,
                    shape.to_string(),
                    Reason::NotASequence,
                ));
            }
        };

        if let Some(expected) = shape.sequence().and_then(|def| def.len)
            && expected != items.len()
        {
            return Err(ShiftError::conversion(
                source,
                shape.to_string(),
                Reason::LengthMismatch {
                    expected,
                    actual: items.len(),
                },
            ));
        }

        sequence.reset(items.len());
        for (index, item) in items.iter().enumerate() {
            if let Some(element) = sequence.element_mut(index) {
                self.assign(item, element)
                    .map_err(|e| e.with_path(PathSegment::Index(index)))?;
            }
        }
        Ok(())
    }

    /// Writes every entry of `map` whose mapped key names a settable field.
    pub(crate) fn fill_record(&self, map: &Object, record: &mut dyn RecordAccess) -> Result<()> {
        let shape = record.shape();
        let Some(def) = shape.record() else {
            return Err(ShiftError::target(TargetError::NotARecord { shape }));
        };
        let layout = def.layout();

        for (key, item) in map {
            let name = self.names.map_name(key);
            let Some(field) = layout.find(&name) else {
                debug!("{shape} has no field `{name}`, skipping key `{key}`");
                continue;
            };
            if field.readonly {
                debug!("{shape}.{name} is read-only, skipping");
                continue;
            }
            if let Some(slot) = field_at_path(record, &field.path) {
                self.assign(item, slot)
                    .map_err(|e| e.with_path(PathSegment::Field(key.clone())))?;
            }
        }
        Ok(())
    }
}

/// Follows a flattened field path down through embedded records.
fn field_at_path<'a>(
    record: &'a mut dyn RecordAccess,
    path: &[usize],
) -> Option<&'a mut dyn Reflect> {
    let (&last, embeddings) = path.split_last()?;
    let mut current = record;
    for &index in embeddings {
        current = match current.field_mut(index)?.poke() {
            Poke::Record(inner) => inner,
            _ => return None,
        };
    }
    current.field_mut(last)
}
