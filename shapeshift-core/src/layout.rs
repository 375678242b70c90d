use std::sync::OnceLock;

use crate::{RecordDef, Shape};

/// The flattened field list of a record type.
///
/// Fields of `#[shaped(flatten)]` embeddings are promoted into the
/// parent. When several fields share a name the shallowest one wins; two
/// equally shallow fields with the same name are ambiguous and neither is
/// reachable by name.
#[derive(Debug, Clone, Default)]
pub struct FieldLayout {
    fields: Vec<FlatField>,
}

/// One entry of a [`FieldLayout`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatField {
    /// The field name
    pub name: &'static str,

    /// Field indices to follow from the outer record, one per nesting level
    pub path: Vec<usize>,

    /// How many embeddings deep the field sits; `0` for direct fields
    pub depth: usize,

    /// Whether the field, or any embedding it was promoted through, is
    /// read-only
    pub readonly: bool,

    /// Whether this is a flattened embedding whose own fields were
    /// promoted alongside it
    pub embedded: bool,
}

impl FieldLayout {
    /// Computes the layout of a record definition.
    pub fn build(def: &RecordDef) -> Self {
        let mut candidates = Vec::new();
        collect(def, &mut Vec::new(), 0, false, &mut candidates);

        let fields = candidates
            .iter()
            .filter(|candidate| {
                let mut shallowest = usize::MAX;
                let mut ties = 0;
                for other in candidates.iter().filter(|o| o.name == candidate.name) {
                    if other.depth < shallowest {
                        shallowest = other.depth;
                        ties = 1;
                    } else if other.depth == shallowest {
                        ties += 1;
                    }
                }
                candidate.depth == shallowest && ties == 1
            })
            .cloned()
            .collect();

        Self { fields }
    }

    /// Finds the field reachable under `name`.
    pub fn find(&self, name: &str) -> Option<&FlatField> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Iterates over every reachable field.
    pub fn iter(&self) -> impl Iterator<Item = &FlatField> {
        self.fields.iter()
    }

    /// Number of reachable fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether no field is reachable.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

fn collect(
    def: &RecordDef,
    prefix: &mut Vec<usize>,
    depth: usize,
    readonly: bool,
    out: &mut Vec<FlatField>,
) {
    for (index, field) in def.fields.iter().enumerate() {
        prefix.push(index);
        let readonly = readonly || field.readonly;
        let embedded = if field.flatten { field.shape().record() } else { None };
        out.push(FlatField {
            name: field.name,
            path: prefix.clone(),
            depth,
            readonly,
            embedded: embedded.is_some(),
        });
        if let Some(inner) = embedded {
            collect(inner, prefix, depth + 1, readonly, out);
        }
        prefix.pop();
    }
}

/// Lazily computed [`FieldLayout`], one per derived record type.
pub struct LayoutCell(OnceLock<FieldLayout>);

impl LayoutCell {
    /// An empty cell, for use in a `static`.
    pub const fn new() -> Self {
        Self(OnceLock::new())
    }

    /// Returns the layout of `shape`, computing it on first use.
    pub fn get_or_build(&self, shape: &'static Shape) -> &FieldLayout {
        self.0
            .get_or_init(|| shape.record().map(FieldLayout::build).unwrap_or_default())
    }
}

impl Default for LayoutCell {
    fn default() -> Self {
        Self::new()
    }
}
