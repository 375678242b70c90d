use core::fmt;
use std::borrow::Cow;

use shapeshift_core::{Shape, Value};

/// A segment of the path from the conversion target's root to the place
/// an error occurred.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PathSegment {
    /// A record field, named by the source key that addressed it
    Field(String),
    /// A sequence index
    Index(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Field(name) => write!(f, ".{name}"),
            PathSegment::Index(i) => write!(f, "[{i}]"),
        }
    }
}

/// Error type for every conversion.
#[derive(Debug, Clone)]
pub struct ShiftError {
    /// What went wrong
    pub kind: ShiftErrorKind,
    /// Where in the target it went wrong; empty at the root
    pub path: Vec<PathSegment>,
}

/// The two families of conversion failures.
#[derive(Debug, Clone)]
pub enum ShiftErrorKind {
    /// The source cannot become the target's kind
    Conversion(ConversionError),
    /// The target itself cannot be written
    Target(TargetError),
}

/// The source value cannot be converted into the target kind.
#[derive(Debug, Clone)]
pub struct ConversionError {
    /// The source, printed
    pub source_repr: String,
    /// The source's type name
    pub source_kind: Cow<'static, str>,
    /// The target's type name
    pub target_kind: Cow<'static, str>,
    /// Why the conversion was refused
    pub reason: Reason,
}

/// Why a conversion was refused.
#[derive(Debug, Clone, PartialEq)]
pub enum Reason {
    /// No conversion exists between the two kinds
    Unsupported,
    /// A negative value was headed for an unsigned target
    Negative,
    /// Text that is not a literal of the target kind
    Unparsable,
    /// NaN or an infinity was headed for an integer target
    NonFinite,
    /// Not a unicode scalar value
    InvalidChar,
    /// A fixed-length target got a source of a different length
    LengthMismatch {
        /// The target's length
        expected: usize,
        /// The source's length
        actual: usize,
    },
    /// The target is a sequence but the source is not iterable
    NotASequence,
    /// The target is a record but the source is not a key-value map
    NotAMap,
    /// A record was expected on the source side
    NotARecord,
    /// A byte size with a unit suffix nobody knows
    UnknownUnit(String),
    /// A byte size that works out to less than one byte
    MeaninglessSize,
    /// A result too large for the target
    Overflow,
}

/// The target cannot be written to.
#[derive(Debug, Clone)]
pub enum TargetError {
    /// An indirection with nothing behind it that cannot allocate one.
    ///
    /// `Option` and `Box` always can; this comes from user
    /// [`PointerAccess`](shapeshift_core::PointerAccess) implementations
    /// whose `pointee_or_insert` returns `None`.
    NullPointer {
        /// Shape of the null pointer
        shape: &'static Shape,
    },
    /// A record was required but the target is something else
    NotARecord {
        /// Shape of the target
        shape: &'static Shape,
    },
}

impl ShiftError {
    /// Creates an error with an empty path.
    pub fn new(kind: ShiftErrorKind) -> Self {
        Self {
            kind,
            path: Vec::new(),
        }
    }

    pub(crate) fn conversion(
        source: &Value,
        target_kind: impl Into<Cow<'static, str>>,
        reason: Reason,
    ) -> Self {
        Self::new(ShiftErrorKind::Conversion(ConversionError {
            source_repr: source.to_string(),
            source_kind: Cow::Borrowed(source.type_name()),
            target_kind: target_kind.into(),
            reason,
        }))
    }

    pub(crate) fn conversion_of(
        source_repr: String,
        source_kind: impl Into<Cow<'static, str>>,
        target_kind: impl Into<Cow<'static, str>>,
        reason: Reason,
    ) -> Self {
        Self::new(ShiftErrorKind::Conversion(ConversionError {
            source_repr,
            source_kind: source_kind.into(),
            target_kind: target_kind.into(),
            reason,
        }))
    }

    pub(crate) fn target(error: TargetError) -> Self {
        Self::new(ShiftErrorKind::Target(error))
    }

    /// Prepends a path segment (errors are built from the inside out).
    pub fn with_path(mut self, segment: PathSegment) -> Self {
        self.path.insert(0, segment);
        self
    }

    /// The conversion failure, if that is what this is.
    pub fn as_conversion(&self) -> Option<&ConversionError> {
        match &self.kind {
            ShiftErrorKind::Conversion(e) => Some(e),
            ShiftErrorKind::Target(_) => None,
        }
    }

    /// The target failure, if that is what this is.
    pub fn as_target(&self) -> Option<&TargetError> {
        match &self.kind {
            ShiftErrorKind::Target(e) => Some(e),
            ShiftErrorKind::Conversion(_) => None,
        }
    }

    /// Shorthand for the reason of a conversion failure.
    pub fn reason(&self) -> Option<&Reason> {
        self.as_conversion().map(|e| &e.reason)
    }

    /// The path as a string, `<root>` when empty.
    pub fn path_string(&self) -> String {
        if self.path.is_empty() {
            "<root>".into()
        } else {
            self.path.iter().map(ToString::to_string).collect()
        }
    }
}

impl fmt::Display for ShiftError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.kind)
        } else {
            write!(f, "at {}: {}", self.path_string(), self.kind)
        }
    }
}

impl fmt::Display for ShiftErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShiftErrorKind::Conversion(e) => write!(f, "{e}"),
            ShiftErrorKind::Target(e) => write!(f, "{e}"),
        }
    }
}

impl fmt::Display for ConversionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cannot convert {} `{}` into {}",
            self.source_kind, self.source_repr, self.target_kind
        )?;
        match &self.reason {
            Reason::Unsupported => Ok(()),
            reason => write!(f, ": {reason}"),
        }
    }
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reason::Unsupported => f.write_str("unsupported conversion"),
            Reason::Negative => f.write_str("negative value for an unsigned target"),
            Reason::Unparsable => f.write_str("unparsable literal"),
            Reason::NonFinite => f.write_str("not a finite number"),
            Reason::InvalidChar => f.write_str("not a unicode scalar value"),
            Reason::LengthMismatch { expected, actual } => {
                write!(f, "expected {expected} elements, got {actual}")
            }
            Reason::NotASequence => f.write_str("source is not a sequence"),
            Reason::NotAMap => f.write_str("source is not a map"),
            Reason::NotARecord => f.write_str("source is not a record"),
            Reason::UnknownUnit(unit) => write!(f, "unknown byte unit `{unit}`"),
            Reason::MeaninglessSize => f.write_str("meaningless size below one byte"),
            Reason::Overflow => f.write_str("out of range"),
        }
    }
}

impl fmt::Display for TargetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetError::NullPointer { shape } => write!(f, "invalid target: {shape} is null"),
            TargetError::NotARecord { shape } => {
                write!(f, "target must be a record reference, got {shape}")
            }
        }
    }
}

impl core::error::Error for ShiftError {}

impl core::error::Error for ConversionError {}

impl core::error::Error for TargetError {}

impl From<ConversionError> for ShiftError {
    fn from(e: ConversionError) -> Self {
        Self::new(ShiftErrorKind::Conversion(e))
    }
}

impl From<TargetError> for ShiftError {
    fn from(e: TargetError) -> Self {
        Self::new(ShiftErrorKind::Target(e))
    }
}

/// Result type for conversions.
pub type Result<T> = core::result::Result<T, ShiftError>;
