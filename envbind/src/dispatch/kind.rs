//! Type tags for the builtin target types.

use std::fmt;

/// Semantic family of a scalar type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ScalarKind {
    /// UTF-8 text.
    String,
    /// Signed integer of any width.
    Int,
    /// Unsigned integer of any width.
    Uint,
    /// Floating-point number.
    Float,
    /// Boolean switch.
    Bool,
    /// Decoded byte string.
    Bytes,
    /// Duration literal.
    Duration,
    /// Timestamp parsed against a layout.
    Timestamp,
    /// Absolute URL.
    Url,
    /// IPv4 or IPv6 address.
    Ip,
}

impl ScalarKind {
    /// Placeholder shown for the flag's value in usage text.
    #[must_use]
    pub const fn value_name(self) -> &'static str {
        match self {
            Self::String => "STRING",
            Self::Int => "INT",
            Self::Uint => "UINT",
            Self::Float => "FLOAT",
            Self::Bool => "BOOL",
            Self::Bytes => "BYTES",
            Self::Duration => "DURATION",
            Self::Timestamp => "TIME",
            Self::Url => "URL",
            Self::Ip => "IP",
        }
    }
}

/// How the scalar is wrapped in the target type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Shape {
    /// The scalar itself.
    Scalar,
    /// `Option<S>`: absent until a source provides a value.
    Optional,
    /// `Vec<S>`: separated list, extended by repeated flags.
    Sequence,
}

/// Full type tag of a bindable target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ValueKind {
    scalar: ScalarKind,
    shape: Shape,
}

impl ValueKind {
    /// Combine a scalar family with a shape.
    #[must_use]
    pub const fn new(scalar: ScalarKind, shape: Shape) -> Self {
        Self { scalar, shape }
    }

    /// Scalar family of the element.
    #[must_use]
    pub const fn scalar(self) -> ScalarKind {
        self.scalar
    }

    /// Wrapping shape.
    #[must_use]
    pub const fn shape(self) -> Shape {
        self.shape
    }

    /// Whether the flag may appear without a value, meaning `true`.
    #[must_use]
    pub const fn is_switch(self) -> bool {
        matches!(self.scalar, ScalarKind::Bool) && !matches!(self.shape, Shape::Sequence)
    }

    /// Placeholder shown for the flag's value in usage text.
    #[must_use]
    pub const fn value_name(self) -> &'static str {
        self.scalar.value_name()
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.shape {
            Shape::Scalar => f.write_str(self.value_name()),
            Shape::Optional => write!(f, "{}?", self.value_name()),
            Shape::Sequence => write!(f, "[{}]", self.value_name()),
        }
    }
}
