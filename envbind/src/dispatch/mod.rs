//! Parser selection for the closed set of builtin target types.
//!
//! Every supported scalar `S` is bindable as `S`, `Option<S>` and `Vec<S>`.
//! The one exception is `u8`: `Vec<u8>` is a byte string decoded by the
//! binding's [`StringDecoder`](crate::parsers::StringDecoder), not a
//! sequence of small integers. Types outside the set do not implement
//! [`Bindable`] and must go through
//! [`Binder::var_func`](crate::Binder::var_func) or
//! [`Binder::var_json`](crate::Binder::var_json).

mod kind;

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, FixedOffset, Utc};
use url::Url;

use crate::collection::{self, Occurrence, Parser};
use crate::error::ParseError;
use crate::parsers::{self, ParseOptions};

pub use kind::{ScalarKind, Shape, ValueKind};

mod sealed {
    pub trait Sealed {}
}

/// Element types with a builtin string parser.
pub trait Scalar: Sized + Send + 'static + sealed::Sealed {
    /// Semantic family of the type.
    const KIND: ScalarKind;
    /// Name used in diagnostics.
    const TYPE_NAME: &'static str;

    /// Parse one element.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] when `raw` is not a valid `Self`.
    fn parse_scalar(raw: &str, options: &ParseOptions) -> Result<Self, ParseError>;
}

/// Target types accepted by [`Binder::var`](crate::Binder::var).
pub trait Bindable: Sized + Send + 'static + sealed::Sealed {
    /// Type tag driving flag shape and usage rendering.
    const KIND: ValueKind;

    /// Name used in diagnostics, e.g. `Vec<i64>`.
    fn type_name() -> String;

    /// Build the parser for this type from per-binding options.
    fn parser(options: &ParseOptions) -> Parser<Self>;

    /// Combine a freshly parsed flag value with the stored one.
    fn accumulate(current: &mut Self, parsed: Self, occurrence: Occurrence) {
        let _ = occurrence;
        *current = parsed;
    }
}

/// Parser for a single scalar bound to a snapshot of `options`.
#[must_use]
pub fn scalar_parser<S: Scalar>(options: &ParseOptions) -> Parser<S> {
    let options = options.clone();
    Arc::new(move |raw: &str| S::parse_scalar(raw, &options))
}

macro_rules! scalar {
    ($ty:ty, $kind:ident, $name:literal, |$raw:ident, $options:ident| $body:expr) => {
        impl sealed::Sealed for $ty {}

        impl Scalar for $ty {
            const KIND: ScalarKind = ScalarKind::$kind;
            const TYPE_NAME: &'static str = $name;

            fn parse_scalar($raw: &str, $options: &ParseOptions) -> Result<Self, ParseError> {
                $body
            }
        }
    };
}

macro_rules! bindable_scalar {
    ($($ty:ty),+ $(,)?) => {$(
        impl Bindable for $ty {
            const KIND: ValueKind = ValueKind::new(<$ty as Scalar>::KIND, Shape::Scalar);

            fn type_name() -> String {
                <$ty as Scalar>::TYPE_NAME.to_owned()
            }

            fn parser(options: &ParseOptions) -> Parser<Self> {
                scalar_parser::<$ty>(options)
            }
        }

        impl sealed::Sealed for Option<$ty> {}

        impl Bindable for Option<$ty> {
            const KIND: ValueKind = ValueKind::new(<$ty as Scalar>::KIND, Shape::Optional);

            fn type_name() -> String {
                format!("Option<{}>", <$ty as Scalar>::TYPE_NAME)
            }

            fn parser(options: &ParseOptions) -> Parser<Self> {
                collection::optional(scalar_parser::<$ty>(options))
            }
        }
    )+};
}

macro_rules! bindable_sequence {
    ($($ty:ty),+ $(,)?) => {$(
        impl sealed::Sealed for Vec<$ty> {}

        impl Bindable for Vec<$ty> {
            const KIND: ValueKind = ValueKind::new(<$ty as Scalar>::KIND, Shape::Sequence);

            fn type_name() -> String {
                format!("Vec<{}>", <$ty as Scalar>::TYPE_NAME)
            }

            fn parser(options: &ParseOptions) -> Parser<Self> {
                collection::sequence(scalar_parser::<$ty>(options), options.separator())
            }

            fn accumulate(current: &mut Self, parsed: Self, occurrence: Occurrence) {
                collection::extend_sequence(current, parsed, occurrence);
            }
        }
    )+};
}

scalar!(String, String, "String", |raw, _options| parsers::parse_string(raw));

scalar!(i8, Int, "i8", |raw, _options| parsers::parse_int(raw));
scalar!(i16, Int, "i16", |raw, _options| parsers::parse_int(raw));
scalar!(i32, Int, "i32", |raw, _options| parsers::parse_int(raw));
scalar!(i64, Int, "i64", |raw, _options| parsers::parse_int(raw));
scalar!(isize, Int, "isize", |raw, _options| parsers::parse_int(raw));

scalar!(u8, Uint, "u8", |raw, _options| parsers::parse_int(raw));
scalar!(u16, Uint, "u16", |raw, _options| parsers::parse_int(raw));
scalar!(u32, Uint, "u32", |raw, _options| parsers::parse_int(raw));
scalar!(u64, Uint, "u64", |raw, _options| parsers::parse_int(raw));
scalar!(usize, Uint, "usize", |raw, _options| parsers::parse_int(raw));

scalar!(f32, Float, "f32", |raw, _options| parsers::parse_float(raw));
scalar!(f64, Float, "f64", |raw, _options| parsers::parse_float(raw));

scalar!(bool, Bool, "bool", |raw, _options| parsers::parse_bool(raw));

scalar!(Vec<u8>, Bytes, "Vec<u8>", |raw, options| parsers::parse_bytes(raw, options.decoder()));

scalar!(Duration, Duration, "Duration", |raw, _options| Ok(parsers::parse_duration(raw)?));

scalar!(DateTime<FixedOffset>, Timestamp, "DateTime<FixedOffset>", |raw, options| {
    parsers::parse_timestamp(raw, options.time_layout())
});
scalar!(DateTime<Utc>, Timestamp, "DateTime<Utc>", |raw, options| {
    parsers::parse_utc_timestamp(raw, options.time_layout())
});

scalar!(Url, Url, "Url", |raw, _options| parsers::parse_url(raw));

scalar!(IpAddr, Ip, "IpAddr", |raw, _options| parsers::parse_ip(raw));
scalar!(Ipv4Addr, Ip, "Ipv4Addr", |raw, _options| parsers::parse_ip(raw));
scalar!(Ipv6Addr, Ip, "Ipv6Addr", |raw, _options| parsers::parse_ip(raw));

bindable_scalar!(
    String,
    i8,
    i16,
    i32,
    i64,
    isize,
    u8,
    u16,
    u32,
    u64,
    usize,
    f32,
    f64,
    bool,
    Vec<u8>,
    Duration,
    DateTime<FixedOffset>,
    DateTime<Utc>,
    Url,
    IpAddr,
    Ipv4Addr,
    Ipv6Addr,
);

// `Vec<u8>` is the byte string, so `u8` has no sequence form.
bindable_sequence!(
    String,
    i8,
    i16,
    i32,
    i64,
    isize,
    u16,
    u32,
    u64,
    usize,
    f32,
    f64,
    bool,
    Vec<u8>,
    Duration,
    DateTime<FixedOffset>,
    DateTime<Utc>,
    Url,
    IpAddr,
    Ipv4Addr,
    Ipv6Addr,
);
