//! Runtime-typed wire values

use std::borrow::Cow;
use std::fmt;

use bytes::Bytes;

use crate::error::{Result, WireError};
use crate::message::{Message, PropertyMap};
use super::WireType;

/// One value of any wire type
#[derive(Debug, Clone, PartialEq)]
pub enum WireValue {
    Bool(bool),
    Byte(u8),
    /// A single 16-bit code unit
    Char(u16),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    String(String),
    Raw(Bytes),
    Properties(PropertyMap),
    Message(Box<Message>),
    MessageList(Vec<Message>),
}

impl WireValue {
    /// The wire type this value encodes as
    pub fn wire_type(&self) -> WireType {
        match self {
            WireValue::Bool(_) => WireType::Bool,
            WireValue::Byte(_) => WireType::Byte,
            WireValue::Char(_) => WireType::Char,
            WireValue::Short(_) => WireType::Short,
            WireValue::Int(_) => WireType::Int,
            WireValue::Long(_) => WireType::Long,
            WireValue::Float(_) => WireType::Float,
            WireValue::Double(_) => WireType::Double,
            WireValue::String(_) => WireType::String,
            WireValue::Raw(_) => WireType::Raw,
            WireValue::Properties(_) => WireType::PropertyMap,
            WireValue::Message(_) => WireType::Message,
            WireValue::MessageList(_) => WireType::MessageList,
        }
    }

    /// Convert to `ty` when the conversion is lossless
    ///
    /// Integral targets accept any integral value in range (and floats
    /// with no fractional part); float targets accept any number; a
    /// one-unit string becomes a char. Everything else must already
    /// have the requested type.
    pub fn coerce(&self, ty: WireType) -> Result<Cow<'_, WireValue>> {
        if self.wire_type() == ty {
            return Ok(Cow::Borrowed(self));
        }

        let converted = match ty {
            WireType::Byte => WireValue::Byte(self.integral_in(ty, 0, u8::MAX as i64)? as u8),
            WireType::Short => WireValue::Short(
                self.integral_in(ty, i16::MIN as i64, i16::MAX as i64)? as i16,
            ),
            WireType::Int => WireValue::Int(
                self.integral_in(ty, i32::MIN as i64, i32::MAX as i64)? as i32,
            ),
            WireType::Long => WireValue::Long(self.integral(ty)?),
            WireType::Float => WireValue::Float(self.numeric(ty)? as f32),
            WireType::Double => WireValue::Double(self.numeric(ty)?),
            WireType::Char => match self {
                WireValue::String(s) => {
                    let mut units = s.encode_utf16();
                    match (units.next(), units.next()) {
                        (Some(unit), None) => WireValue::Char(unit),
                        _ => return Err(self.out_of_range(ty)),
                    }
                }
                _ => return Err(self.mismatch(ty)),
            },
            _ => return Err(self.mismatch(ty)),
        };

        Ok(Cow::Owned(converted))
    }

    fn integral(&self, ty: WireType) -> Result<i64> {
        match *self {
            WireValue::Byte(v) => Ok(v as i64),
            WireValue::Short(v) => Ok(v as i64),
            WireValue::Int(v) => Ok(v as i64),
            WireValue::Long(v) => Ok(v),
            WireValue::Float(v) => float_to_i64(v as f64).ok_or_else(|| self.out_of_range(ty)),
            WireValue::Double(v) => float_to_i64(v).ok_or_else(|| self.out_of_range(ty)),
            _ => Err(self.mismatch(ty)),
        }
    }

    fn integral_in(&self, ty: WireType, min: i64, max: i64) -> Result<i64> {
        let v = self.integral(ty)?;
        if (min..=max).contains(&v) {
            Ok(v)
        } else {
            Err(self.out_of_range(ty))
        }
    }

    fn numeric(&self, ty: WireType) -> Result<f64> {
        match *self {
            WireValue::Byte(v) => Ok(v as f64),
            WireValue::Short(v) => Ok(v as f64),
            WireValue::Int(v) => Ok(v as f64),
            WireValue::Long(v) => Ok(v as f64),
            WireValue::Float(v) => Ok(v as f64),
            WireValue::Double(v) => Ok(v),
            _ => Err(self.mismatch(ty)),
        }
    }

    fn mismatch(&self, ty: WireType) -> WireError {
        WireError::TypeMismatch {
            expected: ty.tag(),
            actual: self.wire_type().tag(),
        }
    }

    fn out_of_range(&self, ty: WireType) -> WireError {
        WireError::Range {
            wire_type: ty,
            value: self.to_string(),
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn as_bool(&self) -> Option<bool> {
        match *self {
            WireValue::Bool(v) => Some(v),
            _ => None,
        }
    }

    /// Any integral value widened to i64
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            WireValue::Byte(v) => Some(v as i64),
            WireValue::Short(v) => Some(v as i64),
            WireValue::Int(v) => Some(v as i64),
            WireValue::Long(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            WireValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            WireValue::Raw(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_properties(&self) -> Option<&PropertyMap> {
        match self {
            WireValue::Properties(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_message(&self) -> Option<&Message> {
        match self {
            WireValue::Message(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_message_list(&self) -> Option<&[Message]> {
        match self {
            WireValue::MessageList(list) => Some(list),
            _ => None,
        }
    }
}

/// Exact conversion of an integral float
fn float_to_i64(v: f64) -> Option<i64> {
    // 2^63 is the first value past i64::MAX
    if v.is_finite() && v.fract() == 0.0 && v >= i64::MIN as f64 && v < 9_223_372_036_854_775_808.0 {
        Some(v as i64)
    } else {
        None
    }
}

impl fmt::Display for WireValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WireValue::Bool(v) => write!(f, "{}", v),
            WireValue::Byte(v) => write!(f, "{}", v),
            WireValue::Char(v) => match char::from_u32(*v as u32) {
                Some(c) => write!(f, "{:?}", c),
                None => write!(f, "\\u{{{:04x}}}", v),
            },
            WireValue::Short(v) => write!(f, "{}", v),
            WireValue::Int(v) => write!(f, "{}", v),
            WireValue::Long(v) => write!(f, "{}", v),
            WireValue::Float(v) => write!(f, "{}", v),
            WireValue::Double(v) => write!(f, "{}", v),
            WireValue::String(v) => write!(f, "{:?}", v),
            WireValue::Raw(v) => write!(f, "<{} bytes>", v.len()),
            WireValue::Properties(p) => {
                write!(f, "{{")?;
                for (i, (name, value)) in p.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", name, value)?;
                }
                write!(f, "}}")
            }
            WireValue::Message(m) => write!(f, "{}", m),
            WireValue::MessageList(list) => {
                write!(f, "[")?;
                for (i, m) in list.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", m)?;
                }
                write!(f, "]")
            }
        }
    }
}

// =============================================================================
// Conversions
// =============================================================================

macro_rules! impl_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for WireValue {
                fn from(v: $ty) -> Self {
                    WireValue::$variant(v)
                }
            }
        )*
    };
}

impl_from! {
    bool => Bool,
    u8 => Byte,
    i16 => Short,
    i32 => Int,
    i64 => Long,
    f32 => Float,
    f64 => Double,
    String => String,
    Bytes => Raw,
    PropertyMap => Properties,
    Vec<Message> => MessageList,
}

impl From<&str> for WireValue {
    fn from(v: &str) -> Self {
        WireValue::String(v.to_string())
    }
}

impl From<&[u8]> for WireValue {
    fn from(v: &[u8]) -> Self {
        WireValue::Raw(Bytes::copy_from_slice(v))
    }
}

impl From<Message> for WireValue {
    fn from(v: Message) -> Self {
        WireValue::Message(Box::new(v))
    }
}
