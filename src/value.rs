//! SNMP value types.
//!
//! The `Value` enum represents the simple SNMP data types this library
//! reads from and writes to agents.

use crate::oid::Oid;
use bytes::Bytes;

/// SNMP value.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum Value {
    /// BOOLEAN.
    ///
    /// On the wire this is carried as an integer per RFC 1212
    /// (1 = true, 2 = false); transports are expected to do that mapping.
    Boolean(bool),

    /// INTEGER (signed 32-bit)
    Integer(i32),

    /// Signed 64-bit integer (some agents expose these via Opaque wrapping)
    Integer64(i64),

    /// OCTET STRING (arbitrary bytes)
    OctetString(Bytes),

    /// NULL - the placeholder value in request varbinds
    Null,

    /// OBJECT IDENTIFIER
    ObjectIdentifier(Oid),

    /// IpAddress (4 bytes, big-endian)
    IpAddress([u8; 4]),

    /// Gauge32 / Unsigned32 (unsigned 32-bit, non-wrapping)
    Gauge32(u32),

    /// TimeTicks (hundredths of a second)
    TimeTicks(u32),

    /// Counter64 (unsigned 64-bit, wrapping)
    Counter64(u64),
}

impl Value {
    /// Short lowercase name of the value's type, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Boolean(_) => "boolean",
            Value::Integer(_) => "integer",
            Value::Integer64(_) => "integer64",
            Value::OctetString(_) => "octet string",
            Value::Null => "null",
            Value::ObjectIdentifier(_) => "object identifier",
            Value::IpAddress(_) => "ip address",
            Value::Gauge32(_) => "gauge32",
            Value::TimeTicks(_) => "timeticks",
            Value::Counter64(_) => "counter64",
        }
    }

    /// Try to get as bool.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as i32.
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Value::Integer(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as i64.
    ///
    /// Widens [`Value::Integer`] as well as matching [`Value::Integer64`].
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer64(v) => Some(*v),
            Value::Integer(v) => Some(*v as i64),
            _ => None,
        }
    }

    /// Try to get as u32.
    ///
    /// Returns `Some` for [`Value::Gauge32`], [`Value::TimeTicks`], or a
    /// non-negative [`Value::Integer`].
    pub fn as_u32(&self) -> Option<u32> {
        match self {
            Value::Gauge32(v) | Value::TimeTicks(v) => Some(*v),
            Value::Integer(v) if *v >= 0 => Some(*v as u32),
            _ => None,
        }
    }

    /// Try to get as u64.
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Value::Counter64(v) => Some(*v),
            Value::Gauge32(v) | Value::TimeTicks(v) => Some(*v as u64),
            Value::Integer(v) if *v >= 0 => Some(*v as u64),
            _ => None,
        }
    }

    /// Try to get as bytes.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::OctetString(v) => Some(v),
            _ => None,
        }
    }

    /// Try to get as a UTF-8 string slice.
    ///
    /// Returns `None` for non-string values or invalid UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::OctetString(v) => std::str::from_utf8(v).ok(),
            _ => None,
        }
    }

    /// Try to get as an OID.
    pub fn as_oid(&self) -> Option<&Oid> {
        match self {
            Value::ObjectIdentifier(v) => Some(v),
            _ => None,
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Boolean(v) => write!(f, "{}", if *v { "true" } else { "false" }),
            Value::Integer(v) => write!(f, "{}", v),
            Value::Integer64(v) => write!(f, "{}", v),
            Value::OctetString(v) => write!(f, "{}", String::from_utf8_lossy(v)),
            Value::Null => Ok(()),
            Value::ObjectIdentifier(v) => write!(f, "{}", v),
            Value::IpAddress([a, b, c, d]) => write!(f, "{}.{}.{}.{}", a, b, c, d),
            Value::Gauge32(v) => write!(f, "{}", v),
            Value::TimeTicks(v) => write!(f, "{} timeticks (1/100 seconds)", v),
            Value::Counter64(v) => write!(f, "{}", v),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Boolean(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Integer(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer64(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::OctetString(Bytes::copy_from_slice(v.as_bytes()))
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::OctetString(Bytes::from(v.into_bytes()))
    }
}

impl From<Oid> for Value {
    fn from(v: Oid) -> Self {
        Value::ObjectIdentifier(v)
    }
}
