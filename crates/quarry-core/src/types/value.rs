//! The [`Value`] scalar and its operations.

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use crate::error::{CoreError, Result};
use crate::types::{ArithOp, CompareOp, Tristate, TypeId};

/// A typed scalar: a type tag with an optional payload.
///
/// `None` payloads are SQL NULL. A NULL still knows its type, so casting and
/// schema checks work uniformly on present and absent values.
#[derive(Debug, Clone)]
pub enum Value {
    /// Signed 64-bit integer.
    Int(Option<i64>),
    /// IEEE-754 double.
    Decimal(Option<f64>),
    /// Boolean.
    Boolean(Option<bool>),
    /// UTF-8 string.
    String(Option<String>),
}

impl Value {
    /// Creates a non-null integer value.
    #[must_use]
    pub const fn int(value: i64) -> Self {
        Self::Int(Some(value))
    }

    /// Creates a non-null decimal value.
    #[must_use]
    pub const fn decimal(value: f64) -> Self {
        Self::Decimal(Some(value))
    }

    /// Creates a non-null boolean value.
    #[must_use]
    pub const fn boolean(value: bool) -> Self {
        Self::Boolean(Some(value))
    }

    /// Creates a non-null string value.
    #[must_use]
    pub fn string(value: impl Into<String>) -> Self {
        Self::String(Some(value.into()))
    }

    /// Creates a NULL of the given type.
    ///
    /// # Panics
    ///
    /// Panics on [`TypeId::Invalid`]; a value never carries the sentinel type.
    #[must_use]
    pub fn null(type_id: TypeId) -> Self {
        match type_id {
            TypeId::Int => Self::Int(None),
            TypeId::Decimal => Self::Decimal(None),
            TypeId::Boolean => Self::Boolean(None),
            TypeId::String => Self::String(None),
            TypeId::Invalid => panic!("a value cannot be of the invalid type"),
        }
    }

    /// Returns the type tag of this value.
    #[must_use]
    pub const fn type_id(&self) -> TypeId {
        match self {
            Self::Int(_) => TypeId::Int,
            Self::Decimal(_) => TypeId::Decimal,
            Self::Boolean(_) => TypeId::Boolean,
            Self::String(_) => TypeId::String,
        }
    }

    /// Returns `true` when the payload is absent.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(
            self,
            Self::Int(None) | Self::Decimal(None) | Self::Boolean(None) | Self::String(None)
        )
    }

    /// Numeric payload widened to `f64`, when this value is numeric and
    /// non-null.
    #[allow(clippy::cast_precision_loss)]
    fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(Some(v)) => Some(*v as f64),
            Self::Decimal(Some(v)) => Some(*v),
            _ => None,
        }
    }

    /// Casts this value to `target` following the cast matrix.
    ///
    /// Every source type converts to every concrete target type; a NULL casts
    /// to a NULL of the target. String parses fail with
    /// [`CoreError::MalformedLiteral`], casts to [`TypeId::Invalid`] with
    /// [`CoreError::UnsupportedCast`].
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    pub fn cast(&self, target: TypeId) -> Result<Self> {
        if target == TypeId::Invalid {
            return Err(CoreError::UnsupportedCast {
                from: self.type_id(),
                to: target,
            });
        }
        if self.is_null() {
            return Ok(Self::null(target));
        }

        match self {
            Self::Int(Some(v)) => Ok(match target {
                TypeId::Int => self.clone(),
                TypeId::Decimal => Self::decimal(*v as f64),
                TypeId::Boolean => Self::boolean(*v != 0),
                TypeId::String => Self::string(v.to_string()),
                TypeId::Invalid => unreachable!(),
            }),
            Self::Decimal(Some(v)) => Ok(match target {
                // Truncates toward zero.
                TypeId::Int => Self::int(*v as i64),
                TypeId::Decimal => self.clone(),
                TypeId::Boolean => Self::boolean(*v != 0.0),
                TypeId::String => Self::string(v.to_string()),
                TypeId::Invalid => unreachable!(),
            }),
            Self::Boolean(Some(v)) => Ok(match target {
                TypeId::Int => Self::int(i64::from(*v)),
                TypeId::Decimal => Self::decimal(f64::from(u8::from(*v))),
                TypeId::Boolean => self.clone(),
                TypeId::String => Self::string(if *v { "True" } else { "False" }),
                TypeId::Invalid => unreachable!(),
            }),
            Self::String(Some(s)) => match target {
                TypeId::Int => s.parse::<i64>().map(Self::int).map_err(|_| {
                    CoreError::MalformedLiteral {
                        text: s.clone(),
                        target,
                    }
                }),
                TypeId::Decimal => s.parse::<f64>().map(Self::decimal).map_err(|_| {
                    CoreError::MalformedLiteral {
                        text: s.clone(),
                        target,
                    }
                }),
                TypeId::Boolean => match s.to_ascii_lowercase().as_str() {
                    "true" | "1" => Ok(Self::boolean(true)),
                    "false" | "0" => Ok(Self::boolean(false)),
                    _ => Err(CoreError::MalformedLiteral {
                        text: s.clone(),
                        target,
                    }),
                },
                TypeId::String => Ok(self.clone()),
                TypeId::Invalid => unreachable!(),
            },
            _ => unreachable!("null handled above"),
        }
    }

    /// Returns `true` when `self` and `other` can be compared: same type, or
    /// both numeric.
    #[must_use]
    pub const fn is_comparable_with(&self, other: &Self) -> bool {
        let (l, r) = (self.type_id(), other.type_id());
        matches!(
            (self, other),
            (Self::Int(_), Self::Int(_))
                | (Self::Decimal(_), Self::Decimal(_))
                | (Self::Boolean(_), Self::Boolean(_))
                | (Self::String(_), Self::String(_))
        ) || (l.is_numeric() && r.is_numeric())
    }

    /// Three-valued comparison.
    ///
    /// Comparing with a NULL operand yields [`Tristate::Null`]. Numeric
    /// cross-type pairs are promoted to decimal first. Operands outside any
    /// comparable relation are a caller bug and error with
    /// [`CoreError::NotComparable`].
    pub fn compare(&self, other: &Self, op: CompareOp) -> Result<Tristate> {
        if !self.is_comparable_with(other) {
            return Err(CoreError::NotComparable {
                left: self.type_id(),
                right: other.type_id(),
            });
        }
        if self.is_null() || other.is_null() {
            return Ok(Tristate::Null);
        }

        let result = match (self, other) {
            (Self::String(Some(l)), Self::String(Some(r))) => compare_ord(l, r, op),
            (Self::Boolean(Some(l)), Self::Boolean(Some(r))) => compare_ord(l, r, op),
            _ => {
                // Both numeric; promote to decimal. IEEE semantics apply, so
                // a NaN operand compares false under every operator but `!=`.
                let (l, r) = (self.as_f64(), other.as_f64());
                let (Some(l), Some(r)) = (l, r) else {
                    unreachable!("comparable non-null operands");
                };
                match op {
                    CompareOp::Eq => l == r,
                    CompareOp::NotEq => l != r,
                    CompareOp::Lt => l < r,
                    CompareOp::LtEq => l <= r,
                    CompareOp::Gt => l > r,
                    CompareOp::GtEq => l >= r,
                }
            }
        };
        Ok(Tristate::from_bool(result))
    }

    /// Applies `op` to two numeric values.
    ///
    /// The result is always decimal. A NULL operand makes the result a NULL
    /// of the left operand's type. Division by zero yields NaN rather than an
    /// error.
    pub fn arith(&self, other: &Self, op: ArithOp) -> Result<Self> {
        if !(self.type_id().is_numeric() && other.type_id().is_numeric()) {
            return Err(CoreError::NotNumeric {
                left: self.type_id(),
                right: other.type_id(),
            });
        }
        if self.is_null() || other.is_null() {
            return Ok(Self::null(self.type_id()));
        }
        let (Some(l), Some(r)) = (self.as_f64(), other.as_f64()) else {
            unreachable!("numeric non-null operands");
        };
        let result = match op {
            ArithOp::Add => l + r,
            ArithOp::Sub => l - r,
            ArithOp::Mul => l * r,
            ArithOp::Div => {
                if r == 0.0 {
                    f64::NAN
                } else {
                    l / r
                }
            }
        };
        Ok(Self::decimal(result))
    }

    /// Shorthand for [`Value::arith`] with [`ArithOp::Add`].
    pub fn add(&self, other: &Self) -> Result<Self> {
        self.arith(other, ArithOp::Add)
    }

    /// Shorthand for [`Value::arith`] with [`ArithOp::Div`].
    pub fn divide(&self, other: &Self) -> Result<Self> {
        self.arith(other, ArithOp::Div)
    }

    /// Returns the smaller of two comparable values (`self` on ties).
    pub fn min_value(&self, other: &Self) -> Result<Self> {
        match self.compare(other, CompareOp::LtEq)? {
            Tristate::True => Ok(self.clone()),
            _ => Ok(other.clone()),
        }
    }

    /// Returns the larger of two comparable values (`self` on ties).
    pub fn max_value(&self, other: &Self) -> Result<Self> {
        match self.compare(other, CompareOp::GtEq)? {
            Tristate::True => Ok(self.clone()),
            _ => Ok(other.clone()),
        }
    }

    /// Total order used for sorting rows.
    ///
    /// NULL orders before every non-null value. Numeric cross-type pairs use
    /// IEEE total ordering; values of unrelated types order by type rank.
    /// This ordering is deliberately distinct from [`Value::compare`], which
    /// is three-valued.
    #[must_use]
    pub fn ord_cmp(&self, other: &Self) -> Ordering {
        match (self.is_null(), other.is_null()) {
            (true, true) => return Ordering::Equal,
            (true, false) => return Ordering::Less,
            (false, true) => return Ordering::Greater,
            (false, false) => {}
        }
        if let (Some(l), Some(r)) = (self.as_f64(), other.as_f64()) {
            return l.total_cmp(&r);
        }
        match (self, other) {
            (Self::Boolean(Some(l)), Self::Boolean(Some(r))) => l.cmp(r),
            (Self::String(Some(l)), Self::String(Some(r))) => l.cmp(r),
            _ => self.type_id().cmp(&other.type_id()),
        }
    }

    /// Encodes the canonical textual form as UTF-8 bytes.
    ///
    /// NULL serializes to the empty byte string.
    #[must_use]
    pub fn serialize(&self) -> Vec<u8> {
        if self.is_null() {
            Vec::new()
        } else {
            self.to_string().into_bytes()
        }
    }

    /// Decodes UTF-8 bytes into a value of type `target`.
    ///
    /// Empty input decodes to a NULL of the target type; this is how absent
    /// fields in delimited files become typed NULLs, and it means an empty
    /// string cell cannot be distinguished from NULL. Non-empty input is read
    /// as a string and cast to `target`.
    pub fn deserialize(bytes: &[u8], target: TypeId) -> Result<Self> {
        if target == TypeId::Invalid {
            return Err(CoreError::UnsupportedCast {
                from: TypeId::String,
                to: target,
            });
        }
        if bytes.is_empty() {
            return Ok(Self::null(target));
        }
        let text = std::str::from_utf8(bytes).map_err(|_| CoreError::InvalidUtf8)?;
        Self::string(text).cast(target)
    }
}

fn compare_ord<T: Ord + ?Sized>(left: &T, right: &T, op: CompareOp) -> bool {
    let ord = left.cmp(right);
    match op {
        CompareOp::Eq => ord == Ordering::Equal,
        CompareOp::NotEq => ord != Ordering::Equal,
        CompareOp::Lt => ord == Ordering::Less,
        CompareOp::LtEq => ord != Ordering::Greater,
        CompareOp::Gt => ord == Ordering::Greater,
        CompareOp::GtEq => ord != Ordering::Less,
    }
}

impl From<Tristate> for Value {
    /// A tri-state comparison result as a boolean value; `Null` becomes a
    /// NULL boolean.
    fn from(value: Tristate) -> Self {
        Self::Boolean(value.to_bool())
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int(Some(v)) => write!(f, "{v}"),
            Self::Decimal(Some(v)) => write!(f, "{v}"),
            Self::Boolean(Some(v)) => f.write_str(if *v { "True" } else { "False" }),
            Self::String(Some(v)) => f.write_str(v),
            _ => f.write_str("NULL"),
        }
    }
}

/// Structural equality, usable for hash-map keys.
///
/// Decimal payloads compare by bit pattern, so `NaN == NaN` here and
/// `0.0 != -0.0`. SQL comparison semantics live in [`Value::compare`], not in
/// this impl.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Int(l), Self::Int(r)) => l == r,
            (Self::Decimal(l), Self::Decimal(r)) => match (l, r) {
                (Some(l), Some(r)) => l.to_bits() == r.to_bits(),
                (None, None) => true,
                _ => false,
            },
            (Self::Boolean(l), Self::Boolean(r)) => l == r,
            (Self::String(l), Self::String(r)) => l == r,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Self::Int(v) => v.hash(state),
            Self::Decimal(v) => v.map(f64::to_bits).hash(state),
            Self::Boolean(v) => v.hash(state),
            Self::String(v) => v.hash(state),
        }
    }
}
