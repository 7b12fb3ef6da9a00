//! Value type definitions.
//!
//! `Value` is one cell of a result row. Values carry a total order so query
//! results can be sorted deterministically, including across numeric types.
//! Numbers of different variants compare by exact numeric value; when the
//! values are equal the variant breaks the tie (Int32 < Int64 < Float64), so
//! `cmp` returns `Equal` exactly when `==` holds.

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};

/// A single cell value.
#[derive(Clone, Debug)]
pub enum Value {
    /// Null value
    Null,
    /// Boolean value
    Boolean(bool),
    /// 32-bit signed integer
    Int32(i32),
    /// 64-bit signed integer
    Int64(i64),
    /// 64-bit floating point
    Float64(f64),
    /// UTF-8 string
    String(String),
    /// DateTime stored as Unix timestamp in milliseconds
    DateTime(i64),
    /// Binary data
    Bytes(Vec<u8>),
}

impl Value {
    /// Returns true if this value is Null.
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the integer value of an Int32 or Int64.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int32(v) => Some(*v as i64),
            Value::Int64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(v) => Some(v.as_str()),
            _ => None,
        }
    }

    /// Returns true if this is a string containing `needle`, ignoring ASCII case.
    ///
    /// An empty needle matches every string.
    pub fn contains_ignore_case(&self, needle: &str) -> bool {
        let Some(haystack) = self.as_str() else {
            return false;
        };
        if needle.is_empty() {
            return true;
        }
        let needle = needle.as_bytes();
        haystack
            .as_bytes()
            .windows(needle.len())
            .any(|window| window.eq_ignore_ascii_case(needle))
    }

    /// Rank among the numeric variants, used to break ties between equal
    /// numbers of different variants.
    fn numeric_rank(&self) -> u8 {
        match self {
            Value::Int32(_) => 0,
            Value::Int64(_) => 1,
            _ => 2,
        }
    }

    /// Compares two numbers by value alone, ignoring the variant.
    ///
    /// Returns None unless both values are numeric. Range filters use this so
    /// an `Int64` bound admits an equal `Int32` or `Float64` cell.
    pub fn cmp_numeric(&self, other: &Value) -> Option<Ordering> {
        let ord = match (self, other) {
            (Value::Int32(a), Value::Int32(b)) => a.cmp(b),
            (Value::Int32(a), Value::Int64(b)) => i64::from(*a).cmp(b),
            (Value::Int64(a), Value::Int32(b)) => a.cmp(&i64::from(*b)),
            (Value::Int64(a), Value::Int64(b)) => a.cmp(b),
            (Value::Int32(a), Value::Float64(b)) => cmp_f64(f64::from(*a), *b),
            (Value::Float64(a), Value::Int32(b)) => cmp_f64(*a, f64::from(*b)),
            (Value::Int64(a), Value::Float64(b)) => cmp_i64_f64(*a, *b),
            (Value::Float64(a), Value::Int64(b)) => cmp_i64_f64(*b, *a).reverse(),
            (Value::Float64(a), Value::Float64(b)) => cmp_f64(*a, *b),
            _ => return None,
        };
        Some(ord)
    }

    /// Rank used to order values of unrelated types.
    fn type_order(&self) -> u8 {
        match self {
            Value::Null => 0,
            Value::Boolean(_) => 1,
            Value::Int32(_) | Value::Int64(_) | Value::Float64(_) => 2,
            Value::String(_) => 3,
            Value::DateTime(_) => 4,
            Value::Bytes(_) => 5,
        }
    }
}

/// NaN sorts after every other number.
fn cmp_f64(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
    }
}

/// 2^63, the first float above every `i64`.
const I64_END: f64 = 9_223_372_036_854_775_808.0;

/// Compares an integer with a float without rounding the integer.
fn cmp_i64_f64(i: i64, f: f64) -> Ordering {
    if f.is_nan() || f >= I64_END {
        return Ordering::Less;
    }
    if f < -I64_END {
        return Ordering::Greater;
    }
    // In range: the cast truncates toward zero and is exact, as is the
    // subtraction of the integer part.
    let whole = f as i64;
    match i.cmp(&whole) {
        Ordering::Equal => cmp_f64(0.0, f - whole as f64),
        unequal => unequal,
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Int32(a), Value::Int32(b)) => a == b,
            (Value::Int64(a), Value::Int64(b)) => a == b,
            (Value::Float64(a), Value::Float64(b)) => (a.is_nan() && b.is_nan()) || a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::DateTime(a), Value::DateTime(b)) => a == b,
            (Value::Bytes(a), Value::Bytes(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        core::mem::discriminant(self).hash(state);
        match self {
            Value::Null => {}
            Value::Boolean(b) => b.hash(state),
            Value::Int32(i) => i.hash(state),
            Value::Int64(i) => i.hash(state),
            // Equal floats hash alike: one NaN, one zero.
            Value::Float64(f) if f.is_nan() => f64::NAN.to_bits().hash(state),
            Value::Float64(f) if *f == 0.0 => 0u64.hash(state),
            Value::Float64(f) => f.to_bits().hash(state),
            Value::String(s) => s.hash(state),
            Value::DateTime(d) => d.hash(state),
            Value::Bytes(b) => b.hash(state),
        }
    }
}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Value::Null, Value::Null) => Ordering::Equal,
            (Value::Boolean(a), Value::Boolean(b)) => a.cmp(b),
            (Value::String(a), Value::String(b)) => a.cmp(b),
            (Value::DateTime(a), Value::DateTime(b)) => a.cmp(b),
            (Value::Bytes(a), Value::Bytes(b)) => a.cmp(b),
            _ => match self.cmp_numeric(other) {
                Some(ord) => ord.then_with(|| self.numeric_rank().cmp(&other.numeric_rank())),
                None => self.type_order().cmp(&other.type_order()),
            },
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "NULL"),
            Value::Boolean(v) => write!(f, "{}", v),
            Value::Int32(v) => write!(f, "{}", v),
            Value::Int64(v) => write!(f, "{}", v),
            Value::Float64(v) => write!(f, "{}", v),
            Value::String(v) => write!(f, "{:?}", v),
            Value::DateTime(v) => write!(f, "@{}", v),
            Value::Bytes(v) => write!(f, "<{} bytes>", v.len()),
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
        Value::Int32(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int64(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float64(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Bytes(v)
    }
}

impl<T> From<Option<T>> for Value
where
    T: Into<Value>,
{
    fn from(v: Option<T>) -> Self {
        match v {
            Some(val) => val.into(),
            None => Value::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;
    use alloc::vec;

    #[test]
    fn test_value_accessors() {
        assert!(Value::Null.is_null());
        assert_eq!(Value::Int32(42).as_i64(), Some(42));
        assert_eq!(Value::Int64(100).as_i64(), Some(100));
        assert_eq!(Value::Float64(2.5).as_i64(), None);
        assert_eq!(Value::String("Kind of Blue".into()).as_str(), Some("Kind of Blue"));
        assert_eq!(Value::Null.as_str(), None);
    }

    #[test]
    fn test_value_equality() {
        assert_eq!(Value::Int32(42), Value::Int32(42));
        assert_ne!(Value::Int32(42), Value::Int64(42));
        assert_eq!(Value::Float64(f64::NAN), Value::Float64(f64::NAN));
        assert_eq!(Value::Null, Value::Null);
    }

    #[test]
    fn test_value_ordering() {
        assert!(Value::Int32(1) < Value::Int32(2));
        assert!(Value::String("Coltrane".into()) < Value::String("Davis".into()));
        assert!(Value::Null < Value::Boolean(false));
        assert!(Value::Boolean(true) < Value::Int32(0));
        assert!(Value::Int64(100) < Value::String("1".into()));
    }

    #[test]
    fn test_value_cross_numeric_ordering() {
        assert!(Value::Int32(1) < Value::Int64(2));
        assert!(Value::Int64(3) > Value::Float64(2.5));
        assert!(Value::Float64(f64::NAN) > Value::Int64(i64::MAX));
        assert!(Value::Float64(-1e300) < Value::Int64(i64::MIN));
        assert!(Value::Float64(1e300) > Value::Int64(i64::MAX));
        assert!(Value::Float64(-2.5) < Value::Int64(-2));
        assert!(Value::Float64(-1.5) > Value::Int64(-2));
    }

    #[test]
    fn test_cross_numeric_order_is_exact_past_2_pow_53() {
        let big = 1i64 << 53;
        assert!(Value::Int64(big + 1) > Value::Float64(big as f64));
        assert!(Value::Float64(big as f64) < Value::Int64(big + 1));
        assert!(Value::Float64(big as f64) > Value::Int64(big));
        assert!(Value::Int64(big + 1) > Value::Int64(big));
        assert!(Value::Int64(i64::MAX) < Value::Float64(I64_END));
    }

    #[test]
    fn test_ord_agrees_with_eq() {
        assert_ne!(Value::Int32(2), Value::Int64(2));
        assert_ne!(Value::Int32(2).cmp(&Value::Int64(2)), Ordering::Equal);
        assert!(Value::Int32(2) < Value::Int64(2));
        assert!(Value::Int64(2) < Value::Float64(2.0));
        assert!(Value::Float64(2.0) < Value::Int32(3));
        assert_eq!(Value::Float64(0.0).cmp(&Value::Float64(-0.0)), Ordering::Equal);
        assert_eq!(Value::Float64(0.0), Value::Float64(-0.0));
        assert_eq!(Value::Int32(2).cmp_numeric(&Value::Float64(2.0)), Some(Ordering::Equal));
        assert_eq!(Value::Int32(2).cmp_numeric(&Value::String("2".into())), None);
    }

    #[test]
    fn test_mixed_numeric_sort_is_consistent() {
        let big = 1i64 << 53;
        let mut values = vec![
            Value::Float64(big as f64),
            Value::Int64(big + 1),
            Value::Int32(2),
            Value::Int64(big),
            Value::Float64(2.0),
            Value::Int64(2),
            Value::Float64(f64::NAN),
        ];
        values.sort();
        assert_eq!(
            values,
            vec![
                Value::Int32(2),
                Value::Int64(2),
                Value::Float64(2.0),
                Value::Int64(big),
                Value::Float64(big as f64),
                Value::Int64(big + 1),
                Value::Float64(f64::NAN),
            ]
        );
        for pair in values.windows(2) {
            assert_eq!(pair[0].cmp(&pair[1]), Ordering::Less);
            assert_eq!(pair[1].cmp(&pair[0]), Ordering::Greater);
        }
    }

    #[test]
    fn test_contains_ignore_case() {
        let title = Value::String("A Love Supreme".into());
        assert!(title.contains_ignore_case("love"));
        assert!(title.contains_ignore_case("SUPREME"));
        assert!(title.contains_ignore_case(""));
        assert!(!title.contains_ignore_case("hate"));
        assert!(!Value::Int64(1).contains_ignore_case("1"));
    }

    #[test]
    fn test_value_display() {
        assert_eq!(format!("{}", Value::Null), "NULL");
        assert_eq!(format!("{}", Value::Int64(7)), "7");
        assert_eq!(format!("{}", Value::String("x".into())), "\"x\"");
    }

    #[test]
    fn test_value_from_impls() {
        let v: Value = 42i32.into();
        assert_eq!(v.as_i64(), Some(42));

        let v: Value = "Giant Steps".into();
        assert_eq!(v.as_str(), Some("Giant Steps"));

        let v: Value = Some(100i64).into();
        assert_eq!(v.as_i64(), Some(100));

        let v: Value = None::<i32>.into();
        assert!(v.is_null());
    }
}
