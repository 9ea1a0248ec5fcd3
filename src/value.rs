use ordered_float::OrderedFloat;
use std::fmt;
use std::sync::Arc;

/// A single cell read out of a store column.
///
/// Floats are wrapped in [`OrderedFloat`] so values are `Eq + Hash` and can be
/// used as lookup keys or collected into sets.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CellValue {
    Int64(i64),
    Float64(OrderedFloat<f64>),
    Boolean(bool),
    String(Arc<str>),
    List(Vec<CellValue>),
    Null,
}

impl CellValue {
    /// Check if the value is null
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Get the type name of the value
    pub fn type_name(&self) -> &'static str {
        match self {
            CellValue::Int64(_) => "Int64",
            CellValue::Float64(_) => "Float64",
            CellValue::Boolean(_) => "Boolean",
            CellValue::String(_) => "String",
            CellValue::List(_) => "List",
            CellValue::Null => "Null",
        }
    }

    /// Numeric view of the cell, if it holds a number
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Int64(i) => Some(*i as f64),
            CellValue::Float64(f) => Some(f.into_inner()),
            _ => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Int64(i) => write!(f, "{}", i),
            CellValue::Float64(v) => write!(f, "{}", v.into_inner()),
            CellValue::Boolean(b) => write!(f, "{}", b),
            CellValue::String(s) => write!(f, "{}", s),
            CellValue::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            CellValue::Null => write!(f, "null"),
        }
    }
}

impl From<i64> for CellValue {
    fn from(v: i64) -> Self {
        CellValue::Int64(v)
    }
}

impl From<f64> for CellValue {
    fn from(v: f64) -> Self {
        CellValue::Float64(OrderedFloat(v))
    }
}

impl From<&str> for CellValue {
    fn from(v: &str) -> Self {
        CellValue::String(Arc::from(v))
    }
}

/// External identifier of a spike-sorted unit.
///
/// Stores assign identifiers as either integers or strings; both compare by
/// exact value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum UnitId {
    Int(i64),
    Str(Arc<str>),
}

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnitId::Int(i) => write!(f, "{}", i),
            UnitId::Str(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for UnitId {
    fn from(v: i64) -> Self {
        UnitId::Int(v)
    }
}

impl From<&str> for UnitId {
    fn from(v: &str) -> Self {
        UnitId::Str(Arc::from(v))
    }
}

impl From<String> for UnitId {
    fn from(v: String) -> Self {
        UnitId::Str(Arc::from(v.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_creation() {
        let v = CellValue::Int64(42);
        assert_eq!(v, CellValue::Int64(42));
        assert!(!v.is_null());
        assert_eq!(v.type_name(), "Int64");
    }

    #[test]
    fn test_null_value() {
        let v = CellValue::Null;
        assert!(v.is_null());
        assert_eq!(v.type_name(), "Null");
        assert_eq!(v.as_f64(), None);
    }

    #[test]
    fn test_float_equality() {
        let v1 = CellValue::from(3.5);
        let v2 = CellValue::from(3.5);
        assert_eq!(v1, v2);
        assert_eq!(v1.as_f64(), Some(3.5));
    }

    #[test]
    fn test_list_display() {
        let list = CellValue::List(vec![
            CellValue::from(0.1),
            CellValue::from(0.2),
            CellValue::from(0.3),
        ]);
        assert_eq!(list.to_string(), "[0.1, 0.2, 0.3]");
    }

    #[test]
    fn test_unit_id_equality() {
        assert_eq!(UnitId::from(7), UnitId::Int(7));
        assert_eq!(UnitId::from("u-3"), UnitId::Str(Arc::from("u-3")));
        assert_ne!(UnitId::from(7), UnitId::from("7"));
    }

    #[test]
    fn test_hash_consistency() {
        use std::collections::HashSet;

        let mut set = HashSet::new();
        set.insert(UnitId::from(42));
        set.insert(UnitId::from("probe-1"));

        assert!(set.contains(&UnitId::Int(42)));
        assert!(set.contains(&UnitId::from("probe-1")));
        assert!(!set.contains(&UnitId::Int(43)));
    }
}
