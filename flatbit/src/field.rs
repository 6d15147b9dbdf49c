use crate::UnknownField;
use chrono::NaiveDate;
use std::fmt::{self, Debug, Display};
use std::str::FromStr;

/// Value of a single record field, as seen by the property matcher.
///
/// Integers of every width collapse into `Int`, so a `u8` age matches `FieldValue::from(34)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldValue {
    Int(i64),
    Text(String),
    Date(NaiveDate),
    Null,
}

impl Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Int(i) => write!(f, "{}", i),
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Date(d) => write!(f, "{}", d),
            FieldValue::Null => f.write_str("-"),
        }
    }
}

/// Conversion used by `#[derive(Fields)]` to expose a struct field to the matcher.
pub trait ToFieldValue {
    fn to_field_value(&self) -> FieldValue;
}

macro_rules! impl_int_field_value {
    ($($t:ty),*) => {
        $(
            impl ToFieldValue for $t {
                fn to_field_value(&self) -> FieldValue {
                    FieldValue::Int(*self as i64)
                }
            }

            impl From<$t> for FieldValue {
                fn from(value: $t) -> Self {
                    FieldValue::Int(value as i64)
                }
            }
        )*
    };
}

impl_int_field_value!(u8, u16, u32, i8, i16, i32, i64);

impl ToFieldValue for String {
    fn to_field_value(&self) -> FieldValue {
        FieldValue::Text(self.clone())
    }
}

impl ToFieldValue for NaiveDate {
    fn to_field_value(&self) -> FieldValue {
        FieldValue::Date(*self)
    }
}

impl<T: ToFieldValue> ToFieldValue for Option<T> {
    fn to_field_value(&self) -> FieldValue {
        match self {
            Some(value) => value.to_field_value(),
            None => FieldValue::Null,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<NaiveDate> for FieldValue {
    fn from(value: NaiveDate) -> Self {
        FieldValue::Date(value)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(FieldValue::Null)
    }
}

/// Compile-time field selector of a record type, normally derived with `#[derive(Fields)]`.
pub trait Fields {
    type Field: Copy + Debug + Eq + Display + FromStr<Err = UnknownField> + 'static;

    fn field_value(&self, field: Self::Field) -> FieldValue;

    fn matches(&self, field: Self::Field, value: &FieldValue) -> bool {
        self.field_value(field) == *value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers_compare_across_widths() {
        assert_eq!(34u8.to_field_value(), FieldValue::from(34));
        assert_eq!(7u32.to_field_value(), FieldValue::from(7i64));
        assert_ne!(7u32.to_field_value(), FieldValue::from("7"));
    }

    #[test]
    fn absent_options_are_null() {
        let none: Option<NaiveDate> = None;
        assert_eq!(none.to_field_value(), FieldValue::Null);
        assert_eq!(FieldValue::from(None::<String>), FieldValue::Null);
        assert_eq!(Some("J45".to_string()).to_field_value(), FieldValue::from("J45"));
    }
}
