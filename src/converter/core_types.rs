use uuid::Uuid;

use super::{ConversionError, FromSqlText, ToSqlText, not_null};

macro_rules! parsed_type {
    ($($ty:ty),+) => {
        $(
            impl FromSqlText for $ty {
                fn from_sql_text(value: Option<&str>) -> Result<Self, ConversionError> {
                    let value = not_null(value, stringify!($ty))?;

                    value.parse::<$ty>().map_err(|e| {
                        ConversionError::nest(
                            &format!("Could not parse '{}' to {}", value, stringify!($ty)),
                            Box::new(e),
                        )
                    })
                }
            }

            impl ToSqlText for $ty {
                fn to_sql_text(&self) -> Option<String> {
                    Some(self.to_string())
                }
            }
        )+
    };
}

parsed_type!(i16, i32, i64, u32);

impl FromSqlText for f32 {
    fn from_sql_text(value: Option<&str>) -> Result<Self, ConversionError> {
        match not_null(value, "f32")? {
            "NaN" => Ok(f32::NAN),
            "Infinity" => Ok(f32::INFINITY),
            "-Infinity" => Ok(f32::NEG_INFINITY),
            value => value.parse::<f32>().map_err(|e| float_error(value, e)),
        }
    }
}

impl FromSqlText for f64 {
    fn from_sql_text(value: Option<&str>) -> Result<Self, ConversionError> {
        match not_null(value, "f64")? {
            "NaN" => Ok(f64::NAN),
            "Infinity" => Ok(f64::INFINITY),
            "-Infinity" => Ok(f64::NEG_INFINITY),
            value => value.parse::<f64>().map_err(|e| float_error(value, e)),
        }
    }
}

fn float_error(value: &str, error: std::num::ParseFloatError) -> ConversionError {
    ConversionError::nest(&format!("Could not parse '{value}' to float"), Box::new(error))
}

impl ToSqlText for f32 {
    fn to_sql_text(&self) -> Option<String> {
        Some(float_to_sql(f64::from(*self), self.to_string()))
    }
}

impl ToSqlText for f64 {
    fn to_sql_text(&self) -> Option<String> {
        Some(float_to_sql(*self, self.to_string()))
    }
}

fn float_to_sql(value: f64, text: String) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value == f64::INFINITY {
        "Infinity".to_string()
    } else if value == f64::NEG_INFINITY {
        "-Infinity".to_string()
    } else {
        text
    }
}

impl FromSqlText for bool {
    fn from_sql_text(value: Option<&str>) -> Result<Self, ConversionError> {
        match not_null(value, "bool")? {
            "t" => Ok(true),
            "f" => Ok(false),
            value => Err(ConversionError::raise(&format!(
                "Could not parse '{value}' to boolean"
            ))),
        }
    }
}

impl ToSqlText for bool {
    fn to_sql_text(&self) -> Option<String> {
        Some(if *self { "t" } else { "f" }.to_string())
    }
}

impl FromSqlText for String {
    fn from_sql_text(value: Option<&str>) -> Result<Self, ConversionError> {
        not_null(value, "String").map(str::to_string)
    }
}

impl ToSqlText for String {
    fn to_sql_text(&self) -> Option<String> {
        Some(self.clone())
    }
}

impl ToSqlText for str {
    fn to_sql_text(&self) -> Option<String> {
        Some(self.to_string())
    }
}

impl FromSqlText for Uuid {
    fn from_sql_text(value: Option<&str>) -> Result<Self, ConversionError> {
        let value = not_null(value, "Uuid")?;

        Uuid::parse_str(value).map_err(|e| {
            ConversionError::nest(&format!("Could not parse '{value}' to uuid"), Box::new(e))
        })
    }
}

impl ToSqlText for Uuid {
    fn to_sql_text(&self) -> Option<String> {
        Some(self.hyphenated().to_string())
    }
}

impl FromSqlText for serde_json::Value {
    fn from_sql_text(value: Option<&str>) -> Result<Self, ConversionError> {
        let value = not_null(value, "json")?;

        serde_json::from_str(value).map_err(|e| {
            ConversionError::nest(&format!("Could not parse '{value}' to json"), Box::new(e))
        })
    }
}

impl ToSqlText for serde_json::Value {
    fn to_sql_text(&self) -> Option<String> {
        Some(self.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_i64_from() {
        let values = &[
            ("0", 0),
            ("1", 1),
            ("-1", -1),
            ("9223372036854775807", i64::MAX),
            ("-9223372036854775808", i64::MIN),
        ];

        for (i, o) in values {
            assert_eq!(*o, i64::from_sql_text(Some(*i)).unwrap())
        }

        let values = ["0 1", "1A2", "1,2", "1.2", "'123'", "", " 100 "];

        for v in values {
            assert!(i64::from_sql_text(Some(v)).is_err(), "'{v}' is not an i64");
        }
    }

    #[test]
    fn integer_null() {
        assert!(i32::from_sql_text(None).is_err());
        assert_eq!(None, Option::<i32>::from_sql_text(None).unwrap());
        assert_eq!(Some(12), Option::<i32>::from_sql_text(Some("12")).unwrap());
    }

    #[test]
    fn integer_out_of_range() {
        assert!(i16::from_sql_text(Some("40000")).is_err());
        assert_eq!(40000, i32::from_sql_text(Some("40000")).unwrap());
    }

    #[test]
    fn boolean_from() {
        assert!(bool::from_sql_text(Some("t")).unwrap());
        assert!(!bool::from_sql_text(Some("f")).unwrap());

        let values = [
            "tf", "T", "F", "true", "false", "'true'", "'false'", "0", "1", "",
        ];

        for v in values {
            assert!(bool::from_sql_text(Some(v)).is_err(), "'{v}' is not a bool");
        }
    }

    #[test]
    fn float_from() {
        assert_eq!(1.5, f64::from_sql_text(Some("1.5")).unwrap());
        assert_eq!(-2.0, f32::from_sql_text(Some("-2")).unwrap());
        // Just below the midpoint of two f32 values, rounds down in one step.
        assert_eq!(
            1.000_000_119_209_289_550_781_25_f32,
            f32::from_sql_text(Some("1.00000017881393432617187499")).unwrap()
        );
        assert_eq!(
            f32::NEG_INFINITY,
            f32::from_sql_text(Some("-Infinity")).unwrap()
        );
        assert!(f32::from_sql_text(Some("NaN")).unwrap().is_nan());
        assert_eq!(
            f64::INFINITY,
            f64::from_sql_text(Some("Infinity")).unwrap()
        );
        assert!(f64::from_sql_text(Some("NaN")).unwrap().is_nan());
        assert!(f64::from_sql_text(Some("one")).is_err());
    }

    #[test]
    fn string_from() {
        let values = ["ab cd", " ab cd ", "I ❤️ 🦀", ""];

        for v in values {
            assert_eq!(v.to_string(), String::from_sql_text(Some(v)).unwrap())
        }

        assert!(String::from_sql_text(None).is_err());
    }

    #[test]
    fn uuid_from() {
        let uuid = Uuid::new_v4();

        assert_eq!(
            uuid,
            Uuid::from_sql_text(Some(&uuid.hyphenated().to_string())).unwrap()
        );
        assert!(Uuid::from_sql_text(Some("not-a-uuid")).is_err());
    }

    #[test]
    fn json_from() {
        let value = serde_json::Value::from_sql_text(Some(r#"{"a": [1, 2]}"#)).unwrap();

        assert_eq!(serde_json::json!({"a": [1, 2]}), value);
        assert!(serde_json::Value::from_sql_text(Some("{")).is_err());
    }

    #[test]
    fn to_sql_text() {
        assert_eq!(Some("42".to_string()), 42_i32.to_sql_text());
        assert_eq!(Some("t".to_string()), true.to_sql_text());
        assert_eq!(Some("f".to_string()), false.to_sql_text());
        assert_eq!(Some("text".to_string()), "text".to_sql_text());
        assert_eq!(Some("NaN".to_string()), f64::NAN.to_sql_text());
        assert_eq!(None, Option::<i32>::None.to_sql_text());
        assert_eq!(Some("1".to_string()), Some(1_i64).to_sql_text());
    }
}
