// f90defaults/src/fortran_types/conversion.rs

//! Conversions from common Rust types into FortranValue.

use super::value::FortranValue;

impl From<i32> for FortranValue {
    fn from(value: i32) -> Self {
        FortranValue::Integer(value as i64)
    }
}

impl From<i64> for FortranValue {
    fn from(value: i64) -> Self {
        FortranValue::Integer(value)
    }
}

impl From<f64> for FortranValue {
    fn from(value: f64) -> Self {
        FortranValue::Real(value)
    }
}

impl From<bool> for FortranValue {
    fn from(value: bool) -> Self {
        FortranValue::Logical(value)
    }
}

impl From<String> for FortranValue {
    fn from(value: String) -> Self {
        FortranValue::Character(value)
    }
}

impl From<&str> for FortranValue {
    fn from(value: &str) -> Self {
        FortranValue::Character(value.to_string())
    }
}

impl From<Vec<FortranValue>> for FortranValue {
    fn from(value: Vec<FortranValue>) -> Self {
        FortranValue::Array(value)
    }
}

impl From<Vec<i64>> for FortranValue {
    fn from(values: Vec<i64>) -> Self {
        FortranValue::Array(values.into_iter().map(FortranValue::from).collect())
    }
}

impl From<Vec<f64>> for FortranValue {
    fn from(values: Vec<f64>) -> Self {
        FortranValue::Array(values.into_iter().map(FortranValue::from).collect())
    }
}

impl From<Vec<bool>> for FortranValue {
    fn from(values: Vec<bool>) -> Self {
        FortranValue::Array(values.into_iter().map(FortranValue::from).collect())
    }
}

impl From<Vec<&str>> for FortranValue {
    fn from(values: Vec<&str>) -> Self {
        FortranValue::Array(values.into_iter().map(FortranValue::from).collect())
    }
}
