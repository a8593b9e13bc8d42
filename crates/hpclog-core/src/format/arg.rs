//! Positional argument values accepted by the template renderer

use std::fmt;

/// One positional argument
///
/// Numbers, booleans and characters keep their type so numeric format specs
/// apply to them. Anything else goes through [`FormatArg::display`] and
/// becomes text.
#[derive(Debug, Clone, PartialEq)]
pub enum FormatArg {
    Signed(i64),
    Unsigned(u64),
    Float(f64),
    Bool(bool),
    Char(char),
    Text(String),
}

impl FormatArg {
    /// Fallback for types without a native conversion
    ///
    /// The value is stringified up front, so numeric presentation types
    /// (`x`, `e`, `+`, `0`, ...) are rejected for it later instead of being
    /// applied to the string.
    pub fn display(value: &impl fmt::Display) -> Self {
        FormatArg::Text(value.to_string())
    }

    /// Same as [`FormatArg::display`] for `Debug`-only types
    pub fn debug(value: &impl fmt::Debug) -> Self {
        FormatArg::Text(format!("{:?}", value))
    }

    pub(crate) fn type_name(&self) -> &'static str {
        match self {
            FormatArg::Signed(_) | FormatArg::Unsigned(_) => "integer",
            FormatArg::Float(_) => "floating-point",
            FormatArg::Bool(_) => "bool",
            FormatArg::Char(_) => "char",
            FormatArg::Text(_) => "text",
        }
    }
}

impl fmt::Display for FormatArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatArg::Signed(v) => write!(f, "{}", v),
            FormatArg::Unsigned(v) => write!(f, "{}", v),
            FormatArg::Float(v) => write!(f, "{}", v),
            FormatArg::Bool(v) => write!(f, "{}", v),
            FormatArg::Char(v) => write!(f, "{}", v),
            FormatArg::Text(v) => f.write_str(v),
        }
    }
}

macro_rules! impl_from {
    ($variant:ident as $target:ty: $($source:ty),+) => {
        $(
            impl From<$source> for FormatArg {
                fn from(value: $source) -> Self {
                    FormatArg::$variant(value as $target)
                }
            }
        )+
    };
}

impl_from!(Signed as i64: i8, i16, i32, i64, isize);
impl_from!(Unsigned as u64: u8, u16, u32, u64, usize);
impl_from!(Float as f64: f32, f64);

impl From<bool> for FormatArg {
    fn from(value: bool) -> Self {
        FormatArg::Bool(value)
    }
}

impl From<char> for FormatArg {
    fn from(value: char) -> Self {
        FormatArg::Char(value)
    }
}

impl From<&str> for FormatArg {
    fn from(value: &str) -> Self {
        FormatArg::Text(value.to_string())
    }
}

impl From<String> for FormatArg {
    fn from(value: String) -> Self {
        FormatArg::Text(value)
    }
}

impl From<&String> for FormatArg {
    fn from(value: &String) -> Self {
        FormatArg::Text(value.clone())
    }
}

impl From<&std::path::Path> for FormatArg {
    fn from(value: &std::path::Path) -> Self {
        FormatArg::Text(value.display().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversions_keep_numeric_types() {
        assert_eq!(FormatArg::from(-3i32), FormatArg::Signed(-3));
        assert_eq!(FormatArg::from(7usize), FormatArg::Unsigned(7));
        assert_eq!(FormatArg::from(1.5f32), FormatArg::Float(1.5));
        assert_eq!(FormatArg::from("x"), FormatArg::Text("x".to_string()));
    }

    #[test]
    fn test_display_fallback_is_text() {
        struct Vec3(f64, f64, f64);
        impl fmt::Display for Vec3 {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "({}, {}, {})", self.0, self.1, self.2)
            }
        }

        let arg = FormatArg::display(&Vec3(1.0, 2.5, 3.0));
        assert_eq!(arg, FormatArg::Text("(1, 2.5, 3)".to_string()));
        assert_eq!(arg.type_name(), "text");
    }

    #[test]
    fn test_debug_fallback() {
        let arg = FormatArg::debug(&vec![1, 2]);
        assert_eq!(arg.to_string(), "[1, 2]");
    }
}
