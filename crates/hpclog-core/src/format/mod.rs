//! Message formatting
//!
//! Turns a template plus positional [`FormatArg`]s into display text. Values
//! without a native conversion are stringified through
//! [`FormatArg::display`]; for those only width, fill and alignment apply.

mod arg;
mod template;

pub use arg::FormatArg;
pub use template::{join, render};
