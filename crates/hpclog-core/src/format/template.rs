//! Runtime template rendering
//!
//! Templates use the familiar `{}` syntax: `{{`/`}}` escape braces, `{}` takes
//! the next argument, `{N}` a specific one, and `{:spec}` accepts
//! `[[fill]align][sign]['#']['0'][width]['.'precision][type]` with align in
//! `< > ^` and type in `? s d x X o b e E f`. Width and precision must be
//! literal numbers no larger than `u16::MAX`.

use crate::error::{RenderError, RenderErrorKind};

use super::arg::FormatArg;

/// Render `template` with positional `args`
///
/// Every argument must be consumed; a mismatch in either direction is an
/// error rather than truncated or padded output.
pub fn render(template: &str, args: &[FormatArg]) -> Result<String, RenderError> {
    render_fields(template, args).map_err(|kind| RenderError {
        template: template.to_string(),
        args: args.iter().map(ToString::to_string).collect(),
        kind,
    })
}

/// Stringify `args` and join them with single spaces
pub fn join(args: &[FormatArg]) -> String {
    args.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

fn render_fields(template: &str, args: &[FormatArg]) -> Result<String, RenderErrorKind> {
    let mut out = String::with_capacity(template.len() + 8 * args.len());
    let mut used = vec![false; args.len()];
    let mut next_implicit = 0;
    let mut chars = template.char_indices().peekable();

    while let Some((pos, c)) = chars.next() {
        match c {
            '{' => {
                if chars.next_if(|&(_, c)| c == '{').is_some() {
                    out.push('{');
                    continue;
                }

                let start = pos + 1;
                let end = template[start..]
                    .find('}')
                    .map(|i| start + i)
                    .ok_or(RenderErrorKind::Unterminated(pos))?;
                let field = &template[start..end];
                if field.contains('{') {
                    return Err(RenderErrorKind::InvalidSpec(field.to_string()));
                }
                while chars.next_if(|&(i, _)| i <= end).is_some() {}

                let (index_part, spec_part) = field.split_once(':').unwrap_or((field, ""));
                let index = if index_part.is_empty() {
                    next_implicit += 1;
                    next_implicit - 1
                } else {
                    index_part
                        .trim()
                        .parse::<usize>()
                        .map_err(|_| RenderErrorKind::InvalidSpec(field.to_string()))?
                };
                let arg = args.get(index).ok_or(RenderErrorKind::IndexOutOfRange {
                    index,
                    count: args.len(),
                })?;
                used[index] = true;

                Spec::parse(spec_part)?.write(arg, &mut out)?;
            }
            '}' => {
                if chars.next_if(|&(_, c)| c == '}').is_none() {
                    return Err(RenderErrorKind::UnmatchedClose(pos));
                }
                out.push('}');
            }
            c => out.push(c),
        }
    }

    match used.iter().filter(|u| !**u).count() {
        0 => Ok(out),
        unused => Err(RenderErrorKind::UnusedArguments { unused }),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Align {
    Left,
    Right,
    Center,
}

impl Align {
    fn from_char(c: char) -> Option<Self> {
        match c {
            '<' => Some(Align::Left),
            '>' => Some(Align::Right),
            '^' => Some(Align::Center),
            _ => None,
        }
    }
}

#[derive(Debug)]
struct Spec<'a> {
    raw: &'a str,
    fill: char,
    align: Option<Align>,
    plus: bool,
    alternate: bool,
    zero: bool,
    width: usize,
    precision: Option<usize>,
    ty: Option<char>,
}

/// Sign/prefix and body kept apart so zero padding lands between them
struct Rendered {
    prefix: String,
    body: String,
    numeric: bool,
}

impl<'a> Spec<'a> {
    fn parse(raw: &'a str) -> Result<Self, RenderErrorKind> {
        let invalid = || RenderErrorKind::InvalidSpec(raw.to_string());
        let chars: Vec<char> = raw.chars().collect();
        let mut spec = Spec {
            raw,
            fill: ' ',
            align: None,
            plus: false,
            alternate: false,
            zero: false,
            width: 0,
            precision: None,
            ty: None,
        };
        let mut i = 0;

        if let Some(align) = chars.get(1).copied().and_then(Align::from_char) {
            spec.fill = chars[0];
            spec.align = Some(align);
            i = 2;
        } else if let Some(align) = chars.first().copied().and_then(Align::from_char) {
            spec.align = Some(align);
            i = 1;
        }

        match chars.get(i) {
            Some('+') => {
                spec.plus = true;
                i += 1;
            }
            Some('-') => i += 1,
            _ => {}
        }
        if chars.get(i) == Some(&'#') {
            spec.alternate = true;
            i += 1;
        }
        if chars.get(i) == Some(&'0') {
            spec.zero = true;
            i += 1;
        }

        let (width, after) = take_number(&chars, i);
        if let Some(digits) = width {
            spec.width = bounded(&digits).ok_or_else(invalid)?;
        }
        i = after;

        if chars.get(i) == Some(&'.') {
            let (precision, after) = take_number(&chars, i + 1);
            spec.precision = Some(precision.as_deref().and_then(bounded).ok_or_else(invalid)?);
            i = after;
        }

        match &chars[i..] {
            [] => {}
            [ty] if "?sdxXobeEf".contains(*ty) => spec.ty = Some(*ty),
            _ => return Err(invalid()),
        }

        Ok(spec)
    }

    fn incompatible(&self, arg: &FormatArg) -> RenderErrorKind {
        RenderErrorKind::Incompatible {
            spec: self.raw.to_string(),
            arg_type: arg.type_name(),
        }
    }

    fn sign(&self, negative: bool) -> &'static str {
        if negative {
            "-"
        } else if self.plus {
            "+"
        } else {
            ""
        }
    }

    fn render_integer(&self, arg: &FormatArg, negative: bool, magnitude: u64) -> Result<Rendered, RenderErrorKind> {
        if self.precision.is_some() {
            return Err(self.incompatible(arg));
        }
        let (radix_prefix, body) = match self.ty {
            None | Some('d') | Some('?') => ("", magnitude.to_string()),
            Some('x') => ("0x", format!("{:x}", magnitude)),
            Some('X') => ("0x", format!("{:X}", magnitude)),
            Some('o') => ("0o", format!("{:o}", magnitude)),
            Some('b') => ("0b", format!("{:b}", magnitude)),
            Some(_) => return Err(self.incompatible(arg)),
        };
        let mut prefix = self.sign(negative).to_string();
        if self.alternate {
            prefix.push_str(radix_prefix);
        }
        Ok(Rendered { prefix, body, numeric: true })
    }

    fn render_float(&self, arg: &FormatArg, value: f64) -> Result<Rendered, RenderErrorKind> {
        let negative = value.is_sign_negative() && !value.is_nan();
        let magnitude = value.abs();
        let body = match (self.ty, self.precision) {
            (None, None) => format!("{}", magnitude),
            (None, Some(p)) | (Some('f'), Some(p)) => format!("{:.*}", p, magnitude),
            (Some('f'), None) => format!("{:.6}", magnitude),
            (Some('e'), None) => format!("{:e}", magnitude),
            (Some('e'), Some(p)) => format!("{:.*e}", p, magnitude),
            (Some('E'), None) => format!("{:E}", magnitude),
            (Some('E'), Some(p)) => format!("{:.*E}", p, magnitude),
            (Some('?'), None) => format!("{:?}", magnitude),
            (Some('?'), Some(p)) => format!("{:.*?}", p, magnitude),
            _ => return Err(self.incompatible(arg)),
        };
        Ok(Rendered {
            prefix: self.sign(negative).to_string(),
            body,
            numeric: true,
        })
    }

    fn render_text(&self, arg: &FormatArg, text: &str, debug: String) -> Result<Rendered, RenderErrorKind> {
        if self.plus || self.zero || self.alternate {
            return Err(self.incompatible(arg));
        }
        let body = match self.ty {
            None | Some('s') => match self.precision {
                Some(p) => text.chars().take(p).collect(),
                None => text.to_string(),
            },
            Some('?') if self.precision.is_none() => debug,
            _ => return Err(self.incompatible(arg)),
        };
        Ok(Rendered { prefix: String::new(), body, numeric: false })
    }

    fn write(&self, arg: &FormatArg, out: &mut String) -> Result<(), RenderErrorKind> {
        let rendered = match arg {
            FormatArg::Signed(v) => self.render_integer(arg, *v < 0, v.unsigned_abs())?,
            FormatArg::Unsigned(v) => self.render_integer(arg, false, *v)?,
            FormatArg::Float(v) => self.render_float(arg, *v)?,
            FormatArg::Bool(v) => self.render_text(arg, if *v { "true" } else { "false" }, v.to_string())?,
            FormatArg::Char(v) => self.render_text(arg, &v.to_string(), format!("{:?}", v))?,
            FormatArg::Text(v) => self.render_text(arg, v, format!("{:?}", v))?,
        };

        let len = rendered.prefix.chars().count() + rendered.body.chars().count();
        let pad = self.width.saturating_sub(len);

        if pad > 0 && self.zero && rendered.numeric {
            out.push_str(&rendered.prefix);
            out.extend(std::iter::repeat('0').take(pad));
            out.push_str(&rendered.body);
            return Ok(());
        }

        let align = self
            .align
            .unwrap_or(if rendered.numeric { Align::Right } else { Align::Left });
        let (before, after) = match align {
            Align::Left => (0, pad),
            Align::Right => (pad, 0),
            Align::Center => (pad / 2, pad - pad / 2),
        };
        out.extend(std::iter::repeat(self.fill).take(before));
        out.push_str(&rendered.prefix);
        out.push_str(&rendered.body);
        out.extend(std::iter::repeat(self.fill).take(after));
        Ok(())
    }
}

/// Digits starting at `start`, and the index just past them
fn take_number(chars: &[char], start: usize) -> (Option<String>, usize) {
    let end = chars[start.min(chars.len())..]
        .iter()
        .position(|c| !c.is_ascii_digit())
        .map_or(chars.len(), |p| start + p);
    if end <= start {
        return (None, start);
    }
    (Some(chars[start..end].iter().collect()), end)
}

/// Width or precision, capped at `u16::MAX` like `std::fmt`
fn bounded(digits: &str) -> Option<usize> {
    digits.parse::<u16>().ok().map(usize::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok(template: &str, args: &[FormatArg]) -> String {
        render(template, args).unwrap()
    }

    fn kind(template: &str, args: &[FormatArg]) -> RenderErrorKind {
        render(template, args).unwrap_err().kind
    }

    #[test]
    fn test_alignment() {
        assert_eq!(ok("Test, {:>3}", &[1.into()]), "Test,   1");
        assert_eq!(ok("Left aligned: {:<10}|", &[42.into()]), "Left aligned: 42        |");
        assert_eq!(ok("Right aligned: {:>10}", &[42.into()]), "Right aligned:         42");
        assert_eq!(ok("Center aligned: {:^10}|", &[42.into()]), "Center aligned:     42    |");
    }

    #[test]
    fn test_default_alignment_by_type() {
        assert_eq!(ok("[{:5}]", &[7.into()]), "[    7]");
        assert_eq!(ok("[{:5}]", &["ab".into()]), "[ab   ]");
    }

    #[test]
    fn test_fill_sign_and_zero() {
        assert_eq!(ok("{:*^7}", &["mid".into()]), "**mid**");
        assert_eq!(ok("{:+}", &[5.into()]), "+5");
        assert_eq!(ok("{:05}", &[(-42).into()]), "-0042");
        assert_eq!(ok("{:#06x}", &[255u32.into()]), "0x00ff");
    }

    #[test]
    fn test_integer_radix() {
        assert_eq!(ok("{:x} {:X} {:o} {:b}", &[255.into(), 255.into(), 8.into(), 5.into()]), "ff FF 10 101");
        assert_eq!(ok("{:#b}", &[2.into()]), "0b10");
    }

    #[test]
    fn test_float_precision_and_exponent() {
        assert_eq!(ok("{:.3}", &[3.14159.into()]), "3.142");
        assert_eq!(ok("{:f}", &[1.5.into()]), "1.500000");
        assert_eq!(ok("{:.2e}", &[1234.5.into()]), "1.23e3");
        assert_eq!(ok("{:8.2}", &[(-2.5).into()]), "   -2.50");
        assert_eq!(ok("{}", &[3.3.into()]), "3.3");
    }

    #[test]
    fn test_explicit_indices_and_escapes() {
        assert_eq!(ok("{1} {0} {1}", &["a".into(), "b".into()]), "b a b");
        assert_eq!(ok("{{literal}} {}", &[true.into()]), "{literal} true");
    }

    #[test]
    fn test_text_precision_truncates() {
        assert_eq!(ok("{:.3}", &["abcdef".into()]), "abc");
        assert_eq!(ok("{:?}", &["q".into()]), "\"q\"");
    }

    #[test]
    fn test_arity_mismatch() {
        assert_eq!(kind("{} {}", &[1.into()]), RenderErrorKind::IndexOutOfRange { index: 1, count: 1 });
        assert_eq!(kind("{}", &[1.into(), 2.into()]), RenderErrorKind::UnusedArguments { unused: 1 });
    }

    #[test]
    fn test_malformed_templates() {
        assert_eq!(kind("oops {", &[]), RenderErrorKind::Unterminated(5));
        assert_eq!(kind("oops }", &[]), RenderErrorKind::UnmatchedClose(5));
        assert!(matches!(kind("{:>>>}", &[1.into()]), RenderErrorKind::InvalidSpec(_)));
        assert!(matches!(kind("{:.}", &[1.into()]), RenderErrorKind::InvalidSpec(_)));
        assert!(matches!(kind("{:{}}", &[1.into()]), RenderErrorKind::InvalidSpec(_)));
    }

    #[test]
    fn test_oversized_width_is_rejected() {
        assert!(matches!(kind("{:18446744073709551615}", &[1.into()]), RenderErrorKind::InvalidSpec(_)));
        assert!(matches!(kind("{:65536}", &[1.into()]), RenderErrorKind::InvalidSpec(_)));
        assert_eq!(ok("{:65535}", &["x".into()]).len(), 65535);
    }

    #[test]
    fn test_oversized_precision_is_rejected() {
        assert!(matches!(kind("{:.1000000000}", &[1.5.into()]), RenderErrorKind::InvalidSpec(_)));
        assert!(matches!(kind("{:.65536e}", &[1.5.into()]), RenderErrorKind::InvalidSpec(_)));
        assert!(matches!(kind("{:.99999999999999999999}", &["abc".into()]), RenderErrorKind::InvalidSpec(_)));
    }

    #[test]
    fn test_incompatible_types() {
        assert!(matches!(kind("{:x}", &["ff".into()]), RenderErrorKind::Incompatible { arg_type: "text", .. }));
        assert!(matches!(kind("{:.2}", &[3.into()]), RenderErrorKind::Incompatible { arg_type: "integer", .. }));
        assert!(matches!(kind("{:e}", &[true.into()]), RenderErrorKind::Incompatible { arg_type: "bool", .. }));
    }

    #[test]
    fn test_display_fallback_keeps_width_only() {
        let value = FormatArg::display(&std::net::Ipv4Addr::LOCALHOST);
        assert_eq!(ok("[{:>11}]", &[value.clone()]), "[  127.0.0.1]");
        assert!(render("{:+}", &[value]).is_err());
    }

    #[test]
    fn test_error_payload() {
        let err = render("{} {}", &["a".into()]).unwrap_err();
        assert_eq!(err.template, "{} {}");
        assert_eq!(err.args, vec!["a".to_string()]);
    }

    #[test]
    fn test_join() {
        assert_eq!(join(&["arg1".into(), "arg2".into(), 5.into()]), "arg1 arg2 5");
        assert_eq!(join(&[]), "");
    }
}
