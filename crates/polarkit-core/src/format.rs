//! printf-style number formatting for axis labels.
//!
//! Supports a single conversion of the form `%[-+ 0#][width][.prec](f|e|g)`
//! with optional literal text around it (`%%` is a literal percent sign).
//! The `g` conversion follows C semantics: fixed or exponent notation
//! depending on magnitude, trailing zeros removed unless `#` is given.

use crate::error::FrameError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const DEFAULT_PRECISION: usize = 6;

/// The conversion character of a label format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conversion {
    /// `%f`
    Fixed,
    /// `%e`
    Exponent,
    /// `%g`
    General,
}

/// A parsed printf-style label format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LabelFormat {
    source: String,
    prefix: String,
    suffix: String,
    left_align: bool,
    plus_sign: bool,
    space_sign: bool,
    zero_pad: bool,
    alternate: bool,
    width: usize,
    precision: Option<usize>,
    conversion: Conversion,
}

impl LabelFormat {
    /// Fixed-point format with `decimals` digits after the point.
    pub fn fixed(decimals: usize) -> Self {
        Self {
            source: format!("%.{decimals}f"),
            prefix: String::new(),
            suffix: String::new(),
            left_align: false,
            plus_sign: false,
            space_sign: false,
            zero_pad: false,
            alternate: false,
            width: 0,
            precision: Some(decimals),
            conversion: Conversion::Fixed,
        }
    }

    /// The original format string.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn conversion(&self) -> Conversion {
        self.conversion
    }

    pub fn precision(&self) -> Option<usize> {
        self.precision
    }

    /// Format a single value.
    pub fn format(&self, value: f64) -> String {
        let negative = !value.is_nan() && value.is_sign_negative() && value != 0.0;
        let body = if value.is_nan() {
            "nan".to_string()
        } else if value.is_infinite() {
            "inf".to_string()
        } else {
            self.format_magnitude(value.abs())
        };

        let sign = if negative {
            "-"
        } else if self.plus_sign {
            "+"
        } else if self.space_sign {
            " "
        } else {
            ""
        };

        let len = sign.chars().count() + body.chars().count();
        let padded = if len >= self.width {
            format!("{sign}{body}")
        } else if self.left_align {
            format!("{sign}{body}{}", " ".repeat(self.width - len))
        } else if self.zero_pad && value.is_finite() {
            format!("{sign}{}{body}", "0".repeat(self.width - len))
        } else {
            format!("{}{sign}{body}", " ".repeat(self.width - len))
        };

        format!("{}{}{}", self.prefix, padded, self.suffix)
    }

    fn format_magnitude(&self, magnitude: f64) -> String {
        match self.conversion {
            Conversion::Fixed => {
                let precision = self.precision.unwrap_or(DEFAULT_PRECISION);
                let mut out = format!("{magnitude:.precision$}");
                if self.alternate && precision == 0 {
                    out.push('.');
                }
                out
            }
            Conversion::Exponent => {
                let precision = self.precision.unwrap_or(DEFAULT_PRECISION);
                let mut out = exponent_notation(magnitude, precision);
                if self.alternate && precision == 0 {
                    if let Some(pos) = out.find('e') {
                        out.insert(pos, '.');
                    }
                }
                out
            }
            Conversion::General => self.format_general(magnitude),
        }
    }

    fn format_general(&self, magnitude: f64) -> String {
        let precision = match self.precision.unwrap_or(DEFAULT_PRECISION) {
            0 => 1,
            p => p,
        };
        let exponent = decimal_exponent(magnitude, precision - 1);

        let out = if exponent < -4 || exponent >= precision as i32 {
            exponent_notation(magnitude, precision - 1)
        } else {
            let decimals = (precision as i32 - 1 - exponent).max(0) as usize;
            format!("{magnitude:.decimals$}")
        };

        if self.alternate {
            if out.contains('.') {
                out
            } else if let Some(pos) = out.find('e') {
                let mut out = out;
                out.insert(pos, '.');
                out
            } else {
                out + "."
            }
        } else {
            strip_trailing_zeros(&out)
        }
    }
}

/// C-style exponent notation: `d.ddde+XX`.
fn exponent_notation(magnitude: f64, precision: usize) -> String {
    let rust = format!("{magnitude:.precision$e}");
    match rust.split_once('e') {
        Some((mantissa, exp)) => {
            let exp: i32 = exp.parse().unwrap_or(0);
            let sign = if exp < 0 { '-' } else { '+' };
            format!("{mantissa}e{sign}{:02}", exp.abs())
        }
        None => rust,
    }
}

/// Exponent the value shows once rounded to `precision` decimals in `%e`.
fn decimal_exponent(magnitude: f64, precision: usize) -> i32 {
    if magnitude == 0.0 {
        return 0;
    }
    let rust = format!("{magnitude:.precision$e}");
    rust.split_once('e')
        .and_then(|(_, exp)| exp.parse().ok())
        .unwrap_or(0)
}

fn strip_trailing_zeros(out: &str) -> String {
    let (mantissa, exponent) = match out.find('e') {
        Some(pos) => out.split_at(pos),
        None => (out, ""),
    };
    let mantissa = if mantissa.contains('.') {
        mantissa.trim_end_matches('0').trim_end_matches('.')
    } else {
        mantissa
    };
    format!("{mantissa}{exponent}")
}

impl FromStr for LabelFormat {
    type Err = FrameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| FrameError::InvalidLabelFormat {
            format: s.to_string(),
            reason: reason.to_string(),
        };

        let mut prefix = String::new();
        let mut chars = s.chars().peekable();
        let mut found = false;

        while let Some(c) = chars.next() {
            if c != '%' {
                prefix.push(c);
                continue;
            }
            if chars.peek() == Some(&'%') {
                chars.next();
                prefix.push('%');
                continue;
            }
            found = true;
            break;
        }
        if !found {
            return Err(invalid("missing conversion"));
        }

        let mut format = Self::fixed(0);
        format.source = s.to_string();
        format.prefix = prefix;
        format.precision = None;

        while let Some(&c) = chars.peek() {
            match c {
                '-' => format.left_align = true,
                '+' => format.plus_sign = true,
                ' ' => format.space_sign = true,
                '0' => format.zero_pad = true,
                '#' => format.alternate = true,
                _ => break,
            }
            chars.next();
        }

        let mut width = String::new();
        while let Some(&c) = chars.peek() {
            if !c.is_ascii_digit() {
                break;
            }
            width.push(c);
            chars.next();
        }
        if !width.is_empty() {
            format.width = width.parse().map_err(|_| invalid("width out of range"))?;
        }

        if chars.peek() == Some(&'.') {
            chars.next();
            let mut precision = String::new();
            while let Some(&c) = chars.peek() {
                if !c.is_ascii_digit() {
                    break;
                }
                precision.push(c);
                chars.next();
            }
            let precision = if precision.is_empty() {
                0
            } else {
                precision
                    .parse()
                    .map_err(|_| invalid("precision out of range"))?
            };
            if precision > 17 {
                return Err(invalid("precision above 17"));
            }
            format.precision = Some(precision);
        }

        // Length modifiers carry no meaning for f64 values.
        while chars.peek() == Some(&'l') {
            chars.next();
        }

        format.conversion = match chars.next() {
            Some('f') | Some('F') => Conversion::Fixed,
            Some('e') | Some('E') => Conversion::Exponent,
            Some('g') | Some('G') => Conversion::General,
            Some(other) => return Err(invalid(&format!("unknown conversion '{other}'"))),
            None => return Err(invalid("missing conversion")),
        };

        let mut suffix = String::new();
        while let Some(c) = chars.next() {
            if c == '%' {
                if chars.peek() == Some(&'%') {
                    chars.next();
                    suffix.push('%');
                    continue;
                }
                return Err(invalid("more than one conversion"));
            }
            suffix.push(c);
        }
        format.suffix = suffix;

        Ok(format)
    }
}

impl TryFrom<String> for LabelFormat {
    type Error = FrameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<LabelFormat> for String {
    fn from(value: LabelFormat) -> Self {
        value.source
    }
}

impl fmt::Display for LabelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fmt(spec: &str, value: f64) -> String {
        spec.parse::<LabelFormat>().unwrap().format(value)
    }

    #[test]
    fn test_fixed() {
        assert_eq!(fmt("%.2f", 2.5), "2.50");
        assert_eq!(fmt("%.2f", 10.0), "10.00");
        assert_eq!(fmt("%f", 1.0), "1.000000");
        assert_eq!(fmt("%.0f", 2.4), "2");
        assert_eq!(fmt("%#.0f", 2.4), "2.");
        assert_eq!(fmt("%.1f", -0.26), "-0.3");
    }

    #[test]
    fn test_width_and_flags() {
        assert_eq!(fmt("%6.1f", 2.5), "   2.5");
        assert_eq!(fmt("%-6.1f|", 2.5), "2.5   |");
        assert_eq!(fmt("%06.1f", -2.5), "-002.5");
        assert_eq!(fmt("%+.1f", 2.5), "+2.5");
        assert_eq!(fmt("% .1f", 2.5), " 2.5");
    }

    #[test]
    fn test_exponent() {
        assert_eq!(fmt("%.2e", 1234.5), "1.23e+03");
        assert_eq!(fmt("%.1e", 0.00025), "2.5e-04");
        assert_eq!(fmt("%e", 0.0), "0.000000e+00");
    }

    #[test]
    fn test_general() {
        assert_eq!(fmt("%g", 2.5), "2.5");
        assert_eq!(fmt("%g", 100000.0), "100000");
        assert_eq!(fmt("%g", 1000000.0), "1e+06");
        assert_eq!(fmt("%g", 0.0001), "0.0001");
        assert_eq!(fmt("%g", 0.00001), "1e-05");
        assert_eq!(fmt("%.3g", 9.9999), "10");
    }

    #[test]
    fn test_general_alternate_keeps_zeros() {
        assert_eq!(fmt("%-#6.3g", 2.5).trim(), "2.50");
        assert_eq!(fmt("%-#6.3g", 10.0).trim(), "10.0");
        assert_eq!(fmt("%-#6.3g", 0.0).trim(), "0.00");
        assert_eq!(fmt("%-#6.3g", 2.5).len(), 6);
    }

    #[test]
    fn test_literal_text() {
        assert_eq!(fmt("r=%.1f m", 2.5), "r=2.5 m");
        assert_eq!(fmt("%.0f%%", 50.0), "50%");
    }

    #[test]
    fn test_rejects_bad_formats() {
        assert!("no conversion".parse::<LabelFormat>().is_err());
        assert!("%d".parse::<LabelFormat>().is_err());
        assert!("%f %f".parse::<LabelFormat>().is_err());
        assert!("%.40f".parse::<LabelFormat>().is_err());
        let err = "%q".parse::<LabelFormat>().unwrap_err();
        assert!(err.to_string().contains("unknown conversion 'q'"));
    }

    #[test]
    fn test_non_finite() {
        assert_eq!(fmt("%.1f", f64::NAN), "nan");
        assert_eq!(fmt("%.1f", f64::NEG_INFINITY), "-inf");
    }

    #[test]
    fn test_serde_as_string() {
        let format: LabelFormat = "%.2f".parse().unwrap();
        let json = serde_json::to_string(&format).unwrap();
        assert_eq!(json, "\"%.2f\"");
        let back: LabelFormat = serde_json::from_str(&json).unwrap();
        assert_eq!(back, format);
        assert!(serde_json::from_str::<LabelFormat>("\"%q\"").is_err());
    }
}
