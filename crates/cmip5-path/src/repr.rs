//! Textual representation of a [`Cmip5File`].
//!
//! The representation reads like a keyword constructor call:
//!
//! ```text
//! Cmip5File(variable_name="tas", mip_table="Amon", model="HADCM3", ...)
//! Cmip5File(cmor_fp="CMIP5/output1/MOHC/.../tas_Amon_HADCM3_decadal1990_r3i2p1.nc")
//! Cmip5File("CMIP5/output1/MOHC/.../tas_Amon_HADCM3_decadal1990_r3i2p1.nc")
//! ```
//!
//! A single positional argument means `cmor_fp`. Values are quoted with `"`
//! (or `'`), and `\` escapes the quote and itself. Parsing goes through the
//! builder, so the same source and keyword rules apply. `Cmip5File()` reads
//! back as a file with no field set.

use std::fmt;
use std::iter::Peekable;
use std::str::{CharIndices, FromStr};

use cmip5_types::{Cmip5Meta, PathLayout};

use crate::file::{Cmip5File, Source};
use crate::parser::{parse_cmor_fname, parse_path};
use crate::types::{Cmip5Error, Cmip5Result, ParseConfig};

const TYPE_NAME: &str = "Cmip5File";

impl fmt::Display for Cmip5File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", TYPE_NAME)?;
        for (i, (field, value)) in self.meta().iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}=", field)?;
            write_quoted(f, value)?;
        }
        f.write_str(")")
    }
}

impl FromStr for Cmip5File {
    type Err = Cmip5Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let args = parse_args(s)?;
        if args.is_empty() {
            return Ok(Cmip5File::from_meta(Cmip5Meta::default()));
        }

        let mut builder = Cmip5File::builder();
        for (key, value) in args {
            builder = builder.arg(key.unwrap_or(PathLayout::Cmor.source_key()), value);
        }
        builder.build()
    }
}

impl Cmip5File {
    /// Returns the representation naming the original kind of source.
    ///
    /// For a file parsed from a path or file name this is e.g.
    /// `Cmip5File(cmor_fp="...")` with the path rendered from the current
    /// fields. When that form cannot carry every field (a field was added
    /// that the layout does not encode, or a required field was cleared)
    /// the keyword form of [`Display`](fmt::Display) is returned instead.
    pub fn repr_with_source(&self) -> String {
        match self.source_repr() {
            Some(repr) => repr,
            None => self.to_string(),
        }
    }

    fn source_repr(&self) -> Option<String> {
        let key = self.source().key()?;
        let config = ParseConfig::default();

        let rendered = match self.source() {
            Source::Path(layout) => self.path(layout).ok()?,
            Source::FileName => self.cmor_fname().ok()?,
            Source::Fields => return None,
        };
        let reparsed = match self.source() {
            Source::Path(layout) => parse_path(&rendered, layout, &config).ok()?,
            _ => parse_cmor_fname(&rendered, &config).ok()?,
        };
        if &reparsed != self.meta() {
            return None;
        }

        let mut repr = format!("{}({}=", TYPE_NAME, key);
        push_quoted(&mut repr, &rendered);
        repr.push(')');
        Some(repr)
    }
}

fn write_quoted(f: &mut fmt::Formatter<'_>, value: &str) -> fmt::Result {
    let mut quoted = String::with_capacity(value.len() + 2);
    push_quoted(&mut quoted, value);
    f.write_str(&quoted)
}

fn push_quoted(out: &mut String, value: &str) {
    out.push('"');
    for c in value.chars() {
        if c == '"' || c == '\\' {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
}

/// Splits `Cmip5File(...)` into `(keyword, value)` pairs; a positional
/// argument has no keyword.
fn parse_args(input: &str) -> Cmip5Result<Vec<(Option<&str>, String)>> {
    let invalid = |reason: &str| Cmip5Error::InvalidRepr {
        value: input.to_string(),
        reason: reason.to_string(),
    };

    let body = input
        .trim()
        .strip_prefix(TYPE_NAME)
        .and_then(|rest| rest.trim_start().strip_prefix('('))
        .and_then(|rest| rest.strip_suffix(')'))
        .ok_or_else(|| invalid("expected Cmip5File(...)"))?;

    let mut args = Vec::new();
    let mut chars = body.char_indices().peekable();

    loop {
        skip_whitespace(&mut chars);
        let Some(&(start, c)) = chars.peek() else {
            break;
        };

        let key = if c == '"' || c == '\'' {
            if !args.is_empty() {
                return Err(invalid("positional argument must come first"));
            }
            None
        } else {
            let mut end = start;
            while let Some(&(i, c)) = chars.peek() {
                if c.is_ascii_alphanumeric() || c == '_' {
                    end = i + c.len_utf8();
                    chars.next();
                } else {
                    break;
                }
            }
            if end == start {
                return Err(invalid("expected a keyword or a quoted value"));
            }
            skip_whitespace(&mut chars);
            if !matches!(chars.next(), Some((_, '='))) {
                return Err(invalid("expected '=' after keyword"));
            }
            skip_whitespace(&mut chars);
            Some(&body[start..end])
        };

        let value = read_quoted(&mut chars).map_err(invalid)?;
        args.push((key, value));

        skip_whitespace(&mut chars);
        match chars.next() {
            None => break,
            Some((_, ',')) => {}
            Some(_) => return Err(invalid("expected ',' between arguments")),
        }
    }

    Ok(args)
}

fn skip_whitespace(chars: &mut Peekable<CharIndices<'_>>) {
    while chars.next_if(|(_, c)| c.is_whitespace()).is_some() {}
}

fn read_quoted(chars: &mut Peekable<CharIndices<'_>>) -> Result<String, &'static str> {
    let quote = match chars.next() {
        Some((_, q @ ('"' | '\''))) => q,
        _ => return Err("expected a quoted value"),
    };

    let mut value = String::new();
    loop {
        match chars.next() {
            Some((_, '\\')) => match chars.next() {
                Some((_, c)) if c == '\\' || c == '"' || c == '\'' => value.push(c),
                _ => return Err("invalid escape sequence"),
            },
            Some((_, c)) if c == quote => return Ok(value),
            Some((_, c)) => value.push(c),
            None => return Err("unterminated quoted value"),
        }
    }
}
