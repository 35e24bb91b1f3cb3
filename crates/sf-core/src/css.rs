//! Parser for inline `style` attribute values (`"fill: none;stroke: #000"`).
//!
//! Built on `winnow`. Used to merge declarations into an existing `style`
//! attribute and to read back what [`Style::to_inline`](crate::Style::to_inline)
//! wrote.

use crate::error::StyleError;
use winnow::ascii::multispace0;
use winnow::error::ContextError;
use winnow::prelude::*;
use winnow::token::{take_till, take_while};

/// One `name: value` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub name: String,
    pub value: String,
}

/// Parse a declaration list. Empty declarations (`;;`) are skipped.
pub fn parse_declarations(input: &str) -> Result<Vec<Declaration>, StyleError> {
    let mut rest = input;
    let mut out = Vec::new();

    skip_separators(&mut rest);
    while !rest.is_empty() {
        let (name, value) = parse_declaration
            .parse_next(&mut rest)
            .map_err(|_| StyleError::Malformed(rest.chars().take(24).collect()))?;
        out.push(Declaration {
            name: name.to_ascii_lowercase(),
            value: value.trim().to_string(),
        });
        skip_separators(&mut rest);
    }

    Ok(out)
}

/// Join declarations back into attribute text.
pub fn write_declarations(decls: &[Declaration]) -> String {
    decls
        .iter()
        .map(|d| format!("{}: {}", d.name, d.value))
        .collect::<Vec<_>>()
        .join(";")
}

/// Set `name` to `value` inside an existing inline style, replacing an
/// earlier declaration of the same property or appending a new one.
pub fn merge_declaration(existing: &str, name: &str, value: &str) -> Result<String, StyleError> {
    let mut decls = parse_declarations(existing)?;
    match decls.iter_mut().find(|d| d.name == name) {
        Some(d) => d.value = value.to_string(),
        None => decls.push(Declaration {
            name: name.to_string(),
            value: value.to_string(),
        }),
    }
    Ok(write_declarations(&decls))
}

/// Look up one property in an inline style.
pub fn declaration_value(inline: &str, name: &str) -> Option<String> {
    parse_declarations(inline)
        .ok()?
        .into_iter()
        .find(|d| d.name == name)
        .map(|d| d.value)
}

// ─── Low-level parsers ──────────────────────────────────────────────────

fn skip_separators(input: &mut &str) {
    let _: Result<&str, winnow::error::ErrMode<ContextError>> =
        take_while(0.., |c: char| c == ';' || c.is_whitespace()).parse_next(input);
}

fn parse_property_name<'a>(input: &mut &'a str) -> ModalResult<&'a str> {
    take_while(1.., |c: char| c.is_ascii_alphanumeric() || c == '-').parse_next(input)
}

fn parse_declaration<'a>(input: &mut &'a str) -> ModalResult<(&'a str, &'a str)> {
    let name = parse_property_name.parse_next(input)?;
    let _ = multispace0.parse_next(input)?;
    let _ = ':'.parse_next(input)?;
    let _ = multispace0.parse_next(input)?;
    let value = take_till(0.., ';').parse_next(input)?;
    Ok((name, value))
}
