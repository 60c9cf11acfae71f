//! `${section:key}` value interpolation across profile sections.
//!
//! Supported forms:
//! - `${key}` — a key in the same section
//! - `${section:key}` — a key in another section
//! - `$$` — a literal `$`
//!
//! Referenced values are interpolated in turn, up to [`MAX_DEPTH`] levels.
use super::ini::RawDocument;
use crate::error::ProfileError;

/// Maximum nesting of references before interpolation gives up.
pub const MAX_DEPTH: usize = 10;

/// Interpolate a single raw value that lives at `section.key`.
///
/// # Examples
///
/// ```
/// use dotdeploy::config::ini::parse_document;
/// use dotdeploy::config::interpolation::interpolate;
///
/// let doc = parse_document("[global]\nhome = /home/a\n[shell]\nrc = ${global:home}/.bashrc\n").unwrap();
/// let value = interpolate(&doc, "shell", "rc", "${global:home}/.bashrc").unwrap();
/// assert_eq!(value, "/home/a/.bashrc");
/// ```
///
/// # Errors
///
/// Returns [`ProfileError::Interpolation`] if a reference names an undefined
/// section or key, uses malformed syntax, or nests deeper than [`MAX_DEPTH`].
pub fn interpolate(
    doc: &RawDocument,
    section: &str,
    key: &str,
    value: &str,
) -> Result<String, ProfileError> {
    expand(doc, section, value, 1).map_err(|reason| ProfileError::Interpolation {
        section: section.to_string(),
        key: key.to_string(),
        reason,
    })
}

/// Return a copy of `doc` with every value interpolated.
///
/// # Errors
///
/// Returns the first [`ProfileError::Interpolation`] encountered, in section
/// and key declaration order.
pub fn interpolate_document(doc: &RawDocument) -> Result<RawDocument, ProfileError> {
    let mut out = RawDocument::default();
    for section in &doc.sections {
        out.ensure_section(&section.name);
        for (key, value) in &section.entries {
            let resolved = interpolate(doc, &section.name, key, value)?;
            out.set(&section.name, key.as_str(), resolved);
        }
    }
    Ok(out)
}

fn expand(doc: &RawDocument, section: &str, value: &str, depth: usize) -> Result<String, String> {
    if depth > MAX_DEPTH {
        return Err(format!(
            "interpolation depth exceeded ({MAX_DEPTH}) while expanding '{value}'"
        ));
    }

    let mut out = String::with_capacity(value.len());
    let mut rest = value;

    while let Some(pos) = rest.find('$') {
        let (before, from_dollar) = rest.split_at(pos);
        out.push_str(before);
        let after = from_dollar.get(1..).unwrap_or_default();

        if let Some(tail) = after.strip_prefix('$') {
            out.push('$');
            rest = tail;
        } else if let Some(body) = after.strip_prefix('{') {
            let Some((reference, tail)) = body.split_once('}') else {
                return Err(format!("unterminated '${{' in '{value}'"));
            };
            let (ref_section, ref_key) = split_reference(section, reference)?;
            let raw = lookup(doc, ref_section, ref_key)?;
            if raw.contains('$') {
                out.push_str(&expand(doc, ref_section, raw, depth + 1)?);
            } else {
                out.push_str(raw);
            }
            rest = tail;
        } else {
            return Err(format!("'$' must be followed by '$' or '{{', found: '{from_dollar}'"));
        }
    }

    out.push_str(rest);
    Ok(out)
}

/// Split `key` or `section:key` into its parts.
fn split_reference<'a>(section: &'a str, reference: &'a str) -> Result<(&'a str, &'a str), String> {
    let mut parts = reference.split(':');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(key), None, None) => Ok((section, key)),
        (Some(sect), Some(key), None) => Ok((sect, key)),
        _ => Err(format!("more than one ':' found in reference '${{{reference}}}'")),
    }
}

fn lookup<'d>(doc: &'d RawDocument, section: &str, key: &str) -> Result<&'d str, String> {
    let found = doc
        .section(section)
        .ok_or_else(|| format!("no section '{section}'"))?;
    found
        .get(key)
        .ok_or_else(|| format!("no key '{key}' in section '{section}'"))
}
