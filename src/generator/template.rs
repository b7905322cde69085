//! Placeholder substitution for WordprocessingML.
//!
//! Placeholders are written `{{ key }}`. Word often splits the text of a
//! placeholder over several runs, so any markup between the braces is
//! dropped together with the placeholder. The two braces on each side must
//! still be adjacent.
//!
//! A table row (`<w:tr>`) holding at least one `{{ product.* }}` placeholder
//! is a template for the product table: it is emitted once per product and
//! removed entirely when the invoice has no products.

use lazy_static::lazy_static;
use regex::{Match, Regex};

use super::GeneratorError;
use crate::invoice::context::{RenderContext, PRODUCT_PREFIX};

lazy_static! {
    static ref PLACEHOLDER: Regex = Regex::new(r"(?s)\{\{(.*?)\}\}").expect("valid placeholder pattern");
    static ref MARKUP: Regex = Regex::new(r"<[^>]*>").expect("valid markup pattern");
    static ref TABLE_ROW: Regex = Regex::new(r"(?s)<w:tr[ >].*?</w:tr>").expect("valid table row pattern");
}

/// Render one XML part against the invoice context.
///
/// Product rows and the text between them are rendered separately, so a
/// substituted value is never parsed for placeholders again.
pub fn render_part(xml: &str, context: &RenderContext) -> Result<String, GeneratorError> {
    let scalar = |key: &str| context.field(key).map(str::to_string);
    let mut out = String::with_capacity(xml.len());
    let mut last = 0;

    for row in TABLE_ROW.find_iter(xml) {
        if !is_product_row(row.as_str()) {
            continue;
        }
        out.push_str(&substitute(&xml[last..row.start()], scalar)?);
        for product in context.rows() {
            out.push_str(&substitute(row.as_str(), |key| {
                context.lookup_in_row(product, key)
            })?);
        }
        last = row.end();
    }

    out.push_str(&substitute(&xml[last..], scalar)?);
    Ok(out)
}

/// Replace every placeholder in `xml` with the escaped value returned by
/// `lookup`. Fails on the first key `lookup` cannot resolve.
pub fn substitute<F>(xml: &str, mut lookup: F) -> Result<String, GeneratorError>
where
    F: FnMut(&str) -> Option<String>,
{
    let mut out = String::with_capacity(xml.len());
    let mut last = 0;

    for placeholder in PLACEHOLDER.find_iter(xml) {
        let key = placeholder_key(placeholder);
        let value = lookup(&key).ok_or(GeneratorError::UnknownPlaceholder(key))?;
        out.push_str(&xml[last..placeholder.start()]);
        out.push_str(&escape_xml(&value));
        last = placeholder.end();
    }

    out.push_str(&xml[last..]);
    Ok(out)
}

fn is_product_row(row_xml: &str) -> bool {
    PLACEHOLDER
        .find_iter(row_xml)
        .any(|placeholder| placeholder_key(placeholder).starts_with(PRODUCT_PREFIX))
}

/// Key of a `{{ ... }}` match with markup and surrounding whitespace removed.
fn placeholder_key(placeholder: Match<'_>) -> String {
    let raw = placeholder.as_str();
    let inner = &raw[2..raw.len() - 2];
    MARKUP.replace_all(inner, "").trim().to_string()
}

/// Escape text for use inside a `<w:t>` element.
pub fn escape_xml(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
