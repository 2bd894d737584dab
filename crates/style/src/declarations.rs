//! `style="..."` attribute parsing.
//!
//! There is no tokenizer here: a `;` inside a string or `url(...)` ends the declaration.

use std::collections::HashMap;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Declaration {
    /// Lowercased property name.
    pub property: String,
    /// Value with surrounding whitespace and any `!important` flag removed.
    pub value: String,
}

impl Declaration {
    fn parse(item: &str) -> Option<Self> {
        let (property, value) = item.split_once(':')?;
        let property = property.trim_matches(is_css_whitespace);
        let value = strip_important(value.trim_matches(is_css_whitespace));
        if property.is_empty() || value.is_empty() {
            return None;
        }
        Some(Self {
            property: property.to_ascii_lowercase(),
            value: value.to_owned(),
        })
    }
}

/// Declarations of a `style` attribute in source order. Items without a colon, or with
/// an empty property or value, are dropped.
pub fn parse_style_attribute(input: &str) -> Vec<Declaration> {
    input
        .split(';')
        .map(|item| item.trim_matches(is_css_whitespace))
        .filter(|item| !item.is_empty())
        .filter_map(Declaration::parse)
        .collect()
}

/// Declarations keyed by property; a later duplicate replaces an earlier one.
pub fn parse_style_attribute_into_map(input: &str) -> HashMap<String, String> {
    parse_style_attribute(input)
        .into_iter()
        .map(|decl| (decl.property, decl.value))
        .collect()
}

fn strip_important(value: &str) -> &str {
    let lowered = value.to_ascii_lowercase();
    lowered.rfind("!important").map_or(value, |index| {
        value
            .get(..index)
            .unwrap_or(value)
            .trim_matches(is_css_whitespace)
    })
}

/// TAB, LF, FF, CR and SPACE.
const fn is_css_whitespace(character: char) -> bool {
    matches!(character, '\t' | '\n' | '\u{000C}' | '\r' | ' ')
}
