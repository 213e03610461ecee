//! Identifier sanitization: transliterating arbitrary schema-declared names
//! into valid, collision-resistant code identifiers.

use heck::{ToPascalCase, ToSnakeCase};

use crate::model::Ident;

/// Character classification for a target language's identifier grammar.
///
/// The sanitizer scans against these predicates only, so a backend with a
/// stricter grammar can supply its own implementation.
pub trait IdentifierGrammar {
    /// May this character begin an identifier?
    fn is_leading(&self, ch: char) -> bool;

    /// May this character continue an identifier?
    fn is_continuing(&self, ch: char) -> bool;

    /// Well-formedness of a complete candidate under this grammar.
    fn is_valid(&self, candidate: &str) -> bool {
        let mut chars = candidate.chars();
        match chars.next() {
            Some(first) if self.is_leading(first) => chars.all(|ch| self.is_continuing(ch)),
            _ => false,
        }
    }
}

/// The grammar shared by every target language currently emitted: ASCII
/// letters and underscore lead, digits may continue.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommonGrammar;

impl IdentifierGrammar for CommonGrammar {
    fn is_leading(&self, ch: char) -> bool {
        ch.is_ascii_alphabetic() || ch == '_'
    }

    fn is_continuing(&self, ch: char) -> bool {
        ch.is_ascii_alphanumeric() || ch == '_'
    }
}

/// Sanitize `name` under the common grammar. See [`sanitize_with`].
pub fn sanitize(name: &str, allow_leading_caps: bool) -> Option<String> {
    sanitize_with(&CommonGrammar, name, allow_leading_caps)
}

/// Transliterate `name` into a valid identifier, or `None` when nothing
/// usable remains.
///
/// Runs of characters the grammar rejects collapse into a single word
/// boundary; the character after a boundary is upper-cased to keep word
/// legibility. Unless `allow_leading_caps` is set, the leading run is
/// lowercased up to the first boundary, digit, or already-lowercase letter.
pub fn sanitize_with(
    grammar: &dyn IdentifierGrammar,
    name: &str,
    allow_leading_caps: bool,
) -> Option<String> {
    const BOUNDARY: char = '\u{0}';

    let mut scanned: Vec<char> = Vec::with_capacity(name.len());
    let mut pending_boundary = false;
    for ch in name.chars() {
        if grammar.is_continuing(ch) {
            if pending_boundary && !scanned.is_empty() {
                scanned.push(BOUNDARY);
                scanned.extend(ch.to_uppercase());
            } else {
                scanned.push(ch);
            }
            pending_boundary = false;
        } else {
            pending_boundary = true;
        }
    }

    if !allow_leading_caps {
        for ch in scanned.iter_mut() {
            if *ch == BOUNDARY || ch.is_ascii_digit() || ch.is_lowercase() {
                break;
            }
            *ch = ch.to_ascii_lowercase();
        }
    }

    let result: String = scanned.into_iter().filter(|ch| *ch != BOUNDARY).collect();
    if result.is_empty() || !grammar.is_valid(&result) {
        return None;
    }
    Some(result)
}

/// Sanitize `name` and pre-compute the casing variants emitters consume.
pub fn to_ident(name: &str) -> Option<Ident> {
    let text = sanitize(name, false)?;
    Some(Ident {
        pascal_case: text.to_pascal_case(),
        snake_case: text.to_snake_case(),
        text,
    })
}
