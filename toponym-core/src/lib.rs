use std::iter::Peekable;
use std::str::Chars;

use unicode_normalization::UnicodeNormalization;

pub mod error;
pub mod gazetteer;
pub mod search;
pub mod suggest;

/// Maximum number of suggestions handed back for one query.
pub const SUGGESTION_LIMIT: usize = 25;

/// Sole element of the result list when the input carries nothing to match.
pub const NO_SUGGESTION: &str = "No suggestion.";

/// Placeholder emitted upstream when no location was extracted.
pub const NOT_SPECIFIED: &str = "Not specified";

/// Administrative unit suffixes, in matching priority order.
///
/// Entries are spelled the way they look after [`normalize`], which is why
/// "köyü" appears as " koyu". Longer forms must stay ahead of their
/// prefixes (" kazasi" before " kaza").
pub const SUFFIXES: [&str; 13] = [
    " nahiyesi",
    " karyesi",
    " koyu",
    " kasabasi",
    " mahallesi",
    " ilcesi",
    " vilayeti",
    " sancagi",
    " sancak",
    " kazasi",
    " kaza",
    " sehri",
    " ceziresi",
];

const COMBINING_DOT_ABOVE: char = '\u{307}';

/// Case fold with Turkish dotted/dotless I rules, then collapse the
/// script specific letters to their Latin base form.
pub fn normalize(s: &str) -> String {
    let composed: String = s.nfc().collect();
    let mut out = String::with_capacity(composed.len());
    let mut chars = composed.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            'I' => out.push(substitute('ı')),
            'İ' => out.push('i'),
            'i' => {
                skip_dot_above(&mut chars);
                out.push('i')
            }
            c => out.extend(c.to_lowercase().map(substitute)),
        }
    }
    out
}

fn skip_dot_above(chars: &mut Peekable<Chars>) {
    if chars.peek() == Some(&COMBINING_DOT_ABOVE) {
        chars.next();
    }
}

fn substitute(c: char) -> char {
    match c {
        'û' => 'u',
        'ç' => 'c',
        'ü' => 'u',
        'ö' => 'o',
        'î' => 'i',
        'â' => 'a',
        'ş' => 's',
        'ı' => 'i',
        'ğ' => 'g',
        other => other,
    }
}
