use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use super::CharFilter;

/// A char filter that folds text to ASCII.
///
/// The text is decomposed with NFKD so accented letters split into a base
/// letter plus combining marks; the marks are dropped. Latin letters with
/// no decomposition (`ß`, `æ`, `ø`, ...) are transliterated, and any code
/// point still outside ASCII is replaced with a space so it separates tokens.
#[derive(Clone, Debug, Default)]
pub struct AsciiFoldingCharFilter;

impl AsciiFoldingCharFilter {
    pub fn new() -> Self {
        AsciiFoldingCharFilter
    }
}

impl CharFilter for AsciiFoldingCharFilter {
    fn filter(&self, input: &str) -> String {
        if input.is_ascii() {
            return input.to_string();
        }

        let mut folded = String::with_capacity(input.len());
        for c in input.nfkd().filter(|c| !is_combining_mark(*c)) {
            if c.is_ascii() {
                folded.push(c);
            } else {
                folded.push_str(transliterate(c).unwrap_or(" "));
            }
        }
        folded
    }

    fn name(&self) -> &'static str {
        "ascii_folding"
    }
}

/// ASCII spelling of Latin letters that NFKD leaves intact.
fn transliterate(c: char) -> Option<&'static str> {
    let ascii = match c {
        'ß' => "ss",
        'ẞ' => "SS",
        'æ' => "ae",
        'Æ' => "AE",
        'œ' => "oe",
        'Œ' => "OE",
        'ø' => "o",
        'Ø' => "O",
        'đ' => "d",
        'Đ' => "D",
        'ð' => "d",
        'Ð' => "D",
        'ł' => "l",
        'Ł' => "L",
        'þ' => "th",
        'Þ' => "TH",
        'ı' => "i",
        'ħ' => "h",
        'Ħ' => "H",
        _ => return None,
    };
    Some(ascii)
}
