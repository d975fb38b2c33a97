use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Canonical form used to compare place names across datasets.
///
/// Lower-cases, strips diacritics (NFD, then drops combining marks),
/// collapses every run of non-alphanumeric characters to one space, and
/// trims. `"Ribeira D. João"` becomes `"ribeira d joao"`.
#[must_use]
pub fn normalize_label(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut gap = false;

    for c in input.nfd().filter(|c| !is_combining_mark(*c)) {
        if c.is_alphanumeric() {
            if gap && !out.is_empty() {
                out.push(' ');
            }
            gap = false;
            out.extend(c.to_lowercase());
        } else {
            gap = true;
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_diacritics_and_punctuation() {
        assert_eq!(normalize_label("Ribeira D. João"), "ribeira d joao");
        assert_eq!(normalize_label("Pilão Cão"), "pilao cao");
        assert_eq!(normalize_label("Praia  de   Santana!"), "praia de santana");
    }

    #[test]
    fn trims_and_collapses_separators() {
        assert_eq!(normalize_label("  --Morro__beach--  "), "morro beach");
        assert_eq!(normalize_label("porto_ingles"), "porto ingles");
    }

    #[test]
    fn empty_and_symbol_only_inputs_normalize_to_empty() {
        assert_eq!(normalize_label(""), "");
        assert_eq!(normalize_label(" .,;- "), "");
    }

    #[test]
    fn keeps_digits() {
        assert_eq!(normalize_label("Praia #2 (Norte)"), "praia 2 norte");
    }

    #[test]
    fn is_idempotent() {
        let once = normalize_label("Villages of Alcatraz and Pilão Cão");
        assert_eq!(normalize_label(&once), once);
    }
}
