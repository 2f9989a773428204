use once_cell::sync::Lazy;
use regex::Regex;

static DNI_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{8}$").unwrap());

static RUC_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(10|15|17|20)\d{9}$").unwrap());

/// Mod-11 weights for the first ten digits of a RUC.
const RUC_WEIGHTS: [u32; 10] = [5, 4, 3, 2, 7, 6, 5, 4, 3, 2];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryKind {
    /// 8-digit national identity number.
    Dni,
    /// 11-digit taxpayer registration number.
    Ruc,
    /// Person or business name.
    Name,
    Invalid,
}

/// A raw query string with its kind decided once, up front.
#[derive(Debug, Clone)]
pub struct Query {
    raw: String,
    kind: QueryKind,
}

impl Query {
    /// Classifies `raw`. DNI is tried first (it can only be 8 digits),
    /// then RUC, then name; anything else is invalid.
    pub fn classify(raw: &str) -> Self {
        let kind = if is_dni(raw) {
            QueryKind::Dni
        } else if is_ruc(raw) {
            QueryKind::Ruc
        } else if is_name(raw) {
            QueryKind::Name
        } else {
            QueryKind::Invalid
        };
        Self {
            raw: raw.to_string(),
            kind,
        }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn kind(&self) -> QueryKind {
        self.kind
    }
}

pub fn is_dni(value: &str) -> bool {
    DNI_RE.is_match(value)
}

/// A RUC must carry a known two-digit prefix and a valid mod-11 check
/// digit: `11 - (weighted sum % 11)`, reduced by 10 when that is >= 10.
pub fn is_ruc(value: &str) -> bool {
    if !RUC_RE.is_match(value) {
        return false;
    }
    let digits: Vec<u32> = value.chars().filter_map(|c| c.to_digit(10)).collect();
    let sum: u32 = RUC_WEIGHTS.iter().zip(&digits).map(|(w, d)| w * d).sum();
    let mut check = 11 - (sum % 11);
    if check >= 10 {
        check -= 10;
    }
    digits[10] == check
}

/// Names are letters and interior spaces only, no surrounding whitespace,
/// at least two characters.
pub fn is_name(value: &str) -> bool {
    if value.chars().count() < 2 || value.trim() != value {
        return false;
    }
    value.chars().all(|c| c.is_alphabetic() || c == ' ')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_dni() {
        let fixtures = [
            ("53140230", true),
            ("20254138577", false),
            ("12345678909", false),
            ("asdfghjkl12", false),
            ("5314023", false),
        ];
        for (value, expected) in fixtures {
            assert_eq!(is_dni(value), expected, "is_dni({:?})", value);
        }
    }

    #[test]
    fn test_is_ruc() {
        let fixtures = [
            ("20254138577", true),
            ("20601020841", true),
            ("10441233901", true),
            ("10441233909", false),
            ("12345678909", false),
            ("asdfghjkl12", false),
            ("2025413857", false),
        ];
        for (value, expected) in fixtures {
            assert_eq!(is_ruc(value), expected, "is_ruc({:?})", value);
        }
    }

    #[test]
    fn ruc_check_digit_is_unique() {
        // Exactly one of the ten possible check digits validates a given
        // body of ten leading digits.
        for body in ["2025413857", "1044123390", "2060102084"] {
            let valid: Vec<char> = ('0'..='9')
                .filter(|d| is_ruc(&format!("{}{}", body, d)))
                .collect();
            assert_eq!(valid.len(), 1, "body {:?} validated as {:?}", body, valid);
        }
    }

    #[test]
    fn test_is_name() {
        let fixtures = [
            ("foo", true),
            ("foo bar", true),
            ("foo  bar", true),
            ("ab", true),
            ("a", false),
            ("foo ", false),
            (" foo", false),
            ("x 1", false),
            ("", false),
        ];
        for (value, expected) in fixtures {
            assert_eq!(is_name(value), expected, "is_name({:?})", value);
        }
    }

    #[test]
    fn classification_order() {
        assert_eq!(Query::classify("53140230").kind(), QueryKind::Dni);
        assert_eq!(Query::classify("20254138577").kind(), QueryKind::Ruc);
        assert_eq!(Query::classify("MICROSOFT PERU").kind(), QueryKind::Name);
        assert_eq!(Query::classify("x 1").kind(), QueryKind::Invalid);
        // A RUC that fails its checksum is not silently demoted to a name.
        assert_eq!(Query::classify("10441233909").kind(), QueryKind::Invalid);
    }
}
