use once_cell::sync::Lazy;
use regex::Regex;
use scraper::Html;

use rucsearch_core::DetailRecord;

use crate::{element_text, selector};

static DIGITS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DetailField {
    Ruc,
    Status,
    Address,
    Condition,
    Dni,
    Kind,
}

/// Label prefixes as the registry renders them, checked in order with the
/// first match winning. "Tipo de Doc" must come before "Tipo Con" so a
/// broader "Tipo" prefix can never shadow it.
const LABEL_RULES: &[(&str, DetailField)] = &[
    ("RUC", DetailField::Ruc),
    ("Esta", DetailField::Status),
    ("Domi", DetailField::Address),
    ("Cond", DetailField::Condition),
    ("Tipo de Doc", DetailField::Dni),
    ("Tipo Con", DetailField::Kind),
];

fn classify_label(label: &str) -> Option<DetailField> {
    LABEL_RULES
        .iter()
        .find(|(prefix, _)| label.starts_with(prefix))
        .map(|(_, field)| *field)
}

/// Extracts a record from the label/value rows of a detail-shaped
/// document. Labels are inconsistently spelled across layout variants,
/// hence the prefix rules.
pub(crate) fn extract_detail(doc: &Html) -> DetailRecord {
    let mut detail = DetailRecord::default();

    let (Some(rows_sel), Some(label_sel), Some(value_sel)) = (
        selector("#print table tr"),
        selector("td.bgn"),
        selector("td.bg"),
    ) else {
        return detail;
    };

    for row in doc.select(&rows_sel).skip(1) {
        let label = row.select(&label_sel).next().map(element_text).unwrap_or_default();
        let value = row.select(&value_sel).next().map(element_text).unwrap_or_default();

        match classify_label(&label) {
            // The value embeds "ruc - name" in one string.
            Some(DetailField::Ruc) => {
                let mut parts = value.splitn(2, '-');
                detail.ruc = parts.next().unwrap_or_default().trim().to_string();
                detail.name = parts.next().unwrap_or_default().trim().to_string();
            }
            Some(DetailField::Status) => detail.status = value,
            Some(DetailField::Address) => detail.address = collapse_spaces(&value),
            Some(DetailField::Condition) => detail.condition = value,
            // "DNI 44123390 - SURNAME, NAME": the number is the first digit
            // run, the name follows the separator.
            Some(DetailField::Dni) => {
                detail.dni = DIGITS_RE
                    .find(&value)
                    .map(|m| m.as_str().to_string())
                    .unwrap_or_default();
                detail.name = value
                    .splitn(2, '-')
                    .nth(1)
                    .unwrap_or_default()
                    .trim()
                    .to_string();
            }
            Some(DetailField::Kind) => detail.kind = value,
            None => {}
        }
    }

    detail
}

fn collapse_spaces(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}
