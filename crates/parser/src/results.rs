use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html};

use rucsearch_core::{PageMetadata, ResultSet, SummaryRecord, PER_PAGE};

use crate::{element_text, selector};

static DIGITS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").unwrap());

/// Extracts summary rows and pagination from a results-shaped document.
/// Column order is fixed: ruc, name, location, status. The ruc cell wraps
/// its value in a link, so the anchor text is read, not the raw cell.
pub(crate) fn extract_results(doc: &Html) -> ResultSet {
    let mut set = ResultSet::default();

    let Some(rows_sel) = selector("td.beta table tr") else {
        return set;
    };
    let rows: Vec<ElementRef> = doc.select(&rows_sel).collect();
    if rows.len() < 2 {
        return set;
    }

    set.meta = page_metadata(doc);

    let cell_sel = selector("td");
    let link_sel = selector("a");
    let (Some(cell_sel), Some(link_sel)) = (cell_sel, link_sel) else {
        return set;
    };

    for row in rows.into_iter().skip(1) {
        let cells: Vec<ElementRef> = row.select(&cell_sel).collect();
        let ruc = cells
            .first()
            .and_then(|c| c.select(&link_sel).next())
            .map(element_text)
            .unwrap_or_default();
        set.results.push(SummaryRecord {
            ruc,
            name: cell_text(&cells, 1),
            location: cell_text(&cells, 2),
            status: cell_text(&cells, 3),
        });
    }

    set
}

fn cell_text(cells: &[ElementRef], index: usize) -> String {
    cells.get(index).copied().map(element_text).unwrap_or_default()
}

/// The caption reads like "31-60 de 803". Exactly three digit runs are
/// expected: start offset, end offset, total. Anything else leaves total
/// and page at zero rather than guessing.
fn page_metadata(doc: &Html) -> PageMetadata {
    let mut meta = PageMetadata {
        per_page: PER_PAGE,
        ..Default::default()
    };

    let caption = selector("td.lnk7")
        .and_then(|s| doc.select(&s).next())
        .map(|el| el.text().collect::<String>())
        .unwrap_or_default();

    let runs: Vec<u32> = DIGITS_RE
        .find_iter(&caption)
        .filter_map(|m| m.as_str().parse().ok())
        .collect();

    if runs.len() == 3 {
        meta.total = runs[2];
        meta.page = runs[0] / PER_PAGE + 1;
    }

    meta
}

#[cfg(test)]
mod tests {
    use super::*;

    fn results_page(caption: &str, data_rows: &str) -> String {
        format!(
            r#"
            <html><body>
              <table>
                <tr><td class="lnk7">{caption}</td></tr>
                <tr><td class="beta">
                  <table>
                    <tr><td>RUC</td><td>Nombre o Razón Social</td><td>Ubicación</td><td>Estado</td></tr>
                    {data_rows}
                  </table>
                </td></tr>
              </table>
            </body></html>
            "#
        )
    }

    const TWO_ROWS: &str = r##"
        <tr>
          <td><a href="#">20254138577</a></td>
          <td> MICROSOFT PERU S.R.L. </td>
          <td> LIMA </td>
          <td> ACTIVO </td>
        </tr>
        <tr>
          <td><a href="#">10441233901</a></td>
          <td>HUMALA TASSO, OLLANTA MOISES</td>
          <td>LIMA</td>
          <td>BAJA DE OFICIO</td>
        </tr>
    "##;

    #[test]
    fn rows_are_read_in_fixed_column_order() {
        let html = results_page("1 al 2 de 2", TWO_ROWS);
        let set = crate::parse_search_page(&html).unwrap();
        assert_eq!(set.results.len(), 2);

        let first = &set.results[0];
        assert_eq!(first.ruc, "20254138577");
        assert_eq!(first.name, "MICROSOFT PERU S.R.L.");
        assert_eq!(first.location, "LIMA");
        assert_eq!(first.status, "ACTIVO");

        assert_eq!(set.results[1].status, "BAJA DE OFICIO");
    }

    #[test]
    fn pagination_caption_yields_total_and_page() {
        let html = results_page("31-60 de 803", TWO_ROWS);
        let set = crate::parse_search_page(&html).unwrap();
        assert_eq!(set.meta.total, 803);
        assert_eq!(set.meta.per_page, 30);
        assert_eq!(set.meta.page, 2);
    }

    #[test]
    fn first_page_caption() {
        let html = results_page("1 al 2 de 2", TWO_ROWS);
        let set = crate::parse_search_page(&html).unwrap();
        assert_eq!(set.meta.total, 2);
        assert_eq!(set.meta.page, 1);
    }

    #[test]
    fn deep_page_caption() {
        let html = results_page("781-803 de 803", TWO_ROWS);
        let set = crate::parse_search_page(&html).unwrap();
        assert_eq!(set.meta.total, 803);
        assert_eq!(set.meta.page, 27);
    }

    #[test]
    fn malformed_caption_leaves_metadata_zeroed() {
        // Anything other than exactly three digit runs is not trusted.
        for caption in ["", "de 803", "31-60 de", "1 2 3 4"] {
            let html = results_page(caption, TWO_ROWS);
            let set = crate::parse_search_page(&html).unwrap();
            assert_eq!(set.meta.total, 0, "caption {:?}", caption);
            assert_eq!(set.meta.page, 0, "caption {:?}", caption);
            assert_eq!(set.meta.per_page, 30, "caption {:?}", caption);
        }
    }

    #[test]
    fn missing_cells_render_as_empty_strings() {
        let html = results_page(
            "1 al 1 de 1",
            r#"<tr><td><a>20254138577</a></td><td>MICROSOFT PERU S.R.L.</td></tr>"#,
        );
        let set = crate::parse_search_page(&html).unwrap();
        assert_eq!(set.results.len(), 1);
        assert_eq!(set.results[0].location, "");
        assert_eq!(set.results[0].status, "");
    }

    #[test]
    fn ruc_without_anchor_is_empty() {
        let html = results_page(
            "1 al 1 de 1",
            r#"<tr><td>20254138577</td><td>X Y</td><td>LIMA</td><td>ACTIVO</td></tr>"#,
        );
        let set = crate::parse_search_page(&html).unwrap();
        assert_eq!(set.results[0].ruc, "");
    }

    #[test]
    fn parsing_is_idempotent() {
        let html = results_page("31-60 de 803", TWO_ROWS);
        let a = crate::parse_search_page(&html).unwrap();
        let b = crate::parse_search_page(&html).unwrap();
        assert_eq!(a, b);
    }
}
