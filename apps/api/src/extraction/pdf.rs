use tracing::debug;

use super::ExtractionError;

/// pdf-extract starts every page's text with this page-break marker.
const PAGE_BREAK: &str = "\n\n";

/// Extracts each page's text in order and concatenates it without separators.
pub(super) fn extract_pdf_text(content: &[u8]) -> Result<String, ExtractionError> {
    let pages = pdf_extract::extract_text_from_mem_by_pages(content)
        .map_err(|e| ExtractionError::ExtractionFailed(format!("PDF read error: {e}")))?;

    debug!(pages = pages.len(), "Extracted PDF text");
    Ok(pages
        .iter()
        .map(|page| page.strip_prefix(PAGE_BREAK).unwrap_or(page))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Minimal PDF with one Helvetica text line per page and a correct xref table.
    fn pdf_with_pages(pages: &[&str]) -> Vec<u8> {
        let font_id = 3 + 2 * pages.len();
        let kids: Vec<String> = (0..pages.len()).map(|i| format!("{} 0 R", 3 + 2 * i)).collect();

        let mut objects = vec![
            "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
            format!(
                "<< /Type /Pages /Kids [{}] /Count {} >>",
                kids.join(" "),
                pages.len()
            ),
        ];
        for (i, text) in pages.iter().enumerate() {
            let stream = format!("BT /F1 12 Tf 20 100 Td ({text}) Tj ET");
            objects.push(format!(
                "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 200 200] \
                 /Resources << /Font << /F1 {font_id} 0 R >> >> /Contents {} 0 R >>",
                4 + 2 * i
            ));
            objects.push(format!(
                "<< /Length {} >>\nstream\n{stream}\nendstream",
                stream.len()
            ));
        }
        objects.push(
            "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>"
                .to_string(),
        );

        let mut pdf = b"%PDF-1.4\n".to_vec();
        let mut offsets = Vec::new();
        for (i, body) in objects.iter().enumerate() {
            offsets.push(pdf.len());
            pdf.extend_from_slice(format!("{} 0 obj\n{body}\nendobj\n", i + 1).as_bytes());
        }

        let xref_at = pdf.len();
        pdf.extend_from_slice(format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1).as_bytes());
        for offset in offsets {
            pdf.extend_from_slice(format!("{offset:010} 00000 n \n").as_bytes());
        }
        pdf.extend_from_slice(
            format!(
                "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{xref_at}\n%%EOF\n",
                objects.len() + 1
            )
            .as_bytes(),
        );
        pdf
    }

    #[test]
    fn test_pages_are_joined_without_separators() {
        let pdf = pdf_with_pages(&["Hello", "World"]);
        assert_eq!(extract_pdf_text(&pdf).unwrap(), "HelloWorld");
    }

    #[test]
    fn test_single_page_has_no_leading_break() {
        let pdf = pdf_with_pages(&["Resume"]);
        assert_eq!(extract_pdf_text(&pdf).unwrap(), "Resume");
    }
}
