use std::io::Write;
use std::sync::Arc;

use lecturelens::application::ports::{DocumentParseError, DocumentParser, SourceNormalizer};
use lecturelens::domain::{NormalizationOptions, Source, SourceKind};
use lecturelens::infrastructure::text_processing::{DocumentNormalizer, PdfAdapter};

use crate::helpers::build_pdf;

fn write_temp_pdf(bytes: &[u8]) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".pdf").tempfile().unwrap();
    file.write_all(bytes).unwrap();
    file
}

#[test]
fn given_three_page_pdf_when_parsing_then_returns_numbered_pages_in_order() {
    let file = write_temp_pdf(&build_pdf(&["Alpha page", "Bravo page", "Charlie page"]));

    let pages = PdfAdapter::new().parse(file.path(), false).unwrap();

    assert_eq!(pages.len(), 3);
    assert_eq!(
        pages.iter().map(|p| p.number).collect::<Vec<_>>(),
        vec![1, 2, 3]
    );
    assert!(pages[0].text.contains("Alpha"));
    assert!(pages[1].text.contains("Bravo"));
    assert!(pages[2].text.contains("Charlie"));
    assert!(pages.iter().all(|p| matches!(&p.images, Ok(images) if images.is_empty())));
}

#[test]
fn given_garbage_bytes_when_parsing_then_returns_malformed() {
    let file = write_temp_pdf(b"this is not a pdf at all");

    let result = PdfAdapter::new().parse(file.path(), false);

    assert!(matches!(result, Err(DocumentParseError::Malformed(_))));
}

#[tokio::test]
async fn given_pdf_with_url_on_page_two_when_normalizing_then_url_is_removed_and_words_remain() {
    let pdf = build_pdf(&[
        "Introduction to operating systems",
        "See https://example.com/info for more.",
        "Summary of scheduling",
    ]);
    let normalizer = DocumentNormalizer::new(Arc::new(PdfAdapter::new()));

    let text = normalizer
        .normalize(
            &Source::new(pdf, SourceKind::Document),
            &NormalizationOptions::default(),
        )
        .await
        .unwrap();

    let text = text.as_str();
    assert!(!text.contains("example.com"));
    assert!(text.contains("See"));
    assert!(text.contains("for more."));
    let intro = text.find("Introduction").unwrap();
    let see = text.find("See").unwrap();
    let summary = text.find("Summary").unwrap();
    assert!(intro < see && see < summary);
}
