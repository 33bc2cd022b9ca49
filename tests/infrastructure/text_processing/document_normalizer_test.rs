use std::sync::Arc;
use std::time::Duration;

use lecturelens::application::ports::{
    DocumentPage, DocumentParseError, IngestError, NormalizationError, SourceNormalizer,
};
use lecturelens::domain::{NormalizationOptions, Source, SourceKind};
use lecturelens::infrastructure::text_processing::DocumentNormalizer;

use crate::helpers::{StubDocumentParser, StubRecognizer, image};

fn document() -> Source {
    Source::new(b"%PDF-1.4 stub".to_vec(), SourceKind::Document)
}

fn with_images(number: u32, text: &str, indices: &[usize]) -> DocumentPage {
    DocumentPage {
        number,
        text: text.to_string(),
        images: Ok(indices.iter().copied().map(image).collect()),
    }
}

#[tokio::test]
async fn given_three_pages_when_normalizing_then_concatenates_in_page_order() {
    let parser = Arc::new(StubDocumentParser::with_pages(vec![
        DocumentPage::text_only(1, "Page one intro"),
        DocumentPage::text_only(2, "See https://example.com/info for more."),
        DocumentPage::text_only(3, "Page three wrap up"),
    ]));
    let normalizer = DocumentNormalizer::new(parser);

    let text = normalizer
        .normalize(&document(), &NormalizationOptions::default())
        .await
        .unwrap();

    assert_eq!(
        text.as_str(),
        "Page one intro\n\nSee /info for more.\n\nPage three wrap up"
    );
    assert!(!text.as_str().contains("example.com"));
}

#[tokio::test]
async fn given_noise_split_across_pages_when_normalizing_then_pages_are_cleaned_independently() {
    let parser = Arc::new(StubDocumentParser::with_pages(vec![
        DocumentPage::text_only(1, "ends with ab"),
        DocumentPage::text_only(2, "cd.ef starts page two"),
    ]));
    let normalizer = DocumentNormalizer::new(parser);

    let text = normalizer
        .normalize(&document(), &NormalizationOptions::default())
        .await
        .unwrap();

    assert_eq!(text.as_str(), "ends with ab\n\n starts page two");
}

#[tokio::test]
async fn given_image_recovery_when_one_image_fails_then_page_keeps_the_rest_and_failure_is_recorded() {
    let parser = Arc::new(StubDocumentParser::with_pages(vec![
        with_images(1, "Diagram page", &[0, 1, 2]),
        DocumentPage::text_only(2, "Closing page"),
    ]));
    let normalizer =
        DocumentNormalizer::new(parser).with_recognizer(Arc::new(StubRecognizer::failing_on(&[1])));

    let text = normalizer
        .normalize(
            &document(),
            &NormalizationOptions::default().with_image_text_recovery(true),
        )
        .await
        .unwrap();

    assert_eq!(
        text.as_str(),
        "Diagram page\n\nimage text 0\n\nimage text 2\n\nClosing page"
    );
    let failures = text.recovery_failures();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].page_number, 1);
    assert_eq!(failures[0].image_index, Some(1));
}

#[tokio::test]
async fn given_recovery_disabled_when_normalizing_then_images_are_ignored() {
    let parser = Arc::new(StubDocumentParser::with_pages(vec![with_images(
        1,
        "Diagram page",
        &[0],
    )]));
    let normalizer =
        DocumentNormalizer::new(parser).with_recognizer(Arc::new(StubRecognizer::new()));

    let text = normalizer
        .normalize(&document(), &NormalizationOptions::default())
        .await
        .unwrap();

    assert_eq!(text.as_str(), "Diagram page");
    assert!(text.recovery_failures().is_empty());
}

#[tokio::test]
async fn given_page_images_unlistable_when_recovering_then_records_page_level_failure() {
    let parser = Arc::new(StubDocumentParser::with_pages(vec![DocumentPage {
        number: 1,
        text: "Text survives".to_string(),
        images: Err(DocumentParseError::ImageExtraction("pdfium missing".into())),
    }]));
    let normalizer =
        DocumentNormalizer::new(parser).with_recognizer(Arc::new(StubRecognizer::new()));

    let text = normalizer
        .normalize(
            &document(),
            &NormalizationOptions::default().with_image_text_recovery(true),
        )
        .await
        .unwrap();

    assert_eq!(text.as_str(), "Text survives");
    assert_eq!(text.recovery_failures()[0].image_index, None);
}

#[tokio::test]
async fn given_recovery_without_recognizer_when_normalizing_then_each_image_is_a_recorded_failure() {
    let parser = Arc::new(StubDocumentParser::with_pages(vec![with_images(
        1,
        "Diagram page",
        &[0, 1],
    )]));
    let normalizer = DocumentNormalizer::new(parser);

    let text = normalizer
        .normalize(
            &document(),
            &NormalizationOptions::default().with_image_text_recovery(true),
        )
        .await
        .unwrap();

    assert_eq!(text.as_str(), "Diagram page");
    assert_eq!(text.recovery_failures().len(), 2);
}

#[tokio::test]
async fn given_only_blank_pages_when_normalizing_then_fails_with_no_text_found() {
    let parser = Arc::new(StubDocumentParser::with_pages(vec![
        DocumentPage::text_only(1, "   "),
        DocumentPage::text_only(2, "\n\n"),
    ]));
    let normalizer = DocumentNormalizer::new(parser);

    let result = normalizer
        .normalize(&document(), &NormalizationOptions::default())
        .await;

    assert!(matches!(
        result,
        Err(NormalizationError::Ingest(IngestError::NoTextFound))
    ));
}

#[tokio::test]
async fn given_malformed_document_when_normalizing_then_fails_with_ingest_error() {
    let parser = Arc::new(StubDocumentParser::failing(DocumentParseError::Malformed(
        "not a pdf".into(),
    )));
    let normalizer = DocumentNormalizer::new(parser);

    let result = normalizer
        .normalize(&document(), &NormalizationOptions::default())
        .await;

    assert!(matches!(
        result,
        Err(NormalizationError::Ingest(IngestError::Document(_)))
    ));
}

#[tokio::test]
async fn given_slow_parser_when_timeout_elapses_then_fails_with_timed_out() {
    let parser = Arc::new(
        StubDocumentParser::with_pages(vec![DocumentPage::text_only(1, "late")])
            .slow(Duration::from_millis(500)),
    );
    let normalizer =
        DocumentNormalizer::new(parser).with_extraction_timeout(Duration::from_millis(50));

    let result = normalizer
        .normalize(&document(), &NormalizationOptions::default())
        .await;

    assert!(matches!(
        result,
        Err(NormalizationError::Ingest(IngestError::TimedOut))
    ));
}

#[tokio::test]
async fn given_any_outcome_when_normalizing_then_staged_file_is_removed() {
    let parser = Arc::new(StubDocumentParser::with_pages(vec![DocumentPage::text_only(
        1, "   ",
    )]));
    let normalizer = DocumentNormalizer::new(parser.clone());

    let result = normalizer
        .normalize(&document(), &NormalizationOptions::default())
        .await;

    assert!(result.is_err());
    let staged = parser.saw_path().unwrap();
    assert!(!staged.exists());
}

#[tokio::test]
async fn given_timed_out_parse_when_it_finishes_later_then_file_was_readable_and_is_removed() {
    let parser = Arc::new(
        StubDocumentParser::with_pages(vec![DocumentPage::text_only(1, "late")])
            .slow(Duration::from_millis(300)),
    );
    let normalizer = DocumentNormalizer::new(parser.clone())
        .with_extraction_timeout(Duration::from_millis(50));

    let result = normalizer
        .normalize(&document(), &NormalizationOptions::default())
        .await;
    assert!(matches!(
        result,
        Err(NormalizationError::Ingest(IngestError::TimedOut))
    ));

    let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
    while parser.path_outlived_delay().is_none() && tokio::time::Instant::now() < deadline {
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    assert_eq!(parser.path_outlived_delay(), Some(true));

    tokio::time::sleep(Duration::from_millis(100)).await;
    assert!(!parser.saw_path().unwrap().exists());
}
