//! End-to-end pipeline tests with stub recognition engines.

use std::sync::Arc;

use async_trait::async_trait;

use fradigitize::extract::ClaimExtractor;
use fradigitize::ocr::{EngineKind, OcrEngine, OcrError, Page, RecognitionCascade, SourceDocument};
use fradigitize::pipeline::Digitizer;
use fradigitize::store::{ClaimStore, MemoryStore};
use fradigitize::DigitizeError;

const SAMPLE_FORM: &str = "Name of Claimant: Ramesh Kumar\nVillage: Bhimapur\nDistrict: Gadchiroli\nState: Maharashtra\nClaim Type: IFR\nStatus: Approved\nCoordinates: 20.1234, 79.1234";

/// Scripted recognition engine.
struct StubEngine {
    kind: EngineKind,
    available: bool,
    respond: Box<dyn Fn(&Page) -> Result<String, OcrError> + Send + Sync>,
}

impl StubEngine {
    /// Recognizes every page as "<prefix> page <n>".
    fn per_page(kind: EngineKind, prefix: &'static str) -> Self {
        Self {
            kind,
            available: true,
            respond: Box::new(move |page| Ok(format!("{} page {}", prefix, page.number))),
        }
    }

    /// Recognizes every page with the same fixed text.
    fn fixed(kind: EngineKind, text: &'static str) -> Self {
        Self {
            kind,
            available: true,
            respond: Box::new(move |_| Ok(text.to_string())),
        }
    }

    /// Fails on one page, recognizes the others.
    fn failing_on(kind: EngineKind, prefix: &'static str, fail_page: u32) -> Self {
        Self {
            kind,
            available: true,
            respond: Box::new(move |page| {
                if page.number == fail_page {
                    Err(OcrError::Failed(format!("engine error on page {}", page.number)))
                } else {
                    Ok(format!("{} page {}", prefix, page.number))
                }
            }),
        }
    }

    /// Precondition unmet; must be skipped, not counted as a failure.
    fn unavailable(kind: EngineKind) -> Self {
        Self {
            kind,
            available: false,
            respond: Box::new(|_| Err(OcrError::Unavailable("not configured".to_string()))),
        }
    }

    /// Cannot decode any page.
    fn undecodable(kind: EngineKind) -> Self {
        Self {
            kind,
            available: true,
            respond: Box::new(|_| Err(OcrError::Decode("bad image data".to_string()))),
        }
    }
}

#[async_trait]
impl OcrEngine for StubEngine {
    fn kind(&self) -> EngineKind {
        self.kind
    }

    fn is_available(&self) -> bool {
        self.available
    }

    fn availability_hint(&self) -> String {
        "stub".to_string()
    }

    async fn recognize_page(&self, page: &Page) -> Result<String, OcrError> {
        (self.respond)(page)
    }
}

fn pages(count: u32) -> Vec<Page> {
    (1..=count)
        .map(|number| Page {
            number,
            data: Vec::new(),
        })
        .collect()
}

fn cascade(engines: Vec<StubEngine>) -> RecognitionCascade {
    RecognitionCascade::new(
        engines
            .into_iter()
            .map(|engine| Arc::new(engine) as Arc<dyn OcrEngine>)
            .collect(),
    )
}

#[tokio::test]
async fn test_page_order_preserved() {
    let cascade = cascade(vec![
        StubEngine::per_page(EngineKind::CloudVision, "cloud"),
        StubEngine::per_page(EngineKind::Tesseract, "local"),
    ]);

    let text = cascade.recognize_pages(&pages(3)).await.unwrap();
    assert_eq!(text, "cloud page 1\ncloud page 2\ncloud page 3");
}

#[tokio::test]
async fn test_cloud_failure_discards_partial_results() {
    // Cloud succeeds on page 1 but fails on page 2: no cloud text may
    // survive into the final output.
    let cascade = cascade(vec![
        StubEngine::failing_on(EngineKind::CloudVision, "cloud", 2),
        StubEngine::per_page(EngineKind::Tesseract, "local"),
    ]);

    let text = cascade.recognize_pages(&pages(3)).await.unwrap();
    assert_eq!(text, "local page 1\nlocal page 2\nlocal page 3");
    assert!(!text.contains("cloud"));
}

#[tokio::test]
async fn test_unavailable_cloud_skips_to_local() {
    let cascade = cascade(vec![
        StubEngine::unavailable(EngineKind::CloudVision),
        StubEngine::per_page(EngineKind::Tesseract, "local"),
    ]);

    let text = cascade.recognize_pages(&pages(2)).await.unwrap();
    assert_eq!(text, "local page 1\nlocal page 2");
}

#[tokio::test]
async fn test_all_engines_exhausted_is_extraction_failed() {
    let cascade = cascade(vec![
        StubEngine::unavailable(EngineKind::CloudVision),
        StubEngine::failing_on(EngineKind::Tesseract, "local", 1),
    ]);

    let err = cascade.recognize_pages(&pages(1)).await.unwrap_err();
    assert!(matches!(err, DigitizeError::ExtractionFailed));
}

#[tokio::test]
async fn test_whitespace_only_text_is_extraction_failed() {
    let cascade = cascade(vec![
        StubEngine::fixed(EngineKind::CloudVision, "  \t"),
        StubEngine::fixed(EngineKind::Tesseract, " "),
    ]);

    let err = cascade.recognize_pages(&pages(2)).await.unwrap_err();
    assert!(matches!(err, DigitizeError::ExtractionFailed));
}

#[tokio::test]
async fn test_undecodable_page_is_fatal() {
    // A page the fallback engine cannot decode ends processing; another
    // attempt cannot recover it.
    let cascade = cascade(vec![
        StubEngine::unavailable(EngineKind::CloudVision),
        StubEngine::undecodable(EngineKind::Tesseract),
    ]);

    let err = cascade.recognize_pages(&pages(1)).await.unwrap_err();
    assert!(matches!(err, DigitizeError::Decode(_)));
}

#[tokio::test]
async fn test_digitize_single_image_document() {
    let digitizer = Digitizer::new(
        cascade(vec![
            StubEngine::fixed(EngineKind::CloudVision, SAMPLE_FORM),
            StubEngine::per_page(EngineKind::Tesseract, "local"),
        ]),
        ClaimExtractor::regex_only(),
    );

    let doc = SourceDocument::image(b"scanned claim form".to_vec());
    let record = digitizer.digitize(&doc).await.unwrap();

    assert_eq!(record.name.as_deref(), Some("Ramesh Kumar"));
    assert_eq!(record.village.as_deref(), Some("Bhimapur"));
    assert_eq!(record.district.as_deref(), Some("Gadchiroli"));
    assert_eq!(record.state.as_deref(), Some("Maharashtra"));
    assert_eq!(record.claim_type.as_deref(), Some("IFR"));
    assert_eq!(record.status.as_deref(), Some("Approved"));
    assert_eq!(record.latitude, Some(20.1234));
    assert_eq!(record.longitude, Some(79.1234));
    assert_eq!(record.raw_text, SAMPLE_FORM);
    assert_eq!(record.content_hash.as_ref().map(|h| h.len()), Some(64));
}

#[tokio::test]
async fn test_duplicate_gate_against_store() {
    let digitizer = Digitizer::new(
        cascade(vec![StubEngine::fixed(EngineKind::Tesseract, SAMPLE_FORM)]),
        ClaimExtractor::regex_only(),
    );
    let store = MemoryStore::new();

    let doc = SourceDocument::image(b"scan".to_vec());
    let record = digitizer.digitize(&doc).await.unwrap();

    // Nothing stored yet: admit.
    assert!(!digitizer.check_duplicate(&store, &record).await.unwrap());

    store.insert(&record).await.unwrap();

    // Identical raw text: reject.
    let again = digitizer.digitize(&doc).await.unwrap();
    assert!(digitizer.check_duplicate(&store, &again).await.unwrap());

    // Any character difference: admit.
    let mut changed = record.clone();
    changed.raw_text.push(' ');
    assert!(!digitizer.check_duplicate(&store, &changed).await.unwrap());
}
