//! Integration tests for the sales assistant service using mock collaborators.

mod mocks;

use mocks::{MockCatalogSource, MockDocumentStore, MockLanguageModel};
use std::sync::Arc;
use tour_sales_assistant::matching::MatchMode;
use tour_sales_assistant::models::{CatalogRecord, EmptyReason, Outcome};
use tour_sales_assistant::services::{AssistantSettings, SalesAssistant};
use tour_sales_assistant::StoreError;

fn catalog() -> Vec<CatalogRecord> {
    vec![
        CatalogRecord::new()
            .with_field("Tour", "Thái Lan 4N3Đ")
            .with_field("Giá", 12000000.0),
        CatalogRecord::new()
            .with_field("Tour", "Nhật Bản 5N4Đ")
            .with_field("Giá", 35000000.0)
            .with_field("Ghi chú", "Ngắm hoa anh đào Kyoto"),
    ]
}

struct Fixture {
    catalog: MockCatalogSource,
    store: MockDocumentStore,
    model: MockLanguageModel,
}

impl Fixture {
    fn new() -> Self {
        let store = MockDocumentStore::new();
        store.add_text_file(
            "d1",
            "lich-trinh-nhat-ban.txt",
            "Ngày 1: Hà Nội - Tokyo\nNgày 2: Núi Phú Sĩ\nNgày 3: Tham quan Kyoto",
        );
        store.add_text_file(
            "d2",
            "visa.txt",
            "Khách quốc tịch Mỹ vào Việt Nam cần e-visa.",
        );

        Self {
            catalog: MockCatalogSource::with_records(catalog()),
            store,
            model: MockLanguageModel::answering("Dạ, tour Nhật Bản có 5 ngày."),
        }
    }

    fn assistant(&self, settings: AssistantSettings) -> SalesAssistant {
        SalesAssistant::new(
            Arc::new(self.catalog.clone()),
            Arc::new(self.store.clone()),
            Arc::new(self.model.clone()),
            settings,
        )
    }

    fn default_assistant(&self) -> SalesAssistant {
        self.assistant(AssistantSettings::new("sheet", "folder"))
    }
}

#[test]
fn test_suggest_tours_ranks_matching_tour() {
    let fixture = Fixture::new();
    let outcome = fixture
        .default_assistant()
        .suggest_tours("muốn đi nhật bản tháng 3");

    let results = outcome.into_found().expect("expected matches");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].score, 2);
    assert_eq!(
        results[0].record.get("Tour").unwrap().to_string(),
        "Nhật Bản 5N4Đ"
    );
}

#[test]
fn test_suggest_tours_stopword_only_query_skips_catalog() {
    let fixture = Fixture::new();
    let outcome = fixture.default_assistant().suggest_tours("tư vấn giúp tour");

    assert!(matches!(outcome, Outcome::Empty(EmptyReason::EmptyQuery)));
    assert_eq!(fixture.catalog.get_call_count("fetch_records"), 0);
}

#[test]
fn test_suggest_tours_distinguishes_empty_conditions() {
    let fixture = Fixture::new();
    let assistant = fixture.default_assistant();
    assert!(matches!(
        assistant.suggest_tours("Châu Âu Paris"),
        Outcome::Empty(EmptyReason::NoMatches)
    ));

    let empty = Fixture {
        catalog: MockCatalogSource::new(),
        ..Fixture::new()
    };
    assert!(matches!(
        empty.default_assistant().suggest_tours("Nhật Bản"),
        Outcome::Empty(EmptyReason::EmptyCatalog)
    ));

    fixture.catalog.set_unavailable(true);
    assert!(matches!(
        assistant.suggest_tours("Nhật Bản"),
        Outcome::SourceUnavailable(StoreError::Unauthorized)
    ));
}

#[test]
fn test_suggest_tours_name_only_mode() {
    let fixture = Fixture::new();
    let settings = AssistantSettings::new("sheet", "folder").with_match_mode(MatchMode::NameOnly {
        field: "Tour".to_string(),
    });

    // "kyoto" only appears in the notes column
    let outcome = fixture.assistant(settings).suggest_tours("kyoto");
    assert!(matches!(outcome, Outcome::Empty(EmptyReason::NoMatches)));
}

#[test]
fn test_suggest_tours_respects_max_results() {
    let fixture = Fixture::new();
    let settings = AssistantSettings::new("sheet", "folder").with_max_results(1);

    let results = fixture
        .assistant(settings)
        .suggest_tours("thái lan hay nhật bản")
        .into_found()
        .unwrap();
    assert_eq!(results.len(), 1);
}

#[test]
fn test_knowledge_context_windows_around_question_term() {
    let fixture = Fixture::new();
    let settings = AssistantSettings::new("sheet", "folder").with_context_radius(20);

    let context = fixture
        .assistant(settings)
        .knowledge_context("Lịch trình có đi Kyoto không?")
        .into_found()
        .unwrap();

    assert!(context.text.contains("Kyoto"));
    assert!(context.text.chars().count() <= 40);
    assert_eq!(context.anchor.as_deref(), Some("kyoto"));
    assert_eq!(context.sources, vec!["lich-trinh-nhat-ban.txt", "visa.txt"]);
    assert_eq!(context.catalog_rows, 2);
}

#[test]
fn test_knowledge_context_includes_catalog_lines() {
    let fixture = Fixture::new();

    let context = fixture
        .default_assistant()
        .knowledge_context("giá tour")
        .into_found()
        .unwrap();

    assert!(context.text.contains("Tour: Nhật Bản 5N4Đ | Giá: 35000000"));
}

#[test]
fn test_knowledge_context_prefix_when_nothing_matches() {
    let fixture = Fixture::new();
    let settings = AssistantSettings::new("sheet", "folder").with_context_radius(6);

    let context = fixture
        .assistant(settings)
        .knowledge_context("Paris")
        .into_found()
        .unwrap();

    assert_eq!(context.text, "Ngày 1");
    assert_eq!(context.anchor, None);
}

#[test]
fn test_knowledge_context_degrades_to_documents() {
    let fixture = Fixture::new();
    fixture.catalog.set_unavailable(true);

    let context = fixture
        .default_assistant()
        .knowledge_context("visa")
        .into_found()
        .unwrap();

    assert_eq!(context.catalog_rows, 0);
    assert!(context.text.contains("e-visa"));
}

#[test]
fn test_knowledge_context_catalog_only_when_folder_forbidden() {
    let fixture = Fixture::new();
    fixture.store.set_forbidden(true);

    let context = fixture
        .default_assistant()
        .knowledge_context("Thái Lan")
        .into_found()
        .unwrap();

    assert!(context.sources.is_empty());
    assert!(context.text.contains("Thái Lan 4N3Đ"));
}

#[test]
fn test_forbidden_folder_differs_from_empty_folder() {
    let forbidden = Fixture::new();
    forbidden.store.set_forbidden(true);

    let empty = Fixture {
        catalog: MockCatalogSource::with_records(catalog()),
        store: MockDocumentStore::new(),
        model: MockLanguageModel::answering("ok"),
    };

    let forbidden_context = forbidden
        .default_assistant()
        .knowledge_context("Thái Lan")
        .into_found()
        .unwrap();
    let empty_context = empty
        .default_assistant()
        .knowledge_context("Thái Lan")
        .into_found()
        .unwrap();

    assert_eq!(forbidden_context.documents_status, "source_unavailable");
    assert_eq!(forbidden_context.unavailable.len(), 1);
    assert!(forbidden_context.unavailable[0].starts_with("documents:"));
    assert!(forbidden_context.is_partial());

    assert_eq!(empty_context.documents_status, "empty_folder");
    assert!(empty_context.unavailable.is_empty());
    assert_ne!(forbidden_context, empty_context);

    let forbidden_reply = forbidden.default_assistant().ask_company("Thái Lan");
    let empty_reply = empty.default_assistant().ask_company("Thái Lan");
    assert_eq!(forbidden_reply.context_status, "partial");
    assert_eq!(forbidden_reply.unavailable.len(), 1);
    assert_eq!(empty_reply.context_status, "found");
    assert!(empty_reply.unavailable.is_empty());
}

#[test]
fn test_failed_catalog_differs_from_empty_catalog() {
    let failed = Fixture::new();
    failed.catalog.set_unavailable(true);

    let empty = Fixture::new();
    let empty = Fixture {
        catalog: MockCatalogSource::new(),
        ..empty
    };

    let failed_context = failed
        .default_assistant()
        .knowledge_context("visa")
        .into_found()
        .unwrap();
    let empty_context = empty
        .default_assistant()
        .knowledge_context("visa")
        .into_found()
        .unwrap();

    assert_eq!(failed_context.catalog_status, "source_unavailable");
    assert!(failed_context.unavailable[0].starts_with("catalog:"));
    assert_eq!(empty_context.catalog_status, "empty_catalog");
    assert_eq!(empty_context.documents_status, "found");
    assert!(!empty_context.is_partial());
}

#[test]
fn test_knowledge_context_unavailable_when_both_sources_fail() {
    let fixture = Fixture::new();
    fixture.store.set_forbidden(true);
    fixture.catalog.set_unavailable(true);

    let outcome = fixture.default_assistant().knowledge_context("visa");
    assert!(matches!(
        outcome,
        Outcome::SourceUnavailable(StoreError::Forbidden(_))
    ));
}

#[test]
fn test_knowledge_context_empty_folder_and_catalog() {
    let fixture = Fixture {
        catalog: MockCatalogSource::new(),
        store: MockDocumentStore::new(),
        model: MockLanguageModel::answering("ok"),
    };

    let outcome = fixture.default_assistant().knowledge_context("visa");
    assert!(matches!(outcome, Outcome::Empty(EmptyReason::EmptyFolder)));
}

#[test]
fn test_corrupt_document_does_not_block_context() {
    let fixture = Fixture::new();
    fixture.store.add_file("d0", "a-hong.docx", b"PK\x03\x04 truncated");

    let context = fixture
        .default_assistant()
        .knowledge_context("Kyoto")
        .into_found()
        .unwrap();

    assert_eq!(context.failures.len(), 1);
    assert_eq!(context.failures[0].name, "a-hong.docx");
    assert!(context.text.contains("Kyoto"));
}

#[test]
fn test_each_call_refetches_documents() {
    let fixture = Fixture::new();
    let assistant = fixture.default_assistant();

    assistant.knowledge_context("Kyoto");
    assistant.knowledge_context("Kyoto");

    assert_eq!(fixture.store.get_call_count("list_files"), 2);
    assert_eq!(fixture.store.get_call_count("fetch"), 4);
}

#[test]
fn test_ask_company_sends_grounded_prompt() {
    let fixture = Fixture::new();
    let reply = fixture
        .default_assistant()
        .ask_company("Tour Nhật có đi Kyoto không?");

    assert_eq!(reply.answer.as_deref(), Some("Dạ, tour Nhật Bản có 5 ngày."));
    assert_eq!(reply.context_status, "found");
    assert_eq!(reply.sources.len(), 2);
    assert!(reply.unavailable.is_empty());

    let prompts = fixture.model.prompts();
    assert_eq!(prompts.len(), 1);
    let (system, prompt) = &prompts[0];
    assert!(!system.is_empty());
    assert!(prompt.contains("Ngày 3: Tham quan Kyoto"));
    assert!(prompt.contains("Câu hỏi:\nTour Nhật có đi Kyoto không?"));
}

#[test]
fn test_ask_company_source_unavailable_skips_model() {
    let fixture = Fixture::new();
    fixture.store.set_forbidden(true);
    fixture.catalog.set_unavailable(true);

    let reply = fixture.default_assistant().ask_company("visa");

    assert!(reply.answer.is_none());
    assert_eq!(reply.context_status, "source_unavailable");
    assert!(fixture.model.prompts().is_empty());
}

#[test]
fn test_ask_company_empty_question() {
    let fixture = Fixture::new();
    let reply = fixture.default_assistant().ask_company("   ");

    assert_eq!(reply.context_status, "empty_query");
    assert!(fixture.model.prompts().is_empty());
    assert_eq!(fixture.store.get_call_count("list_files"), 0);
}

#[test]
fn test_model_error_reported_in_reply() {
    let fixture = Fixture {
        model: MockLanguageModel::without_key(),
        ..Fixture::new()
    };

    let reply = fixture.default_assistant().ask_company("Kyoto");
    assert!(reply.answer.is_none());
    assert!(reply.error.unwrap().contains("API key"));
}

#[test]
fn test_handle_objection_does_not_retrieve() {
    let fixture = Fixture::new();
    let reply = fixture.default_assistant().handle_objection("Giá cao quá");

    assert!(reply.answer.is_some());
    assert_eq!(reply.context_status, "not_used");
    assert_eq!(fixture.store.get_call_count("list_files"), 0);
    assert!(fixture.model.last_prompt().unwrap().contains("Giá cao quá"));
}

#[test]
fn test_compare_tours_asks_grounded_question() {
    let fixture = Fixture::new();
    let reply = fixture
        .default_assistant()
        .compare_tours("Nhật Bản", "Thái Lan");

    assert!(reply.answer.is_some());
    let prompt = fixture.model.last_prompt().unwrap();
    assert!(prompt.contains("So sánh 2 tour Nhật Bản và Thái Lan"));
    assert!(prompt.contains("Dữ liệu nội bộ công ty"));
}

#[test]
fn test_visa_requirements_requires_both_fields() {
    let fixture = Fixture::new();
    let assistant = fixture.default_assistant();

    let missing = assistant.visa_requirements("", "Việt Nam");
    assert_eq!(missing.context_status, "empty_query");

    let reply = assistant.visa_requirements("Mỹ", "Việt Nam");
    assert!(reply.answer.is_some());
    assert!(fixture
        .model
        .last_prompt()
        .unwrap()
        .contains("e-visa"));
}

#[test]
fn test_compose_company_prompt_without_model() {
    let fixture = Fixture::new();
    let prompt = fixture
        .default_assistant()
        .compose_company_prompt("Kyoto")
        .into_found()
        .unwrap();

    assert!(prompt.contains("Kyoto"));
    assert!(fixture.model.prompts().is_empty());
}
