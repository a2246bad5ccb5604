use docwise_corpus::{Document, DocumentKind};
use docwise_engine::{Engine, EngineConfig};

fn engine() -> Engine {
    Engine::new(EngineConfig::default())
}

fn text_doc(id: &str, name: &str, body: &str) -> Document {
    Document::new(id, name, body, DocumentKind::Text)
}

// -- Degenerate outcomes --

#[tokio::test]
async fn empty_corpus_yields_upload_prompt() {
    let engine = engine();
    let answer = engine.ask("What is Rust?").await.unwrap();
    assert!(answer.text.contains("don't have any documents uploaded yet"));
    assert!((answer.confidence - 0.0).abs() < 1e-9);
    assert!(answer.primary_source.is_none());
    assert_eq!(answer.supplementary_source_count, 0);
}

#[tokio::test]
async fn blank_question_yields_prompt_for_input() {
    let engine = engine();
    engine
        .add_document(text_doc("a", "A", "Some content here."))
        .unwrap();
    let answer = engine.ask("   ").await.unwrap();
    assert_eq!(
        answer.text,
        "Please enter a question so I can search your documents."
    );
}

#[tokio::test]
async fn unrelated_question_yields_no_candidates() {
    let engine = engine();
    engine
        .add_document(text_doc(
            "compilers",
            "Compilers",
            "Compilers translate source code into machine code.",
        ))
        .unwrap();
    let answer = engine.ask("pelican migration routes").await.unwrap();
    assert!(answer.text.contains("couldn't find relevant information"));
    assert!(answer.primary_source.is_none());
}

#[tokio::test]
async fn weak_candidates_fall_below_threshold() {
    // Both documents are pulled in only by the interrogative/cue
    // co-occurrence boost; their re-ranked relevance is zero, so the
    // dynamic cutoff discards them.
    let engine = engine();
    engine
        .add_document(text_doc(
            "schedule",
            "Schedule",
            "The date of the event appears on page two.",
        ))
        .unwrap();
    engine
        .add_document(text_doc(
            "logistics",
            "Logistics",
            "Times and dates for all sessions are listed in the appendix.",
        ))
        .unwrap();
    let answer = engine.ask("when is lunch?").await.unwrap();
    assert!(answer.text.contains("couldn't find a specific answer"));
    assert!((answer.confidence - 0.0).abs() < 1e-9);
}

// -- Synthesized answers per query type --

#[tokio::test]
async fn definition_question_end_to_end() {
    let engine = engine();
    engine
        .add_document(text_doc(
            "rust-guide",
            "Rust Guide",
            "Rust is defined as a systems programming language focused on \
             safety. It prevents data races at compile time.",
        ))
        .unwrap();

    let answer = engine.ask("What is Rust?").await.unwrap();
    assert!(answer.text.starts_with("**Definition:**"));
    assert!(answer.text.contains("systems programming language"));
    assert!(answer.confidence > 0.0);
    assert_eq!(answer.primary_source.as_deref(), Some("Rust Guide"));
    assert_eq!(answer.supplementary_source_count, 0);
}

#[tokio::test]
async fn explanation_question_uses_both_sources() {
    let engine = engine();
    engine
        .add_document(text_doc(
            "solar",
            "Solar Panels",
            "A solar panel converts sunlight into electricity using photovoltaic cells.",
        ))
        .unwrap();
    engine
        .add_document(text_doc(
            "battery",
            "Batteries",
            "A battery stores electricity produced by the solar panel for later use.",
        ))
        .unwrap();

    let answer = engine
        .ask("How does a solar panel produce electricity?")
        .await
        .unwrap();
    assert!(answer.text.starts_with("**Explanation:**"));
    assert!(answer.confidence > 0.0);
    assert!(answer.primary_source.is_some());
    assert_eq!(answer.supplementary_source_count, 1);
}

#[tokio::test]
async fn numerical_question_keeps_chunks_with_digits() {
    let engine = engine();
    engine
        .add_document(text_doc(
            "jupiter",
            "Jupiter",
            "Jupiter has 95 confirmed moons orbiting it. The largest moon is Ganymede.",
        ))
        .unwrap();

    let answer = engine.ask("How many moons does Jupiter have?").await.unwrap();
    assert!(answer.text.starts_with("**Numerical Information:**"));
    assert!(answer.text.contains("95"));
}

#[tokio::test]
async fn why_question_collects_causal_sentences() {
    let engine = engine();
    engine
        .add_document(text_doc(
            "sky",
            "Sky",
            "The sky appears blue because sunlight scatters off air molecules \
             in the atmosphere.",
        ))
        .unwrap();

    let answer = engine.ask("Why is the sky blue?").await.unwrap();
    assert!(answer.text.starts_with("**Reasons:**"));
    assert!(answer.text.contains("because"));
}

#[tokio::test]
async fn when_question_keeps_temporal_chunks() {
    let engine = engine();
    engine
        .add_document(text_doc(
            "war",
            "History",
            "The war ended in 1945 after the surrender was signed.",
        ))
        .unwrap();

    let answer = engine.ask("When did the war end?").await.unwrap();
    assert!(answer.text.starts_with("**Time-related Information:**"));
    assert!(answer.text.contains("1945"));
}

#[tokio::test]
async fn list_question_extracts_numbered_items() {
    let engine = engine();
    engine
        .add_document(text_doc(
            "rocks",
            "Rocks",
            "There are three types of rocks. 1. Igneous rocks form from cooled \
             magma. 2. Sedimentary rocks form from deposited material. \
             3. Metamorphic rocks form under heat and pressure.",
        ))
        .unwrap();

    let answer = engine.ask("List the types of rocks").await.unwrap();
    assert!(answer.text.starts_with("**List of Items:**"));
    assert!(answer.text.contains("Igneous"));
}

#[tokio::test]
async fn comparison_question_enumerates_points() {
    let engine = engine();
    engine
        .add_document(text_doc(
            "rock-formation",
            "Rock Formation",
            "Igneous rocks form from magma while sedimentary rocks form from \
             sediment layers.",
        ))
        .unwrap();

    let answer = engine
        .ask("Compare igneous and sedimentary rocks")
        .await
        .unwrap();
    assert!(answer.text.starts_with("**Comparison Analysis:**"));
    assert!(answer.text.contains("**Point 1:**"));
}

#[tokio::test]
async fn summary_question_joins_chunks() {
    let engine = engine();
    engine
        .add_document(text_doc(
            "rocks",
            "Rocks",
            "Rocks form through geological processes over millions of years.",
        ))
        .unwrap();

    let answer = engine.ask("Summarize the rock document").await.unwrap();
    assert!(answer.text.starts_with("**Summary:**"));
    assert!(answer.text.contains("geological"));
}

// -- Corpus lifecycle through the handle --

#[tokio::test]
async fn removal_empties_the_corpus() {
    let engine = engine();
    engine
        .add_document(text_doc("a", "A", "Cats eat fish and sleep all day."))
        .unwrap();
    let before = engine.ask("What do cats eat?").await.unwrap();
    assert!(before.confidence > 0.0);

    engine.remove_document("a").unwrap();
    let after = engine.ask("What do cats eat?").await.unwrap();
    assert!(after.text.contains("don't have any documents uploaded yet"));
}

#[tokio::test]
async fn multi_paragraph_document_produces_multiple_chunks() {
    let engine = engine();
    engine
        .add_document(text_doc(
            "toolchain",
            "Toolchain",
            "Compilers translate source code into machine code.\n\nLinkers \
             combine object files into a single executable.",
        ))
        .unwrap();
    assert_eq!(engine.chunk_count().await.unwrap(), 2);
    assert_eq!(engine.document_names().await.unwrap(), vec!["Toolchain"]);
}

#[tokio::test]
async fn cloned_handles_share_one_corpus() {
    let engine = engine();
    let other = engine.clone();
    other
        .add_document(text_doc("a", "A", "Bees pollinate flowering plants."))
        .unwrap();

    let answer = engine.ask("How do bees pollinate plants?").await.unwrap();
    assert!(answer.confidence > 0.0);
    assert_eq!(answer.primary_source.as_deref(), Some("A"));
}

// -- Serialization of the answer contract --

#[tokio::test]
async fn answer_serializes_with_stable_field_names() {
    let engine = engine();
    engine
        .add_document(text_doc(
            "rust-guide",
            "Rust Guide",
            "Rust is defined as a systems programming language focused on safety.",
        ))
        .unwrap();

    let answer = engine.ask("What is Rust?").await.unwrap();
    let value = serde_json::to_value(&answer).unwrap();
    assert!(value["text"].is_string());
    assert!(value["confidence"].is_number());
    assert!(value["primary_source"].is_string());
    assert!(value["supplementary_source_count"].is_number());
}
