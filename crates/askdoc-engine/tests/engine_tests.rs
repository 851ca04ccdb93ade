use std::fs;
use std::io::Write;
use tempfile::TempDir;

use askdoc_core::types::{ChunkStrategy, RetrievalParams, SynthesisParams};
use askdoc_core::Error;
use askdoc_engine::RagEngine;

fn engine() -> RagEngine {
    RagEngine::new(RetrievalParams::default(), SynthesisParams::default())
}

#[test]
fn single_sentence_document_answers_its_own_question() {
    let mut rag = engine();
    rag.add_documents("Sir Andrew Wiles won the Fields Medal in 1986.", &ChunkStrategy::SentenceRegex)
        .expect("ingest");

    assert_eq!(rag.chunks().len(), 1);
    assert_eq!(rag.chunks()[0].text, "Sir Andrew Wiles won the Fields Medal in 1986.");

    let results = rag.retrieve("Who won the Fields Medal?").expect("retrieve");
    assert_eq!(results.len(), 1);
    assert!(results[0].score > 0.0);

    let answer = rag.generate_response("Who won the Fields Medal?").expect("answer");
    assert!(answer.text.contains("Wiles"));
    assert!(answer.text.starts_with("Based on the information: "));
    assert!(answer.is_grounded());
}

#[test]
fn querying_before_ingest_is_an_error() {
    let rag = engine();
    assert_eq!(rag.generate_response("anything?").unwrap_err(), Error::EngineNotReady);
    assert!(!rag.is_ready());
}

#[test]
fn blank_queries_are_rejected() {
    let mut rag = engine();
    rag.add_documents("Some indexed text about topics.", &ChunkStrategy::SentenceRegex)
        .expect("ingest");
    assert_eq!(rag.generate_response("   \t ").unwrap_err(), Error::EmptyQuery);
}

#[test]
fn unrelated_query_yields_the_fallback_answer() {
    let mut rag = engine();
    rag.add_documents(
        "The mitochondria is the powerhouse of the cell. Ribosomes assemble proteins.",
        &ChunkStrategy::SentenceRegex,
    )
    .expect("ingest");

    let answer = rag.generate_response("quarterly revenue forecast?").expect("answer");
    assert!(!answer.is_grounded());
    assert_eq!(answer.text, "I don't have enough information to answer that question.");
}

#[test]
fn failed_ingest_keeps_the_previous_index() {
    let mut rag = engine();
    rag.add_documents("Gravity bends light around massive objects.", &ChunkStrategy::SentenceRegex)
        .expect("ingest");

    assert_eq!(rag.add_documents("   ", &ChunkStrategy::SentenceRegex).unwrap_err(), Error::EmptyDocument);
    assert_eq!(
        rag.add_documents("... !! ..", &ChunkStrategy::SentenceRegex).unwrap_err(),
        Error::EmptyVocabulary
    );

    // The original document still answers.
    let answer = rag.generate_response("What bends light?").expect("answer");
    assert!(answer.text.contains("Gravity"));
}

#[test]
fn invalid_strategy_parameters_fail_before_any_work() {
    let mut rag = engine();
    let result = rag.add_documents("fine text", &ChunkStrategy::SlidingWindow { window_size: 5, step_size: 9 });
    assert!(matches!(result, Err(Error::InvalidConfig(_))));
    assert!(!rag.is_ready());
}

#[test]
fn reingesting_replaces_all_state() {
    let mut rag = engine();
    rag.add_documents("Volcanoes erupt molten lava.", &ChunkStrategy::SentenceRegex).expect("ingest");
    rag.add_documents("Glaciers carve deep valleys.", &ChunkStrategy::SentenceRegex).expect("reingest");

    let stale = rag.generate_response("What about volcanoes and lava?").expect("answer");
    assert!(!stale.is_grounded(), "old document must be gone");

    let fresh = rag.generate_response("What do glaciers carve?").expect("answer");
    assert!(fresh.text.contains("valleys"));
}

#[test]
fn ingest_is_idempotent_for_identical_arguments() {
    let text = "Bees pollinate flowering plants. Honey is stored in wax combs. \
                Workers communicate through dances.";
    let strategy = ChunkStrategy::FixedSize { size: 5, overlap: 1 };

    let mut rag = engine();
    rag.add_documents(text, &strategy).expect("first ingest");
    let first_chunks = rag.chunks().to_vec();
    let first_answer = rag.generate_response("How do bees communicate?").expect("answer");

    rag.add_documents(text, &strategy).expect("second ingest");
    assert_eq!(rag.chunks(), first_chunks.as_slice());
    let second_answer = rag.generate_response("How do bees communicate?").expect("answer");
    assert_eq!(first_answer, second_answer);
}

#[test]
fn retrieval_respects_top_k_and_rank_order() {
    let mut rag = RagEngine::new(
        RetrievalParams { top_k: 2, min_score: 0.0 },
        SynthesisParams::default(),
    );
    rag.add_documents(
        "Comets orbit the sun on long paths. Asteroids also orbit the sun. \
         Meteor showers light the night sky. Planets orbit the sun in ellipses.",
        &ChunkStrategy::SentenceRegex,
    )
    .expect("ingest");

    let results = rag.retrieve("What orbits the sun?").expect("retrieve");
    assert!(results.len() <= 2);
    for pair in results.windows(2) {
        assert!(pair[0].score >= pair[1].score);
    }
}

#[test]
fn score_annotations_show_up_when_enabled() {
    let mut rag = RagEngine::new(
        RetrievalParams::default(),
        SynthesisParams { max_answer_chars: 4000, annotate_scores: true },
    );
    rag.add_documents("Copper conducts electricity well.", &ChunkStrategy::SentenceRegex)
        .expect("ingest");

    let answer = rag.generate_response("What conducts electricity?").expect("answer");
    assert!(answer.text.contains("(similarity = "));
}

#[test]
fn long_answers_truncate_at_chunk_boundaries() {
    let mut rag = RagEngine::new(
        RetrievalParams { top_k: 3, min_score: 0.0 },
        SynthesisParams { max_answer_chars: 80, annotate_scores: false },
    );
    rag.add_documents(
        "Solar panels convert sunlight into electricity. \
         Wind turbines convert moving air into electricity. \
         Hydroelectric dams convert falling water into electricity.",
        &ChunkStrategy::SentenceRegex,
    )
    .expect("ingest");

    let answer = rag.generate_response("What converts things into electricity?").expect("answer");
    // The budget fits the prefix plus one chunk; the rest is cut whole.
    assert!(answer.text.starts_with("Based on the information: "));
    assert!(answer.text.ends_with("electricity."));
    assert!(answer.sources.len() > 1, "sources keep the full retrieval result");
}

#[test]
fn hierarchical_answers_carry_heading_context() {
    let mut rag = engine();
    rag.add_documents(
        "# Manual\n\n## Battery\n\nCharge the battery for eight hours before first use.\n\n## Storage\n\nKeep the device in a dry place.",
        &ChunkStrategy::Hierarchical { max_chars: 400, preserve_context: true },
    )
    .expect("ingest");

    let answer = rag.generate_response("How long should the battery charge?").expect("answer");
    assert!(answer.text.contains("Manual > Battery"));
    assert!(answer.text.contains("eight hours"));
}

#[test]
fn documents_load_from_disk_like_any_collaborator_would() {
    let tmp = TempDir::new().expect("tempdir");
    let path = tmp.path().join("notes.txt");
    let mut file = fs::File::create(&path).expect("create");
    writeln!(file, "The library opens at nine in the morning. It closes at six.").expect("write");

    let text = fs::read_to_string(&path).expect("read");
    let mut rag = engine();
    rag.add_documents(&text, &ChunkStrategy::SentenceRegex).expect("ingest");

    let answer = rag.generate_response("When does the library open?").expect("answer");
    assert!(answer.text.contains("nine"));
}
