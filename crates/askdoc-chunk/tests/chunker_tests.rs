use askdoc_chunk::chunk;
use askdoc_core::types::ChunkStrategy;
use askdoc_core::Error;

fn words(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}

#[test]
fn empty_and_whitespace_documents_are_rejected() {
    for strategy in [
        ChunkStrategy::FixedSize { size: 10, overlap: 0 },
        ChunkStrategy::SentenceRegex,
        ChunkStrategy::Paragraph,
    ] {
        assert_eq!(chunk("", &strategy), Err(Error::EmptyDocument));
        assert_eq!(chunk("  \n\t  ", &strategy), Err(Error::EmptyDocument));
    }
}

#[test]
fn invalid_parameters_fail_before_chunking() {
    let result = chunk("some text", &ChunkStrategy::FixedSize { size: 4, overlap: 4 });
    assert!(matches!(result, Err(Error::InvalidConfig(_))));
}

#[test]
fn every_strategy_yields_one_chunk_for_a_tiny_document() {
    let doc = "Hello world.";
    let strategies = [
        ChunkStrategy::FixedSize { size: 15, overlap: 2 },
        ChunkStrategy::SentenceRegex,
        ChunkStrategy::SentenceUnicode,
        ChunkStrategy::Paragraph,
        ChunkStrategy::SlidingWindow { window_size: 20, step_size: 10 },
        ChunkStrategy::Recursive { max_chars: 800, overlap_chars: 80 },
        ChunkStrategy::Semantic { threshold: 0.25, buffer: 1 },
        ChunkStrategy::Hierarchical { max_chars: 800, preserve_context: true },
    ];
    for strategy in strategies {
        let chunks = chunk(doc, &strategy).expect("chunking succeeds");
        assert_eq!(chunks.len(), 1, "strategy {} should yield one chunk", strategy.name());
        assert_eq!(chunks[0].text, doc);
        assert_eq!(chunks[0].index, 0);
    }
}

#[test]
fn chunking_is_deterministic() {
    let doc = "One sentence here. Another follows! And a third?\n\nA second paragraph too.";
    for strategy in [
        ChunkStrategy::SentenceRegex,
        ChunkStrategy::Semantic { threshold: 0.2, buffer: 2 },
        ChunkStrategy::Recursive { max_chars: 30, overlap_chars: 5 },
    ] {
        let first = chunk(doc, &strategy).expect("chunk");
        let second = chunk(doc, &strategy).expect("chunk");
        assert_eq!(first, second);
    }
}

#[test]
fn fixed_size_partitions_words_without_loss() {
    let doc = "alpha bravo charlie delta echo foxtrot golf hotel india juliet";
    let chunks = chunk(doc, &ChunkStrategy::FixedSize { size: 4, overlap: 0 }).expect("chunk");

    assert_eq!(chunks.len(), 3);
    for chunk in &chunks[..chunks.len() - 1] {
        assert_eq!(chunk.word_count, 4);
    }
    let last = chunks.last().expect("non-empty");
    assert!(last.word_count > 0 && last.word_count <= 4);

    let rebuilt: Vec<&str> = chunks.iter().flat_map(|c| words(&c.text)).collect();
    assert_eq!(rebuilt, words(doc));
}

#[test]
fn fixed_size_overlap_repeats_the_shared_words() {
    let doc = "alpha bravo charlie delta echo foxtrot golf hotel india juliet";
    let chunks = chunk(doc, &ChunkStrategy::FixedSize { size: 4, overlap: 2 }).expect("chunk");

    for chunk in &chunks {
        assert_eq!(chunk.word_count, 4, "ten words tile exactly with step two");
    }
    // Dropping each non-first chunk's overlapping prefix rebuilds the document.
    let mut rebuilt: Vec<&str> = words(&chunks[0].text);
    for chunk in &chunks[1..] {
        rebuilt.extend(words(&chunk.text).into_iter().skip(2));
    }
    assert_eq!(rebuilt, words(doc));
}

#[test]
fn sliding_window_emits_truncated_final_window() {
    let doc = "w1 w2 w3 w4 w5 w6 w7 w8 w9 w10 w11";
    let chunks =
        chunk(doc, &ChunkStrategy::SlidingWindow { window_size: 4, step_size: 3 }).expect("chunk");

    assert_eq!(chunks.len(), 4);
    for chunk in &chunks[..chunks.len() - 1] {
        assert_eq!(chunk.word_count, 4);
    }
    assert_eq!(chunks[3].word_count, 2, "last window is truncated, not dropped");
    assert_eq!(words(&chunks[1].text), vec!["w4", "w5", "w6", "w7"]);
}

#[test]
fn sentence_regex_splits_on_terminators() {
    let doc = "First sentence here. Second one follows! Does a question count? Trailing fragment";
    let chunks = chunk(doc, &ChunkStrategy::SentenceRegex).expect("chunk");

    let texts: Vec<&str> = chunks.iter().map(|c| c.text.as_str()).collect();
    assert_eq!(
        texts,
        vec![
            "First sentence here.",
            "Second one follows!",
            "Does a question count?",
            "Trailing fragment",
        ]
    );
    for chunk in &chunks {
        assert_eq!(&doc[chunk.start..chunk.end], chunk.text, "chunks are verbatim slices");
    }
}

#[test]
fn sentence_unicode_splits_sentences() {
    let doc = "Hello world! How are you today? All good.";
    let chunks = chunk(doc, &ChunkStrategy::SentenceUnicode).expect("chunk");

    assert_eq!(chunks.len(), 3);
    assert_eq!(chunks[0].text, "Hello world!");
    assert_eq!(chunks[2].text, "All good.");
}

#[test]
fn paragraphs_collapse_blank_line_runs() {
    let doc = "Paragraph one.\n\n\n\nParagraph two.\n\n   \n\nParagraph three.";
    let chunks = chunk(doc, &ChunkStrategy::Paragraph).expect("chunk");

    let texts: Vec<&str> = chunks.iter().map(|c| c.text.as_str()).collect();
    assert_eq!(texts, vec!["Paragraph one.", "Paragraph two.", "Paragraph three."]);
    for chunk in &chunks {
        assert_eq!(&doc[chunk.start..chunk.end], chunk.text);
    }
}

#[test]
fn recursive_respects_the_character_budget() {
    let doc = "First paragraph with some words in it.\n\nSecond paragraph, also fairly short.\n\nThird one closes the document here.";
    let chunks =
        chunk(doc, &ChunkStrategy::Recursive { max_chars: 60, overlap_chars: 0 }).expect("chunk");

    assert_eq!(chunks.len(), 3, "no two paragraphs fit one 60-char budget");
    for chunk in &chunks {
        assert!(chunk.char_count <= 60, "chunk exceeds budget: {:?}", chunk.text);
    }
    let rebuilt: Vec<&str> = chunks.iter().flat_map(|c| words(&c.text)).collect();
    assert_eq!(rebuilt, words(doc));
}

#[test]
fn recursive_overlap_carries_a_tail_forward() {
    let doc = "First paragraph with some words in it.\n\nSecond paragraph, also fairly short.";
    let chunks =
        chunk(doc, &ChunkStrategy::Recursive { max_chars: 60, overlap_chars: 15 }).expect("chunk");

    assert_eq!(chunks.len(), 2);
    assert!(chunks[1].start < chunks[0].end, "second chunk starts inside the first");
    assert!(chunks[1].text.contains("in it."), "overlap tail is carried forward");
    for chunk in &chunks {
        assert!(chunk.char_count <= 60);
    }
}

#[test]
fn recursive_hard_cuts_an_indivisible_run() {
    let doc = "a".repeat(150);
    let chunks =
        chunk(&doc, &ChunkStrategy::Recursive { max_chars: 50, overlap_chars: 0 }).expect("chunk");

    assert_eq!(chunks.len(), 3);
    for chunk in &chunks {
        assert_eq!(chunk.char_count, 50);
    }
}

#[test]
fn semantic_breaks_where_vocabulary_shifts() {
    let doc = "Rust ownership moves values between bindings. \
               Ownership rules are checked by the borrow checker. \
               Pasta needs plenty of boiling water. \
               Salt the pasta water before cooking.";
    let chunks =
        chunk(doc, &ChunkStrategy::Semantic { threshold: 0.15, buffer: 1 }).expect("chunk");

    assert_eq!(chunks.len(), 2, "one break at the topic shift");
    assert!(chunks[0].text.contains("borrow checker"));
    assert!(chunks[1].text.starts_with("Pasta"));
}

#[test]
fn semantic_zero_threshold_keeps_everything_together() {
    let doc = "Completely unrelated opener. Nothing shared at all here. Pasta water boils.";
    let chunks =
        chunk(doc, &ChunkStrategy::Semantic { threshold: 0.0, buffer: 1 }).expect("chunk");
    assert_eq!(chunks.len(), 1);
}

#[test]
fn hierarchical_builds_heading_paths() {
    let doc = "# Guide\n\nIntro paragraph here.\n\n## Setup\n\nInstall the toolchain.\n\n## Usage\n\nRun the binary.";
    let chunks =
        chunk(doc, &ChunkStrategy::Hierarchical { max_chars: 200, preserve_context: true })
            .expect("chunk");

    assert_eq!(chunks.len(), 3);
    assert_eq!(chunks[0].text, "Guide: Intro paragraph here.");
    assert_eq!(chunks[1].text, "Guide > Setup: Install the toolchain.");
    assert_eq!(chunks[2].text, "Guide > Usage: Run the binary.");
    assert_eq!(chunks[1].context.as_deref(), Some("Guide > Setup"));
}

#[test]
fn hierarchical_without_context_prefix_still_records_the_path() {
    let doc = "# Guide\n\nIntro paragraph here.\n\n## Setup\n\nInstall the toolchain.";
    let chunks =
        chunk(doc, &ChunkStrategy::Hierarchical { max_chars: 200, preserve_context: false })
            .expect("chunk");

    assert_eq!(chunks[1].text, "Install the toolchain.");
    assert_eq!(chunks[1].context.as_deref(), Some("Guide > Setup"));
}

#[test]
fn hierarchical_without_headings_falls_back_to_budgeted_chunks() {
    let doc = "Just prose in one block. It keeps going for a while. No headings anywhere in sight.";
    let chunks =
        chunk(doc, &ChunkStrategy::Hierarchical { max_chars: 40, preserve_context: true })
            .expect("chunk");

    assert!(chunks.len() > 1);
    for chunk in &chunks {
        assert!(chunk.context.is_none());
        assert!(chunk.char_count <= 40);
    }
}
