//! Chunk-inspection view: document statistics plus the chunk table
//! produced by the configured strategy, without building an index.

use std::collections::HashMap;
use std::env;
use std::fs;
use std::io;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use askdoc_core::config::{expand_path, Settings};
use askdoc_core::sparse::tokenize;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let mut args: Vec<String> = env::args().collect();
    let prog = args.remove(0);
    let file = args.first().cloned().unwrap_or_else(|| {
        eprintln!("Usage: {} <file>", prog);
        std::process::exit(1)
    });

    let settings = Settings::load()?;
    let strategy = settings.chunking.strategy()?;

    let path = expand_path(&file);
    let text = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let word_count = text.split_whitespace().count();
    let paragraphs = text.split("\n\n").filter(|p| !p.trim().is_empty()).count();
    let sentences = text.split('.').filter(|s| !s.trim().is_empty()).count();
    let avg_word_len = text
        .split_whitespace()
        .map(str::len)
        .sum::<usize>() as f64
        / word_count.max(1) as f64;

    println!("Document: {}", path.display());
    println!("  characters:      {}", text.chars().count());
    println!("  words:           {}", word_count);
    println!("  lines:           {}", text.lines().count());
    println!("  paragraphs:      {}", paragraphs);
    println!("  sentences (est): {}", sentences);
    println!("  avg word length: {:.2} chars", avg_word_len);
    println!("  strategy:        {}", strategy.name());

    let chunks = askdoc_chunk::chunk(&text, &strategy)?;
    println!("  chunks:          {}\n", chunks.len());

    let top = top_terms(&text, 10);
    if !top.is_empty() {
        let rendered: Vec<String> =
            top.iter().map(|(term, count)| format!("{term} ({count})")).collect();
        println!("Top terms: {}\n", rendered.join(", "));
    }

    for chunk in &chunks {
        println!(
            "Chunk {} [{}..{}] ({} words, {} chars)",
            chunk.index, chunk.start, chunk.end, chunk.word_count, chunk.char_count
        );
        if let Some(context) = &chunk.context {
            println!("  section: {}", context);
        }
        println!("{}\n", chunk.text);
    }
    Ok(())
}

/// The `limit` most frequent indexable terms, most common first; ties in
/// frequency resolve alphabetically.
fn top_terms(text: &str, limit: usize) -> Vec<(String, usize)> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for token in tokenize(text) {
        *counts.entry(token).or_insert(0) += 1;
    }
    let mut ranked: Vec<(String, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(limit);
    ranked
}
