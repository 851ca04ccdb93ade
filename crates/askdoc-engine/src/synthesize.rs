//! Extractive answer assembly from ranked chunks.

use askdoc_core::types::{Answer, ScoredChunk, SynthesisParams};

const NO_INFORMATION: &str = "I don't have enough information to answer that question.";
const ANSWER_PREFIX: &str = "Based on the information: ";

/// Compose the response text from the retrieved chunks in rank order (not
/// document order). Chunks are appended whole; when the next chunk would
/// cross the length budget, assembly stops at the previous chunk boundary.
/// The best-ranked chunk is always included so a non-empty retrieval never
/// collapses to a bare prefix.
pub fn synthesize(results: &[ScoredChunk], params: &SynthesisParams) -> Answer {
    if results.is_empty() {
        return Answer { text: NO_INFORMATION.to_string(), sources: Vec::new() };
    }

    let mut text = String::from(ANSWER_PREFIX);
    for (i, scored) in results.iter().enumerate() {
        let piece = render_chunk(scored, params);
        if i > 0 && text.chars().count() + piece.chars().count() + 1 > params.max_answer_chars {
            break;
        }
        if i > 0 {
            text.push(' ');
        }
        text.push_str(&piece);
    }
    Answer { text, sources: results.to_vec() }
}

fn render_chunk(scored: &ScoredChunk, params: &SynthesisParams) -> String {
    let mut piece = String::new();
    if let Some(context) = &scored.chunk.context {
        // Heading context is shown unless the chunk text already inlines it.
        if !scored.chunk.text.starts_with(context.as_str()) {
            piece.push('[');
            piece.push_str(context);
            piece.push_str("] ");
        }
    }
    piece.push_str(&scored.chunk.text);
    if params.annotate_scores {
        piece.push_str(&format!(" (similarity = {:.4})", scored.score));
    }
    piece
}
