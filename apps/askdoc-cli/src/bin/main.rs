use std::env;
use std::fs;
use std::io::{self, BufRead, Write};
use std::time::Duration;

use anyhow::Context;
use indicatif::ProgressBar;
use tracing_subscriber::EnvFilter;

use askdoc_core::config::{expand_path, Settings};
use askdoc_core::types::Answer;
use askdoc_core::Error;
use askdoc_engine::RagEngine;

fn parse_args() -> (String, Vec<String>) {
    let mut args: Vec<String> = env::args().collect();
    let prog = args.remove(0);
    if args.is_empty() {
        eprintln!("Usage: {} <ask|repl> <file> [question] [--json]", prog);
        std::process::exit(1);
    }
    let cmd = args.remove(0);
    (cmd, args)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let settings = Settings::load().map_err(|e| {
        eprintln!("Error loading settings: {}", e);
        e
    })?;
    let (cmd, mut args) = parse_args();
    let as_json = args.iter().any(|a| a == "--json");
    args.retain(|a| a != "--json");

    match cmd.as_str() {
        "ask" => {
            let file = args.first().cloned().unwrap_or_else(|| {
                eprintln!("Usage: askdoc ask <file> \"<question>\" [--json]");
                std::process::exit(1)
            });
            let question = args.get(1).cloned().unwrap_or_else(|| {
                eprintln!("Usage: askdoc ask <file> \"<question>\" [--json]");
                std::process::exit(1)
            });
            let rag = build_engine(&settings, &file)?;
            let answer = rag.generate_response(&question)?;
            if as_json {
                println!("{}", serde_json::to_string_pretty(&answer)?);
            } else {
                print_answer(&answer);
            }
        }
        "repl" => {
            let file = args.first().cloned().unwrap_or_else(|| {
                eprintln!("Usage: askdoc repl <file>");
                std::process::exit(1)
            });
            let rag = build_engine(&settings, &file)?;
            println!("Ask questions about the document; 'exit' or 'quit' leaves.");
            let stdin = io::stdin();
            loop {
                print!("> ");
                io::stdout().flush()?;
                let mut line = String::new();
                if stdin.lock().read_line(&mut line)? == 0 {
                    break;
                }
                let question = line.trim();
                if question.is_empty() {
                    continue;
                }
                if question == "exit" || question == "quit" {
                    break;
                }
                match rag.generate_response(question) {
                    Ok(answer) => print_answer(&answer),
                    Err(Error::EmptyQuery) => continue,
                    Err(e) => eprintln!("Error: {}", e),
                }
            }
        }
        _ => {
            eprintln!("Unknown command: {}", cmd);
            std::process::exit(1);
        }
    }
    Ok(())
}

fn build_engine(settings: &Settings, file: &str) -> anyhow::Result<RagEngine> {
    let path = expand_path(file);
    let text = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let strategy = settings.chunking.strategy()?;

    let spinner = ProgressBar::new_spinner();
    spinner.set_message(format!("Indexing {}", path.display()));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let mut rag = RagEngine::new(settings.retrieval, settings.synthesis);
    rag.add_documents(&text, &strategy)?;
    spinner.finish_and_clear();

    tracing::info!(
        file = %path.display(),
        strategy = strategy.name(),
        chunks = rag.chunks().len(),
        "document ready"
    );
    println!(
        "Processed {} into {} chunks using the '{}' strategy.",
        path.display(),
        rag.chunks().len(),
        strategy.name()
    );
    Ok(rag)
}

fn print_answer(answer: &Answer) {
    println!("\nResponse:");
    println!("{}", answer.text);
    if answer.sources.is_empty() {
        return;
    }
    println!("\nRetrieved chunks:");
    for (i, scored) in answer.sources.iter().enumerate() {
        println!("Chunk {} (similarity = {:.4})", i + 1, scored.score);
        if let Some(context) = &scored.chunk.context {
            println!("  [{}]", context);
        }
        println!("{}\n", scored.chunk.text);
    }
}
