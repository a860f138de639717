//! `pitch ask` and `pitch chat` command implementations.

use anyhow::Result;
use std::io::{self, BufRead, Write};

use crate::config::Config;
use crate::history::History;
use crate::retrieve::{Retriever, FALLBACK_ANSWER};

/// Answer a single query and print it.
pub async fn run_ask(config: &Config, query: &str) -> Result<()> {
    let retriever = Retriever::load(config).await?;
    let answer = retriever.answer(query).await?;
    println!("{}", answer);
    Ok(())
}

/// Interactive question loop over stdin.
///
/// Reads one query per line until EOF or the case-insensitive sentinel
/// `exit`. A per-query failure (e.g. a remote embedding call erroring
/// out) is reported and answered with the fallback; it never ends the
/// loop. The prompt is only printed when stdin is a TTY, so piped input
/// produces clean output.
pub async fn run_chat(config: &Config) -> Result<()> {
    let retriever = Retriever::load(config).await?;
    println!(
        "Loaded {} chunks from {} (model: {})",
        retriever.chunk_count(),
        config.corpus.path.display(),
        retriever.model_name()
    );

    let mut history = History::new(config.history.capacity);
    let interactive = atty::is(atty::Stream::Stdin);
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        if interactive {
            print!("\nAsk a question (or type exit): ");
            io::stdout().flush()?;
        }

        let query = match lines.next() {
            Some(line) => line?,
            None => break,
        };
        if query.trim().eq_ignore_ascii_case("exit") {
            break;
        }

        // Assembled for a future prompt-building step; retrieval does not
        // consume it yet.
        let _context = history.build_context();

        let answer = match retriever.answer(&query).await {
            Ok(answer) => answer,
            Err(err) => {
                eprintln!("query failed: {:#}", err);
                FALLBACK_ANSWER.to_string()
            }
        };

        println!("\nAnswer:\n{}", answer);
        history.record(&query, &answer);
    }

    Ok(())
}
