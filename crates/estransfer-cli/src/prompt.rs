//! Interactive prompts on stdin.
//!
//! Reads run on the blocking pool so that Ctrl-C stays responsive while
//! waiting for an answer. End of input is an error, never a default.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result, bail};
use colored::Colorize;

/// Ask a question and return the trimmed answer.
pub async fn ask(question: &str) -> Result<String> {
    let question = question.to_string();
    tokio::task::spawn_blocking(move || read_answer(&question))
        .await
        .context("Prompt task failed")?
}

/// Ask a yes/no question. An empty answer picks `default`.
pub async fn confirm(question: &str, default: bool) -> Result<bool> {
    let hint = if default { "[Y/n]" } else { "[y/N]" };
    loop {
        let answer = ask(&format!("{question} {hint}")).await?;
        match answer.to_ascii_lowercase().as_str() {
            "" => return Ok(default),
            "y" | "yes" => return Ok(true),
            "n" | "no" => return Ok(false),
            _ => eprintln!("Please answer y or n."),
        }
    }
}

/// Let the user pick one of `options` by its 1-based number.
pub async fn choose<'a>(question: &str, options: &'a [String]) -> Result<&'a str> {
    if options.is_empty() {
        bail!("Nothing to choose from");
    }

    for (i, option) in options.iter().enumerate() {
        eprintln!("{:>4}  {}", (i + 1).to_string().cyan(), option);
    }

    loop {
        let answer = ask(question).await?;
        match parse_choice(&answer, options.len()) {
            Some(index) => return Ok(options[index].as_str()),
            None => eprintln!("Enter a number between 1 and {}.", options.len()),
        }
    }
}

/// Map a 1-based answer to an index into a list of `len` items.
fn parse_choice(answer: &str, len: usize) -> Option<usize> {
    let n: usize = answer.trim().parse().ok()?;
    (1..=len).contains(&n).then(|| n - 1)
}

fn read_answer(question: &str) -> Result<String> {
    eprint!("{} ", question.bold());
    io::stderr().flush()?;

    let mut input = String::new();
    let read = io::stdin()
        .lock()
        .read_line(&mut input)
        .context("Failed to read from stdin")?;
    if read == 0 {
        bail!("No input available for: {question}");
    }
    Ok(input.trim().to_string())
}
