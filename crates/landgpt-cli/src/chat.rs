//! The interactive question loop.

use std::io::{self, BufRead, Write};

use landgpt_assistant::KeywordResponder;
use landgpt_core::store::{FaqStore, QueryLog, RecordStore};

/// Inputs that end the loop. Matched case-insensitively and never logged.
pub const QUIT_WORDS: &[&str] = &["quit", "exit", "q"];

pub fn is_quit(line: &str) -> bool {
  QUIT_WORDS.iter().any(|w| line.eq_ignore_ascii_case(w))
}

/// Answer lines from `input` until a quit word or end of input. Blank lines
/// are skipped. Returns the number of questions answered.
pub async fn run<S, R, W>(
  responder: &KeywordResponder,
  store: &S,
  input: &mut R,
  out: &mut W,
) -> io::Result<usize>
where
  S: RecordStore + FaqStore + QueryLog,
  R: BufRead,
  W: Write,
{
  writeln!(out, "\n💬 LandGPT Interactive Query System")?;
  writeln!(out, "Enter 'quit' to exit")?;

  let mut answered = 0;
  let mut line = String::new();
  loop {
    write!(out, "\n🗣️ Ask about land records: ")?;
    out.flush()?;

    line.clear();
    if input.read_line(&mut line)? == 0 {
      break;
    }
    let question = line.trim();
    if question.is_empty() {
      continue;
    }
    if is_quit(question) {
      break;
    }

    let response = responder.respond_and_log(store, question, None).await;
    writeln!(out, "🤖 {}", response.text)?;
    answered += 1;
  }

  writeln!(out, "👋 धन्यवाद!")?;
  Ok(answered)
}

#[cfg(test)]
mod tests {
  use std::io::Cursor;

  use landgpt_assistant::seed;
  use landgpt_store_sqlite::SqliteStore;

  use super::*;

  async fn store() -> SqliteStore {
    let s = SqliteStore::open_in_memory()
      .await
      .expect("in-memory store");
    seed::load_sample_faqs(&s).await.unwrap();
    s
  }

  async fn chat(s: &SqliteStore, script: &str) -> (usize, String) {
    let responder = KeywordResponder::default();
    let mut input = Cursor::new(script.as_bytes().to_vec());
    let mut out = Vec::new();
    let answered = run(&responder, s, &mut input, &mut out).await.unwrap();
    (answered, String::from_utf8(out).unwrap())
  }

  #[test]
  fn quit_words_ignore_case() {
    assert!(is_quit("QUIT"));
    assert!(is_quit("Exit"));
    assert!(is_quit("q"));
    assert!(!is_quit("quite"));
  }

  #[tokio::test]
  async fn quit_ends_loop_without_logging() {
    let s = store().await;
    let (answered, out) = chat(&s, "quit\nKhasra number kya hota hai?\n").await;

    assert_eq!(answered, 0);
    assert_eq!(s.count_queries().await.unwrap(), 0);
    assert!(out.ends_with("👋 धन्यवाद!\n"));
  }

  #[tokio::test]
  async fn each_question_is_answered_and_logged() {
    let s = store().await;
    let (answered, out) =
      chat(&s, "Khasra number kya hota hai?\n\n   \nhello there\nq\n").await;

    assert_eq!(answered, 2);
    assert_eq!(s.count_queries().await.unwrap(), 2);
    assert!(out.contains("खसरा नंबर का मतलब"));

    let recent = s.recent_queries(2).await.unwrap();
    assert_eq!(recent[0].query, "hello there");
    assert_eq!(recent[0].query_type.as_deref(), Some("fallback"));
    assert_eq!(recent[1].query_type.as_deref(), Some("khasra"));
  }

  #[tokio::test]
  async fn end_of_input_ends_loop() {
    let s = store().await;
    let (answered, _) = chat(&s, "help").await;
    assert_eq!(answered, 1);
  }
}
