//! Token-oriented prompting over an async reader/writer pair.
//!
//! Input is consumed as whitespace-separated tokens, so several answers may
//! arrive on one line. Every prompt returns `Ok(None)` once input is exhausted.

use std::collections::VecDeque;
use std::str::FromStr;
use tokio::io::{self, AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

pub struct Prompter<R, W> {
    reader: R,
    writer: W,
    pending: VecDeque<String>,
}

impl<R, W> Prompter<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader,
            writer,
            pending: VecDeque::new(),
        }
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    /// Write `text` and flush so prompts appear before blocking on input.
    pub async fn write(&mut self, text: &str) -> io::Result<()> {
        self.writer.write_all(text.as_bytes()).await?;
        self.writer.flush().await
    }

    pub async fn writeln(&mut self, text: &str) -> io::Result<()> {
        self.write(text).await?;
        self.write("\n").await
    }

    /// Next whitespace-separated token, reading more lines as needed.
    pub async fn next_token(&mut self) -> io::Result<Option<String>> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Ok(Some(token));
            }
            // Invalid UTF-8 is replaced rather than failing the session
            let mut line = Vec::new();
            if self.reader.read_until(b'\n', &mut line).await? == 0 {
                return Ok(None);
            }
            self.pending.extend(
                String::from_utf8_lossy(&line)
                    .split_whitespace()
                    .map(str::to_string),
            );
        }
    }

    pub async fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        self.write(label).await?;
        self.next_token().await
    }

    /// Prompt until the answer parses as `T`.
    pub async fn prompt_number<T: FromStr>(&mut self, label: &str) -> io::Result<Option<T>> {
        loop {
            let Some(token) = self.prompt(label).await? else {
                return Ok(None);
            };
            match token.parse::<T>() {
                Ok(value) => return Ok(Some(value)),
                Err(_) => self.writeln("Please enter a valid number").await?,
            }
        }
    }

    /// Prompt until the answer is a finite, non-negative amount.
    pub async fn prompt_salary(&mut self, label: &str) -> io::Result<Option<f64>> {
        loop {
            let Some(salary) = self.prompt_number::<f64>(label).await? else {
                return Ok(None);
            };
            if salary.is_finite() && salary >= 0.0 {
                return Ok(Some(salary));
            }
            self.writeln("Salary must be a non-negative number").await?;
        }
    }

    /// Yes/no question. Only `y`/`Y` counts as yes.
    pub async fn confirm(&mut self, label: &str) -> io::Result<Option<bool>> {
        Ok(self
            .prompt(label)
            .await?
            .map(|answer| answer.eq_ignore_ascii_case("y")))
    }
}
