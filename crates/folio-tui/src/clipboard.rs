//! Clipboard writes
//!
//! Copies go through the first system clipboard command that accepts the
//! text. When none does (no display server, remote session) the caller
//! falls back to an OSC 52 escape, which most terminals forward to the
//! local clipboard.

use std::io::Write;
use std::process::Stdio;
use std::time::Duration;

use anyhow::{bail, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tokio::sync::mpsc;

use crate::event::CopyResult;

/// Clipboard commands in the order they are tried
const COMMANDS: &[(&str, &[&str])] = &[
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
    ("xsel", &["--clipboard", "--input"]),
    ("pbcopy", &[]),
    ("clip.exe", &[]),
];

const COMMAND_TIMEOUT: Duration = Duration::from_secs(2);

/// Copy `text` in the background and report on `tx`
pub fn spawn_copy(text: String, tx: mpsc::UnboundedSender<CopyResult>) {
    tokio::spawn(async move {
        let result = match copy_with_commands(&text).await {
            Ok(tool) => CopyResult::Copied { tool },
            Err(e) => CopyResult::Fallback {
                text,
                error: e.to_string(),
            },
        };
        let _ = tx.send(result);
    });
}

/// Try each clipboard command until one succeeds
pub async fn copy_with_commands(text: &str) -> Result<&'static str> {
    for &(program, args) in COMMANDS {
        match tokio::time::timeout(COMMAND_TIMEOUT, pipe_to(program, args, text)).await {
            Ok(Ok(())) => {
                tracing::debug!("Copied {} bytes with {}", text.len(), program);
                return Ok(program);
            }
            Ok(Err(e)) => tracing::debug!("{} unavailable: {}", program, e),
            Err(_) => tracing::debug!("{} timed out", program),
        }
    }
    bail!("no clipboard command available")
}

async fn pipe_to(program: &str, args: &[&str], text: &str) -> Result<()> {
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .kill_on_drop(true)
        .spawn()?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(text.as_bytes()).await?;
        // Dropping stdin closes the pipe so the command sees EOF
    }

    let status = child.wait().await?;
    if !status.success() {
        bail!("{} exited with {}", program, status);
    }
    Ok(())
}

/// OSC 52 "set clipboard" escape sequence for `text`
pub fn osc52_sequence(text: &str) -> String {
    format!("\x1b]52;c;{}\x07", STANDARD.encode(text))
}

/// Write the OSC 52 sequence for `text` straight to the terminal
pub fn write_osc52<W: Write>(out: &mut W, text: &str) -> std::io::Result<()> {
    out.write_all(osc52_sequence(text).as_bytes())?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_osc52_sequence() {
        assert_eq!(osc52_sequence("hi"), "\x1b]52;c;aGk=\x07");
        assert_eq!(osc52_sequence(""), "\x1b]52;c;\x07");
    }

    #[test]
    fn test_write_osc52() {
        let mut out = Vec::new();
        write_osc52(&mut out, "alex@example.com").unwrap();
        let written = String::from_utf8(out).unwrap();
        assert!(written.starts_with("\x1b]52;c;"));
        assert!(written.ends_with('\x07'));
    }

    #[tokio::test]
    async fn test_missing_command_is_an_error() {
        let result = pipe_to("folio-no-such-clipboard-tool", &[], "text").await;
        assert!(result.is_err());
    }
}
