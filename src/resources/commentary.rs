//! Post-match commentary.
//!
//! A [`Commentator`] turns a winner/loser pair into a short announcer line.
//! Requests run on a worker thread (see
//! [`crate::systems::commentary::commentary_worker`]) so a slow text service
//! never stalls the frame loop. Every request carries the generation number
//! of the [`Commentary`] resource at the time it was sent; replies for an
//! older generation are dropped.

use std::io::{ErrorKind, Read, Write};
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

use bevy_ecs::prelude::*;
use crossbeam_channel::{Receiver, Sender, bounded, unbounded};
use log::{debug, error};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::systems::commentary::commentary_worker;

/// Sampling temperature requested from the text service.
pub const COMMENTARY_TEMPERATURE: f32 = 0.9;
/// How long the external command may run before it is killed.
pub const DEFAULT_COMMENTARY_TIMEOUT: Duration = Duration::from_secs(10);
const WAIT_POLL: Duration = Duration::from_millis(20);
/// Shown when the service answers with nothing.
pub const EMPTY_REPLY_TEXT: &str = "IT'S ALL OVER! WHAT A FIGHT!";

#[derive(Debug, Error)]
pub enum CommentaryError {
    #[error("no commentary command configured")]
    NotConfigured,
    #[error("failed to run commentary command: {0}")]
    Io(#[from] std::io::Error),
    #[error("commentary command timed out after {0:?}")]
    TimedOut(Duration),
    #[error("commentary command exited with {status}: {stderr}")]
    Failed { status: String, stderr: String },
    #[error("failed to encode commentary request: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Source of announcer lines.
pub trait Commentator: Send + 'static {
    fn commentate(&self, winner: &str, loser: &str) -> Result<String, CommentaryError>;
}

/// Text sent to the service for a finished match.
pub fn commentary_prompt(winner: &str, loser: &str) -> String {
    format!(
        "You are a high-energy, funny, and slightly aggressive boxing commentator, \
         a ring announcer crossed with a stand-up comedian. \
         Announce the winner of a match between {winner} and {loser}. \
         Keep it under 3 sentences. Be punchy (pun intended)!"
    )
}

/// Line shown when the service fails.
pub fn fallback_text(winner: &str) -> String {
    format!("THE FIGHT IS OVER! {winner} STANDS TRIUMPHANT!")
}

/// Ask `commentator`, never failing: errors become [`fallback_text`] and an
/// empty reply becomes [`EMPTY_REPLY_TEXT`].
pub fn commentary_or_fallback(commentator: &dyn Commentator, winner: &str, loser: &str) -> String {
    match commentator.commentate(winner, loser) {
        Ok(text) if text.trim().is_empty() => EMPTY_REPLY_TEXT.to_string(),
        Ok(text) => text.trim().to_string(),
        Err(e) => {
            error!("commentary failed: {}", e);
            fallback_text(winner)
        }
    }
}

#[derive(Debug, Serialize)]
struct ServiceRequest<'a> {
    prompt: &'a str,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ServiceReply {
    #[serde(default)]
    text: String,
}

/// Runs an external program as the text service client.
///
/// The program receives `{"prompt": ..., "temperature": ...}` on stdin and
/// answers on stdout with either `{"text": ...}` or plain text. A program
/// still running after `timeout` is killed.
#[derive(Debug, Clone)]
pub struct ExternalCommentator {
    /// Program followed by its arguments. Empty means not configured.
    pub command: Vec<String>,
    pub timeout: Duration,
}

impl Default for ExternalCommentator {
    fn default() -> Self {
        Self {
            command: Vec::new(),
            timeout: DEFAULT_COMMENTARY_TIMEOUT,
        }
    }
}

impl ExternalCommentator {
    /// Split a config line such as `"llm-client --model fast"` on whitespace.
    pub fn from_command_line(line: &str) -> Self {
        Self {
            command: line.split_whitespace().map(str::to_string).collect(),
            ..Self::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn is_configured(&self) -> bool {
        !self.command.is_empty()
    }
}

/// Decode a service reply: JSON `{"text": ...}` if it parses, raw text otherwise.
pub fn parse_reply(stdout: &str) -> String {
    match serde_json::from_str::<ServiceReply>(stdout.trim()) {
        Ok(reply) => reply.text,
        Err(_) => stdout.to_string(),
    }
}

/// Read a child pipe to the end on its own thread.
fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> Receiver<String> {
    let (tx, rx) = bounded(1);
    std::thread::spawn(move || {
        let mut bytes = Vec::new();
        if let Some(mut pipe) = pipe {
            let _ = pipe.read_to_end(&mut bytes);
        }
        let _ = tx.send(String::from_utf8_lossy(&bytes).into_owned());
    });
    rx
}

impl Commentator for ExternalCommentator {
    fn commentate(&self, winner: &str, loser: &str) -> Result<String, CommentaryError> {
        let (program, args) = self
            .command
            .split_first()
            .ok_or(CommentaryError::NotConfigured)?;

        let prompt = commentary_prompt(winner, loser);
        let request = serde_json::to_vec(&ServiceRequest {
            prompt: &prompt,
            temperature: COMMENTARY_TEMPERATURE,
        })?;

        debug!("running commentary command '{}'", program);
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;
        let stdout = drain(child.stdout.take());
        let stderr = drain(child.stderr.take());
        if let Some(mut stdin) = child.stdin.take() {
            match stdin.write_all(&request) {
                // the program did not want the request
                Err(e) if e.kind() == ErrorKind::BrokenPipe => {}
                Err(e) => {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(e.into());
                }
                Ok(()) => {}
            }
        }

        let deadline = Instant::now() + self.timeout;
        let status = loop {
            if let Some(status) = child.try_wait()? {
                break status;
            }
            if Instant::now() >= deadline {
                let _ = child.kill();
                let _ = child.wait();
                return Err(CommentaryError::TimedOut(self.timeout));
            }
            std::thread::sleep(WAIT_POLL);
        };

        let grace = deadline.saturating_duration_since(Instant::now()) + WAIT_POLL;
        if !status.success() {
            return Err(CommentaryError::Failed {
                status: status.to_string(),
                stderr: stderr.recv_timeout(grace).unwrap_or_default().trim().to_string(),
            });
        }
        Ok(parse_reply(&stdout.recv_timeout(grace).unwrap_or_default()))
    }
}

/// Work item for the commentary thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentaryRequest {
    pub generation: u64,
    pub winner: String,
    pub loser: String,
}

/// Answer from the commentary thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentaryReply {
    pub generation: u64,
    pub text: String,
}

/// Channels to the commentary thread. Dropping the bridge stops the worker
/// once its current request finishes.
#[derive(Resource)]
pub struct CommentaryBridge {
    pub tx_req: Sender<CommentaryRequest>,
    pub rx_reply: Receiver<CommentaryReply>,
}

/// Commentary for the match on screen.
#[derive(Resource, Debug, Default, Clone, PartialEq, Eq)]
pub struct Commentary {
    /// Bumped whenever a session starts or a request is sent.
    pub generation: u64,
    /// `None` while waiting for the worker.
    pub text: Option<String>,
}

impl Commentary {
    /// Forget the current text and invalidate in-flight requests.
    pub fn invalidate(&mut self) {
        self.generation += 1;
        self.text = None;
    }
}

/// Spawn the commentary thread and insert [`CommentaryBridge`] and
/// [`Commentary`].
pub fn setup_commentary(world: &mut World, commentator: Box<dyn Commentator>) {
    let (tx_req, rx_req) = unbounded::<CommentaryRequest>();
    let (tx_reply, rx_reply) = unbounded::<CommentaryReply>();

    std::thread::spawn(move || commentary_worker(rx_req, tx_reply, commentator));

    world.insert_resource(CommentaryBridge { tx_req, rx_reply });
    world.insert_resource(Commentary::default());
}

/// Drop the request channel so the worker exits.
pub fn shutdown_commentary(world: &mut World) {
    world.remove_resource::<CommentaryBridge>();
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(Result<&'static str, ()>);

    impl Commentator for Fixed {
        fn commentate(&self, _w: &str, _l: &str) -> Result<String, CommentaryError> {
            self.0
                .map(str::to_string)
                .map_err(|_| CommentaryError::NotConfigured)
        }
    }

    #[test]
    fn test_error_falls_back_with_winner_name() {
        let text = commentary_or_fallback(&Fixed(Err(())), "Rocky", "Drago");
        assert_eq!(text, "THE FIGHT IS OVER! Rocky STANDS TRIUMPHANT!");
    }

    #[test]
    fn test_empty_reply_uses_fixed_line() {
        let text = commentary_or_fallback(&Fixed(Ok("  \n")), "A", "B");
        assert_eq!(text, EMPTY_REPLY_TEXT);
    }

    #[test]
    fn test_reply_is_trimmed() {
        let text = commentary_or_fallback(&Fixed(Ok("  What a punch!\n")), "A", "B");
        assert_eq!(text, "What a punch!");
    }

    #[test]
    fn test_prompt_names_both_fighters() {
        let prompt = commentary_prompt("Rocky", "Drago");
        assert!(prompt.contains("Rocky"));
        assert!(prompt.contains("Drago"));
        assert!(prompt.contains("under 3 sentences"));
    }

    #[test]
    fn test_parse_reply_json_and_plain() {
        assert_eq!(parse_reply(r#"{"text": "KO!"}"#), "KO!");
        assert_eq!(parse_reply("just words"), "just words");
        assert_eq!(parse_reply(r#"{"other": 1}"#), "");
    }

    #[test]
    fn test_unconfigured_command_errors() {
        let c = ExternalCommentator::from_command_line("   ");
        assert!(!c.is_configured());
        assert!(matches!(
            c.commentate("A", "B"),
            Err(CommentaryError::NotConfigured)
        ));
    }

    #[test]
    fn test_missing_program_errors() {
        let c = ExternalCommentator::from_command_line("/nonexistent/faceoff-commentary-client");
        assert!(matches!(c.commentate("A", "B"), Err(CommentaryError::Io(_))));
    }

    #[cfg(unix)]
    #[test]
    fn test_plain_stdout_is_the_reply() {
        let c = ExternalCommentator::from_command_line("echo KO!");
        assert_eq!(commentary_or_fallback(&c, "A", "B"), "KO!");
    }

    #[cfg(unix)]
    #[test]
    fn test_failing_program_errors() {
        let c = ExternalCommentator::from_command_line("false");
        assert!(matches!(
            c.commentate("A", "B"),
            Err(CommentaryError::Failed { .. })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_hung_program_is_killed_after_timeout() {
        let c = ExternalCommentator::from_command_line("sleep 30")
            .with_timeout(Duration::from_millis(100));
        let started = Instant::now();
        assert!(matches!(
            c.commentate("Rocky", "Drago"),
            Err(CommentaryError::TimedOut(_))
        ));
        assert!(started.elapsed() < Duration::from_secs(10));
        assert_eq!(
            commentary_or_fallback(&c, "Rocky", "Drago"),
            fallback_text("Rocky")
        );
    }

    #[test]
    fn test_invalidate_bumps_generation() {
        let mut c = Commentary {
            generation: 3,
            text: Some("old".into()),
        };
        c.invalidate();
        assert_eq!(c.generation, 4);
        assert!(c.text.is_none());
    }
}
