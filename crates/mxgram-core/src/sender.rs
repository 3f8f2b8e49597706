//! File-to-chat sending with length-based chunking.

use std::{path::PathBuf, time::Duration};

use async_trait::async_trait;
use tokio::time::sleep;
use tracing::{debug, info};

use crate::{
    config::SenderConfig,
    messaging::{
        port::MessagingPort,
        types::{ChatId, SendError},
    },
};

/// Clock seam for the inter-chunk pause, so the chunk loop is deterministic
/// under test.
#[async_trait]
pub trait Delay: Send + Sync {
    async fn pause(&self, duration: Duration);
}

/// Real clock.
pub struct TokioDelay;

#[async_trait]
impl Delay for TokioDelay {
    async fn pause(&self, duration: Duration) {
        sleep(duration).await;
    }
}

/// Split `text` into chunks of at most `max_chars` characters.
///
/// Chunks never split a character, never overlap, and concatenate back to
/// the input exactly.
pub fn chunk_text(text: &str, max_chars: usize) -> Vec<String> {
    debug_assert!(max_chars >= 1);

    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut count = 0usize;

    for ch in text.chars() {
        if count == max_chars {
            chunks.push(std::mem::take(&mut current));
            count = 0;
        }
        current.push(ch);
        count += 1;
    }
    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

/// Every way a send attempt can end. Nothing here is fatal to the process;
/// the binary turns the outcome into a printed diagnostic.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SendOutcome {
    Sent {
        chunks: usize,
        chars: usize,
    },
    FileMissing {
        path: PathBuf,
    },
    FileUnreadable {
        path: PathBuf,
        message: String,
    },
    FileEmpty {
        path: PathBuf,
    },
    /// A chunk failed; the remainder was not attempted.
    TransportFailed {
        error: SendError,
        sent_chunks: usize,
        total_chunks: usize,
    },
}

impl SendOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SendOutcome::Sent { .. })
    }
}

/// Read the configured file and deliver its trimmed content to `chat_id`.
///
/// Content at or under the message limit goes out as one message; longer
/// content is chunked, with `delay` between consecutive chunks. Chunks are
/// sent strictly in order, never concurrently.
pub async fn send_from_file(
    api: &dyn MessagingPort,
    delay: &dyn Delay,
    cfg: &SenderConfig,
    chat_id: ChatId,
) -> SendOutcome {
    let path = &cfg.message_file;

    if !path.exists() {
        return SendOutcome::FileMissing { path: path.clone() };
    }

    let raw = match tokio::fs::read_to_string(path).await {
        Ok(contents) => contents,
        Err(e) => {
            return SendOutcome::FileUnreadable {
                path: path.clone(),
                message: e.to_string(),
            }
        }
    };

    let text = raw.trim();
    if text.is_empty() {
        return SendOutcome::FileEmpty { path: path.clone() };
    }

    let chars = text.chars().count();
    info!(chars, "loaded message text");

    if chars <= cfg.message_limit {
        return match api.send_text(chat_id, text).await {
            Ok(()) => SendOutcome::Sent { chunks: 1, chars },
            Err(error) => SendOutcome::TransportFailed {
                error,
                sent_chunks: 0,
                total_chunks: 1,
            },
        };
    }

    let chunks = chunk_text(text, cfg.chunk_size);
    let total_chunks = chunks.len();
    info!(total_chunks, "message exceeds the limit, sending in chunks");

    for (i, chunk) in chunks.iter().enumerate() {
        if i > 0 {
            delay.pause(cfg.chunk_delay).await;
        }
        if let Err(error) = api.send_text(chat_id, chunk).await {
            return SendOutcome::TransportFailed {
                error,
                sent_chunks: i,
                total_chunks,
            };
        }
        debug!("sent chunk {}/{total_chunks}", i + 1);
    }

    SendOutcome::Sent {
        chunks: total_chunks,
        chars,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messaging::types::{BotIdentity, ChatCandidate, SendErrorKind};
    use std::sync::Mutex;

    struct FakeMessenger {
        sends: Mutex<Vec<String>>,
        fail_on_attempt: Option<usize>,
    }

    impl FakeMessenger {
        fn new() -> Self {
            Self {
                sends: Mutex::new(Vec::new()),
                fail_on_attempt: None,
            }
        }

        fn failing_on(attempt: usize) -> Self {
            Self {
                sends: Mutex::new(Vec::new()),
                fail_on_attempt: Some(attempt),
            }
        }

        fn sent(&self) -> Vec<String> {
            self.sends.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl MessagingPort for FakeMessenger {
        async fn send_text(&self, _chat_id: ChatId, text: &str) -> Result<(), SendError> {
            let attempt = {
                let mut sends = self.sends.lock().unwrap();
                sends.push(text.to_string());
                sends.len()
            };
            if self.fail_on_attempt == Some(attempt) {
                return Err(SendError::from_api_message("Bad Request: chat not found"));
            }
            Ok(())
        }

        async fn identity(&self) -> Result<BotIdentity, SendError> {
            unreachable!("sender never asks for identity")
        }

        async fn pending_chats(&self) -> Result<Vec<ChatCandidate>, SendError> {
            unreachable!("sender never polls updates")
        }
    }

    struct FakeDelay {
        pauses: Mutex<Vec<Duration>>,
    }

    impl FakeDelay {
        fn new() -> Self {
            Self {
                pauses: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl Delay for FakeDelay {
        async fn pause(&self, duration: Duration) {
            self.pauses.lock().unwrap().push(duration);
        }
    }

    fn tmp_file(prefix: &str, contents: &str) -> PathBuf {
        let ts = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or(Duration::from_secs(0))
            .as_nanos();
        let pid = std::process::id();
        let path = PathBuf::from(format!("/tmp/{prefix}-{pid}-{ts}.txt"));
        std::fs::write(&path, contents).unwrap();
        path
    }

    fn cfg_for(path: PathBuf) -> SenderConfig {
        SenderConfig {
            bot_token: "token".to_string(),
            chat_id: Some(1),
            message_file: path,
            message_limit: 4096,
            chunk_size: 4000,
            chunk_delay: Duration::from_millis(500),
        }
    }

    #[test]
    fn chunks_cover_input_exactly() {
        let text = "abcdefghij";
        let chunks = chunk_text(text, 3);
        assert_eq!(chunks, vec!["abc", "def", "ghi", "j"]);
        assert_eq!(chunks.concat(), text);
    }

    #[test]
    fn chunk_count_is_ceiling_of_chars_over_size() {
        let text = "x".repeat(9000);
        let chunks = chunk_text(&text, 4000);
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].chars().count(), 4000);
        assert_eq!(chunks[1].chars().count(), 4000);
        assert_eq!(chunks[2].chars().count(), 1000);
    }

    #[test]
    fn chunking_counts_characters_not_bytes() {
        let text = "héllo wörld".repeat(100);
        let chunks = chunk_text(&text, 7);
        assert_eq!(chunks.concat(), text);
        assert!(chunks.iter().all(|c| c.chars().count() <= 7));
    }

    #[tokio::test]
    async fn short_content_goes_out_as_one_message() {
        let path = tmp_file("mxgram-send-short", "hello there\n");
        let api = FakeMessenger::new();
        let delay = FakeDelay::new();

        let outcome = send_from_file(&api, &delay, &cfg_for(path), ChatId(1)).await;

        assert_eq!(
            outcome,
            SendOutcome::Sent {
                chunks: 1,
                chars: 11
            }
        );
        assert_eq!(api.sent(), vec!["hello there".to_string()]);
        assert!(delay.pauses.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn long_content_is_chunked_in_order_with_pauses_between() {
        let path = tmp_file("mxgram-send-long", &"x".repeat(9000));
        let api = FakeMessenger::new();
        let delay = FakeDelay::new();

        let outcome = send_from_file(&api, &delay, &cfg_for(path), ChatId(1)).await;

        assert_eq!(
            outcome,
            SendOutcome::Sent {
                chunks: 3,
                chars: 9000
            }
        );
        let sent = api.sent();
        assert_eq!(sent.len(), 3);
        assert_eq!(sent[0].len(), 4000);
        assert_eq!(sent[1].len(), 4000);
        assert_eq!(sent[2].len(), 1000);
        assert_eq!(sent.concat(), "x".repeat(9000));

        let pauses = delay.pauses.lock().unwrap();
        assert_eq!(pauses.len(), 2);
        assert!(pauses.iter().all(|d| *d == Duration::from_millis(500)));
    }

    #[tokio::test]
    async fn missing_file_sends_nothing() {
        let api = FakeMessenger::new();
        let delay = FakeDelay::new();
        let cfg = cfg_for(PathBuf::from("/tmp/mxgram-no-such-file.txt"));

        let outcome = send_from_file(&api, &delay, &cfg, ChatId(1)).await;

        assert!(matches!(outcome, SendOutcome::FileMissing { .. }));
        assert!(api.sent().is_empty());
    }

    #[tokio::test]
    async fn whitespace_only_file_is_reported_empty() {
        let path = tmp_file("mxgram-send-empty", "  \n\t\n");
        let api = FakeMessenger::new();
        let delay = FakeDelay::new();

        let outcome = send_from_file(&api, &delay, &cfg_for(path), ChatId(1)).await;

        assert!(matches!(outcome, SendOutcome::FileEmpty { .. }));
        assert!(api.sent().is_empty());
    }

    #[tokio::test]
    async fn failed_chunk_aborts_the_remainder() {
        let path = tmp_file("mxgram-send-abort", &"x".repeat(9000));
        let api = FakeMessenger::failing_on(2);
        let delay = FakeDelay::new();

        let outcome = send_from_file(&api, &delay, &cfg_for(path), ChatId(1)).await;

        match outcome {
            SendOutcome::TransportFailed {
                error,
                sent_chunks,
                total_chunks,
            } => {
                assert_eq!(error.kind, SendErrorKind::ChatNotFound);
                assert_eq!(sent_chunks, 1);
                assert_eq!(total_chunks, 3);
            }
            other => panic!("expected TransportFailed, got {other:?}"),
        }
        // First chunk delivered, second attempted, third never sent.
        assert_eq!(api.sent().len(), 2);
    }
}
