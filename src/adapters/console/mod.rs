//! Console adapter - interactive line-by-line chat.
//!
//! Reads one utterance per line and writes one reply per turn. Only the
//! conversation goes to the output stream; logs belong on stderr.

use std::sync::Arc;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::application::Dispatcher;
use crate::domain::dispatch::{ConversationState, DispatchMode};
use crate::domain::foundation::ConversationId;

const GREETING: &str = "Chatbot: Hi! Type 'bye' to exit.";
const PROMPT: &str = "You: ";

/// Single-conversation console front end.
pub struct ConsoleChat {
    dispatcher: Arc<Dispatcher>,
}

impl ConsoleChat {
    pub fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self { dispatcher }
    }

    /// Runs until the user says goodbye or `input` reaches EOF.
    pub async fn run<R, W>(&self, input: R, mut output: W) -> std::io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut state = ConversationState::new(ConversationId::new(), DispatchMode::Console);
        tracing::info!(conversation_id = %state.id, "console session started");

        output.write_all(format!("{}\n", GREETING).as_bytes()).await?;

        let mut lines = input.lines();
        loop {
            output.write_all(PROMPT.as_bytes()).await?;
            output.flush().await?;

            let Some(line) = lines.next_line().await? else {
                output.write_all(b"\n").await?;
                break;
            };

            let reply = self.dispatcher.handle(&mut state, &line).await;
            output
                .write_all(format!("Chatbot: {}\n", reply.text).as_bytes())
                .await?;

            if reply.ended {
                break;
            }
        }

        output.flush().await?;
        tracing::info!(conversation_id = %state.id, turns = state.turn_count, "console session closed");
        Ok(())
    }

    /// Runs against the process's stdin and stdout.
    pub async fn run_stdio(&self) -> std::io::Result<()> {
        let stdin = tokio::io::BufReader::new(tokio::io::stdin());
        self.run(stdin, tokio::io::stdout()).await
    }
}
