//! Terminal front end for the chat server.
//!
//! Type a question and press enter. Lines entered while an answer is still on
//! its way are dropped. Ctrl-D quits once any outstanding answer arrives.

use std::env;
use std::io::Write;

use anyhow::Context;
use sustainability_chatbot::services::{
    chat_api::ChatApi,
    chat_session::{ChatState, Effect, Event, Message, Sender, update},
};
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    task::JoinHandle,
};
use tracing_subscriber::EnvFilter;

const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:3000";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let server = env::var("CHAT_SERVER_URL").unwrap_or_else(|_| DEFAULT_SERVER_URL.to_string());
    let api = ChatApi::new(&server);

    let mut state = ChatState::new();
    let mut in_flight: Option<JoinHandle<Option<String>>> = None;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    let mut shown = render(&state, 0)?;

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("failed to read stdin")? else {
                    break;
                };
                let (next, effect) = update(state, Event::Submit(line));
                state = next;
                if let Some(Effect::Ask(question)) = effect {
                    let api = api.clone();
                    in_flight = Some(tokio::spawn(async move { api.ask(&question).await }));
                }
            }
            outcome = settle(&mut in_flight) => {
                in_flight = None;
                let (next, _) = update(state, Event::Settled(outcome));
                state = next;
            }
        }
        shown = render(&state, shown)?;
    }

    let state = finish(state, &mut in_flight).await;
    render(&state, shown)?;
    Ok(())
}

/// Waits for an outstanding answer so it still lands in the transcript.
async fn finish(
    state: ChatState,
    in_flight: &mut Option<JoinHandle<Option<String>>>,
) -> ChatState {
    if in_flight.is_none() {
        return state;
    }
    let outcome = settle(in_flight).await;
    *in_flight = None;
    update(state, Event::Settled(outcome)).0
}

async fn settle(task: &mut Option<JoinHandle<Option<String>>>) -> Option<String> {
    match task {
        Some(handle) => handle.await.ok().flatten(),
        None => std::future::pending().await,
    }
}

/// Prints messages not yet shown; returns the new high-water mark.
fn render(state: &ChatState, shown: usize) -> anyhow::Result<usize> {
    let mut out = std::io::stdout().lock();
    for Message { text, sender } in &state.messages()[shown..] {
        let who = match sender {
            Sender::User => "you",
            Sender::Bot => "bot",
        };
        writeln!(out, "{who}> {text}")?;
    }
    if state.is_pending() {
        writeln!(out, "...")?;
    }
    out.flush()?;
    Ok(state.messages().len())
}
