use anyhow::Result;
use std::io::{self, BufRead, Write};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cakap::config::AppConfig;
use cakap::genai::GeminiClient;
use cakap::pipeline::ChatPipeline;
use cakap::speech::synthesis::{SpeechSynthesis, Utterance, Voice, VoiceOutput};
use cakap::transcript::Sender;

/// Console stand-in for a platform synthesis engine: no audio device,
/// utterances land in the log instead
struct SilentSynthesis;

impl SpeechSynthesis for SilentSynthesis {
    fn voices(&self) -> Vec<Voice> {
        Vec::new()
    }

    fn enqueue(&self, utterance: Utterance) -> cakap::Result<()> {
        info!(language = %utterance.language, "would speak: {}", utterance.text);
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cakap=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;
    info!(model = %config.service.model, locale = %config.speech.locale, "starting cakap");

    let service = Arc::new(GeminiClient::new(config.service.clone()));
    let voice = VoiceOutput::new(Arc::new(SilentSynthesis), config.speech.clone());
    let pipeline = ChatPipeline::new(service, voice);

    println!("cakap console chat (empty line to exit)");
    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            break;
        }

        if let Err(err) = pipeline.send_message(line).await {
            eprintln!("{}", err.user_message());
            continue;
        }

        let reply = pipeline
            .transcript()
            .snapshot()
            .into_iter()
            .rev()
            .find(|m| m.sender == Sender::Bot);
        if let Some(message) = reply {
            println!("{}", cakap::markup::strip_markup(&message.text));
        }
    }

    Ok(())
}
