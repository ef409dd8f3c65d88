use crate::{RunManager, Settings};
use anyhow::Context;
use clap::{value_parser, Arg, Command};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

/// CLI entry point for the news-summarizer tool
pub async fn run() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let matches = Command::new("news-summarizer")
        .version("0.1.0")
        .about("Summarize recent news on a topic with an OpenAI assistant")
        .arg(
            Arg::new("topic")
                .help("The topic to search news for, e.g. bitcoin")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("model")
                .short('m')
                .long("model")
                .value_name("MODEL")
                .help("Model used when the assistant has to be created (or set OPENAI_MODEL)"),
        )
        .arg(
            Arg::new("api-key")
                .short('k')
                .long("api-key")
                .value_name("KEY")
                .help("OpenAI API key (or set OPENAI_API_KEY env var)"),
        )
        .arg(
            Arg::new("base-url")
                .short('u')
                .long("base-url")
                .value_name("URL")
                .help("Assistants API base URL (or set OPENAI_BASE_URL)"),
        )
        .arg(
            Arg::new("news-base-url")
                .long("news-base-url")
                .value_name("URL")
                .help("News API base URL (or set NEWS_API_BASE_URL)"),
        )
        .arg(
            Arg::new("assistant-id")
                .long("assistant-id")
                .value_name("ID")
                .help("Reuse an existing assistant (or set ASSISTANT_ID)"),
        )
        .arg(
            Arg::new("thread-id")
                .long("thread-id")
                .value_name("ID")
                .help("Reuse an existing thread (or set THREAD_ID)"),
        )
        .arg(
            Arg::new("poll-interval")
                .short('p')
                .long("poll-interval")
                .value_name("SECONDS")
                .help("Seconds to wait between run status checks")
                .value_parser(value_parser!(u64))
                .default_value("5"),
        )
        .arg(
            Arg::new("timeout")
                .short('t')
                .long("timeout")
                .value_name("SECONDS")
                .help("Give up if the run is not finished after this many seconds")
                .value_parser(value_parser!(u64)),
        )
        .get_matches();

    let mut settings = Settings::from_env();
    if let Some(api_key) = matches.get_one::<String>("api-key") {
        settings = settings.with_openai_api_key(api_key.clone());
    }
    if let Some(base_url) = matches.get_one::<String>("base-url") {
        settings = settings.with_openai_base_url(base_url.clone());
    }
    if let Some(base_url) = matches.get_one::<String>("news-base-url") {
        settings = settings.with_news_base_url(base_url.clone());
    }
    if let Some(model) = matches.get_one::<String>("model") {
        settings = settings.with_model(model.clone());
    }
    if let Some(assistant_id) = matches.get_one::<String>("assistant-id") {
        settings = settings.with_assistant_id(assistant_id.clone());
    }
    if let Some(thread_id) = matches.get_one::<String>("thread-id") {
        settings = settings.with_thread_id(thread_id.clone());
    }
    if let Some(seconds) = matches.get_one::<u64>("poll-interval") {
        settings = settings.with_poll_interval(Duration::from_secs(*seconds));
    }
    settings = settings.with_poll_timeout(
        matches
            .get_one::<u64>("timeout")
            .map(|seconds| Duration::from_secs(*seconds)),
    );

    let topic = matches
        .get_one::<String>("topic")
        .context("a topic is required")?;

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling");
            on_interrupt.cancel();
        }
    });

    info!("Summarizing news for topic: {}", topic);
    info!("Using model: {}", settings.model);

    let mut manager = RunManager::from_settings(&settings);
    match manager.summarize(topic, &cancel).await {
        Ok(digest) => {
            println!("\n{}\n", digest.summary);
            println!("Run Steps:\n{}", digest.steps_trace());
            info!(
                assistant_id = ?manager.session().assistant_id,
                thread_id = ?manager.session().thread_id,
                "Summary completed; set ASSISTANT_ID / THREAD_ID to reuse them"
            );
        }
        Err(e) => {
            error!("Summarizer failed: {}", e);
            return Err(e.into());
        }
    }

    Ok(())
}
