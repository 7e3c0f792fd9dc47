//! Command-line chat driver for Moodtune
//!
//! A thin adapter over the shared session state machine: the same
//! conversation as the HTTP chat endpoint, driven from stdin. After a
//! recommendation round the playlist can be written out as an .m3u file
//! for a local player.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use moodtune_lastfm_client::LastfmClient;
use moodtune_ollama_client::OllamaClient;
use moodtune_recommender::{playlist, Assistant, Recommender, Session};
use moodtune_shared_config::CommonConfig;
use moodtune_spotify_client::SpotifyClient;
use moodtune_youtube_client::YoutubeClient;

#[derive(Parser, Debug)]
#[command(name = "moodtune", about = "Mood-based music recommendations, chat-style")]
struct CliArgs {
    /// Write the latest playlist to this .m3u file after each
    /// recommendation round.
    #[clap(long)]
    playlist_out: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "moodtune_cli=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    let args = CliArgs::parse();

    // Fails closed on missing credentials
    let config = CommonConfig::from_env()
        .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    let spotify = SpotifyClient::new(&config.spotify)?;
    let lastfm = LastfmClient::new(config.lastfm.api_key.clone())?;
    let youtube = YoutubeClient::new(&config.youtube)?;
    let ollama = OllamaClient::new(&config.ollama)?;

    let authorize_url = spotify.authorize_url();
    let assistant = Assistant::new(Recommender::new(spotify, lastfm, youtube, ollama));
    let mut session = Session::new();

    println!("assistant> {}", moodtune_recommender::session::GREETING);
    println!("(When asked for an authorization code, open this URL first:)");
    println!("({})", authorize_url);

    let stdin = io::stdin();
    let mut known_recommendations = 0;

    loop {
        print!("you> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break; // EOF
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if matches!(line, "exit" | "quit") {
            break;
        }

        let replies = assistant.handle_message(&mut session, line).await;
        for reply in replies {
            println!("assistant> {}", reply);
        }

        // A pipeline round just finished when the list changed size or
        // content; print it and optionally write the playlist file.
        if session.recommendations().len() != known_recommendations
            && !session.recommendations().is_empty()
        {
            known_recommendations = session.recommendations().len();

            for (i, candidate) in session.recommendations().iter().enumerate() {
                match &candidate.link {
                    Some(link) => {
                        println!("  {:2}. {} - {}  [{}]", i + 1, candidate.artist, candidate.track, link)
                    }
                    None => println!("  {:2}. {} - {}", i + 1, candidate.artist, candidate.track),
                }
            }

            if let Some(path) = &args.playlist_out {
                let body = playlist::render(session.recommendations());
                std::fs::write(path, body)
                    .with_context(|| format!("writing playlist to {}", path.display()))?;
                println!("(playlist written to {})", path.display());
            }
        }
    }

    println!("Bye!");
    Ok(())
}
