// main.rs - Almonte Bot Entry Point
// Loads configuration and the read-only collaborators (word list, WordNet,
// sentiment scorer, image source, text generator), builds the command router
// and hands every Discord message to it.
//
// Key Features:
// - Keyword-routed commands, no prefix framework
// - basic/extended variants from one configurable router
// - Graceful shutdown via Ctrl+C or the "quit" console command

mod commands;
mod config;
mod error;
mod generation;
mod image;
mod lexicon;
mod messenger;
mod router;
mod sentiment;
mod words;

#[cfg(test)]
mod testing;

use std::sync::Arc;

use serenity::{
    async_trait,
    client::{Client, Context, EventHandler},
    model::channel::Message,
    model::gateway::{Activity, Ready},
    model::user::OnlineStatus,
    prelude::GatewayIntents,
};
use tokio::io::{self, AsyncBufReadExt, BufReader};
use tokio::signal;
use tokio::sync::mpsc;

use crate::config::BotConfig;
use crate::generation::{LmConfig, LmStudioGenerator, TextGenerator};
use crate::image::CatApiClient;
use crate::lexicon::WordNet;
use crate::messenger::{ChannelRef, DiscordMessenger};
use crate::router::{Features, IncomingMessage, ReferenceSense, Router, Services};
use crate::sentiment::{SentimentScorer, VaderScorer};
use crate::words::WordList;

type StartupError = Box<dyn std::error::Error + Send + Sync>;

struct Handler {
    router: Arc<Router>,
}

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        ctx.set_presence(Some(Activity::playing("Among Us 2")), OnlineStatus::Idle)
            .await;
        println!("readied up: {}", ready.user.name);
        log::info!(
            "[MAIN] Connected as {} ({}) with features {:?}",
            ready.user.name,
            ready.user.id,
            self.router.features()
        );
    }

    async fn message(&self, ctx: Context, msg: Message) {
        let incoming = IncomingMessage {
            author_id: msg.author.id.0,
            channel: ChannelRef(msg.channel_id.0),
            content: msg.content.clone(),
        };
        let bot_id = ctx.cache.current_user_id().0;
        let messenger = DiscordMessenger::new(ctx.http.clone());

        // The router logs failures at error level with their request id
        if let Err(e) = self.router.handle(&incoming, bot_id, &messenger).await {
            log::debug!(
                "[MAIN] Message from {} ({}) failed: {}",
                msg.author.name,
                msg.author.id,
                e
            );
        }
    }
}

// ============================================================================
// STARTUP
// ============================================================================

fn build_router(config: &BotConfig) -> Result<Router, StartupError> {
    let wordnet = WordNet::load(&config.wordnet_dir)?;
    println!(
        "📖 WordNet loaded from {} ({} synsets)",
        config.wordnet_dir.display(),
        wordnet.synset_count()
    );

    let words = WordList::load(&config.words_file)?;
    let reference = ReferenceSense::resolve(&wordnet, &config.reference_word)?;
    println!("🎯 Reference word: {} ({})", reference.word, reference.sense.name);

    let sentiment: Option<Arc<dyn SentimentScorer>> = if config.features.sentiment {
        Some(Arc::new(VaderScorer::new()))
    } else {
        None
    };

    let generator: Option<Arc<dyn TextGenerator>> = if config.features.text_generation {
        let lm_config = LmConfig::load()?;
        println!("🧠 Text generation via {} ({})", lm_config.base_url, lm_config.model);
        Some(Arc::new(LmStudioGenerator::new(lm_config)?))
    } else {
        None
    };

    let services = Services {
        words,
        lexicon: Arc::new(wordnet),
        reference,
        images: Arc::new(CatApiClient::new(config.cat_api_url.clone())),
        sentiment,
        generator,
    };
    Ok(Router::new(config.features, services)?)
}

fn describe_features(features: Features) -> String {
    let mut enabled = vec!["random word", "compare", "sillify"];
    if features.text_generation {
        enabled.push("ai");
    }
    if features.sentiment {
        enabled.push("analyze");
    }
    enabled.push("random car");
    enabled.join(", ")
}

// ============================================================================
// CONSOLE
// ============================================================================

async fn handle_command_line(shutdown_tx: mpsc::Sender<String>, features: Features) {
    use tokio::io::AsyncWriteExt;

    println!("📝 Command line interface active. Type 'help' for available commands.");

    let mut reader = BufReader::new(io::stdin()).lines();
    let mut stdout = io::stdout();

    loop {
        if stdout.write_all(b"> ").await.is_err() || stdout.flush().await.is_err() {
            eprintln!("❌ Failed to write prompt");
            break;
        }

        match reader.next_line().await {
            Ok(Some(line)) => match line.trim().to_lowercase().as_str() {
                "quit" | "q" | "exit" => {
                    println!("⏹️  Shutting down bot...");
                    if shutdown_tx.send("quit".to_string()).await.is_err() {
                        eprintln!("❌ Failed to send shutdown signal");
                    }
                    break;
                }
                "help" | "h" => {
                    println!("🤖 Available commands:");
                    println!("  quit, q, exit  - Stop the bot gracefully");
                    println!("  help, h        - Show this help message");
                    println!("  status         - Show enabled chat commands");
                }
                "status" => {
                    println!("🤖 Bot Status: Running");
                    println!("💬 Chat commands: {}", describe_features(features));
                }
                "" => {}
                other => {
                    println!(
                        "❓ Unknown command: '{}'. Type 'help' for available commands.",
                        other
                    );
                }
            },
            // EOF, e.g. running without a terminal
            Ok(None) => break,
            Err(e) => {
                eprintln!("❌ Error reading command line: {}", e);
                break;
            }
        }
    }
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp_secs()
        .init();

    let config = match BotConfig::load() {
        Ok(config) => config,
        Err(e) => {
            log::error!("❌ Failed to load configuration: {}", e);
            eprintln!("❌ Failed to load configuration: {}", e);
            eprintln!("Create a botconfig.txt file in the project root with: DISCORD_TOKEN=your_token_here");
            return;
        }
    };
    println!(
        "🤖 Starting {:?} bot with: {}",
        config.variant,
        describe_features(config.features)
    );

    let router = match build_router(&config) {
        Ok(router) => Arc::new(router),
        Err(e) => {
            log::error!("❌ Startup failed: {}", e);
            eprintln!("❌ Startup failed: {}", e);
            return;
        }
    };

    let intents = GatewayIntents::non_privileged() | GatewayIntents::MESSAGE_CONTENT;

    let mut client = match Client::builder(&config.token, intents)
        .event_handler(Handler { router })
        .await
    {
        Ok(client) => client,
        Err(e) => {
            log::error!("❌ Error creating Discord client: {:?}", e);
            eprintln!("❌ Error creating Discord client: {:?}", e);
            eprintln!("Check your token in botconfig.txt file");
            return;
        }
    };

    let (shutdown_tx, mut shutdown_rx) = mpsc::channel::<String>(1);
    let cmd_task = tokio::spawn(handle_command_line(shutdown_tx, config.features));

    println!("🚀 Bot is running...");
    println!("💡 Use 'quit' command to stop gracefully, or press Ctrl+C");
    tokio::select! {
        _ = signal::ctrl_c() => {
            println!("\n⏹️ Stopping bot gracefully...");
        }
        shutdown_signal = shutdown_rx.recv() => {
            if let Some(signal) = shutdown_signal {
                println!("📡 Received '{}' command, stopping bot gracefully...", signal);
            }
        }
        result = client.start() => {
            if let Err(why) = result {
                log::error!("❌ Client error: {:?}", why);
                eprintln!("❌ Client error: {:?}", why);
            }
        }
    }

    client.shard_manager.lock().await.shutdown_all().await;
    cmd_task.abort();
    println!("✅ Bot stopped");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_features_per_variant() {
        assert_eq!(
            describe_features(Features::basic()),
            "random word, compare, sillify, random car"
        );
        assert_eq!(
            describe_features(Features::extended()),
            "random word, compare, sillify, ai, analyze, random car"
        );
    }
}
