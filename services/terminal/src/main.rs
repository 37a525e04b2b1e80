//! Terminal client for the Magic Shop quantifier game.
//!
//! Plays the same game as the web service, reading the student's lines from
//! stdin and printing Mr. Panda's replies. Speech is rendered as text.

mod console;

use anyhow::Context;
use clap::Parser;
use console::{Input, parse_line, render_commands, render_help, render_missions, render_shelf};
use magic_shop_core::{
    Command,
    catalog::SHOPKEEPER_EMOJI,
    cue::SoundCue,
    driver::GameDriver,
    game::{GameController, UiAction},
    llm_client::{DEFAULT_CHAT_MODEL, DEFAULT_TEMPERATURE, GEMINI_OPENAI_BASE, OpenAICompatibleClient},
    prompt::DEFAULT_SYSTEM_TEMPLATE,
};
use std::{path::PathBuf, sync::Arc, time::Duration};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{Level, info};

#[derive(Parser, Debug)]
#[command(version, about = "Practise 'a few', 'a little' and 'a lot of' in Mr. Panda's shop")]
struct Args {
    /// API key for the shopkeeper model.
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    api_key: String,

    /// Base URL of an OpenAI-compatible chat endpoint.
    #[arg(long, env = "LLM_API_BASE", default_value = GEMINI_OPENAI_BASE)]
    api_base: String,

    #[arg(long, env = "CHAT_MODEL", default_value = DEFAULT_CHAT_MODEL)]
    model: String,

    #[arg(long, env = "TEMPERATURE", default_value_t = DEFAULT_TEMPERATURE)]
    temperature: f32,

    /// Custom system prompt template with a `{catalog}` placeholder.
    #[arg(long)]
    prompt: Option<PathBuf>,

    #[arg(long, env = "CELEBRATION_DELAY_MS", default_value_t = 1000)]
    celebration_delay_ms: u64,

    #[arg(long, default_value = "warn")]
    log_level: Level,
}

fn print_lines(lines: Vec<String>) {
    for line in lines {
        println!("{}", line);
    }
}

/// Dispatches the actions of one typed line; returns the commands to render.
fn dispatch(driver: &mut GameDriver, actions: Vec<UiAction>) -> Vec<Command> {
    let mut commands = Vec::new();
    for action in actions {
        match driver.handle(action) {
            Ok(mut produced) => commands.append(&mut produced),
            Err(e) => {
                println!("  ⚠️  {}", e);
                break;
            }
        }
    }
    commands
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.log_level)
        .with_timer(tracing_subscriber::fmt::time::ChronoLocal::rfc_3339())
        .with_writer(std::io::stderr)
        .init();

    let template = match &args.prompt {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read prompt template {}", path.display()))?,
        None => DEFAULT_SYSTEM_TEMPLATE.to_string(),
    };

    let client = Arc::new(OpenAICompatibleClient::gemini(
        &args.api_key,
        &args.api_base,
        args.model.clone(),
        args.temperature,
    ));
    let controller = GameController::new(&template)
        .with_celebration_delay(Duration::from_millis(args.celebration_delay_ms));
    let (mut driver, mut events_rx) = GameDriver::new(controller, client);
    info!(model = %args.model, "Shop open");

    println!("🏪 Magic Shop (魔法商店英语大冒险)");
    println!("1. Choose an item   2. Use a quantifier   3. Ask \"How much?\"\n");
    print!("{}", render_shelf(driver.controller().catalog()));
    println!();
    print_lines(render_commands(&dispatch(&mut driver, vec![UiAction::StartGame])));
    println!("{}", render_missions(driver.controller().missions()));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read stdin")? else {
                    break;
                };
                match parse_line(&line, driver.controller()) {
                    Ok(Input::Actions(actions)) => {
                        let commands = dispatch(&mut driver, actions);
                        print_lines(render_commands(&commands));
                        let controller = driver.controller();
                        if commands.contains(&Command::PlayCue(SoundCue::Pop)) {
                            println!("  {} typing...", SHOPKEEPER_EMOJI);
                        } else if controller.session().is_awaiting_reply() && !controller.input().is_empty() {
                            println!("  (Mr. Panda is still answering, wait a moment...)");
                        } else if !controller.input().is_empty() {
                            println!("  ✏️  {}", controller.input());
                        }
                    }
                    Ok(Input::Help) => print!("{}", render_help(driver.controller())),
                    Ok(Input::Shelf) => print!("{}", render_shelf(driver.controller().catalog())),
                    Ok(Input::Missions) => println!("{}", render_missions(driver.controller().missions())),
                    Ok(Input::Quit) => break,
                    Err(e) => println!("  ⚠️  {}", e),
                }
            },
            Some(event) = events_rx.recv() => {
                let commands = driver.apply(event);
                if !commands.is_empty() {
                    print_lines(render_commands(&commands));
                    println!("{}", render_missions(driver.controller().missions()));
                }
            },
        }
    }

    println!("Bye! 👋");
    Ok(())
}
