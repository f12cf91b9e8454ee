use std::env;
use std::fs;

use anyhow::{anyhow, Context, Result};
use log::info;

use quest_runtime::{parse_script, Game, Session, WorldLayout};

const DEFAULT_FRAME_MS: u64 = 16;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {}

fn run() -> Result<()> {
    let options = CliOptions::parse()?;
    let mut layout = match &options.world {
        Some(path) => {
            let xml = fs::read_to_string(path)
                .with_context(|| format!("failed to read world {path}"))?;
            WorldLayout::from_xml(&xml).context("failed to parse world XML")?
        }
        None => WorldLayout::default_layout(),
    };
    if options.allow_duplicate_messages {
        layout.settings.dedupe_messages = false;
    }

    println!("Loaded world with {} entities", layout.entities.len());
    for entity in &layout.entities {
        println!(" - {} ({})", entity.id, entity.kind);
    }

    let steps = parse_script(&options.script)?;
    info!("running {} script step(s)", steps.len());

    let game = Game::new(layout).context("failed to set up the game")?;
    let mut session = Session::new(game, options.frame_ms);
    session.run(&steps);
    session.drain_messages();

    println!("Messages:");
    for event in session.timeline() {
        println!("[{:>7} ms] {}", event.at_ms, event.text);
    }
    print!("{}", session.summary());
    Ok(())
}

struct CliOptions {
    world: Option<String>,
    script: String,
    frame_ms: u64,
    allow_duplicate_messages: bool,
}

impl CliOptions {
    fn parse() -> Result<Self> {
        let mut options = Self {
            world: None,
            script: String::new(),
            frame_ms: DEFAULT_FRAME_MS,
            allow_duplicate_messages: false,
        };
        let mut args = env::args().skip(1);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--script" => {
                    let script = args
                        .next()
                        .ok_or_else(|| anyhow!("--script expects a list of steps"))?;
                    push_steps(&mut options.script, &script);
                }
                "--script-file" => {
                    let path = args
                        .next()
                        .ok_or_else(|| anyhow!("--script-file expects a path"))?;
                    let script = fs::read_to_string(&path)
                        .with_context(|| format!("failed to read script {path}"))?;
                    push_steps(&mut options.script, &script);
                }
                "--frame-ms" => {
                    let value = args
                        .next()
                        .ok_or_else(|| anyhow!("--frame-ms expects a number"))?;
                    options.frame_ms = value
                        .parse()
                        .with_context(|| format!("invalid --frame-ms value `{value}`"))?;
                }
                "--allow-duplicate-messages" => options.allow_duplicate_messages = true,
                other if other.starts_with("--") => {
                    return Err(anyhow!(
                        "Unknown argument: {other}. Usage: quest-runtime [world.xml] [--script \"<steps>\"] [--script-file <path>] [--frame-ms <n>] [--allow-duplicate-messages]"
                    ));
                }
                path => {
                    if options.world.is_some() {
                        return Err(anyhow!("only one world file may be given"));
                    }
                    options.world = Some(path.to_string());
                }
            }
        }
        Ok(options)
    }
}

fn push_steps(script: &mut String, steps: &str) {
    if !script.is_empty() {
        script.push(' ');
    }
    script.push_str(steps);
}
