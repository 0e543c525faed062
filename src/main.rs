use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, ensure, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use rand::rngs::StdRng;
use rand::SeedableRng;

use cwsend::audio::create_driver;
use cwsend::content::{contact_exchange, random_char_groups, random_words, ContentConfig};
use cwsend::engine::{Sender, SenderHandler, EVENT_TICK_MS};
use cwsend::model::{CharMeta, PlayState};
use cwsend::planner::{build_plan, stats};
use cwsend::timing::Timing;
use cwsend::tokenizer::tokenize_messages;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum DrillMode {
    /// Common CW words with occasional callsigns and prosigns.
    Words,
    /// Random character groups.
    Groups,
    /// A scripted two-station QSO exchange.
    Contact,
}

#[derive(Debug, Args, Clone, Copy)]
struct SpeedArgs {
    /// Element (character) speed in WPM.
    #[arg(long, default_value_t = 20.0)]
    wpm: f64,

    /// Farnsworth spacing speed in WPM; stretches only the silence
    /// between characters and words. Defaults to the element speed.
    #[arg(long)]
    farnsworth: Option<f64>,
}

impl SpeedArgs {
    fn timing(self) -> Result<Timing> {
        let farnsworth = self.farnsworth.unwrap_or(self.wpm);
        ensure!(
            self.wpm.is_finite() && self.wpm > 0.0,
            "--wpm must be a positive number"
        );
        ensure!(
            farnsworth.is_finite() && farnsworth > 0.0,
            "--farnsworth must be a positive number"
        );
        Ok(Timing::from_speeds(self.wpm, farnsworth))
    }
}

#[derive(Debug, Parser)]
#[command(name = "cwsend")]
#[command(about = "Farnsworth-spaced Morse code sender", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Build a playback plan and print it as JSON
    Plan {
        /// Input text file with one message per line, or '-' for stdin
        #[arg(long, value_name = "PATH")]
        input: PathBuf,

        /// Output plan file (defaults to stdout)
        #[arg(long, value_name = "PATH")]
        output: Option<PathBuf>,

        /// Message index to start the plan from
        #[arg(long, default_value_t = 0)]
        start_message: usize,

        #[command(flatten)]
        speed: SpeedArgs,
    },

    /// Send messages through the audio backend
    Send {
        /// Input text file with one message per line, or '-' for stdin
        #[arg(long, value_name = "PATH")]
        input: PathBuf,

        /// Message index to start from
        #[arg(long, default_value_t = 0)]
        start_message: usize,

        /// Sidetone frequency in Hz
        #[arg(long, default_value_t = 500.0)]
        freq: f32,

        /// Disable the console character trace
        #[arg(long)]
        no_trace: bool,

        #[command(flatten)]
        speed: SpeedArgs,
    },

    /// Generate practice content, optionally sending it immediately
    Drill {
        #[arg(long, value_enum, default_value_t = DrillMode::Words)]
        mode: DrillMode,

        /// Word count for words mode
        #[arg(long, default_value_t = 25)]
        words: usize,

        /// Group count for groups mode
        #[arg(long, default_value_t = 10)]
        groups: usize,

        /// Characters per group for groups mode
        #[arg(long, default_value_t = 5)]
        group_size: usize,

        /// Exclude letters from groups
        #[arg(long)]
        no_letters: bool,

        /// Exclude digits from groups
        #[arg(long)]
        no_numbers: bool,

        /// Exclude punctuation from groups
        #[arg(long)]
        no_symbols: bool,

        /// Exclude random callsigns from word drills
        #[arg(long)]
        no_callsigns: bool,

        /// Exclude prosigns from word drills
        #[arg(long)]
        no_prosigns: bool,

        /// Optional RNG seed (for reproducible drills)
        #[arg(long)]
        seed: Option<u64>,

        /// Send the generated content instead of printing it
        #[arg(long)]
        play: bool,

        /// Sidetone frequency in Hz
        #[arg(long, default_value_t = 500.0)]
        freq: f32,

        /// Disable the console character trace
        #[arg(long)]
        no_trace: bool,

        #[command(flatten)]
        speed: SpeedArgs,
    },
}

/// Prints each character as it is sent, QSO-log style.
#[derive(Debug, Default)]
struct ConsoleTrace {
    enabled: bool,
}

impl SenderHandler for ConsoleTrace {
    fn on_message_start(&mut self, message_index: usize) {
        if self.enabled {
            eprintln!();
            eprint!("[{}] ", message_index + 1);
        }
    }

    fn on_char_start(&mut self, display: &str, _meta: &CharMeta) {
        if self.enabled {
            eprint!("{display}");
            let _ = io::stderr().flush();
        }
    }

    fn on_finish(&mut self) {
        if self.enabled {
            eprintln!();
        }
    }
}

fn read_messages(path: &PathBuf) -> Result<Vec<String>> {
    let text = if path.as_os_str() == std::ffi::OsStr::new("-") {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read stdin")?;
        buf
    } else {
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?
    };

    let messages: Vec<String> = text
        .lines()
        .map(str::trim_end)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();

    ensure!(!messages.is_empty(), "input contains no messages");
    Ok(messages)
}

fn write_output(path: &PathBuf, contents: &str) -> Result<()> {
    fs::write(path, contents).with_context(|| format!("failed to write {}", path.display()))
}

fn rng_from_seed(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

fn send_messages(
    messages: &[String],
    timing: Timing,
    start_message: usize,
    freq: f32,
    trace: bool,
) -> Result<()> {
    let stop = Arc::new(AtomicBool::new(false));
    {
        let stop = stop.clone();
        ctrlc::set_handler(move || {
            stop.store(true, Ordering::SeqCst);
        })
        .context("failed to install Ctrl+C handler")?;
    }

    let driver = create_driver(freq)?;
    let mut sender = Sender::new(driver, timing, ConsoleTrace { enabled: trace });

    sender.load_messages(messages, start_message);
    sender.play();
    ensure!(
        sender.status() == PlayState::Playing,
        "nothing to send from message {start_message}"
    );

    while sender.status() == PlayState::Playing {
        if stop.load(Ordering::SeqCst) {
            sender.stop();
            eprintln!();
            return Err(anyhow!("aborted"));
        }
        std::thread::sleep(Duration::from_millis(EVENT_TICK_MS));
        sender.tick();
    }

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Plan {
            input,
            output,
            start_message,
            speed,
        } => {
            let timing = speed.timing()?;
            let messages = read_messages(&input)?;
            let stream = tokenize_messages(&messages);

            let start_message = start_message.min(messages.len() - 1);
            let start_index = stream
                .tokens
                .iter()
                .position(|token| token.message_index() >= start_message)
                .unwrap_or(stream.tokens.len());

            let plan = build_plan(&stream.tokens, start_index, timing, None)
                .ok_or_else(|| anyhow!("no tokens to plan from message {start_message}"))?;

            let s = stats(&plan);
            eprintln!(
                "Planned: {} events, {} tones, {} chars, ~{:.1}s",
                s.events, s.tones, s.chars, s.duration
            );

            let json = serde_json::to_string_pretty(&plan).context("failed to serialize plan")?;
            if let Some(out) = output {
                write_output(&out, &json)?;
            } else {
                println!("{json}");
            }
        }
        Command::Send {
            input,
            start_message,
            freq,
            no_trace,
            speed,
        } => {
            let timing = speed.timing()?;
            let messages = read_messages(&input)?;
            send_messages(&messages, timing, start_message, freq, !no_trace)?;
        }
        Command::Drill {
            mode,
            words,
            groups,
            group_size,
            no_letters,
            no_numbers,
            no_symbols,
            no_callsigns,
            no_prosigns,
            seed,
            play,
            freq,
            no_trace,
            speed,
        } => {
            let timing = speed.timing()?;
            let mut rng = rng_from_seed(seed);
            let config = ContentConfig {
                letters: !no_letters,
                numbers: !no_numbers,
                symbols: !no_symbols,
                callsigns: !no_callsigns,
                prosigns: !no_prosigns,
            };

            let messages = match mode {
                DrillMode::Words => vec![random_words(words, config, &mut rng)],
                DrillMode::Groups => {
                    let content = random_char_groups(groups, group_size, config, &mut rng);
                    ensure!(
                        !content.is_empty(),
                        "groups drill needs at least one enabled character class"
                    );
                    vec![content]
                }
                DrillMode::Contact => contact_exchange(&mut rng),
            };

            if play {
                send_messages(&messages, timing, 0, freq, !no_trace)?;
            } else {
                for message in &messages {
                    println!("{message}");
                }
            }
        }
    }

    Ok(())
}
