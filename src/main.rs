use std::{
    io::{self, Read, Write},
    path::{Path, PathBuf},
};

use anyhow::bail;
use clap::Parser;
use rayon::prelude::*;
use unellipsis::{
    App, JsonFileStore, LogNotifier, Message, Settings, SettingsStore, load_chat, load_text,
    read_chat, save_chat, save_text, write_chat,
};

#[derive(Parser)]
#[command(version, about = "Strip ellipses from chat text")]
struct Cli {
    /// Rewrite files in place
    #[arg(long = "in-place", requires = "files")]
    in_place: bool,
    /// Read input as a chat in JSON Lines form, one message per line
    #[arg(long = "chat")]
    chat: bool,
    /// Report how many characters would be removed without changing anything
    #[arg(long = "check", conflicts_with = "in_place")]
    check: bool,
    /// JSON settings file; missing keys take their defaults
    #[arg(long = "settings", value_name = "PATH")]
    settings: Option<PathBuf>,
    /// Only log warnings and errors
    #[arg(short, long)]
    quiet: bool,
    #[command(flatten)]
    opts: CleanOpts,
    /// Files to clean
    files: Vec<PathBuf>,
}

#[derive(clap::Args, Clone, Copy)]
#[expect(
    clippy::struct_excessive_bools,
    reason = "CLI exposes four independent flags"
)]
struct CleanOpts {
    /// Remove every period, decimal points included
    #[arg(long = "all-dots")]
    all_dots: bool,
    /// Treat ".." as an ellipsis
    #[arg(long = "two-dots")]
    two_dots: bool,
    /// Delete runs without leaving a space between words
    #[arg(long = "no-preserve-space")]
    no_preserve_space: bool,
    /// Clean inside code spans and HTML tags too
    #[arg(long = "no-protect-code")]
    no_protect_code: bool,
}

impl CleanOpts {
    /// Flags only ever override the settings file in one direction.
    fn apply(self, settings: &mut Settings) {
        settings.remove_all_dots |= self.all_dots;
        settings.treat_two_dots |= self.two_dots;
        settings.preserve_space &= !self.no_preserve_space;
        settings.protect_code &= !self.no_protect_code;
    }
}

fn load_settings(cli: &Cli) -> anyhow::Result<Settings> {
    let mut settings = match &cli.settings {
        Some(path) => JsonFileStore::new(path).load()?,
        None => Settings::default(),
    };
    cli.opts.apply(&mut settings);
    Ok(settings)
}

/// Read one input as a chat; plain text becomes a single message.
fn load(cli: &Cli, path: Option<&Path>) -> anyhow::Result<Vec<Message>> {
    Ok(match (path, cli.chat) {
        (Some(path), true) => load_chat(path)?,
        (Some(path), false) => vec![Message::new(load_text(path)?)],
        (None, true) => read_chat(io::stdin().lock())?,
        (None, false) => {
            let mut input = String::new();
            io::stdin().read_to_string(&mut input)?;
            vec![Message::new(input)]
        }
    })
}

fn primary_text(chat: &[Message]) -> &str {
    chat.first().and_then(Message::text).unwrap_or_default()
}

/// Clean one input and return what should go to stdout.
///
/// With `--in-place` the file is only rewritten when something was removed.
fn process(cli: &Cli, app: &App<LogNotifier>, path: Option<&Path>) -> anyhow::Result<String> {
    let mut chat = load(cli, path)?;

    if cli.check {
        let count = app.check_all(&chat);
        return Ok(match path {
            Some(path) => format!("{}: {count}\n", path.display()),
            None => format!("{count}\n"),
        });
    }

    let removed = app.remove_all(&mut chat);
    match path {
        Some(path) if cli.in_place => {
            if removed > 0 {
                if cli.chat {
                    save_chat(path, &chat)?;
                } else {
                    save_text(path, primary_text(&chat))?;
                }
            }
            Ok(String::new())
        }
        _ if cli.chat => {
            let mut buf = Vec::new();
            write_chat(&mut buf, &chat)?;
            Ok(String::from_utf8(buf)?)
        }
        _ => Ok(primary_text(&chat).to_string()),
    }
}

/// Entry point for the command-line cleaner.
///
/// With no files, stdin is cleaned to stdout. Files are processed in
/// parallel and their output printed in argument order; a file that fails
/// is reported on stderr without stopping the others.
///
/// # Examples
///
/// ```sh
/// # Clean a transcript and print it
/// unellipsis notes.txt
///
/// # Clean a chat file in place, treating ".." as an ellipsis
/// unellipsis --chat --two-dots --in-place chat.jsonl
///
/// # Count what would be removed
/// cat notes.txt | unellipsis --check
/// ```
fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = if cli.quiet { "warn" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let app = App::new(load_settings(&cli)?, LogNotifier);

    if cli.files.is_empty() {
        print!("{}", process(&cli, &app, None)?);
        return Ok(());
    }

    let results: Vec<_> = cli
        .files
        .par_iter()
        .map(|path| process(&cli, &app, Some(path)))
        .collect();

    let mut stdout = io::stdout().lock();
    let mut failed = 0;
    for result in results {
        match result {
            Ok(out) => stdout.write_all(out.as_bytes())?,
            Err(err) => {
                eprintln!("{err:#}");
                failed += 1;
            }
        }
    }
    stdout.flush()?;

    if failed > 0 {
        bail!("failed to process {failed} file(s)");
    }
    Ok(())
}
