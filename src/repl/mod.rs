//! Interactive shell for editing sources and generating compositions

use crate::commands::compose::summary;
use crate::commands::{create_registry, CommandContext, CommandResult};
use crate::repl::watcher::FileWatcher;
use crate::session::Session;
use anyhow::{anyhow, Result};
use colored::*;
use crossbeam_channel::{unbounded, Receiver, Sender};
use notify::{Event, EventKind};
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RustylineResult};
use std::path::Path;
use std::thread;
use tracing::{debug, warn};

pub mod watcher;

/// Types of events the shell loop handles
enum ReplEvent {
    Input(Result<String, ReadlineError>),
}

/// Interactive shell around a [`Session`]
pub struct Repl {
    editor: Option<DefaultEditor>,
    ctx: CommandContext,

    // Event channels
    tx_input: Sender<ReplEvent>,
    rx_input: Receiver<ReplEvent>,
    tx_watcher: Sender<notify::Result<Event>>,
    rx_watcher: Receiver<notify::Result<Event>>,

    watcher: Option<FileWatcher>,
}

impl Repl {
    /// Create a new shell starting from the given session
    pub fn new(session: Session) -> RustylineResult<Self> {
        let editor = DefaultEditor::new()?;
        let (tx_input, rx_input) = unbounded();
        let (tx_watcher, rx_watcher) = unbounded();

        Ok(Repl {
            editor: Some(editor),
            ctx: CommandContext::new(session),
            tx_input,
            rx_input,
            tx_watcher,
            rx_watcher,
            watcher: None,
        })
    }

    /// Start the shell loop
    pub fn run(&mut self) -> Result<()> {
        println!(
            "{} {}",
            "🎵".bright_yellow(),
            "Molecular Music Generator".bright_cyan().bold()
        );
        println!(
            "Current source: {}. Try {}, {} or {}",
            self.ctx.session.source.display_name().green(),
            "generate".cyan(),
            "presets".cyan(),
            "set tempo 96".cyan()
        );
        println!(
            "Type '{}' for more information, '{}' or {} to exit.\n",
            "help".bright_green(),
            "quit".bright_red(),
            "Ctrl+C".bright_red()
        );

        let mut editor = self
            .editor
            .take()
            .ok_or_else(|| anyhow!("Shell is already running"))?;
        let tx_input = self.tx_input.clone();

        thread::spawn(move || loop {
            let prompt = format!("{} ", "molecular>".bright_magenta().bold());
            match editor.readline(&prompt) {
                Ok(line) => {
                    let line = line.trim().to_string();
                    if !line.is_empty() {
                        let _ = editor.add_history_entry(&line);
                    }
                    if tx_input.send(ReplEvent::Input(Ok(line))).is_err() {
                        break;
                    }
                }
                Err(err) => {
                    let _ = tx_input.send(ReplEvent::Input(Err(err)));
                    break;
                }
            }
        });

        let registry = create_registry();

        loop {
            crossbeam_channel::select! {
                recv(self.rx_input) -> msg => match msg {
                    Ok(ReplEvent::Input(Ok(line))) => {
                        if line.is_empty() {
                            continue;
                        }
                        match registry.execute(&line, &mut self.ctx) {
                            CommandResult::Success => {}
                            CommandResult::Message(msg) => println!("{}", msg),
                            CommandResult::Exit => {
                                println!("{} 🎵", "Goodbye!".bright_cyan());
                                break;
                            }
                            CommandResult::Error(e) => {
                                println!("{} {}", "Error:".bright_red().bold(), e.red());
                            }
                            CommandResult::Watch(path) => self.watch(&path),
                            CommandResult::NotACommand => println!(
                                "{} Unknown command '{}'. Type '{}' for a list",
                                "Error:".bright_red().bold(),
                                line,
                                "help".bright_green()
                            ),
                        }
                    }
                    Ok(ReplEvent::Input(Err(ReadlineError::Interrupted)))
                    | Ok(ReplEvent::Input(Err(ReadlineError::Eof))) => {
                        println!("{} 🎵", "Goodbye!".bright_cyan());
                        break;
                    }
                    Ok(ReplEvent::Input(Err(err))) => {
                        println!(
                            "{} {}",
                            "Error reading input:".bright_red().bold(),
                            err.to_string().red()
                        );
                        break;
                    }
                    Err(_) => break, // Channel closed
                },

                recv(self.rx_watcher) -> msg => match msg {
                    Ok(Ok(event)) => {
                        if matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_)) {
                            for path in &event.paths {
                                self.reload(path);
                            }
                        }
                    }
                    Ok(Err(e)) => {
                        warn!(error = %e, "file watch failed");
                        println!("{} Watch error: {}", "Error:".red(), e);
                    }
                    Err(_) => break, // Channel closed
                }
            }
        }

        Ok(())
    }

    fn watch(&mut self, path: &str) {
        if self.watcher.is_none() {
            match FileWatcher::new(self.tx_watcher.clone()) {
                Ok(w) => self.watcher = Some(w),
                Err(e) => {
                    println!("{} Failed to create watcher: {}", "Error:".red(), e);
                    return;
                }
            }
        }

        if let Some(w) = &mut self.watcher {
            match w.watch(path) {
                Ok(()) => {
                    println!(
                        "{} Watching {} for changes...",
                        "👀".bright_cyan(),
                        path.bright_green()
                    );
                    self.reload(Path::new(path));
                }
                Err(e) => println!("{} Failed to watch {}: {}", "Error:".red(), path, e),
            }
        }
    }

    /// Reload a watched source file and regenerate from it
    fn reload(&mut self, path: &Path) {
        debug!(path = %path.display(), "reloading source");
        println!("{} Source changed: {}", "⚡".bright_yellow(), path.display());
        let session = &mut self.ctx.session;
        if let Err(e) = session.load_file(path) {
            println!("{} {:#}", "Error:".red(), e);
            return;
        }
        match session.generate() {
            Ok(composition) => println!("{}", summary(composition)),
            Err(e) => println!("{} {:#}", "Error:".red(), e),
        }
    }
}

/// Convenience function to start the shell
pub fn start(session: Session) -> Result<()> {
    let mut repl = Repl::new(session).map_err(|e| anyhow!("Failed to initialize shell: {}", e))?;
    repl.run()
}
