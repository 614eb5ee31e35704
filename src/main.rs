use anyhow::Result;
use molecular::commands::compose::summary;
use molecular::{repl, Session};
use tracing::Level;

const USAGE: &str = "Usage: molecular [-v|--verbose] [SOURCE.json]";

fn main() -> Result<()> {
    let mut verbose = false;
    let mut source_path = None;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "-v" | "--verbose" => verbose = true,
            "-h" | "--help" => {
                println!("{}", USAGE);
                return Ok(());
            }
            flag if flag.starts_with('-') => anyhow::bail!("Unknown option '{}'\n{}", flag, USAGE),
            path => source_path = Some(path.to_string()),
        }
    }

    tracing_subscriber::fmt()
        .with_max_level(if verbose { Level::DEBUG } else { Level::INFO })
        .with_writer(std::io::stderr)
        .init();

    let mut session = Session::new();
    match source_path {
        Some(path) => {
            session.load_file(&path)?;
            let composition = session.generate()?;
            println!("{}", summary(composition));
            Ok(())
        }
        None => repl::start(session),
    }
}
