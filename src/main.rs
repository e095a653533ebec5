use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;

use txmenu::config::Theme;
use txmenu::debug_log;

mod ui;

/// Parsed command line.
#[derive(Debug, Default, PartialEq)]
struct Options {
    theme: Option<PathBuf>,
    debug_log: Option<PathBuf>,
    toolbar: bool,
}

enum Command {
    Run(Options),
    Help,
    Version,
}

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let options = match parse_args(&args) {
        Ok(Command::Run(options)) => options,
        Ok(Command::Help) => {
            print_help();
            return ExitCode::SUCCESS;
        }
        Ok(Command::Version) => {
            println!("txmenu {}", env!("CARGO_PKG_VERSION"));
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            eprintln!("error: {e}");
            eprintln!("run 'txmenu --help' for usage");
            return ExitCode::FAILURE;
        }
    };

    match run(options) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(options: Options) -> anyhow::Result<()> {
    if let Some(path) = &options.debug_log {
        debug_log::init(path)
            .with_context(|| format!("failed to open debug log {}", path.display()))?;
    }

    let theme = match &options.theme {
        Some(path) => Theme::load(path),
        None => Theme::load_default(),
    }
    .context("failed to load theme")?;

    let mut app = ui::App::new(theme, options.toolbar);
    let result = app.run().context("terminal error");

    debug_log::shutdown();
    result
}

fn parse_args(args: &[String]) -> Result<Command, String> {
    let mut options = Options::default();
    let mut iter = args.iter().peekable();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--help" | "-h" => return Ok(Command::Help),
            "--version" | "-V" => return Ok(Command::Version),
            "--toolbar" => options.toolbar = true,
            "--theme" => {
                let path = iter
                    .next()
                    .ok_or_else(|| "--theme requires a path".to_string())?;
                options.theme = Some(PathBuf::from(path));
            }
            "--debug-log" => {
                // The path is optional; the next flag is not a path
                let path = match iter.peek() {
                    Some(next) if !next.starts_with('-') => iter.next().map(PathBuf::from),
                    _ => None,
                };
                options.debug_log = Some(path.unwrap_or_else(debug_log::default_log_path));
            }
            other => return Err(format!("unknown argument '{other}'")),
        }
    }

    Ok(Command::Run(options))
}

fn print_help() {
    println!(
        "txmenu {} - Modal menu demo on a simulated transmitter display

USAGE:
    txmenu [OPTIONS]

OPTIONS:
    -h, --help              Print help information
    -V, --version           Print version information
    --theme <PATH>          Load the theme from PATH instead of ~/.txmenu/theme.json
    --debug-log [PATH]      Write a debug trace (default ~/.txmenu/debug.log)
    --toolbar               Attach a page toolbar next to the menu

DESCRIPTION:
    Opens a menu on a simulated 480x272 display. The rotary encoder is
    emulated with the arrow keys, the touch panel with the mouse.
    Press ? inside the demo for the key map.",
        env!("CARGO_PKG_VERSION")
    );
}
