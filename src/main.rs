use std::{io, path::PathBuf};

use clap::Parser as ClapParser;
use httpsh::{
    cli::{CliError, ConsoleLines},
    config::ShellConfig,
    input::FileLines,
    render::{Renderer, TerminalRenderer},
    transport::HttpTransport,
    Shell, Value,
};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(ClapParser)]
#[command(name = "httpsh")]
#[command(about = "httpsh - an interactive shell for HTTP requests and their JSON bodies")]
#[command(version)]
struct Cli {
    /// Run the commands in a script file and exit
    script: Option<PathBuf>,

    /// Evaluate a single command line and exit
    #[arg(short, long)]
    command: Option<String>,

    /// Skip the ~/.httpshrc start-up script
    #[arg(long)]
    no_rc: bool,

    /// Disable coloured output
    #[arg(long)]
    no_color: bool,

    /// List the shell's commands and exit
    #[arg(long)]
    commands: bool,
}

fn main() {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let mut config = ShellConfig::default().with_color(!cli.no_color);
    if cli.no_rc {
        config = config.without_startup_script();
    }
    if !config.color {
        colored::control::set_override(false);
    }

    let mut shell = Shell::new(Box::new(HttpTransport::new()?));
    let mut renderer = TerminalRenderer::stdout();

    if cli.commands {
        let help = shell.execute("help", &mut FileLines::new(io::empty()), &mut renderer)?;
        renderer.display(&help);
        return Ok(());
    }

    if let Some(script) = config.existing_startup_script().map(|p| p.to_path_buf()) {
        if let Err(e) = shell.run_script(&script, &mut renderer) {
            renderer.report(&e);
        }
    }

    if let Some(line) = cli.command {
        let mut stdin = FileLines::new(io::stdin().lock());
        let result = shell.execute(&line, &mut stdin, &mut renderer)?;
        renderer.display(&result);
        return Ok(());
    }

    if let Some(script) = cli.script {
        let result = shell.run_script(&script, &mut renderer)?;
        renderer.display(&result);
        return Ok(());
    }

    if !atty::is(atty::Stream::Stdin) {
        let mut stdin = FileLines::new(io::stdin().lock());
        shell.run(&mut stdin, &mut renderer);
        return Ok(());
    }

    renderer.display(&Value::text(format!(
        "httpsh v{}\ntype help for help.",
        env!("CARGO_PKG_VERSION")
    )));
    let mut console = ConsoleLines::new(&config)?;
    shell.run(&mut console, &mut renderer);
    console.save_history();
    Ok(())
}
