//! Dashboard console: wires configuration, logging and the simulated
//! backend, then reads commands from stdin.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::io::{self, Write};
use std::sync::Arc;

use color_eyre::eyre::{Context, Result, eyre};
use dashboard::app::{AppState, DashboardSettings, LogFormat};
use dashboard::inbound::console::views::{render_error, render_toasts};
use dashboard::inbound::console::{ConsoleSession, Reply};
use dashboard::outbound::TokioSleeper;
use mockable::DefaultClock;
use ortho_config::OrthoConfig;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::runtime::Builder;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

const PROMPT: &str = "dashboard> ";

fn main() -> Result<()> {
    color_eyre::install()?;
    let settings = DashboardSettings::load_from_iter(std::env::args_os())
        .map_err(|err| eyre!("failed to load configuration: {err}"))?;
    init_tracing(settings.log_format()?);

    let app = AppState::from_settings(&settings, Arc::new(TokioSleeper), Arc::new(DefaultClock))
        .wrap_err("failed to assemble dashboard")?;

    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .wrap_err("failed to build console runtime")?;
    runtime.block_on(repl(&app))
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = fmt().with_env_filter(filter).with_writer(io::stderr);
    let outcome = match format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.try_init(),
    };
    if let Err(e) = outcome {
        warn!(error = %e, "tracing init failed");
    }
}

async fn repl(app: &AppState) -> Result<()> {
    let mut session = ConsoleSession::new(app);
    if app.auth().restore().is_some() {
        info!("session token restored");
    }
    print_lines(&session.render())?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        prompt()?;
        let Some(line) = lines.next_line().await.wrap_err("failed to read stdin")? else {
            break;
        };
        match session.execute(&line).await {
            Ok(Reply::Quit) => break,
            Ok(Reply::Output(output)) => print_lines(&output)?,
            Err(err) => print_lines(&render_error(&err))?,
        }
        print_lines(&render_toasts(&app.toasts().take_unseen()))?;
    }
    Ok(())
}

fn prompt() -> Result<()> {
    let mut stdout = io::stdout().lock();
    stdout.write_all(PROMPT.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

fn print_lines(lines: &[String]) -> Result<()> {
    let mut stdout = io::stdout().lock();
    for line in lines {
        writeln!(stdout, "{line}")?;
    }
    Ok(())
}
