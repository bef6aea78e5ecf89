//! Notifier worker.
//!
//! Reads events (one JSON object per line) from a file or stdin, classifies
//! each one and hands the resulting notifications to the SMTP sender, or to
//! the log sender with `--dry-run`.

use clap::Parser;
use core_config::tracing::{init_tracing, install_color_eyre};
use core_config::{Environment, FromEnv};
use domain_notifier::{
    ErrorReporter, Event, LogSender, NotificationProcessor, NotificationSender, NotifierConfig,
    ProcessOutcome, SmtpConfig, SmtpSender, TemplateEngine,
};
use eyre::{Result, WrapErr};
use std::path::PathBuf;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "notifier-worker")]
#[command(about = "Derive and send notifications for domain events")]
pub struct Cli {
    /// File with one JSON event per line. Reads stdin when omitted.
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Log the notifications instead of sending them
    #[arg(long)]
    pub dry_run: bool,
}

/// Totals over one worker run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Events decoded and processed.
    pub events: usize,
    /// Lines that did not decode as an event.
    pub skipped: usize,
    pub outcome: ProcessOutcome,
}

pub async fn run() -> Result<()> {
    install_color_eyre();

    let environment = Environment::from_env();
    init_tracing(&environment);

    let cli = Cli::parse();
    let config = NotifierConfig::from_env().wrap_err("Failed to load notifier configuration")?;

    info!(
        dry_run = cli.dry_run,
        input = ?cli.input,
        link_root = %config.link.root,
        "Starting notifier worker"
    );

    let summary = if cli.dry_run {
        let processor = NotificationProcessor::new(config, LogSender);
        read_events(&cli, &processor).await?
    } else {
        let smtp = SmtpConfig::from_env().wrap_err("Failed to load SMTP configuration")?;
        let sender = SmtpSender::new(smtp, TemplateEngine::new()?)?;
        if let Err(e) = sender.health_check().await {
            warn!(error = %e, "SMTP server not reachable yet, sends may fail");
        }
        let processor = NotificationProcessor::new(config, sender);
        read_events(&cli, &processor).await?
    };

    info!(
        events = summary.events,
        skipped = summary.skipped,
        produced = summary.outcome.produced,
        sent = summary.outcome.sent,
        failed = summary.outcome.failed,
        "Notifier worker finished"
    );

    Ok(())
}

async fn read_events<S, R>(cli: &Cli, processor: &NotificationProcessor<S, R>) -> Result<RunSummary>
where
    S: NotificationSender,
    R: ErrorReporter,
{
    match &cli.input {
        Some(path) => {
            let file = tokio::fs::File::open(path)
                .await
                .wrap_err_with(|| format!("Failed to open {}", path.display()))?;
            process_lines(BufReader::new(file), processor).await
        }
        None => process_lines(BufReader::new(tokio::io::stdin()), processor).await,
    }
}

/// Process every JSON line of `reader`; blank lines are ignored and lines
/// that are not UTF-8 or do not decode are logged and skipped.
pub async fn process_lines<B, S, R>(
    mut reader: B,
    processor: &NotificationProcessor<S, R>,
) -> Result<RunSummary>
where
    B: AsyncBufRead + Unpin,
    S: NotificationSender,
    R: ErrorReporter,
{
    let mut summary = RunSummary::default();
    let mut buf = Vec::new();
    let mut line_no = 0usize;

    loop {
        buf.clear();
        let read = reader
            .read_until(b'\n', &mut buf)
            .await
            .wrap_err("Failed to read event input")?;
        if read == 0 {
            break;
        }
        line_no += 1;

        let line = match std::str::from_utf8(&buf) {
            Ok(line) => line.trim(),
            Err(e) => {
                summary.skipped += 1;
                warn!(line = line_no, error = %e, "Skipping non UTF-8 input line");
                continue;
            }
        };
        if line.is_empty() {
            continue;
        }

        match Event::from_json(line) {
            Ok(event) => {
                summary.events += 1;
                summary.outcome.merge(processor.process(&event).await);
            }
            Err(e) => {
                summary.skipped += 1;
                warn!(line = line_no, error = %e, "Skipping undecodable event");
            }
        }
    }

    Ok(summary)
}
