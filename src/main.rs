use anyhow::{anyhow, Context, Result};
use clap::Parser;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::runtime::Runtime;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use wildclip::api::{HttpPartnerApi, PartnerApi};
use wildclip::cli::{Cli, Commands};
use wildclip::clipboard::{spawn_watcher, ClipboardRead, SystemClipboard};
use wildclip::config::Config;
use wildclip::matcher::{match_clipboard, MatchOutcome};
use wildclip::monitor::{Monitor, MonitorEvent};
use wildclip::whitelist::{load_whitelist, WhitelistCache};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;
    init_tracing(&config);

    let runtime = Runtime::new().context("Failed to start async runtime")?;

    match cli.command {
        None | Some(Commands::Run) => handle_run(&config, &runtime),
        Some(Commands::Check { text, fetch }) => handle_check(&config, &runtime, &text, fetch),
        Some(Commands::Domains) => handle_domains(&config, &runtime),
        Some(Commands::Vanity { url }) => handle_vanity(&config, &runtime, &url),
    }
}

fn init_tracing(config: &Config) {
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .init();
}

fn handle_run(config: &Config, runtime: &Runtime) -> Result<()> {
    let api = Arc::new(HttpPartnerApi::new(&config.api)?);
    let clipboard = SystemClipboard::new()?;
    let mut monitor = Monitor::new(api, clipboard, runtime.handle().clone());

    monitor.start_loader();

    let stop = Arc::new(AtomicBool::new(false));
    let watcher = spawn_watcher(
        SystemClipboard::new,
        config.monitor.poll_interval(),
        monitor.sender(),
        Arc::clone(&stop),
    )
    .context("Failed to start clipboard watcher")?;

    let shutdown_tx = monitor.sender();
    runtime.spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Interrupt received, shutting down");
            let _ = shutdown_tx.send(MonitorEvent::Shutdown);
        }
    });

    monitor.run();

    stop.store(true, Ordering::Release);
    if watcher.join().is_err() {
        warn!("Clipboard watcher panicked");
    }
    Ok(())
}

fn handle_check(config: &Config, runtime: &Runtime, text: &str, fetch: bool) -> Result<()> {
    let cache = WhitelistCache::new();

    if fetch {
        let api = HttpPartnerApi::new(&config.api)?;
        let summary = runtime.block_on(load_whitelist(&api, &cache));
        if let Some(err) = summary.error {
            println!("Warning: whitelist is partial ({} domains): {}", summary.concepts, err);
        }
    }

    let outcome = match_clipboard(&ClipboardRead::from_text(text), &cache);
    match outcome {
        MatchOutcome::NotText => println!("Not text: nothing to do"),
        MatchOutcome::NotUrl => println!("Not a URL: nothing to do"),
        MatchOutcome::Malformed => println!("Malformed URL: nothing to do"),
        MatchOutcome::AlreadyRewritten => println!("Already a wild.link: nothing to do"),
        MatchOutcome::NoMatch { domain } => {
            println!("No partner domain matched (domain = {})", domain);
        }
        MatchOutcome::Matched { url, concept } => {
            println!("Matched '{}': would rewrite {}", concept.value(), url);
        }
    }

    Ok(())
}

fn handle_domains(config: &Config, runtime: &Runtime) -> Result<()> {
    let api = HttpPartnerApi::new(&config.api)?;
    let cache = WhitelistCache::new();
    let summary = runtime.block_on(load_whitelist(&api, &cache));

    for concept in cache.snapshot() {
        println!("{}", concept.value());
    }
    println!("\n{} partner domains in {} pages", summary.concepts, summary.pages);

    match summary.error {
        Some(err) => Err(anyhow!(err).context("Whitelist load stopped early")),
        None => Ok(()),
    }
}

fn handle_vanity(config: &Config, runtime: &Runtime, url: &str) -> Result<()> {
    let api = HttpPartnerApi::new(&config.api)?;

    let link = runtime
        .block_on(api.create_vanity_link(url))
        .with_context(|| format!("Failed to create a vanity link for {url}"))?;
    println!("{}", link.vanity_url);
    Ok(())
}
