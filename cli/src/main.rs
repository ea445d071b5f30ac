//! CLI entrypoint for case-council
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use council_application::{
    DeliberationLogger, LoggedProgress, NoDeliberationLogger, NoProgress, ProgressSink,
    RunConfig, RunDeliberationInput, RunDeliberationUseCase, RunRegistry, ScenarioReanalyzer,
    StructuredGenerator, intervention_channel,
};
use council_domain::{CaseInput, OutputFormat, Participant};
use council_infrastructure::{
    CaseFileLoader, ConfigLoader, FileConfig, FileLoggingConfig, GeminiClient, JsonlEventLogger,
};
use council_presentation::{
    Cli, ConsoleClinician, ConsoleFormatter, ProgressReporter, ScenarioOutcome, SimpleProgress,
    VerdictCapture,
};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };

    if cli.show_config {
        return show_config(&cli, &config);
    }

    let _log_guard = init_logging(cli.verbose, &config.logging);
    info!("Starting case-council");
    for warning in config.warnings() {
        warn!("{}", warning);
    }

    if !config.output.color {
        colored::control::set_override(false);
    }

    let Some(case_path) = cli.case_file.as_deref() else {
        bail!("A case file is required");
    };
    let case = CaseFileLoader::load(case_path)?;
    let run_config = resolve_run_config(&cli, &config, &case);
    let format: OutputFormat = cli
        .output
        .map(Into::into)
        .or(config.output.format)
        .unwrap_or_default();

    // === Dependency Injection ===
    let client = Arc::new(GeminiClient::new(&config.provider)?);
    let use_case = RunDeliberationUseCase::new(client.clone()).with_registry(RunRegistry::new());

    let event_logger = match cli
        .event_log
        .clone()
        .or_else(|| config.output.event_log.as_ref().map(Into::into))
    {
        Some(path) => Some(
            JsonlEventLogger::create(&path)
                .with_context(|| format!("Cannot create event log {}", path.display()))?,
        ),
        None => None,
    };
    let logger: &dyn DeliberationLogger = match &event_logger {
        Some(l) => l,
        None => &NoDeliberationLogger,
    };

    let display: Box<dyn ProgressSink> = if cli.quiet && !cli.interactive {
        Box::new(NoProgress)
    } else if cli.quiet || format == OutputFormat::Json {
        Box::new(SimpleProgress)
    } else {
        Box::new(ProgressReporter::new())
    };
    let logged = LoggedProgress::new(display.as_ref(), logger, case.case_id.clone());
    let progress = VerdictCapture::new(&logged);

    let input = RunDeliberationInput::new(case.clone()).with_config(run_config);
    let run = if cli.interactive {
        let (mut gate, responder) = intervention_channel();
        let clinician = ConsoleClinician::new(&progress, responder);
        use_case
            .execute_with_progress(&input, &clinician, Some(&mut gate))
            .await?
    } else {
        use_case.execute_with_progress(&input, &progress, None).await?
    };
    let verdict = progress
        .take()
        .context("The run finished without a verdict")?;

    // What-if re-analysis of the finished discussion
    let reanalyzer = ScenarioReanalyzer::new(StructuredGenerator::new(client));
    let mut scenarios = Vec::new();
    for premise in &cli.what_if {
        if !cli.quiet {
            eprintln!("-> Re-analysing: {}", premise);
        }
        let scenario = reanalyzer
            .reanalyze_run(&case, &run, premise)
            .await
            .with_context(|| format!("What-if '{}' failed", premise))?;
        scenarios.push(ScenarioOutcome {
            premise: premise.trim().to_string(),
            verdict: scenario,
        });
    }

    let output = match format {
        OutputFormat::Full => ConsoleFormatter::format_full(&run, &verdict, &scenarios),
        OutputFormat::Verdict => ConsoleFormatter::format_verdict(&run, &verdict, &scenarios),
        OutputFormat::Json => ConsoleFormatter::format_json(&run, &verdict, &scenarios),
    };

    println!("{}", output);

    Ok(())
}

/// CLI `-p` beats the case file's suggested panel, which beats config.
fn resolve_run_config(cli: &Cli, config: &FileConfig, case: &CaseInput) -> RunConfig {
    let mut run_config = config.council.to_run_config();

    if !cli.participants.is_empty() {
        let panel = cli
            .participants
            .iter()
            .filter(|name| !name.trim().is_empty())
            .map(|name| name.parse::<Participant>().unwrap_or_else(|never| match never {}))
            .collect();
        run_config = run_config.with_participants(panel);
    } else if !case.participants.is_empty() {
        run_config = run_config.with_participants(case.participants.clone());
    }

    if let Some(rounds) = cli.rounds {
        run_config = run_config.with_round_count(rounds);
    }
    if cli.grounded {
        run_config = run_config.with_grounded_synthesis(true);
    }
    run_config
}

fn show_config(cli: &Cli, config: &FileConfig) -> Result<()> {
    for line in ConfigLoader::describe_sources(cli.config.as_deref()) {
        println!("{}", line);
    }
    for warning in config.warnings() {
        println!("warning: {}", warning);
    }
    let mut shown = config.clone();
    if shown.provider.api_key.is_some() {
        shown.provider.api_key = Some("********".to_string());
    }
    println!();
    println!("{}", toml::to_string_pretty(&shown)?);
    Ok(())
}

/// Initialize logging based on verbosity level, plus an optional rolling
/// file log. The returned guard must live until exit.
fn init_logging(verbose: u8, logging: &FileLoggingConfig) -> Option<WorkerGuard> {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(logging.filter.as_deref().unwrap_or("warn"))
        }),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    let stderr_layer = fmt::layer().with_target(false).with_writer(std::io::stderr);

    match &logging.dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "case-council.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::registry()
                .with(filter)
                .with(stderr_layer)
                .with(fmt::layer().with_ansi(false).with_writer(writer))
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(stderr_layer)
                .init();
            None
        }
    }
}
