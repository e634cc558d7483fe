//! Password generator CLI.

use clap::Parser;
use passgen::{
    batch::BatchOrchestrator,
    config::FileConfig,
    entropy::SharedEntropy,
    error::Result,
    passphrase::{self, PassphrasePolicy},
    strength::{analyze, Strength},
};
use std::io::Write;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{debug, info};

mod cli;

use cli::{Cli, Commands, GenerateArgs, PassphraseArgs};

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    // Logs go to stderr; stdout carries only secrets.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::from(e.exit_code())
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => {
            info!(path = %path.display(), "Loading configuration");
            FileConfig::from_file(path)?
        }
        None => FileConfig::default(),
    };

    match cli.command {
        Commands::Generate(args) => generate_passwords(&config, &args),
        Commands::Passphrase(args) => generate_passphrase(&config, &args),
        Commands::Check { password } => check(&password),
        Commands::Hash { input, algorithm } => {
            println!("{}", algorithm.digest(input.as_bytes()));
            Ok(())
        }
    }
}

fn generate_passwords(config: &FileConfig, args: &GenerateArgs) -> Result<()> {
    let validator = config.validator()?;
    let policy = Arc::new(validator.validate(&args.policy(config.generate.length))?);

    let count = args.count.unwrap_or(config.generate.count);
    let jobs = args.jobs.unwrap_or(config.generate.jobs);
    let format = args.format.unwrap_or(config.generate.format);

    debug!(
        length = policy.length(),
        pool = policy.pool_size(),
        count,
        unique = args.unique,
        jobs,
        "Generating passwords"
    );

    let entropy = SharedEntropy::from_os_entropy(config.entropy.reseed_interval_bytes)?;
    let results = BatchOrchestrator::new(jobs)
        .with_max_count(config.limits.max_count)
        .run(&entropy, &policy, count, args.unique)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for result in &results {
        writeln!(out, "{}", format.render(result.password()))?;
        if args.show_strength {
            report_strength(result.strength());
        }
    }
    out.flush()?;

    info!(count = results.len(), "Generation complete");
    Ok(())
}

fn generate_passphrase(config: &FileConfig, args: &PassphraseArgs) -> Result<()> {
    let defaults = &config.passphrase;
    let policy = PassphrasePolicy {
        words: args.words.unwrap_or(defaults.words),
        separator: args
            .separator
            .clone()
            .unwrap_or_else(|| defaults.separator.clone()),
        include_number: args.number || defaults.include_number,
        include_symbol: args.symbol || defaults.include_symbol,
    };

    let mut entropy = SharedEntropy::from_os_entropy(config.entropy.reseed_interval_bytes)?;
    let phrase = passphrase::generate(&mut entropy, &policy)?;

    println!("{}", phrase.as_str());
    if args.show_strength {
        report_strength(phrase.strength());
    }
    Ok(())
}

fn check(password: &str) -> Result<()> {
    let analysis = analyze(password);

    println!("length: {}", analysis.length);
    println!("pool size: {}", analysis.pool_size);
    println!(
        "strength: {:.2} bits ({})",
        analysis.strength.bits(),
        analysis.rating
    );
    for check in &analysis.checks {
        let mark = if check.passed { "x" } else { " " };
        println!("[{}] {}", mark, check.label);
    }
    Ok(())
}

fn report_strength(strength: Strength) {
    eprintln!("strength: {}", strength);
}

