use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use hikiko_script::{
    config::ConverterConfig,
    convert_script_from_file,
    diagnostics::{LogSink, RecordingSink, Severity},
    MessageVec,
};
use log::LevelFilter;
use std::{fs::File, io::Write};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Text,
}

/// Convert a dialogue script into structured message records
#[derive(Parser, Debug)]
#[command(name = "hikiko-script", version)]
struct Cli {
    /// Dialogue script to convert
    input: String,

    /// Write output here instead of stdout
    #[arg(short, long)]
    output: Option<String>,

    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// JSON list of [code, faceset] pairs replacing the built-in writer codes
    #[arg(long, env = "HIKIKO_FACESETS")]
    facesets: Option<String>,

    /// Skip lines with unknown facesets or bad portraits instead of stopping
    #[arg(long)]
    keep_going: bool,

    /// Do not report text modifiers
    #[arg(long)]
    no_scan: bool,

    /// Do not emit modifier-free text
    #[arg(long)]
    no_strip: bool,

    /// Also write every diagnostic to this file
    #[arg(long)]
    dump_log: Option<String>,

    /// More output per occurrence (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn level_for(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(level_for(cli.verbose))
        .parse_default_env()
        .init();

    let mut config = ConverterConfig::with_faceset_file(cli.facesets.as_deref())?;
    config.keep_going = cli.keep_going;
    config.scan_modifiers = !cli.no_scan;
    config.strip_modifiers = !cli.no_strip;

    let mut sink = RecordingSink::new(LogSink);
    let result = convert_script_from_file(&cli.input, &config, &mut sink);

    if let Some(path) = &cli.dump_log {
        sink.dump(path)
            .with_context(|| format!("cannot write log dump {}", path))?;
    }

    let messages = result?;

    let rendered = match cli.format {
        OutputFormat::Json => serde_json::to_string_pretty(&messages)?,
        OutputFormat::Text => MessageVec(&messages).to_string(),
    };

    match &cli.output {
        Some(path) => {
            let mut file =
                File::create(path).with_context(|| format!("cannot create {}", path))?;
            writeln!(file, "{}", rendered)?;
        }
        None => println!("{}", rendered),
    }

    let skipped = sink.count(Severity::Error);
    if skipped > 0 {
        log::warn!("{} line(s) skipped, see errors above", skipped);
    }
    log::info!("wrote {} messages", messages.len());

    Ok(())
}
