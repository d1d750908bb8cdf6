use clap::Parser;
use std::fs::File;
use std::io::BufReader;

use tcppeek::source::{FrameSource, HexLineSource, PollOutcome, SourceError};
use tcppeek::{cli, config, display, protocol};

fn main() {
    let args = cli::Cli::parse();

    // Initialize tracing/logging
    let log_level = match args.verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .init();

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: {}", err);
            std::process::exit(1);
        }
    };

    if let Err(e) = run(&config) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

#[derive(Debug, Clone)]
struct RuntimeConfig {
    input: config::InputConfig,
    run: config::RunConfig,
    output: config::OutputConfig,
    verbose_level: u8,
}

fn load_config(args: &cli::Cli) -> Result<RuntimeConfig, config::ConfigError> {
    let base = match &args.config {
        Some(path) => config::Config::load(path)?,
        None => config::Config::default(),
    };

    let mut input = base.input.clone();
    let mut run = base.run.clone();
    let mut output = base.output.clone();

    if let Some(value) = &args.input {
        input.path = Some(value.clone());
    }
    if let Some(value) = args.snaplen {
        input.snaplen = value;
    }
    if let Some(value) = args.count {
        run.count = value;
    }
    if let Some(value) = args.payload_bytes {
        output.payload_bytes = value;
    }
    if args.detail {
        output.detail = true;
    }
    if args.tcp_only {
        output.tcp_only = true;
    }
    if args.quiet {
        output.quiet = true;
    }

    Ok(RuntimeConfig {
        input,
        run,
        output,
        verbose_level: args.verbose,
    })
}

/// Main read loop: poll the frame source, decode, and display.
fn run(config: &RuntimeConfig) -> Result<(), Box<dyn std::error::Error>> {
    let mut source: Box<dyn FrameSource> = match &config.input.path {
        Some(path) => Box::new(HexLineSource::new(
            BufReader::new(File::open(path)?),
            config.input.snaplen,
        )),
        None => Box::new(HexLineSource::new(
            BufReader::new(std::io::stdin()),
            config.input.snaplen,
        )),
    };

    let input_name = config
        .input
        .path
        .as_deref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "(stdin)".into());

    println!("tcppeek v{}", env!("CARGO_PKG_VERSION"));
    println!("Reading frames from: {}", input_name);
    if config.run.count > 0 {
        println!("Decoding {} frames...", config.run.count);
    }
    println!();

    let mut frames: u64 = 0;
    let mut tcp_frames: u64 = 0;
    let mut truncated: u64 = 0;
    let mut malformed: u64 = 0;

    loop {
        if config.run.count > 0 && frames >= config.run.count {
            break;
        }

        let captured = match source.poll_next() {
            PollOutcome::Frame(captured) => captured,
            PollOutcome::Timeout => {
                tracing::trace!("source timeout, polling again");
                continue;
            }
            PollOutcome::EndOfCapture => break,
            PollOutcome::Error(err) => match err {
                SourceError::Io(_) => {
                    tracing::error!(error = %err, "input failed");
                    return Err(Box::new(err));
                }
                SourceError::BadHex { .. } => {
                    tracing::warn!(error = %err, "skipping undecodable line");
                    continue;
                }
            },
        };

        frames += 1;
        let frame = captured.frame();
        let packet = protocol::decode(&frame);

        if packet.truncated {
            truncated += 1;
        }
        if packet.malformed {
            malformed += 1;
        }
        let is_tcp = packet.tcp.is_some();
        if is_tcp {
            tcp_frames += 1;
        }
        if let Some(error) = &packet.error {
            tracing::debug!(error = %error, "decode stopped early on frame #{}", frames);
        }

        if config.output.tcp_only && !is_tcp {
            continue;
        }
        if config.output.detail || config.verbose_level >= 2 {
            display::print_packet_detail(frames, &frame, &packet, config.output.payload_bytes);
        } else if !config.output.quiet {
            display::print_packet_summary(frames, &frame, &packet);
        }
    }

    display::print_run_summary(frames, tcp_frames, truncated, malformed);
    Ok(())
}
