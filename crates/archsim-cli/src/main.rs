//! Command-line driver: reads a trace, runs it through a configured
//! cache hierarchy, predictor set, and CPU accountant, and emits the
//! report.

use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::{debug, info};

use archsim_cpu::Cpu;
use archsim_trace::{to_register_ids, Config, EventSource, TraceEvent, TraceReader};

#[derive(Parser)]
#[command(name = "archsim")]
#[command(about = "Instruction-trace-driven cache, branch-predictor, and cycle-accounting simulator")]
struct Cli {
    /// Path to a newline-delimited-JSON trace file, or "-" for stdin.
    #[arg(long)]
    trace: PathBuf,

    /// Path to a TOML configuration file. Canonical configuration is
    /// used when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Path to write the report to. Written to stdout when omitted.
    #[arg(long)]
    output: Option<PathBuf>,

    /// Raise the log level (repeatable: -v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("archsim: {err}");
            ExitCode::FAILURE
        }
    }
}

fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = match &cli.config {
        Some(path) => {
            info!("loading configuration from {}", path.display());
            Config::load(path)?
        }
        None => {
            info!("using canonical configuration");
            Config::default()
        }
    };

    let memory = config.build_memory()?;
    let predictors = config.build_predictors()?;
    debug!("{} predictor(s) registered", predictors.len());

    let mut cpu = Cpu::new(memory, predictors);

    info!("reading trace from {}", cli.trace.display());
    let mut source: Box<dyn EventSource> = if cli.trace == PathBuf::from("-") {
        Box::new(TraceReader::new(io::stdin().lock()))
    } else {
        Box::new(TraceReader::new(BufReader::new(File::open(&cli.trace)?)))
    };

    let event_count = drive(source.as_mut(), &mut cpu)?;
    info!("processed {event_count} event(s)");

    match &cli.output {
        Some(path) => {
            let mut file = File::create(path)?;
            cpu.report(&mut file)?;
        }
        None => {
            let stdout = io::stdout();
            let mut lock = stdout.lock();
            cpu.report(&mut lock)?;
            lock.flush()?;
        }
    }

    Ok(())
}

/// Replays every event from `source` into `cpu`, finalizing on an
/// explicit `Finalize` event or when the source is exhausted. Returns
/// the number of events processed.
fn drive(source: &mut dyn EventSource, cpu: &mut Cpu) -> Result<u64, archsim_trace::TraceError> {
    let mut count = 0u64;
    let mut saw_finalize = false;
    while let Some(event) = source.next_event()? {
        count += 1;
        match event {
            TraceEvent::MemRead { ip, addr, write_regs } => {
                cpu.on_mem_read(ip, addr, &to_register_ids(&write_regs));
            }
            TraceEvent::MemWrite { ip, addr } => {
                cpu.on_mem_write(ip, addr);
            }
            TraceEvent::CondBranch { ip, target, taken } => {
                cpu.on_cond_branch(ip, target, taken);
            }
            TraceEvent::Other { read_regs, write_regs } => {
                cpu.on_other(&to_register_ids(&read_regs), &to_register_ids(&write_regs));
            }
            TraceEvent::Finalize => {
                info!("finalize event received");
                cpu.finalize();
                saw_finalize = true;
            }
        }
    }
    if !saw_finalize {
        cpu.finalize();
    }
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use archsim_memory::{MemoryLevel, Ram};
    use archsim_predictor::Predictor;
    use archsim_trace::VecEventSource;

    #[test]
    fn drive_processes_every_event_and_finalizes() {
        let memory = MemoryLevel::Ram(Ram::new(4));
        let mut cpu = Cpu::new(memory, vec![Predictor::always_jump()]);
        let mut source = VecEventSource::new(vec![
            TraceEvent::MemRead { ip: 0, addr: 0, write_regs: vec![] },
            TraceEvent::CondBranch { ip: 4, target: 8, taken: true },
            TraceEvent::Finalize,
        ]);

        let count = drive(&mut source, &mut cpu).unwrap();
        assert_eq!(count, 3);
        assert_eq!(cpu.instrs(), 2);
    }

    #[test]
    fn drive_finalizes_even_without_an_explicit_event() {
        let memory = MemoryLevel::Ram(Ram::new(4));
        let mut cpu = Cpu::new(memory, vec![]);
        let mut source = VecEventSource::new(vec![TraceEvent::MemWrite { ip: 0, addr: 0 }]);

        drive(&mut source, &mut cpu).unwrap();
        assert_eq!(cpu.instrs(), 1);
    }
}
