use std::io::{self, BufRead, Write};

use anyhow::{Context, Result, anyhow};
use clap::{Parser, ValueEnum};
use log::{info, warn};

use equordle::expression::OperatorSet;
use equordle::search::SearchLimits;
use equordle::search::constants::DEFAULT_MAX_NODES;
use equordle::session::RoundSession;
use equordle::utils::{normalize_line, parse_operator_spec, validate_round_spec};

const DEFAULT_COLUMNS: usize = 6;

/// Log level for the application
#[derive(Debug, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_log_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Equordle - List every equation consistent with Wordle-style feedback
#[derive(Parser, Debug)]
#[command(name = "equordle")]
#[command(about = "List the arithmetic equations still possible after green/yellow/red feedback")]
#[command(version)]
pub struct CliArgs {
    /// Number of characters in the equation, '=' included
    pub length: usize,

    /// Allowed operators, e.g. "+-*/" ('+' is required)
    pub operators: String,

    /// A guess and its feedback, e.g. 12+46=58:ryryygrr (repeatable)
    #[arg(short, long = "guess", value_name = "EQUATION:FEEDBACK")]
    pub guesses: Vec<String>,

    /// Keep reading guesses from stdin
    #[arg(short, long)]
    pub interactive: bool,

    /// Node budget per '=' position, 0 for unlimited
    #[arg(long, default_value_t = DEFAULT_MAX_NODES)]
    pub max_nodes: u64,

    /// Candidates printed per row
    #[arg(long, default_value_t = DEFAULT_COLUMNS)]
    pub columns: usize,

    /// Log level (default: warn)
    #[arg(short, long, value_enum, default_value = "warn")]
    pub log_level: LogLevel,
}

/// Configuration for the CLI application
pub struct CliConfig {
    pub length: usize,
    pub operators: OperatorSet,
    pub guesses: Vec<(String, String)>,
    pub interactive: bool,
    pub limits: SearchLimits,
    pub columns: usize,
    pub log_level: LogLevel,
}

/// One line of interactive input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Guess { equation: String, feedback: String },
    Undo,
    Reset,
    End,
    Empty,
}

/// Parse command line arguments and return configuration
pub fn parse_args() -> Result<CliConfig> {
    build_config(CliArgs::parse())
}

/// Validate parsed arguments
pub fn build_config(args: CliArgs) -> Result<CliConfig> {
    let operators = parse_operator_spec(&args.operators).context("Invalid operator set")?;
    validate_round_spec(args.length, &operators).context("Invalid round")?;

    let guesses = args
        .guesses
        .iter()
        .map(|g| split_guess(g))
        .collect::<Result<Vec<_>>>()?;

    let limits = match args.max_nodes {
        0 => SearchLimits::unlimited(),
        n => SearchLimits::with_max_nodes(n),
    };

    Ok(CliConfig {
        length: args.length,
        operators,
        guesses,
        interactive: args.interactive,
        limits,
        columns: args.columns.max(1),
        log_level: args.log_level,
    })
}

/// Splits `EQUATION:FEEDBACK` or `EQUATION FEEDBACK`. In the second form the
/// last whitespace-separated word is the feedback.
pub fn split_guess(text: &str) -> Result<(String, String)> {
    let (equation, feedback) = match text.split_once(':') {
        Some((equation, feedback)) => (equation.to_string(), feedback.to_string()),
        None => {
            let trimmed = text.trim();
            let (equation, feedback) = trimmed
                .rsplit_once(char::is_whitespace)
                .ok_or_else(|| anyhow!("Expected EQUATION:FEEDBACK, got '{}'", text))?;
            (equation.to_string(), feedback.to_string())
        }
    };

    let equation = normalize_line(&equation);
    let feedback = normalize_line(&feedback);
    if equation.is_empty() || feedback.is_empty() {
        return Err(anyhow!("Expected EQUATION:FEEDBACK, got '{}'", text));
    }
    Ok((equation, feedback))
}

pub fn parse_command(line: &str) -> Result<Command> {
    let trimmed = line.trim();
    match trimmed.to_ascii_lowercase().as_str() {
        "" => Ok(Command::Empty),
        "undo" => Ok(Command::Undo),
        "reset" => Ok(Command::Reset),
        "end" | "quit" | "exit" => Ok(Command::End),
        _ => {
            let (equation, feedback) = split_guess(trimmed)?;
            Ok(Command::Guess { equation, feedback })
        }
    }
}

/// Lays candidates out column by column, `columns` per row.
pub fn format_columns(candidates: &[String], columns: usize) -> String {
    let columns = columns.max(1);
    let width = candidates.iter().map(String::len).max().unwrap_or(0) + 1;
    let rows = candidates.len().div_ceil(columns);

    let mut out = String::new();
    for row in 0..rows {
        let mut line = String::new();
        for col in 0..columns {
            if let Some(candidate) = candidates.get(row + col * rows) {
                line.push_str(&format!("{:<width$}", candidate, width = width));
            }
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

fn print_candidates<W: Write>(out: &mut W, session: &RoundSession, columns: usize) -> Result<()> {
    let candidates = session.candidates();
    if candidates.is_empty() {
        writeln!(out, "No solution.")?;
    } else {
        write!(out, "{}", format_columns(candidates, columns))?;
        writeln!(out, "({} candidates)", candidates.len())?;
    }
    if session.is_truncated() {
        writeln!(
            out,
            "Warning: search budget exhausted, the list may be incomplete."
        )?;
    }
    if session.constraints().has_conflict() {
        writeln!(out, "Warning: the feedback so far is contradictory.")?;
    }
    Ok(())
}

/// Reads commands until `end` or end of input. Bad lines are reported and
/// skipped.
pub fn run_interactive<R: BufRead, W: Write>(
    session: &mut RoundSession,
    input: R,
    out: &mut W,
    columns: usize,
) -> Result<()> {
    write!(out, "Round {}> ", session.round())?;
    out.flush()?;

    for line in input.lines() {
        let line = line.context("Failed to read input")?;
        match parse_command(&line) {
            Ok(Command::End) => break,
            Ok(Command::Empty) => {}
            Ok(Command::Undo) => {
                if session.undo()? {
                    writeln!(out, "Rolled back one guess.")?;
                    if !session.history().is_empty() {
                        print_candidates(out, session, columns)?;
                    }
                } else {
                    writeln!(out, "Nothing to undo.")?;
                }
            }
            Ok(Command::Reset) => {
                session.reset();
                writeln!(out, "Round reset.")?;
            }
            Ok(Command::Guess { equation, feedback }) => {
                let submitted = session.submit(&equation, &feedback).map(|_| ());
                match submitted {
                    Ok(()) => print_candidates(out, session, columns)?,
                    Err(e) => writeln!(out, "Error: {}", e)?,
                }
            }
            Err(e) => writeln!(out, "Error: {}", e)?,
        }
        write!(out, "Round {}> ", session.round())?;
        out.flush()?;
    }
    writeln!(out)?;
    Ok(())
}

/// Initialize logging based on the provided log level
pub fn init_logging(log_level: &LogLevel) -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log_level.to_log_level_filter())
        .init();
    Ok(())
}

/// Run the main application logic
pub fn run() -> Result<()> {
    let config = parse_args()?;

    // Initialize logging
    init_logging(&config.log_level)?;

    let mut session = RoundSession::with_limits(config.length, config.operators, config.limits)
        .context("Failed to start round")?;

    info!(
        "Solving length {} with operators {} ({} guesses given)",
        config.length,
        config.operators,
        config.guesses.len()
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();

    for (equation, feedback) in &config.guesses {
        session
            .submit(equation, feedback)
            .with_context(|| format!("Rejected guess '{}:{}'", equation, feedback))?;
    }
    if !config.guesses.is_empty() {
        print_candidates(&mut out, &session, config.columns)?;
    } else if !config.interactive {
        warn!("No guesses given; nothing to solve");
    }

    if config.interactive {
        let stdin = io::stdin();
        run_interactive(&mut session, stdin.lock(), &mut out, config.columns)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(length: usize, operators: &str, guesses: &[&str]) -> CliArgs {
        CliArgs {
            length,
            operators: operators.to_string(),
            guesses: guesses.iter().map(|g| g.to_string()).collect(),
            interactive: false,
            max_nodes: DEFAULT_MAX_NODES,
            columns: DEFAULT_COLUMNS,
            log_level: LogLevel::Warn,
        }
    }

    #[test]
    fn test_build_config() {
        let config = build_config(args(8, "+-*/", &["12+46=58:ryryygrr"])).unwrap();
        assert_eq!(config.length, 8);
        assert_eq!(config.operators.len(), 4);
        assert_eq!(
            config.guesses,
            vec![("12+46=58".to_string(), "ryryygrr".to_string())]
        );
        assert_eq!(config.limits.max_nodes, Some(DEFAULT_MAX_NODES));

        assert!(build_config(args(8, "-*", &[])).is_err());
        assert!(build_config(args(4, "+", &[])).is_err());
        assert!(build_config(args(8, "+", &["12+46=58"])).is_err());

        let mut unlimited = args(8, "+", &[]);
        unlimited.max_nodes = 0;
        assert_eq!(build_config(unlimited).unwrap().limits.max_nodes, None);
    }

    #[test]
    fn test_split_guess_forms() {
        let expected = ("12+46=58".to_string(), "ryryygrr".to_string());
        assert_eq!(split_guess("12+46=58:ryryygrr").unwrap(), expected);
        assert_eq!(split_guess("12+46=58 ryryygrr").unwrap(), expected);
        assert_eq!(split_guess(" 12 + 46 = 58   ryryygrr ").unwrap(), expected);
        assert!(split_guess("12+46=58").is_err());
        assert!(split_guess(":ryryygrr").is_err());
    }

    #[test]
    fn test_parse_command() {
        assert_eq!(parse_command("undo").unwrap(), Command::Undo);
        assert_eq!(parse_command(" RESET ").unwrap(), Command::Reset);
        assert_eq!(parse_command("end").unwrap(), Command::End);
        assert_eq!(parse_command("   ").unwrap(), Command::Empty);
        assert_eq!(
            parse_command("1+2=3 ggggg").unwrap(),
            Command::Guess {
                equation: "1+2=3".to_string(),
                feedback: "ggggg".to_string()
            }
        );
        assert!(parse_command("hello").is_err());
    }

    #[test]
    fn test_format_columns_column_major() {
        let candidates: Vec<String> = ["1+1=2", "1+2=3", "1+3=4", "1+4=5", "1+5=6"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let text = format_columns(&candidates, 2);
        assert_eq!(text, "1+1=2 1+4=5\n1+2=3 1+5=6\n1+3=4\n");
        assert_eq!(format_columns(&[], 3), "");
    }

    #[test]
    fn test_interactive_session() {
        let mut session = RoundSession::new(5, parse_operator_spec("+").unwrap()).unwrap();
        let input = "1+2=3:ggggg\nundo\nundo\nbogus\nend\n1+2=3 ggggg\n";
        let mut out = Vec::new();
        run_interactive(&mut session, input.as_bytes(), &mut out, 4).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("1+2=3\n(1 candidates)"));
        assert!(text.contains("Rolled back one guess."));
        assert!(text.contains("Nothing to undo."));
        assert!(text.contains("Error:"));
        // Input after `end` is ignored
        assert!(session.history().is_empty());
    }

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(
            LogLevel::Error.to_log_level_filter(),
            log::LevelFilter::Error
        );
        assert_eq!(LogLevel::Warn.to_log_level_filter(), log::LevelFilter::Warn);
        assert_eq!(LogLevel::Info.to_log_level_filter(), log::LevelFilter::Info);
        assert_eq!(
            LogLevel::Debug.to_log_level_filter(),
            log::LevelFilter::Debug
        );
        assert_eq!(
            LogLevel::Trace.to_log_level_filter(),
            log::LevelFilter::Trace
        );
    }
}
