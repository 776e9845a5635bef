use std::io::{self, BufRead, Write};

use clap::Parser;
use log::info;

use whopper::report::{caret, Reporter};
use whopper::{Checker, Config, Error, LexPolicy};

/// Check propositional expressions for validity by truth tables.
///
/// Without EXPR arguments, reads one expression per line from standard input.
#[derive(Debug, Parser)]
#[command(author, version)]
struct Cli {
    /// Expressions to check, in order.
    #[arg(value_name = "EXPR")]
    expressions: Vec<String>,

    /// Prompt shown before each line in interactive mode.
    #[arg(long, value_name = "TEXT", default_value = "whopper > ")]
    prompt: String,

    /// Skip illegal characters instead of rejecting the expression.
    #[arg(long)]
    skip_illegal: bool,

    /// Reject expressions with more identifiers than this.
    #[arg(long, value_name = "INT", default_value = "24", value_parser = clap::value_parser!(u8).range(0..64))]
    max_identifiers: u8,

    /// Reject expressions nested (through `not` and parentheses) deeper than this.
    #[arg(long, value_name = "INT", default_value = "256")]
    max_depth: usize,

    /// Log level.
    #[arg(long, value_name = "LEVEL", default_value = "warn")]
    log_level: simplelog::LevelFilter,
}

/// Outcome of one expression.
enum Outcome {
    Valid,
    Invalid,
    Failed,
}

fn process(checker: &Checker, reporter: &Reporter, text: &str, out: &mut impl Write) -> color_eyre::Result<Outcome> {
    match checker.check(text) {
        Ok(table) => {
            reporter.write_to(out, &table)?;
            Ok(if table.is_valid() { Outcome::Valid } else { Outcome::Invalid })
        }
        Err(e) => {
            report_error(text, &e, out)?;
            Ok(Outcome::Failed)
        }
    }
}

fn report_error(text: &str, e: &Error, out: &mut impl Write) -> io::Result<()> {
    if let Some(offset) = e.offset() {
        writeln!(out, "{}", caret(text, offset))?;
    }
    writeln!(out, "Error: {}", e)
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Cli::parse();

    simplelog::TermLogger::init(
        args.log_level,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;
    info!("args = {:?}", args);

    let config = Config::default()
        .with_max_identifiers(args.max_identifiers as usize)
        .with_max_depth(args.max_depth)
        .with_lex_policy(if args.skip_illegal { LexPolicy::Skip } else { LexPolicy::Abort });
    let checker = Checker::new(config);
    let reporter = Reporter::default();

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if !args.expressions.is_empty() {
        let mut all_valid = true;
        for text in &args.expressions {
            match process(&checker, &reporter, text, &mut out)? {
                Outcome::Valid => {}
                Outcome::Invalid | Outcome::Failed => all_valid = false,
            }
        }
        out.flush()?;
        if !all_valid {
            std::process::exit(1);
        }
        return Ok(());
    }

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        write!(out, "{}", args.prompt)?;
        out.flush()?;

        let Some(line) = lines.next() else {
            // End of input: finish the prompt line.
            writeln!(out)?;
            break;
        };
        let line = line?;
        let text = line.trim_end_matches('\r');
        if text.trim().is_empty() {
            continue;
        }
        process(&checker, &reporter, text, &mut out)?;
    }

    Ok(())
}
