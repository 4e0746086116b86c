use std::io::{BufRead, Write};

use anyhow::{Context, Result};

use crate::query::{Assistant, QueryRouter};
use crate::roster::RosterTable;

const PROMPT: &str = "What would you like to know about VALORANT Esports? ";

pub fn print_banner<W: Write>(out: &mut W, players: usize) -> Result<()> {
    writeln!(out, "\nVALORANT Esports Manager Assistant")?;
    writeln!(out, "Loaded {players} players.")?;
    writeln!(out, "\nSystem ready! You can ask about:")?;
    writeln!(out, "- Top players by various metrics (KD, ACS, MVP, kills, aces)")?;
    writeln!(out, "- Optimal team compositions")?;
    writeln!(out, "- Anything else goes to the assistant")?;
    writeln!(out, "Type 'exit' to quit the program.")?;
    Ok(())
}

/// Reads one question per line until "exit" or end of input. The first
/// error from answering a question ends the loop and is returned.
pub fn run_repl<R: BufRead, W: Write>(
    mut input: R,
    out: &mut W,
    router: &QueryRouter,
    roster: &RosterTable,
    assistant: &dyn Assistant,
) -> Result<usize> {
    let mut answered = 0usize;
    let mut line = String::new();
    loop {
        write!(out, "\n{PROMPT}")?;
        out.flush()?;

        line.clear();
        let read = input.read_line(&mut line).context("failed reading input")?;
        if read == 0 {
            break;
        }
        let query = line.trim();
        if query.eq_ignore_ascii_case("exit") {
            break;
        }
        if query.is_empty() {
            continue;
        }

        let response = router.respond(query, roster, assistant)?;
        writeln!(out, "\nAssistant: {response}")?;
        answered += 1;
    }
    Ok(answered)
}
