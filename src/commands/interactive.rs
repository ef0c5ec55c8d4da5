//! Interactive user prompting for the CLI.

use std::io::{self, BufRead, IsTerminal, Write};

use crate::error::Result;

/// Check if stdin is a TTY (interactive)
pub fn is_stdin_tty() -> bool {
    io::stdin().is_terminal()
}

/// Prompt user for yes/no confirmation
///
/// Returns `true` only for `y` or `Y`.
///
/// ```no_run
/// # use shopfloor::commands::interactive::confirm;
/// if confirm("Delete work order WO-001").unwrap() {
///     // proceed with deletion
/// }
/// ```
pub fn confirm(prompt: &str) -> Result<bool> {
    print!("{}? [y/N] ", prompt);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    Ok(input.trim().eq_ignore_ascii_case("y"))
}

/// Prompt for a single line on stderr, so stdout stays clean for `--json`.
pub fn prompt_line(prompt: &str) -> Result<String> {
    eprint!("{prompt}: ");
    io::stderr().flush()?;

    let mut input = String::new();
    io::stdin().lock().read_line(&mut input)?;
    Ok(input.trim_end_matches(['\r', '\n']).to_string())
}
