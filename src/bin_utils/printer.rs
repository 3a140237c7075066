use std::io::Write;

use crate::{command::CommandOutput, history::ERROR_MARKER, ledger::LedgerError};

/// Writes the result of one command as a single line. Failures are prefixed
/// with [`ERROR_MARKER`].
pub fn print_result<W>(
    output: &mut W,
    result: &Result<CommandOutput, LedgerError>,
) -> anyhow::Result<()>
where
    W: Write,
{
    let written = match result {
        Ok(out) => writeln!(output, "{out}"),
        Err(err) => writeln!(output, "{ERROR_MARKER} {err}"),
    };
    if let Err(err) = written {
        anyhow::bail!("Failed to write result: {err}")
    }
    Ok(())
}
