//! Line-oriented front-end around [`crate::ledger`]: reads a command count
//! followed by that many commands and prints one line per command.

use std::io::{Read, Write};

use crate::{command::CommandError, ledger::in_memory_ledger::InMemoryLedger};
use anyhow::Result;
use command_parser::CommandLineParser;
use printer::print_result;
use tracing::{debug, warn};
pub mod command_parser;
pub mod printer;

pub struct Service<'w, R, W: 'w> {
    pub input: R,
    pub output: &'w mut W,
    pub error_printer: Box<dyn FnMut(u64, CommandError)>,
}

impl<'w, R, W> Service<'w, R, W>
where
    R: Read,
    W: Write + 'w,
{
    pub fn run(mut self) -> Result<()> {
        let mut parser = CommandLineParser::new(self.input);
        let count = parser.read_count()?;
        debug!(count, "processing commands");

        let mut ledger = InMemoryLedger::default();

        for (line, command) in parser.take(count) {
            match command {
                Ok(command) => {
                    let result = command.execute(&mut ledger);
                    if let Err(err) = &result {
                        debug!(line, %err, "command failed");
                    }
                    print_result(self.output, &result)?;
                }
                Err(err) => {
                    warn!(line, %err, "command rejected");
                    (self.error_printer)(line, err);
                }
            }
        }

        if let Err(err) = self.output.flush() {
            anyhow::bail!("Failed to flush output: {err}")
        }
        Ok(())
    }
}
