use std::io::Read;

use anyhow::Context;
use csv::{StringRecordsIntoIter, Trim};

use crate::command::{Command, CommandError};

/// Tokenizes space separated command lines.
///
/// The first line holds the number of commands that follow. It must be read
/// with [`CommandLineParser::read_count`] before iterating.
pub struct CommandLineParser<R> {
    iter: StringRecordsIntoIter<R>,
}

impl<R> CommandLineParser<R>
where
    R: Read,
{
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .delimiter(b' ')
            .has_headers(false)
            .quoting(false)
            .trim(Trim::All)
            .flexible(true)
            .from_reader(source);

        Self {
            iter: reader.into_records(),
        }
    }

    pub fn read_count(&mut self) -> anyhow::Result<usize> {
        let record = self
            .iter
            .next()
            .context("Expected the number of commands on the first line")?
            .context("Failed to read the number of commands")?;
        let (count,): (usize,) = record
            .deserialize(None)
            .with_context(|| format!("Invalid number of commands `{}`", record.as_slice()))?;
        Ok(count)
    }
}

impl<R> Iterator for CommandLineParser<R>
where
    R: Read,
{
    type Item = (u64, Result<Command, CommandError>);

    fn next(&mut self) -> Option<Self::Item> {
        let curr_line = self.iter.reader().position().line();
        self.iter.next().map(|row| {
            let command = row
                .map_err(CommandError::from)
                .and_then(|record| Command::parse(&record));
            (curr_line, command)
        })
    }
}
