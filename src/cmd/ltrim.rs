use crate::cmd::{parse_integer, wrong_arg_count, CommandError, ParseError};
use crate::SharedStoreBase;

/// The LTRIM operation
#[derive(Debug, PartialEq)]
pub struct Ltrim {
    key: String,
    start: i64,
    stop: i64,
}

impl Ltrim {
    pub fn new(key: String, start: i64, stop: i64) -> Ltrim {
        Ltrim { key, start, stop }
    }

    /// Syntax:
    /// ltrim key start stop
    pub fn parse(cmd_strings: Vec<String>) -> Result<Ltrim, ParseError> {
        if cmd_strings.len() != 4 {
            return Err(wrong_arg_count(&cmd_strings));
        }

        let start = parse_integer("start", &cmd_strings[2])?;
        let stop = parse_integer("stop", &cmd_strings[3])?;

        Ok(Ltrim::new(cmd_strings[1].clone(), start, stop))
    }

    /// Keep only the inclusive slice `start..=stop`. Bounds that select
    /// nothing leave an empty list behind.
    pub fn execute(self, shared_store: &dyn SharedStoreBase) -> Result<String, CommandError> {
        shared_store.ltrim(self.key, self.start, self.stop)?;

        Ok("OK".to_string())
    }
}
