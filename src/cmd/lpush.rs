use crate::cmd::{wrong_arg_count, CommandError, ParseError};
use crate::SharedStoreBase;

/// The LPUSH operation
#[derive(Debug, PartialEq)]
pub struct Lpush {
    // The key to push at
    key: String,

    // The elements to push
    elements: Vec<String>,
}

impl Lpush {
    /// Create a new `LPUSH` command
    pub fn new(key: String, elements: Vec<String>) -> Lpush {
        Lpush { key, elements }
    }

    /// Parsing the necessary arguments for the `LPUSH` command
    ///
    /// Syntax:
    /// lpush key element [element ...]
    pub fn parse(cmd_strings: Vec<String>) -> Result<Lpush, ParseError> {
        if cmd_strings.len() < 3 {
            return Err(wrong_arg_count(&cmd_strings));
        }

        Ok(Lpush::new(cmd_strings[1].clone(), cmd_strings[2..].to_vec()))
    }

    /// Execute the `Lpush` command
    ///
    /// Elements are pushed to the head one at a time, so the last
    /// element ends up at index 0. An absent key starts as an empty list.
    pub fn execute(self, shared_store: &dyn SharedStoreBase) -> Result<String, CommandError> {
        shared_store.lpush(self.key, self.elements)?;

        Ok("OK".to_string())
    }
}
