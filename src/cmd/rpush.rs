use crate::cmd::{wrong_arg_count, CommandError, ParseError};
use crate::SharedStoreBase;

/// The RPUSH operation
#[derive(Debug, PartialEq)]
pub struct Rpush {
    // The key to push at
    key: String,

    // The elements to push
    elements: Vec<String>,
}

impl Rpush {
    /// Create a new `RPUSH` command
    pub fn new(key: String, elements: Vec<String>) -> Rpush {
        Rpush { key, elements }
    }

    /// Parsing the necessary arguments for the `RPUSH` command
    ///
    /// Syntax:
    /// rpush key element [element ...]
    pub fn parse(cmd_strings: Vec<String>) -> Result<Rpush, ParseError> {
        if cmd_strings.len() < 3 {
            return Err(wrong_arg_count(&cmd_strings));
        }

        Ok(Rpush::new(cmd_strings[1].clone(), cmd_strings[2..].to_vec()))
    }

    /// Execute the `Rpush` command, appending in argument order
    pub fn execute(self, shared_store: &dyn SharedStoreBase) -> Result<String, CommandError> {
        shared_store.rpush(self.key, self.elements)?;

        Ok("OK".to_string())
    }
}
