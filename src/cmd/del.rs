use crate::cmd::{wrong_arg_count, ParseError};
use crate::SharedStoreBase;

/// The DEL operation
#[derive(Debug, PartialEq)]
pub struct Del {
    // The keys to remove
    keys: Vec<String>,
}

impl Del {
    /// Create a new `DEL` command
    pub fn new(keys: Vec<String>) -> Del {
        Del { keys }
    }

    /// Parsing the necessary arguments for the `DEL` command
    ///
    /// Syntax:
    /// del key [key ...]
    pub fn parse(cmd_strings: Vec<String>) -> Result<Del, ParseError> {
        if cmd_strings.len() < 2 {
            return Err(wrong_arg_count(&cmd_strings));
        }

        Ok(Del::new(cmd_strings[1..].to_vec()))
    }

    /// Execute the `Del` command
    ///
    /// Keys that do not exist are skipped; the reply is always `OK`
    pub fn execute(self, shared_store: &dyn SharedStoreBase) -> String {
        shared_store.del(self.keys);

        "OK".to_string()
    }
}
