use crate::cmd::{wrong_arg_count, ParseError};
use crate::SharedStoreBase;

/// The EXISTS operation
#[derive(Debug, PartialEq)]
pub struct Exists {
    // The key to check
    key: String,
}

impl Exists {
    /// Create a new `Exists` command
    pub fn new(key: String) -> Exists {
        Exists { key }
    }

    /// Syntax:
    /// exists key
    pub fn parse(cmd_strings: Vec<String>) -> Result<Exists, ParseError> {
        if cmd_strings.len() != 2 {
            return Err(wrong_arg_count(&cmd_strings));
        }

        Ok(Exists::new(cmd_strings[1].clone()))
    }

    /// Execute the `Exists` command, replying `true` or `false`
    pub fn execute(self, shared_store: &dyn SharedStoreBase) -> String {
        shared_store.exists(self.key).to_string()
    }
}
