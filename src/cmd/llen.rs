use crate::cmd::{wrong_arg_count, CommandError, ParseError};
use crate::SharedStoreBase;

/// The LLEN operation
#[derive(Debug, PartialEq)]
pub struct Llen {
    key: String,
}

impl Llen {
    pub fn new(key: String) -> Llen {
        Llen { key }
    }

    /// Syntax:
    /// llen key
    pub fn parse(cmd_strings: Vec<String>) -> Result<Llen, ParseError> {
        if cmd_strings.len() != 2 {
            return Err(wrong_arg_count(&cmd_strings));
        }

        Ok(Llen::new(cmd_strings[1].clone()))
    }

    pub fn execute(self, shared_store: &dyn SharedStoreBase) -> Result<String, CommandError> {
        let len = shared_store.llen(self.key)?;

        Ok(len.to_string())
    }
}
