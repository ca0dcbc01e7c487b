use crate::cmd::{wrong_arg_count, CommandError, ParseError, VALUE_SEPARATOR};
use crate::SharedStoreBase;

/// The SMEMBERS operation
#[derive(Debug, PartialEq)]
pub struct Smembers {
    key: String,
}

impl Smembers {
    pub fn new(key: String) -> Smembers {
        Smembers { key }
    }

    /// Syntax:
    /// smembers key
    pub fn parse(cmd_strings: Vec<String>) -> Result<Smembers, ParseError> {
        if cmd_strings.len() != 2 {
            return Err(wrong_arg_count(&cmd_strings));
        }

        Ok(Smembers::new(cmd_strings[1].clone()))
    }

    /// Every member joined by `,`. An absent key reads as an empty set.
    pub fn execute(self, shared_store: &dyn SharedStoreBase) -> Result<String, CommandError> {
        let members = shared_store.smembers(self.key)?;

        Ok(members.join(VALUE_SEPARATOR))
    }
}
