use crate::cmd::{wrong_arg_count, CommandError, ParseError};
use crate::SharedStoreBase;

/// The SADD operation
#[derive(Debug, PartialEq)]
pub struct Sadd {
    key: String,

    // The members to add; repeats are harmless
    members: Vec<String>,
}

impl Sadd {
    pub fn new(key: String, members: Vec<String>) -> Sadd {
        Sadd { key, members }
    }

    /// Syntax:
    /// sadd key member [member ...]
    pub fn parse(cmd_strings: Vec<String>) -> Result<Sadd, ParseError> {
        if cmd_strings.len() < 3 {
            return Err(wrong_arg_count(&cmd_strings));
        }

        Ok(Sadd::new(cmd_strings[1].clone(), cmd_strings[2..].to_vec()))
    }

    pub fn execute(self, shared_store: &dyn SharedStoreBase) -> Result<String, CommandError> {
        shared_store.sadd(self.key, self.members)?;

        Ok("OK".to_string())
    }
}
