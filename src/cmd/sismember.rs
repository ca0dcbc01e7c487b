use crate::cmd::{wrong_arg_count, CommandError, ParseError};
use crate::SharedStoreBase;

/// The SISMEMBER operation
#[derive(Debug, PartialEq)]
pub struct Sismember {
    key: String,
    member: String,
}

impl Sismember {
    pub fn new(key: String, member: String) -> Sismember {
        Sismember { key, member }
    }

    /// Syntax:
    /// sismember key member
    pub fn parse(cmd_strings: Vec<String>) -> Result<Sismember, ParseError> {
        if cmd_strings.len() != 3 {
            return Err(wrong_arg_count(&cmd_strings));
        }

        Ok(Sismember::new(
            cmd_strings[1].clone(),
            cmd_strings[2].clone(),
        ))
    }

    pub fn execute(self, shared_store: &dyn SharedStoreBase) -> Result<String, CommandError> {
        let is_member = shared_store.sismember(self.key, self.member)?;

        Ok(is_member.to_string())
    }
}
