use crate::cmd::{parse_integer, wrong_arg_count, CommandError, ParseError};
use crate::SharedStoreBase;

/// The LINDEX operation
#[derive(Debug, PartialEq)]
pub struct Lindex {
    key: String,
    index: i64,
}

impl Lindex {
    pub fn new(key: String, index: i64) -> Lindex {
        Lindex { key, index }
    }

    /// Syntax:
    /// lindex key index
    pub fn parse(cmd_strings: Vec<String>) -> Result<Lindex, ParseError> {
        if cmd_strings.len() != 3 {
            return Err(wrong_arg_count(&cmd_strings));
        }

        let index = parse_integer("index", &cmd_strings[2])?;

        Ok(Lindex::new(cmd_strings[1].clone(), index))
    }

    /// The element at `index`, or empty text when out of range
    pub fn execute(self, shared_store: &dyn SharedStoreBase) -> Result<String, CommandError> {
        let value = shared_store.lindex(self.key, self.index)?;

        Ok(value.unwrap_or_default())
    }
}
