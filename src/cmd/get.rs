use crate::cmd::{wrong_arg_count, ParseError, VALUE_SEPARATOR};
use crate::{DataType, SharedStoreBase};

/// The classic GET operation
#[derive(Debug, PartialEq)]
pub struct Get {
    // The key to search for
    key: String,
}

impl Get {
    /// Create a new `Get` command
    pub fn new(key: String) -> Get {
        Get { key }
    }

    /// Parsing the necessary arguments for the `Get` command
    ///
    /// Syntax:
    /// get key
    pub fn parse(cmd_strings: Vec<String>) -> Result<Get, ParseError> {
        if cmd_strings.len() != 2 {
            return Err(wrong_arg_count(&cmd_strings));
        }

        Ok(Get::new(cmd_strings[1].clone()))
    }

    /// Execute the `Get` command
    ///
    /// Get the value of key. An absent key reads as empty text, and a list
    /// or set is rendered as its members joined by `,`
    pub fn execute(self, shared_store: &dyn SharedStoreBase) -> String {
        match shared_store.get(self.key) {
            Some(DataType::String(s)) => s,
            Some(DataType::List(list)) => list.values().join(VALUE_SEPARATOR),
            Some(DataType::Set(set)) => set.members().join(VALUE_SEPARATOR),
            None => String::new(),
        }
    }
}
