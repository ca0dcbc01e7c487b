use crate::cmd::{wrong_arg_count, ParseError, VALUE_SEPARATOR};
use crate::SharedStoreBase;

#[derive(Debug, Default, PartialEq)]
pub struct Keys {}

impl Keys {
    pub fn new() -> Keys {
        Keys {}
    }

    /// Syntax:
    /// keys
    pub fn parse(cmd_strings: Vec<String>) -> Result<Keys, ParseError> {
        if cmd_strings.len() > 1 {
            return Err(wrong_arg_count(&cmd_strings));
        }

        Ok(Keys::new())
    }

    /// Every key joined by `,`, sorted ascending regardless of insertion order
    pub fn execute(self, shared_store: &dyn SharedStoreBase) -> String {
        shared_store.keys().join(VALUE_SEPARATOR)
    }
}
