use crate::cmd::{wrong_arg_count, ParseError};
use crate::{DataType, SharedStoreBase};

/// The classic SET operation, taking one or more key/value pairs
#[derive(Debug, PartialEq)]
pub struct Set {
    // The key/value pairs to store, in argument order
    pairs: Vec<(String, String)>,
}

impl Set {
    /// Create a new `Set` command
    pub fn new(pairs: Vec<(String, String)>) -> Set {
        Set { pairs }
    }

    /// Parsing the necessary arguments for the `Set` command
    ///
    /// Syntax:
    /// set key value [key value ...]
    pub fn parse(cmd_strings: Vec<String>) -> Result<Set, ParseError> {
        let args = &cmd_strings[1..];
        if args.len() < 2 || args.len() % 2 != 0 {
            return Err(wrong_arg_count(&cmd_strings));
        }

        let pairs = args
            .chunks(2)
            .map(|pair| (pair[0].clone(), pair[1].clone()))
            .collect();

        Ok(Set::new(pairs))
    }

    /// Execute the `Set` command
    ///
    /// Each pair replaces whatever its key held before. When a key is
    /// repeated, the last pair wins.
    pub fn execute(self, shared_store: &dyn SharedStoreBase) -> String {
        for (key, value) in self.pairs {
            shared_store.set(key, DataType::String(value));
        }

        "OK".to_string()
    }
}
