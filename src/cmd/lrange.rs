use crate::cmd::{parse_integer, wrong_arg_count, CommandError, ParseError, VALUE_SEPARATOR};
use crate::SharedStoreBase;

/// The LRANGE operation
#[derive(Debug, PartialEq)]
pub struct Lrange {
    // The key to query, which represents a List
    key: String,

    // The start index
    start: i64,

    // The stop index (inclusive)
    stop: i64,
}

impl Lrange {
    /// Create a new `LRANGE` command
    pub fn new(key: String, start: i64, stop: i64) -> Lrange {
        Lrange { key, start, stop }
    }

    /// Parsing the necessary arguments for the `LRANGE` command
    ///
    /// Syntax:
    /// lrange key start stop
    pub fn parse(cmd_strings: Vec<String>) -> Result<Lrange, ParseError> {
        if cmd_strings.len() != 4 {
            return Err(wrong_arg_count(&cmd_strings));
        }

        let start = parse_integer("start", &cmd_strings[2])?;
        let stop = parse_integer("stop", &cmd_strings[3])?;

        Ok(Lrange::new(cmd_strings[1].clone(), start, stop))
    }

    /// Execute the `Lrange` command
    ///
    /// Returns the elements which are part of the provided
    /// indices, joined by `,`
    pub fn execute(self, shared_store: &dyn SharedStoreBase) -> Result<String, CommandError> {
        let values = shared_store.lrange(self.key, self.start, self.stop)?;

        Ok(values.join(VALUE_SEPARATOR))
    }
}
