use crate::cmd::{parse_integer, wrong_arg_count, CommandError, ParseError, VALUE_SEPARATOR};
use crate::SharedStoreBase;

/// The LPOP operation
#[derive(Debug, PartialEq)]
pub struct Lpop {
    key: String,

    // How many elements to pop, at least 1
    count: usize,
}

impl Lpop {
    /// Create a new `LPOP` command
    pub fn new(key: String, count: usize) -> Lpop {
        Lpop { key, count }
    }

    /// Parsing the necessary arguments for the `LPOP` command
    ///
    /// Syntax:
    /// lpop key [count]
    pub fn parse(cmd_strings: Vec<String>) -> Result<Lpop, ParseError> {
        if cmd_strings.len() < 2 || cmd_strings.len() > 3 {
            return Err(wrong_arg_count(&cmd_strings));
        }

        let count = match cmd_strings.get(2) {
            Some(raw) => {
                let count = parse_integer("count", raw)?;
                if count < 1 {
                    return Err(ParseError::InvalidValue {
                        name: "count",
                        value: raw.clone(),
                    });
                }
                count as usize
            }
            None => 1,
        };

        Ok(Lpop::new(cmd_strings[1].clone(), count))
    }

    /// Execute the `Lpop` command
    ///
    /// Returns up to `count` elements from the head, joined by `,`.
    /// A short or empty list yields what it has.
    pub fn execute(self, shared_store: &dyn SharedStoreBase) -> Result<String, CommandError> {
        let popped = shared_store.lpop(self.key, self.count)?;

        Ok(popped.join(VALUE_SEPARATOR))
    }
}
