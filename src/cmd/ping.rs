use crate::cmd::{wrong_arg_count, ParseError};

#[derive(Debug, Default, PartialEq)]
pub struct Ping {}

impl Ping {
    /// Create a new `Ping` command
    pub fn new() -> Ping {
        Ping {}
    }

    /// Syntax:
    /// ping
    pub fn parse(cmd_strings: Vec<String>) -> Result<Ping, ParseError> {
        if cmd_strings.len() > 1 {
            Err(wrong_arg_count(&cmd_strings))
        } else {
            Ok(Ping::new())
        }
    }

    /// Execute the "Ping" command and return pong
    pub fn execute(self) -> String {
        "pong".to_string()
    }
}
