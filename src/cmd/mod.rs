mod ping;
pub use ping::Ping;

mod get;
pub use get::Get;

mod set;
pub use set::Set;

mod del;
pub use del::Del;

mod exists;
pub use exists::Exists;

mod keys;
pub use keys::Keys;

mod lpush;
pub use lpush::Lpush;

mod rpush;
pub use rpush::Rpush;

mod lpop;
pub use lpop::Lpop;

mod llen;
pub use llen::Llen;

mod lrange;
pub use lrange::Lrange;

mod ltrim;
pub use ltrim::Ltrim;

mod lindex;
pub use lindex::Lindex;

mod sadd;
pub use sadd::Sadd;

mod smembers;
pub use smembers::Smembers;

mod sismember;
pub use sismember::Sismember;

use crate::data_store::StoreError;
use crate::SharedStoreBase;

/// Separator between the values of a multi-value reply
pub const VALUE_SEPARATOR: &str = ",";

/// Methods called on `Command` are delegated to the command implementation.
/// `Command` essentially is acting as a Catalog
#[derive(Debug, PartialEq)]
pub enum Command {
    Ping(Ping),
    Get(Get),
    Set(Set),
    Del(Del),
    Exists(Exists),
    Keys(Keys),
    Lpush(Lpush),
    Rpush(Rpush),
    Lpop(Lpop),
    Llen(Llen),
    Lrange(Lrange),
    Ltrim(Ltrim),
    Lindex(Lindex),
    Sadd(Sadd),
    Smembers(Smembers),
    Sismember(Sismember),
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// Carries the offending command line
    #[error("invalid argument count: {0}")]
    WrongArgCount(String),

    /// Carries the offending command line
    #[error("unknown command: {0}")]
    UnrecognizedCmd(String),

    #[error("invalid {name} value: {value}")]
    InvalidValue { name: &'static str, value: String },
}

/// Anything that can make a single command fail. Always reported back to
/// the client, never fatal to the connection.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum CommandError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl Command {
    /// Parse a command from one line of text, terminator already removed.
    ///
    /// The line is split on single spaces; the first token names the
    /// command (case-sensitive) and the rest are its arguments.
    pub fn infer_command(line: &str) -> Result<Command, ParseError> {
        let cmd_strings: Vec<String> = line.split(' ').map(String::from).collect();

        let cmd: Command = match cmd_strings[0].as_str() {
            "ping" => Command::Ping(Ping::parse(cmd_strings)?),
            "get" => Command::Get(Get::parse(cmd_strings)?),
            "set" => Command::Set(Set::parse(cmd_strings)?),
            "del" => Command::Del(Del::parse(cmd_strings)?),
            "exists" => Command::Exists(Exists::parse(cmd_strings)?),
            "keys" => Command::Keys(Keys::parse(cmd_strings)?),
            "lpush" => Command::Lpush(Lpush::parse(cmd_strings)?),
            "rpush" => Command::Rpush(Rpush::parse(cmd_strings)?),
            "lpop" => Command::Lpop(Lpop::parse(cmd_strings)?),
            "llen" => Command::Llen(Llen::parse(cmd_strings)?),
            "lrange" => Command::Lrange(Lrange::parse(cmd_strings)?),
            "ltrim" => Command::Ltrim(Ltrim::parse(cmd_strings)?),
            "lindex" => Command::Lindex(Lindex::parse(cmd_strings)?),
            "sadd" => Command::Sadd(Sadd::parse(cmd_strings)?),
            "smembers" => Command::Smembers(Smembers::parse(cmd_strings)?),
            "sismember" => Command::Sismember(Sismember::parse(cmd_strings)?),
            _ => return Err(ParseError::UnrecognizedCmd(line.to_string())),
        };

        Ok(cmd)
    }

    /// Whether a successful run of this command changes the store, and
    /// so belongs in the append log
    pub fn is_mutating(&self) -> bool {
        matches!(
            self,
            Command::Set(_)
                | Command::Del(_)
                | Command::Lpush(_)
                | Command::Rpush(_)
                | Command::Lpop(_)
                | Command::Ltrim(_)
                | Command::Sadd(_)
        )
    }

    /// Run the command against the store and return the reply text
    pub fn execute(self, shared_store: &dyn SharedStoreBase) -> Result<String, CommandError> {
        match self {
            Command::Ping(cmd) => Ok(cmd.execute()),
            Command::Get(cmd) => Ok(cmd.execute(shared_store)),
            Command::Set(cmd) => Ok(cmd.execute(shared_store)),
            Command::Del(cmd) => Ok(cmd.execute(shared_store)),
            Command::Exists(cmd) => Ok(cmd.execute(shared_store)),
            Command::Keys(cmd) => Ok(cmd.execute(shared_store)),
            Command::Lpush(cmd) => cmd.execute(shared_store),
            Command::Rpush(cmd) => cmd.execute(shared_store),
            Command::Lpop(cmd) => cmd.execute(shared_store),
            Command::Llen(cmd) => cmd.execute(shared_store),
            Command::Lrange(cmd) => cmd.execute(shared_store),
            Command::Ltrim(cmd) => cmd.execute(shared_store),
            Command::Lindex(cmd) => cmd.execute(shared_store),
            Command::Sadd(cmd) => cmd.execute(shared_store),
            Command::Smembers(cmd) => cmd.execute(shared_store),
            Command::Sismember(cmd) => cmd.execute(shared_store),
        }
    }
}

/// The arity error for a command, naming the line it came from
fn wrong_arg_count(cmd_strings: &[String]) -> ParseError {
    ParseError::WrongArgCount(cmd_strings.join(" "))
}

fn parse_integer(name: &'static str, value: &str) -> Result<i64, ParseError> {
    value.parse::<i64>().map_err(|_| ParseError::InvalidValue {
        name,
        value: value.to_string(),
    })
}
