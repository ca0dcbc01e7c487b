//! A thin typed client over the line protocol.
//!
//! Each method serializes its arguments into a command line, sends it and
//! parses the reply into its natural type. `Error:` replies surface as
//! `ClientError::Server`.

use crate::cmd::VALUE_SEPARATOR;
use crate::connection::FrameError;
use crate::{Connection, ConnectionBase, Reply};
use tokio::net::{TcpStream, ToSocketAddrs};

#[derive(thiserror::Error, Debug)]
pub enum ClientError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Frame(#[from] FrameError),

    #[error("connection closed by server")]
    Closed,

    /// The server answered with an `Error:` reply
    #[error("{0}")]
    Server(String),

    #[error("unexpected reply: {0}")]
    UnexpectedReply(String),
}

pub struct Client {
    connection: Connection,
}

impl Client {
    pub async fn connect<A: ToSocketAddrs>(addr: A) -> Result<Client, ClientError> {
        let socket = TcpStream::connect(addr).await?;

        Ok(Client {
            connection: Connection::new(socket),
        })
    }

    /// Send a raw command line and return the raw reply text
    pub async fn request(&mut self, line: &str) -> Result<String, ClientError> {
        self.connection.write_line(line).await?;

        match self.connection.read_line().await? {
            Some(reply) => match Reply::parse(&reply) {
                Reply::Text(text) => Ok(text),
                Reply::Error(msg) => Err(ClientError::Server(msg)),
            },
            None => Err(ClientError::Closed),
        }
    }

    pub async fn ping(&mut self) -> Result<String, ClientError> {
        self.request("ping").await
    }

    pub async fn get(&mut self, key: &str) -> Result<String, ClientError> {
        self.request(&format!("get {}", key)).await
    }

    pub async fn set(&mut self, key: &str, value: &str) -> Result<(), ClientError> {
        self.mset(&[(key, value)]).await
    }

    /// Set several key/value pairs with a single command
    pub async fn mset(&mut self, pairs: &[(&str, &str)]) -> Result<(), ClientError> {
        let args: Vec<&str> = pairs.iter().flat_map(|(k, v)| [*k, *v]).collect();
        self.status(with_args("set", &args)).await
    }

    pub async fn del(&mut self, keys: &[&str]) -> Result<(), ClientError> {
        self.status(with_args("del", keys)).await
    }

    pub async fn exists(&mut self, key: &str) -> Result<bool, ClientError> {
        let reply = self.request(&format!("exists {}", key)).await?;
        parse_bool(reply)
    }

    pub async fn keys(&mut self) -> Result<Vec<String>, ClientError> {
        let reply = self.request("keys").await?;
        Ok(split_values(&reply))
    }

    pub async fn lpush(&mut self, key: &str, values: &[&str]) -> Result<(), ClientError> {
        self.status(with_key_and_args("lpush", key, values)).await
    }

    pub async fn rpush(&mut self, key: &str, values: &[&str]) -> Result<(), ClientError> {
        self.status(with_key_and_args("rpush", key, values)).await
    }

    pub async fn lpop(
        &mut self,
        key: &str,
        count: Option<u64>,
    ) -> Result<Vec<String>, ClientError> {
        let line = match count {
            Some(count) => format!("lpop {} {}", key, count),
            None => format!("lpop {}", key),
        };
        let reply = self.request(&line).await?;
        Ok(split_values(&reply))
    }

    pub async fn llen(&mut self, key: &str) -> Result<i64, ClientError> {
        let reply = self.request(&format!("llen {}", key)).await?;
        reply
            .parse::<i64>()
            .map_err(|_| ClientError::UnexpectedReply(reply))
    }

    pub async fn lrange(
        &mut self,
        key: &str,
        start: i64,
        stop: i64,
    ) -> Result<Vec<String>, ClientError> {
        let reply = self
            .request(&format!("lrange {} {} {}", key, start, stop))
            .await?;
        Ok(split_values(&reply))
    }

    pub async fn ltrim(&mut self, key: &str, start: i64, stop: i64) -> Result<(), ClientError> {
        self.status(format!("ltrim {} {} {}", key, start, stop)).await
    }

    pub async fn lindex(&mut self, key: &str, index: i64) -> Result<String, ClientError> {
        self.request(&format!("lindex {} {}", key, index)).await
    }

    pub async fn sadd(&mut self, key: &str, members: &[&str]) -> Result<(), ClientError> {
        self.status(with_key_and_args("sadd", key, members)).await
    }

    pub async fn smembers(&mut self, key: &str) -> Result<Vec<String>, ClientError> {
        let reply = self.request(&format!("smembers {}", key)).await?;
        Ok(split_values(&reply))
    }

    pub async fn sismember(&mut self, key: &str, member: &str) -> Result<bool, ClientError> {
        let reply = self
            .request(&format!("sismember {} {}", key, member))
            .await?;
        parse_bool(reply)
    }

    /// Send a command whose only successful reply is `OK`
    async fn status(&mut self, line: String) -> Result<(), ClientError> {
        let reply = self.request(&line).await?;
        if reply == "OK" {
            Ok(())
        } else {
            Err(ClientError::UnexpectedReply(reply))
        }
    }
}

fn with_args(name: &str, args: &[&str]) -> String {
    let mut line = name.to_string();
    for arg in args {
        line.push(' ');
        line.push_str(arg);
    }
    line
}

fn with_key_and_args(name: &str, key: &str, args: &[&str]) -> String {
    with_args(&format!("{} {}", name, key), args)
}

/// Empty text is an empty list, not a list holding one empty string
fn split_values(reply: &str) -> Vec<String> {
    if reply.is_empty() {
        return Vec::new();
    }

    reply.split(VALUE_SEPARATOR).map(String::from).collect()
}

fn parse_bool(reply: String) -> Result<bool, ClientError> {
    match reply.as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ClientError::UnexpectedReply(reply)),
    }
}
