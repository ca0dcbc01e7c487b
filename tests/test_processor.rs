use async_trait::async_trait;
use linekv::persistence::PersistenceError;
use linekv::{CommandLog, MockCommandLog, Processor, Reply, SharedStore};
use mockall::predicate::eq;
use rstest::{fixture, rstest};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[fixture]
fn processor() -> Processor {
    Processor::new(SharedStore::new())
}

async fn run_all(processor: &Processor, lines: &[&str]) -> Vec<Reply> {
    let mut replies = Vec::new();
    for line in lines {
        replies.push(processor.process(line).await);
    }
    replies
}

fn text(reply: &str) -> Reply {
    Reply::Text(reply.to_string())
}

#[rstest]
#[tokio::test]
async fn test_scenario(processor: Processor) {
    let replies = run_all(
        &processor,
        &[
            "set key val",
            "get key",
            "lpush L a b",
            "get L",
            "lpop L 1",
            "llen L",
            "del L",
            "exists L",
        ],
    )
    .await;

    assert_eq!(
        replies,
        vec![
            text("OK"),
            text("val"),
            text("OK"),
            text("b,a"),
            text("b"),
            text("1"),
            text("OK"),
            text("false"),
        ]
    );
}

#[rstest]
#[case(&["ping"], "pong")]
#[case(&["get nothing"], "")]
#[case(&["set a 1 b 2", "get b"], "2")]
#[case(&["set a 1 a 2", "get a"], "2")]
#[case(&["set z 1 a 2 m 3", "keys"], "a,m,z")]
#[case(&["keys"], "")]
#[case(&["set a 1", "exists a"], "true")]
#[case(&["rpush L a b", "rpush L c", "lrange L 0 -1"], "a,b,c")]
#[case(&["lpush L a", "lpush L b c", "lrange L 0 -1"], "c,b,a")]
#[case(&["rpush L a b c", "lpop L 5", "llen L"], "0")]
#[case(&["lpop missing"], "")]
#[case(&["lpop missing 3"], "")]
#[case(&["rpush L a b c d", "ltrim L 1 2", "get L"], "b,c")]
#[case(&["rpush L a b c", "lindex L -1"], "c")]
#[case(&["rpush L a b c", "lindex L 3"], "")]
#[case(&["lrange missing 0 -1"], "")]
#[case(&["sadd S a b a", "smembers S"], "a,b")]
#[case(&["sadd S a", "sismember S a"], "true")]
#[case(&["sismember missing a"], "false")]
#[case(&["sadd S b a", "get S"], "a,b")]
#[case(&["sadd S a", "set S flat", "get S"], "flat")]
#[case(
    &["llen L", "lrange R 0 -1", "lindex I 0", "smembers S", "sismember T x", "keys"],
    "I,L,R,S,T"
)]
#[tokio::test]
async fn test_last_reply(processor: Processor, #[case] lines: &[&str], #[case] expected: &str) {
    let replies = run_all(&processor, lines).await;

    assert_eq!(replies.last(), Some(&text(expected)));
}

#[rstest]
#[case(&["get"], "invalid argument count: get")]
#[case(&["hello world"], "unknown command: hello world")]
#[case(&["lpop L 0"], "invalid count value: 0")]
#[case(&["set s x", "lpush s a"], "wrong type for key 's': holds string")]
#[case(&["rpush L a", "sadd L a"], "wrong type for key 'L': holds list")]
#[case(&["sadd S a", "lrange S 0 -1"], "wrong type for key 'S': holds set")]
#[tokio::test]
async fn test_error_reply(processor: Processor, #[case] lines: &[&str], #[case] expected: &str) {
    let replies = run_all(&processor, lines).await;

    assert_eq!(replies.last(), Some(&Reply::Error(expected.to_string())));
}

#[tokio::test]
async fn test_only_successful_mutations_are_logged() {
    let mut mock_log = MockCommandLog::new();

    for line in ["set a 1", "lpush L x", "sadd S m", "lpop nothing", "del a"] {
        mock_log
            .expect_append()
            .with(eq(line.to_string()))
            .times(1)
            .returning(|_| Ok(()));
    }

    let processor = Processor::new(SharedStore::new()).with_command_log(Arc::new(mock_log));

    run_all(
        &processor,
        &[
            "set a 1",
            "get a",
            "keys",
            "exists a",
            "lpush L x",
            "lrange L 0 -1",
            "llen L",
            "lindex L 0",
            "sadd S m",
            "smembers S",
            "sismember S m",
            // Failures are never logged
            "lpush S y",
            "set a",
            "unknown",
            "lpop nothing",
            "del a",
            "ping",
        ],
    )
    .await;
}

#[tokio::test]
async fn test_log_failure_still_replies() {
    let mut mock_log = MockCommandLog::new();

    mock_log.expect_append().times(1).returning(|_| {
        Err(PersistenceError::Io {
            path: "backup-aof.txt".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::Other, "disk full"),
        })
    });

    let processor = Processor::new(SharedStore::new()).with_command_log(Arc::new(mock_log));

    assert_eq!(processor.process("set a 1").await, text("OK"));
    assert_eq!(processor.process("get a").await, text("1"));
}

#[rstest]
fn test_execute_line_does_not_log(processor: Processor) {
    let processor = processor.with_command_log(Arc::new(MockCommandLog::new()));

    // The mock has no expectations, so any append would panic
    assert_eq!(processor.execute_line("set a 1"), Ok("OK".to_string()));
    assert_eq!(processor.execute_line("get a"), Ok("1".to_string()));
}

/// Records appended lines, stalling on the ones it is told to
struct SlowLog {
    stall_on: &'static str,
    lines: Mutex<Vec<String>>,
}

#[async_trait]
impl CommandLog for SlowLog {
    async fn append(&self, line: String) -> Result<(), PersistenceError> {
        if line == self.stall_on {
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        self.lines.lock().unwrap().push(line);
        Ok(())
    }
}

#[tokio::test]
async fn test_log_order_matches_execution_order() {
    let log = Arc::new(SlowLog {
        stall_on: "lpush L x",
        lines: Mutex::new(Vec::new()),
    });
    let processor = Processor::new(SharedStore::new()).with_command_log(log.clone());

    // The second push starts while the first is still appending
    tokio::join!(processor.process("lpush L x"), async {
        tokio::time::sleep(Duration::from_millis(10)).await;
        processor.process("lpush L y").await
    });

    let logged = log.lines.lock().unwrap().clone();
    assert_eq!(logged, vec!["lpush L x".to_string(), "lpush L y".to_string()]);

    let live = processor.process("get L").await;
    assert_eq!(live, text("y,x"));

    let replayed = Processor::new(SharedStore::new());
    for line in &logged {
        replayed.execute_line(line).unwrap();
    }
    assert_eq!(replayed.execute_line("get L"), Ok("y,x".to_string()));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_logged_mutations_replay_to_same_state() {
    let log = Arc::new(SlowLog {
        stall_on: "",
        lines: Mutex::new(Vec::new()),
    });
    let processor = Processor::new(SharedStore::new()).with_command_log(log.clone());

    let tasks: Vec<_> = (0..8)
        .map(|i| {
            let processor = processor.clone();
            tokio::spawn(async move {
                for j in 0..25 {
                    processor.process(&format!("rpush L {}-{}", i, j)).await;
                    if j % 5 == 0 {
                        processor.process("lpop L 2").await;
                    }
                }
            })
        })
        .collect();
    for task in tasks {
        task.await.unwrap();
    }

    let replayed = Processor::new(SharedStore::new());
    for line in log.lines.lock().unwrap().iter() {
        replayed.execute_line(line).unwrap();
    }

    assert_eq!(
        replayed.shared_store().entries(),
        processor.shared_store().entries()
    );
}
