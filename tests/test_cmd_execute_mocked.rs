use mockall::predicate::eq;
use linekv::cmd::{
    CommandError, Del, Exists, Get, Keys, Lindex, Llen, Lpop, Lpush, Lrange, Ltrim, Ping, Rpush,
    Sadd, Set, Sismember, Smembers,
};
use linekv::data_store::{Kind, StoreError};
use linekv::{DataType, List, MockSharedStoreBase};
use rstest::rstest;

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

fn wrong_type(key: &str, kind: Kind) -> StoreError {
    StoreError::WrongType {
        key: key.to_string(),
        kind,
    }
}

#[test]
fn test_ping_execute() {
    assert_eq!(Ping::new().execute(), "pong");
}

/// Get Execute Command
///
/// Every stored kind renders as text
#[rstest]
#[case(None, "")]
#[case(Some(DataType::String("val".to_string())), "val")]
#[case(Some(DataType::List(List::from(strings(&["b", "a"])))), "b,a")]
#[case(Some(DataType::List(List::new())), "")]
#[case(Some(DataType::Set(linekv::set::Set::from(strings(&["y", "x"])))), "x,y")]
fn test_get_execute(#[case] stored: Option<DataType>, #[case] expected: &str) {
    let mut mock_store = MockSharedStoreBase::new();

    mock_store
        .expect_get()
        .with(eq("k".to_string()))
        .times(1)
        .return_once(move |_| stored);

    assert_eq!(Get::new("k".to_string()).execute(&mock_store), expected);
}

#[test]
fn test_set_execute_stores_every_pair() {
    let mut mock_store = MockSharedStoreBase::new();

    mock_store
        .expect_set()
        .with(eq("a".to_string()), eq(DataType::String("1".to_string())))
        .times(1)
        .returning(|_, _| ());
    mock_store
        .expect_set()
        .with(eq("b".to_string()), eq(DataType::String("2".to_string())))
        .times(1)
        .returning(|_, _| ());

    let set_cmd = Set::new(vec![
        ("a".to_string(), "1".to_string()),
        ("b".to_string(), "2".to_string()),
    ]);

    assert_eq!(set_cmd.execute(&mock_store), "OK");
}

#[test]
fn test_del_execute() {
    let mut mock_store = MockSharedStoreBase::new();

    mock_store
        .expect_del()
        .with(eq(strings(&["a", "b"])))
        .times(1)
        .returning(|_| ());

    assert_eq!(Del::new(strings(&["a", "b"])).execute(&mock_store), "OK");
}

#[rstest]
#[case(true, "true")]
#[case(false, "false")]
fn test_exists_execute(#[case] exists: bool, #[case] expected: &str) {
    let mut mock_store = MockSharedStoreBase::new();

    mock_store
        .expect_exists()
        .with(eq("k".to_string()))
        .times(1)
        .returning(move |_| exists);

    assert_eq!(Exists::new("k".to_string()).execute(&mock_store), expected);
}

#[rstest]
#[case(vec![], "")]
#[case(strings(&["a"]), "a")]
#[case(strings(&["a", "b", "c"]), "a,b,c")]
fn test_keys_execute(#[case] keys: Vec<String>, #[case] expected: &str) {
    let mut mock_store = MockSharedStoreBase::new();

    mock_store
        .expect_keys()
        .times(1)
        .return_once(move || keys);

    assert_eq!(Keys::new().execute(&mock_store), expected);
}

#[rstest]
#[case(Ok(()), Ok("OK".to_string()))]
#[case(
    Err(wrong_type("L", Kind::String)),
    Err(CommandError::Store(wrong_type("L", Kind::String)))
)]
fn test_lpush_execute(
    #[case] store_result: Result<(), StoreError>,
    #[case] expected: Result<String, CommandError>,
) {
    let mut mock_store = MockSharedStoreBase::new();

    mock_store
        .expect_lpush()
        .with(eq("L".to_string()), eq(strings(&["a", "b"])))
        .times(1)
        .return_once(move |_, _| store_result);

    let result = Lpush::new("L".to_string(), strings(&["a", "b"])).execute(&mock_store);
    assert_eq!(result, expected);
}

#[test]
fn test_rpush_execute() {
    let mut mock_store = MockSharedStoreBase::new();

    mock_store
        .expect_rpush()
        .with(eq("L".to_string()), eq(strings(&["a", "b"])))
        .times(1)
        .returning(|_, _| Ok(()));

    let result = Rpush::new("L".to_string(), strings(&["a", "b"])).execute(&mock_store);
    assert_eq!(result, Ok("OK".to_string()));
}

#[rstest]
#[case(1, strings(&["a"]), "a")]
#[case(3, strings(&["a", "b"]), "a,b")]
#[case(2, vec![], "")]
fn test_lpop_execute(#[case] count: usize, #[case] popped: Vec<String>, #[case] expected: &str) {
    let mut mock_store = MockSharedStoreBase::new();

    mock_store
        .expect_lpop()
        .with(eq("L".to_string()), eq(count))
        .times(1)
        .return_once(move |_, _| Ok(popped));

    let result = Lpop::new("L".to_string(), count).execute(&mock_store);
    assert_eq!(result, Ok(expected.to_string()));
}

#[rstest]
#[case(Ok(0), Ok("0".to_string()))]
#[case(Ok(12), Ok("12".to_string()))]
#[case(
    Err(wrong_type("L", Kind::Set)),
    Err(CommandError::Store(wrong_type("L", Kind::Set)))
)]
fn test_llen_execute(
    #[case] store_result: Result<usize, StoreError>,
    #[case] expected: Result<String, CommandError>,
) {
    let mut mock_store = MockSharedStoreBase::new();

    mock_store
        .expect_llen()
        .with(eq("L".to_string()))
        .times(1)
        .return_once(move |_| store_result);

    assert_eq!(Llen::new("L".to_string()).execute(&mock_store), expected);
}

#[test]
fn test_lrange_execute() {
    let mut mock_store = MockSharedStoreBase::new();

    mock_store
        .expect_lrange()
        .with(eq("L".to_string()), eq(0), eq(-1))
        .times(1)
        .returning(|_, _, _| Ok(strings(&["c", "b", "a"])));

    let result = Lrange::new("L".to_string(), 0, -1).execute(&mock_store);
    assert_eq!(result, Ok("c,b,a".to_string()));
}

#[test]
fn test_ltrim_execute() {
    let mut mock_store = MockSharedStoreBase::new();

    mock_store
        .expect_ltrim()
        .with(eq("L".to_string()), eq(1), eq(-1))
        .times(1)
        .returning(|_, _, _| Ok(()));

    let result = Ltrim::new("L".to_string(), 1, -1).execute(&mock_store);
    assert_eq!(result, Ok("OK".to_string()));
}

#[rstest]
#[case(Some("a".to_string()), "a")]
#[case(None, "")]
fn test_lindex_execute(#[case] element: Option<String>, #[case] expected: &str) {
    let mut mock_store = MockSharedStoreBase::new();

    mock_store
        .expect_lindex()
        .with(eq("L".to_string()), eq(-1))
        .times(1)
        .return_once(move |_, _| Ok(element));

    let result = Lindex::new("L".to_string(), -1).execute(&mock_store);
    assert_eq!(result, Ok(expected.to_string()));
}

#[test]
fn test_sadd_execute_wrong_type() {
    let mut mock_store = MockSharedStoreBase::new();

    mock_store
        .expect_sadd()
        .with(eq("S".to_string()), eq(strings(&["a"])))
        .times(1)
        .returning(|_, _| Err(wrong_type("S", Kind::List)));

    let err = Sadd::new("S".to_string(), strings(&["a"]))
        .execute(&mock_store)
        .unwrap_err();
    assert_eq!(err.to_string(), "wrong type for key 'S': holds list");
}

#[test]
fn test_smembers_execute() {
    let mut mock_store = MockSharedStoreBase::new();

    mock_store
        .expect_smembers()
        .with(eq("S".to_string()))
        .times(1)
        .returning(|_| Ok(strings(&["a", "b"])));

    let result = Smembers::new("S".to_string()).execute(&mock_store);
    assert_eq!(result, Ok("a,b".to_string()));
}

#[rstest]
#[case(true, "true")]
#[case(false, "false")]
fn test_sismember_execute(#[case] is_member: bool, #[case] expected: &str) {
    let mut mock_store = MockSharedStoreBase::new();

    mock_store
        .expect_sismember()
        .with(eq("S".to_string()), eq("a".to_string()))
        .times(1)
        .returning(move |_, _| Ok(is_member));

    let result = Sismember::new("S".to_string(), "a".to_string()).execute(&mock_store);
    assert_eq!(result, Ok(expected.to_string()));
}
