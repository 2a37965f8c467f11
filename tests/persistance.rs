use memohttp::{persistance::history::HistoryFile, storage::memo::MemoCache};
use num_bigint::BigInt;
use tempfile::TempDir;

#[tokio::test]
async fn snapshot_then_restore_round_trips() {
    let dir = TempDir::new().unwrap();
    let history = HistoryFile::new(dir.path().join("fact-history.txt"));

    let cache = MemoCache::<i64, i64>::new();
    cache.write(5, 120);
    cache.write(6, 720);
    cache.write(7, 5040);

    assert_eq!(history.snapshot(&cache).await.unwrap(), 3);

    let restored = MemoCache::<i64, i64>::new();
    assert_eq!(history.restore(&restored).await.unwrap(), 3);

    let mut expected = cache.entries();
    expected.sort();
    let mut actual = restored.entries();
    actual.sort();
    assert_eq!(actual, expected);
}

#[tokio::test]
async fn restore_creates_an_absent_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("fib-history.txt");
    let history = HistoryFile::new(&path);

    let cache = MemoCache::<i64, i64>::new();
    assert_eq!(history.restore(&cache).await.unwrap(), 0);

    assert!(path.exists());
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "");
    assert!(cache.is_empty());
}

#[tokio::test]
async fn malformed_lines_are_skipped_not_fatal() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("fact-history.txt");
    std::fs::write(&path, "5=120\ngarbage\nx=1\n7=bad\n").unwrap();

    let cache = MemoCache::<i64, i64>::new();
    let history = HistoryFile::new(&path);

    assert_eq!(history.restore(&cache).await.unwrap(), 1);
    assert_eq!(cache.read(&5), Some(120));
    assert_eq!(cache.len(), 1);
}

#[tokio::test]
async fn keys_and_values_are_trimmed() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("fact-history.txt");
    std::fs::write(&path, " 5 = 120 \n\n6=720\n").unwrap();

    let cache = MemoCache::<i64, i64>::new();
    let history = HistoryFile::new(&path);

    assert_eq!(history.restore(&cache).await.unwrap(), 2);
    assert_eq!(cache.read(&5), Some(120));
    assert_eq!(cache.read(&6), Some(720));
}

#[tokio::test]
async fn lines_split_on_the_first_separator_only() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("history.txt");
    std::fs::write(&path, "5=1=2\n").unwrap();

    // the value "1=2" fails numeric parsing and the line is skipped
    let cache = MemoCache::<i64, i64>::new();
    let history = HistoryFile::new(&path);
    assert_eq!(history.restore(&cache).await.unwrap(), 0);
}

#[tokio::test]
async fn binary_garbage_degrades_to_skipped_lines() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("fact-history.txt");
    std::fs::write(&path, [0xff, 0xfe, b'\n', b'5', b'=', b'1', b'2', b'0', b'\n']).unwrap();

    let cache = MemoCache::<i64, i64>::new();
    let history = HistoryFile::new(&path);

    assert_eq!(history.restore(&cache).await.unwrap(), 1);
    assert_eq!(cache.read(&5), Some(120));
}

#[tokio::test]
async fn big_integer_histories_round_trip() {
    let dir = TempDir::new().unwrap();
    let history = HistoryFile::new(dir.path().join("fact-big-history.txt"));

    let cache = MemoCache::<BigInt, BigInt>::new();
    cache.write(
        BigInt::from(25),
        "15511210043330985984000000".parse().unwrap(),
    );

    assert_eq!(history.snapshot(&cache).await.unwrap(), 1);

    let restored = MemoCache::<BigInt, BigInt>::new();
    assert_eq!(history.restore(&restored).await.unwrap(), 1);
    assert_eq!(
        restored.read(&BigInt::from(25)).map(|v| v.to_string()),
        Some("15511210043330985984000000".to_string())
    );
}

#[tokio::test]
async fn snapshot_truncates_previous_contents() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("fib-history.txt");
    let history = HistoryFile::new(&path);

    let cache = MemoCache::<i64, i64>::new();
    cache.write(10, 55);
    cache.write(11, 89);
    history.snapshot(&cache).await.unwrap();

    let smaller = MemoCache::<i64, i64>::new();
    smaller.write(2, 1);
    assert_eq!(history.snapshot(&smaller).await.unwrap(), 1);

    assert_eq!(std::fs::read_to_string(&path).unwrap(), "2=1\n");
}
