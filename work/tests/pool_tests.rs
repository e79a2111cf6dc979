use std::thread;
use std::time::{Duration, Instant};

use hashcash_crypto::OsRandom;
use hashcash_nullables::{NullClock, NullRandom};
use hashcash_types::{Algorithm, SystemClock, Timestamp, Token};
use hashcash_utils::init_test_logging;
use hashcash_work::{
    is_valid, search, CancelToken, PoolConfig, WorkError, WorkerPool, MAX_CONFIG_INTEGER,
};

fn email_token(algorithm: Algorithm) -> Token {
    let clock = NullClock::at_unix_secs(1_704_207_845);
    let random = NullRandom::repeating(b'a');
    Token::builder("my.email@gmail.com", 3, Duration::from_secs(90))
        .algorithm(algorithm)
        .build(&clock, &random)
        .unwrap()
}

fn unsolvable() -> Token {
    Token::from_parts(
        1,
        40,
        Timestamp::EPOCH,
        b"nobody".to_vec(),
        Algorithm::Sha1,
        Vec::new(),
        0,
    )
}

#[test]
fn pooled_token_verifies_after_transport() {
    init_test_logging();
    let token = email_token(Algorithm::Sha1);
    let pool = WorkerPool::new(PoolConfig::new(100_000).with_concurrency(4)).unwrap();

    let result = pool.search(&token, &CancelToken::new()).unwrap();
    assert!(is_valid(&result.token));
    assert!(result.token.counter() <= 100_000);

    let received = Token::decode(&result.token.encode()).unwrap();
    assert_eq!(received, result.token);
    assert!(is_valid(&received));
}

#[test]
fn single_worker_matches_sequential_search() {
    init_test_logging();
    for alg in Algorithm::ALL {
        let token = email_token(alg);
        let sequential = search(token.clone(), 10_000, &CancelToken::new()).unwrap();
        let pool = WorkerPool::new(PoolConfig::new(10_000).with_concurrency(1)).unwrap();
        let pooled = pool.search(&token, &CancelToken::new()).unwrap();
        assert_eq!(pooled.token, sequential, "{alg}");
    }
}

#[test]
fn single_worker_matches_sequential_exhaustion() {
    let token = email_token(Algorithm::Sha1);
    let sequential = search(token.clone(), 6_209, &CancelToken::new()).unwrap_err();
    let pool = WorkerPool::new(PoolConfig::new(6_209).with_concurrency(1)).unwrap();
    let pooled = pool.search(&token, &CancelToken::new()).unwrap_err();
    assert_eq!(pooled, sequential);
}

#[test]
fn exhausted_ranges_report_too_many_iterations() {
    init_test_logging();
    let pool = WorkerPool::new(PoolConfig::new(6_209).with_concurrency(4)).unwrap();
    let err = pool
        .search(&email_token(Algorithm::Sha1), &CancelToken::new())
        .unwrap_err();
    assert_eq!(err, WorkError::TooManyIterations { max_counter: 6_209 });
}

#[test]
fn start_past_bound_reports_too_many_iterations() {
    let pool = WorkerPool::new(PoolConfig::new(100).with_concurrency(4)).unwrap();
    let token = email_token(Algorithm::Sha1).with_counter(101);
    assert_eq!(
        pool.search(&token, &CancelToken::new()).unwrap_err(),
        WorkError::TooManyIterations { max_counter: 100 }
    );
}

#[test]
fn more_workers_than_counters() {
    let pool = WorkerPool::new(PoolConfig::new(4_460).with_concurrency(10)).unwrap();
    let token = email_token(Algorithm::Sha256).with_counter(4_450);
    let result = pool.search(&token, &CancelToken::new()).unwrap();
    assert_eq!(result.token.counter(), 4_458);
}

#[test]
fn winner_lies_in_configured_span_when_many_counters_qualify() {
    let token = email_token(Algorithm::Sha256);
    let easy = Token::decode(&token.encode().replacen("1:3:", "1:2:", 1)).unwrap();
    let pool = WorkerPool::new(PoolConfig::new(20_000).with_concurrency(8)).unwrap();
    for _ in 0..5 {
        let result = pool.search(&easy, &CancelToken::new()).unwrap();
        assert!(is_valid(&result.token));
        assert!(result.token.counter() <= 20_000);
        assert_eq!(result.token.clone().with_counter(0), easy);
    }
}

#[test]
fn success_does_not_cancel_the_caller() {
    let cancel = CancelToken::new();
    let pool = WorkerPool::new(PoolConfig::new(50_000).with_concurrency(4)).unwrap();
    pool.search(&email_token(Algorithm::Sha1), &cancel).unwrap();
    assert!(!cancel.is_cancelled());
}

#[test]
fn timeout_reports_cancelled() {
    init_test_logging();
    let config = PoolConfig::new(MAX_CONFIG_INTEGER)
        .with_concurrency(2)
        .with_timeout(Duration::from_millis(50));
    let pool = WorkerPool::new(config).unwrap();

    let started = Instant::now();
    let err = pool.search(&unsolvable(), &CancelToken::new()).unwrap_err();
    assert_eq!(err, WorkError::Cancelled);
    assert!(started.elapsed() < Duration::from_secs(10));
}

#[test]
fn caller_cancellation_stops_every_worker() {
    let cancel = CancelToken::new();
    let remote = cancel.clone();
    let canceller = thread::spawn(move || {
        thread::sleep(Duration::from_millis(30));
        remote.cancel();
    });

    let pool = WorkerPool::new(PoolConfig::new(MAX_CONFIG_INTEGER).with_concurrency(4)).unwrap();
    let err = pool.search(&unsolvable(), &cancel).unwrap_err();
    canceller.join().unwrap();
    assert_eq!(err, WorkError::Cancelled);
}

#[test]
fn pre_cancelled_caller_token() {
    let cancel = CancelToken::new();
    cancel.cancel();
    let pool = WorkerPool::new(PoolConfig::new(1_000).with_concurrency(3)).unwrap();
    assert_eq!(
        pool.search(&email_token(Algorithm::Sha1), &cancel).unwrap_err(),
        WorkError::Cancelled
    );
}

#[test]
fn unreachable_difficulty_exhausts_the_pool_bound() {
    let token = unsolvable();
    let hopeless = Token::decode(&token.encode().replacen("1:40:", "1:41:", 1)).unwrap();
    let pool = WorkerPool::new(PoolConfig::new(1_000)).unwrap();
    assert!(matches!(
        pool.search(&hopeless, &CancelToken::new()),
        Err(WorkError::TooManyIterations { max_counter: 1_000 })
    ));
}

#[test]
fn real_clock_and_entropy_mint_a_valid_token() {
    let token = Token::builder("127.0.0.1:9983", 2, Duration::from_secs(60))
        .algorithm(Algorithm::Sha512)
        .build(&SystemClock, &OsRandom)
        .unwrap();
    assert!(!token.is_expired(Timestamp::now()));

    let pool = WorkerPool::new(PoolConfig::new(1_000_000)).unwrap();
    let result = pool.search(&token, &CancelToken::new()).unwrap();
    assert!(is_valid(&result.token));
    assert!(hashcash_work::hash(&result.token).starts_with("00"));
}
