use num_bigint::BigInt;

use crate::storage::memo::MemoCache;

// Recursion depth equals n for every function below. Fixed-width results use
// wrapping arithmetic and silently wrap past n = 20 (factorial) instead of
// erroring; the big-integer path is the exact one.

pub fn factorial_no_memo(n: i64) -> i64 {
    if n == 1 || n == 0 {
        return n;
    }
    n.wrapping_mul(factorial_no_memo(n - 1))
}

pub fn fibonacci_no_memo(n: i64) -> i64 {
    if n == 1 || n == 0 {
        return n;
    }
    fibonacci_no_memo(n - 1).wrapping_add(fibonacci_no_memo(n - 2))
}

/// Read-through memoized factorial. The recursive call fills the cache for
/// every smaller n on the way down; the lock is taken only around the write
/// of this frame's own key, so two racing requests may both compute the same
/// entry and overwrite each other with equal values.
pub fn factorial(cache: &MemoCache<i64, i64>, n: i64) -> i64 {
    if n == 0 || n == 1 {
        return 1;
    }
    if let Some(val) = cache.read(&n) {
        return val;
    }

    let result = n.wrapping_mul(factorial(cache, n - 1));
    cache.write(n, result);
    result
}

pub fn fibonacci(cache: &MemoCache<i64, i64>, n: i64) -> i64 {
    if n == 1 || n == 0 {
        return n;
    }
    if let Some(val) = cache.read(&n) {
        return val;
    }

    let result = fibonacci(cache, n - 1).wrapping_add(fibonacci(cache, n - 2));
    cache.write(n, result);
    result
}

/// Arbitrary-precision memoized factorial, keyed by value. The base case
/// triggers on the decimal form "0" or "1" and returns n itself.
pub fn factorial_big(cache: &MemoCache<BigInt, BigInt>, n: &BigInt) -> BigInt {
    let s = n.to_string();
    if s == "0" || s == "1" {
        return n.clone();
    }
    if let Some(val) = cache.read(n) {
        return val;
    }

    let result = n * factorial_big(cache, &(n - BigInt::from(1)));
    cache.write(n.clone(), result.clone());
    result
}
