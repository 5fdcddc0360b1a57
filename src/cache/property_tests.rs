//! Property-Based Tests for Cache Module
//!
//! Uses proptest to verify the byte-budget and recency invariants under
//! arbitrary operation sequences.

use proptest::prelude::*;
use std::collections::HashMap;
use std::sync::Arc;

use crate::cache::{EstimateSize, MemoCache};

// == Test Configuration ==
const TEST_CAPACITY_BYTES: usize = 1000;

#[derive(Debug, PartialEq)]
struct Payload {
    bytes: usize,
}

impl EstimateSize for Payload {
    fn estimate_bytes(&self) -> Option<usize> {
        Some(self.bytes)
    }
}

#[derive(Debug, Clone, PartialEq)]
struct NoErr;

type PayloadCache = MemoCache<String, Payload, NoErr>;

// == Strategies ==
/// Generates cache keys from a small alphabet so sequences revisit keys
fn key_strategy() -> impl Strategy<Value = String> {
    "[a-h]{1,2}".prop_map(|s| s)
}

/// Generates entry sizes small enough that several fit in the budget
fn size_strategy() -> impl Strategy<Value = usize> {
    1usize..400
}

#[derive(Debug, Clone)]
enum CacheOp {
    GetOrCompute { key: String, bytes: usize },
    Invalidate { key: String },
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        4 => (key_strategy(), size_strategy())
            .prop_map(|(key, bytes)| CacheOp::GetOrCompute { key, bytes }),
        1 => key_strategy().prop_map(|key| CacheOp::Invalidate { key }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // After any sequence of operations the byte total stays within budget,
    // except when a single entry remains; and the running total always equals
    // the sum of the sizes of currently resident keys.
    #[test]
    fn prop_budget_invariant_and_byte_accounting(
        ops in prop::collection::vec(cache_op_strategy(), 1..60)
    ) {
        let rt = tokio::runtime::Runtime::new().unwrap();
        rt.block_on(async {
            let cache = PayloadCache::new(TEST_CAPACITY_BYTES);
            // Size each key was last inserted with (hits keep the stored size)
            let mut last_size: HashMap<String, usize> = HashMap::new();

            for op in ops {
                match op {
                    CacheOp::GetOrCompute { key, bytes } => {
                        let resident = cache.contains(&key).await;
                        let value = cache
                            .get_or_compute(key.clone(), || async move {
                                Ok::<_, NoErr>(Payload { bytes })
                            })
                            .await
                            .unwrap();
                        if resident {
                            // Hit: stored value wins, size unchanged
                            prop_assert_eq!(value.bytes, last_size[&key]);
                        } else {
                            last_size.insert(key, bytes);
                        }
                    }
                    CacheOp::Invalidate { key } => {
                        cache.invalidate(&key).await;
                    }
                }

                let total = cache.total_bytes().await;
                let entries = cache.len().await;
                prop_assert!(
                    total <= TEST_CAPACITY_BYTES || entries == 1,
                    "total {} over budget with {} entries",
                    total,
                    entries
                );

                let mut expected_total = 0;
                let mut expected_entries = 0;
                for (key, size) in &last_size {
                    if cache.contains(key).await {
                        expected_total += size;
                        expected_entries += 1;
                    }
                }
                prop_assert_eq!(total, expected_total, "byte accounting drifted");
                prop_assert_eq!(entries, expected_entries);
            }
            Ok(())
        })?;
    }

    // Hit and miss counters match a sequential model: a call is a hit exactly
    // when the key was resident just before it.
    #[test]
    fn prop_statistics_accuracy(
        ops in prop::collection::vec(cache_op_strategy(), 1..60)
    ) {
        let rt = tokio::runtime::Runtime::new().unwrap();
        rt.block_on(async {
            let cache = PayloadCache::new(TEST_CAPACITY_BYTES);
            let mut expected_hits: u64 = 0;
            let mut expected_misses: u64 = 0;

            for op in ops {
                match op {
                    CacheOp::GetOrCompute { key, bytes } => {
                        if cache.contains(&key).await {
                            expected_hits += 1;
                        } else {
                            expected_misses += 1;
                        }
                        cache
                            .get_or_compute(key, || async move {
                                Ok::<_, NoErr>(Payload { bytes })
                            })
                            .await
                            .unwrap();
                    }
                    CacheOp::Invalidate { key } => {
                        cache.invalidate(&key).await;
                    }
                }
            }

            let stats = cache.stats().await;
            prop_assert_eq!(stats.hits, expected_hits, "hits mismatch");
            prop_assert_eq!(stats.misses, expected_misses, "misses mismatch");
            prop_assert_eq!(stats.total_entries, cache.len().await);
            Ok(())
        })?;
    }

    // With equally sized entries the cache degenerates to a fixed-width LRU:
    // only the most recently inserted window survives, oldest-first eviction.
    #[test]
    fn prop_recency_window_survives(
        key_count in 3usize..12,
        window in 2usize..4,
    ) {
        let rt = tokio::runtime::Runtime::new().unwrap();
        rt.block_on(async {
            let entry_bytes = 100;
            let cache = PayloadCache::new(window * entry_bytes);

            let keys: Vec<String> = (0..key_count).map(|i| format!("file_{i}.csv")).collect();
            for key in &keys {
                let key = key.clone();
                cache
                    .get_or_compute(key, || async move {
                        Ok::<_, NoErr>(Payload { bytes: entry_bytes })
                    })
                    .await
                    .unwrap();
            }

            let survivors = key_count.min(window);
            for (i, key) in keys.iter().enumerate() {
                let expected = i + survivors >= key_count;
                let resident = cache.contains(key).await;
                prop_assert_eq!(
                    resident,
                    expected,
                    "key {} resident={} expected={}",
                    key,
                    resident,
                    expected
                );
            }
            Ok(())
        })?;
    }

    // Touching a key mid-sequence exempts it from the next eviction.
    #[test]
    fn prop_touched_key_outlives_stale_one(entry_bytes in 50usize..200) {
        let rt = tokio::runtime::Runtime::new().unwrap();
        rt.block_on(async {
            // Room for exactly two entries
            let cache = PayloadCache::new(2 * entry_bytes);
            let load = |key: &str| {
                let key = key.to_string();
                let cache = &cache;
                async move {
                    cache
                        .get_or_compute(key, || async move {
                            Ok::<_, NoErr>(Payload { bytes: entry_bytes })
                        })
                        .await
                        .unwrap()
                }
            };

            load("a").await;
            load("b").await;
            // Refresh a, so b is now the stale end
            load("a").await;
            load("c").await;

            prop_assert!(cache.contains(&"a".to_string()).await);
            prop_assert!(!cache.contains(&"b".to_string()).await);
            prop_assert!(cache.contains(&"c".to_string()).await);
            Ok(())
        })?;
    }
}

// == Concurrency Property ==
proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    // Concurrent lookups across a small key space never corrupt the byte
    // accounting and always return the size the key was first computed with.
    #[test]
    fn prop_concurrent_operation_correctness(
        tasks in prop::collection::vec((key_strategy(), size_strategy()), 4..20)
    ) {
        let rt = tokio::runtime::Runtime::new().unwrap();
        rt.block_on(async {
            let cache = Arc::new(PayloadCache::new(TEST_CAPACITY_BYTES));

            let mut handles = Vec::new();
            for (key, bytes) in tasks {
                let cache = Arc::clone(&cache);
                handles.push(tokio::spawn(async move {
                    cache
                        .get_or_compute(key, || async move {
                            Ok::<_, NoErr>(Payload { bytes })
                        })
                        .await
                        .unwrap()
                }));
            }

            for handle in handles {
                let value = handle.await.expect("task should not panic");
                prop_assert!(value.bytes < 400);
            }

            let total = cache.total_bytes().await;
            let entries = cache.len().await;
            prop_assert!(
                total <= TEST_CAPACITY_BYTES || entries == 1,
                "total {} over budget with {} entries",
                total,
                entries
            );

            let stats = cache.stats().await;
            let hit_rate = stats.hit_rate();
            prop_assert!((0.0..=1.0).contains(&hit_rate));
            Ok(())
        })?;
    }
}
