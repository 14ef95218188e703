use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};

use radixtree::ConcurrentRadixTree;
use rand::prelude::*;

fn random_keys(n: usize, seed: u64) -> Vec<String> {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    let mut keys = HashSet::new();
    while keys.len() < n {
        let len = rng.gen_range(4..16);
        let key: String = (0..len)
            .map(|_| rng.sample(rand::distributions::Alphanumeric) as char)
            .collect();
        keys.insert(key);
    }
    keys.into_iter().collect()
}

/// Several threads inserting, removing, and reading disjoint key ranges
/// simultaneously must leave the tree in a state consistent with whatever
/// mutations actually landed — no lost updates, no torn reads, no panics.
#[test]
fn concurrent_tree_operations() {
    const WORKERS: usize = 5;
    const KEYS_PER_WORKER: usize = 200;

    let tree: ConcurrentRadixTree<usize> = ConcurrentRadixTree::new();
    let all_keys = random_keys(WORKERS * KEYS_PER_WORKER, 7);
    let inserted = AtomicUsize::new(0);

    std::thread::scope(|scope| {
        for (worker_id, chunk) in all_keys.chunks(KEYS_PER_WORKER).enumerate() {
            let tree = &tree;
            let inserted = &inserted;
            scope.spawn(move || {
                for (i, key) in chunk.iter().enumerate() {
                    if tree.insert(key.as_str(), worker_id * KEYS_PER_WORKER + i).is_none() {
                        inserted.fetch_add(1, Ordering::SeqCst);
                    }
                    // interleave a handful of reads among the writes so
                    // readers and writers genuinely overlap.
                    let _ = tree.get(key.as_str());
                    let _ = tree.longest_prefix(key.as_str());
                }
            });
        }
    });

    assert_eq!(tree.len(), inserted.load(Ordering::SeqCst));
    assert_eq!(tree.len(), all_keys.len());
    for key in &all_keys {
        assert!(tree.get(key.as_str()).is_some(), "missing key {key:?}");
    }

    let removed = AtomicUsize::new(0);
    std::thread::scope(|scope| {
        for chunk in all_keys.chunks(KEYS_PER_WORKER) {
            let tree = &tree;
            let removed = &removed;
            scope.spawn(move || {
                for key in chunk {
                    if tree.remove(key.as_str()).is_some() {
                        removed.fetch_add(1, Ordering::SeqCst);
                    }
                }
            });
        }
    });

    assert_eq!(removed.load(Ordering::SeqCst), all_keys.len());
    assert_eq!(tree.len(), 0);
    assert!(tree.is_empty());
}

#[test]
fn concurrent_readers_see_consistent_snapshots() {
    let tree: ConcurrentRadixTree<u32> = ConcurrentRadixTree::from_map(
        (0..500u32).map(|i| (format!("key:{i}"), i)),
    );
    assert_eq!(tree.len(), 500);

    std::thread::scope(|scope| {
        for _ in 0..8 {
            let tree = &tree;
            scope.spawn(move || {
                for i in 0..500u32 {
                    assert_eq!(tree.get(format!("key:{i}")), Some(i));
                }
                let mut seen = 0;
                tree.walk(|_, _| {
                    seen += 1;
                    false
                });
                assert_eq!(seen, 500);
            });
        }
    });
}
