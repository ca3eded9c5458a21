#![no_main]

use libfuzzer_sys::fuzz_target;

use fibserve_core::{fast_doubling, memoized_fast_doubling, FibCache, Options};

fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }
    // First byte sizes the table; the rest is a sequence of indices
    // (capped at 4096 for speed) replayed against one shared table.
    let capacity = usize::from(data[0] % 8) + 1;
    let cache = FibCache::new(capacity).unwrap();
    let opts = Options::sequential();

    for chunk in data[1..].chunks(2) {
        let n = chunk.iter().fold(0u64, |acc, &b| (acc << 8) | u64::from(b)) % 4096;
        let got = memoized_fast_doubling(&cache, n, &opts);
        assert_eq!(*got, fast_doubling(n), "memoized != engine at n={n}");
        assert!(cache.len() <= capacity);
    }
});
