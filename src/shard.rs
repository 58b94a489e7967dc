//! Sharded enumeration: the seeds are dealt over worker threads, each running its own
//! [`Enumerator`] with a private worklist and result buffer.

use crate::config::SearchConfig;
use crate::driver::{Enumerator, Finalized};
use crate::machine::Machine;
use crate::seed::seeds;
use crate::types::SearchError;
use std::panic;
use std::thread;
use tracing::{info, info_span};

/// Runs the enumeration for `config` on `jobs` threads.
///
/// Every branch depends only on the machine it was produced from, so subtrees of
/// different seeds never interact. Results are concatenated in shard order; the set
/// of finalized machines is the same as for [`crate::enumerate`].
pub fn enumerate_sharded(
    config: &SearchConfig,
    jobs: usize,
) -> Result<Vec<Finalized>, SearchError> {
    if jobs == 0 {
        return Err(SearchError::InvalidConfig(
            "at least one job is required".to_string(),
        ));
    }

    let shards = deal(seeds(config)?, jobs);
    info!(jobs, shards = shards.len(), "dealt seeds");

    let config = *config;
    thread::scope(|scope| -> Result<Vec<Finalized>, SearchError> {
        let handles: Vec<_> = shards
            .into_iter()
            .enumerate()
            .map(|(index, shard)| scope.spawn(move || run_shard(config, index, shard)))
            .collect();

        let mut results = Vec::new();
        for handle in handles {
            let shard = handle
                .join()
                .unwrap_or_else(|payload| panic::resume_unwind(payload))?;
            results.extend(shard);
        }
        Ok(results)
    })
}

/// Deals `seeds` round-robin into at most `jobs` non-empty shards.
fn deal(seeds: Vec<Machine>, jobs: usize) -> Vec<Vec<Machine>> {
    let mut shards: Vec<Vec<Machine>> = (0..jobs.min(seeds.len())).map(|_| Vec::new()).collect();
    let count = shards.len();
    for (i, seed) in seeds.into_iter().enumerate() {
        shards[i % count].push(seed);
    }
    shards
}

fn run_shard(
    config: SearchConfig,
    index: usize,
    shard: Vec<Machine>,
) -> Result<Vec<Finalized>, SearchError> {
    let _span = info_span!("shard", index).entered();

    let mut enumerator = Enumerator::new(config)?;
    enumerator.extend(shard);

    let mut results = Vec::new();
    enumerator.run(&mut results)?;
    Ok(results)
}
