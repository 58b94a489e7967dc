//! The seed generator: the canonical first two moves shared by every machine in the
//! search tree.

use crate::config::SearchConfig;
use crate::machine::Machine;
use crate::types::{Direction, SearchError, Target};

/// Builds the initial worklist for `config`.
///
/// Every machine starts with `1rb` in cell (a, 0). The seeds then cover cell (b, 0)
/// with each output up to one new symbol and each target up to one new state, in
/// both directions. A candidate is dropped when it satisfies zdex, or when it moves
/// right into `a` or `b`: from a blank tape such a machine walks right forever.
///
/// Tables smaller than 2×2 cannot hold the first move, so their only seed is the
/// empty machine.
pub fn seeds(config: &SearchConfig) -> Result<Vec<Machine>, SearchError> {
    config.validate()?;

    let mut base = Machine::new(config.states, config.symbols);
    if config.states < 2 || config.symbols < 2 {
        return Ok(vec![base]);
    }

    base.assign(0, 0, 1, Direction::Right, Target::State(1))?;

    let introduced = base.table().states_seen();
    let outputs = (base.table().symbols_seen() + 1).min(config.symbols);
    let targets = (introduced + 1).min(config.states);

    let mut seeds = Vec::new();
    for output in 0..outputs {
        for direction in Direction::ALL {
            for target in 0..targets {
                if direction == Direction::Right && target < introduced {
                    continue;
                }

                let mut seed = base.clone();
                seed.assign(
                    1,
                    0,
                    output as u8,
                    direction,
                    Target::State(target as u8),
                )?;
                if !seed.satisfies_zdex() {
                    seeds.push(seed);
                }
            }
        }
    }

    Ok(seeds)
}
