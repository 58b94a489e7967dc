//! The enumeration driver. Machines are taken from a worklist in order of fewest
//! steps executed, simulated until they reach a decision point, and then either
//! finalized into a [`ResultSink`] or branched into children that go back into the
//! worklist.

use crate::config::SearchConfig;
use crate::machine::Machine;
use crate::seed::seeds;
use crate::table::TransitionTable;
use crate::types::{Direction, Outcome, SearchError, Target, Transition};
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use tracing::{debug, info, trace};

/// A machine that has left the search, with the reason it left.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finalized {
    pub table: TransitionTable,
    pub outcome: Outcome,
    /// Steps executed before finalization.
    pub steps: u64,
}

impl Finalized {
    pub fn new(machine: Machine, outcome: Outcome) -> Self {
        let steps = machine.steps();
        Self {
            table: machine.into_table(),
            outcome,
            steps,
        }
    }
}

/// Receives every finalized machine.
pub trait ResultSink {
    fn accept(&mut self, finalized: Finalized);
}

impl ResultSink for Vec<Finalized> {
    fn accept(&mut self, finalized: Finalized) {
        self.push(finalized);
    }
}

/// A queued machine. Ordered by step count, then by insertion order.
#[derive(Debug)]
struct Pending {
    steps: u64,
    seq: u64,
    machine: Machine,
}

impl PartialEq for Pending {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Pending {}

impl PartialOrd for Pending {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pending {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.steps, self.seq).cmp(&(other.steps, other.seq))
    }
}

/// Runs the tree-normal-form search over a private worklist.
pub struct Enumerator {
    config: SearchConfig,
    worklist: BinaryHeap<Reverse<Pending>>,
    next_seq: u64,
    emitted: u64,
    iterations: u64,
}

impl Enumerator {
    /// Creates an enumerator with an empty worklist.
    pub fn new(config: SearchConfig) -> Result<Self, SearchError> {
        config.validate()?;

        Ok(Self {
            config,
            worklist: BinaryHeap::new(),
            next_seq: 0,
            emitted: 0,
            iterations: 0,
        })
    }

    /// Creates an enumerator whose worklist holds the canonical seeds for `config`.
    pub fn seeded(config: SearchConfig) -> Result<Self, SearchError> {
        let mut enumerator = Self::new(config)?;
        enumerator.extend(seeds(&config)?);
        Ok(enumerator)
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Number of machines waiting in the worklist.
    pub fn queued(&self) -> usize {
        self.worklist.len()
    }

    /// Number of machines finalized so far.
    pub fn emitted(&self) -> u64 {
        self.emitted
    }

    pub fn push(&mut self, machine: Machine) {
        let pending = Pending {
            steps: machine.steps(),
            seq: self.next_seq,
            machine,
        };
        self.next_seq += 1;
        self.worklist.push(Reverse(pending));
    }

    pub fn extend(&mut self, machines: impl IntoIterator<Item = Machine>) {
        for machine in machines {
            self.push(machine);
        }
    }

    /// Processes machines until the worklist is empty.
    ///
    /// # Errors
    ///
    /// Any `SearchError` raised here is an invariant violation and ends the run.
    pub fn run<S: ResultSink>(&mut self, sink: &mut S) -> Result<(), SearchError> {
        info!(
            states = self.config.states,
            symbols = self.config.symbols,
            step_limit = self.config.step_limit,
            queued = self.queued(),
            "starting enumeration"
        );

        while let Some(Reverse(pending)) = self.worklist.pop() {
            self.process(pending.machine, sink)?;
        }

        info!(emitted = self.emitted, "enumeration finished");
        Ok(())
    }

    /// Simulates one machine until it is finalized or branched.
    fn process<S: ResultSink>(
        &mut self,
        mut machine: Machine,
        sink: &mut S,
    ) -> Result<(), SearchError> {
        loop {
            self.report_progress(&machine);
            self.iterations += 1;

            if machine.steps() > self.config.step_limit {
                self.emit(sink, machine, Outcome::StepLimit);
                return Ok(());
            }

            if machine.steps() > 0 && machine.tape().is_blank() {
                self.emit(sink, machine, Outcome::BlankTape);
                return Ok(());
            }

            if machine.next_transition_is_undefined() {
                return self.branch(machine, sink);
            }

            if machine.table().defined_count() + 1 == self.config.cells() {
                let remaining: Vec<_> = machine.table().undefined_cells().collect();
                for (state, symbol) in remaining {
                    let halt = self.halting_transition();
                    machine.assign(state, symbol, halt.output, halt.direction, halt.target)?;
                }
                self.emit(sink, machine, Outcome::Completed);
                return Ok(());
            }

            if machine.step()? {
                self.emit(sink, machine, Outcome::Halted);
                return Ok(());
            }
        }
    }

    /// Expands the undefined cell the machine is about to execute.
    ///
    /// A full table is also closed with a halting transition and emitted. The
    /// children cover every output up to one new symbol, every target up to one new
    /// state and both directions; children satisfying zdex are dropped.
    fn branch<S: ResultSink>(
        &mut self,
        machine: Machine,
        sink: &mut S,
    ) -> Result<(), SearchError> {
        let (state, symbol) = machine.next_cell().ok_or(SearchError::Halted)?;

        if machine.is_table_full() {
            let halt = self.halting_transition();
            let mut closed = machine.clone();
            closed.assign(state, symbol, halt.output, halt.direction, halt.target)?;
            if !closed.satisfies_zdex() {
                self.emit(sink, closed, Outcome::HaltCandidate);
            }
        }

        let targets = (machine.table().states_seen() + 1).min(self.config.states);
        let outputs = (machine.table().symbols_seen() + 1).min(self.config.symbols);

        for target in 0..targets {
            for output in 0..outputs {
                for direction in Direction::ALL {
                    let mut child = machine.clone();
                    child.assign(
                        state,
                        symbol,
                        output as u8,
                        direction,
                        Target::State(target as u8),
                    )?;
                    if !child.satisfies_zdex() {
                        self.push(child);
                    }
                }
            }
        }

        Ok(())
    }

    /// Write `1`, move right, halt. Single-symbol tables write the blank instead.
    fn halting_transition(&self) -> Transition {
        let mut halt = Transition::halting();
        if self.config.symbols < 2 {
            halt.output = 0;
        }
        halt
    }

    fn emit<S: ResultSink>(&mut self, sink: &mut S, machine: Machine, outcome: Outcome) {
        trace!(
            table = %machine.table(),
            steps = machine.steps(),
            outcome = outcome.name(),
            "finalized"
        );
        self.emitted += 1;
        sink.accept(Finalized::new(machine, outcome));
    }

    fn report_progress(&self, machine: &Machine) {
        let interval = self.config.progress_interval;
        if interval == 0 || self.iterations % interval != 0 {
            return;
        }

        let queued = self.queued() as u64;
        debug!(
            total = 1 + self.emitted + queued,
            emitted = self.emitted,
            queued,
            steps = machine.steps(),
            state = %machine.state().as_char(),
            head = machine.head(),
            symbol = machine.symbol_under_head(),
            transition = ?machine.next_transition(),
            "progress"
        );
    }
}

/// Runs a complete single-threaded enumeration for `config` and collects every
/// finalized machine.
pub fn enumerate(config: &SearchConfig) -> Result<Vec<Finalized>, SearchError> {
    let mut results = Vec::new();
    Enumerator::seeded(*config)?.run(&mut results)?;
    Ok(results)
}
