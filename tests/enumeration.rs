use std::collections::HashSet;
use tnf::{
    enumerate, enumerate_sharded, Direction, Enumerator, Finalized, Machine, Outcome,
    SearchConfig, Summary, Target, TransitionTable,
};

fn config(states: usize, symbols: usize) -> SearchConfig {
    SearchConfig::new(states, symbols).with_progress_interval(0)
}

fn summary(states: usize, symbols: usize) -> Summary {
    Summary::from_results(&enumerate(&config(states, symbols)).unwrap())
}

#[test]
fn test_two_states_two_symbols() {
    let summary = summary(2, 2);

    assert_eq!(summary.total, 36);
    assert_eq!(summary.count(Outcome::HaltCandidate), 4);
    assert_eq!(summary.count(Outcome::Completed), 32);
}

#[test]
fn test_two_states_three_symbols() {
    let summary = summary(2, 3);

    assert_eq!(summary.total, 2764);
    assert_eq!(summary.count(Outcome::HaltCandidate), 217);
    assert_eq!(summary.count(Outcome::BlankTape), 52);
    assert_eq!(summary.count(Outcome::StepLimit), 263);
    assert_eq!(summary.count(Outcome::Completed), 2232);
    assert_eq!(summary.count(Outcome::Halted), 0);
}

#[test]
fn test_three_states_two_symbols() {
    let summary = summary(3, 2);

    assert_eq!(summary.total, 3508);
    assert_eq!(summary.count(Outcome::HaltCandidate), 278);
    assert_eq!(summary.count(Outcome::BlankTape), 82);
    assert_eq!(summary.count(Outcome::StepLimit), 268);
    assert_eq!(summary.count(Outcome::Completed), 2880);
}

#[test]
fn test_three_states_two_symbols_single_subtree() {
    // Only the subtree below `1rb ___ 1la ___ ___ ___`.
    let mut machine = Machine::new(3, 2);
    machine
        .assign(0, 0, 1, Direction::Right, Target::State(1))
        .unwrap();
    machine
        .assign(1, 0, 1, Direction::Left, Target::State(0))
        .unwrap();

    let mut enumerator = Enumerator::new(config(3, 2)).unwrap();
    enumerator.push(machine);
    let mut results: Vec<Finalized> = Vec::new();
    enumerator.run(&mut results).unwrap();

    let summary = Summary::from_results(&results);
    assert_eq!(summary.total, 655);
    assert_eq!(summary.count(Outcome::StepLimit), 51);
    assert_eq!(summary.count(Outcome::BlankTape), 15);
    assert_eq!(summary.count(Outcome::HaltCandidate), 49);
    assert_eq!(summary.count(Outcome::Completed), 540);
    assert_eq!(enumerator.emitted(), 655);
    assert_eq!(enumerator.queued(), 0);
}

#[test]
#[ignore = "slow: half a million machines"]
fn test_four_states_two_symbols() {
    let results = enumerate_sharded(&config(4, 2), 4).unwrap();

    assert_eq!(results.len(), 511_162);
}

#[test]
fn test_lines_round_trip() {
    for (states, symbols) in [(2, 3), (3, 2)] {
        for finalized in enumerate(&config(states, symbols)).unwrap() {
            let line = finalized.table.to_string();
            let parsed = TransitionTable::parse(&line, states, symbols).unwrap();

            assert_eq!(parsed, finalized.table, "{}", line);
        }
    }
}

#[test]
fn test_finalized_tables() {
    let results = enumerate(&config(3, 2)).unwrap();

    let lines: HashSet<String> = results.iter().map(|r| r.table.to_string()).collect();
    assert_eq!(lines.len(), results.len());

    for finalized in &results {
        let table = &finalized.table;
        assert!(table.states_seen() <= 3 && table.symbols_seen() <= 2);
        assert!(table.to_string().starts_with("1rb "));
        match finalized.outcome {
            Outcome::Completed => assert!(table.is_complete()),
            Outcome::HaltCandidate => {
                assert!(table.is_full());
                assert!(!table.satisfies_zdex());
            }
            Outcome::StepLimit => assert!(finalized.steps > 200),
            Outcome::BlankTape => assert!(finalized.steps > 0),
            Outcome::Halted => {}
        }
    }
}

#[test]
fn test_short_step_limit() {
    let summary = Summary::from_results(&enumerate(&config(2, 3).with_step_limit(5)).unwrap());

    assert_eq!(summary.total, 1660);
    assert_eq!(summary.count(Outcome::StepLimit), 359);
    assert_eq!(summary.count(Outcome::BlankTape), 48);
    assert_eq!(summary.count(Outcome::HaltCandidate), 125);
    assert_eq!(summary.count(Outcome::Completed), 1128);
}
