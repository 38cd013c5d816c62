//! End-to-end runs: configuration text in, rendered trace out.

use otm::{parse, render, Halt, Reporter, TraceFormat, TuringMachine, INITIAL_TAPE_CAPACITY};

fn rendered(config: &str, input: &str) -> Vec<String> {
    let program = parse(config).unwrap();
    let mut machine = TuringMachine::new(&program, input).unwrap();
    machine.trace().unwrap().iter().map(render).collect()
}

#[test]
fn test_single_state_without_rules() {
    let trace = rendered("1\nq0 noaccept\n0\nq0\n", "a");

    let blank_tape = format!("_<{}\n", "_ ".repeat(INITIAL_TAPE_CAPACITY - 1));
    assert_eq!(
        trace,
        vec![
            format!("State: q0 and is 0\n{blank_tape}"),
            format!("State: none (halted)\n{blank_tape}"),
        ]
    );
}

#[test]
fn test_single_matched_step() {
    let trace = rendered("2\nq0 noaccept\nq1 accept\n1\nq0 0 _ q1 X R\nq0\n", "0");

    assert_eq!(trace.len(), 2);
    assert_eq!(
        trace[1],
        format!(
            "State: q1 and is 1\nX _<{}\n",
            "_ ".repeat(INITIAL_TAPE_CAPACITY - 2)
        )
    );
}

#[test]
fn test_left_growth_through_config() {
    let program = parse("1\nq0 accept\n1\nq0 a _ q0 Y L\nq0\n").unwrap();
    let mut machine = TuringMachine::new(&program, "a").unwrap();
    let snapshots = machine.trace().unwrap();

    let last = snapshots.last().unwrap();
    assert_eq!(last.tape.len(), INITIAL_TAPE_CAPACITY * 2);
    assert_eq!(last.head, INITIAL_TAPE_CAPACITY - 1);
    assert_eq!(last.tape[INITIAL_TAPE_CAPACITY], 'Y');
    assert!(last.tape[INITIAL_TAPE_CAPACITY + 1..]
        .iter()
        .all(|&c| c == '_'));
}

#[test]
fn test_halts_mid_input() {
    let config = "2\nq0 noaccept\nq1 accept\n2\nq0 a _ q1 a R\nq1 b _ q0 b R\nq0\n";
    let program = parse(config).unwrap();
    let mut machine = TuringMachine::new(&program, "ababbaaa").unwrap();

    let mut count = 0;
    let halt = machine.run(|_| count += 1);

    assert_eq!(halt, Halt::NoTransition);
    assert_eq!(machine.step_count(), 4);
    assert_eq!(count, machine.step_count() + 2);
    assert!(machine.state().is_none());
}

#[test]
fn test_duplicate_rules_first_wins() {
    let config = "2\nq0 noaccept\nq1 accept\n2\nq0 0 _ q1 A R\nq0 0 _ q0 B L\nq0\n";
    let program = parse(config).unwrap();
    let mut machine = TuringMachine::new(&program, "0").unwrap();
    let snapshots = machine.trace().unwrap();

    assert_eq!(snapshots[1].tape[0], 'A');
    assert_eq!(snapshots[1].accepting(), Some(true));
}

#[test]
fn test_json_trace() {
    let program = parse("2\nq0 noaccept\nq1 accept\n1\nq0 0 _ q1 X R\nq0\n").unwrap();
    let mut machine = TuringMachine::new(&program, "00").unwrap();

    let mut reporter = Reporter::new(Vec::new(), TraceFormat::Json);
    let halt = machine.run(|snapshot| reporter.report(&snapshot).unwrap());
    assert_eq!(halt, Halt::NoTransition);

    let out = String::from_utf8(reporter.into_inner()).unwrap();
    let lines: Vec<serde_json::Value> = out
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();

    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0]["state"]["name"], "q0");
    assert_eq!(lines[1]["state"]["accepting"], true);
    assert_eq!(lines[1]["head"], 1);
    assert!(lines[2]["state"].is_null());
}
