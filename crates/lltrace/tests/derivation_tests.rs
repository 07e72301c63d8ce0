//! End-to-end tests: driving the arithmetic table and building trees

use lltrace::grammar::{Lookahead, NonTerminal, PredictiveTable, Symbol, Terminal};
use lltrace::testing::{arithmetic_table, start_symbol, terminals};
use lltrace::{CellState, DriveError, ParseError, build_tree, drive, parse};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn nt(text: &str) -> NonTerminal {
    NonTerminal::new(text).unwrap()
}

fn la(text: &str) -> Lookahead {
    Lookahead::parse(text).unwrap()
}

/// Test that `id + id * id` is accepted and the leaves read back the input
#[test]
fn test_sum_of_product_is_accepted() {
    init_logging();
    let table = arithmetic_table();
    let tokens = terminals("id + id * id").unwrap();

    let derivation = parse(&start_symbol(), &table, &tokens).unwrap();

    assert!(derivation.trace.is_accepted());
    assert_eq!(derivation.trace[0].step(), 0);
    assert_eq!(
        derivation.tree.leaf_values().collect::<Vec<_>>(),
        ["id", "+", "id", "*", "id"]
    );
    assert_eq!(derivation.tree.symbol, Symbol::classify("E"));
}

/// Test the leftmost derivation of `id + id * id`
#[test]
fn test_productions_form_leftmost_derivation() {
    init_logging();
    let table = arithmetic_table();
    let trace = drive(&start_symbol(), &table, &terminals("id + id * id").unwrap()).unwrap();

    let applied: Vec<String> = trace.productions().map(ToString::to_string).collect();
    assert_eq!(
        applied,
        [
            "E → T E'",
            "T → F T'",
            "F → id",
            "T' → ε",
            "E' → + T E'",
            "T → F T'",
            "F → id",
            "T' → * F T'",
            "F → id",
            "T' → ε",
            "E' → ε",
        ]
    );
}

/// Test that a dangling operator fails on `T` at the end marker
#[test]
fn test_dangling_operator_reports_position_of_end() {
    init_logging();
    let table = arithmetic_table();
    let err = parse(&start_symbol(), &table, &terminals("id +").unwrap()).unwrap_err();

    assert_eq!(
        err,
        ParseError::Drive(DriveError::NoEntry {
            position: 2,
            nonterminal: nt("T"),
            lookahead: Lookahead::End,
            cell: CellState::Absent,
        })
    );
    assert!(err.to_string().contains("position 2"));
}

/// Test that a leading operator fails immediately on `E`
#[test]
fn test_leading_operator_fails_at_start() {
    init_logging();
    let table = arithmetic_table();
    let err = drive(&start_symbol(), &table, &terminals("* id").unwrap()).unwrap_err();

    assert_eq!(
        err,
        DriveError::NoEntry {
            position: 0,
            nonterminal: nt("E"),
            lookahead: la("*"),
            cell: CellState::Absent,
        }
    );
    assert_eq!(err.position(), Some(0));
    assert!(err.is_syntax_error());
}

/// Test that a nonterminal with no row is reported as a table fault
#[test]
fn test_missing_row_is_not_a_syntax_error() {
    init_logging();
    let table = PredictiveTable::builder()
        .entry("S", "a", ["a", "B"])
        .build()
        .unwrap();
    let tokens = [Terminal::new("a").unwrap()];
    let err = drive(&nt("S"), &table, &tokens).unwrap_err();

    assert_eq!(err, DriveError::MissingRow { nonterminal: nt("B") });
    assert!(!err.is_syntax_error());
    assert_eq!(err.position(), None);
}

/// Test the parenthesized inputs used by the demo program
#[test]
fn test_nested_parentheses() {
    init_logging();
    let table = arithmetic_table();
    for text in ["( id + id ) * num", "id * ( num - id / num )", "( ( ( id ) ) )"] {
        let tokens = terminals(text).unwrap();
        let derivation = parse(&start_symbol(), &table, &tokens).unwrap();
        let leaves: Vec<&str> = derivation.tree.leaf_values().collect();
        let words: Vec<&str> = text.split_whitespace().collect();
        assert_eq!(leaves, words, "leaves of {text}");
    }
}

/// Test that each move changes the stack or the input, never neither
#[test]
fn test_every_move_makes_progress() {
    let table = arithmetic_table();
    let trace = drive(&start_symbol(), &table, &terminals("( id + num ) / id").unwrap()).unwrap();

    for (i, pair) in trace.as_slice().windows(2).enumerate() {
        let (before, after) = (&pair[0], &pair[1]);
        assert_eq!(after.step(), i + 1);
        if after.is_match() {
            assert_eq!(after.input().len() + 1, before.input().len());
            assert_eq!(after.stack().len() + 1, before.stack().len());
        } else {
            let production = after.production().unwrap();
            assert_eq!(before.stack().top().and_then(Symbol::as_nonterminal), Some(production.left()));
            assert_eq!(after.input().as_slice(), before.input().as_slice());
            assert_eq!(
                after.stack().len() + 1,
                before.stack().len() + production.expansion().len()
            );
        }
    }
}

/// Test that expansions push the right-hand side with its first symbol on top
#[test]
fn test_expansion_puts_first_symbol_on_top() {
    let table = arithmetic_table();
    let trace = drive(&start_symbol(), &table, &terminals("( id )").unwrap()).unwrap();

    let after_paren = trace
        .iter()
        .find(|c| c.production().is_some_and(|p| p.to_string() == "F → ( E )"))
        .unwrap();
    let top_three: Vec<String> = after_paren.stack().iter().take(3).map(ToString::to_string).collect();
    assert_eq!(top_three, ["(", "E", ")"]);
}

/// Test that driving twice gives the same trace and the same tree
#[test]
fn test_driving_is_deterministic() {
    let table = arithmetic_table();
    let tokens = terminals("num * num + id").unwrap();

    let first = parse(&start_symbol(), &table, &tokens).unwrap();
    let second = parse(&start_symbol(), &table, &tokens).unwrap();
    assert_eq!(first, second);
}

/// Test that configurations survive later moves unchanged
#[test]
fn test_snapshots_are_independent() {
    let table = arithmetic_table();
    let trace = drive(&start_symbol(), &table, &terminals("id * id").unwrap()).unwrap();
    let records = trace.to_records();

    let stacks: Vec<Vec<String>> = records
        .iter()
        .map(|r| r.stack.iter().map(ToString::to_string).collect())
        .collect();
    assert_eq!(stacks[0], ["$", "E"]);
    assert_eq!(stacks.last().unwrap(), &["$"]);

    let rebuilt = lltrace::Trace::from(
        records
            .into_iter()
            .map(lltrace::Configuration::from)
            .collect::<Vec<_>>(),
    );
    assert_eq!(rebuilt, trace);
    assert_eq!(build_tree(&rebuilt).unwrap(), build_tree(&trace).unwrap());
}

/// Test the empty input against a start symbol that cannot derive ε
#[test]
fn test_empty_input_without_nullable_start() {
    let table = arithmetic_table();
    let err = drive(&start_symbol(), &table, &[]).unwrap_err();
    assert_eq!(
        err,
        DriveError::NoEntry {
            position: 0,
            nonterminal: nt("E"),
            lookahead: Lookahead::End,
            cell: CellState::Absent,
        }
    );
}

/// Test that a table which accepts the empty input yields a lone root
#[test]
fn test_empty_input_with_nullable_start() {
    let table = PredictiveTable::builder()
        .entry("L", "x", ["x", "L"])
        .entry("L", "$", Vec::<&str>::new())
        .build()
        .unwrap();
    let derivation = parse(&nt("L"), &table, &[]).unwrap();

    assert_eq!(derivation.trace.len(), 2);
    assert!(derivation.tree.is_leaf());
    assert_eq!(derivation.tree.value(), None);
}

/// Test that long right-recursive inputs parse without exhausting the call stack
#[test]
fn test_long_input() {
    let table = PredictiveTable::builder()
        .entry("L", "x", ["x", "L"])
        .entry("L", "$", ["ε"])
        .build()
        .unwrap();
    let tokens = vec![Terminal::new("x").unwrap(); 20_000];
    let derivation = parse(&nt("L"), &table, &tokens).unwrap();

    assert_eq!(derivation.tree.leaf_values().count(), 20_000);
    assert_eq!(derivation.tree.depth(), 20_001);
}
