use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

#[test]
fn check_inputs_from_arguments() {
    let mut cmd = cargo_bin_cmd!("sgram");
    cmd.arg("example_data/balanced.bnf").arg("acb").arg("ab");

    let output_pred = predicate::str::contains("The grammar is simple.")
        .and(predicate::str::contains("['a', 'c', 'b'] Accepted"))
        .and(predicate::str::contains("['a', 'b'] Rejected"));

    cmd.assert().success().stdout(output_pred);
}

#[test]
fn check_long_input_from_stdin() {
    let depth = 100_000;
    let input = format!("{}c{}\n", "a".repeat(depth), "b".repeat(depth));

    let mut cmd = cargo_bin_cmd!("sgram");
    cmd.arg("example_data/balanced.bnf").write_stdin(input);

    cmd.assert().success().stdout(predicate::str::ends_with("] Accepted\n"));
}

#[test]
fn reject_grammar_that_is_not_simple() {
    let mut cmd = cargo_bin_cmd!("sgram");
    cmd.arg("example_data/not_simple.bnf").arg("ac");

    cmd.assert()
        .code(1)
        .stdout(predicate::str::contains("The grammar isn't simple."))
        .stderr(predicate::str::contains("both start with `a`"));
}

#[test]
fn report_malformed_grammar_file() {
    let mut cmd = cargo_bin_cmd!("sgram");
    cmd.arg("example_data/malformed.bnf");

    cmd.assert().code(1).stdout(predicate::str::is_empty());
}

#[test]
fn undefined_start_symbol_is_a_broken_grammar() {
    let mut cmd = cargo_bin_cmd!("sgram");
    cmd.arg("example_data/balanced.bnf").args(["--start", "Q", "c"]);

    cmd.assert()
        .code(2)
        .stderr(predicate::str::contains("No definition for nonterminal `Q`"));
}

#[test]
fn failed_generation_has_its_own_status() {
    let mut cmd = cargo_bin_cmd!("sgram");
    cmd.arg("example_data/unproductive.bnf").args(["-n", "1", "--seed", "7"]);

    cmd.assert()
        .code(3)
        .stdout(predicate::str::contains("The grammar is simple."))
        .stderr(predicate::str::contains("never derives a finite sentence"));
}

#[test]
fn generated_sentences_are_printed() {
    let mut cmd = cargo_bin_cmd!("sgram");
    cmd.arg("example_data/balanced.bnf").args(["-n", "3", "--seed", "1"]);

    let sentence_pred = predicate::str::is_match(r"(?m)^a*cb*$").unwrap();

    cmd.assert().success().stdout(sentence_pred);
}
