mod cli_support;

use cli_support::ScriptHarness;
use predicates::prelude::*;
use predicates::str::contains;
use regex::Regex;

#[test]
fn script_mode_submits_user_info() {
    let harness = ScriptHarness::new();
    harness
        .command()
        .write_stdin("select userInfo\nset firstName Ada\nset lastName Lovelace\nsubmit\nlist\nexit\n")
        .assert()
        .success()
        .stdout(contains("Form submitted successfully!"))
        .stdout(contains(
            "1. firstName: Ada  lastName: Lovelace  age:   formType: userInfo",
        ));
}

#[test]
fn missing_required_field_is_reported_inline() {
    let harness = ScriptHarness::new();
    let output = harness.run_script("select userInfo\nset lastName Lovelace\nsubmit\nlist\n");
    assert!(output.stdout.contains("First Name is required"));
    assert!(!output.stdout.contains("Form submitted successfully!"));
    assert!(output.stdout.contains("No entries yet."));
}

#[test]
fn unlisted_state_cannot_be_submitted() {
    let harness = ScriptHarness::new();
    let output = harness.run_script(
        "select addressInfo\nset street \"MG Road\"\nset city Pune\nset state Goa\nsubmit\n",
    );
    assert!(output.stdout.contains("`Goa` is not an option of State"));
    assert!(output.stdout.contains("State is required"));
    assert!(!output.stdout.contains("Form submitted successfully!"));
}

#[test]
fn blank_card_fields_do_not_count_as_filled() {
    let harness = ScriptHarness::new();
    let output = harness.run_script(
        "select paymentInfo\nset cardNumber \"   \"\nset expiryDate \"  \"\nset cvv 123\nset cardholderName Ada\nsubmit\nlist\n",
    );
    assert!(!output.stdout.contains("100%"), "{}", output.stdout);
    assert!(output.stdout.contains("Card Number is required"));
    assert!(!output.stdout.contains("Form submitted successfully!"));
    assert!(output.stdout.contains("No entries yet."));
}

#[test]
fn edit_saves_in_place() {
    let harness = ScriptHarness::new();
    let output = harness.run_script(
        "select userInfo
set firstName Ada
set lastName Lovelace
submit
edit 1
show
set firstName Augusta
submit
list
",
    );
    assert!(output.stdout.contains("[ Save Changes ]"));
    assert!(output.stdout.contains("Changes saved successfully!"));
    assert!(output
        .stdout
        .contains("1. firstName: Augusta  lastName: Lovelace"));
    assert!(!output.stdout.contains("2. firstName"));
}

#[test]
fn delete_removes_entry() {
    let harness = ScriptHarness::new();
    harness
        .command()
        .write_stdin(
            "select userInfo\nset firstName Ada\nset lastName Lovelace\nsubmit\ndelete 1\nlist\n",
        )
        .assert()
        .success()
        .stdout(contains("Entry deleted successfully!"))
        .stdout(contains("No entries yet."));
}

#[test]
fn delete_out_of_range_is_rejected() {
    let harness = ScriptHarness::new();
    harness
        .command()
        .write_stdin("delete 3\n")
        .assert()
        .success()
        .stdout(contains("There are no entries yet"));
}

#[test]
fn export_prints_records_as_json() {
    let harness = ScriptHarness::new();
    let output = harness.run_script(
        "select userInfo\nset firstName Ada\nset lastName Lovelace\nset age 36\nsubmit\nexport\n",
    );
    let start = output.stdout.find("[\n").expect("json array in output");
    let end = output.stdout.rfind(']').expect("json array end");
    let json: serde_json::Value =
        serde_json::from_str(&output.stdout[start..=end]).expect("valid json");
    let record = &json[0];
    assert_eq!(record["formType"], "userInfo");
    assert_eq!(record["values"]["firstName"], "Ada");
    assert_eq!(record["values"]["age"], 36.0);
}

#[test]
fn progress_is_reported_after_each_change() {
    let harness = ScriptHarness::new();
    let output = harness.run_script("select userInfo\nset firstName Ada\nclear firstName\n");
    let filled = Regex::new(r"Progress: \[#{10}-{20}\] 33%").unwrap();
    let empty = Regex::new(r"Progress: \[-{30}\] 0%").unwrap();
    assert!(filled.is_match(&output.stdout), "{}", output.stdout);
    assert!(empty.is_match(&output.stdout), "{}", output.stdout);
}

#[test]
fn unknown_command_suggests_closest() {
    let harness = ScriptHarness::new();
    harness
        .command()
        .write_stdin("selct userInfo\n")
        .assert()
        .success()
        .stdout(contains("Unknown command `selct`"))
        .stdout(contains("Suggestion: `select`?"));
}

#[test]
fn fill_requires_interactive_terminal() {
    let harness = ScriptHarness::new();
    harness
        .command()
        .write_stdin("select userInfo\nfill\n")
        .assert()
        .success()
        .stdout(contains("`fill` needs an interactive terminal"));
}

#[test]
fn unknown_form_type_renders_nothing() {
    let harness = ScriptHarness::new();
    harness
        .command()
        .write_stdin("select shippingInfo\nsubmit\n")
        .assert()
        .success()
        .stdout(contains("No form schema registered for `shippingInfo`"))
        .stdout(contains("Form submitted successfully!").not());
}

#[test]
fn config_changes_survive_restart() {
    let harness = ScriptHarness::new();
    harness.run_script("config show_progress_bar off\n");
    let output = harness.run_script("select userInfo\nset firstName Ada\nconfig\n");
    assert!(output.stdout.contains("Progress: 33%"));
    assert!(output.stdout.contains("show_progress_bar"));
    assert!(harness.home().join("config").join("config.json").exists());
}

#[test]
fn version_shows_package_version() {
    let harness = ScriptHarness::new();
    harness
        .command()
        .write_stdin("version\n")
        .assert()
        .success()
        .stdout(contains(format!("Dynaform {}", env!("CARGO_PKG_VERSION"))));
}
