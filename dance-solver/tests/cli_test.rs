#![cfg(test)]

mod helpers;

use helpers::instance_path;
use helpers::run_solver;
use helpers::temporary_instance;

#[test]
fn text_report_lists_the_performed_dance() {
    let run = run_solver(instance_path("strip_the_willow"), std::iter::empty());
    assert!(run.success);

    let lines = run.stdout.lines().collect::<Vec<_>>();
    assert_eq!(lines.len(), 5, "unexpected report:\n{}", run.stdout);
    assert_eq!(lines[0], "Strip the Willow");
    assert_eq!(lines[1], "First man: Alex");
    assert!(
        lines[2..4] == ["First woman: Sam", "Second man: Jo"]
            || lines[2..4] == ["First woman: Jo", "Second man: Sam"],
        "unexpected middle positions:\n{}",
        run.stdout
    );
    assert_eq!(lines[4], "Second woman: Kim");
    assert!(!run.stdout.contains("Dashing White Sergeant"));
}

#[test]
fn json_report_holds_status_and_assignments() {
    let run = run_solver(instance_path("strip_the_willow"), ["--json"]);
    assert!(run.success);

    let report: serde_json::Value = serde_json::from_str(&run.stdout).unwrap();
    assert_eq!(report["status"], "optimal");
    assert_eq!(report["num_assignments"], 4);
    assert_eq!(report["dances"][0]["dance"], 9);
    assert_eq!(report["dances"][0]["performed"], true);
    assert_eq!(report["dances"][0]["assignments"][0]["dancer"], 3);
    assert_eq!(report["dances"][1]["performed"], false);
    assert_eq!(report["diagnostics"]["yes_count"], 1);
}

#[test]
fn active_dancers_are_listed() {
    let run = run_solver(instance_path("strip_the_willow"), ["--list-active-dancers"]);
    assert!(run.success);

    assert_eq!(run.stdout, "Alex, Sam, Jo, Kim\n");
}

#[test]
fn dances_are_listed_with_willing_dancers() {
    let run = run_solver(instance_path("strip_the_willow"), ["--list-dances"]);
    assert!(run.success);

    let lines = run.stdout.lines().collect::<Vec<_>>();
    assert_eq!(lines.len(), 12, "unexpected listing:\n{}", run.stdout);
    assert_eq!(lines[0], "Dance: Strip the Willow");
    assert_eq!(lines[1], " First man: Jo (maybe), Alex (yes), Pat (favourite)");
    assert_eq!(lines[2], " First woman: Jo (maybe), Alex (maybe), Sam (maybe)");
    assert_eq!(lines[4], " Second woman: Jo (maybe), Alex (yes), Kim (maybe)");
    assert_eq!(lines[5], "Dance: Dashing White Sergeant");
    assert_eq!(lines[6], " position 0: Jo (maybe)");
    assert!(!run.stdout.contains("Kim (no)"));
}

#[test]
fn too_few_available_dancers_dance_nothing() {
    let run = run_solver(
        instance_path("strip_the_willow"),
        ["--dancer", "Alex", "--dancer", "Jo"],
    );
    assert!(run.success);

    assert_eq!(run.stdout, "Can't dance any dances\n");
}

#[test]
fn unknown_dancers_are_an_error() {
    let run = run_solver(instance_path("strip_the_willow"), ["--dancer", "Nobody"]);

    assert!(!run.success);
    assert!(run.stdout.is_empty());
}

#[test]
fn malformed_instances_are_an_error() {
    let path = temporary_instance("malformed", r#"{ "dancers": [{ "id": "three" }] }"#);

    let run = run_solver(&path, std::iter::empty());
    std::fs::remove_file(path).unwrap();

    assert!(!run.success);
}

#[test]
fn limits_are_accepted() {
    let run = run_solver(
        instance_path("strip_the_willow"),
        ["--time-limit", "60000", "--decision-limit", "100000", "--json"],
    );
    assert!(run.success);

    let report: serde_json::Value = serde_json::from_str(&run.stdout).unwrap();
    assert!(report["status"] == "optimal" || report["status"] == "feasible");
}
