use predicates::prelude::*;

mod common;

#[test]
fn test_check_lists_pinned_images_without_touching_the_engine() {
    let ctx = common::context();
    let pinned = ctx.write_stack("pinned", "services:\n  web:\n    image: nginx:1.25\n");
    ctx.write_stack("floating", "services:\n  web:\n    image: nginx:latest\n");
    // A failing engine proves check never calls it
    ctx.fail_step(&pinned, "pull");

    ctx.check_cmd()
        .assert()
        .success()
        .stdout(predicate::str::contains("pinned - not latest: nginx:1.25"))
        .stdout(predicate::str::contains("floating - not latest: All latest"));
}

#[test]
fn test_check_reports_parse_sentinel() {
    let ctx = common::context();
    ctx.write_stack("broken", "services:\n  web: [unclosed\n");

    ctx.check_cmd()
        .assert()
        .success()
        .stdout(predicate::str::contains("broken - not latest: Could not parse"));
}

#[test]
fn test_check_on_empty_tree_prints_nothing() {
    let ctx = common::context();

    ctx.check_cmd().assert().success().stdout(predicate::str::is_empty());
}

#[test]
fn test_help_names_both_subcommands() {
    let ctx = common::context();

    ctx.cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("run"))
        .stdout(predicate::str::contains("check"));
}
