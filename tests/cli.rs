mod common;

use common::TestEnv;
use predicates::prelude::*;
use predicates::str::contains;

#[test]
fn validate_index() {
    let env = TestEnv::new();
    env.cmd()
        .args(["--base-url", env.site_arg(), "validate"])
        .assert()
        .success()
        .stdout(contains("index valid: 15 entries"));
}

#[test]
fn search_text_lists_title_and_permalink() {
    let env = TestEnv::new();
    env.cmd()
        .args(["--base-url", env.site_arg(), "search", "invoice"])
        .assert()
        .success()
        .stdout(contains("Invoice\tBusiness Object\tObjects\t/objects/invoice/"))
        .stdout(contains("/objects/invoice-line/"));
}

#[test]
fn search_html_escapes_index_text() {
    let env = TestEnv::new();
    env.cmd()
        .args(["--base-url", env.site_arg(), "search", "script", "--html"])
        .assert()
        .success()
        .stdout(contains("&lt;script&gt;alert(1)&lt;/script&gt;"))
        .stdout(contains("Tom &amp; Jerry&#039;s &quot;quoted&quot;"))
        .stdout(contains("<script>").not());
}

#[test]
fn search_without_matches_says_so() {
    let env = TestEnv::new();
    env.cmd()
        .args(["--base-url", env.site_arg(), "search", "zzzz"])
        .assert()
        .success()
        .stdout(contains("No results found"));
}

#[test]
fn filter_prints_no_results_panel_markup() {
    let env = TestEnv::new();
    env.cmd()
        .args([
            "filter",
            "--page",
            env.page_arg(),
            "--search",
            "nothing-like-this",
            "--html",
        ])
        .assert()
        .success()
        .stdout(contains("visible: 0/4"))
        .stdout(contains("reset-filters-btn"));
}

#[test]
fn roles_text_shows_info_lines() {
    let env = TestEnv::new();
    env.cmd()
        .args(["roles", "--page", env.page_arg(), "--role", "Pilot"])
        .assert()
        .success()
        .stdout(contains("Showing 1 attribute(s) for role: Pilot"))
        .stdout(contains("Showing 1 action(s) for role: Pilot"));
}

#[test]
fn errors_go_to_stderr_with_code() {
    let env = TestEnv::new();
    env.cmd()
        .args(["roles", "--page", env.page_arg(), "--role", "Purser"])
        .assert()
        .failure()
        .stderr(contains("error [ROLE_NOT_FOUND]"));
}
