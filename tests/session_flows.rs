mod common;

use common::TestEnv;
use serde_json::{json, Value};

fn of_widget<'a>(lines: &'a [Value], widget: &str) -> Vec<&'a Value> {
    lines.iter().filter(|l| l["widget"] == widget).collect()
}

#[test]
fn session_starts_with_initial_role_report() {
    let env = TestEnv::new();
    let lines = env.run_session("");
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["widget"], "roles");
    assert_eq!(lines[0]["active_role"], "all");
}

#[test]
fn search_burst_fires_once_with_last_value() {
    let env = TestEnv::new();
    let lines = env.run_session("search.page i\nsearch.page inv\nsearch.page invoice\n");
    let searches = of_widget(&lines, "search");
    assert_eq!(searches.len(), 1);
    assert_eq!(searches[0]["query"], "invoice");
    assert_eq!(searches[0]["placement"], "page");
    assert_eq!(searches[0]["results"].as_array().unwrap().len(), 2);
}

#[test]
fn filter_search_is_debounced() {
    let env = TestEnv::new();
    let lines = env.run_session("filter.search c\nfilter.search crew\n");
    let filters = of_widget(&lines, "filter");
    assert_eq!(filters.len(), 1);
    assert_eq!(filters[0]["visible_count"], 1);
}

#[test]
fn selects_apply_immediately_and_reset_restores() {
    let env = TestEnv::new();
    let lines = env.run_session("filter.status 1\nfilter.category 2\nfilter.reset\n");
    let filters = of_widget(&lines, "filter");
    let summary: Vec<(u64, &str)> = filters
        .iter()
        .map(|f| {
            (
                f["visible_count"].as_u64().unwrap(),
                f["no_results_panel"].as_str().unwrap(),
            )
        })
        .collect();
    assert_eq!(
        summary,
        vec![(2, "unchanged"), (0, "inserted"), (4, "hidden")]
    );
}

#[test]
fn outside_click_closes_open_navbar_panel_once() {
    let env = TestEnv::new();
    env.write_config("[search]\ndebounce_ms = 0\n");
    let lines = env.run_session(
        "search.navbar inv\nclick inside\nclick outside\nclick outside\n",
    );
    let searches = of_widget(&lines, "search");
    assert_eq!(searches.len(), 1);
    assert_eq!(searches[0]["panel"], "shown");
    let closed = of_widget(&lines, "panel_closed");
    assert_eq!(closed.len(), 1);
    assert_eq!(closed[0]["placement"], "navbar");
}

#[test]
fn bad_lines_and_unknown_roles_are_skipped() {
    let env = TestEnv::new();
    let lines = env.run_session("# replay\nscroll up\nrole Purser\nrole Pilot\n");
    let roles = of_widget(&lines, "roles");
    assert_eq!(roles.len(), 2);
    assert_eq!(roles[1]["active_role"], "Pilot");
    assert_eq!(roles[1]["counters"]["attributes_visible"], 1);
}

#[test]
fn widgets_missing_from_page_stay_inert() {
    let env = TestEnv::new();
    let page = env.write_page("plain.json", &json!({}));
    let out = env
        .cmd()
        .args(["--json", "session", "--page", page.to_str().unwrap()])
        .write_stdin("search.page invoice\nfilter.search x\nrole Pilot\nclick outside\n")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    assert!(out.is_empty());
}

#[test]
fn text_mode_prints_tab_separated_updates() {
    let env = TestEnv::new();
    let out = env
        .cmd()
        .args(["--base-url", env.site_arg(), "session", "--page", env.page_arg()])
        .write_stdin("filter.type draft\n")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("roles\tall\tShowing all attributes (all roles)"));
    assert!(text.contains("filter\tvisible 1/4\tpanel Unchanged"));
}

#[test]
fn invalid_utf8_line_is_skipped_not_fatal() {
    let env = TestEnv::new();
    let input: &[u8] = b"filter.status 1\nfilter.search \xff\xfe\nfilter.status 2\n";
    let assert = env
        .cmd()
        .args(["--json", "--base-url", env.site_arg(), "session", "--page", env.page_arg()])
        .write_stdin(input)
        .assert()
        .success();
    let output = assert.get_output();
    let lines: Vec<Value> = String::from_utf8(output.stdout.clone())
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    let filters = of_widget(&lines, "filter");
    assert_eq!(filters.len(), 2);
    assert_eq!(filters[1]["visible_count"], 1);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("not UTF-8"));
}
