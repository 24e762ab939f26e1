#![allow(dead_code)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub struct TestEnv {
    _tmp: TempDir,
    pub home: PathBuf,
    pub site: PathBuf,
    pub page: PathBuf,
    cargo_home: PathBuf,
    rustup_home: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let home = tmp.path().join("home");
        fs::create_dir_all(&home).expect("create isolated home");

        let site = make_fixture_site(tmp.path());
        let page = site.join("page.json");

        let orig_home = std::env::var("HOME").unwrap_or_default();
        let cargo_home = PathBuf::from(&orig_home).join(".cargo");
        let rustup_home = PathBuf::from(&orig_home).join(".rustup");

        Self {
            _tmp: tmp,
            home,
            site,
            page,
            cargo_home,
            rustup_home,
        }
    }

    pub fn cmd(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("dictsite");
        cmd.env("HOME", &self.home)
            .env("CARGO_HOME", &self.cargo_home)
            .env("RUSTUP_HOME", &self.rustup_home)
            .env_remove("DICTSITE_LOG")
            .env_remove("RUST_LOG");
        cmd
    }

    pub fn site_arg(&self) -> &str {
        self.site.to_str().expect("site path utf8")
    }

    pub fn page_arg(&self) -> &str {
        self.page.to_str().expect("page path utf8")
    }

    pub fn run_json(&self, args: &[&str]) -> Value {
        let mut cmd = self.cmd();
        let out = cmd
            .arg("--json")
            .args(args)
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        serde_json::from_slice(&out).expect("valid json output")
    }

    pub fn run_json_site(&self, args: &[&str]) -> Value {
        let mut cmd = self.cmd();
        let out = cmd
            .arg("--json")
            .arg("--base-url")
            .arg(self.site_arg())
            .args(args)
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        serde_json::from_slice(&out).expect("valid json output")
    }

    /// Runs `session` with `input` piped to stdin and returns one JSON value per output line.
    pub fn run_session(&self, input: &str) -> Vec<Value> {
        let mut cmd = self.cmd();
        let out = cmd
            .arg("--json")
            .arg("--base-url")
            .arg(self.site_arg())
            .args(["session", "--page", self.page_arg()])
            .write_stdin(input)
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        String::from_utf8(out)
            .expect("utf8 output")
            .lines()
            .map(|l| serde_json::from_str(l).expect("json line"))
            .collect()
    }

    pub fn write_config(&self, body: &str) {
        let dir = self.home.join(".config/dictsite");
        fs::create_dir_all(&dir).expect("create config dir");
        fs::write(dir.join("config.toml"), body).expect("write config");
    }

    pub fn write_page(&self, name: &str, page: &Value) -> PathBuf {
        let path = self.site.join(name);
        fs::write(&path, serde_json::to_string_pretty(page).expect("serialize page"))
            .expect("write page");
        path
    }
}

pub fn fixture_index() -> Value {
    let mut entries = vec![
        json!({
            "title": "Invoice",
            "section": "Objects",
            "category": "Business Object",
            "content": "An invoice records billable amounts for a flight.",
            "status": "active",
            "permalink": "/objects/invoice/"
        }),
        json!({
            "title": "Invoice Line",
            "section": "Objects",
            "category": "Business Object",
            "content": "One billable position.",
            "status": "draft",
            "permalink": "/objects/invoice-line/"
        }),
        json!({
            "title": "<script>alert(1)</script>",
            "section": "Views",
            "category": "UI View",
            "content": "Tom & Jerry's \"quoted\" view",
            "status": "active",
            "permalink": "/views/escape-check/"
        }),
    ];
    for n in 1..=12 {
        entries.push(json!({
            "title": format!("Widget {:02}", n),
            "section": "Perspectives",
            "category": "Perspective",
            "content": "A gadget perspective.",
            "status": "active",
            "permalink": format!("/perspectives/widget-{:02}/", n)
        }));
    }
    Value::Array(entries)
}

pub fn fixture_page() -> Value {
    json!({
        "search_mounts": ["page", "navbar"],
        "filter": {
            "search_input": true,
            "selects": ["status", "category", "data_type"],
            "cards": [
                {"title": "Invoice", "category": "Business Object", "badge": "Active"},
                {"title": "Crew Roster", "category": "UI View", "badge": "Draft"},
                null,
                {"title": "Flight Plan", "category": "Perspective", "badge": " Deprecated "},
                {"title": "Region Code", "category": "Global Attribute", "badge": "Active"}
            ]
        },
        "roles": {
            "buttons": [
                {"role": "Captain"},
                {"role": "all", "default": true},
                {"role": "Ops Manager"},
                {"role": "Pilot"}
            ],
            "attributes": [
                {"name": "Base Fare"},
                {"name": "Crew Notes", "condition": "userRole == 'Captain' or userRole == 'First Officer'"},
                {"name": "Budget", "condition": "position == 'Manager'"}
            ],
            "actions": [
                {"name": "Approve", "condition": "userRole == 'Ops Manager'"},
                {"name": "Board", "condition": ""}
            ]
        }
    })
}

fn make_fixture_site(base: &Path) -> PathBuf {
    let site = base.join("site");
    fs::create_dir_all(&site).expect("create site dir");
    fs::write(
        site.join("index.json"),
        serde_json::to_string_pretty(&fixture_index()).expect("serialize index"),
    )
    .expect("write index");
    fs::write(
        site.join("page.json"),
        serde_json::to_string_pretty(&fixture_page()).expect("serialize page"),
    )
    .expect("write page");
    site
}
