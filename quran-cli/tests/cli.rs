use std::fs;
use std::path::Path;

use assert_cmd::Command;
use tempfile::{tempdir, TempDir};

struct Sandbox {
    dir: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        Self {
            dir: tempdir().unwrap(),
        }
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    fn quran(&self) -> Command {
        let mut cmd = Command::cargo_bin("quran").unwrap();
        cmd.env("HOME", self.path())
            .env("XDG_DATA_HOME", self.path().join("data"))
            .env("XDG_CONFIG_HOME", self.path().join("config"))
            .env_remove("RUST_LOG")
            .arg("--config")
            .arg(self.path().join("config.toml"))
            .arg("--notes")
            .arg(self.path().join("notes.json"));
        cmd
    }

    fn stdout(&self, args: &[&str]) -> String {
        let output = self.quran().args(args).output().unwrap();
        assert!(
            output.status.success(),
            "quran {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8(output.stdout).unwrap()
    }

    fn json(&self, args: &[&str]) -> serde_json::Value {
        let mut all = vec!["--json"];
        all.extend_from_slice(args);
        serde_json::from_str(&self.stdout(&all)).unwrap()
    }
}

#[test]
fn verse_reports_its_partitions() {
    let sandbox = Sandbox::new();
    let info = sandbox.json(&["verse", "2:255"]);
    assert_eq!(info["page"], 42);
    assert_eq!(info["juz"], 3);
    assert_eq!(info["hizb"], 5);
    assert_eq!(info["quarter"], 17);
}

#[test]
fn page_lists_its_verse_bounds() {
    let sandbox = Sandbox::new();
    let text = sandbox.stdout(&["page", "2"]);
    assert!(text.contains("verses: 2:1-2:5"), "{text}");

    let last = sandbox.json(&["page", "604"]);
    assert_eq!(last["last"], "114:6");
    assert_eq!(last["juz"], 30);
}

#[test]
fn sura_nine_has_no_besmallah() {
    let sandbox = Sandbox::new();
    let info = sandbox.json(&["sura", "9"]);
    assert_eq!(info["besmallah"], false);
    assert_eq!(info["makki"], false);
    assert_eq!(info["verses"], 129);
}

#[test]
fn out_of_range_numbers_fail() {
    let sandbox = Sandbox::new();
    sandbox.quran().args(["sura", "115"]).assert().failure();
    sandbox.quran().args(["verse", "1:8"]).assert().failure();
    sandbox.quran().args(["juz", "0"]).assert().failure();
}

#[test]
fn select_normalizes_backward_ranges() {
    let sandbox = Sandbox::new();
    let text = sandbox.stdout(&["select", "2:2", "1:6"]);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines, vec!["1:6", "1:7", "2:1", "2:2"]);
}

#[test]
fn last_ayah_follows_scope_and_config() {
    let sandbox = Sandbox::new();
    assert_eq!(sandbox.stdout(&["last-ayah", "2:142"]).trim(), "2:252");
    assert_eq!(
        sandbox
            .stdout(&["last-ayah", "2:142", "--scope", "sura"])
            .trim(),
        "2:286"
    );

    fs::write(sandbox.path().join("config.toml"), "audio_end = \"page\"\n").unwrap();
    assert_eq!(sandbox.stdout(&["last-ayah", "1:1"]).trim(), "1:7");
}

#[test]
fn notes_persist_between_runs() {
    let sandbox = Sandbox::new();
    let added = sandbox.json(&["note", "add", "2:1", "2:3", "--color", "green", "--text", "alif lam mim"]);
    assert_eq!(added["color"], "green");
    assert_eq!(added["verses"].as_array().unwrap().len(), 3);

    let listed = sandbox.json(&["note", "list"]);
    assert_eq!(listed.as_array().unwrap().len(), 1);
    assert_eq!(listed[0]["id"], added["id"]);

    sandbox
        .quran()
        .args(["note", "remove", "2:2"])
        .assert()
        .failure();
    assert_eq!(sandbox.json(&["note", "list"]).as_array().unwrap().len(), 1);

    let removed = sandbox.stdout(&["note", "remove", "2:2", "--yes"]);
    assert!(removed.contains("removed 1 notes"));
    assert!(sandbox.json(&["note", "list"]).as_array().unwrap().is_empty());
}

#[test]
fn decorate_merges_line_frames_and_applies_precedence() {
    let sandbox = Sandbox::new();
    let frames = serde_json::json!([
        {"sura": 2, "ayah": 1, "word": 1, "line": 1, "min_x": 0.0, "min_y": 0.0, "max_x": 10.0, "max_y": 10.0},
        {"sura": 2, "ayah": 2, "word": 1, "line": 1, "min_x": 12.0, "min_y": 0.0, "max_x": 20.0, "max_y": 10.0},
        {"sura": 2, "ayah": 2, "word": 2, "line": 1, "min_x": 22.0, "min_y": 0.0, "max_x": 30.0, "max_y": 10.0},
        {"sura": 2, "ayah": 2, "word": 3, "line": 2, "min_x": 0.0, "min_y": 12.0, "max_x": 10.0, "max_y": 22.0}
    ]);
    let frames_path = sandbox.path().join("frames.json");
    fs::write(&frames_path, frames.to_string()).unwrap();
    let frames_arg = frames_path.to_str().unwrap();

    sandbox.stdout(&["note", "add", "2:1", "--color", "red"]);

    let rows = sandbox.json(&[
        "decorate", "--page", "2", "--frames", frames_arg, "--reading", "2:2", "--share", "2:1",
    ]);
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0]["verse"], "2:1");
    assert_eq!(rows[0]["color"], "share");
    assert_eq!(rows[1]["color"], "reading");
    assert_eq!(rows[1]["rect"]["min_x"], 12.0);
    assert_eq!(rows[1]["rect"]["max_x"], 30.0);

    let words = sandbox.json(&["decorate", "--page", "2", "--frames", frames_arg, "--words"]);
    let words = words.as_array().unwrap();
    assert_eq!(words.len(), 1);
    assert_eq!(words[0]["color"]["note"], "red");
    assert_eq!(words[0]["word"], 1);
}
