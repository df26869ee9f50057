use std::fs;
use std::path::Path;
use std::process::Command;

const METADATA: &str = r#"{"chromosomes": [
    {"id": "Chr1", "name": "Chr 1", "size": 30427671,
     "centromeres": [{"id": "CEN1", "start": 15086046, "end": 15087045}]},
    {"id": "ChrC", "name": "Chr C", "size": 154478}
]}"#;

const ANNOTATIONS: &str = "\
##gff-version 3
Chr1\tTAIR10\tgene\t15183000\t15184000\t.\t+\t.\tID=AT1G40230
Chr1\tTAIR10\tgene\t15200000\t15201500\t.\t-\t.\tID=AT1G40240;Name=CYP71
";

fn chromoview(args: &[&str], dir: &Path) -> (bool, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_chromoview"))
        .args(args)
        .current_dir(dir)
        .output()
        .expect("run chromoview");
    (output.status.success(), String::from_utf8_lossy(&output.stdout).into_owned())
}

#[test]
fn bands_prints_json() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("tair10.json"), METADATA).unwrap();

    let (ok, stdout) = chromoview(&["bands", "--chromosomes", "tair10.json", "--id", "Chr1"], dir.path());
    assert!(ok);
    let reports: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(reports[0]["id"], "Chr1");
    assert_eq!(reports[0]["bands"].as_array().unwrap().len(), 3);
}

#[test]
fn locate_lists_overlapping_genes() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("tair10.json"), METADATA).unwrap();
    fs::write(dir.path().join("genes.gff3"), ANNOTATIONS).unwrap();

    let (ok, stdout) = chromoview(
        &[
            "locate", "--chromosomes", "tair10.json", "--genes", "genes.gff3",
            "--id", "Chr1", "--y", "250", "--height", "500",
        ],
        dir.path(),
    );
    assert!(ok);
    assert!(stdout.starts_with("Chr1:15,183,347-15,244,324\t2 elements"), "{}", stdout);
    assert!(stdout.contains("CYP71"));
}

#[test]
fn unknown_chromosome_fails() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("tair10.json"), METADATA).unwrap();
    let (ok, _) = chromoview(&["bands", "--chromosomes", "tair10.json", "--id", "Chr9"], dir.path());
    assert!(!ok);
}

#[test]
fn render_writes_svg() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("tair10.json"), METADATA).unwrap();
    let (ok, _) = chromoview(
        &["render", "--chromosomes", "tair10.json", "--output", "out.svg", "--select", "Chr1:1-1000"],
        dir.path(),
    );
    assert!(ok);
    let svg = fs::read_to_string(dir.path().join("out.svg")).unwrap();
    assert!(svg.contains("hit-region"));
    assert!(svg.contains("class=\"selection\""));
}

#[test]
fn render_bounds_selection_to_chromosome() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("tair10.json"), METADATA).unwrap();
    let (ok, _) = chromoview(
        &["render", "--chromosomes", "tair10.json", "--output", "out.svg", "--select", "ChrC:100000-900000000"],
        dir.path(),
    );
    assert!(ok);
    let svg = fs::read_to_string(dir.path().join("out.svg")).unwrap();
    assert!(svg.contains("100,000-154,478"));
    assert!(!svg.contains("900,000,000"));
}

#[test]
fn config_writes_loadable_toml() {
    let dir = tempfile::tempdir().unwrap();
    let (ok, _) = chromoview(&["config", "--output", "custom.toml"], dir.path());
    assert!(ok);
    let written = fs::read_to_string(dir.path().join("custom.toml")).unwrap();
    assert!(written.contains("[viewport]"));

    fs::write(dir.path().join("tair10.json"), METADATA).unwrap();
    let (ok, _) = chromoview(
        &["bands", "--config", "custom.toml", "--chromosomes", "tair10.json"],
        dir.path(),
    );
    assert!(ok);
}

#[test]
fn replay_settles_nudge() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("tair10.json"), METADATA).unwrap();
    fs::write(
        dir.path().join("events.json"),
        r#"[{"type": "tick", "ms": 1000}, {"type": "dismiss"}]"#,
    )
    .unwrap();

    let (ok, stdout) = chromoview(
        &["replay", "--chromosomes", "tair10.json", "--events", "events.json"],
        dir.path(),
    );
    assert!(ok);
    assert!(stdout.contains("[0] nudge settled -> (300.0, 150.0) zoom 0.700"), "{}", stdout);
    assert!(stdout.contains("\"dZoom\": 0.7"));
}
