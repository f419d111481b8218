use predicates::prelude::*;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

fn cmd() -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::from(Command::new(env!("CARGO_BIN_EXE_cty-conditions-doc")));
    cmd.env_remove("CTY_DOC_LOG");
    cmd
}

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

const CONDITIONS_GO: &str = r#"package v1

const (
	// Widget is operational
	// and serving traffic.
	// +cty:condition:for=Widget
	WidgetReady ConditionType = "Ready"
)
"#;

const REASONS_GO: &str = r#"package v1

const (
	// +cty:reason:for=Widget/Ready
	// - creation failed
	// - validation failed
	ReasonFailed = "Failed"

	// Waiting for dependencies.
	// +cty:reason:for=Widget/Ready
	ReasonPending = "Pending"
)
"#;

const PAGE: &str = r#"<!DOCTYPE html>
<html>
<head><title>Docs</title></head>
<body>
<div class="content"><h1>Reference</h1></div>
</body>
</html>
"#;

fn widget_tree() -> TempDir {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "api/v1/conditions.go", CONDITIONS_GO);
    write(dir.path(), "api/v1/reasons.go", REASONS_GO);
    write(dir.path(), "site/index.html", PAGE);
    dir
}

// -- injection --

#[test]
fn injects_into_document() {
    let dir = widget_tree();
    let index = dir.path().join("site/index.html");

    cmd()
        .arg("--path")
        .arg(dir.path().join("api"))
        .arg("--inject-into")
        .arg(&index)
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::is_empty());

    let html = fs::read_to_string(&index).unwrap();
    assert!(html.starts_with("<!DOCTYPE html>\n<html>\n<head><title>Docs</title></head>"));
    assert!(html.contains("<div class=\"content\"><h1>Reference</h1>\n<div class=\"card\">"));
    assert!(html.contains("<strong>Conditions Reference</strong>"));
    assert!(html.contains(r#"id="reasons-widget-ready""#));
    assert!(html.contains("<p>Widget is operational and serving traffic.</p>"));
    assert!(html.contains("<ul>\n<li>creation failed</li>\n<li>validation failed</li>\n</ul>"));
    assert!(html.contains("<p>Waiting for dependencies.</p>"));

    let failed = html.find(">Failed<").unwrap();
    let pending = html.find(">Pending<").unwrap();
    assert!(failed < pending);
}

#[test]
fn missing_container_leaves_document_untouched() {
    let dir = widget_tree();
    let index = dir.path().join("site/index.html");
    let page = "<html><body><main>no container</main></body></html>";
    fs::write(&index, page).unwrap();

    cmd()
        .arg("--path")
        .arg(dir.path().join("api"))
        .arg("--inject-into")
        .arg(&index)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("div.content"));

    assert_eq!(fs::read_to_string(&index).unwrap(), page);
}

#[test]
fn unclosed_container_leaves_document_untouched() {
    let dir = widget_tree();
    let index = dir.path().join("site/index.html");
    let page = r#"<html><body><div class="content"><p>open"#;
    fs::write(&index, page).unwrap();

    cmd()
        .arg("--path")
        .arg(dir.path().join("api"))
        .arg("--inject-into")
        .arg(&index)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("has no end tag"));

    assert_eq!(fs::read_to_string(&index).unwrap(), page);
}

#[test]
fn custom_selector_and_title() {
    let dir = widget_tree();
    let index = dir.path().join("site/index.html");
    fs::write(&index, r#"<main id="docs"></main>"#).unwrap();

    cmd()
        .arg("--path")
        .arg(dir.path().join("api"))
        .arg("--inject-into")
        .arg(&index)
        .args(["--selector", "main#docs", "--title", "Widget States"])
        .assert()
        .success();

    let html = fs::read_to_string(&index).unwrap();
    assert!(html.starts_with(r#"<main id="docs">"#));
    assert!(html.ends_with("</main>"));
    assert!(html.contains("<strong>Widget States</strong>"));
}

#[test]
fn missing_target_document_fails() {
    let dir = widget_tree();
    cmd()
        .arg("--path")
        .arg(dir.path().join("api"))
        .arg("--inject-into")
        .arg(dir.path().join("nope.html"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("nope.html"));
}

// -- print mode --

#[test]
fn print_writes_fragment_to_stdout() {
    let dir = widget_tree();
    cmd()
        .arg("--path")
        .arg(dir.path().join("api"))
        .arg("--print")
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"id="conditions-widget""#))
        .stdout(predicate::str::contains(">Pending<"));

    // the document is not touched in print mode
    assert_eq!(fs::read_to_string(dir.path().join("site/index.html")).unwrap(), PAGE);
}

#[test]
fn empty_tree_renders_fallback() {
    let dir = TempDir::new().unwrap();
    cmd()
        .arg("--path")
        .arg(dir.path())
        .arg("--print")
        .assert()
        .success()
        .stdout(predicate::str::contains("No conditions found."));
}

#[test]
fn reason_without_condition_creates_placeholder() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "reasons.go",
        "// +cty:reason:for=Gadget/Synced\nconst ReasonStale = \"Stale\"\n",
    );
    cmd()
        .arg("--path")
        .arg(dir.path())
        .arg("--print")
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"id="reasons-gadget-synced""#))
        .stdout(predicate::str::contains(">Stale<"));
}

// -- discovery --

#[test]
fn skips_tests_vendor_and_excluded_paths() {
    let dir = widget_tree();
    let api = dir.path().join("api");
    let tagged = |value: &str| {
        format!("// +cty:condition:for=Hidden\nconst Hidden{value} = \"{value}\"\n")
    };
    write(&api, "v1/widget_test.go", &tagged("FromTest"));
    write(&api, "vendor/dep/dep.go", &tagged("FromVendor"));
    write(&api, ".cache/gen.go", &tagged("FromHidden"));
    write(&api, "generated/zz.go", &tagged("FromExcluded"));

    cmd()
        .arg("--path")
        .arg(&api)
        .args(["--exclude", "generated", "--print"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Hidden").not())
        .stdout(predicate::str::contains(">Ready<"));
}

#[test]
fn invalid_exclude_pattern_fails() {
    let dir = widget_tree();
    cmd()
        .arg("--path")
        .arg(dir.path().join("api"))
        .args(["--exclude", "[", "--print"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid exclude pattern"));
}

// -- errors --

#[test]
fn malformed_tag_reports_file_and_line() {
    let dir = widget_tree();
    let index = dir.path().join("site/index.html");
    write(
        dir.path(),
        "api/v1/broken.go",
        "package v1\n\n// +cty:reason:for=Widget\nconst ReasonBroken = \"Broken\"\n",
    );

    cmd()
        .arg("--path")
        .arg(dir.path().join("api"))
        .arg("--inject-into")
        .arg(&index)
        .assert()
        .failure()
        .stderr(predicate::str::contains("broken.go:3"))
        .stderr(predicate::str::contains("<Resource>/<Condition>"));

    assert_eq!(fs::read_to_string(&index).unwrap(), PAGE);
}

#[test]
fn dangling_tag_is_an_error() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "end.go", "package v1\n\n// +cty:condition:for=Widget\n");
    cmd()
        .arg("--path")
        .arg(dir.path())
        .arg("--print")
        .assert()
        .failure()
        .stderr(predicate::str::contains("end.go:3"))
        .stderr(predicate::str::contains("could not find a declaration"));
}

// -- templates --

#[test]
fn template_directory_overrides_builtins() {
    let dir = widget_tree();
    let templates = dir.path().join("templates");
    write(&templates, "reason.html", "<li class=\"reason\">{{name}}</li>");

    cmd()
        .arg("--path")
        .arg(dir.path().join("api"))
        .arg("--templates")
        .arg(&templates)
        .arg("--print")
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"<li class="reason">Failed</li>"#))
        .stdout(predicate::str::contains("<strong>Conditions Reference</strong>"));
}

// -- logging --

#[test]
fn log_filter_enables_diagnostics() {
    let dir = widget_tree();
    cmd()
        .env("CTY_DOC_LOG", "info")
        .arg("--path")
        .arg(dir.path().join("api"))
        .arg("--print")
        .assert()
        .success()
        .stderr(predicate::str::contains("scan complete"));
}
