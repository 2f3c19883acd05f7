use reportform::store::SqliteStore;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::tempdir;

const METADATA: &str = r#"
CREATE TABLE "@SS_PRM_CAB" ("Code" TEXT, "U_SS_IDRPT" TEXT, "U_SS_NOMBRPT" TEXT, "U_SS_IDDPT" TEXT);
CREATE TABLE "@SS_PRM_DET" (
    "Code" TEXT, "LineId" INTEGER, "U_SS_IDPARAM" TEXT, "U_SS_DSCPARAM" TEXT, "U_SS_TIPO" TEXT,
    "U_SS_OBLIGA" TEXT, "U_SS_QUERY" TEXT, "U_SS_DESC" TEXT, "U_SS_QUERYD" TEXT,
    "U_SS_ACTIVO" TEXT, "U_SS_TPPRM" TEXT
);
INSERT INTO "@SS_PRM_CAB" VALUES ('1', 'R001', 'Sales by date', 'FIN'), ('2', 'R002', 'Customer card', 'SALES');
INSERT INTO "@SS_PRM_DET" VALUES
    ('1', 1, 'P1', 'Posting date', 'DATE', 'Y', NULL, 'N', NULL, 'Y', NULL),
    ('2', 1, 'CardCode', 'Customer', 'TEXT', 'N', 'select Code from customers', 'Y',
        'select Name from customers where Code = ''filtro''', 'Y', NULL),
    ('2', 2, 'Legacy', '', 'TEXT', 'N', NULL, 'N', NULL, 'N', NULL);
"#;

fn run(home: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_reportform"))
        .args(args)
        .env("HOME", home)
        .output()
        .expect("run reportform")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

fn assert_ok(output: &Output) {
    assert!(
        output.status.success(),
        "stdout:\n{}\nstderr:\n{}",
        stdout(output),
        stderr(output)
    );
}

fn assert_err_contains(output: &Output, needle: &str) {
    assert!(
        !output.status.success(),
        "expected failure, stdout:\n{}\nstderr:\n{}",
        stdout(output),
        stderr(output)
    );
    let text = format!("{}{}", stdout(output), stderr(output));
    assert!(
        text.contains(needle),
        "expected error to contain `{needle}`, got:\n{text}"
    );
}

fn kv_lines(output: &Output) -> BTreeMap<String, String> {
    stdout(output)
        .lines()
        .filter_map(|line| line.split_once('='))
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn write_config(home: &Path, body: &str) {
    let dir = home.join(".reportform");
    fs::create_dir_all(&dir).expect("create config dir");
    fs::write(dir.join("config.yaml"), body).expect("write config");
}

fn seeded_home(home: &Path) -> PathBuf {
    let database = home.join("metadata.db");
    SqliteStore::open(&database)
        .expect("open database")
        .execute_batch(METADATA)
        .expect("seed metadata");

    let reports = home.join("reports");
    fs::create_dir_all(reports.join("sales")).expect("create reports dir");
    fs::write(reports.join("sales/R001 - Sales by date.rpt"), b"rpt").expect("write report");

    write_config(
        home,
        &format!(
            "reports_base_path: {}\ndatabase:\n  dialect: hana\n  sqlite_path: {}\n",
            reports.display(),
            database.display()
        ),
    );
    reports
}

#[test]
fn help_is_printed_without_configuration() {
    let temp = tempdir().expect("temp dir");
    for args in [&[][..], &["help"][..], &["--help"][..]] {
        let output = run(temp.path(), args);
        assert_ok(&output);
        let text = stdout(&output);
        assert!(text.contains("Commands:"));
        assert!(text.contains("params <report-code>"));
    }
}

#[test]
fn unknown_command_fails() {
    let temp = tempdir().expect("temp dir");
    assert_err_contains(&run(temp.path(), &["render"]), "unknown command `render`");
}

#[test]
fn reports_lists_every_report_or_one_department() {
    let temp = tempdir().expect("temp dir");
    seeded_home(temp.path());

    let output = run(temp.path(), &["reports"]);
    assert_ok(&output);
    let kv = kv_lines(&output);
    assert_eq!(kv.get("reports_total").map(String::as_str), Some("2"));
    assert_eq!(kv.get("report:R001").map(String::as_str), Some("Sales by date"));
    assert!(!kv.contains_key("department"));

    let output = run(temp.path(), &["reports", "--department", "SALES"]);
    assert_ok(&output);
    let kv = kv_lines(&output);
    assert_eq!(kv.get("reports_total").map(String::as_str), Some("1"));
    assert_eq!(kv.get("department").map(String::as_str), Some("SALES"));
    assert_eq!(kv.get("report:R002").map(String::as_str), Some("Customer card"));

    assert_err_contains(
        &run(temp.path(), &["reports", "--department"]),
        "missing value for `--department`",
    );
}

#[test]
fn params_shows_active_parameters() {
    let temp = tempdir().expect("temp dir");
    seeded_home(temp.path());

    let output = run(temp.path(), &["params", "R002"]);
    assert_ok(&output);
    let kv = kv_lines(&output);
    assert_eq!(kv.get("report").map(String::as_str), Some("R002"));
    assert_eq!(kv.get("parameters_total").map(String::as_str), Some("1"));
    assert_eq!(kv.get("parameter:1.id").map(String::as_str), Some("CardCode"));
    assert_eq!(kv.get("parameter:1.name").map(String::as_str), Some("Customer"));
    assert_eq!(kv.get("parameter:1.lookup").map(String::as_str), Some("true"));
    assert_eq!(kv.get("parameter:1.description").map(String::as_str), Some("true"));

    assert_err_contains(&run(temp.path(), &["params"]), "usage: params <report-code>");
}

#[test]
fn locate_resolves_report_files() {
    let temp = tempdir().expect("temp dir");
    let reports = seeded_home(temp.path());

    let output = run(temp.path(), &["locate", "R001", "Sales", "by", "date"]);
    assert_ok(&output);
    let kv = kv_lines(&output);
    assert_eq!(kv.get("report").map(String::as_str), Some("R001"));
    assert_eq!(
        kv.get("file").map(PathBuf::from),
        Some(reports.join("sales/R001 - Sales by date.rpt"))
    );

    assert_err_contains(&run(temp.path(), &["locate", "R002"]), "no report file found");
    assert_err_contains(&run(temp.path(), &["locate"]), "usage: locate");
}

#[test]
fn check_reports_healthy_setup() {
    let temp = tempdir().expect("temp dir");
    seeded_home(temp.path());

    let output = run(temp.path(), &["check"]);
    assert_ok(&output);
    let kv = kv_lines(&output);
    assert_eq!(kv.get("summary").map(String::as_str), Some("healthy"));
    assert_eq!(kv.get("checks_total").map(String::as_str), Some("5"));
    assert_eq!(kv.get("checks_failed").map(String::as_str), Some("0"));
    assert_eq!(kv.get("check:database.metadata").map(String::as_str), Some("ok"));
    assert_eq!(
        kv.get("check:database.metadata.detail").map(String::as_str),
        Some("dialect=hana reports=2")
    );
    assert!(temp.path().join(".reportform/logs").is_dir());
}

#[test]
fn check_flags_missing_database_and_reports_path() {
    let temp = tempdir().expect("temp dir");
    write_config(
        temp.path(),
        &format!(
            "reports_base_path: {}\n",
            temp.path().join("missing").display()
        ),
    );

    let output = run(temp.path(), &["check"]);
    assert_ok(&output);
    let kv = kv_lines(&output);
    assert_eq!(kv.get("summary").map(String::as_str), Some("unhealthy"));
    assert_eq!(kv.get("checks_failed").map(String::as_str), Some("2"));
    assert_eq!(kv.get("check:reports.path").map(String::as_str), Some("fail"));
    assert_eq!(kv.get("check:database.metadata").map(String::as_str), Some("fail"));
    assert!(kv
        .get("check:database.metadata.remediation")
        .is_some_and(|value| value.contains("sqlite_path")));
}

#[test]
fn check_reports_unparseable_config() {
    let temp = tempdir().expect("temp dir");
    write_config(temp.path(), "database:\n  port: 30015\n");

    let output = run(temp.path(), &["check"]);
    assert_ok(&output);
    let kv = kv_lines(&output);
    assert_eq!(kv.get("summary").map(String::as_str), Some("unhealthy"));
    assert_eq!(kv.get("check:config.path").map(String::as_str), Some("ok"));
    assert_eq!(kv.get("check:config.parse").map(String::as_str), Some("fail"));
}

#[test]
fn data_commands_need_a_configured_database() {
    let temp = tempdir().expect("temp dir");
    write_config(temp.path(), "reports_base_path: /srv/reports\n");
    assert_err_contains(
        &run(temp.path(), &["reports"]),
        "database.sqlite_path is not configured",
    );
    assert_err_contains(
        &run(temp.path(), &["params", "R001"]),
        "database.sqlite_path is not configured",
    );
}

#[test]
fn missing_config_file_is_reported() {
    let temp = tempdir().expect("temp dir");
    assert_err_contains(&run(temp.path(), &["reports"]), "config.yaml");
}
