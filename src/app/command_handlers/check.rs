use crate::app::command_support::{load_settings, map_config_err, open_store};
use crate::config::{default_global_config_path, Settings};
use crate::metadata::reports_statement;
use crate::store::DataStore;
use std::fs;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Debug, Clone)]
struct CheckFinding {
    id: String,
    ok: bool,
    detail: String,
    remediation: String,
}

fn finding(
    id: impl Into<String>,
    ok: bool,
    detail: impl Into<String>,
    remediation: impl Into<String>,
) -> CheckFinding {
    CheckFinding {
        id: id.into(),
        ok,
        detail: detail.into(),
        remediation: remediation.into(),
    }
}

fn now_nanos() -> i128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as i128)
        .unwrap_or(0)
}

fn can_write_directory(path: &Path) -> Result<(), String> {
    fs::create_dir_all(path).map_err(|e| format!("failed to create {}: {e}", path.display()))?;
    let probe = path.join(format!(".reportform-check-{}", now_nanos()));
    fs::write(&probe, b"ok").map_err(|e| format!("failed to write {}: {e}", probe.display()))?;
    fs::remove_file(&probe).map_err(|e| format!("failed to remove {}: {e}", probe.display()))
}

fn settings_findings(settings: &Settings, findings: &mut Vec<CheckFinding>) {
    let reports_path = &settings.reports_base_path;
    findings.push(finding(
        "reports.path",
        reports_path.is_dir(),
        format!("reports_base_path={}", reports_path.display()),
        "set reports_base_path in ~/.reportform/config.yaml to an existing directory",
    ));

    findings.push(match settings.resolve_log_dir() {
        Ok(dir) => match can_write_directory(&dir) {
            Ok(_) => finding("log.dir", true, format!("writable={}", dir.display()), "none"),
            Err(err) => finding("log.dir", false, err, "grant write permission to log_dir"),
        },
        Err(err) => finding("log.dir", false, err.to_string(), "set log_dir or HOME"),
    });

    findings.push(match open_store(settings) {
        Ok(store) => {
            let probe = reports_statement(store.dialect(), None);
            match store.query(&probe) {
                Ok(result) => finding(
                    "database.metadata",
                    true,
                    format!(
                        "dialect={} reports={}",
                        store.dialect().as_str(),
                        result.rows.len()
                    ),
                    "none",
                ),
                Err(err) => finding(
                    "database.metadata",
                    false,
                    crate::shared::errors::error_chain(&err),
                    "create the report parameter tables in the configured database",
                ),
            }
        }
        Err(err) => finding(
            "database.metadata",
            false,
            err,
            "set database.sqlite_path in ~/.reportform/config.yaml",
        ),
    });
}

pub fn cmd_check() -> Result<String, String> {
    let mut findings = Vec::new();
    let config_path = default_global_config_path().map_err(map_config_err)?;
    findings.push(finding(
        "config.path",
        config_path.exists(),
        format!("config={}", config_path.display()),
        "create ~/.reportform/config.yaml",
    ));

    match load_settings() {
        Ok(settings) => {
            findings.push(finding(
                "config.parse",
                true,
                "settings parsed and validated",
                "none",
            ));
            settings_findings(&settings, &mut findings);
        }
        Err(err) => findings.push(finding(
            "config.parse",
            false,
            format!("settings load failed: {err}"),
            "fix ~/.reportform/config.yaml and retry `reportform check`",
        )),
    }

    let failed = findings.iter().filter(|f| !f.ok).count();
    let summary = if failed == 0 { "healthy" } else { "unhealthy" };
    let mut lines = vec![
        format!("summary={summary}"),
        format!("checks_total={}", findings.len()),
        format!("checks_failed={failed}"),
    ];
    for finding in findings {
        lines.push(format!(
            "check:{}={}",
            finding.id,
            if finding.ok { "ok" } else { "fail" }
        ));
        lines.push(format!("check:{}.detail={}", finding.id, finding.detail));
        if !finding.ok {
            lines.push(format!(
                "check:{}.remediation={}",
                finding.id, finding.remediation
            ));
        }
    }
    Ok(lines.join("\n"))
}
