use crate::app::command_support::{flag_value, load_settings, log_store_failure, open_store};
use crate::metadata::{list_reports, try_load, ParameterDefinition};

pub fn cmd_reports(args: &[String]) -> Result<String, String> {
    let settings = load_settings()?;
    let department = match flag_value(args, "--department")? {
        Some(value) => Some(value.to_string()),
        None => settings.principal.department.clone(),
    };
    let store = open_store(&settings)?;
    let reports = list_reports(&store, department.as_deref())
        .map_err(|err| log_store_failure(&settings, "cli.reports.failed", err))?;

    let mut lines = vec![format!("reports_total={}", reports.len())];
    if let Some(department) = department {
        lines.push(format!("department={department}"));
    }
    for report in reports {
        lines.push(format!("report:{}={}", report.code, report.name));
    }
    Ok(lines.join("\n"))
}

pub fn cmd_params(args: &[String]) -> Result<String, String> {
    let Some(report_code) = args.first().map(|code| code.trim()).filter(|code| !code.is_empty())
    else {
        return Err("usage: params <report-code>".to_string());
    };
    let settings = load_settings()?;
    let store = open_store(&settings)?;
    let definitions = try_load(&store, report_code)
        .map_err(|err| log_store_failure(&settings, "cli.params.failed", err))?;
    Ok(render_definitions(report_code, &definitions))
}

fn render_definitions(report_code: &str, definitions: &[ParameterDefinition]) -> String {
    let mut lines = vec![
        format!("report={report_code}"),
        format!("parameters_total={}", definitions.len()),
    ];
    for (index, definition) in definitions.iter().enumerate() {
        let prefix = format!("parameter:{}", index + 1);
        lines.push(format!("{prefix}.id={}", definition.id));
        lines.push(format!("{prefix}.name={}", definition.display_name()));
        lines.push(format!("{prefix}.type={}", definition.param_type.as_str()));
        lines.push(format!("{prefix}.required={}", definition.required));
        lines.push(format!("{prefix}.lookup={}", definition.has_lookup()));
        lines.push(format!(
            "{prefix}.description={}",
            definition.has_description_control()
        ));
    }
    lines.join("\n")
}
