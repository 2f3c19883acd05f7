use crate::app::command_support::load_settings;
use crate::report::resolve_report_file;

pub fn cmd_locate(args: &[String]) -> Result<String, String> {
    let Some(report_code) = args.first().map(|code| code.trim()).filter(|code| !code.is_empty())
    else {
        return Err("usage: locate <report-code> [<name>]".to_string());
    };
    let report_name = args[1..].join(" ");
    let settings = load_settings()?;
    let resolved = resolve_report_file(&settings.reports_base_path, report_code, &report_name)
        .map_err(|err| err.to_string())?;
    match resolved {
        Some(path) => Ok(format!("report={report_code}\nfile={}", path.display())),
        None => Err(format!(
            "no report file found for `{report_code}` under {}",
            settings.reports_base_path.display()
        )),
    }
}
