#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliVerb {
    Reports,
    Params,
    Check,
    Locate,
    Help,
    Unknown,
}

pub fn parse_cli_verb(input: &str) -> CliVerb {
    match input {
        "reports" => CliVerb::Reports,
        "params" => CliVerb::Params,
        "check" => CliVerb::Check,
        "locate" => CliVerb::Locate,
        "help" | "--help" | "-h" => CliVerb::Help,
        _ => CliVerb::Unknown,
    }
}

pub fn cli_help_lines() -> Vec<String> {
    vec![
        "Commands:".to_string(),
        "  reports [--department <id>]          List reports, optionally for one department"
            .to_string(),
        "  params <report-code>                 Show the active parameters of a report"
            .to_string(),
        "  locate <report-code> [<name>]        Resolve the report file under reports_base_path"
            .to_string(),
        "  check                                Validate config, data store and report paths"
            .to_string(),
        "  help                                 Show this help".to_string(),
    ]
}

pub(crate) fn help_text() -> String {
    cli_help_lines().join("\n")
}
