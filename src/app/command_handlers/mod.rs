use crate::app::cli::{help_text, parse_cli_verb, CliVerb};

pub mod check;
pub mod locate;
pub mod reports;

pub fn run_cli(args: Vec<String>) -> Result<String, String> {
    if args.is_empty() {
        return Ok(help_text());
    }

    match parse_cli_verb(args[0].as_str()) {
        CliVerb::Reports => reports::cmd_reports(&args[1..]),
        CliVerb::Params => reports::cmd_params(&args[1..]),
        CliVerb::Check => check::cmd_check(),
        CliVerb::Locate => locate::cmd_locate(&args[1..]),
        CliVerb::Help => Ok(help_text()),
        CliVerb::Unknown => Err(format!("unknown command `{}`", args[0])),
    }
}
