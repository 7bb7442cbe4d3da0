use crate::commands::prelude::*;
use crate::output::verdict_line;

use contrast_checker::WcagVerdict;

pub struct ContrastCommand;

fn color_arg(matches: &ArgMatches, name: &str) -> Result<Color> {
    let value = matches
        .get_one::<String>(name)
        .map(String::as_str)
        .unwrap_or_default();
    Ok(value.parse::<Color>()?)
}

impl GenericCommand for ContrastCommand {
    fn run(&self, out: &mut Output, matches: &ArgMatches, config: &Config) -> Result<i32> {
        let foreground = color_arg(matches, "foreground")?;
        let background = color_arg(matches, "background")?;

        let ratio = foreground.contrast_ratio(&background);
        let verdict = WcagVerdict::from_ratio(ratio);

        let output = format!("{:.2}:1", ratio);
        writeln!(
            out.handle,
            "{}",
            config.brush.paint(&output, &foreground, &background)
        )?;
        writeln!(out.handle, "{}", verdict_line(&verdict))?;

        Ok(if verdict.passes() { EXIT_PASS } else { EXIT_FAIL })
    }
}
