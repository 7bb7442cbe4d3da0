use crate::commands::prelude::*;

pub struct ServeCommand;

#[cfg(feature = "mcp")]
impl GenericCommand for ServeCommand {
    fn run(&self, _out: &mut Output, matches: &ArgMatches, _config: &Config) -> Result<i32> {
        use crate::config::{settings_from_matches, template_from_settings};
        use tokio::runtime::Runtime;

        let settings = settings_from_matches(matches)?;
        let template = template_from_settings(&settings)?;

        let rt = Runtime::new()?;
        rt.block_on(contrast_checker::mcp::run_server(settings.policy, template))
            .map_err(|err| CliError::Server(err.to_string()))?;

        Ok(EXIT_PASS)
    }
}

#[cfg(not(feature = "mcp"))]
impl GenericCommand for ServeCommand {
    fn run(&self, _out: &mut Output, _matches: &ArgMatches, _config: &Config) -> Result<i32> {
        Err(CliError::ServerUnavailable)
    }
}
