//! Core MCP server implementation.

use std::sync::Arc;

use rmcp::handler::server::{router::tool::ToolRouter, wrapper::Parameters};
use rmcp::model::*;
use rmcp::{tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler, ServiceExt};
use tracing::info;

use super::tools::{run_check, CheckInput, CheckOutput};
use crate::{SuggestionPolicy, Template};

/// MIME type that makes clients render the HTML as a widget.
pub const WIDGET_MIME_TYPE: &str = "text/html+skybridge";
const WIDGET_URI: &str = "ui://widget/contrast-report.html";

/// The widget as an embedded HTML resource, followed by the JSON report.
fn tool_contents(output: CheckOutput) -> Vec<Content> {
    vec![
        Content::resource(ResourceContents::TextResourceContents {
            uri: WIDGET_URI.into(),
            mime_type: Some(WIDGET_MIME_TYPE.into()),
            text: output.html,
            meta: None,
        }),
        Content::text(output.json),
    ]
}

/// The contrast checker MCP server.
///
/// Holds only immutable settings, each call evaluates its own batch.
#[derive(Debug, Clone)]
pub struct ContrastServer {
    policy: Arc<SuggestionPolicy>,
    template: Arc<Template>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl ContrastServer {
    pub fn new(policy: SuggestionPolicy, template: Template) -> Self {
        Self {
            policy: Arc::new(policy),
            template: Arc::new(template),
            tool_router: Self::tool_router(),
        }
    }

    #[tool(
        name = "check_color_accessibility",
        description = "Analyzes color pairs for WCAG compliance. Takes foreground/background \
                       hex colors (#RRGGBB) with a UI element description and returns a \
                       visual report plus the JSON results, including lighter or darker \
                       alternatives for failing pairs."
    )]
    async fn check_color_accessibility(
        &self,
        Parameters(input): Parameters<CheckInput>,
    ) -> Result<CallToolResult, McpError> {
        let policy = Arc::clone(&self.policy);
        let template = Arc::clone(&self.template);
        // rayon batch, keep it off the async workers
        let output = tokio::task::spawn_blocking(move || run_check(&input, &policy, &template))
            .await
            .map_err(|err| McpError::internal_error(err.to_string(), None))?
            .map_err(|err| McpError::internal_error(err.to_string(), None))?;

        info!(
            total = output.report.summary.total_pairs,
            failing = output.report.summary.failing_pairs,
            "check_color_accessibility"
        );

        Ok(CallToolResult::success(tool_contents(output)))
    }
}

#[tool_handler]
impl ServerHandler for ContrastServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "color-accessibility-checker".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                title: None,
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "WCAG color contrast analyzer. Extract foreground/background color pairs \
                 from a design and pass them to check_color_accessibility."
                    .into(),
            ),
        }
    }
}

/// Run the MCP server on stdin/stdout
pub async fn run_server(
    policy: SuggestionPolicy,
    template: Template,
) -> Result<(), Box<dyn std::error::Error>> {
    info!(?policy, "starting MCP server on stdio");
    let server = ContrastServer::new(policy, template);
    let service = server.serve(rmcp::transport::stdio()).await?;
    service.waiting().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_info() {
        let server = ContrastServer::new(SuggestionPolicy::default(), Template::default());
        let info = server.get_info();
        assert_eq!("color-accessibility-checker", info.server_info.name);
        assert!(info.capabilities.tools.is_some());
    }

    #[test]
    fn widget_is_sent_as_skybridge_html() {
        let input: CheckInput = serde_json::from_str(
            r##"{"color_pairs": [{"foreground": "#777777", "background": "#888888"}]}"##,
        )
        .unwrap();
        let output = run_check(&input, &SuggestionPolicy::default(), Template::widget()).unwrap();
        let json = output.json.clone();

        let contents = serde_json::to_value(tool_contents(output)).unwrap();
        assert_eq!("resource", contents[0]["type"]);
        assert_eq!(WIDGET_MIME_TYPE, contents[0]["resource"]["mimeType"]);
        assert!(contents[0]["resource"]["text"]
            .as_str()
            .unwrap()
            .starts_with("<!DOCTYPE html>"));
        assert_eq!("text", contents[1]["type"]);
        assert_eq!(json, contents[1]["text"]);
    }

    #[tokio::test]
    async fn tool_call_runs_the_batch() {
        let server = ContrastServer::new(SuggestionPolicy::default(), Template::default());
        let input: CheckInput = serde_json::from_str(
            r##"{"color_pairs": [{"foreground": "#000000", "background": "#ffffff"}, null]}"##,
        )
        .unwrap();

        let result = server
            .check_color_accessibility(Parameters(input))
            .await
            .unwrap();
        assert_eq!(2, result.content.len());
    }

    #[test]
    fn lists_the_tool() {
        let server = ContrastServer::new(SuggestionPolicy::default(), Template::default());
        let tools = server.tool_router.list_all();
        assert_eq!(1, tools.len());
        assert_eq!("check_color_accessibility", tools[0].name);
    }
}
