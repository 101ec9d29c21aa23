//! MCP (Model Context Protocol) server implementation.
//!
//! Exposes scoring over the MCP protocol via stdio transport. The server is a
//! presentation layer: each `#[tool]` method delegates to `lexfog-core`.
//!
//! # Tools
//!
//! - `get_info` - package name and version
//! - `score_document` - score a tagged document (CCL XML or JSON)
//! - `compose_premorph` - turn plain text into tagger input

use std::sync::Arc;

use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo};
use rmcp::schemars;
use rmcp::{ErrorData as McpError, ServerHandler, tool, tool_handler, tool_router};

use lexfog_core::premorph::{compose_premorph, split_paragraphs};
use lexfog_core::{
    DocumentFormat, Engine, Language, ScoringOptions, SyllableOracle, VowelGroupOracle,
};

use crate::commands::check_input_size;

/// Parameters for the `get_info` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct GetInfoParams {
    /// Output format: "text" or "json"
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_format() -> String {
    "text".to_string()
}

/// Parameters for the `score_document` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct ScoreDocumentParams {
    /// The tagged document.
    pub document: String,
    /// Encoding of `document`: "ccl" (tagger XML, default) or "json".
    #[serde(default)]
    pub format: Option<String>,
    /// Language of the text; defaults to the server configuration.
    #[serde(default)]
    pub language: Option<Language>,
    /// Include the annotated HTML in the response.
    #[serde(default = "default_true")]
    pub include_html: bool,
}

const fn default_true() -> bool {
    true
}

/// Parameters for the `compose_premorph` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct ComposePremorphParams {
    /// Plain text, one paragraph per line.
    pub text: String,
}

/// MCP server exposing readability scoring.
#[derive(Clone)]
pub struct ProjectServer {
    oracle: Arc<dyn SyllableOracle>,
    options: ScoringOptions,
    max_input_bytes: Option<usize>,
    tool_router: rmcp::handler::server::router::tool::ToolRouter<Self>,
}

impl Default for ProjectServer {
    fn default() -> Self {
        Self::new()
    }
}

fn document_format(name: Option<&str>) -> Result<DocumentFormat, McpError> {
    match name.map(str::to_ascii_lowercase).as_deref() {
        None | Some("ccl" | "xml") => Ok(DocumentFormat::Ccl),
        Some("json") => Ok(DocumentFormat::Json),
        Some(other) => Err(McpError::invalid_params(
            format!("unknown document format {other:?}; expected \"ccl\" or \"json\""),
            None,
        )),
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, McpError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("serialization error: {e}"), None))
}

#[tool_router]
impl ProjectServer {
    /// Server with default scoring options and input limit.
    pub fn new() -> Self {
        Self::with_settings(
            ScoringOptions::default(),
            Some(lexfog_core::DEFAULT_MAX_INPUT_BYTES),
        )
    }

    /// Server with explicit scoring options and input limit.
    pub fn with_settings(options: ScoringOptions, max_input_bytes: Option<usize>) -> Self {
        Self {
            oracle: Arc::new(VowelGroupOracle::new()),
            options,
            max_input_bytes,
            tool_router: Self::tool_router(),
        }
    }

    /// Get project information.
    #[tool(description = "Get project name, version, and description")]
    #[tracing::instrument(skip(self), fields(otel.kind = "server"))]
    fn get_info(
        &self,
        Parameters(params): Parameters<GetInfoParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "get_info", format = %params.format, "executing MCP tool");

        let text = if params.format == "json" {
            to_json(&serde_json::json!({
                "name": env!("CARGO_PKG_NAME"),
                "version": env!("CARGO_PKG_VERSION"),
                "description": env!("CARGO_PKG_DESCRIPTION"),
            }))?
        } else {
            format!(
                "{} v{}\n{}",
                env!("CARGO_PKG_NAME"),
                env!("CARGO_PKG_VERSION"),
                env!("CARGO_PKG_DESCRIPTION"),
            )
        };

        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    /// Score a tagged document.
    #[tool(
        description = "Score the readability of a morphologically tagged document (CCL XML or JSON). \
                       Returns Fog, Pisarek and LIX indices, a general verdict and annotated HTML."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server"))]
    fn score_document(
        &self,
        Parameters(params): Parameters<ScoreDocumentParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(
            tool = "score_document",
            format = ?params.format,
            language = ?params.language,
            "executing MCP tool"
        );

        check_input_size(params.document.len(), self.max_input_bytes)
            .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
        let document = document_format(params.format.as_deref())?
            .parse(&params.document)
            .map_err(|e| McpError::invalid_params(e.to_string(), None))?;

        let options = ScoringOptions {
            language: params.language.unwrap_or(self.options.language),
            ..self.options
        };
        let analysis = Engine::new(self.oracle.as_ref())
            .with_options(options)
            .score(&document)
            .map_err(|e| McpError::invalid_params(e.to_string(), None))?;

        let json = if params.include_html {
            to_json(&analysis)?
        } else {
            to_json(&serde_json::json!({ "report": &analysis.report }))?
        };

        tracing::info!(
            tool = "score_document",
            score = %analysis.report.readability_score,
            "MCP tool completed"
        );
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    /// Build tagger input from plain text.
    #[tool(
        description = "Convert plain text (one paragraph per line) into premorph XML for the morphological tagger."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server"))]
    fn compose_premorph(
        &self,
        Parameters(params): Parameters<ComposePremorphParams>,
    ) -> Result<CallToolResult, McpError> {
        check_input_size(params.text.len(), self.max_input_bytes)
            .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
        let paragraphs = split_paragraphs(&params.text);
        tracing::debug!(
            tool = "compose_premorph",
            paragraphs = paragraphs.len(),
            "executing MCP tool"
        );
        Ok(CallToolResult::success(vec![Content::text(
            compose_premorph(&paragraphs),
        )]))
    }
}

#[tool_handler]
impl ServerHandler for ProjectServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: Default::default(),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: env!("CARGO_PKG_NAME").to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Default::default()
            },
            instructions: Some(format!(
                "{} MCP server. Score morphologically tagged documents with score_document; \
                 prepare tagger input with compose_premorph.",
                env!("CARGO_PKG_NAME"),
            )),
        }
    }
}
