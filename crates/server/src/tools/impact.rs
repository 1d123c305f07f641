//! impact_generate and impact_analyze tools.

use ecowatch_jobs::{RunOptions, Services};
use rmcp::{ErrorData as McpError, model::CallToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::json_result;

/// Parameters for the impact_generate tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct ImpactGenerateParams {
    /// Regenerate zones that already have an analysis.
    #[serde(default)]
    pub force: bool,
}

/// Parameters for the impact_analyze tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ImpactAnalyzeParams {
    /// Identifier of a stored zone, e.g. "sundarbans".
    pub zone_id: String,
}

/// Output from the impact_analyze tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImpactAnalyzeOutput {
    pub zone_id: String,
    /// HTML analysis as returned by the generator.
    pub analysis: String,
}

/// Run the batch enrichment job to completion and report its counters.
pub async fn generate_impl(services: &Services, params: ImpactGenerateParams) -> Result<CallToolResult, McpError> {
    let job = services.impact_job()?;
    let stats = job.run(RunOptions { force: params.force }).await?;
    json_result(&stats)
}

pub async fn analyze_impl(services: &Services, params: ImpactAnalyzeParams) -> Result<CallToolResult, McpError> {
    let analysis = services.analyst()?.analyze_zone(&params.zone_id).await?;
    json_result(&ImpactAnalyzeOutput { zone_id: params.zone_id, analysis })
}
