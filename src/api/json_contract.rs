use serde::{Deserialize, Serialize};

use crate::core::{AnimationProgress, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::render::RenderFrame;

use super::{Chart, DonutChart, LineChart, RadarChart};

pub const CHART_SPEC_JSON_SCHEMA_V1: u32 = 1;

/// Any chart this crate can compose, tagged by `type` in JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChartSpec {
    Donut(DonutChart),
    Line(LineChart),
    Radar(RadarChart),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpecJsonContractV1 {
    pub schema_version: u32,
    pub chart: ChartSpec,
}

impl ChartSpec {
    fn as_chart(&self) -> &dyn Chart {
        match self {
            Self::Donut(chart) => chart,
            Self::Line(chart) => chart,
            Self::Radar(chart) => chart,
        }
    }

    pub fn to_json_contract_v1_pretty(&self) -> ChartResult<String> {
        let payload = ChartSpecJsonContractV1 {
            schema_version: CHART_SPEC_JSON_SCHEMA_V1,
            chart: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize chart spec contract v1: {e}"))
        })
    }

    /// Parses either a bare chart spec or a versioned envelope.
    ///
    /// Input carrying a top-level `schema_version` is read as an envelope;
    /// anything else is read as a bare spec and reports that parse error.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let value: serde_json::Value = serde_json::from_str(input).map_err(|e| {
            ChartError::InvalidData(format!("failed to parse chart spec json payload: {e}"))
        })?;
        if value.get("schema_version").is_none() {
            return serde_json::from_value(value).map_err(|e| {
                ChartError::InvalidData(format!("failed to parse chart spec: {e}"))
            });
        }

        let payload: ChartSpecJsonContractV1 = serde_json::from_value(value).map_err(|e| {
            ChartError::InvalidData(format!("failed to parse chart spec contract v1: {e}"))
        })?;
        if payload.schema_version != CHART_SPEC_JSON_SCHEMA_V1 {
            return Err(ChartError::InvalidData(format!(
                "unsupported chart spec schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.chart)
    }
}

impl Chart for ChartSpec {
    fn kind(&self) -> &'static str {
        self.as_chart().kind()
    }

    fn validate(&self) -> ChartResult<()> {
        self.as_chart().validate()
    }

    fn build_frame(
        &self,
        viewport: Viewport,
        progress: AnimationProgress,
    ) -> ChartResult<RenderFrame> {
        self.as_chart().build_frame(viewport, progress)
    }
}

impl From<DonutChart> for ChartSpec {
    fn from(chart: DonutChart) -> Self {
        Self::Donut(chart)
    }
}

impl From<LineChart> for ChartSpec {
    fn from(chart: LineChart) -> Self {
        Self::Line(chart)
    }
}

impl From<RadarChart> for ChartSpec {
    fn from(chart: RadarChart) -> Self {
        Self::Radar(chart)
    }
}
