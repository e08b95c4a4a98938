use serde::Deserialize;

use super::exporters::ExporterConfig;

/// Tracing configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TracingConfig {
    /// Sampling rate (0.0 to 1.0)
    #[serde(default = "default_sampling_rate")]
    pub sampling_rate: f64,
    /// Use parent-based sampler
    #[serde(default = "default_true")]
    pub parent_based: bool,
    /// Override the default exporter for tracing
    #[serde(default)]
    pub exporter: Option<ExporterConfig>,
}

#[allow(clippy::missing_const_for_fn)]
fn default_sampling_rate() -> f64 {
    1.0
}
#[allow(clippy::missing_const_for_fn)]
fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use crate::{Config, telemetry::exporters::ExportProtocol};

    #[test]
    fn tracing_exporter_overrides_default() {
        let config = Config::from_toml(
            r#"
            [telemetry.exporter]
            endpoint = "http://collector:4317"

            [telemetry.tracing]
            sampling_rate = 0.25

            [telemetry.tracing.exporter]
            endpoint = "http://traces:4318"
            protocol = "http_proto"
            "#,
        )
        .unwrap();

        let telemetry = config.telemetry.unwrap();
        assert_eq!(telemetry.service_name, "scribe");

        let exporter = telemetry.span_exporter().unwrap();
        assert_eq!(exporter.endpoint.as_str(), "http://traces:4318/");
        assert_eq!(exporter.protocol, ExportProtocol::HttpProto);

        let tracing = telemetry.tracing.unwrap();
        assert!((tracing.sampling_rate - 0.25).abs() < f64::EPSILON);
        assert!(tracing.parent_based);
    }
}
