use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub type Attributes = BTreeMap<String, String>;
pub type RegionSupport = BTreeMap<String, bool>;

/// One entry of a parameter-store listing. `name` is the full
/// slash-delimited path of the parameter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ParameterEntry {
    pub name: String,
    pub value: String,
}

impl ParameterEntry {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Trailing path segment, used as the attribute key when a listing is
    /// flattened into a record.
    pub fn leaf_name(&self) -> &str {
        self.name.rsplit('/').next().unwrap_or(&self.name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterPage {
    pub entries: Vec<ParameterEntry>,
    pub next_token: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Region {
    pub name: String,
    #[serde(flatten)]
    pub attributes: Attributes,
}

/// A service record: its own attributes followed by one boolean field per
/// known region. Both maps serialize flat into the same JSON object.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Service {
    pub service: String,
    #[serde(flatten)]
    pub attributes: Attributes,
    #[serde(flatten)]
    pub regions: RegionSupport,
}

impl Service {
    /// Regions flagged as supported, in alphabetical order.
    pub fn supported_regions(&self) -> impl Iterator<Item = &str> + '_ {
        self.regions
            .iter()
            .filter(|(_, supported)| **supported)
            .map(|(region, _)| region.as_str())
    }
}

#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct AggregationResult {
    pub regions: Vec<Region>,
    pub services: Vec<Service>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RegionsDocument<'a> {
    pub regions: &'a [Region],
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ServicesDocument<'a> {
    pub services: &'a [Service],
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AggregateRequest {
    #[serde(default)]
    pub services: Option<Vec<String>>,
    #[serde(default, rename = "skipS3Upload")]
    pub skip_s3_upload: bool,
}

impl AggregateRequest {
    /// Accepts the raw invocation payload. A `null` payload (an invoke with
    /// no input) means all defaults.
    pub fn from_payload(payload: Value) -> Result<Self, ValidationError> {
        if payload.is_null() {
            return Ok(Self::default());
        }

        let request: Self = serde_json::from_value(payload)
            .map_err(|error| ValidationError::new(format!("Malformed request: {error}")))?;

        if let Some(services) = &request.services {
            if services.iter().any(|name| name.trim().is_empty()) {
                return Err(ValidationError::new(
                    "service names must be non-empty strings",
                ));
            }
        }

        Ok(request)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CallerIdentity {
    pub account: Option<String>,
    pub arn: Option<String>,
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn leaf_name_is_trailing_segment() {
        let entry = ParameterEntry::new(
            "/aws/service/global-infrastructure/regions/us-east-1/longName",
            "US East (N. Virginia)",
        );
        assert_eq!(entry.leaf_name(), "longName");
        assert_eq!(ParameterEntry::new("plain", "x").leaf_name(), "plain");
    }

    #[test]
    fn region_serializes_flat_with_name_first() {
        let region = Region {
            name: "eu-west-1".to_string(),
            attributes: BTreeMap::from([
                ("partition".to_string(), "aws".to_string()),
                ("longName".to_string(), "Europe (Ireland)".to_string()),
            ]),
        };

        assert_eq!(
            serde_json::to_string(&region).expect("region should serialize"),
            r#"{"name":"eu-west-1","longName":"Europe (Ireland)","partition":"aws"}"#
        );
    }

    #[test]
    fn service_serializes_attributes_then_sorted_regions() {
        let service = Service {
            service: "lambda".to_string(),
            attributes: BTreeMap::from([("longName".to_string(), "AWS Lambda".to_string())]),
            regions: BTreeMap::from([
                ("us-east-1".to_string(), true),
                ("ap-south-1".to_string(), false),
            ]),
        };

        assert_eq!(
            serde_json::to_string(&service).expect("service should serialize"),
            r#"{"service":"lambda","longName":"AWS Lambda","ap-south-1":false,"us-east-1":true}"#
        );
        assert_eq!(service.supported_regions().collect::<Vec<_>>(), vec!["us-east-1"]);
    }

    #[test]
    fn aggregate_request_defaults_for_null_payload() {
        let request = AggregateRequest::from_payload(Value::Null).expect("null should parse");
        assert_eq!(request, AggregateRequest::default());
    }

    #[test]
    fn aggregate_request_reads_camel_case_flag() {
        let request = AggregateRequest::from_payload(json!({
            "services": ["ec2", "s3"],
            "skipS3Upload": true,
            "unrelated": 1
        }))
        .expect("request should parse");

        assert_eq!(
            request.services,
            Some(vec!["ec2".to_string(), "s3".to_string()])
        );
        assert!(request.skip_s3_upload);
    }

    #[test]
    fn aggregate_request_rejects_blank_service_names() {
        let error = AggregateRequest::from_payload(json!({"services": ["ec2", " "]}))
            .expect_err("blank service should fail");
        assert_eq!(error.message(), "service names must be non-empty strings");
    }

    #[test]
    fn aggregate_request_rejects_wrong_types() {
        let error = AggregateRequest::from_payload(json!({"services": "ec2"}))
            .expect_err("string services should fail");
        assert!(error.message().starts_with("Malformed request"));
    }
}
