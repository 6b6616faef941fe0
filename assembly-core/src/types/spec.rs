use std::collections::BTreeMap;

/// Marker in a parameter's type label for mandatory parameters.
pub const REQUIRED_MARKER: &str = "필수";
/// Marker in a parameter's type label for optional parameters.
pub const OPTIONAL_MARKER: &str = "선택";

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ApiParameter {
    pub name: String,

    /// Raw type label from the sheet, e.g. `STRING(필수)`.
    #[serde(rename = "type")]
    pub type_label: String,

    pub required: bool,

    pub description: String,
}

impl ApiParameter {
    /// Builds a parameter, deriving `required` from the type label.
    pub fn new(
        name: impl Into<String>,
        type_label: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        let type_label = type_label.into();
        let required = type_label.contains(REQUIRED_MARKER);
        Self {
            name: name.into(),
            type_label,
            required,
            description: description.into(),
        }
    }

    /// True when the label carries either presence marker.
    pub fn is_parameter_label(label: &str) -> bool {
        label.contains(REQUIRED_MARKER) || label.contains(OPTIONAL_MARKER)
    }
}

/// Parsed request shape for one service.
///
/// `endpoint` is always the final path segment of `endpoint_url`; use [`ApiSpec::new`] to keep
/// the two in step.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ApiSpec {
    pub service_id: String,
    pub endpoint: String,
    pub endpoint_url: String,
    pub basic_params: Vec<ApiParameter>,
    pub request_params: Vec<ApiParameter>,
}

impl ApiSpec {
    pub fn new(
        service_id: impl Into<String>,
        endpoint_url: impl Into<String>,
        basic_params: Vec<ApiParameter>,
        request_params: Vec<ApiParameter>,
    ) -> Self {
        let endpoint_url = endpoint_url.into();
        let endpoint = last_path_segment(&endpoint_url).to_string();
        Self {
            service_id: service_id.into(),
            endpoint,
            endpoint_url,
            basic_params,
            request_params,
        }
    }

    /// Required request parameters that `params` does not supply.
    pub fn missing_required<'a, V>(&'a self, params: &BTreeMap<String, V>) -> Vec<&'a ApiParameter> {
        self.request_params
            .iter()
            .filter(|p| p.required && !params.contains_key(&p.name))
            .collect()
    }
}

pub(crate) fn last_path_segment(url: &str) -> &str {
    url.rsplit('/').next().unwrap_or(url)
}
