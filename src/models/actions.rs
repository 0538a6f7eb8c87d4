//! Payloads of Graph actions and the reports root.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Body of `POST /groups/{id}/getMemberGroups`.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetMemberGroupsPostRequestBody {
    pub security_enabled_only: Option<bool>,
}

/// Response of `getMemberGroups`: the ids of the groups found.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GetMemberGroupsPostResponse {
    #[serde(default)]
    pub value: Vec<String>,

    #[serde(rename = "@odata.nextLink")]
    pub next_link: Option<String>,
}

/// The `/reports` singleton. Report data is fetched through its functions.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportRoot {
    pub id: Option<String>,

    #[serde(flatten)]
    pub additional_data: Map<String, Value>,
}
