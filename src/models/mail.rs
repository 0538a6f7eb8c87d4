//! Mail messages and the `sendMail` action payload.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use serde_with::base64::Base64;
use serde_with::serde_as;

use crate::models::ItemBody;

/// `@odata.type` of a file attachment.
pub const FILE_ATTACHMENT_ODATA_TYPE: &str = "#microsoft.graph.fileAttachment";

/// A mail message.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: Option<String>,
    pub subject: Option<String>,
    pub body: Option<ItemBody>,
    pub from: Option<Recipient>,
    pub to_recipients: Option<Vec<Recipient>>,
    pub cc_recipients: Option<Vec<Recipient>>,
    pub bcc_recipients: Option<Vec<Recipient>>,
    pub attachments: Option<Vec<FileAttachment>>,
    pub has_attachments: Option<bool>,
    pub is_read: Option<bool>,

    #[serde(flatten)]
    pub additional_data: Map<String, Value>,
}

/// A sender or recipient.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipient {
    pub email_address: Option<EmailAddress>,
}

impl Recipient {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            email_address: Some(EmailAddress {
                address: Some(address.into()),
                name: None,
            }),
        }
    }
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmailAddress {
    pub address: Option<String>,
    pub name: Option<String>,
}

/// A file attached to a message; `content_bytes` travels base64-encoded.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileAttachment {
    #[serde(rename = "@odata.type")]
    pub odata_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<i32>,
    #[serde_as(as = "Option<Base64>")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_bytes: Option<Vec<u8>>,
}

impl FileAttachment {
    pub fn new(name: impl Into<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            odata_type: FILE_ATTACHMENT_ODATA_TYPE.to_string(),
            name: Some(name.into()),
            content_type: Some(content_type.into()),
            size: i32::try_from(bytes.len()).ok(),
            content_bytes: Some(bytes),
        }
    }
}

/// Body of `POST /users/{id}/sendMail`.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMailPostRequestBody {
    pub message: Option<Message>,
    pub save_to_sent_items: Option<bool>,
}
