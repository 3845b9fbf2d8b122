use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{GridId, ProductId, RowId, TemplateId};

/// Row as submitted by a client. The server assigns an id when none is sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewGridRow {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RowId>,
    pub template_id: TemplateId,
    pub products: Vec<ProductId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveGridRequest {
    pub name: String,
    pub rows: Vec<NewGridRow>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridRowRecord {
    pub id: RowId,
    pub template_id: TemplateId,
    pub products: Vec<ProductId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridRecord {
    pub id: GridId,
    pub name: String,
    pub rows: Vec<GridRowRecord>,
    pub created_at: DateTime<Utc>,
}
