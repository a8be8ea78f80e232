// Query-string shapes shared by the HTTP layer and the remote client

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecentQuery {
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RelatedQuery {
    pub category: Option<String>,
    pub level: Option<String>,
    pub exclude: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DropInQuery {
    pub city: Option<String>,
    pub status: Option<String>,
    pub date: Option<String>,
}
