// Runtime configuration handed to the application and HTTP layers

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuntimeConfig {
    pub bind_addr: String,
    pub data_dir: String,
    pub seed_path: Option<String>,
    pub force_reset: bool,
    pub max_body_bytes: u64,
    pub request_timeout_seconds: u64,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3000".to_string(),
            data_dir: "./data".to_string(),
            seed_path: None,
            force_reset: false,
            max_body_bytes: 1024 * 1024,
            request_timeout_seconds: 15,
        }
    }
}
