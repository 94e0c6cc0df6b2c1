// Runtime configuration entity
// The slice of configuration the application and HTTP layers need at runtime

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub bind_addr: String,
    pub api_token: Option<String>,
    pub request_timeout_seconds: u64,
    pub max_body_bytes: u64,
    pub cycle_interval_seconds: u64,
}
