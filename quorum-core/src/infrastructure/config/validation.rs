use crate::infrastructure::config::AppConfig;

fn is_http_url(url: &str) -> bool {
    let url = url.trim();
    url.starts_with("http://") || url.starts_with("https://")
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if !is_http_url(&self.rpc.url) {
            errors.push(format!("rpc.url must be an http(s) URL: '{}'", self.rpc.url));
        }
        if self.rpc.timeout_secs == 0 {
            errors.push("rpc.timeout_secs must be > 0".to_string());
        }
        if !is_http_url(&self.ledger.bridge_url) {
            errors.push(format!("ledger.bridge_url must be an http(s) URL: '{}'", self.ledger.bridge_url));
        }
        if self.ledger.timeout_secs == 0 {
            errors.push("ledger.timeout_secs must be > 0".to_string());
        }
        if self.keys.key_dir.as_os_str().is_empty() {
            errors.push("keys.key_dir must not be empty".to_string());
        }
        if let Some(filters) = self.logging.filters.as_deref() {
            if filters.trim().is_empty() {
                errors.push("logging.filters must not be empty when set".to_string());
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
