#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Authentication failed: {message}")]
    Auth { message: String },

    #[error("Too many authentication attempts ({attempts})")]
    AuthExhausted { attempts: u32 },

    #[error("Internal server error: {status}")]
    Server { status: u16 },

    #[error("Connection error: {0}")]
    Connection(#[from] reqwest::Error),

    #[error("Invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl AppError {
    pub fn error_type(&self) -> &'static str {
        match self {
            AppError::Auth { .. } => "auth",
            AppError::AuthExhausted { .. } => "auth_exhausted",
            AppError::Server { .. } => "server",
            AppError::Connection(_) => "connection",
            AppError::Decode(_) => "decode",
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        let mut obj = serde_json::json!({
            "error": self.error_type(),
            "message": self.to_string(),
        });
        if let AppError::Server { status } = self {
            obj["status"] = serde_json::json!(status);
        }
        obj
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_error_json_carries_status() {
        let err = AppError::Server { status: 503 };
        let json = err.to_json();
        assert_eq!(json["error"], "server");
        assert_eq!(json["status"], 503);
    }

    #[test]
    fn auth_error_json_shape() {
        let err = AppError::Auth {
            message: "bad secret".into(),
        };
        let json = err.to_json();
        assert_eq!(json["error"], "auth");
        assert_eq!(json["message"], "Authentication failed: bad secret");
        assert!(json.get("status").is_none());
    }
}
