use anyhow::Result;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Dev,
    Staging,
    Prod,
}

impl Environment {
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "prod" | "production" => Self::Prod,
            "staging" => Self::Staging,
            _ => Self::Dev,
        }
    }

    pub fn is_dev(&self) -> bool {
        matches!(self, Self::Dev)
    }
}

/// Connection settings for the hosted chat-completion service.
///
/// Captured once at startup and handed to the client; a missing key puts the
/// client in unavailable mode for its whole lifetime.
#[derive(Debug, Clone)]
pub struct CompletionSettings {
    pub api_key: Option<String>,
    pub base_url: String,
    pub timeout_seconds: u64,
}

impl CompletionSettings {
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub env: Environment,
    pub server_addr: String,

    // CORS
    pub cors_allow_origins: Vec<String>,

    // Uploads
    pub upload_dir: PathBuf,
    pub max_file_size_mb: u64,
    pub allowed_extensions: Vec<String>,

    // Completion service
    pub completion: CompletionSettings,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        let env = Environment::from_str(&env::var("ENV").unwrap_or_else(|_| "dev".to_string()));
        let server_addr = env::var("SERVER_ADDR").unwrap_or_else(|_| {
            let port = env::var("PORT").unwrap_or_else(|_| "5000".to_string());
            format!("0.0.0.0:{}", port)
        });

        // CORS
        let cors_allow_origins = split_list(
            &env::var("CORS_ALLOW_ORIGINS").unwrap_or_else(|_| "http://localhost:5000".to_string()),
        );

        // Uploads
        let upload_dir =
            PathBuf::from(env::var("UPLOAD_FOLDER").unwrap_or_else(|_| "uploads".to_string()));
        let max_file_size_mb = env::var("MAX_FILE_SIZE_MB")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(10);
        let allowed_extensions = split_list(
            &env::var("ALLOWED_EXTENSIONS").unwrap_or_else(|_| "pdf,docx,txt".to_string()),
        )
        .into_iter()
        .map(|ext| ext.to_lowercase())
        .collect();

        // Completion service
        let api_key = env::var("OPENAI_API_KEY")
            .ok()
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty());
        let base_url = env::var("OPENAI_BASE_URL")
            .unwrap_or_else(|_| "https://api.openai.com/v1".to_string());
        let timeout_seconds = env::var("OPENAI_TIMEOUT_SECONDS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(60);

        Ok(Settings {
            env,
            server_addr,
            cors_allow_origins,
            upload_dir,
            max_file_size_mb,
            allowed_extensions,
            completion: CompletionSettings {
                api_key,
                base_url,
                timeout_seconds,
            },
        })
    }

    pub fn max_upload_bytes(&self) -> usize {
        (self.max_file_size_mb as usize).saturating_mul(1024 * 1024)
    }

    /// Whether `filename` carries one of the configured upload extensions.
    pub fn is_allowed_file(&self, filename: &str) -> bool {
        match filename.rsplit_once('.') {
            Some((_, ext)) => {
                let ext = ext.to_lowercase();
                self.allowed_extensions.iter().any(|allowed| *allowed == ext)
            }
            None => false,
        }
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
pub(crate) fn test_settings(upload_dir: PathBuf) -> Settings {
    Settings {
        env: Environment::Dev,
        server_addr: "127.0.0.1:0".to_string(),
        cors_allow_origins: vec!["http://localhost:5000".to_string()],
        upload_dir,
        max_file_size_mb: 1,
        allowed_extensions: vec!["pdf".into(), "docx".into(), "txt".into()],
        completion: CompletionSettings {
            api_key: None,
            base_url: "http://127.0.0.1:9".to_string(),
            timeout_seconds: 5,
        },
    }
}
