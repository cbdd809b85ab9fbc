use super::{AssetError, AssetKind};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Retrieves one descriptor file as plain text. Called from loader worker threads.
pub trait AssetFetcher: Send + Sync {
    fn fetch_text(&self, kind: AssetKind) -> Result<String, AssetError>;

    fn describe(&self) -> String;
}

pub struct FileFetcher {
    root: PathBuf,
}

impl FileFetcher {
    /// Relative roots resolve against the crate directory so `cargo run` finds `data/`.
    pub fn new(root: &str) -> Self {
        let root = PathBuf::from(root);
        let root = if root.is_absolute() {
            root
        } else {
            PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(root)
        };
        Self { root }
    }
}

impl AssetFetcher for FileFetcher {
    fn fetch_text(&self, kind: AssetKind) -> Result<String, AssetError> {
        let path = self.root.join(kind.file_name());
        std::fs::read_to_string(&path).map_err(|source| AssetError::Read {
            path: path.display().to_string(),
            source,
        })
    }

    fn describe(&self) -> String {
        self.root.display().to_string()
    }
}

pub struct HttpFetcher {
    base_url: String,
    agent: ureq::Agent,
}

impl HttpFetcher {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            agent,
        }
    }

    fn url_for(&self, kind: AssetKind) -> String {
        format!("{}/{}", self.base_url, kind.file_name())
    }
}

impl AssetFetcher for HttpFetcher {
    fn fetch_text(&self, kind: AssetKind) -> Result<String, AssetError> {
        let url = self.url_for(kind);
        let response = self.agent.get(&url).call().map_err(|err| AssetError::Http {
            url: url.clone(),
            message: err.to_string(),
        })?;
        response.into_string().map_err(|err| AssetError::Http {
            url,
            message: err.to_string(),
        })
    }

    fn describe(&self) -> String {
        self.base_url.clone()
    }
}

/// Picks an HTTP fetcher for `http(s)://` roots and a directory fetcher otherwise.
pub fn fetcher_for_root(root: &str, timeout: Duration) -> Arc<dyn AssetFetcher> {
    if root.starts_with("http://") || root.starts_with("https://") {
        Arc::new(HttpFetcher::new(root, timeout))
    } else {
        Arc::new(FileFetcher::new(root))
    }
}
