use super::{AssetBundle, AssetError, AssetFetcher, AssetKind};
use std::collections::HashMap;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, TryRecvError};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

type FetchResult = (AssetKind, Result<String, AssetError>);

/// Fetches the four descriptor files concurrently and joins them into an [`AssetBundle`].
///
/// One worker thread per file. The join completes when every file has arrived,
/// fails on the first fetch error, and fails with [`AssetError::Timeout`] once the
/// deadline passes. Results that arrive after completion are discarded.
pub struct AssetLoader {
    rx: Receiver<FetchResult>,
    received: HashMap<AssetKind, String>,
    timeout: Duration,
    deadline: Instant,
    finished: bool,
}

impl AssetLoader {
    pub fn spawn(fetcher: Arc<dyn AssetFetcher>, timeout: Duration) -> Self {
        let (tx, rx) = mpsc::channel();
        log::info!("Fetching asset catalogs from {}", fetcher.describe());
        for kind in AssetKind::ALL {
            let tx = tx.clone();
            let fetcher = Arc::clone(&fetcher);
            thread::spawn(move || {
                let result = fetcher.fetch_text(kind);
                let _ = tx.send((kind, result));
            });
        }

        Self {
            rx,
            received: HashMap::new(),
            timeout,
            deadline: Instant::now() + timeout,
            finished: false,
        }
    }

    /// Non-blocking. Returns `Some` exactly once, when the join resolves.
    pub fn poll(&mut self) -> Option<Result<AssetBundle, AssetError>> {
        if self.finished {
            return None;
        }
        loop {
            match self.rx.try_recv() {
                Ok(message) => {
                    if let Some(result) = self.accept(message) {
                        return Some(self.finish(result));
                    }
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    let lost = self.first_missing();
                    return Some(self.finish(Err(AssetError::WorkerLost(lost))));
                }
            }
        }
        if Instant::now() >= self.deadline {
            return Some(self.finish(Err(AssetError::Timeout(self.timeout))));
        }
        None
    }

    /// Blocks until the join resolves or the deadline passes.
    pub fn wait(mut self) -> Result<AssetBundle, AssetError> {
        loop {
            let remaining = self.deadline.saturating_duration_since(Instant::now());
            match self.rx.recv_timeout(remaining) {
                Ok(message) => {
                    if let Some(result) = self.accept(message) {
                        return self.finish(result);
                    }
                }
                Err(RecvTimeoutError::Timeout) => {
                    return self.finish(Err(AssetError::Timeout(self.timeout)));
                }
                Err(RecvTimeoutError::Disconnected) => {
                    let lost = self.first_missing();
                    return self.finish(Err(AssetError::WorkerLost(lost)));
                }
            }
        }
    }

    fn accept(&mut self, (kind, result): FetchResult) -> Option<Result<AssetBundle, AssetError>> {
        match result {
            Ok(text) => {
                log::debug!("Fetched {} ({} bytes)", kind.file_name(), text.len());
                self.received.insert(kind, text);
            }
            Err(err) => return Some(Err(err)),
        }
        if self.received.len() < AssetKind::ALL.len() {
            return None;
        }
        Some(AssetBundle::parse(
            &self.received[&AssetKind::Shaders],
            &self.received[&AssetKind::Textures],
            &self.received[&AssetKind::Models],
            &self.received[&AssetKind::Materials],
        ))
    }

    fn finish(
        &mut self,
        result: Result<AssetBundle, AssetError>,
    ) -> Result<AssetBundle, AssetError> {
        self.finished = true;
        self.received.clear();
        result
    }

    fn first_missing(&self) -> &'static str {
        AssetKind::ALL
            .iter()
            .find(|kind| !self.received.contains_key(kind))
            .map(|kind| kind.file_name())
            .unwrap_or("unknown")
    }
}
