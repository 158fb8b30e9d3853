use crate::checker::GrammarChecker;
use crate::{Config, Diagnostic};
use anyhow::Result;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;

/// Last-write-wins wrapper around a checker.
///
/// Each [`schedule`](Self::schedule) call cancels the check still waiting
/// from the previous call, so only the most recent text inside one delay
/// window is ever checked. Must be used from within a tokio runtime.
pub struct DebouncedChecker {
    checker: Arc<GrammarChecker>,
    delay: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl DebouncedChecker {
    pub fn new(checker: Arc<GrammarChecker>, delay: Duration) -> Self {
        Self {
            checker,
            delay,
            pending: Mutex::new(None),
        }
    }

    /// Checker and delay both taken from `config`.
    pub fn from_config(config: &Config) -> Result<Self> {
        let checker = GrammarChecker::from_config(config)?;
        Ok(Self::new(
            Arc::new(checker),
            Duration::from_millis(config.debounce_ms),
        ))
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Check `text` once the delay passes with no newer call, then hand the
    /// diagnostics to `callback`.
    pub fn schedule<F>(&self, text: String, callback: F)
    where
        F: FnOnce(Vec<Diagnostic>) + Send + 'static,
    {
        let checker = Arc::clone(&self.checker);
        let delay = self.delay;

        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            callback(checker.check_text(&text));
        });

        let mut pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(previous) = pending.replace(handle) {
            previous.abort();
            tracing::trace!("superseded pending check");
        }
    }

    /// Drop any check still waiting to run.
    pub fn cancel(&self) {
        let mut pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(previous) = pending.take() {
            previous.abort();
        }
    }
}

impl Drop for DebouncedChecker {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    fn debounced(delay_ms: u64) -> DebouncedChecker {
        let checker = Arc::new(GrammarChecker::new().unwrap());
        DebouncedChecker::new(checker, Duration::from_millis(delay_ms))
    }

    #[tokio::test(start_paused = true)]
    async fn test_only_latest_check_runs() {
        let debounced = debounced(1000);
        let (tx, mut rx) = mpsc::unbounded_channel();

        let edits = [
            "The result",
            "The result is better then",
            "The result is better then expected.",
        ];
        for text in edits {
            let tx = tx.clone();
            let owned = text.to_string();
            debounced.schedule(owned.clone(), move |diagnostics| {
                let _ = tx.send((owned, diagnostics));
            });
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
        drop(tx);

        tokio::time::sleep(Duration::from_millis(2000)).await;

        let (text, diagnostics) = rx.recv().await.unwrap();
        assert_eq!(text, "The result is better then expected.");
        assert_eq!(diagnostics.len(), 1);
        // the superseded checks never reported
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_separate_windows_both_run() {
        let debounced = debounced(500);
        let (tx, mut rx) = mpsc::unbounded_channel();

        let first = tx.clone();
        debounced.schedule("one".to_string(), move |d| {
            let _ = first.send(d.len());
        });
        tokio::time::sleep(Duration::from_millis(600)).await;

        debounced.schedule("two".to_string(), move |d| {
            let _ = tx.send(d.len());
        });
        tokio::time::sleep(Duration::from_millis(600)).await;

        assert!(rx.recv().await.is_some());
        assert!(rx.recv().await.is_some());
    }

    #[test]
    fn test_delay_from_config() {
        let config = Config {
            debounce_ms: 250,
            ..Default::default()
        };
        let debounced = DebouncedChecker::from_config(&config).unwrap();
        assert_eq!(debounced.delay(), Duration::from_millis(250));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_drops_pending() {
        let debounced = debounced(500);
        let (tx, mut rx) = mpsc::unbounded_channel::<usize>();

        debounced.schedule("pending".to_string(), move |d| {
            let _ = tx.send(d.len());
        });
        debounced.cancel();
        tokio::time::sleep(Duration::from_millis(1000)).await;

        assert!(rx.recv().await.is_none());
    }
}
