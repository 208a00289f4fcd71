//! Cookie store backed by the browser engine's own jar.
//!
//! The engine lives on the event-loop thread, so every call is validated
//! here and then sent to that thread as a [`CookieJob`] carrying its reply
//! channel. Whoever owns the engine drains the receiver from
//! [`EngineCookieStore::channel`] and answers each job.

use std::fmt;

use async_trait::async_trait;
use musicbox_common::StorageError;
use tokio::sync::{mpsc, oneshot};
use tracing::debug;

use super::matching::{build_record, parse_scope};
use super::CookieStore;
use crate::cookie::{CookieDetails, CookieRecord};

type Reply<T> = oneshot::Sender<Result<T, StorageError>>;

/// One cookie operation for the engine thread to run.
pub enum CookieJob {
    Get {
        url: String,
        reply: Reply<Vec<CookieRecord>>,
    },
    GetAll {
        reply: Reply<Vec<CookieRecord>>,
    },
    /// `record` is already validated against `url`.
    Set {
        url: String,
        record: CookieRecord,
        reply: Reply<()>,
    },
    Remove {
        url: String,
        name: String,
        reply: Reply<()>,
    },
    Clear {
        reply: Reply<()>,
    },
}

impl CookieJob {
    /// Answer the job with `err` without running it.
    pub fn fail(self, err: StorageError) {
        // The caller may be gone already; a lost reply is fine.
        match self {
            CookieJob::Get { reply, .. } | CookieJob::GetAll { reply } => {
                let _ = reply.send(Err(err));
            }
            CookieJob::Set { reply, .. }
            | CookieJob::Remove { reply, .. }
            | CookieJob::Clear { reply } => {
                let _ = reply.send(Err(err));
            }
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            CookieJob::Get { .. } => "get",
            CookieJob::GetAll { .. } => "get_all",
            CookieJob::Set { .. } => "set",
            CookieJob::Remove { .. } => "remove",
            CookieJob::Clear { .. } => "clear",
        }
    }
}

impl fmt::Debug for CookieJob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CookieJob")
            .field("kind", &self.kind())
            .finish_non_exhaustive()
    }
}

/// [`CookieStore`] whose cookies live in the engine on another thread.
#[derive(Clone)]
pub struct EngineCookieStore {
    jobs: mpsc::UnboundedSender<CookieJob>,
}

impl EngineCookieStore {
    /// The store and the job queue its engine thread must serve.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<CookieJob>) {
        let (jobs, rx) = mpsc::unbounded_channel();
        (Self { jobs }, rx)
    }

    async fn call<T>(&self, job: impl FnOnce(Reply<T>) -> CookieJob) -> Result<T, StorageError> {
        let (reply, rx) = oneshot::channel();
        self.jobs.send(job(reply)).map_err(|_| unavailable())?;
        rx.await.map_err(|_| unavailable())?
    }
}

fn unavailable() -> StorageError {
    StorageError::Backend("cookie engine unavailable".into())
}

impl fmt::Debug for EngineCookieStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EngineCookieStore")
            .field("closed", &self.jobs.is_closed())
            .finish()
    }
}

#[async_trait]
impl CookieStore for EngineCookieStore {
    async fn get(&self, url: &str) -> Result<Vec<CookieRecord>, StorageError> {
        parse_scope(url)?;
        let url = url.to_string();
        let mut cookies = self.call(|reply| CookieJob::Get { url, reply }).await?;
        cookies.sort_by(|a, b| b.path.len().cmp(&a.path.len()));
        Ok(cookies)
    }

    async fn get_all(&self) -> Result<Vec<CookieRecord>, StorageError> {
        self.call(|reply| CookieJob::GetAll { reply }).await
    }

    async fn set(&self, details: CookieDetails) -> Result<(), StorageError> {
        let url = details.url.clone();
        let record = build_record(details)?;
        debug!(name = %record.name, domain = %record.domain, "engine cookie set");
        self.call(|reply| CookieJob::Set { url, record, reply })
            .await
    }

    async fn remove(&self, url: &str, name: &str) -> Result<(), StorageError> {
        parse_scope(url)?;
        let (url, name) = (url.to_string(), name.to_string());
        self.call(|reply| CookieJob::Remove { url, name, reply })
            .await
    }

    async fn clear(&self) -> Result<(), StorageError> {
        self.call(|reply| CookieJob::Clear { reply }).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryCookieStore;

    const HOME: &str = "https://music.apple.com";

    /// Serve jobs from an in-memory jar, the way the engine thread would.
    fn spawn_engine(mut rx: mpsc::UnboundedReceiver<CookieJob>) -> tokio::task::JoinHandle<usize> {
        tokio::spawn(async move {
            let jar = MemoryCookieStore::new();
            let mut served = 0;
            while let Some(job) = rx.recv().await {
                served += 1;
                match job {
                    CookieJob::Get { url, reply } => {
                        let _ = reply.send(jar.get(&url).await);
                    }
                    CookieJob::GetAll { reply } => {
                        let _ = reply.send(jar.get_all().await);
                    }
                    CookieJob::Set { url, record, reply } => {
                        let mut details = CookieDetails::new(url, record.name, record.value)
                            .with_path(record.path)
                            .with_secure(record.secure);
                        if !record.host_only {
                            details = details.with_domain(record.domain);
                        }
                        let _ = reply.send(jar.set(details).await);
                    }
                    CookieJob::Remove { url, name, reply } => {
                        let _ = reply.send(jar.remove(&url, &name).await);
                    }
                    CookieJob::Clear { reply } => {
                        let _ = reply.send(jar.clear().await);
                    }
                }
            }
            served
        })
    }

    #[tokio::test]
    async fn operations_reach_the_engine() {
        let (store, rx) = EngineCookieStore::channel();
        let engine = spawn_engine(rx);

        store.set(CookieDetails::new(HOME, "a", "1")).await.unwrap();
        store
            .set(CookieDetails::new(HOME, "b", "2").with_path("/library"))
            .await
            .unwrap();
        let at_library = store.get("https://music.apple.com/library/x").await.unwrap();
        let names: Vec<_> = at_library.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["b", "a"]);

        store.remove(HOME, "a").await.unwrap();
        assert_eq!(store.count().await.unwrap(), 1);
        store.clear().await.unwrap();
        assert!(store.get_all().await.unwrap().is_empty());

        drop(store);
        assert_eq!(engine.await.unwrap(), 7);
    }

    #[tokio::test]
    async fn invalid_input_never_reaches_the_engine() {
        let (store, mut rx) = EngineCookieStore::channel();

        assert!(matches!(store.get("::").await, Err(StorageError::InvalidUrl(_))));
        assert!(matches!(
            store.remove("ftp://apple.com", "a").await,
            Err(StorageError::InvalidUrl(_))
        ));
        assert!(matches!(
            store
                .set(CookieDetails::new(HOME, "tracker", "1").with_domain("com"))
                .await,
            Err(StorageError::InvalidCookie(_))
        ));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn engine_gone_is_a_backend_error() {
        let (store, rx) = EngineCookieStore::channel();
        drop(rx);
        assert!(matches!(store.get_all().await, Err(StorageError::Backend(_))));
    }

    #[tokio::test]
    async fn dropped_job_is_a_backend_error() {
        let (store, mut rx) = EngineCookieStore::channel();
        tokio::spawn(async move {
            // Take the job and drop it unanswered.
            let _ = rx.recv().await;
        });
        assert!(matches!(store.clear().await, Err(StorageError::Backend(_))));
    }

    #[tokio::test]
    async fn failed_job_reports_its_error() {
        let (store, mut rx) = EngineCookieStore::channel();
        tokio::spawn(async move {
            if let Some(job) = rx.recv().await {
                assert_eq!(job.kind(), "get");
                job.fail(StorageError::Backend("no content surface".into()));
            }
        });
        let err = store.get(HOME).await.unwrap_err();
        assert_eq!(err, StorageError::Backend("no content surface".into()));
    }
}
