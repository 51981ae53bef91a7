//! Test doubles shared by the unit tests of every entity module

use std::collections::HashMap;
use std::sync::atomic::{AtomicI32, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::error::{CompositionError, Result};
use crate::ports::{LocalStore, Record, RemoteResolver, ResolveError};
use crate::remote::{RemoteEndpoints, RemoteTarget};

pub fn user_url(id: i32) -> String {
    RemoteEndpoints::default().url_for(RemoteTarget::User, id)
}

pub fn product_url(id: i32) -> String {
    RemoteEndpoints::default().url_for(RemoteTarget::Product, id)
}

pub fn order_url(id: i32) -> String {
    RemoteEndpoints::default().url_for(RemoteTarget::Order, id)
}

/// In-memory store keeping rows in insertion order, duplicates included
pub struct MemoryStore<T> {
    rows: Arc<Mutex<Vec<T>>>,
    seq: Arc<AtomicI32>,
    reads: Arc<AtomicUsize>,
    writes: Arc<AtomicUsize>,
}

impl<T> Default for MemoryStore<T> {
    fn default() -> Self {
        Self::with_rows(Vec::new())
    }
}

impl<T> MemoryStore<T> {
    pub fn with_rows(rows: Vec<T>) -> Self {
        Self {
            rows: Arc::new(Mutex::new(rows)),
            seq: Arc::new(AtomicI32::new(0)),
            reads: Arc::new(AtomicUsize::new(0)),
            writes: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of `read_by_key` calls
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    /// Number of `create`/`update` calls
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

impl<T: Record> MemoryStore<T> {
    /// Row stored under `key`, read without touching the counters
    pub fn snapshot(&self, key: &T::Key) -> Option<T> {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .find(|row| row.key().as_ref() == Some(key))
            .cloned()
    }
}

impl<T: Record> LocalStore<T> for MemoryStore<T> {
    fn create(&self, record: T) -> impl std::future::Future<Output = Result<T>> + Send {
        let rows = self.rows.clone();
        let seq = self.seq.clone();
        let writes = self.writes.clone();

        async move {
            writes.fetch_add(1, Ordering::SeqCst);
            let record = match record.key() {
                Some(_) => record,
                None => record.with_generated_key(seq.fetch_add(1, Ordering::SeqCst) + 1),
            };
            rows.lock().unwrap().push(record.clone());
            Ok(record)
        }
    }

    fn read_by_key(&self, key: &T::Key) -> impl std::future::Future<Output = Result<Option<T>>> + Send {
        let key = key.clone();
        let rows = self.rows.clone();
        let reads = self.reads.clone();

        async move {
            reads.fetch_add(1, Ordering::SeqCst);
            Ok(rows
                .lock()
                .unwrap()
                .iter()
                .find(|row| row.key().as_ref() == Some(&key))
                .cloned())
        }
    }

    fn read_all(&self) -> impl std::future::Future<Output = Result<Vec<T>>> + Send {
        let rows = self.rows.clone();
        async move { Ok(rows.lock().unwrap().clone()) }
    }

    fn update(&self, record: T) -> impl std::future::Future<Output = Result<T>> + Send {
        let rows = self.rows.clone();
        let writes = self.writes.clone();

        async move {
            writes.fetch_add(1, Ordering::SeqCst);
            let key = record
                .key()
                .ok_or_else(|| CompositionError::store_failure("record has no key"))?;
            let mut rows = rows.lock().unwrap();
            match rows.iter_mut().find(|row| row.key().as_ref() == Some(&key)) {
                Some(row) => *row = record.clone(),
                None => rows.push(record.clone()),
            }
            Ok(record)
        }
    }

    fn delete_by_key(&self, key: &T::Key) -> impl std::future::Future<Output = Result<()>> + Send {
        let key = key.clone();
        let rows = self.rows.clone();

        async move {
            rows.lock().unwrap().retain(|row| row.key().as_ref() != Some(&key));
            Ok(())
        }
    }

    fn delete(&self, record: T) -> impl std::future::Future<Output = Result<()>> + Send {
        let rows = self.rows.clone();

        async move {
            let key = record.key();
            rows.lock().unwrap().retain(|row| row.key() != key);
            Ok(())
        }
    }
}

/// Scripted resolver: canned payloads, failures and latencies per URL
///
/// Unknown URLs answer with a 404 status error.
#[derive(Default)]
pub struct StubResolver {
    responses: HashMap<String, serde_json::Value>,
    failures: HashMap<String, ResolveError>,
    delays: HashMap<String, Duration>,
    calls: Arc<Mutex<Vec<String>>>,
    in_flight: Arc<AtomicUsize>,
    peak: Arc<AtomicUsize>,
}

impl StubResolver {
    pub fn respond(mut self, url: impl Into<String>, body: serde_json::Value) -> Self {
        self.responses.insert(url.into(), body);
        self
    }

    pub fn fail(mut self, url: impl Into<String>, error: ResolveError) -> Self {
        self.failures.insert(url.into(), error);
        self
    }

    pub fn delay(mut self, url: impl Into<String>, latency: Duration) -> Self {
        self.delays.insert(url.into(), latency);
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn calls_matching(&self, fragment: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|url| url.contains(fragment))
            .count()
    }

    /// Highest number of calls observed running at once
    pub fn peak_in_flight(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }
}

struct InFlight(Arc<AtomicUsize>);

impl Drop for InFlight {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl RemoteResolver for StubResolver {
    fn get_json<T>(
        &self,
        url: &str,
    ) -> impl std::future::Future<Output = std::result::Result<Option<T>, ResolveError>> + Send
    where
        T: DeserializeOwned + Send + 'static,
    {
        self.calls.lock().unwrap().push(url.to_string());
        let delay = self.delays.get(url).copied();
        let failure = self.failures.get(url).cloned();
        let body = self.responses.get(url).cloned();
        let in_flight = self.in_flight.clone();
        let peak = self.peak.clone();

        async move {
            let current = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            let _guard = InFlight(in_flight);
            peak.fetch_max(current, Ordering::SeqCst);

            if let Some(latency) = delay {
                tokio::time::sleep(latency).await;
            }
            if let Some(err) = failure {
                return Err(err);
            }
            match body {
                Some(body) => serde_json::from_value(body)
                    .map(Some)
                    .map_err(|e| ResolveError::Decode(e.to_string())),
                None => Err(ResolveError::Status(404)),
            }
        }
    }
}
