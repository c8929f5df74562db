//! Shared fixtures for overlay integration tests.

#![allow(dead_code)]

use std::collections::BTreeSet;
use std::io::{self, Read};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use resgen_core::{
    MemoryHost, MemoryPack, ResourceError, ResourcePack, ResourceResult, ResourceStream,
};

/// Authored pack that counts how often it is asked.
pub struct CountingPack {
    inner: MemoryPack,
    has_calls: AtomicUsize,
    get_calls: AtomicUsize,
    broken_reads: bool,
}

impl CountingPack {
    pub fn new(name: &str) -> Self {
        Self {
            inner: MemoryPack::new(name),
            has_calls: AtomicUsize::new(0),
            get_calls: AtomicUsize::new(0),
            broken_reads: false,
        }
    }

    /// Lists its resources but fails every read with an I/O error.
    pub fn with_broken_reads(mut self) -> Self {
        self.broken_reads = true;
        self
    }

    pub fn with(self, name: &str, content: &str) -> Self {
        self.inner.insert(name, content);
        self
    }

    pub fn insert(&self, name: &str, content: &str) {
        self.inner.insert(name, content);
    }

    pub fn has_calls(&self) -> usize {
        self.has_calls.load(Ordering::SeqCst)
    }

    pub fn get_calls(&self) -> usize {
        self.get_calls.load(Ordering::SeqCst)
    }
}

impl ResourcePack for CountingPack {
    fn pack_name(&self) -> &str {
        self.inner.pack_name()
    }

    fn has_resource(&self, name: &str) -> bool {
        self.has_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.has_resource(name)
    }

    fn get_resource(&self, name: &str) -> ResourceResult<ResourceStream> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        if self.broken_reads {
            return Err(ResourceError::Io {
                name: name.to_string(),
                source: io::Error::new(io::ErrorKind::PermissionDenied, "unreadable"),
            });
        }
        self.inner.get_resource(name)
    }

    fn resource_domains(&self) -> BTreeSet<String> {
        self.inner.resource_domains()
    }
}

/// A host with one counting authored pack for `namespace`.
pub fn host_with(namespace: &str, authored: CountingPack) -> (MemoryHost, Arc<CountingPack>) {
    let host = MemoryHost::new();
    let authored = Arc::new(authored);
    host.add_authored_pack(namespace, authored.clone());
    (host, authored)
}

pub fn read_text(mut stream: ResourceStream) -> String {
    let mut text = String::new();
    stream.read_to_string(&mut text).unwrap();
    text
}

pub fn read_json(stream: ResourceStream) -> serde_json::Value {
    serde_json::from_str(&read_text(stream)).unwrap()
}
