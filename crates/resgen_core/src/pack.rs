//! The resource pack contract and two reference authored layers.
//!
//! Every layer the host consults - the synthetic overlay and the authored
//! pack behind it - implements `ResourcePack`. The host walks its packs in
//! order, asking `has_resource` and then `get_resource`.

use std::collections::{BTreeSet, HashMap};
use std::fs::File;
use std::io::{self, Cursor, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;

use crate::error::{ResourceError, ResourceResult};
use crate::identifier::{translate, ASSETS_PREFIX};

/// Raw resource bytes, parsed by the host in its own format.
pub type ResourceStream = Box<dyn Read + Send>;

/// A pack shared between the host's resolution orders and its owner.
pub type SharedPack = Arc<dyn ResourcePack>;

/// Wraps owned bytes as a `ResourceStream`.
#[must_use]
pub fn stream_from_bytes(bytes: Vec<u8>) -> ResourceStream {
    Box::new(Cursor::new(bytes))
}

/// Resolution contract every layer implements.
pub trait ResourcePack: Send + Sync {
    /// Unique name of this pack inside a resolution order.
    fn pack_name(&self) -> &str;

    /// Membership test. Must be cheap and side-effect free.
    fn has_resource(&self, name: &str) -> bool;

    /// Opens the resource.
    ///
    /// # Errors
    ///
    /// `ResourceError::NotFound` when the pack cannot serve `name`, or
    /// `ResourceError::Io` when its storage fails.
    fn get_resource(&self, name: &str) -> ResourceResult<ResourceStream>;

    /// Namespaces this pack serves.
    fn resource_domains(&self) -> BTreeSet<String>;
}

/// Authored layer held entirely in memory.
///
/// Contents may be replaced at any time, e.g. to model a host reload.
pub struct MemoryPack {
    name: String,
    entries: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryPack {
    /// Creates an empty pack.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Adds or replaces a resource.
    pub fn insert(&self, name: impl Into<String>, bytes: impl Into<Vec<u8>>) {
        self.entries.write().insert(name.into(), bytes.into());
    }

    /// Removes a resource, returning its previous contents.
    pub fn remove(&self, name: &str) -> Option<Vec<u8>> {
        self.entries.write().remove(name)
    }

    /// Number of stored resources.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns true if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl ResourcePack for MemoryPack {
    fn pack_name(&self) -> &str {
        &self.name
    }

    fn has_resource(&self, name: &str) -> bool {
        self.entries.read().contains_key(name)
    }

    fn get_resource(&self, name: &str) -> ResourceResult<ResourceStream> {
        self.entries
            .read()
            .get(name)
            .cloned()
            .map(stream_from_bytes)
            .ok_or_else(|| ResourceError::not_found(name))
    }

    fn resource_domains(&self) -> BTreeSet<String> {
        self.entries
            .read()
            .keys()
            .filter(|name| {
                name.strip_prefix(ASSETS_PREFIX)
                    .is_some_and(|rest| rest.starts_with('/'))
            })
            .filter_map(|name| translate(name).ok())
            .map(|id| id.namespace)
            .collect()
    }
}

/// Authored layer backed by a directory on disk.
///
/// `assets/modx/sounds.json` is read from `<root>/assets/modx/sounds.json`.
pub struct FolderPack {
    name: String,
    root: PathBuf,
}

impl FolderPack {
    /// Creates a pack rooted at `root`.
    #[must_use]
    pub fn new<P: AsRef<Path>>(name: impl Into<String>, root: P) -> Self {
        Self {
            name: name.into(),
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Root directory of this pack.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Maps a resource name to a file below the root.
    ///
    /// Names that are absolute or contain `..`/`.` segments are refused.
    fn locate(&self, name: &str) -> Option<PathBuf> {
        if name.is_empty() || name.starts_with('/') || name.contains('\\') {
            return None;
        }
        let mut path = self.root.clone();
        for segment in name.split('/') {
            if segment.is_empty() || segment == "." || segment == ".." {
                return None;
            }
            path.push(segment);
        }
        Some(path)
    }
}

impl ResourcePack for FolderPack {
    fn pack_name(&self) -> &str {
        &self.name
    }

    fn has_resource(&self, name: &str) -> bool {
        self.locate(name).is_some_and(|path| path.is_file())
    }

    fn get_resource(&self, name: &str) -> ResourceResult<ResourceStream> {
        let path = self
            .locate(name)
            .ok_or_else(|| ResourceError::not_found(name))?;

        // Directories open fine on some platforms; only regular files are resources.
        if !path.is_file() {
            return Err(ResourceError::not_found(name));
        }

        match File::open(&path) {
            Ok(file) => Ok(Box::new(file)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(ResourceError::not_found(name)),
            Err(source) => Err(ResourceError::Io {
                name: name.to_string(),
                source,
            }),
        }
    }

    fn resource_domains(&self) -> BTreeSet<String> {
        let mut domains = BTreeSet::new();

        if let Ok(entries) = std::fs::read_dir(self.root.join(ASSETS_PREFIX)) {
            for entry in entries.flatten() {
                if entry.path().is_dir() {
                    if let Some(name) = entry.file_name().to_str() {
                        domains.insert(name.to_string());
                    }
                }
            }
        }

        domains
    }
}
