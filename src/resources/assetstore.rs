//! Asset store resource.
//!
//! Fonts and images are loaded once through an [`AssetLoader`] and cached by
//! path. Behaviors and shapes only keep the returned [`AssetHandle`]s; they
//! never talk to the loader directly.

use bevy_ecs::prelude::Resource;
use rustc_hash::FxHashMap;

use crate::error::EngineError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKind {
    Font,
    Image,
}

impl AssetKind {
    /// Guess the kind from a file extension.
    pub fn from_path(path: &str) -> Option<Self> {
        let ext = path.rsplit_once('.')?.1.to_ascii_lowercase();
        match ext.as_str() {
            "ttf" | "otf" | "fnt" => Some(AssetKind::Font),
            "png" | "jpg" | "jpeg" | "bmp" | "gif" => Some(AssetKind::Image),
            _ => None,
        }
    }
}

/// Opaque reference to a loaded asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AssetHandle {
    pub id: u32,
    pub kind: AssetKind,
}

/// Platform side of asset loading.
pub trait AssetLoader: Send + Sync {
    /// Load the asset at `path`, returning the platform id for it.
    fn load(&mut self, path: &str, kind: AssetKind) -> Result<u32, EngineError>;
}

/// Loader that only hands out sequential ids; used headless and in tests.
#[derive(Debug, Default)]
pub struct CountingLoader {
    pub loads: u32,
}

impl AssetLoader for CountingLoader {
    fn load(&mut self, _path: &str, _kind: AssetKind) -> Result<u32, EngineError> {
        self.loads += 1;
        Ok(self.loads)
    }
}

/// Map of asset paths to loaded handles.
#[derive(Resource)]
pub struct AssetStore {
    loader: Box<dyn AssetLoader>,
    handles: FxHashMap<String, AssetHandle>,
}

impl AssetStore {
    pub fn new(loader: impl AssetLoader + 'static) -> Self {
        Self {
            loader: Box::new(loader),
            handles: FxHashMap::default(),
        }
    }

    /// Get the handle for `path`, loading it on first request.
    pub fn get(&mut self, path: &str) -> Result<AssetHandle, EngineError> {
        if let Some(handle) = self.handles.get(path) {
            return Ok(*handle);
        }
        let kind = AssetKind::from_path(path)
            .ok_or_else(|| EngineError::config(format!("unknown asset type for '{path}'")))?;
        let id = self.loader.load(path, kind)?;
        let handle = AssetHandle { id, kind };
        log::debug!("Loaded {:?} asset '{}' as #{}", kind, path, id);
        self.handles.insert(path.to_string(), handle);
        Ok(handle)
    }

    /// Get an already loaded handle without touching the loader.
    pub fn cached(&self, path: &str) -> Option<AssetHandle> {
        self.handles.get(path).copied()
    }

    /// Remove all cached handles.
    pub fn clear(&mut self) {
        self.handles.clear();
    }

    /// Get the number of cached assets.
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}

impl Default for AssetStore {
    fn default() -> Self {
        Self::new(CountingLoader::default())
    }
}
