use std::{collections::HashMap, fmt, hash::Hash, sync::Arc};

use crate::{ClClientLauncher, ClClientType, ElClientLauncher, ElClientType};

/// Launchers indexed by the client type they start.
/// Built by the caller and only read during a launch.
pub struct LauncherRegistry<K, L: ?Sized> {
    launchers: HashMap<K, Arc<L>>,
}

/// Registry of EL client launchers.
pub type ElLauncherRegistry = LauncherRegistry<ElClientType, dyn ElClientLauncher>;
/// Registry of CL client launchers.
pub type ClLauncherRegistry = LauncherRegistry<ClClientType, dyn ClClientLauncher>;

impl<K: Eq + Hash, L: ?Sized> LauncherRegistry<K, L> {
    /// Constructs an empty registry.
    pub fn new() -> Self {
        Self {
            launchers: HashMap::new(),
        }
    }

    /// Registers `launcher` for `client_type`, replacing the previous one.
    pub fn with(mut self, client_type: K, launcher: Arc<L>) -> Self {
        self.insert(client_type, launcher);
        self
    }

    /// Registers `launcher` for `client_type`.
    /// Returns the launcher previously registered for it, if any.
    pub fn insert(&mut self, client_type: K, launcher: Arc<L>) -> Option<Arc<L>> {
        self.launchers.insert(client_type, launcher)
    }

    /// Launcher registered for `client_type`.
    pub fn get(&self, client_type: &K) -> Option<&Arc<L>> {
        self.launchers.get(client_type)
    }

    /// Checks whether a launcher is registered for `client_type`.
    pub fn contains(&self, client_type: &K) -> bool {
        self.launchers.contains_key(client_type)
    }

    /// Client types with a registered launcher, in arbitrary order.
    pub fn client_types(&self) -> impl Iterator<Item = &K> {
        self.launchers.keys()
    }

    /// Number of registered launchers.
    pub fn len(&self) -> usize {
        self.launchers.len()
    }
}

impl<K: Eq + Hash, L: ?Sized> Default for LauncherRegistry<K, L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Clone, L: ?Sized> Clone for LauncherRegistry<K, L> {
    fn clone(&self) -> Self {
        Self {
            launchers: self.launchers.clone(),
        }
    }
}

impl<K: fmt::Debug, L: ?Sized + fmt::Debug> fmt::Debug for LauncherRegistry<K, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.launchers.iter()).finish()
    }
}

impl<K: Eq + Hash, L: ?Sized> FromIterator<(K, Arc<L>)> for LauncherRegistry<K, L> {
    fn from_iter<I: IntoIterator<Item = (K, Arc<L>)>>(iter: I) -> Self {
        Self {
            launchers: iter.into_iter().collect(),
        }
    }
}
