use std::hash::BuildHasherDefault;

use dashmap::DashMap;
use rustc_hash::FxHasher;

/// Sharded concurrent map hashed with `FxHasher`.
pub type FxDashMap<K, V> = DashMap<K, V, BuildHasherDefault<FxHasher>>;
