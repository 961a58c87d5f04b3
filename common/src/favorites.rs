//! お気に入りレジストリ
//!
//! ユーザーがマークした品名の集合。検索とは独立しており、
//! 照合結果への付与は品名の完全一致で判定する（正規化しない）。

use std::collections::{BTreeSet, HashSet};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// お気に入り品名の集合（レジストリ全体で1つのロック）
#[derive(Debug, Default)]
pub struct FavoritesRegistry {
    names: RwLock<BTreeSet<String>>,
}

impl FavoritesRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加。既に登録済みなら何もしない
    ///
    /// 集合が変化した場合のみ true
    pub fn add(&self, name: &str) -> bool {
        self.write().insert(name.to_string())
    }

    /// 削除。未登録なら何もしない
    ///
    /// 集合が変化した場合のみ true
    pub fn remove(&self, name: &str) -> bool {
        self.write().remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.read().contains(name)
    }

    /// 品名の昇順リスト
    pub fn list(&self) -> Vec<String> {
        self.read().iter().cloned().collect()
    }

    /// 検索1回分の読み取り用コピー
    pub fn snapshot(&self) -> HashSet<String> {
        self.read().iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    fn read(&self) -> RwLockReadGuard<'_, BTreeSet<String>> {
        self.names.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, BTreeSet<String>> {
        self.names.write().unwrap_or_else(|e| e.into_inner())
    }
}

impl<S: Into<String>> FromIterator<S> for FavoritesRegistry {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: RwLock::new(iter.into_iter().map(Into::into).collect()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_add_is_idempotent() {
        let favorites = FavoritesRegistry::new();
        assert!(favorites.add("THINER"));
        assert!(!favorites.add("THINER"));
        assert_eq!(favorites.list(), vec!["THINER"]);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let favorites: FavoritesRegistry = ["THINER", "LIXA"].into_iter().collect();
        assert!(favorites.remove("THINER"));
        assert!(!favorites.remove("THINER"));
        assert!(!favorites.remove("NAO EXISTE"));
        assert_eq!(favorites.list(), vec!["LIXA"]);
    }

    #[test]
    fn test_exact_equality_only() {
        let favorites: FavoritesRegistry = ["1570.THINER 5 LITROS FARBEN"].into_iter().collect();
        assert!(favorites.contains("1570.THINER 5 LITROS FARBEN"));
        assert!(!favorites.contains("1570.thiner 5 litros farben"));
        assert!(!favorites.contains("THINER"));
    }

    #[test]
    fn test_concurrent_toggles_stay_consistent() {
        let favorites = Arc::new(FavoritesRegistry::new());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let favorites = Arc::clone(&favorites);
                thread::spawn(move || {
                    for _ in 0..100 {
                        if i % 2 == 0 {
                            favorites.add("THINER");
                        } else {
                            favorites.remove("THINER");
                        }
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        assert!(favorites.len() <= 1);
    }
}
