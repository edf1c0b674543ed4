use std::sync::Arc;

use tokio::sync::RwLock;

use crate::model::Article;

/// The currently published article list.
///
/// Writers build a complete list first and swap it in, so the write lock is
/// held only for the swap and readers never see a half-built list.
#[derive(Default)]
pub struct SnapshotStore {
    articles: RwLock<Arc<Vec<Article>>>,
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn publish(&self, articles: Vec<Article>) {
        let snapshot = Arc::new(articles);
        let previous = {
            let mut current = self.articles.write().await;
            std::mem::replace(&mut *current, snapshot)
        };
        // old list is freed outside the lock
        drop(previous);
    }

    /// A copy of the current list that the caller owns.
    pub async fn get_all(&self) -> Vec<Article> {
        let snapshot = self.articles.read().await.clone();
        snapshot.as_ref().clone()
    }

    /// Look an article up by its id or its slug.
    pub async fn get_by_id(&self, key: &str) -> Option<Article> {
        let snapshot = self.articles.read().await.clone();
        snapshot
            .iter()
            .find(|article| article.id == key || article.slug == key)
            .cloned()
    }

    pub async fn len(&self) -> usize {
        self.articles.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
