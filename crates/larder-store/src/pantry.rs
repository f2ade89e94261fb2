//! In-memory pantry registry.
//!
//! Pantries are created by client submissions and live until the process
//! exits. Lookups of unknown identifiers yield an empty ingredient set.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

use crate::models::Pantry;

/// Shared, concurrency-safe mapping from pantry id to ingredient set.
///
/// Identifiers are assigned while the write lock is held, so concurrent
/// saves never collide and readers only ever observe complete pantries.
#[derive(Debug, Default)]
pub struct PantryRegistry {
    pantries: RwLock<HashMap<Uuid, Arc<Pantry>>>,
}

impl PantryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `ingredient_ids` under a freshly generated identifier.
    pub async fn save<I, S>(&self, ingredient_ids: I) -> Uuid
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let ingredient_ids: HashSet<String> = ingredient_ids.into_iter().map(Into::into).collect();
        let count = ingredient_ids.len();

        let mut pantries = self.pantries.write().await;
        let mut pantry_id = Uuid::new_v4();
        while pantries.contains_key(&pantry_id) {
            pantry_id = Uuid::new_v4();
        }
        pantries.insert(
            pantry_id,
            Arc::new(Pantry {
                pantry_id,
                ingredient_ids,
            }),
        );
        drop(pantries);

        info!(%pantry_id, ingredients = count, "pantry saved");
        pantry_id
    }

    /// Look up a pantry by identifier.
    pub async fn get_pantry(&self, pantry_id: Uuid) -> Option<Arc<Pantry>> {
        self.pantries.read().await.get(&pantry_id).cloned()
    }

    /// Ingredient set for `pantry_id`.
    ///
    /// Unknown and unparseable identifiers both yield an empty set.
    pub async fn get(&self, pantry_id: &str) -> HashSet<String> {
        let Ok(id) = Uuid::parse_str(pantry_id) else {
            return HashSet::new();
        };
        self.get_pantry(id)
            .await
            .map(|p| p.ingredient_ids.clone())
            .unwrap_or_default()
    }

    /// Number of saved pantries.
    pub async fn len(&self) -> usize {
        self.pantries.read().await.len()
    }
}
