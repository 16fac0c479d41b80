use serde_json::Value;

use crate::api::client::ApiClient;
use crate::api::error::ApiError;
use crate::api::types::{RemoteItem, RemotePlayer, RemoteQuest, RemoteQuestNote};

/// Game-flavoured endpoint table over the placeholder service.
#[derive(Debug, Clone)]
pub struct GameApi {
    client: ApiClient,
}

impl GameApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    // Players

    pub fn get_player(&self, player_id: u64) -> Result<RemotePlayer, ApiError> {
        self.client.get(&format!("/users/{player_id}"))
    }

    pub fn update_player(
        &self,
        player_id: u64,
        player: &RemotePlayer,
    ) -> Result<RemotePlayer, ApiError> {
        self.client.put(&format!("/users/{player_id}"), player)
    }

    pub fn create_player(&self, player: &RemotePlayer) -> Result<RemotePlayer, ApiError> {
        self.client.post("/users", player)
    }

    pub fn delete_player(&self, player_id: u64) -> Result<Value, ApiError> {
        self.client.delete(&format!("/users/{player_id}"))
    }

    // Inventory

    pub fn get_inventory(&self, player_id: u64) -> Result<Vec<RemoteItem>, ApiError> {
        self.client.get(&format!("/users/{player_id}/albums"))
    }

    pub fn add_inventory_item(
        &self,
        player_id: u64,
        item: &RemoteItem,
    ) -> Result<RemoteItem, ApiError> {
        self.client.post(&format!("/users/{player_id}/albums"), item)
    }

    pub fn update_inventory_item(
        &self,
        item_id: u64,
        item: &RemoteItem,
    ) -> Result<RemoteItem, ApiError> {
        self.client.put(&format!("/albums/{item_id}"), item)
    }

    pub fn remove_inventory_item(&self, item_id: u64) -> Result<Value, ApiError> {
        self.client.delete(&format!("/albums/{item_id}"))
    }

    // Quests

    pub fn get_quests(&self) -> Result<Vec<RemoteQuest>, ApiError> {
        self.client.get("/posts")
    }

    pub fn get_quest(&self, quest_id: u64) -> Result<RemoteQuest, ApiError> {
        self.client.get(&format!("/posts/{quest_id}"))
    }

    pub fn create_quest(&self, quest: &RemoteQuest) -> Result<RemoteQuest, ApiError> {
        self.client.post("/posts", quest)
    }

    pub fn update_quest(
        &self,
        quest_id: u64,
        quest: &RemoteQuest,
    ) -> Result<RemoteQuest, ApiError> {
        self.client.put(&format!("/posts/{quest_id}"), quest)
    }

    pub fn delete_quest(&self, quest_id: u64) -> Result<Value, ApiError> {
        self.client.delete(&format!("/posts/{quest_id}"))
    }

    pub fn get_quest_notes(&self, quest_id: u64) -> Result<Vec<RemoteQuestNote>, ApiError> {
        self.client.get(&format!("/posts/{quest_id}/comments"))
    }

    pub fn add_quest_note(
        &self,
        quest_id: u64,
        note: &RemoteQuestNote,
    ) -> Result<RemoteQuestNote, ApiError> {
        self.client.post(&format!("/posts/{quest_id}/comments"), note)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::client::stub;
    use crate::config::ApiConfig;
    use crate::storage::local_storage::LocalStorage;
    use tempfile::TempDir;

    #[test]
    fn quest_lookup_hits_posts_endpoint() {
        let dir = TempDir::new().unwrap();
        let (base_url, server) = stub::serve_once(
            "200 OK",
            r#"{"userId": 1, "id": 7, "title": "Find the relic", "body": "Somewhere north"}"#,
        );
        let config = ApiConfig {
            base_url,
            timeout_secs: 5,
        };
        let storage = LocalStorage::open(dir.path()).unwrap();
        let api = GameApi::new(ApiClient::new(&config, storage).unwrap());

        let quest = api.get_quest(7).unwrap();
        assert_eq!(quest.id, Some(7));
        assert_eq!(quest.user_id, Some(1));
        assert_eq!(quest.title, "Find the relic");

        assert!(server.join().unwrap().starts_with("GET /posts/7 "));
    }
}
