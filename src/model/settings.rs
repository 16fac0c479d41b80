use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSettings {
    pub sound_enabled: bool,
    pub music_enabled: bool,
    pub auto_save: bool,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            sound_enabled: true,
            music_enabled: true,
            auto_save: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sound_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub music_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_save: Option<bool>,
}

impl GameSettings {
    pub fn merged(&self, patch: SettingsPatch) -> GameSettings {
        GameSettings {
            sound_enabled: patch.sound_enabled.unwrap_or(self.sound_enabled),
            music_enabled: patch.music_enabled.unwrap_or(self.music_enabled),
            auto_save: patch.auto_save.unwrap_or(self.auto_save),
        }
    }
}
