use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestId(pub u32);

impl fmt::Display for QuestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestStatus {
    Available,
    Active,
    Completed,
    Failed,
    Locked,
}

impl QuestStatus {
    /// Whether moving from `self` to `next` follows the quest lifecycle:
    /// accept, complete, fail, or abandon back to available.
    /// Staying in the same status is always allowed.
    pub fn can_transition_to(self, next: QuestStatus) -> bool {
        use QuestStatus::*;

        if self == next {
            return true;
        }
        matches!(
            (self, next),
            (Available, Active) | (Active, Completed) | (Active, Failed) | (Active, Available)
        )
    }

    pub fn label(&self) -> &'static str {
        match self {
            QuestStatus::Available => "available",
            QuestStatus::Active => "active",
            QuestStatus::Completed => "completed",
            QuestStatus::Failed => "failed",
            QuestStatus::Locked => "locked",
        }
    }
}

impl fmt::Display for QuestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quest {
    pub id: QuestId,
    pub title: String,
    pub description: String,

    /// Not clamped to `max_progress`.
    pub progress: u32,
    pub max_progress: u32,

    /// Free text, e.g. "500 XP, Gold Sword"
    pub reward: String,
    pub status: QuestStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_progress: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reward: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<QuestStatus>,
}

impl QuestPatch {
    pub fn status(status: QuestStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn progress(progress: u32) -> Self {
        Self {
            progress: Some(progress),
            ..Self::default()
        }
    }
}

impl Quest {
    pub fn merged(&self, patch: QuestPatch) -> Quest {
        let mut next = self.clone();
        if let Some(title) = patch.title {
            next.title = title;
        }
        if let Some(description) = patch.description {
            next.description = description;
        }
        if let Some(progress) = patch.progress {
            next.progress = progress;
        }
        if let Some(max_progress) = patch.max_progress {
            next.max_progress = max_progress;
        }
        if let Some(reward) = patch.reward {
            next.reward = reward;
        }
        if let Some(status) = patch.status {
            next.status = status;
        }
        next
    }

    pub fn is_active(&self) -> bool {
        self.status == QuestStatus::Active
    }
}

pub fn seed_quests() -> Vec<Quest> {
    vec![
        Quest {
            id: QuestId(1),
            title: "Defeat the Goblin King".into(),
            description: "Clear the goblin camp and defeat their leader".into(),
            progress: 3,
            max_progress: 5,
            reward: "500 XP, Gold Sword".into(),
            status: QuestStatus::Active,
        },
        Quest {
            id: QuestId(2),
            title: "Collect Mystical Herbs".into(),
            description: "Gather 10 rare herbs for the village alchemist".into(),
            progress: 7,
            max_progress: 10,
            reward: "300 XP, Health Elixir".into(),
            status: QuestStatus::Active,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lifecycle_transitions() {
        use QuestStatus::*;

        assert!(Available.can_transition_to(Active));
        assert!(Active.can_transition_to(Completed));
        assert!(Active.can_transition_to(Failed));
        assert!(Active.can_transition_to(Available));
        assert!(Completed.can_transition_to(Completed));

        assert!(!Available.can_transition_to(Completed));
        assert!(!Completed.can_transition_to(Active));
        assert!(!Locked.can_transition_to(Active));
        assert!(!Failed.can_transition_to(Available));
    }

    #[test]
    fn progress_may_exceed_max() {
        let quest = seed_quests().remove(0).merged(QuestPatch::progress(42));
        assert_eq!(quest.progress, 42);
        assert_eq!(quest.max_progress, 5);
    }
}
