//! Client/server synchronization messages
//!
//! The server is authoritative: clients send requests, the server pushes
//! snapshots of dirty state and cooldown changes. Messages are JSON objects
//! tagged by a `type` field.

pub mod client;

pub use client::ClientState;

use crate::editor::EditorPayload;
use crate::player::PlayerState;
use crate::stat::Stat;
use crate::types::{BlockPos, ClassId, PlayerId, SkillId};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, VecDeque};
use thiserror::Error;

/// Wire codec error
#[derive(Error, Debug)]
pub enum CodecError {
    #[error("Malformed message: {0}")]
    Json(#[from] serde_json::Error),
}

/// Client -> server requests
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Spend attribute points on a primary stat
    RaiseStat { stat: Stat, amount: i32 },
    /// Choose (or clear) the class in a slot
    SetClass { class: Option<ClassId>, slot: usize },
    ChangeSkill { skill: SkillId, increase: bool },
    EditorSetStats { pos: BlockPos, payload: EditorPayload },
    EditorSaveLoad { pos: BlockPos, saving: bool },
}

/// Server -> client pushes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    Stats {
        attribute_points: u32,
        stats: BTreeMap<Stat, i32>,
    },
    Class {
        classes: Vec<Option<ClassId>>,
        skills: BTreeMap<SkillId, u32>,
        skill_points: u32,
    },
    /// Remaining cooldown of a skill by wire id; 0 clears it
    Cooldown { skill: u32, ticks: u32 },
}

impl ServerMessage {
    pub fn stats_snapshot(player: &PlayerState) -> Self {
        ServerMessage::Stats {
            attribute_points: player.attribute_points(),
            stats: player.base_stats.to_map(),
        }
    }

    pub fn class_snapshot(player: &PlayerState) -> Self {
        ServerMessage::Class {
            classes: player.class.classes().to_vec(),
            skills: player.class.skill_map(),
            skill_points: player.class.skill_points(),
        }
    }
}

/// Per-player FIFO of pending server messages
#[derive(Debug, Clone, Default)]
pub struct Outbox {
    queues: HashMap<PlayerId, VecDeque<ServerMessage>>,
}

impl Outbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, player: PlayerId, message: ServerMessage) {
        self.queues.entry(player).or_default().push_back(message);
    }

    /// Take every pending message for a player, oldest first
    pub fn drain(&mut self, player: PlayerId) -> Vec<ServerMessage> {
        self.queues
            .remove(&player)
            .map(Vec::from)
            .unwrap_or_default()
    }

    pub fn pending(&self, player: PlayerId) -> usize {
        self.queues.get(&player).map_or(0, VecDeque::len)
    }

    /// Drop a disconnected player's queue
    pub fn discard(&mut self, player: PlayerId) {
        self.queues.remove(&player);
    }
}

pub fn encode<T: Serialize>(message: &T) -> Result<String, CodecError> {
    Ok(serde_json::to_string(message)?)
}

pub fn decode<T: DeserializeOwned>(text: &str) -> Result<T, CodecError> {
    Ok(serde_json::from_str(text)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gear::GearStats;
    use crate::mediation::Unmediated;
    use crate::types::Rarity;

    #[test]
    fn test_client_message_shape() {
        let json = encode(&ClientMessage::RaiseStat {
            stat: Stat::Strength,
            amount: 3,
        })
        .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["type"], "raise_stat");
        assert_eq!(value["stat"], "primary:strength");
        assert_eq!(value["amount"], 3);
    }

    #[test]
    fn test_decode_set_class_without_class() {
        let msg: ClientMessage = decode(r#"{"type":"set_class","class":null,"slot":1}"#).unwrap();
        assert_eq!(msg, ClientMessage::SetClass { class: None, slot: 1 });
    }

    #[test]
    fn test_editor_payload_survives_codec() {
        let mut gear = GearStats::new(Rarity::Uncommon, 8);
        gear.stats.set(Stat::Slow, 4, &mut Unmediated);
        gear.stats.clean();
        let msg = ClientMessage::EditorSetStats {
            pos: BlockPos::new(1, 64, -3),
            payload: EditorPayload::Gear(gear),
        };
        let back: ClientMessage = decode(&encode(&msg).unwrap()).unwrap();
        assert_eq!(back, msg);
    }

    #[test]
    fn test_malformed_message() {
        assert!(decode::<ClientMessage>(r#"{"type":"raise_stat","stat":"primary:luck","amount":1}"#).is_err());
        assert!(decode::<ServerMessage>("not json").is_err());
    }

    #[test]
    fn test_outbox_is_fifo_per_player() {
        let a = PlayerId::new_random();
        let b = PlayerId::new_random();
        let mut outbox = Outbox::new();
        outbox.push(a, ServerMessage::Cooldown { skill: 1, ticks: 100 });
        outbox.push(b, ServerMessage::Cooldown { skill: 2, ticks: 5 });
        outbox.push(a, ServerMessage::Cooldown { skill: 1, ticks: 0 });

        assert_eq!(outbox.pending(a), 2);
        assert_eq!(
            outbox.drain(a),
            vec![
                ServerMessage::Cooldown { skill: 1, ticks: 100 },
                ServerMessage::Cooldown { skill: 1, ticks: 0 },
            ]
        );
        assert_eq!(outbox.pending(a), 0);
        assert_eq!(outbox.pending(b), 1);
    }
}
