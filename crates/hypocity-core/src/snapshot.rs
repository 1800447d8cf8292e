//! Read-only views of the session for renderers, UI and the harness.

use hecs::World;
use hypocity_logic::geometry::Vec3;
use hypocity_logic::status::{GameStatus, NpcStatus};
use serde::{Deserialize, Serialize};

use crate::components::*;
use crate::systems::PlayerPose;

/// One NPC as the renderer sees it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NpcView {
    pub id: u32,
    pub kind: NpcKind,
    pub profession: Profession,
    pub status: NpcStatus,
    pub scanned: bool,
    pub removed: bool,
    pub position: Vec3,
    pub yaw: f32,
    pub is_moving: bool,
    pub is_waving: bool,
    pub visuals: Visuals,
    /// Speech bubble; only present once the NPC has been identified.
    pub dialogue: Option<String>,
}

/// Everything the presentation layer needs for one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub status: GameStatus,
    pub coins: u32,
    pub scanned_count: u32,
    pub victory_count: u32,
    pub notification: Option<String>,
    pub damaged: bool,
    pub scanning: bool,
    pub pointer_locked: bool,
    pub ambiance: bool,
    pub generation: u64,
    pub sim_time: f64,
    pub player: PlayerPose,
    pub npcs: Vec<NpcView>,
}

/// Views of every NPC in the world, tombstones included, in id order.
pub fn collect_npc_views(world: &World) -> Vec<NpcView> {
    let mut views: Vec<NpcView> = world
        .query::<(&Npc, &NpcStatus, &Position, &Heading, &Behavior, &Visuals, &Dialogue)>()
        .iter()
        .map(|(_, (npc, status, pos, heading, behavior, visuals, dialogue))| NpcView {
            id: npc.id,
            kind: npc.kind,
            profession: npc.profession,
            status: *status,
            scanned: status.is_scanned(),
            removed: status.is_removed(),
            position: pos.world,
            yaw: heading.yaw,
            is_moving: behavior.is_moving,
            is_waving: behavior.is_waving,
            visuals: visuals.clone(),
            dialogue: (*status == NpcStatus::Identified).then(|| dialogue.text(npc.kind).to_string()),
        })
        .collect();
    views.sort_by_key(|v| v.id);
    views
}
