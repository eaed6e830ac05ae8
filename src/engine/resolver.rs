use crate::engine::esi::{EveClient, JsonSource};
use crate::error::StoryError;
use crate::model::killmail::{RawAttacker, RawVictim};
use crate::model::participant::{Participant, ShipName};

pub const DEFAULT_ATTACKER_LIMIT: usize = 10;

/// Capsule. Used when an attacker entry carries no ship.
pub const CAPSULE_TYPE_ID: u64 = 670;

/// Stand-in pilot for victims without a character (structures, NPC kills).
pub const FALLBACK_VICTIM_ID: u64 = 2117904342;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParticipantIds {
    pub character_id: u64,
    pub corporation_id: u64,
    pub ship_type_id: u64,
}

impl ParticipantIds {
    pub fn from_attacker(raw: &RawAttacker) -> Result<Self, StoryError> {
        Ok(Self {
            character_id: raw.character_id.ok_or(StoryError::MissingId {
                role: "attacker",
                field: "character_id",
            })?,
            corporation_id: raw.corporation_id.ok_or(StoryError::MissingId {
                role: "attacker",
                field: "corporation_id",
            })?,
            ship_type_id: raw.ship_type_id.unwrap_or(CAPSULE_TYPE_ID),
        })
    }

    pub fn from_victim(raw: &RawVictim) -> Result<Self, StoryError> {
        Ok(Self {
            character_id: raw.character_id.unwrap_or(FALLBACK_VICTIM_ID),
            corporation_id: raw.corporation_id.ok_or(StoryError::MissingId {
                role: "victim",
                field: "corporation_id",
            })?,
            ship_type_id: raw.ship_type_id.ok_or(StoryError::MissingId {
                role: "victim",
                field: "ship_type_id",
            })?,
        })
    }
}

/// The resolved head of the attacker list and how many were left out.
#[derive(Debug, Clone)]
pub struct Roster {
    pub resolved: Vec<Participant>,
    pub remaining: usize,
}

/// Name, ship, then corporation. Only the ship lookup may fail.
pub fn resolve<S: JsonSource>(
    eve: &EveClient<S>,
    ids: ParticipantIds,
) -> Result<Participant, StoryError> {
    tracing::debug!(character_id = ids.character_id, "getting character info");

    let name = eve.character_name(ids.character_id)?;

    let ship = match eve.type_name(ids.ship_type_id) {
        Ok(ship) => ShipName::Resolved(ship),
        Err(err) => {
            tracing::warn!(
                ship_type_id = ids.ship_type_id,
                error = %err,
                "ship lookup failed"
            );
            ShipName::Fallback
        }
    };

    let corporation = eve.corporation_name(ids.corporation_id)?;

    tracing::debug!(character_id = ids.character_id, "got character info");

    Ok(Participant::builder(ids.character_id, ids.ship_type_id)
        .name(name)
        .ship(ship)
        .corporation(corporation)
        .build())
}

pub fn resolve_roster<S: JsonSource>(
    eve: &EveClient<S>,
    attackers: &[RawAttacker],
    cap: usize,
) -> Result<Roster, StoryError> {
    tracing::debug!(total = attackers.len(), cap, "getting attackers");

    let remaining = attackers.len().saturating_sub(cap);

    let resolved = attackers
        .iter()
        .take(cap)
        .map(|raw| resolve(eve, ParticipantIds::from_attacker(raw)?))
        .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!(resolved = resolved.len(), remaining, "got attackers");
    Ok(Roster { resolved, remaining })
}

pub fn resolve_victim<S: JsonSource>(
    eve: &EveClient<S>,
    victim: &RawVictim,
) -> Result<Participant, StoryError> {
    tracing::debug!("getting victim");
    let participant = resolve(eve, ParticipantIds::from_victim(victim)?)?;
    tracing::debug!("got victim");
    Ok(participant)
}
