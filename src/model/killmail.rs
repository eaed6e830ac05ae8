use serde::{Deserialize, Serialize};

/// One attacker entry as ESI reports it.
/// NPC attackers come without a character id, hence the options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawAttacker {
    #[serde(default)]
    pub character_id: Option<u64>,
    #[serde(default)]
    pub corporation_id: Option<u64>,
    #[serde(default)]
    pub ship_type_id: Option<u64>,
    pub damage_done: u64,
    pub final_blow: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawVictim {
    #[serde(default)]
    pub character_id: Option<u64>,
    #[serde(default)]
    pub corporation_id: Option<u64>,
    #[serde(default)]
    pub ship_type_id: Option<u64>,
}

/// Body of `/killmails/{id}/{hash}/`. Only the fields the story needs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KillmailDetail {
    pub attackers: Vec<RawAttacker>,
    pub victim: RawVictim,
}

/// A fetched killmail. Never changes after the fetcher hands it out.
#[derive(Debug, Clone)]
pub struct Killmail {
    pub id: String,
    pub hash: String,
    pub detail: KillmailDetail,
}
