use std::fmt;

pub const MISSING_NAME: &str = "Missing Name";
pub const MISSING_CORP: &str = "Missing Corp";
pub const UNKNOWN_SHIP: &str = "Unknown Ship";

/// Outcome of the ship type lookup. The only lookup allowed to fail softly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShipName {
    Resolved(String),
    Fallback,
}

impl ShipName {
    pub fn as_str(&self) -> &str {
        match self {
            ShipName::Resolved(name) => name,
            ShipName::Fallback => UNKNOWN_SHIP,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, ShipName::Fallback)
    }
}

impl fmt::Display for ShipName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A pilot on either side of the killmail, with every id expanded to a name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    character_id: u64,
    name: String,
    corporation: String,
    ship_type_id: u64,
    ship: ShipName,
}

impl Participant {
    pub fn builder(character_id: u64, ship_type_id: u64) -> ParticipantBuilder {
        ParticipantBuilder {
            character_id,
            ship_type_id,
            name: None,
            corporation: None,
            ship: None,
        }
    }

    pub fn character_id(&self) -> u64 {
        self.character_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn corporation(&self) -> &str {
        &self.corporation
    }

    pub fn ship_type_id(&self) -> u64 {
        self.ship_type_id
    }

    pub fn ship(&self) -> &ShipName {
        &self.ship
    }
}

pub struct ParticipantBuilder {
    character_id: u64,
    ship_type_id: u64,
    name: Option<String>,
    corporation: Option<String>,
    ship: Option<ShipName>,
}

impl ParticipantBuilder {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn corporation(mut self, corporation: impl Into<String>) -> Self {
        self.corporation = Some(corporation.into());
        self
    }

    pub fn ship(mut self, ship: ShipName) -> Self {
        self.ship = Some(ship);
        self
    }

    /// Unset names fall back to the "missing" sentinels.
    pub fn build(self) -> Participant {
        Participant {
            character_id: self.character_id,
            name: self.name.unwrap_or_else(|| MISSING_NAME.to_string()),
            corporation: self.corporation.unwrap_or_else(|| MISSING_CORP.to_string()),
            ship_type_id: self.ship_type_id,
            ship: self.ship.unwrap_or(ShipName::Fallback),
        }
    }
}
