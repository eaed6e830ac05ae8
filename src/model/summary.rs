use crate::error::StoryError;

/// Facts about one killmail, ready to be dropped into a prompt.
/// Read-only once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    attackers: String,
    attacking_corp: String,
    victim: String,
    victim_corp: String,
    top_damage: String,
    final_blow: String,
}

impl Summary {
    pub fn builder() -> SummaryBuilder {
        SummaryBuilder::default()
    }

    pub fn attackers(&self) -> &str {
        &self.attackers
    }

    pub fn attacking_corp(&self) -> &str {
        &self.attacking_corp
    }

    pub fn victim(&self) -> &str {
        &self.victim
    }

    pub fn victim_corp(&self) -> &str {
        &self.victim_corp
    }

    pub fn top_damage(&self) -> &str {
        &self.top_damage
    }

    pub fn final_blow(&self) -> &str {
        &self.final_blow
    }
}

#[derive(Debug, Default)]
pub struct SummaryBuilder {
    attackers: Option<String>,
    attacking_corp: Option<String>,
    victim: Option<String>,
    victim_corp: Option<String>,
    top_damage: Option<String>,
    final_blow: Option<String>,
}

impl SummaryBuilder {
    pub fn attackers(mut self, text: impl Into<String>) -> Self {
        self.attackers = Some(text.into());
        self
    }

    pub fn attacking_corp(mut self, name: impl Into<String>) -> Self {
        self.attacking_corp = Some(name.into());
        self
    }

    pub fn victim(mut self, text: impl Into<String>) -> Self {
        self.victim = Some(text.into());
        self
    }

    pub fn victim_corp(mut self, name: impl Into<String>) -> Self {
        self.victim_corp = Some(name.into());
        self
    }

    pub fn top_damage(mut self, name: impl Into<String>) -> Self {
        self.top_damage = Some(name.into());
        self
    }

    pub fn final_blow(mut self, name: impl Into<String>) -> Self {
        self.final_blow = Some(name.into());
        self
    }

    pub fn build(self) -> Result<Summary, StoryError> {
        Ok(Summary {
            attackers: self.attackers.ok_or(StoryError::IncompleteSummary("attackers"))?,
            attacking_corp: self
                .attacking_corp
                .ok_or(StoryError::IncompleteSummary("attacking corporation"))?,
            victim: self.victim.ok_or(StoryError::IncompleteSummary("victim"))?,
            victim_corp: self
                .victim_corp
                .ok_or(StoryError::IncompleteSummary("victim corporation"))?,
            top_damage: self.top_damage.ok_or(StoryError::IncompleteSummary("top damage"))?,
            final_blow: self.final_blow.ok_or(StoryError::IncompleteSummary("final blow"))?,
        })
    }
}
