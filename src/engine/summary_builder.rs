use crate::engine::esi::{EveClient, JsonSource};
use crate::engine::resolver::{resolve_roster, resolve_victim};
use crate::error::StoryError;
use crate::model::killmail::{Killmail, RawAttacker};
use crate::model::participant::Participant;
use crate::model::summary::Summary;

/// Pilots singled out by the damage scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Standouts {
    pub top_damage: String,
    pub final_blow: String,
}

/// `"Alpha in a Rifter, Bravo in a Slasher and 3 others"`
pub fn format_attackers(resolved: &[Participant], remaining: usize) -> String {
    tracing::debug!("creating attacker string");

    let mut text = resolved
        .iter()
        .map(describe)
        .collect::<Vec<_>>()
        .join(", ");

    if remaining > 0 {
        if text.is_empty() {
            text = format!("and {} others", remaining);
        } else {
            text.push_str(&format!(" and {} others", remaining));
        }
    }

    tracing::debug!(attackers = %text, remaining, "attacker string");
    text
}

pub fn format_victim(victim: &Participant) -> String {
    tracing::debug!("creating victim string");
    describe(victim)
}

fn describe(p: &Participant) -> String {
    format!("{} in a {}", p.name(), p.ship())
}

/// Scans the whole raw attacker list, not just the resolved head, so the
/// two standouts are named even when they sit past the roster cap.
///
/// Damage ties go to the earliest attacker. If several entries carry the
/// final blow flag the last one wins.
pub fn find_damage_and_final_blow<S: JsonSource>(
    eve: &EveClient<S>,
    attackers: &[RawAttacker],
) -> Result<Standouts, StoryError> {
    tracing::debug!("finding top damage and final blow");

    let mut top: Option<&RawAttacker> = None;
    let mut killer: Option<&RawAttacker> = None;

    for attacker in attackers {
        if top.map_or(true, |t| attacker.damage_done > t.damage_done) {
            top = Some(attacker);
        }
        if attacker.final_blow {
            killer = Some(attacker);
        }
    }

    let top = top.ok_or(StoryError::NoAttackers)?;
    let killer = killer.ok_or(StoryError::NoFinalBlow)?;

    let final_blow = eve.character_name(character_of(killer)?)?;
    let top_damage = eve.character_name(character_of(top)?)?;

    tracing::debug!(%top_damage, %final_blow, "found top damage and final blow");
    Ok(Standouts {
        top_damage,
        final_blow,
    })
}

fn character_of(raw: &RawAttacker) -> Result<u64, StoryError> {
    raw.character_id.ok_or(StoryError::MissingId {
        role: "attacker",
        field: "character_id",
    })
}

/// Everything the prompt needs from one killmail.
pub fn build_summary<S: JsonSource>(
    eve: &EveClient<S>,
    killmail: &Killmail,
    cap: usize,
) -> Result<Summary, StoryError> {
    tracing::debug!(killmail_id = %killmail.id, "populating story");

    let roster = resolve_roster(eve, &killmail.detail.attackers, cap)?;
    let victim = resolve_victim(eve, &killmail.detail.victim)?;

    let attacking_corp = roster
        .resolved
        .first()
        .map(|p| p.corporation().to_string())
        .ok_or(StoryError::NoAttackers)?;

    let standouts = find_damage_and_final_blow(eve, &killmail.detail.attackers)?;

    Summary::builder()
        .attackers(format_attackers(&roster.resolved, roster.remaining))
        .attacking_corp(attacking_corp)
        .victim(format_victim(&victim))
        .victim_corp(victim.corporation())
        .top_damage(standouts.top_damage)
        .final_blow(standouts.final_blow)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::test_support::{attacker, client, FakeSource};
    use crate::model::killmail::KillmailDetail;
    use crate::model::participant::ShipName;
    use serde_json::json;

    fn pilot(name: &str, ship: &str) -> Participant {
        Participant::builder(1, 3)
            .name(name)
            .corporation("Corp")
            .ship(ShipName::Resolved(ship.into()))
            .build()
    }

    fn raws(values: Vec<serde_json::Value>) -> Vec<RawAttacker> {
        values
            .into_iter()
            .map(|v| serde_json::from_value(v).unwrap())
            .collect()
    }

    #[test]
    fn attackers_are_comma_joined() {
        let text = format_attackers(&[pilot("Alpha", "Rifter"), pilot("Bravo", "Slasher")], 0);
        assert_eq!(text, "Alpha in a Rifter, Bravo in a Slasher");
    }

    #[test]
    fn remainder_is_appended() {
        let text = format_attackers(&[pilot("Alpha", "Rifter")], 3);
        assert_eq!(text, "Alpha in a Rifter and 3 others");
    }

    #[test]
    fn empty_roster_with_remainder_has_no_leading_separator() {
        assert_eq!(format_attackers(&[], 2), "and 2 others");
        assert_eq!(format_attackers(&[], 0), "");
    }

    #[test]
    fn fallback_ship_shows_in_victim_text() {
        let victim = Participant::builder(1, 3).name("Charlie").build();
        assert_eq!(format_victim(&victim), "Charlie in a Unknown Ship");
    }

    #[test]
    fn top_damage_and_final_blow_are_picked_from_raw_list() {
        let source = FakeSource::new()
            .with_character(1, "Alpha")
            .with_character(2, "Bravo")
            .with_character(3, "Charlie");
        let eve = client(&source);
        let attackers = raws(vec![
            attacker(1, 10, 587, 10, true),
            attacker(2, 10, 587, 50, false),
            attacker(3, 10, 587, 20, false),
        ]);

        let found = find_damage_and_final_blow(&eve, &attackers).unwrap();
        assert_eq!(found.top_damage, "Bravo");
        assert_eq!(found.final_blow, "Alpha");
    }

    #[test]
    fn damage_ties_go_to_first_attacker() {
        let source = FakeSource::new()
            .with_character(1, "Alpha")
            .with_character(2, "Bravo");
        let eve = client(&source);
        let attackers = raws(vec![
            attacker(1, 10, 587, 40, false),
            attacker(2, 10, 587, 40, true),
        ]);

        let found = find_damage_and_final_blow(&eve, &attackers).unwrap();
        assert_eq!(found.top_damage, "Alpha");
        assert_eq!(found.final_blow, "Bravo");
    }

    #[test]
    fn standouts_past_the_cap_are_still_named() {
        let mut source = FakeSource::new().with_type(587, "Rifter").with_corporation(10, "Corp A");
        let mut values = Vec::new();
        for id in 1..=12u64 {
            source = source.with_character(id, &format!("Pilot {id}"));
            let damage = if id == 12 { 900 } else { 10 };
            values.push(attacker(id, 10, 587, damage, id == 11));
        }
        let eve = client(&source);

        let found = find_damage_and_final_blow(&eve, &raws(values)).unwrap();
        assert_eq!(found.top_damage, "Pilot 12");
        assert_eq!(found.final_blow, "Pilot 11");
    }

    #[test]
    fn missing_final_blow_is_fatal() {
        let source = FakeSource::new().with_character(1, "Alpha");
        let eve = client(&source);
        let attackers = raws(vec![attacker(1, 10, 587, 10, false)]);

        let err = find_damage_and_final_blow(&eve, &attackers).unwrap_err();
        assert!(matches!(err, StoryError::NoFinalBlow));
    }

    #[test]
    fn last_flagged_attacker_gets_the_final_blow() {
        let source = FakeSource::new()
            .with_character(1, "Alpha")
            .with_character(2, "Bravo")
            .with_character(3, "Charlie");
        let eve = client(&source);
        let attackers = raws(vec![
            attacker(1, 10, 587, 10, true),
            attacker(2, 10, 587, 50, false),
            attacker(3, 10, 587, 20, true),
        ]);

        let found = find_damage_and_final_blow(&eve, &attackers).unwrap();
        assert_eq!(found.final_blow, "Charlie");
        assert_eq!(found.top_damage, "Bravo");
    }

    #[test]
    fn summary_takes_corporation_from_first_attacker() {
        let source = FakeSource::new()
            .with_character(1, "Alpha")
            .with_character(2, "Bravo")
            .with_character(3, "Victor")
            .with_type(587, "Rifter")
            .with_type(17480, "Procurer")
            .with_corporation(10, "Corp A")
            .with_corporation(11, "Corp C")
            .with_corporation(20, "Corp V");
        let eve = client(&source);
        let killmail = Killmail {
            id: "5".into(),
            hash: "h".into(),
            detail: KillmailDetail {
                attackers: raws(vec![
                    attacker(1, 10, 587, 100, false),
                    attacker(2, 11, 587, 300, true),
                ]),
                victim: serde_json::from_value(json!({
                    "character_id": 3, "corporation_id": 20, "ship_type_id": 17480
                }))
                .unwrap(),
            },
        };

        let summary = build_summary(&eve, &killmail, 1).unwrap();
        assert_eq!(summary.attackers(), "Alpha in a Rifter and 1 others");
        assert_eq!(summary.attacking_corp(), "Corp A");
        assert_eq!(summary.victim(), "Victor in a Procurer");
        assert_eq!(summary.victim_corp(), "Corp V");
        assert_eq!(summary.top_damage(), "Bravo");
        assert_eq!(summary.final_blow(), "Bravo");
    }

    #[test]
    fn killmail_without_attackers_is_rejected() {
        let source = FakeSource::new()
            .with_character(3, "Victor")
            .with_type(17480, "Procurer")
            .with_corporation(20, "Corp V");
        let eve = client(&source);
        let killmail = Killmail {
            id: "5".into(),
            hash: "h".into(),
            detail: KillmailDetail {
                attackers: Vec::new(),
                victim: serde_json::from_value(json!({
                    "character_id": 3, "corporation_id": 20, "ship_type_id": 17480
                }))
                .unwrap(),
            },
        };

        assert!(matches!(
            build_summary(&eve, &killmail, 10),
            Err(StoryError::NoAttackers)
        ));
    }
}
