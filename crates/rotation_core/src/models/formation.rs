use serde::{Deserialize, Serialize};

use super::player::{PlayerId, PlayerRole};

/// Slot key. The closed set covers every supported layout; which subset is
/// live for a given match comes from the formation definition, never from
/// string keys scattered through the calculators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotId {
    Goalie,
    LeftDefender,
    RightDefender,
    Defender,
    LeftMid,
    CenterMid,
    RightMid,
    LeftAttacker,
    RightAttacker,
    Attacker,
    LeftPair,
    RightPair,
    SubPair,
    /// Numbered substitute slot, 1-based; 1 is the highest priority
    /// ("next on") slot.
    Substitute(u8),
}

impl SlotId {
    pub fn is_pair(&self) -> bool {
        matches!(self, SlotId::LeftPair | SlotId::RightPair | SlotId::SubPair)
    }

    pub fn is_field_pair(&self) -> bool {
        matches!(self, SlotId::LeftPair | SlotId::RightPair)
    }

    pub fn is_substitute(&self) -> bool {
        matches!(self, SlotId::Substitute(_) | SlotId::SubPair)
    }

    /// The other field pair, for flipping the next-pair pointer.
    pub fn opposite_field_pair(&self) -> Option<SlotId> {
        match self {
            SlotId::LeftPair => Some(SlotId::RightPair),
            SlotId::RightPair => Some(SlotId::LeftPair),
            _ => None,
        }
    }
}

/// Position label inside a pair slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PairRole {
    Defender,
    Attacker,
}

/// Time-tracking role for a slot, taking the pair label into account.
/// Members of the substitute pair keep the substitute role whatever their
/// label says.
pub fn role_for(slot: SlotId, pair_role: Option<PairRole>) -> PlayerRole {
    match slot {
        SlotId::Goalie => PlayerRole::Goalie,
        SlotId::LeftDefender | SlotId::RightDefender | SlotId::Defender => PlayerRole::Defender,
        SlotId::LeftMid | SlotId::CenterMid | SlotId::RightMid => PlayerRole::Midfielder,
        SlotId::LeftAttacker | SlotId::RightAttacker | SlotId::Attacker => PlayerRole::Attacker,
        SlotId::Substitute(_) | SlotId::SubPair => PlayerRole::Substitute,
        SlotId::LeftPair | SlotId::RightPair => match pair_role {
            Some(PairRole::Defender) => PlayerRole::Defender,
            Some(PairRole::Attacker) => PlayerRole::Attacker,
            None => PlayerRole::Substitute,
        },
    }
}

/// Occupant of one slot: a single player, or a defender/attacker pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Occupant {
    Single(PlayerId),
    Pair { defender: Option<PlayerId>, attacker: Option<PlayerId> },
}

impl Occupant {
    pub fn empty_pair() -> Self {
        Occupant::Pair { defender: None, attacker: None }
    }

    pub fn single(&self) -> Option<&PlayerId> {
        match self {
            Occupant::Single(id) => Some(id),
            Occupant::Pair { .. } => None,
        }
    }

    /// Both pair members, when the occupant is a complete pair.
    pub fn complete_pair(&self) -> Option<(PlayerId, PlayerId)> {
        match self {
            Occupant::Pair { defender: Some(d), attacker: Some(a) } => {
                Some((d.clone(), a.clone()))
            }
            _ => None,
        }
    }

    /// Ids held by this occupant, defender before attacker for pairs.
    pub fn ids(&self) -> Vec<PlayerId> {
        match self {
            Occupant::Single(id) => vec![id.clone()],
            Occupant::Pair { defender, attacker } => {
                defender.iter().chain(attacker.iter()).cloned().collect()
            }
        }
    }
}

/// One entry of the arena-style slot array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotEntry {
    pub slot: SlotId,
    pub occupant: Occupant,
}

/// Current assignment of players to slots. Slots are stored in definition
/// order (field slots first, then substitute slots); the goalie is held
/// separately and never appears in the array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Formation {
    pub goalie: PlayerId,
    pub slots: Vec<SlotEntry>,
}

impl Formation {
    pub fn occupant(&self, slot: SlotId) -> Option<&Occupant> {
        self.slots.iter().find(|e| e.slot == slot).map(|e| &e.occupant)
    }

    pub fn occupant_mut(&mut self, slot: SlotId) -> Option<&mut Occupant> {
        self.slots.iter_mut().find(|e| e.slot == slot).map(|e| &mut e.occupant)
    }

    /// Single occupant of an individual slot.
    pub fn single(&self, slot: SlotId) -> Option<&PlayerId> {
        self.occupant(slot).and_then(Occupant::single)
    }

    pub fn set_single(&mut self, slot: SlotId, id: PlayerId) {
        if let Some(occ) = self.occupant_mut(slot) {
            *occ = Occupant::Single(id);
        }
    }

    pub fn set_pair_member(&mut self, slot: SlotId, pair_role: PairRole, id: Option<PlayerId>) {
        if let Some(Occupant::Pair { defender, attacker }) = self.occupant_mut(slot) {
            match pair_role {
                PairRole::Defender => *defender = id,
                PairRole::Attacker => *attacker = id,
            }
        }
    }

    /// Locate a player: the slot holding them and, for pair slots, the
    /// label they carry inside the pair. The goalie reports `Goalie`.
    pub fn locate(&self, id: &PlayerId) -> Option<(SlotId, Option<PairRole>)> {
        if self.goalie == *id {
            return Some((SlotId::Goalie, None));
        }
        for entry in &self.slots {
            match &entry.occupant {
                Occupant::Single(held) if held == id => return Some((entry.slot, None)),
                Occupant::Pair { defender, attacker } => {
                    if defender.as_deref() == Some(id.as_str()) {
                        return Some((entry.slot, Some(PairRole::Defender)));
                    }
                    if attacker.as_deref() == Some(id.as_str()) {
                        return Some((entry.slot, Some(PairRole::Attacker)));
                    }
                }
                _ => {}
            }
        }
        None
    }

    /// Every id assigned to a field or substitute slot, in slot order,
    /// goalie excluded.
    pub fn assigned_ids(&self) -> Vec<PlayerId> {
        self.slots.iter().flat_map(|e| e.occupant.ids()).collect()
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_two_formation() -> Formation {
        Formation {
            goalie: "gk".into(),
            slots: vec![
                SlotEntry {
                    slot: SlotId::LeftDefender,
                    occupant: Occupant::Single("1".into()),
                },
                SlotEntry {
                    slot: SlotId::RightDefender,
                    occupant: Occupant::Single("2".into()),
                },
                SlotEntry {
                    slot: SlotId::LeftAttacker,
                    occupant: Occupant::Single("3".into()),
                },
                SlotEntry {
                    slot: SlotId::RightAttacker,
                    occupant: Occupant::Single("4".into()),
                },
                SlotEntry {
                    slot: SlotId::Substitute(1),
                    occupant: Occupant::Single("5".into()),
                },
            ],
        }
    }

    #[test]
    fn locate_finds_goalie_field_and_bench() {
        let f = two_two_formation();
        assert_eq!(f.locate(&"gk".into()), Some((SlotId::Goalie, None)));
        assert_eq!(f.locate(&"2".into()), Some((SlotId::RightDefender, None)));
        assert_eq!(f.locate(&"5".into()), Some((SlotId::Substitute(1), None)));
        assert_eq!(f.locate(&"missing".into()), None);
    }

    #[test]
    fn locate_reports_pair_labels() {
        let f = Formation {
            goalie: "gk".into(),
            slots: vec![SlotEntry {
                slot: SlotId::LeftPair,
                occupant: Occupant::Pair {
                    defender: Some("d".into()),
                    attacker: Some("a".into()),
                },
            }],
        };
        assert_eq!(f.locate(&"d".into()), Some((SlotId::LeftPair, Some(PairRole::Defender))));
        assert_eq!(f.locate(&"a".into()), Some((SlotId::LeftPair, Some(PairRole::Attacker))));
    }

    #[test]
    fn role_for_respects_sub_pair_rule() {
        assert_eq!(role_for(SlotId::LeftPair, Some(PairRole::Defender)), PlayerRole::Defender);
        assert_eq!(role_for(SlotId::RightPair, Some(PairRole::Attacker)), PlayerRole::Attacker);
        // Substitute pair members stay substitutes whatever their label.
        assert_eq!(role_for(SlotId::SubPair, Some(PairRole::Attacker)), PlayerRole::Substitute);
        assert_eq!(role_for(SlotId::Substitute(2), None), PlayerRole::Substitute);
        assert_eq!(role_for(SlotId::CenterMid, None), PlayerRole::Midfielder);
    }

    #[test]
    fn assigned_ids_in_slot_order() {
        let f = two_two_formation();
        assert_eq!(f.assigned_ids(), vec!["1", "2", "3", "4", "5"]);
    }
}
