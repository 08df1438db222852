//! Static formation definitions.
//!
//! One table entry per supported (squad size, shape, scheme) combination.
//! Every calculator consults these tables instead of hard-coding slot
//! names: slot sets vary by squad size, by shape, and by scheme (pairs
//! collapse two individual slots into one pair unit).

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::error::RotationError;
use crate::models::{FormationShape, SlotId, SubstitutionScheme, TeamConfig};

/// Ordered slot layout for one team configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormationDefinition {
    pub scheme: SubstitutionScheme,
    pub field_slots: Vec<SlotId>,
    pub substitute_slots: Vec<SlotId>,
}

impl FormationDefinition {
    /// Full position order including the goalie slot, goalie first.
    pub fn position_order(&self) -> Vec<SlotId> {
        let mut order = Vec::with_capacity(1 + self.field_slots.len() + self.substitute_slots.len());
        order.push(SlotId::Goalie);
        order.extend(self.field_slots.iter().copied());
        order.extend(self.substitute_slots.iter().copied());
        order
    }

    /// Rank of a slot in the full position order.
    pub fn position_index(&self, slot: SlotId) -> Option<usize> {
        self.position_order().iter().position(|s| *s == slot)
    }

    pub fn substitute_count(&self) -> usize {
        self.substitute_slots.len()
    }

    pub fn first_substitute_slot(&self) -> Option<SlotId> {
        self.substitute_slots.first().copied()
    }

    pub fn is_field_slot(&self, slot: SlotId) -> bool {
        self.field_slots.contains(&slot)
    }

    pub fn is_substitute_slot(&self, slot: SlotId) -> bool {
        self.substitute_slots.contains(&slot)
    }
}

fn individual(shape: FormationShape, substitute_count: u8) -> FormationDefinition {
    let field_slots = match shape {
        FormationShape::TwoTwo => vec![
            SlotId::LeftDefender,
            SlotId::RightDefender,
            SlotId::LeftAttacker,
            SlotId::RightAttacker,
        ],
        FormationShape::OneTwoOne => {
            vec![SlotId::Defender, SlotId::LeftMid, SlotId::RightMid, SlotId::Attacker]
        }
        FormationShape::TwoTwoTwo => vec![
            SlotId::LeftDefender,
            SlotId::RightDefender,
            SlotId::LeftMid,
            SlotId::RightMid,
            SlotId::LeftAttacker,
            SlotId::RightAttacker,
        ],
        FormationShape::TwoThreeOne => vec![
            SlotId::LeftDefender,
            SlotId::RightDefender,
            SlotId::LeftMid,
            SlotId::CenterMid,
            SlotId::RightMid,
            SlotId::Attacker,
        ],
    };
    FormationDefinition {
        scheme: SubstitutionScheme::Individual,
        field_slots,
        substitute_slots: (1..=substitute_count).map(SlotId::Substitute).collect(),
    }
}

fn pairs() -> FormationDefinition {
    FormationDefinition {
        scheme: SubstitutionScheme::Pairs,
        field_slots: vec![SlotId::LeftPair, SlotId::RightPair],
        substitute_slots: vec![SlotId::SubPair],
    }
}

type DefinitionKey = (u8, FormationShape, SubstitutionScheme);

static DEFINITIONS: Lazy<HashMap<DefinitionKey, FormationDefinition>> = Lazy::new(|| {
    let mut table = HashMap::new();

    // 5v5: 4 outfield players, squads of 6-8.
    for squad in 6..=8u8 {
        for shape in [FormationShape::TwoTwo, FormationShape::OneTwoOne] {
            table.insert(
                (squad, shape, SubstitutionScheme::Individual),
                individual(shape, squad - 5),
            );
        }
    }

    // 7v7: 6 outfield players, squads of 9-10.
    for squad in 9..=10u8 {
        for shape in [FormationShape::TwoTwoTwo, FormationShape::TwoThreeOne] {
            table.insert(
                (squad, shape, SubstitutionScheme::Individual),
                individual(shape, squad - 7),
            );
        }
    }

    // Pairs play is a 7-player 5v5 layout: two field pairs plus one
    // substitute pair around the goalie. The selected shape does not change
    // the pair layout.
    for shape in [FormationShape::TwoTwo, FormationShape::OneTwoOne] {
        table.insert((7, shape, SubstitutionScheme::Pairs), pairs());
    }

    table
});

/// Look up the slot layout for a team configuration and shape. Fails for
/// any combination outside the supported table.
pub fn formation_definition(
    config: &TeamConfig,
    shape: FormationShape,
) -> Result<&'static FormationDefinition, RotationError> {
    let unknown = || RotationError::UnknownFormation {
        squad_size: config.squad_size,
        shape: shape.code().to_string(),
        scheme: match config.scheme {
            SubstitutionScheme::Pairs => "pairs".to_string(),
            SubstitutionScheme::Individual => "individual".to_string(),
        },
    };

    if !shape.fits(config.format) || !config.format.squad_range().contains(&config.squad_size) {
        return Err(unknown());
    }
    DEFINITIONS.get(&(config.squad_size, shape, config.scheme)).ok_or_else(unknown)
}
