use crate::{
    BuildSetting, BuildStrategy, IdentToken, PileKind, Rank, SolitairePile, Suit,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The seven pile variants the factory knows how to assemble.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PileArchetype {
    Cell,
    File,
    FileAutowaste,
    Foundation,
    Stock,
    StockDealer,
    Waste,
}

/// Property bag a game definition fills in before asking for a pile. Every
/// field is optional; which ones a variant actually needs is listed by
/// [`required_fields`] and enforced by [`validate_config`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PileConfig {
    #[serde(default)]
    pub initial_count: Option<usize>,
    #[serde(default)]
    pub strategy: Option<BuildStrategy>,
    /// Face-up cards after the opening deal.
    #[serde(default)]
    pub initial_shown: Option<usize>,
    #[serde(default)]
    pub association_tokens: Option<Vec<IdentToken>>,
    #[serde(default)]
    pub auto_move_threshold: Option<usize>,
    #[serde(default)]
    pub correspondent_suit: Option<Suit>,
    #[serde(default)]
    pub deal_amount: Option<usize>,
    /// `None` means unlimited restocks.
    #[serde(default)]
    pub restock_allowance: Option<u32>,
}

/// A malformed property bag. These indicate a bug in the assembling code and
/// are never retried, unlike gameplay probes that simply return `None`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AssemblyError {
    #[error("missing required field `{field}` for {archetype:?}")]
    MissingField {
        archetype: PileArchetype,
        field: &'static str,
    },
    #[error("{archetype:?} takes exactly one association token, got {got}")]
    AssociationArity {
        archetype: PileArchetype,
        got: usize,
    },
    #[error("{archetype:?} needs at least one association token")]
    NoAssociations { archetype: PileArchetype },
}

/// Which bag fields a variant requires when assembled strictly.
pub fn required_fields(archetype: PileArchetype) -> &'static [&'static str] {
    match archetype {
        PileArchetype::Cell => &[],
        PileArchetype::File => &["initial_count", "strategy", "initial_shown"],
        PileArchetype::FileAutowaste => &[
            "initial_count",
            "strategy",
            "initial_shown",
            "association_tokens",
            "auto_move_threshold",
        ],
        PileArchetype::Foundation => &["strategy", "correspondent_suit"],
        PileArchetype::Stock => &["association_tokens", "deal_amount", "restock_allowance"],
        PileArchetype::StockDealer => &["association_tokens", "deal_amount"],
        PileArchetype::Waste => &["initial_shown"],
    }
}

/// Strict-mode presence check over [`required_fields`].
pub fn validate_config(archetype: PileArchetype, config: &PileConfig) -> Result<(), AssemblyError> {
    for &field in required_fields(archetype) {
        let present = match field {
            "initial_count" => config.initial_count.is_some(),
            "strategy" => config.strategy.is_some(),
            "initial_shown" => config.initial_shown.is_some(),
            "association_tokens" => config.association_tokens.is_some(),
            "auto_move_threshold" => config.auto_move_threshold.is_some(),
            "correspondent_suit" => config.correspondent_suit.is_some(),
            "deal_amount" => config.deal_amount.is_some(),
            "restock_allowance" => config.restock_allowance.is_some(),
            _ => unreachable!("unknown required field"),
        };
        if !present {
            return Err(AssemblyError::MissingField { archetype, field });
        }
    }
    Ok(())
}

/// Builds a pile from the bag, filling unset fields with the variant's
/// defaults. Structural problems (association arity) still error.
pub fn build_pile(
    archetype: PileArchetype,
    config: &PileConfig,
) -> Result<SolitairePile, AssemblyError> {
    match archetype {
        PileArchetype::Cell => Ok(SolitairePile::new(PileKind::Cell, BuildStrategy::any(), 0)),
        PileArchetype::File => {
            let initial_count = config.initial_count.unwrap_or(0);
            let shown = config.initial_shown.unwrap_or(1).max(1);
            let strategy = config
                .strategy
                .unwrap_or_else(|| BuildStrategy::alternating_color(BuildSetting::descending()));
            Ok(SolitairePile::new(
                PileKind::File {
                    partition_index: initial_count as i32 - shown as i32,
                    available_index: initial_count as i32 - 1,
                },
                strategy,
                initial_count,
            ))
        }
        PileArchetype::FileAutowaste => {
            let initial_count = config.initial_count.unwrap_or(0);
            let shown = config.initial_shown.unwrap_or(1).max(1);
            let strategy = config
                .strategy
                .unwrap_or_else(|| BuildStrategy::same_suit(BuildSetting::descending(), None));
            let waste = one_association(archetype, config)?;
            let auto_move_threshold = config
                .auto_move_threshold
                .unwrap_or(Rank::COUNT as usize)
                .max(1);
            Ok(SolitairePile::new(
                PileKind::FileAutowaste {
                    partition_index: initial_count as i32 - shown as i32,
                    available_index: initial_count as i32 - 1,
                    waste,
                    auto_move_threshold,
                },
                strategy,
                initial_count,
            ))
        }
        PileArchetype::Foundation => {
            let suit = config.correspondent_suit;
            let setting = config
                .strategy
                .map(|strategy| strategy.setting)
                .unwrap_or_else(|| BuildSetting::ascending_from(Rank::Ace));
            Ok(SolitairePile::new(
                PileKind::Foundation { suit },
                BuildStrategy::same_suit(setting, suit),
                0,
            ))
        }
        PileArchetype::Stock => {
            let dest = one_association(archetype, config)?;
            Ok(SolitairePile::new(
                PileKind::Stock {
                    dest: Some(dest),
                    flip_amount: config.deal_amount.unwrap_or(1).max(1),
                    total_restock: config.restock_allowance,
                    restock_count: 0,
                },
                BuildStrategy::no_build(),
                0,
            ))
        }
        PileArchetype::StockDealer => {
            let dests = config
                .association_tokens
                .clone()
                .filter(|tokens| !tokens.is_empty())
                .ok_or(AssemblyError::NoAssociations { archetype })?;
            Ok(SolitairePile::new(
                PileKind::StockDealer {
                    dests,
                    deal_count: config.deal_amount.unwrap_or(1).max(1),
                },
                BuildStrategy::no_build(),
                0,
            ))
        }
        PileArchetype::Waste => Ok(SolitairePile::new(
            PileKind::Waste {
                shown_count: config.initial_shown.unwrap_or(1).max(1),
            },
            BuildStrategy::no_build(),
            0,
        )),
    }
}

/// Builds a whole uniform foundation set, one per suit.
pub fn build_foundation_set(config: &PileConfig) -> Result<Vec<SolitairePile>, AssemblyError> {
    Suit::ALL
        .iter()
        .map(|&suit| {
            let mut per_suit = config.clone();
            per_suit.correspondent_suit = Some(suit);
            build_pile(PileArchetype::Foundation, &per_suit)
        })
        .collect()
}

fn one_association(
    archetype: PileArchetype,
    config: &PileConfig,
) -> Result<IdentToken, AssemblyError> {
    let tokens = config
        .association_tokens
        .as_ref()
        .ok_or(AssemblyError::AssociationArity { archetype, got: 0 })?;
    if tokens.len() != 1 {
        return Err(AssemblyError::AssociationArity {
            archetype,
            got: tokens.len(),
        });
    }
    Ok(tokens[0].clone())
}
