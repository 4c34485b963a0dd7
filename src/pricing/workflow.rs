//! Staged confirmation of a quote in progress.
//!
//! The stage is never stored. It is derived from the confirmation flags and
//! the latest evaluation, so editing an earlier stage just reopens it.

use serde::{Deserialize, Serialize};

use super::models::FastenerMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuoteStage {
    SpecifyingComponents,
    SpecifyingFasteners,
    SpecifyingCommercials,
    SpecifyingQuantity,
    Complete,
}

impl QuoteStage {
    const ORDER: [QuoteStage; 4] = [
        QuoteStage::SpecifyingComponents,
        QuoteStage::SpecifyingFasteners,
        QuoteStage::SpecifyingCommercials,
        QuoteStage::SpecifyingQuantity,
    ];

    /// Manual bolt pricing disables components and has no quantity step
    pub fn applies_to(&self, mode: FastenerMode) -> bool {
        match (self, mode) {
            (QuoteStage::SpecifyingComponents, FastenerMode::Manual) => false,
            (QuoteStage::SpecifyingQuantity, FastenerMode::Manual) => false,
            (QuoteStage::Complete, _) => false,
            _ => true,
        }
    }
}

/// Per-stage confirmation flags, passed by value
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteProgress {
    #[serde(default)]
    pub components_confirmed: bool,
    #[serde(default)]
    pub fasteners_confirmed: bool,
    #[serde(default)]
    pub commercials_confirmed: bool,
    #[serde(default)]
    pub quantity_confirmed: bool,
}

impl QuoteProgress {
    pub fn is_confirmed(&self, stage: QuoteStage) -> bool {
        match stage {
            QuoteStage::SpecifyingComponents => self.components_confirmed,
            QuoteStage::SpecifyingFasteners => self.fasteners_confirmed,
            QuoteStage::SpecifyingCommercials => self.commercials_confirmed,
            QuoteStage::SpecifyingQuantity => self.quantity_confirmed,
            QuoteStage::Complete => true,
        }
    }

    fn with(mut self, stage: QuoteStage, confirmed: bool) -> Self {
        match stage {
            QuoteStage::SpecifyingComponents => self.components_confirmed = confirmed,
            QuoteStage::SpecifyingFasteners => self.fasteners_confirmed = confirmed,
            QuoteStage::SpecifyingCommercials => self.commercials_confirmed = confirmed,
            QuoteStage::SpecifyingQuantity => self.quantity_confirmed = confirmed,
            QuoteStage::Complete => {}
        }
        self
    }

    pub fn confirm(self, stage: QuoteStage) -> Self {
        self.with(stage, true)
    }

    /// Reopen a stage. Later stages keep their flags.
    pub fn edit(self, stage: QuoteStage) -> Self {
        self.with(stage, false)
    }

    /// Current stage for this snapshot.
    ///
    /// `Complete` as soon as tax could be computed; otherwise the first
    /// applicable unconfirmed stage, or the last applicable stage when every
    /// stage is confirmed but an input is still missing.
    pub fn stage(&self, mode: FastenerMode, tax_available: bool) -> QuoteStage {
        if tax_available {
            return QuoteStage::Complete;
        }

        let mut last = QuoteStage::SpecifyingCommercials;
        for stage in QuoteStage::ORDER.into_iter().filter(|s| s.applies_to(mode)) {
            if !self.is_confirmed(stage) {
                return stage;
            }
            last = stage;
        }
        last
    }
}
