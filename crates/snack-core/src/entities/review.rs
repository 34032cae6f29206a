use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::RatingDimension;
use crate::errors::CoreError;

/// Lowest and highest accepted score on any axis.
pub const MIN_SCORE: u8 = 1;
pub const MAX_SCORE: u8 = 5;

/// One review's five scores.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ReviewScores {
    pub taste: u8,
    pub texture: u8,
    pub value: u8,
    pub quantity: u8,
    pub repurchase: u8,
}

impl ReviewScores {
    /// Build a score set, rejecting any axis outside `1..=5`.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` naming the first out-of-range axis.
    pub fn new(
        taste: u8,
        texture: u8,
        value: u8,
        quantity: u8,
        repurchase: u8,
    ) -> Result<Self, CoreError> {
        let scores = Self {
            taste,
            texture,
            value,
            quantity,
            repurchase,
        };
        scores.validate()?;
        Ok(scores)
    }

    /// Check every axis is within range.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` naming the first out-of-range axis.
    pub fn validate(&self) -> Result<(), CoreError> {
        for dimension in RatingDimension::ALL {
            let score = self.get(dimension);
            if !(MIN_SCORE..=MAX_SCORE).contains(&score) {
                return Err(CoreError::Validation(format!(
                    "{dimension} score must be between {MIN_SCORE} and {MAX_SCORE}, got {score}"
                )));
            }
        }
        Ok(())
    }

    #[must_use]
    pub const fn get(&self, dimension: RatingDimension) -> u8 {
        match dimension {
            RatingDimension::Taste => self.taste,
            RatingDimension::Texture => self.texture,
            RatingDimension::Value => self.value,
            RatingDimension::Quantity => self.quantity,
            RatingDimension::Repurchase => self.repurchase,
        }
    }
}
