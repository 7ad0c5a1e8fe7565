//! Scenario navigation state
//!
//! A cursor over a fixed, linear scenario order plus the active display
//! language. The cursor is always a member of the order; advancing past the
//! last scenario or retreating before the first leaves it where it is.
//!
//! Not synchronized. The owner serializes access.

use crate::error::{Result, SurveyError};
use crate::types::{Language, ScenarioId};

/// Navigation cursor over the scenario order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigator {
    order: Vec<ScenarioId>,
    position: usize,
    first: ScenarioId,
    language: Language,
}

impl Navigator {
    /// Create a navigator starting at `first`
    ///
    /// # Errors
    /// - `SurveyError::EmptyScenarioOrder` if `order` is empty
    /// - `SurveyError::UnknownScenario` if `first` is not part of `order`
    pub fn new(first: ScenarioId, order: Vec<ScenarioId>) -> Result<Self> {
        if order.is_empty() {
            return Err(SurveyError::EmptyScenarioOrder);
        }
        let position = order
            .iter()
            .position(|id| *id == first)
            .ok_or_else(|| SurveyError::unknown_scenario(first, order.iter().copied()))?;

        tracing::debug!(order = ?order, "scenario order");
        Ok(Self {
            order,
            position,
            first,
            language: Language::default(),
        })
    }

    /// Create a navigator starting at the first listed scenario
    ///
    /// # Errors
    /// `SurveyError::EmptyScenarioOrder` if `order` is empty
    pub fn starting_at_front(order: Vec<ScenarioId>) -> Result<Self> {
        let first = *order.first().ok_or(SurveyError::EmptyScenarioOrder)?;
        Self::new(first, order)
    }

    /// Id of the active scenario
    #[inline]
    #[must_use]
    pub fn active_scenario(&self) -> ScenarioId {
        self.order[self.position]
    }

    /// Index of the active scenario within the order
    #[inline]
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Scenario restored by [`Navigator::reset`]
    #[inline]
    #[must_use]
    pub fn first_scenario(&self) -> ScenarioId {
        self.first
    }

    /// Full scenario order
    #[inline]
    #[must_use]
    pub fn scenario_order(&self) -> &[ScenarioId] {
        &self.order
    }

    /// Active display language
    #[inline]
    #[must_use]
    pub fn language(&self) -> Language {
        self.language
    }

    /// Whether the cursor sits on the last scenario
    #[inline]
    #[must_use]
    pub fn is_last(&self) -> bool {
        self.position + 1 == self.order.len()
    }

    /// Select the display language by code
    ///
    /// # Errors
    /// `SurveyError::UnknownLanguage` for codes outside the supported set;
    /// the state is unchanged
    pub fn set_language(&mut self, code: &str) -> Result<()> {
        let lang = code.parse::<Language>().map_err(|err| {
            tracing::warn!(requested = code, "rejected language code");
            err
        })?;
        self.set_language_to(lang);
        Ok(())
    }

    /// Select the display language
    pub fn set_language_to(&mut self, lang: Language) {
        self.language = lang;
        self.log_state();
    }

    /// Back to the first scenario; the language returns to German as well
    pub fn reset(&mut self) -> ScenarioId {
        self.position = self
            .order
            .iter()
            .position(|id| *id == self.first)
            .unwrap_or(0);
        self.language = Language::De;
        self.log_state();
        self.active_scenario()
    }

    /// Move to the next scenario unless already on the last one
    pub fn advance(&mut self) -> ScenarioId {
        if !self.is_last() {
            self.position += 1;
        }
        self.log_state();
        self.active_scenario()
    }

    /// Move to the previous scenario unless already on the first one
    pub fn retreat(&mut self) -> ScenarioId {
        self.position = self.position.saturating_sub(1);
        self.log_state();
        self.active_scenario()
    }

    fn log_state(&self) {
        tracing::info!(
            language = %self.language,
            active_scenario = %self.active_scenario(),
            "navigation state"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(raw: &[i64]) -> Vec<ScenarioId> {
        raw.iter().copied().map(ScenarioId).collect()
    }

    #[test]
    fn rejects_empty_order_and_foreign_first() {
        assert!(matches!(
            Navigator::new(ScenarioId(0), Vec::new()),
            Err(SurveyError::EmptyScenarioOrder)
        ));
        assert!(matches!(
            Navigator::new(ScenarioId(5), ids(&[0, 1])),
            Err(SurveyError::UnknownScenario { .. })
        ));
    }

    #[test]
    fn advance_stops_at_last_position() {
        let mut nav = Navigator::new(ScenarioId(0), ids(&[0, 1, 2])).unwrap();
        assert_eq!(nav.advance(), ScenarioId(1));
        assert_eq!(nav.advance(), ScenarioId(2));
        assert_eq!(nav.advance(), ScenarioId(2));
        assert!(nav.is_last());
    }

    #[test]
    fn retreat_stops_at_first_position() {
        let mut nav = Navigator::new(ScenarioId(1), ids(&[0, 1, 2])).unwrap();
        assert_eq!(nav.retreat(), ScenarioId(0));
        assert_eq!(nav.retreat(), ScenarioId(0));
    }

    #[test]
    fn non_contiguous_ids_follow_list_order() {
        let mut nav = Navigator::starting_at_front(ids(&[10, 3, 42])).unwrap();
        assert_eq!(nav.active_scenario(), ScenarioId(10));
        assert_eq!(nav.advance(), ScenarioId(3));
        assert_eq!(nav.advance(), ScenarioId(42));
        assert_eq!(nav.advance(), ScenarioId(42));
        assert_eq!(nav.retreat(), ScenarioId(3));
        assert_eq!(nav.retreat(), ScenarioId(10));
        assert_eq!(nav.retreat(), ScenarioId(10));
    }

    #[test]
    fn unknown_language_leaves_state_unchanged() {
        let mut nav = Navigator::starting_at_front(ids(&[0, 1])).unwrap();
        nav.set_language("en").unwrap();
        let before = nav.clone();

        assert!(nav.set_language("fr").is_err());
        assert_eq!(nav, before);
    }

    #[test]
    fn reset_restores_first_and_german() {
        let mut nav = Navigator::new(ScenarioId(1), ids(&[0, 1, 2])).unwrap();
        nav.set_language("en").unwrap();
        nav.advance();
        assert_eq!(nav.reset(), ScenarioId(1));
        assert_eq!(nav.language(), Language::De);
        assert_eq!(nav.first_scenario(), ScenarioId(1));
    }
}
