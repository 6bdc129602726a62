//! Profile and history persistence.
//!
//! Symptom entries are prepended (newest first) and weight entries are
//! appended (chronological). Neither log exposes update or delete.

use chrono::NaiveDate;
use tracing::{debug, info};
use uuid::Uuid;

use super::models::{ensure_positive, SymptomEntry, UserProfile, WeightEntry};
use crate::error::{CoreError, Result};
use crate::storage::{keys, load_json, save_json, KvStore};

/// CRUD over the profile singleton and the two history logs.
pub struct HistoryStore<S> {
    store: S,
}

impl<S: KvStore> HistoryStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    // ── Profile ──────────────────────────────────────────────────────

    /// Stored profile, or the guest default when absent or unreadable.
    pub fn profile(&self) -> UserProfile {
        load_json(&self.store, keys::PROFILE).unwrap_or_default()
    }

    /// # Errors
    /// Validation failures leave the stored profile untouched.
    pub fn save_profile(&mut self, profile: &UserProfile) -> Result<()> {
        profile.validate()?;
        save_json(&mut self.store, keys::PROFILE, profile)?;
        debug!(name = %profile.name, "profile saved");
        Ok(())
    }

    // ── Onboarding ───────────────────────────────────────────────────

    pub fn welcome_seen(&self) -> bool {
        load_json::<bool, _>(&self.store, keys::WELCOME_SEEN).unwrap_or(false)
    }

    pub fn mark_welcome_seen(&mut self) -> Result<()> {
        save_json(&mut self.store, keys::WELCOME_SEEN, &true)
    }

    // ── Symptoms ─────────────────────────────────────────────────────

    /// Newest first.
    pub fn symptoms(&self) -> Vec<SymptomEntry> {
        load_json(&self.store, keys::SYMPTOMS).unwrap_or_default()
    }

    /// Prepend a diary entry.
    ///
    /// Labels are trimmed; blanks and repeats are dropped, keeping first
    /// occurrence order. If nothing remains this is a no-op returning
    /// `Ok(None)`.
    pub fn add_symptoms<I, L>(
        &mut self,
        labels: I,
        notes: &str,
        today: NaiveDate,
    ) -> Result<Option<SymptomEntry>>
    where
        I: IntoIterator<Item = L>,
        L: AsRef<str>,
    {
        let mut symptoms: Vec<String> = Vec::new();
        for label in labels {
            let label = label.as_ref().trim();
            if !label.is_empty() && !symptoms.iter().any(|s| s == label) {
                symptoms.push(label.to_string());
            }
        }
        if symptoms.is_empty() {
            debug!("no symptoms selected; nothing logged");
            return Ok(None);
        }

        let entry = SymptomEntry {
            id: Uuid::new_v4().to_string(),
            date: today,
            symptoms,
            notes: notes.trim().to_string(),
        };

        let mut history = self.symptoms();
        history.insert(0, entry.clone());
        save_json(&mut self.store, keys::SYMPTOMS, &history)?;
        info!(id = %entry.id, count = entry.symptoms.len(), "symptoms logged");
        Ok(Some(entry))
    }

    // ── Weight ───────────────────────────────────────────────────────

    /// Chronological.
    pub fn weights(&self) -> Vec<WeightEntry> {
        load_json(&self.store, keys::WEIGHTS).unwrap_or_default()
    }

    /// Record a new weight: updates the profile and appends an entry carrying
    /// the dose in effect right now.
    ///
    /// # Errors
    /// Non-positive or non-finite weights are rejected before any write.
    pub fn record_weight(&mut self, weight: f64, today: NaiveDate) -> Result<WeightEntry> {
        ensure_positive("weight", weight)?;

        let mut profile = self.profile();
        profile.weight = weight;
        save_json(&mut self.store, keys::PROFILE, &profile)?;

        let entry = WeightEntry {
            date: today,
            weight,
            dose: profile.current_dose,
        };
        let mut log = self.weights();
        log.push(entry.clone());
        save_json(&mut self.store, keys::WEIGHTS, &log)?;
        info!(weight, dose = entry.dose, "weight recorded");
        Ok(entry)
    }

    // ── Reset ────────────────────────────────────────────────────────

    /// Wipe every stored value, onboarding flag included.
    pub fn reset_all(&mut self) -> Result<()> {
        self.store.clear().map_err(CoreError::from)?;
        info!("all data cleared");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::storage::MemoryStore;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
    }

    fn store() -> HistoryStore<MemoryStore> {
        HistoryStore::new(MemoryStore::new())
    }

    #[test]
    fn profile_defaults_to_guest() {
        let h = store();
        let p = h.profile();
        assert_eq!(p.name, "Invitado");
        assert_eq!(p.weight, 70.0);
        assert_eq!(p.current_dose, 100.0);
    }

    #[test]
    fn malformed_profile_falls_back_to_default() {
        let mut h = store();
        h.store_mut().set(keys::PROFILE, "[1,2").unwrap();
        assert_eq!(h.profile(), UserProfile::default());
    }

    #[test]
    fn invalid_profile_is_not_saved() {
        let mut h = store();
        let bad = UserProfile {
            current_dose: -25.0,
            ..UserProfile::default()
        };
        assert!(h.save_profile(&bad).is_err());
        assert!(h.store().get(keys::PROFILE).unwrap().is_none());
    }

    #[test]
    fn symptoms_are_prepended_with_unique_ids() {
        let mut h = store();
        let first = h.add_symptoms(["Fatiga"], "", day(1)).unwrap().unwrap();
        let second = h
            .add_symptoms(["Piel seca", "Niebla mental"], "mala noche", day(2))
            .unwrap()
            .unwrap();

        let history = h.symptoms();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0], second);
        assert_eq!(history[1], first);
        assert_ne!(first.id, second.id);
        assert_eq!(second.date, day(2));
        assert_eq!(second.notes, "mala noche");
    }

    #[test]
    fn empty_symptom_set_is_a_no_op() {
        let mut h = store();
        h.add_symptoms(["Fatiga"], "", day(1)).unwrap();
        let none: [&str; 0] = [];
        assert!(h.add_symptoms(none, "", day(2)).unwrap().is_none());
        assert!(h.add_symptoms(["  ", ""], "notes", day(2)).unwrap().is_none());
        assert_eq!(h.symptoms().len(), 1);
    }

    #[test]
    fn symptom_labels_are_trimmed_and_deduplicated() {
        let mut h = store();
        let entry = h
            .add_symptoms([" Fatiga ", "Fatiga", "Frío excesivo"], "", day(3))
            .unwrap()
            .unwrap();
        assert_eq!(entry.symptoms, vec!["Fatiga", "Frío excesivo"]);
    }

    #[test]
    fn weight_is_appended_with_current_dose() {
        let mut h = store();
        h.save_profile(&UserProfile {
            current_dose: 112.0,
            ..UserProfile::default()
        })
        .unwrap();

        h.record_weight(71.0, day(1)).unwrap();
        let entry = h.record_weight(70.2, day(1)).unwrap();

        assert_eq!(entry.dose, 112.0);
        let log = h.weights();
        assert_eq!(log.len(), 2);
        assert_eq!(log[0].weight, 71.0);
        assert_eq!(log[1], entry);
        // Duplicate dates are allowed.
        assert_eq!(log[0].date, log[1].date);
        assert_eq!(h.profile().weight, 70.2);
    }

    #[test]
    fn non_positive_weight_is_rejected_without_mutation() {
        let mut h = store();
        for bad in [0.0, -3.0, f64::INFINITY] {
            let err = h.record_weight(bad, day(1)).unwrap_err();
            assert!(matches!(
                err,
                CoreError::Validation(ValidationError::NotPositive { field: "weight", .. })
            ));
        }
        assert!(h.weights().is_empty());
        assert_eq!(h.profile().weight, 70.0);
    }

    #[test]
    fn welcome_flag_and_reset() {
        let mut h = store();
        assert!(!h.welcome_seen());
        h.mark_welcome_seen().unwrap();
        assert!(h.welcome_seen());
        assert_eq!(h.store().get(keys::WELCOME_SEEN).unwrap().as_deref(), Some("true"));

        h.add_symptoms(["Fatiga"], "", day(1)).unwrap();
        h.reset_all().unwrap();
        assert!(!h.welcome_seen());
        assert!(h.symptoms().is_empty());
    }
}
