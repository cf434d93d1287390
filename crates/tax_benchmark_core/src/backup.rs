//! crates/tax_benchmark_core/src/backup.rs
//!
//! The backup/restore codec: the whole datastore (submissions, users,
//! settings) as one portable JSON document. Export is a full-fidelity dump —
//! no redaction — and its output is the durable contract import accepts.

use serde::{Deserialize, Serialize};

use crate::domain::{Settings, Submission, UserRecord};
use crate::error::{StoreError, StoreResult};
use crate::store::BenchmarkStore;

/// The combined document. Partial documents are tolerated on import: missing
/// arrays read as empty, missing settings fall back to the built-in defaults.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupDocument {
    #[serde(default)]
    pub submissions: Vec<Submission>,
    #[serde(default)]
    pub users: Vec<UserRecord>,
    #[serde(default)]
    pub settings: Option<Settings>,
}

impl BenchmarkStore {
    /// Serialize the full datastore to one pretty-printed JSON document.
    /// Delivery (file download etc.) belongs to the caller.
    pub fn export_database(&self) -> StoreResult<String> {
        let (submissions, users, settings) = self.backup_parts();
        let document = BackupDocument {
            submissions: submissions.to_vec(),
            users: users.to_vec(),
            settings: Some(settings.clone()),
        };
        serde_json::to_string_pretty(&document)
            .map_err(|e| StoreError::Internal(format!("backup serialization failed: {e}")))
    }

    /// Total, non-incremental restore. An unparsable document fails with
    /// [`StoreError::MalformedBackup`] and leaves the store untouched; on
    /// success all three stores are replaced wholesale and persisted. The
    /// in-memory session is not affected.
    pub fn import_database(&mut self, raw: &str) -> StoreResult<()> {
        let document: BackupDocument =
            serde_json::from_str(raw).map_err(|e| StoreError::MalformedBackup(e.to_string()))?;

        self.restore_parts(
            document.submissions,
            document.users,
            document.settings.unwrap_or_default(),
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::domain::{Role, SubmissionAnswers, SubmissionStatus, Verdict};
    use crate::error::StoreError;
    use crate::memory::MemoryBlobs;
    use crate::store::BenchmarkStore;

    fn fresh() -> BenchmarkStore {
        BenchmarkStore::open(Box::new(MemoryBlobs::new())).unwrap()
    }

    #[test]
    fn import_of_export_restores_an_identical_store() {
        let mut store = fresh();
        store.register("Nina", "nina@test.com", "pass").unwrap();
        let sub = store
            .create_submission(SubmissionAnswers {
                industry: Some("technology".to_string()),
                jurisdictions_covered: Some(42),
                ai_adopted: true,
                ..Default::default()
            })
            .unwrap();
        store.update_submission_status(&sub.id, Verdict::Approved).unwrap();
        store.set_webhook_url("https://example.com/hook").unwrap();
        store.add_admin_email("nina@test.com").unwrap();

        let dump = store.export_database().unwrap();

        let mut restored = fresh();
        restored.import_database(&dump).unwrap();

        assert_eq!(restored.submissions(), store.submissions());
        assert_eq!(restored.webhook_url(), store.webhook_url());
        assert_eq!(restored.admin_emails(), store.admin_emails());
        let emails = |s: &BenchmarkStore| -> Vec<String> {
            s.backup_parts().1.iter().map(|u| u.email.clone()).collect()
        };
        assert_eq!(emails(&restored), emails(&store));
        // Credentials survive the round trip at full fidelity.
        restored.login("nina@test.com", Some("pass")).unwrap();
    }

    #[test]
    fn import_rejects_garbage_without_touching_state() {
        let mut store = fresh();
        store.register("Omar", "omar@test.com", "pass").unwrap();
        store.create_submission(SubmissionAnswers::default()).unwrap();
        let before_subs = store.submissions();
        let before_admins = store.admin_emails().to_vec();

        let err = store.import_database("this is not json").unwrap_err();
        assert!(matches!(err, StoreError::MalformedBackup(_)));
        assert_eq!(store.submissions(), before_subs);
        assert_eq!(store.admin_emails(), before_admins);
        assert_eq!(store.current_user().unwrap().email, "omar@test.com");
    }

    #[test]
    fn import_without_settings_falls_back_to_default_admin_list() {
        let mut store = fresh();
        store.set_webhook_url("https://old.example.com").unwrap();
        store.import_database(r#"{"submissions":[],"users":[]}"#).unwrap();
        assert_eq!(
            store.admin_emails(),
            ["admin@taxbenchmark.com", "jiyangu923@gmail.com"]
        );
        assert_eq!(store.webhook_url(), "");
        assert!(store.submissions().is_empty());
    }

    #[test]
    fn import_replaces_rather_than_merges() {
        let mut store = fresh();
        store.register("Pia", "pia@test.com", "pass").unwrap();
        store.create_submission(SubmissionAnswers::default()).unwrap();

        let donor_dump = {
            let mut donor = fresh();
            donor.register("Quentin", "quentin@test.com", "pass").unwrap();
            donor.export_database().unwrap()
        };
        store.import_database(&donor_dump).unwrap();

        assert!(store.submissions().is_empty());
        assert!(store
            .backup_parts()
            .1
            .iter()
            .all(|u| u.email != "pia@test.com"));
        assert!(store
            .backup_parts()
            .1
            .iter()
            .any(|u| u.email == "quentin@test.com"));
    }

    #[test]
    fn exported_document_uses_the_client_json_contract() {
        let mut store = fresh();
        store.register("Rosa", "rosa@test.com", "pass").unwrap();
        store
            .create_submission(SubmissionAnswers {
                tax_calculation_automation_range: Some("70_90".to_string()),
                ..Default::default()
            })
            .unwrap();

        let dump = store.export_database().unwrap();
        let value: serde_json::Value = serde_json::from_str(&dump).unwrap();
        assert!(value.get("submissions").is_some());
        assert!(value.get("users").is_some());
        assert!(value["settings"].get("webhookUrl").is_some());
        assert!(value["settings"].get("adminEmails").is_some());
        let sub = &value["submissions"][0];
        assert_eq!(sub["status"], "pending");
        assert!(sub.get("userId").is_some());
        assert!(sub.get("userName").is_some());
        assert!(sub.get("submittedAt").is_some());
        assert_eq!(sub["taxCalculationAutomationRange"], "70_90");
    }

    #[test]
    fn restored_status_enums_parse_back_into_the_closed_set() {
        let mut store = fresh();
        store.register("Sven", "sven@test.com", "pass").unwrap();
        let sub = store.create_submission(SubmissionAnswers::default()).unwrap();
        store.update_submission_status(&sub.id, Verdict::Rejected).unwrap();
        let dump = store.export_database().unwrap();

        let mut restored = fresh();
        restored.import_database(&dump).unwrap();
        assert_eq!(restored.submissions()[0].status, SubmissionStatus::Rejected);
        let roles: Vec<Role> = restored.backup_parts().1.iter().map(|u| u.role).collect();
        assert!(roles.contains(&Role::Admin) && roles.contains(&Role::User));
    }
}
