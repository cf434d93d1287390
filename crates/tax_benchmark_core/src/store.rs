//! crates/tax_benchmark_core/src/store.rs
//!
//! The embedded data/authorization store: user directory, settings,
//! single-session auth, and the submission repository, all write-through to
//! an injected [`BlobStore`].
//!
//! Every public operation is synchronous and runs to completion; the store is
//! the sole writer of its blobs, so there is no internal locking.

use tracing::warn;
use uuid::Uuid;

use crate::domain::{Role, Settings, Submission, SubmissionAnswers, User, UserRecord, Verdict};
use crate::error::{StoreError, StoreResult};
use crate::password;
use crate::ports::{keys, BlobStore};

/// The benchmark survey datastore. Construct one per process with
/// [`BenchmarkStore::open`]; tests construct isolated instances over
/// [`crate::memory::MemoryBlobs`].
pub struct BenchmarkStore {
    blobs: Box<dyn BlobStore>,
    current_user: Option<User>,
    users: Vec<UserRecord>,
    submissions: Vec<Submission>,
    settings: Settings,
}

impl BenchmarkStore {
    /// Open the store over a persistence substrate, loading all four blobs.
    ///
    /// Malformed persisted state is recovered locally — settings fall back to
    /// the built-in defaults, the user directory is re-seeded, submissions
    /// reset to empty, a corrupt session reads as signed-out. Only substrate
    /// I/O failures surface to the caller.
    pub fn open(blobs: Box<dyn BlobStore>) -> StoreResult<Self> {
        let mut store = Self {
            blobs,
            current_user: None,
            users: Vec::new(),
            submissions: Vec::new(),
            settings: Settings::default(),
        };

        if let Some(raw) = store.blobs.load(keys::SETTINGS)? {
            match serde_json::from_str(&raw) {
                Ok(settings) => store.settings = settings,
                Err(err) => warn!("malformed settings blob, using defaults: {err}"),
            }
        }

        match store.blobs.load(keys::USERS)? {
            Some(raw) => match serde_json::from_str(&raw) {
                Ok(users) => store.users = users,
                Err(err) => {
                    warn!("malformed users blob, re-seeding directory: {err}");
                    store.seed_users()?;
                }
            },
            None => store.seed_users()?,
        }

        match store.blobs.load(keys::SUBMISSIONS)? {
            Some(raw) => match serde_json::from_str(&raw) {
                Ok(submissions) => store.submissions = submissions,
                Err(err) => {
                    warn!("malformed submissions blob, resetting: {err}");
                    store.save_submissions()?;
                }
            },
            None => store.save_submissions()?,
        }

        if let Some(raw) = store.blobs.load(keys::SESSION)? {
            match serde_json::from_str(&raw) {
                Ok(user) => store.current_user = Some(user),
                Err(err) => warn!("malformed session blob, starting signed out: {err}"),
            }
        }

        Ok(store)
    }

    /// First-run accounts: the two built-in admins plus one standard user,
    /// all with the demo password.
    fn seed_users(&mut self) -> StoreResult<()> {
        let demo_hash = password::hash("password123")
            .map_err(|e| StoreError::Internal(format!("seed password hashing failed: {e}")))?;
        self.users = vec![
            UserRecord {
                id: "user-jiyangu".to_string(),
                name: "Jiyangu".to_string(),
                email: "jiyangu923@gmail.com".to_string(),
                password: Some(demo_hash.clone()),
                role: Role::Admin,
            },
            UserRecord {
                id: "admin-1".to_string(),
                name: "Admin User".to_string(),
                email: "admin@taxbenchmark.com".to_string(),
                password: Some(demo_hash.clone()),
                role: Role::Admin,
            },
            UserRecord {
                id: "user-1".to_string(),
                name: "Standard User".to_string(),
                email: "user@company.com".to_string(),
                password: Some(demo_hash),
                role: Role::User,
            },
        ];
        self.save_users()
    }

    //=====================================================================================
    // Auth Operations
    //=====================================================================================

    /// Create an account and sign it in. The email is stored lowercase; the
    /// role comes from the admin allow-list at the moment of registration.
    pub fn register(&mut self, name: &str, email: &str, pass: &str) -> StoreResult<User> {
        if self.find_user(email).is_some() {
            return Err(StoreError::DuplicateAccount);
        }

        let email = email.to_lowercase();
        let role = self.role_for_email(&email);
        let record = UserRecord {
            id: format!("user-{}", Uuid::new_v4()),
            name: name.to_string(),
            email,
            password: Some(
                password::hash(pass)
                    .map_err(|e| StoreError::Internal(format!("password hashing failed: {e}")))?,
            ),
            role,
        };
        let session = record.to_session();
        self.users.push(record);
        self.save_users()?;

        self.establish_session(session)
    }

    /// Sign in by email. `Some(password)` verifies against the stored hash;
    /// `None` skips the check entirely — that path is the trusted internal
    /// entry used by [`Self::login_with_google`] and must never be exposed to
    /// end users.
    ///
    /// On success the role is recomputed from the live admin allow-list and
    /// the directory is repaired if the cached role had gone stale.
    pub fn login(&mut self, email: &str, pass: Option<&str>) -> StoreResult<User> {
        let idx = self.find_user(email).ok_or(StoreError::AccountNotFound)?;

        if let Some(pass) = pass {
            let verified = match &self.users[idx].password {
                Some(stored) => password::verify(pass, stored),
                None => false,
            };
            if !verified {
                return Err(StoreError::IncorrectPassword);
            }
        }

        let role = self.role_for_email(&self.users[idx].email);
        if self.users[idx].role != role {
            self.users[idx].role = role;
            self.save_users()?;
        }

        let session = self.users[idx].to_session();
        self.establish_session(session)
    }

    /// Sign in with an identity the external provider has already verified.
    ///
    /// Unknown emails are auto-registered without a password; the display
    /// name falls back to the email's local part with its first letter
    /// capitalized. Known emails take the password-less login path, role
    /// recompute included.
    pub fn login_with_google(&mut self, email: &str, name: Option<&str>) -> StoreResult<User> {
        if self.find_user(email).is_some() {
            return self.login(email, None);
        }

        let email = email.to_lowercase();
        let name = match name {
            Some(name) => name.to_string(),
            None => derive_display_name(&email),
        };
        let record = UserRecord {
            id: format!("user-{}", Uuid::new_v4()),
            name,
            email: email.clone(),
            password: None,
            role: self.role_for_email(&email),
        };
        let session = record.to_session();
        self.users.push(record);
        self.save_users()?;

        self.establish_session(session)
    }

    /// Overwrite name and email on the matching record, preserving password
    /// and role. Unknown ids leave the directory untouched. When the updated
    /// id is the signed-in user, the session projection is refreshed too.
    pub fn update_user_profile(&mut self, updated: &User) -> StoreResult<User> {
        let email = updated.email.to_lowercase();

        let mut result = updated.clone();
        result.email = email.clone();

        if let Some(record) = self.users.iter_mut().find(|u| u.id == updated.id) {
            record.name = updated.name.clone();
            record.email = email.clone();
            result = record.to_session();
            self.save_users()?;
        }

        if let Some(current) = &mut self.current_user {
            if current.id == updated.id {
                current.name = updated.name.clone();
                current.email = email;
                let session = current.clone();
                self.save_session(&session)?;
            }
        }

        Ok(result)
    }

    /// Clear the session, in memory and on the substrate.
    pub fn logout(&mut self) -> StoreResult<()> {
        self.current_user = None;
        self.blobs.remove(keys::SESSION)?;
        Ok(())
    }

    /// The signed-in identity, if any. Pure read.
    pub fn current_user(&self) -> Option<&User> {
        self.current_user.as_ref()
    }

    fn establish_session(&mut self, user: User) -> StoreResult<User> {
        self.save_session(&user)?;
        self.current_user = Some(user.clone());
        Ok(user)
    }

    // Matching folds both sides with Unicode `to_lowercase`, the same fold
    // used for storage, so emails differing only in non-ASCII case still
    // collapse onto one account.
    fn find_user(&self, email: &str) -> Option<usize> {
        let normalized = email.to_lowercase();
        self.users
            .iter()
            .position(|u| u.email.to_lowercase() == normalized)
    }

    fn role_for_email(&self, email: &str) -> Role {
        let normalized = email.to_lowercase();
        if self
            .settings
            .admin_emails
            .iter()
            .any(|e| e.to_lowercase() == normalized)
        {
            Role::Admin
        } else {
            Role::User
        }
    }

    //=====================================================================================
    // System Settings
    //=====================================================================================

    pub fn webhook_url(&self) -> &str {
        &self.settings.webhook_url
    }

    pub fn set_webhook_url(&mut self, url: &str) -> StoreResult<()> {
        self.settings.webhook_url = url.to_string();
        self.save_settings()
    }

    /// The admin allow-list, lowercase, in insertion order.
    pub fn admin_emails(&self) -> &[String] {
        &self.settings.admin_emails
    }

    /// Add an email to the admin allow-list. Already-present emails are a
    /// no-op. A matching registered account is promoted immediately, without
    /// waiting for its next login.
    pub fn add_admin_email(&mut self, email: &str) -> StoreResult<()> {
        let normalized = email.to_lowercase();
        if self
            .settings
            .admin_emails
            .iter()
            .any(|e| e.to_lowercase() == normalized)
        {
            return Ok(());
        }

        self.settings.admin_emails.push(normalized.clone());
        self.save_settings()?;

        if let Some(record) = self
            .users
            .iter_mut()
            .find(|u| u.email.to_lowercase() == normalized)
        {
            record.role = Role::Admin;
            self.save_users()?;
        }
        Ok(())
    }

    /// Remove an email from the admin allow-list (case-insensitive). A
    /// matching registered account is demoted immediately, independent of
    /// session state.
    pub fn remove_admin_email(&mut self, email: &str) -> StoreResult<()> {
        let normalized = email.to_lowercase();
        self.settings
            .admin_emails
            .retain(|e| e.to_lowercase() != normalized);
        self.save_settings()?;

        if let Some(record) = self
            .users
            .iter_mut()
            .find(|u| u.email.to_lowercase() == normalized)
        {
            record.role = Role::User;
            self.save_users()?;
        }
        Ok(())
    }

    //=====================================================================================
    // Submission Operations
    //=====================================================================================

    /// Record the signed-in user's questionnaire answers. Any prior
    /// submission by the same user is replaced, whatever its status; the new
    /// record always starts `Pending`.
    pub fn create_submission(&mut self, answers: SubmissionAnswers) -> StoreResult<Submission> {
        let owner = self
            .current_user
            .clone()
            .ok_or(StoreError::NotAuthenticated)?;

        self.submissions.retain(|s| s.user_id != owner.id);
        let submission = Submission::new_pending(&owner, answers);
        self.submissions.push(submission.clone());
        self.save_submissions()?;
        Ok(submission)
    }

    /// All submissions, insertion order. Defensive copy.
    pub fn submissions(&self) -> Vec<Submission> {
        self.submissions.clone()
    }

    /// Apply an admin verdict. Unknown ids are a silent no-op.
    pub fn update_submission_status(&mut self, id: &str, verdict: Verdict) -> StoreResult<()> {
        if let Some(submission) = self.submissions.iter_mut().find(|s| s.id == id) {
            submission.status = verdict.into();
            self.save_submissions()?;
        }
        Ok(())
    }

    /// Remove one submission unconditionally. Unknown ids are a no-op; the
    /// blob is rewritten either way.
    pub fn delete_submission(&mut self, id: &str) -> StoreResult<()> {
        self.submissions.retain(|s| s.id != id);
        self.save_submissions()
    }

    /// Remove every submission.
    pub fn delete_all_submissions(&mut self) -> StoreResult<()> {
        self.submissions.clear();
        self.save_submissions()
    }

    //=====================================================================================
    // Write-through persistence
    //=====================================================================================

    fn save_users(&self) -> StoreResult<()> {
        let raw = serde_json::to_string(&self.users)
            .map_err(|e| StoreError::Internal(format!("users blob serialization failed: {e}")))?;
        self.blobs.save(keys::USERS, &raw)?;
        Ok(())
    }

    fn save_submissions(&self) -> StoreResult<()> {
        let raw = serde_json::to_string(&self.submissions).map_err(|e| {
            StoreError::Internal(format!("submissions blob serialization failed: {e}"))
        })?;
        self.blobs.save(keys::SUBMISSIONS, &raw)?;
        Ok(())
    }

    fn save_settings(&self) -> StoreResult<()> {
        let raw = serde_json::to_string(&self.settings).map_err(|e| {
            StoreError::Internal(format!("settings blob serialization failed: {e}"))
        })?;
        self.blobs.save(keys::SETTINGS, &raw)?;
        Ok(())
    }

    fn save_session(&self, user: &User) -> StoreResult<()> {
        let raw = serde_json::to_string(user)
            .map_err(|e| StoreError::Internal(format!("session blob serialization failed: {e}")))?;
        self.blobs.save(keys::SESSION, &raw)?;
        Ok(())
    }

    //=====================================================================================
    // Backup access (see backup.rs for the codec itself)
    //=====================================================================================

    pub(crate) fn backup_parts(&self) -> (&[Submission], &[UserRecord], &Settings) {
        (&self.submissions, &self.users, &self.settings)
    }

    pub(crate) fn restore_parts(
        &mut self,
        submissions: Vec<Submission>,
        users: Vec<UserRecord>,
        settings: Settings,
    ) -> StoreResult<()> {
        self.submissions = submissions;
        self.users = users;
        self.settings = settings;
        self.save_submissions()?;
        self.save_users()?;
        self.save_settings()
    }
}

/// Display name for an auto-registered external identity: the local part of
/// the email, first letter capitalized.
fn derive_display_name(email: &str) -> String {
    let local = email.split('@').next().unwrap_or(email);
    let mut chars = local.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => local.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SubmissionStatus;
    use crate::memory::MemoryBlobs;

    fn fresh() -> BenchmarkStore {
        BenchmarkStore::open(Box::new(MemoryBlobs::new())).unwrap()
    }

    fn answers_with_industry(industry: &str) -> SubmissionAnswers {
        SubmissionAnswers {
            industry: Some(industry.to_string()),
            ..Default::default()
        }
    }

    // ── Register ───────────────────────────────────────────────────────

    #[test]
    fn register_creates_user_and_signs_in() {
        let mut store = fresh();
        let user = store.register("Alice", "alice@test.com", "pass123").unwrap();
        assert_eq!(user.email, "alice@test.com");
        assert_eq!(user.name, "Alice");
        assert_eq!(user.role, Role::User);
        assert_eq!(store.current_user().unwrap().email, "alice@test.com");
    }

    #[test]
    fn register_rejects_duplicate_email_case_insensitively() {
        let mut store = fresh();
        store.register("Alice", "alice@test.com", "pass123").unwrap();
        let before = store.backup_parts().1.len();
        let err = store.register("Alice2", "ALICE@TEST.COM", "other").unwrap_err();
        assert!(matches!(err, StoreError::DuplicateAccount));
        assert_eq!(store.backup_parts().1.len(), before);
    }

    #[test]
    fn register_rejects_duplicates_differing_only_in_non_ascii_case() {
        let mut store = fresh();
        store.register("Ada", "ädmin@test.com", "pass123").unwrap();
        let err = store.register("Ada2", "ÄDMIN@TEST.COM", "other").unwrap_err();
        assert!(matches!(err, StoreError::DuplicateAccount));
        let matching = store
            .backup_parts()
            .1
            .iter()
            .filter(|u| u.email == "ädmin@test.com")
            .count();
        assert_eq!(matching, 1);
    }

    #[test]
    fn register_assigns_admin_role_from_allow_list() {
        let mut store = fresh();
        store.add_admin_email("newadmin@test.com").unwrap();
        let user = store.register("New Admin", "NewAdmin@Test.com", "pass").unwrap();
        assert_eq!(user.role, Role::Admin);
        assert_eq!(user.email, "newadmin@test.com");
    }

    // ── Login ──────────────────────────────────────────────────────────

    #[test]
    fn login_succeeds_with_correct_password() {
        let mut store = fresh();
        store.register("Bob", "bob@test.com", "secret").unwrap();
        store.logout().unwrap();
        let user = store.login("bob@test.com", Some("secret")).unwrap();
        assert_eq!(user.email, "bob@test.com");
    }

    #[test]
    fn login_is_case_insensitive_on_email() {
        let mut store = fresh();
        store.register("Bob", "Bob@Test.com", "secret").unwrap();
        store.logout().unwrap();
        let user = store.login("BOB@TEST.COM", Some("secret")).unwrap();
        assert_eq!(user.email, "bob@test.com");
    }

    #[test]
    fn login_folds_non_ascii_case_on_email() {
        let mut store = fresh();
        store.register("Åsa", "åsa@test.com", "secret").unwrap();
        store.logout().unwrap();
        let user = store.login("ÅSA@TEST.COM", Some("secret")).unwrap();
        assert_eq!(user.email, "åsa@test.com");
    }

    #[test]
    fn add_admin_email_folds_non_ascii_case() {
        let mut store = fresh();
        store.register("Ülla", "ülla@test.com", "pass").unwrap();
        store.logout().unwrap();
        store.add_admin_email("ÜLLA@TEST.COM").unwrap();
        store.add_admin_email("ülla@test.com").unwrap();
        let count = store
            .admin_emails()
            .iter()
            .filter(|e| *e == "ülla@test.com")
            .count();
        assert_eq!(count, 1);
        let user = store.login("ülla@test.com", Some("pass")).unwrap();
        assert_eq!(user.role, Role::Admin);
    }

    #[test]
    fn login_rejects_wrong_password() {
        let mut store = fresh();
        store.register("Bob", "bob@test.com", "secret").unwrap();
        store.logout().unwrap();
        let err = store.login("bob@test.com", Some("wrong")).unwrap_err();
        assert!(matches!(err, StoreError::IncorrectPassword));
    }

    #[test]
    fn login_rejects_unknown_account() {
        let mut store = fresh();
        let err = store.login("nobody@test.com", Some("pass")).unwrap_err();
        assert!(matches!(err, StoreError::AccountNotFound));
    }

    #[test]
    fn login_without_password_skips_the_check() {
        let mut store = fresh();
        store.register("Carol", "carol@test.com", "realpassword").unwrap();
        store.logout().unwrap();
        assert!(store.login("carol@test.com", None).is_ok());
    }

    #[test]
    fn stale_admin_role_heals_on_next_login() {
        // A directory blob left by an older run can carry a cached role the
        // allow-list no longer agrees with; login repairs it.
        let hash = password::hash("pass").unwrap();
        let users = serde_json::to_string(&vec![UserRecord {
            id: "user-dave".to_string(),
            name: "Dave".to_string(),
            email: "dave@test.com".to_string(),
            password: Some(hash),
            role: Role::User,
        }])
        .unwrap();
        let settings = r#"{"webhookUrl":"","adminEmails":["dave@test.com"]}"#;
        let blobs = MemoryBlobs::new()
            .with_blob(keys::USERS, &users)
            .with_blob(keys::SETTINGS, settings);
        let mut store = BenchmarkStore::open(Box::new(blobs)).unwrap();

        let user = store.login("dave@test.com", Some("pass")).unwrap();
        assert_eq!(user.role, Role::Admin);
        let record = store
            .backup_parts()
            .1
            .iter()
            .find(|u| u.email == "dave@test.com")
            .unwrap();
        assert_eq!(record.role, Role::Admin);
    }

    #[test]
    fn seeded_admin_demoted_then_relogin_yields_user_role() {
        let mut store = fresh();
        store.remove_admin_email("ADMIN@TAXBENCHMARK.COM").unwrap();
        let user = store
            .login("admin@taxbenchmark.com", Some("password123"))
            .unwrap();
        assert_eq!(user.role, Role::User);
    }

    // ── Google sign-in ─────────────────────────────────────────────────

    #[test]
    fn google_login_auto_registers_unknown_email() {
        let mut store = fresh();
        let user = store.login_with_google("new@gmail.com", Some("New User")).unwrap();
        assert_eq!(user.email, "new@gmail.com");
        assert_eq!(user.name, "New User");
        assert_eq!(user.role, Role::User);
    }

    #[test]
    fn google_login_derives_name_from_email_local_part() {
        let mut store = fresh();
        let user = store.login_with_google("jane@gmail.com", None).unwrap();
        assert_eq!(user.name, "Jane");
    }

    #[test]
    fn google_login_does_not_duplicate_existing_account() {
        let mut store = fresh();
        store
            .login_with_google("returning@gmail.com", Some("Returning User"))
            .unwrap();
        store.logout().unwrap();
        store
            .login_with_google("returning@gmail.com", Some("Returning User"))
            .unwrap();
        let matching = store
            .backup_parts()
            .1
            .iter()
            .filter(|u| u.email == "returning@gmail.com")
            .count();
        assert_eq!(matching, 1);
    }

    #[test]
    fn google_login_grants_admin_role_from_allow_list() {
        let mut store = fresh();
        let user = store
            .login_with_google("jiyangu923@gmail.com", Some("Jiyangu"))
            .unwrap();
        assert_eq!(user.role, Role::Admin);
    }

    #[test]
    fn google_only_accounts_cannot_use_the_password_form() {
        let mut store = fresh();
        store.login_with_google("googleonly@gmail.com", Some("Google User")).unwrap();
        store.logout().unwrap();
        let err = store
            .login("googleonly@gmail.com", Some("password123"))
            .unwrap_err();
        assert!(matches!(err, StoreError::IncorrectPassword));
        let err = store.login("googleonly@gmail.com", Some("")).unwrap_err();
        assert!(matches!(err, StoreError::IncorrectPassword));
    }

    // ── Profile, session, allow-list side effects ──────────────────────

    #[test]
    fn update_profile_refreshes_the_session_and_preserves_password() {
        let mut store = fresh();
        let mut user = store.register("Eve", "eve@test.com", "pass").unwrap();
        user.name = "Eve Updated".to_string();
        user.email = "Eve2@Test.com".to_string();
        let updated = store.update_user_profile(&user).unwrap();
        assert_eq!(updated.email, "eve2@test.com");
        assert_eq!(store.current_user().unwrap().name, "Eve Updated");
        store.logout().unwrap();
        // Old credentials survive the rename.
        let back = store.login("eve2@test.com", Some("pass")).unwrap();
        assert_eq!(back.name, "Eve Updated");
    }

    #[test]
    fn update_profile_with_unknown_id_leaves_directory_unchanged() {
        let mut store = fresh();
        let before = store.backup_parts().1.len();
        let ghost = User {
            id: "user-ghost".to_string(),
            name: "Ghost".to_string(),
            email: "ghost@test.com".to_string(),
            role: Role::User,
        };
        store.update_user_profile(&ghost).unwrap();
        assert_eq!(store.backup_parts().1.len(), before);
        assert!(store.backup_parts().1.iter().all(|u| u.id != "user-ghost"));
    }

    #[test]
    fn logout_clears_the_session() {
        let mut store = fresh();
        store.register("Frank", "frank@test.com", "pass").unwrap();
        store.logout().unwrap();
        assert!(store.current_user().is_none());
    }

    #[test]
    fn session_is_restored_from_the_persisted_blob() {
        let session = r#"{"id":"user-1","name":"Standard User","email":"user@company.com","role":"user"}"#;
        let blobs = MemoryBlobs::new().with_blob(keys::SESSION, session);
        let store = BenchmarkStore::open(Box::new(blobs)).unwrap();
        assert_eq!(store.current_user().unwrap().id, "user-1");
    }

    #[test]
    fn corrupt_session_blob_reads_as_signed_out() {
        let blobs = MemoryBlobs::new().with_blob(keys::SESSION, "{nope");
        let store = BenchmarkStore::open(Box::new(blobs)).unwrap();
        assert!(store.current_user().is_none());
    }

    #[test]
    fn corrupt_settings_blob_falls_back_to_defaults() {
        let blobs = MemoryBlobs::new().with_blob(keys::SETTINGS, "not json");
        let store = BenchmarkStore::open(Box::new(blobs)).unwrap();
        assert_eq!(
            store.admin_emails(),
            ["admin@taxbenchmark.com", "jiyangu923@gmail.com"]
        );
        assert_eq!(store.webhook_url(), "");
    }

    #[test]
    fn corrupt_users_blob_reseeds_the_directory() {
        let blobs = MemoryBlobs::new().with_blob(keys::USERS, "[{\"broken\":");
        let mut store = BenchmarkStore::open(Box::new(blobs)).unwrap();
        assert!(store.login("user@company.com", Some("password123")).is_ok());
    }

    #[test]
    fn add_admin_email_promotes_existing_account_immediately() {
        let mut store = fresh();
        store.register("Grace", "grace@test.com", "pass").unwrap();
        store.logout().unwrap();
        store.add_admin_email("GRACE@TEST.COM").unwrap();
        let record = store
            .backup_parts()
            .1
            .iter()
            .find(|u| u.email == "grace@test.com")
            .unwrap()
            .clone();
        assert_eq!(record.role, Role::Admin);
    }

    #[test]
    fn add_admin_email_is_idempotent() {
        let mut store = fresh();
        store.add_admin_email("once@test.com").unwrap();
        store.add_admin_email("ONCE@TEST.COM").unwrap();
        let count = store
            .admin_emails()
            .iter()
            .filter(|e| *e == "once@test.com")
            .count();
        assert_eq!(count, 1);
    }

    #[test]
    fn remove_admin_email_demotes_existing_account_immediately() {
        let mut store = fresh();
        store.remove_admin_email("jiyangu923@gmail.com").unwrap();
        let record = store
            .backup_parts()
            .1
            .iter()
            .find(|u| u.email == "jiyangu923@gmail.com")
            .unwrap()
            .clone();
        assert_eq!(record.role, Role::User);
        assert!(!store
            .admin_emails()
            .iter()
            .any(|e| e == "jiyangu923@gmail.com"));
    }

    #[test]
    fn webhook_url_round_trips() {
        let mut store = fresh();
        assert_eq!(store.webhook_url(), "");
        store.set_webhook_url("https://example.com/hook").unwrap();
        assert_eq!(store.webhook_url(), "https://example.com/hook");
    }

    // ── Submissions ────────────────────────────────────────────────────

    #[test]
    fn create_submission_requires_a_session() {
        let mut store = fresh();
        let err = store
            .create_submission(SubmissionAnswers::default())
            .unwrap_err();
        assert!(matches!(err, StoreError::NotAuthenticated));
    }

    #[test]
    fn first_submission_is_pending_and_counts_once() {
        let mut store = fresh();
        store.register("Hana", "hana@test.com", "pass").unwrap();
        let before = store.submissions().len();
        let sub = store
            .create_submission(answers_with_industry("technology"))
            .unwrap();
        assert_eq!(sub.status, SubmissionStatus::Pending);
        assert_eq!(sub.user_name, "Hana");
        assert_eq!(store.submissions().len(), before + 1);
    }

    #[test]
    fn resubmitting_replaces_the_previous_submission() {
        let mut store = fresh();
        store.register("Ivan", "ivan@test.com", "pass").unwrap();
        let first = store
            .create_submission(answers_with_industry("healthcare_life_sciences"))
            .unwrap();
        // Approve the first one; the replacement must still come back pending.
        store
            .update_submission_status(&first.id, Verdict::Approved)
            .unwrap();
        let second = store
            .create_submission(answers_with_industry("technology"))
            .unwrap();

        let mine: Vec<_> = store
            .submissions()
            .into_iter()
            .filter(|s| s.user_id == second.user_id)
            .collect();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].id, second.id);
        assert_eq!(mine[0].status, SubmissionStatus::Pending);
        assert_eq!(mine[0].answers.industry.as_deref(), Some("technology"));
    }

    #[test]
    fn status_update_applies_the_verdict() {
        let mut store = fresh();
        store.register("Judy", "judy@test.com", "pass").unwrap();
        let sub = store
            .create_submission(SubmissionAnswers::default())
            .unwrap();
        store
            .update_submission_status(&sub.id, Verdict::Approved)
            .unwrap();
        assert_eq!(
            store.submissions()[0].status,
            SubmissionStatus::Approved
        );
        store
            .update_submission_status(&sub.id, Verdict::Rejected)
            .unwrap();
        assert_eq!(
            store.submissions()[0].status,
            SubmissionStatus::Rejected
        );
    }

    #[test]
    fn status_update_on_unknown_id_is_a_no_op() {
        let mut store = fresh();
        store.register("Kim", "kim@test.com", "pass").unwrap();
        store
            .create_submission(answers_with_industry("technology"))
            .unwrap();
        let before = store.submissions();
        store
            .update_submission_status("sub-missing", Verdict::Rejected)
            .unwrap();
        assert_eq!(store.submissions(), before);
    }

    #[test]
    fn delete_submission_removes_exactly_the_target() {
        let mut store = fresh();
        store.register("Lola", "lola@test.com", "pass").unwrap();
        let sub = store
            .create_submission(SubmissionAnswers::default())
            .unwrap();
        store.delete_submission("sub-other").unwrap();
        assert_eq!(store.submissions().len(), 1);
        store.delete_submission(&sub.id).unwrap();
        assert!(store.submissions().is_empty());
    }

    #[test]
    fn delete_all_submissions_empties_the_repository() {
        let mut store = fresh();
        store.register("Mia", "mia@test.com", "pass").unwrap();
        store
            .create_submission(SubmissionAnswers::default())
            .unwrap();
        store.delete_all_submissions().unwrap();
        assert!(store.submissions().is_empty());
    }

    // ── Misc ───────────────────────────────────────────────────────────

    #[test]
    fn display_name_derivation() {
        assert_eq!(derive_display_name("jane@gmail.com"), "Jane");
        assert_eq!(derive_display_name("x@y.z"), "X");
        assert_eq!(derive_display_name("no-at-sign"), "No-at-sign");
    }
}
