//! Login orchestration and the per-request gate.
//!
//! `AuthService` is a constructed object holding its collaborators; nothing
//! here is process-global. The surrounding HTTP layer calls three entry
//! points: [`AuthService::login`], [`AuthService::verify_request`], and
//! [`AuthService::authorize`].

use std::sync::Arc;

use gatehouse_core::{DomainError, UserId};

use crate::{
    Action, AuthError, AuthResult, Claims, CredentialStore, Decision, GeoLookup, GeoSnapshot,
    GrantStore, LoginRecord, PermissionEvaluator, Role, SessionBinder, SessionState, TokenCodec,
    User, password,
};

pub struct AuthService {
    codec: TokenCodec,
    users: Arc<dyn CredentialStore>,
    binder: SessionBinder,
    evaluator: PermissionEvaluator,
    geo: Arc<dyn GeoLookup>,
    allowed_roles: Vec<Role>,
}

impl AuthService {
    pub fn new(
        codec: TokenCodec,
        users: Arc<dyn CredentialStore>,
        grants: Arc<dyn GrantStore>,
        geo: Arc<dyn GeoLookup>,
        allowed_roles: Vec<Role>,
    ) -> Self {
        Self {
            codec,
            binder: SessionBinder::new(users.clone()),
            evaluator: PermissionEvaluator::new(grants),
            users,
            geo,
            allowed_roles,
        }
    }

    /// Authenticate and open a session.
    ///
    /// On success the issued token becomes the user's canonical session
    /// token, superseding any previous one, and a login-history entry is
    /// appended. Unknown identifier and wrong password are indistinguishable
    /// to the caller.
    pub async fn login(
        &self,
        identifier: &str,
        password: &str,
        source_ip: &str,
    ) -> AuthResult<(String, User)> {
        let Some(mut user) = self.users.find_by_identifier(identifier).await? else {
            return Err(AuthError::InvalidCredentials);
        };

        if !password::verify_password(&user.password_hash, password) {
            return Err(AuthError::InvalidCredentials);
        }

        if !self.allowed_roles.contains(&user.role) {
            tracing::warn!(user = %user.id, role = %user.role, "login refused: role not allowed");
            return Err(AuthError::RoleNotAllowed);
        }

        let location = self.lookup_location(source_ip).await;
        let record = LoginRecord::new(source_ip, location);

        let token = self.codec.issue(user.id, user.role)?;
        self.binder.bind(user.id, &token).await?;
        self.users.append_login_record(user.id, record.clone()).await?;

        user.access_token = Some(token.clone());
        user.login_history.push(record);

        tracing::info!(user = %user.id, role = %user.role, "login succeeded");
        Ok((token, user))
    }

    /// End the active session by clearing the canonical token.
    pub async fn logout(&self, user_id: UserId) -> AuthResult<()> {
        self.binder.clear(user_id).await?;
        tracing::info!(user = %user_id, "session cleared");
        Ok(())
    }

    /// Per-request gate: token presence, signature, and session binding.
    ///
    /// Returns the verified claims for downstream permission checks. The
    /// role inside is the issuance-time snapshot.
    pub async fn verify_request(&self, token: Option<&str>) -> AuthResult<Claims> {
        let token = token.ok_or(AuthError::MissingToken)?;
        let claims = self.codec.verify(token)?;

        // A subject deleted after issuance is indistinguishable from a
        // forged one: same rejection, no account-existence signal.
        let state = match self.binder.check(claims.sub, token).await {
            Ok(state) => state,
            Err(DomainError::NotFound) => return Err(AuthError::InvalidToken),
            Err(err) => return Err(err.into()),
        };

        match state {
            SessionState::Bound => Ok(claims),
            SessionState::Superseded => Err(AuthError::Superseded),
        }
    }

    /// Permission check: may `role` perform `method` on `resource`?
    ///
    /// `resource` is the request's logical base path. Verbs outside the
    /// closed action set deny by default.
    pub async fn authorize(&self, role: Role, resource: &str, method: &str) -> AuthResult<()> {
        let Some(action) = Action::from_method(method) else {
            return Err(AuthError::PermissionDenied);
        };

        match self.evaluator.evaluate(role, resource, action).await? {
            Decision::Granted => Ok(()),
            Decision::Denied => Err(AuthError::PermissionDenied),
        }
    }

    async fn lookup_location(&self, source_ip: &str) -> GeoSnapshot {
        match self.geo.lookup(source_ip).await {
            Ok(snapshot) => snapshot,
            Err(err) => {
                // Advisory lookup: degrade, never block the login.
                tracing::warn!(%err, ip = source_ip, "geolocation lookup degraded");
                GeoSnapshot::unknown()
            }
        }
    }
}
