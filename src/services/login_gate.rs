use std::time::Duration;

use crate::config::Config;
use crate::db::{Connector, DbCredentials, StoreConnection};
use crate::error::AuthError;
use crate::services::DigestScheme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    Idle,
    Checking,
    Authenticated,
}

/// Connection opened under the shared role account after a successful login.
pub struct Session<T> {
    connection: T,
    role_user: String,
    legajo: String,
}

impl<T> Session<T> {
    /// Database account the session runs under.
    pub fn role_user(&self) -> &str {
        &self.role_user
    }

    /// Employee whose login opened this session.
    pub fn legajo(&self) -> &str {
        &self.legajo
    }

    pub fn connection(&self) -> &T {
        &self.connection
    }

}

/// Checks legajo/password pairs against the employee table and, on success,
/// holds a session opened with the shared role credential.
pub struct LoginGate<C: Connector> {
    connector: C,
    lookup_credentials: DbCredentials,
    role_credentials: DbCredentials,
    digest_scheme: DigestScheme,
    timeout: Duration,
    state: GateState,
    session: Option<Session<C::Connection>>,
}

impl<C: Connector> LoginGate<C> {
    pub fn new(
        connector: C,
        lookup_credentials: DbCredentials,
        role_credentials: DbCredentials,
        digest_scheme: DigestScheme,
        timeout: Duration,
    ) -> Self {
        Self {
            connector,
            lookup_credentials,
            role_credentials,
            digest_scheme,
            timeout,
            state: GateState::Idle,
            session: None,
        }
    }

    pub fn from_config(connector: C, config: &Config) -> Self {
        Self::new(
            connector,
            config.lookup_credentials.clone(),
            config.role_credentials.clone(),
            config.digest_scheme,
            config.auth_timeout,
        )
    }

    pub fn state(&self) -> GateState {
        self.state
    }

    pub fn session(&self) -> Option<&Session<C::Connection>> {
        self.session.as_ref()
    }

    /// Runs one login attempt. On failure the previously held session, if
    /// any, is kept. Dropping the returned future abandons the attempt.
    /// A connection still open when the timeout fires is dropped, not closed.
    pub async fn authenticate(
        &mut self,
        legajo: &str,
        secret: &str,
    ) -> Result<&Session<C::Connection>, AuthError> {
        self.state = GateState::Checking;
        tracing::info!("Checking legajo {}", legajo);

        let timeout = self.timeout;
        let result = match tokio::time::timeout(timeout, self.attempt(legajo, secret)).await {
            Ok(result) => result,
            Err(_) => Err(AuthError::TimedOut(timeout)),
        };

        match result {
            Ok(session) => {
                self.state = GateState::Authenticated;
                tracing::info!(
                    "Legajo {} authenticated, session opened as {}",
                    legajo,
                    session.role_user
                );
                let session: &Session<C::Connection> = self.session.insert(session);
                Ok(session)
            }
            Err(e) => {
                self.state = GateState::Idle;
                match &e {
                    AuthError::NotFound => tracing::info!("Legajo {} rejected", legajo),
                    _ => tracing::error!("Login attempt for legajo {} failed: {}", legajo, e),
                }
                Err(e)
            }
        }
    }

    /// Closes the held session, if any.
    pub async fn sign_out(&mut self) {
        if let Some(session) = self.session.take() {
            close_quietly(session.connection, "role session").await;
            tracing::info!("Legajo {} signed out", session.legajo);
        }
        self.state = GateState::Idle;
    }

    async fn attempt(
        &mut self,
        legajo: &str,
        secret: &str,
    ) -> Result<Session<C::Connection>, AuthError> {
        self.verify_employee(legajo, secret).await?;

        if let Some(previous) = self.session.take() {
            tracing::debug!("Replacing session of legajo {}", previous.legajo);
            close_quietly(previous.connection, "previous role session").await;
        }

        let connection = self.connector.connect(&self.role_credentials).await?;
        Ok(Session {
            connection,
            role_user: self.role_credentials.user().to_string(),
            legajo: legajo.to_string(),
        })
    }

    async fn verify_employee(&self, legajo: &str, secret: &str) -> Result<(), AuthError> {
        let mut lookup = self.connector.connect(&self.lookup_credentials).await?;
        let rows = lookup.find_employees(legajo).await;
        close_quietly(lookup, "lookup connection").await;

        let found = rows?.iter().any(|row| {
            row.has_legajo()
                && row
                    .password
                    .as_deref()
                    .is_some_and(|stored| self.digest_scheme.verify(secret, stored))
        });

        if found {
            Ok(())
        } else {
            Err(AuthError::NotFound)
        }
    }
}

async fn close_quietly<T: StoreConnection>(connection: T, what: &str) {
    if let Err(e) = connection.close().await {
        tracing::warn!("Failed to close {}: {}", what, e);
    }
}
