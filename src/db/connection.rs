use std::fmt;

use async_trait::async_trait;
use sqlx::mysql::MySqlConnectOptions;
use sqlx::{Connection, MySqlConnection};

use crate::models::EmployeeCredential;

/// Every row sharing the submitted legajo. Digest comparison happens in the
/// gate so both digest schemes share one query.
const FIND_EMPLOYEES: &str = "SELECT CAST(legajo AS CHAR) AS legajo, CAST(password AS CHAR) AS password
     FROM EMPLEADOS
     WHERE legajo = ?";

/// User/password pair for one database account.
#[derive(Clone, PartialEq, Eq)]
pub struct DbCredentials {
    user: String,
    password: String,
}

impl DbCredentials {
    pub fn new(user: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            password: password.into(),
        }
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for DbCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbCredentials")
            .field("user", &self.user)
            .field("password", &"***")
            .finish()
    }
}

/// Opens store connections under a given account.
#[async_trait]
pub trait Connector: Send + Sync {
    type Connection: StoreConnection;

    async fn connect(&self, credentials: &DbCredentials) -> Result<Self::Connection, sqlx::Error>;
}

/// A single open connection to the credential store.
#[async_trait]
pub trait StoreConnection: Send + Sized {
    async fn find_employees(&mut self, legajo: &str) -> Result<Vec<EmployeeCredential>, sqlx::Error>;

    async fn close(self) -> Result<(), sqlx::Error>;
}

#[derive(Clone, Debug)]
pub struct MySqlConnector {
    options: MySqlConnectOptions,
}

impl MySqlConnector {
    pub fn new(host: &str, port: u16, database: &str, timezone: Option<String>) -> Self {
        let options = MySqlConnectOptions::new()
            .host(host)
            .port(port)
            .database(database)
            .timezone(timezone);
        Self { options }
    }
}

#[async_trait]
impl Connector for MySqlConnector {
    type Connection = MySqlConnection;

    async fn connect(&self, credentials: &DbCredentials) -> Result<MySqlConnection, sqlx::Error> {
        let options = self
            .options
            .clone()
            .username(credentials.user())
            .password(credentials.password());
        MySqlConnection::connect_with(&options).await
    }
}

#[async_trait]
impl StoreConnection for MySqlConnection {
    async fn find_employees(&mut self, legajo: &str) -> Result<Vec<EmployeeCredential>, sqlx::Error> {
        sqlx::query_as::<_, EmployeeCredential>(FIND_EMPLOYEES)
            .bind(legajo)
            .fetch_all(&mut *self)
            .await
    }

    async fn close(self) -> Result<(), sqlx::Error> {
        Connection::close(self).await
    }
}
