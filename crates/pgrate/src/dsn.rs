//! PostgreSQL datasource names in the two encodings psql understands.

use url::form_urlencoded;
use url::Url;

use crate::config::DatabaseConfig;
use crate::{Error, Result};

const URI_SCHEME: &str = "postgresql";

/// A PostgreSQL datasource name.
///
/// Produces the two string encodings on demand; both are pure functions of
/// the fields. Field constraints (non-empty host/name/user/search path,
/// non-zero port) are enforced by the CUE schema before a profile is
/// loaded. The password may legitimately be empty for local use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostgresDsn {
    pub host: String,
    pub port: u16,
    pub dbname: String,
    pub search_path: String,
    pub user: String,
    pub password: String,
}

impl From<&DatabaseConfig> for PostgresDsn {
    fn from(db: &DatabaseConfig) -> Self {
        Self {
            host: db.host.clone(),
            port: db.port,
            dbname: db.name.clone(),
            search_path: db.search_path.clone(),
            user: db.user.clone(),
            password: db.password.clone(),
        }
    }
}

impl PostgresDsn {
    /// Format the DSN as a connection URI:
    ///
    /// ```text
    /// postgresql://alice@localhost:5432/mydb?options=-csearch_path%3Dpublic
    /// ```
    ///
    /// The password is never placed in the URI; psql resolves it through
    /// `~/.pgpass` or the environment. The port segment is omitted when the
    /// port is 0, and the `options` parameter is omitted when no search
    /// path is set. Components are percent-encoded.
    pub fn connection_uri(&self) -> Result<String> {
        let mut url = Url::parse(&format!("{URI_SCHEME}://{}", self.host))
            .map_err(|e| Error::Dsn(format!("host {}: {e}", self.host)))?;

        if self.port != 0 {
            url.set_port(Some(self.port))
                .map_err(|()| Error::Dsn(format!("port {} not accepted", self.port)))?;
        }

        url.set_username(&self.user)
            .map_err(|()| Error::Dsn(format!("user {} not accepted", self.user)))?;

        url.set_path(&self.dbname);

        if !self.search_path.is_empty() {
            let query = form_urlencoded::Serializer::new(String::new())
                .append_pair("options", &format!("-csearch_path={}", self.search_path))
                .finish();
            url.set_query(Some(&query));
        }

        Ok(url.to_string())
    }

    /// Format the DSN as a keyword/value connection string:
    ///
    /// ```text
    /// host=localhost port=5432 dbname=mydb user=alice sslmode=disable search_path=public
    /// ```
    ///
    /// The password pair is present only when a password is set; psql
    /// refuses to connect on an empty `password=`.
    #[must_use]
    pub fn keyword_value_string(&self) -> String {
        let mut s = format!(
            "host={} port={} dbname={} user={}",
            self.host, self.port, self.dbname, self.user
        );

        if !self.password.is_empty() {
            s.push_str(&format!(" password={}", self.password));
        }

        s.push_str(" sslmode=disable");

        if !self.search_path.is_empty() {
            s.push_str(&format!(" search_path={}", self.search_path));
        }

        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dsn() -> PostgresDsn {
        PostgresDsn {
            host: "localhost".to_string(),
            port: 5432,
            dbname: "mydb".to_string(),
            search_path: "public".to_string(),
            user: "alice".to_string(),
            password: String::new(),
        }
    }

    #[test]
    fn keyword_value_without_password() {
        assert_eq!(
            dsn().keyword_value_string(),
            "host=localhost port=5432 dbname=mydb user=alice sslmode=disable search_path=public"
        );
    }

    #[test]
    fn keyword_value_with_password() {
        let mut dsn = dsn();
        dsn.password = "secret".to_string();

        assert_eq!(
            dsn.keyword_value_string(),
            "host=localhost port=5432 dbname=mydb user=alice password=secret sslmode=disable search_path=public"
        );
    }

    #[test]
    fn keyword_value_without_search_path() {
        let mut dsn = dsn();
        dsn.search_path = String::new();

        assert_eq!(
            dsn.keyword_value_string(),
            "host=localhost port=5432 dbname=mydb user=alice sslmode=disable"
        );
    }

    #[test]
    fn uri_with_port_and_search_path() {
        assert_eq!(
            dsn().connection_uri().unwrap(),
            "postgresql://alice@localhost:5432/mydb?options=-csearch_path%3Dpublic"
        );
    }

    #[test]
    fn uri_omits_zero_port() {
        let mut dsn = dsn();
        dsn.port = 0;

        assert_eq!(
            dsn.connection_uri().unwrap(),
            "postgresql://alice@localhost/mydb?options=-csearch_path%3Dpublic"
        );
    }

    #[test]
    fn uri_omits_empty_search_path() {
        let mut dsn = dsn();
        dsn.search_path = String::new();

        assert_eq!(
            dsn.connection_uri().unwrap(),
            "postgresql://alice@localhost:5432/mydb"
        );
    }

    #[test]
    fn uri_never_carries_the_password() {
        let mut dsn = dsn();
        dsn.password = "secret".to_string();

        let uri = dsn.connection_uri().unwrap();
        assert!(!uri.contains("secret"));
    }

    #[test]
    fn uri_percent_encodes_user() {
        let mut dsn = dsn();
        dsn.user = "al ice".to_string();

        let uri = dsn.connection_uri().unwrap();
        assert!(uri.starts_with("postgresql://al%20ice@localhost"), "got {uri}");
    }
}
