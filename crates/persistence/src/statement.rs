//! SQL statements with positional bound parameters.
//!
//! A [`Statement`] pairs statement text using `$1`, `$2`, ... placeholders
//! with the values bound to them. Values are handed to the driver as
//! arguments and never spliced into the text.

use serde_json::Value;
use sqlx::postgres::PgArguments;
use sqlx::types::Json;
use sqlx::Arguments;

/// A typed, nullable statement parameter.
///
/// Nulls keep their type so Postgres can infer the placeholder type even
/// when no value is supplied.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlParam {
    Bool(Option<bool>),
    Int(Option<i32>),
    BigInt(Option<i64>),
    Text(Option<String>),
    Json(Option<Value>),
}

impl SqlParam {
    #[cfg(test)]
    pub(crate) fn is_null(&self) -> bool {
        match self {
            SqlParam::Bool(v) => v.is_none(),
            SqlParam::Int(v) => v.is_none(),
            SqlParam::BigInt(v) => v.is_none(),
            SqlParam::Text(v) => v.is_none(),
            SqlParam::Json(v) => v.is_none(),
        }
    }

    fn add_to(&self, args: &mut PgArguments) {
        match self {
            SqlParam::Bool(v) => args.add(*v),
            SqlParam::Int(v) => args.add(*v),
            SqlParam::BigInt(v) => args.add(*v),
            SqlParam::Text(v) => args.add(v.clone()),
            SqlParam::Json(v) => args.add(v.clone().map(Json)),
        }
    }
}

macro_rules! impl_from_param {
    ($variant:ident, $ty:ty) => {
        impl From<$ty> for SqlParam {
            fn from(value: $ty) -> Self {
                SqlParam::$variant(Some(value))
            }
        }

        impl From<Option<$ty>> for SqlParam {
            fn from(value: Option<$ty>) -> Self {
                SqlParam::$variant(value)
            }
        }
    };
}

impl_from_param!(Bool, bool);
impl_from_param!(Int, i32);
impl_from_param!(BigInt, i64);
impl_from_param!(Text, String);
impl_from_param!(Json, Value);

impl From<&str> for SqlParam {
    fn from(value: &str) -> Self {
        SqlParam::Text(Some(value.to_string()))
    }
}

impl From<Option<&str>> for SqlParam {
    fn from(value: Option<&str>) -> Self {
        SqlParam::Text(value.map(str::to_string))
    }
}

/// A named SQL statement and its positional parameters.
///
/// The name labels log records and the `database_query_duration_seconds`
/// histogram.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    name: &'static str,
    sql: String,
    params: Vec<SqlParam>,
}

impl Statement {
    pub fn new(name: &'static str, sql: impl Into<String>) -> Self {
        Self {
            name,
            sql: sql.into(),
            params: Vec::new(),
        }
    }

    /// Appends the value for the next placeholder.
    pub fn bind(mut self, param: impl Into<SqlParam>) -> Self {
        self.params.push(param.into());
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn params(&self) -> &[SqlParam] {
        &self.params
    }

    /// Highest `$n` placeholder referenced by the statement text.
    #[cfg(test)]
    pub(crate) fn max_placeholder(&self) -> usize {
        let bytes = self.sql.as_bytes();
        let mut max = 0;
        let mut i = 0;
        while i < bytes.len() {
            if bytes[i] == b'$' {
                let start = i + 1;
                let mut end = start;
                while end < bytes.len() && bytes[end].is_ascii_digit() {
                    end += 1;
                }
                if let Ok(n) = self.sql[start..end].parse::<usize>() {
                    max = max.max(n);
                }
                i = end.max(start);
            } else {
                i += 1;
            }
        }
        max
    }

    pub(crate) fn arguments(&self) -> PgArguments {
        let mut args = PgArguments::default();
        for param in &self.params {
            param.add_to(&mut args);
        }
        args
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bind_appends_in_order() {
        let stmt = Statement::new("t", "SELECT $1, $2, $3")
            .bind("a")
            .bind(2i64)
            .bind(Option::<bool>::None);

        assert_eq!(
            stmt.params(),
            &[
                SqlParam::Text(Some("a".to_string())),
                SqlParam::BigInt(Some(2)),
                SqlParam::Bool(None),
            ]
        );
        assert_eq!(stmt.max_placeholder(), 3);
    }

    #[test]
    fn test_null_params_keep_type() {
        assert_eq!(SqlParam::from(Option::<&str>::None), SqlParam::Text(None));
        assert_eq!(SqlParam::from(Option::<i64>::None), SqlParam::BigInt(None));
        assert!(SqlParam::from(Option::<i32>::None).is_null());
        assert!(!SqlParam::from(json!({"read": true})).is_null());
    }

    #[test]
    fn test_max_placeholder_ignores_bare_dollars() {
        let stmt = Statement::new("t", "SELECT '$' || $12 || $2");
        assert_eq!(stmt.max_placeholder(), 12);

        let stmt = Statement::new("t", "SELECT 1");
        assert_eq!(stmt.max_placeholder(), 0);
    }

    #[test]
    fn test_bound_value_never_reaches_sql_text() {
        let hostile = "x'; DROP TABLE users; --";
        let stmt = Statement::new("t", "SELECT * FROM users WHERE email = $1").bind(hostile);

        assert!(!stmt.sql().contains(hostile));
        assert_eq!(stmt.params(), &[SqlParam::Text(Some(hostile.to_string()))]);
    }

    #[test]
    fn test_statement_name() {
        let stmt = Statement::new("get_users", "SELECT 1");
        assert_eq!(stmt.name(), "get_users");
    }
}
