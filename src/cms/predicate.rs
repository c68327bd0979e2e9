//! Query predicates understood by the content API

use chrono::{DateTime, Utc};

/// A single filter predicate
///
/// Predicates are combined with AND semantics when passed together to a
/// query. Date comparisons are strict (exclusive of the boundary).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// Field equals value
    At { path: String, value: String },
    /// Field is strictly after the given instant
    DateAfter {
        path: String,
        value: DateTime<Utc>,
    },
    /// Field is strictly before the given instant
    DateBefore {
        path: String,
        value: DateTime<Utc>,
    },
}

impl Predicate {
    pub fn at(path: &str, value: &str) -> Self {
        Self::At {
            path: path.to_string(),
            value: value.to_string(),
        }
    }

    pub fn date_after(path: &str, value: DateTime<Utc>) -> Self {
        Self::DateAfter {
            path: path.to_string(),
            value,
        }
    }

    pub fn date_before(path: &str, value: DateTime<Utc>) -> Self {
        Self::DateBefore {
            path: path.to_string(),
            value,
        }
    }

    /// Wire form of this predicate, e.g. `[at(document.type,"posts")]`
    ///
    /// Dates are sent as millisecond timestamps.
    pub fn to_query(&self) -> String {
        match self {
            Self::At { path, value } => format!(r#"[at({},"{}")]"#, path, value),
            Self::DateAfter { path, value } => {
                format!("[date.after({},{})]", path, value.timestamp_millis())
            }
            Self::DateBefore { path, value } => {
                format!("[date.before({},{})]", path, value.timestamp_millis())
            }
        }
    }
}

/// Combine predicates into the `q` query parameter form
pub fn to_query_param(predicates: &[Predicate]) -> String {
    let inner: String = predicates.iter().map(|p| p.to_query()).collect();
    format!("[{}]", inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_at_predicate() {
        let p = Predicate::at("document.type", "posts");
        assert_eq!(p.to_query(), r#"[at(document.type,"posts")]"#);
    }

    #[test]
    fn test_date_predicates_use_millis() {
        let dt = Utc.with_ymd_and_hms(2021, 3, 15, 0, 0, 0).unwrap();
        let after = Predicate::date_after("document.first_publication_date", dt);
        assert_eq!(
            after.to_query(),
            format!(
                "[date.after(document.first_publication_date,{})]",
                dt.timestamp_millis()
            )
        );

        let before = Predicate::date_before("document.first_publication_date", dt);
        assert!(before.to_query().starts_with("[date.before("));
    }

    #[test]
    fn test_query_param_combines_predicates() {
        let dt = Utc.with_ymd_and_hms(2021, 3, 15, 0, 0, 0).unwrap();
        let q = to_query_param(&[
            Predicate::at("document.type", "posts"),
            Predicate::date_after("document.first_publication_date", dt),
        ]);
        assert!(q.starts_with(r#"[[at(document.type,"posts")][date.after("#));
        assert!(q.ends_with(")]]"));
    }
}
