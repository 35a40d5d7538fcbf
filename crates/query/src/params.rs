//! Bind parameters and named-placeholder handling
//!
//! Queries use `:name` placeholders in the SQL text. Each backend rewrites
//! them to its native syntax (`{name:Type}` for ClickHouse, `$n` for
//! Postgres) before execution; user-supplied values never end up inside
//! the SQL string itself.

use chrono::NaiveDate;

/// A scalar bind value
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    /// UTF-8 text
    Text(String),
    /// Signed 64-bit integer
    Int(i64),
    /// 64-bit floating point
    Float(f64),
    /// Calendar date
    Date(NaiveDate),
}

impl SqlValue {
    /// Render the value as its SQL literal text (used for URL parameters,
    /// never spliced into SQL)
    pub fn render(&self) -> String {
        match self {
            SqlValue::Text(s) => s.clone(),
            SqlValue::Int(i) => i.to_string(),
            SqlValue::Float(f) => f.to_string(),
            SqlValue::Date(d) => d.format("%Y-%m-%d").to_string(),
        }
    }
}

impl From<&str> for SqlValue {
    fn from(v: &str) -> Self {
        SqlValue::Text(v.to_string())
    }
}

impl From<String> for SqlValue {
    fn from(v: String) -> Self {
        SqlValue::Text(v)
    }
}

impl From<i64> for SqlValue {
    fn from(v: i64) -> Self {
        SqlValue::Int(v)
    }
}

impl From<i32> for SqlValue {
    fn from(v: i32) -> Self {
        SqlValue::Int(v as i64)
    }
}

impl From<u32> for SqlValue {
    fn from(v: u32) -> Self {
        SqlValue::Int(v as i64)
    }
}

impl From<f64> for SqlValue {
    fn from(v: f64) -> Self {
        SqlValue::Float(v)
    }
}

impl From<NaiveDate> for SqlValue {
    fn from(v: NaiveDate) -> Self {
        SqlValue::Date(v)
    }
}

/// A named bind parameter
#[derive(Debug, Clone, PartialEq)]
pub struct SqlParam {
    /// Placeholder name (without the leading `:`)
    pub name: String,
    /// Bound value
    pub value: SqlValue,
}

impl SqlParam {
    /// Create a new named parameter
    pub fn new(name: impl Into<String>, value: impl Into<SqlValue>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A SQL statement with named bind parameters
#[derive(Debug, Clone)]
pub struct SqlQuery {
    /// SQL text with `:name` placeholders
    pub sql: String,
    /// Bound parameter values
    pub params: Vec<SqlParam>,
}

impl SqlQuery {
    /// Create a query with no parameters
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            params: Vec::new(),
        }
    }

    /// Bind a named parameter
    pub fn bind(mut self, name: impl Into<String>, value: impl Into<SqlValue>) -> Self {
        self.params.push(SqlParam::new(name, value));
        self
    }

    /// Look up a bound parameter by name
    pub fn param(&self, name: &str) -> Option<&SqlValue> {
        self.params.iter().find(|p| p.name == name).map(|p| &p.value)
    }
}

/// A fragment of tokenized SQL text
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Segment {
    /// Literal SQL text, emitted unchanged
    Text(String),
    /// A `:name` placeholder (name without the colon)
    Param(String),
}

/// Split SQL text into literal fragments and named placeholders.
///
/// Single-quoted string literals are copied verbatim, and `::` (the
/// Postgres cast operator) is never treated as a placeholder.
pub(crate) fn split_placeholders(sql: &str) -> Vec<Segment> {
    let chars: Vec<char> = sql.chars().collect();
    let mut segments = Vec::new();
    let mut buf = String::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if c == '\'' {
            buf.push(c);
            i += 1;
            while i < chars.len() {
                buf.push(chars[i]);
                i += 1;
                if chars[i - 1] == '\'' {
                    break;
                }
            }
            continue;
        }

        if c == ':' {
            if i + 1 < chars.len() && chars[i + 1] == ':' {
                buf.push_str("::");
                i += 2;
                continue;
            }
            if i + 1 < chars.len() && is_ident_start(chars[i + 1]) {
                let mut j = i + 1;
                while j < chars.len() && is_ident_char(chars[j]) {
                    j += 1;
                }
                if !buf.is_empty() {
                    segments.push(Segment::Text(std::mem::take(&mut buf)));
                }
                segments.push(Segment::Param(chars[i + 1..j].iter().collect()));
                i = j;
                continue;
            }
        }

        buf.push(c);
        i += 1;
    }

    if !buf.is_empty() {
        segments.push(Segment::Text(buf));
    }

    segments
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_simple() {
        let segs = split_placeholders("SELECT * FROM listing WHERE city = :city");
        assert_eq!(
            segs,
            vec![
                Segment::Text("SELECT * FROM listing WHERE city = ".to_string()),
                Segment::Param("city".to_string()),
            ]
        );
    }

    #[test]
    fn test_split_repeated_and_multiple() {
        let segs = split_placeholders("WHERE a = :x AND b = :y AND c = :x");
        let params: Vec<_> = segs
            .iter()
            .filter_map(|s| match s {
                Segment::Param(name) => Some(name.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(params, vec!["x", "y", "x"]);
    }

    #[test]
    fn test_split_ignores_casts() {
        let segs = split_placeholders("SELECT x::date FROM t WHERE y = :y");
        assert_eq!(
            segs[0],
            Segment::Text("SELECT x::date FROM t WHERE y = ".to_string())
        );
        assert_eq!(segs[1], Segment::Param("y".to_string()));
    }

    #[test]
    fn test_split_ignores_string_literals() {
        let segs = split_placeholders("SELECT ':not_a_param' FROM t");
        assert_eq!(
            segs,
            vec![Segment::Text("SELECT ':not_a_param' FROM t".to_string())]
        );
    }

    #[test]
    fn test_query_builder() {
        let query = SqlQuery::new("SELECT 1 WHERE a = :a AND b = :b")
            .bind("a", "hello")
            .bind("b", 42i64);
        assert_eq!(query.params.len(), 2);
        assert_eq!(query.param("a"), Some(&SqlValue::Text("hello".to_string())));
        assert_eq!(query.param("b"), Some(&SqlValue::Int(42)));
        assert_eq!(query.param("c"), None);
    }

    #[test]
    fn test_value_render() {
        assert_eq!(SqlValue::Text("Paris".into()).render(), "Paris");
        assert_eq!(SqlValue::Int(5).render(), "5");
        let d = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(SqlValue::Date(d).render(), "2024-03-01");
    }
}
