//! WHERE clause expression tree.
//!
//! A WHERE clause is an ordered list of [`WhereClause`]s. Each clause carries the
//! connector that joins it to the clause before it, so the connector of the first
//! clause in any list is never emitted. Nesting a list inside [`Expression::Nested`]
//! groups it in parentheses:
//!
//! ```ignore
//! use sqlj::{Expression, WhereClause};
//!
//! let clauses = vec![
//!     WhereClause::and("id = ?"),
//!     WhereClause::and(Expression::nested(vec![
//!         WhereClause::and("post_type = ?"),
//!         WhereClause::or("title = ?"),
//!     ])),
//! ];
//! let (sql, count) = sqlj::expr::build_where_clause(&clauses);
//! assert_eq!(sql, "id = $1 AND (post_type = $2 OR title = $3)");
//! assert_eq!(count, 3);
//! ```

use std::fmt;

use crate::placeholder;

/// Boolean joiner placed before a clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connector {
    And,
    Or,
}

impl Connector {
    /// SQL keyword for this connector.
    pub fn as_str(self) -> &'static str {
        match self {
            Connector::And => "AND",
            Connector::Or => "OR",
        }
    }
}

impl fmt::Display for Connector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A clause body: raw text with `?` markers, or a parenthesised group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expression {
    /// Raw SQL text, possibly containing unbound `?` markers.
    Simple(String),
    /// A group of clauses rendered inside parentheses.
    Nested(Vec<WhereClause>),
}

impl Expression {
    pub fn simple(text: impl Into<String>) -> Self {
        Expression::Simple(text.into())
    }

    pub fn nested(clauses: Vec<WhereClause>) -> Self {
        Expression::Nested(clauses)
    }

    /// Render without placeholder rewriting.
    pub fn render(&self) -> String {
        match self {
            Expression::Simple(text) => text.clone(),
            Expression::Nested(clauses) => format!("({})", render(clauses)),
        }
    }
}

impl From<&str> for Expression {
    fn from(text: &str) -> Self {
        Expression::Simple(text.to_string())
    }
}

impl From<String> for Expression {
    fn from(text: String) -> Self {
        Expression::Simple(text)
    }
}

/// One clause of a WHERE list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WhereClause {
    pub connector: Connector,
    pub expression: Expression,
}

impl WhereClause {
    pub fn new(connector: Connector, expression: impl Into<Expression>) -> Self {
        Self {
            connector,
            expression: expression.into(),
        }
    }

    /// A clause joined with `AND`.
    pub fn and(expression: impl Into<Expression>) -> Self {
        Self::new(Connector::And, expression)
    }

    /// A clause joined with `OR`.
    pub fn or(expression: impl Into<Expression>) -> Self {
        Self::new(Connector::Or, expression)
    }
}

/// Join clauses into SQL text, leaving `?` markers in place.
///
/// An empty list renders as the empty string.
pub fn render(clauses: &[WhereClause]) -> String {
    let mut out = String::new();

    for (idx, clause) in clauses.iter().enumerate() {
        if idx > 0 {
            out.push(' ');
            out.push_str(clause.connector.as_str());
            out.push(' ');
        }
        out.push_str(&clause.expression.render());
    }

    out
}

/// Render clauses and rewrite their markers to `$1..$n`.
///
/// Returns the rewritten text and `n`, so later placeholders (LIMIT, OFFSET, ...)
/// can continue numbering after the WHERE clause's own.
pub fn build_where_clause(clauses: &[WhereClause]) -> (String, usize) {
    if clauses.is_empty() {
        return (String::new(), 0);
    }

    placeholder::rewrite(&render(clauses), 0)
}

/// `"<column> = ?"`
pub fn column_eq(column: &str) -> String {
    format!("{} = ?", column)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_list() {
        assert_eq!(render(&[]), "");
        assert_eq!(build_where_clause(&[]), (String::new(), 0));
    }

    #[test]
    fn single_clause() {
        let (sql, n) = build_where_clause(&[WhereClause::and("id = ?")]);
        assert_eq!(sql, "id = $1");
        assert_eq!(n, 1);
    }

    #[test]
    fn first_connector_is_never_emitted() {
        assert_eq!(render(&[WhereClause::or("a = 1")]), "a = 1");
    }

    #[test]
    fn multiple_and() {
        let (sql, n) = build_where_clause(&[
            WhereClause::and("post_type = ?"),
            WhereClause::and("created_at > ?"),
        ]);
        assert_eq!(sql, "post_type = $1 AND created_at > $2");
        assert_eq!(n, 2);
    }

    #[test]
    fn and_or() {
        let (sql, n) = build_where_clause(&[
            WhereClause::and("post_type = ?"),
            WhereClause::or("title = ?"),
        ]);
        assert_eq!(sql, "post_type = $1 OR title = $2");
        assert_eq!(n, 2);
    }

    #[test]
    fn nested_group() {
        let clauses = vec![
            WhereClause::and("id = ?"),
            WhereClause::and(Expression::nested(vec![
                WhereClause::and("post_type = ?"),
                WhereClause::or("title = ?"),
            ])),
        ];
        assert_eq!(
            render(&clauses),
            "id = ? AND (post_type = ? OR title = ?)"
        );
        let (sql, n) = build_where_clause(&clauses);
        assert_eq!(sql, "id = $1 AND (post_type = $2 OR title = $3)");
        assert_eq!(n, 3);
    }

    #[test]
    fn deeply_nested_groups_number_left_to_right() {
        let clauses = vec![
            WhereClause::and(Expression::nested(vec![
                WhereClause::and("a = ?"),
                WhereClause::or(Expression::nested(vec![
                    WhereClause::and("b = ?"),
                    WhereClause::and("c = ?"),
                ])),
            ])),
            WhereClause::or("d = ?"),
        ];
        let (sql, n) = build_where_clause(&clauses);
        assert_eq!(sql, "(a = $1 OR (b = $2 AND c = $3)) OR d = $4");
        assert_eq!(n, 4);
    }

    #[test]
    fn quoted_markers_do_not_count() {
        let (sql, n) = build_where_clause(&[
            WhereClause::and("title = '?'"),
            WhereClause::and("author = ?"),
        ]);
        assert_eq!(sql, "title = '?' AND author = $1");
        assert_eq!(n, 1);
    }

    #[test]
    fn clauses_without_markers() {
        let (sql, n) = build_where_clause(&[
            WhereClause::and("deleted_at IS NULL"),
            WhereClause::and("published"),
        ]);
        assert_eq!(sql, "deleted_at IS NULL AND published");
        assert_eq!(n, 0);
    }

    #[test]
    fn column_eq_renders_marker() {
        assert_eq!(column_eq("id"), "id = ?");
    }

    #[test]
    fn many_clauses_number_sequentially() {
        let clauses: Vec<WhereClause> = (0..12)
            .map(|i| WhereClause::and(format!("c{} = ?", i)))
            .collect();
        let (sql, n) = build_where_clause(&clauses);
        assert_eq!(n, 12);
        assert!(sql.starts_with("c0 = $1 AND c1 = $2"));
        assert!(sql.ends_with("c11 = $12"));
    }
}
