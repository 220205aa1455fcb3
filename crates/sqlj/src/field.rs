//! Named column values for INSERT and UPDATE statements.

use std::collections::HashMap;

use crate::param::Param;
use crate::record::Record;

/// A named column value.
///
/// A [`Field::Bound`] value is sent as a query parameter and takes one `$n` slot.
/// A [`Field::Literal`] is spliced into the statement verbatim (`now()`,
/// `DEFAULT`, `'fixed'`) and takes no slot.
#[derive(Debug, Clone)]
pub enum Field {
    Bound { name: String, value: Param },
    Literal { name: String, raw_sql: String },
}

impl Field {
    /// A bound field.
    pub fn bound(name: impl Into<String>, value: Param) -> Self {
        Field::Bound {
            name: name.into(),
            value,
        }
    }

    /// A bound field wrapping `value`.
    pub fn value<T>(name: impl Into<String>, value: T) -> Self
    where
        T: tokio_postgres::types::ToSql + Send + Sync + 'static,
    {
        Self::bound(name, Param::new(value))
    }

    /// A raw SQL field. The caller is responsible for `raw_sql` being safe.
    pub fn literal(name: impl Into<String>, raw_sql: impl Into<String>) -> Self {
        Field::Literal {
            name: name.into(),
            raw_sql: raw_sql.into(),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Field::Bound { name, .. } | Field::Literal { name, .. } => name,
        }
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, Field::Literal { .. })
    }

    /// The runtime value, if this field takes a parameter slot.
    pub fn param(&self) -> Option<&Param> {
        match self {
            Field::Bound { value, .. } => Some(value),
            Field::Literal { .. } => None,
        }
    }

    /// Placeholder text for this field when it would take slot `idx`.
    pub fn placeholder(&self, idx: usize) -> String {
        match self {
            Field::Bound { .. } => format!("${}", idx),
            Field::Literal { raw_sql, .. } => raw_sql.clone(),
        }
    }
}

/// One bound field per persisted attribute of `record`, in declared order.
pub fn extract<R: Record>(record: &R) -> Vec<Field> {
    record.fields()
}

/// Drop fields whose name appears in `skip`, keeping relative order.
pub fn filter<S: AsRef<str>>(fields: Vec<Field>, skip: &[S]) -> Vec<Field> {
    fields
        .into_iter()
        .filter(|f| !skip.iter().any(|s| s.as_ref() == f.name()))
        .collect()
}

/// Collapse fields sharing a name.
///
/// The last field with a given name wins, and sits at the position where that
/// name first appeared.
pub fn dedupe(fields: Vec<Field>) -> Vec<Field> {
    let mut out: Vec<Field> = Vec::with_capacity(fields.len());
    let mut seen: HashMap<String, usize> = HashMap::with_capacity(fields.len());

    for field in fields {
        match seen.get(field.name()) {
            Some(&idx) => out[idx] = field,
            None => {
                seen.insert(field.name().to_string(), out.len());
                out.push(field);
            }
        }
    }

    out
}

/// Column names, in field order.
pub fn names(fields: &[Field]) -> Vec<String> {
    fields.iter().map(|f| f.name().to_string()).collect()
}

/// Runtime values of the bound fields, in field order. Literal fields contribute nothing.
pub fn values(fields: &[Field]) -> Vec<Param> {
    fields.iter().filter_map(|f| f.param().cloned()).collect()
}

/// Number of fields that take a parameter slot.
pub fn bound_count(fields: &[Field]) -> usize {
    fields.iter().filter(|f| !f.is_literal()).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn debug_values(fields: &[Field]) -> Vec<String> {
        values(fields).iter().map(|p| format!("{:?}", p)).collect()
    }

    fn sample() -> Vec<Field> {
        vec![
            Field::value("id", 7_i64),
            Field::value("name", "Jess"),
            Field::value("email", "jess@example.com"),
        ]
    }

    #[test]
    fn filter_removes_skipped_names() {
        let out = filter(sample(), &["id"]);
        assert_eq!(names(&out), vec!["name", "email"]);
    }

    #[test]
    fn filter_never_yields_skipped_name() {
        let fields = vec![
            Field::value("id", 1_i64),
            Field::literal("id", "DEFAULT"),
            Field::value("name", "x"),
            Field::value("id", 2_i64),
        ];
        let out = filter(fields, &["id"]);
        assert!(out.iter().all(|f| f.name() != "id"));
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn filter_with_no_skips_keeps_everything() {
        let out = filter(sample(), &[] as &[&str]);
        assert_eq!(names(&out), vec!["id", "name", "email"]);
    }

    #[test]
    fn dedupe_last_write_wins() {
        let out = dedupe(vec![
            Field::value("name", "A"),
            Field::literal("name", "B"),
        ]);
        assert_eq!(out.len(), 1);
        match &out[0] {
            Field::Literal { name, raw_sql } => {
                assert_eq!(name, "name");
                assert_eq!(raw_sql, "B");
            }
            other => panic!("expected literal, got {:?}", other),
        }
    }

    #[test]
    fn dedupe_keeps_first_occurrence_order() {
        let mut fields = sample();
        fields.push(Field::literal("email", "lower('X@EXAMPLE.COM')"));
        fields.push(Field::literal("created_at", "now()"));
        fields.push(Field::value("id", 9_i64));

        let out = dedupe(fields);
        assert_eq!(names(&out), vec!["id", "name", "email", "created_at"]);
        assert!(out[2].is_literal());
        assert_eq!(debug_values(&out), vec!["9", "\"Jess\""]);
    }

    #[test]
    fn dedupe_is_reproducible() {
        let build = || {
            dedupe(vec![
                Field::value("b", 1_i32),
                Field::value("a", 2_i32),
                Field::value("c", 3_i32),
                Field::value("a", 4_i32),
            ])
        };
        for _ in 0..16 {
            assert_eq!(names(&build()), vec!["b", "a", "c"]);
            assert_eq!(debug_values(&build()), vec!["1", "4", "3"]);
        }
    }

    #[test]
    fn values_skip_literals_and_keep_order() {
        let fields = vec![
            Field::value("name", "Jess"),
            Field::literal("created_at", "now()"),
            Field::value("email", "jess@example.com"),
        ];
        assert_eq!(
            debug_values(&fields),
            vec!["\"Jess\"", "\"jess@example.com\""]
        );
        assert_eq!(bound_count(&fields), 2);
    }

    #[test]
    fn placeholder_by_variant() {
        assert_eq!(Field::value("a", 1_i32).placeholder(3), "$3");
        assert_eq!(Field::literal("a", "now()").placeholder(3), "now()");
    }
}
