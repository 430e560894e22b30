//! Typed equality predicates over entity fields.
//!
//! Each entity type declares a field enum and a [`Queryable::field`]
//! accessor returning a [`FieldValue`].  A [`Predicate`] compares those
//! values against [`Scalar`] literals.  Values of different kinds never
//! compare equal: the string `"1"` does not match the integer `1`, and
//! `"true"` does not match `true`.

use std::collections::HashSet;

use crate::collection::Entity;

/// Literal on the right-hand side of an equality.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scalar {
    Str(String),
    Int(i64),
    Bool(bool),
    Null,
}

/// Borrowed view of a field on an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    Str(&'a str),
    Int(i64),
    Bool(bool),
    Null,
}

impl Scalar {
    pub fn matches(&self, value: FieldValue<'_>) -> bool {
        match (self, value) {
            (Scalar::Str(a), FieldValue::Str(b)) => a == b,
            (Scalar::Int(a), FieldValue::Int(b)) => *a == b,
            (Scalar::Bool(a), FieldValue::Bool(b)) => *a == b,
            (Scalar::Null, FieldValue::Null) => true,
            _ => false,
        }
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::Str(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::Str(value)
    }
}

impl From<&String> for Scalar {
    fn from(value: &String) -> Self {
        Scalar::Str(value.clone())
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::Int(value)
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Scalar::Bool(value)
    }
}

impl<'a> From<Option<&'a str>> for FieldValue<'a> {
    fn from(value: Option<&'a str>) -> Self {
        value.map_or(FieldValue::Null, FieldValue::Str)
    }
}

/// Reflection-free field access for predicate evaluation.
pub trait Queryable {
    type Field: Copy + std::fmt::Debug;

    fn field(&self, field: Self::Field) -> FieldValue<'_>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate<F> {
    Eq(F, Scalar),
    And(Box<Predicate<F>>, Box<Predicate<F>>),
    Or(Box<Predicate<F>>, Box<Predicate<F>>),
}

impl<F: Copy> Predicate<F> {
    pub fn eq(field: F, value: impl Into<Scalar>) -> Self {
        Predicate::Eq(field, value.into())
    }

    pub fn and(self, other: Predicate<F>) -> Self {
        Predicate::And(Box::new(self), Box::new(other))
    }

    pub fn or(self, other: Predicate<F>) -> Self {
        Predicate::Or(Box::new(self), Box::new(other))
    }

    pub fn evaluate<E>(&self, entity: &E) -> bool
    where
        E: Queryable<Field = F>,
    {
        match self {
            Predicate::Eq(field, value) => value.matches(entity.field(*field)),
            Predicate::And(a, b) => a.evaluate(entity) && b.evaluate(entity),
            Predicate::Or(a, b) => a.evaluate(entity) || b.evaluate(entity),
        }
    }
}

/// Keep the entities matching `predicate`, in their original order, dropping
/// any later entity whose id was already kept.
pub fn filter<E>(entities: Vec<E>, predicate: &Predicate<E::Field>) -> Vec<E>
where
    E: Entity + Queryable,
{
    let mut seen = HashSet::new();
    entities
        .into_iter()
        .filter(|e| predicate.evaluate(e))
        .filter(|e| seen.insert(e.id().to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Gadget {
        id: String,
        label: String,
        count: i64,
        enabled: bool,
        note: Option<String>,
    }

    #[derive(Debug, Clone, Copy)]
    enum GadgetField {
        Id,
        Label,
        Count,
        Enabled,
        Note,
    }

    impl Entity for Gadget {
        const COLLECTION: &'static str = "gadgets";

        fn id(&self) -> &str {
            &self.id
        }
    }

    impl Queryable for Gadget {
        type Field = GadgetField;

        fn field(&self, field: GadgetField) -> FieldValue<'_> {
            match field {
                GadgetField::Id => FieldValue::Str(&self.id),
                GadgetField::Label => FieldValue::Str(&self.label),
                GadgetField::Count => FieldValue::Int(self.count),
                GadgetField::Enabled => FieldValue::Bool(self.enabled),
                GadgetField::Note => self.note.as_deref().into(),
            }
        }
    }

    fn gadget(id: &str, label: &str, count: i64, enabled: bool) -> Gadget {
        Gadget {
            id: id.into(),
            label: label.into(),
            count,
            enabled,
            note: None,
        }
    }

    #[test]
    fn equality_is_type_strict() {
        let g = gadget("g1", "1", 1, true);

        assert!(Predicate::eq(GadgetField::Count, 1i64).evaluate(&g));
        assert!(!Predicate::eq(GadgetField::Count, "1").evaluate(&g));
        assert!(Predicate::eq(GadgetField::Label, "1").evaluate(&g));
        assert!(!Predicate::eq(GadgetField::Label, 1i64).evaluate(&g));
        assert!(!Predicate::eq(GadgetField::Enabled, "true").evaluate(&g));
        assert!(Predicate::eq(GadgetField::Enabled, true).evaluate(&g));
    }

    #[test]
    fn optional_fields_compare_as_null() {
        let mut g = gadget("g1", "a", 0, false);
        assert!(Predicate::Eq(GadgetField::Note, Scalar::Null).evaluate(&g));

        g.note = Some("hi".into());
        assert!(!Predicate::Eq(GadgetField::Note, Scalar::Null).evaluate(&g));
        assert!(Predicate::eq(GadgetField::Note, "hi").evaluate(&g));
    }

    #[test]
    fn and_or_combinators() {
        let g = gadget("g1", "a", 3, false);
        let both =
            Predicate::eq(GadgetField::Label, "a").and(Predicate::eq(GadgetField::Count, 3i64));
        let neither =
            Predicate::eq(GadgetField::Label, "b").or(Predicate::eq(GadgetField::Count, 4i64));
        let one =
            Predicate::eq(GadgetField::Label, "b").or(Predicate::eq(GadgetField::Enabled, false));

        assert!(both.evaluate(&g));
        assert!(!neither.evaluate(&g));
        assert!(one.evaluate(&g));
    }

    #[test]
    fn filter_keeps_order_and_drops_duplicate_ids() {
        let items = vec![
            gadget("a", "x", 1, true),
            gadget("b", "y", 1, true),
            gadget("a", "x", 1, true),
            gadget("c", "x", 2, true),
        ];
        // Both branches hold for "a"; it must still appear once.
        let pred =
            Predicate::eq(GadgetField::Label, "x").or(Predicate::eq(GadgetField::Count, 1i64));

        let ids: Vec<_> = filter(items, &pred).into_iter().map(|g| g.id).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn filter_by_id() {
        let items = vec![gadget("a", "x", 1, true), gadget("b", "y", 2, false)];
        let found = filter(items, &Predicate::eq(GadgetField::Id, "b"));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].count, 2);
    }
}
