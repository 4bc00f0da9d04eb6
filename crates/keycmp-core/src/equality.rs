//! Equality predicates for matched pairs.
//!
//! The comparator takes a single resolved predicate. It comes from one of
//! three places, picked once before the comparison starts:
//!
//! - native equality (`PartialEq`, including `B: PartialEq<W>`),
//! - a caller-supplied closure,
//! - a [`FieldEquals`] list, folded with logical AND.
//!
//! ```
//! use keycmp_core::equality::FieldEquals;
//!
//! struct Item { name: String, code: Option<u32>, note: String }
//!
//! let equals = FieldEquals::<Item, Item>::new()
//!     .field_ref(|i: &Item| &i.name)
//!     .field_opt(|i: &Item| i.code)
//!     .build()
//!     .unwrap();
//!
//! let a = Item { name: "x".into(), code: None, note: "old".into() };
//! let b = Item { name: "x".into(), code: None, note: "new".into() };
//! assert!(equals(&a, &b));
//! ```

use crate::errors::{CmpError, Result};

/// Resolved equality predicate over a base and a working item
pub type EqualsFn<'f, B, W> = Box<dyn Fn(&B, &W) -> bool + 'f>;

type FieldCmp<'f, B, W> = Box<dyn Fn(&B, &W) -> bool + 'f>;

/// Native equality as a resolved predicate
pub fn native<'f, B, W>() -> EqualsFn<'f, B, W>
where
    B: PartialEq<W> + 'f,
    W: 'f,
{
    Box::new(|b: &B, w: &W| b == w)
}

/// Null-safe equality: two absent values are equal, absent never equals present
pub fn null_safe_eq<A, B>(a: Option<&A>, b: Option<&B>) -> bool
where
    A: PartialEq<B> + ?Sized,
    B: ?Sized,
{
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

/// Field-wise equality: two items are equal iff every extracted field matches
///
/// Fields are checked in the order they were added and evaluation stops at
/// the first mismatch.
pub struct FieldEquals<'f, B, W> {
    fields: Vec<FieldCmp<'f, B, W>>,
}

impl<'f, B: 'f, W: 'f> FieldEquals<'f, B, W> {
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Compare a field extracted differently from each side
    pub fn field_pair<V, U, FB, FW>(mut self, base: FB, working: FW) -> Self
    where
        V: PartialEq<U>,
        FB: Fn(&B) -> V + 'f,
        FW: Fn(&W) -> U + 'f,
    {
        self.fields
            .push(Box::new(move |b: &B, w: &W| base(b) == working(w)));
        self
    }

    /// Compare an optional field extracted differently from each side
    pub fn field_pair_opt<V, U, FB, FW>(mut self, base: FB, working: FW) -> Self
    where
        V: PartialEq<U>,
        FB: Fn(&B) -> Option<V> + 'f,
        FW: Fn(&W) -> Option<U> + 'f,
    {
        self.fields.push(Box::new(move |b: &B, w: &W| {
            null_safe_eq(base(b).as_ref(), working(w).as_ref())
        }));
        self
    }

    /// Compare with an arbitrary per-field predicate
    pub fn field_with<F>(mut self, cmp: F) -> Self
    where
        F: Fn(&B, &W) -> bool + 'f,
    {
        self.fields.push(Box::new(cmp));
        self
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Evaluate every field against one pair
    pub fn matches(&self, base: &B, working: &W) -> bool {
        self.fields.iter().all(|cmp| cmp(base, working))
    }

    /// Fold the field list into one predicate
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` if no field was added
    pub fn build(self) -> Result<EqualsFn<'f, B, W>> {
        if self.fields.is_empty() {
            return Err(CmpError::InvalidArgument {
                reason: "field equality needs at least one field".to_string(),
            });
        }
        Ok(Box::new(move |b: &B, w: &W| self.matches(b, w)))
    }
}

impl<'f, O: 'f> FieldEquals<'f, O, O> {
    /// Compare a field extracted the same way from both sides
    pub fn field<V, F>(mut self, extract: F) -> Self
    where
        V: PartialEq,
        F: Fn(&O) -> V + 'f,
    {
        self.fields
            .push(Box::new(move |a: &O, b: &O| extract(a) == extract(b)));
        self
    }

    /// Compare a borrowed field without cloning it
    pub fn field_ref<V, F>(mut self, extract: F) -> Self
    where
        V: PartialEq + ?Sized,
        F: Fn(&O) -> &V + 'f,
    {
        self.fields
            .push(Box::new(move |a: &O, b: &O| extract(a) == extract(b)));
        self
    }

    /// Compare an optional field null-safely
    pub fn field_opt<V, F>(mut self, extract: F) -> Self
    where
        V: PartialEq,
        F: Fn(&O) -> Option<V> + 'f,
    {
        self.fields.push(Box::new(move |a: &O, b: &O| {
            null_safe_eq(extract(a).as_ref(), extract(b).as_ref())
        }));
        self
    }
}

impl<'f, B: 'f, W: 'f> Default for FieldEquals<'f, B, W> {
    fn default() -> Self {
        Self::new()
    }
}

/// Field-wise predicate, or native equality when the list is empty
pub fn fields_or_native<'f, B, W>(fields: FieldEquals<'f, B, W>) -> EqualsFn<'f, B, W>
where
    B: PartialEq<W> + 'f,
    W: 'f,
{
    if fields.is_empty() {
        native()
    } else {
        Box::new(move |b: &B, w: &W| fields.matches(b, w))
    }
}

/// How matched pairs are judged equal
pub enum EqualsRule<'f, B, W> {
    /// `PartialEq` between the two item types
    Native,
    /// A caller-supplied predicate
    Predicate(EqualsFn<'f, B, W>),
    /// Field-wise equality; an empty list means native
    Fields(FieldEquals<'f, B, W>),
}

impl<'f, B, W> EqualsRule<'f, B, W>
where
    B: PartialEq<W> + 'f,
    W: 'f,
{
    /// Collapse the rule into the single predicate the comparator runs
    pub fn resolve(self) -> EqualsFn<'f, B, W> {
        match self {
            EqualsRule::Native => native(),
            EqualsRule::Predicate(equals) => equals,
            EqualsRule::Fields(fields) => fields_or_native(fields),
        }
    }
}

impl<'f, B, W> From<FieldEquals<'f, B, W>> for EqualsRule<'f, B, W> {
    fn from(fields: FieldEquals<'f, B, W>) -> Self {
        EqualsRule::Fields(fields)
    }
}

impl<'f, B, W> From<Option<EqualsFn<'f, B, W>>> for EqualsRule<'f, B, W> {
    fn from(equals: Option<EqualsFn<'f, B, W>>) -> Self {
        match equals {
            Some(equals) => EqualsRule::Predicate(equals),
            None => EqualsRule::Native,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Account {
        name: Option<String>,
        code: Option<String>,
        balance: i64,
    }

    fn account(name: Option<&str>, code: Option<&str>, balance: i64) -> Account {
        Account {
            name: name.map(str::to_string),
            code: code.map(str::to_string),
            balance,
        }
    }

    fn name_and_code<'f>() -> FieldEquals<'f, Account, Account> {
        FieldEquals::<Account, Account>::new()
            .field_opt(|a: &Account| a.name.clone())
            .field_opt(|a: &Account| a.code.clone())
    }

    #[test]
    fn test_null_safe_eq() {
        assert!(null_safe_eq::<i32, i32>(None, None));
        assert!(!null_safe_eq(Some(&1), None::<&i32>));
        assert!(!null_safe_eq(None::<&i32>, Some(&1)));
        assert!(null_safe_eq(Some("a"), Some("a")));
        assert!(!null_safe_eq(Some("a"), Some("b")));
    }

    #[test]
    fn test_fields_ignore_unlisted_members() {
        let equals = name_and_code().build().unwrap();
        let a = account(Some("n"), Some("c"), 10);
        let b = account(Some("n"), Some("c"), 99);
        assert!(equals(&a, &b));
    }

    #[test]
    fn test_absent_fields_on_both_sides_are_equal() {
        let equals = name_and_code().build().unwrap();
        let a = account(None, None, 1);
        let b = account(None, None, 2);
        assert!(equals(&a, &b));
    }

    #[test]
    fn test_absent_vs_present_is_unequal() {
        let equals = name_and_code().build().unwrap();
        let a = account(Some("n"), None, 1);
        let b = account(Some("n"), Some("c"), 1);
        assert!(!equals(&a, &b));
        assert!(!equals(&b, &a));
    }

    #[test]
    fn test_build_rejects_empty_field_list() {
        let err = FieldEquals::<Account, Account>::new().build().err();
        assert!(matches!(err, Some(CmpError::InvalidArgument { .. })));
    }

    #[test]
    fn test_fields_or_native_falls_back_on_empty_list() {
        let equals = fields_or_native(FieldEquals::<Account, Account>::new());
        let a = account(Some("n"), None, 1);
        assert!(equals(&a, &a.clone()));
        assert!(!equals(&a, &account(Some("n"), None, 2)));
    }

    #[test]
    fn test_field_pair_across_types() {
        struct Order {
            sku: String,
            qty: u32,
        }
        struct Line {
            product: String,
            quantity: u64,
        }

        let equals = FieldEquals::<Order, Line>::new()
            .field_pair(|o: &Order| o.sku.clone(), |l: &Line| l.product.clone())
            .field_pair(|o: &Order| u64::from(o.qty), |l: &Line| l.quantity)
            .build()
            .unwrap();

        let order = Order {
            sku: "A-1".into(),
            qty: 2,
        };
        let same = Line {
            product: "A-1".into(),
            quantity: 2,
        };
        let more = Line {
            product: "A-1".into(),
            quantity: 3,
        };
        assert!(equals(&order, &same));
        assert!(!equals(&order, &more));
    }

    #[test]
    fn test_field_evaluation_short_circuits() {
        use std::cell::Cell;

        let calls = Cell::new(0);
        let fields = FieldEquals::<Account, Account>::new()
            .field(|a: &Account| a.balance)
            .field_with(|_: &Account, _: &Account| {
                calls.set(calls.get() + 1);
                true
            });

        let a = account(None, None, 1);
        assert!(!fields.matches(&a, &account(None, None, 2)));
        assert_eq!(calls.get(), 0);
        assert!(fields.matches(&a, &a.clone()));
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_rule_resolution() {
        let a = account(Some("n"), Some("c"), 1);
        let b = account(Some("n"), Some("c"), 2);

        let native_rule: EqualsRule<Account, Account> = EqualsRule::Native;
        assert!(!native_rule.resolve()(&a, &b));

        let fields_rule: EqualsRule<Account, Account> = name_and_code().into();
        assert!(fields_rule.resolve()(&a, &b));

        let predicate: EqualsFn<Account, Account> = Box::new(|_: &Account, _: &Account| true);
        let predicate_rule: EqualsRule<Account, Account> = Some(predicate).into();
        assert!(predicate_rule.resolve()(&a, &account(None, None, 0)));

        let none_rule: EqualsRule<Account, Account> = None.into();
        assert!(none_rule.resolve()(&a, &a.clone()));
    }
}
