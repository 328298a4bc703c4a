//! Constraints over strings, collections and their items.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::fmt::Debug;

use super::{Constraint, ConstraintResult, Describe};
use crate::message::format_value;

/// Types with a notion of length.
pub trait HasLength {
    fn length(&self) -> usize;
}

impl HasLength for str {
    fn length(&self) -> usize {
        self.chars().count()
    }
}

impl HasLength for String {
    fn length(&self) -> usize {
        self.as_str().length()
    }
}

impl<T> HasLength for [T] {
    fn length(&self) -> usize {
        self.len()
    }
}

impl<T, const N: usize> HasLength for [T; N] {
    fn length(&self) -> usize {
        N
    }
}

impl<T> HasLength for Vec<T> {
    fn length(&self) -> usize {
        self.len()
    }
}

impl<T> HasLength for VecDeque<T> {
    fn length(&self) -> usize {
        self.len()
    }
}

impl<K, V, S> HasLength for HashMap<K, V, S> {
    fn length(&self) -> usize {
        self.len()
    }
}

impl<T, S> HasLength for HashSet<T, S> {
    fn length(&self) -> usize {
        self.len()
    }
}

impl<K, V> HasLength for BTreeMap<K, V> {
    fn length(&self) -> usize {
        self.len()
    }
}

impl<T> HasLength for BTreeSet<T> {
    fn length(&self) -> usize {
        self.len()
    }
}

impl<T: HasLength + ?Sized> HasLength for &T {
    fn length(&self) -> usize {
        (**self).length()
    }
}

/// Collections whose items can be inspected by reference.
pub trait Collection {
    type Item;

    fn items(&self) -> Box<dyn Iterator<Item = &Self::Item> + '_>;
}

impl<T> Collection for [T] {
    type Item = T;

    fn items(&self) -> Box<dyn Iterator<Item = &T> + '_> {
        Box::new(self.iter())
    }
}

impl<T, const N: usize> Collection for [T; N] {
    type Item = T;

    fn items(&self) -> Box<dyn Iterator<Item = &T> + '_> {
        Box::new(self.iter())
    }
}

impl<T> Collection for Vec<T> {
    type Item = T;

    fn items(&self) -> Box<dyn Iterator<Item = &T> + '_> {
        Box::new(self.iter())
    }
}

impl<T> Collection for VecDeque<T> {
    type Item = T;

    fn items(&self) -> Box<dyn Iterator<Item = &T> + '_> {
        Box::new(self.iter())
    }
}

impl<T, S> Collection for HashSet<T, S> {
    type Item = T;

    fn items(&self) -> Box<dyn Iterator<Item = &T> + '_> {
        Box::new(self.iter())
    }
}

impl<T> Collection for BTreeSet<T> {
    type Item = T;

    fn items(&self) -> Box<dyn Iterator<Item = &T> + '_> {
        Box::new(self.iter())
    }
}

impl<C: Collection + ?Sized> Collection for &C {
    type Item = C::Item;

    fn items(&self) -> Box<dyn Iterator<Item = &C::Item> + '_> {
        (**self).items()
    }
}

/// Satisfied by a value of length zero.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyConstraint;

impl Describe for EmptyConstraint {
    fn description(&self) -> String {
        "<empty>".to_string()
    }
}

impl<T: HasLength + Debug + ?Sized> Constraint<T> for EmptyConstraint {
    fn apply_to(&self, actual: &T) -> ConstraintResult {
        ConstraintResult::new(self, format_value(actual), actual.length() == 0)
    }
}

/// Applies a constraint to the length of the actual value.
#[derive(Debug, Clone)]
pub struct LengthConstraint<C> {
    inner: C,
}

impl<C> LengthConstraint<C> {
    pub fn new(inner: C) -> Self {
        Self { inner }
    }
}

impl<C: Describe> Describe for LengthConstraint<C> {
    fn description(&self) -> String {
        format!("length {}", self.inner.description())
    }

    fn display_name(&self) -> String {
        "Length".to_string()
    }
}

impl<T, C> Constraint<T> for LengthConstraint<C>
where
    T: HasLength + Debug + ?Sized,
    C: Constraint<usize>,
{
    fn apply_to(&self, actual: &T) -> ConstraintResult {
        let length = actual.length();
        let inner = self.inner.apply_to(&length);
        ConstraintResult::new(self, format!("length {}", length), inner.is_success())
            .with_detail(format!("Value: {}", format_value(actual)))
    }
}

/// Satisfied when any item equals the expected value.
#[derive(Debug, Clone)]
pub struct CollectionContainsConstraint<E> {
    expected: E,
}

impl<E> CollectionContainsConstraint<E> {
    pub fn new(expected: E) -> Self {
        Self { expected }
    }
}

impl<E: Debug> Describe for CollectionContainsConstraint<E> {
    fn description(&self) -> String {
        format!("some item equal to {}", format_value(&self.expected))
    }

    fn display_name(&self) -> String {
        "Contains".to_string()
    }
}

impl<C, E> Constraint<C> for CollectionContainsConstraint<E>
where
    C: Collection + Debug + ?Sized,
    C::Item: PartialEq<E>,
    E: Debug,
{
    fn apply_to(&self, actual: &C) -> ConstraintResult {
        let is_success = actual.items().any(|item| item.eq(&self.expected));
        ConstraintResult::new(self, format_value(actual), is_success)
    }
}

/// Satisfied when no two items are equal.
#[derive(Debug, Clone, Copy, Default)]
pub struct UniqueItemsConstraint;

impl Describe for UniqueItemsConstraint {
    fn description(&self) -> String {
        "all items unique".to_string()
    }
}

impl<C> Constraint<C> for UniqueItemsConstraint
where
    C: Collection + Debug + ?Sized,
    C::Item: PartialEq + Debug,
{
    fn apply_to(&self, actual: &C) -> ConstraintResult {
        let items: Vec<&C::Item> = actual.items().collect();
        let mut duplicates: Vec<&C::Item> = Vec::new();
        for (index, item) in items.iter().enumerate() {
            let repeated = items[..index].iter().any(|earlier| earlier == item);
            if repeated && !duplicates.iter().any(|seen| seen == item) {
                duplicates.push(*item);
            }
        }

        let result = ConstraintResult::new(self, format_value(actual), duplicates.is_empty());
        if duplicates.is_empty() {
            result
        } else {
            result.with_detail(format!("Not unique items: {:?}", duplicates))
        }
    }
}

/// Satisfied when items are in ascending (or descending) order.
#[derive(Debug, Clone, Copy, Default)]
pub struct OrderedConstraint {
    descending: bool,
}

impl OrderedConstraint {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn descending(mut self) -> Self {
        self.descending = true;
        self
    }
}

impl Describe for OrderedConstraint {
    fn description(&self) -> String {
        if self.descending {
            "collection ordered, descending".to_string()
        } else {
            "collection ordered".to_string()
        }
    }
}

impl<C> Constraint<C> for OrderedConstraint
where
    C: Collection + Debug + ?Sized,
    C::Item: PartialOrd + Debug,
{
    fn apply_to(&self, actual: &C) -> ConstraintResult {
        let items: Vec<&C::Item> = actual.items().collect();
        let breaks_at = items.windows(2).position(|pair| {
            if self.descending {
                pair[0] < pair[1]
            } else {
                pair[0] > pair[1]
            }
        });

        let result = ConstraintResult::new(self, format_value(actual), breaks_at.is_none());
        match breaks_at {
            Some(index) => result.with_detail(format!(
                "Ordering breaks at index [{}]:  {:?}",
                index + 1,
                items[index + 1]
            )),
            None => result,
        }
    }
}

/// Satisfied when every item satisfies the inner constraint.
#[derive(Debug, Clone)]
pub struct AllItemsConstraint<IC> {
    inner: IC,
}

impl<IC> AllItemsConstraint<IC> {
    pub fn new(inner: IC) -> Self {
        Self { inner }
    }
}

impl<IC: Describe> Describe for AllItemsConstraint<IC> {
    fn description(&self) -> String {
        format!("all items {}", self.inner.description())
    }
}

impl<C, IC> Constraint<C> for AllItemsConstraint<IC>
where
    C: Collection + Debug + ?Sized,
    IC: Constraint<C::Item>,
{
    fn apply_to(&self, actual: &C) -> ConstraintResult {
        let first_failure = actual
            .items()
            .map(|item| self.inner.apply_to(item))
            .enumerate()
            .find(|(_, result)| !result.is_success());

        match first_failure {
            None => ConstraintResult::new(self, format_value(actual), true),
            Some((index, failed)) => ConstraintResult::new(self, format_value(actual), false)
                .with_detail(format!(
                    "First non-matching item at index [{}]:  {}",
                    index,
                    failed.actual()
                )),
        }
    }
}

/// Satisfied when at least one item satisfies the inner constraint.
#[derive(Debug, Clone)]
pub struct SomeItemsConstraint<IC> {
    inner: IC,
}

impl<IC> SomeItemsConstraint<IC> {
    pub fn new(inner: IC) -> Self {
        Self { inner }
    }
}

impl<IC: Describe> Describe for SomeItemsConstraint<IC> {
    fn description(&self) -> String {
        format!("some item {}", self.inner.description())
    }
}

impl<C, IC> Constraint<C> for SomeItemsConstraint<IC>
where
    C: Collection + Debug + ?Sized,
    IC: Constraint<C::Item>,
{
    fn apply_to(&self, actual: &C) -> ConstraintResult {
        let is_success = actual
            .items()
            .any(|item| self.inner.apply_to(item).is_success());
        ConstraintResult::new(self, format_value(actual), is_success)
    }
}

/// Satisfied when no item satisfies the inner constraint.
#[derive(Debug, Clone)]
pub struct NoItemConstraint<IC> {
    inner: IC,
}

impl<IC> NoItemConstraint<IC> {
    pub fn new(inner: IC) -> Self {
        Self { inner }
    }
}

impl<IC: Describe> Describe for NoItemConstraint<IC> {
    fn description(&self) -> String {
        format!("no item {}", self.inner.description())
    }
}

impl<C, IC> Constraint<C> for NoItemConstraint<IC>
where
    C: Collection + Debug + ?Sized,
    IC: Constraint<C::Item>,
{
    fn apply_to(&self, actual: &C) -> ConstraintResult {
        let matching = actual
            .items()
            .position(|item| self.inner.apply_to(item).is_success());

        let result = ConstraintResult::new(self, format_value(actual), matching.is_none());
        match matching {
            Some(index) => result.with_detail(format!("Matching item at index [{}]", index)),
            None => result,
        }
    }
}

/// Pairs actual items with expected ones, each expected item used at most
/// once. Returns the actual items left over and the expected items never
/// matched.
fn tally<'a, 'e, I, E>(
    actual: impl Iterator<Item = &'a I>,
    expected: &'e [E],
) -> (Vec<&'a I>, Vec<&'e E>)
where
    I: PartialEq<E> + 'a,
{
    let mut used = vec![false; expected.len()];
    let mut extra = Vec::new();
    for item in actual {
        let slot = expected
            .iter()
            .enumerate()
            .position(|(index, candidate)| !used[index] && item.eq(candidate));
        match slot {
            Some(index) => used[index] = true,
            None => extra.push(item),
        }
    }
    let missing = expected
        .iter()
        .zip(used)
        .filter(|(_, used)| !used)
        .map(|(item, _)| item)
        .collect();
    (extra, missing)
}

/// Satisfied when the actual items equal the expected ones, in order.
#[derive(Debug, Clone)]
pub struct SequenceEqualConstraint<E> {
    expected: Vec<E>,
}

impl<E> SequenceEqualConstraint<E> {
    pub fn new(expected: Vec<E>) -> Self {
        Self { expected }
    }
}

impl<E: Debug> Describe for SequenceEqualConstraint<E> {
    fn description(&self) -> String {
        format_value(&self.expected)
    }

    fn display_name(&self) -> String {
        "Equal".to_string()
    }
}

impl<C, E> Constraint<C> for SequenceEqualConstraint<E>
where
    C: Collection + Debug + ?Sized,
    C::Item: PartialEq<E> + Debug,
    E: Debug,
{
    fn apply_to(&self, actual: &C) -> ConstraintResult {
        let items: Vec<&C::Item> = actual.items().collect();
        let differs_at = items
            .iter()
            .zip(&self.expected)
            .position(|(item, expected)| !(*item).eq(expected));

        let result = ConstraintResult::new(
            self,
            format_value(actual),
            differs_at.is_none() && items.len() == self.expected.len(),
        );
        match differs_at {
            Some(index) => result.with_detail(format!(
                "Values differ at index [{}]: expected {}, but was {:?}",
                index,
                format_value(&self.expected[index]),
                items[index]
            )),
            None if items.len() != self.expected.len() => result.with_detail(format!(
                "Expected {} items but was {}",
                self.expected.len(),
                items.len()
            )),
            None => result,
        }
    }
}

/// Satisfied when the actual items are the expected ones in any order,
/// counting duplicates.
#[derive(Debug, Clone)]
pub struct EquivalentConstraint<E> {
    expected: Vec<E>,
}

impl<E> EquivalentConstraint<E> {
    pub fn new(expected: Vec<E>) -> Self {
        Self { expected }
    }
}

impl<E: Debug> Describe for EquivalentConstraint<E> {
    fn description(&self) -> String {
        format!("equivalent to {}", format_value(&self.expected))
    }

    fn display_name(&self) -> String {
        "Equivalent".to_string()
    }
}

impl<C, E> Constraint<C> for EquivalentConstraint<E>
where
    C: Collection + Debug + ?Sized,
    C::Item: PartialEq<E> + Debug,
    E: Debug,
{
    fn apply_to(&self, actual: &C) -> ConstraintResult {
        let (extra, missing) = tally(actual.items(), &self.expected);
        let mut result = ConstraintResult::new(
            self,
            format_value(actual),
            extra.is_empty() && missing.is_empty(),
        );
        if !missing.is_empty() {
            result = result.with_detail(format!("Missing ({}): {:?}", missing.len(), missing));
        }
        if !extra.is_empty() {
            result = result.with_detail(format!("Extra ({}): {:?}", extra.len(), extra));
        }
        result
    }
}

/// Satisfied when every actual item is found among the expected ones.
#[derive(Debug, Clone)]
pub struct SubsetConstraint<E> {
    expected: Vec<E>,
}

impl<E> SubsetConstraint<E> {
    pub fn new(expected: Vec<E>) -> Self {
        Self { expected }
    }
}

impl<E: Debug> Describe for SubsetConstraint<E> {
    fn description(&self) -> String {
        format!("subset of {}", format_value(&self.expected))
    }

    fn display_name(&self) -> String {
        "SubsetOf".to_string()
    }
}

impl<C, E> Constraint<C> for SubsetConstraint<E>
where
    C: Collection + Debug + ?Sized,
    C::Item: PartialEq<E> + Debug,
    E: Debug,
{
    fn apply_to(&self, actual: &C) -> ConstraintResult {
        let (extra, _) = tally(actual.items(), &self.expected);
        let result = ConstraintResult::new(self, format_value(actual), extra.is_empty());
        if extra.is_empty() {
            result
        } else {
            result.with_detail(format!("Extra ({}): {:?}", extra.len(), extra))
        }
    }
}

/// Satisfied when every expected item is found among the actual ones.
#[derive(Debug, Clone)]
pub struct SupersetConstraint<E> {
    expected: Vec<E>,
}

impl<E> SupersetConstraint<E> {
    pub fn new(expected: Vec<E>) -> Self {
        Self { expected }
    }
}

impl<E: Debug> Describe for SupersetConstraint<E> {
    fn description(&self) -> String {
        format!("superset of {}", format_value(&self.expected))
    }

    fn display_name(&self) -> String {
        "SupersetOf".to_string()
    }
}

impl<C, E> Constraint<C> for SupersetConstraint<E>
where
    C: Collection + Debug + ?Sized,
    C::Item: PartialEq<E> + Debug,
    E: Debug,
{
    fn apply_to(&self, actual: &C) -> ConstraintResult {
        let (_, missing) = tally(actual.items(), &self.expected);
        let result = ConstraintResult::new(self, format_value(actual), missing.is_empty());
        if missing.is_empty() {
            result
        } else {
            result.with_detail(format!("Missing ({}): {:?}", missing.len(), missing))
        }
    }
}

resolves_to_self!(
    [] EmptyConstraint,
    [C,] LengthConstraint<C>,
    [E,] CollectionContainsConstraint<E>,
    [] UniqueItemsConstraint,
    [] OrderedConstraint,
    [IC,] AllItemsConstraint<IC>,
    [IC,] SomeItemsConstraint<IC>,
    [IC,] NoItemConstraint<IC>,
    [E,] SequenceEqualConstraint<E>,
    [E,] EquivalentConstraint<E>,
    [E,] SubsetConstraint<E>,
    [E,] SupersetConstraint<E>,
);
