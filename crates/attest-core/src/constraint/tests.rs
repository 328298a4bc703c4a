//! Tests for the constraint catalogue.

use super::*;
use crate::dsl::{does, has, is, throws};
use crate::error::AssertionError;

// ============================================================================
// Basic constraints
// ============================================================================

mod basic {
    use super::*;

    #[test]
    fn test_true_and_false() {
        assert!(is::true_().apply_to(&true).is_success());
        assert!(!is::true_().apply_to(&false).is_success());
        assert!(is::false_().apply_to(&false).is_success());
    }

    #[test]
    fn test_option_and_result() {
        assert!(is::none().apply_to(&None::<i32>).is_success());
        assert!(!is::none().apply_to(&Some(3)).is_success());
        assert!(is::some().apply_to(&Some("x")).is_success());

        let ok: Result<i32, String> = Ok(1);
        let err: Result<i32, String> = Err("boom".to_string());
        assert!(is::ok().apply_to(&ok).is_success());
        assert!(is::err().apply_to(&err).is_success());
        assert_eq!(is::ok().apply_to(&err).actual(), "Err(\"boom\")");
    }

    #[test]
    fn test_predicate_uses_given_description() {
        let even = is::matching(|v: &i32| v % 2 == 0, "an even number");
        let result = even.apply_to(&3);
        assert!(!result.is_success());
        assert_eq!(result.description(), "an even number");
        assert_eq!(result.name(), "Predicate");
    }

    #[test]
    fn test_same_as_is_pointer_identity() {
        let a = String::from("same");
        let b = String::from("same");
        assert!(is::same_as(&a).apply_to(&a).is_success());
        assert!(!is::same_as(&a).apply_to(&b).is_success());
    }
}

// ============================================================================
// Comparison constraints
// ============================================================================

mod comparison {
    use super::*;

    #[test]
    fn test_equal_description_and_name() {
        let result = is::equal_to(5).apply_to(&4);
        assert!(!result.is_success());
        assert_eq!(result.name(), "Equal");
        assert_eq!(result.description(), "5");
        assert_eq!(result.actual(), "4");
    }

    #[test]
    fn test_equal_across_types() {
        let owned = String::from("abc");
        assert!(is::equal_to("abc").apply_to(&owned).is_success());
    }

    #[test]
    fn test_ordered_comparisons() {
        assert!(is::greater_than(10).apply_to(&11).is_success());
        assert!(!is::greater_than(10).apply_to(&10).is_success());
        assert!(is::at_least(10).apply_to(&10).is_success());
        assert!(is::less_than(2.5).apply_to(&2.0).is_success());
        assert!(is::at_most('c').apply_to(&'c').is_success());

        let result = is::greater_than(10).apply_to(&5);
        assert_eq!(result.name(), "GreaterThan");
        assert_eq!(result.description(), "greater than 10");
    }

    #[test]
    fn test_nan_is_never_ordered() {
        assert!(!is::greater_than(0.0).apply_to(&f64::NAN).is_success());
        assert!(!is::at_most(0.0).apply_to(&f64::NAN).is_success());
    }

    #[test]
    fn test_range_is_inclusive() {
        let range = is::in_range(1, 10);
        assert!(range.apply_to(&1).is_success());
        assert!(range.apply_to(&10).is_success());
        assert!(!range.apply_to(&11).is_success());
        assert_eq!(Describe::description(&range), "in range (1,10)");
    }

    #[test]
    fn test_close_to_and_polarity() {
        assert!(is::close_to(1.0, 0.01).apply_to(&1.005).is_success());
        assert!(!is::close_to(1.0, 0.01).apply_to(&2).is_success());
        assert!(is::zero().apply_to(&0u8).is_success());
        assert!(is::positive().apply_to(&0.5f32).is_success());
        assert!(is::negative().apply_to(&-3i64).is_success());
        assert!(!is::negative().apply_to(&0).is_success());
    }

    #[test]
    fn test_any_of() {
        let result = is::any_of([1, 2, 3]).apply_to(&4);
        assert!(!result.is_success());
        assert_eq!(result.description(), "any of < 1, 2, 3 >");
        assert!(is::any_of(vec!["a", "b"]).apply_to(&"b").is_success());
    }
}

// ============================================================================
// Collections and strings
// ============================================================================

mod collections {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_empty_and_length() {
        assert!(is::empty().apply_to("").is_success());
        assert!(is::empty().apply_to(&Vec::<i32>::new()).is_success());
        assert!(is::empty().apply_to(&HashMap::<i32, i32>::new()).is_success());
        assert!(has::length(3).apply_to(&vec![1, 2, 3]).is_success());
        assert!(has::length(2).apply_to("hé").is_success());

        let result = has::length_that(is::greater_than(5usize)).apply_to(&[1, 2]);
        assert!(!result.is_success());
        assert_eq!(result.description(), "length greater than 5");
        assert_eq!(result.actual(), "length 2");
    }

    #[test]
    fn test_contains_item() {
        assert!(has::item(2).apply_to(&vec![1, 2, 3]).is_success());
        assert!(!has::item(9).apply_to(&[1, 2, 3]).is_success());
    }

    #[test]
    fn test_unique_reports_duplicates() {
        let result = is::unique().apply_to(&vec![1, 2, 2, 3, 3, 3]);
        assert!(!result.is_success());
        assert_eq!(result.detail_lines(), ["Not unique items: [2, 3]"]);
        assert!(is::unique().apply_to(&vec!["a", "b"]).is_success());
    }

    #[test]
    fn test_ordered() {
        assert!(is::ordered().apply_to(&vec![1, 2, 2, 5]).is_success());
        assert!(is::ordered().descending().apply_to(&vec![5, 3, 1]).is_success());

        let result = is::ordered().apply_to(&vec![1, 3, 2]);
        assert!(!result.is_success());
        assert_eq!(result.detail_lines(), ["Ordering breaks at index [2]:  2"]);
    }

    #[test]
    fn test_item_quantifiers() {
        let values = vec![2, 4, 6];
        assert!(has::all(is::positive()).apply_to(&values).is_success());
        assert!(has::some(is::equal_to(4)).apply_to(&values).is_success());
        assert!(has::none(is::negative()).apply_to(&values).is_success());

        let result = has::all(is::less_than(5)).apply_to(&values);
        assert!(!result.is_success());
        assert_eq!(result.description(), "all items less than 5");
        assert_eq!(
            result.detail_lines(),
            ["First non-matching item at index [2]:  6"]
        );
    }

    #[test]
    fn test_substrings() {
        assert!(does::contain("ell").apply_to("hello").is_success());
        assert!(does::start_with("HE").ignoring_case().apply_to("hello").is_success());
        assert!(!does::end_with("x").apply_to(&String::from("hello")).is_success());
        assert_eq!(
            Describe::description(&does::contain("a").ignoring_case()),
            "String containing \"a\", ignoring case"
        );
    }

    #[test]
    fn test_equal_ignoring_case() {
        assert!(is::equal_ignoring_case("HeLLo").apply_to("hello").is_success());
        assert!(!is::equal_ignoring_case("help").apply_to("hello").is_success());
    }

    #[test]
    fn test_sequence_equal_reports_first_difference() {
        assert!(is::sequence_equal_to([1, 2, 3]).apply_to(&vec![1, 2, 3]).is_success());

        let result = is::sequence_equal_to([1, 2, 3]).apply_to(&vec![1, 2, 4]);
        assert!(!result.is_success());
        assert_eq!(result.description(), "[1, 2, 3]");
        assert_eq!(
            result.detail_lines(),
            ["Values differ at index [2]: expected 3, but was 4"]
        );

        let shorter = is::sequence_equal_to([1, 2, 3]).apply_to(&[1, 2]);
        assert_eq!(shorter.detail_lines(), ["Expected 3 items but was 2"]);
    }

    #[test]
    fn test_equivalent_ignores_order_but_counts_duplicates() {
        assert!(is::equivalent_to([3, 1, 2]).apply_to(&vec![1, 2, 3]).is_success());
        assert!(!is::equivalent_to([1, 2]).apply_to(&vec![1, 1, 2]).is_success());

        let result = is::equivalent_to([1, 2, 2, 4]).apply_to(&vec![2, 1, 3, 2]);
        assert!(!result.is_success());
        assert_eq!(result.description(), "equivalent to [1, 2, 2, 4]");
        assert_eq!(result.detail_lines(), ["Missing (1): [4]", "Extra (1): [3]"]);
    }

    #[test]
    fn test_subset_and_superset() {
        assert!(is::subset_of([1, 2, 3]).apply_to(&vec![3, 1]).is_success());
        assert!(is::subset_of([1, 2, 3]).apply_to(&Vec::<i32>::new()).is_success());

        let repeated = is::subset_of([1, 2, 3]).apply_to(&vec![1, 1]);
        assert!(!repeated.is_success());
        assert_eq!(repeated.detail_lines(), ["Extra (1): [1]"]);

        assert!(is::superset_of(["a", "c"]).apply_to(&vec!["a", "b", "c"]).is_success());
        let result = is::superset_of(["a", "z"]).apply_to(&vec!["a", "b"]);
        assert!(!result.is_success());
        assert_eq!(result.description(), "superset of [\"a\", \"z\"]");
        assert_eq!(result.detail_lines(), ["Missing (1): [\"z\"]"]);
    }
}

// ============================================================================
// Patterns
// ============================================================================

mod patterns {
    use super::*;

    #[test]
    fn test_match_regex_finds_match_anywhere() {
        let digits = does::match_regex(r"\d{3}").unwrap();
        assert!(digits.apply_to("order 123").is_success());
        assert!(!digits.apply_to("order 12").is_success());

        let anchored = does::match_regex(r"^\d{3}$").unwrap();
        assert!(!anchored.apply_to("order 123").is_success());
        assert_eq!(anchored.description(), r#"String matching "^\\d{3}$""#);
    }

    #[test]
    fn test_invalid_pattern_is_usage_error() {
        let err = does::match_regex("(unclosed").unwrap_err();
        assert!(matches!(err, AssertionError::InvalidArgument(_)));
        assert!(err.to_string().contains("\"(unclosed\""));
    }

    #[test]
    fn test_negated_pattern() {
        let constraint = is::not(does::match_regex("^tmp").unwrap());
        assert!(constraint.apply_to("build/output").is_success());
        assert!(!constraint.apply_to("tmp/output").is_success());
    }
}

// ============================================================================
// Compound constraints and expressions
// ============================================================================

mod compound {
    use super::*;

    #[test]
    fn test_combinators() {
        let between = is::greater_than(1).and(is::less_than(5));
        assert!(between.apply_to(&3).is_success());
        assert!(!between.apply_to(&7).is_success());
        assert_eq!(
            Describe::description(&between),
            "greater than 1 and less than 5"
        );

        let either = is::zero().or(is::greater_than(100));
        assert!(either.apply_to(&0).is_success());
        assert!(!either.apply_to(&50).is_success());

        assert!(is::not(is::equal_to(3)).apply_to(&4).is_success());
        assert!(is::equal_to(3).not().apply_to(&4).is_success());
        assert_eq!(Describe::description(&is::not_equal_to(3)), "not 3");
    }

    #[test]
    fn test_boxed_keeps_display_name() {
        let boxed: Box<dyn Constraint<i32>> = is::greater_than(1).boxed();
        assert_eq!(boxed.display_name(), "GreaterThan");
        assert_eq!(is::equal_to(1).display_name(), "Equal");
    }

    #[test]
    fn test_expression_precedence() {
        // not zero and less than 10, or equal to 100
        let expression = ConstraintExpression::<i32>::new()
            .not()
            .constraint(is::zero())
            .and()
            .constraint(is::less_than(10))
            .or()
            .constraint(is::equal_to(100));
        let constraint = expression.resolve().unwrap();

        assert!(constraint.apply_to(&5).is_success());
        assert!(constraint.apply_to(&100).is_success());
        assert!(!constraint.apply_to(&0).is_success());
        assert!(!constraint.apply_to(&50).is_success());
        assert_eq!(
            constraint.description(),
            "not 0 and less than 10 or 100"
        );
    }

    #[test]
    fn test_malformed_expressions_are_usage_errors() {
        let empty = ConstraintExpression::<i32>::new().build();
        assert!(matches!(empty, Err(AssertionError::InvalidOperation(_))));

        let dangling = ConstraintExpression::<i32>::new()
            .constraint(is::zero())
            .and()
            .build();
        assert!(matches!(dangling, Err(AssertionError::InvalidOperation(_))));

        let adjacent = ConstraintExpression::<i32>::new()
            .constraint(is::zero())
            .constraint(is::positive())
            .build();
        let err = adjacent.err().unwrap();
        assert!(err.is_usage_error());
        assert!(err.to_string().contains("without an operator"));
    }
}

// ============================================================================
// Throws
// ============================================================================

mod throws_constraint {
    use super::*;

    #[test]
    fn test_captures_panic_payload() {
        let invocation: Invocation<()> = Invocation::capture(|| panic!("kaboom {}", 7));
        assert_eq!(
            invocation.thrown(),
            Some(Thrown::Panic("kaboom 7".to_string()))
        );
        assert!(throws::panic().apply_to(&invocation).is_success());
        assert!(throws::panic().with_message("boom").apply_to(&invocation).is_success());
        assert!(!throws::panic().with_message("fizz").apply_to(&invocation).is_success());
        assert!(!throws::nothing().apply_to(&invocation).is_success());
    }

    #[test]
    fn test_err_return_counts_as_error() {
        let invocation = Invocation::capture(|| -> Result<(), String> { Err("bad input".into()) });
        assert!(throws::error().apply_to(&invocation).is_success());
        assert!(throws::anything().apply_to(&invocation).is_success());
        assert!(!throws::panic().apply_to(&invocation).is_success());

        let result = throws::nothing().apply_to(&invocation);
        assert_eq!(result.actual(), "error \"bad input\"");
    }

    #[test]
    fn test_unobservable_outputs() {
        assert!(<() as DelegateOutput>::is_observable());
        assert!(<Result<u8, String> as DelegateOutput>::is_observable());
        assert!(!<std::thread::JoinHandle<()> as DelegateOutput>::is_observable());
        type BoxedFuture = std::pin::Pin<Box<dyn std::future::Future<Output = ()> + Send>>;
        assert!(!<BoxedFuture as DelegateOutput>::is_observable());
    }
}

#[test]
fn test_short_type_name() {
    assert_eq!(
        short_type_name("attest_core::constraint::comparison::EqualConstraint<i32>"),
        "Equal"
    );
    assert_eq!(short_type_name("&my::Custom"), "Custom");
}
