
use formcheck::{when, Engine, Locale, ValidationRule};
use proptest::prelude::*;
use strategies::{arb_condition, arb_record, arb_rules, arb_unordered_rules};

// ---------------------------------------------------------------------------
// Invariant 1: Determinism
//
// The same rule set + record must always produce the same result, with
// the same error ordering.
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn determinism(rules in arb_rules(8), record in arb_record()) {
        let engine = Engine::new();
        let first = engine.evaluate(&rules, &record);
        for _ in 0..3 {
            let again = engine.evaluate(&rules, &record);
            prop_assert_eq!(&again, &first, "determinism violated on repeated evaluation");
        }
    }

    #[test]
    fn determinism_across_engines(rules in arb_rules(8), record in arb_record()) {
        let a = Engine::new().evaluate(&rules, &record);
        let b = Engine::new().evaluate(&rules, &record);
        prop_assert_eq!(a, b, "determinism violated across engine instances");
    }
}

// ---------------------------------------------------------------------------
// Invariant 2: Disabled rules never contribute
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn disabled_rules_contribute_nothing(rules in arb_rules(8), record in arb_record()) {
        let engine = Engine::new();
        let enabled_only: Vec<ValidationRule> =
            rules.iter().filter(|r| r.enabled).cloned().collect();
        prop_assert_eq!(
            engine.evaluate(&rules, &record),
            engine.evaluate(&enabled_only, &record),
            "disabled rules changed the outcome"
        );
    }
}

// ---------------------------------------------------------------------------
// Invariant 3: A false condition silences the rule and its children
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn false_condition_silences_children(record in arb_record(), children in arb_rules(4)) {
        let engine = Engine::new();
        // The schema caps age at 120, so this gate is always closed.
        let rule = children.into_iter().fold(
            ValidationRule::new("missing", "required").condition(when("age").gt(999_i64)),
            ValidationRule::child,
        );
        prop_assert!(engine.evaluate(&[rule], &record).is_valid());
    }
}

// ---------------------------------------------------------------------------
// Invariant 4: Aggregation composes
//
// With no explicit ordering in play, evaluating a concatenation equals
// concatenating the evaluations.
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn unordered_concatenation_composes(
        r1 in arb_unordered_rules(5),
        r2 in arb_unordered_rules(5),
        record in arb_record(),
    ) {
        let engine = Engine::new();
        let combined: Vec<ValidationRule> = r1.iter().chain(r2.iter()).cloned().collect();

        let mut expected = engine.evaluate(&r1, &record).into_errors();
        expected.extend(engine.evaluate(&r2, &record).into_errors());

        prop_assert_eq!(
            engine.evaluate(&combined, &record).into_errors(),
            expected,
            "aggregation is not compositional"
        );
    }
}

// ---------------------------------------------------------------------------
// Invariant 5: Validity flag agrees with the error list
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn validity_matches_error_count(rules in arb_rules(8), record in arb_record()) {
        let result = Engine::new().evaluate(&rules, &record);
        prop_assert_eq!(result.is_valid(), result.errors().is_empty());
    }
}

// ---------------------------------------------------------------------------
// Invariant 6: Totality
//
// Condition evaluation and localization never panic, whatever the
// condition tree or locale tag looks like.
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn conditions_are_total(cond in arb_condition(), record in arb_record()) {
        let engine = Engine::new();
        let rules = [ValidationRule::new("username", "required").condition(cond)];
        let result = engine.evaluate(&rules, &record);
        prop_assert_eq!(result.is_valid(), result.errors().is_empty());
    }

    #[test]
    fn localization_always_yields_a_message(
        rules in arb_rules(8),
        record in arb_record(),
        tag in "[a-zA-Z]{0,3}([_-][a-zA-Z]{1,3})?",
    ) {
        let engine = Engine::new();
        let result = engine.evaluate_localized(&rules, &record, &Locale::parse(&tag));
        for error in result.errors() {
            prop_assert!(!error.error_message.is_empty(), "empty message after localization");
        }
    }
}
