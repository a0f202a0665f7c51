use super::*;
use proptest::prelude::*;

fn is_valid(c: &Constraints) -> bool {
    c.is_valid()
}

#[test]
fn empty_constraints_are_valid() {
    assert!(is_valid(&Constraints::empty()));
    assert!(is_valid(&Constraints::empty().merge(&Constraints::empty())));
    assert!(Constraints::empty().is_empty());
}

#[test]
fn invalid_absorbs_empty() {
    assert!(Constraints::invalid().is_invalid());
    assert!(Constraints::invalid().merge(&Constraints::empty()).is_invalid());
    assert!(Constraints::empty().merge(&Constraints::invalid()).is_invalid());
}

#[test]
fn single_binding_is_valid() {
    let var = Capture::named("var");
    assert!(is_valid(&Constraints::for_capture(&var, "foo".to_string())));
}

#[test]
fn different_captures_merge() {
    let var1 = Capture::named("var1");
    let var2 = Capture::named("var2");
    let merged = Constraints::for_capture(&var1, "foo").merge(&Constraints::for_capture(&var2, "bar"));

    assert!(is_valid(&merged));
    assert_eq!(merged.len(), 2);
    assert_eq!(merged.value(&var1).unwrap(), "foo");
    assert_eq!(merged.value(&var2).unwrap(), "bar");
}

#[test]
fn same_capture_equal_values_merge() {
    let var = Capture::named("var");
    let merged = Constraints::for_capture(&var, "foo").merge(&Constraints::for_capture(&var, "foo"));

    assert!(is_valid(&merged));
    assert_eq!(merged.len(), 1);
}

#[test]
fn same_capture_unequal_values_conflict() {
    let var = Capture::named("var");
    let merged = Constraints::for_capture(&var, "foo").merge(&Constraints::for_capture(&var, "bar"));

    assert!(merged.is_invalid());
}

#[test]
fn absent_values_agree_with_each_other() {
    let var: Capture<Option<String>> = Capture::named("var");
    let merged = Constraints::for_capture(&var, None).merge(&Constraints::for_capture(&var, None));

    assert!(is_valid(&merged));
    assert_eq!(merged.value(&var).unwrap(), None);
}

#[test]
fn absent_value_conflicts_with_present_value() {
    let var: Capture<Option<String>> = Capture::named("var");
    let none = Constraints::for_capture(&var, None);
    let some = Constraints::for_capture(&var, Some("foo".to_string()));

    assert!(none.merge(&some).is_invalid());
    assert!(some.merge(&none).is_invalid());
}

#[test]
fn same_name_different_identity_never_conflicts() {
    let a = Capture::named("x");
    let b = Capture::named("x");
    let merged = Constraints::for_capture(&a, 1).merge(&Constraints::for_capture(&b, 2));

    assert!(is_valid(&merged));
    assert_eq!(merged.value(&a).unwrap(), 1);
    assert_eq!(merged.value(&b).unwrap(), 2);
}

#[test]
fn missing_binding_is_reported() {
    let var: Capture<i32> = Capture::named("var");

    assert_eq!(Constraints::empty().value(&var), Err(Error::MissingBinding { capture: "var".to_string() }));

    let other = Capture::named("other");
    assert!(matches!(Constraints::for_capture(&other, 1).value(&var), Err(Error::MissingBinding { .. })));
}

#[test]
fn invalid_constraints_refuse_reads() {
    let var: Capture<i32> = Capture::named("var");
    assert_eq!(Constraints::invalid().value(&var), Err(Error::InvalidConstraints { capture: "var".to_string() }));
}

#[test]
fn merge_all_multiple() {
    let var1 = Capture::named("var1");
    let var2 = Capture::named("var2");
    let var3 = Capture::named("var3");

    let all = [
        Constraints::for_capture(&var1, "foo"),
        Constraints::for_capture(&var2, "bar"),
        Constraints::for_capture(&var3, "baz"),
        Constraints::for_capture(&var3, "baz"),
    ];
    let result = Constraints::merge_all(&all);

    assert!(is_valid(&result));
    assert_eq!(result.value(&var1).unwrap(), "foo");
    assert_eq!(result.value(&var2).unwrap(), "bar");
    assert_eq!(result.value(&var3).unwrap(), "baz");
}

#[test]
fn merge_all_of_nothing_is_empty() {
    let result = Constraints::merge_all([]);
    assert!(is_valid(&result));
    assert!(result.is_empty());
}

#[test]
fn valid_constraints_always_hold_a_binding() {
    let var = Capture::named("var");
    let single = Constraints::for_capture(&var, 1);

    assert!(!single.is_empty());
    assert!(!single.merge(&Constraints::empty()).is_empty());
    assert!(Constraints::merge_all([&Constraints::empty(), &Constraints::empty()]).is_empty());
    assert_eq!(Constraints::default(), Constraints::empty());
    assert_eq!(format!("{:?}", Constraints::default()), "Constraints[]");
}

#[test]
fn debug_lists_bindings() {
    let var = Capture::named("var");
    let rendered = format!("{:?}", Constraints::for_capture(&var, 7));

    assert!(rendered.starts_with("Constraints{"));
    assert!(rendered.contains('7'));
    assert_eq!(format!("{:?}", Constraints::invalid()), "InvalidConstraints");
}

// --- Algebraic properties ----------------------------------------------------

/// A small pool of captures so that generated constraints overlap often.
fn pool() -> &'static [Capture<Option<u8>>; 3] {
    static POOL: once_cell::sync::Lazy<[Capture<Option<u8>>; 3]> =
        once_cell::sync::Lazy::new(|| [Capture::named("p0"), Capture::named("p1"), Capture::named("p2")]);
    &POOL
}

/// Build constraints from `(capture index, value)` pairs.
///
/// An empty list gives `Empty`; a `None` outer value gives `Invalid`.
fn build(spec: Option<Vec<(usize, Option<u8>)>>) -> Constraints {
    let Some(bindings) = spec else {
        return Constraints::invalid();
    };
    bindings.into_iter().fold(Constraints::empty(), |acc, (idx, value)| {
        acc.merge(&Constraints::for_capture(&pool()[idx], value))
    })
}

fn constraints_strategy() -> impl Strategy<Value = Constraints> {
    let binding = (0usize..3, proptest::option::of(0u8..3));
    proptest::option::weighted(0.9, proptest::collection::vec(binding, 0..4)).prop_map(build)
}

proptest! {
    #[test]
    fn merge_with_empty_is_identity(c in constraints_strategy()) {
        prop_assert_eq!(Constraints::empty().merge(&c), c.clone());
        prop_assert_eq!(c.merge(&Constraints::empty()), c);
    }

    #[test]
    fn merge_with_invalid_is_invalid(c in constraints_strategy()) {
        prop_assert!(Constraints::invalid().merge(&c).is_invalid());
        prop_assert!(c.merge(&Constraints::invalid()).is_invalid());
    }

    #[test]
    fn merge_is_associative(
        a in constraints_strategy(),
        b in constraints_strategy(),
        c in constraints_strategy(),
    ) {
        prop_assert_eq!(a.merge(&b).merge(&c), a.merge(&b.merge(&c)));
    }

    #[test]
    fn merge_is_commutative_in_validity(a in constraints_strategy(), b in constraints_strategy()) {
        prop_assert_eq!(a.merge(&b), b.merge(&a));
    }
}
