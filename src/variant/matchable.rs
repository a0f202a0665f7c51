//! Field-by-field matching of one variant.
//!
//! `MatchableN` bundles a [`Variant`], the variant's constructor, and one
//! accessor per field. Applying it narrows the value, matches each field with
//! its own matcher and combines the field matches with `Match::combineN`, so
//! rebuilding constructs the same variant from the rebuilt fields.

use std::fmt;
use std::sync::Arc;

use super::Variant;
use crate::{Match, Matcher, Value, from_fn};

impl_matchable!(
    /// Single-field variant.
    Matchable1, combine1 => get1: m1: M1: V1: v1
);

impl_matchable!(
    /// Two-field variant.
    Matchable2, combine2 => get1: m1: M1: V1: v1, get2: m2: M2: V2: v2
);

impl_matchable!(
    /// Three-field variant.
    Matchable3, combine3 => get1: m1: M1: V1: v1, get2: m2: M2: V2: v2, get3: m3: M3: V3: v3
);

impl_matchable!(
    /// Four-field variant.
    Matchable4, combine4 => get1: m1: M1: V1: v1, get2: m2: M2: V2: v2, get3: m3: M3: V3: v3, get4: m4: M4: V4: v4
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Capture, MatchRewrites, MatcherExt, any, contains, is_equal, rewrite_to_fixpoint};

    #[derive(Debug, Clone, PartialEq)]
    enum Expr {
        Num(i64),
        Var(String),
        Neg(Box<Expr>),
        Add(Box<Expr>, Box<Expr>),
        Call(String, Vec<Expr>),
        Select(Box<Expr>, Box<Expr>, Box<Expr>, Box<Expr>),
    }

    use Expr::*;

    fn num(n: i64) -> Expr {
        Num(n)
    }

    fn var(name: &str) -> Expr {
        Var(name.to_string())
    }

    fn add(l: Expr, r: Expr) -> Expr {
        Add(Box::new(l), Box::new(r))
    }

    fn neg_matchable() -> Matchable1<Expr, Expr, Expr> {
        let variant = Variant::new("Neg", |e: &Expr| match e {
            Neg(inner) => Some((**inner).clone()),
            _ => None,
        });
        Matchable1::new(variant, |inner| Neg(Box::new(inner)), |inner: &Expr| inner.clone())
    }

    fn add_matchable() -> Matchable2<Expr, (Expr, Expr), Expr, Expr> {
        let variant = Variant::new("Add", |e: &Expr| match e {
            Add(l, r) => Some(((**l).clone(), (**r).clone())),
            _ => None,
        });
        Matchable2::new(
            variant,
            |l, r| Add(Box::new(l), Box::new(r)),
            |(l, _): &(Expr, Expr)| l.clone(),
            |(_, r): &(Expr, Expr)| r.clone(),
        )
    }

    fn call_matchable() -> Matchable2<Expr, (String, Vec<Expr>), String, Vec<Expr>> {
        let variant = Variant::new("Call", |e: &Expr| match e {
            Call(name, args) => Some((name.clone(), args.clone())),
            _ => None,
        });
        Matchable2::new(
            variant,
            Call,
            |(name, _): &(String, Vec<Expr>)| name.clone(),
            |(_, args): &(String, Vec<Expr>)| args.clone(),
        )
    }

    #[test]
    fn fails_on_other_variants() {
        let sum = add_matchable();

        assert!(sum.apply(&num(1), &any::<Expr>(), &any::<Expr>()).is_failure());
        assert!(sum.apply(&var("x"), &any::<Expr>(), &any::<Expr>()).is_failure());
        assert!(sum.apply(&add(num(1), num(2)), &any::<Expr>(), &any::<Expr>()).is_success());
    }

    #[test]
    fn fails_when_a_field_fails() {
        let sum = add_matchable();
        let value = add(num(1), num(2));

        assert!(sum.apply(&value, &is_equal(num(1)), &is_equal(num(3))).is_failure());
        assert!(sum.apply(&value, &is_equal(num(1)), &is_equal(num(2))).is_success());
    }

    #[test]
    fn rebuilds_same_variant_with_overrides() {
        let lhs: Capture<Expr> = Capture::named("lhs");
        let rhs: Capture<Expr> = Capture::named("rhs");
        let sum = add_matchable();

        let m = sum.apply(&add(var("a"), num(2)), &lhs, &rhs);
        assert_eq!(m.rebuild(&MatchRewrites::new()).unwrap(), add(var("a"), num(2)));

        let swapped = m.rewrite(|s, rewrites| {
            rewrites.replace_value(&lhs, s.value(&rhs).unwrap());
            rewrites.replace_value(&rhs, s.value(&lhs).unwrap());
        });
        assert_eq!(swapped, Some(add(num(2), var("a"))));
    }

    #[test]
    fn repeated_capture_requires_equal_fields() {
        let x: Capture<Expr> = Capture::named("x");
        let sum = add_matchable();

        assert!(sum.apply(&add(var("a"), var("a")), &x, &x).is_success());
        assert!(sum.apply(&add(var("a"), var("b")), &x, &x).is_failure());
    }

    #[test]
    fn nested_matchers_compose() {
        let inner: Capture<Expr> = Capture::named("inner");
        let neg = neg_matchable();
        let double_neg = neg.matcher(neg.matcher(inner.clone()));

        let m = double_neg.apply(&Neg(Box::new(Neg(Box::new(num(4))))));
        assert_eq!(m.value(&inner).unwrap(), num(4));
        assert!(double_neg.apply(&Neg(Box::new(num(4)))).is_failure());

        let simplified = double_neg.rewrite(&Neg(Box::new(Neg(Box::new(num(4))))), |s, rewrites| {
            rewrites.replace_value(&inner, add(s.value(&inner).unwrap(), num(1)));
        });
        assert_eq!(simplified, Some(Neg(Box::new(Neg(Box::new(add(num(4), num(1))))))));
    }

    #[test]
    fn list_fields_use_list_matchers() {
        let arg: Capture<Expr> = Capture::named("arg");
        let call = call_matchable();
        let matcher = call.matcher(is_equal("f".to_string()), contains(arg.save(is_equal(num(0)))));

        let value = Call("f".to_string(), vec![var("a"), num(0), num(0)]);
        let out = rewrite_to_fixpoint(value, &matcher, |_, rewrites| rewrites.replace_value(&arg, num(1)));
        assert_eq!(out, Call("f".to_string(), vec![var("a"), num(1), num(1)]));

        assert!(matcher.apply(&Call("g".to_string(), vec![num(0)])).is_failure());
    }

    #[test]
    fn four_fields() {
        let variant = Variant::new("Select", |e: &Expr| match e {
            Select(a, b, c, d) => Some(((**a).clone(), (**b).clone(), (**c).clone(), (**d).clone())),
            _ => None,
        });
        let select = Matchable4::new(
            variant,
            |a, b, c, d| Select(Box::new(a), Box::new(b), Box::new(c), Box::new(d)),
            |p: &(Expr, Expr, Expr, Expr)| p.0.clone(),
            |p: &(Expr, Expr, Expr, Expr)| p.1.clone(),
            |p: &(Expr, Expr, Expr, Expr)| p.2.clone(),
            |p: &(Expr, Expr, Expr, Expr)| p.3.clone(),
        );
        let last: Capture<Expr> = Capture::named("last");
        let value = Select(Box::new(num(1)), Box::new(num(2)), Box::new(num(3)), Box::new(num(4)));

        let m = select.apply(&value, &any::<Expr>(), &any::<Expr>(), &is_equal(num(3)), &last);
        assert_eq!(m.value(&last).unwrap(), num(4));
        assert!(select.apply(&value, &any::<Expr>(), &any::<Expr>(), &is_equal(num(9)), &last).is_failure());
        assert!(select.apply(&num(1), &any::<Expr>(), &any::<Expr>(), &any::<Expr>(), &last).is_failure());
        assert_eq!(format!("{:?}", select), "Matchable4 { variant: \"Select\", .. }");
    }
}
