//! First-order unification over literals.
//!
//! Most-general-unifier semantics restricted to the term language of this
//! crate: arguments are constants or variables, never compound terms, so
//! no occurs check is required. The planner treats this as an injected
//! capability; it never re-derives bindings itself.

use crate::literal::Literal;
use crate::term::{Bindings, Term};

/// Unify two literals, returning the most general unifier or `None` when
/// they cannot be made equal. Polarity, predicate and arity must match.
pub fn unify(a: &Literal, b: &Literal) -> Option<Bindings> {
    unify_with(a, b, Bindings::new())
}

/// Unify under pre-existing bindings, extending them on success.
pub fn unify_with(a: &Literal, b: &Literal, bindings: Bindings) -> Option<Bindings> {
    if a.predicate != b.predicate || a.negated != b.negated || a.arity() != b.arity() {
        return None;
    }

    let mut bindings = bindings;
    for (x, y) in a.args.iter().zip(b.args.iter()) {
        bindings = unify_terms(x, y, bindings)?;
    }
    Some(bindings)
}

fn unify_terms(x: &Term, y: &Term, mut bindings: Bindings) -> Option<Bindings> {
    let x = bindings.resolve(x);
    let y = bindings.resolve(y);

    match (&x, &y) {
        _ if x == y => Some(bindings),
        (Term::Variable(name), _) => {
            bindings.bind(name.clone(), y);
            Some(bindings)
        }
        (_, Term::Variable(name)) => {
            bindings.bind(name.clone(), x);
            Some(bindings)
        }
        // Two distinct constants.
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn lit(predicate: &str, args: &[Term]) -> Literal {
        Literal::positive(predicate, args.to_vec())
    }

    #[test]
    fn test_unify_binds_variables_to_constants() {
        let schema = lit("At", &[Term::variable("p"), Term::variable("loc")]);
        let ground = lit("At", &[Term::constant("P1"), Term::constant("SFO")]);

        let bindings = unify(&schema, &ground).unwrap();
        assert_eq!(bindings.resolve(&Term::variable("p")), Term::constant("P1"));
        assert_eq!(bindings.resolve(&Term::variable("loc")), Term::constant("SFO"));
        assert_eq!(schema.substitute(&bindings), ground);
    }

    #[test]
    fn test_unify_constant_parameters_filter() {
        // PutOn(t, Axle) only matches argument lists ending in Axle.
        let head = lit("PutOn", &[Term::variable("t"), Term::constant("Axle")]);
        let good = lit("PutOn", &[Term::constant("Spare"), Term::constant("Axle")]);
        let bad = lit("PutOn", &[Term::constant("Spare"), Term::constant("Trunk")]);

        assert!(unify(&head, &good).is_some());
        assert!(unify(&head, &bad).is_none());
    }

    #[test]
    fn test_unify_variable_to_variable() {
        let a = lit("On", &[Term::variable("x"), Term::variable("y")]);
        let b = lit("On", &[Term::variable("u"), Term::constant("B")]);

        let bindings = unify(&a, &b).unwrap();
        // x and u resolve to the same thing once either is bound further.
        assert_eq!(bindings.resolve(&Term::variable("y")), Term::constant("B"));
        let resolved_x = bindings.resolve(&Term::variable("x"));
        let resolved_u = bindings.resolve(&Term::variable("u"));
        assert_eq!(resolved_x, resolved_u);
    }

    #[test]
    fn test_unify_respects_polarity_and_shape() {
        let pos = lit("Have", &[Term::constant("Cake")]);
        assert!(unify(&pos, &pos.complement()).is_none());
        assert!(unify(&pos, &lit("Eaten", &[Term::constant("Cake")])).is_none());
        assert!(unify(&pos, &lit("Have", &[])).is_none());
    }

    #[test]
    fn test_unify_repeated_variable_must_agree() {
        let twice = lit("Pair", &[Term::variable("x"), Term::variable("x")]);
        let same = lit("Pair", &[Term::constant("A"), Term::constant("A")]);
        let diff = lit("Pair", &[Term::constant("A"), Term::constant("B")]);

        assert!(unify(&twice, &same).is_some());
        assert!(unify(&twice, &diff).is_none());
    }
}
