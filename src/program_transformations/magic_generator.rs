use crate::program_transformations::adorner::AdornedRule;
use datalog_syntax::*;

/// The magic predicate of an adorned predicate `p^β` is named `magic_<p>`
/// -- not `magic_<p>_<β>`; the binding pattern only shows up through the
/// arity of the retained (bound) arguments, never in the name itself (see
/// DESIGN.md for why this departs from the wider pack's convention).
pub fn magic_predicate(adorned: &AdornedPredicate) -> Predicate {
    Predicate::new(format!("magic_{}", adorned.name()), adorned.bound_args())
}

/// One magic rule per adorned IDB occurrence in `rule`'s body:
/// `magic(Qⱼ^γⱼ) :- magic(H^β), B₁, …, Bⱼ₋₁.`
pub fn generate_magic_rules(rule: &AdornedRule) -> Vec<Rule> {
    let mut magic_rules = Vec::new();
    for (index, atom) in rule.body.iter().enumerate() {
        if let Atom::Adorned(adorned) = atom {
            let magic_head = magic_predicate(adorned);
            let mut body = Vec::with_capacity(index + 1);
            body.push(Atom::Plain(magic_predicate(&rule.head)));
            body.extend(rule.body[..index].iter().cloned());
            magic_rules.push(Rule::new(magic_head, body));
        }
    }
    magic_rules
}

pub fn generate_all_magic_rules(adorned_rules: &[AdornedRule]) -> Vec<Rule> {
    adorned_rules.iter().flat_map(generate_magic_rules).collect()
}
