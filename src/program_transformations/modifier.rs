use crate::program_transformations::adorner::AdornedRule;
use crate::program_transformations::magic_generator::magic_predicate;
use datalog_syntax::*;

/// `H^β :- magic(H^β), body.` The head is folded into a plain `Predicate`
/// named by its adorned name -- that is how `H^β` is realized in an output
/// program whose rule heads are always plain predicates.
pub fn modify_rule(rule: &AdornedRule) -> Rule {
    let guard = Atom::Plain(magic_predicate(&rule.head));
    let mut body = Vec::with_capacity(rule.body.len() + 1);
    body.push(guard);
    body.extend(rule.body.iter().cloned());

    let head = Predicate::new(rule.head.adorned_name(), rule.head.predicate.args.clone());
    Rule::new(head, body)
}

pub fn modify_all(adorned_rules: &[AdornedRule]) -> Vec<Rule> {
    adorned_rules.iter().map(modify_rule).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn predicate(name: &str, args: &[&str]) -> Predicate {
        Predicate::new(name, args.iter().map(|a| Term::from_token(*a)).collect())
    }

    #[test]
    fn magic_guard_is_prepended_and_head_renamed() {
        let head = AdornedPredicate::new(predicate("path", &["X", "Y"]), "bf".to_string());
        let rule = AdornedRule {
            head,
            body: vec![Atom::Plain(predicate("edge", &["X", "Y"]))],
        };

        let modified = modify_rule(&rule);
        assert_eq!(modified.head.name, "path_bf");
        assert_eq!(modified.body.len(), 2);
        assert_eq!(modified.body[0].name(), "magic_path");
        assert_eq!(modified.body[1].name(), "edge");
    }
}
