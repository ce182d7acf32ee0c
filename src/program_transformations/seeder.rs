use crate::program_transformations::magic_generator::magic_predicate;
use datalog_syntax::*;

/// A magic seed: a ground fact of the query atom's magic predicate,
/// carrying only its bound constants.
pub fn magic_seed(adorned: &AdornedPredicate) -> Fact {
    Fact::new(magic_predicate(adorned))
}

fn variable_names(count: usize) -> Vec<Term> {
    (1..=count).map(|i| Term::Variable(format!("Var_{}", i))).collect()
}

/// A query rule: projects the adorned-predicate answers back to the
/// user-named predicate, so the original query is still answerable against
/// `name` rather than `name_<pattern>`.
pub fn query_rule(adorned: &AdornedPredicate) -> Rule {
    let vars = variable_names(adorned.args().len());
    let head = Predicate::new(adorned.name().to_string(), vars.clone());
    let body_predicate = Predicate::new(adorned.name().to_string(), vars);
    let body = vec![Atom::Adorned(AdornedPredicate::new(
        body_predicate,
        adorned.binding_pattern.clone(),
    ))];
    Rule::new(head, body)
}

/// Runs both productions over the query's adorned atoms, in the order the
/// Adorner returned them (order of IDB occurrences in the query body).
pub fn seed_program(query_adorned_atoms: &[AdornedPredicate]) -> (Vec<Fact>, Vec<Rule>) {
    let seeds = query_adorned_atoms.iter().map(magic_seed).collect();
    let rules = query_adorned_atoms.iter().map(query_rule).collect();
    (seeds, rules)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_keeps_only_bound_constants() {
        let predicate = Predicate::new(
            "ancestor",
            vec![Term::from_token("'Bob'"), Term::from_token("'Carol'")],
        );
        let adorned = AdornedPredicate::new(predicate, "bb".to_string());
        let seed = magic_seed(&adorned);
        assert_eq!(seed.0.name, "magic_ancestor");
        assert_eq!(
            seed.0.args,
            vec![Term::from_token("'Bob'"), Term::from_token("'Carol'")]
        );
    }

    #[test]
    fn partial_binding_seed_keeps_only_the_bound_column() {
        let predicate = Predicate::new(
            "ancestor",
            vec![Term::from_token("X"), Term::from_token("'Carol'")],
        );
        let adorned = AdornedPredicate::new(predicate, "fb".to_string());
        let seed = magic_seed(&adorned);
        assert_eq!(seed.0.args, vec![Term::from_token("'Carol'")]);
    }

    #[test]
    fn query_rule_projects_adorned_answers_back_to_original_name() {
        let predicate = Predicate::new("ancestor", vec![Term::from_token("X"), Term::from_token("Y")]);
        let adorned = AdornedPredicate::new(predicate, "ff".to_string());
        let rule = query_rule(&adorned);
        assert_eq!(rule.head.name, "ancestor");
        assert_eq!(rule.body.len(), 1);
        assert_eq!(rule.body[0].name(), "ancestor");
        match &rule.body[0] {
            Atom::Adorned(a) => assert_eq!(a.binding_pattern, "ff"),
            Atom::Plain(_) => panic!("expected the query rule body to be adorned"),
        }
    }
}
