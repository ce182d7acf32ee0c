use datalog_syntax::*;
use std::collections::{HashSet, VecDeque};

/// A rule whose head carries an explicit binding pattern. Transient: it
/// exists only between the Adorner and the magic generator/modifier/seeder;
/// the final assembled `Program` never stores one (its head is folded back
/// into a plain `Predicate` named by `adorned_name()`, see the Modifier).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdornedRule {
    pub head: AdornedPredicate,
    pub body: Vec<Atom>,
}

/// Output of a full adornment pass: every adorned rule produced by the
/// worklist closure, plus the query's own adorned atoms (consumed again by
/// the Seeder to build magic seeds and query rules).
pub struct Adornment {
    pub adorned_rules: Vec<AdornedRule>,
    pub query_adorned_atoms: Vec<AdornedPredicate>,
}

/// Query adornment: binding pattern is read off the atom's own arguments --
/// free if variable, bound if constant -- with no external bound-set
/// involved. Only IDB body atoms of the query participate.
fn adorn_query_atom(predicate: &Predicate) -> AdornedPredicate {
    let pattern: String = predicate
        .args
        .iter()
        .map(|term| if term.is_variable() { 'f' } else { 'b' })
        .collect();
    AdornedPredicate::new(predicate.clone(), pattern)
}

pub fn adorn_query(program: &Program, query: &Rule) -> Vec<AdornedPredicate> {
    query
        .body
        .iter()
        .filter_map(|atom| match atom {
            Atom::Plain(predicate) if program.is_intensional(&predicate.name) => {
                Some(adorn_query_atom(predicate))
            }
            _ => None,
        })
        .collect()
}

/// `(priority, -arity)`: EDB atoms (priority 0) before IDB (priority 1),
/// ties broken by decreasing arity. Stable, so an all-EDB body is left in
/// its original relative order among equal-arity atoms.
fn greedy_binding_order<'a>(program: &Program, body: &'a [Atom]) -> Vec<&'a Atom> {
    let mut ordered: Vec<&Atom> = body.iter().collect();
    ordered.sort_by_key(|atom| {
        let priority = u8::from(program.is_intensional(atom.name()));
        (priority, std::cmp::Reverse(atom.args().len()))
    });
    ordered
}

/// Invariant 4: only the head argument positions marked `b` seed the bound
/// set, and only their variable names matter (a bound constant position
/// contributes nothing extra -- it is already "bound" by virtue of being a
/// constant, wherever it reappears in the body).
fn initial_bound_vars(head_args: &[Term], head_pattern: &str) -> HashSet<String> {
    head_args
        .iter()
        .zip(head_pattern.chars())
        .filter(|(_, mark)| *mark == 'b')
        .filter_map(|(term, _)| match term {
            Term::Variable(var) => Some(var.clone()),
            Term::Constant(_) => None,
        })
        .collect()
}

fn binding_pattern_under(args: &[Term], bound: &HashSet<String>) -> String {
    args.iter()
        .map(|term| match term {
            Term::Constant(_) => 'b',
            Term::Variable(var) if bound.contains(var) => 'b',
            Term::Variable(_) => 'f',
        })
        .collect()
}

/// Rule adornment: thread `bound` left-to-right through the (possibly
/// reordered) body, extending it after each atom with *all* of that atom's
/// arguments -- the sideways-information-passing policy this rewrite
/// encodes.
fn adorn_rule(program: &Program, rule: &Rule, head_pattern: &str, reorder: bool) -> AdornedRule {
    let head = AdornedPredicate::new(rule.head.clone(), head_pattern.to_string());
    let mut bound = initial_bound_vars(&rule.head.args, head_pattern);

    let ordered: Vec<&Atom> = if reorder {
        greedy_binding_order(program, &rule.body)
    } else {
        rule.body.iter().collect()
    };

    let mut body = Vec::with_capacity(ordered.len());
    for atom in ordered {
        match atom {
            Atom::Plain(predicate) if program.is_intensional(&predicate.name) => {
                let pattern = binding_pattern_under(&predicate.args, &bound);
                body.push(Atom::Adorned(AdornedPredicate::new(
                    predicate.clone(),
                    pattern,
                )));
            }
            other => body.push(other.clone()),
        }

        for term in atom.args() {
            if let Term::Variable(var) = term {
                bound.insert(var.clone());
            }
        }
    }

    AdornedRule { head, body }
}

/// Fixed-point worklist over adorned names. FIFO order is load-bearing --
/// it must be preserved so generated-rule order is deterministic. A name
/// is pushed at most once (gated by `seen`); every rule whose head matches
/// a popped name is re-adorned under it exactly once.
pub fn adorn_program(program: &Program, query: &Rule, reorder: bool) -> Adornment {
    let query_adorned_atoms = adorn_query(program, query);

    let mut worklist: VecDeque<AdornedPredicate> = query_adorned_atoms.iter().cloned().collect();
    let mut seen: HashSet<String> = worklist.iter().map(AdornedPredicate::adorned_name).collect();
    let mut adorned_rules = Vec::new();

    while let Some(current) = worklist.pop_front() {
        for rule in program.rules_for(current.name()) {
            let adorned_rule = adorn_rule(program, rule, &current.binding_pattern, reorder);

            for atom in &adorned_rule.body {
                if let Atom::Adorned(adorned) = atom {
                    if seen.insert(adorned.adorned_name()) {
                        worklist.push_back(adorned.clone());
                    }
                }
            }

            adorned_rules.push(adorned_rule);
        }
    }

    Adornment {
        adorned_rules,
        query_adorned_atoms,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn predicate(name: &str, args: &[&str]) -> Predicate {
        Predicate::new(name, args.iter().map(|a| Term::from_token(*a)).collect())
    }

    fn ancestor_program() -> Program {
        let mut program = Program::new();
        program.add_rule(Rule::new(
            predicate("ancestor", &["X", "Y"]),
            vec![Atom::Plain(predicate("parent", &["X", "Y"]))],
        ));
        program.add_rule(Rule::new(
            predicate("ancestor", &["X", "Y"]),
            vec![
                Atom::Plain(predicate("ancestor", &["X", "Z"])),
                Atom::Plain(predicate("parent", &["Z", "Y"])),
            ],
        ));
        program
    }

    #[test]
    fn query_adornment_reads_pattern_from_query_atom_args() {
        let program = ancestor_program();
        let query = Rule::new(
            predicate("goal__reachable", &[]),
            vec![Atom::Plain(predicate("ancestor", &["'Bob'", "'Carol'"]))],
        );
        let adorned = adorn_query(&program, &query);
        assert_eq!(adorned.len(), 1);
        assert_eq!(adorned[0].binding_pattern, "bb");
    }

    #[test]
    fn worklist_discovers_both_bb_and_bf_for_the_ancestor_chain() {
        let program = ancestor_program();
        let query = Rule::new(
            predicate("goal__reachable", &[]),
            vec![Atom::Plain(predicate("ancestor", &["'Bob'", "'Carol'"]))],
        );
        let Adornment {
            adorned_rules,
            query_adorned_atoms,
        } = adorn_program(&program, &query, false);

        assert_eq!(query_adorned_atoms.len(), 1);
        assert_eq!(query_adorned_atoms[0].adorned_name(), "ancestor_bb");

        // Two rules re-adorned once under bb, then once more under bf
        // (discovered from the recursive call inside the bb rewrite).
        assert_eq!(adorned_rules.len(), 4);
        let names: HashSet<_> = adorned_rules
            .iter()
            .map(|r| r.head.adorned_name())
            .collect();
        assert_eq!(names, HashSet::from(["ancestor_bb".to_string(), "ancestor_bf".to_string()]));

        let recursive_bb_rule = &adorned_rules[1];
        assert_eq!(recursive_bb_rule.head.adorned_name(), "ancestor_bb");
        match &recursive_bb_rule.body[0] {
            Atom::Adorned(a) => assert_eq!(a.adorned_name(), "ancestor_bf"),
            Atom::Plain(_) => panic!("expected the recursive call to be adorned"),
        }
    }

    #[test]
    fn greedy_reorder_moves_edb_atoms_before_idb_atoms() {
        let mut program = Program::new();
        program.add_rule(Rule::new(
            predicate("p", &["X", "Y"]),
            vec![
                Atom::Plain(predicate("q", &["X", "Y", "Z"])),
                Atom::Plain(predicate("e", &["X"])),
            ],
        ));

        let rule = &program.rules[0];
        let adorned = adorn_rule(&program, rule, "bf", true);

        assert_eq!(adorned.body.len(), 2);
        assert_eq!(adorned.body[0].name(), "e");
        match &adorned.body[1] {
            Atom::Adorned(a) => assert_eq!(a.binding_pattern, "bff"),
            Atom::Plain(_) => panic!("q should have been adorned"),
        }
    }

    #[test]
    fn reorder_is_stable_for_all_edb_bodies_of_equal_arity() {
        let mut program = Program::new();
        program.add_rule(Rule::new(
            predicate("p", &["X"]),
            vec![
                Atom::Plain(predicate("a", &["X"])),
                Atom::Plain(predicate("b", &["X"])),
            ],
        ));
        let rule = &program.rules[0];

        let unordered = adorn_rule(&program, rule, "b", false);
        let reordered = adorn_rule(&program, rule, "b", true);
        assert_eq!(unordered.body, reordered.body);
    }
}
