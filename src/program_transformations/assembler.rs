use crate::program_transformations::adorner::{adorn_program, Adornment};
use crate::program_transformations::magic_generator::generate_all_magic_rules;
use crate::program_transformations::modifier::modify_all;
use crate::program_transformations::seeder::seed_program;
use datalog_syntax::*;

/// Drives the Adorner, feeds its output to the magic generator, modifier
/// and seeder, and concatenates everything with the untouched fact set
/// and the original query. Duplicate suppression is not performed -- a
/// downstream evaluator treats duplicate facts/rules as redundant, not
/// erroneous.
///
/// Panics if `program.query` is unset; the caller (the parser/CLI layer)
/// is responsible for rejecting a query-less program before this point.
pub fn apply_magic_set_transformation(program: &Program, reorder: bool) -> Program {
    let query = program
        .query
        .clone()
        .expect("apply_magic_set_transformation requires a query");

    let Adornment {
        adorned_rules,
        query_adorned_atoms,
    } = adorn_program(program, &query, reorder);

    let magic_rules = generate_all_magic_rules(&adorned_rules);
    let modified_rules = modify_all(&adorned_rules);
    let (magic_seeds, query_rules) = seed_program(&query_adorned_atoms);

    let mut output = Program::new();
    for fact in &program.facts {
        output.add_fact(fact.clone());
    }
    for seed in magic_seeds {
        output.add_fact(seed);
    }
    for rule in magic_rules
        .into_iter()
        .chain(modified_rules)
        .chain(query_rules)
    {
        output.add_rule(rule);
    }
    output.set_query(query);

    output
}
