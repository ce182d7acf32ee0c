use datalog_syntax::Program;
use std::fmt::Write;

/// Renders a program back to its line-oriented surface syntax: facts, then
/// rules, then the query, each block separated by a blank line. Relies
/// entirely on the `Debug` impls in `datalog_syntax`, which already produce
/// the exact surface form (`name(arg, arg).` / `head :- body.`).
pub fn render_program(program: &Program) -> String {
    let mut out = String::new();

    for fact in &program.facts {
        let _ = writeln!(out, "{:?}", fact);
    }
    if !program.facts.is_empty() && (!program.rules.is_empty() || program.query.is_some()) {
        out.push('\n');
    }

    for rule in &program.rules {
        let _ = writeln!(out, "{:?}", rule);
    }
    if !program.rules.is_empty() && program.query.is_some() {
        out.push('\n');
    }

    if let Some(query) = &program.query {
        let _ = writeln!(out, "{:?}", query);
    }

    out
}
