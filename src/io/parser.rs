use datalog_syntax::{Atom, Fact, Predicate, Program, Rule, Term};
use thiserror::Error;

/// The head name that marks a rule as the program's query, rather than an
/// ordinary intensional rule. Matches the sentinel used throughout the
/// worked examples (`goal__reachable`).
pub const QUERY_SENTINEL: &str = "goal__reachable";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("line {line}: empty predicate name in '{text}'")]
    EmptyPredicateName { line: usize, text: String },
    #[error("line {line}: unbalanced parentheses in '{text}'")]
    UnbalancedParens { line: usize, text: String },
    #[error("line {line}: no query rule found (expected a '{QUERY_SENTINEL}' head)")]
    MissingQuery { line: usize },
    #[error("line {line}: rule has an empty body in '{text}'")]
    EmptyBody { line: usize, text: String },
}

/// Splits on top-level commas only, ignoring commas nested inside a quoted
/// constant's own text or inside a parenthesized argument list. The
/// reference implementation splits on the literal `", "` between atoms,
/// which breaks the moment an atom's own arguments contain a comma; tracking
/// paren depth avoids that.
fn split_top_level(text: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut depth = 0i32;

    for ch in text.chars() {
        match ch {
            '(' => {
                depth += 1;
                current.push(ch);
            }
            ')' => {
                depth -= 1;
                current.push(ch);
            }
            ',' if depth == 0 => {
                parts.push(current.trim().to_string());
                current = String::new();
            }
            _ => current.push(ch),
        }
    }
    let trailing = current.trim();
    if !trailing.is_empty() {
        parts.push(trailing.to_string());
    }
    parts
}

fn parse_predicate(text: &str, line: usize) -> Result<Predicate, ParseError> {
    let text = text.trim();
    let has_open = text.contains('(');
    let has_close = text.ends_with(')');
    if !has_open && !text.contains(')') {
        let name = text.trim();
        if name.is_empty() {
            return Err(ParseError::EmptyPredicateName {
                line,
                text: text.to_string(),
            });
        }
        return Ok(Predicate::new(name, Vec::new()));
    }
    if !has_open || !has_close {
        return Err(ParseError::UnbalancedParens {
            line,
            text: text.to_string(),
        });
    }

    let open = text.find('(').unwrap();
    let name = text[..open].trim();
    if name.is_empty() {
        return Err(ParseError::EmptyPredicateName {
            line,
            text: text.to_string(),
        });
    }
    let inner = &text[open + 1..text.len() - 1];
    let args = if inner.trim().is_empty() {
        Vec::new()
    } else {
        split_top_level(inner)
            .into_iter()
            .map(Term::from_token)
            .collect()
    };
    Ok(Predicate::new(name, args))
}

enum ParsedLine {
    Fact(Fact),
    Rule(Rule),
}

fn parse_line(raw: &str, line: usize) -> Result<ParsedLine, ParseError> {
    let text = raw.trim().trim_end_matches('.');
    if let Some((head_str, body_str)) = text.split_once(":-") {
        let head = parse_predicate(head_str, line)?;
        let body = split_top_level(body_str.trim())
            .into_iter()
            .map(|part| parse_predicate(&part, line).map(|p| Atom::Plain(p)))
            .collect::<Result<Vec<_>, _>>()?;
        if body.is_empty() {
            return Err(ParseError::EmptyBody {
                line,
                text: raw.trim().to_string(),
            });
        }
        Ok(ParsedLine::Rule(Rule::new(head, body)))
    } else {
        Ok(ParsedLine::Fact(Fact::new(parse_predicate(text, line)?)))
    }
}

/// Parses a Datalog program from its line-oriented surface syntax. Blank
/// lines and lines starting with `%` are skipped. Exactly one rule whose
/// head is named `goal__reachable` becomes the program's query; it is never
/// added to `program.rules`. Missing a query line is an error -- the
/// downstream transformation has no query atoms to seed without one.
pub fn parse_program(source: &str) -> Result<Program, ParseError> {
    let mut program = Program::new();
    let mut found_query = false;

    for (index, raw_line) in source.lines().enumerate() {
        let line_number = index + 1;
        let trimmed = raw_line.trim();
        if trimmed.is_empty() || trimmed.starts_with('%') {
            continue;
        }

        match parse_line(trimmed, line_number)? {
            ParsedLine::Fact(fact) => program.add_fact(fact),
            ParsedLine::Rule(rule) => {
                if rule.head.name == QUERY_SENTINEL {
                    program.set_query(rule);
                    found_query = true;
                } else {
                    program.add_rule(rule);
                }
            }
        }
    }

    if !found_query {
        return Err(ParseError::MissingQuery {
            line: source.lines().count(),
        });
    }

    Ok(program)
}
