use std::collections::HashSet;
use std::fmt::{self, Debug, Formatter};

/// A single argument token. Classified exactly once, at construction time:
/// a first-character uppercase letter makes it a variable, anything else
/// (quoted literal, number, lowercase identifier) a constant. This is the
/// only place that rule is applied.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Term {
    Variable(String),
    Constant(String),
}

impl Term {
    pub fn from_token(token: impl Into<String>) -> Term {
        let token = token.into();
        match token.chars().next() {
            Some(c) if c.is_ascii_uppercase() => Term::Variable(token),
            _ => Term::Constant(token),
        }
    }

    pub fn is_variable(&self) -> bool {
        matches!(self, Term::Variable(_))
    }

    pub fn text(&self) -> &str {
        match self {
            Term::Variable(s) | Term::Constant(s) => s,
        }
    }
}

impl Debug for Term {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

fn fmt_args(name: &str, args: &[Term], f: &mut Formatter<'_>) -> fmt::Result {
    write!(f, "{}(", name)?;
    for (index, arg) in args.iter().enumerate() {
        if index > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{:?}", arg)?;
    }
    write!(f, ")")
}

/// `(name, args)`. Arity is `args.len()`. Equality is structural.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Predicate {
    pub name: String,
    pub args: Vec<Term>,
}

impl Predicate {
    pub fn new(name: impl Into<String>, args: Vec<Term>) -> Self {
        Predicate {
            name: name.into(),
            args,
        }
    }

    pub fn arity(&self) -> usize {
        self.args.len()
    }
}

impl Debug for Predicate {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        fmt_args(&self.name, &self.args, f)
    }
}

/// Wraps a Predicate whose arguments are all constants.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Fact(pub Predicate);

impl Fact {
    pub fn new(predicate: Predicate) -> Self {
        debug_assert!(
            predicate.args.iter().all(|t| !t.is_variable()),
            "fact {:?} has a variable argument",
            predicate
        );
        Fact(predicate)
    }
}

impl Debug for Fact {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}.", self.0)
    }
}

/// A Predicate extended with a binding pattern. `len(binding_pattern) ==
/// len(args)` and every character is `b` or `f` -- checked by
/// `debug_assert!` at construction; a violation is a rewriter bug, not a
/// recoverable user error.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct AdornedPredicate {
    pub predicate: Predicate,
    pub binding_pattern: String,
}

impl AdornedPredicate {
    pub fn new(predicate: Predicate, binding_pattern: String) -> Self {
        debug_assert_eq!(
            predicate.args.len(),
            binding_pattern.len(),
            "binding pattern {:?} does not match arity of {:?}",
            binding_pattern,
            predicate
        );
        debug_assert!(
            binding_pattern.chars().all(|c| c == 'b' || c == 'f'),
            "binding pattern {:?} contains characters other than b/f",
            binding_pattern
        );
        AdornedPredicate {
            predicate,
            binding_pattern,
        }
    }

    pub fn name(&self) -> &str {
        &self.predicate.name
    }

    pub fn args(&self) -> &[Term] {
        &self.predicate.args
    }

    pub fn adorned_name(&self) -> String {
        format!("{}_{}", self.predicate.name, self.binding_pattern)
    }

    /// The bound argument subsequence, in position order.
    pub fn bound_args(&self) -> Vec<Term> {
        self.predicate
            .args
            .iter()
            .zip(self.binding_pattern.chars())
            .filter(|(_, mark)| *mark == 'b')
            .map(|(term, _)| term.clone())
            .collect()
    }
}

impl Debug for AdornedPredicate {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        fmt_args(&self.adorned_name(), &self.predicate.args, f)
    }
}

/// A rule body element: either an untouched EDB occurrence or an IDB
/// occurrence the Adorner has promoted. No inheritance -- consumers match
/// on the variant (see DESIGN.md).
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum Atom {
    Plain(Predicate),
    Adorned(AdornedPredicate),
}

impl Atom {
    pub fn name(&self) -> &str {
        match self {
            Atom::Plain(p) => &p.name,
            Atom::Adorned(a) => a.name(),
        }
    }

    pub fn args(&self) -> &[Term] {
        match self {
            Atom::Plain(p) => &p.args,
            Atom::Adorned(a) => a.args(),
        }
    }

    pub fn as_adorned(&self) -> Option<&AdornedPredicate> {
        match self {
            Atom::Adorned(a) => Some(a),
            Atom::Plain(_) => None,
        }
    }
}

impl From<Predicate> for Atom {
    fn from(p: Predicate) -> Self {
        Atom::Plain(p)
    }
}

impl From<AdornedPredicate> for Atom {
    fn from(a: AdornedPredicate) -> Self {
        Atom::Adorned(a)
    }
}

impl Debug for Atom {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Atom::Plain(p) => write!(f, "{:?}", p),
            Atom::Adorned(a) => write!(f, "{:?}", a),
        }
    }
}

/// `(head, body)`. Body order matters: it is the order adornment propagates
/// bindings in, and the order the printer renders atoms in.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Rule {
    pub head: Predicate,
    pub body: Vec<Atom>,
}

impl Rule {
    pub fn new(head: Predicate, body: Vec<Atom>) -> Self {
        Rule { head, body }
    }
}

impl Debug for Rule {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} :- ", self.head)?;
        for (index, atom) in self.body.iter().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{:?}", atom)?;
        }
        write!(f, ".")
    }
}

/// Holds facts, rules and an optional query, and classifies predicates as
/// intensional/extensional as rules are inserted: `idb_names` only grows
/// through `add_rule`, and is treated as fixed once a rewrite is running.
#[derive(Debug, Clone, Default)]
pub struct Program {
    pub facts: Vec<Fact>,
    pub rules: Vec<Rule>,
    pub query: Option<Rule>,
    idb_names: HashSet<String>,
}

impl Program {
    pub fn new() -> Self {
        Program::default()
    }

    pub fn add_fact(&mut self, fact: Fact) {
        self.facts.push(fact);
    }

    pub fn add_rule(&mut self, rule: Rule) {
        self.idb_names.insert(rule.head.name.clone());
        self.rules.push(rule);
    }

    pub fn set_query(&mut self, query: Rule) {
        self.query = Some(query);
    }

    pub fn is_intensional(&self, name: &str) -> bool {
        self.idb_names.contains(name)
    }

    pub fn extensional_symbols(&self) -> HashSet<(String, usize)> {
        self.facts
            .iter()
            .map(|fact| (fact.0.name.clone(), fact.0.arity()))
            .collect()
    }

    pub fn rules_for<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Rule> + 'a {
        self.rules.iter().filter(move |rule| rule.head.name == name)
    }
}
