#![forbid(unsafe_code)]

use std::collections::BTreeSet;
use std::fmt;

use itertools::Itertools;

/// The right hand side of a production as a sequence of symbols, where the
/// empty sequence is the epsilon body.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Body(Vec<char>);

impl Body {
    pub fn new(symbols: Vec<char>) -> Self {
        Self(symbols)
    }

    pub fn epsilon() -> Self {
        Self(Vec::new())
    }

    pub fn is_epsilon(&self) -> bool {
        self.0.is_empty()
    }

    pub fn symbols(&self) -> &[char] {
        &self.0
    }
}

impl From<&str> for Body {
    fn from(body: &str) -> Self {
        if body == "ε" {
            Body::epsilon()
        } else {
            Body(body.chars().collect())
        }
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_epsilon() {
            write!(f, "ε")
        } else {
            write!(f, "{}", self.0.iter().format(""))
        }
    }
}

/// All productions of a single nonterminal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rule {
    pub head: char,
    pub bodies: Vec<Body>,
}

/// A context-free grammar whose rules are kept in the order in which their
/// nonterminals were first added.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Grammar {
    rules: Vec<Rule>,
    start_symbol: Option<char>,
}

impl Grammar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty grammar with the given start symbol.
    pub fn with_start_symbol(start_symbol: Option<char>) -> Self {
        Self {
            rules: Vec::new(),
            start_symbol,
        }
    }

    /// Adds the production `head → body`, unless it is already present. The
    /// head of the first production becomes the start symbol when none is set.
    pub fn add_production(&mut self, head: char, body: Body) {
        self.start_symbol.get_or_insert(head);

        match self.rules.iter_mut().find(|rule| rule.head == head) {
            Some(rule) => {
                if !rule.bodies.contains(&body) {
                    rule.bodies.push(body);
                }
            }
            None => self.rules.push(Rule {
                head,
                bodies: vec![body],
            }),
        }
    }

    pub fn start_symbol(&self) -> Option<char> {
        self.start_symbol
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Returns the bodies of the given nonterminal.
    pub fn bodies(&self, head: char) -> &[Body] {
        self.rules
            .iter()
            .find(|rule| rule.head == head)
            .map(|rule| rule.bodies.as_slice())
            .unwrap_or_default()
    }

    /// Returns the nonterminals that have at least one production.
    pub fn nonterminals(&self) -> BTreeSet<char> {
        self.rules.iter().map(|rule| rule.head).collect()
    }

    /// Returns the lower case letters and digits that occur in any body.
    pub fn terminals(&self) -> BTreeSet<char> {
        self.rules
            .iter()
            .flat_map(|rule| &rule.bodies)
            .flat_map(|body| body.symbols())
            .copied()
            .filter(|symbol| symbol.is_lowercase() || symbol.is_ascii_digit())
            .collect()
    }

    pub fn num_of_productions(&self) -> usize {
        self.rules.iter().map(|rule| rule.bodies.len()).sum()
    }
}

impl fmt::Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rule in &self.rules {
            writeln!(f, "{} → {}", rule.head, rule.bodies.iter().format(" | "))?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    #[test]
    fn test_grammar_keeps_insertion_order() {
        let mut grammar = Grammar::new();
        grammar.add_production('S', Body::from("aA"));
        grammar.add_production('A', Body::from("ε"));
        grammar.add_production('S', Body::from("b"));
        grammar.add_production('S', Body::from("aA"));

        assert_eq!(grammar.start_symbol(), Some('S'));
        assert_eq!(grammar.num_of_productions(), 3);
        assert_eq!(grammar.bodies('S'), &[Body::from("aA"), Body::from("b")]);
        assert!(grammar.bodies('B').is_empty());
        assert_eq!(grammar.nonterminals(), BTreeSet::from(['A', 'S']));
        assert_eq!(grammar.terminals(), BTreeSet::from(['a', 'b']));
        assert_eq!(grammar.to_string(), "S → aA | b\nA → ε\n");
    }
}
