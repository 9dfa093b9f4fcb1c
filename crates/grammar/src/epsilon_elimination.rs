#![forbid(unsafe_code)]

use std::collections::BTreeSet;

use itertools::Itertools;
use log::debug;
use log::info;
use rustc_hash::FxHashMap;

use crate::Body;
use crate::Grammar;

/// Returns the nonterminals that derive the empty word.
///
/// Keeps, for every body, the number of symbol occurrences that are not yet
/// known to be nullable. Every nonterminal that becomes nullable is put on a
/// worklist once, and processing it decrements the counters of all bodies in
/// which it occurs. The head of a body whose counter drops to zero is nullable.
pub fn nullable_nonterminals(grammar: &Grammar) -> BTreeSet<char> {
    let mut remaining: Vec<Vec<usize>> = Vec::new();
    let mut occurrences: FxHashMap<char, Vec<(usize, usize)>> = FxHashMap::default();

    let mut nullable = BTreeSet::new();
    let mut worklist = Vec::new();

    for (rule_index, rule) in grammar.rules().iter().enumerate() {
        remaining.push(rule.bodies.iter().map(|body| body.symbols().len()).collect());

        for (body_index, body) in rule.bodies.iter().enumerate() {
            for symbol in body.symbols() {
                occurrences.entry(*symbol).or_default().push((rule_index, body_index));
            }

            if body.is_epsilon() && nullable.insert(rule.head) {
                worklist.push(rule.head);
            }
        }
    }

    while let Some(symbol) = worklist.pop() {
        for (rule_index, body_index) in occurrences.get(&symbol).into_iter().flatten() {
            let counter = &mut remaining[*rule_index][*body_index];
            *counter -= 1;

            let head = grammar.rules()[*rule_index].head;
            if *counter == 0 && nullable.insert(head) {
                worklist.push(head);
            }
        }
    }

    nullable
}

/// Returns an equivalent grammar without epsilon productions, except for
/// `S → ε` when the start symbol `S` is nullable.
///
/// Every body is replaced by all variants that omit any combination of its
/// nullable occurrences, and variants that end up empty are dropped.
pub fn eliminate_epsilon(grammar: &Grammar) -> Grammar {
    info!(
        "Eliminating epsilon productions from a grammar with {} productions...",
        grammar.num_of_productions()
    );

    let nullable = nullable_nonterminals(grammar);
    debug!("Nullable nonterminals {{{}}}", nullable.iter().format(", "));

    let start_symbol = grammar.start_symbol();
    let mut result = Grammar::with_start_symbol(start_symbol);

    for rule in grammar.rules() {
        for body in &rule.bodies {
            let positions: Vec<usize> = body
                .symbols()
                .iter()
                .positions(|symbol| nullable.contains(symbol))
                .collect();

            for omitted in positions.iter().powerset() {
                let variant: Vec<char> = body
                    .symbols()
                    .iter()
                    .enumerate()
                    .filter(|(index, _)| !omitted.contains(&index))
                    .map(|(_, symbol)| *symbol)
                    .collect();

                if !variant.is_empty() {
                    result.add_production(rule.head, Body::new(variant));
                }
            }
        }
    }

    if let Some(start_symbol) = start_symbol {
        if nullable.contains(&start_symbol) {
            result.add_production(start_symbol, Body::epsilon());
        }
    }

    info!("Resulting grammar has {} productions", result.num_of_productions());
    result
}
