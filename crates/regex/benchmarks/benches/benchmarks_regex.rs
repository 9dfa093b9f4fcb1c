use std::hint::black_box;

use criterion::Criterion;
use criterion::criterion_group;
use criterion::criterion_main;

use refa_automata::Acceptor;
use refa_automata::subset_construction;
use refa_minimize::minimize;
use refa_regex::CompileOptions;
use refa_regex::GroupingMode;
use refa_regex::compile;
use refa_regex::format_expression;
use refa_regex::random_expression;
use refa_regex::random_word;
use refa_regex::thompson;
use refa_regex::to_postfix;
use refa_utilities::Timing;

/// The expression (a|b)*a(a|b)(a|b)...(a|b), whose minimal DFA is exponentially larger than its NFA.
fn nth_from_last(n: usize) -> String {
    let mut expression = "(a|b)*a".to_string();
    for _ in 0..n {
        expression.push_str("(a|b)");
    }
    expression
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let mut rng = rand::rng();

    c.bench_function("compile random 100", |bencher| {
        bencher.iter(|| {
            for _ in 0..100 {
                let expression = random_expression(&mut rng, 5, 3);
                black_box(compile(&expression, &CompileOptions::default(), &mut Timing::new()).ok());
            }
        })
    });

    let expression = nth_from_last(8);
    let postfix = match to_postfix(&format_expression(&expression), GroupingMode::Strict) {
        Ok(postfix) => postfix,
        Err(error) => panic!("{expression} is a valid expression: {error}"),
    };
    let nfa = match thompson(&postfix) {
        Ok(nfa) => nfa,
        Err(error) => panic!("{expression} is a valid expression: {error}"),
    };

    c.bench_function("subset construction nth from last 8", |bencher| {
        bencher.iter(|| black_box(subset_construction(&nfa).ok()))
    });

    let dfa = match subset_construction(&nfa) {
        Ok(dfa) => dfa,
        Err(error) => panic!("The Thompson automaton has a start state: {error}"),
    };

    c.bench_function("minimize nth from last 8", |bencher| {
        bencher.iter(|| black_box(minimize(&dfa, &mut Timing::new())))
    });

    c.bench_function("simulate nfa 1000", |bencher| {
        bencher.iter(|| {
            for _ in 0..1000 {
                let word = random_word(&mut rng, 20, 2);
                black_box(nfa.accepts(&word).ok());
            }
        })
    });

    c.bench_function("simulate dfa 1000", |bencher| {
        bencher.iter(|| {
            for _ in 0..1000 {
                let word = random_word(&mut rng, 20, 2);
                black_box(dfa.accepts(&word).ok());
            }
        })
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
