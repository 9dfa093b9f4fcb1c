#![forbid(unsafe_code)]

use rand::Rng;

/// Generates a random, fully parenthesized regular expression over the first
/// `num_of_symbols` lower case letters and epsilon, with operators nested at
/// most `max_depth` deep.
pub fn random_expression(rng: &mut impl Rng, max_depth: usize, num_of_symbols: u8) -> String {
    assert!(
        (1..=26).contains(&num_of_symbols),
        "Between one and 26 symbols are supported."
    );

    let mut expression = String::new();
    write_random_expression(rng, max_depth, num_of_symbols, &mut expression);
    expression
}

/// Generates a random word of at most `max_length` characters over the first
/// `num_of_symbols` lower case letters.
pub fn random_word(rng: &mut impl Rng, max_length: usize, num_of_symbols: u8) -> String {
    let length = rng.random_range(0..=max_length);
    (0..length).map(|_| random_letter(rng, num_of_symbols)).collect()
}

fn write_random_expression(rng: &mut impl Rng, depth: usize, num_of_symbols: u8, expression: &mut String) {
    if depth == 0 || rng.random_bool(0.3) {
        if rng.random_bool(0.1) {
            expression.push('ε');
        } else {
            expression.push(random_letter(rng, num_of_symbols));
        }
        return;
    }

    expression.push('(');
    match rng.random_range(0..5) {
        0 => {
            write_random_expression(rng, depth - 1, num_of_symbols, expression);
            expression.push('|');
            write_random_expression(rng, depth - 1, num_of_symbols, expression);
            expression.push(')');
        }
        1 => {
            write_random_expression(rng, depth - 1, num_of_symbols, expression);
            write_random_expression(rng, depth - 1, num_of_symbols, expression);
            expression.push(')');
        }
        2 => {
            write_random_expression(rng, depth - 1, num_of_symbols, expression);
            expression.push_str(")*");
        }
        3 => {
            write_random_expression(rng, depth - 1, num_of_symbols, expression);
            expression.push_str(")+");
        }
        _ => {
            write_random_expression(rng, depth - 1, num_of_symbols, expression);
            expression.push_str(")?");
        }
    }
}

fn random_letter(rng: &mut impl Rng, num_of_symbols: u8) -> char {
    char::from(b'a' + rng.random_range(0..num_of_symbols))
}

#[cfg(test)]
mod tests {
    use super::*;

    use refa_utilities::random_test;
    use test_log::test;

    use crate::GroupingMode;
    use crate::format_expression;
    use crate::thompson;
    use crate::to_postfix;

    #[test]
    fn test_random_expression_is_well_formed() {
        random_test(100, |rng| {
            let expression = random_expression(rng, 4, 3);

            let postfix = to_postfix(&format_expression(&expression), GroupingMode::Strict).unwrap();
            assert!(thompson(&postfix).is_ok(), "{expression} should be well formed");
        });
    }

    #[test]
    fn test_random_word() {
        random_test(100, |rng| {
            let word = random_word(rng, 5, 2);

            assert!(word.len() <= 5);
            assert!(word.chars().all(|c| c == 'a' || c == 'b'));
        });
    }
}
