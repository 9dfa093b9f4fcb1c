use std::fmt;

/// Formats a number with a comma between every group of three digits.
pub struct LargeFormatter<T: ToString>(pub T);

impl<T: ToString> fmt::Display for LargeFormatter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.0.to_string();

        let len = digits.len();
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (len - i) % 3 == 0 {
                write!(f, ",")?;
            }
            write!(f, "{ch}")?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_large_formatter() {
        assert_eq!(format!("{}", LargeFormatter(7)), "7");
        assert_eq!(format!("{}", LargeFormatter(4096)), "4,096");
        assert_eq!(format!("{}", LargeFormatter(12345678)), "12,345,678");
    }
}
