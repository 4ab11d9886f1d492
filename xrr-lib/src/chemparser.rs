use std::collections::HashMap;
use std::iter::Peekable;

use crate::elements::is_symbol;
use crate::error::{Result, XrrError};

/// Element symbol to stoichiometric count.
pub type Composition = HashMap<String, f64>;

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Symbol(String),
    Count(f64),
    Open,
    Close,
}

fn tokenize(formula: &str) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut chars = formula.chars().filter(|c| !c.is_whitespace()).peekable();

    while let Some(&ch) = chars.peek() {
        match ch {
            '(' | '[' => {
                chars.next();
                tokens.push(Token::Open);
            }
            ')' | ']' => {
                chars.next();
                tokens.push(Token::Close);
            }
            c if c.is_ascii_digit() || c == '.' => {
                tokens.push(Token::Count(read_count(&mut chars, formula)?));
            }
            c if c.is_ascii_uppercase() => {
                let mut symbol = String::new();
                symbol.push(c);
                chars.next();
                while let Some(&lc) = chars.peek() {
                    if !lc.is_ascii_lowercase() {
                        break;
                    }
                    symbol.push(lc);
                    chars.next();
                }
                tokens.push(Token::Symbol(symbol));
            }
            c => {
                return Err(XrrError::InvalidFormula(format!(
                    "unexpected character '{c}' in '{formula}'"
                )));
            }
        }
    }
    Ok(tokens)
}

fn take_digits<I: Iterator<Item = char>>(chars: &mut Peekable<I>, text: &mut String) {
    while let Some(&d) = chars.peek() {
        if !d.is_ascii_digit() {
            break;
        }
        text.push(d);
        chars.next();
    }
}

/// Reads `12`, `0.5`, `.5` or `1.e-5` style counts.
fn read_count<I: Iterator<Item = char>>(chars: &mut Peekable<I>, formula: &str) -> Result<f64> {
    let mut text = String::new();

    take_digits(chars, &mut text);
    if chars.peek() == Some(&'.') {
        if text.is_empty() {
            text.push('0');
        }
        text.push('.');
        chars.next();
        take_digits(chars, &mut text);
    }
    // Only lowercase: an uppercase E after a count starts Er, Eu or Es.
    if chars.peek() == Some(&'e') {
        text.push('e');
        chars.next();
        if let Some(&sign) = chars.peek() {
            if sign == '+' || sign == '-' {
                text.push(sign);
                chars.next();
            }
        }
        take_digits(chars, &mut text);
    }

    text.parse::<f64>()
        .map_err(|_| XrrError::InvalidFormula(format!("bad count '{text}' in '{formula}'")))
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    depth: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn count(&mut self) -> f64 {
        if let Some(Token::Count(n)) = self.peek() {
            let n = *n;
            self.pos += 1;
            n
        } else {
            1.0
        }
    }

    /// Parses a run of groups and symbols, scaling every count by `weight`.
    fn group(&mut self, weight: f64, out: &mut Composition) -> Result<()> {
        while let Some(token) = self.peek().cloned() {
            match token {
                Token::Symbol(symbol) => {
                    self.pos += 1;
                    let symbol = match symbol.as_str() {
                        "D" | "T" => "H".to_string(),
                        s if is_symbol(s) => symbol,
                        _ => {
                            return Err(XrrError::InvalidFormula(format!(
                                "'{symbol}' is not an element symbol"
                            )));
                        }
                    };
                    let n = self.count();
                    *out.entry(symbol).or_insert(0.0) += weight * n;
                }
                Token::Open => {
                    self.pos += 1;
                    self.depth += 1;
                    let mut inner = Composition::new();
                    self.group(1.0, &mut inner)?;
                    if self.peek() != Some(&Token::Close) {
                        return Err(XrrError::InvalidFormula(
                            "missing closing parenthesis".to_string(),
                        ));
                    }
                    self.pos += 1;
                    self.depth -= 1;
                    let n = self.count();
                    for (symbol, count) in inner {
                        *out.entry(symbol).or_insert(0.0) += weight * n * count;
                    }
                }
                Token::Close if self.depth > 0 => return Ok(()),
                Token::Close => {
                    return Err(XrrError::InvalidFormula(
                        "unbalanced closing parenthesis".to_string(),
                    ));
                }
                Token::Count(n) => {
                    return Err(XrrError::InvalidFormula(format!(
                        "count {n} does not follow an element or group"
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Parse a chemical formula into element counts.
///
/// Handles nested parentheses, fractional and scientific-notation counts,
/// counts written with a leading dot (`Fe.7Mg.3O`), and D/T as hydrogen.
///
/// # Examples
/// ```
/// let c = xrr::chemparser::chemparse("Al2O3").unwrap();
/// assert_eq!(c["Al"], 2.0);
/// assert_eq!(c["O"], 3.0);
/// ```
pub fn chemparse(formula: &str) -> Result<Composition> {
    let tokens = tokenize(formula)?;
    if tokens.is_empty() {
        return Err(XrrError::InvalidFormula("empty formula".to_string()));
    }

    let mut parser = Parser {
        tokens: &tokens,
        pos: 0,
        depth: 0,
    };
    let mut out = Composition::new();
    parser.group(1.0, &mut out)?;
    Ok(out)
}

pub fn validate_formula(formula: &str) -> bool {
    chemparse(formula).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_oxides() {
        let sio2 = chemparse("SiO2").unwrap();
        assert_eq!(sio2["Si"], 1.0);
        assert_eq!(sio2["O"], 2.0);

        let al2o3 = chemparse("Al2O3").unwrap();
        assert_eq!(al2o3["Al"], 2.0);
        assert_eq!(al2o3["O"], 3.0);
    }

    #[test]
    fn test_nested_groups() {
        let c = chemparse("Mn(SO4)2(H2O)7").unwrap();
        assert_eq!(c["Mn"], 1.0);
        assert_eq!(c["S"], 2.0);
        assert_eq!(c["O"], 15.0);
        assert_eq!(c["H"], 14.0);
    }

    #[test]
    fn test_fractional_counts() {
        let c = chemparse("Si0.925Ti0.075O2").unwrap();
        assert!((c["Si"] - 0.925).abs() < 1e-12);
        assert!((c["Ti"] - 0.075).abs() < 1e-12);

        let dotted = chemparse("Fe.7Mg.3O").unwrap();
        assert!((dotted["Fe"] - 0.7).abs() < 1e-12);
        assert!((dotted["Mg"] - 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_scientific_counts() {
        let c = chemparse("Zn1.e-5Fe3O4").unwrap();
        assert!((c["Zn"] - 1e-5).abs() < 1e-15);
        assert_eq!(c["Fe"], 3.0);

        let erbium = chemparse("Si2Er").unwrap();
        assert_eq!(erbium["Er"], 1.0);
    }

    #[test]
    fn test_case_distinguishes_elements() {
        let co = chemparse("CO").unwrap();
        assert_eq!(co.len(), 2);
        let cobalt = chemparse("Co").unwrap();
        assert_eq!(cobalt["Co"], 1.0);
    }

    #[test]
    fn test_isotopes_map_to_hydrogen() {
        let c = chemparse("D2O").unwrap();
        assert_eq!(c["H"], 2.0);
    }

    #[test]
    fn test_invalid() {
        assert!(!validate_formula(""));
        assert!(!validate_formula("co"));
        assert!(!validate_formula("Xx2"));
        assert!(!validate_formula("(SiO2"));
        assert!(!validate_formula("SiO2)"));
        assert!(!validate_formula("2H"));
    }
}
