use miette::Result;

use matchmaker::{
    notation::{parse_pattern, parse_value, Lexer},
    Case, CaseError, Clause,
};

/// Matches `value` against `patterns` and prints the winning clause with its
/// bindings.
pub fn run_match(value: &str, patterns: &[&str], debug: bool) -> Result<()> {
    if debug {
        println!("Tokens:\n{:?}", Lexer::new(value).lex()?);
    }
    let subject = parse_value(value)?;
    if debug {
        println!("Value:\n{subject}");
    }

    let clauses = patterns
        .iter()
        .map(|source| {
            let pattern = parse_pattern(source)?;
            if debug {
                println!("Pattern:\n{pattern}");
            }
            Ok(Clause::of(pattern))
        })
        .collect::<Result<Vec<_>>>()?;

    let case = Case::new(clauses).map_err(CaseError::into_err_report)?;
    let matched = case.find(&subject).map_err(CaseError::into_err_report)?;

    println!("clause {} matched", matched.clause);
    for (name, value) in matched.bindings.sorted() {
        println!("  {name} = {value}");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use matchmaker::NoMatch;

    #[test]
    fn reports_first_matching_clause() {
        assert!(run_match("[1, 2]", &["[x, 3]", "[x, y]"], false).is_ok());
        assert!(run_match("{:a => 1}", &["{:a => Integer @ n}"], true).is_ok());
    }

    #[test]
    fn reports_no_match() {
        let error = run_match("[1, 2]", &["[x]", "[_, :b]"], false).unwrap_err();
        let failure = error.downcast_ref::<NoMatch>().unwrap();
        assert_eq!(failure.clause, Some(1));
    }

    #[test]
    fn rejects_malformed_input() {
        assert!(run_match("[1, 2", &["_"], false).is_err());
        assert!(run_match("1", &["*_"], false).is_err());
    }
}
