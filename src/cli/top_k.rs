use crate::cli;
use itertools::Itertools;
use log::{info, warn};
use std::{error::Error, path::PathBuf};

pub fn top_k(k: usize, path: Option<PathBuf>) -> Result<(), Box<dyn Error>> {
    let values = match &path {
        Some(path) => cli::with_file_text(path, parse_integers)??,
        None => parse_integers(&cli::read_stdin()?)?,
    };

    let unique: Vec<i64> = values.iter().copied().unique().collect();
    if unique.len() < values.len() {
        warn!("Ignoring {} duplicate value(s)", values.len() - unique.len());
    }
    info!("Selecting the {} largest of {} value(s)", k, unique.len());

    let result = heapdex::top_k(k, &unique)?;
    println!("{}", result.iter().join(" "));
    Ok(())
}

fn parse_integers(text: &str) -> Result<Vec<i64>, String> {
    text.split_whitespace()
        .map(|token| {
            token
                .parse::<i64>()
                .map_err(|_| format!("Invalid integer {:?}", token))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_integers() {
        assert_eq!(parse_integers(" 50 25\n5 -70\t55 "), Ok(vec![50, 25, 5, -70, 55]));
        assert_eq!(parse_integers(""), Ok(vec![]));
        assert_eq!(parse_integers("1 two 3"), Err("Invalid integer \"two\"".to_string()));
    }
}
