use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

/// Read a JSON or YAML file and deserialise into a typed struct. The format
/// is picked by extension; anything that isn't .yaml/.yml parses as JSON.
pub fn read_input<T: DeserializeOwned>(path: &str) -> Result<T, Box<dyn std::error::Error>> {
    let canonical = resolve_path(path)?;
    let contents = fs::read_to_string(&canonical)
        .map_err(|e| format!("Failed to read '{}': {}", canonical.display(), e))?;

    let is_yaml = canonical
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("yaml") || e.eq_ignore_ascii_case("yml"));

    let value: T = if is_yaml {
        serde_yaml::from_str(&contents)
            .map_err(|e| format!("Failed to parse '{}': {}", canonical.display(), e))?
    } else {
        serde_json::from_str(&contents)
            .map_err(|e| format!("Failed to parse '{}': {}", canonical.display(), e))?
    };
    Ok(value)
}

/// Resolve and validate the path.
fn resolve_path(path: &str) -> Result<std::path::PathBuf, Box<dyn std::error::Error>> {
    let p = Path::new(path);
    let canonical = if p.is_absolute() {
        p.to_path_buf()
    } else {
        std::env::current_dir()?.join(p)
    };

    if !canonical.exists() {
        return Err(format!("File not found: {}", canonical.display()).into());
    }

    if !canonical.is_file() {
        return Err(format!("Not a file: {}", canonical.display()).into());
    }

    Ok(canonical)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mortgage_core::params::LoanParameters;
    use rust_decimal::Decimal;
    use std::fs;

    #[test]
    fn test_reads_typed_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("loan.json");
        fs::write(&path, r#"{"home_value": "400000", "down_payment": "80000"}"#).unwrap();

        let params: LoanParameters = read_input(path.to_str().unwrap()).unwrap();
        assert_eq!(params.home_value, "400000".parse::<Decimal>().unwrap());
        assert_eq!(params.loan_term_years, 30);
    }

    #[test]
    fn test_yaml_extension_selects_yaml_parser() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("loan.yaml");
        fs::write(&path, "home_value: \"400000\"\ninterest_rate: \"6.48\"\n").unwrap();

        let params: LoanParameters = read_input(path.to_str().unwrap()).unwrap();
        assert_eq!(params.interest_rate, "6.48".parse::<Decimal>().unwrap());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(read_input::<LoanParameters>("no-such-file.json").is_err());
    }
}
