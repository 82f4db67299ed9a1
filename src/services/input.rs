use std::fs;
use std::io;
use std::path::Path;

/// Read the address list, one address per line, discarding blank lines
///
/// Order is preserved; the report is written in this order.
pub fn read_address_list<P: AsRef<Path>>(path: P) -> io::Result<Vec<String>> {
    let contents = fs::read_to_string(path)?;

    let addresses = contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect();

    Ok(addresses)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_lines_discarded() {
        let path = std::env::temp_dir().join(format!(
            "chainscreen_input_test_{}.txt",
            std::process::id()
        ));
        fs::write(&path, "0xAAA\n\n  \n0xBBB\n0xCCC\n\n").unwrap();

        let addresses = read_address_list(&path).unwrap();
        assert_eq!(addresses, vec!["0xAAA", "0xBBB", "0xCCC"]);

        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(read_address_list("/nonexistent/addresses.txt").is_err());
    }
}
