use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context, Result};


/** reads a table of known chromatic numbers. Each line contains:
`<instance name> <number of colors> <time>` (the time is ignored).
Returns the list of (instance name, number of colors).
*/
pub fn read_optima_table(filename:&str) -> Result<Vec<(String,usize)>> {
    let content = fs::read_to_string(filename)
        .with_context(|| format!("unable to read optima table {}", filename))?;
    parse_optima_table(&content)
        .with_context(|| format!("unable to parse optima table {}", filename))
}

/// parses the content of an optima table
pub fn parse_optima_table(content:&str) -> Result<Vec<(String,usize)>> {
    let mut res = Vec::new();
    for (i,line) in content.lines().enumerate() {
        let mut fields = line.split_whitespace();
        let name = match fields.next() {
            None => continue, // empty line
            Some(name) => name,
        };
        let nb_colors = fields.next()
            .ok_or_else(|| anyhow!("line {}: missing number of colors for {}", i+1, name))?
            .parse::<usize>()
            .with_context(|| format!("line {}: invalid number of colors for {}", i+1, name))?;
        res.push((name.to_string(), nb_colors));
    }
    Ok(res)
}

/** returns the known number of colors of an instance (looked up by file name, so
that `path/to/DSJC125.1.col` matches the entry `DSJC125.1.col`).
*/
pub fn read_optima(filename:&str, instance:&str) -> Result<Option<usize>> {
    let table = read_optima_table(filename)?;
    Ok(find_optima(&table, instance))
}

/// looks up an instance (by file name) in an optima table
pub fn find_optima(table:&[(String,usize)], instance:&str) -> Option<usize> {
    let name = Path::new(instance).file_name()
        .and_then(|e| e.to_str())
        .unwrap_or(instance);
    table.iter().find(|(e,_)| e == name).map(|(_,k)| *k)
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_table() {
        let table = parse_optima_table("DSJC125.1.col 5 0.1\n\nDSJC250.5.col 28 120\n").unwrap();
        assert_eq!(table, vec![
            ("DSJC125.1.col".to_string(), 5),
            ("DSJC250.5.col".to_string(), 28),
        ]);
        assert!(parse_optima_table("DSJC125.1.col\n").is_err());
        assert!(parse_optima_table("DSJC125.1.col five 0\n").is_err());
    }

    #[test]
    fn test_find_by_file_name() {
        let table = vec![("myciel3.col".to_string(), 4)];
        assert_eq!(find_optima(&table, "insts/other-instances/myciel3.col"), Some(4));
        assert_eq!(find_optima(&table, "myciel3.col"), Some(4));
        assert_eq!(find_optima(&table, "myciel4.col"), None);
    }

    #[test]
    fn test_read_optima_file() {
        assert_eq!(read_optima("insts/optima.txt", "insts/grid-instances/grid2x2").unwrap(), Some(2));
        assert_eq!(read_optima("insts/optima.txt", "unknown.col").unwrap(), None);
        assert!(read_optima("insts/missing.txt", "grid2x2").is_err());
    }
}
