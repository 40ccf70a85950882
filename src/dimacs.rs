use std::fs;

use anyhow::{anyhow, bail, Context, Result};
use nom::IResult;
use nom::branch::alt;
use nom::bytes::complete::tag;
use nom::character::complete::{digit1, space0, space1};
use nom::combinator::{all_consuming, map_res};
use nom::sequence::{preceded, separated_pair, terminated, tuple};


/** reads an instance from file, returns (n,m,adj_list).
The adjacency list is symmetric, without self-loops nor duplicated edges
(some DIMACS files list each edge in both directions).
*/
pub fn read_from_file(filename:&str) -> Result<(usize, usize, Vec<Vec<usize>>)> {
    let content = fs::read_to_string(filename)
        .with_context(|| format!("unable to read instance file {}", filename))?;
    read_from_str(&content)
        .with_context(|| format!("unable to parse DIMACS instance {}", filename))
}

/// reads an instance from a string in the DIMACS format, returns (n,m,adj_list)
pub fn read_from_str(content:&str) -> Result<(usize, usize, Vec<Vec<usize>>)> {
    let mut header:Option<(usize,usize)> = None;
    let mut adj_list:Vec<Vec<usize>> = Vec::new();
    let mut check_nb_edges = 0;
    for (i,raw_line) in content.lines().enumerate() {
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('c') { continue; }
        match header {
            None => {
                let (_,(n,m)) = read_header(line)
                    .map_err(|_| anyhow!("line {}: expected a 'p edge n m' header, found '{}'", i+1, line))?;
                header = Some((n,m));
                adj_list = vec![Vec::new() ; n];
            },
            Some((n,_)) => {
                let (_,(a,b)) = read_edge(line)
                    .map_err(|_| anyhow!("line {}: invalid edge '{}'", i+1, line))?;
                // WARNING: indices start at 1 in the DIMACS format
                if a == 0 || b == 0 || a > n || b > n {
                    bail!("line {}: edge ({},{}) out of range [1,{}]", i+1, a, b, n);
                }
                check_nb_edges += 1;
                if a != b {
                    adj_list[a-1].push(b-1);
                    adj_list[b-1].push(a-1);
                }
            }
        }
    }
    let (n,m) = header.ok_or_else(|| anyhow!("missing 'p edge n m' header"))?;
    if check_nb_edges != m && 2*check_nb_edges != m {
        bail!("header announces {} edges, found {}", m, check_nb_edges);
    }
    for l in adj_list.iter_mut() {
        l.sort_unstable();
        l.dedup();
    }
    Ok((n, m, adj_list))
}

/// reads an unsigned integer
fn read_integer(s:&str) -> IResult<&str, usize> {
    map_res(digit1, |d:&str| d.parse::<usize>())(s)
}

/// reads two numbers separated by spaces
fn read_two_integers(s:&str) -> IResult<&str, (usize,usize)> {
    all_consuming(terminated(separated_pair(read_integer, space1, read_integer), space0))(s)
}

/// reads header containing (n,m)
pub fn read_header(s:&str) -> IResult<&str, (usize,usize)> {
    preceded(
        tuple((tag("p"), space1, alt((tag("edges"), tag("edge"), tag("col"))), space1)),
        read_two_integers
    )(s)
}

/// reads edge line (WARNING: indices start at 1 in the DIMACS format)
pub fn read_edge(s:&str) -> IResult<&str, (usize,usize)> {
    preceded(tuple((tag("e"), space1)), read_two_integers)(s)
}
