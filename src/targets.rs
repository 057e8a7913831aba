use std::{fs::File, io::{BufRead, BufReader}, net::IpAddr, path::Path, str::FromStr};

use ipnet::IpNet;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TargetError {
    #[error("invalid target specification: {0}. Use IP, CIDR or @file")]
    InvalidSpec(String),
    #[error("failed to read targets file: {0}")]
    Io(#[from] std::io::Error),
}

pub fn parse_targets(spec: &str) -> Result<Vec<IpAddr>, TargetError> {
    if let Some(file) = spec.strip_prefix('@') {
        return read_targets_file(file);
    }
    expand_spec(spec)
}

fn expand_spec(spec: &str) -> Result<Vec<IpAddr>, TargetError> {
    if let Ok(ip) = IpAddr::from_str(spec) {
        return Ok(vec![ip]);
    }
    if let Ok(net) = IpNet::from_str(spec) {
        return Ok(expand_net(net));
    }
    Err(TargetError::InvalidSpec(spec.to_string()))
}

/// Walks a network from its masked base address upwards, then drops the
/// network and broadcast addresses unless the block holds two or fewer.
fn expand_net(net: IpNet) -> Vec<IpAddr> {
    let mut addrs = Vec::new();
    let mut addr = net.network();
    while net.contains(&addr) {
        addrs.push(addr);
        let next = inc(addr);
        if next <= addr {
            // wrapped past the top of the address space
            break;
        }
        addr = next;
    }
    if addrs.len() > 2 {
        addrs.pop();
        addrs.remove(0);
    }
    addrs
}

fn inc(addr: IpAddr) -> IpAddr {
    match addr {
        IpAddr::V4(v4) => {
            let mut octets = v4.octets();
            carry_inc(&mut octets);
            IpAddr::from(octets)
        }
        IpAddr::V6(v6) => {
            let mut octets = v6.octets();
            carry_inc(&mut octets);
            IpAddr::from(octets)
        }
    }
}

fn carry_inc(octets: &mut [u8]) {
    for b in octets.iter_mut().rev() {
        *b = b.wrapping_add(1);
        if *b != 0 {
            break;
        }
    }
}

fn read_targets_file<P: AsRef<Path>>(path: P) -> Result<Vec<IpAddr>, TargetError> {
    let f = File::open(path)?;
    let rdr = BufReader::new(f);
    let mut out = Vec::new();
    for line in rdr.lines() {
        let line = line?;
        let s = line.trim();
        if s.is_empty() || s.starts_with('#') {
            continue;
        }
        out.extend(expand_spec(s)?);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn addrs(spec: &str) -> Vec<String> {
        parse_targets(spec)
            .unwrap()
            .into_iter()
            .map(|ip| ip.to_string())
            .collect()
    }

    #[test]
    fn literal_v4_expands_to_itself() {
        assert_eq!(addrs("192.0.2.5"), vec!["192.0.2.5"]);
    }

    #[test]
    fn literal_v6_expands_to_itself() {
        assert_eq!(addrs("2001:db8::1"), vec!["2001:db8::1"]);
    }

    #[test]
    fn slash29_drops_network_and_broadcast() {
        assert_eq!(
            addrs("192.0.2.0/29"),
            vec![
                "192.0.2.1",
                "192.0.2.2",
                "192.0.2.3",
                "192.0.2.4",
                "192.0.2.5",
                "192.0.2.6",
            ]
        );
    }

    #[test]
    fn slash30_drops_network_and_broadcast() {
        assert_eq!(addrs("192.0.2.0/30"), vec!["192.0.2.1", "192.0.2.2"]);
    }

    #[test]
    fn slash31_keeps_both_endpoints() {
        assert_eq!(addrs("192.0.2.0/31"), vec!["192.0.2.0", "192.0.2.1"]);
    }

    #[test]
    fn slash32_keeps_single_address() {
        assert_eq!(addrs("192.0.2.7/32"), vec!["192.0.2.7"]);
    }

    #[test]
    fn host_bits_are_masked_to_the_network() {
        assert_eq!(addrs("192.0.2.77/30"), addrs("192.0.2.76/30"));
        assert_eq!(addrs("192.0.2.77/30"), vec!["192.0.2.77", "192.0.2.78"]);
    }

    #[test]
    fn v6_slash126_drops_first_and_last() {
        assert_eq!(addrs("2001:db8::/126"), vec!["2001:db8::1", "2001:db8::2"]);
    }

    #[test]
    fn v6_slash127_keeps_both_endpoints() {
        assert_eq!(addrs("2001:db8::/127"), vec!["2001:db8::", "2001:db8::1"]);
    }

    #[test]
    fn v6_slash128_keeps_single_address() {
        assert_eq!(addrs("2001:db8::42/128"), vec!["2001:db8::42"]);
    }

    #[test]
    fn increment_carries_across_octet_boundaries() {
        assert_eq!(
            inc(IpAddr::from_str("10.0.0.255").unwrap()),
            IpAddr::from_str("10.0.1.0").unwrap()
        );
        assert_eq!(
            inc(IpAddr::from_str("10.0.255.255").unwrap()),
            IpAddr::from_str("10.1.0.0").unwrap()
        );
        assert_eq!(
            inc(IpAddr::from_str("2001:db8::ffff").unwrap()),
            IpAddr::from_str("2001:db8::1:0").unwrap()
        );
    }

    #[test]
    fn expansion_is_ascending_and_unique() {
        let got = parse_targets("198.51.100.0/28").unwrap();
        let mut sorted = got.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(got, sorted);
        assert_eq!(got.len(), 14);
    }

    #[test]
    fn expansion_is_deterministic() {
        assert_eq!(addrs("203.0.113.0/27"), addrs("203.0.113.0/27"));
    }

    #[test]
    fn garbage_spec_is_invalid() {
        assert!(matches!(
            parse_targets("not-an-ip"),
            Err(TargetError::InvalidSpec(_))
        ));
        assert!(matches!(
            parse_targets("192.0.2.0/33"),
            Err(TargetError::InvalidSpec(_))
        ));
    }

    #[test]
    fn targets_file_concatenates_line_expansions() {
        let path = std::env::temp_dir().join("idbsweep_targets_test.txt");
        let mut f = File::create(&path).unwrap();
        writeln!(f, "# lab hosts").unwrap();
        writeln!(f).unwrap();
        writeln!(f, "192.0.2.5").unwrap();
        writeln!(f, "192.0.2.0/30").unwrap();
        drop(f);
        let spec = format!("@{}", path.display());
        assert_eq!(addrs(&spec), vec!["192.0.2.5", "192.0.2.1", "192.0.2.2"]);
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn missing_targets_file_is_an_io_error() {
        assert!(matches!(
            parse_targets("@/nonexistent/idbsweep-targets"),
            Err(TargetError::Io(_))
        ));
    }
}
