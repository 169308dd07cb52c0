//! Hierarchical, sector-structured NNN addresses.

use crate::component::Component;
use crate::error::NameError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Separator between address labels
pub const SEP: char = '.';
/// Maximum number of separators in an address
pub const MAX_DOTS: usize = 15;
/// Maximum number of hexadecimal characters in an address
pub const MAX_HEX_CHARS: usize = 16;

/// An NNN address: an ordered sequence of name components.
///
/// Addresses model a tree of administrative sectors. Canonical ordering plus
/// the closest-common-sector query let the control plane compute handoff and
/// delegation paths without a separate tree structure; the flat component list
/// implicitly encodes depth and lineage.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NNNAddress {
    comps: Vec<Component>,
}

impl NNNAddress {
    /// Create an empty address
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a dot-separated hexadecimal address, e.g. `"ae.3.4f"`
    pub fn parse(name: &str) -> Result<Self, NameError> {
        name.parse()
    }

    /// Create an address from an explicit component list
    pub fn from_components(comps: Vec<Component>) -> Self {
        Self { comps }
    }

    /// Number of components
    pub fn size(&self) -> usize {
        self.comps.len()
    }

    /// True when the address has no components
    pub fn is_empty(&self) -> bool {
        self.comps.is_empty()
    }

    /// True when the address consists of exactly one component
    pub fn is_toplvl_sector(&self) -> bool {
        self.comps.len() == 1
    }

    /// Append a component; a zero-length component is not appended
    pub fn append(&mut self, comp: Component) -> &mut Self {
        if !comp.is_empty() {
            self.comps.push(comp);
        }
        self
    }

    /// Append raw bytes as one component
    pub fn append_bytes(&mut self, bytes: &[u8]) -> &mut Self {
        self.append(Component::from_bytes(bytes))
    }

    /// Append by swapping contents out of `comp`, leaving it empty.
    ///
    /// Avoids a copy when the caller is about to discard the component.
    pub fn append_by_swap(&mut self, comp: &mut Component) -> &mut Self {
        if !comp.is_empty() {
            let mut fresh = Component::new();
            fresh.swap(comp);
            self.comps.push(fresh);
        }
        self
    }

    /// Get a component by index; negative indices count from the back
    /// (`-1` is the last component)
    pub fn get(&self, index: isize) -> Result<&Component, NameError> {
        let resolved = if index < 0 {
            self.comps.len() as isize + index
        } else {
            index
        };
        if resolved < 0 || resolved as usize >= self.comps.len() {
            return Err(NameError::IndexOutOfRange(index));
        }
        Ok(&self.comps[resolved as usize])
    }

    /// Iterate over the components in order
    pub fn iter(&self) -> std::slice::Iter<'_, Component> {
        self.comps.iter()
    }

    /// The address minus its last component (one sector up).
    ///
    /// The sector of an empty address is the empty address.
    pub fn sector_name(&self) -> NNNAddress {
        let mut comps = self.comps.clone();
        comps.pop();
        NNNAddress { comps }
    }

    /// True when both addresses belong to the same sector.
    ///
    /// Two addresses share a sector when they share all but their last
    /// component, or when one of them names the sector the other lives in
    /// (a parent address and its direct child).
    pub fn is_same_sector(&self, other: &NNNAddress) -> bool {
        let own = self.sector_name();
        let theirs = other.sector_name();
        own == theirs || *self == theirs || *other == own
    }

    /// The closest sector common to both addresses.
    ///
    /// Trailing components are stripped from whichever side compares greater
    /// until the two sides match. When either address is already top level,
    /// the closest sector is the top-level component of `other`.
    pub fn closest_sector(&self, other: &NNNAddress) -> Result<NNNAddress, NameError> {
        if self.is_toplvl_sector() || other.is_toplvl_sector() {
            let mut top = NNNAddress::new();
            top.append(other.get(0)?.clone());
            return Ok(top);
        }

        match self.cmp(other) {
            Ordering::Equal => Ok(self.clone()),
            Ordering::Greater => self.sector_name().closest_sector(other),
            Ordering::Less => self.closest_sector(&other.sector_name()),
        }
    }

    /// Render the address in dot notation with uppercase hexadecimal labels
    pub fn to_dot_hex(&self) -> String {
        let mut out = String::new();
        for (i, comp) in self.comps.iter().enumerate() {
            if i > 0 {
                out.push(SEP);
            }
            out.push_str(&comp.to_hex());
        }
        out
    }
}

impl FromStr for NNNAddress {
    type Err = NameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.chars().any(|c| c != SEP && !c.is_ascii_hexdigit()) {
            return Err(NameError::Charset);
        }

        let dots = s.chars().filter(|&c| c == SEP).count();
        if dots > MAX_DOTS {
            return Err(NameError::DotCount(MAX_DOTS));
        }
        if s.len() - dots > MAX_HEX_CHARS {
            return Err(NameError::HexLength(MAX_HEX_CHARS));
        }

        let bytes = s.as_bytes();
        let mut addr = NNNAddress::new();
        let mut i = 0;
        while i < bytes.len() {
            let mut consecutive = 0;
            while i < bytes.len() && bytes[i] == SEP as u8 {
                consecutive += 1;
                i += 1;
            }
            if consecutive > 1 {
                return Err(NameError::DanglingDot);
            }
            if consecutive != 0 && i == bytes.len() {
                return Err(NameError::DanglingDot);
            }
            if i == bytes.len() {
                break;
            }

            let end = s[i..].find(SEP).map(|p| i + p).unwrap_or(bytes.len());
            let mut comp = Component::from_dot_hex(&s[i..end])?;
            addr.append_by_swap(&mut comp);
            i = end;
        }
        Ok(addr)
    }
}

impl Ord for NNNAddress {
    /// Component-wise canonical comparison; a strict prefix sorts first
    fn cmp(&self, other: &Self) -> Ordering {
        for (a, b) in self.comps.iter().zip(other.comps.iter()) {
            match a.cmp(b) {
                Ordering::Equal => continue,
                decided => return decided,
            }
        }
        self.comps.len().cmp(&other.comps.len())
    }
}

impl PartialOrd for NNNAddress {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<'a> IntoIterator for &'a NNNAddress {
    type Item = &'a Component;
    type IntoIter = std::slice::Iter<'a, Component>;

    fn into_iter(self) -> Self::IntoIter {
        self.comps.iter()
    }
}

impl fmt::Display for NNNAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_dot_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(s: &str) -> NNNAddress {
        NNNAddress::parse(s).unwrap()
    }

    #[test]
    fn test_parse_basic() {
        let a = addr("1.a.3");
        assert_eq!(a.size(), 3);
        assert_eq!(a.to_dot_hex(), "1.A.3");
    }

    #[test]
    fn test_parse_empty() {
        assert!(addr("").is_empty());
    }

    #[test]
    fn test_parse_rejects_bad_charset() {
        assert_eq!(
            NNNAddress::parse("1.g.3").unwrap_err(),
            NameError::Charset
        );
        assert_eq!(NNNAddress::parse("1,2").unwrap_err(), NameError::Charset);
    }

    #[test]
    fn test_parse_rejects_too_many_dots() {
        let s = "1.".repeat(16) + "1";
        assert_eq!(
            NNNAddress::parse(&s).unwrap_err(),
            NameError::DotCount(MAX_DOTS)
        );
    }

    #[test]
    fn test_parse_rejects_too_long() {
        assert_eq!(
            NNNAddress::parse("12345678.123456789").unwrap_err(),
            NameError::HexLength(MAX_HEX_CHARS)
        );
    }

    #[test]
    fn test_parse_rejects_dangling_dots() {
        assert_eq!(NNNAddress::parse("1..2").unwrap_err(), NameError::DanglingDot);
        assert_eq!(NNNAddress::parse("1.").unwrap_err(), NameError::DanglingDot);
    }

    #[test]
    fn test_get_negative_index() {
        let a = addr("1.2.3");
        assert_eq!(a.get(-1).unwrap().to_hex(), "3");
        assert_eq!(a.get(0).unwrap().to_hex(), "1");
        assert_eq!(a.get(3).unwrap_err(), NameError::IndexOutOfRange(3));
        assert_eq!(a.get(-4).unwrap_err(), NameError::IndexOutOfRange(-4));
    }

    #[test]
    fn test_append_skips_empty() {
        let mut a = NNNAddress::new();
        a.append(Component::new());
        assert!(a.is_empty());
        a.append(Component::from_number(7));
        assert_eq!(a.size(), 1);
    }

    #[test]
    fn test_append_by_swap_drains_source() {
        let mut a = NNNAddress::new();
        let mut comp = Component::from_number(9);
        a.append_by_swap(&mut comp);
        assert!(comp.is_empty());
        assert_eq!(a.to_dot_hex(), "9");
    }

    #[test]
    fn test_compare_prefix_sorts_first() {
        assert!(addr("1.2") < addr("1.2.3"));
        assert!(addr("1.2.3") > addr("1.2"));
        assert_eq!(addr("1.2.3").cmp(&addr("1.2.3")), Ordering::Equal);
        assert!(addr("1.2.3") < addr("1.2.4"));
    }

    #[test]
    fn test_sector_name() {
        let a = addr("1.2.3");
        assert_eq!(a.sector_name(), addr("1.2"));
        assert!(NNNAddress::new().sector_name().is_empty());
    }

    #[test]
    fn test_same_sector() {
        assert!(addr("1.2.3").is_same_sector(&addr("1.2.4")));
        assert!(!addr("1.2.3").is_same_sector(&addr("1.3.3")));
    }

    #[test]
    fn test_sector_contains_its_members() {
        for name in ["1.2", "1.2.3", "a.b.c.d"] {
            let a = addr(name);
            assert!(a.sector_name().is_same_sector(&a), "failed for {name}");
        }
    }

    #[test]
    fn test_closest_sector() {
        assert_eq!(
            addr("1.2.3").closest_sector(&addr("1.2.4")).unwrap(),
            addr("1.2")
        );
        assert_eq!(
            addr("1.2.3").closest_sector(&addr("1.2.3")).unwrap(),
            addr("1.2.3")
        );
        // either side top level resolves to the top of the destination
        assert_eq!(addr("1").closest_sector(&addr("2.3")).unwrap(), addr("2"));
        assert_eq!(addr("1.2").closest_sector(&addr("3")).unwrap(), addr("3"));
    }

    #[test]
    fn test_display_matches_dot_hex() {
        let a = addr("a.b.c");
        assert_eq!(format!("{a}"), "A.B.C");
    }
}
