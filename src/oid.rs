//! Object Identifier (OID) type.
//!
//! OIDs are stored as `SmallVec<[u32; 16]>` to avoid heap allocation for common OIDs.

use crate::error::{Error, Result};
use smallvec::SmallVec;
use std::fmt;

/// Object Identifier.
///
/// Stored as a sequence of arc values (u32). Uses SmallVec to avoid
/// heap allocation for OIDs with 16 or fewer arcs.
///
/// Ordering is lexicographic over the arc sequence, so a strict prefix
/// always compares less than any of its descendants. This is the order
/// agents walk the MIB in.
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct Oid {
    arcs: SmallVec<[u32; 16]>,
}

impl Oid {
    /// Create an empty OID.
    pub fn empty() -> Self {
        Self {
            arcs: SmallVec::new(),
        }
    }

    /// Create an OID from arc values.
    ///
    /// Accepts any iterator of `u32` values.
    ///
    /// # Examples
    ///
    /// ```
    /// use sync_snmp::oid::Oid;
    ///
    /// let oid = Oid::new(vec![1, 3, 6, 1, 2, 1]);
    /// assert_eq!(oid.arcs(), &[1, 3, 6, 1, 2, 1]);
    ///
    /// let oid = Oid::new(0..5);
    /// assert_eq!(oid.arcs(), &[0, 1, 2, 3, 4]);
    /// ```
    pub fn new(arcs: impl IntoIterator<Item = u32>) -> Self {
        Self {
            arcs: arcs.into_iter().collect(),
        }
    }

    /// Create an OID from a slice of arcs.
    pub fn from_slice(arcs: &[u32]) -> Self {
        Self {
            arcs: SmallVec::from_slice(arcs),
        }
    }

    /// Parse an OID from dotted string notation.
    ///
    /// The leading dot is optional: `".1.3.6.1"` and `"1.3.6.1"` produce the
    /// same OID. Parsing is permissive and never fails - it stops silently at
    /// the first character that is neither a digit nor a dot, keeping whatever
    /// arcs were complete up to that point.
    ///
    /// # Examples
    ///
    /// ```
    /// use sync_snmp::oid::Oid;
    ///
    /// let oid = Oid::parse(".1.3.6.1.2.1.1.1.0");
    /// assert_eq!(oid, Oid::parse("1.3.6.1.2.1.1.1.0"));
    ///
    /// // Trailing junk is ignored
    /// let oid = Oid::parse("1.3.6 and more");
    /// assert_eq!(oid.arcs(), &[1, 3, 6]);
    ///
    /// assert!(Oid::parse("").is_empty());
    /// ```
    pub fn parse(text: &str) -> Self {
        let mut arcs = SmallVec::new();
        let mut current: Option<u32> = None;

        for ch in text.chars() {
            match ch {
                '0'..='9' => {
                    let digit = ch as u32 - '0' as u32;
                    current = Some(
                        current
                            .unwrap_or(0)
                            .saturating_mul(10)
                            .saturating_add(digit),
                    );
                }
                '.' => {
                    if let Some(arc) = current.take() {
                        arcs.push(arc);
                    }
                }
                _ => break,
            }
        }

        if let Some(arc) = current {
            arcs.push(arc);
        }

        Self { arcs }
    }

    /// Get the arc values.
    pub fn arcs(&self) -> &[u32] {
        &self.arcs
    }

    /// Get the number of arcs.
    pub fn len(&self) -> usize {
        self.arcs.len()
    }

    /// Check if the OID is empty.
    pub fn is_empty(&self) -> bool {
        self.arcs.is_empty()
    }

    /// Remove all arcs, leaving the empty OID.
    pub fn clear(&mut self) {
        self.arcs.clear();
    }

    /// Append a single arc in place.
    pub fn push(&mut self, arc: u32) {
        self.arcs.push(arc);
    }

    /// Append arcs parsed from dotted string notation.
    ///
    /// Uses the same permissive rules as [`parse()`](Self::parse).
    ///
    /// # Examples
    ///
    /// ```
    /// use sync_snmp::oid::Oid;
    ///
    /// let mut oid = Oid::parse(".1.3.6.1.4");
    /// oid.append(".42.1");
    /// assert_eq!(oid.to_string(), ".1.3.6.1.4.42.1");
    /// ```
    pub fn append(&mut self, text: &str) {
        let tail = Self::parse(text);
        self.arcs.extend_from_slice(&tail.arcs);
    }

    /// Get the arc at the given index.
    ///
    /// Returns [`Error::IndexOutOfRange`] if the index is past the end.
    pub fn at(&self, index: usize) -> Result<u32> {
        self.arcs
            .get(index)
            .copied()
            .ok_or(Error::IndexOutOfRange {
                index,
                len: self.arcs.len(),
            })
    }

    /// Check if this OID starts with another OID.
    ///
    /// Returns `true` if `self` begins with the same arcs as `other`.
    /// An OID always starts with itself, and any OID starts with an empty OID.
    pub fn starts_with(&self, other: &Oid) -> bool {
        self.arcs.len() >= other.arcs.len() && self.arcs[..other.arcs.len()] == other.arcs[..]
    }

    /// Check if this OID is a descendant of `other`.
    ///
    /// Any number of levels counts; an OID is not a child of itself, and
    /// nothing is a child of the empty OID.
    ///
    /// # Examples
    ///
    /// ```
    /// use sync_snmp::oid::Oid;
    ///
    /// let system = Oid::parse(".1.3.6.1.2.1.1");
    /// let sys_descr = Oid::parse(".1.3.6.1.2.1.1.1.0");
    ///
    /// assert!(sys_descr.is_child_of(&system));
    /// assert!(!system.is_child_of(&sys_descr));
    /// assert!(!system.is_child_of(&system));
    /// assert!(!sys_descr.is_child_of(&Oid::empty()));
    /// ```
    pub fn is_child_of(&self, other: &Oid) -> bool {
        !other.is_empty() && self.arcs.len() > other.arcs.len() && self.starts_with(other)
    }

    /// Check if this OID is an ancestor of `other`, any number of levels up.
    pub fn is_parent_of(&self, other: &Oid) -> bool {
        other.is_child_of(self)
    }

    /// Check if this OID is exactly one level below `other`.
    pub fn is_immediate_child_of(&self, other: &Oid) -> bool {
        self.arcs.len() == other.arcs.len() + 1 && self.is_child_of(other)
    }

    /// Check if this OID is exactly one level above `other`.
    pub fn is_immediate_parent_of(&self, other: &Oid) -> bool {
        other.is_immediate_child_of(self)
    }

    /// Get an ancestor OID by dropping `levels` trailing arcs.
    ///
    /// Saturates at the empty OID when `levels` meets or exceeds the arc count.
    ///
    /// # Examples
    ///
    /// ```
    /// use sync_snmp::oid::Oid;
    ///
    /// let sys_descr = Oid::parse(".1.3.6.1.2.1.1.1.0");
    /// assert_eq!(sys_descr.parent(1).to_string(), ".1.3.6.1.2.1.1.1");
    /// assert_eq!(sys_descr.parent(2).to_string(), ".1.3.6.1.2.1.1");
    /// assert!(sys_descr.parent(100).is_empty());
    /// ```
    pub fn parent(&self, levels: usize) -> Oid {
        let keep = self.arcs.len().saturating_sub(levels);
        Oid {
            arcs: SmallVec::from_slice(&self.arcs[..keep]),
        }
    }

    /// Create a child OID by appending an arc.
    ///
    /// # Examples
    ///
    /// ```
    /// use sync_snmp::oid::Oid;
    ///
    /// let system = Oid::parse(".1.3.6.1.2.1.1");
    /// let sys_descr = system.child(1);
    /// assert_eq!(sys_descr.to_string(), ".1.3.6.1.2.1.1.1");
    /// ```
    pub fn child(&self, arc: u32) -> Oid {
        let mut arcs = self.arcs.clone();
        arcs.push(arc);
        Oid { arcs }
    }
}

/// OIDs every SNMP client ends up needing.
///
/// # Examples
///
/// ```
/// use sync_snmp::oid::{Oid, WellKnown};
///
/// let internet = Oid::from(WellKnown::Internet);
/// assert_eq!(internet.to_string(), ".1.3.6.1");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WellKnown {
    /// The empty OID.
    Empty,
    /// .1.3.6.1 - iso.org.dod.internet
    Internet,
    /// .1.3.6.1.4 - the private enterprise subtree
    PrivateEnterprise,
    /// .1.3.6.1.2.1.1.3.0 - sysUpTime.0
    SysUpTime,
    /// .1.3.6.1.6.3.1.1.4.1.0 - snmpTrapOID.0
    TrapOid,
}

impl From<WellKnown> for Oid {
    fn from(well_known: WellKnown) -> Self {
        match well_known {
            WellKnown::Empty => Oid::empty(),
            WellKnown::Internet => Oid::from_slice(&[1, 3, 6, 1]),
            WellKnown::PrivateEnterprise => Oid::from_slice(&[1, 3, 6, 1, 4]),
            WellKnown::SysUpTime => Oid::from_slice(&[1, 3, 6, 1, 2, 1, 1, 3, 0]),
            WellKnown::TrapOid => Oid::from_slice(&[1, 3, 6, 1, 6, 3, 1, 1, 4, 1, 0]),
        }
    }
}

impl fmt::Debug for Oid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Oid({})", self)
    }
}

impl fmt::Display for Oid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for arc in &self.arcs {
            write!(f, ".{}", arc)?;
        }
        Ok(())
    }
}

impl std::str::FromStr for Oid {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl From<&str> for Oid {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}

impl From<&[u32]> for Oid {
    fn from(arcs: &[u32]) -> Self {
        Self::from_slice(arcs)
    }
}

impl<const N: usize> From<[u32; N]> for Oid {
    fn from(arcs: [u32; N]) -> Self {
        Self::new(arcs)
    }
}

impl PartialOrd for Oid {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Oid {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.arcs.cmp(&other.arcs)
    }
}

/// Macro to create an OID from arc literals.
///
/// This is the preferred way to create OID constants since it's concise
/// and avoids parsing overhead.
///
/// # Examples
///
/// ```
/// use sync_snmp::oid;
///
/// let sys_descr = oid!(1, 3, 6, 1, 2, 1, 1, 1, 0);
/// assert_eq!(sys_descr.to_string(), ".1.3.6.1.2.1.1.1.0");
///
/// // Trailing commas are allowed
/// let sys_name = oid!(1, 3, 6, 1, 2, 1, 1, 5, 0,);
/// ```
#[macro_export]
macro_rules! oid {
    ($($arc:expr),* $(,)?) => {
        $crate::oid::Oid::from_slice(&[$($arc),*])
    };
}
