//! Ordered variable binding list.
//!
//! A `VarList` preserves insertion order and permits duplicate OIDs, which
//! is what the protocol itself allows. Set and map views are derived on
//! demand for callers that want deduplicated or keyed access.

use crate::error::{Error, Result};
use crate::oid::Oid;
use crate::value::Value;
use crate::varbind::VarBind;
use std::collections::{BTreeMap, BTreeSet};

/// Ordered list of variable bindings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VarList {
    vars: Vec<VarBind>,
}

impl VarList {
    /// Create an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of bindings, duplicates included.
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    /// Check if the list has no bindings.
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// The bindings in insertion order.
    pub fn vars(&self) -> &[VarBind] {
        &self.vars
    }

    /// Iterate over the bindings in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, VarBind> {
        self.vars.iter()
    }

    /// Append a binding with a NULL placeholder value.
    ///
    /// Duplicate OIDs are preserved. Returns [`Error::InvalidArgument`] for
    /// an empty OID.
    pub fn add_null_var(&mut self, oid: &Oid) -> Result<&mut Self> {
        if oid.is_empty() {
            return Err(Error::invalid_argument(
                "cannot add an empty OID to a variable list",
            ));
        }
        self.vars.push(VarBind::null(oid.clone()));
        Ok(self)
    }

    /// Append NULL-value bindings for every OID in the iterator.
    ///
    /// An empty iterator is a no-op. Works for both vector and set views.
    pub fn add_null_vars<'a>(&mut self, oids: impl IntoIterator<Item = &'a Oid>) -> Result<&mut Self> {
        for oid in oids {
            self.add_null_var(oid)?;
        }
        Ok(self)
    }

    /// Append a binding carrying a concrete value.
    pub fn add_var(&mut self, oid: &Oid, value: Value) -> Result<&mut Self> {
        if oid.is_empty() {
            return Err(Error::invalid_argument(
                "cannot add an empty OID to a variable list",
            ));
        }
        self.vars.push(VarBind::new(oid.clone(), value));
        Ok(self)
    }

    /// The OIDs in insertion order, duplicates included.
    pub fn oids_vec(&self) -> Vec<Oid> {
        self.vars.iter().map(|vb| vb.oid.clone()).collect()
    }

    /// The OIDs as a deduplicated, ordered set.
    pub fn oids_set(&self) -> BTreeSet<Oid> {
        self.vars.iter().map(|vb| vb.oid.clone()).collect()
    }

    /// A map view keyed by OID.
    ///
    /// When the list holds duplicate OIDs, which of the duplicates ends up
    /// in the map is unspecified; don't rely on it.
    pub fn to_map(&self) -> BTreeMap<Oid, VarBind> {
        self.vars
            .iter()
            .map(|vb| (vb.oid.clone(), vb.clone()))
            .collect()
    }

    /// Check if the list contains a binding for the given OID.
    pub fn contains(&self, oid: &Oid) -> bool {
        self.vars.iter().any(|vb| &vb.oid == oid)
    }

    /// Find the first binding for the given OID.
    ///
    /// With duplicates, the first match in insertion order wins.
    pub fn at(&self, oid: &Oid) -> Result<&VarBind> {
        self.vars
            .iter()
            .find(|vb| &vb.oid == oid)
            .ok_or_else(|| Error::NotFound { oid: oid.clone() })
    }

    /// Get the binding at a position.
    pub fn index(&self, index: usize) -> Result<&VarBind> {
        self.vars.get(index).ok_or(Error::IndexOutOfRange {
            index,
            len: self.vars.len(),
        })
    }

    /// The OID of the first binding.
    pub fn first_oid(&self) -> Result<Oid> {
        self.vars
            .first()
            .map(|vb| vb.oid.clone())
            .ok_or(Error::EmptyVarlist)
    }

    /// The OID of the last binding.
    pub fn last_oid(&self) -> Result<Oid> {
        self.vars
            .last()
            .map(|vb| vb.oid.clone())
            .ok_or(Error::EmptyVarlist)
    }

    /// Get a boolean value (RFC 1212 mapping: 1 = true, 2 = false).
    pub fn get_bool(&self, oid: &Oid) -> Result<bool> {
        let vb = self.at(oid)?;
        vb.value.as_bool().ok_or_else(|| Error::TypeMismatch {
            oid: oid.clone(),
            expected: "boolean",
            actual: vb.value.type_name(),
        })
    }

    /// Get a signed 32-bit integer value.
    pub fn get_int(&self, oid: &Oid) -> Result<i32> {
        let vb = self.at(oid)?;
        vb.value.as_i32().ok_or_else(|| Error::TypeMismatch {
            oid: oid.clone(),
            expected: "integer",
            actual: vb.value.type_name(),
        })
    }

    /// Get a signed 64-bit integer value.
    ///
    /// A plain 32-bit integer widens transparently.
    pub fn get_int64(&self, oid: &Oid) -> Result<i64> {
        let vb = self.at(oid)?;
        vb.value.as_i64().ok_or_else(|| Error::TypeMismatch {
            oid: oid.clone(),
            expected: "integer64",
            actual: vb.value.type_name(),
        })
    }

    /// Get an octet string value as text (lossy UTF-8).
    pub fn get_string(&self, oid: &Oid) -> Result<String> {
        let vb = self.at(oid)?;
        match vb.value.as_bytes() {
            Some(bytes) => Ok(String::from_utf8_lossy(bytes).into_owned()),
            None => Err(Error::TypeMismatch {
                oid: oid.clone(),
                expected: "octet string",
                actual: vb.value.type_name(),
            }),
        }
    }

    /// Get an OID value.
    pub fn get_oid(&self, oid: &Oid) -> Result<Oid> {
        let vb = self.at(oid)?;
        vb.value
            .as_oid()
            .cloned()
            .ok_or_else(|| Error::TypeMismatch {
                oid: oid.clone(),
                expected: "object identifier",
                actual: vb.value.type_name(),
            })
    }

    /// Render the value bound to an OID as display text.
    ///
    /// Covers the simple types only; anything else returns
    /// [`Error::UnsupportedType`].
    pub fn as_display_string(&self, oid: &Oid) -> Result<String> {
        let vb = self.at(oid)?;
        match &vb.value {
            Value::Boolean(_)
            | Value::Integer(_)
            | Value::Integer64(_)
            | Value::OctetString(_)
            | Value::Null
            | Value::ObjectIdentifier(_)
            | Value::TimeTicks(_) => Ok(vb.value.to_string()),
            other => Err(Error::UnsupportedType {
                oid: oid.clone(),
                actual: other.type_name(),
            }),
        }
    }

    pub(crate) fn push(&mut self, vb: VarBind) {
        self.vars.push(vb);
    }
}

impl std::fmt::Display for VarList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "variable list with {} bindings", self.vars.len())?;
        for vb in &self.vars {
            writeln!(f, "\t{} ({})", vb, vb.value.type_name())?;
        }
        Ok(())
    }
}

impl IntoIterator for VarList {
    type Item = VarBind;
    type IntoIter = std::vec::IntoIter<VarBind>;

    fn into_iter(self) -> Self::IntoIter {
        self.vars.into_iter()
    }
}

impl<'a> IntoIterator for &'a VarList {
    type Item = &'a VarBind;
    type IntoIter = std::slice::Iter<'a, VarBind>;

    fn into_iter(self) -> Self::IntoIter {
        self.vars.iter()
    }
}

impl FromIterator<VarBind> for VarList {
    fn from_iter<I: IntoIterator<Item = VarBind>>(iter: I) -> Self {
        Self {
            vars: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oid;
    use bytes::Bytes;

    #[test]
    fn test_add_null_var_rejects_empty_oid() {
        let mut vl = VarList::new();
        assert!(matches!(
            vl.add_null_var(&Oid::empty()),
            Err(Error::InvalidArgument(_))
        ));
        assert!(vl.is_empty());
    }

    #[test]
    fn test_duplicates_preserved_in_order() {
        let mut vl = VarList::new();
        vl.add_null_var(&oid!(1, 3, 6)).unwrap();
        vl.add_null_var(&oid!(1, 3, 5)).unwrap();
        vl.add_null_var(&oid!(1, 3, 6)).unwrap();

        assert_eq!(vl.len(), 3);
        assert_eq!(vl.oids_vec(), vec![oid!(1, 3, 6), oid!(1, 3, 5), oid!(1, 3, 6)]);
        // the set view deduplicates and sorts
        let set = vl.oids_set();
        assert_eq!(set.len(), 2);
        assert_eq!(set.iter().next(), Some(&oid!(1, 3, 5)));
    }

    #[test]
    fn test_add_null_vars_empty_iterator_is_noop() {
        let mut vl = VarList::new();
        let oids: Vec<Oid> = Vec::new();
        vl.add_null_vars(&oids).unwrap();
        assert!(vl.is_empty());
    }

    #[test]
    fn test_add_null_vars_accepts_set_and_vec() {
        let set: BTreeSet<Oid> = [oid!(1, 3, 5), oid!(1, 3, 6)].into_iter().collect();
        let mut vl = VarList::new();
        vl.add_null_vars(&set).unwrap();

        let vec = vec![oid!(1, 3, 7)];
        vl.add_null_vars(&vec).unwrap();
        assert_eq!(vl.len(), 3);
    }

    #[test]
    fn test_at_first_match_wins() {
        let mut vl = VarList::new();
        vl.add_var(&oid!(1, 3), Value::Integer(1)).unwrap();
        vl.add_var(&oid!(1, 3), Value::Integer(2)).unwrap();

        assert_eq!(vl.at(&oid!(1, 3)).unwrap().value, Value::Integer(1));
    }

    #[test]
    fn test_at_not_found() {
        let vl = VarList::new();
        assert!(matches!(
            vl.at(&oid!(1, 3)),
            Err(Error::NotFound { .. })
        ));
    }

    #[test]
    fn test_index_out_of_range() {
        let mut vl = VarList::new();
        vl.add_null_var(&oid!(1, 3)).unwrap();
        assert!(vl.index(0).is_ok());
        assert!(matches!(
            vl.index(1),
            Err(Error::IndexOutOfRange { index: 1, len: 1 })
        ));
    }

    #[test]
    fn test_first_and_last_oid() {
        let vl = VarList::new();
        assert!(matches!(vl.first_oid(), Err(Error::EmptyVarlist)));
        assert!(matches!(vl.last_oid(), Err(Error::EmptyVarlist)));

        let mut vl = VarList::new();
        vl.add_null_var(&oid!(1, 3, 6)).unwrap();
        vl.add_null_var(&oid!(1, 3, 5)).unwrap();
        assert_eq!(vl.first_oid().unwrap(), oid!(1, 3, 6));
        assert_eq!(vl.last_oid().unwrap(), oid!(1, 3, 5));
    }

    #[test]
    fn test_typed_extractors() {
        let mut vl = VarList::new();
        vl.add_var(&oid!(1, 1), Value::Boolean(true)).unwrap();
        vl.add_var(&oid!(1, 2), Value::Integer(-7)).unwrap();
        vl.add_var(&oid!(1, 3), Value::OctetString(Bytes::from_static(b"eth0")))
            .unwrap();
        vl.add_var(&oid!(1, 4), Value::ObjectIdentifier(oid!(1, 3, 6)))
            .unwrap();

        assert!(vl.get_bool(&oid!(1, 1)).unwrap());
        assert_eq!(vl.get_int(&oid!(1, 2)).unwrap(), -7);
        assert_eq!(vl.get_int64(&oid!(1, 2)).unwrap(), -7);
        assert_eq!(vl.get_string(&oid!(1, 3)).unwrap(), "eth0");
        assert_eq!(vl.get_oid(&oid!(1, 4)).unwrap(), oid!(1, 3, 6));

        // wrong type reports both sides
        let err = vl.get_int(&oid!(1, 3)).unwrap_err();
        assert!(matches!(
            err,
            Error::TypeMismatch {
                expected: "integer",
                actual: "octet string",
                ..
            }
        ));
    }

    #[test]
    fn test_as_display_string() {
        let mut vl = VarList::new();
        vl.add_var(&oid!(1, 1), Value::TimeTicks(500)).unwrap();
        vl.add_var(&oid!(1, 2), Value::Null).unwrap();
        vl.add_var(&oid!(1, 3), Value::Gauge32(9)).unwrap();

        assert_eq!(
            vl.as_display_string(&oid!(1, 1)).unwrap(),
            "500 timeticks (1/100 seconds)"
        );
        assert_eq!(vl.as_display_string(&oid!(1, 2)).unwrap(), "");
        assert!(matches!(
            vl.as_display_string(&oid!(1, 3)),
            Err(Error::UnsupportedType { .. })
        ));
    }

    #[test]
    fn test_map_view() {
        let mut vl = VarList::new();
        vl.add_var(&oid!(1, 2), Value::Integer(2)).unwrap();
        vl.add_var(&oid!(1, 1), Value::Integer(1)).unwrap();

        let map = vl.to_map();
        assert_eq!(map.len(), 2);
        assert_eq!(map[&oid!(1, 1)].value, Value::Integer(1));
        // BTreeMap iterates in OID order regardless of insertion order
        assert_eq!(map.keys().next(), Some(&oid!(1, 1)));
    }
}
