//! The set of addresses the canary swarm is allowed to see.
use std::collections::HashSet;
use std::net::IpAddr;

/// Unifies IPv4-mapped IPv6 addresses (`::ffff:a.b.c.d`) with their IPv4 form.
#[must_use]
pub fn normalize(ip: IpAddr) -> IpAddr {
    match ip {
        IpAddr::V6(v6) => v6.to_ipv4_mapped().map_or(ip, IpAddr::V4),
        IpAddr::V4(_) => ip,
    }
}

/// Addresses considered safe.
///
/// An empty set matches nothing, so every observation fires the canary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpectedAddresses {
    addresses: HashSet<IpAddr>,
}

impl ExpectedAddresses {
    #[must_use]
    pub fn new<I: IntoIterator<Item = IpAddr>>(addresses: I) -> Self {
        Self {
            addresses: addresses.into_iter().map(normalize).collect(),
        }
    }

    #[must_use]
    pub fn contains(&self, ip: &IpAddr) -> bool {
        self.addresses.contains(&normalize(*ip))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.addresses.len()
    }
}
