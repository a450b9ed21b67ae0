//! Per-register cache for configuration-class registers.
//!
//! Only registers the sensor never changes on its own (`ZPOS`, `MPOS`, `MANG`,
//! `CONF`) are cached. Measurement and status registers always go to the bus.

use crate::registers::{REG_CONF, REG_MANG, REG_MPOS, REG_ZPOS};

/// Registers eligible for caching, in slot order.
pub const CACHEABLE_REGISTERS: [u8; 4] = [REG_ZPOS, REG_MPOS, REG_MANG, REG_CONF];

/// Last confirmed raw value of each cacheable register.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RegisterCache {
    entries: [Option<u16>; CACHEABLE_REGISTERS.len()],
}

impl RegisterCache {
    /// Creates an empty cache.
    pub const fn new() -> Self {
        Self {
            entries: [None; CACHEABLE_REGISTERS.len()],
        }
    }

    /// Returns whether `address` belongs to the cacheable set.
    pub fn is_cacheable(address: u8) -> bool {
        Self::slot(address).is_some()
    }

    fn slot(address: u8) -> Option<usize> {
        CACHEABLE_REGISTERS.iter().position(|&reg| reg == address)
    }

    /// Returns the cached raw value of `address`, if any.
    pub fn get(&self, address: u8) -> Option<u16> {
        Self::slot(address).and_then(|slot| self.entries[slot])
    }

    /// Stores `raw` for `address`. Non-cacheable addresses are ignored.
    pub fn put(&mut self, address: u8, raw: u16) {
        if let Some(slot) = Self::slot(address) {
            self.entries[slot] = Some(raw);
        }
    }

    /// Drops the entry for `address`.
    pub fn invalidate(&mut self, address: u8) {
        if let Some(slot) = Self::slot(address) {
            self.entries[slot] = None;
        }
    }

    /// Drops every entry.
    pub fn clear(&mut self) {
        self.entries = [None; CACHEABLE_REGISTERS.len()];
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registers::{REG_ANGLE, REG_STATUS, REG_ZMCO};

    #[test]
    fn put_then_get_returns_value() {
        let mut cache = RegisterCache::new();
        assert_eq!(cache.get(REG_CONF), None);
        cache.put(REG_CONF, 0x1234);
        assert_eq!(cache.get(REG_CONF), Some(0x1234));
        cache.put(REG_CONF, 0x0042);
        assert_eq!(cache.get(REG_CONF), Some(0x0042));
    }

    #[test]
    fn non_cacheable_registers_are_never_stored() {
        let mut cache = RegisterCache::new();
        for reg in [REG_ZMCO, REG_STATUS, REG_ANGLE] {
            cache.put(reg, 0x0FFF);
            assert_eq!(cache.get(reg), None);
            assert!(!RegisterCache::is_cacheable(reg));
        }
    }

    #[test]
    fn invalidate_only_drops_one_entry() {
        let mut cache = RegisterCache::new();
        cache.put(REG_ZPOS, 1);
        cache.put(REG_MPOS, 2);
        cache.invalidate(REG_ZPOS);
        assert_eq!(cache.get(REG_ZPOS), None);
        assert_eq!(cache.get(REG_MPOS), Some(2));

        cache.clear();
        assert_eq!(cache, RegisterCache::new());
    }
}
