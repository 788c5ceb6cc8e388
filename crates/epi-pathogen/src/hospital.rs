//! Bed accounting for the "treated" flag.

/// A city-wide pool of hospital beds.
///
/// A host whose hospitalisation roll succeeds is treated only if a bed is
/// free; the bed is held until the host's infection resolves.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Hospital {
    /// `None` = unlimited.
    capacity: Option<u32>,
    occupied: u32,
}

impl Hospital {
    pub fn new(capacity: Option<u32>) -> Self {
        Self { capacity, occupied: 0 }
    }

    pub fn unlimited() -> Self {
        Self::new(None)
    }

    /// Claim a bed.  Returns `false` when the hospital is full.
    ///
    /// Warns when the last free bed is taken, not on every refusal.
    pub fn try_admit(&mut self) -> bool {
        match self.capacity {
            Some(cap) if self.occupied >= cap => {
                log::debug!("hospital full ({cap} beds); admission refused");
                false
            }
            capacity => {
                self.occupied += 1;
                if capacity == Some(self.occupied) {
                    log::warn!("hospital now full: all {} beds occupied", self.occupied);
                }
                true
            }
        }
    }

    /// Release a bed.
    pub fn discharge(&mut self) {
        self.occupied = self.occupied.saturating_sub(1);
    }

    #[inline]
    pub fn occupied(&self) -> u32 {
        self.occupied
    }

    #[inline]
    pub fn capacity(&self) -> Option<u32> {
        self.capacity
    }

    /// Beds still free; `None` when unlimited.
    pub fn available(&self) -> Option<u32> {
        self.capacity.map(|cap| cap.saturating_sub(self.occupied))
    }
}
