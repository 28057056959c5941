/// One upload tier: a pre-sized GPU buffer pair measured in quads.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Tier {
    pub quads: u32,
}

impl Tier {
    #[inline]
    pub const fn vertices(self) -> usize {
        self.quads as usize * 4
    }

    #[inline]
    pub const fn indices(self) -> usize {
        self.quads as usize * 6
    }
}

/// Capacity tiers for batch uploads, doubling from a small minimum up to the
/// batch maximum.
///
/// A flush selects the smallest tier whose vertex *and* index capacity both
/// cover the live counts, so a flush carrying a handful of primitives never
/// re-uploads a maximum-size buffer. The largest tier always equals the batch
/// capacity, so every batch the buffer can hold has a fitting tier.
#[derive(Debug, Clone)]
pub struct TierTable {
    tiers: Vec<Tier>,
}

impl TierTable {
    pub fn new(min_quads: u32, max_quads: u32) -> Self {
        debug_assert!(min_quads > 0 && max_quads >= min_quads);

        let mut tiers = Vec::new();
        let mut quads = min_quads.max(1);
        while quads < max_quads {
            tiers.push(Tier { quads });
            quads = quads.saturating_mul(2);
        }
        tiers.push(Tier { quads: max_quads });

        Self { tiers }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<Tier> {
        self.tiers.get(index).copied()
    }

    #[inline]
    pub fn tiers(&self) -> &[Tier] {
        &self.tiers
    }

    /// Returns the index of the smallest tier covering both counts, or `None`
    /// when no tier fits (a hard internal error in the flush path).
    pub fn select(&self, vertex_count: usize, index_count: usize) -> Option<usize> {
        self.tiers
            .iter()
            .position(|t| t.vertices() >= vertex_count && t.indices() >= index_count)
    }
}
