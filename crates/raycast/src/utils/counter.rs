use std::fmt::Display;

/// What a ray cast was issued for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RayKind {
    /// Camera ray, one per pixel.
    Primary,
    /// Occlusion probe towards a light.
    Shadow,
    /// Reflected or refracted ray, including the exit search inside a refracting object.
    Secondary,
}

/// Ray cast counters.
///
/// Every worker owns its own counters, they are merged once the image is done,
/// so counting never synchronizes threads.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RayStats {
    pub primary: u64,
    pub shadow: u64,
    pub secondary: u64,
}

impl RayStats {
    pub fn inc(&mut self, kind: RayKind) {
        match kind {
            RayKind::Primary => self.primary += 1,
            RayKind::Shadow => self.shadow += 1,
            RayKind::Secondary => self.secondary += 1,
        }
    }

    pub fn total(&self) -> u64 {
        self.primary + self.shadow + self.secondary
    }

    pub fn merge(lhs: Self, rhs: Self) -> Self {
        Self {
            primary: lhs.primary + rhs.primary,
            shadow: lhs.shadow + rhs.shadow,
            secondary: lhs.secondary + rhs.secondary,
        }
    }

    pub fn report(&self) {
        log::info!(target: "counter_report", "{self}");
    }
}

impl Display for RayStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} rays cast ({} primary, {} shadow, {} secondary)",
            self.total(),
            self.primary,
            self.shadow,
            self.secondary
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{RayKind, RayStats};

    #[test]
    fn counts_by_kind_and_merges() {
        let mut a = RayStats::default();
        a.inc(RayKind::Primary);
        a.inc(RayKind::Shadow);
        a.inc(RayKind::Shadow);

        let mut b = RayStats::default();
        b.inc(RayKind::Secondary);

        let merged = RayStats::merge(a, b);
        assert_eq!(
            merged,
            RayStats {
                primary: 1,
                shadow: 2,
                secondary: 1
            }
        );
        assert_eq!(merged.total(), 4);
        assert_eq!(
            merged.to_string(),
            "4 rays cast (1 primary, 2 shadow, 1 secondary)"
        );
    }
}
