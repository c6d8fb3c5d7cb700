//! Per-axis index wrapping for lattice grids.

/// How an out-of-range index along one axis is mapped back into the grid.
///
/// This controls *index* resolution (point lookups, interpolation corners,
/// wavefront neighbours). It is distinct from a field's boundary policy,
/// which controls what value a differential stencil substitutes for a
/// missing neighbour.
///
/// # Examples
///
/// ```
/// use strata_space::WrapMode;
///
/// assert_eq!(WrapMode::Clamp.apply(-3, 5), 0);
/// assert_eq!(WrapMode::Repeat.apply(-1, 5), 4);
/// assert_eq!(WrapMode::MirrorRepeat.apply(5, 5), 4);
/// assert_eq!(WrapMode::MirrorRepeat.apply(-1, 5), 0);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum WrapMode {
    /// Out-of-range indices snap to the nearest edge cell.
    #[default]
    Clamp,
    /// Indices wrap around to the opposite edge (periodic).
    Repeat,
    /// Indices reflect back and forth across the axis, repeating the edge
    /// cell at each reflection: `0 1 2 | 2 1 0 | 0 1 2`.
    MirrorRepeat,
}

impl WrapMode {
    /// Map `i` into `[0, n)`.
    ///
    /// `n` must be at least 1; grid constructors guarantee this.
    #[inline]
    pub fn apply(self, i: isize, n: usize) -> usize {
        debug_assert!(n > 0, "axis count must be positive");
        let len = n as isize;
        if i >= 0 && i < len {
            return i as usize;
        }
        match self {
            Self::Clamp => i.clamp(0, len - 1) as usize,
            Self::Repeat => i.rem_euclid(len) as usize,
            Self::MirrorRepeat => {
                let m = i.rem_euclid(2 * len);
                if m < len {
                    m as usize
                } else {
                    (2 * len - 1 - m) as usize
                }
            }
        }
    }

    /// Whether this mode connects the two ends of an axis.
    pub fn is_periodic(self) -> bool {
        matches!(self, Self::Repeat)
    }
}

/// Map `i` into `[0, n)` under `mode`. Free-function form of
/// [`WrapMode::apply`].
#[inline]
pub fn wrap(i: isize, n: usize, mode: WrapMode) -> usize {
    mode.apply(i, n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn in_range_is_identity() {
        for mode in [WrapMode::Clamp, WrapMode::Repeat, WrapMode::MirrorRepeat] {
            for i in 0..5 {
                assert_eq!(mode.apply(i, 5), i as usize);
            }
        }
    }

    #[test]
    fn clamp_snaps_to_edges() {
        assert_eq!(wrap(-1, 5, WrapMode::Clamp), 0);
        assert_eq!(wrap(7, 5, WrapMode::Clamp), 4);
        assert_eq!(wrap(isize::MIN, 5, WrapMode::Clamp), 0);
    }

    #[test]
    fn repeat_is_true_modulo() {
        assert_eq!(wrap(-1, 5, WrapMode::Repeat), 4);
        assert_eq!(wrap(5, 5, WrapMode::Repeat), 0);
        assert_eq!(wrap(7, 5, WrapMode::Repeat), 2);
        assert_eq!(wrap(-11, 5, WrapMode::Repeat), 4);
    }

    #[test]
    fn mirror_reflects_with_edge_repeat() {
        let seq: Vec<usize> = (-4..8).map(|i| wrap(i, 3, WrapMode::MirrorRepeat)).collect();
        // i: -4 -3 -2 -1 | 0 1 2 | 3 4 5 | 6 7
        assert_eq!(seq, vec![2, 2, 1, 0, 0, 1, 2, 2, 1, 0, 0, 1]);
    }

    #[test]
    fn single_cell_axis_always_zero() {
        for mode in [WrapMode::Clamp, WrapMode::Repeat, WrapMode::MirrorRepeat] {
            assert_eq!(mode.apply(-7, 1), 0);
            assert_eq!(mode.apply(9, 1), 0);
        }
    }

    #[test]
    fn only_repeat_is_periodic() {
        assert!(WrapMode::Repeat.is_periodic());
        assert!(!WrapMode::Clamp.is_periodic());
        assert!(!WrapMode::MirrorRepeat.is_periodic());
    }

    fn arb_mode() -> impl Strategy<Value = WrapMode> {
        prop_oneof![
            Just(WrapMode::Clamp),
            Just(WrapMode::Repeat),
            Just(WrapMode::MirrorRepeat),
        ]
    }

    proptest! {
        #[test]
        fn result_always_in_range(i in -10_000isize..10_000, n in 1usize..64, mode in arb_mode()) {
            prop_assert!(mode.apply(i, n) < n);
        }

        #[test]
        fn repeat_has_period_n(i in -1000isize..1000, n in 1usize..64) {
            let n_i = n as isize;
            prop_assert_eq!(WrapMode::Repeat.apply(i, n), WrapMode::Repeat.apply(i + n_i, n));
        }

        #[test]
        fn mirror_has_period_2n(i in -1000isize..1000, n in 1usize..64) {
            let n_i = n as isize;
            prop_assert_eq!(
                WrapMode::MirrorRepeat.apply(i, n),
                WrapMode::MirrorRepeat.apply(i + 2 * n_i, n)
            );
        }
    }
}
