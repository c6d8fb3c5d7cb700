//! Boundary policies for differential stencils.

/// What a stencil reads when a neighbour falls outside the grid.
///
/// This is distinct from [`WrapMode`](strata_space::WrapMode), which
/// controls index resolution for point lookups and wavefront neighbours.
/// A field's policy can be changed at any time; every operator matches on
/// it once per call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BoundaryPolicy {
    /// The missing neighbour takes the field's boundary value.
    Constant,
    /// The missing neighbour takes the cell's own value (zero gradient
    /// across the edge). Rules that act per direction skip that side.
    #[default]
    Equal,
    /// The missing neighbour is the cell on the opposite edge.
    Periodic,
}

impl BoundaryPolicy {
    /// Whether the policy conserves the sum of a diffused quantity.
    pub fn conserves_mass(self) -> bool {
        !matches!(self, Self::Constant)
    }
}
