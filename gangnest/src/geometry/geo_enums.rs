/// Geometric relation between two entities
#[derive(Clone, Debug, PartialEq, Eq, Copy)]
pub enum GeoRelation {
    Disjoint,
    Intersecting,
    Enclosed,
    Surrounding,
}
