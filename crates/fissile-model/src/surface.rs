//! Surfaces, half-spaces and constructive regions
//!
//! Regions are built the way the engine expresses them: a surface splits
//! space into a negative side (`f(p) < 0`, inside a sphere) and a positive
//! side, and half-spaces combine with `&` (intersection), `|` (union) and `!`
//! (complement).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{BitAnd, BitOr, Not};

/// A point in model coordinates (cm)
pub type Point = [f64; 3];

/// What happens to a particle crossing a surface
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryType {
    #[default]
    Transmission,
    /// Particles crossing the surface are killed
    Vacuum,
    Reflective,
}

impl BoundaryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Transmission => "transmission",
            Self::Vacuum => "vacuum",
            Self::Reflective => "reflective",
        }
    }
}

/// Surface shapes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SurfaceKind {
    /// Sphere centred at `(x0, y0, z0)` with radius `r`
    Sphere { x0: f64, y0: f64, z0: f64, r: f64 },
}

/// A quadric surface with an id and boundary condition
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Surface {
    pub id: u32,
    pub kind: SurfaceKind,
    pub boundary: BoundaryType,
}

impl Surface {
    /// Sphere centred at the origin
    pub fn sphere(id: u32, r: f64) -> Self {
        Self::sphere_at(id, [0.0, 0.0, 0.0], r)
    }

    /// Sphere centred at `center`
    pub fn sphere_at(id: u32, center: Point, r: f64) -> Self {
        Self {
            id,
            kind: SurfaceKind::Sphere {
                x0: center[0],
                y0: center[1],
                z0: center[2],
                r,
            },
            boundary: BoundaryType::Transmission,
        }
    }

    pub fn with_boundary(mut self, boundary: BoundaryType) -> Self {
        self.boundary = boundary;
        self
    }

    /// Signed surface function; negative inside
    pub fn evaluate(&self, p: Point) -> f64 {
        match self.kind {
            SurfaceKind::Sphere { x0, y0, z0, r } => {
                let (dx, dy, dz) = (p[0] - x0, p[1] - y0, p[2] - z0);
                dx * dx + dy * dy + dz * dz - r * r
            }
        }
    }

    /// Negative half-space (`-surface`)
    pub fn inside(&self) -> Region {
        Region::Halfspace(Halfspace {
            surface: *self,
            side: Side::Negative,
        })
    }

    /// Positive half-space (`+surface`)
    pub fn outside(&self) -> Region {
        Region::Halfspace(Halfspace {
            surface: *self,
            side: Side::Positive,
        })
    }

    /// Engine type name and coefficients
    pub(crate) fn type_and_coeffs(&self) -> (&'static str, Vec<f64>) {
        match self.kind {
            SurfaceKind::Sphere { x0, y0, z0, r } => ("sphere", vec![x0, y0, z0, r]),
        }
    }

    pub(crate) fn validate(&self) -> fissile_core::Result<()> {
        match self.kind {
            SurfaceKind::Sphere { x0, y0, z0, r } => {
                if ![x0, y0, z0].iter().all(|c| c.is_finite()) || !(r.is_finite() && r > 0.0) {
                    return Err(fissile_core::Error::Model(format!(
                        "surface {}: sphere needs a finite centre and positive radius",
                        self.id
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Side of a surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Negative,
    Positive,
}

/// One side of a surface
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Halfspace {
    pub surface: Surface,
    pub side: Side,
}

impl Halfspace {
    pub fn contains(&self, p: Point) -> bool {
        let f = self.surface.evaluate(p);
        match self.side {
            Side::Negative => f < 0.0,
            Side::Positive => f > 0.0,
        }
    }
}

/// A region of space built from half-spaces
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    Halfspace(Halfspace),
    Intersection(Vec<Region>),
    Union(Vec<Region>),
    Complement(Box<Region>),
}

impl Region {
    /// Whether `p` lies in the region (points exactly on a surface are outside both sides)
    pub fn contains(&self, p: Point) -> bool {
        match self {
            Self::Halfspace(h) => h.contains(p),
            Self::Intersection(parts) => parts.iter().all(|r| r.contains(p)),
            Self::Union(parts) => parts.iter().any(|r| r.contains(p)),
            Self::Complement(inner) => !inner.contains(p),
        }
    }

    /// Every surface referenced by the region, in first-seen order
    pub fn surfaces(&self) -> Vec<Surface> {
        let mut out = Vec::new();
        self.collect_surfaces(&mut out);
        out
    }

    fn collect_surfaces(&self, out: &mut Vec<Surface>) {
        match self {
            Self::Halfspace(h) => out.push(h.surface),
            Self::Intersection(parts) | Self::Union(parts) => {
                for part in parts {
                    part.collect_surfaces(out);
                }
            }
            Self::Complement(inner) => inner.collect_surfaces(out),
        }
    }
}

impl BitAnd for Region {
    type Output = Region;

    fn bitand(self, rhs: Region) -> Region {
        match self {
            Region::Intersection(mut parts) => {
                parts.push(rhs);
                Region::Intersection(parts)
            }
            lhs => Region::Intersection(vec![lhs, rhs]),
        }
    }
}

impl BitOr for Region {
    type Output = Region;

    fn bitor(self, rhs: Region) -> Region {
        match self {
            Region::Union(mut parts) => {
                parts.push(rhs);
                Region::Union(parts)
            }
            lhs => Region::Union(vec![lhs, rhs]),
        }
    }
}

impl Not for Region {
    type Output = Region;

    fn not(self) -> Region {
        Region::Complement(Box::new(self))
    }
}

/// Engine region syntax: `-1 2`, `(-1 | -2)`, `~(1)`
impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Halfspace(h) => match h.side {
                Side::Negative => write!(f, "-{}", h.surface.id),
                Side::Positive => write!(f, "{}", h.surface.id),
            },
            Self::Intersection(parts) => write_joined(f, parts, " ", false),
            Self::Union(parts) => write_joined(f, parts, " | ", true),
            Self::Complement(inner) => match **inner {
                Region::Union(_) => write!(f, "~{inner}"),
                _ => write!(f, "~({inner})"),
            },
        }
    }
}

fn write_joined(f: &mut fmt::Formatter<'_>, parts: &[Region], sep: &str, parens: bool) -> fmt::Result {
    if parens {
        write!(f, "(")?;
    }
    for (i, part) in parts.iter().enumerate() {
        if i > 0 {
            write!(f, "{sep}")?;
        }
        // Unions nest with their own parentheses; intersections inside unions need them too
        match part {
            Region::Intersection(_) if parens => write!(f, "({part})")?,
            _ => write!(f, "{part}")?,
        }
    }
    if parens {
        write!(f, ")")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sphere_evaluate() {
        let s = Surface::sphere(1, 2.0);
        assert!(s.evaluate([0.0, 0.0, 0.0]) < 0.0);
        assert_eq!(s.evaluate([2.0, 0.0, 0.0]), 0.0);
        assert!(s.evaluate([0.0, 3.0, 0.0]) > 0.0);

        let offset = Surface::sphere_at(2, [0.0, 30.0, 0.0], 5.0);
        assert!(offset.inside().contains([0.0, 28.0, 1.0]));
        assert!(!offset.inside().contains([0.0, 0.0, 0.0]));
    }

    #[test]
    fn test_shell_region() {
        let inner = Surface::sphere(1, 20.0);
        let outer = Surface::sphere(2, 120.0).with_boundary(BoundaryType::Vacuum);
        let shell = inner.outside() & outer.inside();

        assert!(shell.contains([50.0, 0.0, 0.0]));
        assert!(!shell.contains([0.0, 0.0, 0.0]));
        assert!(!shell.contains([0.0, 0.0, 200.0]));
        assert_eq!(shell.to_string(), "1 -2");
        assert_eq!(shell.surfaces().len(), 2);
    }

    #[test]
    fn test_union_and_complement() {
        let a = Surface::sphere_at(3, [0.0, 30.0, 0.0], 5.0);
        let b = Surface::sphere_at(4, [0.0, -30.0, 0.0], 5.0);
        let either = a.inside() | b.inside();
        assert!(either.contains([0.0, -31.0, 0.0]));
        assert!(!either.contains([0.0, 0.0, 0.0]));
        assert_eq!(either.to_string(), "(-3 | -4)");

        let neither = !either.clone();
        assert!(neither.contains([0.0, 0.0, 0.0]));
        assert_eq!(neither.to_string(), "~(-3 | -4)");
        assert_eq!((!a.inside()).to_string(), "~(-3)");
    }

    #[test]
    fn test_intersection_inside_union_is_parenthesised() {
        let a = Surface::sphere(1, 1.0);
        let b = Surface::sphere(2, 2.0);
        let c = Surface::sphere(3, 3.0);
        let region = (a.outside() & b.inside()) | c.outside();
        assert_eq!(region.to_string(), "((1 -2) | 3)");
    }

    #[test]
    fn test_invalid_sphere() {
        assert!(Surface::sphere(1, 0.0).validate().is_err());
        assert!(Surface::sphere_at(1, [f64::NAN, 0.0, 0.0], 1.0).validate().is_err());
        assert!(Surface::sphere(1, 1.0).validate().is_ok());
    }
}
