//! Static scene geometry: the house walls and the roof.
//!
//! Both meshes are fixed tables generated from named corner positions. The
//! house is an axis-aligned box from y = 0 to y = 2; the roof is a pair of
//! sloped faces meeting at a ridge line at y = 3, overhanging the walls.

use crate::mesh::{StripSegment, Vertex};
use crate::texture::srgb_to_linear;

const WHITE: [f32; 3] = [1.0, 1.0, 1.0];

/// Roof color in sRGB terms. The roof is drawn by the color-only fragment
/// stage, so its appearance comes entirely from the per-vertex color.
const ROOF_SRGB: [f32; 3] = [0.28, 0.22, 0.20];

// House corners. Top of the walls is y = 2, bottom is y = 0.
const HA: [f32; 3] = [-1.0, 2.0, -1.0];
const HB: [f32; 3] = [1.0, 2.0, -1.0];
const HC: [f32; 3] = [-1.0, 0.0, -1.0];
const HD: [f32; 3] = [1.0, 0.0, -1.0];
const HE: [f32; 3] = [-1.0, 2.0, 1.0];
const HF: [f32; 3] = [1.0, 2.0, 1.0];
const HG: [f32; 3] = [-1.0, 0.0, 1.0];
const HH: [f32; 3] = [1.0, 0.0, 1.0];

// Roof corners. RA/RD form the ridge at y = 3; the eaves sit at y = 2 and
// overhang the walls by half a unit on each side.
const RA: [f32; 3] = [0.0, 3.0, -1.5];
const RB: [f32; 3] = [-1.5, 2.0, -1.5];
const RC: [f32; 3] = [1.5, 2.0, -1.5];
const RD: [f32; 3] = [0.0, 3.0, 1.5];
const RE: [f32; 3] = [-1.5, 2.0, 1.5];
const RF: [f32; 3] = [1.5, 2.0, 1.5];

/// House draw partitioning: a 10-vertex wrap-around wall strip, then an
/// 8-vertex strip for the top and bottom caps.
pub const HOUSE_STRIPS: [StripSegment; 2] = [(0, 10), (10, 8)];

/// Roof draw partitioning: one continuous 12-vertex strip.
pub const ROOF_STRIPS: [StripSegment; 1] = [(0, 12)];

/// The 18-vertex house mesh.
///
/// The wall strip wraps around the four vertical faces, doubling corners A
/// and C at the seam; U runs 0 to 4 along the perimeter so the brick
/// texture tiles once per face, with V spanning 0 to 1 bottom-to-top. The
/// cap strip covers the roof-facing and floor-facing faces.
pub fn house_vertices() -> [Vertex; 18] {
    [
        // Walls: A C B D F H E G A C
        Vertex::new(HA, WHITE, [0.0, 1.0]),
        Vertex::new(HC, WHITE, [0.0, 0.0]),
        Vertex::new(HB, WHITE, [1.0, 1.0]),
        Vertex::new(HD, WHITE, [1.0, 0.0]),
        Vertex::new(HF, WHITE, [2.0, 1.0]),
        Vertex::new(HH, WHITE, [2.0, 0.0]),
        Vertex::new(HE, WHITE, [3.0, 1.0]),
        Vertex::new(HG, WHITE, [3.0, 0.0]),
        Vertex::new(HA, WHITE, [4.0, 1.0]),
        Vertex::new(HC, WHITE, [4.0, 0.0]),
        // Caps: E A F B (top), H D G C (bottom)
        Vertex::new(HE, WHITE, [1.0, 3.0]),
        Vertex::new(HA, WHITE, [0.0, 3.0]),
        Vertex::new(HF, WHITE, [1.0, 2.0]),
        Vertex::new(HB, WHITE, [0.0, 2.0]),
        Vertex::new(HH, WHITE, [1.0, 1.0]),
        Vertex::new(HD, WHITE, [0.0, 1.0]),
        Vertex::new(HG, WHITE, [1.0, 0.0]),
        Vertex::new(HC, WHITE, [0.0, 0.0]),
    ]
}

/// The 12-vertex roof mesh, drawn with the color-only fragment stage.
///
/// Two pyramid-face fans expressed as a single strip: the first six
/// vertices cover the gable ends and the flat underside, the remaining six
/// the sloped faces.
pub fn roof_vertices() -> [Vertex; 12] {
    let color = [
        srgb_to_linear(ROOF_SRGB[0]),
        srgb_to_linear(ROOF_SRGB[1]),
        srgb_to_linear(ROOF_SRGB[2]),
    ];
    let v = |position| Vertex::new(position, color, [0.0, 0.0]);
    [
        v(RA),
        v(RB),
        v(RC),
        v(RE),
        v(RF),
        v(RD),
        v(RC),
        v(RF),
        v(RA),
        v(RD),
        v(RB),
        v(RE),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::strips_in_bounds;

    #[test]
    fn house_has_18_vertices_in_two_strips() {
        let vertices = house_vertices();
        assert_eq!(vertices.len(), 18);
        assert_eq!(HOUSE_STRIPS, [(0, 10), (10, 8)]);
        assert!(strips_in_bounds(vertices.len(), &HOUSE_STRIPS));
    }

    #[test]
    fn roof_has_12_vertices_in_one_strip() {
        let vertices = roof_vertices();
        assert_eq!(vertices.len(), 12);
        assert_eq!(ROOF_STRIPS, [(0, 12)]);
        assert!(strips_in_bounds(vertices.len(), &ROOF_STRIPS));
    }

    #[test]
    fn house_is_all_white() {
        assert!(
            house_vertices()
                .iter()
                .all(|v| v.color == [1.0, 1.0, 1.0])
        );
    }

    #[test]
    fn wall_u_runs_zero_to_four() {
        let walls = &house_vertices()[0..10];
        assert_eq!(walls[0].tex_coord[0], 0.0);
        assert_eq!(walls[9].tex_coord[0], 4.0);
        assert!(walls.iter().all(|v| v.tex_coord[1] == 0.0 || v.tex_coord[1] == 1.0));
    }

    #[test]
    fn wall_strip_closes_on_its_seam() {
        let vertices = house_vertices();
        assert_eq!(vertices[0].position, vertices[8].position);
        assert_eq!(vertices[1].position, vertices[9].position);
    }

    #[test]
    fn roof_ridge_is_above_the_walls() {
        let top_of_walls = house_vertices()
            .iter()
            .map(|v| v.position[1])
            .fold(f32::MIN, f32::max);
        let ridge = roof_vertices()
            .iter()
            .map(|v| v.position[1])
            .fold(f32::MIN, f32::max);
        assert!(ridge > top_of_walls);
    }

    #[test]
    fn first_roof_strip_spans_gables_and_underside() {
        // A B C E F D touches both ridge points and all four eaves, so the
        // gable triangles and the underside pair both come from it.
        let first_six = &roof_vertices()[0..6];
        let ridge_hits = first_six.iter().filter(|v| v.position[1] == 3.0).count();
        let eave_hits = first_six.iter().filter(|v| v.position[1] == 2.0).count();
        assert_eq!(ridge_hits, 2);
        assert_eq!(eave_hits, 4);
    }

    #[test]
    fn roof_color_is_visible() {
        assert!(roof_vertices().iter().all(|v| v.color != [0.0, 0.0, 0.0]));
    }
}
