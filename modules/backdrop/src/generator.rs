//! Randomized geometric backdrop.
//!
//! Purely cosmetic: shapes and connecting lines scattered over the viewport,
//! each re-rolling its position after its own rest interval.

use backdrop_types::{Connection, Point, Scene, Shape, ShapeKind};
use rand::Rng;

pub const ACCENT_COLOR: &str = "#4FD1C5";
pub const DEFAULT_SHAPES: usize = 15;
pub const DEFAULT_CONNECTIONS: usize = 20;
/// Upper bound on either element count per request
pub const MAX_ELEMENTS: usize = 200;

const SHAPE_SIZE_MIN: f64 = 10.0;
const SHAPE_SIZE_MAX: f64 = 30.0;
const SHAPE_OPACITY: f64 = 0.7;
const SHAPE_FADE_IN_MS: u64 = 3000;
const CONNECTION_OPACITY: f64 = 0.3;
const CONNECTION_WIDTH: f64 = 1.0;
const CONNECTION_DRAW_IN_MS: u64 = 2000;
const REPOSITION_MIN_MS: u64 = 3000;
const REPOSITION_MAX_MS: u64 = 8000;

pub fn random_point<R: Rng + ?Sized>(rng: &mut R) -> Point {
    Point {
        x: rng.gen_range(0.0..100.0),
        y: rng.gen_range(0.0..100.0),
    }
}

fn reposition_interval<R: Rng + ?Sized>(rng: &mut R) -> u64 {
    rng.gen_range(REPOSITION_MIN_MS..REPOSITION_MAX_MS)
}

pub fn random_shape<R: Rng + ?Sized>(rng: &mut R) -> Shape {
    let kind = match rng.gen_range(0..3) {
        0 => ShapeKind::Square,
        1 => ShapeKind::Circle,
        _ => ShapeKind::Triangle,
    };

    Shape {
        kind,
        size: rng.gen_range(SHAPE_SIZE_MIN..SHAPE_SIZE_MAX),
        color: ACCENT_COLOR.to_string(),
        position: random_point(rng),
        opacity: SHAPE_OPACITY,
        fade_in_ms: SHAPE_FADE_IN_MS,
        reposition_after_ms: reposition_interval(rng),
    }
}

pub fn random_connection<R: Rng + ?Sized>(rng: &mut R) -> Connection {
    Connection {
        start: random_point(rng),
        end: random_point(rng),
        stroke: ACCENT_COLOR.to_string(),
        stroke_width: CONNECTION_WIDTH,
        opacity: CONNECTION_OPACITY,
        draw_in_ms: CONNECTION_DRAW_IN_MS,
        reposition_after_ms: reposition_interval(rng),
    }
}

/// Connections are generated first so shapes render on top of them
pub fn generate_scene<R: Rng + ?Sized>(rng: &mut R, shapes: usize, connections: usize) -> Scene {
    let connections = (0..connections).map(|_| random_connection(rng)).collect();
    let shapes = (0..shapes).map(|_| random_shape(rng)).collect();
    Scene { connections, shapes }
}

/// Move every element to a new random position. Kind, size, colour and
/// rest interval stay fixed for the element's lifetime.
pub fn advance<R: Rng + ?Sized>(rng: &mut R, scene: &mut Scene) {
    for connection in &mut scene.connections {
        connection.start = random_point(rng);
        connection.end = random_point(rng);
    }
    for shape in &mut scene.shapes {
        shape.position = random_point(rng);
    }
}
