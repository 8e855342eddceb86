//! Shared types for the backdrop module service and its RPC clients.

use serde::{Deserialize, Serialize};

// =====================================================
// RPC Request Types
// =====================================================

/// Query for a freshly generated scene
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct SceneQuery {
    /// Seed for reproducible scenes; random when absent
    pub seed: Option<u64>,
    /// Number of shapes (defaults to 15)
    pub shapes: Option<usize>,
    /// Number of connections (defaults to 20)
    pub connections: Option<usize>,
}

// =====================================================
// RPC Response Types
// =====================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct RpcResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T: Serialize> RpcResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(msg.into()),
        }
    }
}

// =====================================================
// Domain Types
// =====================================================

/// A position in percent of the viewport, each axis in [0, 100)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    Square,
    Circle,
    Triangle,
}

/// A drifting geometric shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    pub kind: ShapeKind,
    /// Edge length (square, triangle) or diameter (circle)
    pub size: f64,
    pub color: String,
    pub position: Point,
    /// Opacity the shape fades in to
    pub opacity: f64,
    pub fade_in_ms: u64,
    /// How long the shape rests before moving to a new position
    pub reposition_after_ms: u64,
}

/// A line between two drifting endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    pub start: Point,
    pub end: Point,
    pub stroke: String,
    pub stroke_width: f64,
    pub opacity: f64,
    pub draw_in_ms: u64,
    pub reposition_after_ms: u64,
}

/// The full decorative background
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub connections: Vec<Connection>,
    pub shapes: Vec<Shape>,
}

/// Service health status
#[derive(Debug, Serialize, Deserialize)]
pub struct ServiceStatus {
    pub running: bool,
    pub uptime_secs: u64,
    pub scenes_generated: u64,
}
