//! Interaction engine for a virtual corkboard.
//!
//! Notes are rectangles on a surface. They can be selected, dragged as a
//! group inside the surface bounds, resized from eight handles, and joined
//! by styled "twine" connections between their pins. The engine never
//! renders: the host feeds it pointer and key events and draws whatever
//! [`action::Action`]s come back.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`board`] | Top-level engine composing every other module |
//! | [`note`] | Notes, per-note config, the z-order counter, and the note store |
//! | [`drag`] | Group drag clamping |
//! | [`resize`] | Resize handles and minimum-size enforcement |
//! | [`graph`] | Pins, connections, rendered lines, connect gesture, connection selection |
//! | [`scheduler`] | Coalescing endpoint-update scheduler and its tick source |
//! | [`mediator`] | Keeps note and connection selection mutually exclusive |
//! | [`surface`] | Host surface boundary (extent and coordinate transform) |
//! | [`input`] | Modifier keys, buttons, keys, and drag session state |
//! | [`bridge`] | Newline-delimited JSON host protocol |
//! | [`action`] | Render actions returned to the host |
//! | [`style`] | Connection style and textures |
//! | [`config`] | Environment-driven board configuration |
//! | [`error`] | Board error type |
//! | [`geometry`] | Points, sizes, rectangles |
//! | [`ids`] | Typed entity ids |
//! | [`consts`] | Shared defaults (sizes, colors, timing) |

pub mod action;
pub mod board;
pub mod bridge;
pub mod config;
pub mod consts;
pub mod drag;
pub mod error;
pub mod geometry;
pub mod graph;
pub mod ids;
pub mod input;
pub mod mediator;
pub mod note;
pub mod resize;
pub mod scheduler;
pub mod style;
pub mod surface;
