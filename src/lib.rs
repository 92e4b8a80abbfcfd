//! ID card design engine.
//!
//! This crate is compiled to WebAssembly and runs in the browser. It owns the
//! card being designed: translating raw pointer and keyboard events into
//! element edits, hit-testing elements and their handles, keeping an
//! undo/redo history, drawing the live preview, and exporting the finished
//! card as SVG. The host page only wires DOM events to [`bindings::CardEditor`]
//! and persists the snapshots it hands back.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level engine and testable [`engine::EngineCore`] |
//! | [`doc`] | Card elements and the [`doc::CardDoc`] aggregate |
//! | [`edit`] | Delete, duplicate, layer order, lock, property patches |
//! | [`history`] | Generic undo/redo stack |
//! | [`input`] | Input event types and the gesture state machine |
//! | [`transform`] | Drag / rotate / resize math |
//! | [`hit`] | Hit-testing against elements and handles |
//! | [`geom`] | Points, rotation frames, the card's client rect |
//! | [`template`] | Card size presets and orientation |
//! | [`svg`] | Deterministic SVG export |
//! | [`render`] | Canvas2D preview rendering |
//! | [`bindings`] | `wasm-bindgen` facade |
//! | [`consts`] | Shared numeric constants |

pub mod bindings;
pub mod consts;
pub mod doc;
pub mod edit;
pub mod engine;
pub mod geom;
pub mod history;
pub mod hit;
pub mod input;
pub mod render;
pub mod svg;
pub mod template;
pub mod transform;
