// Library root
// ------------
// This crate exposes the pieces the `langdetect` binary is built from.
//
// Module responsibilities:
// - `config`: secrets file loading and runtime settings.
// - `api`: the Translator `/detect` client and the `Detector` seam.
// - `scorer`: expected-label allow-lists and batch metrics.
// - `batch`: line preparation, batch detection and result export.
// - `ui`: the interactive loop and terminal rendering.
// - `cli`: argument parsing and mode selection.
pub mod api;
pub mod batch;
pub mod cli;
pub mod config;
pub mod scorer;
pub mod ui;
