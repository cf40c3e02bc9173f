//! # arunsawat
//!
//! A scheduled greeting-card bot: once per invocation it picks a Thai
//! morning greeting and blessing, selects a background photo, composites the
//! text onto the photo at the largest font size that fits, and publishes the
//! result with a caption. There is no service and no durable state — an
//! external scheduler (cron, timer, VM boot script) invokes `arunsawat run`
//! and the process exits.
//!
//! # Architecture: One Linear Pipeline
//!
//! ```text
//! select content → acquire photo → fetch font → choose layout
//!   → fit font size → composite → assemble caption → publish
//! ```
//!
//! Data flows strictly left to right; no stage holds state across runs. All
//! I/O sits behind three collaborator traits ([`sources::ImageSource`],
//! [`sources::FontSource`], [`sources::Publisher`]), so the orchestrator is
//! written once and wired with filesystem adapters in production and mocks in
//! tests.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`date`] | Day-of-week context built once per run from the wall clock |
//! | [`content`] | Greeting/blessing assembly from fixed Thai phrase tables; per-day colors and hashtags |
//! | [`layout`] | Template catalog (centered-stacked, diagonal-corners) and fractional→pixel resolution |
//! | [`fitting`] | Descending font-size search with an explicit floor policy |
//! | [`text`] | `TextRenderer` seam: measurement + glyph rasterization over an owned font buffer |
//! | [`compose`] | Overlay drawing with outline stroke, watermark, alpha compositing, canvas prep |
//! | [`pipeline`] | The orchestrator, generic over the three collaborator traits |
//! | [`sources`] | Collaborator traits plus filesystem-backed adapters |
//! | [`config`] | `config.toml` loading, validation, stock config generation |
//! | [`credentials`] | Flat named-secret bag for remote adapters |
//!
//! # Design Decisions
//!
//! ## The Fitting Contract
//!
//! The central invariant of the whole pipeline: at the chosen font size,
//! every text placement's rendered bounding box lies within the canvas. The
//! search in [`fitting`] shrinks from a starting size in fixed steps and is
//! bounded by an explicit floor — when even the floor does not fit, the
//! outcome says so and the orchestrator aborts the run rather than drawing
//! clipped text or looping forever.
//!
//! ## Overlay Compositing
//!
//! Text is drawn on a transparent overlay and alpha-composited over the photo
//! as the last step, so the base image stays untouched until the layout is
//! final. Every line gets a solid dark outline stroke under its color fill —
//! against arbitrary photo backgrounds the stroke is what keeps the text
//! readable, so it is a hard requirement, not styling.
//!
//! ## Explicit Randomness
//!
//! Every random decision (phrase choice, template choice, image query
//! sampling, font family) draws from a caller-supplied `rand::Rng`. A seeded
//! generator reproduces a run bit-for-bit, which is what the determinism
//! tests rely on; production uses an entropy-seeded generator per run.
//!
//! ## One Font Buffer, Many Sizes
//!
//! The font collaborator is called once per run; the returned bytes are owned
//! by a [`text::FontRenderer`] and re-instantiated at whatever sizes the
//! search probes. No handle rewinding, no re-fetching.

pub mod compose;
pub mod config;
pub mod content;
pub mod credentials;
pub mod date;
pub mod fitting;
pub mod layout;
pub mod pipeline;
pub mod sources;
pub mod text;
