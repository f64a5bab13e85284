#![warn(clippy::all)]
#![warn(missing_docs)]
#![warn(rustdoc::missing_doc_code_examples)]
#![warn(clippy::missing_docs_in_private_items)]
#![doc = include_str!("../README.md")]

mod animator;
mod board;
mod config;
mod errors;
mod fill;
mod geometry;
mod particles;
mod status;
mod view;

pub use animator::{advance, AnimatorSettings, LevelAnimator};
pub use board::{HoverListener, SiloBoard, SiloId, SiloSnapshot};
pub use config::{BoardConfig, SiloEntry, ViewSettings};
pub use errors::{ConfigError, Dimension, GeometryError, SiloError};
pub use fill::{
    solve_fill, solve_fill_with_inset, total_volume, FillSolid, SolidKind, DEFAULT_RADIUS_INSET,
};
pub use geometry::{
    clamp_percentage, compute_volumes, point, Dimensions, Point, SiloGeometry, Volumes,
};
pub use particles::{Particle, ParticleField, ParticleSettings};
pub use status::{readout, FillStatus, Region, NO_DATA};
pub use view::SiloView;
