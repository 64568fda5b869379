//! Swappable name generators.
//!
//! [`NameGenerator`] is a contract: fields typed `Box<dyn NameGenerator>` can
//! hold any registered implementation, picked in the editor through
//! [`controller`]. [`StandardNameGenerator`] is the default.

use std::any::Any;

use morph_selector::{DrawerConfig, SelectionController};
use morph_variants::{NameStyle, contract};
use rand::RngCore;
use thiserror::Error;

mod render;
mod standard;

pub use render::StandardNameGeneratorRenderer;
pub use standard::{NamePart, StandardNameGenerator};

/// Grammatical gender used to pick name pools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NameGender {
	Masculine,
	Feminine,
	Neutral,
}

impl core::fmt::Display for NameGender {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		match self {
			Self::Masculine => write!(f, "masculine"),
			Self::Feminine => write!(f, "feminine"),
			Self::Neutral => write!(f, "neutral"),
		}
	}
}

/// Which part of a full name a pool supplies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pool {
	Given,
	Middle,
	Family,
}

impl core::fmt::Display for Pool {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		match self {
			Self::Given => write!(f, "given"),
			Self::Middle => write!(f, "middle"),
			Self::Family => write!(f, "family"),
		}
	}
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NameError {
	/// No names are available for the requested part and gender.
	#[error("no {pool} names available for {gender} gender")]
	EmptyPool { pool: Pool, gender: NameGender },
	#[error("invalid name pools: {0}")]
	Parse(String),
}

/// Produces full names.
pub trait NameGenerator: Any {
	fn generate_name(&self, gender: NameGender, rng: &mut dyn RngCore) -> Result<String, NameError>;
}

contract!(NameGenerator);

/// Generates a name using the thread-local RNG.
pub fn generate(generator: &dyn NameGenerator, gender: NameGender) -> Result<String, NameError> {
	generator.generate_name(gender, &mut rand::thread_rng())
}

/// Builds the editor controller for `NameGenerator` fields.
///
/// Menus show `StandardNameGenerator` as `Standard`.
pub fn controller(config: DrawerConfig) -> SelectionController<dyn NameGenerator> {
	SelectionController::builder()
		.renderer::<StandardNameGenerator>(StandardNameGeneratorRenderer)
		.name_style(NameStyle::strip_suffix("NameGenerator"))
		.config(config)
		.build()
}
