//! Processor configuration variants and their serialized forms.
//!
//! Builtin processors form a closed set: each kind carries one serializable
//! configuration shape, decoded from and encoded to a metadata [`Compound`]
//! by the codec registered for its identifier. The concrete placement
//! heuristics belong to the pipeline host; this module owns the configuration
//! contract that lets pipelines be saved, loaded and dispatched without the
//! caller knowing concrete processor kinds.

pub mod registry;

use std::str::FromStr;

use crate::key::{Key, KeyError};
use crate::nbt::{Compound, Value};
use crate::random::RandomScope;


const RARITY: &str = "rarity";
const RANDOM_TYPE: &str = "random_type";
const SEED: &str = "seed";
const TAG: &str = "tag";
const BLACKLIST: &str = "blacklist";
const GRADIENTS: &str = "gradients";
const MOBS: &str = "mobs";
const MOB: &str = "mob";
const WEIGHT: &str = "weight";


/// Error type for processor configuration codecs.
#[derive(thiserror::Error, Debug)]
pub enum CodecError {
    #[error("missing or ill-typed field {0:?}")]
    BadField(&'static str),
    #[error("field {field:?}: {source}")]
    BadKey { field: &'static str, source: KeyError },
    #[error("unknown random scope {0:?}")]
    UnknownScope(String),
    #[error("configuration does not belong to this processor type")]
    Mismatched,
}


fn get_f32(comp: &Compound, field: &'static str) -> Result<f32, CodecError> {
    comp.get_float(field).ok_or(CodecError::BadField(field))
}

fn get_i64(comp: &Compound, field: &'static str) -> Result<i64, CodecError> {
    comp.get_long(field).ok_or(CodecError::BadField(field))
}

fn get_scope(comp: &Compound) -> Result<RandomScope, CodecError> {
    let name = comp.get_string(RANDOM_TYPE).ok_or(CodecError::BadField(RANDOM_TYPE))?;
    RandomScope::from_name(name).ok_or_else(|| CodecError::UnknownScope(name.to_string()))
}

fn parse_key(s: &str, field: &'static str) -> Result<Key, CodecError> {
    Key::from_str(s).map_err(|source| CodecError::BadKey { field, source })
}

fn get_key(comp: &Compound, field: &'static str) -> Result<Key, CodecError> {
    parse_key(comp.get_string(field).ok_or(CodecError::BadField(field))?, field)
}

fn get_keys(comp: &Compound, field: &'static str) -> Result<Vec<Key>, CodecError> {
    comp.get_list(field).ok_or(CodecError::BadField(field))?.iter()
        .map(|value| parse_key(value.as_string().ok_or(CodecError::BadField(field))?, field))
        .collect()
}

/// An absent blacklist reads as empty, every other list field is required.
fn get_blacklist(comp: &Compound) -> Result<Vec<Key>, CodecError> {
    match comp.get(BLACKLIST) {
        None => Ok(Vec::new()),
        Some(_) => get_keys(comp, BLACKLIST),
    }
}

fn keys_value(keys: &[Key]) -> Value {
    Value::List(keys.iter().map(|key| Value::String(key.to_string())).collect())
}


/// Internal macro for configurations with no fields.
macro_rules! unit_config {
    ($(#[$doc:meta])* $name:ident) => {

        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
        pub struct $name;

        impl $name {

            pub fn from_compound(_comp: &Compound) -> Result<Self, CodecError> {
                Ok(Self)
            }

            pub fn to_compound(&self) -> Compound {
                Compound::new()
            }

        }

    };
}

/// Internal macro for purely probabilistic configurations.
macro_rules! rarity_config {
    ($(#[$doc:meta])* $name:ident) => {

        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq)]
        pub struct $name {
            /// Chance in `0..=1` for the transform to hit one entry.
            pub rarity: f32,
            /// Scope the randomness is seeded at.
            pub scope: RandomScope,
            /// Per-processor seed offset.
            pub seed: i64,
        }

        impl $name {

            pub fn from_compound(comp: &Compound) -> Result<Self, CodecError> {
                Ok(Self {
                    rarity: get_f32(comp, RARITY)?,
                    scope: get_scope(comp)?,
                    seed: get_i64(comp, SEED)?,
                })
            }

            pub fn to_compound(&self) -> Compound {
                let mut comp = Compound::new();
                comp.insert(RARITY, self.rarity);
                comp.insert(RANDOM_TYPE, self.scope.name());
                comp.insert(SEED, self.seed);
                comp
            }

        }

    };
}

/// Internal macro for configurations substituting members of one tag.
macro_rules! tag_config {
    ($(#[$doc:meta])* $name:ident) => {

        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq)]
        pub struct $name {
            /// Tag the substituted blocks are sampled from.
            pub tag: Key,
            /// Members of the tag never sampled.
            pub blacklist: Vec<Key>,
            /// Chance in `0..=1` for the transform to hit one entry.
            pub rarity: f32,
            /// Scope the randomness is seeded at.
            pub scope: RandomScope,
            /// Per-processor seed offset.
            pub seed: i64,
        }

        impl $name {

            pub fn from_compound(comp: &Compound) -> Result<Self, CodecError> {
                Ok(Self {
                    tag: get_key(comp, TAG)?,
                    blacklist: get_blacklist(comp)?,
                    rarity: get_f32(comp, RARITY)?,
                    scope: get_scope(comp)?,
                    seed: get_i64(comp, SEED)?,
                })
            }

            pub fn to_compound(&self) -> Compound {
                let mut comp = Compound::new();
                comp.insert(TAG, self.tag.to_string());
                comp.insert(BLACKLIST, keys_value(&self.blacklist));
                comp.insert(RARITY, self.rarity);
                comp.insert(RANDOM_TYPE, self.scope.name());
                comp.insert(SEED, self.seed);
                comp
            }

        }

    };
}


unit_config! {
    /// Keeps the pre-existing world block wherever the template carries plain
    /// air, so placing a structure does not carve air pockets.
    AirRetainerConfig
}

unit_config! {
    /// Drains waterlogged states that ended up with no water neighbor.
    WaterloggingFixConfig
}

unit_config! {
    /// Recomputes fluid flow around entries the pipeline edited.
    WaterflowFixConfig
}

rarity_config! {
    /// Randomly swaps blocks for their mossy counterparts.
    MossifyConfig
}

rarity_config! {
    /// Scatters lily pads on water surfaces inside the piece.
    LilyPadConfig
}

rarity_config! {
    /// Lays snow on upward faces left exposed to the sky.
    SnowConfig
}

rarity_config! {
    /// Grows vines down from exposed solid faces.
    VineConfig
}

tag_config! {
    /// Hangs decorations sampled from the tag under face-occluding ceilings.
    CeilingAttachmentConfig
}

tag_config! {
    /// Plants mushrooms sampled from the tag on free solid floors.
    MushroomConfig
}

tag_config! {
    /// Fills flower pot entries with random potted plants from the tag.
    FlowerPotConfig
}

/// Replaces blocks with members of successive tags, favoring the earlier
/// ones, producing a weathering gradient across the piece.
#[derive(Debug, Clone, PartialEq)]
pub struct GradientReplaceConfig {
    /// Tags to substitute from, ordered from the gradient's start to its end.
    pub gradients: Vec<Key>,
    /// Members never substituted in.
    pub blacklist: Vec<Key>,
    /// Scope the randomness is seeded at.
    pub scope: RandomScope,
    /// Per-processor seed offset.
    pub seed: i64,
}

impl GradientReplaceConfig {

    pub fn from_compound(comp: &Compound) -> Result<Self, CodecError> {
        Ok(Self {
            gradients: get_keys(comp, GRADIENTS)?,
            blacklist: get_blacklist(comp)?,
            scope: get_scope(comp)?,
            seed: get_i64(comp, SEED)?,
        })
    }

    pub fn to_compound(&self) -> Compound {
        let mut comp = Compound::new();
        comp.insert(GRADIENTS, keys_value(&self.gradients));
        comp.insert(BLACKLIST, keys_value(&self.blacklist));
        comp.insert(RANDOM_TYPE, self.scope.name());
        comp.insert(SEED, self.seed);
        comp
    }

}

/// One weighted spawn candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct MobWeight {
    pub mob: Key,
    pub weight: i32,
}

/// Rerolls the mob spawned by spawner entries from a weighted candidate list.
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnerRandomizerConfig {
    /// Weighted candidates, at least one.
    pub mobs: Vec<MobWeight>,
    /// Scope the randomness is seeded at.
    pub scope: RandomScope,
    /// Per-processor seed offset.
    pub seed: i64,
}

impl SpawnerRandomizerConfig {

    pub fn from_compound(comp: &Compound) -> Result<Self, CodecError> {

        let mobs = comp.get_list(MOBS).ok_or(CodecError::BadField(MOBS))?.iter()
            .map(|value| {
                let entry = value.as_compound().ok_or(CodecError::BadField(MOBS))?;
                Ok(MobWeight {
                    mob: get_key(entry, MOB)?,
                    weight: entry.get_int(WEIGHT).ok_or(CodecError::BadField(WEIGHT))?,
                })
            })
            .collect::<Result<Vec<_>, CodecError>>()?;

        if mobs.is_empty() {
            return Err(CodecError::BadField(MOBS));
        }

        Ok(Self {
            mobs,
            scope: get_scope(comp)?,
            seed: get_i64(comp, SEED)?,
        })

    }

    pub fn to_compound(&self) -> Compound {

        let mobs = self.mobs.iter()
            .map(|entry| {
                let mut comp = Compound::new();
                comp.insert(MOB, entry.mob.to_string());
                comp.insert(WEIGHT, entry.weight);
                Value::Compound(comp)
            })
            .collect::<Vec<_>>();

        let mut comp = Compound::new();
        comp.insert(MOBS, mobs);
        comp.insert(RANDOM_TYPE, self.scope.name());
        comp.insert(SEED, self.seed);
        comp

    }

}


/// Configuration of one builtin processor, as stored in a processor pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum ProcessorConfig {
    AirRetainer(AirRetainerConfig),
    Mossify(MossifyConfig),
    GradientReplace(GradientReplaceConfig),
    SpawnerRandomizer(SpawnerRandomizerConfig),
    CeilingAttachment(CeilingAttachmentConfig),
    LilyPads(LilyPadConfig),
    Mushrooms(MushroomConfig),
    Snow(SnowConfig),
    Vines(VineConfig),
    FlowerPots(FlowerPotConfig),
    WaterloggingFix(WaterloggingFixConfig),
    WaterflowFix(WaterflowFixConfig),
}

impl ProcessorConfig {

    /// Path of the identifier this configuration is registered under.
    pub fn name(&self) -> &'static str {
        match self {
            Self::AirRetainer(_) => "air_retainer",
            Self::Mossify(_) => "block_mossify",
            Self::GradientReplace(_) => "gradient_replace",
            Self::SpawnerRandomizer(_) => "spawner_randomizer",
            Self::CeilingAttachment(_) => "ceiling_attachment",
            Self::LilyPads(_) => "lily_pads",
            Self::Mushrooms(_) => "mushrooms",
            Self::Snow(_) => "snow",
            Self::Vines(_) => "vines",
            Self::FlowerPots(_) => "flower_pots",
            Self::WaterloggingFix(_) => "waterlogging_fix",
            Self::WaterflowFix(_) => "waterflow_fix",
        }
    }

    /// Identifier this configuration decodes from and encodes under.
    pub fn key(&self) -> Key {
        Key::builtin(self.name())
    }

    /// Encode this configuration to its serialized form.
    pub fn to_compound(&self) -> Compound {
        match self {
            Self::AirRetainer(c) => c.to_compound(),
            Self::Mossify(c) => c.to_compound(),
            Self::GradientReplace(c) => c.to_compound(),
            Self::SpawnerRandomizer(c) => c.to_compound(),
            Self::CeilingAttachment(c) => c.to_compound(),
            Self::LilyPads(c) => c.to_compound(),
            Self::Mushrooms(c) => c.to_compound(),
            Self::Snow(c) => c.to_compound(),
            Self::Vines(c) => c.to_compound(),
            Self::FlowerPots(c) => c.to_compound(),
            Self::WaterloggingFix(c) => c.to_compound(),
            Self::WaterflowFix(c) => c.to_compound(),
        }
    }

}
