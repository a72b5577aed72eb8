//! Process-wide registry of processor types.
//!
//! Registration runs once during start-up, strictly before any lookup; the
//! registry is then sealed and only ever read. The seal is a hard phase flag:
//! registering after it, registering a duplicate identifier, or looking up
//! before it are programming errors and abort immediately, while looking up
//! an identifier that was never registered is a reported configuration error.

use std::sync::RwLock;

use once_cell::sync::Lazy;
use indexmap::IndexMap;
use indexmap::map::Entry;

use tracing::debug;

use crate::nbt::Compound;
use crate::key::Key;

use super::{
    AirRetainerConfig, CeilingAttachmentConfig, CodecError, FlowerPotConfig,
    GradientReplaceConfig, LilyPadConfig, MossifyConfig, MushroomConfig,
    ProcessorConfig, SnowConfig, SpawnerRandomizerConfig, VineConfig,
    WaterflowFixConfig, WaterloggingFixConfig,
};


/// Serialization codec of one processor type: decodes its configuration from
/// a compound and encodes a matching configuration back.
#[derive(Debug)]
pub struct ProcessorCodec {
    pub decode: fn(&Compound) -> Result<ProcessorConfig, CodecError>,
    pub encode: fn(&ProcessorConfig) -> Result<Compound, CodecError>,
}

/// Internal macro tying a configuration type to its enum variant.
macro_rules! codec {
    ($variant:ident, $config:ty) => {
        ProcessorCodec {
            decode: |comp| <$config>::from_compound(comp).map(ProcessorConfig::$variant),
            encode: |config| match config {
                ProcessorConfig::$variant(config) => Ok(config.to_compound()),
                _ => Err(CodecError::Mismatched),
            },
        }
    };
}


/// An append-only table of processor types. Rows are never removed nor
/// overwritten for the lifetime of the process.
#[derive(Default)]
pub struct Registry {
    sealed: bool,
    entries: IndexMap<Key, ProcessorCodec>,
}

impl Registry {

    pub fn new() -> Self {
        Self { sealed: false, entries: IndexMap::new() }
    }

    /// Register a processor type. Registering a duplicate identifier or
    /// registering once the registry is sealed panics: both are start-up
    /// programming errors that must surface immediately.
    pub fn register(&mut self, key: Key, codec: ProcessorCodec) {

        assert!(!self.sealed, "processor type {key} registered after the registry was sealed");

        match self.entries.entry(key) {
            Entry::Occupied(e) => panic!("duplicate processor type {}", e.key()),
            Entry::Vacant(e) => {
                debug!("registered processor type {}", e.key());
                e.insert(codec);
            }
        }

    }

    /// End the registration phase. Lookups are only legal afterwards.
    pub fn seal(&mut self) {
        self.sealed = true;
    }

    #[inline]
    pub fn is_sealed(&self) -> bool {
        self.sealed
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered identifiers, in registration order.
    pub fn keys(&self) -> impl Iterator<Item = &Key> {
        self.entries.keys()
    }

    /// Find the codec registered for an identifier. Panics when called before
    /// the registry is sealed; an unknown identifier is a reported
    /// configuration error.
    pub fn lookup(&self, key: &Key) -> Result<&ProcessorCodec, RegistryError> {
        assert!(self.sealed, "processor type {key} looked up before registration completed");
        self.entries.get(key).ok_or_else(|| RegistryError::Unknown { key: key.clone() })
    }

    /// Decode a processor configuration through the codec registered for the
    /// identifier.
    pub fn decode(&self, key: &Key, data: &Compound) -> Result<ProcessorConfig, RegistryError> {
        Ok((self.lookup(key)?.decode)(data)?)
    }

    /// Encode a processor configuration through the codec registered for its
    /// own identifier, returning the identifier alongside the data.
    pub fn encode(&self, config: &ProcessorConfig) -> Result<(Key, Compound), RegistryError> {
        let key = config.key();
        let data = (self.lookup(&key)?.encode)(config)?;
        Ok((key, data))
    }

    /// Fill in every builtin processor type. Call order is insertion order
    /// and otherwise immaterial.
    pub fn register_builtins(&mut self) {
        // Replacers
        self.register(Key::builtin("air_retainer"), codec!(AirRetainer, AirRetainerConfig));
        self.register(Key::builtin("block_mossify"), codec!(Mossify, MossifyConfig));
        self.register(Key::builtin("gradient_replace"), codec!(GradientReplace, GradientReplaceConfig));
        self.register(Key::builtin("spawner_randomizer"), codec!(SpawnerRandomizer, SpawnerRandomizerConfig));
        // Adders
        self.register(Key::builtin("ceiling_attachment"), codec!(CeilingAttachment, CeilingAttachmentConfig));
        self.register(Key::builtin("lily_pads"), codec!(LilyPads, LilyPadConfig));
        self.register(Key::builtin("mushrooms"), codec!(Mushrooms, MushroomConfig));
        self.register(Key::builtin("snow"), codec!(Snow, SnowConfig));
        self.register(Key::builtin("vines"), codec!(Vines, VineConfig));
        // Decorators
        self.register(Key::builtin("flower_pots"), codec!(FlowerPots, FlowerPotConfig));
        // Fixers
        self.register(Key::builtin("waterlogging_fix"), codec!(WaterloggingFix, WaterloggingFixConfig));
        self.register(Key::builtin("waterflow_fix"), codec!(WaterflowFix, WaterflowFixConfig));
    }

}


static GLOBAL: Lazy<RwLock<Registry>> = Lazy::new(|| RwLock::new(Registry::new()));

/// Register every builtin processor type into the process-wide registry and
/// seal it. Must run exactly once, before any structure is generated; a
/// second call is a duplicate registration and panics.
pub fn init() {
    let mut registry = GLOBAL.write().unwrap();
    registry.register_builtins();
    registry.seal();
}

/// Decode a processor configuration through the process-wide registry.
pub fn decode_processor(key: &Key, data: &Compound) -> Result<ProcessorConfig, RegistryError> {
    GLOBAL.read().unwrap().decode(key, data)
}

/// Encode a processor configuration through the process-wide registry.
pub fn encode_processor(config: &ProcessorConfig) -> Result<(Key, Compound), RegistryError> {
    GLOBAL.read().unwrap().encode(config)
}


/// Error type for sealed-registry lookups.
#[derive(thiserror::Error, Debug)]
pub enum RegistryError {
    #[error("unknown processor type {key}")]
    Unknown { key: Key },
    #[error(transparent)]
    Codec(#[from] CodecError),
}


#[cfg(test)]
mod tests {

    use crate::random::RandomScope;
    use super::*;

    fn sealed() -> Registry {
        let mut registry = Registry::new();
        registry.register_builtins();
        registry.seal();
        registry
    }

    #[test]
    fn builtins_register_and_look_up() {
        let registry = sealed();
        assert_eq!(registry.len(), 12);
        for path in ["air_retainer", "block_mossify", "gradient_replace", "spawner_randomizer",
                     "ceiling_attachment", "lily_pads", "mushrooms", "snow", "vines",
                     "flower_pots", "waterlogging_fix", "waterflow_fix"] {
            assert!(registry.lookup(&Key::builtin(path)).is_ok(), "{path}");
        }
    }

    #[test]
    fn unknown_lookup_is_a_configuration_error() {
        let registry = sealed();
        let err = registry.lookup(&Key::builtin("icicles")).unwrap_err();
        assert!(matches!(err, RegistryError::Unknown { .. }));
    }

    #[test]
    #[should_panic(expected = "duplicate processor type")]
    fn duplicate_registration_is_fatal() {
        let mut registry = Registry::new();
        registry.register(Key::builtin("vines"), codec!(Vines, VineConfig));
        registry.register(Key::builtin("vines"), codec!(Vines, VineConfig));
    }

    #[test]
    #[should_panic(expected = "after the registry was sealed")]
    fn late_registration_is_fatal() {
        let mut registry = sealed();
        registry.register(Key::builtin("icicles"), codec!(Vines, VineConfig));
    }

    #[test]
    #[should_panic(expected = "before registration completed")]
    fn early_lookup_is_fatal() {
        let mut registry = Registry::new();
        registry.register_builtins();
        let _ = registry.lookup(&Key::builtin("vines"));
    }

    #[test]
    fn encode_rejects_a_foreign_configuration() {
        let registry = sealed();
        let config = ProcessorConfig::Vines(VineConfig { rarity: 0.3, scope: RandomScope::Block, seed: 3 });
        // Encoding through the right codec works, a mismatched codec refuses.
        assert!(registry.encode(&config).is_ok());
        let codec = registry.lookup(&Key::builtin("snow")).unwrap();
        assert!(matches!((codec.encode)(&config), Err(CodecError::Mismatched)));
    }

    #[test]
    fn global_pipeline_saves_and_loads() {

        init();

        let config = ProcessorConfig::Mushrooms(MushroomConfig {
            tag: Key::new("core", "mushrooms"),
            blacklist: vec![Key::new("core", "warped_fungus")],
            rarity: 0.2,
            scope: RandomScope::Block,
            seed: 17,
        });

        // Encode, push through the binary form, decode back.
        let (key, data) = encode_processor(&config).unwrap();
        let mut buf = Vec::new();
        crate::nbt::to_writer(&mut buf, &data).unwrap();
        let data = crate::nbt::from_reader(&buf[..]).unwrap();
        let back = decode_processor(&key, &data).unwrap();
        assert_eq!(back, config);

    }

}
