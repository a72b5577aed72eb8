//! Typed metadata compounds attached to template block entries, and their
//! big-endian binary form.
//!
//! A [`Compound`] is both the auxiliary metadata carried by a block entry and
//! the structured serialized form that processor configuration codecs encode
//! to, so a saved processor pipeline is just a sequence of compounds.

use std::io::{self, Read, Write};

use byteorder::{ReadBytesExt, WriteBytesExt, BE};
use indexmap::IndexMap;


const TAG_BYTE: i8 = 1;
const TAG_SHORT: i8 = 2;
const TAG_INT: i8 = 3;
const TAG_LONG: i8 = 4;
const TAG_FLOAT: i8 = 5;
const TAG_DOUBLE: i8 = 6;
const TAG_BYTE_ARRAY: i8 = 7;
const TAG_STRING: i8 = 8;
const TAG_LIST: i8 = 9;
const TAG_COMPOUND: i8 = 10;


/// A single typed metadata value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    ByteArray(Vec<u8>),
    String(String),
    /// A homogeneous list; writing a mixed list is an error.
    List(Vec<Value>),
    Compound(Compound),
}

/// A string-keyed mapping of typed values, iterated in insertion order so that
/// the binary form of a given compound is deterministic.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Compound {
    inner: IndexMap<String, Value>,
}


impl Value {

    fn type_id(&self) -> i8 {
        match self {
            Value::Byte(_) => TAG_BYTE,
            Value::Short(_) => TAG_SHORT,
            Value::Int(_) => TAG_INT,
            Value::Long(_) => TAG_LONG,
            Value::Float(_) => TAG_FLOAT,
            Value::Double(_) => TAG_DOUBLE,
            Value::ByteArray(_) => TAG_BYTE_ARRAY,
            Value::String(_) => TAG_STRING,
            Value::List(_) => TAG_LIST,
            Value::Compound(_) => TAG_COMPOUND,
        }
    }

    #[inline]
    pub fn as_boolean(&self) -> Option<bool> {
        self.as_byte().map(|b| b != 0)
    }

    #[inline]
    pub fn as_byte(&self) -> Option<i8> {
        match *self {
            Self::Byte(n) => Some(n),
            _ => None,
        }
    }

    #[inline]
    pub fn as_int(&self) -> Option<i32> {
        match *self {
            Self::Int(n) => Some(n),
            _ => None,
        }
    }

    #[inline]
    pub fn as_long(&self) -> Option<i64> {
        match *self {
            Self::Long(n) => Some(n),
            _ => None,
        }
    }

    #[inline]
    pub fn as_float(&self) -> Option<f32> {
        match *self {
            Self::Float(n) => Some(n),
            _ => None,
        }
    }

    #[inline]
    pub fn as_double(&self) -> Option<f64> {
        match *self {
            Self::Double(n) => Some(n),
            _ => None,
        }
    }

    #[inline]
    pub fn as_string(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    #[inline]
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(list) => Some(&list[..]),
            _ => None,
        }
    }

    #[inline]
    pub fn as_compound(&self) -> Option<&Compound> {
        match self {
            Self::Compound(comp) => Some(comp),
            _ => None,
        }
    }

}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Byte(value as i8)
    }
}

impl From<i8> for Value {
    fn from(value: i8) -> Self {
        Self::Byte(value)
    }
}

impl From<i16> for Value {
    fn from(value: i16) -> Self {
        Self::Short(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Int(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Long(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Self::Float(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Double(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Self::List(value)
    }
}

impl From<Compound> for Value {
    fn from(value: Compound) -> Self {
        Self::Compound(value)
    }
}


impl Compound {

    pub fn new() -> Self {
        Self { inner: IndexMap::new() }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Insert a value, replacing any previous value under the same key.
    #[inline]
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.inner.insert(key.into(), value.into());
    }

    #[inline]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.inner.get(key)
    }

    #[inline]
    pub fn get_boolean(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(Value::as_boolean)
    }

    #[inline]
    pub fn get_int(&self, key: &str) -> Option<i32> {
        self.get(key).and_then(Value::as_int)
    }

    #[inline]
    pub fn get_long(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(Value::as_long)
    }

    #[inline]
    pub fn get_float(&self, key: &str) -> Option<f32> {
        self.get(key).and_then(Value::as_float)
    }

    #[inline]
    pub fn get_double(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(Value::as_double)
    }

    #[inline]
    pub fn get_string(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_string)
    }

    #[inline]
    pub fn get_list(&self, key: &str) -> Option<&[Value]> {
        self.get(key).and_then(Value::as_list)
    }

    #[inline]
    pub fn get_compound(&self, key: &str) -> Option<&Compound> {
        self.get(key).and_then(Value::as_compound)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.inner.iter().map(|(key, value)| (key.as_str(), value))
    }

}


/// Deserialize a compound from its binary form. The root tag must be a
/// compound; its name is read and discarded.
pub fn from_reader(mut reader: impl Read) -> Result<Compound, NbtError> {

    let type_id = reader.read_i8()?;
    if type_id != TAG_COMPOUND {
        return Err(NbtError::IllegalTagType(type_id));
    }

    let _name = read_string(&mut reader)?;
    read_compound(&mut reader)

}

/// Serialize a compound into its binary form, as an unnamed root tag.
pub fn to_writer(mut writer: impl Write, compound: &Compound) -> Result<(), NbtError> {
    writer.write_i8(TAG_COMPOUND)?;
    write_string(&mut writer, "")?;
    write_compound(&mut writer, compound)
}

fn read_value(reader: &mut impl Read, type_id: i8) -> Result<Value, NbtError> {
    Ok(match type_id {
        TAG_BYTE => Value::Byte(reader.read_i8()?),
        TAG_SHORT => Value::Short(reader.read_i16::<BE>()?),
        TAG_INT => Value::Int(reader.read_i32::<BE>()?),
        TAG_LONG => Value::Long(reader.read_i64::<BE>()?),
        TAG_FLOAT => Value::Float(reader.read_f32::<BE>()?),
        TAG_DOUBLE => Value::Double(reader.read_f64::<BE>()?),
        TAG_BYTE_ARRAY => {
            let len = read_len(reader)?;
            let mut buf = vec![0u8; len];
            reader.read_exact(&mut buf)?;
            Value::ByteArray(buf)
        }
        TAG_STRING => Value::String(read_string(reader)?),
        TAG_LIST => {
            let item_type_id = reader.read_i8()?;
            let len = read_len(reader)?;
            let mut list = Vec::with_capacity(len);
            for _ in 0..len {
                list.push(read_value(reader, item_type_id)?);
            }
            Value::List(list)
        }
        TAG_COMPOUND => Value::Compound(read_compound(reader)?),
        _ => return Err(NbtError::IllegalTagType(type_id)),
    })
}

fn read_compound(reader: &mut impl Read) -> Result<Compound, NbtError> {

    let mut compound = Compound::new();

    loop {

        let type_id = reader.read_i8()?;
        if type_id == 0 {
            break Ok(compound);  // End tag.
        }

        let key = read_string(reader)?;
        compound.insert(key, read_value(reader, type_id)?);

    }

}

fn read_string(reader: &mut impl Read) -> Result<String, NbtError> {
    let len = reader.read_u16::<BE>()? as usize;
    let mut buf = vec![0u8; len];
    reader.read_exact(&mut buf)?;
    String::from_utf8(buf).map_err(|_| NbtError::IllegalString)
}

fn read_len(reader: &mut impl Read) -> Result<usize, NbtError> {
    reader.read_i32::<BE>()?.try_into().map_err(|_| NbtError::IllegalLength)
}

fn write_value(writer: &mut impl Write, value: &Value) -> Result<(), NbtError> {
    match *value {
        Value::Byte(n) => writer.write_i8(n)?,
        Value::Short(n) => writer.write_i16::<BE>(n)?,
        Value::Int(n) => writer.write_i32::<BE>(n)?,
        Value::Long(n) => writer.write_i64::<BE>(n)?,
        Value::Float(n) => writer.write_f32::<BE>(n)?,
        Value::Double(n) => writer.write_f64::<BE>(n)?,
        Value::ByteArray(ref buf) => {
            write_len(writer, buf.len())?;
            writer.write_all(buf)?;
        }
        Value::String(ref s) => write_string(writer, s)?,
        Value::List(ref list) => {
            // An empty list carries the end tag as its item type.
            let item_type_id = list.first().map(Value::type_id).unwrap_or(0);
            if list.iter().any(|item| item.type_id() != item_type_id) {
                return Err(NbtError::MixedList);
            }
            writer.write_i8(item_type_id)?;
            write_len(writer, list.len())?;
            for item in list {
                write_value(writer, item)?;
            }
        }
        Value::Compound(ref compound) => write_compound(writer, compound)?,
    }
    Ok(())
}

fn write_compound(writer: &mut impl Write, compound: &Compound) -> Result<(), NbtError> {

    for (key, value) in compound.iter() {
        writer.write_i8(value.type_id())?;
        write_string(writer, key)?;
        write_value(writer, value)?;
    }

    writer.write_i8(0)?;
    Ok(())

}

fn write_string(writer: &mut impl Write, s: &str) -> Result<(), NbtError> {
    let len: u16 = s.len().try_into().map_err(|_| NbtError::IllegalLength)?;
    writer.write_u16::<BE>(len)?;
    writer.write_all(s.as_bytes())?;
    Ok(())
}

fn write_len(writer: &mut impl Write, len: usize) -> Result<(), NbtError> {
    let len: i32 = len.try_into().map_err(|_| NbtError::IllegalLength)?;
    writer.write_i32::<BE>(len)?;
    Ok(())
}


/// Error type for the binary compound form.
#[derive(thiserror::Error, Debug)]
pub enum NbtError {
    #[error("{0}")]
    Io(#[from] io::Error),
    #[error("illegal tag type {0}")]
    IllegalTagType(i8),
    #[error("illegal decoded length")]
    IllegalLength,
    #[error("string is not valid utf-8")]
    IllegalString,
    #[error("list values must share a single type")]
    MixedList,
}


#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn typed_accessors() {

        let mut comp = Compound::new();
        comp.insert("rarity", 0.25f32);
        comp.insert("seed", 164567i64);
        comp.insert("tag", "core:mossy");
        comp.insert("waterlogged", true);

        assert_eq!(comp.get_float("rarity"), Some(0.25));
        assert_eq!(comp.get_long("seed"), Some(164567));
        assert_eq!(comp.get_string("tag"), Some("core:mossy"));
        assert_eq!(comp.get_boolean("waterlogged"), Some(true));
        // Wrong type and missing key both read as absent.
        assert_eq!(comp.get_long("rarity"), None);
        assert_eq!(comp.get_float("missing"), None);

    }

    #[test]
    fn binary_form_round_trips() {

        let mut inner = Compound::new();
        inner.insert("mob", "core:spider");
        inner.insert("weight", 3i32);

        let mut comp = Compound::new();
        comp.insert("final_state", "core:cave_air");
        comp.insert("rarity", 0.5f32);
        comp.insert("mobs", vec![Value::Compound(inner)]);
        comp.insert("raw", Value::ByteArray(vec![1, 2, 3]));

        let mut buf = Vec::new();
        to_writer(&mut buf, &comp).unwrap();
        let back = from_reader(&buf[..]).unwrap();
        assert_eq!(back, comp);

    }

    #[test]
    fn mixed_list_is_rejected() {
        let mut comp = Compound::new();
        comp.insert("bad", vec![Value::Int(1), Value::String("two".to_string())]);
        let mut buf = Vec::new();
        assert!(matches!(to_writer(&mut buf, &comp), Err(NbtError::MixedList)));
    }

}
